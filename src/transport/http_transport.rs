use super::{Transport, TransportRequest, TransportResponse};
use crate::error::Error;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default transport built on `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Construct a new transport.
    ///
    /// * `ua` – User-Agent header.
    /// * `timeout` – per-request timeout.
    /// * `connect_timeout` – connection establishment timeout.
    /// * `no_proxy` – ignore system proxy environment variables.
    pub fn try_new(
        ua: &str,
        timeout: Duration,
        connect_timeout: Duration,
        no_proxy: bool,
    ) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .user_agent(ua)
            .connect_timeout(connect_timeout)
            .timeout(timeout);

        if no_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(|err| Error::InvalidConfig {
            message: "failed to build HTTP client".into(),
            source: Some(Box::new(err)),
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let TransportRequest {
            method,
            url,
            query,
            body,
            timeout,
        } = req;

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .timeout(timeout);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = body {
            builder = builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let transport_err = |e: reqwest::Error| Error::Transport {
            method: method.clone(),
            path: url.path().to_string().into_boxed_str(),
            source: Box::new(e),
        };

        let resp = builder.send().await.map_err(transport_err)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(transport_err)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
