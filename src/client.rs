//! Shared HTTP client behind every endpoint binding.

use crate::{
    api,
    auth::{Credentials, signature_payload},
    error::{Error, Result},
    transport::{DynTransport, ReqwestTransport, TransportRequest},
    types::ApiResponse,
};
use http::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const BODY_SNIPPET_MAX: usize = 2048;

/// Production REST base URL.
pub const MAINNET: &str = "https://api.bybit.com";
/// Testnet REST base URL.
pub const TESTNET: &str = "https://api-testnet.bybit.com";

/// Configures and constructs [`Client`].
pub struct ClientBuilder {
    base_url: Url,
    credentials: Option<Credentials>,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    no_proxy: bool,
    transport: Option<DynTransport>,
}

impl ClientBuilder {
    fn try_new(base: impl AsRef<str>) -> Result<Self> {
        let base_url = normalize_base_url(base.as_ref())?;
        Ok(Self {
            base_url,
            credentials: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            no_proxy: false,
            transport: None,
        })
    }

    /// Set the API key pair used to sign private requests.
    pub fn auth(mut self, api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(api_key, secret));
        self
    }

    /// Set prebuilt credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Adjust the per-request timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    /// Adjust the connection establishment timeout.
    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    /// Ignore system proxy environment variables.
    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Swap out the underlying transport (test doubles, custom HTTP stacks).
    pub fn transport(mut self, transport: DynTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Finalise configuration and build the client.
    pub fn build(self) -> Result<Client> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::try_new(
                &self.user_agent,
                self.timeout,
                self.connect_timeout,
                self.no_proxy,
            )?),
        };

        Ok(Client {
            inner: Arc::new(Inner {
                base: self.base_url,
                credentials: self.credentials,
                timeout: self.timeout,
                transport,
            }),
        })
    }
}

/// Shared client handle; cheap to clone.
///
/// Holds the base URL, optional credentials and the transport. Endpoint
/// services borrow it and issue one independent request per call; there is no
/// shared mutable state, so a single client may be used concurrently.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    base: Url,
    credentials: Option<Credentials>,
    timeout: Duration,
    transport: DynTransport,
}

impl Client {
    pub fn builder(base: impl AsRef<str>) -> Result<ClientBuilder> {
        ClientBuilder::try_new(base)
    }

    /// Unauthenticated client against a base URL.
    pub fn new(base: impl AsRef<str>) -> Result<Self> {
        Self::builder(base)?.build()
    }

    #[must_use]
    pub fn market(&self) -> api::MarketService {
        api::MarketService::new(self.clone())
    }

    #[must_use]
    pub fn order(&self) -> api::OrderService {
        api::OrderService::new(self.clone())
    }

    #[must_use]
    pub fn stop_order(&self) -> api::StopOrderService {
        api::StopOrderService::new(self.clone())
    }

    #[must_use]
    pub fn position(&self) -> api::PositionService {
        api::PositionService::new(self.clone())
    }

    #[must_use]
    pub fn wallet(&self) -> api::WalletService {
        api::WalletService::new(self.clone())
    }

    /// Unauthenticated GET with the parameter record as query string.
    pub(crate) async fn get_publicly<P, T>(
        &self,
        path: &'static str,
        param: &P,
    ) -> Result<ApiResponse<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let query = query_pairs(path, param)?;
        self.send(Method::GET, path, query, None).await
    }

    /// Signed GET. `api_key`, `timestamp` and `sign` are appended to the
    /// query; the signature covers all pairs sorted by key.
    pub(crate) async fn get_privately<P, T>(
        &self,
        path: &'static str,
        param: &P,
    ) -> Result<ApiResponse<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let creds = self.require_credentials()?;
        let mut pairs = query_pairs(path, param)?;
        pairs.push(("api_key".to_owned(), creds.api_key.clone()));
        pairs.push(("timestamp".to_owned(), now_millis().to_string()));
        let payload = signature_payload(&mut pairs);
        pairs.push(("sign".to_owned(), creds.sign(&payload)));
        self.send(Method::GET, path, pairs, None).await
    }

    /// Signed POST with the parameter record as JSON body. `api_key`,
    /// `timestamp` and `sign` become body fields.
    pub(crate) async fn post_json<P, T>(
        &self,
        path: &'static str,
        param: &P,
    ) -> Result<ApiResponse<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let creds = self.require_credentials()?;

        let value = serde_json::to_value(param).map_err(|err| Error::Encode {
            endpoint: path,
            source: Box::new(err),
        })?;
        let Value::Object(mut fields) = value else {
            return Err(Error::Encode {
                endpoint: path,
                source: "parameter record must encode to a JSON object".into(),
            });
        };

        fields.insert("api_key".to_owned(), Value::String(creds.api_key.clone()));
        fields.insert("timestamp".to_owned(), Value::from(now_millis()));

        let mut pairs: Vec<(String, String)> = fields
            .iter()
            .map(|(key, value)| (key.clone(), scalar_to_wire(value)))
            .collect();
        let payload = signature_payload(&mut pairs);
        fields.insert("sign".to_owned(), Value::String(creds.sign(&payload)));

        let body = serde_json::to_vec(&Value::Object(fields)).map_err(|err| Error::Encode {
            endpoint: path,
            source: Box::new(err),
        })?;

        self.send(Method::POST, path, Vec::new(), Some(body)).await
    }

    fn require_credentials(&self) -> Result<&Credentials> {
        self.inner
            .credentials
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig {
                message: "private endpoint requires API credentials".into(),
                source: None,
            })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &'static str,
        query: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse<T>> {
        let url = self
            .inner
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidConfig {
                message: "invalid endpoint URL".into(),
                source: Some(Box::new(err)),
            })?;

        tracing::debug!(%method, path, "sending request");

        let resp = self
            .inner
            .transport
            .send(TransportRequest {
                method: method.clone(),
                url,
                query,
                body,
                timeout: self.inner.timeout,
            })
            .await?;

        tracing::trace!(%method, path, status = %resp.status, "received response");

        if !resp.status.is_success() {
            return Err(Error::Http {
                status: resp.status,
                method,
                path: path.into(),
                body_snippet: body_snippet(&resp.body),
            });
        }

        decode_envelope(path, &resp.body)
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|err| Error::InvalidConfig {
        message: "invalid base_url".into(),
        source: Some(Box::new(err)),
    })?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::InvalidConfig {
            message: "base_url must not include query or fragment".into(),
            source: None,
        });
    }

    let path = url.path();
    if !path.ends_with('/') {
        url.set_path(&format!("{path}/"));
    }
    Ok(url)
}

/// Parameter record for endpoints that take no caller-supplied fields.
#[derive(Serialize)]
pub(crate) struct EmptyParam {}

/// Encode a parameter record as query pairs. Absent optional fields produce
/// no pair at all.
fn query_pairs<P: Serialize>(path: &'static str, param: &P) -> Result<Vec<(String, String)>> {
    let encoded = serde_urlencoded::to_string(param).map_err(|err| Error::Encode {
        endpoint: path,
        source: Box::new(err),
    })?;
    Ok(url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect())
}

/// Render a JSON scalar the way the exchange expects it inside the signature
/// payload: strings bare, numbers and bools via their JSON form.
fn scalar_to_wire(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn body_snippet(body: &[u8]) -> Option<Box<str>> {
    if body.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(body);
    let mut end = text.len().min(BODY_SNIPPET_MAX);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Some(text[..end].into())
}

#[derive(serde::Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    ret_code: i64,
    #[serde(default)]
    ret_msg: Option<String>,
    #[serde(default)]
    ext_code: Option<String>,
    #[serde(default)]
    ext_info: Value,
    #[serde(default)]
    time_now: Option<String>,
    #[serde(default)]
    result: Value,
}

/// Two-stage decode: the envelope first, then `result` only when the
/// exchange reported success. A non-zero `ret_code` never yields a value.
fn decode_envelope<T: DeserializeOwned>(path: &'static str, body: &[u8]) -> Result<ApiResponse<T>> {
    let raw: RawEnvelope = serde_json::from_slice(body).map_err(|err| Error::Decode {
        path: path.into(),
        source: Box::new(err),
    })?;

    if raw.ret_code != 0 {
        return Err(Error::Exchange {
            ret_code: raw.ret_code,
            ret_msg: raw.ret_msg.unwrap_or_default(),
            ext_code: raw.ext_code.unwrap_or_default(),
            path: path.into(),
        });
    }

    let result = serde_json::from_value(raw.result).map_err(|err| Error::Decode {
        path: path.into(),
        source: Box::new(err),
    })?;

    Ok(ApiResponse {
        ret_code: raw.ret_code,
        ret_msg: raw.ret_msg.unwrap_or_default(),
        ext_code: raw.ext_code.unwrap_or_default(),
        ext_info: raw.ext_info,
        time_now: raw.time_now.unwrap_or_default(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Probe {
        symbol: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    }

    #[test]
    fn query_pairs_omit_absent_optionals() {
        let pairs = query_pairs(
            "/probe",
            &Probe {
                symbol: "BTCUSD",
                limit: None,
            },
        )
        .unwrap();
        assert_eq!(pairs, vec![("symbol".to_owned(), "BTCUSD".to_owned())]);
    }

    #[test]
    fn query_pairs_include_present_optionals() {
        let pairs = query_pairs(
            "/probe",
            &Probe {
                symbol: "BTCUSD",
                limit: Some(50),
            },
        )
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("symbol".to_owned(), "BTCUSD".to_owned()),
                ("limit".to_owned(), "50".to_owned()),
            ]
        );
    }

    #[test]
    fn envelope_error_code_surfaces_exchange_message() {
        let body = br#"{"ret_code":10002,"ret_msg":"invalid timestamp","ext_code":"","ext_info":null,"result":null,"time_now":"1700000000.000000"}"#;
        let err = decode_envelope::<serde_json::Value>("/probe", body).unwrap_err();
        match err {
            Error::Exchange {
                ret_code, ret_msg, ..
            } => {
                assert_eq!(ret_code, 10002);
                assert_eq!(ret_msg, "invalid timestamp");
            }
            other => panic!("expected exchange error, got {other:?}"),
        }
    }

    #[test]
    fn envelope_success_decodes_result() {
        let body = br#"{"ret_code":0,"ret_msg":"OK","ext_code":"","ext_info":"","result":7.5,"time_now":"1700000000.000000"}"#;
        let resp = decode_envelope::<f64>("/probe", body).unwrap();
        assert_eq!(resp.result, 7.5);
        assert_eq!(resp.ret_msg, "OK");
    }

    #[test]
    fn scalar_to_wire_renders_bare_strings() {
        assert_eq!(scalar_to_wire(&Value::String("BTCUSD".into())), "BTCUSD");
        assert_eq!(scalar_to_wire(&Value::from(10)), "10");
        assert_eq!(scalar_to_wire(&Value::Bool(true)), "true");
    }

    #[test]
    fn base_url_rejects_query() {
        assert!(normalize_base_url("https://api.bybit.com?x=1").is_err());
    }
}
