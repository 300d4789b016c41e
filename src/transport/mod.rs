//! HTTP transport abstraction.
//!
//! Endpoint bindings never talk to `reqwest` directly; they go through
//! [`Transport`] so tests can substitute a stub and callers can bring their
//! own HTTP layer.

mod http_transport;

pub use http_transport::ReqwestTransport;

use crate::error::Error;
use async_trait::async_trait;
use http::{Method, StatusCode};
use std::{sync::Arc, time::Duration};
use url::Url;

/// One outbound request, fully assembled (query already signed if needed).
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    /// Query pairs appended to the URL in the given order.
    pub query: Vec<(String, String)>,
    /// JSON body for POSTs, absent for GETs.
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

/// Raw reply before envelope decoding.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Trait implemented by any async HTTP layer.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynTransport = Arc<dyn Transport>;

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).send(req).await
    }
}
