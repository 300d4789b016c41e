use http::{Method, StatusCode};
use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// All errors returned by the SDK.
///
/// Failures are surfaced immediately; nothing here retries or recovers.
/// Every variant names the endpoint (or its path) it came from so a failure
/// can be diagnosed without a network trace.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An endpoint precondition was unmet. Raised before any network call.
    #[error("invalid parameters for {endpoint}: {message}")]
    Validation {
        endpoint: &'static str,
        message: &'static str,
    },

    /// A parameter record could not be serialized to its wire form.
    #[error("failed to encode parameters for {endpoint}: {source}")]
    Encode {
        endpoint: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The HTTP call itself failed (connect, timeout, TLS, ...).
    #[error("transport error during {method} {path}: {source}")]
    Transport {
        method: Method,
        path: Box<str>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Non-2xx HTTP response, forwarded without interpretation.
    #[error("HTTP {status} ({method} {path})")]
    Http {
        status: StatusCode,
        method: Method,
        path: Box<str>,
        body_snippet: Option<Box<str>>,
    },

    /// The envelope decoded but the exchange reported a non-zero `ret_code`.
    #[error("exchange error {ret_code} on {path}: {ret_msg}")]
    Exchange {
        ret_code: i64,
        ret_msg: String,
        ext_code: String,
        path: Box<str>,
    },

    /// The reply payload did not match the expected result shape.
    #[error("decode error during {path}: {source}")]
    Decode {
        path: Box<str>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Client construction or credential problems.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl Error {
    /// Exchange `ret_code` for [`Error::Exchange`], `None` otherwise.
    #[must_use]
    pub fn ret_code(&self) -> Option<i64> {
        match self {
            Self::Exchange { ret_code, .. } => Some(*ret_code),
            _ => None,
        }
    }

    /// HTTP status, where one was observed.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
