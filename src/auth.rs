//! API credentials and request signing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// An API secret that never appears in `Debug`/`Display` output.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Bybit API key pair used to sign private requests.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub(crate) api_key: String,
    secret: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: SecretString::new(secret),
        }
    }

    /// Hex HMAC-SHA256 of `payload` under the API secret.
    pub(crate) fn sign(&self, payload: &str) -> String {
        // HMAC accepts keys of any length.
        let mut mac = HmacSha256::new_from_slice(self.secret.expose().as_bytes())
            .expect("HMAC key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Build the v2 signature payload: pairs sorted by key, joined `k=v&k=v`.
///
/// The `sign` pair itself is never part of the payload.
pub(crate) fn signature_payload(pairs: &mut Vec<(String, String)>) -> String {
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    let mut payload = String::new();
    for (key, value) in pairs.iter() {
        if !payload.is_empty() {
            payload.push('&');
        }
        payload.push_str(key);
        payload.push('=');
        payload.push_str(value);
    }
    payload
}
