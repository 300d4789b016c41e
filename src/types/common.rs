use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

/// Common envelope wrapped around every endpoint reply.
///
/// `result` only carries a value when the exchange reported success
/// (`ret_code == 0`); a non-zero code is surfaced as
/// [`Error::Exchange`](crate::Error::Exchange) instead, never as a partially
/// filled envelope.
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    pub ret_code: i64,
    pub ret_msg: String,
    pub ext_code: String,
    /// Shape undocumented by the exchange; kept untyped.
    pub ext_info: serde_json::Value,
    pub time_now: String,
    pub result: T,
}

/// Inverse-perpetual contract symbol, e.g. `BTCUSD`.
///
/// Kept open: unknown symbols pass through opaquely so new listings do not
/// require an SDK release.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(Cow<'static, str>);

impl Symbol {
    pub const BTCUSD: Symbol = Symbol(Cow::Borrowed("BTCUSD"));
    pub const ETHUSD: Symbol = Symbol(Cow::Borrowed("ETHUSD"));
    pub const EOSUSD: Symbol = Symbol(Cow::Borrowed("EOSUSD"));
    pub const XRPUSD: Symbol = Symbol(Cow::Borrowed("XRPUSD"));
    pub const DOTUSD: Symbol = Symbol(Cow::Borrowed("DOTUSD"));

    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settlement coin for wallet queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    BTC,
    ETH,
    EOS,
    XRP,
    DOT,
    USDT,
}

/// Order side. `None` appears on flat positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    GoodTillCancel,
    ImmediateOrCancel,
    FillOrKill,
    PostOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Created,
    Rejected,
    New,
    PartiallyFilled,
    Filled,
    Cancelled,
    PendingCancel,
}

/// Reference price source that activates a conditional order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerBy {
    LastPrice,
    IndexPrice,
    MarkPrice,
}

/// Kline interval for `/v2/public/kline/list` and the price-kline endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1")]
    Min1,
    #[serde(rename = "3")]
    Min3,
    #[serde(rename = "5")]
    Min5,
    #[serde(rename = "15")]
    Min15,
    #[serde(rename = "30")]
    Min30,
    #[serde(rename = "60")]
    Hour1,
    #[serde(rename = "120")]
    Hour2,
    #[serde(rename = "240")]
    Hour4,
    #[serde(rename = "360")]
    Hour6,
    #[serde(rename = "720")]
    Hour12,
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "W")]
    Week,
    #[serde(rename = "M")]
    Month,
}

/// Sampling period for open-interest and account-ratio statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "5min")]
    Min5,
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "30min")]
    Min30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
}

/// Cursor paging direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "prev")]
    Prev,
    #[serde(rename = "next")]
    Next,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_serializes_to_wire_token() {
        assert_eq!(serde_json::to_string(&Interval::Hour1).unwrap(), "\"60\"");
        assert_eq!(serde_json::to_string(&Interval::Day).unwrap(), "\"D\"");
    }

    #[test]
    fn unknown_order_status_is_rejected() {
        let err = serde_json::from_str::<OrderStatus>("\"Unheard\"");
        assert!(err.is_err());
    }

    #[test]
    fn symbol_passes_unknown_values_through() {
        let sym: Symbol = serde_json::from_str("\"SOLUSD\"").unwrap();
        assert_eq!(sym.as_str(), "SOLUSD");
    }
}
