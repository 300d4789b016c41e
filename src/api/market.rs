//! Public market-data endpoints. None of these require credentials.

use crate::{
    Client, Result,
    types::{ApiResponse, Interval, Period, Side, Symbol},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SymbolParam {
    symbol: Symbol,
}

/// One price level of the L2 order book.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderBookResult {
    pub symbol: Symbol,
    pub price: String,
    pub size: f64,
    pub side: Side,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListKlineParam {
    pub symbol: Symbol,
    pub interval: Interval,
    pub from: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListKlineResult {
    pub symbol: Symbol,
    pub interval: Interval,
    pub open_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub turnover: String,
}

/// 24h ticker snapshot. The exchange sends most prices as strings here.
#[derive(Clone, Debug, Deserialize)]
pub struct TickersResult {
    pub symbol: Symbol,
    pub bid_price: String,
    pub ask_price: String,
    pub last_price: String,
    pub last_tick_direction: String,
    pub prev_price_24h: String,
    pub price_24h_pcnt: String,
    pub high_price_24h: String,
    pub low_price_24h: String,
    pub prev_price_1h: String,
    pub price_1h_pcnt: String,
    pub mark_price: String,
    pub index_price: String,
    pub open_interest: f64,
    pub open_value: String,
    pub total_turnover: String,
    pub turnover_24h: String,
    pub total_volume: f64,
    pub volume_24h: f64,
    pub funding_rate: String,
    pub predicted_funding_rate: String,
    pub next_funding_time: String,
    pub countdown_hour: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct TradingRecordsParam {
    pub symbol: Symbol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TradingRecordsResult {
    pub id: i64,
    pub symbol: Symbol,
    pub price: f64,
    pub qty: f64,
    pub side: Side,
    pub time: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LeverageFilter {
    pub min_leverage: f64,
    pub max_leverage: f64,
    pub leverage_step: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PriceFilter {
    pub min_price: String,
    pub max_price: String,
    pub tick_size: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LotSizeFilter {
    pub max_trading_qty: f64,
    pub min_trading_qty: f64,
    pub qty_step: f64,
}

/// Contract metadata from `/v2/public/symbols`.
#[derive(Clone, Debug, Deserialize)]
pub struct SymbolsResult {
    pub name: String,
    pub alias: String,
    pub status: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub price_scale: f64,
    pub taker_fee: String,
    pub maker_fee: String,
    pub funding_interval: i64,
    pub leverage_filter: LeverageFilter,
    pub price_filter: PriceFilter,
    pub lot_size_filter: LotSizeFilter,
}

#[derive(Clone, Debug, Serialize)]
pub struct MarkPriceKlineParam {
    pub symbol: Symbol,
    pub interval: Interval,
    pub from: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Mark-price kline. OHLC arrives as JSON numbers on this endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct MarkPriceKlineResult {
    pub symbol: Symbol,
    pub period: Interval,
    pub start_at: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct IndexPriceKlineParam {
    pub symbol: Symbol,
    pub interval: Interval,
    pub from: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Index-price kline. OHLC arrives as numeric strings on this endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct IndexPriceKlineResult {
    pub symbol: Symbol,
    pub period: Interval,
    pub open_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PremiumIndexKlineParam {
    pub symbol: Symbol,
    pub interval: Interval,
    pub from: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PremiumIndexKlineResult {
    pub symbol: Symbol,
    pub period: Interval,
    pub open_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct OpenInterestParam {
    pub symbol: Symbol,
    pub period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OpenInterestResult {
    pub open_interest: f64,
    pub timestamp: i64,
    pub symbol: Symbol,
}

#[derive(Clone, Debug, Serialize)]
pub struct BigDealParam {
    pub symbol: Symbol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BigDealResult {
    pub symbol: Symbol,
    pub side: Side,
    pub timestamp: i64,
    pub value: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct AccountRatioParam {
    pub symbol: Symbol,
    pub period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AccountRatioResult {
    pub symbol: Symbol,
    pub buy_ratio: f64,
    pub sell_ratio: f64,
    pub timestamp: i64,
}

/// Public market-data APIs.
#[derive(Clone)]
pub struct MarketService {
    client: Client,
}

impl MarketService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `GET /v2/public/orderBook/L2`
    pub async fn order_book(
        &self,
        symbol: Symbol,
    ) -> Result<ApiResponse<Vec<OrderBookResult>>> {
        self.client
            .get_publicly("/v2/public/orderBook/L2", &SymbolParam { symbol })
            .await
    }

    /// `GET /v2/public/kline/list`
    pub async fn list_kline(
        &self,
        param: ListKlineParam,
    ) -> Result<ApiResponse<Vec<ListKlineResult>>> {
        self.client.get_publicly("/v2/public/kline/list", &param).await
    }

    /// `GET /v2/public/tickers`
    pub async fn tickers(&self, symbol: Symbol) -> Result<ApiResponse<Vec<TickersResult>>> {
        self.client
            .get_publicly("/v2/public/tickers", &SymbolParam { symbol })
            .await
    }

    /// `GET /v2/public/trading-records`
    pub async fn trading_records(
        &self,
        param: TradingRecordsParam,
    ) -> Result<ApiResponse<Vec<TradingRecordsResult>>> {
        self.client
            .get_publicly("/v2/public/trading-records", &param)
            .await
    }

    /// `GET /v2/public/symbols`
    pub async fn symbols(&self) -> Result<ApiResponse<Vec<SymbolsResult>>> {
        self.client
            .get_publicly("/v2/public/symbols", &crate::client::EmptyParam {})
            .await
    }

    /// `GET /v2/public/mark-price-kline`
    pub async fn mark_price_kline(
        &self,
        param: MarkPriceKlineParam,
    ) -> Result<ApiResponse<Vec<MarkPriceKlineResult>>> {
        self.client
            .get_publicly("/v2/public/mark-price-kline", &param)
            .await
    }

    /// `GET /v2/public/index-price-kline`
    pub async fn index_price_kline(
        &self,
        param: IndexPriceKlineParam,
    ) -> Result<ApiResponse<Vec<IndexPriceKlineResult>>> {
        self.client
            .get_publicly("/v2/public/index-price-kline", &param)
            .await
    }

    /// `GET /v2/public/premium-index-kline`
    pub async fn premium_index_kline(
        &self,
        param: PremiumIndexKlineParam,
    ) -> Result<ApiResponse<Vec<PremiumIndexKlineResult>>> {
        self.client
            .get_publicly("/v2/public/premium-index-kline", &param)
            .await
    }

    /// `GET /v2/public/open-interest`
    pub async fn open_interest(
        &self,
        param: OpenInterestParam,
    ) -> Result<ApiResponse<Vec<OpenInterestResult>>> {
        self.client.get_publicly("/v2/public/open-interest", &param).await
    }

    /// `GET /v2/public/big-deal`
    pub async fn big_deal(
        &self,
        param: BigDealParam,
    ) -> Result<ApiResponse<Vec<BigDealResult>>> {
        self.client.get_publicly("/v2/public/big-deal", &param).await
    }

    /// `GET /v2/public/account-ratio`
    pub async fn account_ratio(
        &self,
        param: AccountRatioParam,
    ) -> Result<ApiResponse<Vec<AccountRatioResult>>> {
        self.client.get_publicly("/v2/public/account-ratio", &param).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kline_param_omits_unset_limit() {
        let param = ListKlineParam {
            symbol: Symbol::BTCUSD,
            interval: Interval::Hour1,
            from: 1700000000,
            limit: None,
        };
        let encoded = serde_urlencoded::to_string(&param).unwrap();
        assert_eq!(encoded, "symbol=BTCUSD&interval=60&from=1700000000");
    }

    #[test]
    fn order_book_result_keeps_price_as_string() {
        let body = r#"{
            "symbol": "BTCUSD",
            "price": "9487.5",
            "size": 75272,
            "side": "Buy"
        }"#;
        let level: OrderBookResult = serde_json::from_str(body).unwrap();
        assert_eq!(level.price, "9487.5");
        assert_eq!(level.size, 75272.0);
        assert_eq!(level.side, Side::Buy);
    }

    #[test]
    fn premium_index_kline_result_decodes_string_ohlc() {
        let body = r#"{
            "symbol": "BTCUSD",
            "period": "60",
            "open_time": 1582231260,
            "open": "0.000588",
            "high": "0.000618",
            "low": "0.000588",
            "close": "0.000618"
        }"#;
        let kline: PremiumIndexKlineResult = serde_json::from_str(body).unwrap();
        assert_eq!(kline.period, Interval::Hour1);
        assert_eq!(kline.close, "0.000618");
    }
}
