//! Position and leverage endpoints.

use crate::{
    Client, Result,
    client::EmptyParam,
    types::{ApiResponse, Side, Symbol},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SymbolParam {
    symbol: Symbol,
}

/// One inverse-perpetual position.
///
/// The exchange mixes representations here: margin and price fields are
/// numeric strings while size and PnL fields are JSON numbers.
#[derive(Clone, Debug, Deserialize)]
pub struct ListPositionResult {
    pub id: i64,
    pub user_id: i64,
    pub risk_id: i64,
    pub symbol: Symbol,
    pub side: Side,
    pub size: f64,
    pub position_value: String,
    pub entry_price: String,
    pub is_isolated: bool,
    pub auto_add_margin: f64,
    pub leverage: String,
    pub effective_leverage: String,
    pub position_margin: String,
    pub liq_price: String,
    pub bust_price: String,
    pub occ_closing_fee: String,
    pub occ_funding_fee: String,
    pub take_profit: String,
    pub stop_loss: String,
    pub trailing_stop: String,
    pub position_status: String,
    pub deleverage_indicator: i64,
    pub oc_calc_data: String,
    pub order_margin: String,
    pub wallet_balance: String,
    pub realised_pnl: String,
    pub unrealised_pnl: f64,
    pub cum_realised_pnl: String,
    pub cross_seq: f64,
    pub position_seq: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Entry of the all-symbols position listing.
#[derive(Clone, Debug, Deserialize)]
pub struct ListPositionsResult {
    pub is_valid: bool,
    pub data: ListPositionResult,
}

#[derive(Clone, Debug, Serialize)]
pub struct SaveLeverageParam {
    pub symbol: Symbol,
    pub leverage: f64,
}

/// Position APIs.
#[derive(Clone)]
pub struct PositionService {
    client: Client,
}

impl PositionService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `GET /v2/private/position/list` for one symbol.
    pub async fn list(&self, symbol: Symbol) -> Result<ApiResponse<ListPositionResult>> {
        self.client
            .get_privately("/v2/private/position/list", &SymbolParam { symbol })
            .await
    }

    /// `GET /v2/private/position/list` across all symbols.
    pub async fn list_all(&self) -> Result<ApiResponse<Vec<ListPositionsResult>>> {
        self.client
            .get_privately("/v2/private/position/list", &EmptyParam {})
            .await
    }

    /// `POST /v2/private/position/leverage/save`
    ///
    /// The result is the applied leverage as a bare number.
    pub async fn save_leverage(&self, param: SaveLeverageParam) -> Result<ApiResponse<f64>> {
        self.client
            .post_json("/v2/private/position/leverage/save", &param)
            .await
    }
}
