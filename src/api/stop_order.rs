//! Conditional (stop) order endpoints.

use crate::{
    Client, Result,
    types::{ApiResponse, OrderType, Side, Symbol, TimeInForce, TriggerBy},
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct CreateStopOrderParam {
    pub side: Side,
    pub symbol: Symbol,
    pub order_type: OrderType,
    pub qty: i64,
    /// Market price at submission time; the exchange uses it to decide which
    /// side of `stop_px` the trigger sits on.
    pub base_price: f64,
    pub stop_px: f64,
    pub time_in_force: TimeInForce,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_by: Option<TriggerBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_on_trigger: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_trigger_by: Option<TriggerBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_trigger_by: Option<TriggerBy>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateStopOrderResult {
    pub user_id: i64,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    pub price: String,
    pub qty: String,
    pub time_in_force: TimeInForce,
    pub remark: String,
    pub leaves_qty: String,
    pub leaves_value: String,
    pub stop_px: String,
    pub reject_reason: String,
    pub stop_order_id: String,
    pub order_link_id: String,
    pub trigger_by: TriggerBy,
    pub base_price: String,
    pub created_at: String,
    pub updated_at: String,
    pub tp_trigger_by: TriggerBy,
    pub sl_trigger_by: TriggerBy,
    pub take_profit: String,
    pub stop_loss: String,
}

/// Conditional-order APIs.
#[derive(Clone)]
pub struct StopOrderService {
    client: Client,
}

impl StopOrderService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `POST /v2/private/stop-order/create`
    pub async fn create(
        &self,
        param: CreateStopOrderParam,
    ) -> Result<ApiResponse<CreateStopOrderResult>> {
        self.client
            .post_json("/v2/private/stop-order/create", &param)
            .await
    }
}
