//! Active-order endpoints. All of these are signed.
//!
//! Write operations cause real state change on the exchange; the SDK adds no
//! idempotence of its own. Callers who need deduplication on
//! [`OrderService::create`] should supply `order_link_id`.

use crate::{
    Client, Error, Result,
    types::{
        ApiResponse, Direction, OrderStatus, OrderType, Side, Symbol, TimeInForce, TriggerBy,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct CreateOrderParam {
    pub side: Side,
    pub symbol: Symbol,
    pub order_type: OrderType,
    pub qty: i64,
    pub time_in_force: TimeInForce,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_on_trigger: Option<bool>,
    /// Client-assigned deduplication token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
}

/// Reply to order creation. Numeric fields arrive as JSON numbers here,
/// unlike the list/query replies which send strings.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateOrderResult {
    pub user_id: i64,
    pub order_id: String,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    pub price: f64,
    pub qty: f64,
    pub time_in_force: TimeInForce,
    pub order_status: OrderStatus,
    pub last_exec_time: f64,
    pub last_exec_price: f64,
    pub leaves_qty: f64,
    pub cum_exec_qty: f64,
    pub cum_exec_value: f64,
    pub cum_exec_fee: f64,
    pub reject_reason: String,
    pub order_link_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListOrderParam {
    pub symbol: Symbol,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// One order in a paged listing. Quantities and prices are numeric strings
/// on this endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ListOrder {
    pub user_id: i64,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    pub price: String,
    pub qty: String,
    pub time_in_force: TimeInForce,
    pub order_status: OrderStatus,
    pub leaves_qty: String,
    pub leaves_value: String,
    pub cum_exec_qty: String,
    pub cum_exec_value: String,
    pub cum_exec_fee: String,
    pub reject_reason: String,
    pub order_link_id: String,
    pub created_at: String,
    pub order_id: String,
    pub take_profit: String,
    pub stop_loss: String,
    pub tp_trigger_by: TriggerBy,
    pub sl_trigger_by: TriggerBy,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListOrderResult {
    #[serde(rename = "data")]
    pub orders: Vec<ListOrder>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CancelOrderParam {
    pub symbol: Symbol,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
}

/// Reply to order cancellation; same shape as [`CreateOrderResult`] on the
/// wire.
#[derive(Clone, Debug, Deserialize)]
pub struct CancelOrderResult {
    pub user_id: i64,
    pub order_id: String,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    pub price: f64,
    pub qty: f64,
    pub time_in_force: TimeInForce,
    pub order_status: OrderStatus,
    pub last_exec_time: f64,
    pub last_exec_price: f64,
    pub leaves_qty: f64,
    pub cum_exec_qty: f64,
    pub cum_exec_value: f64,
    pub cum_exec_fee: f64,
    pub reject_reason: String,
    pub order_link_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CancelAllOrderParam {
    pub symbol: Symbol,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CancelAllOrderResult {
    #[serde(rename = "clOrdID")]
    pub cl_ord_id: String,
    pub order_link_id: String,
    pub user_id: i64,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    pub price: String,
    pub qty: f64,
    pub time_in_force: TimeInForce,
    pub create_type: String,
    pub cancel_type: String,
    pub order_status: OrderStatus,
    pub leaves_qty: f64,
    pub leaves_value: String,
    pub created_at: String,
    pub updated_at: String,
    pub cross_status: String,
    pub cross_seq: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct QueryOrderParam {
    pub symbol: Symbol,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct QueryOrderResult {
    pub user_id: i64,
    pub position_idx: i64,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    pub price: String,
    pub qty: f64,
    pub time_in_force: TimeInForce,
    pub order_status: OrderStatus,
    /// Undocumented grab-bag the exchange attaches to some orders.
    #[serde(default)]
    pub ext_fields: HashMap<String, Value>,
    pub last_exec_time: String,
    pub leaves_qty: i64,
    pub leaves_value: String,
    pub cum_exec_qty: i64,
    pub cum_exec_value: String,
    pub cum_exec_fee: String,
    pub reject_reason: String,
    pub cancel_type: String,
    pub order_link_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub order_id: String,
    pub take_profit: String,
    pub stop_loss: String,
    pub tp_trigger_by: TriggerBy,
    pub sl_trigger_by: TriggerBy,
}

/// Active-order APIs.
#[derive(Clone)]
pub struct OrderService {
    client: Client,
}

impl OrderService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `POST /v2/private/order/create`
    pub async fn create(
        &self,
        param: CreateOrderParam,
    ) -> Result<ApiResponse<CreateOrderResult>> {
        self.client.post_json("/v2/private/order/create", &param).await
    }

    /// `GET /v2/private/order/list`
    pub async fn list(&self, param: ListOrderParam) -> Result<ApiResponse<ListOrderResult>> {
        self.client.get_privately("/v2/private/order/list", &param).await
    }

    /// `POST /v2/private/order/cancel`
    ///
    /// At least one of `order_id` / `order_link_id` must be set; the check
    /// runs before any network call.
    pub async fn cancel(
        &self,
        param: CancelOrderParam,
    ) -> Result<ApiResponse<CancelOrderResult>> {
        if param.order_id.is_none() && param.order_link_id.is_none() {
            return Err(Error::Validation {
                endpoint: "/v2/private/order/cancel",
                message: "either order_id or order_link_id is required",
            });
        }
        self.client.post_json("/v2/private/order/cancel", &param).await
    }

    /// `POST /v2/private/order/cancelAll`
    pub async fn cancel_all(
        &self,
        param: CancelAllOrderParam,
    ) -> Result<ApiResponse<Vec<CancelAllOrderResult>>> {
        self.client.post_json("/v2/private/order/cancelAll", &param).await
    }

    /// `GET /v2/private/order`
    pub async fn query(
        &self,
        param: QueryOrderParam,
    ) -> Result<ApiResponse<Vec<QueryOrderResult>>> {
        self.client.get_privately("/v2/private/order", &param).await
    }
}
