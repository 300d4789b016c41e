//! Wallet endpoints.

use crate::{
    Client, Result,
    types::{ApiResponse, Coin},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize)]
struct CoinParam {
    coin: Coin,
}

/// Per-coin wallet balance.
#[derive(Clone, Debug, Deserialize)]
pub struct Balance {
    pub equity: f64,
    pub available_balance: f64,
    pub used_margin: f64,
    pub order_margin: f64,
    pub position_margin: f64,
    pub occ_closing_fee: f64,
    pub occ_funding_fee: f64,
    pub wallet_balance: f64,
    pub realised_pnl: f64,
    pub unrealised_pnl: f64,
    pub cum_realised_pnl: f64,
    pub given_cash: f64,
    pub service_cash: f64,
}

/// The balance reply keys entries by coin.
pub type BalanceResult = HashMap<Coin, Balance>;

/// Wallet APIs.
#[derive(Clone)]
pub struct WalletService {
    client: Client,
}

impl WalletService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `GET /v2/private/wallet/balance`
    pub async fn balance(&self, coin: Coin) -> Result<ApiResponse<BalanceResult>> {
        self.client
            .get_privately("/v2/private/wallet/balance", &CoinParam { coin })
            .await
    }
}
