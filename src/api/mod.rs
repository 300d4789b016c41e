//! Endpoint bindings, one module per API area.
//!
//! The SDK surface is exposed via service accessors on [`Client`](crate::Client):
//! - `Client::market()` — public market data
//! - `Client::order()` / `Client::stop_order()` — active and conditional orders
//! - `Client::position()` — positions and leverage
//! - `Client::wallet()` — wallet balances

pub mod market;
pub mod order;
pub mod position;
pub mod stop_order;
pub mod wallet;

pub use market::*;
pub use order::*;
pub use position::*;
pub use stop_order::*;
pub use wallet::*;
