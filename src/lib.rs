//! Typed client for Bybit's inverse-perpetual futures REST API.
//!
//! One async function per exchange endpoint, grouped into services reachable
//! from [`Client`]: [`Client::market`], [`Client::order`],
//! [`Client::stop_order`], [`Client::position`] and [`Client::wallet`].
//! Each function takes a typed parameter record, encodes it to the wire form
//! the endpoint expects (query string for reads, JSON body for writes) and
//! decodes the common response envelope into a typed result.
//!
//! ```no_run
//! use bybit_inverse::{Client, Symbol};
//!
//! # async fn run() -> bybit_inverse::Result<()> {
//! let client = Client::builder("https://api.bybit.com")?
//!     .auth("api-key", "api-secret")
//!     .build()?;
//!
//! let book = client.market().order_book(Symbol::BTCUSD).await?;
//! println!("best level: {:?}", book.result.first());
//! # Ok(())
//! # }
//! ```

pub mod api;
mod auth;
mod client;
mod error;
pub mod transport;
pub mod types;

pub use auth::{Credentials, SecretString};
pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use types::*;
