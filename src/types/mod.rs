//! Wire-level data types shared across endpoints.

mod common;

pub use common::*;
