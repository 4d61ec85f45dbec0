//!
//! Common types and utilities shared by the `oof` quote viewer.
//!
//! This crate aggregates:
//! - `error` — unified error type `OofError` used across the workspace.
//! - `result` — handy `Result<T, OofError>` alias.
//! - `ticker` — ticker code validation and exchange prefixes.
//! - `quote` — quote records and the upstream payload decoder.
//! - `cart` — the persisted cart of favourite codes.
//! - `net` — upstream constants and URL helpers.
#![warn(missing_docs)]
pub mod cart;
pub mod error;
pub mod net;
pub mod quote;
pub mod result;
pub mod ticker;

pub use cart::{CartConfig, ConfigStore};
pub use error::OofError;
pub use quote::QuoteRecord;
pub use result::Result;
pub use ticker::TickerCode;
