//! Error types shared between the library and the `oof` binary.
//!
//! The `OofError` enum unifies the failure cases of code validation, cart
//! persistence, and quote fetching, allowing both crates to propagate a single
//! error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the workspace.
#[derive(Error, Debug)]
pub enum OofError {
    /// I/O error originating from the standard library (config file, terminal).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A ticker code did not match any supported exchange pattern.
    #[error("Invalid ticker code: {0:?}")]
    InvalidCode(String),

    /// The user's home directory could not be resolved or does not exist.
    #[error("Home directory not found")]
    HomeNotFound,

    /// Failure while encoding/decoding the cart JSON document.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Transport-level failure of the quote request.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status code.
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),
}

impl OofError {
    /// Errors after which the process cannot continue and must exit non-zero.
    pub fn is_fatal(&self) -> bool {
        matches!(self, OofError::HomeNotFound)
    }
}
