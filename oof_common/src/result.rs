//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `OofError`, so functions can simply return `Result<T>`.
use crate::error::OofError;

/// Workspace-wide `Result` alias with `OofError` as the default error.
pub type Result<T, E = OofError> = std::result::Result<T, E>;
