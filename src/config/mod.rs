//! Application configuration and constants.
//!
//! This module provides:
//! - Endpoint, header and wire-format constants
//! - HTTP client configuration and validation
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Command, Opt, QueryArgs};
pub use constants::*;
pub use types::{ClientConfig, ConfigValidationError, LogFormat, LogLevel};
