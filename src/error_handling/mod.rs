//! Error handling.
//!
//! This module provides the error types returned by the library:
//! - [`CdxError`] for query configuration, transport and decoding failures
//! - [`InitializationError`] for logger and HTTP client setup

mod types;

// Re-export public API
pub use types::{CdxError, InitializationError, Result};
