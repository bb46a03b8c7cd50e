//! HTTP client initialization.

use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder};

use crate::config::ClientConfig;
use crate::error_handling::InitializationError;

/// Initializes the blocking HTTP client shared by queries and snapshot fetches.
///
/// Creates a `reqwest::blocking::Client` configured with:
/// - User-Agent header from the configuration
/// - Timeout from the configuration (none when `timeout_seconds` is 0)
/// - Redirect following (the content host redirects to the closest capture)
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns `InitializationError::ConfigError` if the configuration does not
/// validate, or `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &ClientConfig) -> Result<Client, InitializationError> {
    config.validate()?;
    let mut builder = ClientBuilder::new().user_agent(config.user_agent.clone());
    builder = if config.timeout_seconds > 0 {
        builder.timeout(Duration::from_secs(config.timeout_seconds))
    } else {
        builder.timeout(None)
    };
    Ok(builder.build()?)
}
