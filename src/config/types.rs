//! Configuration types.
//!
//! This module defines the library-level HTTP configuration and the logging
//! enums shared with the CLI.

use clap::ValueEnum;

use crate::config::constants::{
    CDX_ENDPOINT, CONTENT_HOST, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// HTTP configuration for talking to the Wayback Machine (no CLI dependencies).
///
/// The endpoints are configurable so that mirrors or local test servers can
/// stand in for `web.archive.org`.
///
/// # Examples
///
/// ```
/// use wayback_cdx::ClientConfig;
///
/// let config = ClientConfig {
///     timeout_seconds: 30,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// CDX search endpoint, without the trailing `?`
    pub cdx_endpoint: String,

    /// Host prefix for archived content, without a trailing `/`
    pub content_host: String,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Per-request timeout in seconds (0 = no timeout)
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cdx_endpoint: CDX_ENDPOINT.to_string(),
            content_host: CONTENT_HOST.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for '{field}': {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is expected instead
    pub message: String,
}

impl ClientConfig {
    /// Checks that the endpoints are absolute http(s) URLs and the user agent is set.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigValidationError`] found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validate_endpoint("cdx_endpoint", &self.cdx_endpoint)?;
        validate_endpoint("content_host", &self.content_host)?;
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "user_agent",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_endpoint(field: &'static str, value: &str) -> Result<(), ConfigValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigValidationError {
                field,
                message: format!("scheme must be http or https, got '{other}'"),
            }),
        },
        Err(e) => Err(ConfigValidationError {
            field,
            message: format!("expected an absolute URL like 'https://web.archive.org' ({e})"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_format_debug() {
        assert_eq!(format!("{:?}", LogFormat::Plain), "Plain");
        assert_eq!(format!("{:?}", LogFormat::Json), "Json");
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.cdx_endpoint, "https://web.archive.org/cdx/search/cdx");
        assert_eq!(config.content_host, "http://web.archive.org/web");
        assert_eq!(
            config.user_agent,
            concat!("wayback_cdx/", env!("CARGO_PKG_VERSION"))
        );
        assert_eq!(config.timeout_seconds, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_relative_endpoint() {
        let config = ClientConfig {
            cdx_endpoint: "web.archive.org/cdx".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "cdx_endpoint");
        assert!(err.message.contains("absolute URL"));
    }

    #[test]
    fn test_validate_rejects_non_http_content_host() {
        let config = ClientConfig {
            content_host: "ftp://web.archive.org/web".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "content_host");
        assert!(err.message.contains("ftp"));
    }

    #[test]
    fn test_validate_rejects_blank_user_agent() {
        let config = ClientConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "user_agent");
    }
}
