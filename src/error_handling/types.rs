//! Error type definitions.
//!
//! This module defines all error types used throughout the library.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The HTTP configuration did not validate.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigValidationError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors produced while configuring, performing or decoding a CDX query.
///
/// Configuration variants are returned synchronously by the setter that
/// rejected the value; the query is left untouched in that case. Parse
/// failures of the underlying facilities are carried through verbatim.
#[derive(Error, Debug)]
pub enum CdxError {
    /// No target URL is configured, or it does not follow the URL grammar.
    #[error("Invalid URL (this field is mandatory)")]
    InvalidUrl,

    /// The target URL uses a scheme other than `http`, `https` or none.
    #[error("The provided URL must use 'http', 'https' or '' as scheme")]
    InvalidScheme,

    /// Unknown match type.
    #[error("Invalid matchType: {0}")]
    InvalidMatchType(String),

    /// Unknown output format.
    #[error("Invalid output format: {0}")]
    InvalidOutputFormat(String),

    /// The end of a time range lies before its start.
    #[error("Parameter 'to' must not be earlier than 'from'")]
    InvalidFromTo,

    /// Unknown CDX field name.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// A count, offset or page number is out of range.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Pagination and resumption keys were both requested.
    #[error("Pagination and resumption keys can not be enabled at the same time")]
    PaginationResumptionConflict,

    /// The archive answered with a status other than 200.
    #[error("Bad response from Wayback Machine (HTTP {0})")]
    BadResponse(StatusCode),

    /// A CDX row had neither one nor seven fields.
    #[error("Malformed CDX row {index}: expected 7 fields, got {fields}")]
    MalformedRow {
        /// Position of the row in the response (0 is the label row)
        index: usize,
        /// Number of fields found
        fields: usize,
    },

    /// A regex filter pattern did not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] ReqwestError),

    /// I/O failure while reading a response body.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The response body was not a JSON array of string arrays.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A status code or length field was not an integer.
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    /// A timestamp was not in `YYYYMMDDhhmmss` form.
    #[error(transparent)]
    Timestamp(#[from] chrono::ParseError),
}

impl CdxError {
    /// Returns `true` for errors raised while validating query settings.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CdxError::InvalidUrl
                | CdxError::InvalidScheme
                | CdxError::InvalidMatchType(_)
                | CdxError::InvalidOutputFormat(_)
                | CdxError::InvalidFromTo
                | CdxError::InvalidField(_)
                | CdxError::InvalidNumber(_)
                | CdxError::PaginationResumptionConflict
                | CdxError::Regex(_)
        )
    }
}

/// Convenience alias for results carrying a [`CdxError`].
pub type Result<T, E = CdxError> = std::result::Result<T, E>;
