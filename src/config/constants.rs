//! Configuration constants.
//!
//! This module defines the endpoints, header values and wire formats used when
//! talking to the Wayback Machine.

/// Default CDX search endpoint (query parameters are appended after `?`).
pub const CDX_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";

/// Default host prefix for archived content.
///
/// Snapshots are served from `<host>/<timestamp>/<original-url>`.
pub const CONTENT_HOST: &str = "http://web.archive.org/web";

/// Default User-Agent string for HTTP requests.
///
/// Sent on both the CDX endpoint and the content endpoint so the archive can
/// identify the client. Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("wayback_cdx/", env!("CARGO_PKG_VERSION"));

/// Name of the cookie carrying the CDX API key.
pub const AUTH_COOKIE_NAME: &str = "cdx-auth-token";

/// Environment variable consulted by the CLI when `--api-key` is not given.
pub const API_KEY_ENV_VAR: &str = "WAYBACK_CDX_API_KEY";

/// `chrono` format of the fixed-width capture timestamp (`YYYYMMDDhhmmss`).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Number of digits in a capture timestamp.
pub const TIMESTAMP_DIGITS: usize = 14;

/// Sentinel the CDX server writes for fields it does not know.
pub const UNKNOWN_FIELD_SENTINEL: &str = "-";

/// Number of fields in a CDX data row.
pub const CDX_ROW_FIELDS: usize = 7;

/// Default per-request timeout in seconds (0 disables the timeout).
///
/// CDX queries over large domains can take a long time on the server side,
/// so the default is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
