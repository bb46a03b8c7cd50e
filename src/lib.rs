//! wayback_cdx library: client for the Wayback Machine CDX API
//!
//! This library builds CDX index queries, performs them, decodes the returned
//! rows into typed records and fetches archived content lazily.
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use wayback_cdx::{CdxClient, CdxQuery, ClientConfig, Field, MatchType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CdxClient::new(ClientConfig::default())?;
//!
//! let mut query = CdxQuery::new("archive.org")?;
//! query.set_match_type(MatchType::Host);
//! query.add_regex_filter(Field::StatusCode, "200", false)?;
//! query.set_resumption_key(true, "")?;
//!
//! let mut records = client.perform(&mut query)?;
//! println!("{} captures, continue from {:?}", records.len(), query.resumption_key());
//!
//! if let Some(first) = records.first_mut() {
//!     let mut html = String::new();
//!     first.content().read_to_string(&mut html)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! All network calls are blocking. Impose latency bounds through
//! [`ClientConfig::timeout_seconds`]; nothing is retried.

#![warn(missing_docs)]

pub mod app;
mod client;
pub mod config;
mod error_handling;
pub mod initialization;
mod query;
mod record;
mod snapshot;

// Re-export public API
pub use client::{CdxClient, RawQuery};
pub use config::{ClientConfig, ConfigValidationError, LogFormat, LogLevel};
pub use error_handling::{CdxError, InitializationError, Result};
pub use query::{
    format_timestamp, parse_timestamp, validate_target, CdxQuery, Field, MatchType, OutputFormat,
};
pub use record::CdxRecord;
pub use snapshot::{Snapshot, SnapshotStatus};
