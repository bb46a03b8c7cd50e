//! Command-line options.
//!
//! This module defines the `clap` option structs for the `wayback_cdx` binary.
//! Values are kept as plain strings where the library already knows how to
//! parse and validate them, so every error surfaces with the library's message.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    API_KEY_ENV_VAR, CDX_ENDPOINT, CONTENT_HOST, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::config::types::{ClientConfig, LogFormat, LogLevel};
use crate::query::{MatchType, OutputFormat};

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// # Every capture of a host, one per distinct digest
/// wayback_cdx query archive.org --match-type host --collapse digest
///
/// # Raw CDX lines for a single page
/// wayback_cdx raw archive.org/about --output cdx
///
/// # Download one snapshot
/// wayback_cdx fetch http://archive.org/ 20060102150405 --output about.html
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "wayback_cdx",
    version,
    about = "Queries the Wayback Machine CDX API and fetches archived snapshots."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// CDX search endpoint
    #[arg(long, global = true, default_value = CDX_ENDPOINT)]
    pub cdx_endpoint: String,

    /// Host prefix for archived snapshots
    #[arg(long, global = true, default_value = CONTENT_HOST)]
    pub content_host: String,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds (0 disables the timeout)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `wayback_cdx` binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query the CDX index and print one JSON object per capture
    Query(QueryArgs),

    /// Query the CDX index and stream the server response unchanged
    Raw {
        /// Query options
        #[command(flatten)]
        query: QueryArgs,

        /// Wire format of the response: cdx|json
        #[arg(long, value_enum, default_value_t = OutputFormat::Cdx)]
        output: OutputFormat,
    },

    /// Download the archived content of one capture
    Fetch {
        /// Original URL of the capture
        original: String,

        /// Capture timestamp (YYYYMMDDhhmmss)
        timestamp: String,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Options shared by the `query` and `raw` subcommands.
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// URL or URL pattern to look up
    pub url: String,

    /// Match mode: exact|prefix|host|domain
    #[arg(long, value_enum, default_value_t = MatchType::Exact)]
    pub match_type: MatchType,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<i64>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<i64>,

    /// Start of the time range (YYYYMMDDhhmmss)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End of the time range (YYYYMMDDhhmmss)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Regex filter `[!]field:regex` (repeatable, order is kept)
    #[arg(long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Collapse directive `field[:n]` (repeatable, order is kept)
    #[arg(long = "collapse", value_name = "COLLAPSE")]
    pub collapses: Vec<String>,

    /// Ask the server for an uncompressed response
    #[arg(long)]
    pub no_gzip: bool,

    /// Request this result page
    #[arg(long, conflicts_with_all = ["resume", "resume_key"])]
    pub page: Option<i64>,

    /// Enable resumption keys (the next key is printed to stderr)
    #[arg(long)]
    pub resume: bool,

    /// Continue a previous query from this resumption key (implies --resume)
    #[arg(long)]
    pub resume_key: Option<String>,

    /// CDX API key, sent as the `cdx-auth-token` cookie
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Opt {
    /// Builds the library HTTP configuration from the global options.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            cdx_endpoint: self.cdx_endpoint.clone(),
            content_host: self.content_host.clone(),
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}
