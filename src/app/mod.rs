//! Command-line application.
//!
//! This module turns parsed [`Opt`](crate::config::Opt) values into library
//! calls and writes their results for the `wayback_cdx` binary.

mod commands;
mod query;

use std::io;

use anyhow::{Context, Result};

use crate::client::CdxClient;
use crate::config::{Command, Opt};

// Re-export public API
pub use commands::{run_fetch, run_query, run_raw};
pub use query::build_query;

/// Runs the subcommand selected in `opt` against stdout and stderr.
///
/// # Errors
///
/// Returns an error with context if the client cannot be built, the query
/// options are invalid, or a request fails.
pub fn run(opt: &Opt) -> Result<()> {
    let client = CdxClient::new(opt.client_config()).context("Failed to initialize HTTP client")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &opt.command {
        Command::Query(args) => {
            run_query(&client, args, &mut out, &mut io::stderr())?;
        }
        Command::Raw { query, output } => {
            run_raw(&client, query, *output, &mut out)?;
        }
        Command::Fetch {
            original,
            timestamp,
            output,
        } => {
            run_fetch(&client, original, timestamp, output.as_deref(), &mut out)?;
        }
    }
    Ok(())
}
