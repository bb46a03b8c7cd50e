//! Subcommand handlers.
//!
//! Handlers write their results to the given writers instead of the process
//! streams so they can be exercised in tests.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::app::query::build_query;
use crate::client::CdxClient;
use crate::config::QueryArgs;
use crate::query::{parse_timestamp, OutputFormat};

/// Runs `query`: one JSON object per capture on `out`.
///
/// When resumption keys are enabled, the key to continue from is written to
/// `notes` as `resume key: <key>`.
pub fn run_query<W: Write, N: Write>(
    client: &CdxClient,
    args: &QueryArgs,
    out: &mut W,
    notes: &mut N,
) -> Result<usize> {
    let mut query = build_query(args).context("Invalid query")?;
    let records = client.perform(&mut query).context("CDX query failed")?;

    for record in &records {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    if query.resumption_key_enabled() && !query.resumption_key().is_empty() {
        writeln!(notes, "resume key: {}", query.resumption_key())?;
    }
    info!("Printed {} captures", records.len());
    Ok(records.len())
}

/// Runs `raw`: copies the server response to `out` unchanged.
pub fn run_raw<W: Write>(
    client: &CdxClient,
    args: &QueryArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<u64> {
    let mut query = build_query(args).context("Invalid query")?;
    query.set_output_format(format);
    let mut raw = client.raw_perform(&query).context("CDX query failed")?;
    let copied = io::copy(&mut raw, out).context("Failed to read CDX response")?;
    out.flush()?;
    info!("Copied {} bytes from {}", copied, raw.url());
    Ok(copied)
}

/// Runs `fetch`: downloads one capture to `path`, or to `out` when no path is given.
pub fn run_fetch<W: Write>(
    client: &CdxClient,
    original: &str,
    timestamp: &str,
    path: Option<&Path>,
    out: &mut W,
) -> Result<u64> {
    let timestamp = parse_timestamp(timestamp)
        .with_context(|| format!("Invalid timestamp {timestamp:?} (expected YYYYMMDDhhmmss)"))?;
    let mut snapshot = client.snapshot(original, timestamp);
    snapshot
        .open()
        .with_context(|| format!("Failed to fetch {}", snapshot.url()))?;

    let copied = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let copied = io::copy(&mut snapshot, &mut writer)?;
            writer.flush()?;
            copied
        }
        None => {
            let copied = io::copy(&mut snapshot, out)?;
            out.flush()?;
            copied
        }
    };
    info!("Fetched {} bytes from {}", copied, snapshot.url());
    Ok(copied)
}
