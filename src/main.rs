//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `wayback_cdx` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use wayback_cdx::app::run;
use wayback_cdx::config::Opt;
use wayback_cdx::initialization::init_logger_with;

fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting WAYBACK_CDX_API_KEY in .env without exporting it manually
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(&opt) {
        eprintln!("wayback_cdx error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
