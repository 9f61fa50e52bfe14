//! # invoice-cli
//!
//! Command-line front end for the GST invoice pipeline.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           invoice-cli                                   │
//! │                                                                         │
//! │  main.rs ─────► calls run(), maps the outcome to an exit code          │
//! │                                                                         │
//! │  lib.rs ──────► parses args, loads settings, sets up logging           │
//! │                                                                         │
//! │  commands ────► validate / generate                                     │
//! │                                                                         │
//! │  render ──────► TextRenderer (DocumentRenderer)                         │
//! │                                                                         │
//! │  config ──────► Settings (defaults ◄ invoice.toml ◄ INVOICE__*)         │
//! └─────────────────────────────────┬───────────────────────────────────────┘
//!                                   │
//!                 ┌─────────────────┴─────────────────┐
//!                 ▼                                   ▼
//!         gst-core (pure logic)            gst-store (filesystem)
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Load settings
//! 3. Initialize tracing (stderr, so stdout stays machine-readable)
//! 4. Run the subcommand

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gst_store::FsDocumentStore;

use crate::cli::{Cli, Command};
use crate::commands::GenerateOptions;
use crate::config::Settings;
use crate::render::TextRenderer;

/// Runs the CLI to completion.
///
/// Returns a failing exit code when the payload is rejected by `validate`;
/// every other failure comes back as an error.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    init_tracing(&settings.log_filter);
    info!(output_dir = %settings.output_dir.display(), "Settings loaded");

    match cli.command {
        Command::Validate { payload } => {
            let payload = commands::read_payload(&payload)?;
            let verdict = commands::run_validate(&payload);
            println!("{}", serde_json::to_string_pretty(&verdict)?);

            Ok(if verdict.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Generate {
            payload,
            json,
            no_save,
        } => {
            let payload = commands::read_payload(&payload)?;
            let store = FsDocumentStore::new(&settings.output_dir);
            let options = GenerateOptions {
                json,
                save: !no_save,
            };

            let outcome = commands::run_generate(&payload, &TextRenderer, &store, options)?;
            print!("{}", outcome.output);
            if let Some(location) = outcome.saved_to {
                eprintln!("Invoice saved to {location}");
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter when set.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
