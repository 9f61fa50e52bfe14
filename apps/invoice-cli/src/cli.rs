//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Validate GST invoice payloads and generate invoices from them.
#[derive(Debug, Parser)]
#[command(name = "invoice-cli", version, about)]
pub struct Cli {
    /// TOML config file (defaults to ./invoice.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a payload against the invoice schema
    Validate {
        /// JSON payload file, or `-` for stdin
        payload: PathBuf,
    },

    /// Build an invoice from a payload, print it and save it
    Generate {
        /// JSON payload file, or `-` for stdin
        payload: PathBuf,

        /// Print the render model as JSON instead of the text invoice
        #[arg(long)]
        json: bool,

        /// Skip writing the rendered invoice to the output directory
        #[arg(long)]
        no_save: bool,
    },
}
