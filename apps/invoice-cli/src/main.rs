//! # invoice-cli entry point
//!
//! The actual setup is in lib.rs for testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match invoice_cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
