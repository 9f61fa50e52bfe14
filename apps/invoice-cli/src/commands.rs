//! # Command Handlers
//!
//! ```text
//! validate:  read ──► gst_core::validate ──► verdict (JSON on stdout)
//! generate:  read ──► gst_core::assemble ──► render ──► stdout
//!                                               └────► store (unless --no-save)
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use gst_core::{assemble, validate, DocumentRenderer, DocumentStore, ValidationVerdict};

/// What `generate` should emit and whether to persist it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    pub json: bool,
    pub save: bool,
}

/// Result of a successful `generate`.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Text to print on stdout.
    pub output: String,
    /// Where the rendered document was stored, if it was.
    pub saved_to: Option<String>,
}

/// Reads a JSON payload from `path`, or from stdin when `path` is `-`.
pub fn read_payload(path: &Path) -> Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read payload from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Payload is not valid JSON")
}

pub fn run_validate(payload: &Value) -> ValidationVerdict {
    let verdict = validate(payload);
    match &verdict.message {
        None => info!("Payload is valid"),
        Some(message) => warn!(%message, "Payload rejected"),
    }
    verdict
}

pub fn run_generate<R, S>(
    payload: &Value,
    renderer: &R,
    store: &S,
    options: GenerateOptions,
) -> Result<GenerateOutcome>
where
    R: DocumentRenderer,
    S: DocumentStore,
{
    let model = assemble(payload)?;
    debug!(
        invoice_number = model.invoice_number(),
        items = model.items.len(),
        intra_state = model.is_intra_state(),
        "Invoice assembled"
    );

    let document = renderer.render(&model).context("Failed to render invoice")?;

    let output = if options.json {
        serde_json::to_string_pretty(&model).context("Failed to serialize invoice")?
    } else {
        String::from_utf8_lossy(&document).into_owned()
    };

    let saved_to = if options.save {
        let location = store
            .save(&document, model.invoice_number(), renderer.file_extension())
            .context("Failed to save invoice")?;
        Some(location)
    } else {
        info!(invoice_number = model.invoice_number(), "Skipping save");
        None
    };

    Ok(GenerateOutcome { output, saved_to })
}
