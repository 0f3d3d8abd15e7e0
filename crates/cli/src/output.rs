//! Rendering result rows to stdout

use clap::ValueEnum;
use leakgraph_core::{Error, Result};
use leakgraph_storage::ResultRow;
use std::io::Write;

/// How result rows are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One name per line
    #[default]
    Text,
    /// A JSON array of names
    Json,
}

/// Write `rows` to `out` in database order
pub fn write_rows<W: Write>(out: &mut W, rows: &[ResultRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for row in rows {
                writeln!(out, "{row}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, rows)
                .map_err(|e| Error::invalid_input(format!("Failed to encode results: {e}")))?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
