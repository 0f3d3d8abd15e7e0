//! Library interface for the leakgraph CLI
//!
//! Exposes the runner and output rendering for integration testing while
//! keeping argument parsing and logging setup in main.rs.

pub mod output;
pub mod runner;

pub use output::{write_rows, OutputFormat};
pub use runner::{read_in_transaction, run_scoped};

use leakgraph_core::Result;
use leakgraph_storage::{GraphConnection, ReachableQuery};
use std::io::Write;

/// Subject used when none is given on the command line
pub const DEFAULT_SUBJECT: &str = "Stuart Onslow-Smith";

/// Run `query` on `connection`, release it, then print the rows to `out`
///
/// Nothing is written unless the query succeeded.
pub async fn query_and_print<C, W>(
    connection: C,
    database: &str,
    query: &ReachableQuery,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize>
where
    C: GraphConnection,
    W: Write,
{
    let rows = run_scoped(connection, database, query).await?;
    write_rows(out, &rows, format)?;
    Ok(rows.len())
}
