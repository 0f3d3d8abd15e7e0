//! Transaction-scoped execution of the reachability query

use leakgraph_core::Result;
use leakgraph_storage::{read_reachable_names, GraphConnection, ReachableQuery, ResultRow};
use tracing::{info, warn};

/// Run `query` inside one read transaction on `database`
///
/// Commits when every row was read. On failure the transaction is rolled back
/// and the query error is returned; a failed rollback is only logged.
pub async fn read_in_transaction<C>(
    connection: &C,
    database: &str,
    query: &ReachableQuery,
) -> Result<Vec<ResultRow>>
where
    C: GraphConnection + ?Sized,
{
    let mut tx = connection.begin_read(database).await?;

    match read_reachable_names(tx.as_mut(), query).await {
        Ok(rows) => {
            tx.commit().await?;
            Ok(rows)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Failed to roll back read transaction: {rollback_err}");
            }
            Err(e)
        }
    }
}

/// Run `query` and release `connection`, whatever the outcome
///
/// Takes ownership so the connection is closed exactly once. A query error
/// wins over a close error; a close error after a successful read is returned.
pub async fn run_scoped<C>(
    connection: C,
    database: &str,
    query: &ReachableQuery,
) -> Result<Vec<ResultRow>>
where
    C: GraphConnection,
{
    info!(subject = %query.subject(), database, "Running reachability query");

    let result = read_in_transaction(&connection, database, query).await;
    let closed = connection.close().await;

    match (result, closed) {
        (Ok(rows), Ok(())) => {
            info!("Found {} reachable names", rows.len());
            Ok(rows)
        }
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("Failed to close connection after query error: {close_err}");
            Err(e)
        }
    }
}
