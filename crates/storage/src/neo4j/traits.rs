use async_trait::async_trait;
use leakgraph_core::Result;

use crate::row::ResultRow;
use crate::statement::ReachableQuery;

/// A read transaction bound to one database
///
/// Finishing consumes the transaction, so a handle is committed or rolled back
/// at most once.
#[async_trait]
pub trait ReadTransaction: Send {
    /// Run the statement and materialize every row it returns
    ///
    /// # Errors
    /// * `Error::Query` if the database rejects the statement or the stream fails
    async fn fetch(&mut self, query: &ReachableQuery) -> Result<Vec<ResultRow>>;

    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Roll the transaction back
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// An open, authenticated connection to a graph database
///
/// The connection is an explicit value: callers open it, pass it to the code
/// that needs it, and release it with [`GraphConnection::close`].
#[async_trait]
pub trait GraphConnection: Send + Sync {
    /// Begin a read transaction on `database`
    ///
    /// # Errors
    /// * `Error::Connection` if the connection is closed or a session cannot be acquired
    async fn begin_read(&self, database: &str) -> Result<Box<dyn ReadTransaction>>;

    /// Release the connection
    ///
    /// Subsequent calls to [`GraphConnection::begin_read`] fail.
    async fn close(&self) -> Result<()>;
}

/// Read every node reachable from the statement's subject
///
/// This is the whole read-side unit of work: it takes a transaction handle and
/// returns a materialized list of rows, leaving commit and rollback to the caller.
pub async fn read_reachable_names(
    tx: &mut dyn ReadTransaction,
    query: &ReachableQuery,
) -> Result<Vec<ResultRow>> {
    tracing::debug!(subject = %query.subject(), statement = %query.text(), "Reading reachable names");

    let rows = tx.fetch(query).await?;

    tracing::debug!(rows = rows.len(), "Reachability query returned");
    Ok(rows)
}
