//! Mock graph connection for testing

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use async_trait::async_trait;
use leakgraph_core::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{GraphConnection, ReadTransaction};
use crate::row::ResultRow;
use crate::statement::ReachableQuery;

/// A statement the mock was asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedQuery {
    pub database: String,
    pub text: String,
    pub subject: String,
    pub limit: u32,
}

#[derive(Debug, Default)]
struct MockData {
    reachable: HashMap<String, Vec<Option<String>>>, // subject -> names in traversal order
    begin_error: Option<String>,
    query_error: Option<String>,
    close_error: Option<String>,
    executed: Vec<ExecutedQuery>,
    closed: bool,
    close_count: usize,
    commit_count: usize,
    rollback_count: usize,
}

/// Mock graph connection for testing
///
/// Serves canned names per subject and applies `DISTINCT` and `LIMIT` the way
/// the database would, keeping first-seen order. Counts commits, rollbacks and
/// closes so tests can assert on resource release.
#[derive(Clone)]
pub struct MockGraphConnection {
    data: Arc<Mutex<MockData>>,
}

impl MockGraphConnection {
    /// Create a new mock connection with no data
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData::default())),
        }
    }

    /// Register the names reachable from `subject`, in the order the database returns them
    pub fn with_reachable<I, S>(self, subject: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(|n| Some(n.into())).collect();
        self.data
            .lock()
            .unwrap()
            .reachable
            .insert(subject.to_string(), names);
        self
    }

    /// Register reachable nodes that may lack a `name` property
    pub fn with_reachable_rows(self, subject: &str, names: Vec<Option<String>>) -> Self {
        self.data
            .lock()
            .unwrap()
            .reachable
            .insert(subject.to_string(), names);
        self
    }

    /// Make every `begin_read` fail with a connection error
    pub fn failing_begin(self, message: &str) -> Self {
        self.data.lock().unwrap().begin_error = Some(message.to_string());
        self
    }

    /// Make every `fetch` fail with a query error
    pub fn failing_query(self, message: &str) -> Self {
        self.data.lock().unwrap().query_error = Some(message.to_string());
        self
    }

    /// Make `close` fail with a connection error; the close is still counted
    pub fn failing_close(self, message: &str) -> Self {
        self.data.lock().unwrap().close_error = Some(message.to_string());
        self
    }

    /// Statements run so far
    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.data.lock().unwrap().executed.clone()
    }

    /// Number of times `close` was called
    pub fn close_count(&self) -> usize {
        self.data.lock().unwrap().close_count
    }

    /// Number of committed transactions
    pub fn commit_count(&self) -> usize {
        self.data.lock().unwrap().commit_count
    }

    /// Number of rolled back transactions
    pub fn rollback_count(&self) -> usize {
        self.data.lock().unwrap().rollback_count
    }
}

impl Default for MockGraphConnection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphConnection for MockGraphConnection {
    async fn begin_read(&self, database: &str) -> Result<Box<dyn ReadTransaction>> {
        let data = self.data.lock().unwrap();
        if data.closed {
            return Err(Error::connection("Connection is closed"));
        }
        if let Some(message) = &data.begin_error {
            return Err(Error::connection(message.clone()));
        }

        Ok(Box::new(MockReadTransaction {
            data: Arc::clone(&self.data),
            database: database.to_string(),
        }))
    }

    async fn close(&self) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        data.closed = true;
        data.close_count += 1;
        match &data.close_error {
            Some(message) => Err(Error::connection(message.clone())),
            None => Ok(()),
        }
    }
}

struct MockReadTransaction {
    data: Arc<Mutex<MockData>>,
    database: String,
}

#[async_trait]
impl ReadTransaction for MockReadTransaction {
    async fn fetch(&mut self, query: &ReachableQuery) -> Result<Vec<ResultRow>> {
        let mut data = self.data.lock().unwrap();
        data.executed.push(ExecutedQuery {
            database: self.database.clone(),
            text: query.text().to_string(),
            subject: query.subject().to_string(),
            limit: query.limit(),
        });

        if let Some(message) = &data.query_error {
            return Err(Error::query(message.clone()));
        }

        let mut rows: Vec<ResultRow> = Vec::new();
        let names = data.reachable.get(query.subject()).cloned().unwrap_or_default();
        for name in names {
            if rows.len() == query.limit() as usize {
                break;
            }
            let row = ResultRow::new(name);
            if !rows.contains(&row) {
                rows.push(row);
            }
        }

        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.data.lock().unwrap().commit_count += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.data.lock().unwrap().rollback_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo4j::traits::read_reachable_names;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_mock_applies_distinct_and_limit() {
        let names: Vec<String> = (0..30).map(|i| format!("node-{}", i % 25)).collect();
        let mock = MockGraphConnection::new().with_reachable("Subject", names);
        let query = ReachableQuery::officer("Subject").unwrap();

        let mut tx = mock.begin_read("neo4j").await.unwrap();
        let rows = read_reachable_names(tx.as_mut(), &query).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0], ResultRow::named("node-0"));
        assert_eq!(rows[19], ResultRow::named("node-19"));
        assert_eq!(mock.commit_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_executed_statement() {
        let mock = MockGraphConnection::new();
        let query = ReachableQuery::officer("Nobody").unwrap();

        let mut tx = mock.begin_read("offshore").await.unwrap();
        let rows = tx.fetch(&query).await.unwrap();
        tx.rollback().await.unwrap();

        assert!(rows.is_empty());
        assert_eq!(
            mock.executed(),
            vec![ExecutedQuery {
                database: "offshore".to_string(),
                text: query.text().to_string(),
                subject: "Nobody".to_string(),
                limit: 20,
            }]
        );
        assert_eq!(mock.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_rejects_begin_after_close() {
        let mock = MockGraphConnection::new();
        mock.close().await.unwrap();

        let err = mock.begin_read("neo4j").await.err().unwrap();
        assert!(err.is_connection());
        assert_eq!(mock.close_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_close_failure_still_counts() {
        let mock = MockGraphConnection::new().failing_close("connection reset by peer");

        let err = mock.close().await.unwrap_err();
        assert!(err.is_connection());
        assert_eq!(mock.close_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_query_failure_is_query_error() {
        let mock = MockGraphConnection::new().failing_query("Invalid input 'MATCHX'");
        let query = ReachableQuery::officer("Subject").unwrap();

        let mut tx = mock.begin_read("neo4j").await.unwrap();
        let err = tx.fetch(&query).await.unwrap_err();
        assert!(err.is_query());
    }
}
