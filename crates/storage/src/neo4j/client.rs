use async_trait::async_trait;
use leakgraph_core::{Error, Neo4jConfig, Result};
use neo4rs::{ConfigBuilder, Graph, Query, Txn};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::traits::{GraphConnection, ReadTransaction};
use crate::row::ResultRow;
use crate::statement::{ReachableQuery, NAME_COLUMN};

/// Neo4j connection backed by a `neo4rs` pool
pub struct Neo4jConnection {
    graph: RwLock<Option<Graph>>,
    uri: String,
}

impl Neo4jConnection {
    /// Connect to Neo4j with the provided configuration
    ///
    /// `neo4rs` creates its pool lazily, so a `RETURN 1` ping runs before this
    /// returns. Unreachable hosts and rejected credentials fail here rather than
    /// on the first real query.
    ///
    /// # Errors
    /// * `Error::Connection` if the settings are invalid, the server cannot be
    ///   reached, or authentication fails
    ///
    /// # Example
    /// ```no_run
    /// use leakgraph_core::Neo4jConfig;
    /// use leakgraph_storage::{GraphConnection, Neo4jConnection};
    ///
    /// # async fn example(config: &Neo4jConfig) -> leakgraph_core::Result<()> {
    /// let connection = Neo4jConnection::connect(config).await?;
    /// connection.close().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: &Neo4jConfig) -> Result<Self> {
        let uri = config.uri();

        info!("Connecting to Neo4j at {}", uri);

        let neo4j_config = ConfigBuilder::default()
            .uri(uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .fetch_size(config.fetch_size)
            .max_connections(config.max_connections)
            .build()
            .map_err(|e| Error::connection(format!("Invalid Neo4j settings for {uri}: {e}")))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| Error::connection(format!("Failed to connect to Neo4j at {uri}: {e}")))?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| Error::connection(format!("Neo4j at {uri} is not responding: {e}")))?;

        debug!("Neo4j connection established");

        Ok(Self {
            graph: RwLock::new(Some(graph)),
            uri,
        })
    }
}

#[async_trait]
impl GraphConnection for Neo4jConnection {
    async fn begin_read(&self, database: &str) -> Result<Box<dyn ReadTransaction>> {
        let graph = self
            .graph
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::connection(format!("Connection to {} is closed", self.uri)))?;

        let txn = graph.start_txn_on(database).await.map_err(|e| {
            Error::connection(format!(
                "Failed to open a transaction on database '{database}': {e}"
            ))
        })?;

        debug!("Opened read transaction on database: {}", database);

        Ok(Box::new(Neo4jReadTransaction { txn }))
    }

    async fn close(&self) -> Result<()> {
        let mut graph = self.graph.write().await;
        if graph.take().is_some() {
            info!("Closed Neo4j connection to {}", self.uri);
        } else {
            debug!("Neo4j connection to {} was already closed", self.uri);
        }
        Ok(())
    }
}

/// Read transaction on a `neo4rs` explicit transaction
struct Neo4jReadTransaction {
    txn: Txn,
}

#[async_trait]
impl ReadTransaction for Neo4jReadTransaction {
    async fn fetch(&mut self, query: &ReachableQuery) -> Result<Vec<ResultRow>> {
        let mut stream = self
            .txn
            .execute(query.to_bolt())
            .await
            .map_err(|e| Error::query(format!("Failed to run reachability query: {e}")))?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .next(self.txn.handle())
            .await
            .map_err(|e| Error::query(format!("Failed to stream query results: {e}")))?
        {
            let name: Option<String> = row.get(NAME_COLUMN).map_err(|e| {
                Error::query(format!("Failed to read column '{NAME_COLUMN}': {e}"))
            })?;
            rows.push(ResultRow::new(name));
        }

        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.txn
            .commit()
            .await
            .map_err(|e| Error::query(format!("Failed to commit read transaction: {e}")))
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.txn
            .rollback()
            .await
            .map_err(|e| Error::query(format!("Failed to roll back read transaction: {e}")))
    }
}
