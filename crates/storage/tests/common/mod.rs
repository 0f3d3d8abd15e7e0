//! Test utilities for storage layer integration tests

use anyhow::{Context, Result};
use leakgraph_core::{Neo4jConfig, Scheme};
use neo4rs::{query, Graph};
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tokio::sync::Mutex as TokioMutex;

/// Global shared Neo4j instance (drops when last Arc is dropped)
static SHARED_NEO4J: OnceLock<TokioMutex<Weak<TestNeo4j>>> = OnceLock::new();

/// Test Neo4j container using testcontainers-rs
pub struct TestNeo4j {
    #[allow(dead_code)]
    container: ContainerAsync<GenericImage>,
    bolt_port: u16,
}

impl TestNeo4j {
    /// Start a new Neo4j instance
    ///
    /// Uses Neo4j Community Edition with authentication disabled for testing.
    pub async fn start() -> Result<Self> {
        // Note: with_wait_for must come before with_env_var since the latter
        // converts GenericImage to ContainerRequest<GenericImage>
        let container = GenericImage::new("neo4j", "5-community")
            .with_exposed_port(ContainerPort::Tcp(7687))
            .with_wait_for(WaitFor::message_on_stdout("Started."))
            .with_env_var("NEO4J_AUTH", "none")
            .with_startup_timeout(Duration::from_secs(90))
            .start()
            .await
            .context("Failed to start Neo4j container")?;

        let bolt_port = container
            .get_host_port_ipv4(7687)
            .await
            .context("Failed to get Neo4j Bolt port")?;

        Ok(Self {
            container,
            bolt_port,
        })
    }

    /// Get the Bolt connection URL
    pub fn bolt_url(&self) -> String {
        format!("bolt://localhost:{}", self.bolt_port)
    }

    /// Connection settings pointing at this container
    pub fn config(&self) -> Neo4jConfig {
        Neo4jConfig {
            host: "localhost".to_string(),
            port: self.bolt_port,
            scheme: Scheme::Bolt,
            ..Neo4jConfig::default()
        }
    }
}

/// Get or create the shared Neo4j instance
///
/// Tests keep isolation by seeding officers with unique names.
pub async fn get_shared_neo4j() -> Result<Arc<TestNeo4j>> {
    let lock = SHARED_NEO4J.get_or_init(|| TokioMutex::new(Weak::new()));
    let mut guard = lock.lock().await;

    if let Some(neo4j) = guard.upgrade() {
        Ok(neo4j)
    } else {
        eprintln!("Starting shared Neo4j instance for all tests...");
        let neo4j = Arc::new(TestNeo4j::start().await?);
        *guard = Arc::downgrade(&neo4j);
        Ok(neo4j)
    }
}

/// Seed an officer linked to `entities`, each entity registered at `address`
///
/// Layout: `(officer)-[:OFFICER_OF]->(entity)-[:REGISTERED_ADDRESS]->(address)`,
/// plus one `SIMILAR` edge to a decoy entity that the default traversal must ignore.
pub async fn seed_officer(
    neo4j: &TestNeo4j,
    officer: &str,
    entities: &[String],
    address: &str,
) -> Result<()> {
    let graph = Graph::new(neo4j.bolt_url(), "", "")
        .await
        .context("Failed to connect to Neo4j for seeding")?;

    graph
        .run(query("CREATE (:Officer {name: $officer})").param("officer", officer))
        .await
        .context("Failed to create officer")?;

    for entity in entities {
        graph
            .run(
                query(
                    "MATCH (o:Officer {name: $officer})
                     MERGE (a:Address {name: $address})
                     CREATE (o)-[:OFFICER_OF]->(e:Entity {name: $entity})
                     CREATE (e)-[:REGISTERED_ADDRESS]->(a)",
                )
                .param("officer", officer)
                .param("entity", entity.as_str())
                .param("address", address),
            )
            .await
            .context("Failed to create entity")?;
    }

    graph
        .run(
            query(
                "MATCH (o:Officer {name: $officer})
                 CREATE (o)-[:SIMILAR]->(:Entity {name: $decoy})",
            )
            .param("officer", officer)
            .param("decoy", format!("{officer} decoy")),
        )
        .await
        .context("Failed to create decoy entity")?;

    Ok(())
}
