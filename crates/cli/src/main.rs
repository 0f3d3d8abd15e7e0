//! leakgraph CLI - reachability queries over an offshore-leaks graph
//!
//! Prints the names of every node reachable from an officer within a bounded
//! number of hops.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::Parser;
use leakgraph::{query_and_print, OutputFormat, DEFAULT_SUBJECT};
use leakgraph_core::config::{Config, Scheme};
use leakgraph_storage::{Neo4jConnection, ReachableQuery};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "leakgraph")]
#[command(about = "List entities reachable from a named officer in a Neo4j graph")]
#[command(version)]
struct Cli {
    /// Display name of the officer to start from
    #[arg(default_value = DEFAULT_SUBJECT)]
    subject: String,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Neo4j host
    #[arg(long)]
    host: Option<String>,

    /// Neo4j Bolt port
    #[arg(long)]
    port: Option<u16>,

    /// Transport scheme (neo4j or bolt)
    #[arg(long)]
    scheme: Option<Scheme>,

    /// Use TLS (neo4j+s / bolt+s)
    #[arg(long, overrides_with = "no_tls")]
    tls: bool,

    /// Disable TLS even when the config file enables it
    #[arg(long, overrides_with = "tls")]
    no_tls: bool,

    /// Neo4j username
    #[arg(short, long)]
    user: Option<String>,

    /// Neo4j password
    #[arg(short, long)]
    password: Option<String>,

    /// Target database
    #[arg(short, long)]
    database: Option<String>,

    /// Maximum number of hops from the officer
    #[arg(long)]
    max_hops: Option<u32>,

    /// Maximum number of names returned
    #[arg(long)]
    limit: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file and environment settings
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.neo4j.host = host.clone();
        }
        if let Some(port) = self.port {
            config.neo4j.port = port;
        }
        if let Some(scheme) = self.scheme {
            config.neo4j.scheme = scheme;
        }
        if self.tls {
            config.neo4j.tls = true;
        } else if self.no_tls {
            config.neo4j.tls = false;
        }
        if let Some(user) = &self.user {
            config.neo4j.user = user.clone();
        }
        if let Some(password) = &self.password {
            config.neo4j.password = password.clone();
        }
        if let Some(database) = &self.database {
            config.neo4j.database = database.clone();
        }
        if let Some(max_hops) = self.max_hops {
            config.traversal.max_hops = max_hops;
        }
        if let Some(limit) = self.limit {
            config.traversal.limit = limit;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let query = ReachableQuery::new(&config.traversal, cli.subject.as_str())?;
    debug!("Prepared statement: {}", query.text());

    let connection = Neo4jConnection::connect(&config.neo4j).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    query_and_print(connection, &config.neo4j.database, &query, cli.format, &mut out).await?;

    Ok(())
}

/// Initialize logging system
///
/// Logs go to stderr so stdout carries only query results. `RUST_LOG`
/// takes precedence over `--verbose` when set.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "leakgraph={level},leakgraph_core={level},leakgraph_storage={level},neo4rs=warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}
