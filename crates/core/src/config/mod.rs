//! Configuration module for leakgraph
//!
//! Configuration can be loaded from a TOML file and/or environment variables;
//! the CLI applies its flags on top before calling [`Config::validate`].

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub use defaults::{MAX_TRAVERSAL_HOPS, MAX_TRAVERSAL_LIMIT};

use defaults::*;

/// Node labels a traversal may start from
pub const ALLOWED_START_LABELS: &[&str] = &["Officer", "Entity", "Intermediary", "Address", "Other"];

/// Relationship types a traversal may follow (prevents Cypher injection)
pub const ALLOWED_RELATIONSHIP_TYPES: &[&str] = &[
    "OFFICER_OF",
    "INTERMEDIARY_OF",
    "REGISTERED_ADDRESS",
    "SIMILAR",
    "SAME_AS",
    "SAME_NAME_AS",
    "SAME_ADDRESS_AS",
    "SAME_ID_AS",
    "CONNECTED_TO",
    "UNDERLYING",
    "SAME_COMPANY_AS",
    "SAME_INTERMEDIARY_AS",
    "PROBABLY_SAME_OFFICER_AS",
];

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.leakgraph/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".leakgraph").join("config.toml"))
}

/// Bolt transport scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Routing-capable scheme (`neo4j://`)
    #[default]
    Neo4j,
    /// Direct single-server scheme (`bolt://`)
    Bolt,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Neo4j => write!(f, "neo4j"),
            Scheme::Bolt => write!(f, "bolt"),
        }
    }
}

impl std::str::FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "neo4j" => Ok(Scheme::Neo4j),
            "bolt" => Ok(Scheme::Bolt),
            other => Err(Error::config(format!(
                "Invalid scheme '{other}'. Must be one of: neo4j, bolt"
            ))),
        }
    }
}

/// Connection descriptor for the graph database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo4jConfig {
    /// Neo4j host address
    #[serde(default = "default_neo4j_host")]
    pub host: String,

    /// Neo4j Bolt port
    #[serde(default = "default_neo4j_bolt_port")]
    pub port: u16,

    /// Transport scheme
    #[serde(default = "default_neo4j_scheme")]
    pub scheme: Scheme,

    /// Use the TLS variant of the scheme (`neo4j+s`, `bolt+s`)
    #[serde(default)]
    pub tls: bool,

    /// Neo4j username
    #[serde(default = "default_neo4j_user")]
    pub user: String,

    /// Neo4j password
    #[serde(default)]
    pub password: String,

    /// Target database name
    #[serde(default = "default_neo4j_database")]
    pub database: String,

    /// Rows pulled per round trip by the driver
    #[serde(default = "default_neo4j_fetch_size")]
    pub fetch_size: usize,

    /// Driver connection pool size
    #[serde(default = "default_neo4j_max_connections")]
    pub max_connections: usize,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            host: default_neo4j_host(),
            port: default_neo4j_bolt_port(),
            scheme: default_neo4j_scheme(),
            tls: false,
            user: default_neo4j_user(),
            password: String::new(),
            database: default_neo4j_database(),
            fetch_size: default_neo4j_fetch_size(),
            max_connections: default_neo4j_max_connections(),
        }
    }
}

impl Neo4jConfig {
    /// Connection URI in the form `<scheme>://<host>:<port>`
    pub fn uri(&self) -> String {
        let suffix = if self.tls { "+s" } else { "" };
        format!("{}{suffix}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// Shape of the reachability traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Label of the start node, matched together with its `name` property
    #[serde(default = "default_start_label")]
    pub start_label: String,

    /// Relationship types followed in either direction
    #[serde(default = "default_relationship_types")]
    pub relationship_types: Vec<String>,

    /// Maximum number of hops from the start node
    #[serde(default = "default_max_hops")]
    pub max_hops: u32,

    /// Maximum number of distinct names returned
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            start_label: default_start_label(),
            relationship_types: default_relationship_types(),
            max_hops: default_max_hops(),
            limit: default_limit(),
        }
    }
}

impl TraversalConfig {
    /// Validates the traversal settings
    ///
    /// Labels, relationship types and hop bounds end up in the query text, so
    /// they are checked against fixed allowlists and ranges here.
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_START_LABELS.contains(&self.start_label.as_str()) {
            return Err(Error::config(format!(
                "Invalid start label '{}'. Must be one of: {:?}",
                self.start_label, ALLOWED_START_LABELS
            )));
        }

        if self.relationship_types.is_empty() {
            return Err(Error::config(
                "traversal.relationship_types must not be empty".to_string(),
            ));
        }
        for (i, rel_type) in self.relationship_types.iter().enumerate() {
            if !ALLOWED_RELATIONSHIP_TYPES.contains(&rel_type.as_str()) {
                return Err(Error::config(format!(
                    "Invalid relationship type '{rel_type}'. Must be one of: {ALLOWED_RELATIONSHIP_TYPES:?}"
                )));
            }
            if self.relationship_types[..i].contains(rel_type) {
                return Err(Error::config(format!(
                    "Duplicate relationship type '{rel_type}'"
                )));
            }
        }

        if self.max_hops == 0 {
            return Err(Error::config(
                "traversal.max_hops must be greater than 0".to_string(),
            ));
        }
        if self.max_hops > MAX_TRAVERSAL_HOPS {
            return Err(Error::config(format!(
                "traversal.max_hops too large (max {MAX_TRAVERSAL_HOPS}, got {})",
                self.max_hops
            )));
        }

        if self.limit == 0 {
            return Err(Error::config(
                "traversal.limit must be greater than 0".to_string(),
            ));
        }
        if self.limit > MAX_TRAVERSAL_LIMIT {
            return Err(Error::config(format!(
                "traversal.limit too large (max {MAX_TRAVERSAL_LIMIT}, got {})",
                self.limit
            )));
        }

        Ok(())
    }
}

/// Main configuration structure for leakgraph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Graph database connection
    #[serde(default)]
    pub neo4j: Neo4jConfig,

    /// Traversal query shape
    #[serde(default)]
    pub traversal: TraversalConfig,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.neo4j.host.trim().is_empty() {
            return Err(Error::config("neo4j.host must not be empty".to_string()));
        }
        if self.neo4j.port == 0 {
            return Err(Error::config(
                "neo4j.port must be greater than 0".to_string(),
            ));
        }
        if self.neo4j.database.trim().is_empty() {
            return Err(Error::config(
                "neo4j.database must not be empty".to_string(),
            ));
        }
        if self.neo4j.fetch_size == 0 {
            return Err(Error::config(
                "neo4j.fetch_size must be greater than 0".to_string(),
            ));
        }
        if self.neo4j.max_connections == 0 {
            return Err(Error::config(
                "neo4j.max_connections must be greater than 0".to_string(),
            ));
        }

        self.traversal.validate()
    }
}
