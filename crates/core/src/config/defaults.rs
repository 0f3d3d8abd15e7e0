//! Default values and functions for configuration

use super::Scheme;

// Default constants
pub(crate) const DEFAULT_NEO4J_HOST: &str = "localhost";
pub(crate) const DEFAULT_NEO4J_USER: &str = "neo4j";
pub(crate) const DEFAULT_NEO4J_DATABASE: &str = "neo4j";
pub(crate) const DEFAULT_START_LABEL: &str = "Officer";

/// Upper bound on variable-length traversal depth
pub const MAX_TRAVERSAL_HOPS: u32 = 10;

/// Upper bound on rows requested from a single traversal
pub const MAX_TRAVERSAL_LIMIT: u32 = 1000;

pub(crate) fn default_neo4j_host() -> String {
    DEFAULT_NEO4J_HOST.to_string()
}

pub(crate) fn default_neo4j_bolt_port() -> u16 {
    7687
}

pub(crate) fn default_neo4j_scheme() -> Scheme {
    Scheme::Neo4j
}

pub(crate) fn default_neo4j_user() -> String {
    DEFAULT_NEO4J_USER.to_string()
}

pub(crate) fn default_neo4j_database() -> String {
    DEFAULT_NEO4J_DATABASE.to_string()
}

pub(crate) fn default_neo4j_fetch_size() -> usize {
    200
}

pub(crate) fn default_neo4j_max_connections() -> usize {
    1 // One query per run
}

pub(crate) fn default_start_label() -> String {
    DEFAULT_START_LABEL.to_string()
}

pub(crate) fn default_relationship_types() -> Vec<String> {
    vec![
        "OFFICER_OF".to_string(),
        "INTERMEDIARY_OF".to_string(),
        "REGISTERED_ADDRESS".to_string(),
    ]
}

pub(crate) fn default_max_hops() -> u32 {
    5
}

pub(crate) fn default_limit() -> u32 {
    20
}
