//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

/// Helper to apply a conventional `NEO4J_*` environment variable as an override
fn set_env_override(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    env_var: &str,
    key: &str,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    match std::env::var(env_var) {
        Ok(value) => builder
            .set_override(key, value)
            .map_err(|e| Error::config(format!("Failed to set {env_var}: {e}"))),
        Err(_) => Ok(builder),
    }
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// The file is optional. Environment variables are prefixed with `LEAKGRAPH_`
    /// and use double underscores for nested values, for example
    /// `LEAKGRAPH_NEO4J__HOST=db.internal` or
    /// `LEAKGRAPH_TRAVERSAL__RELATIONSHIP_TYPES=OFFICER_OF,SIMILAR`.
    /// The conventional `NEO4J_HOST`, `NEO4J_BOLT_PORT`, `NEO4J_USER`,
    /// `NEO4J_PASSWORD` and `NEO4J_DATABASE` variables take precedence over both.
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        let builder = set_config_default(builder, "neo4j.host", default_neo4j_host())?;
        let builder =
            set_config_default(builder, "neo4j.port", default_neo4j_bolt_port() as i64)?;
        let builder =
            set_config_default(builder, "neo4j.scheme", default_neo4j_scheme().to_string())?;
        let builder = set_config_default(builder, "neo4j.user", default_neo4j_user())?;
        let builder = set_config_default(builder, "neo4j.database", default_neo4j_database())?;
        let builder =
            set_config_default(builder, "traversal.max_hops", default_max_hops() as i64)?;
        let mut builder =
            set_config_default(builder, "traversal.limit", default_limit() as i64)?;

        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LEAKGRAPH")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("traversal.relationship_types")
                .try_parsing(true),
        );

        let builder = set_env_override(builder, "NEO4J_HOST", "neo4j.host")?;
        let builder = set_env_override(builder, "NEO4J_USER", "neo4j.user")?;
        let builder = set_env_override(builder, "NEO4J_PASSWORD", "neo4j.password")?;
        let mut builder = set_env_override(builder, "NEO4J_DATABASE", "neo4j.database")?;

        if let Ok(port) = std::env::var("NEO4J_BOLT_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                builder = builder
                    .set_override("neo4j.port", port_num)
                    .map_err(|e| Error::config(format!("Failed to set NEO4J_BOLT_PORT: {e}")))?;
            } else {
                tracing::warn!(value = %port, "Ignoring non-numeric NEO4J_BOLT_PORT");
            }
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.leakgraph/config.toml or custom --config path)
    /// 3. Environment variables (LEAKGRAPH_*, then NEO4J_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
