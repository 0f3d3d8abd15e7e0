//! Core types for leakgraph
//!
//! This crate provides the foundational pieces shared by the storage layer and
//! the command-line runner:
//!
//! - **Configuration**: connection descriptor and traversal settings
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;

// Re-export main types for convenience
pub use config::{Config, Neo4jConfig, Scheme, TraversalConfig};
pub use error::{Error, Result};
