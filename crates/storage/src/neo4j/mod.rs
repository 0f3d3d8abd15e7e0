//! Neo4j graph database connection and read transactions

pub(crate) mod client;
pub mod mock;
pub(crate) mod traits;

pub use client::Neo4jConnection;
pub use traits::{read_reachable_names, GraphConnection, ReadTransaction};
