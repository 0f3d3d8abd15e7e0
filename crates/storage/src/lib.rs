#![deny(warnings)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Graph database access for leakgraph
//!
//! Exposes the reachability statement, result rows, the connection and
//! transaction traits, the `neo4rs` implementation and a mock for tests.

mod neo4j;
mod row;
mod statement;

pub use neo4j::mock::{ExecutedQuery, MockGraphConnection};
pub use neo4j::{read_reachable_names, GraphConnection, Neo4jConnection, ReadTransaction};
pub use row::ResultRow;
pub use statement::{ReachableQuery, LIMIT_PARAM, NAME_COLUMN, SUBJECT_PARAM};
