use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a reachability result
///
/// Serializes as the bare name (or `null`), so a slice of rows becomes a JSON
/// array of names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRow {
    name: Option<String>,
}

impl ResultRow {
    /// Row for a `name` column that may be null
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }

    /// Row for a node with a `name` property
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The `name` column; `None` when the node has no name property
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => f.write_str("null"),
        }
    }
}
