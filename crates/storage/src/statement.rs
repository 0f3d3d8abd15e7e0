//! Prepared reachability statement
//!
//! The subject name and row limit are always bound parameters. The start label,
//! relationship types and hop bound cannot be parameterized in Cypher, so they
//! are taken only from a validated [`TraversalConfig`].

use leakgraph_core::{Error, Result, TraversalConfig};
use neo4rs::Query;

/// Name of the bound subject parameter
pub const SUBJECT_PARAM: &str = "name";

/// Name of the bound row-limit parameter
pub const LIMIT_PARAM: &str = "limit";

/// Column carrying the display name in every result row
pub const NAME_COLUMN: &str = "name";

/// "Which nodes are reachable from this subject?" as a prepared statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachableQuery {
    text: String,
    subject: String,
    limit: u32,
}

impl ReachableQuery {
    /// Build the statement for `subject` using the given traversal shape
    ///
    /// # Errors
    /// * `Error::Config` if the traversal settings fail validation
    /// * `Error::InvalidInput` if the subject is empty
    pub fn new(traversal: &TraversalConfig, subject: impl Into<String>) -> Result<Self> {
        traversal.validate()?;

        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(Error::invalid_input("subject name must not be empty"));
        }

        Ok(Self {
            text: render(traversal),
            subject,
            limit: traversal.limit,
        })
    }

    /// Officers reachable within five hops over the default relationship types
    pub fn officer(subject: impl Into<String>) -> Result<Self> {
        Self::new(&TraversalConfig::default(), subject)
    }

    /// Statement text as sent to the database
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value bound to `$name`
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Value bound to `$limit`
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Driver query with both parameters bound
    pub(crate) fn to_bolt(&self) -> Query {
        Query::new(self.text.clone())
            .param(SUBJECT_PARAM, self.subject.clone())
            .param(LIMIT_PARAM, i64::from(self.limit))
    }
}

fn render(traversal: &TraversalConfig) -> String {
    format!(
        "MATCH (a:{label} {{name: ${SUBJECT_PARAM}}})-[r:{rel_types}*..{max_hops}]-(b) \
         RETURN DISTINCT b.name AS {NAME_COLUMN} LIMIT ${LIMIT_PARAM}",
        label = traversal.start_label,
        rel_types = traversal.relationship_types.join("|"),
        max_hops = traversal.max_hops,
    )
}
