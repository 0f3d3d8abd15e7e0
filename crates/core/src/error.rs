use thiserror::Error;

/// Result type for leakgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for leakgraph operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The database could not be reached or rejected the credentials
    #[error("Connection error: {0}")]
    Connection(String),

    /// The database failed to run or stream a query
    #[error("Query error: {0}")]
    Query(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for failures to reach or authenticate against the database
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// True for failures raised while running a query
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}
