//! Error types for cardgraph-rs.

/// Alias for Results returning [`CardGraphError`].
pub type Result<T> = std::result::Result<T, CardGraphError>;

/// Top-level error type for cardgraph-rs.
#[derive(Debug, thiserror::Error)]
pub enum CardGraphError {
    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl CardGraphError {
    /// Create an IO error with a path context.
    pub(crate) fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        CardGraphError::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Whether a pipeline may log this error and carry on with no data.
    ///
    /// Only catalog failures qualify: the seeder then writes nothing.
    /// Store, export and IO failures always abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CardGraphError::Catalog(_))
    }
}

impl From<neo4rs::Error> for CardGraphError {
    fn from(err: neo4rs::Error) -> Self {
        CardGraphError::Driver(err.to_string())
    }
}

impl From<neo4rs::DeError> for CardGraphError {
    fn from(err: neo4rs::DeError) -> Self {
        CardGraphError::Driver(format!("row decode: {err}"))
    }
}

impl From<chromiumoxide::error::CdpError> for CardGraphError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        CardGraphError::Export(err.to_string())
    }
}

/// Catalog (HTTP API) errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}
