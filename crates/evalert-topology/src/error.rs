use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Unknown edge type: {0}")]
    UnknownEdgeType(String),
    #[error("Invalid vertex configuration for '{vertex}': {}", .errors.join("; "))]
    InvalidConfiguration { vertex: String, errors: Vec<String> },
}

pub type Result<T> = std::result::Result<T, TopologyError>;
