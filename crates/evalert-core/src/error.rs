use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Timestamp does not match YYYY-MM-DDTHH:mm:ss.sssZ: {0}")]
    Timestamp(String),
    #[error("Unknown alert state: {0}")]
    UnknownState(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
