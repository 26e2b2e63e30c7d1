use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object at the document root, found {0}")]
    NotAnObject(&'static str),
    #[error("unknown document name: {0}")]
    UnknownDocument(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
