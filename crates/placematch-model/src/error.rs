use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("registry entry is not an object (found {kind})")]
    NotAnObject { kind: &'static str },
    #[error("invalid registry entry: {0}")]
    InvalidEntry(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
