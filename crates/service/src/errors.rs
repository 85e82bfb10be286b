use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client data failed the schema; carries the first failing field's message.
    #[error("{0}")]
    Validation(String),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The store could not complete the call (e.g. its task panicked).
    #[error("store error: {0}")]
    Db(String),
    #[error("store call timed out: {0}")]
    Timeout(&'static str),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Whether the failure came from the backing store rather than the caller.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Db(_) | Self::Timeout(_) | Self::Model(_))
    }
}
