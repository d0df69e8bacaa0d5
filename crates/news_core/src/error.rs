use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("News not found: {0}")]
    NotFound(Uuid),

    #[error("News already exists: {0}")]
    AlreadyExists(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::nil();
        assert_eq!(
            Error::NotFound(id).to_string(),
            "News not found: 00000000-0000-0000-0000-000000000000"
        );
        assert!(Error::Storage("boom".into()).to_string().contains("Storage error"));
    }
}
