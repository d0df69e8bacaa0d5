use news_core::{ArticleStorage, Error, Result};
use std::sync::Arc;

pub mod backends;

pub use backends::*;

/// Storage backends selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            other => Err(Error::Storage(format!("unknown storage backend: {other}"))),
        }
    }
}

/// Build the storage backend registered under `kind`.
pub fn create_storage(kind: &str) -> Result<Arc<dyn ArticleStorage>> {
    let storage: Arc<dyn ArticleStorage> = match kind.parse::<StorageKind>()? {
        StorageKind::Memory => Arc::new(InMemoryStorage::new()),
    };
    tracing::info!(backend = kind, "🏦 storage backend initialized");
    Ok(storage)
}
