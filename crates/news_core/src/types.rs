use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{Error, Result};

/// A stored news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub source: Url,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once the article is soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Untrusted article fields as they arrive from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub id: String,
    pub author: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub source: String,
    pub tags: Vec<String>,
}

/// Parse a client-supplied article identifier.
pub fn parse_article_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| Error::InvalidId(format!("{raw:?}: {e}")))
}
