use async_trait::async_trait;
use uuid::Uuid;

use crate::types::ArticleRecord;
use crate::Result;

/// Concurrency-safe article repository.
///
/// Implementations never validate content; callers hand over records that
/// already went through [`crate::validation::validate_article`].
#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Store a new article, stamping its creation and update times.
    ///
    /// Ids are client-supplied and never reused: a second create with the
    /// same id, even one that was soft-deleted, fails with
    /// [`crate::Error::AlreadyExists`] instead of storing a duplicate.
    async fn create_article(&self, article: ArticleRecord) -> Result<ArticleRecord>;

    /// Get a visible article by id
    async fn get_article(&self, id: Uuid) -> Result<Option<ArticleRecord>>;

    /// All visible articles, in insertion order
    async fn list_articles(&self) -> Result<Vec<ArticleRecord>>;

    /// Soft-delete an article. Returns `false` when nothing visible matched.
    async fn delete_article(&self, id: Uuid) -> Result<bool>;

    /// Number of visible articles
    async fn count(&self) -> Result<usize>;
}
