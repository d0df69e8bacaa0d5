use async_trait::async_trait;
use chrono::Utc;
use news_core::{ArticleRecord, ArticleStorage, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Articles in insertion order plus an id → position index.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: Vec<ArticleRecord>,
    index: HashMap<Uuid, usize>,
}

impl MemoryStore {
    pub fn create_article(&mut self, article: ArticleRecord) -> Result<ArticleRecord> {
        // Soft-deleted ids stay reserved.
        if self.index.contains_key(&article.id) {
            return Err(Error::AlreadyExists(article.id));
        }

        let now = Utc::now();
        let stored = ArticleRecord {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..article
        };

        self.index.insert(stored.id, self.articles.len());
        self.articles.push(stored.clone());
        Ok(stored)
    }

    pub fn get_article(&self, id: &Uuid) -> Option<&ArticleRecord> {
        self.index
            .get(id)
            .map(|&pos| &self.articles[pos])
            .filter(|article| !article.is_deleted())
    }

    pub fn visible(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.articles.iter().filter(|article| !article.is_deleted())
    }

    pub fn delete_article(&mut self, id: &Uuid) -> bool {
        let Some(&pos) = self.index.get(id) else {
            return false;
        };
        let article = &mut self.articles[pos];
        if article.is_deleted() {
            return false;
        }
        article.deleted_at = Some(Utc::now());
        true
    }
}

/// In-process article storage guarded by a single reader/writer lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStorage for InMemoryStorage {
    async fn create_article(&self, article: ArticleRecord) -> Result<ArticleRecord> {
        let mut store = self.store.write().await;
        let stored = store.create_article(article)?;
        tracing::debug!(id = %stored.id, "article stored");
        Ok(stored)
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<ArticleRecord>> {
        let store = self.store.read().await;
        Ok(store.get_article(&id).cloned())
    }

    async fn list_articles(&self) -> Result<Vec<ArticleRecord>> {
        let store = self.store.read().await;
        Ok(store.visible().cloned().collect())
    }

    async fn delete_article(&self, id: Uuid) -> Result<bool> {
        let mut store = self.store.write().await;
        let deleted = store.delete_article(&id);
        tracing::debug!(%id, deleted, "article soft-deleted");
        Ok(deleted)
    }

    async fn count(&self) -> Result<usize> {
        let store = self.store.read().await;
        Ok(store.visible().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use futures_util::future::join_all;
    use std::collections::HashSet;
    use url::Url;

    fn article(author: &str) -> ArticleRecord {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        ArticleRecord {
            id: Uuid::new_v4(),
            author: author.to_string(),
            title: "Test Article".to_string(),
            summary: "A summary".to_string(),
            content: "This is a test article about politics.".to_string(),
            source: Url::parse("http://test.com").unwrap(),
            tags: vec!["politics".to_string()],
            created_at: epoch,
            updated_at: epoch,
            deleted_at: Some(epoch),
        }
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps() {
        let storage = InMemoryStorage::new();
        let input = article("Ann");

        let before = Utc::now();
        let stored = storage.create_article(input.clone()).await.unwrap();

        assert_eq!(stored.id, input.id);
        assert_eq!(stored.author, "Ann");
        assert!(stored.created_at >= before);
        assert_eq!(stored.created_at, stored.updated_at);
        assert!(stored.deleted_at.is_none());
        assert_eq!(storage.get_article(input.id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let storage = InMemoryStorage::new();
        storage.create_article(article("Ann")).await.unwrap();
        assert!(storage.get_article(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let storage = InMemoryStorage::new();
        let first = article("Ann");
        storage.create_article(first.clone()).await.unwrap();

        let mut second = article("Bob");
        second.id = first.id;
        let err = storage.create_article(second).await.unwrap_err();

        assert!(matches!(err, Error::AlreadyExists(id) if id == first.id));
        assert_eq!(storage.count().await.unwrap(), 1);
        let kept = storage.get_article(first.id).await.unwrap().unwrap();
        assert_eq!(kept.author, "Ann");
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let storage = InMemoryStorage::new();
        let authors = ["a", "b", "c", "d"];
        for author in authors {
            storage.create_article(article(author)).await.unwrap();
        }

        let listed = storage.list_articles().await.unwrap();
        let listed: Vec<_> = listed.iter().map(|a| a.author.as_str()).collect();
        assert_eq!(listed, authors);
    }

    #[tokio::test]
    async fn test_delete_hides_article() {
        let storage = InMemoryStorage::new();
        let keep = storage.create_article(article("keep")).await.unwrap();
        let gone = storage.create_article(article("gone")).await.unwrap();

        assert!(storage.delete_article(gone.id).await.unwrap());
        assert!(!storage.delete_article(gone.id).await.unwrap());
        assert!(!storage.delete_article(Uuid::new_v4()).await.unwrap());

        assert!(storage.get_article(gone.id).await.unwrap().is_none());
        assert_eq!(storage.list_articles().await.unwrap(), vec![keep]);
        assert_eq!(storage.count().await.unwrap(), 1);

        // The id stays taken after deletion.
        let mut again = article("again");
        again.id = gone.id;
        assert!(storage.create_article(again).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates() {
        let storage = InMemoryStorage::new();
        let n = 200;

        let tasks = (0..n).map(|i| {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .create_article(article(&format!("author {i}")))
                    .await
                    .map(|a| a.id)
            })
        });
        let ids: Vec<Uuid> = join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .collect();

        let listed = storage.list_articles().await.unwrap();
        assert_eq!(listed.len(), n);

        let listed_ids: HashSet<Uuid> = listed.iter().map(|a| a.id).collect();
        assert_eq!(listed_ids.len(), n);
        assert_eq!(listed_ids, ids.into_iter().collect::<HashSet<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_run_alongside_writers() {
        let storage = InMemoryStorage::new();
        let writer = {
            let storage = storage.clone();
            tokio::spawn(async move {
                for i in 0..50 {
                    storage.create_article(article(&format!("w{i}"))).await.unwrap();
                }
            })
        };
        let reader = {
            let storage = storage.clone();
            tokio::spawn(async move {
                let mut last = 0;
                for _ in 0..50 {
                    let seen = storage.list_articles().await.unwrap().len();
                    assert!(seen >= last);
                    last = seen;
                    tokio::task::yield_now().await;
                }
            })
        };

        writer.await.unwrap();
        reader.await.unwrap();
        assert_eq!(storage.count().await.unwrap(), 50);
    }
}
