//! Mapping between wire messages and core records.

use chrono::{DateTime, Utc};
use news_core::{ArticleDraft, ArticleRecord};

use crate::proto::{CreateNewsRequest, CreateNewsResponse, GetNewsResponse};

pub fn to_timestamp(at: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: at.timestamp(),
        // Leap seconds report >= 1e9 nanos, which the wire type does not allow.
        nanos: at.timestamp_subsec_nanos().min(999_999_999) as i32,
    }
}

impl From<CreateNewsRequest> for ArticleDraft {
    fn from(request: CreateNewsRequest) -> Self {
        Self {
            id: request.id,
            author: request.author,
            title: request.title,
            summary: request.summary,
            content: request.content,
            source: request.source,
            tags: request.tags,
        }
    }
}

impl From<ArticleRecord> for CreateNewsResponse {
    fn from(article: ArticleRecord) -> Self {
        Self {
            id: article.id.to_string(),
            author: article.author,
            title: article.title,
            summary: article.summary,
            content: article.content,
            source: article.source.to_string(),
            tags: article.tags,
            created_at: Some(to_timestamp(article.created_at)),
            updated_at: Some(to_timestamp(article.updated_at)),
        }
    }
}

impl From<ArticleRecord> for GetNewsResponse {
    fn from(article: ArticleRecord) -> Self {
        Self {
            id: article.id.to_string(),
            author: article.author,
            title: article.title,
            summary: article.summary,
            content: article.content,
            source: article.source.to_string(),
            tags: article.tags,
            created_at: Some(to_timestamp(article.created_at)),
            updated_at: Some(to_timestamp(article.updated_at)),
        }
    }
}
