pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use storage::ArticleStorage;
pub use types::{parse_article_id, ArticleDraft, ArticleRecord};
pub use validation::{validate_article, FieldViolation, ValidationErrors};
