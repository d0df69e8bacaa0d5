//! Turns untrusted [`ArticleDraft`]s into [`ArticleRecord`]s.
//!
//! Every field is checked independently and all failures are reported
//! together, one [`FieldViolation`] per failed field.

use std::fmt;

use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::types::{ArticleDraft, ArticleRecord};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub description: String,
}

impl FieldViolation {
    fn new(field: &'static str, description: impl Into<String>) -> Self {
        Self {
            field,
            description: description.into(),
        }
    }
}

/// All violations found in one draft, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }

    fn push(&mut self, field: &'static str, description: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, description));
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", violation.description)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a draft and map it to a record ready for storage.
pub fn validate_article(draft: ArticleDraft) -> Result<ArticleRecord, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let required = [
        ("author", &draft.author),
        ("title", &draft.title),
        ("summary", &draft.summary),
        ("content", &draft.content),
        ("source", &draft.source),
    ];
    for (field, value) in required {
        if value.is_empty() {
            errors.push(field, format!("{field} cannot be empty"));
        }
    }

    if draft.tags.is_empty() {
        errors.push("tags", "tags cannot be empty");
    }

    let id = match Uuid::parse_str(&draft.id) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push("id", "id cannot be parsed");
            None
        }
    };

    // An empty source has already been reported above.
    let source = if draft.source.is_empty() {
        None
    } else {
        match Url::parse(&draft.source) {
            Ok(url) => Some(url),
            Err(e) => {
                errors.push("source", format!("source cannot be parsed: {e}"));
                None
            }
        }
    };

    match (id, source) {
        (Some(id), Some(source)) if errors.is_empty() => {
            let now = Utc::now();
            Ok(ArticleRecord {
                id,
                author: draft.author,
                title: draft.title,
                summary: draft.summary,
                content: draft.content,
                source,
                tags: draft.tags,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
        }
        _ => {
            tracing::debug!(violations = errors.len(), "article draft rejected");
            Err(errors)
        }
    }
}
