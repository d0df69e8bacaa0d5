//! Conversion of core errors into gRPC statuses.
//!
//! Client-facing failures carry a `google.rpc.PreconditionFailure` detail
//! with one violation per offending field, so callers can tell which input
//! was rejected and why without parsing the message.

use news_core::Error;
use tonic::{Code, Status};
use tonic_types::{ErrorDetails, PreconditionViolation, StatusExt};

/// Violation type tags carried in status details.
pub mod violation_type {
    pub const INVALID_ARGUMENT: &str = "invalid_argument";
    pub const INVALID_UUID: &str = "invalid_uuid";
    pub const NOT_FOUND: &str = "not_found";
    pub const ALREADY_EXISTS: &str = "already_exists";
}

/// Build a status whose details hold the given `(type, subject, description)` violations.
pub fn status_with_violations<'a>(
    code: Code,
    message: impl Into<String>,
    violations: impl IntoIterator<Item = (&'a str, &'a str, String)>,
) -> Status {
    let mut details = ErrorDetails::new();
    for (kind, subject, description) in violations {
        details.add_precondition_failure_violation(kind, subject, description);
    }
    Status::with_error_details(code, message, details)
}

/// Map a core error to the status returned to the client.
pub fn error_to_status(err: Error) -> Status {
    match err {
        Error::Validation(errors) => status_with_violations(
            Code::InvalidArgument,
            "invalid news request",
            errors.violations().iter().map(|v| {
                (
                    violation_type::INVALID_ARGUMENT,
                    v.field,
                    v.description.clone(),
                )
            }),
        ),
        Error::InvalidId(reason) => status_with_violations(
            Code::InvalidArgument,
            "invalid news id",
            [(violation_type::INVALID_UUID, "id", reason)],
        ),
        Error::NotFound(id) => status_with_violations(
            Code::NotFound,
            format!("news {id} not found"),
            [(violation_type::NOT_FOUND, "id", format!("no visible news with id {id}"))],
        ),
        Error::AlreadyExists(id) => status_with_violations(
            Code::AlreadyExists,
            format!("news {id} already exists"),
            [(violation_type::ALREADY_EXISTS, "id", format!("id {id} is already taken"))],
        ),
        other @ (Error::Storage(_) | Error::External(_)) => {
            tracing::error!(error = %other, "request failed");
            Status::internal(other.to_string())
        }
    }
}

/// The precondition violations attached to a status, if any.
pub fn violations(status: &Status) -> Vec<PreconditionViolation> {
    status
        .get_error_details()
        .precondition_failure()
        .map(|failure| failure.violations.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_core::{validate_article, ArticleDraft};
    use uuid::Uuid;

    #[test]
    fn test_validation_error_has_one_violation_per_field() {
        let draft = ArticleDraft {
            id: Uuid::new_v4().to_string(),
            author: "Ann".to_string(),
            source: "https://example.com".to_string(),
            tags: vec!["x".to_string()],
            ..Default::default()
        };
        let errors = validate_article(draft).unwrap_err();

        let status = error_to_status(errors.into());
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "invalid news request");

        let found = violations(&status);
        let subjects: Vec<_> = found.iter().map(|v| v.subject.as_str()).collect();
        assert_eq!(subjects, vec!["title", "summary", "content"]);
        assert!(found.iter().all(|v| v.r#type == violation_type::INVALID_ARGUMENT));
        assert_eq!(found[0].description, "title cannot be empty");
    }

    #[test]
    fn test_not_found_and_invalid_id() {
        let id = Uuid::new_v4();
        let status = error_to_status(Error::NotFound(id));
        assert_eq!(status.code(), Code::NotFound);
        let found = violations(&status);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].r#type, violation_type::NOT_FOUND);
        assert_eq!(found[0].subject, "id");

        let status = error_to_status(Error::InvalidId("bad".into()));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(violations(&status)[0].r#type, violation_type::INVALID_UUID);
    }

    #[test]
    fn test_already_exists() {
        let status = error_to_status(Error::AlreadyExists(Uuid::nil()));
        assert_eq!(status.code(), Code::AlreadyExists);
        assert_eq!(violations(&status)[0].r#type, violation_type::ALREADY_EXISTS);
    }

    #[test]
    fn test_storage_error_is_internal_without_details() {
        let status = error_to_status(Error::Storage("disk on fire".into()));
        assert_eq!(status.code(), Code::Internal);
        assert!(status.message().contains("disk on fire"));
        assert!(violations(&status).is_empty());
    }
}
