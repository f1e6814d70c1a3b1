//! Sort a commit query response into exactly one outcome.

use crate::models::{CommitInfo, RawApiResult};

/// The outcome of a commit query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedOutcome {
    /// The expression resolved to a commit.
    Success(Box<CommitInfo>),

    /// Github reported that the repository or object does not exist.
    NotFound,

    /// The query ran, but there is no commit to show.
    NoResult,

    /// No usable payload came back.
    TransportError,
}

impl ClassifiedOutcome {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedOutcome::Success(_) => "success",
            ClassifiedOutcome::NotFound => "not-found",
            ClassifiedOutcome::NoResult => "no-result",
            ClassifiedOutcome::TransportError => "transport-error",
        }
    }
}

/// Classify a raw commit query response.
///
/// The first matching rule wins:
/// 1. no `data` is a transport error, whatever `errors` says,
/// 2. any `NOT_FOUND` error is not-found, even when the object is also null,
/// 3. a missing repository or object is no-result,
/// 4. otherwise the object is decoded as a commit.
pub fn classify(result: &RawApiResult) -> ClassifiedOutcome {
    let Some(data) = result.data.as_ref() else {
        for error in result.errors() {
            tracing::debug!(kind = ?error.kind, "graphql error: {}", error.message);
        }
        return ClassifiedOutcome::TransportError;
    };

    if result.has_not_found() {
        return ClassifiedOutcome::NotFound;
    }

    let Some(object) = data.object() else {
        return ClassifiedOutcome::NoResult;
    };

    // Trees, blobs and tags match none of the selected commit fields.
    if object.as_object().is_some_and(|fields| fields.is_empty()) {
        tracing::debug!("expression resolved to a non-commit object");
        return ClassifiedOutcome::NoResult;
    }

    match serde_json::from_value::<CommitInfo>(object.clone()) {
        Ok(commit) => ClassifiedOutcome::Success(Box::new(commit)),
        Err(error) => {
            tracing::warn!(%error, "commit object did not match the expected shape");
            ClassifiedOutcome::TransportError
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn classify_json(value: serde_json::Value) -> ClassifiedOutcome {
        let raw: RawApiResult = serde_json::from_value(value).unwrap();
        classify(&raw)
    }

    fn commit_object() -> serde_json::Value {
        json!({
            "messageHeadline": "Fix bug",
            "abbreviatedOid": "a1b2c3d",
            "changedFiles": 3,
            "commitUrl": "https://x/commit/a1b2c3d",
            "pushedDate": "2024-01-01T00:00:00Z",
            "author": {"name": "Bot", "avatarUrl": "https://x/a.png", "user": null}
        })
    }

    #[test]
    fn null_data_is_transport_error() {
        assert_eq!(
            classify_json(json!({"data": null})),
            ClassifiedOutcome::TransportError
        );
        assert_eq!(classify_json(json!({})), ClassifiedOutcome::TransportError);
    }

    #[test]
    fn null_data_wins_over_not_found() {
        let outcome = classify_json(json!({
            "data": null,
            "errors": [{"type": "NOT_FOUND", "message": "nope"}]
        }));
        assert_eq!(outcome, ClassifiedOutcome::TransportError);
    }

    #[test]
    fn not_found_wins_over_null_object() {
        let outcome = classify_json(json!({
            "data": {"repository": {"object": null}},
            "errors": [
                {"type": "FORBIDDEN", "message": "first"},
                {"type": "NOT_FOUND", "message": "Could not resolve to a Repository"}
            ]
        }));
        assert_eq!(outcome, ClassifiedOutcome::NotFound);
    }

    #[test]
    fn not_found_with_null_repository() {
        let outcome = classify_json(json!({
            "data": {"repository": null},
            "errors": [{"type": "NOT_FOUND", "message": "nope"}]
        }));
        assert_eq!(outcome, ClassifiedOutcome::NotFound);
    }

    #[test]
    fn not_found_even_with_object() {
        let outcome = classify_json(json!({
            "data": {"repository": {"object": commit_object()}},
            "errors": [{"type": "NOT_FOUND", "message": "nope"}]
        }));
        assert_eq!(outcome, ClassifiedOutcome::NotFound);
    }

    #[test]
    fn null_object_is_no_result() {
        assert_eq!(
            classify_json(json!({"data": {"repository": {"object": null}}})),
            ClassifiedOutcome::NoResult
        );
        assert_eq!(
            classify_json(json!({"data": {"repository": null}})),
            ClassifiedOutcome::NoResult
        );
    }

    #[test]
    fn other_errors_do_not_hide_no_result() {
        let outcome = classify_json(json!({
            "data": {"repository": {"object": null}},
            "errors": [{"type": "FORBIDDEN", "message": "nope"}]
        }));
        assert_eq!(outcome, ClassifiedOutcome::NoResult);
    }

    #[test]
    fn non_commit_object_is_no_result() {
        assert_eq!(
            classify_json(json!({"data": {"repository": {"object": {}}}})),
            ClassifiedOutcome::NoResult
        );
    }

    #[test]
    fn malformed_commit_is_transport_error() {
        let outcome = classify_json(json!({
            "data": {"repository": {"object": {"messageHeadline": "no oid"}}}
        }));
        assert_eq!(outcome, ClassifiedOutcome::TransportError);
    }

    #[test]
    fn commit_is_success() {
        let outcome = classify_json(json!({"data": {"repository": {"object": commit_object()}}}));

        let ClassifiedOutcome::Success(commit) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(commit.title(), "`a1b2c3d` Fix bug");
        assert_eq!(commit.changed_files, 3);
    }

    #[test]
    fn commit_without_headline() {
        let mut object = commit_object();
        object["messageHeadline"] = json!("");

        let outcome = classify_json(json!({"data": {"repository": {"object": object}}}));
        let ClassifiedOutcome::Success(commit) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(commit.title(), "a1b2c3d");
    }
}
