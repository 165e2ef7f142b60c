//! Tests for domain error construction and trace propagation.

use super::*;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::validation(["x"]), ErrorCode::ValidationFailed)]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
}

#[rstest]
fn validation_carries_every_message() {
    let err = Error::validation([
        "The Name field is required.",
        "The PhoneNumber field is required.",
    ]);
    assert_eq!(err.message(), "Validation failed");
    assert_eq!(err.errors().len(), 2);
    assert_eq!(
        err.to_string(),
        "Validation failed: The Name field is required.; The PhoneNumber field is required."
    );
}

#[rstest]
fn display_without_errors_is_message(base_error: Error) {
    assert_eq!(base_error.to_string(), "bad");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn with_trace_id_overrides_ambient_value(base_error: Error, expected_trace_id: String) {
    let err = base_error.with_trace_id(expected_trace_id.clone());
    assert_eq!(err.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = trace_id
        .in_scope(async move {
            Error::try_new(ErrorCode::InternalError, "boom")
                .expect("validation accepts non-empty message")
        })
        .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn error_codes_render_snake_case() {
    assert_eq!(ErrorCode::ValidationFailed.to_string(), "validation_failed");
    assert_eq!(ErrorCode::ServiceUnavailable.as_str(), "service_unavailable");
}
