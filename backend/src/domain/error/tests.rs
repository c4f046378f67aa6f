//! Tests for the error payload and its wire shape.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn traced_error() -> Error {
    Error::invalid_request("Invalid expression")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "offset": 3 }))
}

#[rstest]
fn constructors_set_codes() {
    assert_eq!(Error::invalid_request("bad").code(), ErrorCode::InvalidRequest);
    assert_eq!(Error::internal("boom").code(), ErrorCode::InternalError);
}

#[rstest]
fn trace_id_is_none_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_message_under_error_key(traced_error: Error) {
    let value = serde_json::to_value(&traced_error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "error": "Invalid expression",
            "code": "invalid_request",
            "traceId": TRACE_ID,
            "details": { "offset": 3 },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::internal("Failed to fetch history"))
        .expect("serialise error");
    assert_eq!(
        value,
        json!({ "error": "Failed to fetch history", "code": "internal_error" })
    );
}

#[rstest]
fn deserialises_wire_shape(traced_error: Error) {
    let text = serde_json::to_string(&traced_error).expect("serialise error");
    let parsed: Error = serde_json::from_str(&text).expect("deserialise error");
    assert_eq!(parsed, traced_error);
}

#[rstest]
#[case("")]
#[case("   ")]
fn rejects_blank_messages(#[case] message: &str) {
    let body = json!({ "error": message, "code": "invalid_request" });
    let result: Result<Error, _> = serde_json::from_value(body);
    assert!(result.is_err());
}

#[rstest]
fn without_details_keeps_message_and_trace(traced_error: Error) {
    let stripped = traced_error.without_details();
    assert!(stripped.details().is_none());
    assert_eq!(stripped.message(), "Invalid expression");
    assert_eq!(stripped.trace_id(), Some(TRACE_ID));
}
