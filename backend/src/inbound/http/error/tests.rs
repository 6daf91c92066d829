//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::Value;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::precondition_failed("stale"), StatusCode::PRECONDITION_FAILED)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, trace, value)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("pool checkout failed: connection refused")
        .with_trace_id(expected_trace_id.clone())
        .with_details(serde_json::json!({"secret": "x"}));

    let (status, trace, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some(INTERNAL_ERROR_MESSAGE)
    );
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("internal_error")
    );
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_code() {
    let error = Error::conflict("User with this email already exists");

    let (status, trace, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(trace.is_none());
    assert_eq!(
        body,
        serde_json::json!({"error": "User with this email already exists", "code": "conflict"})
    );
}

#[derive(Deserialize)]
struct NamedPayload {
    #[serde(rename = "name")]
    _name: String,
}

#[actix_web::post("/named")]
async fn accept_named(_body: web::Json<NamedPayload>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[rstest]
#[case("{not json")]
#[case("[1, 2]")]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request(#[case] payload: &'static str) {
    let app =
        actix_test::init_service(App::new().app_data(json_config()).service(accept_named)).await;
    let request = actix_test::TestRequest::post()
        .uri("/named")
        .insert_header(("content-type", "application/json"))
        .set_payload(payload)
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
}
