//! Error taxonomy tests
//!
//! Checks status mapping, wire kinds, and the structured JSON body every
//! failed request is rendered into.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;

use shortgate::errors::{ErrorBody, ShortgateError};

fn all_variants() -> Vec<ShortgateError> {
    vec![
        ShortgateError::validation("v"),
        ShortgateError::not_found("n"),
        ShortgateError::conflict("c"),
        ShortgateError::upstream_unavailable("u"),
        ShortgateError::config("cfg"),
        ShortgateError::database_connection("dc"),
        ShortgateError::database_operation("dop"),
        ShortgateError::serialization("s"),
        ShortgateError::internal("i"),
    ]
}

#[test]
fn error_codes_are_unique() {
    let variants = all_variants();
    let codes: std::collections::HashSet<&str> =
        variants.iter().map(|e| e.code()).collect();
    assert_eq!(codes.len(), variants.len());
}

#[test]
fn client_visible_kinds_map_to_their_statuses() {
    assert_eq!(
        ShortgateError::validation("v").status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        ShortgateError::not_found("n").status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ShortgateError::upstream_unavailable("u").status_code(),
        StatusCode::BAD_GATEWAY
    );
    // Everything infrastructural is a server fault
    for err in [
        ShortgateError::conflict("c"),
        ShortgateError::config("cfg"),
        ShortgateError::database_connection("dc"),
        ShortgateError::database_operation("dop"),
        ShortgateError::serialization("s"),
        ShortgateError::internal("i"),
    ] {
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test]
fn infrastructure_variants_collapse_to_the_internal_kind() {
    for err in [
        ShortgateError::config("cfg"),
        ShortgateError::database_connection("dc"),
        ShortgateError::database_operation("dop"),
        ShortgateError::serialization("s"),
        ShortgateError::internal("i"),
    ] {
        assert_eq!(err.kind(), "internal");
    }

    assert_eq!(ShortgateError::not_found("n").kind(), "not_found");
    assert_eq!(
        ShortgateError::upstream_unavailable("u").kind(),
        "upstream_unavailable"
    );
}

#[tokio::test]
async fn error_responses_are_structured_json() {
    let err = ShortgateError::not_found("short id not found: zzzzzzzz");
    let resp = err.error_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(resp.into_body()).await.unwrap();
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.error, "not_found");
    assert_eq!(body.message, "short id not found: zzzzzzzz");
}

#[test]
fn display_is_type_plus_message() {
    let err = ShortgateError::upstream_unavailable("cannot reach storage node");
    assert_eq!(
        err.to_string(),
        "Upstream Unavailable: cannot reach storage node"
    );
}
