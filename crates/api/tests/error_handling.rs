//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router or
//! store is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tracker_api::error::AppError;
use tracker_core::entity::EntityKind;
use tracker_core::error::{CoreError, StoreError};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Validation errors map to 422
// ---------------------------------------------------------------------------

#[tokio::test]
async fn field_required_returns_422() {
    let err = AppError::Core(CoreError::FieldRequired {
        field: "shirt_colour",
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "FIELD_REQUIRED");
    assert_eq!(json["error"], "shirt_colour must not be empty");
}

#[tokio::test]
async fn invalid_field_returns_422() {
    let err = AppError::Core(CoreError::invalid_field("duration", "must be greater than 0"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_FIELD");
    assert_eq!(json["error"], "Invalid duration: must be greater than 0");
}

#[tokio::test]
async fn invalid_identifier_returns_422() {
    let err = AppError::Core(CoreError::InvalidIdentifier {
        field: "person_id",
        id: -3,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_IDENTIFIER");
    assert_eq!(json["error"], "person_id must be a positive integer, got -3");
}

// ---------------------------------------------------------------------------
// Missing rows map to 404 with distinct codes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reference_not_found_returns_404() {
    let err = AppError::Core(CoreError::ReferenceNotFound {
        entity: EntityKind::Gender,
        id: 9999,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "REFERENCE_NOT_FOUND");
    assert_eq!(json["error"], "Gender with id 9999 not found");
}

#[tokio::test]
async fn not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: EntityKind::Person,
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Person with id 42 not found");
}

// ---------------------------------------------------------------------------
// Conflicts map to 409
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conflict_returns_409_with_message() {
    let err = AppError::Core(CoreError::Conflict(
        "Person with id 1 is still referenced by 2 tracks".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Person with id 1 is still referenced by 2 tracks");
}

#[tokio::test]
async fn foreign_key_store_error_returns_409() {
    let err = AppError::Core(CoreError::Store(StoreError::ForeignKey(
        "tracks_person_id_fkey".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("tracks_person_id_fkey"));
}

// ---------------------------------------------------------------------------
// Internal errors map to 500 and are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backend_store_error_is_sanitized() {
    let err = AppError::Core(CoreError::Store(StoreError::Backend(
        "connection to 10.0.0.5 refused".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let err = AppError::BadRequest("limit must be between 1 and 200, got 500".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "limit must be between 1 and 200, got 500");
}
