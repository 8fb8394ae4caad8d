//! HTTP-level integration tests for events, apparels and tracks.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, minutes_ago, patch_json, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_event_with_optional_references() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;
    let area = common::create(&app, "areas", json!({"name": "Lobby"})).await;
    let action = common::create(&app, "actions", json!({"type": "Entry"})).await;

    let event = common::create(
        &app,
        "events",
        json!({
            "person_id": person["id"],
            "area_id": area["id"],
            "action_id": action["id"],
            "time": minutes_ago(5),
        }),
    )
    .await;
    assert_eq!(event["person_id"], person["id"]);
    assert_eq!(event["area_id"], area["id"]);
    assert_eq!(event["action_id"], action["id"]);
}

#[tokio::test]
async fn test_future_event_is_invalid_time() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;

    let response = post_json(
        app,
        "/api/v1/events",
        json!({"person_id": person["id"], "time": minutes_ago(-24 * 60)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_FIELD");
    assert!(json["error"].as_str().unwrap().contains("time"));
}

#[tokio::test]
async fn test_event_time_without_offset_is_read_as_utc() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;

    let local = (chrono::Utc::now() - chrono::Duration::minutes(5)).naive_utc();
    let event = common::create(
        &app,
        "events",
        json!({
            "person_id": person["id"],
            "time": local.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }),
    )
    .await;

    let stored: chrono::DateTime<chrono::Utc> = event["time"].as_str().unwrap().parse().unwrap();
    assert_eq!(stored.timestamp(), local.and_utc().timestamp());

    let id = event["id"].as_i64().unwrap();
    let response = patch_json(
        app,
        &format!("/api/v1/events/{id}"),
        json!({"time": "2024-06-01T08:15:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["time"], "2024-06-01T08:15:00Z");
}

#[tokio::test]
async fn test_event_for_missing_person_is_reference_not_found() {
    let app = common::build_test_app().await;
    let response = post_json(
        app,
        "/api/v1/events",
        json!({"person_id": 404, "time": minutes_ago(1)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "REFERENCE_NOT_FOUND");
    assert_eq!(json["error"], "Person with id 404 not found");
}

#[tokio::test]
async fn test_event_filters() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;
    let area = common::create(&app, "areas", json!({"name": "Yard"})).await;
    common::create(
        &app,
        "events",
        json!({"person_id": person["id"], "time": minutes_ago(3)}),
    )
    .await;
    let in_area = common::create(
        &app,
        "events",
        json!({"person_id": person["id"], "area_id": area["id"], "time": minutes_ago(2)}),
    )
    .await;

    let uri = format!(
        "/api/v1/events?person_id={}&area_id={}",
        person["id"], area["id"]
    );
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([in_area]));
}

// ---------------------------------------------------------------------------
// Apparels
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_apparel_requires_colours() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;

    let response = post_json(
        app.clone(),
        "/api/v1/apparels",
        json!({"person_id": person["id"], "pant_colour": "black", "time": minutes_ago(1)}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FIELD_REQUIRED");
    assert_eq!(json["error"], "shirt_colour must not be empty");

    let apparel = common::create(
        &app,
        "apparels",
        json!({
            "person_id": person["id"],
            "shirt_colour": "white",
            "pant_colour": "black",
            "shoe_colour": "red",
            "time": minutes_ago(1),
        }),
    )
    .await;
    assert_eq!(apparel["shoe_colour"], "red");
}

#[tokio::test]
async fn test_apparel_patch_rejects_empty_colour() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;
    let apparel = common::create(
        &app,
        "apparels",
        json!({
            "person_id": person["id"],
            "shirt_colour": "green",
            "pant_colour": "grey",
            "time": minutes_ago(10),
        }),
    )
    .await;
    let id = apparel["id"].as_i64().unwrap();

    let response = patch_json(
        app,
        &format!("/api/v1/apparels/{id}"),
        json!({"pant_colour": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "FIELD_REQUIRED");
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

fn track(person_id: &serde_json::Value, minutes: i64) -> serde_json::Value {
    json!({
        "person_id": person_id,
        "time": minutes_ago(minutes),
        "duration": 1.5,
        "x": 10.0,
        "y": 20.0,
    })
}

#[tokio::test]
async fn test_zero_duration_track_is_invalid() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;

    let mut body = track(&person["id"], 1);
    body["duration"] = json!(0);
    let response = post_json(app, "/api/v1/tracks", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_FIELD");
    assert!(json["error"].as_str().unwrap().contains("duration"));
}

#[tokio::test]
async fn test_track_list_defaults_to_latest_for_person() {
    let app = common::build_test_app().await;
    let alice = common::create(&app, "persons", json!({})).await;
    let bob = common::create(&app, "persons", json!({})).await;

    common::create(&app, "tracks", track(&alice["id"], 30)).await;
    let latest = common::create(&app, "tracks", track(&alice["id"], 5)).await;
    common::create(&app, "tracks", track(&alice["id"], 15)).await;
    common::create(&app, "tracks", track(&bob["id"], 1)).await;

    let uri = format!("/api/v1/tracks?person_id={}", alice["id"]);
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([latest]));

    let uri = format!("/api/v1/tracks?person_id={}&limit=10", alice["id"]);
    let response = get(app, &uri).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0], latest);
}

#[tokio::test]
async fn test_person_with_tracks_cannot_be_deleted() {
    let app = common::build_test_app().await;
    let person = common::create(&app, "persons", json!({})).await;
    let id = person["id"].as_i64().unwrap();
    let sample = common::create(&app, "tracks", track(&person["id"], 2)).await;

    let response = delete(app.clone(), &format!("/api/v1/persons/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("tracks"));

    let track_id = sample["id"].as_i64().unwrap();
    let response = delete(app.clone(), &format!("/api/v1/tracks/{track_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app, &format!("/api/v1/persons/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
