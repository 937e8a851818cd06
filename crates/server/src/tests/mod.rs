// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod helpers;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use intake_domain::DNI_MESSAGE;
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;

use helpers::{create_test_router, fill_complete, open_session, send, send_raw, set_field};

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_create_and_get_session() {
    let app: Router = create_test_router(false);
    let first: u64 = open_session(&app).await;
    let second: u64 = open_session(&app).await;
    assert_eq!(first, 1);
    assert_eq!(second, 2);

    let (status, body) = send(&app, "GET", "/sessions/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["cliente"]["nombreCompleto"], "");
    assert_eq!(body["editing"], serde_json::Value::Null);
    assert_eq!(body["thirdVehicle"], false);
    assert_eq!(body["autofill"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app: Router = create_test_router(false);
    let (status, _) = send_raw(&app, "GET", "/sessions/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_session_id_is_rejected() {
    let app: Router = create_test_router(false);
    let (status, _) = send_raw(&app, "GET", "/sessions/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_closed_session_is_gone() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;

    let (status, _) = send_raw(&app, "DELETE", &format!("/sessions/{session}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_raw(&app, "GET", &format!("/sessions/{session}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Editing
// ============================================================================

#[tokio::test]
async fn test_set_field_reports_changed_paths() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/sessions/{session}/field"),
        Some(json!({ "path": "cliente.localidad", "value": "Flores" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], json!(["cliente.localidad"]));
    let (_, snapshot) = send(&app, "GET", &format!("/sessions/{session}"), None).await;
    assert_eq!(snapshot["record"]["cliente"]["localidad"], "Flores");
}

#[tokio::test]
async fn test_malformed_path_is_bad_request() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/sessions/{session}/field"),
        Some(json!({ "path": "cliente..dni", "value": "1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_blur_returns_field_message() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/sessions/{session}/blur"),
        Some(json!({ "path": "cliente.dni", "value": "12" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "cliente.dni");
    assert_eq!(body["error"], DNI_MESSAGE);

    let (_, body) = send(
        &app,
        "POST",
        &format!("/sessions/{session}/blur"),
        Some(json!({ "path": "cliente.dni", "value": "30222333" })),
    )
    .await;
    assert_eq!(body["error"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_third_vehicle_section_can_be_added_once() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;
    let uri: String = format!("/sessions/{session}/sections/third-vehicle");

    let (status, _) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], true);

    let (_, snapshot) = send(&app, "GET", &format!("/sessions/{session}"), None).await;
    assert_eq!(snapshot["thirdVehicle"], true);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["changed"].as_array().unwrap().is_empty());

    // Removing an absent section changes nothing.
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], json!([]));
}

#[tokio::test(start_paused = true)]
async fn test_document_number_fills_client_over_http() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;

    assert_eq!(
        set_field(&app, session, "cliente.dni", "30222333").await,
        StatusCode::OK
    );
    tokio::time::sleep(Duration::from_secs(5)).await;

    let (_, snapshot) = send(&app, "GET", &format!("/sessions/{session}"), None).await;
    assert_eq!(snapshot["record"]["cliente"]["nombreCompleto"], "Juan Pérez");
    assert_eq!(snapshot["record"]["cliente"]["localidad"], "Flores");
    assert_eq!(snapshot["autofill"][0]["status"]["lastLookedUp"], "30222333");
}

// ============================================================================
// Narration
// ============================================================================

async fn post_audio(app: &Router, session: u64, audio: &'static [u8]) -> (StatusCode, serde_json::Value) {
    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri(format!("/sessions/{session}/narration"))
        .header("content-type", "audio/webm")
        .body(Body::from(audio))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_narration_without_transcriber_is_bad_gateway() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;

    let (status, body) = post_audio(&app, session, b"audio").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_narration_is_appended() {
    let app: Router = create_test_router(true);
    let session: u64 = open_session(&app).await;
    set_field(&app, session, "siniestro.narracionHechos", "Venía por Rivadavia.").await;

    let (status, body) = post_audio(&app, session, b"audio").await;

    assert_eq!(status, StatusCode::OK);
    let narration: &str = body["narracionHechos"].as_str().unwrap();
    assert!(narration.starts_with("Venía por Rivadavia."));
    assert!(narration.ends_with("Me chocó un taxi."));
}

// ============================================================================
// Submission and cases
// ============================================================================

#[tokio::test]
async fn test_invalid_submit_lists_field_errors() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;
    set_field(&app, session, "cliente.dni", "12").await;

    let (status, body) = send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors: &Vec<serde_json::Value> = body["errors"].as_array().unwrap();
    assert!(!errors.is_empty());
    assert!(
        errors
            .iter()
            .any(|error| error["path"] == "cliente.dni" && error["message"] == DNI_MESSAGE)
    );
    let (_, cases) = send(&app, "GET", "/cases", None).await;
    assert_eq!(cases["total"], 0);
}

#[tokio::test]
async fn test_submitted_case_is_listed_rendered_and_deleted() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;
    fill_complete(&app, session).await;

    let (status, submitted) =
        send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["updated"], false);
    let id: i64 = submitted["id"].as_i64().unwrap();

    let (_, snapshot) = send(&app, "GET", &format!("/sessions/{session}"), None).await;
    assert_eq!(snapshot["record"]["cliente"]["nombreCompleto"], "");

    let (status, cases) = send(&app, "GET", "/cases?q=p%C3%A9rez", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cases["total"], 1);
    assert_eq!(cases["cases"][0]["nombreCompleto"], "Juan Pérez");

    let (status, csv) = send_raw(&app, "GET", &format!("/cases/{id}/export.csv"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(csv).unwrap().starts_with(&format!("Campo,Valor\nid,{id}\n")));

    let (status, summary) =
        send_raw(&app, "GET", &format!("/cases/{id}/documents/summary"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(summary).unwrap().contains("Nombre Completo: Juan Pérez"));

    let (status, _) = send_raw(&app, "GET", &format!("/cases/{id}/documents/invoice"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_raw(&app, "DELETE", &format!("/cases/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_raw(&app, "GET", &format!("/cases/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edited_case_is_updated() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;
    fill_complete(&app, session).await;
    let (_, submitted) = send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
    let id: i64 = submitted["id"].as_i64().unwrap();

    let (status, snapshot) =
        send(&app, "POST", &format!("/sessions/{session}/edit/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["editing"], id);
    assert_eq!(snapshot["record"]["cliente"]["nombreCompleto"], "Juan Pérez");

    set_field(&app, session, "cliente.localidad", "Caballito").await;
    let (status, updated) = send(&app, "POST", &format!("/sessions/{session}/submit"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["updated"], true);
    assert_eq!(updated["id"], id);

    let (_, stored) = send(&app, "GET", &format!("/cases/{id}"), None).await;
    assert_eq!(stored["cliente"]["localidad"], "Caballito");
}

#[tokio::test]
async fn test_editing_unknown_case_is_not_found() {
    let app: Router = create_test_router(false);
    let session: u64 = open_session(&app).await;
    let (status, _) = send(&app, "POST", &format!("/sessions/{session}/edit/99"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_options_include_provinces() {
    let app: Router = create_test_router(false);
    let (status, body) = send(&app, "GET", "/options", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provinces"].as_array().unwrap().len(), 24);
    assert!(!body["catalogues"].as_array().unwrap().is_empty());
}
