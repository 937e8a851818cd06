// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test doubles and request helpers.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use intake_api::{IntakeDesk, Transcriber, TranscriptionError};
use intake_autofill::{AutofillConfig, ClientLookup, LookupError, LookupOutcome};
use intake_domain::ProvinceCatalog;
use intake_persistence::CaseStore;
use std::sync::Arc;
use tower::ServiceExt;

use crate::AppState;
use crate::session::SessionRegistry;

/// Knows exactly one person.
#[derive(Debug, Default)]
pub struct SinglePersonLookup;

impl ClientLookup for SinglePersonLookup {
    async fn lookup(&self, dni: &str) -> Result<LookupOutcome, LookupError> {
        if dni != "30222333" {
            return Ok(LookupOutcome::NotFound);
        }
        let serde_json::Value::Object(fields) = serde_json::json!({
            "nombre": "Juan",
            "apellido": "Pérez",
            "localidad": "Flores",
        }) else {
            unreachable!();
        };
        Ok(LookupOutcome::Found(fields))
    }
}

/// Returns the same sentence for any audio.
#[derive(Debug, Default)]
pub struct FixedTranscriber;

impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, audio: Vec<u8>, _mime_type: &str) -> Result<String, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        Ok(String::from("Me chocó un taxi."))
    }
}

pub type TestState = AppState<SinglePersonLookup, FixedTranscriber>;

pub fn create_test_app_state(with_transcriber: bool) -> TestState {
    let desk: IntakeDesk<CaseStore, SinglePersonLookup> = IntakeDesk::new(
        Arc::new(CaseStore::new_in_memory()),
        Arc::new(SinglePersonLookup),
        Arc::new(ProvinceCatalog::builtin()),
        AutofillConfig::default(),
    );
    AppState {
        desk: Arc::new(desk),
        sessions: Arc::new(SessionRegistry::default()),
        transcriber: with_transcriber.then(|| Arc::new(FixedTranscriber)),
    }
}

pub fn create_test_router(with_transcriber: bool) -> Router {
    crate::build_router(create_test_app_state(with_transcriber))
}

/// Sends a request and returns the status and the raw body.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body: Body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// Sends a request and decodes the JSON response body (`null` when empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = send_raw(app, method, uri, body).await;
    let json: serde_json::Value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

pub async fn open_session(app: &Router) -> u64 {
    let (status, body) = send(app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    body["sessionId"].as_u64().unwrap()
}

pub async fn set_field(app: &Router, session: u64, path: &str, value: &str) -> StatusCode {
    let (status, _) = send(
        app,
        "POST",
        &format!("/sessions/{session}/field"),
        Some(serde_json::json!({ "path": path, "value": value })),
    )
    .await;
    status
}

/// Fills every required field and the claimant's injury zones.
pub async fn fill_complete(app: &Router, session: u64) {
    let values: [(&str, &str); 12] = [
        ("cliente.nombreCompleto", "Juan Pérez"),
        ("cliente.fechaNacimiento", "1985-04-12"),
        ("cliente.domicilio", "Av. Rivadavia 1234"),
        ("cliente.localidad", "Flores"),
        ("cliente.telefono", "11 4444 5555"),
        ("cliente.mail", "juan@example.com"),
        ("cliente.rolAccidente", "Conductor"),
        ("vehiculoCliente.vehiculo", "Fiat Palio"),
        ("vehiculoCliente.dominio", "AB123CD"),
        ("siniestro.lugarHecho", "CABA"),
        ("siniestro.fechaHecho", "2024-03-01"),
        ("siniestro.horaHecho", "14:30"),
    ];
    for (path, value) in values {
        assert_eq!(set_field(app, session, path, value).await, StatusCode::OK);
    }
    assert_eq!(
        set_field(app, session, "cliente.dni", "20999888").await,
        StatusCode::OK
    );
    let (status, _) = send(
        app,
        "POST",
        &format!("/sessions/{session}/toggle"),
        Some(serde_json::json!({
            "path": "cliente.lesiones.zonasAfectadas",
            "item": "Cervical",
            "included": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
