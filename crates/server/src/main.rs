// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use intake_api::{
    ApiError, BlurRequest, BlurResponse, CaseFilters, CaseListResponse, ChangedFieldsResponse,
    DocumentKind, HttpTranscriber, IntakeDesk, NarrationResponse, OptionsResponse,
    SessionCreatedResponse, SessionSnapshot, SetFieldRequest, SubmitResponse, ToggleRequest,
    Transcriber, TranscriptionError, parse_path,
};
use intake_autofill::{AutofillConfig, ClientLookup, HttpClientLookup};
use intake_domain::dates::today_local;
use intake_domain::{CaseId, FieldError, FieldPath, ProvinceCatalog};
use intake_persistence::{
    CaseListEntry, CaseStore, ProvinceSource, RemoteCaseService, load_provinces,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use session::{SessionHandle, SessionRegistry};

/// Case intake server - HTTP front end for the intake form and case dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON file caching submitted cases. If not provided, cases are kept in memory.
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Remote case service that assigns ids on create
    #[arg(long)]
    cases_url: Option<String>,

    /// Person directory queried by document number
    #[arg(long)]
    client_url: String,

    /// Remote province catalogue
    #[arg(long)]
    provinces_url: Option<String>,

    /// JSON file caching the province catalogue
    #[arg(long)]
    provinces_cache: Option<PathBuf>,

    /// Speech-to-text service for the incident narration
    #[arg(long)]
    transcription_url: Option<String>,

    /// Quiet period before a typed document number is looked up
    #[arg(long, default_value_t = 450)]
    debounce_ms: u64,

    /// Timeout for every outbound HTTP request
    #[arg(long, default_value_t = 15)]
    lookup_timeout_secs: u64,
}

/// Application state shared across handlers.
struct AppState<L: ClientLookup, T: Transcriber> {
    /// Case-level operations.
    desk: Arc<IntakeDesk<CaseStore, L>>,
    /// Open form sessions.
    sessions: Arc<SessionRegistry<L>>,
    /// Speech-to-text, if configured.
    transcriber: Option<Arc<T>>,
}

impl<L: ClientLookup, T: Transcriber> Clone for AppState<L, T> {
    fn clone(&self) -> Self {
        Self {
            desk: Arc::clone(&self.desk),
            sessions: Arc::clone(&self.sessions),
            transcriber: self.transcriber.clone(),
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Failing fields, when the form did not validate.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Failing fields, when the form did not validate.
    errors: Vec<FieldError>,
}

impl HttpError {
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            errors: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, message),
            ApiError::ValidationFailed { errors } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                errors,
            },
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::Upstream { .. } => {
                error!(error = %message, "Upstream service error");
                Self::new(StatusCode::BAD_GATEWAY, message)
            }
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

/// Handler for POST `/sessions` endpoint.
///
/// Opens a form session on a default case.
async fn handle_create_session<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
) -> Json<SessionCreatedResponse> {
    let session_id: u64 = app_state.sessions.open(app_state.desk.as_ref()).await;
    Json(SessionCreatedResponse { session_id })
}

/// Handler for GET `/sessions/{id}` endpoint.
///
/// Returns the record, its validation messages and the autofill statuses.
async fn handle_get_session<L: ClientLookup>(
    SessionHandle(_, session): SessionHandle<L>,
) -> Json<SessionSnapshot> {
    let snapshot: SessionSnapshot = session.lock().await.snapshot();
    Json(snapshot)
}

/// Handler for DELETE `/sessions/{id}` endpoint.
///
/// Cancels pending lookups and discards the session.
async fn handle_close_session<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    SessionHandle(id, _): SessionHandle<L>,
) -> StatusCode {
    app_state.sessions.close(id).await;
    StatusCode::NO_CONTENT
}

/// Handler for POST `/sessions/{id}/field` endpoint.
///
/// Writes one text field; tracked document numbers trigger autofill.
async fn handle_set_field<L: ClientLookup>(
    SessionHandle(id, session): SessionHandle<L>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<ChangedFieldsResponse>, HttpError> {
    info!(session_id = id, path = %req.path, "Handling set_field request");
    let changed: Vec<FieldPath> = session.lock().await.set_field(&req.path, &req.value)?;
    Ok(Json(ChangedFieldsResponse { changed }))
}

/// Handler for POST `/sessions/{id}/toggle` endpoint.
async fn handle_toggle<L: ClientLookup>(
    SessionHandle(id, session): SessionHandle<L>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ChangedFieldsResponse>, HttpError> {
    info!(
        session_id = id,
        path = %req.path,
        item = %req.item,
        included = req.included,
        "Handling toggle request"
    );
    let changed: Vec<FieldPath> =
        session
            .lock()
            .await
            .toggle(&req.path, &req.item, req.included)?;
    Ok(Json(ChangedFieldsResponse { changed }))
}

/// Handler for POST `/sessions/{id}/blur` endpoint.
///
/// Revalidates one field and returns its message, if any.
async fn handle_blur<L: ClientLookup>(
    SessionHandle(_, session): SessionHandle<L>,
    Json(req): Json<BlurRequest>,
) -> Result<Json<BlurResponse>, HttpError> {
    let path: FieldPath = parse_path(&req.path)?;
    let error: Option<FieldError> = session.lock().await.blur(&req.path, &req.value)?;
    Ok(Json(BlurResponse {
        path,
        error: error.map(|error| error.message),
    }))
}

/// Handler for POST `/sessions/{id}/sections/third-vehicle` endpoint.
async fn handle_add_third_vehicle<L: ClientLookup>(
    SessionHandle(id, session): SessionHandle<L>,
) -> Result<Json<ChangedFieldsResponse>, HttpError> {
    info!(session_id = id, "Adding third-vehicle defendants");
    let changed: Vec<FieldPath> = session.lock().await.add_third_vehicle()?;
    Ok(Json(ChangedFieldsResponse { changed }))
}

/// Handler for DELETE `/sessions/{id}/sections/third-vehicle` endpoint.
async fn handle_remove_third_vehicle<L: ClientLookup>(
    SessionHandle(id, session): SessionHandle<L>,
) -> Result<Json<ChangedFieldsResponse>, HttpError> {
    info!(session_id = id, "Removing third-vehicle defendants");
    let changed: Vec<FieldPath> = session.lock().await.remove_third_vehicle()?;
    Ok(Json(ChangedFieldsResponse { changed }))
}

/// Handler for POST `/sessions/{id}/narration` endpoint.
///
/// Transcribes the uploaded audio and appends it to the incident narration.
/// The session is not locked while the transcription runs.
async fn handle_narration<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    SessionHandle(id, session): SessionHandle<L>,
    mut headers: HeaderMap,
    audio: Bytes,
) -> Result<Json<NarrationResponse>, HttpError> {
    let transcriber: Arc<T> = app_state
        .transcriber
        .clone()
        .ok_or_else(|| ApiError::from(TranscriptionError::NotConfigured))?;
    let mime_type: String = headers
        .remove(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok().map(str::to_string))
        .unwrap_or_else(|| String::from("application/octet-stream"));
    info!(session_id = id, bytes = audio.len(), "Transcribing narration");

    let transcription: String = transcriber
        .transcribe(Vec::from(audio), &mime_type)
        .await
        .map_err(ApiError::from)?;
    let narracion_hechos: String = session.lock().await.append_narration(&transcription)?;
    Ok(Json(NarrationResponse { narracion_hechos }))
}

/// Handler for POST `/sessions/{id}/submit` endpoint.
///
/// Validates the form and creates or updates the case. The session is reset
/// only when the repository accepted it.
async fn handle_submit<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    SessionHandle(id, session): SessionHandle<L>,
) -> Result<Json<SubmitResponse>, HttpError> {
    info!(session_id = id, "Handling submit request");
    let mut guard = session.lock().await;
    let response: SubmitResponse = app_state.desk.submit(&mut guard).await?;
    drop(guard);
    Ok(Json(response))
}

/// Handler for POST `/sessions/{id}/edit/{case_id}` endpoint.
///
/// Loads a stored case into the session.
async fn handle_edit<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    SessionHandle(id, session): SessionHandle<L>,
    Path((_, case_id)): Path<(u64, i64)>,
) -> Result<Json<SessionSnapshot>, HttpError> {
    info!(session_id = id, case_id, "Handling edit request");
    let mut guard = session.lock().await;
    app_state.desk.edit(&mut guard, CaseId::new(case_id)).await?;
    let snapshot: SessionSnapshot = guard.snapshot();
    drop(guard);
    Ok(Json(snapshot))
}

/// Handler for GET `/cases` endpoint.
///
/// Lists stored cases matching the query, newest first.
async fn handle_list_cases<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    Query(filters): Query<CaseFilters>,
) -> Result<Json<CaseListResponse>, HttpError> {
    Ok(Json(app_state.desk.list_cases(&filters).await?))
}

/// Handler for GET `/cases/{id}` endpoint.
async fn handle_get_case<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    Path(id): Path<i64>,
) -> Result<Json<CaseListEntry>, HttpError> {
    Ok(Json(app_state.desk.get_case(CaseId::new(id)).await?))
}

/// Handler for DELETE `/cases/{id}` endpoint.
async fn handle_delete_case<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    app_state.desk.delete_case(CaseId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/cases/{id}/documents/{kind}` endpoint.
///
/// Renders the fee agreement or the case summary as plain text.
async fn handle_document<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    Path((id, kind)): Path<(i64, String)>,
) -> Result<Response, HttpError> {
    let kind: DocumentKind = kind
        .parse()
        .map_err(|message: String| HttpError::new(StatusCode::BAD_REQUEST, message))?;
    let text: String = app_state
        .desk
        .document(CaseId::new(id), kind, today_local())
        .await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}

/// Handler for GET `/cases/{id}/export.csv` endpoint.
async fn handle_export<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
    Path(id): Path<i64>,
) -> Result<Response, HttpError> {
    let csv: String = app_state.desk.export_case(CaseId::new(id)).await?;
    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"caso-{id}.csv\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Handler for GET `/options` endpoint.
///
/// Returns every option catalogue and the province list.
async fn handle_options<L: ClientLookup, T: Transcriber>(
    AxumState(app_state): AxumState<AppState<L, T>>,
) -> Json<OptionsResponse> {
    Json(app_state.desk.options())
}

fn build_router<L: ClientLookup, T: Transcriber>(app_state: AppState<L, T>) -> Router {
    Router::new()
        .route("/sessions", post(handle_create_session::<L, T>))
        .route(
            "/sessions/{id}",
            get(handle_get_session::<L>).delete(handle_close_session::<L, T>),
        )
        .route("/sessions/{id}/field", post(handle_set_field::<L>))
        .route("/sessions/{id}/toggle", post(handle_toggle::<L>))
        .route("/sessions/{id}/blur", post(handle_blur::<L>))
        .route(
            "/sessions/{id}/sections/third-vehicle",
            post(handle_add_third_vehicle::<L>).delete(handle_remove_third_vehicle::<L>),
        )
        .route("/sessions/{id}/narration", post(handle_narration::<L, T>))
        .route("/sessions/{id}/submit", post(handle_submit::<L, T>))
        .route(
            "/sessions/{id}/edit/{case_id}",
            post(handle_edit::<L, T>),
        )
        .route("/cases", get(handle_list_cases::<L, T>))
        .route(
            "/cases/{id}",
            get(handle_get_case::<L, T>).delete(handle_delete_case::<L, T>),
        )
        .route(
            "/cases/{id}/documents/{kind}",
            get(handle_document::<L, T>),
        )
        .route("/cases/{id}/export.csv", get(handle_export::<L, T>))
        .route("/options", get(handle_options::<L, T>))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing case intake server");
    let timeout: Duration = Duration::from_secs(args.lookup_timeout_secs);

    let mut store: CaseStore = if let Some(cache_file) = &args.cache_file {
        info!("Using case cache at: {}", cache_file.display());
        CaseStore::open(cache_file).await?
    } else {
        info!("Keeping cases in memory");
        CaseStore::new_in_memory()
    };
    if let Some(cases_url) = &args.cases_url {
        store = store.with_remote(RemoteCaseService::new(cases_url, timeout)?);
    }

    let provinces: ProvinceCatalog = load_provinces(&ProvinceSource {
        url: args.provinces_url.as_deref(),
        cache_file: args.provinces_cache.as_deref(),
        timeout,
    })
    .await?;
    info!(count = provinces.provinces().len(), "Loaded province catalogue");

    let lookup: HttpClientLookup = HttpClientLookup::new(&args.client_url, timeout)?;
    let transcriber: Option<Arc<HttpTranscriber>> = args
        .transcription_url
        .as_deref()
        .map(|url| HttpTranscriber::new(url, timeout))
        .transpose()?
        .map(Arc::new);

    let desk: IntakeDesk<CaseStore, HttpClientLookup> = IntakeDesk::new(
        Arc::new(store),
        Arc::new(lookup),
        Arc::new(provinces),
        AutofillConfig {
            debounce: Duration::from_millis(args.debounce_ms),
        },
    );
    let app_state: AppState<HttpClientLookup, HttpTranscriber> = AppState {
        desk: Arc::new(desk),
        sessions: Arc::new(SessionRegistry::default()),
        transcriber,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
