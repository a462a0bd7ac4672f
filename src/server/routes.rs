//! Axum route handlers for the saint record server.
//!
//! # Routes
//!
//! - `GET  /health`      — Returns `{"status": "ok", "version": ..., "service": "saints"}`
//! - `POST /api/records` — Accepts a `NewRecord`, responds 201 with the stored `Record`
//! - `GET  /api/records` — Responds 200 with every `Record`, newest first
//! - `GET  /` and fallback — The rendered form page

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::ErrorBody;
use crate::record::{NewRecord, Record};
use crate::service::RecordService;

use super::page::{preload_templates, render_form_page};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub service: RecordService,
}

impl AppState {
    pub fn new(service: RecordService) -> Self {
        Self { service }
    }
}

/// Failure responses of the record API.
#[derive(Debug)]
pub enum ApiError {
    /// The record could not be decoded, validated or stored. Responds 400.
    Save(String),
    /// The stored records could not be read. Responds 500.
    Fetch(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::Save(error) => (StatusCode::BAD_REQUEST, "Error saving saint data", error),
            ApiError::Fetch(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error fetching saints",
                error,
            ),
        };
        let body = ErrorBody {
            message: message.to_string(),
            error,
        };
        (status, Json(body)).into_response()
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    preload_templates();
    Router::new()
        .route("/", get(form_page_handler))
        .route("/health", get(health_handler))
        .route("/api/records", get(list_records_handler).post(create_record_handler))
        .fallback(form_page_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness check.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "saints",
    }))
}

/// GET / and every unmatched path — the submission form.
async fn form_page_handler() -> Result<Html<String>, (StatusCode, String)> {
    render_form_page().map(Html).map_err(|e| {
        tracing::error!(error = %e, "Failed to render form page");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to render form page".to_string(),
        )
    })
}

/// POST /api/records — validate and store one record.
async fn create_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let Json(record) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Malformed record body");
        ApiError::Save(rejection.body_text())
    })?;

    let stored = state.service.create(record).await.map_err(|e| {
        tracing::error!(error = %e, "Error saving record");
        ApiError::Save(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/records — every stored record, newest first.
async fn list_records_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.service.list().await.map_err(|e| {
        tracing::error!(error = %e, "Error fetching records");
        ApiError::Fetch(e.to_string())
    })?;
    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
