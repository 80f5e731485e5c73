//! HTTP API for Salesdesk.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Health check (returns version) |
//! | `GET` | `/api/ask?q=...&rep_id=...` | Answer a question |
//! | `GET` | `/api/reps` | Full roster |
//! | `GET` | `/api/reps/{id}` | One rep by id |
//! | `GET` | `/api/reps/region/{region}` | Reps in a region |
//! | `GET` | `/api/overview` | Per-rep performance rows |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question must not be empty" } }
//! ```
//!
//! Codes: `bad_request` (400), `not_found` (404), `timeout` (408),
//! `generation_failed` (502), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted; the dashboard frontend
//! is served from a different origin.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use salesdesk_core::error::QueryError;

use crate::config::Config;
use crate::service::DeskService;

/// Shared application state: the fully-built service behind an `Arc`.
#[derive(Clone)]
struct AppState {
    service: Arc<DeskService>,
}

/// Start the HTTP server on the configured bind address.
///
/// Runs until the process is terminated. The service (roster, corpus,
/// index) must already be built; startup failures happen before this point.
pub async fn run_server(config: &Config, service: Arc<DeskService>) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState { service };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/ask", get(handle_ask))
        .route("/api/reps", get(handle_reps))
        .route("/api/reps/{id}", get(handle_rep_by_id))
        .route("/api/reps/region/{region}", get(handle_reps_by_region))
        .route("/api/overview", get(handle_overview))
        .layer(cors)
        .with_state(state);

    println!("Salesdesk API listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn timeout_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::REQUEST_TIMEOUT,
        code: "timeout".to_string(),
        message: message.into(),
    }
}

fn generation_failed(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "generation_failed".to_string(),
        message: message.into(),
    }
}

/// Map a query error onto the HTTP error contract.
fn map_query_error(err: QueryError) -> AppError {
    match err {
        QueryError::EmptyQuestion => bad_request(err.to_string()),
        QueryError::RepNotFound { .. } => not_found(err.to_string()),
        QueryError::GenerationFailed { ref reason } if reason.contains("timed out") => {
            timeout_error(err.to_string())
        }
        QueryError::GenerationFailed { .. } => generation_failed(err.to_string()),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/ask ============

#[derive(Deserialize)]
struct AskParams {
    q: Option<String>,
    rep_id: Option<u32>,
}

async fn handle_ask(
    State(state): State<AppState>,
    Query(params): Query<AskParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let question = params
        .q
        .ok_or_else(|| bad_request("missing query parameter: q"))?;

    let answer = state
        .service
        .answer(&question, params.rep_id)
        .await
        .map_err(map_query_error)?;

    Ok(Json(serde_json::to_value(&answer).map_err(|e| AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: e.to_string(),
    })?))
}

// ============ Roster endpoints ============

async fn handle_reps(State(state): State<AppState>) -> Json<serde_json::Value> {
    let reps = state.service.roster().all().to_vec();
    Json(serde_json::json!({ "salesReps": reps }))
}

async fn handle_rep_by_id(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let roster = state.service.roster();
    let rep = roster
        .by_id(id)
        .ok_or_else(|| not_found(format!("sales representative {} not found", id)))?;
    Ok(Json(serde_json::json!(rep)))
}

async fn handle_reps_by_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let roster = state.service.roster();
    let reps: Vec<_> = roster.by_region(&region).into_iter().cloned().collect();
    if reps.is_empty() {
        return Err(not_found(format!(
            "no sales representatives found in region '{}'",
            region
        )));
    }
    Ok(Json(serde_json::json!({ "salesReps": reps })))
}

async fn handle_overview(State(state): State<AppState>) -> Json<serde_json::Value> {
    let rows = state.service.roster().overview();
    Json(serde_json::json!({ "overview": rows }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping_codes() {
        let e = map_query_error(QueryError::EmptyQuestion);
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.code, "bad_request");

        let e = map_query_error(QueryError::RepNotFound {
            name: "Dave".to_string(),
        });
        assert_eq!(e.status, StatusCode::NOT_FOUND);

        let e = map_query_error(QueryError::GenerationFailed {
            reason: "provider unreachable".to_string(),
        });
        assert_eq!(e.status, StatusCode::BAD_GATEWAY);
        assert_eq!(e.code, "generation_failed");

        let e = map_query_error(QueryError::GenerationFailed {
            reason: "operation timed out".to_string(),
        });
        assert_eq!(e.status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(e.code, "timeout");
    }
}
