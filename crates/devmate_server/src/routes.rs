//! HTTP routes: the solve relay and a liveness probe.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use devmate_constant::app;
use devmate_core::{SolveRequest, SolveResponse};
use devmate_observability::http_request_span;
use serde_json::{Value, json};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(app::SOLVE_ROUTE, post(solve))
        .route(app::HEALTH_ROUTE, get(health))
        .with_state(state)
}

async fn solve(
    State(state): State<AppState>,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let span = http_request_span!("POST", app::SOLVE_ROUTE, request_id.as_str());

    let mut response = match handle_solve(&state, payload).instrument(span.clone()).await {
        Ok(solution) => (StatusCode::OK, Json(SolveResponse::solution(solution))).into_response(),
        Err(err) => err.into_response(),
    };

    span.record("http.status_code", response.status().as_u16());
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn handle_solve(
    state: &AppState,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "unreadable solve body");
        ApiError::from(rejection)
    })?;

    match state.relay.solve(request.problem.as_deref()).await {
        Ok(solution) => {
            tracing::info!(chars = solution.len(), "solution returned");
            Ok(solution)
        }
        Err(err) => {
            tracing::info!(status = err.status_code(), "solve failed");
            Err(err.into())
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
