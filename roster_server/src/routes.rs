use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use roster_core::types::{CandidateAssignment, ScheduleSolution, WeekAvailability, WeekCapacity};

use crate::errors::ApiError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schedule/solve", post(solve))
        .route("/schedule/week", post(solve_week))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    pub candidates: Vec<CandidateAssignment>,
    pub capacities: WeekCapacity,
}

#[derive(Debug, Deserialize)]
pub struct WeekRequest {
    pub week_start: NaiveDate,
    pub availabilities: Vec<WeekAvailability>,
    pub capacities: WeekCapacity,
}

async fn solve(
    State(state): State<AppState>,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Result<Json<ScheduleSolution>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::info!(candidates = request.candidates.len(), "solve request");

    let solution = state
        .engine
        .solve(&request.candidates, &request.capacities)
        .map_err(ApiError::Solver)?;
    Ok(Json(solution))
}

async fn solve_week(
    State(state): State<AppState>,
    payload: Result<Json<WeekRequest>, JsonRejection>,
) -> Result<Json<ScheduleSolution>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::info!(
        week_start = %request.week_start,
        availabilities = request.availabilities.len(),
        "week solve request"
    );

    let solution = state
        .engine
        .solve_week(&request.availabilities, request.week_start, &request.capacities)
        .map_err(ApiError::Solver)?;
    Ok(Json(solution))
}
