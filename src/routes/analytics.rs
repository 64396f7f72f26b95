use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{ChangePointResult, SummaryStats};
use crate::routes::ApiResponse;
use crate::services::query_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/change-points", get(get_change_points))
}

async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SummaryStats>>, AppError> {
    info!("GET /api/stats - Computing summary statistics");
    query_service::get_summary_stats(&state.dataset)
        .map(|stats| Json(ApiResponse::ok(stats)))
        .map_err(|e| {
            error!("Failed to compute summary statistics: {}", e);
            e
        })
}

async fn get_change_points(State(state): State<AppState>) -> Json<ApiResponse<ChangePointResult>> {
    info!("GET /api/change-points");
    Json(ApiResponse::ok(query_service::get_change_points(&state.dataset).clone()))
}
