use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::models::DatasetOverview;
use crate::services::query_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

#[derive(Debug, Serialize)]
struct IndexResponse {
    message: &'static str,
    status: &'static str,
    data_stats: DatasetOverview,
}

async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    info!("GET / - Service overview");
    Json(IndexResponse {
        message: "Brent Oil Price Dashboard API",
        status: "running",
        data_stats: query_service::get_overview(&state.dataset),
    })
}

async fn health() -> &'static str {
    "OK"
}
