use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{EventRecord, ImpactResult};
use crate::routes::ApiResponse;
use crate::services::query_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(get_events))
        .route("/event-types", get(get_event_types))
        .route("/event-impact/:event_id", get(get_event_impact))
}

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    #[serde(rename = "type")]
    event_type: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

pub async fn get_events(
    Query(params): Query<EventQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EventRecord>>>, AppError> {
    info!("GET /api/events - {:?}", params);
    let start = query_service::parse_date_param("start_date", params.start_date.as_deref())?;
    let end = query_service::parse_date_param("end_date", params.end_date.as_deref())?;

    let events = query_service::get_events(&state.dataset, params.event_type.as_deref(), start, end);
    Ok(Json(ApiResponse::list(events)))
}

pub async fn get_event_types(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    info!("GET /api/event-types");
    Json(ApiResponse::ok(query_service::list_event_types(&state.dataset)))
}

pub async fn get_event_impact(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ImpactResult>>, AppError> {
    info!("GET /api/event-impact/{}", event_id);
    let id: u32 = event_id.trim().parse().map_err(|_| {
        AppError::InvalidArgument(format!("event id must be a positive integer, got '{}'", event_id))
    })?;

    let impact = query_service::get_event_impact(&state.dataset, id).map_err(|e| {
        warn!("No impact for event {}: {}", id, e);
        e
    })?;
    Ok(Json(ApiResponse::ok(impact)))
}
