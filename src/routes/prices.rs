use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::PricePoint;
use crate::routes::ApiResponse;
use crate::services::query_service::{self, DEFAULT_PRICE_LIMIT};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/prices", get(get_prices))
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    limit: Option<String>,
}

fn parse_limit(raw: Option<&str>) -> Result<usize, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PRICE_LIMIT),
        Some(value) => value.parse().map_err(|_| {
            AppError::InvalidArgument(format!(
                "limit must be a positive integer, got '{}'",
                value
            ))
        }),
    }
}

pub async fn get_prices(
    Query(params): Query<PriceQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PricePoint>>>, AppError> {
    info!("GET /api/prices - {:?}", params);
    let start = query_service::parse_date_param("start_date", params.start_date.as_deref())?;
    let end = query_service::parse_date_param("end_date", params.end_date.as_deref())?;
    let limit = parse_limit(params.limit.as_deref())?;

    let prices = query_service::get_prices(&state.dataset, start, end, limit).map_err(|e| {
        warn!("Rejected price query: {}", e);
        e
    })?;
    Ok(Json(ApiResponse::list(prices)))
}
