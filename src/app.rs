use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{analytics, events, prices, status};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let api = Router::<AppState>::new()
        .merge(prices::router())
        .merge(events::router())
        .merge(analytics::router());

    Router::<AppState>::new()
        .merge(status::router())
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, NaiveDate};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::models::{ChangePointResult, PriceRecord};
    use crate::services::dataset::Dataset;
    use crate::services::loader::seed_events;
    use crate::services::metrics;

    fn test_app() -> Router {
        let event = NaiveDate::from_ymd_opt(2014, 6, 1).unwrap();
        let records: Vec<PriceRecord> = (-60..=60)
            .map(|offset: i64| {
                PriceRecord::new(
                    event + Duration::days(offset),
                    if offset < 0 { 100.0 } else { 60.0 },
                )
            })
            .collect();
        let dataset = Dataset::new(
            metrics::derive(records),
            seed_events(),
            ChangePointResult::placeholder(),
        );
        create_app(AppState::new(dataset))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_prices_envelope() {
        let (status, body) = get("/api/prices?start_date=2014-06-01&end_date=2014-06-10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 10);
        assert_eq!(body["data"][0]["date"], "2014-06-01");
    }

    #[tokio::test]
    async fn test_prices_limit_downsamples() {
        let (status, body) = get("/api/prices?limit=40").await;
        assert_eq!(status, StatusCode::OK);
        // 120 derived rows, step 3
        assert_eq!(body["count"], 40);
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let (status, body) = get("/api/prices?start_date=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("start_date"));
    }

    #[tokio::test]
    async fn test_events_filtered_by_type() {
        let (status, body) = get("/api/events?type=Policy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["type"], "Policy");

        let (_, body) = get("/api/events?type=all").await;
        assert_eq!(body["count"], 12);

        let (status, body) = get("/api/events?type=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 12);
    }

    #[tokio::test]
    async fn test_event_types() {
        let (status, body) = get("/api/event-types").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_event_impact() {
        let (status, body) = get("/api/event-impact/8").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["event"]["name"], "Oil Price Crash");
        assert_eq!(body["data"]["price_before"], 100.0);
        assert_eq!(body["data"]["price_after"], 60.0);
        assert_eq!(body["data"]["price_change_pct"], -40.0);
    }

    #[tokio::test]
    async fn test_event_impact_not_found_vs_bad_request() {
        let (status, body) = get("/api/event-impact/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        // Event 1 (1990) has no price coverage
        let (status, _) = get("/api/event-impact/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get("/api/event-impact/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_and_change_points() {
        let (status, body) = get("/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["price_stats"]["max"], 100.0);
        assert_eq!(body["data"]["price_stats"]["current"], 60.0);

        let (status, body) = get("/api/change-points").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["change_point"]["index"], 5000);
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data_stats"]["events"], 12);

        let (status, _) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
