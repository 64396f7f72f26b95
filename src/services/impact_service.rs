use chrono::Duration;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{EventRecord, ImpactDataPoint, ImpactResult, PricePoint};
use crate::services::event_index;
use crate::services::indicators;

/// Days on each side of the event date.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Maximum number of window rows returned for display.
pub const MAX_DATA_POINTS: usize = 100;

/// Compare average prices before and after an event.
///
/// The window is `[event.date - window_days, event.date + window_days]`,
/// inclusive. Rows on the event date itself count toward neither side. The
/// before/after means always use the whole window; only `data_points` is
/// capped.
///
/// Returns `NotFound` both for an unknown id and for an event whose window
/// has no price coverage.
pub fn compute_impact(
    event_id: u32,
    prices: &[PricePoint],
    events: &[EventRecord],
    window_days: i64,
) -> Result<ImpactResult, AppError> {
    let event = event_index::find_by_id(events, event_id)
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

    let start = event.date - Duration::days(window_days);
    let end = event.date + Duration::days(window_days);

    let window: Vec<ImpactDataPoint> = prices
        .iter()
        .filter(|p| p.date >= start && p.date <= end)
        .map(|p| ImpactDataPoint {
            date: p.date,
            price: p.price,
            daily_return: p.daily_return,
            log_return: p.log_return,
            rolling_mean_30d: p.rolling_mean_30d,
            rolling_volatility_30d: p.rolling_volatility_30d,
            days_from_event: (p.date - event.date).num_days(),
        })
        .collect();

    if window.is_empty() {
        return Err(AppError::NotFound(format!(
            "No price data within {} days of event {} ({})",
            window_days, event.id, event.date
        )));
    }

    let before: Vec<f64> = window
        .iter()
        .filter(|p| p.days_from_event < 0)
        .map(|p| p.price)
        .collect();
    let after: Vec<f64> = window
        .iter()
        .filter(|p| p.days_from_event > 0)
        .map(|p| p.price)
        .collect();

    let price_before = (!before.is_empty()).then(|| indicators::mean(&before));
    let price_after = (!after.is_empty()).then(|| indicators::mean(&after));

    let price_change_pct = match (price_before, price_after) {
        (Some(b), Some(a)) if b != 0.0 => Some((a - b) / b * 100.0),
        _ => None,
    };

    debug!(
        "Impact for event {}: {} rows in window, before={:?}, after={:?}",
        event.id,
        window.len(),
        price_before,
        price_after
    );

    let data_points = window.into_iter().take(MAX_DATA_POINTS).collect();

    Ok(ImpactResult {
        event: event.clone(),
        window_days,
        price_before,
        price_after,
        price_change_pct,
        data_points,
    })
}
