use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EventRecord;

/// A price row inside an event window, positioned relative to the event date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactDataPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub daily_return: f64,
    pub log_return: f64,
    pub rolling_mean_30d: Option<f64>,
    pub rolling_volatility_30d: Option<f64>,
    pub days_from_event: i64,
}

/// Before/after comparison of prices around one event.
///
/// `price_change_pct` is `None` whenever either side of the window has no
/// observations, which is distinct from a measured change of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub event: EventRecord,
    pub window_days: i64,
    pub price_before: Option<f64>,
    pub price_after: Option<f64>,
    pub price_change_pct: Option<f64>,
    pub data_points: Vec<ImpactDataPoint>,
}
