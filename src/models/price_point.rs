use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single observation as read from a price source, before any derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub price: f64,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

// A price observation with its derived return and rolling columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub daily_return: f64,
    pub log_return: f64,
    pub rolling_mean_30d: Option<f64>,
    pub rolling_volatility_30d: Option<f64>,
}
