use chrono::NaiveDate;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{
    ChangePointResult, DatasetOverview, DateRange, EventRecord, ImpactResult, PricePoint,
    PriceStats, ReturnStats, SummaryStats,
};
use crate::services::dataset::Dataset;
use crate::services::{event_index, impact_service, indicators};

/// Default cap on the number of price rows returned in one response.
pub const DEFAULT_PRICE_LIMIT: usize = 5000;

/// Parse an optional `YYYY-MM-DD` query parameter.
///
/// Absent or blank means "no bound". Anything else that is not a valid date is
/// rejected rather than treated as unbounded.
pub fn parse_date_param(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::InvalidArgument(format!(
                    "{} must be a date in YYYY-MM-DD format, got '{}'",
                    name, value
                ))
            }),
    }
}

/// Date-filtered slice of the derived price table.
///
/// When more than `limit` rows match, every `⌊N / limit⌋`-th row is kept
/// starting from the first, so the result spans the whole range.
pub fn get_prices(
    dataset: &Dataset,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    limit: usize,
) -> Result<Vec<PricePoint>, AppError> {
    if limit == 0 {
        return Err(AppError::InvalidArgument("limit must be at least 1".to_string()));
    }

    let filtered: Vec<&PricePoint> = dataset
        .prices()
        .iter()
        .filter(|p| start.map_or(true, |s| p.date >= s) && end.map_or(true, |e| p.date <= e))
        .collect();

    let step = if filtered.len() > limit {
        filtered.len() / limit
    } else {
        1
    };
    debug!("Price query matched {} rows, sampling every {}", filtered.len(), step);

    Ok(filtered.into_iter().step_by(step).cloned().collect())
}

pub fn get_events(
    dataset: &Dataset,
    event_type: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<EventRecord> {
    event_index::filter(dataset.events(), event_type, start, end)
        .cloned()
        .collect()
}

pub fn list_event_types(dataset: &Dataset) -> Vec<String> {
    event_index::list_types(dataset.events()).into_iter().collect()
}

pub fn get_change_points(dataset: &Dataset) -> &ChangePointResult {
    dataset.change_points()
}

pub fn get_summary_stats(dataset: &Dataset) -> Result<SummaryStats, AppError> {
    summarize(dataset.prices())
}

/// Summary statistics over a derived price table in date order.
pub fn summarize(prices: &[PricePoint]) -> Result<SummaryStats, AppError> {
    let (first, last) = match (prices.first(), prices.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AppError::DataUnavailable("price table is empty".to_string())),
    };

    let values: Vec<f64> = prices.iter().map(|p| p.price).collect();
    let returns: Vec<f64> = prices
        .iter()
        .map(|p| p.daily_return)
        .filter(|r| !r.is_nan())
        .collect();

    let date_range = DateRange {
        start: prices.iter().map(|p| p.date).min().unwrap_or(first.date),
        end: prices.iter().map(|p| p.date).max().unwrap_or(last.date),
    };

    let price_stats = PriceStats {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean: indicators::mean(&values),
        median: indicators::median(&values).unwrap_or(f64::NAN),
        std: indicators::sample_std(&values),
        current: last.price,
    };

    let returns = ReturnStats {
        mean_daily_return: (!returns.is_empty()).then(|| indicators::mean(&returns)),
        volatility: last.rolling_volatility_30d,
    };

    Ok(SummaryStats {
        date_range,
        price_stats,
        returns,
    })
}

pub fn get_event_impact(dataset: &Dataset, event_id: u32) -> Result<ImpactResult, AppError> {
    let result = impact_service::compute_impact(
        event_id,
        dataset.prices(),
        dataset.events(),
        impact_service::DEFAULT_WINDOW_DAYS,
    )?;
    info!(
        "Computed impact for event {} ({}): change {:?}%",
        result.event.id, result.event.name, result.price_change_pct
    );
    Ok(result)
}

pub fn get_overview(dataset: &Dataset) -> DatasetOverview {
    let prices = dataset.prices();
    DatasetOverview {
        price_records: prices.len(),
        events: dataset.events().len(),
        date_range: match (prices.first(), prices.last()) {
            (Some(first), Some(last)) => Some(DateRange {
                start: first.date,
                end: last.date,
            }),
            _ => None,
        },
    }
}
