use crate::models::{PricePoint, PriceRecord};
use crate::services::indicators;

/// Length of the trailing window used for the rolling columns.
pub const ROLLING_WINDOW: usize = 30;

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Build the derived price table.
///
/// Records are stably sorted by date, then returns and trailing 30-record
/// statistics are computed over the full sorted sequence. Rows without a
/// defined log return (the first row, and any transition touching a negative
/// price) are removed last, so the rolling windows still see them.
///
/// Non-positive prices are not rejected: the logarithm produces NaN or
/// infinity and that value flows through unchanged.
pub fn derive(mut records: Vec<PriceRecord>) -> Vec<PricePoint> {
    if records.len() < 2 {
        return Vec::new();
    }

    records.sort_by_key(|r| r.date);

    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();

    // Index 0 has no predecessor; NaN marks it undefined like any other gap.
    let daily_returns: Vec<f64> = std::iter::once(f64::NAN)
        .chain(prices.windows(2).map(|w| w[1] / w[0] - 1.0))
        .collect();
    let log_returns: Vec<f64> = std::iter::once(f64::NAN)
        .chain(prices.windows(2).map(|w| w[1].ln() - w[0].ln()))
        .collect();

    let rolling_mean = indicators::rolling_mean(&prices, ROLLING_WINDOW);
    let annualization = TRADING_DAYS_PER_YEAR.sqrt();
    let rolling_vol: Vec<Option<f64>> = indicators::rolling_std(&log_returns, ROLLING_WINDOW)
        .into_iter()
        .map(|std| std.map(|s| s * annualization))
        .collect();

    records
        .iter()
        .enumerate()
        .filter(|(i, _)| !log_returns[*i].is_nan())
        .map(|(i, r)| PricePoint {
            date: r.date,
            price: r.price,
            daily_return: daily_returns[i],
            log_return: log_returns[i],
            rolling_mean_30d: rolling_mean[i],
            rolling_volatility_30d: rolling_vol[i],
        })
        .collect()
}
