use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::DataConfig;
use crate::errors::AppError;
use crate::models::{ChangePointResult, EventRecord, PriceRecord};
use crate::services::dataset::Dataset;
use crate::services::metrics;

/// Date layouts found in Brent price exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%y", "%b %d, %Y", "%m/%d/%Y", "%d-%b-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a calendar date in any of the supported layouts.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Load the raw price table.
///
/// The cleaned export is preferred; the raw two-column file is the fallback.
pub fn load_prices(config: &DataConfig) -> Result<Vec<PriceRecord>, AppError> {
    if config.cleaned_prices_path.exists() {
        let records = read_cleaned_prices(&config.cleaned_prices_path)?;
        info!(
            "Loaded {} price records from {}",
            records.len(),
            config.cleaned_prices_path.display()
        );
        return Ok(records);
    }

    if config.raw_prices_path.exists() {
        warn!(
            "Cleaned prices not found at {}, falling back to raw data",
            config.cleaned_prices_path.display()
        );
        let records = read_raw_prices(&config.raw_prices_path)?;
        info!(
            "Loaded {} raw price records from {}",
            records.len(),
            config.raw_prices_path.display()
        );
        return Ok(records);
    }

    Err(AppError::DataUnavailable(format!(
        "no price data at {} or {}",
        config.cleaned_prices_path.display(),
        config.raw_prices_path.display()
    )))
}

fn read_cleaned_prices(path: &Path) -> Result<Vec<PriceRecord>, AppError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                AppError::DataUnavailable(format!(
                    "{} has no '{}' column",
                    path.display(),
                    name
                ))
            })
    };
    let date_idx = column("date")?;
    let price_idx = column("price")?;

    read_price_rows(path, reader.records(), date_idx, price_idx)
}

fn read_raw_prices(path: &Path) -> Result<Vec<PriceRecord>, AppError> {
    // Raw exports use varying header names ("Date,Price", "DATE,DCOILBRENTEU"),
    // so columns are taken by position.
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    read_price_rows(path, reader.records(), 0, 1)
}

fn read_price_rows<I>(
    path: &Path,
    rows: I,
    date_idx: usize,
    price_idx: usize,
) -> Result<Vec<PriceRecord>, AppError>
where
    I: Iterator<Item = Result<StringRecord, csv::Error>>,
{
    rows.enumerate()
        .map(|(line, row)| -> Result<PriceRecord, AppError> {
            let row = row?;
            // Header occupies line 1
            let line = line + 2;
            let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

            let date = parse_flexible_date(cell(date_idx)).ok_or_else(|| {
                AppError::DataUnavailable(format!(
                    "{} line {}: unparseable date '{}'",
                    path.display(),
                    line,
                    cell(date_idx)
                ))
            })?;
            let price = cell(price_idx).parse::<f64>().map_err(|_| {
                AppError::DataUnavailable(format!(
                    "{} line {}: unparseable price '{}'",
                    path.display(),
                    line,
                    cell(price_idx)
                ))
            })?;

            Ok(PriceRecord::new(date, price))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct EventRow {
    id: u32,
    date: String,
    name: String,
    #[serde(rename = "type")]
    event_type: String,
    region: String,
    severity: String,
}

/// Load the event table, creating and persisting the seed set on first run.
pub fn load_events(config: &DataConfig) -> Result<Vec<EventRecord>, AppError> {
    let path = &config.events_path;
    if path.exists() {
        let events = read_events(path)?;
        info!("Loaded {} events from {}", events.len(), path.display());
        return Ok(events);
    }

    let events = seed_events();
    match persist_events(path, &events) {
        Ok(()) => info!("Created and saved events data: {} events at {}", events.len(), path.display()),
        Err(e) => warn!(
            "Could not persist seed events to {}: {}. Continuing with in-memory copy",
            path.display(),
            e
        ),
    }
    Ok(events)
}

fn read_events(path: &Path) -> Result<Vec<EventRecord>, AppError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut seen = HashSet::new();
    let mut events = Vec::new();

    for (line, row) in reader.deserialize::<EventRow>().enumerate() {
        let row = row?;
        let line = line + 2;

        let date = parse_flexible_date(&row.date).ok_or_else(|| {
            AppError::DataUnavailable(format!(
                "{} line {}: unparseable date '{}'",
                path.display(),
                line,
                row.date
            ))
        })?;
        if !seen.insert(row.id) {
            return Err(AppError::DataUnavailable(format!(
                "{} line {}: duplicate event id {}",
                path.display(),
                line,
                row.id
            )));
        }

        events.push(EventRecord::new(
            row.id,
            date,
            row.name,
            row.event_type,
            row.region,
            row.severity,
        ));
    }

    Ok(events)
}

/// Write the events next to `path` first and move them into place, so an
/// interrupted write never leaves a truncated table behind.
fn persist_events(path: &Path, events: &[EventRecord]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = staging_path(path);
    let written = write_events(&tmp_path, events).and_then(|()| {
        fs::rename(&tmp_path, path)?;
        Ok(())
    });
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_events(path: &Path, events: &[EventRecord]) -> Result<(), AppError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for event in events {
        writer.serialize(event)?;
    }
    writer.flush()?;
    Ok(())
}

/// The built-in set of well-known market-moving events.
pub fn seed_events() -> Vec<EventRecord> {
    const SEED: &[(u32, (i32, u32, u32), &str, &str, &str, &str)] = &[
        (1, (1990, 8, 2), "Iraq invades Kuwait", "Geopolitical", "Middle East", "High"),
        (2, (1997, 11, 30), "Asian Financial Crisis", "Financial", "Asia", "Medium"),
        (3, (2001, 9, 11), "9/11 Attacks", "Geopolitical", "Global", "High"),
        (4, (2003, 3, 20), "Iraq War begins", "Geopolitical", "Middle East", "High"),
        (5, (2005, 8, 29), "Hurricane Katrina", "Natural Disaster", "North America", "High"),
        (6, (2008, 9, 15), "Lehman Brothers Collapse", "Financial", "Global", "High"),
        (7, (2011, 2, 15), "Arab Spring", "Geopolitical", "Middle East", "Medium"),
        (8, (2014, 6, 1), "Oil Price Crash", "Market", "Global", "High"),
        (9, (2015, 12, 4), "OPEC maintains production", "Policy", "Global", "Medium"),
        (10, (2016, 11, 30), "OPEC production cuts", "Policy", "Global", "High"),
        (11, (2020, 3, 1), "COVID-19 Pandemic", "Health", "Global", "High"),
        (12, (2022, 2, 24), "Russia-Ukraine War", "Geopolitical", "Europe", "High"),
    ];

    SEED.iter()
        .filter_map(|&(id, (y, m, d), name, event_type, region, severity)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .map(|date| EventRecord::new(id, date, name, event_type, region, severity))
        })
        .collect()
}

/// Load the precomputed change-point document, or the placeholder.
///
/// Any valid JSON document is served as-is. The placeholder only stands in
/// when the file is missing or cannot be read as JSON.
pub fn load_change_points(config: &DataConfig) -> ChangePointResult {
    let path = &config.change_points_path;
    if !path.exists() {
        info!("No change point results at {}, using placeholder", path.display());
        return ChangePointResult::placeholder();
    }

    let parsed: Result<Value, AppError> = fs::read_to_string(path)
        .map_err(AppError::from)
        .and_then(|content| serde_json::from_str(&content).map_err(AppError::from));

    match parsed {
        Ok(document) => {
            info!("Loaded change point results from {}", path.display());
            ChangePointResult::new(document)
        }
        Err(e) => {
            warn!(
                "Failed to read change point results from {}: {}. Using placeholder",
                path.display(),
                e
            );
            ChangePointResult::placeholder()
        }
    }
}

/// Load every source and derive the price table.
pub fn load_dataset(config: &DataConfig) -> Result<Dataset, AppError> {
    let raw_prices = load_prices(config)?;
    let events = load_events(config)?;
    let change_points = load_change_points(config);

    let prices = metrics::derive(raw_prices);
    if prices.is_empty() {
        return Err(AppError::DataUnavailable(
            "price source needs at least two records".to_string(),
        ));
    }

    Ok(Dataset::new(prices, events, change_points))
}
