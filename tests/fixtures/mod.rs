#![allow(dead_code)]

use chart_overlays::{PriceBar, PriceSeries};
use chrono::{Duration, NaiveDate};
use serde::de::DeserializeOwned;

const DAILY_PATH: &str = "tests/fixtures/data/daily.csv";

/// Weekday-only daily bars, Jan to Sep 2023.
pub fn load_daily_series() -> PriceSeries {
    let bars: Vec<PriceBar> = load_records(DAILY_PATH, "invalid OHLCV record");
    PriceSeries::new(bars).expect("fixture dates are sorted and unique")
}

/// Consecutive calendar days starting 2024-01-01 with flat candles.
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: start + Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Equal values, treating NaN as equal to NaN.
pub fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn load_records<T: DeserializeOwned>(path: &str, context: &str) -> Vec<T> {
    let mut reader = csv::Reader::from_path(path).unwrap_or_else(|e| panic!("{path}: {e}"));
    reader
        .deserialize()
        .map(|record| record.unwrap_or_else(|e| panic!("{context}: {e}")))
        .collect()
}
