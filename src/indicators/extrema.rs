//! Local extrema of the close series and their significance filter.
//!
//! A peak is a bar whose close is strictly above both neighbours; a low is
//! strictly below both. The first and last bar have a single neighbour and
//! never qualify. A peak is "best" when no other peak within
//! `significance` calendar days either side closes higher (lows mirrored).
//!
//! Ties: every extremum that equals its window's winning price is kept, so
//! two equal peaks close together both survive.

use crate::core::{ExtremumPoint, PriceSeries, TradingCalendar};

/// All strict local maxima of the close series, in date order.
pub fn find_all_peaks(series: &PriceSeries) -> Vec<ExtremumPoint> {
    local_extrema(series, |current, neighbour| current > neighbour)
}

/// All strict local minima of the close series, in date order.
pub fn find_all_lows(series: &PriceSeries) -> Vec<ExtremumPoint> {
    local_extrema(series, |current, neighbour| current < neighbour)
}

/// Peaks that are the highest close within `significance` days either side.
///
/// The window is clamped to the first and last peak dates; the output keeps
/// the input's chronological order and may be empty.
pub fn find_best_peaks(peaks: &[ExtremumPoint], significance: u32) -> Vec<ExtremumPoint> {
    best_within_window(peaks, significance, f64::NEG_INFINITY, f64::max)
}

/// Lows that are the lowest close within `significance` days either side.
pub fn find_best_lows(lows: &[ExtremumPoint], significance: u32) -> Vec<ExtremumPoint> {
    best_within_window(lows, significance, f64::INFINITY, f64::min)
}

fn local_extrema<F>(series: &PriceSeries, beats: F) -> Vec<ExtremumPoint>
where
    F: Fn(f64, f64) -> bool,
{
    let close = series.close();
    let dates = series.dates();
    let n = close.len();
    if n < 3 {
        return Vec::new();
    }

    (1..n - 1)
        .filter(|&i| beats(close[i], close[i - 1]) && beats(close[i], close[i + 1]))
        .map(|i| ExtremumPoint {
            index: i,
            date: dates[i],
            price: close[i],
        })
        .collect()
}

fn best_within_window<F>(
    points: &[ExtremumPoint],
    significance: u32,
    identity: f64,
    pick: F,
) -> Vec<ExtremumPoint>
where
    F: Fn(f64, f64) -> f64,
{
    let dates: Vec<_> = points.iter().map(|p| p.date).collect();
    let calendar = TradingCalendar::new(&dates);

    points
        .iter()
        .filter(|point| {
            let window = calendar.window_around(point.date, significance);
            let winner = points[window]
                .iter()
                .fold(identity, |acc, other| pick(acc, other.price));
            point.price == winner
        })
        .copied()
        .collect()
}
