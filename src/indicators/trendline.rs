//! Trendlines through significant extrema.
//!
//! Candidate segments come from every consecutive pair of best peaks crossed
//! with every consecutive pair of best lows (O(P·L)). A segment is then
//! walked across the whole date index with a constant per-bar step, either
//! in price or in log-price, and clipped at the series' close range.

use serde::Serialize;
use tracing::trace;

use crate::core::{
    DerivedSeries, ExtremumPoint, InterpolationMode, PriceSeries, TrendDirection,
};

/// Two anchors defining a trend path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSegment {
    /// Earlier anchor; the path starts here.
    pub start: ExtremumPoint,
    /// Later anchor; sets the slope.
    pub end: ExtremumPoint,
    pub direction: TrendDirection,
    pub mode: InterpolationMode,
}

/// A trend segment together with its interpolated path.
#[derive(Debug, Clone)]
pub struct TrendLine {
    pub segment: TrendSegment,
    /// Path over the full date index; NaN before the start anchor and after
    /// the clip point.
    pub path: DerivedSeries,
}

impl TrendLine {
    #[inline]
    pub fn label(&self) -> &'static str {
        self.segment.direction.label()
    }
}

/// Rising segments: higher peaks and higher lows, interleaved
/// `low1 < peak1 < low2 < peak2` in time, anchored at `(low1, peak2)`.
pub fn ascending_segments(
    best_peaks: &[ExtremumPoint],
    best_lows: &[ExtremumPoint],
    mode: InterpolationMode,
) -> Vec<TrendSegment> {
    let mut segments = Vec::new();

    for peaks in best_peaks.windows(2) {
        let (peak1, peak2) = (peaks[0], peaks[1]);

        for lows in best_lows.windows(2) {
            let (low1, low2) = (lows[0], lows[1]);

            let is_rising = peak1.price < peak2.price && low1.price < low2.price;
            let is_interleaved =
                low1.date < peak1.date && peak1.date < low2.date && low2.date < peak2.date;

            if is_rising && is_interleaved {
                segments.push(TrendSegment {
                    start: low1,
                    end: peak2,
                    direction: TrendDirection::Ascending,
                    mode,
                });
            }
        }
    }

    segments
}

/// Falling segments: lower peaks and lower lows, interleaved
/// `peak1 < low1 < peak2 < low2` in time, anchored at `(peak1, low2)`.
pub fn descending_segments(
    best_peaks: &[ExtremumPoint],
    best_lows: &[ExtremumPoint],
    mode: InterpolationMode,
) -> Vec<TrendSegment> {
    let mut segments = Vec::new();

    for lows in best_lows.windows(2) {
        let (low1, low2) = (lows[0], lows[1]);

        for peaks in best_peaks.windows(2) {
            let (peak1, peak2) = (peaks[0], peaks[1]);

            let is_falling = peak1.price > peak2.price && low1.price > low2.price;
            let is_interleaved =
                peak1.date < low1.date && low1.date < peak2.date && peak2.date < low2.date;

            if is_falling && is_interleaved {
                segments.push(TrendSegment {
                    start: peak1,
                    end: low2,
                    direction: TrendDirection::Descending,
                    mode,
                });
            }
        }
    }

    segments
}

/// Walk a segment across the full date index of `series`.
///
/// The per-bar step is `|end - start| / bars`, where `bars` counts the bars
/// dated within `[start.date, end.date]`; in logarithmic mode both prices
/// are taken in log space first. The walk continues past the end anchor
/// and stops for good once the price leaves the close range (above the
/// highest close when ascending, below the lowest when descending).
///
/// Returns `None` when no bar lies between the anchors, when the series is
/// empty, or when a logarithmic path has a non-positive anchor.
pub fn interpolate_path(segment: &TrendSegment, series: &PriceSeries) -> Option<DerivedSeries> {
    let calendar = series.calendar();
    let bars = calendar.bars_between(segment.start.date, segment.end.date);
    if bars == 0 {
        return None;
    }

    let max_close = series.max_close()?;
    let min_close = series.min_close()?;

    let (origin, target) = match segment.mode {
        InterpolationMode::Linear => (segment.start.price, segment.end.price),
        InterpolationMode::Logarithmic => {
            if segment.start.price <= 0.0 || segment.end.price <= 0.0 {
                return None;
            }
            (segment.start.price.ln(), segment.end.price.ln())
        }
    };
    let step = (target - origin).abs() / bars as f64;

    let mut path = DerivedSeries::with_nan(series.dates());
    let mut level = origin;

    for pos in calendar.first_on_or_after(segment.start.date)..series.len() {
        let price = match segment.mode {
            InterpolationMode::Linear => level,
            InterpolationMode::Logarithmic => level.exp(),
        };

        let is_clipped = match segment.direction {
            TrendDirection::Ascending => price > max_close,
            TrendDirection::Descending => price < min_close,
        };
        if is_clipped {
            break;
        }

        path.values[pos] = price;
        match segment.direction {
            TrendDirection::Ascending => level += step,
            TrendDirection::Descending => level -= step,
        }
    }

    Some(path)
}

/// Every ascending then every descending segment with its path.
///
/// Segments whose path cannot be built are dropped.
pub fn build_trend_lines(
    series: &PriceSeries,
    best_peaks: &[ExtremumPoint],
    best_lows: &[ExtremumPoint],
    mode: InterpolationMode,
) -> Vec<TrendLine> {
    let mut segments = ascending_segments(best_peaks, best_lows, mode);
    segments.extend(descending_segments(best_peaks, best_lows, mode));

    segments
        .into_iter()
        .filter_map(|segment| match interpolate_path(&segment, series) {
            Some(path) => Some(TrendLine { segment, path }),
            None => {
                trace!(
                    start = %segment.start.date,
                    end = %segment.end.date,
                    direction = segment.direction.label(),
                    "trend segment suppressed"
                );
                None
            }
        })
        .collect()
}
