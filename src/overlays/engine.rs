//! Overlay engine.
//!
//! Runs the enabled calculators in a fixed order: Bollinger bands,
//! candlestick markers, moving averages, OBV, best peaks and lows,
//! trendlines, percentage bands. Windowed indicators are only emitted when
//! the series holds more bars than the window.

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::set::{HorizontalLevel, LevelKind, OverlaySet, OverlayStyle};
use crate::core::{ChartType, DerivedSeries, IndicatorSettings, PriceSeries, Result};
use crate::indicators::{
    bollinger_bands, build_trend_lines, find_all_lows, find_all_peaks, find_best_lows,
    find_best_peaks, obv, percentage_bands, rolling_mean, tag_candlestick_patterns,
    GeometricRecognizer, PatternRecognizer,
};

/// Overlay engine bound to a candlestick pattern recognizer.
#[derive(Debug, Clone, Default)]
pub struct OverlayEngine<R = GeometricRecognizer> {
    recognizer: R,
}

impl<R: PatternRecognizer> OverlayEngine<R> {
    /// Create an engine using the given pattern recognizer.
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Compute all overlays enabled in `settings`.
    pub fn compute(&self, series: &PriceSeries, settings: &IndicatorSettings) -> Result<OverlaySet> {
        compute_overlays(series, settings, &self.recognizer)
    }
}

/// Compute all overlays enabled in `settings`.
///
/// # Arguments
/// * `series` - Price series
/// * `settings` - Validated indicator settings
/// * `recognizer` - Candlestick pattern scoring
///
/// # Returns
/// OverlaySet with series in drawing order; empty for point-and-figure charts
pub fn compute_overlays<R>(
    series: &PriceSeries,
    settings: &IndicatorSettings,
    recognizer: &R,
) -> Result<OverlaySet>
where
    R: PatternRecognizer + ?Sized,
{
    let mut set = OverlaySet::default();

    if settings.chart_type == ChartType::PointAndFigure {
        debug!("point-and-figure chart, overlays skipped");
        return Ok(set);
    }

    let dates = series.dates();
    let close = series.close();

    if settings.show_bollinger_bands && has_history(series, settings.mav_for_bollinger_bands) {
        let bands = bollinger_bands(close, settings.mav_for_bollinger_bands)?;
        set.push("Upper Bollinger Band", OverlayStyle::Line, aligned(dates, bands.upper));
        set.push("Lower Bollinger Band", OverlayStyle::Line, aligned(dates, bands.lower));
    }

    if settings.show_candlestick_patterns {
        for tagged in tag_candlestick_patterns(series, recognizer)? {
            set.push(tagged.label, OverlayStyle::Scatter, tagged.markers);
        }
    }

    for (slot, (enabled, window)) in settings.moving_averages().into_iter().enumerate() {
        if enabled && has_history(series, window) {
            let mav = rolling_mean(close, window)?;
            set.push(format!("MAV {}", slot + 1), OverlayStyle::Line, aligned(dates, mav));
        }
    }

    if settings.show_on_balance_volume {
        let obv = obv(close, series.volume())?;
        set.push("On Balance Volume", OverlayStyle::SecondaryAxis, aligned(dates, obv));
    }

    if settings.show_best_peaks_and_lows {
        add_extrema(&mut set, series, settings);
    }

    if settings.show_percentage_bands && has_history(series, settings.mav_for_percentage_bands) {
        let bands = percentage_bands(
            close,
            settings.mav_for_percentage_bands,
            settings.percentage_for_percentage_bands,
        )?;
        set.push("Upper Percentage Band", OverlayStyle::Line, aligned(dates, bands.upper));
        set.push("Lower Percentage Band", OverlayStyle::Line, aligned(dates, bands.lower));
    }

    debug!(
        bars = series.len(),
        overlays = set.series.len(),
        trend_lines = set.trend_segments.len(),
        levels = set.levels.len(),
        "overlays computed"
    );

    Ok(set)
}

/// Peak and low markers, trendlines through them, and the last support and
/// resistance levels.
fn add_extrema(set: &mut OverlaySet, series: &PriceSeries, settings: &IndicatorSettings) {
    let dates = series.dates();
    let all_peaks = find_all_peaks(series);
    let all_lows = find_all_lows(series);
    let best_peaks = find_best_peaks(&all_peaks, settings.best_peaks_significance);
    let best_lows = find_best_lows(&all_lows, settings.best_lows_significance);

    debug!(
        peaks = all_peaks.len(),
        best_peaks = best_peaks.len(),
        lows = all_lows.len(),
        best_lows = best_lows.len(),
        "extrema found"
    );

    if !best_peaks.is_empty() {
        let markers = DerivedSeries::from_points(dates, best_peaks.iter().map(|p| (p.date, p.price)));
        set.push("Peaks", OverlayStyle::Scatter, markers);
    }
    if !best_lows.is_empty() {
        let markers = DerivedSeries::from_points(dates, best_lows.iter().map(|p| (p.date, p.price)));
        set.push("Lows", OverlayStyle::Scatter, markers);
    }

    let lines = build_trend_lines(series, &best_peaks, &best_lows, settings.interpolation_mode());
    for line in lines {
        set.push(line.label(), OverlayStyle::Line, line.path);
        set.trend_segments.push(line.segment);
    }

    // Levels are drawn on bar-spaced charts only
    if !settings.show_nontrading {
        if let Some(low) = best_lows.last() {
            set.levels.push(HorizontalLevel {
                price: low.price,
                kind: LevelKind::Support,
            });
        }
        if let Some(peak) = best_peaks.last() {
            set.levels.push(HorizontalLevel {
                price: peak.price,
                kind: LevelKind::Resistance,
            });
        }
    }
}

#[inline]
fn has_history(series: &PriceSeries, window: usize) -> bool {
    let enough = series.len() > window;
    if !enough {
        trace!(bars = series.len(), window, "not enough history, indicator omitted");
    }
    enough
}

#[inline]
fn aligned(dates: &[NaiveDate], values: Vec<f64>) -> DerivedSeries {
    DerivedSeries::new(dates.to_vec(), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PriceBar, TrendDirection};
    use crate::indicators::CandlestickPattern;
    use chrono::Duration;

    /// Flags the second bar bullish for every pattern.
    struct SecondBar;

    impl PatternRecognizer for SecondBar {
        fn recognize(&self, _pattern: CandlestickPattern, series: &PriceSeries) -> Vec<i32> {
            (0..series.len()).map(|i| if i == 1 { 100 } else { 0 }).collect()
        }
    }

    /// Rising zig-zag: peaks at odd bars, lows at even bars from 2.
    fn zigzag() -> PriceSeries {
        let closes = [10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0, 15.0, 14.0, 16.0, 15.0];
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + Duration::days(i as i64),
                open: close - 0.5,
                high: close + 0.5,
                low: close - 1.0,
                close,
                volume: 1000.0 + i as f64,
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    fn everything_on() -> IndicatorSettings {
        IndicatorSettings {
            show_bollinger_bands: true,
            mav_for_bollinger_bands: 3,
            show_candlestick_patterns: true,
            show_mav1: true,
            show_mav2: true,
            show_mav3: true,
            show_on_balance_volume: true,
            show_best_peaks_and_lows: true,
            best_peaks_significance: 1,
            best_lows_significance: 1,
            show_percentage_bands: true,
            mav_for_percentage_bands: 3,
            ..IndicatorSettings::default()
        }
    }

    #[test]
    fn test_drawing_order() {
        let set = compute_overlays(&zigzag(), &everything_on(), &SecondBar).unwrap();
        let labels: Vec<_> = set.labels().collect();

        let first_trend = labels.iter().position(|l| *l == "Uptrend").unwrap();
        assert_eq!(&labels[..2], &["Upper Bollinger Band", "Lower Bollinger Band"]);
        assert_eq!(labels[2], "Bullish Doji");
        assert_eq!(labels[10], "Rising Three Methods");
        assert_eq!(&labels[11..17], &["MAV 1", "MAV 2", "MAV 3", "On Balance Volume", "Peaks", "Lows"]);
        assert_eq!(first_trend, 17);
        assert_eq!(
            &labels[labels.len() - 2..],
            &["Upper Percentage Band", "Lower Percentage Band"]
        );
        assert!(!labels.contains(&"Downtrend"));

        assert_eq!(set.lookup("On Balance Volume").unwrap().style, OverlayStyle::SecondaryAxis);
        assert_eq!(set.lookup("Peaks").unwrap().style, OverlayStyle::Scatter);
        assert_eq!(set.trend_segments.len(), set.lookup_all("Uptrend").count());
        assert!(set
            .trend_segments
            .iter()
            .all(|s| s.direction == TrendDirection::Ascending));
    }

    #[test]
    fn test_every_overlay_is_aligned() {
        let series = zigzag();
        let set = compute_overlays(&series, &everything_on(), &SecondBar).unwrap();
        for overlay in &set.series {
            assert_eq!(overlay.values.dates, series.dates(), "{}", overlay.label);
        }
    }

    #[test]
    fn test_levels_support_then_resistance() {
        let set = compute_overlays(&zigzag(), &everything_on(), &SecondBar).unwrap();
        assert_eq!(
            set.levels,
            vec![
                HorizontalLevel {
                    price: 14.0,
                    kind: LevelKind::Support
                },
                HorizontalLevel {
                    price: 16.0,
                    kind: LevelKind::Resistance
                },
            ]
        );

        let calendar_axis = IndicatorSettings {
            show_nontrading: true,
            ..everything_on()
        };
        let set = compute_overlays(&zigzag(), &calendar_axis, &SecondBar).unwrap();
        assert!(set.levels.is_empty());
        assert!(set.lookup("Peaks").is_some());
    }

    #[test]
    fn test_windows_need_more_bars_than_window() {
        let settings = IndicatorSettings {
            mav_for_bollinger_bands: 11,
            mav_for_percentage_bands: 10,
            mav3: 11,
            ..everything_on()
        };
        let set = compute_overlays(&zigzag(), &settings, &SecondBar).unwrap();
        assert!(set.lookup("Upper Bollinger Band").is_none());
        assert!(set.lookup("MAV 3").is_none());
        assert!(set.lookup("MAV 2").is_some());
        assert!(set.lookup("Upper Percentage Band").is_some());
    }

    #[test]
    fn test_point_and_figure_has_no_overlays() {
        let settings = IndicatorSettings {
            chart_type: ChartType::PointAndFigure,
            ..everything_on()
        };
        let set = compute_overlays(&zigzag(), &settings, &SecondBar).unwrap();
        assert!(set.is_empty());
        assert!(set.trend_segments.is_empty());
    }

    #[test]
    fn test_nothing_enabled_is_empty() {
        let engine: OverlayEngine = OverlayEngine::default();
        let set = engine.compute(&zigzag(), &IndicatorSettings::default()).unwrap();
        assert!(set.is_empty());

        let empty = PriceSeries::default();
        let set = engine.compute(&empty, &everything_on()).unwrap();
        assert!(set.levels.is_empty());
        assert!(set.lookup("Peaks").is_none());
    }

    #[test]
    fn test_engine_uses_its_recognizer() {
        let settings = IndicatorSettings {
            show_candlestick_patterns: true,
            ..IndicatorSettings::default()
        };
        let set = OverlayEngine::new(SecondBar).compute(&zigzag(), &settings).unwrap();
        assert_eq!(set.series.len(), CandlestickPattern::ALL.len());
        assert!(set
            .series
            .iter()
            .all(|o| o.style == OverlayStyle::Scatter && o.values.count_defined() == 1));
    }
}
