//! Candlestick pattern markers.
//!
//! Pattern math lives behind [`PatternRecognizer`], which scores every bar
//! with a signed strength (positive bullish, negative bearish, zero none).
//! This module only selects the scored bars and spreads them back over the
//! full date index as scatter markers at the bar's close.

mod geometric;

pub use geometric::GeometricRecognizer;

use serde::Serialize;

use crate::core::error::OverlayError;
use crate::core::{DerivedSeries, PriceSeries, Result};

/// The nine tagged candlestick patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandlestickPattern {
    Doji,
    Engulfing,
    EveningStar,
    Hammer,
    Harami,
    MorningStar,
    SeparatingLines,
    ShootingStar,
    /// Rising three methods (bullish) / falling three methods (bearish).
    ThreeMethods,
}

impl CandlestickPattern {
    /// All patterns, in tagging order.
    pub const ALL: [CandlestickPattern; 9] = [
        CandlestickPattern::Doji,
        CandlestickPattern::Engulfing,
        CandlestickPattern::EveningStar,
        CandlestickPattern::Hammer,
        CandlestickPattern::Harami,
        CandlestickPattern::MorningStar,
        CandlestickPattern::SeparatingLines,
        CandlestickPattern::ShootingStar,
        CandlestickPattern::ThreeMethods,
    ];

    /// Display label for the given side of the pattern.
    pub fn label(self, bias: Bias) -> &'static str {
        use CandlestickPattern::*;
        match (self, bias) {
            (Doji, Bias::Bullish) => "Bullish Doji",
            (Doji, Bias::Bearish) => "Bearish Doji",
            (Engulfing, Bias::Bullish) => "Bullish Engulfing",
            (Engulfing, Bias::Bearish) => "Bearish Engulfing",
            (EveningStar, _) => "Evening Star",
            (Hammer, Bias::Bullish) => "Bullish Hammer",
            (Hammer, Bias::Bearish) => "Bearish Hammer",
            (Harami, Bias::Bullish) => "Bullish Harami",
            (Harami, Bias::Bearish) => "Bearish Harami",
            (MorningStar, _) => "Morning Star",
            (SeparatingLines, Bias::Bullish) => "Bullish Separating Lines",
            (SeparatingLines, Bias::Bearish) => "Bearish Separating Lines",
            (ShootingStar, Bias::Bullish) => "Bullish Shooting Star",
            (ShootingStar, Bias::Bearish) => "Bearish Shooting Star",
            (ThreeMethods, Bias::Bullish) => "Rising Three Methods",
            (ThreeMethods, Bias::Bearish) => "Falling Three Methods",
        }
    }
}

/// Side of a pattern signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bias {
    Bullish,
    Bearish,
}

/// Per-bar pattern scoring.
///
/// Implementations must return exactly one score per bar of `series`.
pub trait PatternRecognizer {
    fn recognize(&self, pattern: CandlestickPattern, series: &PriceSeries) -> Vec<i32>;
}

/// Marker series for one side of one pattern.
#[derive(Debug, Clone)]
pub struct PatternMarkers {
    pub pattern: CandlestickPattern,
    pub bias: Bias,
    pub label: &'static str,
    /// Close price on flagged bars, NaN elsewhere.
    pub markers: DerivedSeries,
}

/// Bullish then bearish markers for one pattern; sides with no flagged bar
/// are left out.
pub fn tag_pattern<R>(
    series: &PriceSeries,
    pattern: CandlestickPattern,
    recognizer: &R,
) -> Result<Vec<PatternMarkers>>
where
    R: PatternRecognizer + ?Sized,
{
    let scores = recognizer.recognize(pattern, series);
    if scores.len() != series.len() {
        return Err(OverlayError::length_mismatch(series.len(), scores.len()));
    }

    let close = series.close();
    let mut tagged = Vec::with_capacity(2);

    for bias in [Bias::Bullish, Bias::Bearish] {
        let selected = scores.iter().enumerate().filter(|&(_, &score)| match bias {
            Bias::Bullish => score > 0,
            Bias::Bearish => score < 0,
        });

        let mut markers = DerivedSeries::with_nan(series.dates());
        let mut any = false;
        for (i, _) in selected {
            markers.values[i] = close[i];
            any = true;
        }

        if any {
            tagged.push(PatternMarkers {
                pattern,
                bias,
                label: pattern.label(bias),
                markers,
            });
        }
    }

    Ok(tagged)
}

/// Markers for all nine patterns, in [`CandlestickPattern::ALL`] order.
pub fn tag_candlestick_patterns<R>(
    series: &PriceSeries,
    recognizer: &R,
) -> Result<Vec<PatternMarkers>>
where
    R: PatternRecognizer + ?Sized,
{
    let mut tagged = Vec::new();
    for pattern in CandlestickPattern::ALL {
        tagged.extend(tag_pattern(series, pattern, recognizer)?);
    }
    Ok(tagged)
}
