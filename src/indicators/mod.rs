//! Indicator calculators for the overlay engine.
//!
//! Numeric indicators are pure functions over slice inputs returning Vec
//! outputs, with NaN for the warmup period. Extrema and trendlines work on a
//! [`PriceSeries`](crate::core::PriceSeries) since they need its dates.

pub mod bands;
pub mod candlestick;
pub mod extrema;
pub mod rolling;
pub mod trendline;
pub mod volume;

pub use bands::{bollinger_bands, percentage_bands, BandsResult, BOLLINGER_STD_MULTIPLIER};
pub use candlestick::{
    tag_candlestick_patterns, tag_pattern, Bias, CandlestickPattern, GeometricRecognizer,
    PatternMarkers, PatternRecognizer,
};
pub use extrema::{find_all_lows, find_all_peaks, find_best_lows, find_best_peaks};
pub use rolling::{rolling_mean, rolling_std};
pub use trendline::{
    ascending_segments, build_trend_lines, descending_segments, interpolate_path, TrendLine,
    TrendSegment,
};
pub use volume::obv;
