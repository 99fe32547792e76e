//! chart-overlays - indicator computation engine for OHLCV price charts.
//!
//! This crate derives the overlays drawn over a price chart:
//! - Moving averages, percentage bands and Bollinger bands
//! - On Balance Volume
//! - Significant peaks and lows, trendlines through them and the last
//!   support/resistance levels
//! - Candlestick pattern markers
//!
//! Everything is recomputed from a [`PriceSeries`](core::PriceSeries) and an
//! [`IndicatorSettings`](core::IndicatorSettings) record on every call; see
//! [`compute_overlays`].

pub mod core;
pub mod indicators;
pub mod overlays;

pub use crate::core::{
    ChartType, DerivedSeries, IndicatorSettings, Interval, OverlayError, PriceBar, PriceSeries,
    Result, TimePeriod,
};
pub use crate::overlays::{compute_overlays, OverlayEngine, OverlaySet};
