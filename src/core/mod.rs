//! Core types and utilities for the overlay engine.

pub mod calendar;
pub mod error;
pub mod settings;
pub mod timeseries;
pub mod types;

pub use calendar::TradingCalendar;
pub use error::{OverlayError, Result};
pub use settings::{ChartType, IndicatorSettings, Interval, TimePeriod};
pub use timeseries::{DerivedSeries, TimeSeries};
pub use types::*;
