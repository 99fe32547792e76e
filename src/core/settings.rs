//! Indicator settings record.
//!
//! Settings are an immutable value owned by the caller. Transitions that the
//! chart needs (switching interval, fitting the point-and-figure box size)
//! return a new value instead of mutating shared state.
//!
//! Field names match the persisted JSON documents, e.g.
//! `{"mav1": 2, "best_peaks_significance": 20, "interval": "1d"}`.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::{OverlayError, Result};
use super::types::{InterpolationMode, PriceSeries};

/// Bar interval of the price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    /// Time spans that make sense to display at this interval, shortest first.
    pub fn time_periods(self) -> &'static [TimePeriod] {
        use TimePeriod::*;
        match self {
            Interval::Daily => &[
                OneWeek,
                OneMonth,
                SixMonths,
                OneYear,
                FiveYears,
                TenYears,
                TwentyYears,
            ],
            Interval::Weekly => &[OneMonth, SixMonths, OneYear, FiveYears, TenYears, TwentyYears],
            Interval::Monthly => &[SixMonths, OneYear, FiveYears, TenYears, TwentyYears],
        }
    }

    /// Whether `period` is offered for this interval.
    pub fn supports(self, period: TimePeriod) -> bool {
        self.time_periods().contains(&period)
    }
}

/// Displayed time span, counted back from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "1 week")]
    OneWeek,
    #[serde(rename = "1 month")]
    OneMonth,
    #[serde(rename = "6 months")]
    SixMonths,
    #[default]
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "5 years")]
    FiveYears,
    #[serde(rename = "10 years")]
    TenYears,
    #[serde(rename = "20 years")]
    TwentyYears,
}

impl TimePeriod {
    /// Length of the span in calendar days.
    pub fn days(self) -> i64 {
        match self {
            TimePeriod::OneWeek => 7,
            TimePeriod::OneMonth => 30,
            TimePeriod::SixMonths => 182,
            TimePeriod::OneYear => 365,
            TimePeriod::FiveYears => 1826,
            TimePeriod::TenYears => 3650,
            TimePeriod::TwentyYears => 7300,
        }
    }

    /// First date of the span ending at `today`.
    pub fn start_date(self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_signed(Duration::days(self.days()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Chart style. Point-and-figure charts carry no overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "candle")]
    Candle,
    #[serde(rename = "ohlc")]
    Ohlc,
    #[serde(rename = "pnf")]
    PointAndFigure,
}

/// Flat settings record consumed by every calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Security symbol, empty when nothing is selected.
    pub symbol: String,
    pub interval: Interval,
    pub show_volume: bool,
    pub chart_type: ChartType,
    /// Whether the chart spaces bars by calendar day instead of by bar.
    pub show_nontrading: bool,
    pub show_mav1: bool,
    pub show_mav2: bool,
    pub show_mav3: bool,
    pub mav1: usize,
    pub mav2: usize,
    pub mav3: usize,
    /// Toggles extrema markers, trendlines and horizontal levels together.
    pub show_best_peaks_and_lows: bool,
    /// Significance radius for peaks, in calendar days.
    pub best_peaks_significance: u32,
    /// Significance radius for lows, in calendar days.
    pub best_lows_significance: u32,
    pub show_percentage_bands: bool,
    pub mav_for_percentage_bands: usize,
    pub percentage_for_percentage_bands: f64,
    pub show_bollinger_bands: bool,
    pub mav_for_bollinger_bands: usize,
    pub show_candlestick_patterns: bool,
    pub show_on_balance_volume: bool,
    pub time_period: TimePeriod,
    pub show_logarithmic_scale: bool,
    /// Point-and-figure box size in price units.
    pub box_size: f64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            interval: Interval::Daily,
            show_volume: false,
            chart_type: ChartType::Line,
            show_nontrading: false,
            show_mav1: false,
            show_mav2: false,
            show_mav3: false,
            mav1: 2,
            mav2: 4,
            mav3: 6,
            show_best_peaks_and_lows: false,
            best_peaks_significance: 20,
            best_lows_significance: 20,
            show_percentage_bands: false,
            mav_for_percentage_bands: 21,
            percentage_for_percentage_bands: 3.0,
            show_bollinger_bands: false,
            mav_for_bollinger_bands: 20,
            show_candlestick_patterns: false,
            show_on_balance_volume: false,
            time_period: TimePeriod::OneYear,
            show_logarithmic_scale: false,
            box_size: 3.0,
        }
    }
}

impl IndicatorSettings {
    /// Parse a persisted settings document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the persisted document format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The three moving-average slots as `(enabled, window)`.
    pub fn moving_averages(&self) -> [(bool, usize); 3] {
        [
            (self.show_mav1, self.mav1),
            (self.show_mav2, self.mav2),
            (self.show_mav3, self.mav3),
        ]
    }

    /// Trend path interpolation matching the price axis.
    pub fn interpolation_mode(&self) -> InterpolationMode {
        InterpolationMode::for_log_scale(self.show_logarithmic_scale)
    }

    /// Check every field against its domain.
    ///
    /// The engine itself assumes validated settings; callers run this after
    /// accepting user input.
    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("mav1", self.mav1),
            ("mav2", self.mav2),
            ("mav3", self.mav3),
            ("mav_for_percentage_bands", self.mav_for_percentage_bands),
            ("mav_for_bollinger_bands", self.mav_for_bollinger_bands),
        ];
        for (name, window) in windows {
            if window == 0 {
                return Err(OverlayError::invalid_settings(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        let pct = self.percentage_for_percentage_bands;
        if !(0.0..100.0).contains(&pct) {
            return Err(OverlayError::invalid_settings(format!(
                "percentage_for_percentage_bands = {pct} out of range [0, 100)"
            )));
        }

        if !(self.box_size.is_finite() && self.box_size > 0.0) {
            return Err(OverlayError::invalid_settings(format!(
                "box_size must be positive, got {}",
                self.box_size
            )));
        }

        if !self.interval.supports(self.time_period) {
            return Err(OverlayError::invalid_settings(format!(
                "time period {:?} not available for interval {:?}",
                self.time_period, self.interval
            )));
        }

        Ok(())
    }

    /// Switch interval, moving the time period to the shortest offered span
    /// when the current one is too short for the new interval.
    pub fn with_interval(&self, interval: Interval) -> Self {
        let mut next = self.clone();
        next.interval = interval;
        if !interval.supports(next.time_period) {
            next.time_period = interval.time_periods()[0];
        }
        next
    }

    /// Fit the point-and-figure box size to the series' price range.
    ///
    /// The box may not exceed half the close range (floored to cents) nor
    /// fall below 1% of the mean close (ceiled to cents). Other chart types
    /// and empty series are returned unchanged.
    pub fn with_fitted_box_size(&self, series: &PriceSeries) -> Self {
        let mut next = self.clone();
        if self.chart_type != ChartType::PointAndFigure {
            return next;
        }

        let (Some(min_price), Some(max_price), Some(mean)) =
            (series.min_close(), series.max_close(), series.mean_close())
        else {
            return next;
        };

        let price_range = max_price - min_price;
        let max_box_size = price_range / 2.0;
        let min_box_size = 0.01 * mean;

        if next.box_size > max_box_size {
            next.box_size = (max_box_size * 100.0).floor() / 100.0;
        } else if next.box_size < min_box_size {
            next.box_size = (min_box_size * 100.0).ceil() / 100.0;
        }
        next
    }
}
