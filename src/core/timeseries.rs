//! Date-indexed array wrapper for derived series.

use chrono::NaiveDate;

use super::calendar::TradingCalendar;
use super::error::{OverlayError, Result};

/// A date-indexed series of values.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    /// Date for each value.
    pub dates: Vec<NaiveDate>,
    /// Values.
    pub values: Vec<T>,
}

/// A numeric series aligned 1:1 with a price series; NaN means "no value".
pub type DerivedSeries = TimeSeries<f64>;

impl<T: Clone> TimeSeries<T> {
    /// Create a new time series.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<T>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    /// Create a time series, checking that both columns have equal length.
    pub fn try_new(dates: Vec<NaiveDate>, values: Vec<T>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(OverlayError::length_mismatch(dates.len(), values.len()));
        }
        Ok(Self { dates, values })
    }

    /// Get the length.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterator over (date, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &T)> {
        self.dates.iter().copied().zip(self.values.iter())
    }
}

impl TimeSeries<f64> {
    /// Create a series filled with NaN over the given dates.
    pub fn with_nan(dates: &[NaiveDate]) -> Self {
        Self {
            dates: dates.to_vec(),
            values: vec![f64::NAN; dates.len()],
        }
    }

    /// Spread sparse `(date, value)` points over a full date index.
    ///
    /// Dates without a point, and points whose date is not in the index,
    /// are dropped to NaN.
    pub fn from_points<I>(dates: &[NaiveDate], points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let calendar = TradingCalendar::new(dates);
        let mut series = Self::with_nan(dates);
        for (date, value) in points {
            if let Some(pos) = calendar.position(date) {
                series.values[pos] = value;
            }
        }
        series
    }

    /// Re-align this series onto another date index.
    ///
    /// Dates shared with `dates` keep their value; all others are NaN.
    pub fn reindex(&self, dates: &[NaiveDate]) -> Self {
        Self::from_points(dates, self.iter().map(|(d, v)| (d, *v)))
    }

    /// Number of values that are not NaN.
    pub fn count_defined(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Index of the first value that is not NaN.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_nan())
    }

    /// Get minimum value, ignoring NaN.
    pub fn min(&self) -> f64 {
        self.values
            .iter()
            .filter(|v| !v.is_nan())
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Get maximum value, ignoring NaN.
    pub fn max(&self) -> f64 {
        self.values
            .iter()
            .filter(|v| !v.is_nan())
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
