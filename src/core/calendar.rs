//! Trading calendar index: maps dates to bar positions.
//!
//! Dates must be sorted ascending and unique, which every `PriceSeries`
//! guarantees. All lookups are binary searches.

use std::ops::Range;

use chrono::{Duration, NaiveDate};

/// Borrowed view of a sorted date index.
#[derive(Debug, Clone, Copy)]
pub struct TradingCalendar<'a> {
    dates: &'a [NaiveDate],
}

impl<'a> TradingCalendar<'a> {
    /// Wrap a sorted, duplicate-free date slice.
    pub fn new(dates: &'a [NaiveDate]) -> Self {
        debug_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        Self { dates }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[inline]
    pub fn dates(&self) -> &'a [NaiveDate] {
        self.dates
    }

    /// Position of the bar dated exactly `date`.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// First position whose date is on or after `date`.
    pub fn first_on_or_after(&self, date: NaiveDate) -> usize {
        self.dates.partition_point(|d| *d < date)
    }

    /// Positions of bars dated within `[start, end]`, both inclusive.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> Range<usize> {
        let lo = self.first_on_or_after(start);
        let hi = self.dates.partition_point(|d| *d <= end);
        lo..hi.max(lo)
    }

    /// Positions of bars within `days` calendar days either side of `date`.
    pub fn window_around(&self, date: NaiveDate, days: u32) -> Range<usize> {
        let radius = Duration::days(i64::from(days));
        let start = date.checked_sub_signed(radius).unwrap_or(NaiveDate::MIN);
        let end = date.checked_add_signed(radius).unwrap_or(NaiveDate::MAX);
        self.range(start, end)
    }

    /// Number of bars dated within `[start, end]`, both inclusive.
    pub fn bars_between(&self, start: NaiveDate, end: NaiveDate) -> usize {
        self.range(start, end).len()
    }
}
