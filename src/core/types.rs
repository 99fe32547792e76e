//! Core data types for the overlay engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::TradingCalendar;
use super::error::{OverlayError, Result};

/// Type alias for price values.
pub type Price = f64;

/// OHLCV data for a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

/// OHLCV data series for one security and interval.
///
/// Dates are strictly increasing; gaps (non-trading days) are allowed.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    open: Vec<Price>,
    high: Vec<Price>,
    low: Vec<Price>,
    close: Vec<Price>,
    volume: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from bars, rejecting unsorted or duplicate dates.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        let n = bars.len();
        let mut series = Self {
            dates: Vec::with_capacity(n),
            open: Vec::with_capacity(n),
            high: Vec::with_capacity(n),
            low: Vec::with_capacity(n),
            close: Vec::with_capacity(n),
            volume: Vec::with_capacity(n),
        };

        for bar in bars {
            series.dates.push(bar.date);
            series.open.push(bar.open);
            series.high.push(bar.high);
            series.low.push(bar.low);
            series.close.push(bar.close);
            series.volume.push(bar.volume);
        }

        check_dates(&series.dates)?;
        Ok(series)
    }

    /// Build a series from column vectors.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        open: Vec<Price>,
        high: Vec<Price>,
        low: Vec<Price>,
        close: Vec<Price>,
        volume: Vec<f64>,
    ) -> Result<Self> {
        let n = dates.len();
        for column in [&open, &high, &low, &close, &volume] {
            if column.len() != n {
                return Err(OverlayError::length_mismatch(n, column.len()));
            }
        }
        check_dates(&dates)?;

        Ok(Self {
            dates,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[inline]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    #[inline]
    pub fn open(&self) -> &[Price] {
        &self.open
    }

    #[inline]
    pub fn high(&self) -> &[Price] {
        &self.high
    }

    #[inline]
    pub fn low(&self) -> &[Price] {
        &self.low
    }

    #[inline]
    pub fn close(&self) -> &[Price] {
        &self.close
    }

    #[inline]
    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Get a single bar at index.
    pub fn get_bar(&self, index: usize) -> Option<PriceBar> {
        if index >= self.len() {
            return None;
        }
        Some(PriceBar {
            date: self.dates[index],
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
        })
    }

    /// Iterate over bars in date order.
    pub fn bars(&self) -> impl Iterator<Item = PriceBar> + '_ {
        (0..self.len()).filter_map(move |i| self.get_bar(i))
    }

    /// Date-to-position index over this series.
    pub fn calendar(&self) -> TradingCalendar<'_> {
        TradingCalendar::new(&self.dates)
    }

    /// Bars dated within `[start, end]`, both inclusive.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let range = self.calendar().range(start, end);
        Self {
            dates: self.dates[range.clone()].to_vec(),
            open: self.open[range.clone()].to_vec(),
            high: self.high[range.clone()].to_vec(),
            low: self.low[range.clone()].to_vec(),
            close: self.close[range.clone()].to_vec(),
            volume: self.volume[range].to_vec(),
        }
    }

    /// Highest close, `None` for an empty series.
    pub fn max_close(&self) -> Option<Price> {
        self.close.iter().copied().reduce(f64::max)
    }

    /// Lowest close, `None` for an empty series.
    pub fn min_close(&self) -> Option<Price> {
        self.close.iter().copied().reduce(f64::min)
    }

    /// Arithmetic mean of all closes, `None` for an empty series.
    pub fn mean_close(&self) -> Option<Price> {
        if self.close.is_empty() {
            return None;
        }
        Some(self.close.iter().sum::<f64>() / self.close.len() as f64)
    }
}

fn check_dates(dates: &[NaiveDate]) -> Result<()> {
    for (i, pair) in dates.windows(2).enumerate() {
        if pair[1] == pair[0] {
            return Err(OverlayError::DuplicateDate { date: pair[1] });
        }
        if pair[1] < pair[0] {
            return Err(OverlayError::UnsortedDates {
                index: i + 1,
                date: pair[1],
            });
        }
    }
    Ok(())
}

/// A local extremum of the close series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremumPoint {
    /// Position of the bar in the source series.
    pub index: usize,
    /// Bar date.
    pub date: NaiveDate,
    /// Close price of the bar.
    pub price: Price,
}

/// Direction of a trend segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    /// Higher lows and higher peaks; the path rises.
    Ascending,
    /// Lower peaks and lower lows; the path falls.
    Descending,
}

impl TrendDirection {
    /// Display label of the trendline.
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Ascending => "Uptrend",
            TrendDirection::Descending => "Downtrend",
        }
    }
}

/// Price space in which a trend path is stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// Constant additive step in price.
    #[default]
    Linear,
    /// Constant additive step in log(price), i.e. constant growth rate.
    Logarithmic,
}

impl InterpolationMode {
    /// Pick the mode matching the chart's price axis.
    pub fn for_log_scale(logarithmic: bool) -> Self {
        if logarithmic {
            InterpolationMode::Logarithmic
        } else {
            InterpolationMode::Linear
        }
    }
}
