//! Band indicators: percentage bands and Bollinger Bands.
//!
//! Both bands sit around a simple moving average of the close. Values are
//! NaN wherever the moving average is still warming up.

use super::rolling::{rolling_mean, rolling_std};
use crate::core::error::OverlayError;
use crate::core::Result;

/// Standard deviation multiplier of the Bollinger Bands.
pub const BOLLINGER_STD_MULTIPLIER: f64 = 2.0;

/// Upper and lower band around a moving average.
#[derive(Debug, Clone)]
pub struct BandsResult {
    /// Middle line (moving average).
    pub middle: Vec<f64>,
    /// Upper band.
    pub upper: Vec<f64>,
    /// Lower band.
    pub lower: Vec<f64>,
}

/// Percentage bands (moving-average envelope).
///
/// upper = MA * (1 + percentage / 100), lower = MA * (1 - percentage / 100)
///
/// # Arguments
/// * `data` - Price data (close prices)
/// * `period` - Moving average window
/// * `percentage` - Band half-width in percent of the moving average
///
/// # Returns
/// BandsResult with middle, upper and lower lines
pub fn percentage_bands(data: &[f64], period: usize, percentage: f64) -> Result<BandsResult> {
    if !percentage.is_finite() || percentage < 0.0 {
        return Err(OverlayError::invalid_parameter(
            "percentage band width must be a non-negative number",
        ));
    }

    let middle = rolling_mean(data, period)?;
    let factor = percentage / 100.0;

    let upper = middle.iter().map(|m| m * (1.0 + factor)).collect();
    let lower = middle.iter().map(|m| m * (1.0 - factor)).collect();

    Ok(BandsResult {
        middle,
        upper,
        lower,
    })
}

/// Bollinger Bands.
///
/// upper = MA + 2 * std, lower = MA - 2 * std, with the sample standard
/// deviation of the same trailing window.
///
/// # Arguments
/// * `data` - Price data (close prices)
/// * `period` - Lookback period (default: 20)
///
/// # Returns
/// BandsResult with middle, upper and lower lines
pub fn bollinger_bands(data: &[f64], period: usize) -> Result<BandsResult> {
    let middle = rolling_mean(data, period)?;
    let std = rolling_std(data, period)?;

    let upper = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m + BOLLINGER_STD_MULTIPLIER * s)
        .collect();
    let lower = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m - BOLLINGER_STD_MULTIPLIER * s)
        .collect();

    Ok(BandsResult {
        middle,
        upper,
        lower,
    })
}
