//! Trailing-window statistics: rolling mean and rolling standard deviation.
//!
//! Position `i` holds the statistic of the `window` values ending at `i`
//! inclusive, or NaN while fewer than `window` values are available.

use crate::core::error::OverlayError;
use crate::core::Result;

/// Rolling arithmetic mean over a trailing window.
///
/// # Arguments
/// * `data` - Input data slice
/// * `window` - Number of trailing observations
///
/// # Returns
/// Vec of rolling means (NaN for the first `window - 1` values)
pub fn rolling_mean(data: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(OverlayError::invalid_parameter("window must be at least 1"));
    }

    let n = data.len();
    let mut result = vec![f64::NAN; n];

    if window > n {
        return Ok(result);
    }

    // First full window, then slide
    let mut sum: f64 = data[..window].iter().sum();
    result[window - 1] = sum / window as f64;

    for i in window..n {
        sum = sum - data[i - window] + data[i];
        result[i] = sum / window as f64;
    }

    Ok(result)
}

/// Rolling sample standard deviation (n - 1 denominator) over a trailing window.
///
/// A window of 1 has no sample deviation and yields NaN everywhere.
///
/// # Arguments
/// * `data` - Input data slice
/// * `window` - Number of trailing observations
///
/// # Returns
/// Vec of rolling standard deviations (NaN for the first `window - 1` values)
pub fn rolling_std(data: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(OverlayError::invalid_parameter("window must be at least 1"));
    }

    let n = data.len();
    let mut result = vec![f64::NAN; n];

    if window == 1 || window > n {
        return Ok(result);
    }

    // Sums are taken relative to the first value to limit cancellation
    let shift = data[0];
    let w = window as f64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for &v in &data[..window] {
        let d = v - shift;
        sum += d;
        sum_sq += d * d;
    }
    result[window - 1] = sample_std(sum, sum_sq, w);

    for i in window..n {
        let out = data[i - window] - shift;
        let inc = data[i] - shift;
        sum += inc - out;
        sum_sq += inc * inc - out * out;
        result[i] = sample_std(sum, sum_sq, w);
    }

    Ok(result)
}

#[inline]
fn sample_std(sum: f64, sum_sq: f64, w: f64) -> f64 {
    let variance = (sum_sq - sum * sum / w) / (w - 1.0);
    variance.max(0.0).sqrt()
}
