//! Volume indicators: On Balance Volume.

use crate::core::error::OverlayError;
use crate::core::Result;

/// On Balance Volume (OBV).
///
/// Starts at 0 on the first bar; each later bar adds its volume on a higher
/// close, subtracts it on a lower close and carries the total otherwise.
///
/// # Arguments
/// * `close` - Close prices
/// * `volume` - Volume data
///
/// # Returns
/// Vector of OBV values, same length as the input
pub fn obv(close: &[f64], volume: &[f64]) -> Result<Vec<f64>> {
    let n = close.len();
    if n != volume.len() {
        return Err(OverlayError::length_mismatch(n, volume.len()));
    }

    if n == 0 {
        return Ok(vec![]);
    }

    let mut result = vec![0.0; n];

    for i in 1..n {
        if close[i] > close[i - 1] {
            result[i] = result[i - 1] + volume[i];
        } else if close[i] < close[i - 1] {
            result[i] = result[i - 1] - volume[i];
        } else {
            result[i] = result[i - 1];
        }
    }

    Ok(result)
}
