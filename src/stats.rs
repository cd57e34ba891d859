//! Descriptive statistics and the normal density function.
//!
//! These helpers back the histogram and Gaussian-curve renderers but are
//! useful on their own. All of them operate on `f64` slices; an empty
//! slice yields NaN (mean, variance) or the fold identity (min, max), so
//! callers that require non-empty input validate it at build time.

use std::f64::consts::PI;

/// Maximum value of a sequence. Returns `f64::NEG_INFINITY` when empty.
#[must_use]
pub fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Minimum value of a sequence. Returns `f64::INFINITY` when empty.
#[must_use]
pub fn min_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Arithmetic mean of a sequence.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance: the mean of squared deviations from the mean.
#[must_use]
pub fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    let squared: Vec<f64> = values.iter().map(|v| (v - m).powi(2)).collect();
    mean(&squared)
}

/// Population standard deviation.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Normal-distribution density at `x` for the given standard deviation
/// and mean:
///
/// `f(x) = (1 / (sigma * sqrt(2 * pi))) * exp(-0.5 * ((x - mu) / sigma)^2)`
#[must_use]
pub fn gaussian_density(x: f64, sigma: f64, mu: f64) -> f64 {
    let z = (x - mu) / sigma;
    (1.0 / (sigma * (2.0 * PI).sqrt())) * (-0.5 * z * z).exp()
}

/// Evaluate the normal density for every value in a sequence.
///
/// The density is evaluated with FIXED placeholder parameters
/// (sigma = 3, mu = 100) rather than the sample moments. Callers that
/// want the curve of the data itself should call [`gaussian_density`]
/// with [`mean`] and [`std_dev`] of the sequence.
#[must_use]
pub fn gaussian_curve(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|&v| gaussian_density(v, 3.0, 100.0))
        .collect()
}
