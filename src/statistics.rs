//! Descriptive statistics for repeated measurements and straight-line fits
//!
//! # Repeated measurements
//! - [`mean`]: Arithmetic mean of a group of readings.
//! - [`half_range`]: Half the spread of a group of readings, used as its uncertainty.
//! - [`spread`]: Difference between the largest and smallest reading.
//!
//! # Regression diagnostics
//! - [`residual_sum_of_squares`]: The quantity a least-squares fit minimizes.
//! - [`residual_variance`]: Unbiased estimate of the variance of the errors after fitting.
//! - [`r_squared`]: Proportion of variance explained by the line. Higher is better (0 to 1).
//!
//! # Examples
//!
//! ```rust
//! use labfit::statistics::{half_range, mean, r_squared};
//!
//! let repeats = [2.0, 4.0, 6.0];
//! assert_eq!(mean(repeats.iter().copied()), 4.0);
//! assert_eq!(half_range(repeats.iter().copied()), 2.0);
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//! let r2 = r_squared(y.into_iter(), y_fit.into_iter());
//! assert!(r2 > 0.9);
//! ```
use crate::value::Value;

/// Computes the arithmetic mean of a sequence of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
/// </div>
///
/// # Returns
/// The arithmetic mean of all elements in `data`.
/// - Returns NaN if the iterator yields no elements. Callers reject empty groups first.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = labfit::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Computes the spread of a sequence of values: `max - min`.
///
/// # Notes
/// - Returns `T::infinity() - T::neg_infinity()` if `data` is empty
///
/// # Examples
/// ```rust
/// let values = vec![2.0, 5.0, 1.0, 9.0];
/// let r = labfit::statistics::spread(values.iter().copied());
/// assert_eq!(r, 8.0); // 9 - 1
/// ```
pub fn spread<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut min = T::infinity();
    let mut max = T::neg_infinity();
    for value in data {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }
    max - min
}

/// Half the spread of a group of repeated readings: `(max - min) / 2`.
///
/// A quick uncertainty estimate for a handful of repeats, which is how most
/// school practicals treat them. A single reading has a half-range of zero.
///
/// # Examples
/// ```rust
/// # use labfit::statistics::half_range;
/// assert_eq!(half_range([2.0, 4.0, 6.0].into_iter()), 2.0);
/// assert_eq!(half_range([7.5].into_iter()), 0.0);
/// ```
pub fn half_range<T: Value>(data: impl Iterator<Item = T>) -> T {
    spread(data) / T::two()
}

/// Sum of squared residuals, `Σ (y_i - y_fit_i)²`.
pub fn residual_sum_of_squares<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    y.zip(y_fit)
        .fold(T::zero(), |acc, (y, y_fit)| acc + Value::powi(y - y_fit, 2))
}

/// Computes the residual variance of a model's predictions.
///
/// Residual variance is the unbiased estimate of the variance of the
/// errors (σ²) after fitting a model. It scales the covariance of the fitted
/// parameters, and so the standard errors of the slope and intercept.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   n = number of observations, k = number of model parameters
/// ```
/// </div>
///
/// With no degrees of freedom left (`n == k`, two points on a line) the fit is
/// exact and the variance is reported as zero.
///
/// # Example
/// ```rust
/// # use labfit::statistics::residual_variance;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![0.9, 2.1, 2.95];
/// let variance = residual_variance(y.into_iter(), y_fit.into_iter(), 2.0);
/// assert!(variance > 0.0);
/// ```
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: T,
) -> T {
    let mut ss_total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        ss_total += Value::powi(y - y_fit, 2);
        n += T::one();
    }

    if n <= k {
        return T::zero();
    }
    ss_total / (n - k)
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number between 0 and 1 that tells you how well the line explains the data:
/// - `0` means the line explains none of the variation.
/// - `1` means every point sits on the line.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// If every `y` is identical `SS_tot` is zero; a perfect fit then reports 1.
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_total == T::zero() {
        return if ss_residual == T::zero() {
            T::one()
        } else {
            T::zero()
        };
    }

    T::one() - (ss_residual / ss_total)
}
