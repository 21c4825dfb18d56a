//! Measurement series and uncertainties
//!
//! Lab data for one axis arrives either as one reading per point, or as a group
//! of repeated readings per point. [`Series::reduce`] collapses repeats into a
//! mean value and derives an uncertainty from their spread.
//!
//! ```rust
//! use labfit::measurement::{Series, Uncertainty};
//!
//! // Three timings for each of two pendulum lengths
//! let t = Series::Repeated(vec![vec![2.0, 4.0, 6.0], vec![5.0, 5.2, 5.1]]);
//! let reduced = t.reduce(&Uncertainty::Uniform(0.05)).unwrap();
//!
//! assert_eq!(reduced.values[0], 4.0);
//! assert_eq!(reduced.uncertainty.unwrap()[0], 2.0);
//! ```
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    statistics,
    value::{ensure_finite, Value},
};

/// Observations for one axis of a graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Series<T: Value = f64> {
    /// One reading per point.
    Scalar(Vec<T>),

    /// A group of repeated readings per point.
    Repeated(Vec<Vec<T>>),
}
impl<T: Value> Series<T> {
    /// Number of points in the series
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Series::Scalar(values) => values.len(),
            Series::Repeated(groups) => groups.len(),
        }
    }

    /// True if the series has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collapses the series into one value per point, plus an uncertainty.
    ///
    /// # Repeated readings
    /// Each group becomes its mean, and its uncertainty is the half-range
    /// `(max - min) / 2`. The `floor` is a minimum uncertainty, usually the
    /// resolution of the instrument:
    /// - `None`: the half-range is used as-is.
    /// - `Uniform(m)`: `max(half_range, m)` at every point.
    /// - `PerPoint(v)`: `max(half_range_i, v_i)`.
    ///
    /// # Scalar readings
    /// Values pass through unchanged and `floor` is the uncertainty, verbatim.
    ///
    /// # Errors
    /// - [`Error::EmptyGroup`] if a group of repeats has no readings.
    /// - [`Error::LengthMismatch`] if a per-point uncertainty has the wrong length.
    /// - [`Error::NegativeUncertainty`] if a supplied uncertainty is below zero.
    /// - [`Error::NonFinite`] if any reading or uncertainty is NaN or infinite.
    pub fn reduce(&self, floor: &Uncertainty<T>) -> Result<Reduced<T>> {
        let floor = floor.resolve(self.len())?;

        match self {
            Series::Scalar(values) => {
                ensure_finite(values, "measurements")?;
                Ok(Reduced {
                    values: values.clone(),
                    uncertainty: floor,
                })
            }

            Series::Repeated(groups) => {
                let mut values = Vec::with_capacity(groups.len());
                let mut uncertainty = Vec::with_capacity(groups.len());

                for (index, group) in groups.iter().enumerate() {
                    if group.is_empty() {
                        return Err(Error::EmptyGroup { index });
                    }
                    ensure_finite(group, "measurements")?;

                    let half_range = statistics::half_range(group.iter().copied());
                    let minimum = floor.as_ref().map_or(T::zero(), |f| f[index]);

                    values.push(statistics::mean(group.iter().copied()));
                    uncertainty.push(Value::max_of(half_range, minimum));
                }

                tracing::debug!(points = values.len(), "reduced repeated measurements");
                Ok(Reduced {
                    values,
                    uncertainty: Some(uncertainty),
                })
            }
        }
    }
}
impl<T: Value> From<Vec<T>> for Series<T> {
    fn from(values: Vec<T>) -> Self {
        Series::Scalar(values)
    }
}
impl<T: Value> From<&[T]> for Series<T> {
    fn from(values: &[T]) -> Self {
        Series::Scalar(values.to_vec())
    }
}
impl<T: Value, const N: usize> From<[T; N]> for Series<T> {
    fn from(values: [T; N]) -> Self {
        Series::Scalar(values.to_vec())
    }
}
impl<T: Value> From<Vec<Vec<T>>> for Series<T> {
    fn from(groups: Vec<Vec<T>>) -> Self {
        Series::Repeated(groups)
    }
}

/// Uncertainty attached to a series, drawn as error bars.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Uncertainty<T: Value = f64> {
    /// No uncertainty given.
    None,

    /// The same uncertainty for every point.
    Uniform(T),

    /// One uncertainty per point.
    PerPoint(Vec<T>),
}
impl<T: Value> Uncertainty<T> {
    /// Expands the uncertainty to one value per point, or `None` if there is none.
    ///
    /// # Errors
    /// - [`Error::LengthMismatch`] if a per-point uncertainty does not have `len` entries.
    /// - [`Error::NegativeUncertainty`] if any uncertainty is below zero.
    /// - [`Error::NonFinite`] if any uncertainty is NaN or infinite.
    pub fn resolve(&self, len: usize) -> Result<Option<Vec<T>>> {
        let values = match self {
            Uncertainty::None => return Ok(None),
            Uncertainty::Uniform(value) => vec![*value; len],
            Uncertainty::PerPoint(values) => {
                if values.len() != len {
                    return Err(Error::LengthMismatch {
                        what: "uncertainty",
                        expected: len,
                        found: values.len(),
                    });
                }
                values.clone()
            }
        };

        ensure_finite(&values, "uncertainty")?;
        if let Some(index) = values.iter().position(|v| *v < T::zero()) {
            return Err(Error::NegativeUncertainty { index });
        }

        Ok(Some(values))
    }
}
impl<T: Value> Default for Uncertainty<T> {
    fn default() -> Self {
        Uncertainty::None
    }
}
impl<T: Value> From<T> for Uncertainty<T> {
    fn from(value: T) -> Self {
        Uncertainty::Uniform(value)
    }
}
impl<T: Value> From<Vec<T>> for Uncertainty<T> {
    fn from(values: Vec<T>) -> Self {
        Uncertainty::PerPoint(values)
    }
}
impl<T: Value> From<Option<T>> for Uncertainty<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Uncertainty::None, Uncertainty::Uniform)
    }
}

/// A series collapsed to one value per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced<T: Value = f64> {
    /// The value of each point
    pub values: Vec<T>,

    /// The uncertainty of each point, if any
    pub uncertainty: Option<Vec<T>>,
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_repeated_no_floor() {
        let series = Series::Repeated(vec![vec![2.0, 4.0, 6.0]]);
        let reduced = series.reduce(&Uncertainty::None).unwrap();
        assert_eq!(reduced.values, vec![4.0]);
        assert_eq!(reduced.uncertainty, Some(vec![2.0]));
    }

    #[test]
    fn test_repeated_uniform_floor() {
        let series = Series::Repeated(vec![vec![2.0, 4.0, 6.0], vec![1.0, 1.2]]);
        let reduced = series.reduce(&Uncertainty::Uniform(3.0)).unwrap();
        assert_eq!(reduced.values[0], 4.0);
        assert_eq!(reduced.uncertainty, Some(vec![3.0, 3.0]));

        let reduced = series.reduce(&Uncertainty::Uniform(0.05)).unwrap();
        let uncertainty = reduced.uncertainty.unwrap();
        assert_eq!(uncertainty[0], 2.0);
        crate::assert_close!(uncertainty[1], 0.1, "half-range of [1.0, 1.2]");
    }

    #[test]
    fn test_repeated_per_point_floor() {
        let series = Series::Repeated(vec![vec![2.0, 4.0], vec![3.0, 3.0]]);
        let reduced = series
            .reduce(&Uncertainty::PerPoint(vec![0.5, 0.25]))
            .unwrap();
        assert_eq!(reduced.uncertainty, Some(vec![1.0, 0.25]));
    }

    #[test]
    fn test_single_reading_group() {
        let series = Series::Repeated(vec![vec![9.81]]);
        let reduced = series.reduce(&Uncertainty::None).unwrap();
        assert_eq!(reduced.values, vec![9.81]);
        assert_eq!(reduced.uncertainty, Some(vec![0.0]));
    }

    #[test]
    fn test_empty_group() {
        let series = Series::Repeated(vec![vec![1.0], vec![]]);
        let err = series.reduce(&Uncertainty::None).unwrap_err();
        assert!(matches!(err, Error::EmptyGroup { index: 1 }));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_scalar_passthrough() {
        let series = Series::from(vec![1.0, 2.0, 3.0]);
        let reduced = series.reduce(&Uncertainty::None).unwrap();
        assert_eq!(reduced.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(reduced.uncertainty, None);

        let reduced = series.reduce(&Uncertainty::Uniform(0.3)).unwrap();
        assert_eq!(reduced.uncertainty, Some(vec![0.3, 0.3, 0.3]));

        let reduced = series.reduce(&vec![0.1, 0.2, 0.3].into()).unwrap();
        assert_eq!(reduced.uncertainty, Some(vec![0.1, 0.2, 0.3]));
    }

    #[test]
    fn test_per_point_length_mismatch() {
        let series = Series::from(vec![1.0, 2.0, 3.0]);
        let err = series
            .reduce(&Uncertainty::PerPoint(vec![0.1, 0.2]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_uncertainty() {
        let series = Series::from(vec![1.0, 2.0]);
        let err = series.reduce(&Uncertainty::Uniform(-0.1)).unwrap_err();
        assert!(matches!(err, Error::NegativeUncertainty { index: 0 }));
    }

    #[test]
    fn test_non_finite_reading() {
        let series = Series::Repeated(vec![vec![1.0, f64::NAN]]);
        assert!(matches!(
            series.reduce(&Uncertainty::None),
            Err(Error::NonFinite(_))
        ));
    }

    #[test]
    fn test_deserialize_series() {
        let scalar: Series = serde_json::from_str("[1.0, 2.5]").unwrap();
        assert_eq!(scalar, Series::Scalar(vec![1.0, 2.5]));

        let repeated: Series = serde_json::from_str("[[1.0, 2.0], [3.0]]").unwrap();
        assert_eq!(repeated, Series::Repeated(vec![vec![1.0, 2.0], vec![3.0]]));

        let uniform: Uncertainty = serde_json::from_str("0.3").unwrap();
        assert_eq!(uniform, Uncertainty::Uniform(0.3));

        let none: Uncertainty = serde_json::from_str("null").unwrap();
        assert_eq!(none, Uncertainty::None);
    }
}
