//! Numeric types and coordinate utilities for lab data.
//!
//! This module defines the [`Value`] trait, which abstracts the floating-point
//! types measurements can be stored in, ensuring compatibility with nalgebra
//! and the `num-traits` conversions.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `RealField` to provide:
//!   - `try_cast` for safe type conversion with error handling.
//!   - Unambiguous `abs`, `min`/`max` and finiteness checks.
//! - [`CoordExt`]: Accessors for the `x` and `y` halves of a set of points.
//!
//! # Example
//!
//! ```rust
//! use labfit::value::{CoordExt, Value};
//!
//! let data = vec![(0.5, 1.5), (1.0, 3.0)];
//! assert_eq!(data.x(), vec![0.5, 1.0]);
//! assert_eq!(f64::try_cast(3_usize).unwrap(), 3.0);
//! ```
use std::ops::Range;

use crate::error::Error;

/// Numeric type for measurements
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns the larger of two values
    #[must_use]
    fn max_of(self, other: Self) -> Self {
        nalgebra::RealField::max(self, other)
    }

    /// Returns the smaller of two values
    #[must_use]
    fn min_of(self, other: Self) -> Self {
        nalgebra::RealField::min(self, other)
    }

    /// True if the value is neither NaN nor infinite
    fn is_finite_value(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(<Self as num_traits::float::FloatCore>::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Returns `Err(Error::NonFinite)` if any value in the iterator is NaN or infinite.
///
/// # Errors
/// Returns an error naming `what` if a value is not finite.
pub fn ensure_finite<'a, T: Value>(
    values: impl IntoIterator<Item = &'a T>,
    what: &'static str,
) -> Result<(), Error> {
    if values.into_iter().all(|v| v.is_finite_value()) {
        Ok(())
    } else {
        Err(Error::NonFinite(what))
    }
}

/// Returns the `(min, max)` of a set of values, or `None` if it is empty.
pub fn min_max<T: Value>(values: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    values.into_iter().fold(None, |acc, v| {
        Some(match acc {
            Some((min, max)) => (Value::min_of(min, v), Value::max_of(max, v)),
            None => (v, v),
        })
    })
}

/// Extension trait for accessing the `x` and `y` coordinates of a set of points.
///
/// # Examples
///
/// ```
/// # use labfit::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y_range(), Some(-2.0..3.0));
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the range of x-coordinates.
    fn x_range(&self) -> Option<Range<T>> {
        min_max(self.x_iter()).map(|(start, end)| start..end)
    }

    /// Returns the range of y-coordinates.
    fn y_range(&self) -> Option<Range<T>> {
        min_max(self.y_iter()).map(|(start, end)| start..end)
    }

    /// Converts the coordinates to `f64`.
    ///
    /// # Errors
    /// Returns an error if any of the coordinates cannot be converted to `f64`.
    fn as_f64(&self) -> crate::error::Result<Vec<(f64, f64)>> {
        self.x_iter()
            .zip(self.y_iter())
            .map(|(x, y)| Ok((f64::try_cast(x)?, f64::try_cast(y)?)))
            .collect()
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for &[(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
