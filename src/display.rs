//! Utilities for displaying measured and fitted values
//!
//! This module rounds numbers to a fixed count of significant figures, and
//! builds the labels shown on a graph's legend.
//!
//! # Key Concepts
//! - **Significant figures**: the count of meaningful digits in a rounded
//!   decimal, independent of magnitude. `0.00120` and `1.20` both have 3.
//! - **Exponent after rounding**: rounding can carry into a new digit
//!   (`9.996` → `10.0`), so the notation is chosen from the rounded value.
//!
//! # Helpers
//! - [`significant`]: Formats a number to a count of significant figures.
//! - [`format_line_label`]: Legend label for a line, e.g. `"Best m = 2.80"`.
//! - [`format_with_error`]: A value and its uncertainty, e.g. `"2.80 ± 0.341"`.
#![allow(clippy::cast_sign_loss)]

use crate::{
    error::{Error, Result},
    fit::Line,
    value::Value,
};

/// Lowest decimal exponent written in positional notation.
///
/// Anything smaller would need a long run of leading zeros.
pub const MIN_POSITIONAL_EXPONENT: i32 = -3;

/// Formats `x` to exactly `figures` significant figures.
///
/// # Notation
/// With `e` the decimal exponent of the **rounded** value:
/// - Positional when `-3 <= e < figures`: `1.2` at 3 figures is `"1.20"`.
/// - Scientific otherwise, as `<mantissa>e<exponent>`: `1000` at 2 figures is
///   `"1.0e3"`, since `"1000"` would show zeros that are not significant.
///
/// Zero (of either sign) is always `"0"`.
///
/// # Rounding
/// Digits are rounded from the exact binary value of `x`, not its decimal
/// spelling. `9.995` is stored just below the halfway point, so at 3 figures
/// it rounds down to `"9.99"`.
///
/// # Errors
/// - [`Error::InvalidFigures`] if `figures` is not positive.
/// - [`Error::NonFinite`] if `x` is NaN or infinite.
///
/// # Example
/// ```
/// # use labfit::display::significant;
/// assert_eq!(significant(1.23456, 3).unwrap(), "1.23");
/// assert_eq!(significant(9.996, 3).unwrap(), "10.0");
/// assert_eq!(significant(1000.0, 2).unwrap(), "1.0e3");
/// assert_eq!(significant(0.000123, 2).unwrap(), "1.2e-4");
/// ```
pub fn significant<T: Value>(x: T, figures: i32) -> Result<String> {
    if figures <= 0 {
        return Err(Error::InvalidFigures(figures));
    }

    let x = f64::try_cast(x)?;
    if !x.is_finite() {
        return Err(Error::NonFinite("significant figures"));
    }
    if x == 0.0 {
        return Ok("0".to_string());
    }

    // Rounds to `figures` digits, carrying into the exponent where needed
    let precision = usize::try_from(figures - 1).map_err(|_| Error::InvalidFigures(figures))?;
    let rounded = format!("{:.precision$e}", x.abs());
    let (mantissa, exponent) = rounded.split_once('e').ok_or(Error::CastFailed)?;
    let exponent: i32 = exponent.parse().map_err(|_| Error::CastFailed)?;

    let sign = if x < 0.0 { "-" } else { "" };
    if !(MIN_POSITIONAL_EXPONENT..figures).contains(&exponent) {
        return Ok(format!("{sign}{mantissa}e{exponent}"));
    }

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let body = if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        format!("0.{zeros}{digits}")
    } else {
        // `exponent < figures`, so the split is inside `digits`
        let (whole, fraction) = digits.split_at(exponent as usize + 1);
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        }
    };

    Ok(format!("{sign}{body}"))
}

/// Legend label for a line: `"<name> m = <slope>"`.
///
/// # Errors
/// See [`significant`].
///
/// # Example
/// ```
/// # use labfit::{display::format_line_label, fit::Line};
/// let line = Line::new(2.8, 0.1667);
/// assert_eq!(format_line_label("Best", &line, 3).unwrap(), "Best m = 2.80");
/// ```
pub fn format_line_label<T: Value>(name: &str, line: &Line<T>, figures: i32) -> Result<String> {
    Ok(format!("{name} m = {}", significant(line.slope, figures)?))
}

/// A value and its uncertainty: `"<value> ± <error>"`.
///
/// Both halves are rounded to `figures` significant figures.
///
/// # Errors
/// See [`significant`].
pub fn format_with_error<T: Value>(value: T, error: T, figures: i32) -> Result<String> {
    Ok(format!(
        "{} ± {}",
        significant(value, figures)?,
        significant(error, figures)?
    ))
}
