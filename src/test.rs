//! Assertions for testing fits and numeric output.
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal.
//! - The default tolerance is the machine epsilon, scaled by the larger magnitude (at least 1).
//! - `tol = ...` sets an absolute tolerance instead.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] over two slices.
//!
//! ### [`crate::assert_r_squared`]
//! Asserts that a [`crate::LinearFit`] explains its source data well.
//! See [`crate::LinearFit::r_squared`] for more details.

use crate::value::Value;

/// Default tolerance used by [`crate::assert_close`]: `ε · max(1, |a|, |b|)`.
#[doc(hidden)]
pub fn relative_epsilon<T: Value>(a: T, b: T) -> T {
    let scale = Value::max_of(T::one(), Value::max_of(Value::abs(a), Value::abs(b)));
    scale * T::epsilon()
}

/// Asserts that two floating-point values are approximately equal.
///
/// # Parameters
/// - `$a`: First value.
/// - `$b`: Second value.
/// - `tol = $tol`: *(optional)* Absolute tolerance. Defaults to the scaled machine epsilon.
/// - `$msg`: *(optional)* Custom failure message, with `format!` arguments.
///
/// # Panics
/// Panics if `|a - b|` exceeds the tolerance.
///
/// # Examples
/// ```
/// # use labfit::assert_close;
/// assert_close!(0.1 + 0.2, 0.3, "Nearly equal");
/// assert_close!(2.004, 2.0, tol = 0.01);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $msg:literal $(, $($args:tt),*)?)?) => { #[allow(clippy::float_cmp)] {
        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($msg, $($($args)?)?); )?

        let (a, b) = ($a, $b);
        let tolerance = $tol;
        assert!(
            a == b || $crate::value::Value::abs(a - b) <= tolerance,
            "{msg}: {a} != {b} (tolerance {tolerance})"
        );
    }};

    ($a:expr, $b:expr $(, $msg:literal $(, $($args:tt),*)?)?) => {{
        let (a, b) = ($a, $b);
        $crate::assert_close!(a, b, tol = $crate::test::relative_epsilon(a, b) $(, $msg $(, $($args),*)?)?);
    }};
}

/// Asserts that two slices of floating-point values are approximately equal element-wise.
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements is not [`crate::assert_close`].
///
/// # Examples
/// ```
/// # use labfit::assert_all_close;
/// let a = vec![1.0, 2.0, 3.0];
/// let b = vec![1.0 + 1e-16, 2.0, 3.0];
///
/// assert_all_close!(a, b);
/// assert_all_close!(a, b, "Vectors must match");
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr  $(, $msg:literal $(, $($args:tt),*)?)?) => {
        #[allow(unused_assignments, unused_mut)]
        let mut msg = format!("{} elements", $src.len());
        $(
            msg = format!($msg, $($($args)?)?);
        )?

        assert_eq!($src.len(), $dst.len(), "{msg} - length mismatch");

        for (i, (s, d)) in $src.iter().zip($dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, "{msg} - src[{i}]");
        }
    };
}

/// Asserts that a line of best fit explains its source data.
///
/// Threshold for r² defaults to 0.9.
///
/// # Panics
/// Panics if the fit's r² is below the threshold, or is not finite.
///
/// # Examples
/// ```
/// # use labfit::{assert_r_squared, LinearFit};
/// let fit = LinearFit::new(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.1, 4.9, 7.0]).unwrap();
/// assert_r_squared!(fit, 0.99);
/// assert_r_squared!(fit);
/// ```
#[macro_export]
macro_rules! assert_r_squared {
    ($fit:expr $(, $r2:expr)?) => {{
        let fit = &$fit;
        #[allow(unused_mut, unused_assignments)] let mut threshold = 0.9;
        $( threshold = $r2; )?

        let r2 = fit.r_squared();
        let r2_f64 = <f64 as $crate::value::Value>::try_cast(r2).unwrap_or(f64::NAN);
        assert!(
            r2_f64.is_finite() && r2_f64 >= threshold,
            "Fit does not meet R² threshold: {r2_f64} < {threshold}\n{fit}"
        );
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0 + 1e-16, 1.0, "Values should be close");
        assert_close!(1e6 + 1e-10, 1e6);
        assert_close!(2.05_f32, 2.0_f32, tol = 0.1);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_macro_fails() {
        assert_close!(1.0, 1.001);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0 + 1e-16, 2.0, 3.0];
        assert_all_close!(a, b, "Vectors must match");
    }
}
