//! Straight-line least-squares fitting
//!
//! [`LinearFit`] fits `y = m·x + c` to paired data and reports the standard
//! errors of both parameters. [`WorstFitPolicy`] turns those errors into the
//! worst-fit [`Line`] drawn beside the line of best fit.
use std::ops::Range;

use nalgebra::{DMatrix, DVector, SVD};

use crate::{
    error::{Error, Result},
    statistics,
    value::{ensure_finite, min_max, CoordExt, Value},
};

/// Number of parameters in a straight line: intercept and slope.
const K: usize = 2;

/// A straight line `y = slope · x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<T: Value = f64> {
    /// Gradient of the line
    pub slope: T,

    /// Value of the line at `x = 0`
    pub intercept: T,
}
impl<T: Value> Line<T> {
    /// Creates a line from its slope and intercept
    pub fn new(slope: T, intercept: T) -> Self {
        Self { slope, intercept }
    }

    /// Evaluates the line at `x`
    pub fn y(&self, x: T) -> T {
        self.slope * x + self.intercept
    }

    /// The two endpoints of the line between `x0` and `x1`.
    ///
    /// This is all a renderer needs to draw a straight line.
    pub fn segment(&self, x0: T, x1: T) -> [(T, T); 2] {
        [(x0, self.y(x0)), (x1, self.y(x1))]
    }
}
impl<T: Value> std::fmt::Display for Line<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.intercept < T::zero() { '-' } else { '+' };
        let intercept = Value::abs(self.intercept);
        write!(f, "y = {}x {sign} {intercept}", self.slope)
    }
}

/// How the worst-fit line is derived from the standard errors of a fit.
///
/// A worst-fit line is a teaching device for bounding the gradient, not a
/// confidence region: it shifts the slope and intercept by one standard error
/// each, in opposite directions, so the line pivots about the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorstFitPolicy {
    /// `slope + slope_error`, `intercept - intercept_error`.
    ///
    /// The steepest line, and the convention used on the graph by default.
    #[default]
    Steeper,

    /// `slope - slope_error`, `intercept + intercept_error`.
    Shallower,
}
impl WorstFitPolicy {
    /// Applies the policy to a fit
    pub fn apply<T: Value>(self, fit: &LinearFit<T>) -> Line<T> {
        let (m, c) = (fit.slope(), fit.intercept());
        let (m_err, c_err) = (fit.slope_error(), fit.intercept_error());
        match self {
            WorstFitPolicy::Steeper => Line::new(m + m_err, c - c_err),
            WorstFitPolicy::Shallower => Line::new(m - m_err, c + c_err),
        }
    }
}

/// Ordinary least-squares straight line through a set of points.
///
/// Holds the line of best fit, the covariance matrix of its parameters, and
/// the data it was fitted to.
///
/// # How it works
/// - Maps `x` onto `[-1, 1]`, so that data in small SI units (farads, metres
///   of wavelength) is solved as accurately as data near 1.
/// - Builds a **design matrix** with shape `[n, 2]`, each row being `[1, u]`.
/// - Forms a **column vector** `b` from the `y` values.
/// - Solves `A * [c, m] = b` using the **SVD** of the design matrix, then maps
///   the parameters back to the original `x`.
/// - The parameter covariance is `σ² (XᵀX)⁻¹`, where `σ²` is the residual
///   variance with `n - 2` degrees of freedom. The standard errors are the
///   square roots of its diagonal.
///
/// # Example
/// ```
/// # use labfit::LinearFit;
/// let fit = LinearFit::<f64>::new(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert!((fit.slope() - 2.0).abs() < 1e-12);
/// assert!((fit.intercept() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit<T: Value = f64> {
    data: Vec<(T, T)>,
    line: Line<T>,
    covariance: DMatrix<T>,
    residual_variance: T,
}
impl<T: Value> LinearFit<T> {
    /// Fits a straight line to paired `x` and `y` values.
    ///
    /// # Errors
    /// - [`Error::LengthMismatch`] if `x` and `y` differ in length.
    /// - [`Error::TooFewPoints`] with fewer than 2 points.
    /// - [`Error::NonFinite`] if any value is NaN or infinite.
    /// - [`Error::SingularMatrix`] if every x-value is identical.
    /// - [`Error::Algebra`] if the solver fails.
    pub fn new(x: &[T], y: &[T]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                what: "y",
                expected: x.len(),
                found: y.len(),
            });
        }

        let data: Vec<(T, T)> = x.iter().copied().zip(y.iter().copied()).collect();
        Self::from_points(data)
    }

    /// Fits a straight line to a set of `(x, y)` points.
    ///
    /// # Errors
    /// See [`LinearFit::new`].
    pub fn from_points(data: Vec<(T, T)>) -> Result<Self> {
        let n = data.len();
        if n < K {
            return Err(Error::TooFewPoints(n));
        }

        ensure_finite(data.iter().map(|(x, _)| x), "x")?;
        ensure_finite(data.iter().map(|(_, y)| y), "y")?;

        // A vertical spread of points has no unique slope
        let (x_min, x_max) = min_max(data.x_iter()).ok_or(Error::TooFewPoints(n))?;
        if x_min == x_max {
            return Err(Error::SingularMatrix { n });
        }

        // Solve in x mapped onto [-1, 1], so the scale of x cannot make the system ill-conditioned
        let two = T::two();
        let (mid, half) = ((x_min + x_max) / two, (x_max - x_min) / two);
        let (design, b) = Self::create_matrix(&data, mid, half);
        let (c0, m0) = Self::solve_matrix(design.clone(), &b)?;

        let line = Line::new(m0 / half, c0 - m0 * mid / half);
        if !line.slope.is_finite_value() || !line.intercept.is_finite_value() {
            return Err(Error::Algebra("Non-finite coefficients"));
        }

        let y_fit = data.iter().map(|&(x, _)| line.y(x));
        let residual_variance =
            statistics::residual_variance(data.y_iter(), y_fit, T::from_positive_int(K));

        // Compute (X^T X)^-1 in the mapped domain
        let xtx = design.transpose() * &design;
        let svd = xtx.svd(true, true);
        let epsilon = T::epsilon() * T::from_positive_int(K) * svd.singular_values.max();
        let xtx_inv = svd.pseudo_inverse(epsilon).map_err(Error::Algebra)?;

        // [c, m] = J [c0, m0], so the covariance maps back as J Σ Jᵀ
        let jacobian = DMatrix::from_row_slice(
            K,
            K,
            &[T::one(), -mid / half, T::zero(), T::one() / half],
        );
        let covariance = &jacobian * xtx_inv * jacobian.transpose() * residual_variance;

        let fit = Self {
            data,
            line,
            covariance,
            residual_variance,
        };

        tracing::debug!(
            n,
            slope = ?fit.slope(),
            intercept = ?fit.intercept(),
            slope_error = ?fit.slope_error(),
            intercept_error = ?fit.intercept_error(),
            "fitted line"
        );
        Ok(fit)
    }

    /// Turns the points into a design matrix and y-values vector.
    ///
    /// Each row is `[1, (x - mid) / half]`.
    fn create_matrix(data: &[(T, T)], mid: T, half: T) -> (DMatrix<T>, DVector<T>) {
        let design = DMatrix::from_fn(data.len(), K, |row, col| match col {
            0 => T::one(),
            _ => (data[row].0 - mid) / half,
        });
        let b = DVector::from_iterator(data.len(), data.iter().map(|&(_, y)| y));
        (design, b)
    }

    /// Solves the least-squares system using SVD, returning `(intercept, slope)`.
    fn solve_matrix(design: DMatrix<T>, b: &DVector<T>) -> Result<(T, T)> {
        let size = design.shape();

        // Calculate the singular value decomposition of the matrix
        let decomp = SVD::new_unordered(design, true, true);

        // ~= machine_epsilon * max(size) * max_singular
        let max_size = size.0.max(size.1);
        let sigma_max = decomp.singular_values.max();
        let epsilon = T::epsilon() * T::try_cast(max_size)? * sigma_max;

        let solution = decomp.solve(b, epsilon).map_err(Error::Algebra)?;
        let (intercept, slope) = (solution[0], solution[1]);

        if !intercept.is_finite_value() || !slope.is_finite_value() {
            return Err(Error::Algebra("Non-finite coefficients"));
        }

        Ok((intercept, slope))
    }

    /// Gradient of the line of best fit
    pub fn slope(&self) -> T {
        self.line.slope
    }

    /// Intercept of the line of best fit
    pub fn intercept(&self) -> T {
        self.line.intercept
    }

    /// Standard error of the slope.
    ///
    /// Zero when the data has no degrees of freedom left (two points).
    pub fn slope_error(&self) -> T {
        self.standard_error(1)
    }

    /// Standard error of the intercept
    pub fn intercept_error(&self) -> T {
        self.standard_error(0)
    }

    fn standard_error(&self, j: usize) -> T {
        // Rounding can leave a tiny negative variance on an exact fit
        Value::max_of(self.covariance[(j, j)], T::zero()).sqrt()
    }

    /// The 2x2 parameter covariance matrix, ordered `[intercept, slope]`.
    pub fn covariance(&self) -> &DMatrix<T> {
        &self.covariance
    }

    /// The line of best fit
    pub fn best_line(&self) -> Line<T> {
        self.line
    }

    /// The worst-fit line under the given policy
    pub fn worst_line(&self, policy: WorstFitPolicy) -> Line<T> {
        policy.apply(self)
    }

    /// The worst-fit line under the default [`WorstFitPolicy::Steeper`] policy
    pub fn worst_fit(&self) -> Line<T> {
        self.worst_line(WorstFitPolicy::default())
    }

    /// Evaluates the line of best fit at `x`
    pub fn y(&self, x: T) -> T {
        self.line.y(x)
    }

    /// The points the line was fitted to
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Number of points the line was fitted to
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a fit has at least two points
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The range of x-values in the source data
    pub fn x_range(&self) -> Range<T> {
        let (start, end) = min_max(self.data.x_iter()).unwrap_or((T::zero(), T::zero()));
        start..end
    }

    /// `(x, y - y_fit)` for each source point
    pub fn residuals(&self) -> Vec<(T, T)> {
        self.data.iter().map(|&(x, y)| (x, y - self.y(x))).collect()
    }

    /// Residual variance with `n - 2` degrees of freedom.
    ///
    /// See [`statistics::residual_variance`].
    pub fn residual_variance(&self) -> T {
        self.residual_variance
    }

    /// Sum of squared residuals, the quantity the fit minimizes
    pub fn residual_sum_of_squares(&self) -> T {
        let y_fit = self.data.iter().map(|&(x, _)| self.y(x));
        statistics::residual_sum_of_squares(self.data.y_iter(), y_fit)
    }

    /// Proportion of the variance in `y` explained by the line.
    ///
    /// See [`statistics::r_squared`].
    pub fn r_squared(&self) -> T {
        let y_fit = self.data.iter().map(|&(x, _)| self.y(x));
        statistics::r_squared(self.data.y_iter(), y_fit)
    }
}
impl<T: Value> std::fmt::Display for LinearFit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (m = {} ± {}, c = {} ± {}, R² = {})",
            self.line,
            self.slope(),
            self.slope_error(),
            self.intercept(),
            self.intercept_error(),
            self.r_squared()
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{assert_close, assert_r_squared, error::ErrorKind};

    const X: [f64; 6] = [1.0, 0.9, 0.8, 0.7, 0.6, 0.5];
    const Y: [f64; 6] = [3.0, 2.5, 2.5, 2.3, 1.8, 1.5];

    /// Textbook formulas for simple linear regression
    fn reference(x: &[f64], y: &[f64]) -> (f64, f64, f64, f64) {
        let n = x.len() as f64;
        let x_bar = x.iter().sum::<f64>() / n;
        let y_bar = y.iter().sum::<f64>() / n;
        let sxx: f64 = x.iter().map(|x| (x - x_bar).powi(2)).sum();
        let sxy: f64 = x.iter().zip(y).map(|(x, y)| (x - x_bar) * (y - y_bar)).sum();

        let m = sxy / sxx;
        let c = y_bar - m * x_bar;
        let rss: f64 = x.iter().zip(y).map(|(x, y)| (y - (m * x + c)).powi(2)).sum();
        let s2 = rss / (n - 2.0);

        let m_err = (s2 / sxx).sqrt();
        let c_err = (s2 * (1.0 / n + x_bar * x_bar / sxx)).sqrt();
        (m, c, m_err, c_err)
    }

    #[test]
    fn test_matches_reference() {
        let fit = LinearFit::new(&X, &Y).unwrap();
        let (m, c, m_err, c_err) = reference(&X, &Y);

        assert_close!(fit.slope(), m, tol = 1e-10);
        assert_close!(fit.intercept(), c, tol = 1e-10);
        assert_close!(fit.slope_error(), m_err, tol = 1e-10);
        assert_close!(fit.intercept_error(), c_err, tol = 1e-10);

        assert_close!(fit.slope(), 2.8, tol = 1e-10);
        assert!(fit.slope_error() > 0.0);
        assert!(fit.intercept_error() > 0.0);
    }

    #[test]
    fn test_small_scale_x() {
        // Capacitance in farads against a reading near 1
        let x = [100e-12, 220e-12, 330e-12, 470e-12, 560e-12, 680e-12];
        let y = [1.02, 1.11, 1.27, 1.33, 1.52, 1.58];
        let fit = LinearFit::new(&x, &y).unwrap();
        let (m, c, m_err, c_err) = reference(&x, &y);

        assert_close!(fit.slope() / m, 1.0, tol = 1e-9);
        assert_close!(fit.intercept(), c, tol = 1e-9);
        assert_close!(fit.slope_error() / m_err, 1.0, tol = 1e-9);
        assert_close!(fit.intercept_error() / c_err, 1.0, tol = 1e-9);

        let worst = fit.worst_fit();
        assert!(worst.slope > fit.slope());
        assert!(m_err > 1e7);

        // The same readings on a large scale
        let x_large: Vec<f64> = x.iter().map(|x| x * 1e15).collect();
        let fit = LinearFit::new(&x_large, &y).unwrap();
        let (m, _, m_err, _) = reference(&x_large, &y);
        assert_close!(fit.slope() / m, 1.0, tol = 1e-9);
        assert_close!(fit.slope_error() / m_err, 1.0, tol = 1e-9);
    }

    #[test]
    fn test_exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|x| 2.0 * x + 1.0).collect();
        let fit = LinearFit::new(&x, &y).unwrap();

        assert_close!(fit.slope(), 2.0, tol = 1e-12);
        assert_close!(fit.intercept(), 1.0, tol = 1e-12);
        assert_close!(fit.slope_error(), 0.0, tol = 1e-6);
        assert_close!(fit.r_squared(), 1.0, tol = 1e-12);
        assert_r_squared!(fit, 0.999);
    }

    #[test]
    fn test_two_points() {
        let fit = LinearFit::new(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
        assert_close!(fit.slope(), 2.0, tol = 1e-12);
        assert_close!(fit.intercept(), 0.0, tol = 1e-12);
        assert_eq!(fit.slope_error(), 0.0);
        assert_eq!(fit.intercept_error(), 0.0);
        assert_eq!(fit.residual_variance(), 0.0);
    }

    #[test]
    fn test_worst_fit_relations() {
        let fit = LinearFit::new(&X, &Y).unwrap();

        let worst = fit.worst_fit();
        assert_eq!(worst.slope, fit.slope() + fit.slope_error());
        assert_eq!(worst.intercept, fit.intercept() - fit.intercept_error());
        assert_close!(worst.slope - fit.slope(), fit.slope_error());
        assert_close!(fit.intercept() - worst.intercept, fit.intercept_error());
        assert!(worst.slope > fit.slope());

        let shallow = fit.worst_line(WorstFitPolicy::Shallower);
        assert_close!(fit.slope() - shallow.slope, fit.slope_error());
        assert_close!(shallow.intercept - fit.intercept(), fit.intercept_error());
    }

    #[test]
    fn test_minimizes_residuals() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x1ab_f17);
        let x: Vec<f64> = (0..40_i32).map(|i| f64::from(i) * 0.25).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|x| 1.7 * x - 3.0 + rng.random_range(-0.5..0.5))
            .collect();

        let fit = LinearFit::new(&x, &y).unwrap();
        let (m, c, m_err, c_err) = reference(&x, &y);
        assert_close!(fit.slope(), m, tol = 1e-9);
        assert_close!(fit.intercept(), c, tol = 1e-9);
        assert_close!(fit.slope_error(), m_err, tol = 1e-9);
        assert_close!(fit.intercept_error(), c_err, tol = 1e-9);

        let rss = |line: Line<f64>| -> f64 {
            x.iter()
                .zip(&y)
                .map(|(x, y)| (y - line.y(*x)).powi(2))
                .sum()
        };
        let best = rss(fit.best_line());
        assert_close!(best, fit.residual_sum_of_squares(), tol = 1e-9);

        for (dm, dc) in [(1e-3, 0.0), (-1e-3, 0.0), (0.0, 1e-3), (0.0, -1e-3), (1e-3, -1e-3)] {
            let nudged = Line::new(fit.slope() + dm, fit.intercept() + dc);
            assert!(rss(nudged) > best, "nudging by ({dm}, {dc}) reduced the residuals");
        }
    }

    #[test]
    fn test_residuals() {
        let fit = LinearFit::new(&X, &Y).unwrap();
        let residuals = fit.residuals();
        assert_eq!(residuals.len(), X.len());

        let sum: f64 = residuals.iter().map(|(_, r)| r).sum();
        assert_close!(sum, 0.0, tol = 1e-12);
        assert_eq!(fit.x_range(), 0.5..1.0);
    }

    #[test]
    fn test_identical_x_is_degenerate() {
        let err = LinearFit::new(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::SingularMatrix { n: 3 }));
        assert_eq!(err.kind(), ErrorKind::DegenerateFit);
    }

    #[test]
    fn test_too_few_points() {
        let err = LinearFit::new(&[1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::TooFewPoints(1)));
        assert_eq!(err.kind(), ErrorKind::DegenerateFit);

        let err = LinearFit::<f64>::new(&[], &[]).unwrap_err();
        assert!(matches!(err, Error::TooFewPoints(0)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = LinearFit::new(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_non_finite() {
        let err = LinearFit::new(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::NonFinite("x")));
        let err = LinearFit::new(&[1.0, 2.0], &[f64::INFINITY, 2.0]).unwrap_err();
        assert!(matches!(err, Error::NonFinite("y")));
    }

    #[test]
    fn test_f32() {
        let x = [0.0_f32, 1.0, 2.0, 3.0];
        let y = [0.5_f32, 2.5, 4.5, 6.5];
        let fit = LinearFit::new(&x, &y).unwrap();
        assert_close!(fit.slope(), 2.0, tol = 1e-4);
        assert_close!(fit.intercept(), 0.5, tol = 1e-4);
    }

    #[test]
    fn test_segment() {
        let line = Line::new(2.0, -1.0);
        assert_eq!(line.segment(0.0, 1.1), [(0.0, -1.0), (1.1, 2.0 * 1.1 - 1.0)]);
        assert_eq!(line.to_string(), "y = 2x - 1");
    }
}
