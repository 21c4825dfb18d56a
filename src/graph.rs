//! Scatter graphs with a line of best fit and a worst-fit line
//!
//! A [`Graph`] takes raw measurements, reduces any repeated readings, fits a
//! straight line, and describes the result as a [`Scene`].
//!
//! ```rust
//! use labfit::{Graph, GraphOptions};
//!
//! let graph = Graph::new(vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5], vec![3.0, 2.5, 2.5, 2.3, 1.8, 1.5])
//!     .with_y_error(0.3)
//!     .with_options(GraphOptions {
//!         title: "Young's double slit data".into(),
//!         ..Default::default()
//!     });
//!
//! let scene = graph.scene().unwrap();
//! assert_eq!(scene.lines[0].label, "Best m = 2.80");
//! assert_eq!(scene.lines[1].label, "Worst m = 3.14");
//! ```
use crate::{
    display,
    error::{Error, Result},
    fit::{Line, LinearFit, WorstFitPolicy},
    measurement::{Reduced, Series, Uncertainty},
    scene::{axis_range, Gridlines, LineKind, Point, Scene, Segment},
    value::Value,
};

/// Default factor the axes extend past the data by.
pub const AXIS_PADDING: f64 = 1.1;

/// Presentation options for a [`Graph`]
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    /// Caption above the graph
    pub title: String,

    /// Description under the x-axis
    pub x_label: String,

    /// Description beside the y-axis
    pub y_label: String,

    /// Start both axes at zero
    pub force_origin: bool,

    /// Draw the worst-fit line as well as the best
    pub show_worst_fit: bool,

    /// Significant figures in the legend labels
    pub accuracy: i32,

    /// Factor the axes extend past the data by
    pub axis_padding: f64,

    /// How the worst-fit line is derived
    pub worst_fit_policy: WorstFitPolicy,

    /// Output size in pixels
    pub size: (u32, u32),
}
impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            title: "Graph".into(),
            x_label: "Independent variable".into(),
            y_label: "Dependent variable".into(),
            force_origin: true,
            show_worst_fit: true,
            accuracy: 3,
            axis_padding: AXIS_PADDING,
            worst_fit_policy: WorstFitPolicy::default(),
            size: (640, 480),
        }
    }
}

/// The numeric result of a [`Graph`]: reduced data and the fitted lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<T: Value = f64> {
    /// Reduced x-values and their uncertainties
    pub x: Reduced<T>,

    /// Reduced y-values and their uncertainties
    pub y: Reduced<T>,

    /// Least-squares fit through the reduced values
    pub fit: LinearFit<T>,

    /// Worst-fit line under the graph's policy
    pub worst: Line<T>,
}

/// Paired measurements to be drawn with a best-fit and worst-fit line.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<T: Value = f64> {
    x: Series<T>,
    y: Series<T>,
    x_error: Uncertainty<T>,
    y_error: Uncertainty<T>,
    options: GraphOptions,
}
impl<T: Value> Graph<T> {
    /// Creates a graph of `y` against `x`, with no error bars and default options.
    ///
    /// Either series may hold repeated readings, see [`Series`].
    pub fn new(x: impl Into<Series<T>>, y: impl Into<Series<T>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            x_error: Uncertainty::None,
            y_error: Uncertainty::None,
            options: GraphOptions::default(),
        }
    }

    /// Sets the x uncertainty.
    ///
    /// For repeated readings this is a floor under the half-range.
    #[must_use]
    pub fn with_x_error(mut self, error: impl Into<Uncertainty<T>>) -> Self {
        self.x_error = error.into();
        self
    }

    /// Sets the y uncertainty.
    ///
    /// For repeated readings this is a floor under the half-range.
    #[must_use]
    pub fn with_y_error(mut self, error: impl Into<Uncertainty<T>>) -> Self {
        self.y_error = error.into();
        self
    }

    /// Replaces the presentation options
    #[must_use]
    pub fn with_options(mut self, options: GraphOptions) -> Self {
        self.options = options;
        self
    }

    /// The presentation options
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Mutable access to the presentation options
    pub fn options_mut(&mut self) -> &mut GraphOptions {
        &mut self.options
    }

    /// Reduces the measurements and fits a line through them.
    ///
    /// # Errors
    /// - [`Error::LengthMismatch`] if `x` and `y` have different lengths.
    /// - Any error from [`Series::reduce`] or [`LinearFit::new`].
    pub fn analyse(&self) -> Result<Analysis<T>> {
        if self.x.len() != self.y.len() {
            return Err(Error::LengthMismatch {
                what: "y",
                expected: self.x.len(),
                found: self.y.len(),
            });
        }

        let x = self.x.reduce(&self.x_error)?;
        let y = self.y.reduce(&self.y_error)?;

        for (axis, reduced) in [("x", &x), ("y", &y)] {
            if let Some(errors) = &reduced.uncertainty {
                if errors.iter().all(|e| *e == T::zero()) {
                    tracing::warn!(axis, "every uncertainty is zero; error bars will not show");
                }
            }
        }

        let fit = LinearFit::new(&x.values, &y.values)?;
        let worst = fit.worst_line(self.options.worst_fit_policy);

        Ok(Analysis { x, y, fit, worst })
    }

    /// Builds the renderable description of the graph.
    ///
    /// Both lines span the whole x-axis. The axes are sized from the reduced
    /// data, see [`axis_range`].
    ///
    /// # Errors
    /// - Any error from [`Graph::analyse`].
    /// - [`Error::InvalidFigures`] if `accuracy` is not positive.
    /// - [`Error::InvalidPadding`] if `axis_padding` is below 1 or not finite.
    pub fn scene(&self) -> Result<Scene<T>> {
        let options = &self.options;

        // Padding below 1 would crop the data off the axes
        if !options.axis_padding.is_finite() || options.axis_padding < 1.0 {
            return Err(Error::InvalidPadding(options.axis_padding));
        }

        let analysis = self.analyse()?;
        let padding = T::try_cast(options.axis_padding)?;

        let x_range = axis_range(analysis.x.values.iter().copied(), padding, options.force_origin)
            .ok_or(Error::TooFewPoints(0))?;
        let y_range = axis_range(analysis.y.values.iter().copied(), padding, options.force_origin)
            .ok_or(Error::TooFewPoints(0))?;

        let points = (0..analysis.x.values.len())
            .map(|i| Point {
                x: analysis.x.values[i],
                y: analysis.y.values[i],
                x_error: analysis.x.uncertainty.as_ref().map(|e| e[i]),
                y_error: analysis.y.uncertainty.as_ref().map(|e| e[i]),
            })
            .collect();

        let mut lines = vec![(LineKind::Best, analysis.fit.best_line())];
        if options.show_worst_fit {
            lines.push((LineKind::Worst, analysis.worst));
        }

        let lines = lines
            .into_iter()
            .map(|(kind, line)| {
                Ok(Segment {
                    kind,
                    label: display::format_line_label(kind.name(), &line, options.accuracy)?,
                    line,
                    points: line.segment(x_range.start, x_range.end),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::trace!(
            points = analysis.x.values.len(),
            lines = lines.len(),
            "built scene"
        );

        Ok(Scene {
            title: options.title.clone(),
            x_label: options.x_label.clone(),
            y_label: options.y_label.clone(),
            x_range,
            y_range,
            points,
            gridlines: Gridlines::default(),
            lines,
            size: options.size,
        })
    }

    /// Renders the graph to a PNG file.
    ///
    /// # Errors
    /// Returns an error if the data cannot be fitted, or the image cannot be drawn.
    #[cfg(feature = "plotting")]
    pub fn render(
        &self,
        path: &std::path::Path,
    ) -> std::result::Result<(), crate::plotting::plotters::Error> {
        let scene = self.scene()?;
        crate::plotting::render(path, &scene)
    }
}
