//! Experiment files
//!
//! An [`Experiment`] is the data for one graph, as read from disk:
//! - **JSON**: an object with `x` and `y`, plus optional uncertainties and
//!   presentation options. Either axis may hold repeated readings.
//! - **CSV**: columns `x, y[, x_error[, y_error]]`, with an optional header row.
//!
//! ```rust
//! use labfit::experiment::Experiment;
//!
//! let experiment = Experiment::from_json(r#"{
//!     "x": [1.0, 2.0, 3.0],
//!     "y": [[2.0, 2.2], [3.9, 4.1], [6.1, 5.9]],
//!     "y_error": 0.05,
//!     "title": "Extension against load"
//! }"#).unwrap();
//!
//! let scene = experiment.into_graph().scene().unwrap();
//! assert_eq!(scene.title, "Extension against load");
//! ```
use std::path::Path;

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    graph::{Graph, GraphOptions},
    measurement::{Series, Uncertainty},
};

/// Data and presentation options for one graph.
///
/// Every field except `x` and `y` is optional; missing options take the
/// [`GraphOptions`] defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experiment {
    /// Independent variable
    pub x: Series,

    /// Dependent variable
    pub y: Series,

    /// Uncertainty in `x`, or a floor for repeated readings
    #[serde(default)]
    pub x_error: Uncertainty,

    /// Uncertainty in `y`, or a floor for repeated readings
    #[serde(default)]
    pub y_error: Uncertainty,

    /// Caption above the graph
    #[serde(default)]
    pub title: Option<String>,

    /// Description under the x-axis
    #[serde(default)]
    pub x_label: Option<String>,

    /// Description beside the y-axis
    #[serde(default)]
    pub y_label: Option<String>,

    /// Start both axes at zero
    #[serde(default)]
    pub force_origin: Option<bool>,

    /// Draw the worst-fit line
    #[serde(default)]
    pub show_worst_fit: Option<bool>,

    /// Significant figures in the legend labels
    #[serde(default)]
    pub accuracy: Option<i32>,
}
impl Experiment {
    /// Loads an experiment from a `.json` or `.csv` file.
    ///
    /// # Errors
    /// - [`Error::UnsupportedFormat`] for any other extension.
    /// - [`Error::Io`] if the file cannot be read.
    /// - Any error from [`Experiment::from_json`] or [`Experiment::from_csv`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("json") => Self::from_json,
            Some("csv") => Self::from_csv,
            _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
        };

        let contents = std::fs::read_to_string(path)?;
        let experiment = parse(&contents)?;

        tracing::debug!(
            path = %path.display(),
            points = experiment.x.len(),
            "loaded experiment"
        );
        Ok(experiment)
    }

    /// Parses an experiment from JSON.
    ///
    /// # Errors
    /// Returns [`Error::Json`] if the document is malformed or has unknown fields.
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Parses an experiment from CSV.
    ///
    /// Expects 2 to 4 columns, `x, y[, x_error[, y_error]]`, with the same
    /// count on every row. If the first row is not numeric it is treated as a
    /// header and skipped. Blank lines are ignored.
    ///
    /// # Errors
    /// Returns [`Error::Csv`] with the 1-based line number of the first row
    /// that cannot be parsed.
    pub fn from_csv(contents: &str) -> Result<Self> {
        fn parse_line(line: &str) -> Option<Vec<f64>> {
            line.split(',')
                .map(|field| field.trim().parse().ok())
                .collect()
        }

        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut columns = None;

        for (i, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let bad_line = || Error::Csv {
                line: i + 1,
                content: line.to_string(),
            };

            //
            // First row, if we get a parsing error, we assume it's a header and skip it.
            let Some(row) = parse_line(line) else {
                if rows.is_empty() && columns.is_none() {
                    columns = Some(line.split(',').count());
                    continue;
                }
                return Err(bad_line());
            };

            //
            // The rest we are strict.
            let expected = *columns.get_or_insert(row.len());
            if !(2..=4).contains(&row.len()) || row.len() != expected {
                return Err(bad_line());
            }
            rows.push(row);
        }

        let column = |j: usize| -> Option<Vec<f64>> {
            (columns? > j).then(|| rows.iter().map(|row| row[j]).collect())
        };

        let x = column(0).unwrap_or_default();
        let y = column(1).unwrap_or_default();
        Ok(Self {
            x: Series::Scalar(x),
            y: Series::Scalar(y),
            x_error: column(2).map_or(Uncertainty::None, Uncertainty::PerPoint),
            y_error: column(3).map_or(Uncertainty::None, Uncertainty::PerPoint),
            title: None,
            x_label: None,
            y_label: None,
            force_origin: None,
            show_worst_fit: None,
            accuracy: None,
        })
    }

    /// The fringe spacing measurements from a Young's double slit practical.
    #[must_use]
    pub fn young_double_slit() -> Self {
        Self {
            x: Series::Scalar(vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5]),
            y: Series::Scalar(vec![3.0, 2.5, 2.5, 2.3, 1.8, 1.5]),
            x_error: Uncertainty::None,
            y_error: Uncertainty::Uniform(0.3),
            title: Some("Young's double slit data".into()),
            x_label: Some("Displacement / m".into()),
            y_label: Some("Fringe spacing / mm".into()),
            force_origin: None,
            show_worst_fit: None,
            accuracy: None,
        }
    }

    /// Presentation options, with the defaults filled in
    #[must_use]
    pub fn options(&self) -> GraphOptions {
        let defaults = GraphOptions::default();
        GraphOptions {
            title: self.title.clone().unwrap_or(defaults.title),
            x_label: self.x_label.clone().unwrap_or(defaults.x_label),
            y_label: self.y_label.clone().unwrap_or(defaults.y_label),
            force_origin: self.force_origin.unwrap_or(defaults.force_origin),
            show_worst_fit: self.show_worst_fit.unwrap_or(defaults.show_worst_fit),
            accuracy: self.accuracy.unwrap_or(defaults.accuracy),
            ..defaults
        }
    }

    /// Turns the experiment into a graph
    #[must_use]
    pub fn into_graph(self) -> Graph {
        let options = self.options();
        Graph::new(self.x, self.y)
            .with_x_error(self.x_error)
            .with_y_error(self.y_error)
            .with_options(options)
    }
}
