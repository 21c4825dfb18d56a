//! # Labfit
//! ## Graphs for required practicals, with the uncertainty worked out
//!
//! Plotting a straight line through lab data is the easy part. The gradient is
//! what you actually want, along with how far off it might be, and that means
//! error bars, a line of best fit, and a line of worst fit.
//!
//! I provide a set of tools designed to help you:
//! - Average repeated readings, and turn their spread into an uncertainty
//! - Fit a least-squares line, with standard errors for the gradient and intercept
//! - Derive a worst-fit line from those errors
//! - Round results to a sensible number of significant figures
//! - Draw the lot as a PNG (`plotting` feature)
//!
//! The simplest use-case is a graph straight from your results table:
//! ```rust
//! use labfit::{Graph, GraphOptions};
//!
//! let graph = Graph::new(vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5], vec![3.0, 2.5, 2.5, 2.3, 1.8, 1.5])
//!     .with_y_error(0.3)
//!     .with_options(GraphOptions {
//!         title: "Young's double slit data".into(),
//!         x_label: "Displacement / m".into(),
//!         y_label: "Fringe spacing / mm".into(),
//!         ..Default::default()
//!     });
//!
//! let analysis = graph.analyse().unwrap();
//! assert!(analysis.worst.slope > analysis.fit.slope());
//! ```
//!
//! # Core Concepts
//! - A [`measurement::Series`] is the readings for one axis.
//!     - Either one reading per point, or a group of repeats per point.
//!     - Repeats are reduced to their mean, with the half-range as the uncertainty.
//! - A [`LinearFit`] is the least-squares line through the reduced points.
//!     - Its standard errors come from the covariance of the fitted parameters.
//!     - With only two points there is nothing left to estimate them from, so they are zero.
//! - The **worst-fit line** shifts the gradient up and the intercept down by one
//!   standard error each. See [`fit::WorstFitPolicy`].
//! - A [`Graph`] puts these together, and describes the result as a [`scene::Scene`].
//!
//! # Implementation Details
//!
//! This crate makes use of the `nalgebra` library for linear algebra operations,
//! and `plotters` to draw graphs.
//!
//! Diagnostics are emitted as `tracing` events; the `labfit` binary prints them
//! according to `RUST_LOG`.
//!
//! # Testing utilities
//!
//! This crate includes a few assertions for checking numeric output. See [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod test;

#[cfg(feature = "plotting")]
#[cfg_attr(docsrs, doc(cfg(feature = "plotting")))]
pub mod plotting;

pub mod display;
pub mod error;
pub mod experiment;
pub mod fit;
pub mod graph;
pub mod measurement;
pub mod scene;
pub mod statistics;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use fit::{LinearFit, WorstFitPolicy};
pub use graph::{Graph, GraphOptions};

pub use nalgebra;
