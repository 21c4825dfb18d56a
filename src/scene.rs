//! Renderable description of a graph
//!
//! A [`Scene`] is everything a renderer needs to draw one graph: the axes,
//! the measured points with their error bars, and the fitted lines. It holds
//! no drawing state of its own, so it can be inspected in tests or handed to
//! any `PlotBackend` (with the `plotting` feature).
use std::ops::Range;

use crate::{fit::Line, value::Value};

/// A measured point, with optional error bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T: Value = f64> {
    /// Reduced x-value
    pub x: T,

    /// Reduced y-value
    pub y: T,

    /// Half-width of the horizontal error bar
    pub x_error: Option<T>,

    /// Half-height of the vertical error bar
    pub y_error: Option<T>,
}

/// Which fitted line a segment shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The least-squares line, drawn in black.
    Best,

    /// The worst-fit line, drawn in red.
    Worst,
}
impl LineKind {
    /// Name used in the legend
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LineKind::Best => "Best",
            LineKind::Worst => "Worst",
        }
    }

    /// RGB color for the line
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            LineKind::Best => (0, 0, 0),
            LineKind::Worst => (255, 0, 0),
        }
    }
}

/// A straight line clipped to the x-axis, with its legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<T: Value = f64> {
    /// Which line this is
    pub kind: LineKind,

    /// Legend label, e.g. `"Best m = 2.80"`
    pub label: String,

    /// The full line
    pub line: Line<T>,

    /// Endpoints to draw between
    pub points: [(T, T); 2],
}

/// Which gridlines to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gridlines {
    /// Gridlines at each labelled tick
    pub major: bool,

    /// Fainter gridlines between the major ones
    pub minor: bool,
}
impl Default for Gridlines {
    fn default() -> Self {
        Self {
            major: true,
            minor: true,
        }
    }
}

/// Everything needed to draw one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<T: Value = f64> {
    /// Caption above the graph
    pub title: String,

    /// Description under the x-axis
    pub x_label: String,

    /// Description beside the y-axis
    pub y_label: String,

    /// Visible x-axis range
    pub x_range: Range<T>,

    /// Visible y-axis range
    pub y_range: Range<T>,

    /// Measured points
    pub points: Vec<Point<T>>,

    /// Gridlines to draw
    pub gridlines: Gridlines,

    /// Fitted lines, best first
    pub lines: Vec<Segment<T>>,

    /// Output size in pixels
    pub size: (u32, u32),
}
impl<T: Value> Scene<T> {
    /// The segment of the given kind, if the scene has one
    pub fn line(&self, kind: LineKind) -> Option<&Segment<T>> {
        self.lines.iter().find(|segment| segment.kind == kind)
    }

    /// True if any point carries an error bar
    pub fn has_error_bars(&self) -> bool {
        self.points
            .iter()
            .any(|p| p.x_error.is_some() || p.y_error.is_some())
    }
}

/// Visible range for one axis.
///
/// - `force_origin`: `[min(0, min·k), max(0, max·k)]`, so the origin is always
///   on the axis. Positive data gives `[0, max·k]`.
/// - Otherwise the data span, widened by `(k - 1)·span` on each side.
///
/// `padding` is expected to be at least 1; [`crate::Graph::scene`] rejects
/// anything smaller.
///
/// A range that would be empty is widened to `[0, 1]` when it sits on the
/// origin, or by one unit either side otherwise.
///
/// # Example
/// ```
/// # use labfit::scene::axis_range;
/// let range = axis_range([0.5_f64, 1.0], 1.1, true).unwrap();
/// assert_eq!(range.start, 0.0);
/// assert!((range.end - 1.1).abs() < 1e-12);
/// ```
pub fn axis_range<T: Value>(
    values: impl IntoIterator<Item = T>,
    padding: T,
    force_origin: bool,
) -> Option<Range<T>> {
    let (min, max) = crate::value::min_max(values)?;

    let (start, end) = if force_origin {
        (
            Value::min_of(T::zero(), min * padding),
            Value::max_of(T::zero(), max * padding),
        )
    } else {
        let pad = (padding - T::one()) * (max - min);
        (min - pad, max + pad)
    };

    if start < end {
        Some(start..end)
    } else if start == T::zero() {
        Some(T::zero()..T::one())
    } else {
        Some(start - T::one()..end + T::one())
    }
}
