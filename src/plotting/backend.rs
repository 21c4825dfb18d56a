use std::ops::Range;

use crate::{
    scene::{Gridlines, LineKind, Point, Scene},
    value::Value,
};

pub mod plotters;

/// Trait for plot backends
pub trait PlotBackend {
    /// Error type for the plot backend
    type Error: std::error::Error;

    /// Root type for the plot backend
    type Root;

    /// Color type for the plot backend
    type Color: Clone;

    /// Color used to draw a fitted line
    fn line_color(kind: LineKind) -> Self::Color;

    /// Create a new plot with the given title and ranges on the given root
    ///
    /// # Errors
    /// Returns an error if the plot cannot be created.
    fn new_plot<T: Value>(
        root: &Self::Root,
        title: &str,
        x_label: &str,
        y_label: &str,
        x_range: Range<T>,
        y_range: Range<T>,
        gridlines: Gridlines,
    ) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Add measured points, with their error bars, to the plot
    ///
    /// # Errors
    /// Returns an error if the plot cannot be modified.
    fn add_points<T: Value>(&mut self, points: &[Point<T>]) -> Result<(), Self::Error>;

    /// Add a labelled line to the plot
    ///
    /// # Errors
    /// Returns an error if the plot cannot be modified.
    fn add_line<T: Value>(
        &mut self,
        data: &[(T, T)],
        label: &str,
        width: u32,
        color: Self::Color,
    ) -> Result<(), Self::Error>;

    /// Finalize the plot
    ///
    /// # Errors
    /// Returns an error if the plot cannot be written.
    fn finalize(self) -> Result<(), Self::Error>;

    /// Draw a whole scene onto the given root
    ///
    /// Points go first so the lines are drawn over their error bars.
    ///
    /// # Errors
    /// Returns an error if the plot cannot be created.
    fn draw_scene<T: Value>(root: &Self::Root, scene: &Scene<T>) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        let mut plot = Self::new_plot(
            root,
            &scene.title,
            &scene.x_label,
            &scene.y_label,
            scene.x_range.clone(),
            scene.y_range.clone(),
            scene.gridlines,
        )?;

        plot.add_points(&scene.points)?;
        for segment in &scene.lines {
            plot.add_line(&segment.points, &segment.label, 1, Self::line_color(segment.kind))?;
        }

        plot.finalize()
    }
}
