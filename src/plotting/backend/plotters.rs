//! Plotting backend using the `plotters` crate
//!
//! Everything is coerced to `f64` for plotting purposes.
//!
//! Uses the bitmap backend to create PNG files. Elements are collected as they
//! are added and drawn in one pass by [`PlotBackend::finalize`].
use std::{ops::Range, path::Path};

use plotters::{coord::Shift, prelude::*};

use crate::{
    plotting::PlotBackend,
    scene::{Gridlines, LineKind, Point},
    value::{CoordExt, Value},
};

const MAX_LBL_WIDTH: usize = 120;

/// Pixels either side of an error bar that its caps extend
const CAP_HALF_WIDTH: i32 = 4;

/// A drawing area root for plotters
pub struct Root<'a>(DrawingArea<BitMapBackend<'a>, Shift>);
impl<'a> AsRef<DrawingArea<BitMapBackend<'a>, Shift>> for Root<'a> {
    fn as_ref(&self) -> &DrawingArea<BitMapBackend<'a>, Shift> {
        &self.0
    }
}
impl<'a> Root<'a> {
    /// Create a new drawing area root for plotters
    ///
    /// Will create a PNG file at the given path with the given size
    ///
    /// # Errors
    /// Returns an error if the drawing area cannot be cleared
    pub fn new(path: &'a Path, size: (u32, u32)) -> Result<Self, Error> {
        let backend = BitMapBackend::new(path, size);
        let root = IntoDrawingArea::into_drawing_area(backend);
        root.fill(&WHITE)?;
        Ok(Self(root))
    }
}

/// A labelled line waiting to be drawn
struct PendingLine {
    data: Vec<(f64, f64)>,
    label: String,
    style: ShapeStyle,
}

/// A point and its error bars, in plot coordinates
struct PendingPoint {
    x: f64,
    y: f64,
    x_error: Option<f64>,
    y_error: Option<f64>,
}

/// Plotters backend for plotting
pub struct Backend<'root> {
    area: DrawingArea<BitMapBackend<'root>, Shift>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Range<f64>,
    y_range: Range<f64>,
    gridlines: Gridlines,

    points: Vec<PendingPoint>,
    lines: Vec<PendingLine>,
}
impl<'root> PlotBackend for Backend<'root> {
    type Error = Error;
    type Color = RGBColor;
    type Root = Root<'root>;

    fn line_color(kind: LineKind) -> Self::Color {
        let (r, g, b) = kind.rgb();
        RGBColor(r, g, b)
    }

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
        Self: Sized,
    {
        //
        // T(Range) -> f64(Range)
        let x_range: Range<f64> = cast(x_range.start)?..cast(x_range.end)?;
        let y_range: Range<f64> = cast(y_range.start)?..cast(y_range.end)?;

        Ok(Self {
            area: root.as_ref().clone(),
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_range,
            y_range,
            gridlines,

            points: Vec::new(),
            lines: Vec::new(),
        })
    }

    fn add_points<T: Value>(&mut self, points: &[Point<T>]) -> Result<(), Self::Error> {
        for point in points {
            self.points.push(PendingPoint {
                x: cast(point.x)?,
                y: cast(point.y)?,
                x_error: point.x_error.map(cast).transpose()?,
                y_error: point.y_error.map(cast).transpose()?,
            });
        }
        Ok(())
    }

    fn add_line<T: Value>(
        &mut self,
        data: &[(T, T)],
        label: &str,
        width: u32,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let data = data.as_f64().map_err(|_| Error::Cast)?;

        //
        // Shorten label and add [...] if too long
        let label = if label.len() > MAX_LBL_WIDTH {
            let mut s: String = label.chars().take(MAX_LBL_WIDTH - 3).collect();
            s.push_str("...");
            s
        } else {
            label.to_string()
        };

        let style = ShapeStyle::from(color).stroke_width(width);
        self.lines.push(PendingLine { data, label, style });
        Ok(())
    }

    fn finalize(self) -> Result<(), Self::Error> {
        let mut builder = ChartBuilder::on(&self.area);
        builder
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60);

        if !self.title.is_empty() {
            builder.caption(&self.title, (FontFamily::SansSerif, 18).into_font());
        }

        let mut context = builder.build_cartesian_2d(self.x_range.clone(), self.y_range.clone())?;

        //
        // Mesh and axes
        let mut mesh = context.configure_mesh();
        mesh.label_style((FontFamily::SansSerif, 12))
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .bold_line_style(RGBColor(128, 128, 128).stroke_width(1))
            .light_line_style(RGBColor(211, 211, 211).stroke_width(1));

        match self.gridlines {
            Gridlines { major: false, .. } => {
                mesh.disable_mesh();
            }
            Gridlines { minor: false, .. } => {
                mesh.max_light_lines(0);
            }
            Gridlines { .. } => {}
        }
        mesh.draw()?;

        //
        // Error bars, then markers on top
        // Built from paths, since plotters' own error bar circles the centre point
        let bar_style = ShapeStyle::from(&BLACK).stroke_width(1);
        let mut bars = Vec::new();
        let mut caps = Vec::new();
        for p in &self.points {
            if let Some(e) = p.y_error {
                bars.push(PathElement::new(vec![(p.x, p.y - e), (p.x, p.y + e)], bar_style));
                for y in [p.y - e, p.y + e] {
                    let cap = vec![(-CAP_HALF_WIDTH, 0), (CAP_HALF_WIDTH, 0)];
                    caps.push(EmptyElement::at((p.x, y)) + PathElement::new(cap, bar_style));
                }
            }
            if let Some(e) = p.x_error {
                bars.push(PathElement::new(vec![(p.x - e, p.y), (p.x + e, p.y)], bar_style));
                for x in [p.x - e, p.x + e] {
                    let cap = vec![(0, -CAP_HALF_WIDTH), (0, CAP_HALF_WIDTH)];
                    caps.push(EmptyElement::at((x, p.y)) + PathElement::new(cap, bar_style));
                }
            }
        }
        context.draw_series(bars)?;
        context.draw_series(caps)?;

        let marker_style = ShapeStyle::from(&BLACK).stroke_width(1);
        context
            .draw_series(
                self.points
                    .iter()
                    .map(|p| Cross::new((p.x, p.y), 4, marker_style)),
            )?
            .label("Measurements")
            .legend(move |(x, y)| Cross::new((x + 10, y), 4, marker_style));

        for line in self.lines {
            let style = line.style;
            context
                .draw_series(LineSeries::new(line.data, style))?
                .label(line.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        //
        // Legend
        context
            .configure_series_labels()
            .label_font((FontFamily::SansSerif, 12))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;

        self.area.present()?;
        Ok(())
    }
}

fn cast<T: Value>(value: T) -> Result<f64, Error> {
    f64::try_cast(value).map_err(|_| Error::Cast)
}

/// Error occurring during plotting
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error drawing the plot
    #[error("Error drawing plot: {0}")]
    Draw(#[from] DrawingAreaErrorKind<<BitMapBackend<'static> as DrawingBackend>::ErrorType>),

    /// Error casting a value
    #[error("A value could not be represented as f64")]
    Cast,

    /// The data could not be turned into a scene
    #[error(transparent)]
    Data(#[from] crate::error::Error),
}
