use std::ops::Range;

use ml4ms_helpers::line;
use ndarray::ArrayView1;
use plotters::style::RGBColor;

use super::RenderError;
use crate::Ml4msError;

/// Colors assigned to successive overlays.
pub const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Triangle,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesStyle {
    /// One marker per point.
    Markers { marker: Marker, color: RGBColor },
    /// Points joined in order.
    Line { dashed: bool, color: RGBColor },
}

impl SeriesStyle {
    pub fn color(&self) -> RGBColor {
        match *self {
            SeriesStyle::Markers { color, .. } | SeriesStyle::Line { color, .. } => color,
        }
    }
}

/// One overlay on a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
    pub label: Option<String>,
}

/// A single set of axes and the overlays drawn on them, in drawing order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Canvas {
    title: String,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
}

impl Canvas {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series: Vec::new(),
        }
    }

    pub fn with_axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Appends an overlay built from parallel x and y sequences.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::LengthMismatch` if `xs` and `ys` differ in length.
    pub fn plot(
        mut self,
        xs: ArrayView1<f64>,
        ys: ArrayView1<f64>,
        style: SeriesStyle,
    ) -> Result<Self, RenderError> {
        if xs.len() != ys.len() {
            return Err(RenderError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let points = xs.iter().copied().zip(ys.iter().copied()).collect();
        self.series.push(Series {
            points,
            style,
            label: None,
        });
        Ok(self)
    }

    /// Markers at `(xs[i], ys[i])`.
    pub fn scatter(
        self,
        xs: ArrayView1<f64>,
        ys: ArrayView1<f64>,
        marker: Marker,
        color: RGBColor,
    ) -> Result<Self, RenderError> {
        self.plot(xs, ys, SeriesStyle::Markers { marker, color })
    }

    /// A connected line through `points`, in the order given.
    pub fn line(mut self, points: Vec<(f64, f64)>, dashed: bool, color: RGBColor) -> Self {
        self.series.push(Series {
            points,
            style: SeriesStyle::Line { dashed, color },
            label: None,
        });
        self
    }

    /// Sets the legend label of the most recently added overlay.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        if let Some(last) = self.series.last_mut() {
            last.label = Some(label.into());
        }
        self
    }

    /// Next palette color, cycling once every color has been used.
    pub fn next_color(&self) -> RGBColor {
        PALETTE[self.series.len() % PALETTE.len()]
    }

    /// Axis ranges covering every finite point, padded by 5%.
    ///
    /// A degenerate range is widened by one unit on each side and an empty
    /// canvas gets the unit square.
    pub fn axis_ranges(&self) -> (Range<f64>, Range<f64>) {
        let finite = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for &(x, y) in finite {
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }

        match bounds {
            None => (0.0..1.0, 0.0..1.0),
            Some((x0, x1, y0, y1)) => (padded(x0, x1), padded(y0, y1)),
        }
    }
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    if hi - lo <= f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}

/// Draws the dashed line `y = slope * x + intercept` across the range of `x`.
///
/// # Errors
///
/// Returns an input error if `x` is empty.
pub fn sloping_line(
    canvas: Canvas,
    x: ArrayView1<f64>,
    slope: f64,
    intercept: f64,
) -> Result<Canvas, Ml4msError> {
    let points = line::sloping_line(x, slope, intercept)?;
    let color = canvas.next_color();
    Ok(canvas.line(points, true, color))
}
