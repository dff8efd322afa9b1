use std::fmt::Display;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::canvas::{Canvas, Marker, Series, SeriesStyle};
use super::figure::Figure;
use super::RenderError;

const MARKER_SIZE: i32 = 4;
// Points per dash (and per gap) when drawing a dashed polyline.
const DASH_POINTS: usize = 3;

pub(super) fn backend_error<E: Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

/// Draws every panel of `figure` onto `root`, filling the grid row by row.
pub(super) fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(backend_error)?;
    let cells = root.split_evenly(figure.layout());
    for (area, canvas) in cells.iter().zip(figure.panels()) {
        draw_canvas(area, canvas)?;
    }
    Ok(())
}

fn draw_canvas<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
) -> Result<(), RenderError> {
    let (x_range, y_range) = canvas.axis_ranges();
    let mut chart = ChartBuilder::on(area)
        .caption(canvas.title(), ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(45)
        .build_cartesian_2d(x_range, y_range)
        .map_err(backend_error)?;

    chart
        .configure_mesh()
        .x_desc(canvas.x_label())
        .y_desc(canvas.y_label())
        .draw()
        .map_err(backend_error)?;

    for series in canvas.series() {
        let color = series.style.color();
        let points = finite_points(series);
        let anno = match series.style {
            SeriesStyle::Markers { marker, .. } => {
                let style = color.filled();
                match marker {
                    Marker::Circle => chart.draw_series(
                        points.iter().map(|&p| Circle::new(p, MARKER_SIZE, style)),
                    ),
                    Marker::Triangle => chart.draw_series(
                        points.iter().map(|&p| TriangleMarker::new(p, MARKER_SIZE + 1, style)),
                    ),
                    Marker::Cross => chart.draw_series(
                        points
                            .iter()
                            .map(|&p| Cross::new(p, MARKER_SIZE, color.stroke_width(2))),
                    ),
                }
            }
            SeriesStyle::Line { dashed: false, .. } => {
                chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            }
            SeriesStyle::Line { dashed: true, .. } => chart.draw_series(
                dashes(&points)
                    .into_iter()
                    .map(|dash| PathElement::new(dash, color.stroke_width(2))),
            ),
        }
        .map_err(backend_error)?;

        if let Some(label) = &series.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], color.stroke_width(2)));
        }
    }

    if canvas.series().iter().any(|s| s.label.is_some()) {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(backend_error)?;
    }
    Ok(())
}

fn finite_points(series: &Series) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

/// Splits a polyline into alternating drawn pieces of `DASH_POINTS` points.
fn dashes(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 {
        return Vec::new();
    }
    let segments = points.len() - 1;
    (0..segments)
        .step_by(2 * DASH_POINTS)
        .map(|start| {
            let end = (start + DASH_POINTS).min(segments);
            points[start..=end].to_vec()
        })
        .collect()
}
