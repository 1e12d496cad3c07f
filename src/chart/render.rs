//! PNG rendering of a [`ChartSpec`] with the [`plotters`] bitmap backend.

use std::fmt::Display;
use std::path::Path;

use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use thiserror::Error;

use super::model::{ChartSpec, LineStyle, Marker, Scale};
use crate::color;

/// Errors that can occur while drawing a chart.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{0}: no points to plot")]
    NoData(&'static str),

    #[error("{0}: axis range is not finite")]
    NonFinite(&'static str),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
}

type Result<T> = core::result::Result<T, RenderError>;

fn drawing(e: impl Display) -> RenderError {
    RenderError::Drawing(e.to_string())
}

fn config(e: impl Display) -> RenderError {
    RenderError::ChartConfig(e.to_string())
}

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// Draw `spec` and write it as a PNG of `size` pixels to `path`.
pub fn render_png(spec: &ChartSpec, path: &Path, size: (u32, u32)) -> Result<()> {
    let ((x_min, x_max), (y_min, y_max)) =
        spec.bounds().ok_or(RenderError::NoData(spec.file_name))?;
    if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
        return Err(RenderError::NonFinite(spec.file_name));
    }
    let (y_lo, y_hi) = pad_linear(y_min, y_max);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .caption(&spec.title, ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80);

    match spec.x_scale {
        Scale::Log => {
            let (x_lo, x_hi) = pad_log(x_min, x_max);
            let mut chart = builder
                .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)
                .map_err(config)?;
            draw_chart(&mut chart, spec, (x_lo, x_hi))?;
        }
        Scale::Linear => {
            let (x_lo, x_hi) = pad_linear(x_min, x_max);
            let mut chart = builder
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
                .map_err(config)?;
            draw_chart(&mut chart, spec, (x_lo, x_hi))?;
        }
    }

    root.present().map_err(drawing)?;
    Ok(())
}

/// Mesh, series, markers, reference line and legend, for either X scale.
fn draw_chart<'a, X>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, RangedCoordf64>>,
    spec: &ChartSpec,
    (x_lo, x_hi): (f64, f64),
) -> Result<()>
where
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 14))
        .bold_line_style(&BLACK.mix(0.2))
        .light_line_style(&BLACK.mix(0.05))
        .x_label_formatter(&|x| format_tick(*x))
        .draw()
        .map_err(drawing)?;

    for series in &spec.series {
        let rgb = color::named(series.color);
        let style = rgb.stroke_width(2);
        let points = series.points.iter().copied();

        let anno = match series.line {
            LineStyle::Solid => chart.draw_series(LineSeries::new(points.clone(), style)),
            LineStyle::Dashed => {
                chart.draw_series(DashedLineSeries::new(points.clone(), 10, 6, style))
            }
            LineStyle::Dotted => {
                chart.draw_series(DashedLineSeries::new(points.clone(), 2, 4, style))
            }
        }
        .map_err(drawing)?;
        anno.label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

        let filled = rgb.filled();
        match series.marker {
            Marker::None => {}
            Marker::Circle => {
                chart
                    .draw_series(points.map(|c| Circle::new(c, 5, filled)))
                    .map_err(drawing)?;
            }
            Marker::Square => {
                chart
                    .draw_series(points.map(|c| {
                        EmptyElement::at(c) + Rectangle::new([(-4, -4), (4, 4)], filled)
                    }))
                    .map_err(drawing)?;
            }
            Marker::TriangleUp => {
                chart
                    .draw_series(points.map(|c| TriangleMarker::new(c, 6, filled)))
                    .map_err(drawing)?;
            }
            Marker::TriangleDown => {
                chart
                    .draw_series(points.map(|c| {
                        EmptyElement::at(c) + Polygon::new(vec![(-6, -4), (6, -4), (0, 6)], filled)
                    }))
                    .map_err(drawing)?;
            }
        }
    }

    if let Some(reference) = &spec.reference {
        let style = color::named(reference.color).stroke_width(1);
        chart
            .draw_series(DashedLineSeries::new(
                vec![(x_lo, reference.y), (x_hi, reference.y)],
                8,
                5,
                style,
            ))
            .map_err(drawing)?
            .label(reference.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 15))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(drawing)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Axis ranges
// ---------------------------------------------------------------------------

/// Widen `[lo, hi]` by [`AXIS_MARGIN`] of its span on each side.
fn pad_linear(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= 0.0 {
        let half = if lo == 0.0 { 1.0 } else { lo.abs() * 0.5 };
        return (lo - half, hi + half);
    }
    (lo - span * AXIS_MARGIN, hi + span * AXIS_MARGIN)
}

/// Same as [`pad_linear`] in log space. The lower bound is kept at or above
/// 1 so a log axis never sees zero.
fn pad_log(lo: f64, hi: f64) -> (f64, f64) {
    let lo = lo.max(1.0);
    let hi = hi.max(lo);
    if hi <= lo {
        return (lo / 2.0, hi * 2.0);
    }
    let factor = (hi / lo).powf(AXIS_MARGIN);
    (lo / factor, hi * factor)
}

fn format_tick(v: f64) -> String {
    if v.abs() >= 1.0 || v == 0.0 {
        format!("{:.0}", v.round())
    } else {
        format!("{v:.2}")
    }
}
