//! Shared line-chart rendering
//!
//! Every figure in this crate is a set of labelled curves on shared axes,
//! optionally with text annotations, on linear or log-log axes. This module
//! turns prepared [`Curve`]s into an image; the public renderers only
//! extract data and pick styles.

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::{debug, warn};

use super::config::PlotConfig;
use crate::error::{PostError, Result};

/// How a curve is stroked
#[derive(Debug, Clone, Copy)]
pub(crate) struct CurveStyle {
    pub color: RGBAColor,
    pub width: u32,
    pub dashed: bool,
    pub markers: bool,
}

impl CurveStyle {
    pub fn solid(color: RGBColor, width: u32) -> Self {
        Self {
            color: color.mix(1.0),
            width,
            dashed: false,
            markers: false,
        }
    }

    pub fn dashed(color: RGBColor, width: u32, alpha: f64) -> Self {
        Self {
            color: color.mix(alpha),
            width,
            dashed: true,
            markers: false,
        }
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }
}

/// One polyline with an optional legend entry
#[derive(Debug, Clone)]
pub(crate) struct Curve {
    pub points: Vec<(f64, f64)>,
    pub label: Option<String>,
    pub style: CurveStyle,
}

impl Curve {
    /// Pair abscissae and ordinates, dropping non-finite points
    pub fn new(xs: &[f64], ys: &[f64], label: Option<String>, style: CurveStyle) -> Self {
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (*x, *y))
            .collect();

        let dropped = xs.len().min(ys.len()) - points.len();
        if dropped > 0 {
            warn!(
                label = label.as_deref().unwrap_or("<unlabelled>"),
                dropped, "non-finite points skipped"
            );
        }

        Self {
            points,
            label,
            style,
        }
    }

    /// Copy keeping only points that can be placed on log-log axes
    fn positive_only(&self) -> Self {
        let points: Vec<(f64, f64)> = self
            .points
            .iter()
            .copied()
            .filter(|&(x, y)| x > 0.0 && y > 0.0)
            .collect();

        if points.len() < self.points.len() {
            debug!(
                label = self.label.as_deref().unwrap_or("<unlabelled>"),
                dropped = self.points.len() - points.len(),
                "non-positive points skipped on log axes"
            );
        }

        Self {
            points,
            label: self.label.clone(),
            style: self.style,
        }
    }
}

/// Text placed at data coordinates
#[derive(Debug, Clone)]
pub(crate) struct Annotation {
    pub text: String,
    pub at: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scale {
    Linear,
    LogLog,
}

/// Backend selected by the output extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImageFormat {
    Svg,
    /// Encoder picked by the bitmap backend from the extension
    Bitmap,
}

impl ImageFormat {
    pub const EXTENSIONS: [&'static str; 5] = ["svg", "png", "jpg", "jpeg", "bmp"];

    /// Case-insensitive; `None` for anything plotters cannot encode
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(ImageFormat::Svg),
            "png" | "jpg" | "jpeg" | "bmp" => Some(ImageFormat::Bitmap),
            _ => None,
        }
    }
}

/// Render curves to `output_path`, choosing the backend by extension
///
/// See [`ImageFormat::EXTENSIONS`]. Other extensions fail with
/// [`PostError::Render`] before anything is written.
pub(crate) fn render(
    output_path: &Path,
    curves: &[Curve],
    annotations: &[Annotation],
    config: &PlotConfig,
    scale: Scale,
) -> Result<()> {
    let positive: Vec<Curve>;
    let curves = match scale {
        Scale::Linear => curves,
        Scale::LogLog => {
            positive = curves.iter().map(Curve::positive_only).collect();
            &positive
        }
    };

    let format = output_path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| PostError::Render {
            path: output_path.to_path_buf(),
            message: format!(
                "unsupported image extension, expected one of {}",
                ImageFormat::EXTENSIONS.join(", ")
            ),
        })?;

    if curves.iter().all(|c| c.points.is_empty()) {
        return Err(PostError::InvalidData(format!(
            "nothing to plot in '{}': every curve is empty",
            output_path.display()
        )));
    }

    let x_range = match config.x_range {
        Some(range) => range,
        None => fit_range(curves, |p| p.0, scale)?,
    };
    let y_range = match config.y_range {
        Some(range) => range,
        None => fit_range(curves, |p| p.1, scale)?,
    };

    debug!(
        path = %output_path.display(),
        curves = curves.len(),
        ?x_range,
        ?y_range,
        "rendering"
    );

    let size = (config.width, config.height);
    let drawn = match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_on_area(&root, curves, annotations, config, scale, x_range, y_range)
        }
        ImageFormat::Bitmap => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_on_area(&root, curves, annotations, config, scale, x_range, y_range)
        }
    };

    drawn.map_err(|e| PostError::Render {
        path: output_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Data extent along one coordinate with a small margin
///
/// Log axes only consider strictly positive values.
fn fit_range(
    curves: &[Curve],
    coord: impl Fn(&(f64, f64)) -> f64,
    scale: Scale,
) -> Result<(f64, f64)> {
    let values = curves
        .iter()
        .flat_map(|c| c.points.iter())
        .map(coord)
        .filter(|v| scale == Scale::Linear || *v > 0.0);

    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !lo.is_finite() || !hi.is_finite() {
        return Err(PostError::InvalidData(
            "no positive values to place on a logarithmic axis".to_string(),
        ));
    }

    Ok(match scale {
        Scale::LogLog => (lo / 1.5, hi * 1.5),
        Scale::Linear => {
            let span = (hi - lo).max(1e-10);
            (lo - 0.05 * span, hi + 0.05 * span)
        }
    })
}

fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    curves: &[Curve],
    annotations: &[Annotation],
    config: &PlotConfig,
    scale: Scale,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&config.background)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(15).x_label_area_size(50).y_label_area_size(70);
    if !config.title.is_empty() {
        builder.caption(&config.title, ("sans-serif", 32).into_font());
    }

    match scale {
        Scale::Linear => {
            let mut chart =
                builder.build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

            let mut mesh = chart.configure_mesh();
            mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);
            if let Some(n) = config.x_label_count() {
                mesh.x_labels(n);
            }
            if !config.show_grid {
                mesh.disable_mesh();
            }
            mesh.draw()?;

            draw_curves(&mut chart, curves)?;

            chart.draw_series(annotations.iter().map(|a| {
                Text::new(a.text.clone(), a.at, ("sans-serif", 20).into_font())
            }))?;

            finish_legend(&mut chart, curves, config)?;
        }
        Scale::LogLog => {
            let mut chart = builder.build_cartesian_2d(
                (x_range.0..x_range.1).log_scale(),
                (y_range.0..y_range.1).log_scale(),
            )?;

            let exponent = |y: &f64| format!("{:.0e}", y);
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(&config.xlabel)
                .y_desc(&config.ylabel)
                .y_label_formatter(&exponent);
            if !config.show_grid {
                mesh.disable_mesh();
            }
            mesh.draw()?;

            draw_curves(&mut chart, curves)?;
            finish_legend(&mut chart, curves, config)?;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_curves<DB, X, Y>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    curves: &[Curve],
) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    for curve in curves.iter().filter(|c| !c.points.is_empty()) {
        let style = curve.style.color.stroke_width(curve.style.width);

        let anno = if curve.style.dashed {
            chart.draw_series(DashedLineSeries::new(
                curve.points.iter().copied(),
                12,
                6,
                style,
            ))?
        } else {
            chart.draw_series(LineSeries::new(curve.points.iter().copied(), style))?
        };

        if let Some(label) = &curve.label {
            let legend_style = style;
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], legend_style)
            });
        }

        if curve.style.markers {
            let fill = curve.style.color.filled();
            chart.draw_series(
                curve
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, 5, fill)),
            )?;
            chart.draw_series(
                curve
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, 5, BLACK.stroke_width(1))),
            )?;
        }
    }
    Ok(())
}

fn finish_legend<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    curves: &[Curve],
    config: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    if curves.iter().any(|c| c.label.is_some()) {
        chart
            .configure_series_labels()
            .position(config.legend_position.to_series_label_position())
            .background_style(config.background.mix(config.legend_alpha))
            .border_style(BLACK.mix(config.legend_alpha))
            .draw()?;
    }
    Ok(())
}
