//! All integration schemes against the analytical profile at one time step

use std::path::Path;

use plotters::style::BLACK;
use tracing::{debug, info};

use super::config::{PlotConfig, NO_TITLE};
use super::curves::{render, Annotation, Curve, CurveStyle, Scale};
use crate::analytical::AnalyticalSolution;
use crate::error::{PostError, Result};
use crate::grid::ReshapedField;
use crate::output::number::format_general;
use crate::palette;
use crate::snapshot;

/// Opacity of the numerical curves
const SCHEME_ALPHA: f64 = 0.75;

/// Plot every scheme's profile at grid column `column` with the reference
///
/// Schemes are drawn dashed in palette entries 0, 2, 4, ... in the order
/// given, each against its own `x[:, column]`. The reference (solid black,
/// one pixel wider than the schemes) is evaluated on the first scheme's
/// positions at `time[0, column]`. Two annotations report the snapshot time
/// and `time_step`.
///
/// # Errors
///
/// - [`PostError::InvalidData`] for no schemes or schemes of different shape
/// - [`PostError::IndexOutOfBounds`] if `column` is outside `[0, ny)`
/// - [`PostError::Render`] if the image cannot be written
///
/// # Example
///
/// ```rust,ignore
/// plot_scheme_comparison(
///     &[("explicit euler", &exp), ("implicit euler", &imp), ("crank nicolson", &cni)],
///     0,
///     &AdvectedGaussian::default(),
///     0.001,
///     "case1-solution.svg",
///     None,
/// )?;
/// ```
pub fn plot_scheme_comparison(
    schemes: &[(&str, &ReshapedField)],
    column: usize,
    reference: &dyn AnalyticalSolution,
    time_step: f64,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();

    let default_config = PlotConfig::scheme_comparison(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let (curves, annotations) = comparison_curves(schemes, column, reference, time_step, config)?;

    render(output_path, &curves, &annotations, config, Scale::Linear)?;
    info!(path = %output_path.display(), column, "scheme comparison written");
    Ok(())
}

/// Reference curve first, then one curve per scheme; time and step notes
pub(crate) fn comparison_curves(
    schemes: &[(&str, &ReshapedField)],
    column: usize,
    reference: &dyn AnalyticalSolution,
    time_step: f64,
    config: &PlotConfig,
) -> Result<(Vec<Curve>, Vec<Annotation>)> {
    let (_, first) = schemes.first().ok_or_else(|| {
        PostError::InvalidData("scheme comparison needs at least one scheme".to_string())
    })?;

    if let Some((label, field)) = schemes.iter().find(|(_, f)| f.shape() != first.shape()) {
        return Err(PostError::InvalidData(format!(
            "scheme '{}' has grid {} x {}, expected {} x {}",
            label,
            field.shape().nx,
            field.shape().ny,
            first.shape().nx,
            first.shape().ny
        )));
    }

    let time = snapshot::element(first.time(), 0, column)?;
    let xs = snapshot::column(first.x(), column)?.to_vec();
    let exact = reference.over_space(&xs, time);

    let mut curves = Vec::with_capacity(schemes.len() + 1);
    curves.push(Curve::new(
        &xs,
        &exact,
        Some("analytical".to_string()),
        CurveStyle::solid(BLACK, config.line_width + 1),
    ));

    for (k, (label, field)) in schemes.iter().enumerate() {
        let positions = snapshot::column(field.x(), column)?;
        let state = snapshot::column(field.state(), column)?;
        curves.push(Curve::new(
            &positions.to_vec(),
            &state.to_vec(),
            Some(label.to_string()),
            CurveStyle::dashed(palette::color(2 * k), config.line_width, SCHEME_ALPHA),
        ));
    }

    let (ax, ay) = config.annotation_at;
    let annotations = vec![
        Annotation {
            text: format!("time = {}s", format_general(time)),
            at: (ax, ay),
        },
        Annotation {
            text: format!("Δt = {}s", format_general(time_step)),
            at: (ax, ay - config.annotation_spacing),
        },
    ];

    debug!(column, time, schemes = schemes.len(), "comparison curves assembled");
    Ok((curves, annotations))
}
