//! Log-log figures of the linear-solver study
//!
//! Solvers are drawn in palette entries 0, 2, 4, ... in the order given.

use std::path::Path;

use tracing::info;

use super::config::{PlotConfig, NO_TITLE};
use super::curves::{render, Curve, CurveStyle, Scale};
use crate::case::SolverSummary;
use crate::error::{PostError, Result};
use crate::palette;

/// Residual against iteration count, one line per solver
///
/// Non-positive values cannot be placed on the log axes and are left out
/// of the fitted range.
pub fn plot_convergence_history(
    summaries: &[SolverSummary],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();
    let default_config = PlotConfig::convergence_history(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let curves = solver_curves(summaries, config, false, |s| (&s.iterations, &s.residuals))?;

    render(output_path, &curves, &[], config, Scale::LogLog)?;
    info!(path = %output_path.display(), solvers = summaries.len(), "convergence history written");
    Ok(())
}

/// Wall time against number of nodes, lines with circle markers
pub fn plot_wall_time(
    summaries: &[SolverSummary],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();
    let default_config = PlotConfig::wall_time(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let curves = solver_curves(summaries, config, true, |s| (&s.nodes, &s.wall_times))?;

    render(output_path, &curves, &[], config, Scale::LogLog)?;
    info!(path = %output_path.display(), solvers = summaries.len(), "wall time written");
    Ok(())
}

fn solver_curves<'a>(
    summaries: &'a [SolverSummary],
    config: &PlotConfig,
    markers: bool,
    columns: impl Fn(&'a SolverSummary) -> (&'a Vec<f64>, &'a Vec<f64>),
) -> Result<Vec<Curve>> {
    if summaries.is_empty() {
        return Err(PostError::InvalidData("no solver summaries to plot".to_string()));
    }

    summaries
        .iter()
        .enumerate()
        .map(|(k, summary)| {
            let (xs, ys) = columns(summary);
            if xs.len() != ys.len() {
                return Err(PostError::InvalidData(format!(
                    "solver '{}': {} abscissae but {} values",
                    summary.kind,
                    xs.len(),
                    ys.len()
                )));
            }

            let mut style = CurveStyle::solid(palette::color(2 * k), config.line_width);
            if markers {
                style = style.with_markers();
            }
            Ok(Curve::new(xs, ys, Some(summary.kind.label().to_string()), style))
        })
        .collect()
}
