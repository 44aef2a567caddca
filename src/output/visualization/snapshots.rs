//! Numerical vs analytical snapshot plots for a single scheme
//!
//! - [`plot_space_snapshots`]: history at fixed spatial points (grid rows),
//!   plotted against time
//! - [`plot_time_snapshots`]: profiles at fixed time steps (grid columns),
//!   plotted against position
//!
//! Each snapshot contributes two curves: the analytical reference in the
//! dark palette entry of a pair and the numerical state in the light one.
//! Only the numerical curve carries a legend entry.

use std::path::Path;

use tracing::info;

use super::config::{PlotConfig, NO_TITLE};
use super::curves::{render, Curve, CurveStyle, Scale};
use crate::analytical::AnalyticalSolution;
use crate::error::{PostError, Result};
use crate::grid::ReshapedField;
use crate::output::number::format_general;
use crate::palette;
use crate::snapshot::{self, SnapshotSelection};

/// First palette entry used by space snapshots (red, then purple)
const SPACE_PALETTE_OFFSET: usize = 6;

/// Plot the state history at fixed spatial rows against the reference
///
/// For row `i` with physical position `positions[k]`, the abscissa is
/// `time[i, :]`, the numerical curve `state[i, :]` and the reference
/// `exact(positions[k], time[i, :])`.
///
/// # Errors
///
/// - [`PostError::InvalidData`] if `rows` and `positions` differ in length
/// - [`PostError::IndexOutOfBounds`] for a row outside `[0, nx)`
/// - [`PostError::Render`] if the image cannot be written
///
/// # Example
///
/// ```rust,ignore
/// plot_space_snapshots(
///     &field,
///     &[125, 250],
///     &[15.0, 25.0],
///     &AdvectedGaussian::default(),
///     "case1-spacesnap-expeuler.svg",
///     None,
/// )?;
/// ```
pub fn plot_space_snapshots(
    field: &ReshapedField,
    rows: &[usize],
    positions: &[f64],
    reference: &dyn AnalyticalSolution,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();

    let default_config = PlotConfig::space_snapshots(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let curves = space_snapshot_curves(field, rows, positions, reference, config.line_width)?;

    render(output_path, &curves, &[], config, Scale::Linear)?;
    info!(path = %output_path.display(), rows = ?rows, "space snapshots written");
    Ok(())
}

/// Reference and numerical curve per row, in that order
pub(crate) fn space_snapshot_curves(
    field: &ReshapedField,
    rows: &[usize],
    positions: &[f64],
    reference: &dyn AnalyticalSolution,
    line_width: u32,
) -> Result<Vec<Curve>> {
    if rows.len() != positions.len() {
        return Err(PostError::InvalidData(format!(
            "{} space snapshot rows but {} positions",
            rows.len(),
            positions.len()
        )));
    }

    let selection = SnapshotSelection::space(rows);
    let times = selection.extract(field.time())?;
    let states = selection.extract(field.state())?;

    let mut curves = Vec::with_capacity(2 * rows.len());
    for (k, ((time, state), &position)) in times.iter().zip(&states).zip(positions).enumerate() {
        let ts = time.to_vec();
        let exact = reference.over_time(position, &ts);

        curves.push(Curve::new(
            &ts,
            &exact,
            None,
            CurveStyle::solid(palette::color(SPACE_PALETTE_OFFSET + 2 * k), line_width),
        ));
        curves.push(Curve::new(
            &ts,
            &state.to_vec(),
            Some(format!("x={}", format_general(position))),
            CurveStyle::solid(palette::color(SPACE_PALETTE_OFFSET + 2 * k + 1), line_width),
        ));
    }
    Ok(curves)
}

/// Plot state profiles at fixed time columns against the reference
///
/// For column `j`, the abscissa is `x[:, j]`, the numerical curve
/// `state[:, j]` and the reference `exact(x[:, j], time[0, j])`. The legend
/// shows the snapshot time.
///
/// # Errors
///
/// - [`PostError::IndexOutOfBounds`] for a column outside `[0, ny)`
/// - [`PostError::Render`] if the image cannot be written
pub fn plot_time_snapshots(
    field: &ReshapedField,
    columns: &[usize],
    reference: &dyn AnalyticalSolution,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();

    let default_config = PlotConfig::time_snapshots(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let curves = time_snapshot_curves(field, columns, reference, config.line_width)?;

    render(output_path, &curves, &[], config, Scale::Linear)?;
    info!(path = %output_path.display(), columns = ?columns, "time snapshots written");
    Ok(())
}

/// Reference and numerical curve per column, in that order
pub(crate) fn time_snapshot_curves(
    field: &ReshapedField,
    columns: &[usize],
    reference: &dyn AnalyticalSolution,
    line_width: u32,
) -> Result<Vec<Curve>> {
    let selection = SnapshotSelection::time(columns);
    let positions = selection.extract(field.x())?;
    let states = selection.extract(field.state())?;

    let mut curves = Vec::with_capacity(2 * columns.len());
    for (k, ((xs, state), &column)) in positions.iter().zip(&states).zip(columns).enumerate() {
        let time = snapshot::element(field.time(), 0, column)?;
        let xs = xs.to_vec();
        let exact = reference.over_space(&xs, time);

        curves.push(Curve::new(
            &xs,
            &exact,
            None,
            CurveStyle::solid(palette::color(2 * k), line_width),
        ));
        curves.push(Curve::new(
            &xs,
            &state.to_vec(),
            Some(format!("time={}s", format_general(time))),
            CurveStyle::solid(palette::color(2 * k + 1), line_width),
        ));
    }
    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::{AdvectedGaussian, StationaryGaussian};
    use crate::error::GridAxis;
    use crate::grid::GridShape;
    use crate::record::SimulationRecord;
    use plotters::style::Color;

    /// Offset between the numerical state and the stationary pulse
    const BIAS: f64 = 0.05;

    /// Biased stationary pulse sampled on x in [5, 45], t = j * dt
    fn pulse_field(nx: usize, ny: usize, dt: f64) -> ReshapedField {
        let mut time = Vec::with_capacity(nx * ny);
        let mut x = Vec::with_capacity(nx * ny);
        let mut state = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            let xi = 5.0 + 40.0 * i as f64 / (nx - 1) as f64;
            for j in 0..ny {
                let tj = j as f64 * dt;
                time.push(tj);
                x.push(xi);
                state.push(StationaryGaussian.evaluate(xi, tj) + BIAS);
            }
        }
        let record = SimulationRecord::from_columns(
            "pulse.dat",
            vec![
                ("time".to_string(), time),
                ("x".to_string(), x),
                ("state".to_string(), state),
            ],
        )
        .unwrap();
        ReshapedField::from_record(&record, GridShape::new(nx, ny)).unwrap()
    }

    fn labels(curves: &[Curve]) -> Vec<Option<&str>> {
        curves.iter().map(|c| c.label.as_deref()).collect()
    }

    fn colors(curves: &[Curve]) -> Vec<(u8, u8, u8)> {
        curves.iter().map(|c| c.style.color.rgb()).collect()
    }

    fn palette_rgb(indices: &[usize]) -> Vec<(u8, u8, u8)> {
        indices.iter().map(|&i| palette::color(i).rgb()).collect()
    }

    // =============================================================================================
    // Curve assembly
    // =============================================================================================

    #[test]
    fn test_space_curves_use_given_positions_over_row_times() {
        let field = pulse_field(41, 81, 0.5);
        // row 10 sits at x = 15; the reference must follow the given position
        let curves =
            space_snapshot_curves(&field, &[10, 20], &[17.5, 25.0], &StationaryGaussian, 2).unwrap();

        assert_eq!(curves.len(), 4);
        assert_eq!(labels(&curves), vec![None, Some("x=17.5"), None, Some("x=25")]);
        assert_eq!(colors(&curves), palette_rgb(&[6, 7, 8, 9]));

        for (k, (row, position)) in [(10usize, 17.5), (20, 25.0)].into_iter().enumerate() {
            let exact = &curves[2 * k].points;
            let numerical = &curves[2 * k + 1].points;
            assert_eq!(exact.len(), 81);
            assert_eq!(numerical.len(), 81);

            for j in 0..81 {
                let t = field.time()[(row, j)];
                assert_eq!(exact[j], (t, StationaryGaussian.evaluate(position, t)));
                assert_eq!(numerical[j], (t, field.state()[(row, j)]));
            }
        }
    }

    #[test]
    fn test_time_curves_use_column_positions_at_first_row_time() {
        let field = pulse_field(81, 41, 1.0);
        let curves = time_snapshot_curves(&field, &[10, 20, 30], &StationaryGaussian, 2).unwrap();

        assert_eq!(curves.len(), 6);
        assert_eq!(
            labels(&curves),
            vec![None, Some("time=10s"), None, Some("time=20s"), None, Some("time=30s")]
        );
        assert_eq!(colors(&curves), palette_rgb(&[0, 1, 2, 3, 4, 5]));

        for (k, column) in [10usize, 20, 30].into_iter().enumerate() {
            let t = field.time()[(0, column)];
            let exact = &curves[2 * k].points;
            let numerical = &curves[2 * k + 1].points;
            assert_eq!(exact.len(), 81);

            for i in 0..81 {
                let x = field.x()[(i, column)];
                assert_eq!(exact[i], (x, StationaryGaussian.evaluate(x, t)));
                assert_eq!(numerical[i], (x, field.state()[(i, column)]));
            }
        }
    }

    #[test]
    fn test_time_labels_print_accumulated_times_short() {
        // 3 * 0.1 is 0.30000000000000004 in binary
        let field = pulse_field(11, 11, 0.1);
        let curves = time_snapshot_curves(&field, &[3], &StationaryGaussian, 2).unwrap();
        assert_eq!(curves[1].label.as_deref(), Some("time=0.3s"));
    }

    #[test]
    fn test_space_curves_length_mismatch() {
        let field = pulse_field(11, 11, 1.0);
        let err = space_snapshot_curves(&field, &[1, 2], &[15.0], &StationaryGaussian, 2).unwrap_err();
        assert!(matches!(err, PostError::InvalidData(_)));
    }

    // =============================================================================================
    // Rendering
    // =============================================================================================

    #[test]
    fn test_plot_space_snapshots_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spacesnap.svg");
        let field = pulse_field(41, 81, 0.5);

        plot_space_snapshots(&field, &[10, 20], &[15.0, 25.0], &StationaryGaussian, &path, None)
            .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("x=15"));
        assert!(svg.contains("x=25"));
        // palette entry 6, reference of the first row
        assert!(svg.to_ascii_lowercase().contains("#d62728"));
    }

    #[test]
    fn test_plot_space_snapshots_with_singular_reference() {
        // t = 0 in the first column makes the advected reference non-finite
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spacesnap-advected.png");
        let field = pulse_field(41, 81, 0.5);

        plot_space_snapshots(
            &field,
            &[10, 20],
            &[15.0, 25.0],
            &AdvectedGaussian::default(),
            &path,
            None,
        )
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_space_snapshots_row_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oob.svg");
        let field = pulse_field(11, 11, 1.0);
        let err = plot_space_snapshots(&field, &[3, 11], &[15.0, 25.0], &StationaryGaussian, &path, None)
            .unwrap_err();
        assert!(matches!(
            err,
            PostError::IndexOutOfBounds {
                axis: GridAxis::Space,
                index: 11,
                len: 11
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_plot_time_snapshots_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timesnaps.svg");
        let field = pulse_field(81, 41, 1.0);

        plot_time_snapshots(&field, &[10, 20, 30], &StationaryGaussian, &path, None).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        for label in ["time=10s", "time=20s", "time=30s"] {
            assert!(svg.contains(label), "legend lacks {}", label);
        }
        assert!(svg.to_ascii_lowercase().contains("#1f77b4"));
    }

    #[test]
    fn test_time_snapshots_column_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let field = pulse_field(11, 11, 1.0);
        let err = plot_time_snapshots(
            &field,
            &[5, 12],
            &StationaryGaussian,
            dir.path().join("oob.svg"),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PostError::IndexOutOfBounds {
                axis: GridAxis::Time,
                index: 12,
                ..
            }
        ));
    }
}
