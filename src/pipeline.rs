//! End-to-end runs: load every record of a case, render its figures and
//! optionally export the snapshot curves
//!
//! Each run is sequential except for loading, which reads the three scheme
//! files concurrently when the `parallel` feature is enabled. The first
//! failure aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::analytical::AnalyticalSolution;
use crate::case::{Case, CaseConfig, Scheme, SolverComparisonConfig, SolverKind, SolverSummary};
use crate::error::{PostError, Result};
use crate::grid::{load_grid, ReshapedField};
use crate::output::export::{export_snapshots_csv, CsvConfig, CsvMetadata};
use crate::output::number::format_general;
use crate::output::visualization::{
    plot_convergence_history, plot_scheme_comparison, plot_space_snapshots, plot_time_snapshots,
    plot_wall_time,
};
use crate::snapshot::{self, SnapshotAxis, SnapshotSelection};

/// Files written by [`run_case`], in creation order
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub case: Case,
    pub written: Vec<PathBuf>,
}

/// Post-process one case
///
/// For every scheme: space snapshots, time snapshots and, with
/// `export_csv`, the matching CSV tables. Then one comparison plot of all
/// schemes. The output directory is created if needed.
///
/// # Errors
///
/// Any [`PostError`] from validation, loading, extraction or rendering.
pub fn run_case(config: &CaseConfig) -> Result<CaseReport> {
    config.validate()?;
    create_output_dir(&config.output_dir)?;

    info!(
        case = %config.case,
        nx = config.shape.nx,
        ny = config.shape.ny,
        data_dir = %config.data_dir.display(),
        "post-processing case"
    );

    let reference = config.reference();
    let fields = load_schemes(config)?;
    let mut written = Vec::new();

    for (scheme, field) in &fields {
        let space_path = config.space_plot_path(*scheme);
        plot_space_snapshots(
            field,
            &config.space_rows,
            &config.space_positions,
            reference.as_ref(),
            &space_path,
            None,
        )?;
        written.push(space_path);

        let time_path = config.time_plot_path(*scheme);
        plot_time_snapshots(field, &config.time_columns, reference.as_ref(), &time_path, None)?;
        written.push(time_path);

        if config.export_csv {
            written.push(export_space_csv(config, *scheme, field, reference.as_ref())?);
            written.push(export_time_csv(config, *scheme, field, reference.as_ref())?);
        }
    }

    let comparison: Vec<(&str, &ReshapedField)> = fields
        .iter()
        .map(|(scheme, field)| (scheme.label(), field))
        .collect();
    let comparison_path = config.comparison_plot_path();
    plot_scheme_comparison(
        &comparison,
        config.comparison_column,
        reference.as_ref(),
        config.time_step,
        &comparison_path,
        None,
    )?;
    written.push(comparison_path);

    info!(case = %config.case, files = written.len(), "case done");
    Ok(CaseReport {
        case: config.case,
        written,
    })
}

/// Render the convergence history and wall-time figures of the linear solvers
///
/// Returns the two written paths.
pub fn run_solver_comparison(config: &SolverComparisonConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    create_output_dir(&config.output_dir)?;

    let summaries = SolverKind::ALL
        .iter()
        .map(|&kind| SolverSummary::load(kind, config))
        .collect::<Result<Vec<_>>>()?;

    let history_path = config.history_plot_path();
    plot_convergence_history(&summaries, &history_path, None)?;

    let wall_time_path = config.wall_time_plot_path();
    plot_wall_time(&summaries, &wall_time_path, None)?;

    info!(solvers = summaries.len(), "solver comparison done");
    Ok(vec![history_path, wall_time_path])
}

fn load_schemes(config: &CaseConfig) -> Result<Vec<(Scheme, ReshapedField)>> {
    let load = |scheme: &Scheme| -> Result<(Scheme, ReshapedField)> {
        let field = load_grid(config.input_path(*scheme), config.shape)?;
        Ok((*scheme, field))
    };

    #[cfg(feature = "parallel")]
    {
        Scheme::ALL.par_iter().map(load).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        Scheme::ALL.iter().map(load).collect()
    }
}

fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| PostError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

fn csv_config(
    config: &CaseConfig,
    scheme: Scheme,
    axis: SnapshotAxis,
    indices: &[usize],
    reference: &dyn AnalyticalSolution,
) -> CsvConfig {
    let mut metadata = CsvMetadata::from_case(&config.case.to_string(), scheme.label(), config.shape)
        .with_snapshots(axis, indices)
        .with_reference(reference.name());
    metadata.add_custom("Time step".to_string(), format_general(config.time_step));
    CsvConfig::default().with_metadata(metadata)
}

/// Numerical and reference histories at the space snapshot rows
fn export_space_csv(
    config: &CaseConfig,
    scheme: Scheme,
    field: &ReshapedField,
    reference: &dyn AnalyticalSolution,
) -> Result<PathBuf> {
    let rows = &config.space_rows;
    let abscissa = match rows.first() {
        Some(&i) => snapshot::row(field.time(), i)?.to_vec(),
        None => Vec::new(),
    };

    let states = SnapshotSelection::space(rows.as_slice()).extract(field.state())?;

    let mut curves = Vec::with_capacity(2 * rows.len());
    let mut labels = Vec::with_capacity(2 * rows.len());
    for (state, &position) in states.iter().zip(&config.space_positions) {
        curves.push(state.to_vec());
        labels.push(format!("state x={}", format_general(position)));
        curves.push(reference.over_time(position, &abscissa));
        labels.push(format!("exact x={}", format_general(position)));
    }
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

    let path = config.space_csv_path(scheme);
    let csv = csv_config(config, scheme, SnapshotAxis::Space, rows, reference);
    export_snapshots_csv(SnapshotAxis::Space, &abscissa, &curves, &labels, &path, Some(&csv))?;
    Ok(path)
}

/// Numerical and reference profiles at the time snapshot columns
fn export_time_csv(
    config: &CaseConfig,
    scheme: Scheme,
    field: &ReshapedField,
    reference: &dyn AnalyticalSolution,
) -> Result<PathBuf> {
    let columns = &config.time_columns;
    let abscissa = match columns.first() {
        Some(&j) => snapshot::column(field.x(), j)?.to_vec(),
        None => Vec::new(),
    };

    let states = SnapshotSelection::time(columns.as_slice()).extract(field.state())?;

    let mut curves = Vec::with_capacity(2 * columns.len());
    let mut labels = Vec::with_capacity(2 * columns.len());
    for (state, &column) in states.iter().zip(columns) {
        let time = snapshot::element(field.time(), 0, column)?;
        curves.push(state.to_vec());
        labels.push(format!("state time={}s", format_general(time)));
        curves.push(reference.over_space(&abscissa, time));
        labels.push(format!("exact time={}s", format_general(time)));
    }
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

    let path = config.time_csv_path(scheme);
    let csv = csv_config(config, scheme, SnapshotAxis::Time, columns, reference);
    export_snapshots_csv(SnapshotAxis::Time, &abscissa, &curves, &labels, &path, Some(&csv))?;
    Ok(path)
}
