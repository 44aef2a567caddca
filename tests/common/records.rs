//! Synthetic solver output written in the on-disk record layout

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use transport_post::analytical::{AnalyticalSolution, StationaryGaussian};
use transport_post::case::{Scheme, SolverKind};

/// Spatial points of the small test grid
pub const SMALL_NX: usize = 41;

/// Time steps of the small test grid
pub const SMALL_NY: usize = 31;

/// Position of row `i`: `nx` points evenly spread over `[5, 45]`
pub fn grid_position(i: usize, nx: usize) -> f64 {
    5.0 + 40.0 * i as f64 / (nx - 1) as f64
}

/// Time of column `j`: `ny` steps evenly spread over `[0, 30]`
pub fn grid_time(j: usize, ny: usize) -> f64 {
    30.0 * j as f64 / (ny - 1) as f64
}

/// Write a Tecplot table with one row per sample
pub fn write_tecplot(path: &Path, names: &[&str], columns: &[Vec<f64>]) {
    let mut out = BufWriter::new(File::create(path).unwrap());
    writeln!(out, "TITLE = \"synthetic\"").unwrap();
    let quoted: Vec<String> = names.iter().map(|n| format!("\"{}\"", n)).collect();
    writeln!(out, "VARIABLES = {}", quoted.join(" ")).unwrap();
    writeln!(out, "ZONE I={}, F=POINT", columns[0].len()).unwrap();

    for k in 0..columns[0].len() {
        let row: Vec<String> = columns.iter().map(|c| format!("{:.12e}", c[k])).collect();
        writeln!(out, "{}", row.join(" ")).unwrap();
    }
    out.flush().unwrap();
}

/// Flat `time`, `x`, `state` columns in space-major order
///
/// The state is the stationary pulse plus a scheme-dependent bias, so the
/// three schemes differ slightly.
fn transport_columns(nx: usize, ny: usize, bias: f64) -> Vec<Vec<f64>> {
    let mut time = Vec::with_capacity(nx * ny);
    let mut x = Vec::with_capacity(nx * ny);
    let mut state = Vec::with_capacity(nx * ny);
    for i in 0..nx {
        let xi = grid_position(i, nx);
        for j in 0..ny {
            let tj = grid_time(j, ny);
            time.push(tj);
            x.push(xi);
            state.push(StationaryGaussian.evaluate(xi, tj + 10.0) + bias);
        }
    }
    vec![time, x, state]
}

/// Write `case{n}-transport-{scheme}.dat` for all three schemes
pub fn write_case_records(dir: &Path, case_number: u32, nx: usize, ny: usize) {
    for (k, scheme) in Scheme::ALL.iter().enumerate() {
        let path = dir.join(format!(
            "case{}-transport-{}.dat",
            case_number,
            scheme.data_tag()
        ));
        let columns = transport_columns(nx, ny, 0.01 * k as f64);
        write_tecplot(&path, &["time", "x", "state"], &columns);
    }
}

/// Write `{solver}-history.dat` and `{solver}-timing.dat` for every solver
pub fn write_solver_records(dir: &Path) {
    for (k, kind) in SolverKind::ALL.iter().enumerate() {
        let rate = 0.01 * (k + 1) as f64;
        let iterations: Vec<f64> = (1..=100).map(|n| n as f64).collect();
        let residuals: Vec<f64> = iterations.iter().map(|n| (-rate * n).exp()).collect();
        write_tecplot(
            &dir.join(format!("{}-history.dat", kind.label())),
            &["iteration", "residual"],
            &[iterations, residuals],
        );

        let nodes = vec![100.0, 400.0, 1600.0, 6400.0];
        let wall_times: Vec<f64> = nodes.iter().map(|n: &f64| 1e-7 * n.powf(2.0 - rate)).collect();
        write_tecplot(
            &dir.join(format!("{}-timing.dat", kind.label())),
            &["npts", "wall_time"],
            &[nodes, wall_times],
        );
    }
}
