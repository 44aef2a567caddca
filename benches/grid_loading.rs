//! Benchmarks for the load / reshape / extract path
//!
//! Parsing dominates: a production record holds nx * ny = 1.5 million rows.
//! The benchmarks parse from memory so disk speed does not enter the
//! measurement.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench grid_loading
//!
//! # Only the parser
//! cargo bench --bench grid_loading tecplot
//! ```

use std::fmt::Write as _;
use std::hint::black_box;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use transport_post::analytical::{AdvectedGaussian, AnalyticalSolution};
use transport_post::grid::GridShape;
use transport_post::record::{tecplot, SimulationRecord};
use transport_post::snapshot::SnapshotSelection;

// =================================================================================================
// Synthetic records
// =================================================================================================

/// Tecplot text for an `nx x ny` advected pulse, space-major
fn tecplot_text(nx: usize, ny: usize) -> String {
    let reference = AdvectedGaussian::default();
    let mut text = String::with_capacity(nx * ny * 64);
    text.push_str("VARIABLES = \"time\" \"x\" \"state\"\n");
    for i in 0..nx {
        let x = 5.0 + 40.0 * i as f64 / (nx - 1) as f64;
        for j in 0..ny {
            let t = 1.0 + 30.0 * j as f64 / (ny - 1) as f64;
            let _ = writeln!(text, "{:.6E} {:.6E} {:.6E}", t, x, reference.evaluate(x, t));
        }
    }
    text
}

fn record(nx: usize, ny: usize) -> SimulationRecord {
    tecplot::parse(Path::new("bench.dat"), Cursor::new(tecplot_text(nx, ny))).unwrap()
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// Parser throughput for growing grids
fn benchmark_tecplot_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("tecplot parse");
    group.measurement_time(Duration::from_secs(10));

    for &(nx, ny) in &[(50, 301), (100, 601), (250, 1201)] {
        let text = tecplot_text(nx, ny);
        group.throughput(Throughput::Elements((nx * ny) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", nx, ny)),
            &text,
            |b, text| {
                b.iter(|| {
                    tecplot::parse(black_box(Path::new("bench.dat")), Cursor::new(text.as_bytes()))
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

/// Reshape of all three fields
fn benchmark_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    for &(nx, ny) in &[(100, 601), (500, 3001)] {
        let record = record(nx, ny);
        let shape = GridShape::new(nx, ny);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", nx, ny)),
            &record,
            |b, record| b.iter(|| record.reshape(black_box(shape)).unwrap()),
        );
    }
    group.finish();
}

/// Row and column extraction on the production grid
fn benchmark_snapshots(c: &mut Criterion) {
    let field = record(500, 3001).reshape(GridShape::new(500, 3001)).unwrap();
    let rows = SnapshotSelection::space(vec![125, 250]);
    let columns = SnapshotSelection::time(vec![1000, 2000, 3000]);

    let mut group = c.benchmark_group("snapshots");
    group.bench_function("space rows", |b| {
        b.iter(|| rows.extract(black_box(field.state())).unwrap())
    });
    group.bench_function("time columns", |b| {
        b.iter(|| columns.extract(black_box(field.state())).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tecplot_parse,
    benchmark_reshape,
    benchmark_snapshots
);
criterion_main!(benches);
