//! CSV export of snapshot curves
//!
//! Writes one abscissa column (time for space snapshots, position for time
//! snapshots) followed by one column per curve. The files open directly in
//! spreadsheet tools, pandas or gnuplot.
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use transport_post::output::export::export_snapshots_csv;
//! use transport_post::snapshot::SnapshotAxis;
//!
//! let x = vec![5.0, 5.1, 5.2];
//! let state = vec![0.0, 0.01, 0.03];
//! let exact = vec![0.0, 0.012, 0.028];
//!
//! export_snapshots_csv(SnapshotAxis::Time, &x, &[state, exact], &["state", "exact"], "cni.csv", None)?;
//! ```
//!
//! **Output** (`cni.csv`):
//! ```csv
//! x,state,exact
//! 5.000000,0.000000,0.000000
//! 5.100000,0.010000,0.012000
//! 5.200000,0.030000,0.028000
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! let metadata = CsvMetadata::from_case("case1", "crank nicolson", GridShape::new(500, 3001))
//!     .with_snapshots(SnapshotAxis::Time, &[1000, 2000, 3000]);
//!
//! let config = CsvConfig::default().with_metadata(metadata);
//! export_snapshots_csv(SnapshotAxis::Time, &x, &curves, &labels, "cni.csv", Some(&config))?;
//! ```
//!
//! **Output** (`cni.csv`):
//! ```csv
//! # Transport Post-Processing Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Case: case1
//! # Scheme: crank nicolson
//! # Grid: 500 x 3001
//! # Snapshots: time columns 1000, 2000, 3000
//! #
//! x,state time=1s,exact time=1s,...
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{PostError, Result};
use crate::grid::GridShape;
use crate::snapshot::SnapshotAxis;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the first column; `None` derives it from the snapshot axis
    pub abscissa_header: Option<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            abscissa_header: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter with comma decimals
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Enable the metadata header
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn header_for(&self, axis: SnapshotAxis) -> &str {
        match &self.abscissa_header {
            Some(header) => header,
            None => match axis {
                SnapshotAxis::Space => "time",
                SnapshotAxis::Time => "x",
            },
        }
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub case: Option<String>,

    pub scheme: Option<String>,

    pub grid_shape: Option<GridShape>,

    /// Axis and indices the curves were taken at
    pub snapshots: Option<(SnapshotAxis, Vec<usize>)>,

    /// Name of the analytical reference
    pub reference: Option<String>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn from_case(case: &str, scheme: &str, shape: GridShape) -> Self {
        Self {
            case: Some(case.to_string()),
            scheme: Some(scheme.to_string()),
            grid_shape: Some(shape),
            ..Default::default()
        }
    }

    pub fn with_snapshots(mut self, axis: SnapshotAxis, indices: &[usize]) -> Self {
        self.snapshots = Some((axis, indices.to_vec()));
        self
    }

    pub fn with_reference(mut self, name: &str) -> Self {
        self.reference = Some(name.to_string());
        self
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(out, "# Transport Post-Processing Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(case) = &metadata.case {
        writeln!(out, "# Case: {}", case)?;
    }
    if let Some(scheme) = &metadata.scheme {
        writeln!(out, "# Scheme: {}", scheme)?;
    }
    if let Some(shape) = metadata.grid_shape {
        writeln!(out, "# Grid: {} x {}", shape.nx, shape.ny)?;
    }
    if let Some((axis, indices)) = &metadata.snapshots {
        let kind = match axis {
            SnapshotAxis::Space => "space rows",
            SnapshotAxis::Time => "time columns",
        };
        let indices: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
        writeln!(out, "# Snapshots: {} {}", kind, indices.join(", "))?;
    }
    if let Some(reference) = &metadata.reference {
        writeln!(out, "# Reference: {}", reference)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export snapshot curves sharing one abscissa to CSV
///
/// Curves may contain non-finite values (the advected reference is singular
/// at `t = 0`); they are written as `NaN`/`inf`. The abscissa must be finite.
///
/// # Errors
///
/// - [`PostError::InvalidData`] for empty data, a label count that differs
///   from the curve count, a curve whose length differs from the abscissa,
///   or a non-finite abscissa value
/// - [`PostError::Write`] if the file cannot be created or written
pub fn export_snapshots_csv(
    axis: SnapshotAxis,
    abscissa: &[f64],
    curves: &[Vec<f64>],
    labels: &[&str],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();

    // ============================= Validation =============================

    if abscissa.is_empty() || curves.is_empty() {
        return Err(PostError::InvalidData(
            "empty data: abscissa and curves must not be empty".to_string(),
        ));
    }

    if curves.len() != labels.len() {
        return Err(PostError::InvalidData(format!(
            "{} curves but {} labels",
            curves.len(),
            labels.len()
        )));
    }

    if abscissa.iter().any(|v| !v.is_finite()) {
        return Err(PostError::InvalidData(
            "NaN or Inf detected in abscissa".to_string(),
        ));
    }

    for (curve, label) in curves.iter().zip(labels) {
        if curve.len() != abscissa.len() {
            return Err(PostError::InvalidData(format!(
                "curve '{}' has {} values, abscissa has {}",
                label,
                curve.len(),
                abscissa.len()
            )));
        }
    }

    // ============================= Write ==================================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    write_table(axis, abscissa, curves, labels, output_path, configuration).map_err(|source| {
        PostError::Write {
            path: output_path.to_path_buf(),
            source,
        }
    })?;

    info!(
        path = %output_path.display(),
        rows = abscissa.len(),
        curves = curves.len(),
        "snapshot csv written"
    );
    Ok(())
}

fn write_table(
    axis: SnapshotAxis,
    abscissa: &[f64],
    curves: &[Vec<f64>],
    labels: &[&str],
    output_path: &Path,
    configuration: &CsvConfig,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(output_path)?);
    let delimiter = configuration.delimiter;

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut out, metadata)?;
        }
    }

    write!(out, "{}", configuration.header_for(axis))?;
    for label in labels {
        write!(out, "{}{}", delimiter, label)?;
    }
    writeln!(out)?;

    for (i, value) in abscissa.iter().enumerate() {
        write!(out, "{}", format_number(*value, configuration))?;
        for curve in curves {
            write!(out, "{}{}", delimiter, format_number(curve[i], configuration))?;
        }
        writeln!(out)?;
    }

    out.flush()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn profile() -> (Vec<f64>, Vec<Vec<f64>>) {
        let x = vec![5.0, 5.5, 6.0];
        let curves = vec![vec![0.0, 0.25, 0.5], vec![0.0, 0.2, 0.55]];
        (x, curves)
    }

    #[test]
    fn test_export_basic() {
        let file = NamedTempFile::new().unwrap();
        let (x, curves) = profile();

        export_snapshots_csv(SnapshotAxis::Time, &x, &curves, &["state", "exact"], file.path(), None)
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "x,state,exact");
        assert_eq!(lines[1], "5.000000,0.000000,0.000000");
        assert_eq!(lines[2], "5.500000,0.250000,0.200000");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_space_axis_header_and_nan() {
        let file = NamedTempFile::new().unwrap();
        let t = vec![0.0, 1.0];
        let curves = vec![vec![f64::NAN, 0.5]];

        export_snapshots_csv(SnapshotAxis::Space, &t, &curves, &["exact x=15"], file.path(), None)
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("time,exact x=15\n"));
        assert!(content.contains("0.000000,NaN"));
    }

    #[test]
    fn test_export_european() {
        let file = NamedTempFile::new().unwrap();
        let (x, curves) = profile();

        export_snapshots_csv(
            SnapshotAxis::Time,
            &x,
            &curves,
            &["a", "b"],
            file.path(),
            Some(&CsvConfig::european()),
        )
        .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("x;a;b"));
        assert!(content.contains("5,500000;0,250000;0,200000"));
    }

    #[test]
    fn test_export_with_metadata() {
        let file = NamedTempFile::new().unwrap();
        let (x, curves) = profile();

        let mut metadata = CsvMetadata::from_case("case1", "crank nicolson", GridShape::new(500, 3001))
            .with_snapshots(SnapshotAxis::Time, &[1000, 2000, 3000])
            .with_reference("advected gaussian");
        metadata.add_custom("Gamma".to_string(), "0.01".to_string());
        let config = CsvConfig::high_precision().with_metadata(metadata);

        export_snapshots_csv(SnapshotAxis::Time, &x, &curves, &["a", "b"], file.path(), Some(&config))
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("# Transport Post-Processing Data\n# Generated: "));
        assert!(content.contains("# Scheme: crank nicolson"));
        assert!(content.contains("# Grid: 500 x 3001"));
        assert!(content.contains("# Snapshots: time columns 1000, 2000, 3000"));
        assert!(content.contains("# Reference: advected gaussian"));
        assert!(content.contains("# Gamma: 0.01"));
        assert!(content.contains("5.500000000000,0.250000000000"));
    }

    #[test]
    fn test_export_validation() {
        let file = NamedTempFile::new().unwrap();
        let (x, curves) = profile();

        let empty = export_snapshots_csv(SnapshotAxis::Time, &[], &curves, &["a", "b"], file.path(), None);
        assert!(matches!(empty, Err(PostError::InvalidData(_))));

        let labels = export_snapshots_csv(SnapshotAxis::Time, &x, &curves, &["a"], file.path(), None);
        assert!(matches!(labels, Err(PostError::InvalidData(_))));

        let short = vec![vec![0.0, 1.0]];
        let length = export_snapshots_csv(SnapshotAxis::Time, &x, &short, &["a"], file.path(), None);
        assert!(matches!(length, Err(PostError::InvalidData(msg)) if msg.contains("'a'")));

        let bad_x = vec![0.0, f64::INFINITY, 2.0];
        let abscissa = export_snapshots_csv(SnapshotAxis::Time, &bad_x, &curves, &["a", "b"], file.path(), None);
        assert!(matches!(abscissa, Err(PostError::InvalidData(_))));
    }

    #[test]
    fn test_export_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let (x, curves) = profile();

        let err = export_snapshots_csv(SnapshotAxis::Time, &x, &curves, &["a", "b"], &path, None)
            .unwrap_err();
        assert!(matches!(err, PostError::Write { .. }));
    }
}
