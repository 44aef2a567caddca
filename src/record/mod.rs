//! Flat simulation records as written by the transport solver
//!
//! A record is a set of named, equal-length columns (`time`, `x`, `state` and
//! optionally `T`), one sample per (spatial point, time step) pair. Records
//! are loaded once and never mutated; reshaping into a space-time grid lives
//! in [`crate::grid`].
//!
//! # Formats
//!
//! | Extension | Reader | Layout |
//! |-----------|--------|--------|
//! | `.dat` | [`tecplot`] | ASCII table with a `VARIABLES = ...` header |
//! | `.npz` | [`npz`] | NumPy archive, one array per field |

pub mod npz;
pub mod tecplot;

use std::path::{Path, PathBuf};

use ndarray::Array1;
use tracing::{debug, info};

use crate::error::{PostError, Result};
use crate::grid::{GridShape, ReshapedField};

/// Well-known fields of a transport record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Time,
    X,
    State,
    /// Temperature, only present in heat-conduction output
    Temperature,
}

impl RecordField {
    /// Column name as it appears in the file
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Time => "time",
            RecordField::X => "x",
            RecordField::State => "state",
            RecordField::Temperature => "T",
        }
    }
}

/// On-disk layout of a record file, selected by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Tecplot,
    Npz,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("dat") => Ok(RecordFormat::Tecplot),
            Some("npz") => Ok(RecordFormat::Npz),
            _ => Err(PostError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Named flat columns loaded from one record file
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    path: PathBuf,
    columns: Vec<(String, Array1<f64>)>,
}

impl SimulationRecord {
    /// Load a record, dispatching on the file extension
    ///
    /// # Errors
    ///
    /// - [`PostError::UnsupportedFormat`] for an unknown extension
    /// - [`PostError::Io`] if the file is missing or unreadable
    /// - [`PostError::Parse`] / [`PostError::Npz`] if it is malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let record = match RecordFormat::from_path(path)? {
            RecordFormat::Tecplot => tecplot::read(path)?,
            RecordFormat::Npz => npz::read(path)?,
        };

        info!(
            path = %path.display(),
            fields = record.columns.len(),
            samples = record.len(),
            "loaded record"
        );
        Ok(record)
    }

    /// Build a record from in-memory columns
    ///
    /// All columns must have the same length.
    pub fn from_columns(
        path: impl Into<PathBuf>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self> {
        let path = path.into();

        if let Some((first_name, first)) = columns.first() {
            for (name, values) in &columns[1..] {
                if values.len() != first.len() {
                    return Err(PostError::InvalidData(format!(
                        "'{}': field '{}' has {} values but '{}' has {}",
                        path.display(),
                        name,
                        values.len(),
                        first_name,
                        first.len()
                    )));
                }
            }
        }

        debug!(path = %path.display(), fields = columns.len(), "record assembled");

        Ok(Self {
            path,
            columns: columns
                .into_iter()
                .map(|(name, values)| (name, Array1::from_vec(values)))
                .collect(),
        })
    }

    /// Path the record was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Field names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Flat column by name
    ///
    /// # Errors
    ///
    /// [`PostError::MissingField`] naming the file and the field.
    pub fn field(&self, name: &str) -> Result<&Array1<f64>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values)
            .ok_or_else(|| PostError::MissingField {
                path: self.path.clone(),
                field: name.to_string(),
            })
    }

    /// Number of samples per field
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reshape `time`, `x`, `state` (and `T` when present) into `(nx, ny)` grids
    pub fn reshape(&self, shape: GridShape) -> Result<ReshapedField> {
        ReshapedField::from_record(self, shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationRecord {
        SimulationRecord::from_columns(
            "sample.dat",
            vec![
                ("time".to_string(), vec![0.0, 0.1, 0.2]),
                ("x".to_string(), vec![1.0, 1.0, 1.0]),
                ("state".to_string(), vec![0.5, 0.4, 0.3]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            RecordFormat::from_path(Path::new("case1-transport-cni.dat")).unwrap(),
            RecordFormat::Tecplot
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("run.NPZ")).unwrap(),
            RecordFormat::Npz
        );
        assert!(matches!(
            RecordFormat::from_path(Path::new("run.csv")),
            Err(PostError::UnsupportedFormat { .. })
        ));
        assert!(RecordFormat::from_path(Path::new("run.tec")).is_err());
        assert!(RecordFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_field_lookup() {
        let record = sample();
        assert_eq!(record.len(), 3);
        assert!(record.has_field("state"));
        assert!(!record.has_field("T"));
        assert_eq!(record.field("state").unwrap()[1], 0.4);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["time", "x", "state"]);
    }

    #[test]
    fn test_missing_field_names_file() {
        let record = sample();
        let err = record.field(RecordField::Temperature.name()).unwrap_err();
        match err {
            PostError::MissingField { path, field } => {
                assert_eq!(path, PathBuf::from("sample.dat"));
                assert_eq!(field, "T");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unequal_columns_rejected() {
        let result = SimulationRecord::from_columns(
            "bad.dat",
            vec![
                ("time".to_string(), vec![0.0, 0.1]),
                ("state".to_string(), vec![0.5]),
            ],
        );
        assert!(matches!(result, Err(PostError::InvalidData(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimulationRecord::load("does-not-exist.dat").unwrap_err();
        assert!(matches!(err, PostError::Io { .. }));
        assert!(err.to_string().contains("does-not-exist.dat"));
    }
}
