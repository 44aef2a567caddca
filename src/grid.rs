//! Space-time grids reshaped from flat records
//!
//! The solver writes samples space-major: for each spatial point `i`, all
//! `ny` time steps follow one another. Reshaping is therefore row-major,
//! with element `(i, j)` taken from flat index `i * ny + j`. Rows are
//! spatial points, columns are time steps.

use std::path::Path;

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::{PostError, Result};
use crate::record::{RecordField, SimulationRecord};

/// Target dimensions of a reshaped field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of spatial points (rows)
    pub nx: usize,
    /// Number of time steps (columns)
    pub ny: usize,
}

impl GridShape {
    pub const fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Total element count `nx * ny`
    pub const fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reshape one flat column into an `(nx, ny)` grid
///
/// # Errors
///
/// [`PostError::ShapeMismatch`] unless `flat.len() == nx * ny` exactly.
/// `path` and `field` only feed the error message.
pub fn reshape_flat(
    flat: &Array1<f64>,
    shape: GridShape,
    path: &Path,
    field: &str,
) -> Result<Array2<f64>> {
    let mismatch = || PostError::ShapeMismatch {
        path: path.to_path_buf(),
        field: field.to_string(),
        len: flat.len(),
        nx: shape.nx,
        ny: shape.ny,
    };

    if flat.len() != shape.len() {
        return Err(mismatch());
    }

    flat.to_owned()
        .into_shape_with_order((shape.nx, shape.ny))
        .map_err(|_| mismatch())
}

/// A simulation record reshaped into dense `(nx, ny)` grids
#[derive(Debug, Clone, PartialEq)]
pub struct ReshapedField {
    shape: GridShape,
    time: Array2<f64>,
    x: Array2<f64>,
    state: Array2<f64>,
    temperature: Option<Array2<f64>>,
}

impl ReshapedField {
    /// Reshape `time`, `x`, `state` and, when present, `T`
    ///
    /// # Errors
    ///
    /// - [`PostError::MissingField`] if `time`, `x` or `state` is absent
    /// - [`PostError::ShapeMismatch`] if any field length differs from `nx * ny`
    pub fn from_record(record: &SimulationRecord, shape: GridShape) -> Result<Self> {
        let reshape = |field: RecordField| -> Result<Array2<f64>> {
            reshape_flat(record.field(field.name())?, shape, record.path(), field.name())
        };

        let temperature = if record.has_field(RecordField::Temperature.name()) {
            Some(reshape(RecordField::Temperature)?)
        } else {
            None
        };

        let field = Self {
            shape,
            time: reshape(RecordField::Time)?,
            x: reshape(RecordField::X)?,
            state: reshape(RecordField::State)?,
            temperature,
        };

        debug!(
            path = %record.path().display(),
            nx = shape.nx,
            ny = shape.ny,
            "record reshaped"
        );
        Ok(field)
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn time(&self) -> &Array2<f64> {
        &self.time
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn state(&self) -> &Array2<f64> {
        &self.state
    }

    pub fn temperature(&self) -> Option<&Array2<f64>> {
        self.temperature.as_ref()
    }
}

/// Load a record file and reshape it in one step
pub fn load_grid(path: impl AsRef<Path>, shape: GridShape) -> Result<ReshapedField> {
    let record = SimulationRecord::load(path)?;
    ReshapedField::from_record(&record, shape)
}
