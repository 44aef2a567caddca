//! Reader for NumPy `.npz` archives
//!
//! Each array in the archive becomes one field, named after its entry with
//! the `.npy` suffix stripped. Arrays of any dimension are flattened in
//! logical (row-major) order.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::NpzReader;

use crate::error::{PostError, Result};
use crate::record::SimulationRecord;

pub fn read(path: &Path) -> Result<SimulationRecord> {
    let npz_error = |source| PostError::Npz {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| PostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut npz = NpzReader::new(BufReader::new(file)).map_err(npz_error)?;

    let entries = npz.names().map_err(npz_error)?;
    let mut columns = Vec::with_capacity(entries.len());

    for entry in entries {
        let array: ArrayD<f64> = npz.by_name(&entry).map_err(npz_error)?;
        let name = entry.trim_end_matches(".npy").to_string();
        columns.push((name, array.iter().copied().collect::<Vec<f64>>()));
    }

    SimulationRecord::from_columns(path, columns)
}
