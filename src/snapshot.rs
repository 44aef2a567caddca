//! Snapshot extraction from space-time grids
//!
//! A snapshot is a 1-D slice of an `(nx, ny)` grid at a fixed index:
//! a row holds one spatial point across all time steps, a column holds one
//! time step across all spatial points. Indices are exact positions, never
//! interpolated, and are checked against the grid bounds.

use ndarray::{Array1, Array2, Axis};

use crate::error::{GridAxis, PostError, Result};

/// Which axis a snapshot index fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotAxis {
    /// Fixed spatial point, curve across time (a grid row)
    Space,
    /// Fixed time step, curve across space (a grid column)
    Time,
}

impl SnapshotAxis {
    fn grid_axis(self) -> GridAxis {
        match self {
            SnapshotAxis::Space => GridAxis::Space,
            SnapshotAxis::Time => GridAxis::Time,
        }
    }

    fn ndarray_axis(self) -> Axis {
        match self {
            SnapshotAxis::Space => Axis(0),
            SnapshotAxis::Time => Axis(1),
        }
    }
}

/// Fixed indices along one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSelection {
    pub axis: SnapshotAxis,
    pub indices: Vec<usize>,
}

impl SnapshotSelection {
    pub fn space(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            axis: SnapshotAxis::Space,
            indices: indices.into(),
        }
    }

    pub fn time(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            axis: SnapshotAxis::Time,
            indices: indices.into(),
        }
    }

    /// Check every index against the grid without extracting
    pub fn validate(&self, grid: &Array2<f64>) -> Result<()> {
        let len = grid.len_of(self.axis.ndarray_axis());
        for &index in &self.indices {
            check_index(self.axis, index, len)?;
        }
        Ok(())
    }

    /// One owned curve per index, in selection order
    ///
    /// # Errors
    ///
    /// [`PostError::IndexOutOfBounds`] for the first index outside the grid.
    pub fn extract(&self, grid: &Array2<f64>) -> Result<Vec<Array1<f64>>> {
        self.validate(grid)?;
        self.indices
            .iter()
            .map(|&index| slice(grid, self.axis, index))
            .collect()
    }
}

fn check_index(axis: SnapshotAxis, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(PostError::IndexOutOfBounds {
            axis: axis.grid_axis(),
            index,
            len,
        });
    }
    Ok(())
}

/// Slice a grid at `index` along `axis`
pub fn slice(grid: &Array2<f64>, axis: SnapshotAxis, index: usize) -> Result<Array1<f64>> {
    let ax = axis.ndarray_axis();
    check_index(axis, index, grid.len_of(ax))?;
    Ok(grid.index_axis(ax, index).to_owned())
}

/// Spatial point `i` across all time steps
pub fn row(grid: &Array2<f64>, i: usize) -> Result<Array1<f64>> {
    slice(grid, SnapshotAxis::Space, i)
}

/// Time step `j` across all spatial points
pub fn column(grid: &Array2<f64>, j: usize) -> Result<Array1<f64>> {
    slice(grid, SnapshotAxis::Time, j)
}

/// Single grid element with the same bounds reporting as slices
pub fn element(grid: &Array2<f64>, i: usize, j: usize) -> Result<f64> {
    let (nx, ny) = grid.dim();
    check_index(SnapshotAxis::Space, i, nx)?;
    check_index(SnapshotAxis::Time, j, ny)?;
    Ok(grid[(i, j)])
}
