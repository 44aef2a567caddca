//! Error type shared by every stage of the post-processing pipeline
//!
//! All failures are fatal to a single invocation: a missing or malformed
//! record file, a shape mismatch on reshape, an out-of-range snapshot index
//! or a rendering backend failure. Each variant that concerns a file carries
//! its path so the message names it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Axis of a (space × time) grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Row axis, one row per spatial point (length nx)
    Space,
    /// Column axis, one column per time step (length ny)
    Time,
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridAxis::Space => write!(f, "space"),
            GridAxis::Time => write!(f, "time"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PostError {
    #[error("cannot read record file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record file '{}' at line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("record file '{}' has no field '{field}'", path.display())]
    MissingField { path: PathBuf, field: String },

    #[error("cannot read npz archive '{}'", path.display())]
    Npz {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpzError,
    },

    #[error("unsupported record format for '{}' (expected .dat or .npz)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error(
        "field '{field}' of '{}' has {len} values, expected {nx} x {ny} = {}",
        path.display(),
        nx * ny
    )]
    ShapeMismatch {
        path: PathBuf,
        field: String,
        len: usize,
        nx: usize,
        ny: usize,
    },

    #[error("{axis} index {index} out of range, valid range is [0, {len})")]
    IndexOutOfBounds {
        axis: GridAxis,
        index: usize,
        len: usize,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to render '{}': {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PostError>;
