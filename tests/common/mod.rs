//! Common utilities for integration tests

#![allow(dead_code)]

pub mod records;

// Re-export commonly used items
pub use records::{
    grid_position,
    grid_time,
    write_case_records,
    write_solver_records,
    write_tecplot,
    SMALL_NX,
    SMALL_NY,
};
