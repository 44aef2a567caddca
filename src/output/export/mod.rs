//! Export of extracted curves for analysis outside this crate
//!
//! # Available formats
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use transport_post::output::export::{export_snapshots_csv, CsvConfig};
//!
//! export_snapshots_csv(SnapshotAxis::Time, &x, &curves, &labels, "cni.csv", Some(&CsvConfig::european()))?;
//! ```

pub mod csv;

pub use csv::{export_snapshots_csv, CsvConfig, CsvMetadata};
