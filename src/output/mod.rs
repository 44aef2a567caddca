//! Output of post-processing results
//!
//! - **Visualization**: SVG/PNG comparison plots using plotters
//! - **Export**: CSV tables of the extracted snapshot curves
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── number.rs           ← %g-style labels
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   ├── curves.rs       ← backend dispatch and drawing (private)
//! │   ├── snapshots.rs
//! │   ├── schemes.rs
//! │   └── solvers.rs
//! └── export/             ← Data export
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use transport_post::output::{plot_scheme_comparison, export_snapshots_csv};
//!
//! plot_scheme_comparison(&schemes, 0, &reference, 0.001, "case1-solution.svg", None)?;
//! export_snapshots_csv(SnapshotAxis::Time, &x, &curves, &labels, "case1-timesnaps-cni.csv", None)?;
//! ```

pub mod export;
pub(crate) mod number;
pub mod visualization;

pub use visualization::{
    plot_convergence_history,
    plot_scheme_comparison,
    plot_space_snapshots,
    plot_time_snapshots,
    plot_wall_time,
    PlotConfig,
};

pub use export::{export_snapshots_csv, CsvConfig, CsvMetadata};
