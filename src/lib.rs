//! transport-post: post-processing of 1-D transport simulation output
//!
//! Loads the flat records written by a transport/diffusion solver, reshapes
//! them into space-time grids, extracts snapshots and compares them with
//! closed-form reference solutions in publication-style plots.
//!
//! # Architecture
//!
//! The crate is a straight pipeline, one module per stage:
//!
//! 1. [`record`]: read named flat columns from `.dat` or `.npz` files
//! 2. [`grid`]: reshape each column row-major into an `(nx, ny)` grid
//! 3. [`snapshot`]: slice rows (fixed position) or columns (fixed time)
//! 4. [`analytical`]: evaluate the reference solution on the same points
//! 5. [`output`]: draw and save the figures, export curves to CSV
//!
//! [`case`] and [`pipeline`] tie the stages together for the production
//! runs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use transport_post::prelude::*;
//!
//! # fn main() -> Result<(), PostError> {
//! // One scheme, by hand
//! let field = load_grid("case1-transport-cni.dat", GridShape::new(500, 3001))?;
//! plot_time_snapshots(
//!     &field,
//!     &[1000, 2000, 3000],
//!     &AdvectedGaussian::default(),
//!     "case1-timesnaps-cni.svg",
//!     None,
//! )?;
//!
//! // Every figure of a case
//! let report = run_case(&CaseConfig::case1().with_output_dir("figures"))?;
//! println!("{} files written", report.written.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `parallel`: load the scheme files of a case concurrently and evaluate
//!   reference curves with `rayon`

pub mod analytical;
pub mod case;
pub mod error;
pub mod grid;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod record;
pub mod snapshot;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use transport_post::prelude::*;
    //! ```
    pub use crate::analytical::{AdvectedGaussian, AnalyticalSolution, StationaryGaussian};
    pub use crate::case::{Case, CaseConfig, Scheme, SolverComparisonConfig, SolverKind, SolverSummary};
    pub use crate::error::PostError;
    pub use crate::grid::{load_grid, GridShape, ReshapedField};
    pub use crate::output::{
        export_snapshots_csv,
        plot_convergence_history,
        plot_scheme_comparison,
        plot_space_snapshots,
        plot_time_snapshots,
        plot_wall_time,
        CsvConfig,
        PlotConfig,
    };
    pub use crate::pipeline::{run_case, run_solver_comparison, CaseReport};
    pub use crate::record::SimulationRecord;
    pub use crate::snapshot::{SnapshotAxis, SnapshotSelection};
}
