//! Visualization of transport post-processing results
//!
//! Every renderer draws prepared curves with `plotters` and writes one image.
//! The backend follows the output extension, case-insensitively: `.svg`
//! uses the SVG backend, `.png`, `.jpg`/`.jpeg` and `.bmp` the bitmap
//! backend. Other extensions are rejected.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **snapshots**: One scheme against the reference at fixed rows or columns
//! - **schemes**: All schemes against the reference at one time step
//! - **solvers**: Log-log convergence and timing of the linear solvers
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use transport_post::output::visualization::{plot_time_snapshots, PlotConfig};
//!
//! let field = load_grid("case1-transport-cni.dat", GridShape::new(500, 3001))?;
//!
//! // Default styling
//! plot_time_snapshots(&field, &[1000, 2000, 3000], &AdvectedGaussian::default(), "cni.svg", None)?;
//!
//! // Custom styling
//! let mut config = PlotConfig::time_snapshots("Crank-Nicolson");
//! config.y_range = Some((-0.1, 2.0));
//! plot_time_snapshots(&field, &[1000], &AdvectedGaussian::default(), "cni.png", Some(&config))?;
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | History at fixed positions | `snapshots` | `plot_space_snapshots` |
//! | Profiles at fixed times | `snapshots` | `plot_time_snapshots` |
//! | Compare schemes at one time | `schemes` | `plot_scheme_comparison` |
//! | Residual vs iteration | `solvers` | `plot_convergence_history` |
//! | Wall time vs problem size | `solvers` | `plot_wall_time` |

pub mod config;
mod curves;
pub mod schemes;
pub mod snapshots;
pub mod solvers;

pub use config::{IntoOptionalTitle, LegendPosition, PlotConfig, NO_TITLE};
pub(crate) use curves::ImageFormat;

pub use schemes::plot_scheme_comparison;
pub use snapshots::{plot_space_snapshots, plot_time_snapshots};
pub use solvers::{plot_convergence_history, plot_wall_time};
