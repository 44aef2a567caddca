//! Run configuration: which files to read, which snapshots to take, where to
//! write the figures
//!
//! A transport case is solved by three time-integration [`Scheme`]s; each
//! scheme writes one record file named after the case and the scheme. The
//! linear-solver study writes one convergence history and one timing table
//! per [`SolverKind`].
//!
//! # Example
//!
//! ```rust,ignore
//! use transport_post::case::CaseConfig;
//!
//! let config = CaseConfig::case2()
//!     .with_data_dir("runs/2024-03")
//!     .with_output_dir("figures")
//!     .with_image_extension("png");
//! ```

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::analytical::{AdvectedGaussian, AnalyticalSolution, StationaryGaussian, DEFAULT_GAMMA};
use crate::error::{PostError, Result};
use crate::grid::GridShape;
use crate::output::visualization::ImageFormat;
use crate::record::SimulationRecord;

// =================================================================================================
// Integration schemes
// =================================================================================================

/// Time-integration scheme of the transport solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    ExplicitEuler,
    ImplicitEuler,
    CrankNicolson,
}

impl Scheme {
    /// Comparison plot order
    pub const ALL: [Scheme; 3] = [Scheme::ExplicitEuler, Scheme::ImplicitEuler, Scheme::CrankNicolson];

    /// Tag used in input file names (`case1-transport-{tag}.dat`)
    pub fn data_tag(self) -> &'static str {
        match self {
            Scheme::ExplicitEuler => "explicit-euler",
            Scheme::ImplicitEuler => "implicit-euler",
            Scheme::CrankNicolson => "cni",
        }
    }

    /// Tag used in figure names (`case1-spacesnap-{tag}.svg`)
    pub fn plot_tag(self) -> &'static str {
        match self {
            Scheme::ExplicitEuler => "expeuler",
            Scheme::ImplicitEuler => "impeuler",
            Scheme::CrankNicolson => "cni",
        }
    }

    /// Legend label
    pub fn label(self) -> &'static str {
        match self {
            Scheme::ExplicitEuler => "explicit euler",
            Scheme::ImplicitEuler => "implicit euler",
            Scheme::CrankNicolson => "crank nicolson",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =================================================================================================
// Physical cases
// =================================================================================================

/// Physical case, which fixes the analytical reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// Diffusive pulse, compared with [`AdvectedGaussian`]
    Advected,
    /// Pure transport, compared with [`StationaryGaussian`]
    Stationary,
}

impl Case {
    /// Number used in file names
    pub fn number(self) -> u32 {
        match self {
            Case::Advected => 1,
            Case::Stationary => 2,
        }
    }

    /// Parse a target name such as `case1`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "case1" => Some(Case::Advected),
            "case2" => Some(Case::Stationary),
            _ => None,
        }
    }

    /// Analytical reference for this case
    ///
    /// `gamma` only affects the advected pulse.
    pub fn reference(self, gamma: f64) -> Box<dyn AnalyticalSolution> {
        match self {
            Case::Advected => Box::new(AdvectedGaussian::new(gamma)),
            Case::Stationary => Box::new(StationaryGaussian),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "case{}", self.number())
    }
}

// =================================================================================================
// Case configuration
// =================================================================================================

/// Everything needed to post-process one case
///
/// Defaults reproduce the production runs: a 500 x 3001 grid, space
/// snapshots at rows 125 and 250 (x = 15 and x = 25), time snapshots at
/// columns 1000, 2000 and 3000, scheme comparison at column 0, SVG figures
/// written next to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseConfig {
    pub case: Case,

    pub shape: GridShape,

    /// Grid rows plotted across time
    pub space_rows: Vec<usize>,

    /// Physical position of each entry of `space_rows`
    pub space_positions: Vec<f64>,

    /// Grid columns plotted across space
    pub time_columns: Vec<usize>,

    /// Column used for the scheme comparison
    pub comparison_column: usize,

    /// Time step printed on the comparison plot (seconds)
    pub time_step: f64,

    /// Diffusion constant of the advected reference
    pub gamma: f64,

    /// Figure file extension, `svg` or a bitmap format such as `png`
    pub image_extension: String,

    pub data_dir: PathBuf,

    pub output_dir: PathBuf,

    /// Also write the extracted snapshot curves as CSV
    pub export_csv: bool,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self::new(Case::Advected)
    }
}

impl CaseConfig {
    pub fn new(case: Case) -> Self {
        Self {
            case,
            shape: GridShape::new(500, 3001),
            space_rows: vec![125, 250],
            space_positions: vec![15.0, 25.0],
            time_columns: vec![1000, 2000, 3000],
            comparison_column: 0,
            time_step: 0.001,
            gamma: DEFAULT_GAMMA,
            image_extension: "svg".to_string(),
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            export_csv: false,
        }
    }

    /// Diffusive pulse case
    pub fn case1() -> Self {
        Self::new(Case::Advected)
    }

    /// Pure transport case
    pub fn case2() -> Self {
        Self::new(Case::Stationary)
    }

    pub fn with_shape(mut self, nx: usize, ny: usize) -> Self {
        self.shape = GridShape::new(nx, ny);
        self
    }

    pub fn with_space_snapshots(mut self, rows: Vec<usize>, positions: Vec<f64>) -> Self {
        self.space_rows = rows;
        self.space_positions = positions;
        self
    }

    pub fn with_time_snapshots(mut self, columns: Vec<usize>) -> Self {
        self.time_columns = columns;
        self
    }

    pub fn with_comparison_column(mut self, column: usize) -> Self {
        self.comparison_column = column;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_image_extension(mut self, extension: impl Into<String>) -> Self {
        self.image_extension = extension.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_csv_export(mut self, enabled: bool) -> Self {
        self.export_csv = enabled;
        self
    }

    /// Check parameters that do not depend on the data
    ///
    /// Index bounds are checked against the loaded grids when plotting.
    ///
    /// # Errors
    ///
    /// [`PostError::InvalidData`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.shape.is_empty() {
            return Err(PostError::InvalidData(format!(
                "grid shape {} x {} is empty",
                self.shape.nx, self.shape.ny
            )));
        }
        if self.space_rows.len() != self.space_positions.len() {
            return Err(PostError::InvalidData(format!(
                "{} space snapshot rows but {} positions",
                self.space_rows.len(),
                self.space_positions.len()
            )));
        }
        if self.space_positions.iter().any(|x| !x.is_finite()) {
            return Err(PostError::InvalidData(
                "space snapshot positions must be finite".to_string(),
            ));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(PostError::InvalidData(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(PostError::InvalidData(format!(
                "diffusion constant must be positive, got {}",
                self.gamma
            )));
        }
        check_image_extension(&self.image_extension)
    }

    pub fn reference(&self) -> Box<dyn AnalyticalSolution> {
        self.case.reference(self.gamma)
    }

    /// Record written by the solver for `scheme`
    pub fn input_path(&self, scheme: Scheme) -> PathBuf {
        self.data_dir
            .join(format!("{}-transport-{}.dat", self.case, scheme.data_tag()))
    }

    pub fn space_plot_path(&self, scheme: Scheme) -> PathBuf {
        self.output_file(&format!("spacesnap-{}", scheme.plot_tag()), &self.image_extension)
    }

    pub fn time_plot_path(&self, scheme: Scheme) -> PathBuf {
        self.output_file(&format!("timesnaps-{}", scheme.plot_tag()), &self.image_extension)
    }

    pub fn comparison_plot_path(&self) -> PathBuf {
        self.output_file("solution", &self.image_extension)
    }

    pub fn space_csv_path(&self, scheme: Scheme) -> PathBuf {
        self.output_file(&format!("spacesnap-{}", scheme.plot_tag()), "csv")
    }

    pub fn time_csv_path(&self, scheme: Scheme) -> PathBuf {
        self.output_file(&format!("timesnaps-{}", scheme.plot_tag()), "csv")
    }

    fn output_file(&self, stem: &str, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.{}", self.case, stem, extension))
    }
}

// =================================================================================================
// Linear solver study
// =================================================================================================

/// Iterative linear solver compared in the convergence study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Jacobi,
    GaussSeidel,
    Sor,
}

impl SolverKind {
    pub const ALL: [SolverKind; 3] = [SolverKind::Jacobi, SolverKind::GaussSeidel, SolverKind::Sor];

    /// Legend label and file name prefix
    pub fn label(self) -> &'static str {
        match self {
            SolverKind::Jacobi => "jacobi",
            SolverKind::GaussSeidel => "seidel",
            SolverKind::Sor => "sor",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Convergence history and timing of one linear solver
///
/// Columns are kept flat; they are never reshaped.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSummary {
    pub kind: SolverKind,
    pub iterations: Vec<f64>,
    pub residuals: Vec<f64>,
    pub nodes: Vec<f64>,
    pub wall_times: Vec<f64>,
}

impl SolverSummary {
    /// Build from the history (`iteration`, `residual`) and timing
    /// (`npts`, `wall_time`) records
    ///
    /// # Errors
    ///
    /// [`PostError::MissingField`] if a record lacks one of its columns.
    pub fn from_records(
        kind: SolverKind,
        history: &SimulationRecord,
        timing: &SimulationRecord,
    ) -> Result<Self> {
        let summary = Self {
            kind,
            iterations: history.field("iteration")?.to_vec(),
            residuals: history.field("residual")?.to_vec(),
            nodes: timing.field("npts")?.to_vec(),
            wall_times: timing.field("wall_time")?.to_vec(),
        };
        debug!(
            solver = kind.label(),
            iterations = summary.iterations.len(),
            sizes = summary.nodes.len(),
            "solver summary assembled"
        );
        Ok(summary)
    }

    /// Load both records of `kind` from `config.data_dir`
    pub fn load(kind: SolverKind, config: &SolverComparisonConfig) -> Result<Self> {
        let history = SimulationRecord::load(config.history_path(kind))?;
        let timing = SimulationRecord::load(config.timing_path(kind))?;
        Self::from_records(kind, &history, &timing)
    }
}

/// Locations of the linear-solver study files
#[derive(Debug, Clone, PartialEq)]
pub struct SolverComparisonConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub image_extension: String,
}

impl Default for SolverComparisonConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            image_extension: "svg".to_string(),
        }
    }
}

impl SolverComparisonConfig {
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_image_extension(mut self, extension: impl Into<String>) -> Self {
        self.image_extension = extension.into();
        self
    }

    /// Reject image extensions no backend can write
    pub fn validate(&self) -> Result<()> {
        check_image_extension(&self.image_extension)
    }

    pub fn history_path(&self, kind: SolverKind) -> PathBuf {
        self.data_dir.join(format!("{}-history.dat", kind.label()))
    }

    pub fn timing_path(&self, kind: SolverKind) -> PathBuf {
        self.data_dir.join(format!("{}-timing.dat", kind.label()))
    }

    pub fn history_plot_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("solver-history.{}", self.image_extension))
    }

    pub fn wall_time_plot_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("solver-walltime.{}", self.image_extension))
    }
}

fn check_image_extension(extension: &str) -> Result<()> {
    match ImageFormat::from_extension(extension) {
        Some(_) => Ok(()),
        None => Err(PostError::InvalidData(format!(
            "unsupported image extension '{}', expected one of {}",
            extension,
            ImageFormat::EXTENSIONS.join(", ")
        ))),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
