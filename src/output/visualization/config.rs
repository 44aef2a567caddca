//! Plot configuration shared across visualization modules
//!
//! Every renderer takes an optional [`PlotConfig`]; `None` selects the
//! preset matching the plot type, reproducing the fixed styling of the
//! transport comparison figures (axis window `[5, 45]`, ticks every 5,
//! `domain` / `solution` labels, no grid).

use plotters::prelude::*;

/// Where the legend box is anchored inside the plotting area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl LegendPosition {
    pub(crate) fn to_series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust,ignore
/// use transport_post::output::visualization::{PlotConfig, NO_TITLE};
///
/// let mut config = PlotConfig::time_snapshots(NO_TITLE);
/// config.y_range = Some((-0.1, 1.5));
/// config.width = 1920;
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Caption drawn above the chart; empty means no caption
    pub title: String,

    pub xlabel: String,

    pub ylabel: String,

    /// Fixed x window; `None` fits the data
    pub x_range: Option<(f64, f64)>,

    /// Fixed y window; `None` fits the data
    pub y_range: Option<(f64, f64)>,

    /// Distance between x tick labels; `None` lets plotters choose
    pub x_tick_step: Option<f64>,

    pub legend_position: LegendPosition,

    /// Opacity of the legend frame, 0.0 is fully transparent
    pub legend_alpha: f64,

    /// Anchor of the first annotation line, in data coordinates
    pub annotation_at: (f64, f64),

    /// Vertical distance between annotation lines, in data units
    pub annotation_spacing: f64,

    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: false)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: String::new(),
            xlabel: "domain".to_string(),
            ylabel: "solution".to_string(),
            x_range: Some((5.0, 45.0)),
            y_range: Some((-0.2, 1.0)),
            x_tick_step: Some(5.0),
            legend_position: LegendPosition::UpperLeft,
            legend_alpha: 0.0,
            annotation_at: (30.0, 0.5),
            annotation_spacing: 0.1,
            background: WHITE,
            line_width: 2,
            show_grid: false,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title
///
/// ```rust,ignore
/// let config = PlotConfig::space_snapshots(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    fn titled(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Numerical vs analytical history at fixed spatial points
    pub fn space_snapshots(title: impl IntoOptionalTitle) -> Self {
        Self::titled(title)
    }

    /// Numerical vs analytical profiles at fixed time steps
    pub fn time_snapshots(title: impl IntoOptionalTitle) -> Self {
        Self::titled(title)
    }

    /// All integration schemes against the analytical profile
    pub fn scheme_comparison(title: impl IntoOptionalTitle) -> Self {
        Self {
            y_range: Some((-0.1, 1.0)),
            legend_position: LegendPosition::UpperRight,
            legend_alpha: 0.8,
            ..Self::titled(title)
        }
    }

    /// Log-log residual history of the linear solvers
    pub fn convergence_history(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "number of iterations".to_string(),
            ylabel: "residual".to_string(),
            x_range: None,
            y_range: None,
            x_tick_step: None,
            legend_position: LegendPosition::UpperRight,
            legend_alpha: 0.8,
            ..Self::titled(title)
        }
    }

    /// Log-log wall time against problem size
    pub fn wall_time(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "number of nodes".to_string(),
            ylabel: "wall time [s]".to_string(),
            x_range: None,
            y_range: None,
            x_tick_step: None,
            legend_position: LegendPosition::LowerRight,
            legend_alpha: 0.8,
            ..Self::titled(title)
        }
    }

    /// Number of x labels implied by `x_tick_step` over `x_range`
    pub(crate) fn x_label_count(&self) -> Option<usize> {
        let (lo, hi) = self.x_range?;
        let step = self.x_tick_step?;
        if step <= 0.0 || hi <= lo {
            return None;
        }
        Some(((hi - lo) / step).round() as usize + 1)
    }
}
