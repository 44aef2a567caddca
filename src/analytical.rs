//! Closed-form reference solutions of the 1-D transport problem
//!
//! Both references are Gaussian pulses travelling at unit speed, so the
//! profile depends on position and time only through `x - t`:
//!
//! | Reference | Formula |
//! |-----------|---------|
//! | [`AdvectedGaussian`] | $(4\pi\gamma t)^{-1/2} \exp\left(-\frac{(x-t)^2}{4\gamma t}\right)$ |
//! | [`StationaryGaussian`] | $(0.4\pi)^{-1/2} \exp\left(-2.5 (x-t)^2\right)$ |
//!
//! The advected pulse spreads with the diffusion constant `gamma`; the
//! stationary one keeps the shape of the initial condition
//! [`initial_condition`] (centred at `x = 10`) and only translates.

use std::f64::consts::PI;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Diffusion constant used by the transport cases
pub const DEFAULT_GAMMA: f64 = 0.01;

/// Ground-truth curve `u(x, t)`
pub trait AnalyticalSolution: Send + Sync {
    /// Value at position `x` and time `t`
    fn evaluate(&self, x: f64, t: f64) -> f64;

    fn name(&self) -> &str;

    /// Profile across space at a fixed time
    fn over_space(&self, xs: &[f64], t: f64) -> Vec<f64> {
        #[cfg(feature = "parallel")]
        {
            xs.par_iter().map(|&x| self.evaluate(x, t)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            xs.iter().map(|&x| self.evaluate(x, t)).collect()
        }
    }

    /// History at a fixed position across time
    fn over_time(&self, x: f64, ts: &[f64]) -> Vec<f64> {
        #[cfg(feature = "parallel")]
        {
            ts.par_iter().map(|&t| self.evaluate(x, t)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            ts.iter().map(|&t| self.evaluate(x, t)).collect()
        }
    }
}

/// Gaussian pulse advected at unit speed with diffusive spreading
///
/// Singular at `t = 0` (a Dirac pulse); the value there is not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvectedGaussian {
    pub gamma: f64,
}

impl AdvectedGaussian {
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl Default for AdvectedGaussian {
    fn default() -> Self {
        Self::new(DEFAULT_GAMMA)
    }
}

impl AnalyticalSolution for AdvectedGaussian {
    fn evaluate(&self, x: f64, t: f64) -> f64 {
        let spread = 4.0 * self.gamma * t;
        (PI * spread).powf(-0.5) * (-(x - t).powi(2) / spread).exp()
    }

    fn name(&self) -> &str {
        "advected gaussian"
    }
}

/// Non-spreading Gaussian translated at unit speed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StationaryGaussian;

impl AnalyticalSolution for StationaryGaussian {
    fn evaluate(&self, x: f64, t: f64) -> f64 {
        (0.4 * PI).powf(-0.5) * (-2.5 * (x - t).powi(2)).exp()
    }

    fn name(&self) -> &str {
        "stationary gaussian"
    }
}

/// Initial pulse of the transport problem, centred at `x = 10`
pub fn initial_condition(x: f64) -> f64 {
    (0.4 * PI).powf(-0.5) * (-2.5 * (x - 10.0) * (x - 10.0)).exp()
}
