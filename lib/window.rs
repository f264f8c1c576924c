//! Travel-time weights for the Lewenstein integral.
//!
//! The integral over travel time τ is in principle unbounded, but it is
//! dominated by the short and long trajectories returning within about one
//! optical cycle. The weights keep a flat plateau of `periods_full` cycles and
//! then roll off smoothly over `periods_taper` cycles with a cos² taper, which
//! also bounds the cost of the integral to `O(N W)`.

use std::f64::consts::PI;
use ndarray as nd;

/// Shape parameters of the travel-time window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindowParams {
    /// Optical period in the units of the time axis.
    pub period: f64,
    /// Length of the flat part, in periods.
    pub periods_full: f64,
    /// Length of the taper, in periods.
    pub periods_taper: f64,
}

impl Default for WindowParams {
    /// One period of flat weight followed by a half-period taper, with the
    /// period expressed in scaled atomic units (2π).
    fn default() -> Self {
        Self { period: 2.0 * PI, periods_full: 1.0, periods_taper: 0.5 }
    }
}

impl WindowParams {
    /// Default window shape for an optical period `period`.
    pub fn with_period(period: f64) -> Self {
        Self { period, ..Self::default() }
    }

    /// Generate the weights for the time axis `tau`.
    pub fn weights(&self, tau: &nd::Array1<f64>) -> nd::Array1<f64> {
        get_weights(tau, self.period, self.periods_full, self.periods_taper)
    }
}

/// Generate travel-time weights for the time axis `tau`.
///
/// With `n_full` the number of samples within `periods_full · period` of the
/// first sample and `n_taper` the same for `periods_taper`, the result has
/// `n_full` ones followed by `n_taper` samples of
/// `cos(π/2 · k / n_taper)²`, `k = 0, ..., n_taper - 1`.
pub fn get_weights(
    tau: &nd::Array1<f64>,
    period: f64,
    periods_full: f64,
    periods_taper: f64,
) -> nd::Array1<f64>
{
    let Some(tau0) = tau.first().copied() else {
        return nd::Array1::zeros(0);
    };
    let count = |periods: f64| -> usize {
        tau.iter().filter(|tk| **tk - tau0 <= periods * period).count()
    };
    let n_full = count(periods_full);
    let n_taper = count(periods_taper);
    let taper
        = (0..n_taper)
        .map(|k| (PI / 2.0 * k as f64 / n_taper as f64).cos().powi(2));
    std::iter::repeat(1.0).take(n_full)
        .chain(taper)
        .collect()
}
