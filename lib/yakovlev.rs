//! Dipole response from a sum over classical returns.
//!
//! Applying the saddle-point approximation to the travel-time integral as
//! well reduces the Lewenstein integral to a sum over the classical
//! trajectories that return to the parent ion at each observation time
//! (Yakovlev, Ivanov, and Krausz, Opt. Express **15**, 15351 (2007)). Each
//! return contributes the product of an ionization amplitude taken from the
//! depletion of the ground state, a propagation amplitude with the
//! quasi-classical phase, and a recombination amplitude.
//!
//! Only linearly polarized (one-dimensional) fields are supported. Without
//! depletion of the ground state there is no ionization and the response is
//! identically zero.

use std::f64::consts::{ FRAC_1_SQRT_2, PI };
use ndarray as nd;
use num_complex::Complex64 as C64;
use rayon::prelude::*;
use crate::{
    error::{ HhgError, HhgResult },
    integrate::FieldHistory,
    lewenstein::check_inputs,
    units::{ self, Quantity },
};

/// Optional inputs to [`yakovlev`].
///
/// Time axis, field, ionization potential and output are in SI units when
/// `wavelength` is set and in scaled atomic units otherwise.
#[derive(Clone, Debug)]
pub struct YakovlevParams<'a> {
    /// Ionization potential.
    pub ip: f64,
    /// Driving wavelength in meters; selects SI inputs and output.
    pub wavelength: Option<f64>,
    /// Number of returns to look for at each sample, including skipped ones.
    pub trajectories: usize,
    /// Number of returns, counted from the shortest, that do not contribute.
    pub skip_trajectories: usize,
    /// Longest travel time considered, in optical periods; `None` or a
    /// non-finite value means the whole time axis.
    pub max_periods: Option<f64>,
    /// Weight applied to each contribution at its birth sample; defaults to
    /// all ones.
    pub tb_window: Option<&'a nd::Array1<f64>>,
}

impl<'a> YakovlevParams<'a> {
    /// Default parameters for ionization potential `ip`: the short and long
    /// trajectories within two optical periods.
    pub fn new(ip: f64) -> Self {
        Self {
            ip,
            wavelength: None,
            trajectories: 2,
            skip_trajectories: 0,
            max_periods: Some(2.0),
            tb_window: None,
        }
    }

    pub fn with_wavelength(mut self, wavelength: f64) -> Self {
        self.wavelength = Some(wavelength);
        self
    }

    pub fn with_trajectories(mut self, trajectories: usize) -> Self {
        self.trajectories = trajectories;
        self
    }

    pub fn with_skip_trajectories(mut self, skip: usize) -> Self {
        self.skip_trajectories = skip;
        self
    }

    pub fn with_max_periods(mut self, max_periods: Option<f64>) -> Self {
        self.max_periods = max_periods;
        self
    }

    pub fn with_tb_window(mut self, tb_window: &'a nd::Array1<f64>) -> Self {
        self.tb_window = Some(tb_window);
        self
    }
}

/// Index of the last sample of the zero-based SAU time axis `t` lying
/// strictly before `max_periods` optical periods.
///
/// Lag indices at or beyond the result are never searched for returns.
pub fn max_return_index(t: &[f64], max_periods: Option<f64>) -> usize {
    let t_max = t.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_periods
        = max_periods
        .filter(|periods| periods.is_finite())
        .unwrap_or(t_max / (2.0 * PI) + 1.0);
    t.iter().rposition(|tk| *tk < 2.0 * PI * max_periods)
        .unwrap_or(0)
}

fn check_trajectory_inputs(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    at: &nd::Array1<f64>,
    tb_window: Option<&nd::Array1<f64>>,
) -> HhgResult<()>
{
    let dims = check_inputs(t, Et, Some(at))?;
    if dims != 1 {
        return Err(HhgError::TrajectoryDims(dims));
    }
    if let Some(tb) = tb_window {
        if tb.len() != t.len() {
            return Err(HhgError::LengthMismatch {
                what: "birth-time window", len: tb.len(), expected: t.len() });
        }
    }
    Ok(())
}

/// Compute the dipole response to the one-dimensional field `Et` (shape
/// `[t.len(), 1]`) given the ground-state amplitude `at`.
pub fn yakovlev(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    at: &nd::Array1<f64>,
    params: &YakovlevParams,
) -> HhgResult<nd::Array1<f64>>
{
    check_trajectory_inputs(t, Et, at, params.tb_window)?;
    let (t_sau, Et_sau, ip)
        = match params.wavelength {
            Some(wavelength) => (
                units::to_sau(t, Quantity::Time, wavelength)?,
                units::to_sau(Et, Quantity::Field, wavelength)?,
                units::to_sau(params.ip, Quantity::Energy, wavelength)?,
            ),
            None => (t.clone(), Et.clone(), params.ip),
        };

    let default_tb: nd::Array1<f64>;
    let tb_window: &nd::Array1<f64>
        = match params.tb_window {
            Some(tb) => tb,
            None => {
                default_tb = nd::Array1::ones(t.len());
                &default_tb
            },
        };

    let t0 = t_sau[0];
    let shifted: Vec<f64> = t_sau.iter().map(|tk| *tk - t0).collect();
    let max_tau_i = max_return_index(&shifted, params.max_periods);

    let d = yakovlev_sau(
        &t_sau,
        &Et_sau,
        ip,
        at,
        tb_window,
        max_tau_i,
        params.trajectories,
        params.skip_trajectories,
    )?;
    match params.wavelength {
        Some(wavelength) => units::to_si(d, Quantity::Dipole, wavelength),
        None => Ok(d),
    }
}

/// Compute the dipole response with all inputs in scaled atomic units and no
/// defaults.
///
/// Returns are searched for at lag indices `1..max_tau_i`. The time axis is
/// shifted internally to start at zero.
#[allow(clippy::too_many_arguments)]
pub fn yakovlev_sau(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    ip: f64,
    at: &nd::Array1<f64>,
    tb_window: &nd::Array1<f64>,
    max_tau_i: usize,
    trajectories: usize,
    skip: usize,
) -> HhgResult<nd::Array1<f64>>
{
    check_trajectory_inputs(t, Et, at, Some(tb_window))?;
    log::debug!(
        "yakovlev: {} samples, lags < {}, {} trajectories ({} skipped)",
        t.len(), max_tau_i, trajectories, skip,
    );
    let scan = ReturnScan::new(t, Et, max_tau_i, trajectories);
    let at: Vec<f64> = at.iter().copied().collect();
    let tb: Vec<f64> = tb_window.iter().copied().collect();
    let n = scan.t.len();
    let out: Vec<f64>
        = (0..n).into_par_iter()
        .map(|i| {
            scan.returns(i).into_iter()
                .skip(skip)
                .map(|k| scan.contribution(ip, &at, &tb, i, k))
                .sum()
        })
        .collect();
    Ok(out.into())
}

/// List, for every sample, the lag indices of the first `trajectories`
/// classical returns found within `1..max_tau_i`, shortest first.
///
/// Inputs are in scaled atomic units. The first sample never has returns.
pub fn find_returns(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    max_tau_i: usize,
    trajectories: usize,
) -> HhgResult<Vec<Vec<usize>>>
{
    let dims = check_inputs(t, Et, None)?;
    if dims != 1 {
        return Err(HhgError::TrajectoryDims(dims));
    }
    let scan = ReturnScan::new(t, Et, max_tau_i, trajectories);
    Ok((0..scan.t.len()).into_par_iter().map(|i| scan.returns(i)).collect())
}

struct ReturnScan {
    t: Vec<f64>,
    hist: FieldHistory<1>,
    max_tau_i: usize,
    trajectories: usize,
}

impl ReturnScan {
    fn new(
        t: &nd::Array1<f64>,
        Et: &nd::Array2<f64>,
        max_tau_i: usize,
        trajectories: usize,
    ) -> Self
    {
        let t0 = t[0];
        let t: Vec<f64> = t.iter().map(|tk| *tk - t0).collect();
        let hist = FieldHistory::new(&t, Et);
        Self { t, hist, max_tau_i, trajectories }
    }

    // An electron born at rest at sample i - k sits at A(t_b) τ + B(t_b)
    // relative to B(t) at sample i; each sign change of the difference (or
    // exact zero) along increasing k is a return.
    fn returns(&self, i: usize) -> Vec<usize> {
        let mut found: Vec<usize> = Vec::new();
        if i == 0 || self.trajectories == 0 { return found; }
        let A = |j: usize| self.hist.A[j][0];
        let B = |j: usize| self.hist.B[j][0];
        let ref_B = B(i);
        let mut ref_sign = self.hist.E[i][0];
        for k in 1..self.max_tau_i.min(i + 1) {
            let line = A(i - k) * self.t[k] + B(i - k);
            if (line - ref_B) * ref_sign > 0.0 { continue; }
            found.push(k);
            if found.len() == self.trajectories { break; }
            ref_sign = line - ref_B;
        }
        found
    }

    fn contribution(&self, ip: f64, at: &[f64], tb: &[f64], i: usize, k: usize)
        -> f64
    {
        let t = &self.t;
        let b = i - k;
        let tau = t[k];
        let S = self.hist.action(ip, i, k, tau);
        let dA = self.hist.A[b][0] - self.hist.A[i][0];
        let dt = t[b + 1] - t[b];

        let a_ion = ((at[b].powi(2) - at[b + 1].powi(2)) / dt).sqrt();
        let a_pr
            = (2.0 * PI).powf(1.5) / tau / tau.sqrt()
            * (2.0 * ip).sqrt().sqrt() / self.hist.E[b][0].abs()
            * C64::from_polar(1.0, -S);
        let a_rec = at[i] * dA / (2.0 * ip + dA * dA).powi(3);
        let phase = C64::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
        (phase * tb[b] * a_ion * a_pr * a_rec).re
    }
}
