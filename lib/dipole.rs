//! Transition dipole matrix elements d(p) between the ground state and a
//! continuum state of canonical momentum p.
//!
//! The engines need d(p) at arbitrary vector momenta in 1, 2, or 3 dimensions.
//! Two providers are available, collected in the closed enum
//! [`DipoleElements`]:
//! - [`Hydrogen`]: the closed form for a hydrogen-like 1s ground state,
//!   ```text
//!   d(p) = i 2^(7/2) α^(5/4) / π · p / (p² + α)³
//!   ```
//!   with `α = 2 Ip` by default.
//! - [`SymmetricInterpolate`]: linear interpolation of a radial table d(|p|)
//!   sampled on a uniform grid, with the direction of the returned vector taken
//!   from p. This is the appropriate form for any spherically symmetric ground
//!   state, and it obeys d(-p) = -d(p) exactly.
//!
//! Models are immutable after construction and can be shared freely between
//! engine calls and threads.

use std::f64::consts::PI;
use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ HhgError, HhgResult },
    units::{ self, Quantity },
    vector::Vector,
};

/// Relative tolerance on the spacing of tabulated momentum grids.
pub const GRID_RTOL: f64 = 1e-5;

pub(crate) fn check_dims(dims: usize) -> HhgResult<()> {
    (1..=3).contains(&dims).then_some(())
        .ok_or(HhgError::UnsupportedDims(dims))
}

/// Hydrogen-like dipole elements with configurable potential depth `alpha`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hydrogen {
    dims: usize,
    alpha: f64,
    prefactor: C64,
}

impl Hydrogen {
    /// Create a new model for `dims` spatial dimensions from the depth
    /// parameter `alpha` (`2 Ip` for a true hydrogen-like state).
    pub fn new(dims: usize, alpha: f64) -> HhgResult<Self> {
        check_dims(dims)?;
        let prefactor = C64::i() * 2.0_f64.powf(3.5) * alpha.powf(1.25) / PI;
        Ok(Self { dims, alpha, prefactor })
    }

    /// Return the depth parameter.
    pub fn alpha(&self) -> f64 { self.alpha }

    /// Return the number of spatial dimensions.
    pub fn dims(&self) -> usize { self.dims }

    /// Evaluate the dipole element at momentum `p`.
    pub fn get<const N: usize>(&self, p: &Vector<N, f64>) -> Vector<N, C64> {
        let denom = (p.norm_sqr() + self.alpha).powi(3);
        p.to_complex() * (self.prefactor / denom)
    }
}

/// Radially tabulated dipole elements, linearly interpolated in |p|.
#[derive(Clone, Debug, PartialEq)]
pub struct SymmetricInterpolate {
    dims: usize,
    dp: f64,
    d: Vec<C64>,
}

impl SymmetricInterpolate {
    /// Create a new model from a uniform momentum grid `p` and samples `d`.
    ///
    /// The grid must either start at zero or extend below zero with a grid
    /// point at zero; in the latter case only the non-negative half is kept,
    /// since the negative half is fixed by symmetry. The samples are copied.
    pub fn new(dims: usize, p: &[f64], d: &[C64]) -> HhgResult<Self> {
        check_dims(dims)?;
        if p.len() != d.len() {
            return Err(HhgError::InvalidGrid(format!(
                "momentum grid has {} points but there are {} samples",
                p.len(), d.len(),
            )));
        }
        if p.len() < 2 {
            return Err(HhgError::InvalidGrid(
                "at least two grid points are required".to_string()));
        }
        let (dp_min, dp_max)
            = p.iter().tuple_windows()
            .map(|(pk, pkp1)| *pkp1 - *pk)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), dpk| {
                (lo.min(dpk), hi.max(dpk))
            });
        if !(dp_min > 0.0) {
            return Err(HhgError::InvalidGrid(
                "momentum grid must be strictly increasing".to_string()));
        }
        if (dp_max - dp_min).abs() > GRID_RTOL * dp_min.abs() {
            return Err(HhgError::InvalidGrid(format!(
                "momentum grid spacing is not uniform ({:e} to {:e})",
                dp_min, dp_max,
            )));
        }
        let dp = dp_min;
        let zero_tol = GRID_RTOL * dp;
        let k0: usize
            = if p[0].abs() <= zero_tol {
                0
            } else if p[0] < 0.0 {
                let k0 = (-p[0] / dp).round() as usize;
                if k0 >= p.len() || p[k0].abs() > zero_tol {
                    return Err(HhgError::InvalidGrid(
                        "momentum grid does not contain p = 0".to_string()));
                }
                k0
            } else {
                return Err(HhgError::InvalidGrid(format!(
                    "momentum grid must start at or below zero, got {:e}",
                    p[0],
                )));
            };
        if p.len() - k0 < 2 {
            return Err(HhgError::InvalidGrid(
                "momentum grid has fewer than two points at p ≥ 0".to_string()));
        }
        Ok(Self { dims, dp, d: d[k0..].to_vec() })
    }

    /// Return the grid spacing.
    pub fn dp(&self) -> f64 { self.dp }

    /// Return the stored radial samples, starting at p = 0.
    pub fn samples(&self) -> &[C64] { &self.d }

    /// Return the number of spatial dimensions.
    pub fn dims(&self) -> usize { self.dims }

    /// Evaluate the dipole element at momentum `p`.
    ///
    /// At `p = 0` the direction is undefined and every component is set to the
    /// first sample; beyond the end of the table the element is zero.
    pub fn get<const N: usize>(&self, p: &Vector<N, f64>) -> Vector<N, C64> {
        let p_abs = p.norm();
        if p_abs == 0.0 {
            return Vector::splat(self.d[0]);
        }
        let x = p_abs / self.dp;
        // NaN falls through to the interpolation and propagates
        if !(x >= (self.d.len() - 1) as f64) {
            let k = x as usize;
            let d_before = self.d[k];
            let d_after = self.d[k + 1];
            let radial = (d_after - d_before) * (x - k as f64) + d_before;
            (*p / p_abs).to_complex() * radial
        } else {
            Vector::zeros()
        }
    }
}

/// A dipole element provider.
#[derive(Clone, Debug, PartialEq)]
pub enum DipoleElements {
    Hydrogen(Hydrogen),
    SymmetricInterpolate(SymmetricInterpolate),
}

impl From<Hydrogen> for DipoleElements {
    fn from(model: Hydrogen) -> Self { Self::Hydrogen(model) }
}

impl From<SymmetricInterpolate> for DipoleElements {
    fn from(model: SymmetricInterpolate) -> Self { Self::SymmetricInterpolate(model) }
}

impl DipoleElements {
    /// Hydrogen-like elements for ionization potential `ip` in scaled atomic
    /// units, with `alpha = 2 ip`.
    pub fn hydrogen(dims: usize, ip: f64) -> HhgResult<Self> {
        Hydrogen::new(dims, 2.0 * ip).map(Self::from)
    }

    /// Hydrogen-like elements with `alpha = factor · ip`.
    pub fn hydrogen_with_alpha(dims: usize, ip: f64, factor: f64)
        -> HhgResult<Self>
    {
        Hydrogen::new(dims, factor * ip).map(Self::from)
    }

    /// Like [`Self::hydrogen`], but with `ip` given in joules.
    pub fn hydrogen_si(dims: usize, ip: f64, wavelength: f64)
        -> HhgResult<Self>
    {
        let ip = units::to_sau(ip, Quantity::Energy, wavelength)?;
        Self::hydrogen(dims, ip)
    }

    /// Interpolated elements from a uniform grid in scaled atomic units.
    pub fn symmetric_interpolate(dims: usize, p: &[f64], d: &[C64])
        -> HhgResult<Self>
    {
        SymmetricInterpolate::new(dims, p, d).map(Self::from)
    }

    /// Like [`Self::symmetric_interpolate`], but with momenta in kg m/s and
    /// dipole elements in C m.
    pub fn symmetric_interpolate_si(
        dims: usize,
        p: &nd::Array1<f64>,
        d: &nd::Array1<C64>,
        wavelength: f64,
    ) -> HhgResult<Self>
    {
        let p = units::to_sau(p, Quantity::Momentum, wavelength)?;
        let d = units::to_sau(d, Quantity::Dipole, wavelength)?;
        let p: Vec<f64> = p.iter().copied().collect();
        let d: Vec<C64> = d.iter().copied().collect();
        Self::symmetric_interpolate(dims, &p, &d)
    }

    /// Return the number of spatial dimensions the model was built for.
    pub fn dims(&self) -> usize {
        match self {
            Self::Hydrogen(model) => model.dims(),
            Self::SymmetricInterpolate(model) => model.dims(),
        }
    }

    /// Evaluate the dipole element at momentum `p`.
    pub fn get<const N: usize>(&self, p: &Vector<N, f64>) -> Vector<N, C64> {
        match self {
            Self::Hydrogen(model) => model.get(p),
            Self::SymmetricInterpolate(model) => model.get(p),
        }
    }
}
