//! Semiclassical cutoff law for the harmonic plateau.
//!
//! The highest harmonic photon energy is `Ip + 3.17 Up`, with
//! `Up = E₀²/(4ω²)` the ponderomotive energy. In scaled atomic units photon
//! energies are harmonic orders, so the result is returned as an order.

use std::f64::consts::PI;
use crate::{
    error::HhgResult,
    units::{ self, Quantity },
};

/// Coefficient of the ponderomotive energy in the cutoff law.
pub const CUTOFF_COEFF: f64 = 3.17;

fn laser_omega(wavelength: f64) -> HhgResult<f64> {
    Ok(2.0 * PI / units::to_sau(wavelength / units::c, Quantity::Time, wavelength)?)
}

/// Cutoff harmonic order for peak field `amplitude` [V/m], ionization
/// potential `ip` [J] and driving wavelength [m].
pub fn cutoff(amplitude: f64, ip: f64, wavelength: f64) -> HhgResult<f64> {
    let amplitude = units::to_sau(amplitude, Quantity::Field, wavelength)?;
    let ip = units::to_sau(ip, Quantity::Energy, wavelength)?;
    let omega = laser_omega(wavelength)?;
    let up = amplitude.powi(2) / 4.0 / omega.powi(2);
    Ok(ip + CUTOFF_COEFF * up)
}

/// Peak field [V/m] placing the cutoff at harmonic order `order`.
///
/// Orders below `ip` have no real solution and give NaN.
pub fn cutoff_amplitude(order: f64, ip: f64, wavelength: f64) -> HhgResult<f64> {
    let ip = units::to_sau(ip, Quantity::Energy, wavelength)?;
    let omega = laser_omega(wavelength)?;
    let up = (order - ip) / CUTOFF_COEFF;
    let amplitude = (4.0 * omega.powi(2) * up).sqrt();
    units::to_si(amplitude, Quantity::Field, wavelength)
}
