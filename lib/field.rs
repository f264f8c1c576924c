//! Driving-field synthesis.

use std::f64::consts::PI;
use ndarray as nd;
use crate::units;

/// A linearly polarized Gaussian pulse, all parameters in SI units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GaussianPulse {
    /// Central wavelength [m]
    pub wavelength: f64,
    /// Full width at half maximum of the intensity envelope [s]
    pub fwhm: f64,
    /// Peak intensity [W m⁻²]
    pub intensity: f64,
    /// Carrier-envelope phase [rad]
    pub cep: f64,
}

impl GaussianPulse {
    /// Optical period [s].
    pub fn period(&self) -> f64 { self.wavelength / units::c }

    /// Peak field strength [V m⁻¹].
    pub fn amplitude(&self) -> f64 {
        (2.0 * self.intensity / units::c / units::eps0).sqrt()
    }

    /// 1/e half-width of the field envelope [s].
    pub fn envelope_width(&self) -> f64 {
        self.fwhm / 2.0 / 2.0_f64.sqrt().ln().sqrt()
    }

    /// Time axis spanning `periods` optical periods on either side of the
    /// peak with `points_per_period` intervals per period.
    pub fn time_axis(&self, periods: usize, points_per_period: usize)
        -> nd::Array1<f64>
    {
        let T = self.period();
        let half = periods as f64 * T;
        nd::Array1::linspace(-half, half, 2 * periods * points_per_period + 1)
    }

    /// Field value at time `t` [s].
    pub fn field_at(&self, t: f64) -> f64 {
        let tau = self.envelope_width();
        let omega = 2.0 * PI / self.period();
        (-(t / tau).powi(2)).exp() * (omega * t + self.cep).cos() * self.amplitude()
    }

    /// Sample the field on `t`, shaped `[t.len(), 1]` for the engines.
    pub fn field(&self, t: &nd::Array1<f64>) -> nd::Array2<f64> {
        t.mapv(|tk| self.field_at(tk)).insert_axis(nd::Axis(1))
    }
}
