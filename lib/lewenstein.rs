//! Dipole response in the Lewenstein strong-field approximation.
//!
//! For every observation time `t` the induced dipole is the integral over
//! travel time `τ` of ionization at `t - τ`, free propagation with the
//! stationary momentum, and recombination at `t`:
//! ```text
//! x(t) = 2 Im ∫₀^∞ dτ w(τ) a(t) a(t - τ) (π / (ε + i τ / 2))^(3/2)
//!            d*(p - A(t)) [d(p - A(t - τ)) · E(t - τ)] exp(-i S(t, τ))
//! ```
//! where `p = (B(t) - B(t - τ)) / τ` and `S` is the quasi-classical action
//! (see [`crate::integrate`]). `ε` regularizes the τ → 0 end of the integral;
//! `w` is the travel-time window and `a` the ground-state amplitude (Cao et
//! al., Phys. Rev. A **74**, 063415 (2006)).
//!
//! The kernel assumes a uniformly sampled time axis starting at zero, so that
//! the `k`-th sample doubles as the travel time for lag index `k`.

use std::f64::consts::PI;
use ndarray as nd;
use num_complex::Complex64 as C64;
use rayon::prelude::*;
use crate::{
    dipole::{ check_dims, DipoleElements },
    error::{ HhgError, HhgResult },
    integrate::FieldHistory,
    units::{ self, Quantity },
    vector::Vector,
    window::get_weights,
};

/// Default width of the τ → 0 regularization, in scaled atomic units of time.
pub const EPSILON_T: f64 = 1e-4;

/// Optional inputs to [`lewenstein`].
///
/// Everything is in scaled atomic units unless `wavelength` is set, in which
/// case the time axis, field, ionization potential and output are in SI units
/// (weights and ground-state amplitude are dimensionless either way).
#[derive(Clone, Debug)]
pub struct LewensteinParams<'a> {
    /// Ionization potential.
    pub ip: f64,
    /// Driving wavelength in meters; selects SI inputs and output.
    pub wavelength: Option<f64>,
    /// Travel-time weights; defaults to [`get_weights`] with one optical
    /// period of plateau and half a period of taper.
    pub weights: Option<&'a nd::Array1<f64>>,
    /// Ground-state amplitude `a(t)`; defaults to all ones.
    pub ground_state_amplitude: Option<&'a nd::Array1<f64>>,
    /// Dipole elements; defaults to [`DipoleElements::hydrogen`] with the
    /// field's dimension.
    pub dipole_elements: Option<&'a DipoleElements>,
    /// Regularization of the τ → 0 singularity (always in scaled atomic
    /// units).
    pub epsilon_t: f64,
}

impl<'a> LewensteinParams<'a> {
    /// Default parameters for ionization potential `ip`.
    pub fn new(ip: f64) -> Self {
        Self {
            ip,
            wavelength: None,
            weights: None,
            ground_state_amplitude: None,
            dipole_elements: None,
            epsilon_t: EPSILON_T,
        }
    }

    pub fn with_wavelength(mut self, wavelength: f64) -> Self {
        self.wavelength = Some(wavelength);
        self
    }

    pub fn with_weights(mut self, weights: &'a nd::Array1<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_ground_state_amplitude(mut self, at: &'a nd::Array1<f64>)
        -> Self
    {
        self.ground_state_amplitude = Some(at);
        self
    }

    pub fn with_dipole_elements(mut self, dp: &'a DipoleElements) -> Self {
        self.dipole_elements = Some(dp);
        self
    }

    pub fn with_epsilon_t(mut self, epsilon_t: f64) -> Self {
        self.epsilon_t = epsilon_t;
        self
    }
}

/// Check array shapes and the time axis before any numerical work.
///
/// Returns the number of spatial dimensions.
pub(crate) fn check_inputs(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    at: Option<&nd::Array1<f64>>,
) -> HhgResult<usize>
{
    let n = t.len();
    if n == 0 {
        return Err(HhgError::EmptyTimeAxis);
    }
    if Et.nrows() != n {
        return Err(HhgError::LengthMismatch {
            what: "field", len: Et.nrows(), expected: n });
    }
    let dims = Et.ncols();
    if let Some(at) = at {
        if at.len() != n {
            return Err(HhgError::LengthMismatch {
                what: "ground-state amplitude", len: at.len(), expected: n });
        }
    }
    if let Some(k) = t.iter().zip(t.iter().skip(1)).position(|(tk, tkp1)| !(tkp1 > tk)) {
        return Err(HhgError::NonIncreasingTime(k + 1));
    }
    Ok(dims)
}

fn check_weights(weights: &nd::Array1<f64>, n: usize) -> HhgResult<()> {
    (1..=n).contains(&weights.len()).then_some(())
        .ok_or(HhgError::WeightsLength { len: weights.len(), max: n })
}

/// Compute the dipole response to field `Et` (shape `[t.len(), D]`, `D` in
/// `1..=3`) sampled on time axis `t`.
///
/// Returns an array of the same shape as `Et`. See [`LewensteinParams`] for the
/// defaults and the choice of units.
pub fn lewenstein(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    params: &LewensteinParams,
) -> HhgResult<nd::Array2<f64>>
{
    let dims = check_inputs(t, Et, params.ground_state_amplitude)?;
    check_dims(dims)?;
    if let Some(dp) = params.dipole_elements {
        if dp.dims() != dims {
            return Err(HhgError::DimsMismatch { model: dp.dims(), field: dims });
        }
    }

    let default_weights: nd::Array1<f64>;
    let weights: &nd::Array1<f64>
        = match params.weights {
            Some(w) => w,
            None => {
                let period
                    = params.wavelength
                    .map(|wavelength| wavelength / units::c)
                    .unwrap_or(2.0 * PI);
                default_weights
                    = get_weights(t, period, 1.0, 0.5)
                    .iter().copied()
                    .take(t.len())
                    .collect();
                &default_weights
            },
        };
    check_weights(weights, t.len())?;

    let (t_sau, Et_sau, ip)
        = match params.wavelength {
            Some(wavelength) => (
                units::to_sau(t, Quantity::Time, wavelength)?,
                units::to_sau(Et, Quantity::Field, wavelength)?,
                units::to_sau(params.ip, Quantity::Energy, wavelength)?,
            ),
            None => (t.clone(), Et.clone(), params.ip),
        };

    let default_at: nd::Array1<f64>;
    let at: &nd::Array1<f64>
        = match params.ground_state_amplitude {
            Some(at) => at,
            None => {
                default_at = nd::Array1::ones(t.len());
                &default_at
            },
        };

    let default_dp: DipoleElements;
    let dp: &DipoleElements
        = match params.dipole_elements {
            Some(dp) => dp,
            None => {
                default_dp = DipoleElements::hydrogen(dims, ip)?;
                &default_dp
            },
        };

    let d = lewenstein_sau(&t_sau, &Et_sau, ip, weights, at, params.epsilon_t, dp)?;
    match params.wavelength {
        Some(wavelength) => units::to_si(d, Quantity::Dipole, wavelength),
        None => Ok(d),
    }
}

/// Compute the dipole response with all inputs in scaled atomic units and no
/// defaults.
///
/// The time axis is shifted internally to start at zero.
pub fn lewenstein_sau(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    ip: f64,
    weights: &nd::Array1<f64>,
    at: &nd::Array1<f64>,
    epsilon_t: f64,
    dp: &DipoleElements,
) -> HhgResult<nd::Array2<f64>>
{
    let dims = check_inputs(t, Et, Some(at))?;
    check_dims(dims)?;
    check_weights(weights, t.len())?;
    if dp.dims() != dims {
        return Err(HhgError::DimsMismatch { model: dp.dims(), field: dims });
    }
    log::debug!(
        "lewenstein: {} samples, {} dimension(s), {} weights, ip = {:.4}",
        t.len(), dims, weights.len(), ip,
    );

    let t0 = t[0];
    let t: Vec<f64> = t.iter().map(|tk| *tk - t0).collect();
    let weights: Vec<f64> = weights.iter().copied().collect();
    let at: Vec<f64> = at.iter().copied().collect();
    let kernel = Kernel { t: &t, weights: &weights, at: &at, ip, epsilon_t, dp };
    match dims {
        1 => Ok(kernel.run::<1>(Et)),
        2 => Ok(kernel.run::<2>(Et)),
        3 => Ok(kernel.run::<3>(Et)),
        _ => Err(HhgError::UnsupportedDims(dims)),
    }
}

struct Kernel<'a> {
    t: &'a [f64],
    weights: &'a [f64],
    at: &'a [f64],
    ip: f64,
    epsilon_t: f64,
    dp: &'a DipoleElements,
}

impl<'a> Kernel<'a> {
    fn run<const N: usize>(&self, Et: &nd::Array2<f64>) -> nd::Array2<f64> {
        let hist: FieldHistory<N> = FieldHistory::new(self.t, Et);
        let n = self.t.len();
        let rows: Vec<Vector<N, f64>>
            = (1..n).into_par_iter()
            .map(|i| self.dipole_at(&hist, i))
            .collect();
        let mut out: nd::Array2<f64> = nd::Array2::zeros((n, N));
        out.outer_iter_mut().skip(1).zip(rows)
            .for_each(|(mut out_i, row)| {
                out_i.iter_mut().zip(row).for_each(|(o, x)| { *o = x; });
            });
        out
    }

    /// Trapezoidal integral over travel time for observation sample `i`.
    fn dipole_at<const N: usize>(&self, hist: &FieldHistory<N>, i: usize)
        -> Vector<N, f64>
    {
        let t = self.t;
        let mut integral: Vector<N, C64> = Vector::zeros();
        let mut last: Vector<N, C64> = Vector::zeros();
        for k in 0..self.weights.len().min(i + 1) {
            let tau = t[k];
            let (p, S)
                = if k == 0 {
                    (hist.A[i], 0.0)
                } else {
                    (
                        hist.stationary_momentum(i, k, tau),
                        hist.action(self.ip, i, k, tau),
                    )
                };
            let d_rec = self.dp.get(&(p - hist.A[i])).conj();
            let d_ion = self.dp.get(&(p - hist.A[i - k]));
            let c = PI / (self.epsilon_t + 0.5 * C64::i() * tau);
            let amp
                = d_ion.dot_real(&hist.E[i - k])
                * c * c.sqrt()
                * C64::from_polar(1.0, -S)
                * (self.weights[k] * self.at[i] * self.at[i - k]);
            let integrand = d_rec * amp;
            let dt = if k > 0 { t[k] - t[k - 1] } else { 0.0 };
            integral += (last + integrand) * C64::from(dt / 2.0);
            last = integrand;
        }
        integral.map(|z| 2.0 * z.im)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp() -> (nd::Array1<f64>, nd::Array2<f64>) {
        let t: nd::Array1<f64> = nd::array![0.0, 1.0, 2.0, 3.0, 4.0];
        let Et = t.clone().insert_axis(nd::Axis(1));
        (t, Et)
    }

    #[test]
    fn reference_vector() {
        let (t, Et) = ramp();
        let weights: nd::Array1<f64> = nd::Array1::ones(5);
        let params = LewensteinParams::new(1.0).with_weights(&weights);
        let d = lewenstein(&t, &Et, &params).unwrap();
        let reference = [0.00000, 0.00000, -2.18318, -2.95464, -1.23753];
        assert_eq!(d.shape(), &[5, 1]);
        d.column(0).iter().zip(reference)
            .for_each(|(dk, rk)| assert_abs_diff_eq!(*dk, rk, epsilon = 1e-4));
    }

    #[test]
    fn time_offset_is_removed() {
        let (t, Et) = ramp();
        let weights: nd::Array1<f64> = nd::Array1::ones(5);
        let params = LewensteinParams::new(1.0).with_weights(&weights);
        let d0 = lewenstein(&t, &Et, &params).unwrap();
        let d1 = lewenstein(&(&t + 10.0), &Et, &params).unwrap();
        assert_eq!(d0, d1);
    }

    #[test]
    fn first_sample_is_zero() {
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0 * PI, 200);
        let Et: nd::Array2<f64>
            = nd::Array2::from_shape_fn((200, 2), |(k, d)| {
                if d == 0 { 0.1 * t[k].cos() } else { 0.05 * t[k].sin() }
            });
        let d = lewenstein(&t, &Et, &LewensteinParams::new(0.5)).unwrap();
        assert_eq!(d.shape(), &[200, 2]);
        assert_eq!(d.row(0).to_vec(), vec![0.0, 0.0]);
        assert!(d.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn zero_field_gives_zero_dipole() {
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, 101);
        let Et: nd::Array2<f64> = nd::Array2::zeros((101, 3));
        let d = lewenstein(&t, &Et, &LewensteinParams::new(1.0)).unwrap();
        assert!(d.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn short_axis_with_default_weights() {
        // a fraction of a period: the default window is longer than the axis
        let (t, Et) = ramp();
        let d = lewenstein(&t, &Et, &LewensteinParams::new(1.0)).unwrap();
        let weights: nd::Array1<f64> = nd::Array1::ones(5);
        let d_ones
            = lewenstein(&t, &Et, &LewensteinParams::new(1.0).with_weights(&weights))
            .unwrap();
        assert_eq!(d, d_ones);
    }

    #[test]
    fn nan_time_is_rejected() {
        let (_, Et) = ramp();
        let t: nd::Array1<f64> = nd::array![0.0, 1.0, f64::NAN, 3.0, 4.0];
        assert_eq!(
            lewenstein(&t, &Et, &LewensteinParams::new(1.0)),
            Err(HhgError::NonIncreasingTime(2)),
        );
    }

    #[test]
    fn contract_violations() {
        let (t, Et) = ramp();
        let dp2 = DipoleElements::hydrogen(2, 1.0).unwrap();
        assert_eq!(
            lewenstein(&t, &Et, &LewensteinParams::new(1.0).with_dipole_elements(&dp2)),
            Err(HhgError::DimsMismatch { model: 2, field: 1 }),
        );
        let Et4: nd::Array2<f64> = nd::Array2::zeros((5, 4));
        assert_eq!(
            lewenstein(&t, &Et4, &LewensteinParams::new(1.0)),
            Err(HhgError::UnsupportedDims(4)),
        );
        let long: nd::Array1<f64> = nd::Array1::ones(6);
        assert_eq!(
            lewenstein(&t, &Et, &LewensteinParams::new(1.0).with_weights(&long)),
            Err(HhgError::WeightsLength { len: 6, max: 5 }),
        );
        let at: nd::Array1<f64> = nd::Array1::ones(4);
        assert!(matches!(
            lewenstein(&t, &Et, &LewensteinParams::new(1.0).with_ground_state_amplitude(&at)),
            Err(HhgError::LengthMismatch { .. }),
        ));
        let t_bad: nd::Array1<f64> = nd::array![0.0, 1.0, 1.0, 3.0, 4.0];
        assert_eq!(
            lewenstein(&t_bad, &Et, &LewensteinParams::new(1.0)),
            Err(HhgError::NonIncreasingTime(2)),
        );
    }
}
