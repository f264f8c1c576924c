//! Progressive integrals over the field history.
//!
//! Both engines work with three running integrals of the driving field `E(t)`,
//! all computed with the trapezoidal rule on the (possibly nonuniform) time
//! axis:
//! ```text
//! A(t) = -∫₀ᵗ E(t') dt'     (vector potential)
//! B(t) =  ∫₀ᵗ A(t') dt'     (free-electron excursion)
//! C(t) =  ∫₀ᵗ A(t')² dt'    (ponderomotive phase)
//! ```
//! Differences of these at the birth and return times give the stationary
//! momentum and the quasi-classical action in closed form.

use std::ops::{ Add, Mul };
use ndarray as nd;
use num_traits::Zero;
use crate::vector::Vector;

/// Compute the "progressive" integral of the sequence `y` using the
/// trapezoidal rule for nonuniform steps taken from `x`.
///
/// The progressive integral is defined as
/// ```text
/// I(x) = \int_a^x y(x') dx'
/// ```
///
/// The output has the same length as the shorter of the two inputs and always
/// starts at zero.
pub(crate) fn trapz_prog_nonuniform<T>(y: &[T], x: &[f64]) -> Vec<T>
where T: Copy + Zero + Add<T, Output = T> + Mul<f64, Output = T>
{
    let n = y.len().min(x.len());
    let mut acc = T::zero();
    let mut out: Vec<T> = Vec::with_capacity(n);
    if n == 0 { return out; }
    out.push(acc);
    y.iter().zip(y.iter().skip(1))
        .zip(x.iter().zip(x.iter().skip(1)))
        .take(n - 1)
        .for_each(|((yk, ykp1), (xk, xkp1))| {
            acc = acc + (*yk + *ykp1) * ((*xkp1 - *xk) / 2.0);
            out.push(acc);
        });
    out
}

/// Compute the "progressive" integral of the function `y` using the
/// trapezoidal rule for nonuniform step size, for array inputs.
///
/// *Panics* if the arrays have unequal lengths.
pub fn trapz_prog(y: &nd::Array1<f64>, x: &nd::Array1<f64>) -> nd::Array1<f64> {
    if y.len() != x.len() {
        panic!("trapz_prog: unequal array lengths");
    }
    let y: Vec<f64> = y.iter().copied().collect();
    let x: Vec<f64> = x.iter().copied().collect();
    trapz_prog_nonuniform(&y, &x).into()
}

/// Running integrals of an `N`-dimensional field over a shared time axis.
#[derive(Clone, Debug)]
pub(crate) struct FieldHistory<const N: usize> {
    /// Field samples.
    pub E: Vec<Vector<N, f64>>,
    /// Vector potential.
    pub A: Vec<Vector<N, f64>>,
    /// Integral of the vector potential.
    pub B: Vec<Vector<N, f64>>,
    /// Integral of the squared vector potential.
    pub C: Vec<f64>,
}

impl<const N: usize> FieldHistory<N> {
    /// Build the histories for field `Et` (shape `[t.len(), N]`) sampled on
    /// `t`.
    ///
    /// Caller must have checked the shape.
    pub fn new(t: &[f64], Et: &nd::Array2<f64>) -> Self {
        let E: Vec<Vector<N, f64>>
            = Et.outer_iter()
            .map(|row| Vector::from_fn(|d| row[d]))
            .collect();
        let negE: Vec<Vector<N, f64>> = E.iter().map(|Ek| *Ek * -1.0).collect();
        let A = trapz_prog_nonuniform(&negE, t);
        let B = trapz_prog_nonuniform(&A, t);
        let A2: Vec<f64> = A.iter().map(|Ak| Ak.norm_sqr()).collect();
        let C = trapz_prog_nonuniform(&A2, t);
        Self { E, A, B, C }
    }

    /// Stationary-phase quasi-classical action for an electron born at sample
    /// `i - k` and returning at sample `i` after travel time `tau`.
    ///
    /// ```text
    /// S = Ip τ - (B(t) - B(t - τ))² / (2 τ) + (C(t) - C(t - τ)) / 2
    /// ```
    pub fn action(&self, ip: f64, i: usize, k: usize, tau: f64) -> f64 {
        let dB = self.B[i] - self.B[i - k];
        ip * tau - 0.5 / tau * dB.norm_sqr() + 0.5 * (self.C[i] - self.C[i - k])
    }

    /// Canonical momentum of the stationary trajectory born at sample `i - k`
    /// and returning at sample `i`: `(B(t) - B(t - τ)) / τ`.
    pub fn stationary_momentum(&self, i: usize, k: usize, tau: f64) -> Vector<N, f64> {
        (self.B[i] - self.B[i - k]) / tau
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn trapz_prog_linear() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 21);
        let y = x.mapv(|xk| 2.0 * xk);
        let iy = trapz_prog(&y, &x);
        assert_eq!(iy[0], 0.0);
        iy.iter().zip(&x)
            .for_each(|(ik, xk)| assert_abs_diff_eq!(*ik, xk * xk, epsilon = 1e-12));
    }

    #[test]
    fn trapz_prog_nonuniform_steps() {
        let x = [0.0, 0.5, 2.0, 2.25];
        let y = [1.0; 4];
        let iy = trapz_prog_nonuniform(&y, &x);
        assert_eq!(iy, vec![0.0, 0.5, 2.0, 2.25]);
    }

    #[test]
    fn constant_field_histories() {
        // E = 1: A = -t, B = -t²/2, C = t³/3 (trapezoid is exact for A and B)
        let t: Vec<f64> = (0..11).map(|k| k as f64 * 0.1).collect();
        let Et: nd::Array2<f64> = nd::Array2::ones((t.len(), 1));
        let hist: FieldHistory<1> = FieldHistory::new(&t, &Et);
        let last = t.len() - 1;
        assert_abs_diff_eq!(hist.A[last][0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hist.B[last][0], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hist.C[last], 1.0 / 3.0, epsilon = 1e-2);
        let p = hist.stationary_momentum(last, last, 1.0);
        assert_abs_diff_eq!(p[0], -0.5, epsilon = 1e-12);
    }
}
