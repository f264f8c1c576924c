//! Ground-state depletion by tunnel ionization.
//!
//! Used to build the ground-state amplitude `a(t)` that both engines accept.
//! The rate is the static-field tunneling rate of a hydrogen-like 1s state
//! (Landau and Lifshitz, §77) scaled to ionization potential `Ip` through
//! `κ = sqrt(2 Ip)`, evaluated at the instantaneous field strength:
//! ```text
//! w(F) = 4 κ⁵ / F · exp(-2 κ³ / (3 F))     (Hartree atomic units)
//! a(t) = exp(-½ ∫ w(F(t')) dt')
//! ```

use ndarray as nd;
use crate::{
    error::HhgResult,
    integrate::trapz_prog,
    lewenstein::check_inputs,
    units,
};

/// Static tunneling rate for field strength `F` and `κ = sqrt(2 Ip)`, all in
/// Hartree atomic units. Zero field gives zero rate.
pub fn tunnel_rate(kappa: f64, F: f64) -> f64 {
    let F = F.abs();
    if F == 0.0 { return 0.0; }
    4.0 * kappa.powi(5) / F * (-2.0 * kappa.powi(3) / (3.0 * F)).exp()
}

/// Compute the ground-state amplitude for field `Et` [V/m] (shape
/// `[t.len(), D]`) on time axis `t` [s] for ionization potential `ip` [J].
///
/// The result starts at 1 and is non-increasing.
pub fn tunnel_ground_state(
    t: &nd::Array1<f64>,
    Et: &nd::Array2<f64>,
    ip: f64,
) -> HhgResult<nd::Array1<f64>>
{
    check_inputs(t, Et, None)?;
    let hartree = 2.0 * units::Ry;
    let field_au = hartree / (units::e * units::a0);
    let time_au = units::hbar / hartree;

    let kappa = (2.0 * ip / hartree).sqrt();
    let rate: nd::Array1<f64>
        = Et.outer_iter()
        .map(|row| {
            let F = row.iter().map(|x| x * x).sum::<f64>().sqrt() / field_au;
            tunnel_rate(kappa, F)
        })
        .collect();
    let t_au = t.mapv(|tk| tk / time_au);
    let at = trapz_prog(&rate, &t_au).mapv_into(|ik| (-0.5 * ik).exp());
    log::debug!(
        "tunnel_ground_state: {} samples, final population {:.3e}",
        t.len(), at[at.len() - 1].powi(2),
    );
    Ok(at)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use crate::field::GaussianPulse;

    #[test]
    fn rate_limits() {
        assert_eq!(tunnel_rate(1.0, 0.0), 0.0);
        assert_relative_eq!(tunnel_rate(1.0, 1.0), 4.0 * (-2.0_f64 / 3.0).exp());
        assert_eq!(tunnel_rate(1.0, -0.1), tunnel_rate(1.0, 0.1));
        assert!(tunnel_rate(1.0, 0.05) < tunnel_rate(1.0, 0.06));
    }

    #[test]
    fn zero_field_keeps_ground_state() {
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 1e-13, 101);
        let Et: nd::Array2<f64> = nd::Array2::zeros((101, 1));
        let at = tunnel_ground_state(&t, &Et, 12.13 * units::e).unwrap();
        assert!(at.iter().all(|a| *a == 1.0));
    }

    #[test]
    fn pulse_depletes_monotonically() {
        let pulse = GaussianPulse {
            wavelength: 800e-9,
            fwhm: 10e-15,
            intensity: 3e18,
            cep: 0.0,
        };
        let t = pulse.time_axis(10, 100);
        let Et = pulse.field(&t);
        let at = tunnel_ground_state(&t, &Et, 12.13 * units::e).unwrap();
        assert_eq!(at[0], 1.0);
        assert!(at.windows(2).into_iter().all(|w| w[1] <= w[0]));
        assert!(at[at.len() - 1] < 1.0);
        assert!(at[at.len() - 1] > 0.0);
    }
}
