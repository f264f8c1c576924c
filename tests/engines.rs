use std::f64::consts::PI;
use approx::assert_abs_diff_eq;
use ndarray as nd;
use num_complex::Complex64 as C64;
use hhg_sim::{
    dipole::DipoleElements,
    error::HhgError,
    lewenstein::{ lewenstein, lewenstein_sau, LewensteinParams },
    units::{ self, Quantity },
    vector::Vector,
    window::get_weights,
    yakovlev::{ yakovlev, YakovlevParams },
};

fn max_abs<'a, I>(iter: I) -> f64
where I: IntoIterator<Item = &'a f64>
{
    iter.into_iter().map(|x| x.abs()).fold(0.0, f64::max)
}

fn drive(dims: usize) -> (nd::Array1<f64>, nd::Array2<f64>) {
    let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0 * PI, 201);
    let Et: nd::Array2<f64>
        = nd::Array2::from_shape_fn((t.len(), dims), |(k, d)| {
            0.1 * (t[k] + d as f64 * PI / 2.0).cos()
        });
    (t, Et)
}

#[test]
fn reference_dipole() {
    let t: nd::Array1<f64> = nd::array![0.0, 1.0, 2.0, 3.0, 4.0];
    let Et = t.clone().insert_axis(nd::Axis(1));
    let weights: nd::Array1<f64> = nd::Array1::ones(5);
    let d = lewenstein(&t, &Et, &LewensteinParams::new(1.0).with_weights(&weights))
        .unwrap();
    let reference = [0.00000, 0.00000, -2.18318, -2.95464, -1.23753];
    d.iter().zip(reference)
        .for_each(|(dk, rk)| assert_abs_diff_eq!(*dk, rk, epsilon = 1e-4));
}

#[test]
fn defaults_match_explicit_inputs() {
    let (t, Et) = drive(1);
    let ip = 0.5;
    let d_default = lewenstein(&t, &Et, &LewensteinParams::new(ip)).unwrap();
    let weights = get_weights(&t, 2.0 * PI, 1.0, 0.5);
    let at: nd::Array1<f64> = nd::Array1::ones(t.len());
    let dp = DipoleElements::hydrogen(1, ip).unwrap();
    let d_explicit = lewenstein_sau(&t, &Et, ip, &weights, &at, 1e-4, &dp).unwrap();
    assert_eq!(d_default, d_explicit);
}

#[test]
fn si_inputs_match_scaled_units() {
    let wavelength = 800e-9;
    let (t, Et) = drive(1);
    let ip = 0.5;
    let weights = get_weights(&t, 2.0 * PI, 1.0, 0.5);
    let d_sau
        = lewenstein(&t, &Et, &LewensteinParams::new(ip).with_weights(&weights))
        .unwrap();

    let t_si = units::to_si(&t, Quantity::Time, wavelength).unwrap();
    let Et_si = units::to_si(&Et, Quantity::Field, wavelength).unwrap();
    let ip_si = units::to_si(ip, Quantity::Energy, wavelength).unwrap();
    let params
        = LewensteinParams::new(ip_si)
        .with_wavelength(wavelength)
        .with_weights(&weights);
    let d_si = lewenstein(&t_si, &Et_si, &params).unwrap();
    let d_back = units::to_sau(&d_si, Quantity::Dipole, wavelength).unwrap();

    let scale = max_abs(&d_sau);
    assert!(scale > 0.0);
    d_sau.iter().zip(&d_back)
        .for_each(|(a, b)| assert_abs_diff_eq!(*a, *b, epsilon = 1e-8 * scale));
}

#[test]
fn interpolated_matches_hydrogen() {
    let ip = 0.5;
    let hydrogen = DipoleElements::hydrogen(1, ip).unwrap();
    let p: Vec<f64> = (0..10_001).map(|k| k as f64 * 1e-3).collect();
    let d: Vec<C64> = p.iter().map(|pk| hydrogen.get(&Vector([*pk]))[0]).collect();
    for dims in 1..=3 {
        let (t, Et) = drive(dims);
        let exact = DipoleElements::hydrogen(dims, ip).unwrap();
        let interp = DipoleElements::symmetric_interpolate(dims, &p, &d).unwrap();
        let d_exact
            = lewenstein(&t, &Et, &LewensteinParams::new(ip).with_dipole_elements(&exact))
            .unwrap();
        let d_interp
            = lewenstein(&t, &Et, &LewensteinParams::new(ip).with_dipole_elements(&interp))
            .unwrap();
        let scale = max_abs(&d_exact);
        assert!(scale > 0.0);
        d_exact.iter().zip(&d_interp)
            .for_each(|(a, b)| assert_abs_diff_eq!(*a, *b, epsilon = 1e-4 * scale));
    }
}

#[test]
fn dimensional_contracts() {
    let (t, Et) = drive(1);
    let dp3 = DipoleElements::hydrogen(3, 0.5).unwrap();
    assert_eq!(
        lewenstein(&t, &Et, &LewensteinParams::new(0.5).with_dipole_elements(&dp3)),
        Err(HhgError::DimsMismatch { model: 3, field: 1 }),
    );
    let (_, Et4) = drive(4);
    assert_eq!(
        lewenstein(&t, &Et4, &LewensteinParams::new(0.5)),
        Err(HhgError::UnsupportedDims(4)),
    );
    let (_, Et2) = drive(2);
    let at: nd::Array1<f64> = nd::Array1::ones(t.len());
    assert_eq!(
        yakovlev(&t, &Et2, &at, &YakovlevParams::new(0.5)),
        Err(HhgError::TrajectoryDims(2)),
    );
    assert_eq!(
        DipoleElements::hydrogen(0, 0.5),
        Err(HhgError::UnsupportedDims(0)),
    );
}

#[test]
fn trajectory_model_needs_depletion() {
    let (t, Et) = drive(1);
    let at: nd::Array1<f64> = nd::Array1::ones(t.len());
    let d = yakovlev(&t, &Et, &at, &YakovlevParams::new(0.5)).unwrap();
    assert!(d.iter().all(|x| *x == 0.0));

    let at = t.mapv(|tk| (-1e-3 * tk).exp());
    let d = yakovlev(&t, &Et, &at, &YakovlevParams::new(0.5)).unwrap();
    assert!(d.iter().any(|x| *x != 0.0));
    let skipped
        = yakovlev(&t, &Et, &at, &YakovlevParams::new(0.5).with_skip_trajectories(2))
        .unwrap();
    assert!(skipped.iter().all(|x| *x == 0.0));
}

#[test]
fn trajectory_si_inputs_match_scaled_units() {
    let wavelength = 800e-9;
    let (t, Et) = drive(1);
    let at = t.mapv(|tk| (-1e-3 * tk).exp());
    let ip = 0.5;
    // horizon between grid points so rounding cannot move it
    let max_periods = Some(1.234);
    let d_sau
        = yakovlev(&t, &Et, &at, &YakovlevParams::new(ip).with_max_periods(max_periods))
        .unwrap();

    let t_si = units::to_si(&t, Quantity::Time, wavelength).unwrap();
    let Et_si = units::to_si(&Et, Quantity::Field, wavelength).unwrap();
    let ip_si = units::to_si(ip, Quantity::Energy, wavelength).unwrap();
    let params
        = YakovlevParams::new(ip_si)
        .with_wavelength(wavelength)
        .with_max_periods(max_periods);
    let d_si = yakovlev(&t_si, &Et_si, &at, &params).unwrap();
    let d_back = units::to_sau(&d_si, Quantity::Dipole, wavelength).unwrap();

    let scale = max_abs(&d_sau);
    assert!(scale > 0.0);
    d_sau.iter().zip(&d_back)
        .for_each(|(a, b)| assert_abs_diff_eq!(*a, *b, epsilon = 1e-8 * scale));
}
