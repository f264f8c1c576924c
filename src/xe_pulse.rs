use std::path::PathBuf;
use anyhow::ensure;
use ndarray as nd;
use hhg_sim::{
    mkdir,
    write_npz,
    dipole::DipoleElements,
    field::GaussianPulse,
    lewenstein::{ lewenstein, LewensteinParams },
    units::{ self, Quantity },
    vector::Vector,
};

const WAVELENGTH: f64 = 1000e-9; // m
const FWHM: f64 = 30e-15; // s
const INTENSITY: f64 = 1e18; // W/m^2
const IP_EV: f64 = 12.13; // Xe

fn check_reference() -> anyhow::Result<()> {
    let t: nd::Array1<f64> = nd::Array1::range(0.0, 5.0, 1.0);
    let Et = t.clone().insert_axis(nd::Axis(1));
    let weights: nd::Array1<f64> = nd::Array1::ones(t.len());
    let d = lewenstein(&t, &Et, &LewensteinParams::new(1.0).with_weights(&weights))?;
    let reference = [0.00000, 0.00000, -2.18318, -2.95464, -1.23753];
    let ok
        = d.column(0).iter().zip(reference)
        .all(|(dk, rk)| (dk - rk).abs() < 1e-4);
    ensure!(ok, "reference dipole mismatch: {:?}", d.column(0));
    println!("reference test passed");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let outdir = PathBuf::from("output");
    mkdir!(outdir)?;

    check_reference()?;

    let pulse = GaussianPulse {
        wavelength: WAVELENGTH,
        fwhm: FWHM,
        intensity: INTENSITY,
        cep: 0.0,
    };
    let t = pulse.time_axis(20, 200);
    let Et = pulse.field(&t);
    let ip = IP_EV * units::e;

    let d = lewenstein(&t, &Et, &LewensteinParams::new(ip).with_wavelength(WAVELENGTH))?;

    // same model, tabulated on 0 ≤ p < 10
    let ip_sau = units::to_sau(ip, Quantity::Energy, WAVELENGTH)?;
    let hydrogen = DipoleElements::hydrogen(1, ip_sau)?;
    let p: Vec<f64> = (0..100_000).map(|k| k as f64 * 1e-4).collect();
    let dp: Vec<_> = p.iter().map(|pk| hydrogen.get(&Vector([*pk]))[0]).collect();
    let interp = DipoleElements::symmetric_interpolate(1, &p, &dp)?;
    let params
        = LewensteinParams::new(ip)
        .with_wavelength(WAVELENGTH)
        .with_dipole_elements(&interp);
    let d_interp = lewenstein(&t, &Et, &params)?;

    let max_dev
        = d.iter().zip(d_interp.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    let max_d = d.iter().map(|x| x.abs()).fold(0.0, f64::max);
    println!("max |d - d_interp| / max |d| = {:.3e}", max_dev / max_d);

    write_npz!(
        outdir.join("xe_pulse.npz"),
        arrays: {
            "t" => &t,
            "Et" => &Et,
            "d" => &d,
            "d_interp" => &d_interp,
        }
    )?;

    println!("done");
    Ok(())
}
