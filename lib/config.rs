//! TOML job descriptions for the `hhg` binary.
//!
//! ```toml
//! [pulse]
//! wavelength = 1000e-9   # m
//! fwhm = 30e-15          # s
//! intensity = 1e18       # W/m^2
//!
//! [target]
//! ip_ev = 12.13
//!
//! [model]
//! kind = "lewenstein"
//! ```

use std::path::Path;
use serde::Deserialize;
use crate::{
    dipole::DipoleElements,
    error::{ HhgError, HhgResult },
    field::GaussianPulse,
    units::{ self, Quantity },
    vector::Vector,
};

/// Top-level job configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct JobConfig {
    pub pulse: PulseConfig,
    pub target: TargetConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Driving pulse and sampling, in SI units.
#[derive(Clone, Debug, Deserialize)]
pub struct PulseConfig {
    pub wavelength: f64,
    pub fwhm: f64,
    pub intensity: f64,
    #[serde(default)]
    pub cep: f64,
    /// Optical periods on either side of the peak.
    #[serde(default = "default_periods")]
    pub periods: usize,
    #[serde(default = "default_points_per_period")]
    pub points_per_period: usize,
}

fn default_periods() -> usize { 20 }
fn default_points_per_period() -> usize { 200 }

impl PulseConfig {
    pub fn pulse(&self) -> GaussianPulse {
        GaussianPulse {
            wavelength: self.wavelength,
            fwhm: self.fwhm,
            intensity: self.intensity,
            cep: self.cep,
        }
    }
}

/// Atomic target.
#[derive(Clone, Debug, Deserialize)]
pub struct TargetConfig {
    /// Ionization potential [eV]
    pub ip_ev: f64,
    #[serde(default)]
    pub dipole: DipoleConfig,
}

impl TargetConfig {
    /// Ionization potential [J].
    pub fn ip(&self) -> f64 { self.ip_ev * units::e }
}

/// Dipole-element model.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DipoleConfig {
    /// Closed-form hydrogen-like elements with `alpha = alpha_factor · Ip`.
    Hydrogen {
        #[serde(default = "default_alpha_factor")]
        alpha_factor: f64,
    },
    /// Hydrogen-like elements tabulated on `0, dp, ..., p_max` (scaled atomic
    /// units) and interpolated.
    Interpolated {
        #[serde(default = "default_p_max")]
        p_max: f64,
        #[serde(default = "default_dp")]
        dp: f64,
    },
}

fn default_alpha_factor() -> f64 { 2.0 }
fn default_p_max() -> f64 { 10.0 }
fn default_dp() -> f64 { 1e-4 }

impl Default for DipoleConfig {
    fn default() -> Self {
        Self::Hydrogen { alpha_factor: default_alpha_factor() }
    }
}

impl DipoleConfig {
    /// Build the model for `dims` dimensions; `ip` in joules.
    pub fn build(&self, dims: usize, ip: f64, wavelength: f64)
        -> HhgResult<DipoleElements>
    {
        let ip = units::to_sau(ip, Quantity::Energy, wavelength)?;
        match *self {
            Self::Hydrogen { alpha_factor } => {
                DipoleElements::hydrogen_with_alpha(dims, ip, alpha_factor)
            },
            Self::Interpolated { p_max, dp } => {
                let source = DipoleElements::hydrogen(1, ip)?;
                let n = (p_max / dp).round() as usize + 1;
                let p: Vec<f64> = (0..n).map(|k| k as f64 * dp).collect();
                let d: Vec<_>
                    = p.iter()
                    .map(|pk| source.get(&Vector([*pk]))[0])
                    .collect();
                DipoleElements::symmetric_interpolate(dims, &p, &d)
            },
        }
    }
}

/// Engine selection and its parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelConfig {
    Lewenstein {
        #[serde(default = "default_epsilon_t")]
        epsilon_t: f64,
        #[serde(default = "default_periods_full")]
        periods_full: f64,
        #[serde(default = "default_periods_taper")]
        periods_taper: f64,
        /// Include tunnel depletion of the ground state.
        #[serde(default)]
        depletion: bool,
    },
    Yakovlev {
        #[serde(default = "default_trajectories")]
        trajectories: usize,
        #[serde(default)]
        skip_trajectories: usize,
        /// `inf` for an unbounded search.
        #[serde(default = "default_max_periods")]
        max_periods: Option<f64>,
    },
}

fn default_epsilon_t() -> f64 { crate::lewenstein::EPSILON_T }
fn default_periods_full() -> f64 { 1.0 }
fn default_periods_taper() -> f64 { 0.5 }
fn default_trajectories() -> usize { 2 }
fn default_max_periods() -> Option<f64> { Some(2.0) }

impl Default for ModelConfig {
    fn default() -> Self {
        Self::Lewenstein {
            epsilon_t: default_epsilon_t(),
            periods_full: default_periods_full(),
            periods_taper: default_periods_taper(),
            depletion: false,
        }
    }
}

/// Output configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

fn default_output_dir() -> String { "./output".into() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self { directory: default_output_dir() }
    }
}

fn invalid<S: Into<String>>(msg: S) -> HhgError { HhgError::InvalidConfig(msg.into()) }

impl JobConfig {
    /// Check physical ranges that the TOML types cannot express.
    pub fn validate(&self) -> HhgResult<()> {
        let p = &self.pulse;
        units::Units::from_wavelength(p.wavelength)?;
        if !(p.fwhm > 0.0) { return Err(invalid("pulse.fwhm must be positive")); }
        if !(p.intensity >= 0.0) {
            return Err(invalid("pulse.intensity must be non-negative"));
        }
        if p.periods == 0 || p.points_per_period == 0 {
            return Err(invalid("pulse.periods and pulse.points_per_period must be nonzero"));
        }
        if !(self.target.ip_ev > 0.0) {
            return Err(invalid("target.ip_ev must be positive"));
        }
        match self.target.dipole {
            DipoleConfig::Hydrogen { alpha_factor } if !(alpha_factor > 0.0) => {
                return Err(invalid("target.dipole.alpha_factor must be positive"));
            },
            DipoleConfig::Interpolated { p_max, dp } if !(dp > 0.0 && p_max > dp) => {
                return Err(invalid("target.dipole requires 0 < dp < p_max"));
            },
            _ => { },
        }
        match self.model {
            ModelConfig::Lewenstein { epsilon_t, periods_full, periods_taper, .. } => {
                if !(epsilon_t >= 0.0) {
                    return Err(invalid("model.epsilon_t must be non-negative"));
                }
                if !(periods_full >= 0.0 && periods_taper >= 0.0) {
                    return Err(invalid("model window lengths must be non-negative"));
                }
            },
            ModelConfig::Yakovlev { trajectories, .. } => {
                if trajectories == 0 {
                    return Err(invalid("model.trajectories must be nonzero"));
                }
            },
        }
        Ok(())
    }
}

/// Load, parse, and validate a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok(config)
}

/// Parse and validate a TOML job configuration.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod test {
    use super::*;

    const MINIMAL: &str = r#"
        [pulse]
        wavelength = 1000e-9
        fwhm = 30e-15
        intensity = 1e18

        [target]
        ip_ev = 12.13
    "#;

    #[test]
    fn defaults() {
        let job = parse_config(MINIMAL).unwrap();
        assert_eq!(job.pulse.periods, 20);
        assert_eq!(job.pulse.points_per_period, 200);
        assert_eq!(job.pulse.cep, 0.0);
        assert_eq!(job.target.dipole, DipoleConfig::default());
        assert_eq!(job.model, ModelConfig::default());
        assert_eq!(job.output.directory, "./output");
    }

    #[test]
    fn trajectory_model() {
        let src = format!("{}\n[model]\nkind = \"yakovlev\"\nskip_trajectories = 1\n", MINIMAL);
        let job = parse_config(&src).unwrap();
        assert_eq!(
            job.model,
            ModelConfig::Yakovlev {
                trajectories: 2,
                skip_trajectories: 1,
                max_periods: Some(2.0),
            },
        );
    }

    #[test]
    fn interpolated_dipole() {
        let src = MINIMAL.replace(
            "ip_ev = 12.13",
            "ip_ev = 12.13\ndipole = { type = \"interpolated\", p_max = 2.0, dp = 0.01 }",
        );
        let job = parse_config(&src).unwrap();
        let dp = job.target.dipole
            .build(1, job.target.ip(), job.pulse.wavelength)
            .unwrap();
        assert_eq!(dp.dims(), 1);
        assert!(matches!(dp, DipoleElements::SymmetricInterpolate(_)));
    }

    #[test]
    fn rejects_bad_values() {
        let bad_fwhm = MINIMAL.replace("fwhm = 30e-15", "fwhm = -1.0");
        assert!(parse_config(&bad_fwhm).is_err());
        let bad_wavelength = MINIMAL.replace("wavelength = 1000e-9", "wavelength = 0.0");
        assert!(parse_config(&bad_wavelength).is_err());
        let missing = MINIMAL.replace("ip_ev = 12.13", "");
        assert!(parse_config(&missing).is_err());
    }
}
