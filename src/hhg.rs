//! Command-line front end.
//!
//! Run a dipole-response job from a TOML configuration file, or evaluate the
//! cutoff law:
//! ```sh
//! hhg run job.toml -o output
//! hhg validate job.toml
//! hhg cutoff --wavelength 800e-9 --amplitude 5e10 --ip-ev 15.76
//! hhg cutoff-amplitude --wavelength 800e-9 --order 61 --ip-ev 15.76
//! ```

use std::path::{ Path, PathBuf };
use anyhow::Context;
use clap::{ Parser, Subcommand };
use log::info;
use ndarray as nd;
use hhg_sim::{
    mkdir,
    write_npz,
    config::{ self, JobConfig, ModelConfig },
    cutoff::{ cutoff, cutoff_amplitude },
    ionization::tunnel_ground_state,
    lewenstein::{ lewenstein, LewensteinParams },
    units,
    window::get_weights,
    yakovlev::{ yakovlev, YakovlevParams },
};

#[derive(Parser)]
#[command(name = "hhg")]
#[command(about = "High-harmonic dipole response in the strong-field approximation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the dipole response described by a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without running it.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Print the cutoff harmonic order for a peak field.
    Cutoff {
        /// Driving wavelength [m].
        #[arg(long)]
        wavelength: f64,
        /// Peak field [V/m].
        #[arg(long)]
        amplitude: f64,
        /// Ionization potential [eV].
        #[arg(long)]
        ip_ev: f64,
    },
    /// Print the peak field [V/m] needed to reach a cutoff harmonic order.
    CutoffAmplitude {
        /// Driving wavelength [m].
        #[arg(long)]
        wavelength: f64,
        /// Cutoff harmonic order.
        #[arg(long)]
        order: f64,
        /// Ionization potential [eV].
        #[arg(long)]
        ip_ev: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            let job = config::load_config(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            info!("configuration: {}", config.display());
            let outdir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            run_job(&job, &outdir)?;
            println!("done");
        },
        Commands::Validate { config } => {
            config::load_config(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            println!("{}: ok", config.display());
        },
        Commands::Cutoff { wavelength, amplitude, ip_ev } => {
            let order = cutoff(amplitude, ip_ev * units::e, wavelength)?;
            println!("{:.3}", order);
        },
        Commands::CutoffAmplitude { wavelength, order, ip_ev } => {
            let amplitude = cutoff_amplitude(order, ip_ev * units::e, wavelength)?;
            println!("{:.6e}", amplitude);
        },
    }
    Ok(())
}

fn run_job(job: &JobConfig, outdir: &Path) -> anyhow::Result<()> {
    let pulse = job.pulse.pulse();
    let wavelength = pulse.wavelength;
    let ip = job.target.ip();
    let t = pulse.time_axis(job.pulse.periods, job.pulse.points_per_period);
    let Et = pulse.field(&t);
    info!(
        "{} samples over ±{} periods; expected cutoff at harmonic {:.1}",
        t.len(), job.pulse.periods, cutoff(pulse.amplitude(), ip, wavelength)?,
    );

    let (d, at): (nd::Array1<f64>, nd::Array1<f64>)
        = match job.model {
            ModelConfig::Lewenstein {
                epsilon_t, periods_full, periods_taper, depletion
            } => {
                let dp = job.target.dipole.build(1, ip, wavelength)?;
                let weights: nd::Array1<f64>
                    = get_weights(&t, pulse.period(), periods_full, periods_taper)
                    .iter().copied()
                    .take(t.len())
                    .collect();
                let at
                    = if depletion {
                        tunnel_ground_state(&t, &Et, ip)?
                    } else {
                        nd::Array1::ones(t.len())
                    };
                let params
                    = LewensteinParams::new(ip)
                    .with_wavelength(wavelength)
                    .with_weights(&weights)
                    .with_ground_state_amplitude(&at)
                    .with_dipole_elements(&dp)
                    .with_epsilon_t(epsilon_t);
                info!("lewenstein: {} travel-time samples", weights.len());
                let d = lewenstein(&t, &Et, &params)?.column(0).to_owned();
                (d, at)
            },
            ModelConfig::Yakovlev { trajectories, skip_trajectories, max_periods } => {
                let at = tunnel_ground_state(&t, &Et, ip)?;
                let params
                    = YakovlevParams::new(ip)
                    .with_wavelength(wavelength)
                    .with_trajectories(trajectories)
                    .with_skip_trajectories(skip_trajectories)
                    .with_max_periods(max_periods);
                info!("yakovlev: {} trajectories, {} skipped", trajectories, skip_trajectories);
                let d = yakovlev(&t, &Et, &at, &params)?;
                (d, at)
            },
        };

    mkdir!(outdir).with_context(|| format!("creating {}", outdir.display()))?;
    let outfile = outdir.join("data.npz");
    write_npz!(
        &outfile,
        arrays: {
            "t" => &t,
            "Et" => &Et,
            "d" => &d,
            "at" => &at,
        }
    ).with_context(|| format!("writing {}", outfile.display()))?;
    info!("wrote {}", outfile.display());
    Ok(())
}
