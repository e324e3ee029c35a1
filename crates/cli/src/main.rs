#![deny(unsafe_code)]
//! CLI binary for the Vicsek alignment model.
//!
//! Subcommands:
//! - `run` simulates one system and reports its polar order over time, plus
//!   the final polarization and nematic order
//! - `sweep` estimates steady-state order across noise amplitudes
//! - `params` prints the default model parameters

mod error;
mod output;

use amop_core::order::polarization_2d;
use amop_core::trajectory::run_full;
use amop_core::{parse_range, Model};
use amop_vicsek::sweep::{DEFAULT_AVG_STEPS, DEFAULT_BURN_IN, DEFAULT_REPETITIONS};
use amop_vicsek::{sweep, SweepConfig, Vicsek, VicsekParams};
use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "amop", about = "Active-matter order-parameter toolkit")]
struct Cli {
    /// Output as JSON instead of CSV.
    #[arg(long, global = true)]
    json: bool,

    /// Log progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Model parameters shared by `run` and `sweep`; flags override keys from
/// `--params`. The noise amplitude is per subcommand.
#[derive(Args)]
struct ModelArgs {
    /// Number of particles.
    #[arg(short, long)]
    n: Option<usize>,

    /// Side of the periodic box.
    #[arg(short = 'L', long = "box-len")]
    box_len: Option<f64>,

    /// Self-propulsion speed.
    #[arg(long = "v0")]
    speed: Option<f64>,

    /// Interaction radius.
    #[arg(short = 'R', long)]
    radius: Option<f64>,

    /// Timestep.
    #[arg(long)]
    dt: Option<f64>,

    /// Model parameters as a JSON object; missing keys take defaults.
    #[arg(long, default_value = "{}")]
    params: String,
}

impl ModelArgs {
    fn resolve(&self, eta: Option<f64>) -> Result<VicsekParams, CliError> {
        let json: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut p = VicsekParams::from_json(&json)
            .map_err(|e| CliError::Input(format!("invalid --params: {e}")))?;
        if let Some(n) = self.n {
            p.n = n;
        }
        if let Some(box_len) = self.box_len {
            p.box_len = box_len;
        }
        if let Some(speed) = self.speed {
            p.speed = speed;
        }
        if let Some(radius) = self.radius {
            p.radius = radius;
        }
        if let Some(eta) = eta {
            p.eta = eta;
        }
        if let Some(dt) = self.dt {
            p.dt = dt;
        }
        p.validate()?;
        Ok(p)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Simulate one system and report the polar order time series.
    Run {
        #[command(flatten)]
        model: ModelArgs,

        /// Noise amplitude.
        #[arg(long)]
        eta: Option<f64>,

        /// Number of simulation steps.
        #[arg(short, long, default_value_t = 1000)]
        steps: usize,

        /// Record every k-th step.
        #[arg(short = 'k', long, default_value_t = 1)]
        record_every: usize,

        /// PRNG seed; omitted means a fresh random seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the result to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Estimate steady-state order as a function of noise amplitude.
    Sweep {
        #[command(flatten)]
        model: ModelArgs,

        /// Noise amplitudes as `start:stop:step` or a comma list.
        #[arg(long = "eta")]
        etas: String,

        /// Steps discarded before measuring.
        #[arg(long, default_value_t = DEFAULT_BURN_IN)]
        burn_in: usize,

        /// Steps averaged after burn-in.
        #[arg(long, default_value_t = DEFAULT_AVG_STEPS)]
        avg_steps: usize,

        /// Independent repetitions per amplitude.
        #[arg(long, default_value_t = DEFAULT_REPETITIONS)]
        reps: usize,

        /// Base seed all repetition seeds derive from.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Run repetitions on a single thread.
        #[arg(long)]
        serial: bool,

        /// Write the result to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the default model parameters as JSON.
    Params,
}

fn emit(contents: &str, output: Option<&PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            output::write_output(path, contents)?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{contents}"),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let defaults = serde_json::to_value(VicsekParams::default())?;
            println!("{}", serde_json::to_string_pretty(&defaults)?);
        }
        Command::Run {
            model,
            eta,
            steps,
            record_every,
            seed,
            output,
        } => {
            let params = model.resolve(eta)?;
            let mut sim = Vicsek::new(params, seed)?;
            info!(steps, record_every, "running simulation");
            let record = run_full(&mut sim, steps, record_every)?;
            let times = record.trajectory.times(params.dt);
            let phi = record.polar_order;

            let polarization = polarization_2d(&sim.velocities())?;
            let nematic = sim.state().nematic_order()?;
            info!(
                polarization,
                nematic_s = nematic.s,
                director = nematic.director,
                "final state"
            );

            let contents = if cli.json {
                let doc = serde_json::json!({
                    "params": sim.params(),
                    "seed": seed,
                    "steps": steps,
                    "record_every": record_every,
                    "t": times,
                    "phi": phi,
                    "final": {
                        "polarization": polarization,
                        "nematic_s": nematic.s,
                        "director": nematic.director,
                    },
                    "final_state": sim.state(),
                });
                format!("{}\n", serde_json::to_string_pretty(&doc)?)
            } else {
                eprintln!(
                    "final state: P = {polarization:.4}, S = {:.4}, psi = {:.4}",
                    nematic.s, nematic.director
                );
                output::series_csv(&times, &phi)
            };
            emit(&contents, output.as_ref())?;
        }
        Command::Sweep {
            model,
            etas,
            burn_in,
            avg_steps,
            reps,
            seed,
            serial,
            output,
        } => {
            let config = SweepConfig {
                amplitudes: parse_range(&etas)?,
                params: model.resolve(None)?,
                burn_in,
                avg_steps,
                repetitions: reps,
                base_seed: seed,
                parallel: !serial,
            };
            info!(amplitudes = config.amplitudes.len(), reps, "starting sweep");
            let result = sweep(&config)?;

            let contents = if cli.json {
                let doc = serde_json::json!({
                    "config": config,
                    "result": result,
                });
                format!("{}\n", serde_json::to_string_pretty(&doc)?)
            } else {
                output::sweep_csv(&result)
            };
            emit(&contents, output.as_ref())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
