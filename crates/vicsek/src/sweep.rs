//! Noise-sweep estimator of the steady-state polar order parameter.
//!
//! For each noise amplitude, `K` independent simulations are built, each is
//! advanced `B` burn-in steps without measurement, and the order parameter is
//! averaged over the next `A` steps. The `K` averages give a mean and a
//! sample standard deviation per amplitude.
//!
//! Child seeds are drawn from the base seed in a fixed order (amplitude,
//! then repetition) before any simulation runs, so serial and parallel
//! evaluation give bit-identical results.

use crate::params::VicsekParams;
use crate::sim::Vicsek;
use amop_core::trajectory::record;
use amop_core::{AmopError, Model, Xorshift64};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default number of burn-in steps.
pub const DEFAULT_BURN_IN: usize = 1000;
/// Default length of the steady-state averaging window.
pub const DEFAULT_AVG_STEPS: usize = 1000;
/// Default repetitions per amplitude.
pub const DEFAULT_REPETITIONS: usize = 3;

/// Reproducible description of a sweep.
///
/// Two equal configs always produce bit-identical [`SweepResult`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Noise amplitudes, evaluated and reported in this order.
    pub amplitudes: Vec<f64>,
    /// Model parameters; `eta` is overridden per amplitude.
    pub params: VicsekParams,
    /// Steps discarded before measuring (`B`).
    pub burn_in: usize,
    /// Steps averaged after burn-in (`A`).
    pub avg_steps: usize,
    /// Independent runs per amplitude (`K`).
    pub repetitions: usize,
    /// Seed all per-run seeds are derived from.
    pub base_seed: u64,
    /// Evaluate runs on the rayon pool. Does not affect results.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            amplitudes: Vec::new(),
            params: VicsekParams::default(),
            burn_in: DEFAULT_BURN_IN,
            avg_steps: DEFAULT_AVG_STEPS,
            repetitions: DEFAULT_REPETITIONS,
            base_seed: 0,
            parallel: true,
        }
    }
}

impl SweepConfig {
    /// Config over `amplitudes` with default windows, repetitions and seed.
    pub fn new(amplitudes: Vec<f64>, params: VicsekParams) -> Self {
        Self {
            amplitudes,
            params,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AmopError> {
        if self.amplitudes.is_empty() {
            return Err(AmopError::invalid_param("amplitudes", "at least one amplitude is required"));
        }
        if self.repetitions == 0 {
            return Err(AmopError::invalid_param("repetitions", "must be at least 1"));
        }
        if self.avg_steps == 0 {
            return Err(AmopError::invalid_param("avg_steps", "must be at least 1"));
        }
        for &eta in &self.amplitudes {
            self.params.with_eta(eta).validate()?;
        }
        Ok(())
    }
}

/// Per-amplitude mean and standard deviation of the steady-state order.
///
/// The three sequences are index-aligned and follow the config's amplitude
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub amplitudes: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// `(eta, mean, std)` rows for tabulation.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.amplitudes
            .iter()
            .zip(&self.mean)
            .zip(&self.std)
            .map(|((&eta, &mean), &std)| (eta, mean, std))
    }
}

/// One scheduled simulation of the sweep.
#[derive(Debug, Clone, Copy)]
struct Run {
    eta: f64,
    repetition: usize,
    seed: u64,
}

/// Runs the sweep described by `config`.
pub fn sweep(config: &SweepConfig) -> Result<SweepResult, AmopError> {
    config.validate()?;

    let mut seeder = Xorshift64::new(config.base_seed);
    let mut runs = Vec::with_capacity(config.amplitudes.len() * config.repetitions);
    for &eta in &config.amplitudes {
        for repetition in 0..config.repetitions {
            runs.push(Run {
                eta,
                repetition,
                seed: seeder.next_seed(),
            });
        }
    }

    let values: Vec<f64> = if config.parallel {
        runs.par_iter()
            .map(|run| steady_state_order(config, run))
            .collect::<Result<_, _>>()?
    } else {
        runs.iter()
            .map(|run| steady_state_order(config, run))
            .collect::<Result<_, _>>()?
    };

    let mut mean = Vec::with_capacity(config.amplitudes.len());
    let mut std = Vec::with_capacity(config.amplitudes.len());
    for (&eta, per_run) in config.amplitudes.iter().zip(values.chunks(config.repetitions)) {
        let (m, s) = sample_mean_std(per_run)?;
        info!(eta, phi_mean = m, phi_std = s, "sweep amplitude done");
        mean.push(m);
        std.push(s);
    }

    Ok(SweepResult {
        amplitudes: config.amplitudes.clone(),
        mean,
        std,
    })
}

/// Burns in one fresh simulation, then averages its order parameter over
/// the steady-state window.
fn steady_state_order(config: &SweepConfig, run: &Run) -> Result<f64, AmopError> {
    let mut sim = Vicsek::new(config.params.with_eta(run.eta), Some(run.seed))?;
    for _ in 0..config.burn_in {
        sim.step()?;
    }
    let window = record(&mut sim, config.avg_steps, 1, |m| m.polar_order())?;
    let phi = window.iter().sum::<f64>() / window.len() as f64;
    debug!(eta = run.eta, repetition = run.repetition, seed = run.seed, phi, "repetition done");
    Ok(phi)
}

/// Mean and sample standard deviation (divisor `K - 1`).
///
/// The deviation of a single sample is defined as 0. Returns
/// `AmopError::EmptyInput` for no samples.
pub fn sample_mean_std(values: &[f64]) -> Result<(f64, f64), AmopError> {
    if values.is_empty() {
        return Err(AmopError::EmptyInput("mean of zero repetitions".into()));
    }
    let k = values.len() as f64;
    let mean = values.iter().sum::<f64>() / k;
    if values.len() == 1 {
        return Ok((mean, 0.0));
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok((mean, (ss / (k - 1.0)).sqrt()))
}
