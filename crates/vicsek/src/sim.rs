//! The Vicsek step rule.
//!
//! One step, for every particle `i`:
//! 1. neighbors are all `j` (self included) with minimum-image `d_ij^2 <= R^2`;
//! 2. the local heading is `atan2(<sin θ_j>, <cos θ_j>)` over those neighbors;
//! 3. uniform noise in `[-eta/2, eta/2]` is added;
//! 4. the particle moves `v0 * dt` along its new heading and is wrapped back
//!    into `[0, L)`.
//!
//! The new configuration is computed in full from the old one, then committed
//! in a single replacement.

use crate::params::VicsekParams;
use amop_core::geometry::{pairwise_sq_distances, wrap_point};
use amop_core::{AmopError, Model, ParticleState, Xorshift64};
use glam::DVec2;
use serde_json::{json, Value};
use tracing::debug;

/// Vicsek alignment model on a periodic square box.
///
/// Owns its state and its random stream; two instances never share either.
pub struct Vicsek {
    state: ParticleState,
    params: VicsekParams,
    rng: Xorshift64,
}

impl Vicsek {
    /// Creates a model with a random initial configuration.
    ///
    /// With `seed = None` the stream is drawn from OS entropy and the run is
    /// not reproducible.
    pub fn new(params: VicsekParams, seed: Option<u64>) -> Result<Self, AmopError> {
        Self::with_rng(params, Xorshift64::from_optional_seed(seed))
    }

    /// Creates a model drawing its initial configuration and all noise from `rng`.
    pub fn with_rng(params: VicsekParams, mut rng: Xorshift64) -> Result<Self, AmopError> {
        params.validate()?;
        let state = ParticleState::random(params.n, params.box_len, &mut rng);
        debug!(
            n = params.n,
            box_len = params.box_len,
            eta = params.eta,
            radius = params.radius,
            "initialized vicsek model"
        );
        Ok(Self { state, params, rng })
    }

    /// Creates a model from an explicit configuration.
    ///
    /// Returns `AmopError::InvalidShape` if `state` does not hold `params.n`
    /// particles.
    pub fn from_state(
        params: VicsekParams,
        state: ParticleState,
        rng: Xorshift64,
    ) -> Result<Self, AmopError> {
        params.validate()?;
        if state.len() != params.n {
            return Err(AmopError::InvalidShape {
                expected: format!("{} particles", params.n),
                got: format!("{} particles", state.len()),
            });
        }
        Ok(Self { state, params, rng })
    }

    /// Creates a model from a partial JSON params object.
    pub fn from_json(json_params: &Value, seed: Option<u64>) -> Result<Self, AmopError> {
        Self::new(VicsekParams::from_json(json_params)?, seed)
    }

    pub fn vicsek_params(&self) -> &VicsekParams {
        &self.params
    }

    /// Current velocities `v0 * (cos θ, sin θ)`.
    pub fn velocities(&self) -> Vec<DVec2> {
        self.state.velocities(self.params.speed)
    }
}

impl Model for Vicsek {
    fn step(&mut self) -> Result<(), AmopError> {
        let p = self.params;
        let local = local_mean_headings(
            self.state.positions(),
            self.state.headings(),
            p.box_len,
            p.radius,
        );

        let mut headings = Vec::with_capacity(local.len());
        let mut positions = Vec::with_capacity(local.len());
        for (mean, pos) in local.into_iter().zip(self.state.positions()) {
            let theta = mean + p.eta * (self.rng.next_f64() - 0.5);
            let velocity = DVec2::from_angle(theta) * p.speed;
            headings.push(theta);
            positions.push(wrap_point(*pos + velocity * p.dt, p.box_len));
        }

        self.state.commit(positions, headings)
    }

    fn state(&self) -> &ParticleState {
        &self.state
    }

    fn params(&self) -> Value {
        json!({
            "n": self.params.n,
            "box_len": self.params.box_len,
            "speed": self.params.speed,
            "radius": self.params.radius,
            "eta": self.params.eta,
            "dt": self.params.dt,
        })
    }
}

/// Local mean heading of every particle over its metric neighborhood.
///
/// The neighborhood includes the particle itself (its squared distance is
/// 0), so an isolated particle's local heading is its own heading and the
/// mean is never taken over an empty set.
pub fn local_mean_headings(
    positions: &[DVec2],
    headings: &[f64],
    box_len: f64,
    radius: f64,
) -> Vec<f64> {
    let d2 = pairwise_sq_distances(positions, box_len);
    let r2 = radius * radius;
    let (cos, sin): (Vec<f64>, Vec<f64>) = headings
        .iter()
        .map(|th| {
            let (s, c) = th.sin_cos();
            (c, s)
        })
        .unzip();

    (0..d2.n())
        .map(|i| {
            let (mut sx, mut sy, mut count) = (0.0, 0.0, 0usize);
            for (j, &dist2) in d2.row(i).iter().enumerate() {
                if dist2 <= r2 {
                    sx += cos[j];
                    sy += sin[j];
                    count += 1;
                }
            }
            let count = count.max(1) as f64;
            (sy / count).atan2(sx / count)
        })
        .collect()
}
