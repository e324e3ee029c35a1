//! Trajectory driver: advances a [`Model`] and records what it sees.
//!
//! After step `t` (0-based), a record is taken whenever `t % stride == 0`, so
//! `steps` steps at stride `k` yield `ceil(steps / k)` records in
//! chronological order. Recorded states are deep copies.

use crate::error::AmopError;
use crate::geometry::unwrap_track;
use crate::model::Model;
use crate::order::NematicOrder;
use crate::state::ParticleState;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Snapshots of a run, taken every `stride` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    stride: usize,
    frames: Vec<ParticleState>,
}

impl Trajectory {
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn frames(&self) -> &[ParticleState] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Polar order parameter of every frame.
    pub fn polar_order_series(&self) -> Vec<f64> {
        self.frames.iter().map(ParticleState::polar_order).collect()
    }

    /// Nematic order parameter and director of every frame.
    ///
    /// Returns `AmopError::EmptyInput` if any frame holds no particles.
    pub fn nematic_order_series(&self) -> Result<Vec<NematicOrder>, AmopError> {
        self.frames.iter().map(ParticleState::nematic_order).collect()
    }

    /// Simulation time of every frame: `index * dt * stride`.
    pub fn times(&self, dt: f64) -> Vec<f64> {
        (0..self.frames.len())
            .map(|i| i as f64 * dt * self.stride as f64)
            .collect()
    }

    /// Positions of one particle across all frames, as stored (wrapped).
    ///
    /// Returns `None` if `particle` is out of range.
    pub fn track(&self, particle: usize) -> Option<Vec<DVec2>> {
        self.frames
            .iter()
            .map(|f| f.positions().get(particle).copied())
            .collect()
    }

    /// Positions of one particle with periodic jumps removed.
    pub fn unwrapped_track(&self, particle: usize, box_len: f64) -> Option<Vec<DVec2>> {
        self.track(particle).map(|t| unwrap_track(&t, box_len))
    }
}

/// Frames and order parameters recorded together by [`run_full`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub trajectory: Trajectory,
    pub polar_order: Vec<f64>,
}

/// Advances `model` by `steps` steps, applying `observe` after every
/// `stride`-th step.
///
/// Returns `AmopError::InvalidParameter` if `stride` is 0, and propagates any
/// step failure.
pub fn record<M, T, F>(
    model: &mut M,
    steps: usize,
    stride: usize,
    mut observe: F,
) -> Result<Vec<T>, AmopError>
where
    M: Model + ?Sized,
    F: FnMut(&M) -> T,
{
    if stride == 0 {
        return Err(AmopError::invalid_param("stride", "must be at least 1"));
    }
    let mut out = Vec::with_capacity(steps.div_ceil(stride));
    for t in 0..steps {
        model.step()?;
        if t % stride == 0 {
            out.push(observe(&*model));
        }
    }
    Ok(out)
}

/// Advances `model` and keeps deep-copied snapshots of its state.
pub fn run_trajectory<M: Model + ?Sized>(
    model: &mut M,
    steps: usize,
    stride: usize,
) -> Result<Trajectory, AmopError> {
    let frames = record(model, steps, stride, |m| m.state().clone())?;
    Ok(Trajectory { stride, frames })
}

/// Advances `model` and keeps only the polar order parameter per record.
pub fn run_order_series<M: Model + ?Sized>(
    model: &mut M,
    steps: usize,
    stride: usize,
) -> Result<Vec<f64>, AmopError> {
    record(model, steps, stride, |m| m.polar_order())
}

/// Advances `model`, keeping snapshots and the order parameter side by side.
pub fn run_full<M: Model + ?Sized>(
    model: &mut M,
    steps: usize,
    stride: usize,
) -> Result<RunRecord, AmopError> {
    let pairs = record(model, steps, stride, |m| (m.state().clone(), m.polar_order()))?;
    let (frames, polar_order) = pairs.into_iter().unzip();
    Ok(RunRecord {
        trajectory: Trajectory { stride, frames },
        polar_order,
    })
}
