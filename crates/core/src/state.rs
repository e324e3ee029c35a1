//! Instantaneous configuration of `N` self-propelled particles.

use crate::error::AmopError;
use crate::geometry::wrap_point;
use crate::order::{nematic_order_2d, polar_order_angles, NematicOrder};
use crate::prng::Xorshift64;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Positions and headings of `N` particles in a periodic square box.
///
/// The two sequences are index-aligned and keep length `N` for the lifetime
/// of the state. Positions stay in `[0, L)`. Headings carry no range
/// invariant; every consumer goes through sine and cosine.
///
/// Deserialization rejects sequences of different lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateParts")]
pub struct ParticleState {
    positions: Vec<DVec2>,
    headings: Vec<f64>,
}

/// Unchecked wire form of [`ParticleState`].
#[derive(Deserialize)]
struct StateParts {
    positions: Vec<DVec2>,
    headings: Vec<f64>,
}

impl TryFrom<StateParts> for ParticleState {
    type Error = AmopError;

    fn try_from(parts: StateParts) -> Result<Self, Self::Error> {
        check_lengths(&parts.positions, &parts.headings)?;
        Ok(Self {
            positions: parts.positions,
            headings: parts.headings,
        })
    }
}

fn check_lengths(positions: &[DVec2], headings: &[f64]) -> Result<(), AmopError> {
    if positions.len() != headings.len() {
        return Err(AmopError::InvalidShape {
            expected: format!("{} headings to match positions", positions.len()),
            got: format!("{} headings", headings.len()),
        });
    }
    Ok(())
}

impl ParticleState {
    /// Draws `n` positions uniformly over `[0, L)^2` and `n` headings
    /// uniformly over `[0, 2π)`.
    ///
    /// All positions are drawn first, then all headings, so a given seed
    /// fixes the whole configuration.
    pub fn random(n: usize, box_len: f64, rng: &mut Xorshift64) -> Self {
        let positions = (0..n)
            .map(|_| {
                let x = rng.next_range(0.0, box_len);
                let y = rng.next_range(0.0, box_len);
                wrap_point(DVec2::new(x, y), box_len)
            })
            .collect();
        let headings = (0..n).map(|_| rng.next_range(0.0, TAU)).collect();
        Self {
            positions,
            headings,
        }
    }

    /// Builds a state from explicit positions and headings.
    ///
    /// Positions are wrapped into `[0, L)`. Returns
    /// `AmopError::InvalidShape` if the sequences differ in length.
    pub fn from_parts(
        positions: Vec<DVec2>,
        headings: Vec<f64>,
        box_len: f64,
    ) -> Result<Self, AmopError> {
        check_lengths(&positions, &headings)?;
        let positions = positions
            .into_iter()
            .map(|p| wrap_point(p, box_len))
            .collect();
        Ok(Self {
            positions,
            headings,
        })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    pub fn headings(&self) -> &[f64] {
        &self.headings
    }

    /// Unit heading vectors `(cos θ, sin θ)`.
    pub fn unit_vectors(&self) -> Vec<DVec2> {
        self.headings.iter().map(|&th| DVec2::from_angle(th)).collect()
    }

    /// Velocities `v0 * (cos θ, sin θ)`.
    pub fn velocities(&self, speed: f64) -> Vec<DVec2> {
        self.headings
            .iter()
            .map(|&th| DVec2::from_angle(th) * speed)
            .collect()
    }

    /// Polar order parameter of the current headings.
    pub fn polar_order(&self) -> f64 {
        polar_order_angles(&self.headings)
    }

    /// Nematic order parameter and director of the current headings.
    ///
    /// Returns `AmopError::EmptyInput` for a state with no particles.
    pub fn nematic_order(&self) -> Result<NematicOrder, AmopError> {
        nematic_order_2d(&self.headings)
    }

    /// Replaces the whole configuration in one move.
    ///
    /// Returns `AmopError::InvalidShape` (leaving the state untouched) if
    /// either sequence would change `N`.
    pub fn commit(&mut self, positions: Vec<DVec2>, headings: Vec<f64>) -> Result<(), AmopError> {
        if positions.len() != self.len() || headings.len() != self.len() {
            return Err(AmopError::InvalidShape {
                expected: format!("{} positions and headings", self.len()),
                got: format!("{} positions, {} headings", positions.len(), headings.len()),
            });
        }
        self.positions = positions;
        self.headings = headings;
        Ok(())
    }
}
