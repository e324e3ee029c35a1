#![deny(unsafe_code)]
//! Core types for active-matter simulations and their measurement.
//!
//! Provides minimum-image geometry on a periodic square box, polar and
//! nematic order parameters, the caller-owned `Xorshift64` PRNG,
//! `ParticleState`, the `Model` trait, the trajectory driver, and parsing of
//! noise-amplitude ranges.

pub mod error;
pub mod geometry;
pub mod model;
pub mod order;
pub mod prng;
pub mod range;
pub mod state;
pub mod trajectory;

pub use error::AmopError;
pub use geometry::PairMatrix;
pub use model::Model;
pub use order::{nematic_order_2d, polar_order_angles, polarization, NematicOrder};
pub use prng::Xorshift64;
pub use range::parse_range;
pub use state::ParticleState;
pub use trajectory::{RunRecord, Trajectory};
