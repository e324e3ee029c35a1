#![deny(unsafe_code)]
//! Vicsek-type alignment model and its noise-sweep estimator.
//!
//! Self-propelled point particles move at constant speed through a periodic
//! square box. Each step, every particle adopts the circular mean heading of
//! its metric neighbors (itself included) plus uniform angular noise. Low
//! noise orders the flock; high noise disorders it.
//!
//! [`sweep::sweep`] estimates the steady-state polar order as a function of
//! the noise amplitude, discarding a burn-in transient and averaging over
//! independent, reproducibly seeded repetitions.

pub mod params;
pub mod sim;
pub mod sweep;

pub use params::VicsekParams;
pub use sim::Vicsek;
pub use sweep::{sweep, SweepConfig, SweepResult};
