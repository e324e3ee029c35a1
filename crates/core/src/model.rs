//! The `Model` trait implemented by every particle dynamics.
//!
//! The trait is object-safe so the trajectory driver and collaborators can
//! work with `dyn Model` without knowing the concrete update rule.

use crate::error::AmopError;
use crate::state::ParticleState;
use serde_json::Value;

/// A step-based particle simulation.
///
/// A model owns exactly one [`ParticleState`] and mutates it only inside
/// [`Model::step`]. Observers see the state between steps, never during one.
pub trait Model {
    /// Advance the simulation by one timestep.
    fn step(&mut self) -> Result<(), AmopError>;

    /// The live configuration.
    fn state(&self) -> &ParticleState;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Polar order parameter of the live configuration.
    fn polar_order(&self) -> f64 {
        self.state().polar_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Xorshift64;
    use serde_json::json;

    /// Rotates every heading by a fixed increment per step.
    struct Spinner {
        state: ParticleState,
        increment: f64,
        steps: usize,
    }

    impl Spinner {
        fn new(n: usize) -> Self {
            Self {
                state: ParticleState::random(n, 10.0, &mut Xorshift64::new(9)),
                increment: 0.1,
                steps: 0,
            }
        }
    }

    impl Model for Spinner {
        fn step(&mut self) -> Result<(), AmopError> {
            let headings = self
                .state
                .headings()
                .iter()
                .map(|th| th + self.increment)
                .collect();
            let positions = self.state.positions().to_vec();
            self.state.commit(positions, headings)?;
            self.steps += 1;
            Ok(())
        }

        fn state(&self) -> &ParticleState {
            &self.state
        }

        fn params(&self) -> Value {
            json!({"increment": self.increment, "steps": self.steps})
        }
    }

    #[test]
    fn model_trait_is_object_safe() {
        let model: Box<dyn Model> = Box::new(Spinner::new(5));
        assert_eq!(model.state().len(), 5);
    }

    #[test]
    fn step_mutates_owned_state() {
        let mut model = Spinner::new(4);
        let before = model.state().headings()[0];
        model.step().unwrap();
        model.step().unwrap();
        assert!((model.state().headings()[0] - before - 0.2).abs() < 1e-12);
        assert_eq!(model.params()["steps"], 2);
    }

    #[test]
    fn uniform_rotation_preserves_polar_order() {
        let mut model = Spinner::new(64);
        let before = model.polar_order();
        for _ in 0..10 {
            model.step().unwrap();
        }
        assert!((model.polar_order() - before).abs() < 1e-12);
    }

    #[test]
    fn dyn_model_mut_reference_works() {
        let mut model = Spinner::new(3);
        let model_ref: &mut dyn Model = &mut model;
        model_ref.step().unwrap();
        assert_eq!(model_ref.params()["steps"], 1);
    }
}
