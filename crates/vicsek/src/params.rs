//! Parameters of the Vicsek alignment model.

use amop_core::AmopError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default particle count.
pub const DEFAULT_N: usize = 300;
/// Default side of the periodic square box.
pub const DEFAULT_BOX_LEN: f64 = 20.0;
/// Default self-propulsion speed.
pub const DEFAULT_SPEED: f64 = 0.3;
/// Default metric interaction radius.
pub const DEFAULT_RADIUS: f64 = 1.0;
/// Default noise amplitude; noise is uniform in `[-eta/2, eta/2]`.
pub const DEFAULT_ETA: f64 = 0.2;
/// Default timestep.
pub const DEFAULT_DT: f64 = 1.0;

/// Simulation parameters for the Vicsek model.
///
/// Missing fields deserialize to their defaults, so a partial JSON object
/// such as `{"eta": 0.5}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VicsekParams {
    /// Particle count `N`.
    pub n: usize,
    /// Box side `L`.
    pub box_len: f64,
    /// Speed `v0`.
    pub speed: f64,
    /// Interaction radius `R`. Neighbors satisfy `d^2 <= R^2`, self included.
    pub radius: f64,
    /// Noise amplitude `eta`.
    pub eta: f64,
    /// Timestep `dt`.
    pub dt: f64,
}

impl Default for VicsekParams {
    fn default() -> Self {
        Self {
            n: DEFAULT_N,
            box_len: DEFAULT_BOX_LEN,
            speed: DEFAULT_SPEED,
            radius: DEFAULT_RADIUS,
            eta: DEFAULT_ETA,
            dt: DEFAULT_DT,
        }
    }
}

impl VicsekParams {
    /// Builds parameters from a JSON object, filling missing keys with defaults.
    ///
    /// A key of the wrong type is an error rather than a silent fallback.
    pub fn from_json(params: &Value) -> Result<Self, AmopError> {
        Self::deserialize(params).map_err(|e| AmopError::invalid_param("params", e.to_string()))
    }

    /// Copy with a different noise amplitude.
    pub fn with_eta(self, eta: f64) -> Self {
        Self { eta, ..self }
    }

    /// Checks the boundary conditions every simulation relies on.
    pub fn validate(&self) -> Result<(), AmopError> {
        if self.n == 0 {
            return Err(AmopError::invalid_param("n", "particle count must be positive"));
        }
        if !(self.box_len.is_finite() && self.box_len > 0.0) {
            return Err(AmopError::invalid_param(
                "box_len",
                format!("must be positive and finite, got {}", self.box_len),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(AmopError::invalid_param(
                "dt",
                format!("must be positive and finite, got {}", self.dt),
            ));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(AmopError::invalid_param(
                "radius",
                format!("must be non-negative and finite, got {}", self.radius),
            ));
        }
        if !(self.eta.is_finite() && self.eta >= 0.0) {
            return Err(AmopError::invalid_param(
                "eta",
                format!("must be non-negative and finite, got {}", self.eta),
            ));
        }
        if !self.speed.is_finite() {
            return Err(AmopError::invalid_param(
                "speed",
                format!("must be finite, got {}", self.speed),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_valid() {
        let p = VicsekParams::default();
        assert_eq!(p.n, 300);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn from_json_fills_missing_keys() {
        let p = VicsekParams::from_json(&json!({"eta": 0.75, "n": 40})).unwrap();
        assert_eq!(p.n, 40);
        assert!((p.eta - 0.75).abs() < f64::EPSILON);
        assert!((p.box_len - DEFAULT_BOX_LEN).abs() < f64::EPSILON);
        assert!((p.speed - DEFAULT_SPEED).abs() < f64::EPSILON);
    }

    #[test]
    fn from_json_of_empty_object_is_default() {
        assert_eq!(VicsekParams::from_json(&json!({})).unwrap(), VicsekParams::default());
    }

    #[test]
    fn from_json_rejects_wrong_type() {
        let err = VicsekParams::from_json(&json!({"radius": "wide"})).unwrap_err();
        assert!(matches!(err, AmopError::InvalidParameter { .. }));
    }

    #[test]
    fn with_eta_changes_only_noise() {
        let base = VicsekParams::default();
        let p = base.with_eta(1.5);
        assert!((p.eta - 1.5).abs() < f64::EPSILON);
        assert_eq!(VicsekParams { eta: base.eta, ..p }, base);
    }

    #[test]
    fn validate_rejects_each_bad_field() {
        let base = VicsekParams::default();
        let cases = [
            ("n", VicsekParams { n: 0, ..base }),
            ("box_len", VicsekParams { box_len: 0.0, ..base }),
            ("box_len", VicsekParams { box_len: f64::INFINITY, ..base }),
            ("dt", VicsekParams { dt: -1.0, ..base }),
            ("radius", VicsekParams { radius: -0.1, ..base }),
            ("eta", VicsekParams { eta: f64::NAN, ..base }),
            ("speed", VicsekParams { speed: f64::NAN, ..base }),
        ];
        for (field, p) in cases {
            match p.validate() {
                Err(AmopError::InvalidParameter { name, .. }) => assert_eq!(name, field),
                other => panic!("{field}: expected InvalidParameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_radius_and_zero_noise_are_allowed() {
        let p = VicsekParams {
            radius: 0.0,
            eta: 0.0,
            ..VicsekParams::default()
        };
        assert!(p.validate().is_ok());
    }
}
