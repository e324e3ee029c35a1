//! Error types shared by the simulation and measurement crates.

use thiserror::Error;

/// Errors produced by order-parameter, simulation, and sweep operations.
///
/// Numerical edge cases (zero-norm vectors, isolated particles) are absorbed
/// with a fallback and never surface here. Only structural problems do.
#[derive(Debug, Error)]
pub enum AmopError {
    /// Input vectors had the wrong dimensionality or were ragged.
    #[error("invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },

    /// An order parameter was requested over zero elements.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A simulation or sweep parameter failed its boundary guard.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A noise-amplitude range string could not be parsed.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// An I/O failure reported by an output collaborator.
    #[error("i/o error: {0}")]
    Io(String),
}

impl AmopError {
    /// Shorthand for [`AmopError::InvalidParameter`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        AmopError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_shape_includes_expected_and_got() {
        let err = AmopError::InvalidShape {
            expected: "vectors of dimension 2 or 3".into(),
            got: "dimension 4".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("2 or 3"), "missing expected in: {msg}");
        assert!(msg.contains("dimension 4"), "missing got in: {msg}");
    }

    #[test]
    fn empty_input_includes_context() {
        let err = AmopError::EmptyInput("nematic order of zero angles".into());
        let msg = format!("{err}");
        assert!(msg.contains("zero angles"), "missing context in: {msg}");
    }

    #[test]
    fn invalid_param_helper_builds_named_variant() {
        let err = AmopError::invalid_param("box_len", "must be positive, got -1");
        match &err {
            AmopError::InvalidParameter { name, reason } => {
                assert_eq!(name, "box_len");
                assert!(reason.contains("-1"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        let msg = format!("{err}");
        assert!(msg.contains("box_len") && msg.contains("positive"), "{msg}");
    }

    #[test]
    fn invalid_range_includes_message() {
        let err = AmopError::InvalidRange("step must be non-zero".into());
        assert!(format!("{err}").contains("non-zero"));
    }

    #[test]
    fn io_includes_message() {
        let err = AmopError::Io("disk full".into());
        assert!(format!("{err}").contains("disk full"));
    }

    #[test]
    fn amop_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AmopError>();
    }

    #[test]
    fn amop_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<AmopError>();
    }
}
