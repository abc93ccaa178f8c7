//! Configuration-time weight validation.
//!
//! Validation is a gate that runs when a mode or weight vector changes,
//! never on the evaluation path. A host framework that configures
//! components in stages can defer the sum check with
//! [`ValidationPhase::Initializing`] (range and NaN checks always run);
//! the all-zero placeholder weights such frameworks install are accepted
//! in that phase and handled at evaluation time by the passthrough
//! fallback.

use crate::error::ConfigError;

/// Relative tolerance for the weight-sum check.
pub const WEIGHT_SUM_TOL: f64 = 1e-8;

/// Whether the configuring host is still initializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationPhase {
    /// Early configuration: element range is enforced, the sum check is
    /// deferred until the host finishes wiring the component.
    Initializing,
    /// Normal operation: all checks run.
    #[default]
    Configured,
}

/// Validate a probability-weight vector.
///
/// Checks, in order:
/// 1. every element in `[0, 1]` (NaN fails) — [`ConfigError::WeightOutOfRange`];
/// 2. unless `phase` is [`ValidationPhase::Initializing`], the sum is 1
///    within [`WEIGHT_SUM_TOL`] — [`ConfigError::WeightSumInvalid`].
pub fn validate_weights(weights: &[f64], phase: ValidationPhase) -> Result<(), ConfigError> {
    for (index, &value) in weights.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::WeightOutOfRange { index, value });
        }
    }
    if phase == ValidationPhase::Initializing {
        return Ok(());
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOL {
        return Err(ConfigError::WeightSumInvalid { sum });
    }
    Ok(())
}

/// Validate that `weights` is shape-compatible with a value vector of
/// length `values_len`.
pub fn validate_shape(values_len: usize, weights_len: usize) -> Result<(), ConfigError> {
    if values_len != weights_len {
        return Err(ConfigError::ShapeMismatch {
            expected: values_len,
            got: weights_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_proper_distribution() {
        assert_eq!(
            validate_weights(&[0.2, 0.3, 0.5], ValidationPhase::Configured),
            Ok(())
        );
    }

    #[test]
    fn rejects_out_of_range_with_index() {
        let err = validate_weights(&[0.5, 1.5], ValidationPhase::Configured).unwrap_err();
        assert_eq!(err, ConfigError::WeightOutOfRange { index: 1, value: 1.5 });

        let err = validate_weights(&[-0.1], ValidationPhase::Configured).unwrap_err();
        assert!(matches!(err, ConfigError::WeightOutOfRange { index: 0, .. }));
    }

    #[test]
    fn nan_weight_is_out_of_range_even_while_initializing() {
        let err = validate_weights(&[f64::NAN], ValidationPhase::Initializing).unwrap_err();
        assert!(matches!(err, ConfigError::WeightOutOfRange { index: 0, .. }));
    }

    #[test]
    fn rejects_bad_sum_when_configured() {
        let err = validate_weights(&[0.2, 0.2], ValidationPhase::Configured).unwrap_err();
        assert!(matches!(err, ConfigError::WeightSumInvalid { sum } if (sum - 0.4).abs() < 1e-15));
    }

    #[test]
    fn sum_check_tolerates_tiny_drift() {
        let w = [0.5, 0.5 - 5e-10];
        assert_eq!(validate_weights(&w, ValidationPhase::Configured), Ok(()));
    }

    #[test]
    fn initializing_defers_the_sum_check() {
        // All-zero placeholder weights pass while initializing but are
        // rejected once configured.
        assert_eq!(
            validate_weights(&[0.0, 0.0], ValidationPhase::Initializing),
            Ok(())
        );
        assert!(validate_weights(&[0.0, 0.0], ValidationPhase::Configured).is_err());
    }

    #[test]
    fn shape_check() {
        assert_eq!(validate_shape(3, 3), Ok(()));
        assert_eq!(
            validate_shape(3, 2),
            Err(ConfigError::ShapeMismatch { expected: 3, got: 2 })
        );
    }
}
