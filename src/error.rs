//! Configuration-time error taxonomy.
//!
//! Every error in this crate is a configuration error: it is raised
//! synchronously when a mode is parsed, weights are attached, or an
//! instance is reconfigured — never from inside a hot evaluation loop.
//! Evaluation assumes a validated policy/weights pairing and is
//! infallible apart from the shape guards on the call surface.

use thiserror::Error;

/// Errors raised at configuration or reconfiguration time.
///
/// These are programmer/config errors, not transient faults: they are
/// never retried and never produce partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The mode identifier is not in the closed 18-member set.
    #[error("invalid selection mode {0:?}")]
    InvalidMode(String),

    /// Weight/value lengths disagree, weights are missing for a
    /// probabilistic mode (`got == 0`), or `values` is empty
    /// (`expected == 1, got == 0`).
    #[error("shape mismatch: expected length {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// A weight fell outside `[0, 1]` (NaN weights land here too).
    #[error("weight at index {index} is {value}, outside [0, 1]")]
    WeightOutOfRange { index: usize, value: f64 },

    /// Weights do not sum to 1 within relative tolerance `1e-8`.
    ///
    /// Skipped while a configuration host is still initializing; see
    /// [`ValidationPhase::Initializing`](crate::ValidationPhase).
    #[error("weights sum to {sum}, expected 1 within 1e-8")]
    WeightSumInvalid { sum: f64 },
}
