//! The `OneHot` function instance: configuration gate, owned RNG
//! stream, and the evaluation call surface.
//!
//! An instance pairs a [`Mode`] with (for probabilistic modes) a
//! validated weight vector and an owned [`DrawSource`]. Validation runs
//! when configuration changes — construction, [`OneHot::set_weights`],
//! [`OneHot::reconfigure`] — never inside evaluation; evaluation only
//! applies cheap shape guards and then runs the selected engine.
//!
//! Concurrency: the drawing path takes `&mut self`, so one instance has
//! single-writer draw ordering by construction. For data-parallel
//! batches, pre-assign one draw per request and call
//! [`OneHot::evaluate_with_draw`] (`&self`, pure) from as many threads
//! as you like.

use crate::draw::DrawSource;
use crate::error::ConfigError;
use crate::mode::Mode;
use crate::validate::{validate_shape, validate_weights, ValidationPhase};
use crate::{fold, vectorized};

/// Which evaluation engine an instance runs.
///
/// Both engines produce identical output for every input, mode, and
/// draw; `Fold` exists for code-generation backends and for exercising
/// the equivalence contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Engine {
    /// Whole-slice evaluation (direct execution).
    #[default]
    Vectorized,
    /// Explicit lowered scan (the compiled-backend semantics).
    Fold,
}

/// Construction-time configuration for [`OneHot`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneHotConfig {
    /// Selection mode.
    pub mode: Mode,
    /// RNG seed; `None` derives the stream from process entropy.
    pub seed: Option<u64>,
    /// Evaluation engine.
    pub engine: Engine,
}

impl Default for OneHotConfig {
    fn default() -> Self {
        Self {
            mode: Mode::MaxVal,
            seed: None,
            engine: Engine::Vectorized,
        }
    }
}

/// A configured one-hot selection function.
///
/// ```rust
/// use onehot::{Mode, OneHot};
///
/// let mut f = OneHot::with_seed(Mode::ArgMax, 0);
/// let out = f.evaluate(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0])?;
/// assert_eq!(out, vec![0.0, 0.0, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0]);
/// # Ok::<(), onehot::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OneHot {
    mode: Mode,
    engine: Engine,
    weights: Option<Vec<f64>>,
    source: DrawSource,
}

impl OneHot {
    pub fn new(cfg: OneHotConfig) -> Self {
        let source = match cfg.seed {
            Some(seed) => DrawSource::with_seed(seed),
            None => DrawSource::from_entropy(),
        };
        Self {
            mode: cfg.mode,
            engine: cfg.engine,
            weights: None,
            source,
        }
    }

    /// Shorthand for a seeded instance with the default engine.
    pub fn with_seed(mode: Mode, seed: u64) -> Self {
        Self::new(OneHotConfig {
            mode,
            seed: Some(seed),
            engine: Engine::default(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// The currently attached weight vector, if any.
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Attach a probability-weight vector, fully validated.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<(), ConfigError> {
        validate_weights(weights, ValidationPhase::Configured)?;
        self.weights = Some(weights.to_vec());
        Ok(())
    }

    /// Attach weights while the configuring host is still initializing:
    /// the sum check is deferred (range checks still apply), so all-zero
    /// placeholder weights are accepted and evaluation falls back to
    /// passthrough until real weights arrive.
    pub fn set_weights_deferred(&mut self, weights: &[f64]) -> Result<(), ConfigError> {
        validate_weights(weights, ValidationPhase::Initializing)?;
        self.weights = Some(weights.to_vec());
        Ok(())
    }

    /// Switch modes, revalidating the mode/weights pairing.
    ///
    /// Switching to a probabilistic mode re-runs full weight validation
    /// on any attached weights (a deferred all-zero placeholder is
    /// rejected here). The RNG stream is left untouched.
    pub fn reconfigure(&mut self, mode: Mode) -> Result<(), ConfigError> {
        if mode.is_probabilistic() {
            if let Some(w) = &self.weights {
                validate_weights(w, ValidationPhase::Configured)?;
            }
        }
        self.mode = mode;
        Ok(())
    }

    /// Evaluate `values`, drawing from the owned stream if the mode is
    /// probabilistic.
    ///
    /// Exactly one draw is consumed per probabilistic evaluation, and
    /// none otherwise — including the all-zero-weights passthrough,
    /// which returns `values` unchanged without touching the stream.
    pub fn evaluate(&mut self, values: &[f64]) -> Result<Vec<f64>, ConfigError> {
        self.check_shapes(values)?;
        let kind = self.mode.policy();
        let weights = self.weights.as_deref().unwrap_or(&[]);
        let out = match self.engine {
            Engine::Vectorized => vectorized::evaluate(kind, values, weights, &mut self.source),
            Engine::Fold => fold::evaluate(kind, values, weights, &mut self.source),
        };
        Ok(out)
    }

    /// Evaluate with a pre-assigned draw in `[0, 1)`, without touching
    /// the owned stream. Pure; `draw` is ignored for non-probabilistic
    /// modes and for the all-zero-weights passthrough.
    pub fn evaluate_with_draw(&self, values: &[f64], draw: f64) -> Result<Vec<f64>, ConfigError> {
        self.check_shapes(values)?;
        let kind = self.mode.policy();
        let weights = self.weights.as_deref().unwrap_or(&[]);
        let out = match self.engine {
            Engine::Vectorized => vectorized::evaluate_with_draw(kind, values, weights, draw),
            Engine::Fold => fold::evaluate_with_draw(kind, values, weights, draw),
        };
        Ok(out)
    }

    /// Shape guards shared by both call paths.
    fn check_shapes(&self, values: &[f64]) -> Result<(), ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::ShapeMismatch {
                expected: 1,
                got: 0,
            });
        }
        if !self.mode.is_probabilistic() {
            return Ok(());
        }
        let weights = self.weights.as_deref().ok_or(ConfigError::ShapeMismatch {
            expected: values.len(),
            got: 0,
        })?;
        validate_shape(values.len(), weights.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_rejected() {
        let mut f = OneHot::with_seed(Mode::ArgMax, 0);
        assert_eq!(
            f.evaluate(&[]),
            Err(ConfigError::ShapeMismatch { expected: 1, got: 0 })
        );
    }

    #[test]
    fn probabilistic_mode_requires_weights() {
        let mut f = OneHot::with_seed(Mode::Prob, 0);
        assert_eq!(
            f.evaluate(&[1.0, 2.0]),
            Err(ConfigError::ShapeMismatch { expected: 2, got: 0 })
        );

        f.set_weights(&[0.5, 0.5]).unwrap();
        assert_eq!(
            f.evaluate(&[1.0, 2.0, 3.0]),
            Err(ConfigError::ShapeMismatch { expected: 3, got: 2 })
        );
        assert!(f.evaluate(&[1.0, 2.0]).is_ok());
    }

    #[test]
    fn set_weights_validates_eagerly() {
        let mut f = OneHot::with_seed(Mode::Prob, 0);
        assert!(matches!(
            f.set_weights(&[0.5, 0.9]),
            Err(ConfigError::WeightSumInvalid { .. })
        ));
        assert!(matches!(
            f.set_weights(&[1.2, -0.2]),
            Err(ConfigError::WeightOutOfRange { index: 0, .. })
        ));
        // Failed attachment leaves no weights behind.
        assert_eq!(f.weights(), None);
    }

    #[test]
    fn reconfigure_revalidates_deferred_placeholders() {
        let mut f = OneHot::with_seed(Mode::ArgMax, 0);
        f.set_weights_deferred(&[0.0, 0.0]).unwrap();
        // Fine to keep placeholders while in a non-probabilistic mode...
        f.reconfigure(Mode::ArgMin).unwrap();
        // ...but switching to a probabilistic mode re-runs the sum check.
        assert!(matches!(
            f.reconfigure(Mode::Prob),
            Err(ConfigError::WeightSumInvalid { .. })
        ));
        f.set_weights(&[0.25, 0.75]).unwrap();
        f.reconfigure(Mode::Prob).unwrap();
    }

    #[test]
    fn zero_weight_passthrough_consumes_no_draw() {
        // Two instances with the same seed; one evaluates through the
        // all-zero fallback first. If the fallback consumed a draw, the
        // later sampled selections would diverge.
        let mut a = OneHot::with_seed(Mode::Prob, 99);
        let mut b = OneHot::with_seed(Mode::Prob, 99);
        let values = [1.0, 2.0, 3.0];

        a.set_weights_deferred(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(a.evaluate(&values).unwrap(), values.to_vec());

        a.set_weights(&[0.1, 0.2, 0.7]).unwrap();
        b.set_weights(&[0.1, 0.2, 0.7]).unwrap();
        for _ in 0..20 {
            assert_eq!(a.evaluate(&values).unwrap(), b.evaluate(&values).unwrap());
        }
    }

    #[test]
    fn fixed_seed_is_deterministic_across_runs() {
        let run = || {
            let mut f = OneHot::with_seed(Mode::ProbIndicator, 1234);
            f.set_weights(&[0.3, 0.3, 0.4]).unwrap();
            (0..50)
                .map(|_| f.evaluate(&[5.0, 6.0, 7.0]).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn non_probabilistic_modes_never_touch_the_stream() {
        let mut a = OneHot::with_seed(Mode::Prob, 5);
        a.set_weights(&[0.5, 0.5]).unwrap();
        let expected = a.evaluate(&[1.0, 2.0]).unwrap();

        let mut b = OneHot::with_seed(Mode::ArgMax, 5);
        for _ in 0..10 {
            b.evaluate(&[1.0, 2.0]).unwrap();
        }
        b.reconfigure(Mode::Prob).unwrap();
        b.set_weights(&[0.5, 0.5]).unwrap();
        assert_eq!(b.evaluate(&[1.0, 2.0]).unwrap(), expected);
    }

    #[test]
    fn engines_share_one_call_surface() {
        let mk = |engine| {
            let mut f = OneHot::new(OneHotConfig {
                mode: Mode::Prob,
                seed: Some(17),
                engine,
            });
            f.set_weights(&[0.2, 0.3, 0.5]).unwrap();
            f
        };
        let mut v = mk(Engine::Vectorized);
        let mut f = mk(Engine::Fold);
        for _ in 0..30 {
            let values = [9.0, 8.0, 7.0];
            assert_eq!(v.evaluate(&values).unwrap(), f.evaluate(&values).unwrap());
        }
    }

    #[test]
    fn evaluate_with_draw_is_pure() {
        let mut f = OneHot::with_seed(Mode::Prob, 3);
        f.set_weights(&[0.2, 0.3, 0.5]).unwrap();
        let values = [10.0, 20.0, 30.0];

        // Pre-assigned draws do not advance the owned stream.
        let x = f.evaluate_with_draw(&values, 0.25).unwrap();
        let y = f.evaluate_with_draw(&values, 0.25).unwrap();
        assert_eq!(x, vec![0.0, 20.0, 0.0]);
        assert_eq!(x, y);

        let mut untouched = OneHot::with_seed(Mode::Prob, 3);
        untouched.set_weights(&[0.2, 0.3, 0.5]).unwrap();
        assert_eq!(
            f.evaluate(&values).unwrap(),
            untouched.evaluate(&values).unwrap()
        );
    }
}
