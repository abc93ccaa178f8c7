//! The lowered fold evaluator: an explicit linear scan over primitive
//! compare/branch/store steps.
//!
//! This engine restates the vectorized semantics as the scan a compiled
//! backend would emit: an indexed loop, a running best-index cell, an
//! output buffer mutated in place, and (for the probabilistic modes) a
//! running prefix sum checked against one pre-drawn uniform. Each loop
//! iteration is one [`SingleScan::step`] or [`PrefixScan::step`]; a
//! code-generation backend lowers those steps one-to-one into
//! load/compare/branch/store instructions and consumes the resolved
//! [`Policy`](crate::Policy) fields as plain data. Producing output
//! identical to [`vectorized`](crate::vectorized) for every input,
//! mode, and draw is this module's correctness contract.
//!
//! Two structural points are deliberate:
//!
//! - The first visited index wins unconditionally, tracked with an
//!   explicit first-index flag rather than the NaN-sentinel unordered
//!   comparison some runtimes use for seeding; the flag is portable and
//!   observably identical. All later comparisons are strict and
//!   ordered, so ties keep the lowest index and NaN never takes over.
//! - All-ties modes are two linear passes (find the extremum, then mark
//!   every match). A single accumulating pass cannot retro-mark an
//!   earlier tie once a later equal extremum appears, so the two-pass
//!   shape is part of the contract, not an implementation choice.

use crate::draw::DrawSource;
use crate::mode::{Multiplicity, Policy, PolicyKind};

/// Running state of the single-winner scan: the best index so far and
/// whether any index has been visited.
#[derive(Debug, Clone, Copy)]
pub struct SingleScan {
    best_idx: usize,
    first: bool,
}

impl SingleScan {
    pub fn new() -> Self {
        Self {
            best_idx: 0,
            first: true,
        }
    }

    /// Index of the incumbent best element.
    pub fn best_idx(&self) -> usize {
        self.best_idx
    }

    /// One scan step: does the element at `i` take over as best?
    ///
    /// The incumbent's comparison key is reconstructed by re-applying
    /// the magnitude transform to `values[best_idx]`, mirroring a
    /// lowered backend that reloads from the input buffer rather than
    /// caching the transformed best.
    pub fn step(&mut self, policy: &Policy, values: &[f64], i: usize) -> bool {
        let current = policy.magnitude.apply(values[i]);
        let wins = if self.first {
            true
        } else {
            let incumbent = policy.magnitude.apply(values[self.best_idx]);
            policy.cmp.beats(current, incumbent)
        };
        self.first = false;
        if wins {
            self.best_idx = i;
        }
        wins
    }
}

impl Default for SingleScan {
    fn default() -> Self {
        Self::new()
    }
}

/// Running state of the prefix-sum sampling scan.
#[derive(Debug, Clone, Copy)]
pub struct PrefixScan {
    sum: f64,
}

impl PrefixScan {
    pub fn new() -> Self {
        Self { sum: 0.0 }
    }

    /// Accumulated weight mass scanned so far.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// One scan step: advance the prefix sum by `weight` and report
    /// whether `draw` falls in the half-open interval
    /// `[sum_old, sum_new)`. Lower bound inclusive, upper exclusive, so
    /// a draw on a boundary belongs to the interval that starts there
    /// and at most one step per scan can fire.
    pub fn step(&mut self, weight: f64, draw: f64) -> bool {
        let old = self.sum;
        self.sum = old + weight;
        old <= draw && draw < self.sum
    }
}

impl Default for PrefixScan {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate, drawing from `source` if the mode is probabilistic.
///
/// Semantics are identical to
/// [`vectorized::evaluate`](crate::vectorized::evaluate), including the
/// all-zero-weights passthrough that skips the draw and the requirement
/// that `weights` match `values` in length for sampled kinds.
pub fn evaluate(
    kind: PolicyKind,
    values: &[f64],
    weights: &[f64],
    source: &mut DrawSource,
) -> Vec<f64> {
    match kind {
        PolicyKind::Extremum(policy) => extremum(policy, values),
        PolicyKind::Sampled { indicator } => {
            if weights.iter().all(|&w| w == 0.0) {
                return values.to_vec();
            }
            sample(indicator, values, weights, source.next_draw())
        }
    }
}

/// Evaluate with a pre-assigned draw (pure).
pub fn evaluate_with_draw(kind: PolicyKind, values: &[f64], weights: &[f64], draw: f64) -> Vec<f64> {
    match kind {
        PolicyKind::Extremum(policy) => extremum(policy, values),
        PolicyKind::Sampled { indicator } => {
            if weights.iter().all(|&w| w == 0.0) {
                return values.to_vec();
            }
            sample(indicator, values, weights, draw)
        }
    }
}

fn extremum(policy: Policy, values: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    if values.is_empty() {
        return out;
    }
    match policy.multiplicity {
        Multiplicity::SingleFirst => {
            let mut scan = SingleScan::new();
            for i in 0..values.len() {
                let prev = scan.best_idx();
                if scan.step(&policy, values, i) {
                    // Clear the dethroned slot, store the new winner.
                    out[prev] = 0.0;
                    out[i] = policy.emit.quantity(policy.magnitude, values[i]);
                }
            }
        }
        Multiplicity::AllTies => {
            // Pass 1: locate the extremum.
            let mut scan = SingleScan::new();
            for i in 0..values.len() {
                scan.step(&policy, values, i);
            }
            let ext = policy.magnitude.apply(values[scan.best_idx()]);
            // Pass 2: mark every exact match.
            for i in 0..values.len() {
                if policy.magnitude.apply(values[i]) == ext {
                    out[i] = policy.emit.quantity(policy.magnitude, values[i]);
                }
            }
        }
    }
    out
}

fn sample(indicator: bool, values: &[f64], weights: &[f64], draw: f64) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    let mut scan = PrefixScan::new();
    for i in 0..values.len() {
        if scan.step(weights[i], draw) {
            out[i] = if indicator { 1.0 } else { values[i] };
        }
    }
    out
}
