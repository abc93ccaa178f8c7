//! The vectorized evaluator: whole-slice extremum and mask operations.
//!
//! This is the direct-execution engine. It computes the selection with
//! iterator folds and masks over the full slice, allocating only the
//! output buffer and never mutating its inputs. Its output must match
//! the lowered [`fold`](crate::fold) engine exactly for every input,
//! mode, and draw; both engines consult the same resolved
//! [`Policy`](crate::Policy) fields and the same strict
//! [`CmpOp::beats`](crate::CmpOp::beats) comparison, so direction,
//! tie-break, and NaN behavior agree by construction.

use crate::draw::DrawSource;
use crate::mode::{Multiplicity, Policy, PolicyKind};

/// Evaluate, drawing from `source` if the mode is probabilistic.
///
/// If `weights` are all exactly zero, the draw is skipped entirely and
/// `values` is returned unchanged (the stream does not advance).
/// `weights` is ignored for extremum kinds and must match `values` in
/// length for sampled kinds (the [`OneHot`](crate::OneHot) call surface
/// guarantees this).
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

/// Evaluate with a pre-assigned draw (pure; the caller owns draw
/// assignment, e.g. for data-parallel batches).
///
/// The all-zero-weights fallback still applies and ignores `draw`.
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
    if values.is_empty() {
        return Vec::new();
    }
    let t = |x: f64| policy.magnitude.apply(x);
    match policy.multiplicity {
        Multiplicity::SingleFirst => {
            // First occurrence of the extremum: strict `beats` keeps the
            // lowest index on ties.
            let (best, _) = values
                .iter()
                .enumerate()
                .fold((0, t(values[0])), |(bi, bv), (i, &x)| {
                    if policy.cmp.beats(t(x), bv) {
                        (i, t(x))
                    } else {
                        (bi, bv)
                    }
                });
            let mut out = vec![0.0; values.len()];
            out[best] = policy.emit.quantity(policy.magnitude, values[best]);
            out
        }
        Multiplicity::AllTies => {
            let ext = values
                .iter()
                .map(|&x| t(x))
                .fold(t(values[0]), |acc, v| if policy.cmp.beats(v, acc) { v } else { acc });
            // Exact equality: ties are genuine value-equality, not
            // approximate. A NaN extremum matches nothing.
            values
                .iter()
                .map(|&x| {
                    if t(x) == ext {
                        policy.emit.quantity(policy.magnitude, x)
                    } else {
                        0.0
                    }
                })
                .collect()
        }
    }
}

fn sample(indicator: bool, values: &[f64], weights: &[f64], draw: f64) -> Vec<f64> {
    // Cumulative weights in left-to-right order; the chosen index is the
    // first whose cumulative sum exceeds the draw. Summation order is
    // identical to the fold engine's prefix scan, so the two engines see
    // bit-identical partial sums.
    let cdf: Vec<f64> = weights
        .iter()
        .scan(0.0, |s, &w| {
            *s += w;
            Some(*s)
        })
        .collect();
    let chosen = cdf.iter().position(|&c| draw < c);
    let mut out = vec![0.0; values.len()];
    if let Some(i) = chosen {
        out[i] = if indicator { 1.0 } else { values[i] };
    }
    out
}
