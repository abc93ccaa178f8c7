//! `onehot`: deterministic one-hot selection transforms.
//!
//! Given a numeric vector (and, for the probabilistic modes, a parallel
//! weight vector), produce an output vector of the same length with
//! every entry zeroed except a selected subset. Selection is governed by
//! one of 18 closed [`Mode`]s covering {max, min} × {signed, absolute}
//! × {value, indicator(=1)} × {single winner with lowest-index
//! tie-break, all ties kept}, plus two probability-weighted sampling
//! modes (`PROB`, `PROB_INDICATOR`).
//!
//! **Goals:**
//! - **Deterministic by seed**: same mode + weights + seed + call
//!   sequence → identical selections, across runs and machines.
//! - **Two engines, one semantics**: the [`vectorized`] engine computes
//!   selections with whole-slice operations; the [`fold`] engine
//!   restates them as an explicit lowered scan (running best index,
//!   compare/branch/store steps, prefix-sum sampling) suitable for
//!   emission into a compiled backend. Their outputs are exactly equal
//!   for every input, mode, and draw — that equivalence is the crate's
//!   core contract and is property-tested.
//! - **Validation as a gate**: mode identifiers, weight range, and the
//!   weight-sum check are enforced when configuration changes
//!   ([`ConfigError`]), never inside an evaluation loop.
//!
//! **Mode structure** (resolved once through [`Mode::policy`] into plain
//! [`Policy`] data; evaluators never branch on identifier strings):
//! - `ARG_MAX*` / `ARG_MIN*`: single winner, lowest index on ties.
//! - `MAX_*` / `MIN_*`: every element attaining the extremum is kept.
//! - `*_ABS*`: comparison and value emission use absolute values.
//! - `*_INDICATOR*`: emit a constant `1.0` instead of the value.
//! - `PROB` / `PROB_INDICATOR`: sample one index by comparing a single
//!   uniform draw against the running prefix sum of the weights
//!   (half-open intervals, lower bound inclusive). All-zero weights
//!   skip the draw and pass `values` through unchanged.
//!
//! # Example
//!
//! ```rust
//! use onehot::{Mode, OneHot};
//!
//! let mut f = OneHot::with_seed(Mode::MaxIndicator, 0);
//! assert_eq!(f.evaluate(&[3.0, 3.0, 1.0])?, vec![1.0, 1.0, 0.0]);
//!
//! let mut p = OneHot::with_seed(Mode::Prob, 42);
//! p.set_weights(&[0.2, 0.3, 0.5])?;
//! let out = p.evaluate(&[10.0, 20.0, 30.0])?;
//! assert_eq!(out.iter().filter(|&&x| x != 0.0).count(), 1);
//! # Ok::<(), onehot::ConfigError>(())
//! ```
//!
//! **Concurrency:** an instance's RNG stream is single-writer (`&mut
//! self` on the drawing path). For data-parallel batches, pre-assign
//! one draw per request and use [`OneHot::evaluate_with_draw`], which
//! is pure and takes `&self`.
//!
//! **Non-goals:** arbitrary-rank tensors (inputs are one 1-D vector,
//! plus a parallel 1-D weight vector for the probabilistic modes); a
//! general-purpose RNG library; a generic expression-compiler framework
//! — the lowered engine describes exactly this one fold-shaped kernel,
//! and exposes its per-mode comparison/emission rules as data, not a
//! plugin API.

#![forbid(unsafe_code)]

mod error;
pub use error::ConfigError;

mod mode;
pub use mode::{CmpOp, Emit, Magnitude, Mode, Multiplicity, Policy, PolicyKind};

mod validate;
pub use validate::{validate_shape, validate_weights, ValidationPhase, WEIGHT_SUM_TOL};

mod draw;
pub use draw::DrawSource;

pub mod fold;
pub mod vectorized;

mod selector;
pub use selector::{Engine, OneHot, OneHotConfig};

mod margin;
pub use margin::{max_vs_avg, max_vs_next};
