//! The mode policy table: 18 closed selection modes and their resolved
//! evaluation policies.
//!
//! A [`Mode`] is parsed once (from its stable SCREAMING_SNAKE identifier)
//! and resolved once, via [`Mode::policy`], into plain data: comparison
//! direction, magnitude transform, emitted quantity, and multiplicity
//! rule. Both evaluation engines branch only on these resolved fields,
//! never on identifier strings, so they agree on direction, tie-break,
//! and emission by construction. The resolved fields are also the data
//! contract a code-generation backend consumes when it lowers the fold
//! evaluator — there is no plugin API, just this table.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Comparison direction for extremum modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CmpOp {
    /// Max family: a candidate wins with `current > incumbent`.
    Gt,
    /// Min family: a candidate wins with `current < incumbent`.
    Lt,
}

impl CmpOp {
    /// Strict ordered comparison: does `current` beat `incumbent`?
    ///
    /// Strictness is what enforces lowest-index-wins on ties, and the
    /// ordered semantics mean NaN never beats anything (see the fold
    /// evaluator's first-index rule for how a leading NaN behaves).
    #[inline]
    pub fn beats(self, current: f64, incumbent: f64) -> bool {
        match self {
            CmpOp::Gt => current > incumbent,
            CmpOp::Lt => current < incumbent,
        }
    }
}

/// Whether comparison and value emission use the signed number or its
/// absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    Signed,
    Absolute,
}

impl Magnitude {
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Magnitude::Signed => x,
            Magnitude::Absolute => x.abs(),
        }
    }
}

/// What gets written at a selected index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Emit {
    /// The (possibly magnitude-transformed) element value.
    Value,
    /// A constant `1.0` indicator.
    Indicator,
}

impl Emit {
    /// The quantity written at a selected index holding raw value `x`.
    #[inline]
    pub fn quantity(self, magnitude: Magnitude, x: f64) -> f64 {
        match self {
            Emit::Value => magnitude.apply(x),
            Emit::Indicator => 1.0,
        }
    }
}

/// How many extremal elements are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Multiplicity {
    /// Exactly one winner; ties resolve to the lowest index.
    SingleFirst,
    /// Every element attaining the extremum is kept.
    AllTies,
}

/// Resolved policy for the 16 extremum modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Policy {
    pub cmp: CmpOp,
    pub magnitude: Magnitude,
    pub emit: Emit,
    pub multiplicity: Multiplicity,
}

/// A mode resolved into one of the two evaluation families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyKind {
    /// Extremum search under a [`Policy`].
    Extremum(Policy),
    /// Probability-weighted sampling; `indicator` selects `1.0` emission
    /// over signed-value emission.
    Sampled { indicator: bool },
}

/// The closed set of selection modes.
///
/// Identifier strings (for [`FromStr`]/[`fmt::Display`]) are the stable
/// SCREAMING_SNAKE forms, e.g. `"ARG_MAX_ABS_INDICATOR"`. An unknown
/// identifier is a [`ConfigError::InvalidMode`] at parse time and never
/// reaches evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    ArgMax,
    ArgMaxAbs,
    ArgMaxIndicator,
    ArgMaxAbsIndicator,
    MaxVal,
    MaxAbsVal,
    MaxIndicator,
    MaxAbsIndicator,
    ArgMin,
    ArgMinAbs,
    ArgMinIndicator,
    ArgMinAbsIndicator,
    MinVal,
    MinAbsVal,
    MinIndicator,
    MinAbsIndicator,
    Prob,
    ProbIndicator,
}

use Mode::*;

impl Mode {
    /// Every supported mode, in registry order.
    pub const ALL: [Mode; 18] = [
        ArgMax,
        ArgMaxAbs,
        ArgMaxIndicator,
        ArgMaxAbsIndicator,
        MaxVal,
        MaxAbsVal,
        MaxIndicator,
        MaxAbsIndicator,
        ArgMin,
        ArgMinAbs,
        ArgMinIndicator,
        ArgMinAbsIndicator,
        MinVal,
        MinAbsVal,
        MinIndicator,
        MinAbsIndicator,
        Prob,
        ProbIndicator,
    ];

    /// Stable identifier for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ArgMax => "ARG_MAX",
            ArgMaxAbs => "ARG_MAX_ABS",
            ArgMaxIndicator => "ARG_MAX_INDICATOR",
            ArgMaxAbsIndicator => "ARG_MAX_ABS_INDICATOR",
            MaxVal => "MAX_VAL",
            MaxAbsVal => "MAX_ABS_VAL",
            MaxIndicator => "MAX_INDICATOR",
            MaxAbsIndicator => "MAX_ABS_INDICATOR",
            ArgMin => "ARG_MIN",
            ArgMinAbs => "ARG_MIN_ABS",
            ArgMinIndicator => "ARG_MIN_INDICATOR",
            ArgMinAbsIndicator => "ARG_MIN_ABS_INDICATOR",
            MinVal => "MIN_VAL",
            MinAbsVal => "MIN_ABS_VAL",
            MinIndicator => "MIN_INDICATOR",
            MinAbsIndicator => "MIN_ABS_INDICATOR",
            Prob => "PROB",
            ProbIndicator => "PROB_INDICATOR",
        }
    }

    /// True for the two probability-weighted modes (which require a
    /// weight vector and consume one RNG draw per evaluation).
    pub fn is_probabilistic(self) -> bool {
        matches!(self, Prob | ProbIndicator)
    }

    /// Resolve this mode into its evaluation policy.
    ///
    /// Total over the closed set; this is the single source of truth
    /// both evaluation engines consult.
    pub fn policy(self) -> PolicyKind {
        use {CmpOp::*, Emit::*, Magnitude::*, Multiplicity::*};
        let ext = |cmp, magnitude, emit, multiplicity| {
            PolicyKind::Extremum(Policy {
                cmp,
                magnitude,
                emit,
                multiplicity,
            })
        };
        match self {
            ArgMax => ext(Gt, Signed, Value, SingleFirst),
            ArgMaxAbs => ext(Gt, Absolute, Value, SingleFirst),
            ArgMaxIndicator => ext(Gt, Signed, Indicator, SingleFirst),
            ArgMaxAbsIndicator => ext(Gt, Absolute, Indicator, SingleFirst),
            MaxVal => ext(Gt, Signed, Value, AllTies),
            MaxAbsVal => ext(Gt, Absolute, Value, AllTies),
            MaxIndicator => ext(Gt, Signed, Indicator, AllTies),
            MaxAbsIndicator => ext(Gt, Absolute, Indicator, AllTies),
            ArgMin => ext(Lt, Signed, Value, SingleFirst),
            ArgMinAbs => ext(Lt, Absolute, Value, SingleFirst),
            ArgMinIndicator => ext(Lt, Signed, Indicator, SingleFirst),
            ArgMinAbsIndicator => ext(Lt, Absolute, Indicator, SingleFirst),
            MinVal => ext(Lt, Signed, Value, AllTies),
            MinAbsVal => ext(Lt, Absolute, Value, AllTies),
            MinIndicator => ext(Lt, Signed, Indicator, AllTies),
            MinAbsIndicator => ext(Lt, Absolute, Indicator, AllTies),
            Prob => PolicyKind::Sampled { indicator: false },
            ProbIndicator => PolicyKind::Sampled { indicator: true },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidMode(s.to_string()))
    }
}
