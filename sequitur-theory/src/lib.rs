/*! Validates axioms, inference rules and theorems into ordered theories over the syntax of
[`sequitur_syntax`], and searches theories for missing derivations.

A [`Theory`] is built once, validated front to back, and never mutated: extending it with new
derivations, by hand through [`derive`] or automatically through the [`search`] strategies,
returns a new theory that keeps every derivation of the old one in place.

[`Theory`]: crate::theory::Theory
[`derive`]: crate::search::derive
[`search`]: crate::search
*/
#[macro_use]
extern crate tracing;

pub mod search;
#[cfg(test)]
mod test_prelude;
pub mod theory;
pub mod trace;

use sequitur_syntax::syntax::Formula;
use thiserror::Error;

/// Is the type of errors arising from building, validating and extending theories.
///
/// Like syntax errors, every variant carries a stable code, available through [`Error::code`].
#[derive(Error, Debug)]
pub enum Error {
    /// Is returned when a transformation is applied to arguments that do not match its premises.
    #[error("arguments `{arguments}` do not match the premises of transformation `{transformation}`")]
    TransformationPremises {
        transformation: Formula,
        arguments: Formula,
    },

    /// Is returned when the statement of a theorem is not what its inference produces.
    #[error("theorem claims `{statement}`, but its inference derives `{derived}`")]
    TheoremMismatch { statement: Formula, derived: Formula },

    /// Is returned when a premise of a theorem is not a valid statement of its theory.
    #[error("premise `{premise}` of theorem `{theorem}` is not a valid statement of the theory")]
    PremiseAbsent { premise: Formula, theorem: Formula },

    /// Is returned when a premise of a theorem becomes valid only at or after the theorem.
    #[error("premise `{premise}` of theorem `{theorem}` at index {index} first appears at index {position}")]
    PremisePosterior {
        premise: Formula,
        theorem: Formula,
        index: usize,
        position: usize,
    },

    /// Is returned when the inference rule cited by a theorem is not in its theory.
    #[error("inference rule `{rule}` of theorem `{theorem}` is not in the theory")]
    RuleAbsent { rule: Formula, theorem: Formula },

    /// Is returned when the inference rule cited by a theorem appears at or after the theorem.
    #[error("inference rule `{rule}` of theorem `{theorem}` at index {index} first appears at index {position}")]
    RulePosterior {
        rule: Formula,
        theorem: Formula,
        index: usize,
        position: usize,
    },

    /// Is returned when a theorem is derived from a premise that is not valid in the theory.
    #[error("premise `{premise}` is not a valid statement of the theory")]
    PremiseNotValid { premise: Formula },

    /// Is returned when an axiomatization is given a derivation other than an axiom or an
    /// inference rule.
    #[error("axiomatizations admit only axioms and inference rules, found `{derivation}`")]
    NotAxiomatic { derivation: Formula },

    /// Is returned when search options cannot be read.
    #[error("invalid search options: {message}")]
    Config { message: String },

    /// Wraps a syntax error raised while building the objects of a theory.
    #[error(transparent)]
    Syntax(#[from] sequitur_syntax::syntax::Error),
}

impl Error {
    /// Returns the stable machine-readable code of this error. Wrapped syntax errors keep their
    /// own code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TransformationPremises { .. } => "THY-001",
            Self::TheoremMismatch { .. } => "THY-002",
            Self::PremiseAbsent { .. } => "THY-003",
            Self::PremisePosterior { .. } => "THY-004",
            Self::RuleAbsent { .. } => "THY-005",
            Self::RulePosterior { .. } => "THY-006",
            Self::PremiseNotValid { .. } => "THY-007",
            Self::NotAxiomatic { .. } => "THY-008",
            Self::Config { .. } => "THY-009",
            Self::Syntax(e) => e.code(),
        }
    }
}
