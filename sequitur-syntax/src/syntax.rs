/*! Defines the abstract syntax of formal systems: identity-based connectives, immutable formula
trees and their structural specializations. */

mod builder;
mod connective;
mod formula;
pub mod macros;
mod sequence;
mod signature;
pub mod typeset;

pub use builder::FormulaBuilder;
pub use connective::{Arity, Connective, Structure};
pub use formula::{Formula, IntoFormula, Subformulas};
pub use sequence::{union_enumeration, Enumeration, EnumerationMode, Map, Sequence};
pub use signature::Signature;
pub use typeset::Typesetter;

use thiserror::Error;

/// Is the type of errors arising from constructing or coercing syntactic objects.
///
/// Every variant carries a stable code, available through [`Error::code`], that consumers may
/// rely on independently of the message text.
#[derive(Error, Clone, Debug)]
pub enum Error {
    /// Is returned when a formula is built with a number of terms that its connective rejects.
    #[error("connective `{connective}` expects {expected} terms, but {actual} were given")]
    ArityMismatch {
        connective: Connective,
        expected: Arity,
        actual: usize,
    },

    /// Is returned when a strict enumeration receives two formula-equivalent elements.
    #[error("element `{element}` at index {second} duplicates the element at index {first}")]
    DuplicateElement {
        element: Formula,
        first: usize,
        second: usize,
    },

    /// Is returned when the domain and codomain of a map have different lengths.
    #[error("map domain has {domain} elements, but its codomain has {codomain}")]
    MapCardinality { domain: usize, codomain: usize },

    /// Is returned when a formula cannot be coerced into a structural type.
    #[error("cannot coerce `{formula}` of kind `{actual}` into {target}")]
    Coercion {
        target: &'static str,
        actual: String,
        formula: Formula,
    },

    /// Is returned when a declared variable has a non-zero arity.
    #[error("variable `{variable}` is not an atomic formula")]
    VariableNotAtomic { variable: Formula },

    /// Is returned when a variable occurs in the formula that is expected to be variable-free.
    #[error("variable `{variable}` occurs in the matched formula `{formula}`")]
    VariableInTarget { variable: Formula, formula: Formula },

    /// Is returned when a supplied binding maps a formula that is not a declared variable.
    #[error("bound formula `{key}` is not a declared variable")]
    BindingNotVariable { key: Formula },

    /// Is returned when a map lookup misses its domain.
    #[error("formula `{key}` is not in the domain of map `{map}`")]
    MissingImage { key: Formula, map: Formula },

    /// Is returned when a map cannot be inverted.
    #[error("map `{map}` is not invertible: `{image}` is the image of more than one element")]
    NotInvertible { map: Formula, image: Formula },

    /// Is returned when a builder is frozen while a term is still a placeholder.
    #[error("formula builder has no connective at term path {path:?}")]
    IncompleteBuilder { path: Vec<usize> },

    /// Is returned when two distinct connectives are declared under the same label.
    #[error("label `{label}` is declared by two distinct connectives")]
    InconsistentSignature { label: String },
}

impl Error {
    /// Returns the stable machine-readable code of this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ArityMismatch { .. } => "SYN-001",
            Self::DuplicateElement { .. } => "SYN-002",
            Self::MapCardinality { .. } => "SYN-003",
            Self::Coercion { .. } => "SYN-004",
            Self::VariableNotAtomic { .. } => "SYN-005",
            Self::VariableInTarget { .. } => "SYN-006",
            Self::BindingNotVariable { .. } => "SYN-007",
            Self::MissingImage { .. } => "SYN-008",
            Self::NotInvertible { .. } => "SYN-009",
            Self::IncompleteBuilder { .. } => "SYN-010",
            Self::InconsistentSignature { .. } => "SYN-011",
        }
    }

    /// Creates a coercion error for `formula` that was expected to be a `target`.
    pub fn coercion(target: &'static str, formula: &Formula) -> Self {
        Self::Coercion {
            target,
            actual: formula.connective().label().to_string(),
            formula: formula.clone(),
        }
    }
}
