/*! Implements the equivalence and substitution engines on formulas: matching a formula against a
pattern with variables, and rewriting formulas under maps of formulas or connectives. */
mod equivalence;
mod substitution;

pub use equivalence::{is_formula_equivalent_with_variables, match_with_variables};
pub use substitution::{ConnectiveRenaming, Substitution};
