/*! Defines [`FormulaBuilder`], the mutable staging structure for building formulas
incrementally.

[`FormulaBuilder`]: crate::syntax::FormulaBuilder
*/
use super::{Connective, Error, Formula};

/// Is a mutable formula under construction. A builder without a connective is a placeholder,
/// and placeholders are created automatically when a term is assigned beyond the current arity.
#[derive(Clone, Default)]
pub struct FormulaBuilder {
    connective: Option<Connective>,
    terms: Vec<FormulaBuilder>,
}

impl FormulaBuilder {
    /// Creates a builder with the given connective and no terms.
    pub fn new(connective: Connective) -> Self {
        Self {
            connective: Some(connective),
            terms: Vec::new(),
        }
    }

    /// Creates an empty placeholder.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn connective(&self) -> Option<&Connective> {
        self.connective.as_ref()
    }

    pub fn set_connective(&mut self, connective: Connective) {
        self.connective = Some(connective);
    }

    pub fn terms(&self) -> &[FormulaBuilder] {
        &self.terms
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// Grows the receiver with placeholders until it has a term at `index`, and returns that term.
    pub fn assure_term(&mut self, index: usize) -> &mut FormulaBuilder {
        if self.terms.len() <= index {
            self.terms.resize_with(index + 1, FormulaBuilder::placeholder);
        }
        &mut self.terms[index]
    }

    pub fn term_mut(&mut self, index: usize) -> Option<&mut FormulaBuilder> {
        self.terms.get_mut(index)
    }

    /// Replaces the term at `index`, growing the receiver with placeholders if needed.
    pub fn set_term<T: Into<FormulaBuilder>>(&mut self, index: usize, term: T) {
        *self.assure_term(index) = term.into();
    }

    pub fn append_term<T: Into<FormulaBuilder>>(&mut self, term: T) {
        self.terms.push(term.into());
    }

    /// Removes every term that freezes into a formula equivalent to `phi`, and returns the
    /// number of removed terms. Placeholders are never removed.
    pub fn remove_all_equivalent(&mut self, phi: &Formula) -> usize {
        let before = self.terms.len();
        self.terms.retain(|term| match term.to_formula() {
            Ok(formula) => !formula.is_formula_equivalent(phi),
            Err(_) => true,
        });
        before - self.terms.len()
    }

    /// Freezes the receiver into a formula, checking the arity of every connective.
    pub fn to_formula(&self) -> Result<Formula, Error> {
        self.freeze(&mut Vec::new())
    }

    fn freeze(&self, path: &mut Vec<usize>) -> Result<Formula, Error> {
        let connective = self
            .connective
            .clone()
            .ok_or_else(|| Error::IncompleteBuilder { path: path.clone() })?;
        let mut terms = Vec::with_capacity(self.terms.len());
        for (index, term) in self.terms.iter().enumerate() {
            path.push(index);
            terms.push(term.freeze(path)?);
            path.pop();
        }
        Formula::new(connective, terms)
    }
}

impl From<&Formula> for FormulaBuilder {
    fn from(formula: &Formula) -> Self {
        Self {
            connective: Some(formula.connective().clone()),
            terms: formula.terms().iter().map(FormulaBuilder::from).collect(),
        }
    }
}

impl From<Formula> for FormulaBuilder {
    fn from(formula: Formula) -> Self {
        Self::from(&formula)
    }
}

impl From<Connective> for FormulaBuilder {
    fn from(connective: Connective) -> Self {
        Self::new(connective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn test_assure_term() {
        let mut builder = FormulaBuilder::new(h());
        builder.assure_term(3);
        assert_eq!(4, builder.arity());
        builder.assure_term(1);
        assert_eq!(4, builder.arity());
        assert!(builder.terms()[2].connective().is_none());
    }

    #[test]
    fn test_set_term_grows() {
        let mut builder = FormulaBuilder::new(h());
        builder.set_term(5, a());
        assert_eq!(6, builder.arity());
        builder.set_term(9, b());
        assert_eq!(10, builder.arity());
        builder.set_term(5, c());
        assert_eq!(10, builder.arity());
        assert_eq!(
            c(),
            builder.term_mut(5).map(|t| t.to_formula().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_to_formula() {
        let mut builder = FormulaBuilder::new(implies());
        builder.append_term(P());
        builder.append_term(connective("and"));
        builder.term_mut(1).unwrap().set_term(0, Q());
        builder.term_mut(1).unwrap().set_term(1, R());
        assert_eq!(imp(P(), conj(Q(), R())), builder.to_formula().unwrap());
    }

    #[test]
    fn test_to_formula_incomplete() {
        let mut builder = FormulaBuilder::new(implies());
        builder.set_term(0, P());
        builder.assure_term(1).set_term(1, Q());
        let error = builder.to_formula().unwrap_err();
        assert_eq!("SYN-010", error.code());
        assert_eq!(
            "formula builder has no connective at term path [1]",
            error.to_string()
        );
    }

    #[test]
    fn test_to_formula_checks_arity() {
        let mut builder = FormulaBuilder::new(implies());
        builder.append_term(P());
        assert_eq!("SYN-001", builder.to_formula().unwrap_err().code());
    }

    #[test]
    fn test_remove_all_equivalent() {
        let mut builder = imp(P(), P()).to_builder();
        builder.set_connective(h());
        builder.append_term(Q());
        builder.assure_term(4);
        assert_eq!(2, builder.remove_all_equivalent(&P()));
        assert_eq!(3, builder.arity());
        assert_eq!(0, builder.remove_all_equivalent(&R()));
        builder.remove_all_equivalent(&Q());
        assert_eq!(2, builder.arity());
    }

    #[test]
    fn test_round_trip_preserves_connectives() {
        let phi = imp(P(), neg(Q()));
        assert_eq!(phi, phi.to_builder().to_formula().unwrap());
    }
}
