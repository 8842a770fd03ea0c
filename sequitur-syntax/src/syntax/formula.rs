/*! Defines [`Formula`], the immutable ordered tree that every object of a formal system is built
from.

[`Formula`]: crate::syntax::Formula
*/
use super::{Connective, Enumeration, Error, FormulaBuilder};
use itertools::Itertools;
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

struct Node {
    connective: Connective,
    terms: Vec<Formula>,
}

/// Is an immutable tree made of a [`Connective`] and an ordered list of child formulas, called
/// its terms. Cloning a formula is cheap and shares the tree.
///
/// `==` on formulas is *formula-equivalence*: the same connective, the same arity and pairwise
/// formula-equivalent terms. Sharing of the underlying tree is observable only through
/// [`Formula::is_symbol_equivalent`].
///
/// [`Connective`]: crate::syntax::Connective
#[derive(Clone)]
pub struct Formula(Arc<Node>);

impl Formula {
    /// Builds a formula, failing if the number of `terms` violates the arity of `connective`.
    pub fn new(connective: Connective, terms: Vec<Formula>) -> Result<Self, Error> {
        let expected = connective.arity();
        if !expected.admits(terms.len()) {
            return Err(Error::ArityMismatch {
                connective,
                expected,
                actual: terms.len(),
            });
        }
        Ok(Self::assemble(connective, terms))
    }

    /// Builds a formula whose arity is already known to satisfy its connective.
    pub(crate) fn assemble(connective: Connective, terms: Vec<Formula>) -> Self {
        Self(Arc::new(Node { connective, terms }))
    }

    /// Declares a fresh nullary connective labeled `label` and returns its atomic formula.
    pub fn atom<S: Into<String>>(label: S) -> Self {
        Self::assemble(Connective::nullary(label), Vec::new())
    }

    pub fn connective(&self) -> &Connective {
        &self.0.connective
    }

    pub fn terms(&self) -> &[Formula] {
        &self.0.terms
    }

    pub fn term(&self, index: usize) -> Option<&Formula> {
        self.0.terms.get(index)
    }

    pub fn arity(&self) -> usize {
        self.0.terms.len()
    }

    /// Returns true if the receiver has no terms. Any atomic formula may serve as a variable.
    pub fn is_atomic(&self) -> bool {
        self.0.terms.is_empty()
    }

    /// Returns true if the receiver and `other` share the same tree.
    pub fn is_symbol_equivalent(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns true if the receiver and `other` have the same connective.
    pub fn is_connective_equivalent(&self, other: &Self) -> bool {
        self.connective().is_connective_equivalent(other.connective())
    }

    /// Returns true if the receiver and `other` are structurally equal trees.
    pub fn is_formula_equivalent(&self, other: &Self) -> bool {
        self.is_symbol_equivalent(other)
            || (self.is_connective_equivalent(other)
                && self.arity() == other.arity()
                && self
                    .terms()
                    .iter()
                    .zip(other.terms())
                    .all(|(left, right)| left.is_formula_equivalent(right)))
    }

    /// Returns true if `phi` is formula-equivalent to the receiver or to one of its subformulas.
    pub fn contains(&self, phi: &Formula) -> bool {
        self.is_formula_equivalent(phi) || self.terms().iter().any(|t| t.contains(phi))
    }

    /// Returns the index of the first term of the receiver that is formula-equivalent to `phi`.
    pub fn position(&self, phi: &Formula) -> Option<usize> {
        self.terms().iter().position(|t| t.is_formula_equivalent(phi))
    }

    /// Returns the depth of the receiver's tree. An atomic formula has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.terms().iter().map(Formula::depth).max().unwrap_or(0)
    }

    /// Returns the atomic subformulas of the receiver, in order of first occurrence.
    pub fn leaves(&self) -> Enumeration {
        Enumeration::assemble(
            self.subformulas()
                .filter(|phi| phi.is_atomic())
                .unique()
                .cloned()
                .collect(),
        )
    }

    /// Returns an iterator over the receiver and all of its subformulas, in pre-order.
    pub fn subformulas(&self) -> Subformulas {
        Subformulas { stack: vec![self] }
    }

    /// Returns a mutable builder holding a copy of the receiver.
    pub fn to_builder(&self) -> FormulaBuilder {
        FormulaBuilder::from(self)
    }
}

/// Is the pre-order iterator returned by [`Formula::subformulas`].
pub struct Subformulas<'a> {
    stack: Vec<&'a Formula>,
}

impl<'a> Iterator for Subformulas<'a> {
    type Item = &'a Formula;

    fn next(&mut self) -> Option<&'a Formula> {
        let next = self.stack.pop()?;
        self.stack.extend(next.terms().iter().rev());
        Some(next)
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.is_formula_equivalent(other)
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.connective().hash(state);
        self.terms().hash(state);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        self.connective().typesetter().typeset(self, f)
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

/// Is the trait of values that stand for a formula in the [`formula!`] macro: formulas
/// themselves and connectives, which stand for their nullary application.
///
/// [`formula!`]: crate::formula
pub trait IntoFormula {
    fn to_formula(&self) -> Result<Formula, Error>;
}

impl IntoFormula for Formula {
    fn to_formula(&self) -> Result<Formula, Error> {
        Ok(self.clone())
    }
}

impl IntoFormula for Connective {
    fn to_formula(&self) -> Result<Formula, Error> {
        self.app0()
    }
}
