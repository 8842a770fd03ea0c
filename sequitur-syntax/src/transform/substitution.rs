/*! Provides an interface and the implementation for formula substitution and connective
renaming.*/

use crate::syntax::{Connective, Error, Formula, Map};
use std::collections::HashMap;

/// Is the trait of types that map formulas to formulas.
pub trait Substitution {
    /// Returns the image of `phi`, or `None` if `phi` is left in place.
    fn apply(&self, phi: &Formula) -> Option<Formula>;
}

/// Any function from [`Formula`] to an optional [`Formula`] is a substitution.
///
/// [`Formula`]: crate::syntax::Formula
impl<F> Substitution for F
where
    F: Fn(&Formula) -> Option<Formula>,
{
    fn apply(&self, phi: &Formula) -> Option<Formula> {
        self(phi)
    }
}

/// A [`Map`] substitutes the formulas of its domain by their images.
///
/// [`Map`]: crate::syntax::Map
impl Substitution for Map {
    fn apply(&self, phi: &Formula) -> Option<Formula> {
        self.get(phi).cloned()
    }
}

impl Substitution for HashMap<Formula, Formula> {
    fn apply(&self, phi: &Formula) -> Option<Formula> {
        self.get(phi).cloned()
    }
}

/// Is the trait of types that map connectives to connectives.
pub trait ConnectiveRenaming {
    /// Maps `connective` to another [`Connective`].
    ///
    /// [`Connective`]: crate::syntax::Connective
    fn apply(&self, connective: &Connective) -> Connective;
}

impl<F> ConnectiveRenaming for F
where
    F: Fn(&Connective) -> Connective,
{
    fn apply(&self, connective: &Connective) -> Connective {
        self(connective)
    }
}

impl ConnectiveRenaming for HashMap<Connective, Connective> {
    fn apply(&self, connective: &Connective) -> Connective {
        self.get(connective)
            .cloned()
            .unwrap_or_else(|| connective.clone())
    }
}

impl Formula {
    /// Applies a [`Substitution`] on the receiver, top-down.
    ///
    /// A subformula that the substitution maps is replaced by its image, and the image is not
    /// visited again. Every other subformula is rebuilt from its substituted terms, so the
    /// replacement is simultaneous: `{P ↦ Q, Q ↦ P}` swaps `P` and `Q`.
    ///
    /// [`Substitution`]: crate::transform::Substitution
    ///
    /// **Example**:
    /// ```rust
    /// use sequitur_syntax::syntax::{Connective, Formula, Map};
    ///
    /// let implies = Connective::infix("implies", "⊃");
    /// let (p, q) = (Formula::atom("P"), Formula::atom("Q"));
    /// let phi = implies.app2(p.clone(), q.clone()).unwrap();
    ///
    /// let swap = Map::from_pairs(vec![(p.clone(), q.clone()), (q, p)]).unwrap();
    /// assert_eq!("(Q ⊃ P)", phi.substitute(&swap).to_string());
    /// ```
    pub fn substitute(&self, sub: &impl Substitution) -> Formula {
        if let Some(image) = sub.apply(self) {
            return image;
        }
        if self.is_atomic() {
            return self.clone();
        }
        let terms = self.terms().iter().map(|t| t.substitute(sub)).collect();
        Formula::assemble(self.connective().clone(), terms)
    }

    /// Applies a [`ConnectiveRenaming`] on every node of the receiver, failing if a new
    /// connective does not admit the arity of the node it lands on.
    ///
    /// [`ConnectiveRenaming`]: crate::transform::ConnectiveRenaming
    pub fn replace_connectives(&self, renaming: &impl ConnectiveRenaming) -> Result<Formula, Error> {
        let terms = self
            .terms()
            .iter()
            .map(|t| t.replace_connectives(renaming))
            .collect::<Result<Vec<_>, _>>()?;
        Formula::new(renaming.apply(self.connective()), terms)
    }
}
