/*! Defines transformations, the derivations built on them, and the ordered, validated theories
that derivations are collected into. */
mod derivation;
mod transformation;

pub use derivation::{Axiom, Derivation, Inference, InferenceRule, Theorem};
pub use transformation::Transformation;

use crate::Error;
use sequitur_syntax::syntax::{
    self, Connective, Enumeration, EnumerationMode, Formula, Signature, Structure,
};
use std::{convert::TryFrom, fmt, ops::Deref};

fn structural(structure: Structure, terms: Vec<Formula>) -> Result<Formula, Error> {
    Ok(Connective::structural(structure).apply(terms)?)
}

fn is_structure(formula: &Formula, structure: Structure) -> bool {
    formula.connective().structure() == Some(structure)
}

/// Returns the formula of the enumeration of `derivations`, failing on duplicates.
fn enumerate(structure: Structure, derivations: &[Derivation]) -> Result<Formula, Error> {
    let elements = derivations.iter().map(|d| d.formula().clone());
    let enumeration = Enumeration::new(elements, EnumerationMode::Strict)?;
    structural(structure, enumeration.to_vec())
}

/// Checks that every theorem at index `from` or later cites premises and a rule that appear
/// strictly earlier in `derivations`.
fn validate(derivations: &[Derivation], from: usize) -> Result<(), Error> {
    for (index, derivation) in derivations.iter().enumerate().skip(from) {
        let theorem = match derivation {
            Derivation::Theorem(t) => t,
            _ => continue,
        };
        for premise in theorem.inference().premises().iter() {
            let position = derivations
                .iter()
                .position(|d| d.valid_statement() == Some(premise))
                .ok_or_else(|| Error::PremiseAbsent {
                    premise: premise.clone(),
                    theorem: theorem.formula().clone(),
                })?;
            if position >= index {
                return Err(Error::PremisePosterior {
                    premise: premise.clone(),
                    theorem: theorem.formula().clone(),
                    index,
                    position,
                });
            }
        }

        let rule = theorem.inference().rule().formula();
        let position = derivations
            .iter()
            .position(|d| d.formula() == rule)
            .ok_or_else(|| Error::RuleAbsent {
                rule: rule.clone(),
                theorem: theorem.formula().clone(),
            })?;
        if position >= index {
            return Err(Error::RulePosterior {
                rule: rule.clone(),
                theorem: theorem.formula().clone(),
                index,
                position,
            });
        }
    }
    Ok(())
}

/// Is an ordered sequence of pairwise distinct derivations in which every theorem cites
/// premises and an inference rule that appear strictly before it.
///
/// A theory is validated when it is created and never changes afterwards. Extending a theory
/// creates a new theory, leaving the original and everything it references untouched.
///
/// **Example**:
/// ```rust
/// use sequitur_syntax::syntax::{Connective, Enumeration, EnumerationMode, Formula, Sequence};
/// use sequitur_theory::theory::{Axiom, Inference, InferenceRule, Theorem, Theory, Transformation};
///
/// let implies = Connective::infix("implies", "⊃");
/// let (p, q) = (Formula::atom("P"), Formula::atom("Q"));
/// let (x, y) = (Formula::atom("x"), Formula::atom("y"));
///
/// let modus_ponens = InferenceRule::new(Transformation::new(
///     Sequence::new(vec![implies.app2(x.clone(), y.clone()).unwrap(), x.clone()]),
///     y.clone(),
///     Enumeration::new(vec![x, y], EnumerationMode::Strict).unwrap(),
/// ).unwrap()).unwrap();
///
/// let p_implies_q = implies.app2(p.clone(), q.clone()).unwrap();
/// let inference = Inference::new(
///     modus_ponens.clone(),
///     Sequence::new(vec![p_implies_q.clone(), p.clone()]),
/// ).unwrap();
///
/// let theory = Theory::new(vec![
///     Axiom::new(p).unwrap().into(),
///     Axiom::new(p_implies_q).unwrap().into(),
///     modus_ponens.into(),
///     Theorem::new(q.clone(), inference).unwrap().into(),
/// ]).unwrap();
///
/// assert!(theory.is_valid_statement(&q));
/// ```
#[derive(Clone)]
pub struct Theory {
    formula: Formula,
    derivations: Vec<Derivation>,
}

impl Theory {
    /// Creates a theory, failing on duplicate derivations or if a theorem cites a premise or
    /// a rule that does not appear before it.
    pub fn new<I: IntoIterator<Item = Derivation>>(derivations: I) -> Result<Self, Error> {
        let derivations: Vec<Derivation> = derivations.into_iter().collect();
        let formula = enumerate(Structure::Theory, &derivations)?;
        validate(&derivations, 0)?;
        Ok(Self {
            formula,
            derivations,
        })
    }

    pub fn derivations(&self) -> &[Derivation] {
        &self.derivations
    }

    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.derivations.iter().filter_map(|d| match d {
            Derivation::Axiom(a) => Some(a),
            _ => None,
        })
    }

    pub fn inference_rules(&self) -> impl Iterator<Item = &InferenceRule> {
        self.derivations.iter().filter_map(|d| match d {
            Derivation::InferenceRule(r) => Some(r),
            _ => None,
        })
    }

    pub fn theorems(&self) -> impl Iterator<Item = &Theorem> {
        self.derivations.iter().filter_map(|d| match d {
            Derivation::Theorem(t) => Some(t),
            _ => None,
        })
    }

    /// Returns the statements of the axioms and theorems of the receiver, in theory order.
    pub fn valid_statements(&self) -> impl Iterator<Item = &Formula> {
        self.derivations.iter().filter_map(Derivation::valid_statement)
    }

    /// Returns true if `phi` is formula-equivalent to the statement of an axiom or a theorem of
    /// the receiver.
    pub fn is_valid_statement(&self, phi: &Formula) -> bool {
        self.valid_statements().any(|s| s == phi)
    }

    /// Returns the first axiom or theorem whose statement is formula-equivalent to `phi`.
    pub fn justification(&self, phi: &Formula) -> Option<&Derivation> {
        self.derivations
            .iter()
            .find(|d| d.valid_statement() == Some(phi))
    }

    pub fn contains(&self, derivation: &Derivation) -> bool {
        self.derivations.contains(derivation)
    }

    /// Returns a theory with the derivations of the receiver followed by those of `derivations`
    /// that the receiver does not already contain. Only the new derivations are validated.
    pub fn extend<I>(&self, derivations: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Derivation>,
    {
        let mut result = self.derivations.clone();
        for derivation in derivations {
            if !result.contains(&derivation) {
                info!(
                    event = crate::trace::EXTEND,
                    theorem = %derivation,
                );
                result.push(derivation);
            }
        }
        let formula = enumerate(Structure::Theory, &result)?;
        validate(&result, self.derivations.len())?;
        Ok(Self {
            formula,
            derivations: result,
        })
    }

    /// Returns the catalog of the connectives used in the receiver.
    pub fn signature(&self) -> Result<Signature, Error> {
        Ok(Signature::of(&self.formula)?)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl Deref for Theory {
    type Target = [Derivation];

    fn deref(&self) -> &Self::Target {
        &self.derivations
    }
}

impl IntoIterator for Theory {
    type Item = Derivation;

    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.derivations.into_iter()
    }
}

impl From<Axiomatization> for Theory {
    fn from(axiomatization: Axiomatization) -> Self {
        axiomatization.theory
    }
}

impl TryFrom<Formula> for Theory {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        if is_structure(&formula, Structure::Theory) {
            Self::new(
                formula
                    .terms()
                    .iter()
                    .map(|t| Derivation::try_from(t.clone()))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        } else {
            Err(syntax::Error::coercion("theory", &formula).into())
        }
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ds: Vec<String> = self.derivations.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", ds.join("\n"))
    }
}

impl fmt::Debug for Theory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.formula)
    }
}

/// Returns a theory with the derivations of `theory` followed by the new ones among
/// `derivations`.
pub fn extend_theory<I>(theory: &Theory, derivations: I) -> Result<Theory, Error>
where
    I: IntoIterator<Item = Derivation>,
{
    theory.extend(derivations)
}

/// Returns a theory with the derivations of `first` followed by the derivations of `second`
/// that are not in `first`, each side keeping its order.
pub fn union_theory(first: &Theory, second: &Theory) -> Result<Theory, Error> {
    first.extend(second.derivations().iter().cloned())
}

/// Is a theory of axioms and inference rules only.
#[derive(Clone)]
pub struct Axiomatization {
    formula: Formula,
    theory: Theory,
}

impl Axiomatization {
    /// Creates an axiomatization, failing on duplicates or on a theorem.
    pub fn new<I: IntoIterator<Item = Derivation>>(derivations: I) -> Result<Self, Error> {
        let derivations: Vec<Derivation> = derivations.into_iter().collect();
        if let Some(Derivation::Theorem(t)) = derivations
            .iter()
            .find(|d| matches!(d, Derivation::Theorem(_)))
        {
            return Err(Error::NotAxiomatic {
                derivation: t.formula().clone(),
            });
        }
        let formula = enumerate(Structure::Axiomatization, &derivations)?;
        Ok(Self {
            formula,
            theory: Theory::new(derivations)?,
        })
    }

    pub fn derivations(&self) -> &[Derivation] {
        self.theory.derivations()
    }

    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.theory.axioms()
    }

    pub fn inference_rules(&self) -> impl Iterator<Item = &InferenceRule> {
        self.theory.inference_rules()
    }

    /// Returns an axiomatization with the derivations of the receiver followed by the new ones
    /// among `derivations`.
    pub fn extend<I>(&self, derivations: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Derivation>,
    {
        let mut result = self.derivations().to_vec();
        for derivation in derivations {
            if !result.contains(&derivation) {
                result.push(derivation);
            }
        }
        Self::new(result)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl Deref for Axiomatization {
    type Target = [Derivation];

    fn deref(&self) -> &Self::Target {
        self.theory.derivations()
    }
}

impl TryFrom<Formula> for Axiomatization {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        if is_structure(&formula, Structure::Axiomatization) {
            Self::new(
                formula
                    .terms()
                    .iter()
                    .map(|t| Derivation::try_from(t.clone()))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        } else {
            Err(syntax::Error::coercion("axiomatization", &formula).into())
        }
    }
}

impl fmt::Display for Axiomatization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.theory)
    }
}

impl fmt::Debug for Axiomatization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.formula)
    }
}
