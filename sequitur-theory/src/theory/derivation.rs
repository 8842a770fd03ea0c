use super::{is_structure, structural, Transformation};
use crate::Error;
use sequitur_syntax::syntax::{self, Formula, Sequence, Structure};
use std::{convert::TryFrom, fmt};

/// Is an unconditional claim of a theory.
#[derive(Clone, PartialEq, Eq)]
pub struct Axiom {
    formula: Formula,
}

impl Axiom {
    pub fn new(statement: Formula) -> Result<Self, Error> {
        Ok(Self {
            formula: structural(Structure::Axiom, vec![statement])?,
        })
    }

    /// Returns the formula that the axiom claims as valid.
    pub fn statement(&self) -> &Formula {
        &self.formula.terms()[0]
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl TryFrom<Formula> for Axiom {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        if is_structure(&formula, Structure::Axiom) {
            Ok(Self { formula })
        } else {
            Err(syntax::Error::coercion("axiom", &formula).into())
        }
    }
}

/// Is a [`Transformation`] admitted into a theory for deriving theorems.
///
/// [`Transformation`]: crate::theory::Transformation
#[derive(Clone, PartialEq, Eq)]
pub struct InferenceRule {
    formula: Formula,
    transformation: Transformation,
}

impl InferenceRule {
    pub fn new(transformation: Transformation) -> Result<Self, Error> {
        let formula = structural(
            Structure::InferenceRule,
            vec![transformation.formula().clone()],
        )?;
        Ok(Self {
            formula,
            transformation,
        })
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl TryFrom<Formula> for InferenceRule {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        match formula.terms() {
            [transformation] if is_structure(&formula, Structure::InferenceRule) => {
                Self::new(Transformation::try_from(transformation.clone())?)
            }
            _ => Err(syntax::Error::coercion("inference-rule", &formula).into()),
        }
    }
}

/// Is the justification of a theorem: an inference rule together with the actual premises it is
/// applied on.
#[derive(Clone, PartialEq, Eq)]
pub struct Inference {
    formula: Formula,
    rule: InferenceRule,
    premises: Sequence,
}

impl Inference {
    pub fn new(rule: InferenceRule, premises: Sequence) -> Result<Self, Error> {
        let formula = structural(
            Structure::Inference,
            vec![rule.formula().clone(), premises.formula().clone()],
        )?;
        Ok(Self {
            formula,
            rule,
            premises,
        })
    }

    pub fn rule(&self) -> &InferenceRule {
        &self.rule
    }

    pub fn premises(&self) -> &Sequence {
        &self.premises
    }

    /// Returns the conclusion of the rule applied on the premises.
    pub fn apply(&self) -> Result<Formula, Error> {
        self.rule.transformation().apply(&self.premises)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl TryFrom<Formula> for Inference {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        match formula.terms() {
            [rule, premises] if is_structure(&formula, Structure::Inference) => Self::new(
                InferenceRule::try_from(rule.clone())?,
                Sequence::try_from(premises.clone())?,
            ),
            _ => Err(syntax::Error::coercion("inference", &formula).into()),
        }
    }
}

/// Is a claim justified by an [`Inference`]. A theorem exists only if its inference reproduces
/// its statement.
///
/// [`Inference`]: crate::theory::Inference
#[derive(Clone, PartialEq, Eq)]
pub struct Theorem {
    formula: Formula,
    inference: Inference,
}

impl Theorem {
    /// Creates a theorem, failing if applying the rule of `inference` on its premises does not
    /// derive `statement`.
    pub fn new(statement: Formula, inference: Inference) -> Result<Self, Error> {
        let derived = inference.apply()?;
        if derived != statement {
            return Err(Error::TheoremMismatch { statement, derived });
        }
        let formula = structural(
            Structure::Theorem,
            vec![statement, inference.formula().clone()],
        )?;
        Ok(Self { formula, inference })
    }

    /// Returns the formula that the theorem claims as valid.
    pub fn statement(&self) -> &Formula {
        &self.formula.terms()[0]
    }

    pub fn inference(&self) -> &Inference {
        &self.inference
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl TryFrom<Formula> for Theorem {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        match formula.terms() {
            [statement, inference] if is_structure(&formula, Structure::Theorem) => Self::new(
                statement.clone(),
                Inference::try_from(inference.clone())?,
            ),
            _ => Err(syntax::Error::coercion("theorem", &formula).into()),
        }
    }
}

/// Is an element of a theory: an axiom, an inference rule or a theorem.
#[derive(Clone, PartialEq, Eq)]
pub enum Derivation {
    Axiom(Axiom),
    InferenceRule(InferenceRule),
    Theorem(Theorem),
}

impl Derivation {
    /// Returns the statement that the derivation makes valid. Inference rules make no statement.
    pub fn valid_statement(&self) -> Option<&Formula> {
        match self {
            Self::Axiom(a) => Some(a.statement()),
            Self::InferenceRule(_) => None,
            Self::Theorem(t) => Some(t.statement()),
        }
    }

    pub fn formula(&self) -> &Formula {
        match self {
            Self::Axiom(a) => a.formula(),
            Self::InferenceRule(r) => r.formula(),
            Self::Theorem(t) => t.formula(),
        }
    }
}

impl From<Axiom> for Derivation {
    fn from(axiom: Axiom) -> Self {
        Self::Axiom(axiom)
    }
}

impl From<InferenceRule> for Derivation {
    fn from(rule: InferenceRule) -> Self {
        Self::InferenceRule(rule)
    }
}

impl From<Theorem> for Derivation {
    fn from(theorem: Theorem) -> Self {
        Self::Theorem(theorem)
    }
}

impl TryFrom<Formula> for Derivation {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        match formula.connective().structure() {
            Some(Structure::Axiom) => Axiom::try_from(formula).map(Self::Axiom),
            Some(Structure::InferenceRule) => {
                InferenceRule::try_from(formula).map(Self::InferenceRule)
            }
            Some(Structure::Theorem) => Theorem::try_from(formula).map(Self::Theorem),
            _ => Err(syntax::Error::coercion("derivation", &formula).into()),
        }
    }
}

macro_rules! display_by_formula {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "{}", self.formula())
                }
            }

            impl fmt::Debug for $t {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "{}", self.to_string())
                }
            }
        )*
    };
}

display_by_formula!(Axiom, InferenceRule, Inference, Theorem, Derivation);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn test_axiom() {
        let axiom = Axiom::new(imp(P(), Q())).unwrap();
        assert_eq!(&imp(P(), Q()), axiom.statement());
        assert_eq!("⊢ (P ⊃ Q)", axiom.to_string());
    }

    #[test]
    fn test_theorem() {
        let inference = Inference::new(modus_ponens(), seq(vec![imp(P(), Q()), P()])).unwrap();
        let theorem = Theorem::new(Q(), inference).unwrap();
        assert_eq!(&Q(), theorem.statement());
        assert_eq!(
            "⊢ Q [((P ⊃ Q), P) via rule ((x ⊃ y), x) ⊢ y]",
            theorem.to_string()
        );
    }

    #[test]
    fn test_theorem_mismatch() {
        let inference = Inference::new(modus_ponens(), seq(vec![imp(P(), Q()), P()])).unwrap();
        let error = Theorem::new(R(), inference).unwrap_err();
        assert_eq!("THY-002", error.code());
        assert_eq!(
            "theorem claims `R`, but its inference derives `Q`",
            error.to_string()
        );
    }

    #[test]
    fn test_theorem_premises_mismatch() {
        let inference = Inference::new(modus_ponens(), seq(vec![imp(P(), Q()), R()])).unwrap();
        assert_eq!("THY-001", Theorem::new(Q(), inference).unwrap_err().code());
    }

    #[test]
    fn test_valid_statement() {
        let axiom: Derivation = Axiom::new(P()).unwrap().into();
        let rule: Derivation = modus_ponens().into();
        assert_eq!(Some(&P()), axiom.valid_statement());
        assert_eq!(None, rule.valid_statement());
    }

    #[test]
    fn test_try_from_formula() {
        let inference = Inference::new(modus_ponens(), seq(vec![imp(P(), Q()), P()])).unwrap();
        let theorem: Derivation = Theorem::new(Q(), inference).unwrap().into();
        let coerced = Derivation::try_from(theorem.formula().clone()).unwrap();
        assert_eq!(theorem, coerced);

        let rule: Derivation = modus_ponens().into();
        assert_eq!(rule, Derivation::try_from(rule.formula().clone()).unwrap());

        assert_eq!("SYN-004", Derivation::try_from(P()).unwrap_err().code());
        assert_eq!("SYN-004", Axiom::try_from(P()).unwrap_err().code());
    }

    #[test]
    fn test_try_from_rejects_invalid_theorem() {
        let inference = Inference::new(modus_ponens(), seq(vec![imp(P(), Q()), P()])).unwrap();
        let forged = structural(
            Structure::Theorem,
            vec![R(), inference.formula().clone()],
        )
        .unwrap();
        assert_eq!("THY-002", Theorem::try_from(forged).unwrap_err().code());
    }
}
