use super::{is_structure, structural};
use crate::Error;
use sequitur_syntax::{
    syntax::{self, Enumeration, Formula, Map, Sequence, Structure},
    transform::match_with_variables,
};
use std::{convert::TryFrom, fmt};

/// Is a pure mapping from a sequence of argument formulas to a conclusion, parameterized by the
/// premises the arguments must match and the variables that may occur in premises and
/// conclusion.
#[derive(Clone)]
pub struct Transformation {
    formula: Formula,
    premises: Sequence,
    conclusion: Formula,
    variables: Enumeration,
}

impl Transformation {
    /// Creates a transformation, failing if a variable is not atomic.
    pub fn new(
        premises: Sequence,
        conclusion: Formula,
        variables: Enumeration,
    ) -> Result<Self, Error> {
        if let Some(variable) = variables.iter().find(|v| !v.is_atomic()) {
            return Err(syntax::Error::VariableNotAtomic {
                variable: variable.clone(),
            }
            .into());
        }
        let formula = structural(
            Structure::Transformation,
            vec![
                conclusion.clone(),
                variables.formula().clone(),
                premises.formula().clone(),
            ],
        )?;
        Ok(Self {
            formula,
            premises,
            conclusion,
            variables,
        })
    }

    pub fn premises(&self) -> &Sequence {
        &self.premises
    }

    pub fn conclusion(&self) -> &Formula {
        &self.conclusion
    }

    pub fn variables(&self) -> &Enumeration {
        &self.variables
    }

    /// Applies the receiver on `arguments`: matches every argument against the premise at the
    /// same position, accumulating the bindings of the variables, and substitutes the bindings
    /// into the conclusion.
    ///
    /// **Example**:
    /// ```rust
    /// use sequitur_syntax::syntax::{Connective, Enumeration, EnumerationMode, Formula, Sequence};
    /// use sequitur_theory::theory::Transformation;
    ///
    /// let implies = Connective::infix("implies", "⊃");
    /// let (p, q) = (Formula::atom("P"), Formula::atom("Q"));
    /// let (a, b) = (Formula::atom("a"), Formula::atom("b"));
    ///
    /// // modus ponens over the variables P and Q:
    /// let premises = Sequence::new(vec![implies.app2(p.clone(), q.clone()).unwrap(), p.clone()]);
    /// let variables = Enumeration::new(vec![p, q.clone()], EnumerationMode::Strict).unwrap();
    /// let modus_ponens = Transformation::new(premises, q, variables).unwrap();
    ///
    /// let conclusion = modus_ponens
    ///     .apply(&[implies.app2(a.clone(), b).unwrap(), a])
    ///     .unwrap();
    /// assert_eq!("b", conclusion.to_string());
    /// ```
    pub fn apply(&self, arguments: &[Formula]) -> Result<Formula, Error> {
        let mismatch = || Error::TransformationPremises {
            transformation: self.formula.clone(),
            arguments: Sequence::new(arguments.iter().cloned()).into_formula(),
        };
        if arguments.len() != self.premises.len() {
            return Err(mismatch());
        }

        let mut bindings = Map::empty();
        for (argument, premise) in arguments.iter().zip(self.premises.iter()) {
            bindings = match_with_variables(argument, premise, &self.variables, &bindings)?
                .ok_or_else(mismatch)?;
        }
        Ok(self.conclusion.substitute(&bindings))
    }

    /// Matches `target` against the conclusion of the receiver and returns the bindings of the
    /// variables that occur in the conclusion, or `None` if `target` cannot be concluded.
    pub fn match_conclusion(&self, target: &Formula) -> Result<Option<Map>, Error> {
        Ok(match_with_variables(
            target,
            &self.conclusion,
            &self.variables,
            &Map::empty(),
        )?)
    }

    /// Returns the variables that occur in some premise of the receiver but are not bound by
    /// `bindings`, in their declaration order.
    pub fn free_variables(&self, bindings: &Map) -> Vec<Formula> {
        self.variables
            .iter()
            .filter(|v| !bindings.contains_key(v))
            .filter(|v| self.premises.iter().any(|p| p.contains(v)))
            .cloned()
            .collect()
    }

    /// Returns the premises of the receiver after substituting `bindings`. Premises that mention
    /// unbound variables keep them.
    pub fn necessary_premises(&self, bindings: &Map) -> Sequence {
        self.premises.iter().map(|p| p.substitute(bindings)).collect()
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl PartialEq for Transformation {
    fn eq(&self, other: &Self) -> bool {
        self.formula == other.formula
    }
}

impl Eq for Transformation {}

impl TryFrom<Formula> for Transformation {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        match formula.terms() {
            [conclusion, variables, premises]
                if is_structure(&formula, Structure::Transformation) =>
            {
                Self::new(
                    Sequence::try_from(premises.clone())?,
                    conclusion.clone(),
                    Enumeration::try_from(variables.clone())?,
                )
            }
            _ => Err(syntax::Error::coercion("transformation", &formula).into()),
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.formula)
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn test_display() {
        assert_eq!("((x ⊃ y), x) ⊢ y", modus_ponens_transformation().to_string());
    }

    #[test]
    fn test_apply_modus_ponens() {
        let mp = modus_ponens_transformation();
        assert_eq!(Q(), mp.apply(&[imp(P(), Q()), P()]).unwrap());

        // the premises of `(a ⊃ b)` and `a` yield `b`:
        let conclusion = mp.apply(&[imp(a(), b()), a()]).unwrap();
        assert_eq!("b", conclusion.to_string());
    }

    #[test]
    fn test_apply_is_deterministic() {
        let mp = modus_ponens_transformation();
        let first = mp.apply(&[imp(conj(P(), Q()), R()), conj(P(), Q())]).unwrap();
        let second = mp.apply(&[imp(conj(P(), Q()), R()), conj(P(), Q())]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_mismatch() {
        let mp = modus_ponens_transformation();
        let error = mp.apply(&[imp(P(), Q()), R()]).unwrap_err();
        assert_eq!("THY-001", error.code());

        let error = mp.apply(&[imp(P(), Q())]).unwrap_err();
        assert_eq!("THY-001", error.code());
    }

    #[test]
    fn test_apply_variable_in_argument() {
        let mp = modus_ponens_transformation();
        let error = mp.apply(&[imp(x(), Q()), x()]).unwrap_err();
        assert_eq!("SYN-006", error.code());
    }

    #[test]
    fn test_non_atomic_variable() {
        let variables = enumeration(vec![neg(x())]);
        let error = Transformation::new(seq(vec![x()]), x(), variables).unwrap_err();
        assert_eq!("SYN-005", error.code());
    }

    #[test]
    fn test_match_conclusion_and_free_variables() {
        let mp = modus_ponens_transformation();
        let bindings = mp.match_conclusion(&R()).unwrap().unwrap();
        assert_eq!(Some(&R()), bindings.get(&y()));
        assert_eq!(vec![x()], mp.free_variables(&bindings));
        assert_eq!(
            "((x ⊃ R), x)",
            mp.necessary_premises(&bindings).to_string()
        );

        let ci = conjunction_introduction_transformation();
        assert!(ci.match_conclusion(&R()).unwrap().is_none());
        let bindings = ci.match_conclusion(&conj(P(), Q())).unwrap().unwrap();
        assert!(ci.free_variables(&bindings).is_empty());
        assert_eq!("(P, Q)", ci.necessary_premises(&bindings).to_string());
    }

    #[test]
    fn test_free_variables_ignore_unused() {
        let t = Transformation::new(seq(vec![x()]), x(), enumeration(vec![x(), y()])).unwrap();
        assert!(t.free_variables(&Map::empty()).contains(&x()));
        assert!(!t.free_variables(&Map::empty()).contains(&y()));
    }

    #[test]
    fn test_try_from_formula() {
        let mp = modus_ponens_transformation();
        let coerced = Transformation::try_from(mp.formula().clone()).unwrap();
        assert_eq!(mp, coerced);
        assert_eq!("SYN-004", Transformation::try_from(P()).unwrap_err().code());
    }
}
