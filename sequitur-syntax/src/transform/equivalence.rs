/*! Implements formula-equivalence with variables: a one-directional, one-pass match of a
variable-free formula against a pattern. */

use crate::syntax::{Error, Formula, Map};

/// Matches the variable-free formula `phi` against the pattern `psi`, in which the elements of
/// `variables` may occur anywhere, starting from the assignments in `bindings`.
///
/// Both trees are walked in lock-step. Wherever `psi` is a variable, the corresponding subtree of
/// `phi` is bound to it: the first occurrence of a variable binds it and every later occurrence
/// must be formula-equivalent to the existing binding. There is no backtracking.
///
/// Returns `Ok(Some(map))` with the complete bindings on success and `Ok(None)` on a mismatch.
/// It fails only if the inputs violate the preconditions of the match: every variable must be
/// atomic, no variable may occur in `phi`, and every key of `bindings` must be a variable.
///
/// **Example**:
/// ```rust
/// use sequitur_syntax::{syntax::{Connective, Formula, Map}, transform::match_with_variables};
///
/// let f = Connective::binary("f");
/// let (a, b, x) = (Formula::atom("a"), Formula::atom("b"), Formula::atom("x"));
///
/// let phi = f.app2(a.clone(), a.clone()).unwrap();
/// let psi = f.app2(x.clone(), x.clone()).unwrap();
/// let bindings = match_with_variables(&phi, &psi, &[x.clone()], &Map::empty()).unwrap();
/// assert_eq!(Some(&a), bindings.unwrap().get(&x));
///
/// // `x` cannot be bound to both `a` and `b`:
/// let phi = f.app2(a, b).unwrap();
/// assert!(match_with_variables(&phi, &psi, &[x], &Map::empty()).unwrap().is_none());
/// ```
pub fn match_with_variables(
    phi: &Formula,
    psi: &Formula,
    variables: &[Formula],
    bindings: &Map,
) -> Result<Option<Map>, Error> {
    for variable in variables {
        if !variable.is_atomic() {
            return Err(Error::VariableNotAtomic {
                variable: variable.clone(),
            });
        }
        if phi.contains(variable) {
            return Err(Error::VariableInTarget {
                variable: variable.clone(),
                formula: phi.clone(),
            });
        }
    }
    if let Some(key) = bindings.domain().iter().find(|k| !variables.contains(k)) {
        return Err(Error::BindingNotVariable { key: key.clone() });
    }

    let mut assignments: Vec<(Formula, Formula)> = bindings
        .pairs()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if unify(phi, psi, variables, &mut assignments) {
        Map::from_pairs(assignments).map(Some)
    } else {
        Ok(None)
    }
}

fn unify(
    phi: &Formula,
    psi: &Formula,
    variables: &[Formula],
    assignments: &mut Vec<(Formula, Formula)>,
) -> bool {
    if variables.contains(psi) {
        match assignments.iter().find(|(variable, _)| variable == psi) {
            Some((_, value)) => value == phi,
            None => {
                assignments.push((psi.clone(), phi.clone()));
                true
            }
        }
    } else {
        phi.is_connective_equivalent(psi)
            && phi.arity() == psi.arity()
            && phi
                .terms()
                .iter()
                .zip(psi.terms())
                .all(|(p, s)| unify(p, s, variables, assignments))
    }
}

/// Returns true if `phi` matches the pattern `psi` with the given `variables`, starting from no
/// bindings. See [`match_with_variables`].
///
/// [`match_with_variables`]: crate::transform::match_with_variables
pub fn is_formula_equivalent_with_variables(
    phi: &Formula,
    psi: &Formula,
    variables: &[Formula],
) -> Result<bool, Error> {
    Ok(match_with_variables(phi, psi, variables, &Map::empty())?.is_some())
}
