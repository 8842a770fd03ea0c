/*! Derives theorems by hand and searches theories for missing derivations.

Searches escalate in three tiers:
- [`search_exact`] looks the target up among the valid statements of the theory;
- [`search_single_level`] starts from an exact match, then matches the target against the
  conclusion of every inference rule and tries the valid statements of the theory for the
  variables that the match leaves free, until every premise of the rule is valid;
- [`search_recursive`] does the same, but searches for the premises that are not valid yet,
  down to a depth limit, never searching again for a statement that an enclosing search is
  already after.

Failing to find a derivation is not an error: a search returns an [`Outcome`] that either holds
the extended theory or the theory it started from, unchanged. A theory is extended only once a
complete derivation is found.

[`search_exact`]: crate::search::search_exact
[`search_single_level`]: crate::search::search_single_level
[`search_recursive`]: crate::search::search_recursive
[`Outcome`]: crate::search::Outcome
*/
pub mod strategy;

use crate::{
    theory::{Derivation, Inference, InferenceRule, Theorem, Theory},
    trace, Error,
};
use itertools::Itertools;
use sequitur_syntax::syntax::{Formula, Map, Sequence};
use serde_derive::{Deserialize, Serialize};
use std::iter;
use tracing::Level;

/// Is the result of a search: the theory after the search and, on success, the derivations that
/// justify the searched targets.
#[derive(Clone, Debug)]
pub struct Outcome {
    theory: Theory,
    derivations: Vec<Derivation>,
    success: bool,
}

impl Outcome {
    fn found(theory: Theory, derivation: Derivation) -> Self {
        Self {
            theory,
            derivations: vec![derivation],
            success: true,
        }
    }

    fn failure(theory: Theory) -> Self {
        Self {
            theory,
            derivations: Vec::new(),
            success: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the theory after the search: extended on success, unchanged otherwise.
    pub fn theory(&self) -> &Theory {
        &self.theory
    }

    pub fn into_theory(self) -> Theory {
        self.theory
    }

    /// Returns the derivation of the last searched target, if the search succeeded.
    pub fn derivation(&self) -> Option<&Derivation> {
        self.derivations.last()
    }

    /// Returns the derivations of the searched targets, in search order.
    pub fn derivations(&self) -> &[Derivation] {
        &self.derivations
    }
}

/// Configures the search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Is the number of levels of the recursive search, counting the level of the target. A
    /// maximum depth of 1 or less searches like the single-level search.
    pub max_depth: usize,
}

impl Options {
    /// Reads options from a JSON document. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }
}

impl Default for Options {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

/// Is the state of a search that is threaded down its recursion.
#[derive(Clone, Debug)]
pub struct SearchState {
    remaining_depth: usize,
    excluded: Vec<Formula>,
    bindings: Map,
}

impl SearchState {
    pub fn new(max_depth: usize) -> Self {
        Self {
            remaining_depth: max_depth,
            excluded: Vec::new(),
            bindings: Map::empty(),
        }
    }

    pub fn remaining_depth(&self) -> usize {
        self.remaining_depth
    }

    /// Returns true if an enclosing search is already after `phi`.
    pub fn is_excluded(&self, phi: &Formula) -> bool {
        self.excluded.contains(phi)
    }

    /// Returns the bindings of the candidate that the search is working on.
    pub fn bindings(&self) -> &Map {
        &self.bindings
    }

    fn with_bindings(&self, bindings: Map) -> Self {
        Self {
            remaining_depth: self.remaining_depth,
            excluded: self.excluded.clone(),
            bindings,
        }
    }

    /// Returns the state of the searches for the premises of `target`.
    fn descend(&self, target: &Formula) -> Self {
        let mut excluded = self.excluded.clone();
        excluded.push(target.clone());
        Self {
            remaining_depth: self.remaining_depth.saturating_sub(1),
            excluded,
            bindings: Map::empty(),
        }
    }
}

/// Is the trait of procedures that search a theory for a derivation of a target formula.
pub trait Strategy {
    /// Searches `theory` for a derivation of `target`.
    fn search(&self, theory: &Theory, target: &Formula) -> Result<Outcome, Error>;
}

/// Any function with the signature of [`Strategy::search`] is a strategy.
///
/// [`Strategy::search`]: crate::search::Strategy::search
impl<F> Strategy for F
where
    F: Fn(&Theory, &Formula) -> Result<Outcome, Error>,
{
    fn search(&self, theory: &Theory, target: &Formula) -> Result<Outcome, Error> {
        self(theory, target)
    }
}

/// Derives `conjecture` by applying `rule` on `premises`, and returns the theory extended with
/// the new theorem, together with the theorem.
///
/// It fails if a premise is not a valid statement of `theory`, if `rule` is not in `theory` or
/// if the rule does not derive `conjecture` from `premises`.
pub fn derive(
    theory: &Theory,
    conjecture: Formula,
    premises: Sequence,
    rule: &InferenceRule,
) -> Result<(Theory, Theorem), Error> {
    if let Some(premise) = premises.iter().find(|p| !theory.is_valid_statement(p)) {
        return Err(Error::PremiseNotValid {
            premise: premise.clone(),
        });
    }
    let theorem = Theorem::new(conjecture, Inference::new(rule.clone(), premises)?)?;
    let theory = theory.extend(iter::once(theorem.clone().into()))?;
    info!(event = trace::DERIVED, theorem = %theorem);
    Ok((theory, theorem))
}

/// Succeeds if `target` is already a valid statement of `theory`, with the axiom or theorem that
/// states it. The theory is never extended.
pub fn search_exact(theory: &Theory, target: &Formula) -> Outcome {
    let span = span!(Level::TRACE, trace::SEARCH_STEP, target = %target, depth = 0u64);
    let _enter = span.enter();
    exact(theory, target).unwrap_or_else(|| {
        info!(event = trace::FAIL);
        Outcome::failure(theory.clone())
    })
}

/// Searches for a derivation of `target` by a single inference rule of `theory` whose premises
/// are all valid already. Rules are tried in theory order and the first derivation found is
/// kept. A target that is already valid is returned with its justification.
pub fn search_single_level(theory: &Theory, target: &Formula) -> Result<Outcome, Error> {
    let span = span!(Level::TRACE, trace::SEARCH_STEP, target = %target, depth = 1u64);
    let _enter = span.enter();
    if let Some(outcome) = exact(theory, target) {
        return Ok(outcome);
    }
    let state = SearchState::new(1);
    for rule in theory.inference_rules() {
        if let Some(outcome) = apply_rule(theory, target, rule, &state, false)? {
            return Ok(outcome);
        }
    }
    info!(event = trace::FAIL);
    Ok(Outcome::failure(theory.clone()))
}

/// Like [`search_single_level`], but only with `rule`. It fails softly if `rule` is not in
/// `theory`.
///
/// [`search_single_level`]: crate::search::search_single_level
pub fn derive_with_rule(
    theory: &Theory,
    target: &Formula,
    rule: &InferenceRule,
) -> Result<Outcome, Error> {
    let span = span!(Level::TRACE, trace::SEARCH_STEP, target = %target, depth = 1u64);
    let _enter = span.enter();
    if theory.contains(&rule.clone().into()) {
        if let Some(outcome) = exact(theory, target) {
            return Ok(outcome);
        }
        if let Some(outcome) = apply_rule(theory, target, rule, &SearchState::new(1), false)? {
            return Ok(outcome);
        }
    }
    info!(event = trace::FAIL, rule = %rule);
    Ok(Outcome::failure(theory.clone()))
}

/// Searches for a derivation of `target`, searching recursively for the premises that are not
/// valid yet, `max_depth` levels deep.
///
/// **Example**:
/// ```rust
/// use sequitur_syntax::syntax::{Connective, Enumeration, EnumerationMode, Formula, Sequence};
/// use sequitur_theory::{
///     search::search_recursive,
///     theory::{Axiom, InferenceRule, Theory, Transformation},
/// };
///
/// let and = Connective::infix("and", "∧");
/// let (p, q, r) = (Formula::atom("P"), Formula::atom("Q"), Formula::atom("R"));
/// let (x, y) = (Formula::atom("x"), Formula::atom("y"));
///
/// let conjunction_introduction = InferenceRule::new(Transformation::new(
///     Sequence::new(vec![x.clone(), y.clone()]),
///     and.app2(x.clone(), y.clone()).unwrap(),
///     Enumeration::new(vec![x, y], EnumerationMode::Strict).unwrap(),
/// ).unwrap()).unwrap();
///
/// let theory = Theory::new(vec![
///     Axiom::new(p.clone()).unwrap().into(),
///     Axiom::new(q.clone()).unwrap().into(),
///     Axiom::new(r.clone()).unwrap().into(),
///     conjunction_introduction.into(),
/// ]).unwrap();
///
/// // `(P ∧ Q)` is derived on the way to `((P ∧ Q) ∧ R)`:
/// let target = and.app2(and.app2(p, q).unwrap(), r).unwrap();
/// let outcome = search_recursive(&theory, &target, 2).unwrap();
/// assert!(outcome.is_success());
/// assert_eq!(6, outcome.theory().len());
/// ```
pub fn search_recursive(
    theory: &Theory,
    target: &Formula,
    max_depth: usize,
) -> Result<Outcome, Error> {
    step(theory, target, &SearchState::new(max_depth))
}

/// Searches for the `conjectures` in order, each search starting from the theory that the
/// previous one returned. Succeeds only if every conjecture is found, otherwise `theory` is
/// returned unchanged.
pub fn search_sequence(
    theory: &Theory,
    conjectures: &[Formula],
    strategy: &impl Strategy,
) -> Result<Outcome, Error> {
    let mut working = theory.clone();
    let mut derivations = Vec::new();
    for conjecture in conjectures {
        let outcome = strategy.search(&working, conjecture)?;
        if !outcome.is_success() {
            return Ok(Outcome::failure(theory.clone()));
        }
        derivations.extend(outcome.derivations.into_iter());
        working = outcome.theory;
    }
    Ok(Outcome {
        theory: working,
        derivations,
        success: true,
    })
}

fn exact(theory: &Theory, target: &Formula) -> Option<Outcome> {
    theory.justification(target).map(|d| {
        info!(event = trace::EXACT, theorem = %d);
        Outcome::found(theory.clone(), d.clone())
    })
}

fn step(theory: &Theory, target: &Formula, state: &SearchState) -> Result<Outcome, Error> {
    let span = span!(
        Level::TRACE,
        trace::SEARCH_STEP,
        target = %target,
        depth = state.remaining_depth() as u64
    );
    let _enter = span.enter();

    if let Some(outcome) = exact(theory, target) {
        return Ok(outcome);
    }
    for &recursive in &[false, true] {
        if recursive && state.remaining_depth() <= 1 {
            info!(event = trace::DEPTH);
            break;
        }
        for rule in theory.inference_rules() {
            if let Some(outcome) = apply_rule(theory, target, rule, state, recursive)? {
                return Ok(outcome);
            }
        }
    }
    info!(event = trace::FAIL);
    Ok(Outcome::failure(theory.clone()))
}

/// Returns the `n`-permutations of `statements`, lazily.
fn permutations(statements: &[Formula], n: usize) -> Box<dyn Iterator<Item = Vec<Formula>> + '_> {
    if n == 0 {
        Box::new(iter::once(Vec::new()))
    } else {
        Box::new(statements.iter().cloned().permutations(n))
    }
}

/// Tries to derive `target` with `rule`, assigning valid statements to the free variables of
/// the rule in every order until the premises are established. Premises must be valid already
/// unless `recursive` is set, in which case they are searched for one level deeper.
fn apply_rule(
    theory: &Theory,
    target: &Formula,
    rule: &InferenceRule,
    state: &SearchState,
    recursive: bool,
) -> Result<Option<Outcome>, Error> {
    let transformation = rule.transformation();
    let bindings = match transformation.match_conclusion(target)? {
        Some(bindings) => bindings,
        None => return Ok(None),
    };
    let free = transformation.free_variables(&bindings);
    let statements: Vec<Formula> = theory.valid_statements().cloned().collect();

    for candidates in permutations(&statements, free.len()) {
        let complete = free
            .iter()
            .cloned()
            .zip(candidates)
            .fold(bindings.clone(), |map, (v, phi)| map.with_pair(v, phi));
        let candidate = state.with_bindings(complete);
        let premises = transformation.necessary_premises(candidate.bindings());
        debug!(event = trace::CANDIDATE, rule = %rule, premises = %premises);
        // conclusion variables that no premise binds stay unbound
        if transformation.apply(&premises)? != *target {
            continue;
        }

        let working = if recursive {
            establish(theory, &premises, &candidate.descend(target))?
        } else if premises.iter().all(|p| theory.is_valid_statement(p)) {
            Some(theory.clone())
        } else {
            None
        };

        if let Some(working) = working {
            let (extended, theorem) = derive(&working, target.clone(), premises, rule)?;
            return Ok(Some(Outcome::found(extended, theorem.into())));
        }
    }
    Ok(None)
}

/// Returns a theory in which every element of `premises` is valid, searching for the missing
/// ones in order, or `None` if one of them cannot be found.
fn establish(
    theory: &Theory,
    premises: &Sequence,
    state: &SearchState,
) -> Result<Option<Theory>, Error> {
    let mut working = theory.clone();
    for premise in premises.iter() {
        if working.is_valid_statement(premise) {
            continue;
        }
        if state.is_excluded(premise) {
            return Ok(None);
        }
        let outcome = step(&working, premise, state)?;
        if !outcome.is_success() {
            return Ok(None);
        }
        working = outcome.into_theory();
    }
    Ok(Some(working))
}
