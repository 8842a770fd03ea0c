//! Implements the search tiers as [`Strategy`] values, and a strategy that escalates through a
//! list of strategies.
//!
//! [`Strategy`]: crate::search::Strategy
use super::{search_exact, search_recursive, search_single_level, Options, Outcome, Strategy};
use crate::{theory::Theory, Error};
use sequitur_syntax::syntax::Formula;

/// Finds targets that are already valid statements.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactMatch;

impl Strategy for ExactMatch {
    fn search(&self, theory: &Theory, target: &Formula) -> Result<Outcome, Error> {
        Ok(search_exact(theory, target))
    }
}

/// Derives targets by one inference rule whose premises are already valid.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleLevel;

impl Strategy for SingleLevel {
    fn search(&self, theory: &Theory, target: &Formula) -> Result<Outcome, Error> {
        search_single_level(theory, target)
    }
}

/// Derives targets by searching for their missing premises, as deep as its [`Options`] allow.
///
/// [`Options`]: crate::search::Options
#[derive(Clone, Debug, Default)]
pub struct Recursive {
    options: Options,
}

impl Recursive {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl Strategy for Recursive {
    fn search(&self, theory: &Theory, target: &Formula) -> Result<Outcome, Error> {
        search_recursive(theory, target, self.options.max_depth)
    }
}

/// Tries the strategies it wraps in order and returns the first success. The default
/// escalates from [`ExactMatch`] to [`SingleLevel`] to [`Recursive`].
///
/// [`ExactMatch`]: crate::search::strategy::ExactMatch
/// [`SingleLevel`]: crate::search::strategy::SingleLevel
/// [`Recursive`]: crate::search::strategy::Recursive
pub struct Escalating {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Escalating {
    /// Creates a strategy that escalates through no strategies, and therefore always fails.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Returns a strategy that tries `strategy` after the strategies of the receiver.
    pub fn then<S: Strategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }
}

impl Default for Escalating {
    fn default() -> Self {
        Self::new()
            .then(ExactMatch)
            .then(SingleLevel)
            .then(Recursive::default())
    }
}

impl Strategy for Escalating {
    fn search(&self, theory: &Theory, target: &Formula) -> Result<Outcome, Error> {
        for strategy in &self.strategies {
            let outcome = strategy.search(theory, target)?;
            if outcome.is_success() {
                return Ok(outcome);
            }
        }
        Ok(Outcome::failure(theory.clone()))
    }
}
