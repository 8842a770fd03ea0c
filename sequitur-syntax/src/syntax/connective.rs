/*! Defines [`Connective`], the identity tag that marks the kind of a formula-tree node, and the
[`Arity`] constraints that connectives impose on their formulas.

[`Connective`]: crate::syntax::Connective
[`Arity`]: crate::syntax::Arity
*/
use super::{
    typeset::{Classical, Infix, Prefix},
    Error, Formula, Typesetter,
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Is the constraint that a connective imposes on the number of terms of its formulas.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    /// Admits exactly `n` terms.
    pub fn fixed(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// Admits `min` terms or more.
    pub fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Admits between `min` and `max` terms, inclusive.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Admits any number of terms.
    pub fn free() -> Self {
        Self::at_least(0)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Returns true if a formula with `n` terms satisfies this constraint.
    pub fn admits(&self, n: usize) -> bool {
        n >= self.min && self.max.map_or(true, |max| n <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match (self.min, self.max) {
            (0, None) => write!(f, "any number of"),
            (min, None) => write!(f, "at least {}", min),
            (min, Some(max)) if min == max => write!(f, "exactly {}", min),
            (min, Some(max)) => write!(f, "between {} and {}", min, max),
        }
    }
}

/// Enumerates the connectives that the kernel reserves for its own structural formulas.
///
/// Two structural connectives of the same kind are always equivalent, no matter where they were
/// created.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Structure {
    Sequence,
    Enumeration,
    Map,
    Transformation,
    Axiom,
    InferenceRule,
    Inference,
    Theorem,
    Theory,
    Axiomatization,
}

impl Structure {
    /// Returns the label under which formulas of this structure are reported.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Enumeration => "enumeration",
            Self::Map => "map",
            Self::Transformation => "transformation",
            Self::Axiom => "axiom",
            Self::InferenceRule => "inference-rule",
            Self::Inference => "inference",
            Self::Theorem => "theorem",
            Self::Theory => "theory",
            Self::Axiomatization => "axiomatization",
        }
    }

    /// Returns the arity of formulas of this structure.
    pub fn arity(&self) -> Arity {
        match self {
            Self::Sequence | Self::Enumeration | Self::Theory | Self::Axiomatization => {
                Arity::free()
            }
            Self::Map | Self::Inference | Self::Theorem => Arity::fixed(2),
            Self::Transformation => Arity::fixed(3),
            Self::Axiom | Self::InferenceRule => Arity::fixed(1),
        }
    }
}

enum Identity {
    Declared,
    Structural(Structure),
}

struct Cell {
    label: String,
    arity: Arity,
    identity: Identity,
    typesetter: Arc<dyn Typesetter>,
}

/// Is an opaque identity tag for the nodes of formula trees.
///
/// A declared connective is equivalent only to itself and its clones: two connectives declared
/// separately are never equivalent, even when they share a label. The label and the attached
/// [`Typesetter`] affect display only.
///
/// [`Typesetter`]: crate::syntax::Typesetter
#[derive(Clone)]
pub struct Connective(Arc<Cell>);

impl Connective {
    /// Declares a new connective with the given label and arity, typeset in classical
    /// function-application style.
    pub fn new<S: Into<String>>(label: S, arity: Arity) -> Self {
        Self::with_typesetter(label, arity, Classical)
    }

    /// Declares a new connective that is displayed by `typesetter`.
    pub fn with_typesetter<S, T>(label: S, arity: Arity, typesetter: T) -> Self
    where
        S: Into<String>,
        T: Typesetter + 'static,
    {
        Self(Arc::new(Cell {
            label: label.into(),
            arity,
            identity: Identity::Declared,
            typesetter: Arc::new(typesetter),
        }))
    }

    pub fn nullary<S: Into<String>>(label: S) -> Self {
        Self::new(label, Arity::fixed(0))
    }

    pub fn unary<S: Into<String>>(label: S) -> Self {
        Self::new(label, Arity::fixed(1))
    }

    pub fn binary<S: Into<String>>(label: S) -> Self {
        Self::new(label, Arity::fixed(2))
    }

    pub fn ternary<S: Into<String>>(label: S) -> Self {
        Self::new(label, Arity::fixed(3))
    }

    pub fn quaternary<S: Into<String>>(label: S) -> Self {
        Self::new(label, Arity::fixed(4))
    }

    pub fn free_arity<S: Into<String>>(label: S) -> Self {
        Self::new(label, Arity::free())
    }

    /// Declares a binary connective displayed as `(a symbol b)`.
    pub fn infix<S: Into<String>>(label: S, symbol: &str) -> Self {
        Self::with_typesetter(label, Arity::fixed(2), Infix::new(symbol))
    }

    /// Declares a unary connective displayed as `symbol a`.
    pub fn prefix<S: Into<String>>(label: S, symbol: &str) -> Self {
        Self::with_typesetter(label, Arity::fixed(1), Prefix::new(symbol))
    }

    /// Returns the reserved connective of a structural formula kind.
    pub fn structural(structure: Structure) -> Self {
        Self(Arc::new(Cell {
            label: structure.label().to_string(),
            arity: structure.arity(),
            identity: Identity::Structural(structure),
            typesetter: Arc::new(structure),
        }))
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn arity(&self) -> Arity {
        self.0.arity
    }

    /// Returns the structure of a reserved connective, or `None` for a declared one.
    pub fn structure(&self) -> Option<Structure> {
        match self.0.identity {
            Identity::Declared => None,
            Identity::Structural(s) => Some(s),
        }
    }

    pub fn typesetter(&self) -> &dyn Typesetter {
        self.0.typesetter.as_ref()
    }

    /// Returns true if the receiver and `other` are the same connective.
    pub fn is_connective_equivalent(&self, other: &Self) -> bool {
        match (&self.0.identity, &other.0.identity) {
            (Identity::Declared, Identity::Declared) => Arc::ptr_eq(&self.0, &other.0),
            (Identity::Structural(this), Identity::Structural(that)) => this == that,
            _ => false,
        }
    }

    /// Applies the receiver on a list of terms, failing if their number violates its arity.
    pub fn apply(&self, terms: Vec<Formula>) -> Result<Formula, Error> {
        Formula::new(self.clone(), terms)
    }

    pub fn app0(&self) -> Result<Formula, Error> {
        self.apply(vec![])
    }

    pub fn app1(&self, first: Formula) -> Result<Formula, Error> {
        self.apply(vec![first])
    }

    pub fn app2(&self, first: Formula, second: Formula) -> Result<Formula, Error> {
        self.apply(vec![first, second])
    }

    pub fn app3(&self, first: Formula, second: Formula, third: Formula) -> Result<Formula, Error> {
        self.apply(vec![first, second, third])
    }

    pub fn app4(
        &self,
        first: Formula,
        second: Formula,
        third: Formula,
        fourth: Formula,
    ) -> Result<Formula, Error> {
        self.apply(vec![first, second, third, fourth])
    }
}

impl PartialEq for Connective {
    fn eq(&self, other: &Self) -> bool {
        self.is_connective_equivalent(other)
    }
}

impl Eq for Connective {}

impl Hash for Connective {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0.identity {
            Identity::Declared => {
                0u8.hash(state);
                (Arc::as_ptr(&self.0) as *const () as usize).hash(state);
            }
            Identity::Structural(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0.label)
    }
}

impl fmt::Debug for Connective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_arity_admits() {
        assert!(Arity::fixed(2).admits(2));
        assert!(!Arity::fixed(2).admits(1));
        assert!(!Arity::fixed(2).admits(3));
        assert!(Arity::at_least(1).admits(7));
        assert!(!Arity::at_least(1).admits(0));
        assert!(Arity::between(1, 3).admits(3));
        assert!(!Arity::between(1, 3).admits(4));
        assert!(Arity::free().admits(0));
    }

    #[test]
    fn test_arity_to_string() {
        assert_eq!("exactly 2", Arity::fixed(2).to_string());
        assert_eq!("at least 1", Arity::at_least(1).to_string());
        assert_eq!("between 1 and 3", Arity::between(1, 3).to_string());
        assert_eq!("any number of", Arity::free().to_string());
    }

    #[test]
    fn test_identity() {
        let p = Connective::nullary("P");
        let other_p = Connective::nullary("P");
        assert_eq!(p, p.clone());
        assert_ne!(p, other_p);
        assert_eq!("P", p.to_string());
        assert_eq!(p.to_string(), other_p.to_string());
    }

    #[test]
    fn test_structural_identity() {
        let first = Connective::structural(Structure::Sequence);
        let second = Connective::structural(Structure::Sequence);
        assert_eq!(first, second);
        assert_ne!(first, Connective::structural(Structure::Enumeration));
        assert_ne!(first, Connective::free_arity("sequence"));
        assert_eq!(Some(Structure::Sequence), first.structure());
        assert_eq!(None, Connective::free_arity("sequence").structure());
    }

    #[test]
    fn test_hash_follows_identity() {
        let p = Connective::nullary("P");
        let mut set = HashSet::new();
        set.insert(p.clone());
        set.insert(p.clone());
        set.insert(Connective::nullary("P"));
        set.insert(Connective::structural(Structure::Map));
        set.insert(Connective::structural(Structure::Map));
        assert_eq!(3, set.len());
    }

    #[test]
    fn test_apply_checks_arity() {
        let implies = Connective::binary("implies");
        let p = Connective::nullary("P").app0().unwrap();
        assert!(implies.app2(p.clone(), p.clone()).is_ok());

        let error = implies.app1(p).unwrap_err();
        assert_eq!("SYN-001", error.code());
        assert_eq!(
            "connective `implies` expects exactly 2 terms, but 1 were given",
            error.to_string()
        );
    }
}
