/*! Defines the [`Typesetter`] abstraction that turns formulas into text, and a number of
common typesetters.

Typesetting is attached to connectives and only affects how formulas are displayed: it never
takes part in equivalence.

[`Typesetter`]: crate::syntax::Typesetter
*/
use super::{Formula, Structure};
use std::fmt;

/// Is the trait of objects that write a formula whose connective they are attached to.
pub trait Typesetter: Send + Sync {
    /// Writes `formula` into `f`.
    fn typeset(&self, formula: &Formula, f: &mut fmt::Formatter) -> fmt::Result;
}

fn write_terms(f: &mut fmt::Formatter, terms: &[Formula], separator: &str) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", term)?;
    }
    Ok(())
}

/// Writes formulas in function-application style, `f(a, b)`. Connectives that are nullary by
/// declaration are written as their label alone.
#[derive(Clone, Copy, Debug)]
pub struct Classical;

impl Typesetter for Classical {
    fn typeset(&self, formula: &Formula, f: &mut fmt::Formatter) -> fmt::Result {
        let connective = formula.connective();
        if connective.arity().max() == Some(0) {
            write!(f, "{}", connective.label())
        } else {
            write!(f, "{}(", connective.label())?;
            write_terms(f, formula.terms(), ", ")?;
            write!(f, ")")
        }
    }
}

/// Writes binary formulas as `(a symbol b)`.
#[derive(Clone, Debug)]
pub struct Infix {
    symbol: String,
}

impl Infix {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
        }
    }
}

impl Typesetter for Infix {
    fn typeset(&self, formula: &Formula, f: &mut fmt::Formatter) -> fmt::Result {
        match formula.terms() {
            [left, right] => write!(f, "({} {} {})", left, self.symbol, right),
            _ => Classical.typeset(formula, f),
        }
    }
}

/// Writes unary formulas as `symbol a`.
#[derive(Clone, Debug)]
pub struct Prefix {
    symbol: String,
}

impl Prefix {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
        }
    }
}

impl Typesetter for Prefix {
    fn typeset(&self, formula: &Formula, f: &mut fmt::Formatter) -> fmt::Result {
        match formula.terms() {
            [term] => write!(f, "{}{}", self.symbol, term),
            _ => Classical.typeset(formula, f),
        }
    }
}

impl Typesetter for Structure {
    fn typeset(&self, formula: &Formula, f: &mut fmt::Formatter) -> fmt::Result {
        let terms = formula.terms();
        match (self, terms) {
            (Structure::Sequence, _) => {
                write!(f, "(")?;
                write_terms(f, terms, ", ")?;
                write!(f, ")")
            }
            (Structure::Enumeration, _) => {
                write!(f, "{{")?;
                write_terms(f, terms, ", ")?;
                write!(f, "}}")
            }
            (Structure::Map, [domain, codomain]) => {
                write!(f, "{{")?;
                for (i, (key, image)) in domain.terms().iter().zip(codomain.terms()).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} ↦ {}", key, image)?;
                }
                write!(f, "}}")
            }
            (Structure::Transformation, [conclusion, _, premises]) => {
                write!(f, "{} ⊢ {}", premises, conclusion)
            }
            (Structure::Axiom, [statement]) => write!(f, "⊢ {}", statement),
            (Structure::InferenceRule, [transformation]) => write!(f, "rule {}", transformation),
            (Structure::Inference, [rule, premises]) => write!(f, "{} via {}", premises, rule),
            (Structure::Theorem, [statement, inference]) => {
                write!(f, "⊢ {} [{}]", statement, inference)
            }
            (Structure::Theory, _) | (Structure::Axiomatization, _) => {
                write!(f, "{}{{", self.label())?;
                write_terms(f, terms, ", ")?;
                write!(f, "}}")
            }
            _ => Classical.typeset(formula, f),
        }
    }
}
