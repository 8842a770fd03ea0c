use crate::syntax::*;
use std::iter::FromIterator;

thread_local! {
    static SIGNATURE: Signature = vocabulary();
}

fn vocabulary() -> Signature {
    let connectives = vec![
        Connective::nullary("P"),
        Connective::nullary("Q"),
        Connective::nullary("R"),
        Connective::nullary("a"),
        Connective::nullary("b"),
        Connective::nullary("c"),
        Connective::nullary("x"),
        Connective::nullary("y"),
        Connective::nullary("z"),
        Connective::infix("implies", "⊃"),
        Connective::infix("and", "∧"),
        Connective::infix("or", "∨"),
        Connective::prefix("not", "¬"),
        Connective::binary("f"),
        Connective::unary("g"),
        Connective::free_arity("h"),
    ];
    connectives
        .into_iter()
        .fold(Signature::new(), |sig, c| sig.with(c).unwrap())
}

/// Returns the connective of the test vocabulary labeled `label`.
pub fn connective(label: &str) -> Connective {
    SIGNATURE.with(|sig| sig.get(label).cloned().unwrap())
}

pub fn atom(label: &str) -> Formula {
    connective(label).app0().unwrap()
}

pub fn app(c: Connective, terms: Vec<Formula>) -> Formula {
    c.apply(terms).unwrap()
}

// Propositions
#[allow(non_snake_case)]
pub fn P() -> Formula { atom("P") }

#[allow(non_snake_case)]
pub fn Q() -> Formula { atom("Q") }

#[allow(non_snake_case)]
pub fn R() -> Formula { atom("R") }

// Constants
pub fn a() -> Formula { atom("a") }

pub fn b() -> Formula { atom("b") }

pub fn c() -> Formula { atom("c") }

// Variables
pub fn x() -> Formula { atom("x") }

pub fn y() -> Formula { atom("y") }

pub fn z() -> Formula { atom("z") }

// Connectives
pub fn implies() -> Connective { connective("implies") }

pub fn and() -> Connective { connective("and") }

pub fn or() -> Connective { connective("or") }

pub fn not() -> Connective { connective("not") }

pub fn f() -> Connective { connective("f") }

pub fn g() -> Connective { connective("g") }

pub fn h() -> Connective { connective("h") }

pub fn imp(left: Formula, right: Formula) -> Formula { app(implies(), vec![left, right]) }

pub fn conj(left: Formula, right: Formula) -> Formula { app(and(), vec![left, right]) }

pub fn disj(left: Formula, right: Formula) -> Formula { app(or(), vec![left, right]) }

pub fn neg(phi: Formula) -> Formula { app(not(), vec![phi]) }

// Structures
pub fn seq(elements: Vec<Formula>) -> Sequence { Sequence::from_iter(elements) }

pub fn enumeration(elements: Vec<Formula>) -> Enumeration {
    Enumeration::new(elements, EnumerationMode::Strict).unwrap()
}

pub fn map(pairs: Vec<(Formula, Formula)>) -> Map { Map::from_pairs(pairs).unwrap() }
