use crate::theory::*;
use sequitur_syntax::syntax::*;
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
        Connective::nullary("x"),
        Connective::nullary("y"),
        Connective::infix("implies", "⊃"),
        Connective::infix("and", "∧"),
        Connective::prefix("not", "¬"),
    ];
    connectives
        .into_iter()
        .fold(Signature::new(), |sig, c| sig.with(c).unwrap())
}

pub fn connective(label: &str) -> Connective {
    SIGNATURE.with(|sig| sig.get(label).cloned().unwrap())
}

pub fn atom(label: &str) -> Formula {
    connective(label).app0().unwrap()
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

// Variables
pub fn x() -> Formula { atom("x") }

pub fn y() -> Formula { atom("y") }

pub fn imp(left: Formula, right: Formula) -> Formula {
    connective("implies").app2(left, right).unwrap()
}

pub fn conj(left: Formula, right: Formula) -> Formula {
    connective("and").app2(left, right).unwrap()
}

pub fn neg(phi: Formula) -> Formula { connective("not").app1(phi).unwrap() }

pub fn seq(elements: Vec<Formula>) -> Sequence { Sequence::from_iter(elements) }

pub fn enumeration(elements: Vec<Formula>) -> Enumeration {
    Enumeration::new(elements, EnumerationMode::Strict).unwrap()
}

// Derivations
pub fn axiom(statement: Formula) -> Derivation { Axiom::new(statement).unwrap().into() }

/// `((x ⊃ y), x) ⊢ y`
pub fn modus_ponens_transformation() -> Transformation {
    Transformation::new(
        seq(vec![imp(x(), y()), x()]),
        y(),
        enumeration(vec![x(), y()]),
    )
    .unwrap()
}

/// `(x, y) ⊢ (x ∧ y)`
pub fn conjunction_introduction_transformation() -> Transformation {
    Transformation::new(
        seq(vec![x(), y()]),
        conj(x(), y()),
        enumeration(vec![x(), y()]),
    )
    .unwrap()
}

pub fn modus_ponens() -> InferenceRule {
    InferenceRule::new(modus_ponens_transformation()).unwrap()
}

pub fn conjunction_introduction() -> InferenceRule {
    InferenceRule::new(conjunction_introduction_transformation()).unwrap()
}

// Theories
/// `P`, `(P ⊃ Q)`, modus ponens and the theorem `Q`.
pub fn modus_ponens_theory() -> Theory {
    let inference = Inference::new(modus_ponens(), seq(vec![imp(P(), Q()), P()])).unwrap();
    Theory::new(vec![
        axiom(P()),
        axiom(imp(P(), Q())),
        modus_ponens().into(),
        Theorem::new(Q(), inference).unwrap().into(),
    ])
    .unwrap()
}

/// `(P ⊃ Q)`, `P`, modus ponens and conjunction introduction.
pub fn mixed_theory() -> Theory {
    Theory::new(vec![
        axiom(imp(P(), Q())),
        axiom(P()),
        modus_ponens().into(),
        conjunction_introduction().into(),
    ])
    .unwrap()
}
