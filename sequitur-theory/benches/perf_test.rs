use criterion::{criterion_group, criterion_main, Criterion};
use sequitur_syntax::syntax::{Connective, Enumeration, EnumerationMode, Formula, Sequence};
use sequitur_theory::{
    search::{search_recursive, search_single_level},
    theory::{Axiom, Derivation, InferenceRule, Theory, Transformation},
};

struct Vocabulary {
    implies: Connective,
    and: Connective,
    atoms: Vec<Formula>,
    x: Formula,
    y: Formula,
}

impl Vocabulary {
    fn new(size: usize) -> Self {
        Self {
            implies: Connective::infix("implies", "⊃"),
            and: Connective::infix("and", "∧"),
            atoms: (0..size).map(|i| Formula::atom(format!("p{}", i))).collect(),
            x: Formula::atom("x"),
            y: Formula::atom("y"),
        }
    }

    fn imp(&self, left: Formula, right: Formula) -> Formula {
        self.implies.app2(left, right).unwrap()
    }

    fn conj(&self, left: Formula, right: Formula) -> Formula {
        self.and.app2(left, right).unwrap()
    }

    fn rule(&self, premises: Vec<Formula>, conclusion: Formula) -> Derivation {
        let variables =
            Enumeration::new(vec![self.x.clone(), self.y.clone()], EnumerationMode::Strict)
                .unwrap();
        let transformation =
            Transformation::new(Sequence::new(premises), conclusion, variables).unwrap();
        InferenceRule::new(transformation).unwrap().into()
    }

    /// `p0` and `pi ⊃ pi+1` for every atom, with modus ponens and conjunction introduction.
    fn theory(&self) -> Theory {
        let (x, y) = (self.x.clone(), self.y.clone());
        let mut derivations: Vec<Derivation> =
            vec![Axiom::new(self.atoms[0].clone()).unwrap().into()];
        for pair in self.atoms.windows(2) {
            let statement = self.imp(pair[0].clone(), pair[1].clone());
            derivations.push(Axiom::new(statement).unwrap().into());
        }
        derivations.push(self.rule(vec![self.imp(x.clone(), y.clone()), x.clone()], y.clone()));
        derivations.push(self.rule(vec![x.clone(), y.clone()], self.conj(x, y)));
        Theory::new(derivations).unwrap()
    }
}

fn single_level_benchmark(c: &mut Criterion) {
    let vocabulary = Vocabulary::new(8);
    let theory = vocabulary.theory();
    let target = vocabulary.atoms[1].clone();
    c.bench_function("single_level", |b| {
        b.iter(|| search_single_level(&theory, &target).unwrap())
    });
}

fn recursive_benchmark(c: &mut Criterion) {
    let vocabulary = Vocabulary::new(4);
    let theory = vocabulary.theory();
    let target = vocabulary.conj(vocabulary.atoms[1].clone(), vocabulary.atoms[0].clone());
    c.bench_function("recursive", |b| {
        b.iter(|| search_recursive(&theory, &target, 3).unwrap())
    });
}

criterion_group!(benches, single_level_benchmark, recursive_benchmark);
criterion_main!(benches);
