/*! Provides macros for building formulas from connectives and formulas in scope.

Identifiers name local values: a [`Connective`] applied to a parenthesized list of terms builds
a compound formula, while a bare identifier stands for a formula or for the nullary application
of a connective. Because arities are checked, both macros evaluate to a `Result`.

**Example**:
```rust
use sequitur_syntax::{formula, syntax::{Connective, Formula}};

let implies = Connective::infix("implies", "⊃");
let p = Connective::nullary("P");
let q = Formula::atom("Q");

let phi = formula!(implies(p, implies(q, p))).unwrap();
assert_eq!("(P ⊃ (Q ⊃ P))", phi.to_string());
assert!(formula!(implies(p)).is_err());
```

[`Connective`]: crate::syntax::Connective
*/

/// Builds a formula; see the [module documentation](crate::syntax::macros).
#[macro_export]
macro_rules! formula {
    ($c:ident ($($t:tt)*)) => {
        $crate::formulas!($($t)*).and_then(|terms| $crate::syntax::Connective::apply(&$c, terms))
    };
    ($phi:ident) => {
        $crate::syntax::IntoFormula::to_formula(&$phi)
    };
}

/// Builds a vector of formulas, failing on the first term that cannot be built.
#[macro_export]
macro_rules! formulas {
    (@acc () -> ($($result:tt)*)) => {
        {
            let terms: Vec<Result<$crate::syntax::Formula, $crate::syntax::Error>> = vec![$($result)*];
            terms.into_iter().collect::<Result<Vec<_>, _>>()
        }
    };
    (@acc ($c:ident ($($t:tt)*) $(, $($tail:tt)*)?) -> ($($result:tt)*)) => {
        $crate::formulas!(@acc ($($($tail)*)?) -> ($($result)* $crate::formula!($c($($t)*)),))
    };
    (@acc ($phi:ident $(, $($tail:tt)*)?) -> ($($result:tt)*)) => {
        $crate::formulas!(@acc ($($($tail)*)?) -> ($($result)* $crate::formula!($phi),))
    };
    ($($tail:tt)*) => {
        $crate::formulas!(@acc ($($tail)*) -> ())
    };
}
