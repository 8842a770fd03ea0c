/*! Defines the structural specializations of [`Formula`]: plain ordered [`Sequence`]s,
duplicate-free [`Enumeration`]s and finite [`Map`]s.

[`Formula`]: crate::syntax::Formula
[`Sequence`]: crate::syntax::Sequence
[`Enumeration`]: crate::syntax::Enumeration
[`Map`]: crate::syntax::Map
*/
use super::{Connective, Error, Formula, Structure};
use std::{convert::TryFrom, fmt, iter::FromIterator, ops::Deref};

fn structural(structure: Structure, terms: Vec<Formula>) -> Formula {
    Formula::assemble(Connective::structural(structure), terms)
}

fn is_structure(formula: &Formula, structure: Structure) -> bool {
    formula.connective().structure() == Some(structure)
}

/// Keeps the first occurrence of every element, under formula-equivalence.
fn first_occurrences<I: IntoIterator<Item = Formula>>(elements: I) -> Vec<Formula> {
    let mut result: Vec<Formula> = Vec::new();
    for element in elements {
        if !result.contains(&element) {
            result.push(element);
        }
    }
    result
}

/// Is an ordered list of formulas in which duplicates are permitted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sequence(Formula);

impl Sequence {
    pub fn new<I: IntoIterator<Item = Formula>>(elements: I) -> Self {
        Self(structural(
            Structure::Sequence,
            elements.into_iter().collect(),
        ))
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn elements(&self) -> &[Formula] {
        self.0.terms()
    }

    /// Returns the index of the first element that is formula-equivalent to `phi`.
    pub fn position(&self, phi: &Formula) -> Option<usize> {
        self.0.position(phi)
    }

    /// Returns a new sequence with `phi` appended to the elements of the receiver.
    pub fn with_element(&self, phi: Formula) -> Self {
        Self::new(self.iter().cloned().chain(std::iter::once(phi)))
    }

    /// Returns the formula that represents the receiver.
    pub fn formula(&self) -> &Formula {
        &self.0
    }

    pub fn into_formula(self) -> Formula {
        self.0
    }
}

impl Deref for Sequence {
    type Target = [Formula];

    fn deref(&self) -> &Self::Target {
        self.0.terms()
    }
}

impl FromIterator<Formula> for Sequence {
    fn from_iter<I: IntoIterator<Item = Formula>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Enumeration> for Sequence {
    fn from(enumeration: Enumeration) -> Self {
        Self::new(enumeration.iter().cloned())
    }
}

/// Accepts sequences, and enumerations viewed as sequences.
impl TryFrom<Formula> for Sequence {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        if is_structure(&formula, Structure::Sequence) {
            Ok(Self(formula))
        } else if is_structure(&formula, Structure::Enumeration) {
            Ok(Self::new(formula.terms().iter().cloned()))
        } else {
            Err(Error::coercion("sequence", &formula))
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

/// Decides how [`Enumeration::new`] treats formula-equivalent elements.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EnumerationMode {
    /// Duplicates are an error.
    Strict,

    /// Duplicates after the first occurrence are dropped with a warning.
    StripDuplicates,
}

/// Is an ordered list of formulas, no two of which are formula-equivalent.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Enumeration(Formula);

impl Enumeration {
    /// Creates an enumeration of `elements`, preserving their order.
    pub fn new<I>(elements: I, mode: EnumerationMode) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Formula>,
    {
        let mut unique: Vec<Formula> = Vec::new();
        for (index, element) in elements.into_iter().enumerate() {
            if let Some(first) = unique.iter().position(|e| e == &element) {
                match mode {
                    EnumerationMode::Strict => {
                        return Err(Error::DuplicateElement {
                            element,
                            first,
                            second: index,
                        })
                    }
                    EnumerationMode::StripDuplicates => {
                        warn!(element = %element, index, "dropping duplicate enumeration element");
                        continue;
                    }
                }
            }
            unique.push(element);
        }
        Ok(Self::assemble(unique))
    }

    /// Builds an enumeration from elements that are known to be pairwise distinct.
    pub(crate) fn assemble(elements: Vec<Formula>) -> Self {
        Self(structural(Structure::Enumeration, elements))
    }

    pub fn empty() -> Self {
        Self::assemble(Vec::new())
    }

    pub fn elements(&self) -> &[Formula] {
        self.0.terms()
    }

    pub fn position(&self, phi: &Formula) -> Option<usize> {
        self.0.position(phi)
    }

    /// Returns a new enumeration with `phi` appended. If `phi` is already an element, the
    /// receiver is returned unchanged and a warning is logged.
    pub fn with_element(&self, phi: Formula) -> Self {
        if self.contains(&phi) {
            warn!(element = %phi, "element already in enumeration");
            self.clone()
        } else {
            Self::assemble(self.iter().cloned().chain(std::iter::once(phi)).collect())
        }
    }

    /// Returns true if every element of either side has a formula-equivalent counterpart on the
    /// other side, regardless of order.
    pub fn is_enumeration_equivalent(&self, other: &Self) -> bool {
        self.iter().all(|e| other.contains(e)) && other.iter().all(|e| self.contains(e))
    }

    /// Returns the elements of the receiver followed by the elements of `other` that are not
    /// already in the receiver.
    pub fn union(&self, other: &Self) -> Self {
        Self::assemble(first_occurrences(
            self.iter().chain(other.iter()).cloned(),
        ))
    }

    pub fn formula(&self) -> &Formula {
        &self.0
    }

    pub fn into_formula(self) -> Formula {
        self.0
    }
}

impl Deref for Enumeration {
    type Target = [Formula];

    fn deref(&self) -> &Self::Target {
        self.0.terms()
    }
}

/// Accepts enumerations, and sequences whose elements are pairwise distinct.
impl TryFrom<Formula> for Enumeration {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        if is_structure(&formula, Structure::Enumeration)
            || is_structure(&formula, Structure::Sequence)
        {
            Enumeration::new(formula.terms().iter().cloned(), EnumerationMode::Strict)
        } else {
            Err(Error::coercion("enumeration", &formula))
        }
    }
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

/// Returns the union of two enumerations: the elements of `phi` in order, followed by the
/// elements of `psi` that are not in `phi`.
pub fn union_enumeration(phi: &Enumeration, psi: &Enumeration) -> Enumeration {
    phi.union(psi)
}

/// Is a finite function from an [`Enumeration`] domain to a [`Sequence`] codomain of the same
/// length, pairing elements by position.
///
/// [`Enumeration`]: crate::syntax::Enumeration
/// [`Sequence`]: crate::syntax::Sequence
#[derive(Clone)]
pub struct Map {
    formula: Formula,
    domain: Enumeration,
    codomain: Sequence,
}

impl Map {
    /// Creates a map, failing if `domain` and `codomain` have different lengths.
    pub fn new(domain: Enumeration, codomain: Sequence) -> Result<Self, Error> {
        if domain.len() != codomain.len() {
            return Err(Error::MapCardinality {
                domain: domain.len(),
                codomain: codomain.len(),
            });
        }
        Ok(Self::assemble(domain, codomain))
    }

    fn assemble(domain: Enumeration, codomain: Sequence) -> Self {
        let formula = structural(
            Structure::Map,
            vec![domain.formula().clone(), codomain.formula().clone()],
        );
        Self {
            formula,
            domain,
            codomain,
        }
    }

    pub fn empty() -> Self {
        Self::assemble(Enumeration::empty(), Sequence::empty())
    }

    /// Creates a map from `(key, image)` pairs, failing if two keys are formula-equivalent.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (Formula, Formula)>,
    {
        let (keys, images): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(
            Enumeration::new(keys, EnumerationMode::Strict)?,
            Sequence::new(images),
        )
    }

    pub fn domain(&self) -> &Enumeration {
        &self.domain
    }

    pub fn codomain(&self) -> &Sequence {
        &self.codomain
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    pub fn contains_key(&self, key: &Formula) -> bool {
        self.domain.contains(key)
    }

    /// Returns the image of `key`, if `key` is in the domain.
    pub fn get(&self, key: &Formula) -> Option<&Formula> {
        self.domain
            .position(key)
            .and_then(|index| self.codomain.get(index))
    }

    /// Returns the image of `key`, failing if `key` is not in the domain.
    pub fn image(&self, key: &Formula) -> Result<&Formula, Error> {
        self.get(key).ok_or_else(|| Error::MissingImage {
            key: key.clone(),
            map: self.formula.clone(),
        })
    }

    /// Returns the `(key, image)` pairs of the receiver in domain order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Formula, &Formula)> {
        self.domain.iter().zip(self.codomain.iter())
    }

    /// Returns a new map that sends `key` to `image`, replacing any previous image of `key`.
    pub fn with_pair(&self, key: Formula, image: Formula) -> Self {
        let reduced = self.without(&key);
        Self::assemble(
            Enumeration::assemble(
                reduced
                    .domain
                    .iter()
                    .cloned()
                    .chain(std::iter::once(key))
                    .collect(),
            ),
            reduced.codomain.with_element(image),
        )
    }

    /// Returns a new map in which `key` is no longer in the domain.
    pub fn without(&self, key: &Formula) -> Self {
        self.filter(|k| k != key)
    }

    /// Returns a new map whose domain is restricted to the elements of `keys`.
    pub fn restrict(&self, keys: &[Formula]) -> Self {
        self.filter(|k| keys.contains(k))
    }

    fn filter(&self, keep: impl Fn(&Formula) -> bool) -> Self {
        let (keys, images): (Vec<_>, Vec<_>) = self
            .pairs()
            .filter(|&(k, _)| keep(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .unzip();
        Self::assemble(Enumeration::assemble(keys), Sequence::new(images))
    }

    /// Returns the inverse map, failing if two keys share an image.
    pub fn inverse(&self) -> Result<Self, Error> {
        let domain = Enumeration::new(self.codomain.iter().cloned(), EnumerationMode::Strict)
            .map_err(|e| match e {
                Error::DuplicateElement { element, .. } => Error::NotInvertible {
                    map: self.formula.clone(),
                    image: element,
                },
                e => e,
            })?;
        Ok(Self::assemble(domain, Sequence::from(self.domain.clone())))
    }

    /// Returns true if both maps have the same keys, in any order, with formula-equivalent images.
    pub fn is_map_equivalent(&self, other: &Self) -> bool {
        self.domain.is_enumeration_equivalent(&other.domain)
            && self.pairs().all(|(k, v)| other.get(k) == Some(v))
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn into_formula(self) -> Formula {
        self.formula
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.formula == other.formula
    }
}

impl Eq for Map {}

impl TryFrom<Formula> for Map {
    type Error = Error;

    fn try_from(formula: Formula) -> Result<Self, Self::Error> {
        match formula.terms() {
            [domain, codomain] if is_structure(&formula, Structure::Map) => Self::new(
                Enumeration::try_from(domain.clone())?,
                Sequence::try_from(codomain.clone())?,
            ),
            _ => Err(Error::coercion("map", &formula)),
        }
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.formula)
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}
