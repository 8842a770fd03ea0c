/*! Defines a [`Signature`], the explicit catalog of connectives that a formal system is built
from.

[`Signature`]: crate::syntax::Signature
*/
use super::{Connective, Error, Formula};
use std::{collections::HashMap, fmt};

/// Is an immutable catalog of connectives, indexed by label.
///
/// A signature is a plain value: it is built once, passed to whatever needs to look connectives
/// up, and extended by creating a new signature. Labels are unique within a signature, so two
/// distinct connectives that share a label cannot be cataloged together.
#[derive(Clone, Default)]
pub struct Signature {
    connectives: Vec<Connective>,
    index: HashMap<String, usize>,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signature of all connectives that occur in `formula`.
    pub fn of(formula: &Formula) -> Result<Self, Error> {
        let mut sig = Self::new();
        for phi in formula.subformulas() {
            sig.add(phi.connective().clone())?;
        }
        Ok(sig)
    }

    /// Creates a new signature by merging the items of an iterator over signatures.
    pub fn from_signatures<I>(signatures: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Signature>,
    {
        let mut sig = Self::new();
        for s in signatures {
            sig = sig.merge(s)?;
        }
        Ok(sig)
    }

    /// Returns a signature that also catalogs `connective`.
    pub fn with(mut self, connective: Connective) -> Result<Self, Error> {
        self.add(connective)?;
        Ok(self)
    }

    /// Returns a signature that combines the receiver with `other`.
    pub fn merge(mut self, other: Self) -> Result<Self, Error> {
        for c in other.connectives {
            self.add(c)?;
        }
        Ok(self)
    }

    fn add(&mut self, connective: Connective) -> Result<(), Error> {
        if let Some(&i) = self.index.get(connective.label()) {
            if self.connectives[i] != connective {
                return Err(Error::InconsistentSignature {
                    label: connective.label().to_string(),
                });
            }
        } else {
            self.index
                .insert(connective.label().to_string(), self.connectives.len());
            self.connectives.push(connective);
        }
        Ok(())
    }

    /// Returns the connective cataloged under `label`.
    pub fn get(&self, label: &str) -> Option<&Connective> {
        self.index.get(label).map(|&i| &self.connectives[i])
    }

    /// Returns the connectives of this signature, in the order they were cataloged.
    pub fn connectives(&self) -> &[Connective] {
        &self.connectives
    }

    pub fn len(&self) -> usize {
        self.connectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectives.is_empty()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.connectives.iter()).finish()
    }
}
