/*! Provides the syntax of user-defined formal systems: connectives, immutable formula trees,
sequences, enumerations and maps, together with the structural equivalence and substitution
engines that the proof kernel is built on. */
#[macro_use]
extern crate tracing;

pub mod syntax;
#[cfg(test)]
pub mod test_macros;
#[cfg(test)]
mod test_prelude;
pub mod transform;
