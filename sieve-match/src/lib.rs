//! Whole-value validation against `sieve` patterns
//!
//! A [`PatternRule`] is a type that knows how to produce a pattern. A
//! [`MatchValidator`] instantiates the rule, compiles its pattern once, and
//! then answers whether a value matches the pattern in full.
//!
//! Rules that cannot produce or compile their pattern fail when the validator
//! is built, with a [`ConfigurationError`]. Such an error describes a broken
//! rule rather than an invalid value, and is meant to stop setup.
//!
//! Compilation goes through a [`Matcher`], which prefers the linear time
//! engine from `regex-automata` and falls back to `fancy-regex` for atomic
//! groups and possessive quantifiers.

#[macro_use]
mod macros;

mod error;
pub mod matcher;
mod validator;

pub use error::{CompileError, ConfigurationError, RuleError};
pub use matcher::Matcher;
pub use validator::{MatchValidator, PatternRule};
