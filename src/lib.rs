/*!
This crate provides a type-state builder for regular expressions.

A pattern is assembled from a chain of calls that reads left to right: how
many times, then what, then how it connects to the next piece. The chain
renders to ordinary pattern text, which is then compiled by whatever regex
engine the caller already uses. Escaping, class syntax and grouping are
handled by the builder, so every chain that compiles as Rust code renders to
well formed pattern text.

# Example

```
# fn main() -> Result<(), sieve::BuildError> {
let regex = sieve::anchored_start()
    .exactly(3)?.digits()
    .followed_by('-')
    .then()
    .one_or_more().letters()
    .until_end()
    .finish();
assert_eq!(regex, "^[0-9]{3}-[a-zA-Z]+$");
# Ok(())
# }
```

# Roles

Every chain is in one of three roles, each a distinct type:

* [`QuantifierStep`] waits for a multiplicity: [`exactly`](QuantifierStep::exactly),
  [`at_least`](QuantifierStep::at_least), [`one_or_more`](QuantifierStep::one_or_more),
  [`zero_or_more`](QuantifierStep::zero_or_more) or [`optional`](QuantifierStep::optional).
  A type chosen directly matches exactly once.
* [`TypeStep`] waits for what to match: a predefined class such as
  [`digits`](TypeStep::digits), [`any`](TypeStep::any) character, a literal
  [`character`](TypeStep::character), or a nested [`pattern`](TypeStep::pattern).
* [`ConnectorStep`] refines the last token ([`include`](ConnectorStep::include),
  [`exclude`](ConnectorStep::exclude),
  [`without_backtracking`](ConnectorStep::without_backtracking)), moves on
  ([`then`](ConnectorStep::then), [`followed_by`](ConnectorStep::followed_by)),
  or finishes ([`until_end`](ConnectorStep::until_end), [`finish`](ConnectorStep::finish)).

# Composition

The [`pattern`] module builds alternations, capturing groups, literals and
atomic groups out of anything implementing [`Pattern`], including other
chains. These values are rendered only when their text is needed.

# Crate features

* **logging** - Emits trace and debug messages through the `log` crate.
*/

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod macros;

mod builder;
mod error;
pub mod escape;
pub mod pattern;
mod step;
pub mod syntax;

pub use crate::error::{BuildError, BuildResult};
pub use crate::pattern::{Expr, Pattern};
pub use crate::step::{Anchored, ConnectorStep, QuantifierStep, TypeStep};

use crate::builder::Builder;

/// Starts a pattern anchored at the start of the text, `^`.
///
/// Use this for validation, where the whole input has to match from its
/// first character.
pub fn anchored_start() -> QuantifierStep {
    QuantifierStep::new(Builder::anchored_start())
}

/// Starts a pattern that may match anywhere in the text.
pub fn free() -> QuantifierStep {
    QuantifierStep::new(Builder::new())
}

/// Starts a pattern with a word boundary, `\b`.
///
/// A boundary has no width and cannot be quantified, so the chain continues
/// in the connector role.
pub fn boundary() -> ConnectorStep {
    let mut builder = Builder::new();
    builder.emit_word_boundary();
    ConnectorStep::new(builder)
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
