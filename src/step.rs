/*!
Role handles over a [`Builder`].

A chain moves through three roles. Each role is a distinct type, so a call
that makes no sense at a given point (a quantifier on a quantifier, refining
a class before choosing one, anchoring the end twice) does not compile.

```text
QuantifierStep --(quantifier)--> TypeStep --(type)--> ConnectorStep
QuantifierStep --(type, implicitly exactly once)----> ConnectorStep
ConnectorStep  --(then)--> QuantifierStep
ConnectorStep  --(until_end)--> Anchored
```

All handles own the same builder and move it along by value.
*/

use std::fmt;

use crate::builder::{Builder, Quantifier};
use crate::error::{BuildError, BuildResult};
use crate::pattern::Pattern;
use crate::syntax;

/// Generates the type selectors shared by [`QuantifierStep`] and
/// [`TypeStep`]. A quantifier step accepts them directly, meaning "exactly
/// once".
macro_rules! type_selectors {
    () => {
        /// Matches one ASCII digit, `[0-9]`.
        pub fn digits(self) -> ConnectorStep {
            self.class(syntax::RANGE_DIGITS)
        }

        /// Matches one ASCII letter of either case, `[a-zA-Z]`.
        pub fn letters(self) -> ConnectorStep {
            self.class(syntax::RANGE_LETTERS)
        }

        /// Matches one lowercase ASCII letter, `[a-z]`.
        pub fn lowercase_letters(self) -> ConnectorStep {
            self.class(syntax::RANGE_LOWERCASE)
        }

        /// Matches one uppercase ASCII letter, `[A-Z]`.
        pub fn uppercase_letters(self) -> ConnectorStep {
            self.class(syntax::RANGE_UPPERCASE)
        }

        /// Matches one ASCII letter or digit, `[a-zA-Z0-9]`.
        pub fn alphanumeric(self) -> ConnectorStep {
            self.class(syntax::RANGE_ALPHANUMERIC)
        }

        /// Matches any character except a line terminator.
        pub fn any(self) -> ConnectorStep {
            let mut builder = self.builder;
            builder.emit_any();
            ConnectorStep { builder }
        }

        /// Matches `c` literally. Special characters are escaped.
        pub fn character(self, c: char) -> ConnectorStep {
            let mut builder = self.builder;
            builder.emit_char(c);
            ConnectorStep { builder }
        }

        /// Matches a sub-pattern.
        ///
        /// If a quantifier is pending, the sub-pattern is wrapped in a
        /// non-capturing group so the quantifier repeats all of it.
        pub fn pattern<P: Pattern>(self, pattern: P) -> ConnectorStep {
            let mut builder = self.builder;
            builder.emit_pattern(&pattern.render());
            ConnectorStep { builder }
        }

        fn class(self, range: &str) -> ConnectorStep {
            let mut builder = self.builder;
            builder.add_range(range);
            ConnectorStep { builder }
        }
    };
}

/// A chain waiting for the multiplicity of its next token.
///
/// Choosing a type directly, without a quantifier, matches it exactly once.
#[derive(Debug, Clone)]
#[must_use = "a step does nothing until it is rendered"]
pub struct QuantifierStep {
    builder: Builder,
}

impl QuantifierStep {
    pub(crate) fn new(builder: Builder) -> Self {
        Self { builder }
    }

    /// Repeats the next token exactly `n` times, `{n}`.
    ///
    /// `exactly(1)` renders no suffix at all. A negative `n` is rejected.
    pub fn exactly(self, n: i32) -> BuildResult<TypeStep> {
        let n = non_negative(n)?;
        let quantifier = if n == 1 {
            Quantifier::Once
        } else {
            Quantifier::Exactly(n)
        };
        Ok(self.quantified(quantifier))
    }

    /// Repeats the next token at least `n` times, `{n,}`.
    ///
    /// A negative `n` is rejected.
    pub fn at_least(self, n: i32) -> BuildResult<TypeStep> {
        let n = non_negative(n)?;
        Ok(self.quantified(Quantifier::AtLeast(n)))
    }

    /// Repeats the next token one or more times, `+`.
    pub fn one_or_more(self) -> TypeStep {
        self.quantified(Quantifier::OneOrMore)
    }

    /// Repeats the next token zero or more times, `*`.
    pub fn zero_or_more(self) -> TypeStep {
        self.quantified(Quantifier::ZeroOrMore)
    }

    /// Makes the next token optional, `?`.
    pub fn optional(self) -> TypeStep {
        self.quantified(Quantifier::Optional)
    }

    /// Shorthand for `optional().pattern(pattern)`.
    pub fn with_optional<P: Pattern>(self, pattern: P) -> ConnectorStep {
        self.optional().pattern(pattern)
    }

    /// Shorthand for `optional().character(c)`.
    pub fn with_optional_char(self, c: char) -> ConnectorStep {
        self.optional().character(c)
    }

    type_selectors!();

    fn quantified(self, quantifier: Quantifier) -> TypeStep {
        let mut builder = self.builder;
        builder.set_quantifier(quantifier);
        TypeStep { builder }
    }
}

/// A chain with a pending quantifier, waiting for what to repeat.
#[derive(Debug, Clone)]
#[must_use = "a step does nothing until it is rendered"]
pub struct TypeStep {
    builder: Builder,
}

impl TypeStep {
    type_selectors!();
}

/// A chain whose last token has been chosen.
///
/// From here the token can be refined, the chain extended, or the pattern
/// finished. A connector step is itself a [`Pattern`] and can be nested into
/// other chains and combinators.
#[derive(Debug, Clone)]
#[must_use = "a step does nothing until it is rendered"]
pub struct ConnectorStep {
    builder: Builder,
}

impl ConnectorStep {
    pub(crate) fn new(builder: Builder) -> Self {
        Self { builder }
    }

    /// Adds characters to the class chosen by the last type selector.
    ///
    /// `digits().include(['.'])` renders `[0-9.]`. Characters are escaped
    /// for use inside a class. When the last token was not a class this does
    /// nothing.
    pub fn include<I>(mut self, chars: I) -> ConnectorStep
    where
        I: IntoIterator<Item = char>,
    {
        self.builder.include(chars);
        self
    }

    /// Removes characters from the class chosen by the last type selector.
    ///
    /// `lowercase_letters().exclude(['a', 'e'])` renders `[a-z&&[^ae]]`.
    /// When the last token was not a class, or `chars` is empty, this does
    /// nothing.
    pub fn exclude<I>(mut self, chars: I) -> ConnectorStep
    where
        I: IntoIterator<Item = char>,
    {
        self.builder.exclude(chars);
        self
    }

    /// Finishes the current token and starts the next one.
    pub fn then(mut self) -> QuantifierStep {
        self.builder.flush();
        QuantifierStep::new(self.builder)
    }

    /// Appends the literal character `c`, matched exactly once.
    pub fn followed_by(self, c: char) -> ConnectorStep {
        self.then().character(c)
    }

    /// Appends a sub-pattern, matched exactly once.
    pub fn followed_by_pattern<P: Pattern>(self, pattern: P) -> ConnectorStep {
        self.then().pattern(pattern)
    }

    /// Appends each sub-pattern in order, each matched exactly once.
    pub fn followed_by_all<I>(self, patterns: I) -> ConnectorStep
    where
        I: IntoIterator,
        I::Item: Pattern,
    {
        patterns
            .into_iter()
            .fold(self, |step, pattern| step.followed_by_pattern(pattern))
    }

    /// Appends a sub-pattern that may be absent, `(?:...)?`.
    pub fn with_optional<P: Pattern>(self, pattern: P) -> ConnectorStep {
        self.then().with_optional(pattern)
    }

    /// Appends a character that may be absent.
    pub fn with_optional_char(self, c: char) -> ConnectorStep {
        self.then().with_optional_char(c)
    }

    /// Asserts a word boundary, `\b`, at the current position.
    pub fn word_boundary(mut self) -> ConnectorStep {
        self.builder.emit_word_boundary();
        self
    }

    /// Makes the quantifier of the last token possessive.
    ///
    /// A possessive quantifier never gives back what it matched, so the
    /// engine cannot backtrack into it: `[0-9]++[0-9]` never matches. This
    /// does nothing when the last token has no quantifier suffix, and
    /// applying it again does nothing either.
    pub fn without_backtracking(mut self) -> ConnectorStep {
        self.builder.make_possessive();
        self
    }

    /// Anchors the pattern at the end of the text, `$`.
    ///
    /// Nothing can follow; the returned value can only be rendered.
    pub fn until_end(mut self) -> Anchored {
        self.builder.emit_end_of_text();
        Anchored { builder: self.builder }
    }

    /// Renders the pattern, consuming the chain.
    pub fn finish(self) -> String {
        self.builder.finish()
    }
}

impl Pattern for ConnectorStep {
    fn render(&self) -> String {
        self.builder.render()
    }
}

impl fmt::Display for ConnectorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A chain anchored at the end of the text. It can only be rendered or
/// composed.
#[derive(Debug, Clone)]
#[must_use = "a pattern does nothing until it is rendered"]
pub struct Anchored {
    builder: Builder,
}

impl Anchored {
    /// Renders the pattern, consuming it.
    pub fn finish(self) -> String {
        self.builder.finish()
    }
}

impl Pattern for Anchored {
    fn render(&self) -> String {
        self.builder.render()
    }
}

impl fmt::Display for Anchored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn non_negative(n: i32) -> BuildResult<u32> {
    u32::try_from(n).map_err(|_| BuildError::InvalidQuantity { quantity: n })
}
