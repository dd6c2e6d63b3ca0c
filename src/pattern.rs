/*!
The [`Pattern`] capability and the combinators built on it.

Anything that can produce pattern text is a [`Pattern`]: a finished or still
open chain, and every value returned by the functions in this module. The
combinators return an [`Expr`], which holds its parts and only computes text
when [`Pattern::render`] is called. Rendering an `Expr` has no side effects and
returns the same text every time, so an `Expr` can be cloned and shared
freely between threads.

```
use sieve::pattern::{alternation, literal};

let animal = alternation([literal("cat"), literal("dog")]);
assert_eq!(sieve::anchored_start().pattern(&animal).finish(), "^(?:cat|dog)");
```
*/

use std::fmt;
use std::sync::Arc;

use crate::error::{BuildError, BuildResult};
use crate::{escape, syntax};

/// Something that renders to pattern text.
pub trait Pattern: Send + Sync {
    /// Renders this pattern.
    ///
    /// Implementations must return the same text on every call.
    fn render(&self) -> String;

    /// Converts this pattern into an [`Expr`], for mixing different kinds of
    /// patterns in one combinator call.
    fn into_expr(self) -> Expr
    where
        Self: Sized + 'static,
    {
        Expr::new(Kind::Opaque(Arc::new(self)))
    }
}

impl<P: Pattern + ?Sized> Pattern for &P {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<P: Pattern + ?Sized> Pattern for Box<P> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<P: Pattern + ?Sized> Pattern for Arc<P> {
    fn render(&self) -> String {
        (**self).render()
    }
}

/// A composed pattern, rendered on demand.
#[derive(Clone)]
pub struct Expr {
    kind: Arc<Kind>,
}

enum Kind {
    Literal(String),
    Alternation(Vec<Expr>),
    Capture(Expr),
    NamedCapture(String, Expr),
    Atomic(Expr),
    Custom(Box<dyn Fn() -> String + Send + Sync>),
    Opaque(Arc<dyn Pattern>),
}

impl Expr {
    fn new(kind: Kind) -> Self {
        Self { kind: Arc::new(kind) }
    }

    fn write_to(&self, out: &mut String) {
        match &*self.kind {
            Kind::Literal(text) => escape::escape_into(text, out),
            Kind::Alternation(options) => {
                out.push_str(syntax::NON_CAPTURING_GROUP_OPEN);
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        out.push_str(syntax::OR);
                    }
                    option.write_to(out);
                }
                out.push_str(syntax::GROUP_CLOSE);
            }
            Kind::Capture(inner) => {
                out.push_str(syntax::GROUP_OPEN);
                inner.write_to(out);
                out.push_str(syntax::GROUP_CLOSE);
            }
            Kind::NamedCapture(name, inner) => {
                out.push_str(syntax::NAMED_GROUP_OPEN);
                out.push_str(name);
                out.push_str(syntax::NAMED_GROUP_NAME_CLOSE);
                inner.write_to(out);
                out.push_str(syntax::GROUP_CLOSE);
            }
            Kind::Atomic(inner) => {
                out.push_str(syntax::ATOMIC_GROUP_OPEN);
                inner.write_to(out);
                out.push_str(syntax::GROUP_CLOSE);
            }
            Kind::Custom(f) => out.push_str(&f()),
            Kind::Opaque(pattern) => out.push_str(&pattern.render()),
        }
    }
}

impl Pattern for Expr {
    fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn into_expr(self) -> Expr {
        self
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&self.render()).finish()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Matches any one of `options`, `(?:a|b|c)`.
///
/// The options are tried in order. With no options the group matches the
/// empty string.
pub fn alternation<I>(options: I) -> Expr
where
    I: IntoIterator,
    I::Item: Pattern + 'static,
{
    let options = options.into_iter().map(Pattern::into_expr).collect();
    Expr::new(Kind::Alternation(options))
}

/// Wraps `pattern` in a numbered capturing group, `(...)`.
pub fn capture<P: Pattern + 'static>(pattern: P) -> Expr {
    Expr::new(Kind::Capture(pattern.into_expr()))
}

/// Wraps `pattern` in a named capturing group, `(?<name>...)`.
///
/// `name` must be an ASCII letter followed by ASCII letters or digits.
/// Whether a name is used twice in one pattern is not checked here; the
/// engine compiling the final text reports duplicates.
pub fn named_capture<P: Pattern + 'static>(name: &str, pattern: P) -> BuildResult<Expr> {
    if !is_valid_group_name(name) {
        return Err(BuildError::InvalidGroupName { name: name.to_string() });
    }
    Ok(Expr::new(Kind::NamedCapture(name.to_string(), pattern.into_expr())))
}

/// Matches `text` literally. Special characters are escaped when rendered.
pub fn literal(text: &str) -> Expr {
    Expr::new(Kind::Literal(text.to_string()))
}

/// Wraps `pattern` in an atomic group, `(?>...)`.
///
/// Once the group has matched, the engine does not backtrack into it.
/// Wrapping an atomic group again nests another group around it.
pub fn atomic<P: Pattern + 'static>(pattern: P) -> Expr {
    Expr::new(Kind::Atomic(pattern.into_expr()))
}

/// Builds a pattern from a function returning raw pattern text.
///
/// The text is used as is. This is an escape hatch for constructs this crate
/// does not cover; the caller is responsible for the text being well formed.
pub fn custom<F>(f: F) -> Expr
where
    F: Fn() -> String + Send + Sync + 'static,
{
    Expr::new(Kind::Custom(Box::new(f)))
}

fn is_valid_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}
