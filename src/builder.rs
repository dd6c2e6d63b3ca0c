/*!
The state shared by every step of a chain.

A [`Builder`] owns three buffers: the finalized output, the body of a character
class that is still open, and the quantifier waiting for the next token. The
role handles in [`crate::step`] are thin wrappers that decide which of the
methods here a caller may reach at a given point in the chain.

A pending class is only closed ("flushed") when something else needs to be
emitted, because refinements like `include` and `exclude` keep extending it
until then.
*/

use crate::{escape, syntax};

/// How many times the next token repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Quantifier {
    /// Exactly once. Renders nothing.
    #[default]
    Once,
    Exactly(u32),
    AtLeast(u32),
    OneOrMore,
    ZeroOrMore,
    Optional,
}

impl Quantifier {
    /// Appends the suffix for this quantifier, if it has one.
    fn write_to(&self, out: &mut String) {
        match *self {
            Quantifier::Once => {}
            Quantifier::Exactly(n) => {
                out.push_str(syntax::COUNT_OPEN);
                out.push_str(&n.to_string());
                out.push_str(syntax::COUNT_CLOSE);
            }
            Quantifier::AtLeast(n) => {
                out.push_str(syntax::COUNT_OPEN);
                out.push_str(&n.to_string());
                out.push_str(syntax::COUNT_SEPARATOR);
                out.push_str(syntax::COUNT_CLOSE);
            }
            Quantifier::OneOrMore => out.push_str(syntax::ONE_OR_MORE),
            Quantifier::ZeroOrMore => out.push_str(syntax::ZERO_OR_MORE),
            Quantifier::Optional => out.push_str(syntax::OPTIONAL),
        }
    }

    fn has_suffix(&self) -> bool {
        !matches!(self, Quantifier::Once)
    }
}

/// What the most recent emission ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tail {
    /// Nothing, an anchor, a boundary, or a token without a quantifier.
    #[default]
    Plain,
    /// A quantifier suffix, which may already be possessive.
    Quantified { possessive: bool },
}

/// The single mutable state behind all role handles.
#[derive(Debug, Clone, Default)]
pub(crate) struct Builder {
    sequence: String,
    class: String,
    building_class: bool,
    quantifier: Quantifier,
    possessive: bool,
    tail: Tail,
}

impl Builder {
    /// Create a builder whose output is unanchored.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose output starts with a start-of-text anchor.
    pub(crate) fn anchored_start() -> Self {
        let mut builder = Self::new();
        builder.sequence.push_str(syntax::START_OF_TEXT);
        builder
    }

    pub(crate) fn set_quantifier(&mut self, quantifier: Quantifier) {
        self.quantifier = quantifier;
        self.possessive = false;
    }

    /// Adds a predefined range to the pending class, opening one if needed.
    pub(crate) fn add_range(&mut self, range: &str) {
        self.building_class = true;
        self.class.push_str(range);
    }

    /// Emits the any-character token with the pending quantifier.
    pub(crate) fn emit_any(&mut self) {
        self.flush();
        self.sequence.push_str(syntax::ANY_CHAR);
        self.emit_quantifier();
    }

    /// Emits an escaped literal character with the pending quantifier.
    pub(crate) fn emit_char(&mut self, c: char) {
        self.flush();
        let mut buf = [0; 4];
        escape::escape_into(c.encode_utf8(&mut buf), &mut self.sequence);
        self.emit_quantifier();
    }

    /// Emits already rendered sub-pattern text.
    ///
    /// The text is grouped only when a quantifier is pending, so that the
    /// quantifier applies to the whole sub-pattern rather than its last token.
    /// Without one the text is concatenated as is.
    ///
    /// Text that can only match the empty string is emitted without its
    /// quantifier, since backtracking engines reject a quantified empty group.
    pub(crate) fn emit_pattern(&mut self, text: &str) {
        self.flush();
        if is_empty_group(text) {
            trace!("dropping {:?} on empty sub-pattern {:?}", self.quantifier, text);
            self.sequence.push_str(text);
            self.set_quantifier(Quantifier::Once);
            self.tail = Tail::Plain;
            return;
        }
        if self.quantifier.has_suffix() {
            self.sequence.push_str(syntax::NON_CAPTURING_GROUP_OPEN);
            self.sequence.push_str(text);
            self.sequence.push_str(syntax::GROUP_CLOSE);
        } else {
            self.sequence.push_str(text);
        }
        self.emit_quantifier();
    }

    pub(crate) fn emit_word_boundary(&mut self) {
        self.flush();
        self.sequence.push_str(syntax::WORD_BOUNDARY);
        self.set_quantifier(Quantifier::Once);
        self.tail = Tail::Plain;
    }

    pub(crate) fn emit_end_of_text(&mut self) {
        self.flush();
        self.sequence.push_str(syntax::END_OF_TEXT);
        self.tail = Tail::Plain;
    }

    /// Adds characters to the pending class. Does nothing without one.
    pub(crate) fn include<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = char>,
    {
        if !self.building_class {
            trace!("include ignored: no class pending");
            return;
        }
        for c in chars {
            escape::escape_class_char(c, &mut self.class);
        }
    }

    /// Intersects the pending class with the complement of `chars`. Does
    /// nothing without a pending class, or when `chars` is empty.
    pub(crate) fn exclude<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = char>,
    {
        if !self.building_class {
            trace!("exclude ignored: no class pending");
            return;
        }
        let mut negated = String::new();
        for c in chars {
            escape::escape_class_char(c, &mut negated);
        }
        if negated.is_empty() {
            return;
        }
        self.class.push_str(syntax::CLASS_INTERSECTION_NEGATION);
        self.class.push_str(&negated);
        self.class.push_str(syntax::CLASS_CLOSE);
    }

    /// Makes the quantifier of the current token possessive.
    ///
    /// If the current token is a pending class, the pending quantifier is
    /// marked and rendered possessive when the class is flushed. Otherwise the
    /// token has already been emitted and its quantifier suffix, if any, is
    /// still at the end of the output, so the marker is appended directly
    /// after it. Applying this twice is the same as applying it once.
    pub(crate) fn make_possessive(&mut self) {
        if self.building_class {
            if self.quantifier.has_suffix() {
                self.possessive = true;
            }
            return;
        }
        if let Tail::Quantified { possessive: false } = self.tail {
            self.sequence.push_str(syntax::POSSESSIVE);
            self.tail = Tail::Quantified { possessive: true };
        }
    }

    /// Closes a pending class into a bracket expression followed by the
    /// pending quantifier. Does nothing when no class is pending.
    pub(crate) fn flush(&mut self) {
        if !self.building_class {
            return;
        }
        trace!("flushing class [{}] with {:?}", self.class, self.quantifier);
        self.sequence.push_str(syntax::CLASS_OPEN);
        self.sequence.push_str(&self.class);
        self.sequence.push_str(syntax::CLASS_CLOSE);
        self.class.clear();
        self.building_class = false;
        self.emit_quantifier();
    }

    /// Flushes and returns the output, consuming the builder.
    pub(crate) fn finish(mut self) -> String {
        self.flush();
        debug!("rendered pattern {:?}", self.sequence);
        self.sequence
    }

    /// Renders the output as if flushed, without changing this builder.
    pub(crate) fn render(&self) -> String {
        if !self.building_class {
            return self.sequence.clone();
        }
        self.clone().finish()
    }

    /// Appends the pending quantifier, records it as the tail and clears it.
    fn emit_quantifier(&mut self) {
        self.quantifier.write_to(&mut self.sequence);
        if self.quantifier.has_suffix() {
            if self.possessive {
                self.sequence.push_str(syntax::POSSESSIVE);
            }
            self.tail = Tail::Quantified { possessive: self.possessive };
        } else {
            self.tail = Tail::Plain;
        }
        self.set_quantifier(Quantifier::Once);
    }
}

/// Returns true if `text` is empty or made only of empty non-capturing groups.
fn is_empty_group(text: &str) -> bool {
    let mut rest = text.to_string();
    loop {
        let stripped = rest.replace(EMPTY_GROUP, "");
        if stripped == rest {
            return rest.is_empty();
        }
        rest = stripped;
    }
}

const EMPTY_GROUP: &str = "(?:)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantifier_suffixes() {
        let cases = [
            (Quantifier::Once, ""),
            (Quantifier::Exactly(0), "{0}"),
            (Quantifier::Exactly(3), "{3}"),
            (Quantifier::AtLeast(2), "{2,}"),
            (Quantifier::OneOrMore, "+"),
            (Quantifier::ZeroOrMore, "*"),
            (Quantifier::Optional, "?"),
        ];
        for (quantifier, expected) in cases {
            let mut out = String::new();
            quantifier.write_to(&mut out);
            assert_eq!(out, expected, "{:?}", quantifier);
        }
    }

    #[test]
    fn test_class_accumulates_until_flush() {
        let mut builder = Builder::new();
        builder.set_quantifier(Quantifier::OneOrMore);
        builder.add_range(syntax::RANGE_DIGITS);
        builder.include(['.', '-']);
        assert_eq!(builder.sequence, "");
        assert_eq!(builder.class, r"0-9.\-");

        builder.flush();
        assert_eq!(builder.sequence, r"[0-9.\-]+");
        assert!(builder.class.is_empty());
        assert!(!builder.building_class);
        assert_eq!(builder.quantifier, Quantifier::Once);
    }

    #[test]
    fn test_flush_without_class_is_noop() {
        let mut builder = Builder::anchored_start();
        builder.flush();
        builder.flush();
        assert_eq!(builder.finish(), "^");
    }

    #[test]
    fn test_refinements_ignored_without_class() {
        let mut builder = Builder::new();
        builder.emit_char('a');
        builder.include(['b']);
        builder.exclude(['c']);
        assert_eq!(builder.finish(), "a");
    }

    #[test]
    fn test_empty_exclusion_is_noop() {
        let mut builder = Builder::new();
        builder.add_range(syntax::RANGE_LOWERCASE);
        builder.exclude(std::iter::empty::<char>());
        assert_eq!(builder.finish(), "[a-z]");
    }

    #[test]
    fn test_pattern_grouped_only_when_quantified() {
        let mut builder = Builder::new();
        builder.emit_pattern("ab");
        builder.set_quantifier(Quantifier::Optional);
        builder.emit_pattern("cd");
        assert_eq!(builder.finish(), "ab(?:cd)?");
    }

    #[test]
    fn test_empty_sub_pattern_not_quantified() {
        let mut builder = Builder::new();
        builder.set_quantifier(Quantifier::ZeroOrMore);
        builder.emit_pattern("");
        builder.make_possessive();
        builder.set_quantifier(Quantifier::OneOrMore);
        builder.emit_pattern("(?:(?:)(?:))");
        assert_eq!(builder.quantifier, Quantifier::Once);
        builder.make_possessive();
        assert_eq!(builder.finish(), "(?:(?:)(?:))");

        assert!(is_empty_group("(?:(?:))"));
        assert!(!is_empty_group("(?:a)"));
        assert!(!is_empty_group(r"\(?:)"));
    }

    #[test]
    fn test_possessive_on_pending_class() {
        let mut builder = Builder::new();
        builder.set_quantifier(Quantifier::OneOrMore);
        builder.add_range(syntax::RANGE_DIGITS);
        builder.make_possessive();
        builder.make_possessive();
        assert_eq!(builder.finish(), "[0-9]++");
    }

    #[test]
    fn test_possessive_on_emitted_token() {
        let mut builder = Builder::new();
        builder.set_quantifier(Quantifier::Exactly(2));
        builder.emit_any();
        builder.make_possessive();
        builder.make_possessive();
        assert_eq!(builder.finish(), ".{2}+");
    }

    #[test]
    fn test_possessive_without_quantifier_is_noop() {
        let mut builder = Builder::new();
        builder.add_range(syntax::RANGE_DIGITS);
        builder.make_possessive();
        builder.flush();
        builder.emit_char('x');
        builder.make_possessive();
        builder.emit_word_boundary();
        builder.make_possessive();
        assert_eq!(builder.finish(), r"[0-9]x\b");
    }

    #[test]
    fn test_possessive_flag_cleared_by_new_quantifier() {
        let mut builder = Builder::new();
        builder.set_quantifier(Quantifier::ZeroOrMore);
        builder.add_range(syntax::RANGE_LETTERS);
        builder.make_possessive();
        builder.flush();
        builder.set_quantifier(Quantifier::ZeroOrMore);
        builder.add_range(syntax::RANGE_DIGITS);
        assert_eq!(builder.finish(), "[a-zA-Z]*+[0-9]*");
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut builder = Builder::new();
        builder.set_quantifier(Quantifier::OneOrMore);
        builder.add_range(syntax::RANGE_UPPERCASE);
        assert_eq!(builder.render(), "[A-Z]+");
        assert_eq!(builder.render(), "[A-Z]+");
        builder.include(['_']);
        assert_eq!(builder.finish(), "[A-Z_]+");
    }
}
