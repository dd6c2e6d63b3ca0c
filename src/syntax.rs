/*!
The fixed vocabulary of pattern text rendered by this crate.

Every fragment the builder or the combinators emit comes from this module, so
the set of constructs a rendered pattern can contain is exactly the set listed
here.
*/

// Anchors and zero-width assertions.
pub const START_OF_TEXT: &str = "^";
pub const END_OF_TEXT: &str = "$";
pub const WORD_BOUNDARY: &str = r"\b";

// Quantifiers.
pub const ZERO_OR_MORE: &str = "*";
pub const ONE_OR_MORE: &str = "+";
pub const OPTIONAL: &str = "?";
pub const COUNT_OPEN: &str = "{";
pub const COUNT_CLOSE: &str = "}";
pub const COUNT_SEPARATOR: &str = ",";
/// Appended directly after a quantifier to make it possessive.
pub const POSSESSIVE: &str = "+";

// Groups and alternation.
pub const NON_CAPTURING_GROUP_OPEN: &str = "(?:";
pub const GROUP_OPEN: &str = "(";
pub const GROUP_CLOSE: &str = ")";
pub const NAMED_GROUP_OPEN: &str = "(?<";
pub const NAMED_GROUP_NAME_CLOSE: &str = ">";
pub const ATOMIC_GROUP_OPEN: &str = "(?>";
pub const OR: &str = "|";

// Character classes.
pub const CLASS_OPEN: &str = "[";
pub const CLASS_CLOSE: &str = "]";
/// Opens a negated set intersected with the enclosing class. Closed by
/// [`CLASS_CLOSE`].
pub const CLASS_INTERSECTION_NEGATION: &str = "&&[^";
pub const ANY_CHAR: &str = ".";

// Predefined ranges, rendered inside a class.
pub const RANGE_DIGITS: &str = "0-9";
pub const RANGE_LETTERS: &str = "a-zA-Z";
pub const RANGE_LOWERCASE: &str = "a-z";
pub const RANGE_UPPERCASE: &str = "A-Z";
pub const RANGE_ALPHANUMERIC: &str = "a-zA-Z0-9";
