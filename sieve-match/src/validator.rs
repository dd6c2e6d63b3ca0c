use std::any;

use crate::error::{ConfigurationError, RuleError};
use crate::matcher::Matcher;

/// A named, reusable validation rule that knows its own pattern.
///
/// Rules are usually unit structs deriving `Default`, so that a
/// [`MatchValidator`] can construct one itself:
///
/// ```
/// use sieve_match::{MatchValidator, PatternRule, RuleError};
///
/// #[derive(Default)]
/// struct PostalCode;
///
/// impl PatternRule for PostalCode {
///     fn pattern(&self) -> Result<String, RuleError> {
///         Ok(sieve::free().exactly(5)?.digits().finish())
///     }
/// }
///
/// let validator = MatchValidator::for_rule::<PostalCode>()?;
/// assert!(validator.is_valid(Some("20121")));
/// assert!(!validator.is_valid(Some("2012")));
/// assert!(validator.is_valid(None));
/// # Ok::<(), sieve_match::ConfigurationError>(())
/// ```
pub trait PatternRule {
    /// Produces the pattern text every value is checked against.
    fn pattern(&self) -> Result<String, RuleError>;
}

/// Checks whole values against the pattern of a [`PatternRule`].
///
/// The pattern is produced and compiled once, when the validator is built.
/// Any failure at that point is a [`ConfigurationError`]; after that,
/// validation itself cannot fail.
#[derive(Debug, Clone)]
pub struct MatchValidator {
    rule: &'static str,
    matcher: Matcher,
}

impl MatchValidator {
    /// Builds a validator for `R`, creating the rule through `Default`.
    pub fn for_rule<R: PatternRule + Default>() -> Result<MatchValidator, ConfigurationError> {
        MatchValidator::from_rule(&R::default())
    }

    /// Builds a validator from an existing rule value.
    pub fn from_rule<R: PatternRule>(rule: &R) -> Result<MatchValidator, ConfigurationError> {
        let name = any::type_name::<R>();
        let pattern = rule
            .pattern()
            .map_err(|source| ConfigurationError::Rule { rule: name, source })?;
        let matcher = Matcher::full(&pattern)
            .map_err(|source| ConfigurationError::Compile { rule: name, source })?;
        debug!("initialized rule {} with pattern {:?}", name, pattern);
        Ok(MatchValidator { rule: name, matcher })
    }

    /// Returns true if `value` matches the rule's pattern in full.
    ///
    /// An absent value is considered valid; requiring presence is a separate
    /// concern.
    pub fn is_valid(&self, value: Option<&str>) -> bool {
        match value {
            None => true,
            Some(value) => self.matcher.is_match(value),
        }
    }

    /// The type name of the rule this validator was built from.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    /// The rule's pattern, as produced by the rule.
    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }
}
