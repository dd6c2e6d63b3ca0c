use std::error::Error;
use std::fmt;

/// The error a [`PatternRule`](crate::PatternRule) returns when it cannot
/// produce its pattern.
pub type RuleError = Box<dyn Error + Send + Sync + 'static>;

/// A pattern that no available engine could compile.
#[derive(Debug)]
pub struct CompileError {
    pub(crate) pattern: String,
    pub(crate) source: fancy_regex::Error,
}

impl CompileError {
    /// The pattern text that failed to compile.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to compile pattern {:?}: {}", self.pattern, self.source)
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// A rule that cannot be turned into a validator.
///
/// This is a setup-time failure: it means the rule itself is broken, not that
/// some value failed validation. Callers are expected to treat it as fatal.
#[derive(Debug)]
pub enum ConfigurationError {
    /// The rule failed to produce its pattern.
    Rule {
        /// The type name of the rule.
        rule: &'static str,
        /// What the rule reported.
        source: RuleError,
    },
    /// The rule's pattern does not compile.
    Compile {
        /// The type name of the rule.
        rule: &'static str,
        /// The compilation failure.
        source: CompileError,
    },
}

impl ConfigurationError {
    /// The type name of the rule that failed.
    pub fn rule(&self) -> &'static str {
        match self {
            ConfigurationError::Rule { rule, .. } => rule,
            ConfigurationError::Compile { rule, .. } => rule,
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::Rule { rule, source } => {
                write!(f, "failed to initialize rule {}: {}", rule, source)
            }
            ConfigurationError::Compile { rule, source } => {
                write!(f, "failed to initialize rule {}: {}", rule, source)
            }
        }
    }
}

impl Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigurationError::Rule { source, .. } => Some(&**source),
            ConfigurationError::Compile { source, .. } => Some(source),
        }
    }
}
