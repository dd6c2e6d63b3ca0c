use std::ops::Range;

use regex_automata::meta;

use crate::error::CompileError;

/// A compiled pattern backed by whichever engine can run it.
///
/// Patterns using atomic groups or possessive quantifiers go straight to
/// `fancy-regex`. The finite automata engine from `regex-automata` would
/// accept `a++` as a nested repetition and silently drop its meaning.
/// Everything else is compiled with `regex-automata`, which guarantees linear
/// time matching, and only falls back to `fancy-regex` for constructs it
/// rejects, such as look-around in custom text.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    engine: Engine,
}

#[derive(Debug, Clone)]
enum Engine {
    Automata(meta::Regex),
    Backtracking(fancy_regex::Regex),
}

impl Matcher {
    /// Compiles `pattern` for searching anywhere in a haystack.
    pub fn new(pattern: &str) -> Result<Matcher, CompileError> {
        let engine = if needs_backtracking(pattern) {
            debug!("{:?} needs backtracking", pattern);
            Engine::Backtracking(backtracking(pattern)?)
        } else {
            match meta::Regex::new(pattern) {
                Ok(regex) => {
                    debug!("compiled {:?} with the automata engine", pattern);
                    Engine::Automata(regex)
                }
                Err(_err) => {
                    debug!(
                        "automata engine rejected {:?} ({}), falling back to backtracking",
                        pattern, _err
                    );
                    Engine::Backtracking(backtracking(pattern)?)
                }
            }
        };
        Ok(Matcher { pattern: pattern.to_string(), engine })
    }

    /// Compiles `pattern` so that it only matches an entire haystack.
    pub fn full(pattern: &str) -> Result<Matcher, CompileError> {
        let mut matcher = Matcher::new(&format!(r"\A(?:{})\z", pattern)).map_err(|mut err| {
            err.pattern = pattern.to_string();
            err
        })?;
        matcher.pattern = pattern.to_string();
        Ok(matcher)
    }

    /// The pattern text this matcher was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the backtracking engine is in use.
    pub fn is_backtracking(&self) -> bool {
        matches!(self.engine, Engine::Backtracking(_))
    }

    /// Returns true if the pattern matches somewhere in `haystack`.
    ///
    /// If the backtracking engine gives up (for example by hitting its
    /// backtrack limit), the haystack is reported as not matching.
    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.engine {
            Engine::Automata(regex) => regex.is_match(haystack),
            Engine::Backtracking(regex) => regex.is_match(haystack).unwrap_or_else(|_err| {
                warn!("matching {:?} failed: {}", self.pattern, _err);
                false
            }),
        }
    }

    /// Returns the byte range of the leftmost-first match in `haystack`.
    pub fn find(&self, haystack: &str) -> Option<Range<usize>> {
        match &self.engine {
            Engine::Automata(regex) => regex.find(haystack).map(|m| m.range()),
            Engine::Backtracking(regex) => match regex.find(haystack) {
                Ok(found) => found.map(|m| m.start()..m.end()),
                Err(_err) => {
                    warn!("searching {:?} failed: {}", self.pattern, _err);
                    None
                }
            },
        }
    }

    /// Returns every non-overlapping match in `haystack`, in order.
    pub fn find_all<'h>(&self, haystack: &'h str) -> Vec<&'h str> {
        match &self.engine {
            Engine::Automata(regex) => {
                regex.find_iter(haystack).map(|m| &haystack[m.range()]).collect()
            }
            Engine::Backtracking(regex) => regex
                .find_iter(haystack)
                .filter_map(|found| match found {
                    Ok(m) => Some(m.as_str()),
                    Err(_err) => {
                        warn!("searching {:?} failed: {}", self.pattern, _err);
                        None
                    }
                })
                .collect(),
        }
    }
}

fn backtracking(pattern: &str) -> Result<fancy_regex::Regex, CompileError> {
    fancy_regex::Regex::new(pattern).map_err(|source| CompileError {
        pattern: pattern.to_string(),
        source,
    })
}

/// Returns true if `pattern` contains an atomic group or a possessive
/// quantifier outside of a character class.
fn needs_backtracking(pattern: &str) -> bool {
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => class_depth += 1,
            ']' if class_depth > 0 => class_depth -= 1,
            _ if class_depth > 0 => {}
            '(' => {
                let mut ahead = chars.clone();
                if ahead.next() == Some('?') && ahead.next() == Some('>') {
                    return true;
                }
            }
            '*' | '+' | '?' | '}' => {
                if chars.peek() == Some(&'+') {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
