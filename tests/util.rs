use regex_automata::meta::Regex;

/// Routes `logging` output to the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Compiles `pattern` with the finite automata engine.
pub fn regex(pattern: &str) -> Regex {
    init_logging();
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("{:?} failed to compile: {}", pattern, err),
    }
}

/// Compiles `pattern` with the backtracking engine, for atomic groups and
/// possessive quantifiers.
pub fn fancy(pattern: &str) -> fancy_regex::Regex {
    init_logging();
    match fancy_regex::Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("{:?} failed to compile: {}", pattern, err),
    }
}

/// Returns true if `pattern` is accepted by the parser the `regex` crate
/// uses.
pub fn parses(pattern: &str) -> bool {
    regex_syntax::Parser::new().parse(pattern).is_ok()
}
