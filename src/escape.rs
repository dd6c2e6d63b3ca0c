/*!
Escaping of raw text for embedding in a pattern.

There are two contexts with different rules. Outside of a bracket expression
every character that can start or continue a token is escaped. Inside a
bracket expression only the characters that close the class, form a range or
negation, or start a set operation need escaping.

Neither function is idempotent: escaping already escaped text escapes the
backslashes again.
*/

/// Escapes `text` so that it matches itself literally outside of a class.
///
/// ```
/// assert_eq!(sieve::escape::escape("1.50$"), r"1\.50\$");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

/// Like [`escape`], but appends to an existing buffer.
pub fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        if is_special(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Appends `c` to `out`, escaped for use inside a bracket expression.
///
/// `&`, `~` and `[` are escaped even though a single occurrence is harmless,
/// because doubled `&&`/`~~` and a nested `[` are set operations in the
/// host syntax.
pub fn escape_class_char(c: char, out: &mut String) {
    if is_class_special(c) {
        out.push('\\');
    }
    out.push(c);
}

/// Returns true if `c` needs a backslash outside of a class.
///
/// `<` and `>` are deliberately absent: they are literals when bare, while a
/// backslash in front of them forms a word-start/word-end assertion.
fn is_special(c: char) -> bool {
    matches!(
        c,
        '.' | '?'
            | '*'
            | '+'
            | '^'
            | '$'
            | '['
            | ']'
            | '('
            | ')'
            | '{'
            | '}'
            | '|'
            | '\\'
            | '='
            | '!'
    )
}

fn is_class_special(c: char) -> bool {
    matches!(c, '\\' | '-' | '^' | ']' | '&' | '[' | '~')
}
