use std::thread;

use once_cell::sync::Lazy;
use sieve::pattern::{alternation, atomic, capture, custom, literal, named_capture};
use sieve::{BuildResult, ConnectorStep, Expr, Pattern};

use crate::util::{fancy, regex};

fn clock() -> BuildResult<ConnectorStep> {
    Ok(sieve::free()
        .exactly(2)?
        .digits()
        .followed_by(':')
        .then()
        .exactly(2)?
        .digits())
}

fn level() -> BuildResult<Expr> {
    named_capture(
        "level",
        alternation([literal("INFO"), literal("WARN"), literal("ERROR")]),
    )
}

/// The shared prefix of every log line: `hh:mm [LEVEL]`.
fn log_prefix() -> BuildResult<ConnectorStep> {
    Ok(sieve::anchored_start()
        .pattern(clock()?)
        .followed_by(' ')
        .followed_by('[')
        .followed_by_pattern(level()?)
        .followed_by(']'))
}

static LOG_LINE: Lazy<String> = Lazy::new(|| {
    let message = named_capture("message", sieve::free().one_or_more().any()).unwrap();
    log_prefix()
        .unwrap()
        .followed_by(' ')
        .followed_by_pattern(message)
        .until_end()
        .finish()
});

#[test]
fn named_groups_extract_fields() {
    assert_eq!(
        *LOG_LINE,
        r"^[0-9]{2}:[0-9]{2} \[(?<level>(?:INFO|WARN|ERROR))\] (?<message>.+)$"
    );

    let re = regex(&LOG_LINE);
    let line = "12:30 [WARN] disk almost full";
    let mut caps = re.create_captures();
    re.captures(line, &mut caps);
    assert!(caps.is_match());
    let level = caps.get_group_by_name("level").unwrap();
    assert_eq!(&line[level.range()], "WARN");
    let message = caps.get_group_by_name("message").unwrap();
    assert_eq!(&line[message.range()], "disk almost full");

    assert!(!re.is_match("12:30 [DEBUG] ignored"));
    assert!(!re.is_match("1:30 [INFO] short clock"));
}

#[test]
fn order_id_extracted_by_name() -> anyhow::Result<()> {
    let id = named_capture("orderId", sieve::free().one_or_more().digits())?;
    let pattern = sieve::free()
        .pattern(literal("Order: #"))
        .followed_by_pattern(id)
        .finish();
    assert_eq!(pattern, "Order: #(?<orderId>[0-9]+)");

    let re = regex(&pattern);
    let text = "Shipped. Order: #4711, thanks";
    let mut caps = re.create_captures();
    re.captures(text, &mut caps);
    let id = caps.get_group_by_name("orderId").unwrap();
    assert_eq!(&text[id.range()], "4711");
    Ok(())
}

#[test]
fn prefix_can_be_extended_differently() -> anyhow::Result<()> {
    let prefix = log_prefix()?;
    let with_code = prefix
        .clone()
        .followed_by(' ')
        .then()
        .pattern(capture(sieve::free().exactly(3)?.digits()))
        .until_end()
        .finish();
    let bare = prefix.until_end().finish();

    assert!(with_code.ends_with(r"\] ([0-9]{3})$"));
    assert!(bare.ends_with(r"\]$"));

    let re = regex(&with_code);
    let line = "08:15 [ERROR] 503";
    let mut caps = re.create_captures();
    re.captures(line, &mut caps);
    // Group 1 is the named `level` group.
    let code = caps.get_group(2).unwrap();
    assert_eq!(&line[code.range()], "503");
    assert!(regex(&bare).is_match("08:15 [INFO]"));
    Ok(())
}

#[test]
fn optional_international_prefix() -> anyhow::Result<()> {
    let prefix = alternation([literal("+39"), literal("0039")]);
    let number = named_capture("number", sieve::free().exactly(10)?.digits())?;
    let pattern = sieve::anchored_start()
        .with_optional(sieve::free().pattern(prefix).with_optional_char(' '))
        .followed_by_pattern(number)
        .until_end()
        .finish();
    assert_eq!(pattern, r"^(?:(?:\+39|0039) ?)?(?<number>[0-9]{10})$");

    let re = regex(&pattern);
    for accepted in ["+39 3331234567", "00393331234567", "3331234567"] {
        assert!(re.is_match(accepted), "{}", accepted);
    }
    for rejected in ["+393 331234567", "39 3331234567", "333123456"] {
        assert!(!re.is_match(rejected), "{}", rejected);
    }
    Ok(())
}

#[test]
fn price_with_optional_cents() -> anyhow::Result<()> {
    let cents = sieve::free().character('.').then().exactly(2)?.digits();
    let pattern = sieve::anchored_start()
        .one_or_more()
        .digits()
        .with_optional(cents)
        .until_end()
        .finish();
    assert_eq!(pattern, r"^[0-9]+(?:\.[0-9]{2})?$");

    let re = regex(&pattern);
    assert!(re.is_match("10"));
    assert!(re.is_match("10.50"));
    assert!(!re.is_match("10.5"));
    assert!(!re.is_match(".50"));
    Ok(())
}

#[test]
fn mixed_pattern_kinds_in_one_alternation() {
    let digits = sieve::free().one_or_more().digits();
    let options = alternation([literal("none"), digits.into_expr(), custom(|| "x{2}".to_string())]);
    let pattern = sieve::anchored_start().pattern(&options).until_end().finish();
    assert_eq!(pattern, "^(?:none|[0-9]+|x{2})$");

    let re = regex(&pattern);
    assert!(re.is_match("none"));
    assert!(re.is_match("42"));
    assert!(re.is_match("xx"));
    assert!(!re.is_match("x"));
}

#[test]
fn sequence_of_sub_patterns() {
    let pattern = sieve::free()
        .character('<')
        .followed_by_all([literal("b"), literal(">")])
        .finish();
    assert_eq!(pattern, "<b>");
    assert!(regex(&pattern).is_match("a <b> tag"));
}

#[test]
fn atomic_group_does_not_give_back() {
    let greedy = sieve::free().zero_or_more().letters();
    let pattern = sieve::anchored_start()
        .pattern(atomic(greedy))
        .followed_by('a')
        .until_end()
        .finish();
    assert_eq!(pattern, "^(?>[a-zA-Z]*)a$");
    assert!(!fancy(&pattern).is_match("banana").unwrap());

    let nested = atomic(atomic(literal("a")));
    assert_eq!(nested.render(), "(?>(?>a))");
    assert!(fancy(&nested.render()).is_match("a").unwrap());
}

#[test]
fn quantified_composite_is_grouped() -> anyhow::Result<()> {
    let pair = sieve::free().character('a').followed_by('b');
    let pattern = sieve::free()
        .at_least(2)?
        .pattern(&pair)
        .without_backtracking()
        .finish();
    assert_eq!(pattern, "(?:ab){2,}+");

    let greedy = sieve::anchored_start().at_least(2)?.pattern(pair).until_end().finish();
    let re = regex(&greedy);
    assert!(re.is_match("abab"));
    assert!(!re.is_match("ab"));
    Ok(())
}

static SHARED: Lazy<Expr> =
    Lazy::new(|| alternation([literal("red"), literal("green"), literal("blue")]));

#[test]
fn expressions_shared_between_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| sieve::anchored_start().pattern(&*SHARED).finish()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "^(?:red|green|blue)");
    }
    assert_eq!(SHARED.render(), "(?:red|green|blue)");
}
