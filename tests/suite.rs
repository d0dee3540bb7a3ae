use pattern_automata::{
    dfa::DFA,
    nfa::{Compiler, Config},
    ErrorKind, NFA,
};

use crate::Result;

/// (name, pattern, haystack, whether it should match)
type GeneratedTest = (&'static str, &'static str, &'static str, bool);

/// Tests on which every way of building and running a pattern must agree.
const BASIC: &[GeneratedTest] = &[
    ("literal1", "a", "a", true),
    ("literal2", "a", "", false),
    ("literal3", "a", "b", false),
    ("literal4", "a", "aa", false),
    ("concat1", "ab", "ab", true),
    ("concat2", "ab", "a", false),
    ("concat3", "ab", "aab", false),
    ("concat4", "ab", "ac", false),
    ("choice1", "a|b", "a", true),
    ("choice2", "a|b", "b", true),
    ("choice3", "a|b", "c", false),
    ("choice4", "a|b", "ab", false),
    ("choice5", "a|b|c", "c", true),
    ("star1", "a*", "", true),
    ("star2", "a*", "a", true),
    ("star3", "a*", "aaa", true),
    ("star4", "a*", "b", false),
    ("star5", "a*", "aab", false),
    ("plus1", "a+", "", false),
    ("plus2", "a+", "a", true),
    ("plus3", "a+", "aaa", true),
    ("plus4", "a+", "ab", false),
    ("optional1", "a?", "", true),
    ("optional2", "a?", "a", true),
    ("optional3", "a?", "aa", false),
    ("mixed1", "xy*|z", "x", true),
    ("mixed2", "xy*|z", "xy", true),
    ("mixed3", "xy*|z", "xyy", true),
    ("mixed4", "xy*|z", "z", true),
    ("mixed5", "xy*|z", "xyz", false),
    ("mixed6", "xy*|z", "a", false),
    ("mixed7", "xy*|z", "", false),
    ("group1", "(ab)+", "abab", true),
    ("group2", "(ab)+", "aba", false),
    ("group3", "a(b|c)d", "acd", true),
    ("group4", "a(b|c)d", "ad", false),
    ("digit1", r"\d+", "2024", true),
    ("digit2", r"\d+", "20x4", false),
    ("word1", r"\w+", "jump_123", true),
    ("word2", r"\w+", "no-dash", false),
    ("space1", r"a\sb", "a\tb", true),
    ("space2", r"a\sb", "ab", false),
    ("escape1", r"a\*", "a*", true),
    ("escape2", r"a\*", "aa", false),
    ("escape3", r"\(\|\)", "(|)", true),
    ("escape4", r"\\", "\\", true),
    ("escape5", r"\x", "x", true),
    ("unicode1", "☃+", "☃☃", true),
    ("unicode2", "é|e", "é", true),
    ("number1", r"\d+(\.\d+)?", "3.14", true),
    ("number2", r"\d+(\.\d+)?", "3.", false),
    ("number3", r"\d+(\.\d+)?", "42", true),
];

/// Tests that quantify a fragment which itself loops. These only hold for
/// the explicit combinators.
const NESTED: &[GeneratedTest] = &[
    ("nested1", "(a*b)*", "", true),
    ("nested2", "(a*b)*", "aabab", true),
    ("nested3", "(a*b)*", "a", false),
    ("nested4", "(a*b)*", "aba", false),
    ("nested5", "(a?)*", "aaa", true),
    ("nested6", "(a|b*)+", "", true),
    ("nested7", "(a+b?)+c", "aabac", true),
    ("nested8", "(a+b?)+c", "bc", false),
    ("nested9", "(ab*)?", "a", true),
];

struct SuiteTest {
    name: &'static str,
    pattern: &'static str,
    haystack: &'static str,
    matched: bool,
}

impl SuiteTest {
    fn collection(tests: &[GeneratedTest]) -> Vec<SuiteTest> {
        tests.iter().cloned().map(SuiteTest::new).collect()
    }

    fn new(gentest: GeneratedTest) -> SuiteTest {
        SuiteTest {
            name: gentest.0,
            pattern: gentest.1,
            haystack: gentest.2,
            matched: gentest.3,
        }
    }

    fn run_is_match<F: FnMut(&str) -> bool>(&self, mut is_match: F) {
        assert_eq!(
            self.matched,
            is_match(self.haystack),
            "is_match disagreement: test: {}, pattern: {}, haystack: {:?}",
            self.name,
            self.pattern,
            self.haystack,
        );
    }
}

fn run_suite(tests: &[GeneratedTest], config: Config) -> Result<()> {
    let mut compiler = Compiler::new();
    compiler.configure(config);
    for test in SuiteTest::collection(tests) {
        let nfa = compiler.build(test.pattern)?;
        test.run_is_match(|haystack| nfa.is_match(haystack));
        let dfa = DFA::new(&nfa);
        test.run_is_match(|haystack| dfa.is_match(haystack));
    }
    Ok(())
}

#[test]
fn suite_explicit() -> Result<()> {
    run_suite(BASIC, Config::new().explicit(true))?;
    run_suite(NESTED, Config::new().explicit(true))
}

#[test]
fn suite_in_place() -> Result<()> {
    run_suite(BASIC, Config::new().explicit(false))
}

#[test]
fn suite_default_config_is_explicit() -> Result<()> {
    run_suite(NESTED, Config::new())
}

#[test]
fn in_place_forms_leak_through_nested_repetition() -> Result<()> {
    let mut compiler = Compiler::new();
    compiler.configure(Config::new().explicit(false));
    let nfa = compiler.build("(a*b)*")?;
    // The inner loop can reach the outer exit without consuming a 'b'.
    assert!(nfa.is_match("a"));
    assert!(DFA::new(&nfa).is_match("a"));
    Ok(())
}

#[test]
fn hand_built_and_compiled_agree() -> Result<()> {
    let built = NFA::literal('x')
        .concat(NFA::literal('y').zero_or_more_explicit())
        .choice(NFA::literal('z'));
    let compiled = NFA::new("xy*|z")?;
    for haystack in ["", "x", "xy", "xyyy", "z", "zz", "xz", "y"] {
        assert_eq!(
            compiled.is_match(haystack),
            built.is_match(haystack),
            "haystack: {:?}",
            haystack
        );
    }
    Ok(())
}

#[test]
fn introspection() -> Result<()> {
    let nfa = NFA::new("a|b")?;
    let table = nfa.transition_table();
    assert_eq!(1, nfa.start_number());
    assert_eq!(table.len(), table.iter().count());
    let alphabet: Vec<char> = nfa.alphabet().iter().copied().collect();
    assert_eq!(vec!['a', 'b'], alphabet);
    assert_eq!(1, nfa.accepting_numbers().len());

    let dfa = DFA::from(&nfa);
    assert_eq!(1, dfa.start_label());
    assert_eq!(nfa.alphabet(), dfa.alphabet());
    assert_eq!(2, dfa.accepting_labels().len());
    for (_, row) in dfa.transition_table() {
        for (_, &next) in row {
            assert!(next >= 1 && next <= dfa.state_len());
        }
    }
    Ok(())
}

#[test]
fn syntax_errors() {
    let cases = [
        ("", ErrorKind::UnexpectedEnd, 0),
        ("*a", ErrorKind::MissingAtom('*'), 0),
        ("(a", ErrorKind::UnclosedGroup, 0),
        ("a)", ErrorKind::UnopenedGroup, 1),
        ("a||b", ErrorKind::EmptyAlternative, 2),
        ("()", ErrorKind::EmptyGroup, 0),
        (r"ab\", ErrorKind::TrailingEscape, 2),
    ];
    let deep = format!("a{}b{}", "(".repeat(251), ")".repeat(251));
    let err = NFA::new(&deep).unwrap_err();
    assert_eq!(&ErrorKind::NestLimitExceeded(250), err.kind());
    assert_eq!(251, err.offset());
    for (pattern, kind, offset) in cases {
        let err = NFA::new(pattern).unwrap_err();
        assert_eq!(&kind, err.kind(), "pattern: {:?}", pattern);
        assert_eq!(offset, err.offset(), "pattern: {:?}", pattern);
        assert_eq!(pattern, err.pattern());
        assert!(pattern_automata::is_match_dfa(pattern, "").is_err());
    }
}

#[test]
fn error_display_points_at_offset() {
    let err = NFA::new("ab)").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("    ab)\n      ^\n"), "{}", msg);
}

#[test]
fn long_inputs() -> Result<()> {
    let many = "ab".repeat(100_000);
    let nfa = NFA::new("(ab)*")?;
    let dfa = DFA::new(&nfa);
    assert!(nfa.is_match(&many) && dfa.is_match(&many));
    let odd = format!("{}a", many);
    assert!(!nfa.is_match(&odd) && !dfa.is_match(&odd));

    let pattern = "x".repeat(200_000);
    assert!(pattern_automata::is_match(&pattern, &pattern)?);
    assert!(!pattern_automata::is_match(&pattern, "x")?);
    Ok(())
}
