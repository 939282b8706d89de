use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::lexer::TokenMatcher;
use crate::reducer::{DEFAULT_EXEC_FUEL, SequencePattern, TokenPattern};
use crate::{Error, Language};

const CALC: &str = indoc! {r#"
    {
        "name": "calc",
        "extensions": ["calc"],
        "root": "expr",
        "matchers": [
            { "type": "REGEX", "pattern": "\\s+", "token": "T_WS" },
            { "type": "REGEX", "pattern": "\\d+", "token": "T_NUMBER" },
            { "type": "DIRECT", "texts": ["+", "-"], "token": "T_OP" },
            { "type": "DIRECT", "texts": ["(", ")"], "token": "T_PAREN" }
        ],
        "trivia": ["T_WS"],
        "patterns": [
            { "type": "SEQUENCE", "produces": "binary", "elements": ["T_NUMBER", "T_OP", "T_NUMBER"] },
            { "type": "DELIMITED", "produces": "group", "open": "(", "close": ")" }
        ],
        "styles": { "T_NUMBER": "number", "T_OP": "operator" }
    }
"#};

#[test]
fn language_from_json() {
    let lang = Language::from_json(CALC).unwrap();

    assert_eq!(lang.name(), "calc");
    assert_eq!(lang.extensions(), ["calc"]);
    assert_eq!(lang.reducer().root(), Some("expr"));
    assert_eq!(lang.reducer().exec_fuel(), Some(DEFAULT_EXEC_FUEL));
    assert_eq!(lang.lexer().trivia().collect::<Vec<_>>(), ["T_WS"]);
    assert_eq!(lang.style("T_OP"), Some("operator"));
    assert_eq!(lang.style("group"), None);
    assert_eq!(
        lang.styles().collect::<Vec<_>>(),
        [("T_NUMBER", "number"), ("T_OP", "operator")]
    );
}

#[test]
fn parse_reduces_to_root() {
    let lang = Language::from_json(CALC).unwrap();
    let parse = lang.parse("(1 + 2)");

    let dump = parse.tree.printer().dump();
    insta::assert_snapshot!(dump, @r#"
    expr
      group
        T_PAREN "("
        binary
          T_NUMBER "1"
          T_OP "+"
          T_NUMBER "2"
        T_PAREN ")"
    "#);
    assert!(parse.diagnostics.is_empty());
}

#[test]
fn parse_collects_lexer_diagnostics() {
    let lang = Language::from_json(CALC).unwrap();
    let parse = lang.parse("1 + $");

    assert!(parse.diagnostics.contains(DiagnosticKind::UnrecognizedCharacter));
    assert!(!parse.diagnostics.has_errors());
    assert_eq!(parse.tree.text(), "1 + $");
}

#[test]
fn tokenize_skips_reduction() {
    let lang = Language::from_json(CALC).unwrap();
    let lexed = lang.tokenize("1+2");

    let names: Vec<_> = lexed.tokens.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["T_NUMBER", "T_OP", "T_NUMBER"]);
}

#[test]
fn exec_fuel_from_grammar() {
    let json = indoc! {r#"
        {
            "name": "tiny",
            "matchers": [{ "type": "REGEX", "pattern": "\\d", "token": "T_DIGIT" }],
            "exec_fuel": 5
        }
    "#};
    let lang = Language::from_json(json).unwrap();
    assert_eq!(lang.reducer().exec_fuel(), Some(5));
    assert_eq!(lang.reducer().patterns().count(), 0);
}

#[test]
fn fuel_override_per_parse() {
    let lang = Language::from_json(CALC).unwrap();
    let parse = lang.parse_with_fuel("(1 + 2)", Some(1));

    assert!(parse.diagnostics.contains(DiagnosticKind::ReductionLimitReached));
    assert!(parse.diagnostics.has_errors());
    assert_eq!(parse.tree.text(), "(1 + 2)");
    assert!(lang.parse("(1 + 2)").diagnostics.is_empty());
}

#[test]
fn grammar_without_patterns_leaves_tokens() {
    let json = indoc! {r#"
        {
            "name": "tiny",
            "matchers": [{ "type": "REGEX", "pattern": "\\d", "token": "T_DIGIT" }]
        }
    "#};
    let lang = Language::from_json(json).unwrap();
    let parse = lang.parse("12");

    assert_eq!(parse.tree.nodes().len(), 2);
    assert!(parse.diagnostics.contains(DiagnosticKind::UnreducedSequence));
}

#[test]
fn invalid_json_is_grammar_error() {
    let err = Language::from_json("{").unwrap_err();
    assert!(matches!(err, Error::Grammar(_)));
}

#[test]
fn invalid_regex_is_rejected() {
    let json = indoc! {r#"
        {
            "name": "broken",
            "matchers": [{ "type": "REGEX", "pattern": "(", "token": "T_X" }]
        }
    "#};
    let err = Language::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidRegex { .. }));
}

#[test]
fn malformed_pattern_is_rejected() {
    let json = indoc! {r#"
        {
            "name": "broken",
            "matchers": [{ "type": "REGEX", "pattern": "\\d", "token": "T_DIGIT" }],
            "patterns": [{ "type": "SEQUENCE", "produces": "empty", "elements": [] }]
        }
    "#};
    let err = Language::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
}

#[test]
fn rewrapping_patterns_fail_at_build_time() {
    let err = TokenPattern::new("T_IDENT", "T_IDENT").unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));

    let json = indoc! {r#"
        {
            "name": "loop",
            "matchers": [{ "type": "REGEX", "pattern": "[a-z]+", "token": "T_IDENT" }],
            "patterns": [
                { "type": "TOKEN", "token": "T_IDENT", "produces": "word" },
                { "type": "TOKEN", "token": "word", "produces": "T_IDENT" }
            ]
        }
    "#};
    let err = Language::from_json(json).unwrap_err();
    assert!(matches!(err, Error::WrappingCycle { cycle } if cycle == "T_IDENT -> word -> T_IDENT"));
}

#[test]
fn builder_assembles_language() {
    let lang = Language::builder("pairs")
        .extension("pr")
        .extension("pairs")
        .matcher(TokenMatcher::regex(r"[a-z]", "T_LETTER").unwrap())
        .pattern(SequencePattern::new("pair", ["T_LETTER", "T_LETTER"]).unwrap())
        .style("pair", "name")
        .exec_fuel(None)
        .build()
        .unwrap();

    assert_eq!(lang.extensions(), ["pr", "pairs"]);
    assert_eq!(lang.reducer().exec_fuel(), None);

    let parse = lang.parse("ab");
    assert_eq!(parse.tree.root().map(|n| n.grammar_key()), Some("pair"));
    assert_eq!(parse.tree.language(), "pairs");
}

#[test]
fn parses_are_independent() {
    let lang = Language::from_json(CALC).unwrap();
    let first = lang.parse("1 + 2");
    let second = lang.parse("3 - 4");
    let again = lang.parse("1 + 2");

    assert_eq!(first.tree, again.tree);
    assert_ne!(first.tree, second.tree);
}

#[test]
fn language_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Language>();
}
