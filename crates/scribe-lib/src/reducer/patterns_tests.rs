use std::sync::Arc;

use super::*;
use crate::lexer::{Lexer, TokenMatcher};

fn nodes(source: &str) -> Vec<Node<'_>> {
    let lexer = Lexer::new(vec![
        TokenMatcher::regex(r"\s+", "T_WS").unwrap(),
        TokenMatcher::regex(r"\d+", "T_NUMBER").unwrap(),
        TokenMatcher::regex(r"[a-z]+", "T_IDENT").unwrap(),
        TokenMatcher::direct(["(", ")", ",", "+", ";"], "T_PUNCT").unwrap(),
    ])
    .with_trivia(["T_WS"]);
    lexer.lex(source).tokens.into_iter().map(Node::from).collect()
}

fn fold(len: usize, key: &str, resume: usize) -> Mutation<'static> {
    Mutation::Fold {
        len,
        key: Arc::from(key),
        resume,
    }
}

#[test]
fn token_pattern_by_name_and_by_code() {
    let by_name = TokenPattern::new("T_IDENT", "identifier").unwrap();
    let by_code = TokenPattern::new("+", "plus").unwrap();
    let seq = nodes("a+1");

    assert_eq!(by_name.node_keys(), ["T_IDENT"]);
    assert_eq!(by_name.produced_node_key(), "identifier");
    assert!(by_name.matches(&seq, 0));
    assert!(!by_name.matches(&seq, 1));
    assert!(by_code.matches(&seq, 1));
    assert!(!by_code.matches(&seq, 2));
    assert_eq!(by_name.mutate(&seq, 0), fold(1, "identifier", 1));
}

#[test]
fn token_pattern_out_of_bounds_does_not_match() {
    let p = TokenPattern::new("T_IDENT", "identifier").unwrap();
    assert!(!p.matches(&nodes("a"), 1));
}

#[test]
fn sequence_matches_exact_run() {
    let p = SequencePattern::new("sum", ["T_NUMBER", "+", "T_NUMBER"]).unwrap();
    let seq = nodes("1+2+");

    assert_eq!(p.node_keys(), ["T_NUMBER"]);
    assert!(p.matches(&seq, 0));
    assert!(!p.matches(&seq, 2));
    assert_eq!(p.mutate(&seq, 0), fold(3, "sum", 0));
}

#[test]
fn sequence_skips_inner_trivia() {
    let p = SequencePattern::new("sum", ["T_NUMBER", "+", "T_NUMBER"]).unwrap();
    let seq = nodes("1 + 2 ");

    assert!(p.matches(&seq, 0));
    // `1`, ` `, `+`, ` `, `2`; the trailing space stays outside.
    assert_eq!(p.mutate(&seq, 0), fold(5, "sum", 0));
}

#[test]
fn sequence_does_not_start_on_trivia() {
    let p = SequencePattern::new("sum", ["T_NUMBER", "+", "T_NUMBER"]).unwrap();
    assert!(!p.matches(&nodes(" 1+2"), 0));
}

#[test]
fn sequence_rejects_empty_elements() {
    let err = SequencePattern::new("empty", Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));

    let err = SequencePattern::new("blank", ["a", ""]).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { produces, .. } if produces == "blank"));
}

#[test]
fn lone_fold_into_own_key_rejected() {
    let err = TokenPattern::new("T_IDENT", "T_IDENT").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"pattern producing `T_IDENT` is malformed: folds a lone `T_IDENT` into its own key"
    );

    let err = SequencePattern::new("section", ["section"]).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { produces, .. } if produces == "section"));

    assert!(SequencePattern::new("sum", ["sum", "+", "T_NUMBER"]).is_ok());
    assert_eq!(TokenPattern::new("x", "name").unwrap().wrapped_key(), Some("x"));
    assert_eq!(
        SequencePattern::new("sum", ["sum", "+", "T_NUMBER"]).unwrap().wrapped_key(),
        None
    );
}

#[test]
fn delimited_folds_innermost_pair() {
    let p = DelimitedPattern::new("group", "(", ")").unwrap();
    let seq = nodes("((a) b)");

    assert_eq!(p.node_keys(), ["("]);
    assert!(!p.matches(&seq, 0));
    assert!(p.matches(&seq, 1));
    assert_eq!(p.mutate(&seq, 1), fold(3, "group", 2));
}

#[test]
fn delimited_unclosed_declines() {
    let p = DelimitedPattern::new("group", "(", ")").unwrap();
    assert!(!p.matches(&nodes("(a b"), 0));
}

#[test]
fn delimited_same_open_and_close() {
    let p = DelimitedPattern::new("bars", ",", ",").unwrap();
    let seq = nodes(",a,b,");

    assert!(p.matches(&seq, 0));
    assert_eq!(p.mutate(&seq, 0), fold(3, "bars", 1));
}

#[test]
fn repeat_with_separator() {
    let p = RepeatPattern::new("list", "T_IDENT", Some(","), 2).unwrap();
    let seq = nodes("a, b ,c,");

    assert!(p.matches(&seq, 0));
    // Trailing separator is left out.
    assert_eq!(p.mutate(&seq, 0), fold(7, "list", 1));
}

#[test]
fn repeat_honors_minimum() {
    let p = RepeatPattern::new("list", "T_IDENT", Some(","), 2).unwrap();
    assert!(!p.matches(&nodes("a;b"), 0));
    assert!(!p.matches(&nodes("a,"), 0));
}

#[test]
fn repeat_without_separator() {
    let p = RepeatPattern::new("words", "T_IDENT", None, 1).unwrap();
    let seq = nodes("a b c 1");

    assert!(p.matches(&seq, 0));
    assert_eq!(p.mutate(&seq, 0), fold(5, "words", 1));
}

#[test]
fn repeat_matches_only_where_run_starts() {
    let p = RepeatPattern::new("list", "T_IDENT", Some(","), 1).unwrap();
    let seq = nodes("a, b c");

    assert!(p.matches(&seq, 0));
    assert!(!p.matches(&seq, 3));
    // `c` follows `b` without a separator, so it starts a run of its own.
    assert!(p.matches(&seq, 5));
}

#[test]
fn repeat_rejects_zero_minimum() {
    let err = RepeatPattern::new("list", "T_IDENT", None, 0).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
}

#[test]
#[should_panic(expected = "broken pattern invariant")]
fn mutate_without_match_panics() {
    let p = SequencePattern::new("sum", ["T_NUMBER", "+", "T_NUMBER"]).unwrap();
    p.mutate(&nodes("a"), 0);
}

#[test]
fn stages_put_lists_before_enclosures() {
    let token = TokenPattern::new("T_IDENT", "identifier").unwrap();
    let seq = SequencePattern::new("sum", ["T_NUMBER", "+", "T_NUMBER"]).unwrap();
    let repeat = RepeatPattern::new("list", "T_IDENT", None, 1).unwrap();
    let delimited = DelimitedPattern::new("group", "(", ")").unwrap();

    assert_eq!(token.stage(), 0);
    assert_eq!(seq.stage(), 0);
    assert_eq!(repeat.stage(), 1);
    assert_eq!(delimited.stage(), 2);
}
