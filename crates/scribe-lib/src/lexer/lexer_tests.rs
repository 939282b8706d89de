use indoc::indoc;

use super::*;

fn sql_matchers() -> Vec<TokenMatcher> {
    vec![
        TokenMatcher::regex(r"\s+", "T_WS").unwrap(),
        TokenMatcher::keywords(["select", "from", "where"]).unwrap(),
        TokenMatcher::literal('\'', "T_STRING").unwrap(),
        TokenMatcher::regex(r"\d+", "T_NUMBER").unwrap(),
        TokenMatcher::regex(r"[A-Za-z_][A-Za-z0-9_]*", "T_IDENT").unwrap(),
        TokenMatcher::direct(["==", "=", ",", "(", ")", "*"], "T_PUNCT").unwrap(),
    ]
}

fn dump(lexed: &Lexed<'_>) -> String {
    lexed
        .tokens
        .iter()
        .map(|t| {
            let p = t.position();
            format!("{}:{}@{} {} {:?}", p.row, p.col, p.offset, t.name(), t.code())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn tokenizes_statement() {
    let lexed = lex("SELECT a, 'x' FROM t", &sql_matchers());

    insta::assert_snapshot!(dump(&lexed), @r#"
    0:0@0 T_SELECT "SELECT"
    0:6@6 T_WS " "
    0:7@7 T_IDENT "a"
    0:8@8 T_PUNCT ","
    0:9@9 T_WS " "
    0:10@10 T_STRING "'x'"
    0:13@13 T_WS " "
    0:14@14 T_FROM "FROM"
    0:18@18 T_WS " "
    0:19@19 T_IDENT "t"
    "#);
    assert!(lexed.diagnostics.is_empty());
}

#[test]
fn matcher_priority_follows_configuration_order() {
    // Keywords come before identifiers, so `from` is a keyword but `fromage` is not.
    let lexed = lex("from fromage", &sql_matchers());
    let names: Vec<_> = lexed.tokens.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["T_FROM", "T_WS", "T_IDENT"]);
}

#[test]
fn keyword_without_boundary_falls_through() {
    let matchers = vec![
        TokenMatcher::keywords(["SELECT", "FROM"]).unwrap(),
        TokenMatcher::regex(r"\w+", "T_IDENT").unwrap(),
    ];
    let lexed = lex("SELECTFROM", &matchers);

    assert_eq!(lexed.tokens.len(), 1);
    assert_eq!(lexed.tokens[0].name(), "T_IDENT");
    assert_eq!(lexed.tokens[0].code(), "SELECTFROM");
}

#[test]
fn positions_track_rows() {
    let source = indoc! {"
        select
          a
        from t
    "};
    let lexed = lex(source, &sql_matchers());

    insta::assert_snapshot!(dump(&lexed), @r#"
    0:0@0 T_SELECT "select"
    0:6@6 T_WS "\n  "
    1:2@9 T_IDENT "a"
    1:3@10 T_WS "\n"
    2:0@11 T_FROM "from"
    2:4@15 T_WS " "
    2:5@16 T_IDENT "t"
    2:6@17 T_WS "\n"
    "#);
}

#[test]
fn offsets_count_characters() {
    let matchers = vec![
        TokenMatcher::literal('\'', "T_STRING").unwrap(),
        TokenMatcher::regex(r"\s+", "T_WS").unwrap(),
        TokenMatcher::regex(r"\w+", "T_IDENT").unwrap(),
    ];
    let lexed = lex("'héllo' x", &matchers);

    let x = &lexed.tokens[2];
    assert_eq!(x.code(), "x");
    assert_eq!(x.position(), Position::new(0, 8, 8));
    assert_eq!(u32::from(x.span().start()), 9);
}

#[test]
fn unrecognized_characters_fall_back() {
    let lexed = lex("a $$ b", &sql_matchers());

    insta::assert_snapshot!(dump(&lexed), @r#"
    0:0@0 T_IDENT "a"
    0:1@1 T_WS " "
    0:2@2 T_UNRECOGNIZED "$"
    0:3@3 T_UNRECOGNIZED "$"
    0:4@4 T_WS " "
    0:5@5 T_IDENT "b"
    "#);

    assert_eq!(lexed.diagnostics.len(), 1);
    let diag = lexed.diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::UnrecognizedCharacter);
    assert_eq!(diag.range(), TextRange::new(2.into(), 4.into()));
    insta::assert_snapshot!(diag.message(), @r#"unrecognized character: "$$""#);
    assert_eq!(diag.label(), Some("kept as 2 T_UNRECOGNIZED tokens"));
}

#[test]
fn separate_unrecognized_runs_report_separately() {
    let lexed = lex("$a@", &sql_matchers());

    let ranges: Vec<_> = lexed.diagnostics.iter().map(|d| d.range()).collect();
    assert_eq!(
        ranges,
        [
            TextRange::new(0.into(), 1.into()),
            TextRange::new(2.into(), 3.into()),
        ]
    );
}

#[test]
fn unrecognized_multibyte_character() {
    let lexed = lex("é", &[]);

    assert_eq!(lexed.tokens.len(), 1);
    assert_eq!(lexed.tokens[0].code(), "é");
    assert_eq!(lexed.tokens[0].name(), UNRECOGNIZED);
    assert_eq!(lexed.tokens[0].span(), TextRange::new(0.into(), 2.into()));
    let diag = lexed.diagnostics.iter().next().unwrap();
    assert_eq!(diag.label(), Some("kept as one T_UNRECOGNIZED token"));
}

#[test]
fn no_progress_claims_are_ignored() {
    let matchers = vec![
        TokenMatcher::regex(r"x*", "T_X").unwrap(),
        TokenMatcher::regex(r"\w", "T_CHAR").unwrap(),
    ];
    let lexed = lex("ab", &matchers);

    let names: Vec<_> = lexed.tokens.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["T_CHAR", "T_CHAR"]);
}

#[test]
fn empty_input_yields_no_tokens() {
    let lexed = lex("", &sql_matchers());
    assert!(lexed.tokens.is_empty());
    assert!(lexed.diagnostics.is_empty());
}

#[test]
fn round_trip_reproduces_input() {
    let inputs = [
        "select * from t where a == 'b",
        "  \n\n\t€ 12ab'",
        "((()))",
        "select\r\nfrom",
    ];
    for input in inputs {
        let lexed = lex(input, &sql_matchers());
        let joined: String = lexed.tokens.iter().map(|t| t.code()).collect();
        assert_eq!(joined, input);

        for pair in lexed.tokens.windows(2) {
            assert_eq!(pair[0].span().end(), pair[1].span().start());
            assert_eq!(
                pair[0].position().advance(pair[0].code()),
                pair[1].position()
            );
        }
    }
}

#[test]
fn lexing_is_deterministic() {
    let lexer = Lexer::new(sql_matchers());
    let source = "select a, b from t where c = 'd' $";
    assert_eq!(lexer.lex(source).tokens, lexer.lex(source).tokens);
    assert_eq!(lexer.lex(source).diagnostics, lexer.lex(source).diagnostics);
}

#[test]
fn lexer_marks_trivia() {
    let lexer = Lexer::new(sql_matchers()).with_trivia(["T_WS"]);
    let lexed = lexer.lex("select a");

    let trivia: Vec<_> = lexed.tokens.iter().map(|t| t.is_trivia()).collect();
    assert_eq!(trivia, [false, true, false]);
    assert!(lex("select a", &sql_matchers()).tokens.iter().all(|t| !t.is_trivia()));
}
