use std::sync::Arc;

use scribe_lib::diagnostics::DiagnosticKind;

use super::*;

#[test]
fn all_returns_enabled_langs() {
    let langs = all();
    assert!(!langs.is_empty());
    for lang in &langs {
        assert!(!lang.name().is_empty());
        assert!(!lang.extensions().is_empty());
    }
}

#[test]
fn lang_is_built_once() {
    let names: Vec<_> = all().iter().map(|l| l.name().to_owned()).collect();
    for name in names {
        let a = from_name(&name).unwrap();
        let b = from_name(&name).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}

#[test]
#[cfg(feature = "lang-sql")]
fn lang_from_name() {
    assert_eq!(from_name("sql").unwrap().name(), "sql");
    assert_eq!(from_name("SQL").unwrap().name(), "sql");
    assert!(from_name("cobol").is_none());
}

#[test]
#[cfg(feature = "lang-ini")]
fn lang_from_extension() {
    assert_eq!(from_ext("ini").unwrap().name(), "ini");
    assert_eq!(from_ext("CFG").unwrap().name(), "ini");
    assert_eq!(from_name("conf").unwrap().name(), "ini");
    assert!(from_ext("exe").is_none());
}

#[test]
fn bundled_grammars_preserve_text() {
    let samples = [
        "select a, b from t where x = 1;",
        "{\"a\": [1, 2.5e3, \"x\\\"y\"], \"b\": null}",
        "; comment\n[main]\nkey = some value\n",
        "garbage @@@ ``` \u{1F600}",
    ];
    for lang in all() {
        for sample in samples {
            let parse = lang.parse(sample);
            assert_eq!(parse.tree.text(), sample, "{} on {sample:?}", lang.name());
        }
    }
}

#[test]
#[cfg(feature = "lang-sql")]
fn sql_select_star() {
    let parse = sql().parse("select * from t;");

    insta::assert_snapshot!(parse.tree.printer().dump(), @r#"
    script
      statement
        select
          T_SELECT "select"
          T_STAR "*"
          T_FROM "from"
          identifier
            T_IDENT "t"
        T_PUNCT ";"
    "#);
    assert!(parse.diagnostics.is_empty());
}

#[test]
#[cfg(feature = "lang-sql")]
fn sql_select_with_conditions() {
    let source = "SELECT a, b FROM t -- filtered\nWHERE x = 1 AND y = 'z';";
    let parse = sql().parse(source);

    insta::assert_snapshot!(parse.tree.printer().dump(), @r#"
    script
      statement
        select
          select
            T_SELECT "SELECT"
            column_list
              identifier
                T_IDENT "a"
              T_PUNCT ","
              identifier
                T_IDENT "b"
            T_FROM "FROM"
            identifier
              T_IDENT "t"
          where_clause
            T_WHERE "WHERE"
            condition
              comparison
                identifier
                  T_IDENT "x"
                T_COMPARE "="
                value
                  T_NUMBER "1"
              T_AND "AND"
              comparison
                identifier
                  T_IDENT "y"
                T_COMPARE "="
                value
                  T_STRING "'z'"
        T_PUNCT ";"
    "#);
    assert!(parse.diagnostics.is_empty());
}

#[test]
#[cfg(feature = "lang-sql")]
fn sql_reports_unrecognized_input() {
    let parse = sql().parse("select @ from t");
    assert!(
        parse
            .diagnostics
            .contains(DiagnosticKind::UnrecognizedCharacter)
    );
    assert_eq!(parse.tree.root().map(|n| n.grammar_key()), Some("script"));
}

#[test]
#[cfg(feature = "lang-sql")]
fn sql_leftover_keywords_are_unreduced() {
    let parse = sql().parse("select from where ;;");

    assert!(parse.diagnostics.contains(DiagnosticKind::UnreducedSequence));
    assert!(!parse.diagnostics.has_errors());
    assert_eq!(parse.tree.root().map(|n| n.grammar_key()), Some("script"));
}

#[test]
#[cfg(feature = "lang-sql")]
fn sql_several_statements_reduce_cleanly() {
    let parse = sql().parse("select a from t;\nselect * from u;");

    let statements = parse
        .tree
        .root()
        .unwrap()
        .children()
        .iter()
        .filter(|n| !n.is_trivia())
        .count();
    assert_eq!(statements, 2);
    assert!(parse.diagnostics.is_empty());
}

#[test]
#[cfg(feature = "lang-json")]
fn json_stray_brackets_are_unreduced() {
    let parse = json().parse("{\"a\" 1} ]]");

    let diag = parse
        .diagnostics
        .iter()
        .find(|d| d.kind() == DiagnosticKind::UnreducedSequence)
        .unwrap();
    insta::assert_snapshot!(
        diag.message(),
        @"input did not reduce to a single node: 3 top-level nodes, 2 left as tokens"
    );
}

#[test]
#[cfg(feature = "lang-json")]
fn json_nested_document() {
    let parse = json().parse(r#"{"a": [1, true]}"#);

    insta::assert_snapshot!(parse.tree.printer().dump(), @r#"
    document
      value
        object
          T_PUNCT "{"
          members
            member
              value
                T_STRING "\"a\""
              T_PUNCT ":"
              value
                array
                  T_PUNCT "["
                  elements
                    value
                      T_NUMBER "1"
                    T_PUNCT ","
                    value
                      T_CONSTANT "true"
                  T_PUNCT "]"
          T_PUNCT "}"
    "#);
}

#[test]
#[cfg(feature = "lang-json")]
fn json_members_after_nested_values() {
    let parse = json().parse(r#"{"a": {"b": 1}, "c": [2, [3]], "d": {}}"#);
    let tree = &parse.tree;

    let object = tree.root().unwrap().children()[0].children()[0].clone();
    assert_eq!(object.grammar_key(), "object");

    let members: Vec<_> = object
        .children()
        .iter()
        .filter(|n| !n.is_trivia())
        .map(|n| n.grammar_key())
        .collect();
    assert_eq!(members, ["T_PUNCT", "members", "T_PUNCT"]);
    assert!(parse.diagnostics.is_empty());
}

#[test]
#[cfg(feature = "lang-ini")]
fn ini_sections() {
    let parse = ini().parse("[main]\nname = demo\nport = 80\n\n[empty]\n");

    insta::assert_snapshot!(parse.tree.printer().dump(), @r#"
    document
      section
        header
          T_PUNCT "["
          T_TEXT "main"
          T_PUNCT "]"
        properties
          property
            T_TEXT "name"
            T_PUNCT "="
            T_TEXT "demo"
          property
            T_TEXT "port"
            T_PUNCT "="
            T_TEXT "80"
      section
        header
          T_PUNCT "["
          T_TEXT "empty"
          T_PUNCT "]"
    "#);
}

#[test]
#[cfg(feature = "lang-ini")]
fn ini_styles_headers_as_a_whole() {
    let lang = ini();
    assert_eq!(lang.style("header"), Some("type"));
    assert_eq!(lang.style("T_TEXT"), None);
}
