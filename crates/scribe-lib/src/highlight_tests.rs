use rowan::{TextRange, TextSize};
use scribe_core::Colors;

use crate::highlight::{StyleMap, StyledSpan, SyntaxHighlighter};
use crate::lexer::TokenMatcher;
use crate::reducer::{SequencePattern, TokenPattern};
use crate::{Language, LanguageBuilder};

fn base() -> LanguageBuilder {
    Language::builder("assign")
        .matcher(TokenMatcher::regex(r"\s+", "T_WS").unwrap())
        .matcher(TokenMatcher::regex(r"[a-z]+", "T_IDENT").unwrap())
        .matcher(TokenMatcher::regex(r"\d+", "T_NUMBER").unwrap())
        .matcher(TokenMatcher::direct(["=", ";"], "T_PUNCT").unwrap())
        .trivia(["T_WS"])
        .pattern(TokenPattern::new("T_IDENT", "name").unwrap())
        .pattern(SequencePattern::new("assignment", ["name", "=", "T_NUMBER", ";"]).unwrap())
        .style("name", "name")
        .style("T_NUMBER", "number")
}

fn span(start: u32, end: u32, class: &str) -> StyledSpan {
    StyledSpan {
        range: TextRange::new(start.into(), end.into()),
        class: class.to_owned(),
    }
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn styles_nodes_by_grammar_key() {
    let lang = base().build().unwrap();
    let parse = lang.parse("a = 1;");
    let mut map = StyleMap::new(&lang);
    map.update_syntax_tree(&parse.tree);

    assert_eq!(map.spans(), [span(0, 1, "name"), span(4, 5, "number")]);
}

#[test]
fn outermost_styled_node_wins() {
    let lang = base().style("assignment", "keyword").build().unwrap();
    let parse = lang.parse("a = 1;");
    let mut map = StyleMap::new(&lang);
    map.update_syntax_tree(&parse.tree);

    assert_eq!(map.spans(), [span(0, 6, "keyword")]);
}

#[test]
fn style_at_offset() {
    let lang = base().build().unwrap();
    let parse = lang.parse("a = 1;");
    let mut map = StyleMap::new(&lang);
    map.update_syntax_tree(&parse.tree);

    assert_eq!(map.style_at(TextSize::from(0)), Some("name"));
    assert_eq!(map.style_at(TextSize::from(2)), None);
    assert_eq!(map.style_at(TextSize::from(4)), Some("number"));
    assert_eq!(map.style_at(TextSize::from(99)), None);
}

#[test]
fn selection_finds_every_occurrence() {
    let lang = base().build().unwrap();
    let parse = lang.parse("aa = 1; a = 2;");
    let mut map = StyleMap::new(&lang);
    map.update_syntax_tree(&parse.tree);

    map.update_selection("a");
    assert_eq!(map.selections(), [range(0, 1), range(1, 2), range(8, 9)]);

    map.update_selection("aa");
    assert_eq!(map.selections(), [range(0, 2)]);
}

#[test]
fn blank_selection_clears() {
    let lang = base().build().unwrap();
    let parse = lang.parse("a = 1;");
    let mut map = StyleMap::new(&lang);
    map.update_syntax_tree(&parse.tree);

    map.update_selection("a");
    assert_eq!(map.selections().len(), 1);
    map.update_selection("  \n");
    assert!(map.selections().is_empty());

    map.update_selection("a");
    map.update_selection("");
    assert!(map.selections().is_empty());
}

#[test]
fn new_tree_resets_selection() {
    let lang = base().build().unwrap();
    let mut map = StyleMap::new(&lang);
    map.update_syntax_tree(&lang.parse("a = 1;").tree);
    map.update_selection("a");

    map.update_syntax_tree(&lang.parse("b = 2;").tree);
    assert!(map.selections().is_empty());
    assert_eq!(map.spans(), [span(0, 1, "name"), span(4, 5, "number")]);
}

#[test]
fn render_colors_styled_spans() {
    let lang = base().build().unwrap();
    let parse = lang.parse("a = 1;");
    let mut map = StyleMap::new(&lang);
    map.update_syntax_tree(&parse.tree);

    assert_eq!(map.render(Colors::OFF), "a = 1;");

    let c = Colors::ON;
    let expected = format!("{}a{} = {}1{};", c.cyan, c.reset, c.yellow, c.reset);
    assert_eq!(map.render(c), expected);
}

#[test]
fn unknown_class_renders_plain() {
    let mut map = StyleMap::from_styles([("T_NUMBER", "sparkly")]);
    let lang = base().build().unwrap();
    map.update_syntax_tree(&lang.parse("a = 1;").tree);

    assert_eq!(map.spans(), [span(4, 5, "sparkly")]);
    assert_eq!(map.render(Colors::ON), "a = 1;");
}
