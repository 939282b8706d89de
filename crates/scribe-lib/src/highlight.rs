//! Consumers of parse results.
//!
//! The editor hands every fresh tree and every selection change to a
//! [`SyntaxHighlighter`]. [`StyleMap`] is the stock implementation: it resolves
//! grammar keys to style classes and finds the occurrences of the selected text.

use std::fmt::Write;

use indexmap::IndexMap;
use rowan::{TextRange, TextSize};
use scribe_core::Colors;

use crate::language::Language;
use crate::node::Node;
use crate::tree::SyntaxTree;

/// Receives parse results and selection changes from the editor.
pub trait SyntaxHighlighter {
    fn update_syntax_tree(&mut self, tree: &SyntaxTree<'_>);

    /// Called with the currently selected text; empty when nothing is selected.
    fn update_selection(&mut self, selection: &str);
}

/// A styled region of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub range: TextRange,
    pub class: String,
}

/// Style classes per byte range, plus selection occurrences.
///
/// When both a node and one of its descendants have a style, the outermost node
/// wins and covers the whole range.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    styles: IndexMap<String, String>,
    source: String,
    spans: Vec<StyledSpan>,
    selections: Vec<TextRange>,
}

impl StyleMap {
    pub fn new(language: &Language) -> Self {
        Self::from_styles(language.styles())
    }

    pub fn from_styles<'a>(styles: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            styles: styles
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            ..Self::default()
        }
    }

    /// Styled spans in source order. They never overlap.
    pub fn spans(&self) -> &[StyledSpan] {
        &self.spans
    }

    /// Occurrences of the current selection in source order.
    pub fn selections(&self) -> &[TextRange] {
        &self.selections
    }

    pub fn style_at(&self, offset: TextSize) -> Option<&str> {
        let idx = self
            .spans
            .partition_point(|s| s.range.end() <= offset);
        self.spans
            .get(idx)
            .filter(|s| s.range.contains(offset))
            .map(|s| s.class.as_str())
    }

    /// The last tree's source with ANSI colors per style class.
    pub fn render(&self, colors: Colors) -> String {
        let mut out = String::new();
        let mut cursor = 0;
        for span in &self.spans {
            let range = std::ops::Range::<usize>::from(span.range);
            out.push_str(&self.source[cursor..range.start]);
            let color = colors.for_style(&span.class);
            if color.is_empty() {
                out.push_str(&self.source[range.clone()]);
            } else {
                write!(out, "{color}{}{}", &self.source[range.clone()], colors.reset)
                    .expect("String write never fails");
            }
            cursor = range.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }

    fn collect(&mut self, nodes: &[Node<'_>]) {
        for node in nodes {
            match self.styles.get(node.grammar_key()) {
                Some(class) => self.spans.push(StyledSpan {
                    range: node.span(),
                    class: class.clone(),
                }),
                None => self.collect(node.children()),
            }
        }
    }
}

impl SyntaxHighlighter for StyleMap {
    fn update_syntax_tree(&mut self, tree: &SyntaxTree<'_>) {
        self.source = tree.source().to_owned();
        self.spans.clear();
        self.selections.clear();
        self.collect(tree.nodes());
        tracing::trace!(spans = self.spans.len(), "styles updated");
    }

    /// Whitespace-only selections clear the occurrences.
    fn update_selection(&mut self, selection: &str) {
        self.selections.clear();
        if selection.trim().is_empty() {
            return;
        }
        self.selections.extend(self.source.match_indices(selection).map(|(start, text)| {
            TextRange::at(
                TextSize::try_from(start).unwrap_or(TextSize::new(u32::MAX)),
                TextSize::of(text),
            )
        }));
    }
}
