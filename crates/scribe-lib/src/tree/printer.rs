use std::fmt::Write;

use scribe_core::Colors;

use crate::node::Node;

use super::SyntaxTree;

/// Indented dump of a [`SyntaxTree`], one node per line.
///
/// ```text
/// sum
///   T_NUMBER "1"
///   T_PLUS "+"
///   T_NUMBER "2"
/// ```
pub struct TreePrinter<'t, 'src> {
    tree: &'t SyntaxTree<'src>,
    spans: bool,
    positions: bool,
    trivia: bool,
    colors: Colors,
}

impl<'t, 'src> TreePrinter<'t, 'src> {
    pub fn new(tree: &'t SyntaxTree<'src>) -> Self {
        Self {
            tree,
            spans: false,
            positions: false,
            trivia: false,
            colors: Colors::OFF,
        }
    }

    /// Appends the byte span, e.g. `[0..5]`.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    /// Appends the start position as `row:col`.
    pub fn with_positions(mut self, value: bool) -> Self {
        self.positions = value;
        self
    }

    /// Includes trivia tokens, which are hidden by default.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        for (depth, node) in self.tree.descendants() {
            if node.is_trivia() && !self.trivia {
                continue;
            }
            self.format_node(node, depth, w)?;
        }
        Ok(())
    }

    fn format_node(&self, node: &Node<'_>, depth: usize, w: &mut impl Write) -> std::fmt::Result {
        let c = &self.colors;
        write!(w, "{}", "  ".repeat(depth))?;
        match node {
            Node::Composite(comp) => write!(w, "{}{}{}", c.blue, comp.key(), c.reset)?,
            Node::Token(tok) => write!(
                w,
                "{}{}{} {}{:?}{}",
                c.dim,
                tok.name(),
                c.reset,
                c.green,
                tok.code(),
                c.reset
            )?,
        }
        if self.positions {
            let p = node.position();
            write!(w, " {}:{}", p.row, p.col)?;
        }
        if self.spans {
            let span = node.span();
            write!(
                w,
                " {}[{}..{}]{}",
                c.dim,
                u32::from(span.start()),
                u32::from(span.end()),
                c.reset
            )?;
        }
        writeln!(w)
    }
}
