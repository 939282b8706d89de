//! The result of a parse: top-level nodes over one source text.

mod printer;


use std::sync::Arc;

use rowan::TextSize;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::node::{Leaves, Node};

pub use printer::TreePrinter;

/// Owned by the caller; every parse produces a fresh one.
///
/// A fully reduced tree has a single top-level node. Partial grammars leave a
/// flat mix of tokens and composites, which is still a valid tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree<'src> {
    language: Arc<str>,
    source: &'src str,
    nodes: Vec<Node<'src>>,
}

impl<'src> SyntaxTree<'src> {
    pub fn new(language: Arc<str>, source: &'src str, nodes: Vec<Node<'src>>) -> Self {
        Self {
            language,
            source,
            nodes,
        }
    }

    /// Name of the language every node of this tree belongs to.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn nodes(&self) -> &[Node<'src>] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node<'src>> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The single top-level node, if reduction got that far.
    pub fn root(&self) -> Option<&Node<'src>> {
        match self.nodes.as_slice() {
            [root] => Some(root),
            _ => None,
        }
    }

    /// Whether at most one top-level node is not trivia.
    pub fn is_reduced(&self) -> bool {
        self.nodes.iter().filter(|n| !n.is_trivia()).count() <= 1
    }

    pub fn leaves(&self) -> Leaves<'_, 'src> {
        Leaves::new(&self.nodes)
    }

    /// Concatenated leaf text. Equals the source for every tree the lexer and
    /// reducer produce.
    pub fn text(&self) -> String {
        self.leaves().map(|t| t.code()).collect()
    }

    /// Every node in pre-order, with its depth (top-level nodes are at depth 0).
    pub fn descendants(&self) -> Descendants<'_, 'src> {
        Descendants {
            stack: vec![(0, self.nodes.iter())],
        }
    }

    /// Innermost nodes covering byte `offset`, outermost first.
    pub fn ancestors_at(&self, offset: TextSize) -> Vec<&Node<'src>> {
        let mut path = Vec::new();
        let mut level = self.nodes.as_slice();
        while let Some(node) = level.iter().find(|n| n.span().contains(offset)) {
            path.push(node);
            level = node.children();
        }
        path
    }

    pub fn printer(&self) -> TreePrinter<'_, 'src> {
        TreePrinter::new(self)
    }
}

/// Pre-order walk over a tree.
pub struct Descendants<'a, 'src> {
    stack: Vec<(usize, std::slice::Iter<'a, Node<'src>>)>,
}

impl<'a, 'src> Iterator for Descendants<'a, 'src> {
    type Item = (usize, &'a Node<'src>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, top) = self.stack.last_mut()?;
            let depth = *depth;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(node) => {
                    if let Node::Composite(c) = node {
                        self.stack.push((depth + 1, c.children().iter()));
                    }
                    return Some((depth, node));
                }
            }
        }
    }
}

impl Serialize for SyntaxTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SyntaxTree", 2)?;
        s.serialize_field("language", &*self.language)?;
        s.serialize_field("nodes", &self.nodes)?;
        s.end()
    }
}
