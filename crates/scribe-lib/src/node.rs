//! Syntax tree nodes.
//!
//! A node is either a [`Token`] (leaf, produced by the lexer) or a [`Composite`]
//! (produced by a reduction pattern). Both carry the exact source slice they cover,
//! a byte span for slicing and a [`Position`] for mapping back onto editor rows and
//! columns. Nodes are never mutated after construction; every parse builds new ones.

use std::sync::Arc;

use rowan::TextRange;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Location of a node's first character. All fields are 0-based.
///
/// `offset` counts characters (not bytes) from the start of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: u32,
    pub col: u32,
    pub offset: u32,
}

impl Position {
    pub fn new(row: u32, col: u32, offset: u32) -> Self {
        Self { row, col, offset }
    }

    /// Position of the character following `text` when `text` starts here.
    ///
    /// A `\n` moves to column 0 of the next row; every other character,
    /// including `\r`, occupies one column.
    pub fn advance(self, text: &str) -> Self {
        let mut next = self;
        for c in text.chars() {
            next.offset += 1;
            if c == '\n' {
                next.row += 1;
                next.col = 0;
            } else {
                next.col += 1;
            }
        }
        next
    }
}

/// Discriminates leaves from reduced nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Token,
    Composite,
}

/// Leaf node: one lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    name: Arc<str>,
    code: &'src str,
    position: Position,
    span: TextRange,
    trivia: bool,
}

impl<'src> Token<'src> {
    pub fn new(name: Arc<str>, code: &'src str, position: Position, span: TextRange) -> Self {
        Self {
            name,
            code,
            position,
            span,
            trivia: false,
        }
    }

    /// Marks this token as trivia: patterns look past it between elements.
    pub fn into_trivia(self) -> Self {
        Self {
            trivia: true,
            ..self
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.trivia
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &'src str {
        self.code
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn span(&self) -> TextRange {
        self.span
    }
}

/// Reduced node covering a contiguous run of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite<'src> {
    key: Arc<str>,
    code: &'src str,
    position: Position,
    span: TextRange,
    children: Vec<Node<'src>>,
}

impl<'src> Composite<'src> {
    /// Folds `children` into one node keyed `key`.
    ///
    /// Children must be non-empty and contiguous in `source`.
    pub fn new(key: Arc<str>, children: Vec<Node<'src>>, source: &'src str) -> Self {
        let (first, last) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => panic!("broken pattern invariant: composite `{key}` must have children"),
        };
        for pair in children.windows(2) {
            assert_eq!(
                pair[0].span().end(),
                pair[1].span().start(),
                "broken pattern invariant: children of `{key}` are not contiguous",
            );
        }
        let span = TextRange::new(first.span().start(), last.span().end());
        Self {
            position: first.position(),
            code: &source[std::ops::Range::<usize>::from(span)],
            key,
            span,
            children,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn code(&self) -> &'src str {
        self.code
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn span(&self) -> TextRange {
        self.span
    }

    pub fn children(&self) -> &[Node<'src>] {
        &self.children
    }
}

impl Drop for Composite<'_> {
    /// Unlinks descendants onto a heap stack, so dropping a deep tree never
    /// recurses once per level.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(node) = stack.pop() {
            if let Node::Composite(mut c) = node {
                stack.append(&mut c.children);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'src> {
    Token(Token<'src>),
    Composite(Composite<'src>),
}

impl<'src> Node<'src> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Token(_) => NodeKind::Token,
            Node::Composite(_) => NodeKind::Composite,
        }
    }

    /// Key used to dispatch reduction patterns: the token name for tokens,
    /// the producing pattern's output key for composites.
    pub fn grammar_key(&self) -> &str {
        match self {
            Node::Token(t) => t.name(),
            Node::Composite(c) => c.key(),
        }
    }

    pub fn code(&self) -> &'src str {
        match self {
            Node::Token(t) => t.code(),
            Node::Composite(c) => c.code(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Node::Token(t) => t.position(),
            Node::Composite(c) => c.position(),
        }
    }

    pub fn span(&self) -> TextRange {
        match self {
            Node::Token(t) => t.span(),
            Node::Composite(c) => c.span(),
        }
    }

    /// Children of a composite; empty for tokens.
    pub fn children(&self) -> &[Node<'src>] {
        match self {
            Node::Token(_) => &[],
            Node::Composite(c) => c.children(),
        }
    }

    pub fn is_token(&self) -> bool {
        self.kind() == NodeKind::Token
    }

    /// Whitespace, comments and other tokens the lexer marked as trivia.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Node::Token(t) if t.is_trivia())
    }

    pub fn as_token(&self) -> Option<&Token<'src>> {
        match self {
            Node::Token(t) => Some(t),
            Node::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite<'src>> {
        match self {
            Node::Token(_) => None,
            Node::Composite(c) => Some(c),
        }
    }

    /// Same node under a different grammar key. Span and children are kept.
    pub fn with_key(self, key: Arc<str>) -> Self {
        match self {
            Node::Token(t) => Node::Token(Token { name: key, ..t }),
            Node::Composite(mut c) => {
                c.key = key;
                Node::Composite(c)
            }
        }
    }

    /// Whether this node is a token whose name or text equals `element`,
    /// or any node whose grammar key equals `element`.
    pub fn is(&self, element: &str) -> bool {
        self.grammar_key() == element || (self.is_token() && self.code() == element)
    }

    /// Leaf tokens below (or at) this node, left to right.
    pub fn leaves(&self) -> Leaves<'_, 'src> {
        Leaves::new(std::slice::from_ref(self))
    }
}

impl<'src> From<Token<'src>> for Node<'src> {
    fn from(token: Token<'src>) -> Self {
        Node::Token(token)
    }
}

impl<'src> From<Composite<'src>> for Node<'src> {
    fn from(composite: Composite<'src>) -> Self {
        Node::Composite(composite)
    }
}

/// Depth-first iterator over the tokens of a node sequence.
pub struct Leaves<'a, 'src> {
    stack: Vec<std::slice::Iter<'a, Node<'src>>>,
}

impl<'a, 'src> Leaves<'a, 'src> {
    pub(crate) fn new(nodes: &'a [Node<'src>]) -> Self {
        Self {
            stack: vec![nodes.iter()],
        }
    }
}

impl<'a, 'src> Iterator for Leaves<'a, 'src> {
    type Item = &'a Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(Node::Token(t)) => return Some(t),
                Some(Node::Composite(c)) => self.stack.push(c.children.iter()),
            }
        }
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let position = self.position();
        let span = self.span();
        let mut s = serializer.serialize_struct("Node", 9)?;
        s.serialize_field(
            "kind",
            match self.kind() {
                NodeKind::Token => "token",
                NodeKind::Composite => "composite",
            },
        )?;
        s.serialize_field("key", self.grammar_key())?;
        s.serialize_field("row", &position.row)?;
        s.serialize_field("col", &position.col)?;
        s.serialize_field("offset", &position.offset)?;
        s.serialize_field("start", &u32::from(span.start()))?;
        s.serialize_field("end", &u32::from(span.end()))?;
        match self {
            Node::Token(t) => {
                s.serialize_field("code", t.code())?;
                if t.is_trivia() {
                    s.serialize_field("trivia", &true)?;
                }
            }
            Node::Composite(c) => s.serialize_field("children", c.children())?,
        }
        s.end()
    }
}
