//! Lexer driving an ordered list of [`TokenMatcher`]s over the source text.
//!
//! Tokens carry their exact source slice, byte span and row/column/offset position.
//! The token sequence always covers the input completely.
//!
//! ## Unrecognized input
//!
//! When no matcher claims the current prefix, a single character is emitted as an
//! [`UNRECOGNIZED`] token and lexing continues after it. Consecutive unrecognized
//! characters share one `UnrecognizedCharacter` diagnostic.
//!
//! ## Trivia
//!
//! A [`Lexer`] can name token kinds (whitespace, comments) as trivia. Trivia tokens
//! stay in the sequence so the tree still covers every character, but reduction
//! patterns look past them.

mod matcher;

#[cfg(test)]
mod lexer_tests;

use std::sync::{Arc, LazyLock};

use indexmap::IndexSet;
use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::node::{Position, Token};

pub use matcher::{
    CaptureGroup, DirectMatcher, KeywordMatcher, LiteralMatcher, RegexMatcher, TokenDef,
    TokenMatcher,
};

/// Token name reserved for characters no matcher claims.
pub const UNRECOGNIZED: &str = "T_UNRECOGNIZED";

static UNRECOGNIZED_NAME: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from(UNRECOGNIZED));

/// Lexer output: the complete token sequence plus soft diagnostics.
#[derive(Debug, Clone)]
pub struct Lexed<'src> {
    pub tokens: Vec<Token<'src>>,
    pub diagnostics: Diagnostics,
}

/// Ordered matcher list. Earlier matchers take priority.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    matchers: Vec<TokenMatcher>,
    trivia: IndexSet<String>,
}

impl Lexer {
    pub fn new(matchers: Vec<TokenMatcher>) -> Self {
        Self {
            matchers,
            trivia: IndexSet::new(),
        }
    }

    /// Token names to mark as trivia.
    pub fn with_trivia<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trivia.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn matchers(&self) -> &[TokenMatcher] {
        &self.matchers
    }

    pub fn trivia(&self) -> impl Iterator<Item = &str> {
        self.trivia.iter().map(String::as_str)
    }

    pub fn lex<'src>(&self, source: &'src str) -> Lexed<'src> {
        let mut lexed = lex(source, &self.matchers);
        if !self.trivia.is_empty() {
            lexed.tokens = lexed
                .tokens
                .into_iter()
                .map(|t| {
                    if self.trivia.contains(t.name()) {
                        t.into_trivia()
                    } else {
                        t
                    }
                })
                .collect();
        }
        lexed
    }
}

/// Tokenizes `source` with `matchers`, tried in order at every position.
pub fn lex<'src>(source: &'src str, matchers: &[TokenMatcher]) -> Lexed<'src> {
    let mut tokens = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let mut unrecognized: Option<TextRange> = None;

    let mut rest = source;
    let mut position = Position::default();
    let mut start = TextSize::from(0);

    while let Some(first) = rest.chars().next() {
        let token = match claim(rest, matchers) {
            Some(def) => {
                if let Some(range) = unrecognized.take() {
                    report_unrecognized(&mut diagnostics, source, range);
                }
                def.to_token(position, start)
            }
            None => {
                let code = &rest[..first.len_utf8()];
                let def = TokenDef::new(Arc::clone(&UNRECOGNIZED_NAME), code);
                let token = def.to_token(position, start);
                unrecognized = Some(match unrecognized {
                    Some(range) => range.cover(token.span()),
                    None => token.span(),
                });
                token
            }
        };

        tracing::trace!(
            name = token.name(),
            code = token.code(),
            row = token.position().row,
            col = token.position().col,
            "token"
        );

        let len = token.code().len();
        position = position.advance(token.code());
        start += TextSize::of(token.code());
        rest = &rest[len..];
        tokens.push(token);
    }

    if let Some(range) = unrecognized {
        report_unrecognized(&mut diagnostics, source, range);
    }

    Lexed {
        tokens,
        diagnostics,
    }
}

/// First non-empty claim among `matchers`.
fn claim<'t>(text: &'t str, matchers: &[TokenMatcher]) -> Option<TokenDef<'t>> {
    matchers.iter().find_map(|m| match m.lex_next(text) {
        (_, Some(def)) if !def.code.is_empty() => Some(def),
        (_, Some(def)) => {
            tracing::warn!(token = %def.token_name, "matcher claimed an empty token, ignoring");
            None
        }
        (_, None) => None,
    })
}

fn report_unrecognized(diagnostics: &mut Diagnostics, source: &str, range: TextRange) {
    let text = &source[std::ops::Range::<usize>::from(range)];
    let label = match text.chars().count() {
        1 => format!("kept as one {UNRECOGNIZED} token"),
        n => format!("kept as {n} {UNRECOGNIZED} tokens"),
    };
    diagnostics
        .report(DiagnosticKind::UnrecognizedCharacter, range)
        .message(format!("{text:?}"))
        .label(label)
        .emit();
}
