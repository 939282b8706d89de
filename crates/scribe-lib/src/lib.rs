//! Scribe: pattern-based lexing and tree reduction for editor syntax highlighting.
//!
//! Text is split into tokens by an ordered list of matchers, then runs of tokens are
//! folded into composite nodes by reduction patterns until nothing changes. The whole
//! pipeline re-runs on every edit.
//!
//! # Example
//!
//! ```
//! use scribe_lib::Language;
//!
//! let grammar = r#"{
//!     "name": "calc",
//!     "root": "expr",
//!     "matchers": [
//!         { "type": "REGEX", "pattern": "\\d+", "token": "T_NUMBER" },
//!         { "type": "DIRECT", "texts": ["+"], "token": "T_PLUS" }
//!     ],
//!     "patterns": [
//!         { "type": "SEQUENCE", "produces": "sum", "elements": ["T_NUMBER", "+", "T_NUMBER"] }
//!     ]
//! }"#;
//!
//! let language = Language::from_json(grammar).expect("valid grammar");
//! let parse = language.parse("1+2");
//! assert_eq!(parse.tree.root().map(|n| n.grammar_key()), Some("expr"));
//! eprintln!("{}", parse.diagnostics.render("1+2"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod highlight;
pub mod language;
pub mod lexer;
pub mod node;
pub mod reducer;
pub mod tree;

#[cfg(test)]
mod highlight_tests;
#[cfg(test)]
mod language_tests;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use highlight::{StyleMap, SyntaxHighlighter};
pub use language::{Language, LanguageBuilder, Parse};
pub use lexer::{Lexer, TokenDef, TokenMatcher};
pub use node::{Composite, Node, NodeKind, Position, Token};
pub use reducer::{Mutation, NodePattern, Reducer};
pub use tree::SyntaxTree;

/// Errors raised while building a language. Parsing itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("token name must not be empty")]
    EmptyTokenName,

    #[error("keyword must not be empty")]
    EmptyKeyword,

    #[error("direct matcher `{token}` needs at least one non-empty text")]
    EmptyDirectText { token: String },

    #[error("invalid regex `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("regex `{pattern}` has no capture group `{group}`")]
    UnknownCaptureGroup { pattern: String, group: String },

    /// A pattern that declares no node keys could never be dispatched.
    #[error("pattern producing `{produces}` declares no node keys")]
    PatternWithoutKeys { produces: String },

    #[error("pattern producing `{produces}` is malformed: {reason}")]
    InvalidPattern { produces: String, reason: String },

    /// Single-node folds that feed each other, e.g. `a` into `b` and `b` into `a`.
    #[error("patterns rewrap their own output: {cycle}")]
    WrappingCycle { cycle: String },

    #[error(transparent)]
    Grammar(#[from] scribe_core::GrammarError),
}

/// Result type for language construction.
pub type Result<T> = std::result::Result<T, Error>;
