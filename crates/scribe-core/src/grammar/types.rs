//! Language definition types.

use serde::{Deserialize, Serialize};

/// Complete language definition: lexing rules, reduction rules and styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Language name (e.g., "sql", "json").
    pub name: String,
    /// File extensions without the leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Key of the node wrapping the reduced sequence, if any.
    #[serde(default)]
    pub root: Option<String>,
    /// Token matchers, in priority order.
    pub matchers: Vec<Matcher>,
    /// Token names that reduction patterns look past (whitespace, comments).
    #[serde(default)]
    pub trivia: Vec<String>,
    /// Reduction rules, in registration order.
    #[serde(default)]
    pub patterns: Vec<Pattern>,
    /// Style class per grammar key, preserving definition order.
    #[serde(default)]
    pub styles: Vec<(String, String)>,
    /// Maximum number of mutations a single reduction may apply.
    #[serde(default)]
    pub exec_fuel: Option<u32>,
}

/// Token matcher variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Matcher {
    /// Case-insensitive keywords with a word-boundary check.
    Keywords(Vec<String>),
    /// Quoted run between two occurrences of `delimiter`.
    Literal { delimiter: char, token: String },
    /// Regex anchored at the current position.
    Regex {
        pattern: String,
        token: String,
        group: CaptureGroup,
    },
    /// Exact strings, first match in list order wins.
    Direct { texts: Vec<String>, token: String },
}

/// Which part of a regex match becomes the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureGroup {
    Index(usize),
    Name(String),
}

impl Default for CaptureGroup {
    fn default() -> Self {
        Self::Index(0)
    }
}

/// Reduction rule variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// Promote a single token (by name or text) into a node.
    Token { token: String, produces: String },
    /// Fold an exact run of elements.
    Sequence {
        produces: String,
        elements: Vec<String>,
    },
    /// Fold an innermost open/close pair and everything between.
    Delimited {
        produces: String,
        open: String,
        close: String,
    },
    /// Fold a run of elements, optionally separated.
    Repeat {
        produces: String,
        element: String,
        separator: Option<String>,
        min: usize,
    },
}

impl Pattern {
    /// Key of the node this rule manufactures.
    pub fn produces(&self) -> &str {
        match self {
            Self::Token { produces, .. }
            | Self::Sequence { produces, .. }
            | Self::Delimited { produces, .. }
            | Self::Repeat { produces, .. } => produces,
        }
    }
}
