//! JSON deserialization for language definition files.
//!
//! Matchers and patterns are internally tagged with an upper-case `type` field.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{CaptureGroup, Grammar, Matcher, Pattern};

/// Error during grammar parsing.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
        }
    }
}

impl Grammar {
    /// Parse a language definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(GrammarError::Json)?;
        Ok(raw.into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrammar {
    name: String,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    root: Option<String>,
    matchers: Vec<RawMatcher>,
    #[serde(default)]
    trivia: Vec<String>,
    #[serde(default)]
    patterns: Vec<RawPattern>,
    #[serde(default)]
    styles: IndexMap<String, String>,
    #[serde(default)]
    exec_fuel: Option<u32>,
}

impl From<RawGrammar> for Grammar {
    fn from(raw: RawGrammar) -> Self {
        // IndexMap keeps the file's order, so styles listed first stay first.
        Self {
            name: raw.name,
            extensions: raw.extensions,
            root: raw.root,
            matchers: raw.matchers.into_iter().map(Into::into).collect(),
            trivia: raw.trivia,
            patterns: raw.patterns.into_iter().map(Into::into).collect(),
            styles: raw.styles.into_iter().collect(),
            exec_fuel: raw.exec_fuel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms)]
enum RawMatcher {
    KEYWORDS {
        keywords: Vec<String>,
    },
    LITERAL {
        delimiter: char,
        token: String,
    },
    REGEX {
        pattern: String,
        token: String,
        #[serde(default)]
        group: Option<RawGroup>,
    },
    DIRECT {
        texts: RawTexts,
        token: String,
    },
}

impl From<RawMatcher> for Matcher {
    fn from(raw: RawMatcher) -> Self {
        match raw {
            RawMatcher::KEYWORDS { keywords } => Matcher::Keywords(keywords),
            RawMatcher::LITERAL { delimiter, token } => Matcher::Literal { delimiter, token },
            RawMatcher::REGEX {
                pattern,
                token,
                group,
            } => Matcher::Regex {
                pattern,
                token,
                group: group.map(Into::into).unwrap_or_default(),
            },
            RawMatcher::DIRECT { texts, token } => Matcher::Direct {
                texts: texts.into(),
                token,
            },
        }
    }
}

/// Capture group reference (index or name).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGroup {
    Index(usize),
    Name(String),
}

impl From<RawGroup> for CaptureGroup {
    fn from(raw: RawGroup) -> Self {
        match raw {
            RawGroup::Index(n) => CaptureGroup::Index(n),
            RawGroup::Name(s) => CaptureGroup::Name(s),
        }
    }
}

/// A single direct text or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTexts {
    One(String),
    Many(Vec<String>),
}

impl From<RawTexts> for Vec<String> {
    fn from(raw: RawTexts) -> Self {
        match raw {
            RawTexts::One(s) => vec![s],
            RawTexts::Many(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms)]
enum RawPattern {
    TOKEN {
        token: String,
        produces: String,
    },
    SEQUENCE {
        produces: String,
        elements: Vec<String>,
    },
    DELIMITED {
        produces: String,
        open: String,
        close: String,
    },
    REPEAT {
        produces: String,
        element: String,
        #[serde(default)]
        separator: Option<String>,
        #[serde(default = "default_repeat_min")]
        min: usize,
    },
}

fn default_repeat_min() -> usize {
    1
}

impl From<RawPattern> for Pattern {
    fn from(raw: RawPattern) -> Self {
        match raw {
            RawPattern::TOKEN { token, produces } => Pattern::Token { token, produces },
            RawPattern::SEQUENCE { produces, elements } => Pattern::Sequence { produces, elements },
            RawPattern::DELIMITED {
                produces,
                open,
                close,
            } => Pattern::Delimited {
                produces,
                open,
                close,
            },
            RawPattern::REPEAT {
                produces,
                element,
                separator,
                min,
            } => Pattern::Repeat {
                produces,
                element,
                separator,
                min,
            },
        }
    }
}
