//! Token matching strategies.
//!
//! A matcher looks at the remaining text and either claims a non-empty prefix as a
//! [`TokenDef`] or declines. The set of strategies is closed: see [`TokenMatcher`].

use std::sync::Arc;

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input, PatternID};
use rowan::{TextRange, TextSize};

use crate::node::{Position, Token};
use crate::{Error, Result};

pub use scribe_core::CaptureGroup;

/// Un-positioned token template: a name plus the text it claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDef<'t> {
    pub token_name: Arc<str>,
    pub code: &'t str,
}

impl<'t> TokenDef<'t> {
    pub fn new(token_name: Arc<str>, code: &'t str) -> Self {
        Self { token_name, code }
    }

    /// Instantiates a token starting at `position` / byte offset `start`.
    pub fn to_token(&self, position: Position, start: TextSize) -> Token<'t> {
        let len = TextSize::of(self.code);
        Token::new(
            Arc::clone(&self.token_name),
            self.code,
            position,
            TextRange::at(start, len),
        )
    }
}

/// Closed set of matching strategies, tried by the lexer in configuration order.
#[derive(Debug, Clone)]
pub enum TokenMatcher {
    Keywords(KeywordMatcher),
    Literal(LiteralMatcher),
    Regex(RegexMatcher),
    Direct(DirectMatcher),
}

impl TokenMatcher {
    /// Attempts to claim a prefix of `text`.
    ///
    /// Returns the unconsumed rest and the claimed token, or `text` unchanged and
    /// `None` when declining. A claimed token is never empty.
    pub fn lex_next<'t>(&self, text: &'t str) -> (&'t str, Option<TokenDef<'t>>) {
        let claimed = match self {
            TokenMatcher::Keywords(m) => m.claim(text),
            TokenMatcher::Literal(m) => m.claim(text),
            TokenMatcher::Regex(m) => m.claim(text),
            TokenMatcher::Direct(m) => m.claim(text),
        };
        match claimed {
            Some((name, len)) if len > 0 => {
                let (code, rest) = text.split_at(len);
                (rest, Some(TokenDef::new(name, code)))
            }
            _ => (text, None),
        }
    }

    pub fn keywords<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordMatcher::new(keywords).map(Self::Keywords)
    }

    pub fn literal(delimiter: char, token_name: &str) -> Result<Self> {
        LiteralMatcher::new(delimiter, token_name).map(Self::Literal)
    }

    pub fn regex(pattern: &str, token_name: &str) -> Result<Self> {
        Self::regex_group(pattern, token_name, CaptureGroup::Index(0))
    }

    pub fn regex_group(pattern: &str, token_name: &str, group: CaptureGroup) -> Result<Self> {
        RegexMatcher::new(pattern, token_name, group).map(Self::Regex)
    }

    pub fn direct<I, S>(texts: I, token_name: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DirectMatcher::new(texts, token_name).map(Self::Direct)
    }
}

fn checked_name(name: &str) -> Result<Arc<str>> {
    if name.is_empty() {
        return Err(Error::EmptyTokenName);
    }
    Ok(Arc::from(name))
}

/// Character that may continue an identifier, so a keyword followed by it is
/// only the prefix of a longer word.
fn continues_identifier(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Case-insensitive keywords with a word-boundary check.
///
/// All keywords are tested at the same position and the last satisfying one in
/// configuration order wins. Token names are `T_` + the upper-cased keyword.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<(String, Arc<str>)>,
}

impl KeywordMatcher {
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords
            .into_iter()
            .map(|kw| {
                let kw = kw.into();
                if kw.is_empty() {
                    return Err(Error::EmptyKeyword);
                }
                let name = Arc::from(format!("T_{}", kw.to_uppercase()));
                Ok((kw, name))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keywords })
    }

    fn claim(&self, text: &str) -> Option<(Arc<str>, usize)> {
        let mut found = None;
        for (keyword, name) in &self.keywords {
            let Some(len) = caseless_prefix_len(text, keyword) else {
                continue;
            };
            let bounded = text[len..].chars().next().is_none_or(|c| !continues_identifier(c));
            if bounded {
                found = Some((Arc::clone(name), len));
            }
        }
        found
    }
}

/// Byte length of the prefix of `text` that equals `keyword` ignoring case.
fn caseless_prefix_len(text: &str, keyword: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    let mut len = 0;
    for k in keyword.chars() {
        let (i, t) = text_chars.next()?;
        if !t.to_lowercase().eq(k.to_lowercase()) {
            return None;
        }
        len = i + t.len_utf8();
    }
    Some(len)
}

/// Quoted run from `delimiter` to the next `delimiter`, or to end of text when
/// unterminated. No escape sequences.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    delimiter: char,
    token_name: Arc<str>,
}

impl LiteralMatcher {
    pub fn new(delimiter: char, token_name: &str) -> Result<Self> {
        Ok(Self {
            delimiter,
            token_name: checked_name(token_name)?,
        })
    }

    fn claim(&self, text: &str) -> Option<(Arc<str>, usize)> {
        let body = text.strip_prefix(self.delimiter)?;
        let open = self.delimiter.len_utf8();
        let len = match body.find(self.delimiter) {
            Some(close) => open + close + open,
            None => text.len(),
        };
        Some((Arc::clone(&self.token_name), len))
    }
}

/// Regex anchored at the current position.
///
/// With [`CaptureGroup::Index(0)`] the whole match is the token. Any other group
/// must start at the current position; text after the group is left for the next
/// token.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    group: usize,
    token_name: Arc<str>,
}

impl RegexMatcher {
    pub fn new(pattern: &str, token_name: &str, group: CaptureGroup) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::InvalidRegex {
            pattern: pattern.to_owned(),
            message: e.to_string(),
        })?;
        let group = match group {
            CaptureGroup::Index(i) => i,
            CaptureGroup::Name(name) => regex
                .group_info()
                .to_index(PatternID::ZERO, &name)
                .ok_or_else(|| Error::UnknownCaptureGroup {
                    pattern: pattern.to_owned(),
                    group: name.clone(),
                })?,
        };
        if group >= regex.captures_len() {
            return Err(Error::UnknownCaptureGroup {
                pattern: pattern.to_owned(),
                group: group.to_string(),
            });
        }
        Ok(Self {
            regex,
            group,
            token_name: checked_name(token_name)?,
        })
    }

    fn claim(&self, text: &str) -> Option<(Arc<str>, usize)> {
        let input = Input::new(text).anchored(Anchored::Yes);
        let len = if self.group == 0 {
            self.regex.search(&input)?.end()
        } else {
            let mut caps = self.regex.create_captures();
            self.regex.search_captures(&input, &mut caps);
            let span = caps.get_group(self.group)?;
            if span.start != 0 {
                return None;
            }
            span.end
        };
        Some((Arc::clone(&self.token_name), len))
    }
}

/// Exact strings; the first one in list order that prefixes the text wins.
#[derive(Debug, Clone)]
pub struct DirectMatcher {
    texts: Vec<String>,
    token_name: Arc<str>,
}

impl DirectMatcher {
    pub fn new<I, S>(texts: I, token_name: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if texts.is_empty() || texts.iter().any(String::is_empty) {
            return Err(Error::EmptyDirectText {
                token: token_name.to_owned(),
            });
        }
        Ok(Self {
            texts,
            token_name: checked_name(token_name)?,
        })
    }

    fn claim(&self, text: &str) -> Option<(Arc<str>, usize)> {
        self.texts
            .iter()
            .find(|t| text.starts_with(t.as_str()))
            .map(|t| (Arc::clone(&self.token_name), t.len()))
    }
}
