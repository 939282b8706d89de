//! Languages: a name, its file extensions and the rules that parse it.
//!
//! A [`Language`] is immutable once built and can be shared between threads and
//! documents. Every [`Language::parse`] call starts from scratch.

use std::sync::Arc;

use indexmap::IndexMap;
use scribe_core::{Grammar, Matcher, Pattern};

use crate::Result;
use crate::diagnostics::Diagnostics;
use crate::lexer::{Lexed, Lexer, TokenMatcher};
use crate::node::Node;
use crate::reducer::{
    DEFAULT_EXEC_FUEL, DelimitedPattern, NodePattern, Reducer, RepeatPattern, SequencePattern,
    TokenPattern,
};
use crate::tree::SyntaxTree;

/// Parse output. The tree is always complete; diagnostics say how well the
/// language understood the text.
#[derive(Debug, Clone)]
pub struct Parse<'src> {
    pub tree: SyntaxTree<'src>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug)]
pub struct Language {
    name: Arc<str>,
    extensions: Vec<String>,
    lexer: Lexer,
    reducer: Reducer,
    styles: IndexMap<String, String>,
}

impl Language {
    pub fn builder(name: &str) -> LanguageBuilder {
        LanguageBuilder::new(name)
    }

    /// Builds a language from a declarative definition.
    pub fn from_grammar(grammar: &Grammar) -> Result<Self> {
        let mut builder = LanguageBuilder::new(&grammar.name)
            .trivia(grammar.trivia.iter().map(String::as_str))
            .exec_fuel(grammar.exec_fuel.or(Some(DEFAULT_EXEC_FUEL)));

        for ext in &grammar.extensions {
            builder = builder.extension(ext);
        }
        if let Some(root) = &grammar.root {
            builder = builder.root(root);
        }
        for matcher in &grammar.matchers {
            builder = builder.matcher(token_matcher(matcher)?);
        }
        for pattern in &grammar.patterns {
            builder.patterns.push(node_pattern(pattern)?);
        }
        for (key, class) in &grammar.styles {
            builder = builder.style(key, class);
        }

        builder.build()
    }

    /// Builds a language from a JSON definition (see [`scribe_core::grammar`]).
    pub fn from_json(json: &str) -> Result<Self> {
        let grammar = Grammar::from_json(json)?;
        Self::from_grammar(&grammar)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Style class for nodes keyed `grammar_key`.
    pub fn style(&self, grammar_key: &str) -> Option<&str> {
        self.styles.get(grammar_key).map(String::as_str)
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Lexes `text` without reducing.
    pub fn tokenize<'src>(&self, text: &'src str) -> Lexed<'src> {
        self.lexer.lex(text)
    }

    /// Lexes and reduces `text` into a syntax tree.
    pub fn parse<'src>(&self, text: &'src str) -> Parse<'src> {
        self.parse_with_fuel(text, self.reducer.exec_fuel())
    }

    /// [`parse`](Self::parse) with a one-off mutation budget. `None` means unlimited.
    pub fn parse_with_fuel<'src>(&self, text: &'src str, exec_fuel: Option<u32>) -> Parse<'src> {
        let lexed = self.lexer.lex(text);
        let tokens = lexed.tokens.len();
        let mut diagnostics = lexed.diagnostics;

        let nodes = lexed.tokens.into_iter().map(Node::from).collect();
        let reduced = self.reducer.reduce_with_fuel(text, nodes, exec_fuel);
        diagnostics.extend(reduced.diagnostics);

        tracing::debug!(
            language = %self.name,
            tokens,
            nodes = reduced.nodes.len(),
            passes = reduced.passes,
            mutations = reduced.mutations,
            diagnostics = diagnostics.len(),
            "parsed"
        );

        Parse {
            tree: SyntaxTree::new(Arc::clone(&self.name), text, reduced.nodes),
            diagnostics,
        }
    }
}

fn token_matcher(matcher: &Matcher) -> Result<TokenMatcher> {
    match matcher {
        Matcher::Keywords(keywords) => TokenMatcher::keywords(keywords.iter().map(String::as_str)),
        Matcher::Literal { delimiter, token } => TokenMatcher::literal(*delimiter, token),
        Matcher::Regex {
            pattern,
            token,
            group,
        } => TokenMatcher::regex_group(pattern, token, group.clone()),
        Matcher::Direct { texts, token } => {
            TokenMatcher::direct(texts.iter().map(String::as_str), token)
        }
    }
}

fn node_pattern(pattern: &Pattern) -> Result<Box<dyn NodePattern>> {
    Ok(match pattern {
        Pattern::Token { token, produces } => Box::new(TokenPattern::new(token, produces)?),
        Pattern::Sequence { produces, elements } => {
            Box::new(SequencePattern::new(produces, elements.iter().map(String::as_str))?)
        }
        Pattern::Delimited {
            produces,
            open,
            close,
        } => Box::new(DelimitedPattern::new(produces, open, close)?),
        Pattern::Repeat {
            produces,
            element,
            separator,
            min,
        } => Box::new(RepeatPattern::new(
            produces,
            element,
            separator.as_deref(),
            *min,
        )?),
    })
}

/// Assembles a [`Language`] in code.
#[derive(Debug)]
pub struct LanguageBuilder {
    name: String,
    extensions: Vec<String>,
    matchers: Vec<TokenMatcher>,
    trivia: Vec<String>,
    patterns: Vec<Box<dyn NodePattern>>,
    root: Option<String>,
    styles: IndexMap<String, String>,
    exec_fuel: Option<u32>,
}

impl LanguageBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            extensions: Vec::new(),
            matchers: Vec::new(),
            trivia: Vec::new(),
            patterns: Vec::new(),
            root: None,
            styles: IndexMap::new(),
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
        }
    }

    /// File extension without the leading dot.
    pub fn extension(mut self, ext: &str) -> Self {
        self.extensions.push(ext.to_owned());
        self
    }

    /// Appends a matcher; earlier matchers take priority.
    pub fn matcher(mut self, matcher: TokenMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn trivia<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.trivia.extend(names.into_iter().map(str::to_owned));
        self
    }

    /// Appends a pattern; registration order breaks dispatch ties.
    pub fn pattern(mut self, pattern: impl NodePattern + 'static) -> Self {
        self.patterns.push(Box::new(pattern));
        self
    }

    pub fn root(mut self, key: &str) -> Self {
        self.root = Some(key.to_owned());
        self
    }

    pub fn style(mut self, grammar_key: &str, class: &str) -> Self {
        self.styles.insert(grammar_key.to_owned(), class.to_owned());
        self
    }

    /// Mutation budget per parse. `None` means unlimited.
    pub fn exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn build(self) -> Result<Language> {
        let reducer = Reducer::new(self.patterns)?
            .with_root(self.root.as_deref())
            .with_exec_fuel(self.exec_fuel);
        Ok(Language {
            name: Arc::from(self.name),
            extensions: self.extensions,
            lexer: Lexer::new(self.matchers).with_trivia(self.trivia),
            reducer,
            styles: self.styles,
        })
    }
}
