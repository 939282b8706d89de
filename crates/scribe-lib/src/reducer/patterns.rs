//! Built-in reduction patterns.
//!
//! Elements name either a grammar key or, for tokens, the literal token text:
//! `"T_IDENT"` matches identifier tokens and composites keyed `T_IDENT`, while `","`
//! matches any token whose code is `,`.
//!
//! Trivia between elements is skipped and ends up inside the folded node; trivia
//! before the first or after the last element stays outside.

use std::sync::Arc;

use crate::node::Node;
use crate::{Error, Result};

use super::invariants::mutated_without_match;
use super::pattern::{Mutation, NodePattern};

/// Index of the first non-trivia node at or after `from`.
fn significant(nodes: &[Node<'_>], from: usize) -> Option<usize> {
    (from..nodes.len()).find(|&i| !nodes[i].is_trivia())
}

/// Index of the last non-trivia node before `index`.
fn significant_before(nodes: &[Node<'_>], index: usize) -> Option<usize> {
    (0..index).rev().find(|&i| !nodes[i].is_trivia())
}

fn checked_key(produces: &str) -> Result<Arc<str>> {
    if produces.is_empty() {
        return Err(Error::InvalidPattern {
            produces: produces.to_owned(),
            reason: "produced key is empty".to_owned(),
        });
    }
    Ok(Arc::from(produces))
}

/// A pattern folding one node into its own key would rewrap it on every pass.
fn checked_wrap(produces: &str, element: &str) -> Result<()> {
    if element == produces {
        return Err(Error::InvalidPattern {
            produces: produces.to_owned(),
            reason: format!("folds a lone `{element}` into its own key"),
        });
    }
    Ok(())
}

fn checked_element(produces: &str, element: &str) -> Result<()> {
    if element.is_empty() {
        return Err(Error::InvalidPattern {
            produces: produces.to_owned(),
            reason: "element is empty".to_owned(),
        });
    }
    Ok(())
}

/// Promotes a single node into a composite, e.g. `T_IDENT` into `identifier`.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    token: String,
    produces: Arc<str>,
}

impl TokenPattern {
    pub fn new(token: &str, produces: &str) -> Result<Self> {
        checked_element(produces, token)?;
        checked_wrap(produces, token)?;
        Ok(Self {
            token: token.to_owned(),
            produces: checked_key(produces)?,
        })
    }
}

impl NodePattern for TokenPattern {
    fn node_keys(&self) -> Vec<&str> {
        vec![self.token.as_str()]
    }

    fn produced_node_key(&self) -> &str {
        &self.produces
    }

    fn wrapped_key(&self) -> Option<&str> {
        Some(self.token.as_str())
    }

    fn matches(&self, nodes: &[Node<'_>], index: usize) -> bool {
        nodes.get(index).is_some_and(|n| n.is(&self.token))
    }

    fn mutate<'src>(&self, nodes: &[Node<'src>], index: usize) -> Mutation<'src> {
        if !self.matches(nodes, index) {
            mutated_without_match(self, index);
        }
        Mutation::Fold {
            len: 1,
            key: Arc::clone(&self.produces),
            resume: index + 1,
        }
    }
}

/// Exact run of elements folded into one node.
///
/// Scanning resumes at the new node, so a sequence starting with its own output
/// (`["sum", "+", "T_NUMBER"]` producing `sum`) folds left-associatively in one pass.
#[derive(Debug, Clone)]
pub struct SequencePattern {
    produces: Arc<str>,
    elements: Vec<String>,
}

impl SequencePattern {
    pub fn new<I, S>(produces: &str, elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements: Vec<String> = elements.into_iter().map(Into::into).collect();
        if elements.is_empty() {
            return Err(Error::InvalidPattern {
                produces: produces.to_owned(),
                reason: "sequence has no elements".to_owned(),
            });
        }
        for element in &elements {
            checked_element(produces, element)?;
        }
        if let [only] = elements.as_slice() {
            checked_wrap(produces, only)?;
        }
        Ok(Self {
            produces: checked_key(produces)?,
            elements,
        })
    }

    /// Number of nodes the sequence spans when it starts at `index`.
    fn span_len(&self, nodes: &[Node<'_>], index: usize) -> Option<usize> {
        let (first, rest) = self.elements.split_first()?;
        if !nodes.get(index)?.is(first) {
            return None;
        }
        let mut last = index;
        for element in rest {
            let next = significant(nodes, last + 1)?;
            if !nodes[next].is(element) {
                return None;
            }
            last = next;
        }
        Some(last - index + 1)
    }
}

impl NodePattern for SequencePattern {
    fn node_keys(&self) -> Vec<&str> {
        self.elements.iter().take(1).map(String::as_str).collect()
    }

    fn produced_node_key(&self) -> &str {
        &self.produces
    }

    fn wrapped_key(&self) -> Option<&str> {
        match self.elements.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    fn matches(&self, nodes: &[Node<'_>], index: usize) -> bool {
        self.span_len(nodes, index).is_some()
    }

    fn mutate<'src>(&self, nodes: &[Node<'src>], index: usize) -> Mutation<'src> {
        let Some(len) = self.span_len(nodes, index) else {
            mutated_without_match(self, index);
        };
        Mutation::Fold {
            len,
            key: Arc::clone(&self.produces),
            resume: index,
        }
    }
}

/// Open element, anything, close element.
///
/// Only innermost pairs fold: an open element followed by another open element
/// before any close declines, and the enclosing pair folds in a later pass.
/// An open element without a matching close is left alone. Runs in stage 2,
/// after the enclosed content and any lists in it are reduced.
#[derive(Debug, Clone)]
pub struct DelimitedPattern {
    produces: Arc<str>,
    open: String,
    close: String,
}

impl DelimitedPattern {
    pub fn new(produces: &str, open: &str, close: &str) -> Result<Self> {
        checked_element(produces, open)?;
        checked_element(produces, close)?;
        Ok(Self {
            produces: checked_key(produces)?,
            open: open.to_owned(),
            close: close.to_owned(),
        })
    }

    /// Index of the close element pairing with the open element at `index`.
    fn closing(&self, nodes: &[Node<'_>], index: usize) -> Option<usize> {
        if !nodes.get(index)?.is(&self.open) {
            return None;
        }
        for (offset, node) in nodes[index + 1..].iter().enumerate() {
            if node.is(&self.close) {
                return Some(index + 1 + offset);
            }
            if node.is(&self.open) {
                return None;
            }
        }
        None
    }
}

impl NodePattern for DelimitedPattern {
    fn node_keys(&self) -> Vec<&str> {
        vec![self.open.as_str()]
    }

    fn produced_node_key(&self) -> &str {
        &self.produces
    }

    fn matches(&self, nodes: &[Node<'_>], index: usize) -> bool {
        self.closing(nodes, index).is_some()
    }

    fn stage(&self) -> u8 {
        2
    }

    fn mutate<'src>(&self, nodes: &[Node<'src>], index: usize) -> Mutation<'src> {
        let Some(close) = self.closing(nodes, index) else {
            mutated_without_match(self, index);
        };
        Mutation::Fold {
            len: close - index + 1,
            key: Arc::clone(&self.produces),
            resume: index + 1,
        }
    }
}

/// Maximal run of an element, optionally separated, folded when it has at least
/// `min` elements. A trailing separator is not part of the run, and the pattern
/// only matches where a run starts. Runs in stage 1, once every element of the
/// run exists.
#[derive(Debug, Clone)]
pub struct RepeatPattern {
    produces: Arc<str>,
    element: String,
    separator: Option<String>,
    min: usize,
}

impl RepeatPattern {
    pub fn new(produces: &str, element: &str, separator: Option<&str>, min: usize) -> Result<Self> {
        checked_element(produces, element)?;
        if let Some(separator) = separator {
            checked_element(produces, separator)?;
        }
        if min == 0 {
            return Err(Error::InvalidPattern {
                produces: produces.to_owned(),
                reason: "minimum repetition count must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            produces: checked_key(produces)?,
            element: element.to_owned(),
            separator: separator.map(str::to_owned),
            min,
        })
    }

    /// Number of nodes in the run starting at `index` and the element count.
    fn run(&self, nodes: &[Node<'_>], index: usize) -> (usize, usize) {
        let starts_run = nodes.get(index).is_some_and(|n| n.is(&self.element))
            && !self.continues(nodes, index);
        if !starts_run {
            return (0, 0);
        }
        let (mut last, mut count) = (index, 1);
        while let Some(next) = self.next_element(nodes, last + 1) {
            last = next;
            count += 1;
        }
        (last - index + 1, count)
    }

    /// Whether the element at `index` continues a run starting further left.
    fn continues(&self, nodes: &[Node<'_>], index: usize) -> bool {
        let Some(prev) = significant_before(nodes, index) else {
            return false;
        };
        match &self.separator {
            None => nodes[prev].is(&self.element),
            Some(separator) => {
                nodes[prev].is(separator)
                    && significant_before(nodes, prev).is_some_and(|p| nodes[p].is(&self.element))
            }
        }
    }

    /// Index of the element continuing the run after `from`, past trivia and
    /// the separator if there is one.
    fn next_element(&self, nodes: &[Node<'_>], from: usize) -> Option<usize> {
        let mut next = significant(nodes, from)?;
        if let Some(separator) = &self.separator {
            if !nodes[next].is(separator) {
                return None;
            }
            next = significant(nodes, next + 1)?;
        }
        nodes[next].is(&self.element).then_some(next)
    }
}

impl NodePattern for RepeatPattern {
    fn node_keys(&self) -> Vec<&str> {
        vec![self.element.as_str()]
    }

    fn produced_node_key(&self) -> &str {
        &self.produces
    }

    fn stage(&self) -> u8 {
        1
    }

    fn matches(&self, nodes: &[Node<'_>], index: usize) -> bool {
        let (_, count) = self.run(nodes, index);
        count > 0 && count >= self.min
    }

    fn mutate<'src>(&self, nodes: &[Node<'src>], index: usize) -> Mutation<'src> {
        let (len, count) = self.run(nodes, index);
        if count == 0 || count < self.min {
            mutated_without_match(self, index);
        }
        Mutation::Fold {
            len,
            key: Arc::clone(&self.produces),
            resume: index + 1,
        }
    }
}
