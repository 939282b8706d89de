use std::sync::Arc;

use crate::node::Node;

/// A declarative grammar rule over a node sequence.
///
/// The reducer consults a pattern only at indices whose node dispatches to one of
/// [`node_keys`](Self::node_keys): a node dispatches to its grammar key and, for
/// tokens, also to its source text. `matches` must be pure, and `mutate` must be
/// total whenever `matches` returned `true` for the same arguments.
pub trait NodePattern: std::fmt::Debug + Send + Sync {
    /// Keys this pattern is registered under in the dispatch table.
    fn node_keys(&self) -> Vec<&str>;

    /// Grammar key of the composites this pattern creates.
    fn produced_node_key(&self) -> &str;

    fn matches(&self, nodes: &[Node<'_>], index: usize) -> bool;

    fn mutate<'src>(&self, nodes: &[Node<'src>], index: usize) -> Mutation<'src>;

    /// Key of the lone node this pattern folds, for patterns that always fold
    /// exactly one node. [`Reducer::new`](super::Reducer::new) rejects patterns
    /// that would rewrap each other's output in a cycle.
    fn wrapped_key(&self) -> Option<&str> {
        None
    }

    /// Reduction stage. A pattern is only tried once no pattern of an earlier
    /// stage applies anywhere, so what it folds is already reduced.
    fn stage(&self) -> u8 {
        0
    }
}

/// What a pattern does to the sequence at the index it matched.
///
/// `resume` is the index (in the sequence after the mutation) at which scanning
/// continues. It may point before, at or after the mutated position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<'src> {
    /// Leave the sequence untouched. Never counts as progress; the scan always
    /// moves past the current index.
    Keep { resume: usize },

    /// Fold `len` nodes into one composite keyed `key`.
    Fold {
        len: usize,
        key: Arc<str>,
        resume: usize,
    },

    /// Replace `len` nodes with `nodes`, which must cover exactly the same text.
    Replace {
        len: usize,
        nodes: Vec<Node<'src>>,
        resume: usize,
    },
}

impl Mutation<'_> {
    pub fn resume(&self) -> usize {
        match self {
            Mutation::Keep { resume }
            | Mutation::Fold { resume, .. }
            | Mutation::Replace { resume, .. } => *resume,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Mutation::Keep { .. })
    }
}
