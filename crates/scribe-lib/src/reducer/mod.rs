//! Fixed-point tree reduction.
//!
//! The reducer repeatedly scans the node sequence left to right. At each index it
//! asks the patterns registered for that node, in registration order, whether they
//! match; the first that does mutates the sequence and tells the scan where to
//! resume. A pass that applies no mutation is the fixed point.
//!
//! Patterns run in stages (see [`NodePattern::stage`]): a pass includes the
//! patterns up to the current stage, the stage advances when a pass changes
//! nothing and drops back to 0 on any progress. The fixed point is a pass with
//! every stage that still changes nothing.
//!
//! Passes above stage 0 collect one mutation per matching index and apply the
//! innermost ones: candidates are taken narrowest first, and a candidate
//! overlapping one already taken waits for a later pass. Disjoint enclosures and
//! lists all fold in the same pass. An enclosure still folds before any
//! enclosure around it whatever its delimiters, and its content is reduced again
//! before the outer one folds.
//!
//! # Termination
//!
//! Progress is counted per pass, so a pass whose patterns only return
//! [`Mutation::Keep`] ends reduction even if the sequence length never changed.
//! Single-node folds that feed back into their own input are rejected when the
//! reducer is built. Other grammars that rewrite their own output forever are
//! stopped by execution fuel: each applied mutation costs one unit, and on
//! exhaustion the current sequence is returned with a `ReductionLimitReached`
//! diagnostic.

mod invariants;
mod pattern;
mod patterns;

#[cfg(test)]
mod patterns_tests;

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::node::{Composite, Node};
use crate::{Error, Result};

pub use pattern::{Mutation, NodePattern};
pub use patterns::{DelimitedPattern, RepeatPattern, SequencePattern, TokenPattern};

/// Default mutation budget for one reduction.
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;

/// Leftover tokens pointed at by an `UnreducedSequence` warning.
const LEFTOVERS_SHOWN: usize = 3;

/// Reducer output. Never fails: problems with the input become diagnostics.
#[derive(Debug, Clone)]
pub struct Reduced<'src> {
    pub nodes: Vec<Node<'src>>,
    pub diagnostics: Diagnostics,
    /// Passes run, including the final pass that found nothing to do.
    pub passes: u32,
    /// Mutations applied, i.e. fuel consumed.
    pub mutations: u32,
}

impl Reduced<'_> {
    pub fn fuel_exhausted(&self) -> bool {
        self.diagnostics
            .contains(DiagnosticKind::ReductionLimitReached)
    }
}

#[derive(Debug)]
pub struct Reducer {
    patterns: Vec<Box<dyn NodePattern>>,
    dispatch: IndexMap<String, Vec<usize>>,
    last_stage: u8,
    root: Option<Arc<str>>,
    exec_fuel: Option<u32>,
}

impl Reducer {
    /// Registers `patterns` in order. Registration order breaks ties between
    /// patterns dispatched on the same node.
    pub fn new(patterns: Vec<Box<dyn NodePattern>>) -> Result<Self> {
        let mut dispatch: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (idx, pattern) in patterns.iter().enumerate() {
            let keys = pattern.node_keys();
            if keys.is_empty() {
                return Err(Error::PatternWithoutKeys {
                    produces: pattern.produced_node_key().to_owned(),
                });
            }
            for key in keys {
                let slot = dispatch.entry(key.to_owned()).or_default();
                if slot.last() != Some(&idx) {
                    slot.push(idx);
                }
            }
        }
        if let Some(cycle) = wrapping_cycle(&patterns) {
            return Err(Error::WrappingCycle {
                cycle: cycle.join(" -> "),
            });
        }
        Ok(Self {
            last_stage: patterns.iter().map(|p| p.stage()).max().unwrap_or(0),
            patterns,
            dispatch,
            root: None,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
        })
    }

    /// Sets the mutation budget. `None` means unlimited.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Folds the final sequence into one composite keyed `key`.
    pub fn with_root(mut self, key: Option<&str>) -> Self {
        self.root = key.map(Arc::from);
        self
    }

    pub fn patterns(&self) -> impl Iterator<Item = &dyn NodePattern> {
        self.patterns.iter().map(|p| p.as_ref())
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn exec_fuel(&self) -> Option<u32> {
        self.exec_fuel
    }

    /// Reduces `nodes` to a fixed point. `source` is the text the nodes were lexed
    /// from; composites slice their code out of it.
    pub fn reduce<'src>(&self, source: &'src str, nodes: Vec<Node<'src>>) -> Reduced<'src> {
        self.reduce_with_fuel(source, nodes, self.exec_fuel)
    }

    /// [`reduce`](Self::reduce) with a one-off mutation budget.
    pub fn reduce_with_fuel<'src>(
        &self,
        source: &'src str,
        nodes: Vec<Node<'src>>,
        exec_fuel: Option<u32>,
    ) -> Reduced<'src> {
        let mut run = Run {
            reducer: self,
            source,
            nodes,
            diagnostics: Diagnostics::new(),
            fuel: exec_fuel,
            mutations: 0,
        };

        let mut passes = 0;
        let mut stage = 0;
        loop {
            passes += 1;
            let outcome = if stage == 0 {
                run.pass(stage)
            } else {
                run.innermost(stage)
            };
            match outcome {
                Pass::Progress(applied) => {
                    tracing::trace!(pass = passes, stage, applied, "reduction pass");
                    stage = 0;
                }
                Pass::FixedPoint if stage < self.last_stage => stage += 1,
                Pass::FixedPoint | Pass::OutOfFuel => break,
            }
        }

        run.finish();

        tracing::debug!(
            passes,
            mutations = run.mutations,
            nodes = run.nodes.len(),
            "reduced"
        );

        Reduced {
            nodes: run.nodes,
            diagnostics: run.diagnostics,
            passes,
            mutations: run.mutations,
        }
    }

    /// Patterns dispatched on `node`, in registration order.
    fn candidates<'a>(&'a self, node: &Node<'_>) -> impl Iterator<Item = &'a dyn NodePattern> {
        let by_key = self.slot(node.grammar_key());
        let by_code: &[usize] = match node {
            Node::Token(t) if t.code() != t.name() => self.slot(t.code()),
            _ => &[],
        };
        in_registration_order(by_key, by_code).map(|idx| self.patterns[idx].as_ref())
    }

    fn slot(&self, key: &str) -> &[usize] {
        self.dispatch.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Merges two ascending index lists without duplicates.
fn in_registration_order<'a>(a: &'a [usize], b: &'a [usize]) -> impl Iterator<Item = usize> + 'a {
    let (mut a, mut b) = (a.iter().copied().peekable(), b.iter().copied().peekable());
    std::iter::from_fn(move || match (a.peek().copied(), b.peek().copied()) {
        (Some(x), Some(y)) if x == y => {
            b.next();
            a.next()
        }
        (Some(x), Some(y)) if x < y => a.next(),
        (_, Some(_)) => b.next(),
        (Some(_), None) => a.next(),
        (None, None) => None,
    })
}

/// Keys of a cycle of single-node folds, first key repeated at the end.
fn wrapping_cycle(patterns: &[Box<dyn NodePattern>]) -> Option<Vec<&str>> {
    let mut edges: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for pattern in patterns {
        if let Some(from) = pattern.wrapped_key() {
            edges
                .entry(from)
                .or_default()
                .push(pattern.produced_node_key());
        }
    }

    let mut done = HashSet::new();
    edges
        .keys()
        .find_map(|&start| cycle_from(&edges, &mut vec![start], &mut done))
}

/// Depth-first walk from the last key of `path`.
fn cycle_from<'a>(
    edges: &IndexMap<&'a str, Vec<&'a str>>,
    path: &mut Vec<&'a str>,
    done: &mut HashSet<&'a str>,
) -> Option<Vec<&'a str>> {
    let key = *path.last()?;
    if done.contains(key) {
        return None;
    }
    for &next in edges.get(key).map(Vec::as_slice).unwrap_or_default() {
        if let Some(at) = path.iter().position(|&k| k == next) {
            let mut cycle = path[at..].to_vec();
            cycle.push(next);
            return Some(cycle);
        }
        path.push(next);
        let found = cycle_from(edges, path, done);
        path.pop();
        if found.is_some() {
            return found;
        }
    }
    done.insert(key);
    None
}

fn consumed(mutation: &Mutation<'_>) -> usize {
    match mutation {
        Mutation::Keep { .. } => 0,
        Mutation::Fold { len, .. } | Mutation::Replace { len, .. } => *len,
    }
}

enum Pass {
    Progress(u32),
    FixedPoint,
    OutOfFuel,
}

/// State of one reduction.
struct Run<'r, 'src> {
    reducer: &'r Reducer,
    source: &'src str,
    nodes: Vec<Node<'src>>,
    diagnostics: Diagnostics,
    fuel: Option<u32>,
    mutations: u32,
}

impl<'src> Run<'_, 'src> {
    /// One left-to-right scan with the patterns of `stage` and earlier.
    fn pass(&mut self, stage: u8) -> Pass {
        let reducer = self.reducer;
        let mut applied = 0;
        let mut index = 0;

        while index < self.nodes.len() {
            let Some(pattern) = reducer
                .candidates(&self.nodes[index])
                .filter(|p| p.stage() <= stage)
                .find(|p| p.matches(&self.nodes, index))
            else {
                index += 1;
                continue;
            };

            let mutation = pattern.mutate(&self.nodes, index);
            if mutation.is_keep() {
                index = mutation.resume().max(index + 1);
                continue;
            }

            if !self.consume_fuel() {
                self.report_out_of_fuel(pattern, index);
                return Pass::OutOfFuel;
            }

            index = self.apply(pattern, index, mutation);
            applied += 1;
        }

        if applied == 0 {
            Pass::FixedPoint
        } else {
            Pass::Progress(applied)
        }
    }

    /// One scan that applies every innermost non-overlapping mutation found.
    fn innermost(&mut self, stage: u8) -> Pass {
        let reducer = self.reducer;
        let mut found: Vec<(usize, &dyn NodePattern, Mutation<'src>)> = Vec::new();

        for index in 0..self.nodes.len() {
            let Some(pattern) = reducer
                .candidates(&self.nodes[index])
                .filter(|p| p.stage() <= stage)
                .find(|p| p.matches(&self.nodes, index))
            else {
                continue;
            };
            let mutation = pattern.mutate(&self.nodes, index);
            if !mutation.is_keep() {
                found.push((index, pattern, mutation));
            }
        }

        if found.is_empty() {
            return Pass::FixedPoint;
        }

        // Taken node ranges, start to end. Disjoint, so the range starting last
        // before a candidate's end is the only one that can overlap it.
        let mut taken: BTreeMap<usize, usize> = BTreeMap::new();
        found.sort_by_key(|(index, _, mutation)| (consumed(mutation), *index));
        found.retain(|(index, _, mutation)| {
            let (start, end) = (*index, index + consumed(mutation));
            let free = taken
                .range(..end)
                .next_back()
                .is_none_or(|(_, &taken_end)| taken_end <= start);
            if free {
                taken.insert(start, end);
            }
            free
        });

        // Right to left, so indices still to be applied stay valid.
        found.sort_by_key(|(index, ..)| Reverse(*index));
        let mut applied = 0;
        for (index, pattern, mutation) in found {
            if !self.consume_fuel() {
                self.report_out_of_fuel(pattern, index);
                return Pass::OutOfFuel;
            }
            self.apply(pattern, index, mutation);
            applied += 1;
        }
        Pass::Progress(applied)
    }

    fn consume_fuel(&mut self) -> bool {
        match &mut self.fuel {
            Some(0) => false,
            Some(remaining) => {
                *remaining -= 1;
                self.mutations += 1;
                true
            }
            None => {
                self.mutations += 1;
                true
            }
        }
    }

    /// Splices `mutation` into the sequence and returns the resume index.
    fn apply(&mut self, pattern: &dyn NodePattern, index: usize, mutation: Mutation<'src>) -> usize {
        let resume = match mutation {
            Mutation::Keep { resume } => return resume.max(index + 1),
            Mutation::Fold { len, key, resume } => {
                invariants::assert_consumes(pattern, index, len, self.nodes.len());
                let children: Vec<_> = self.nodes.drain(index..index + len).collect();
                let composite = Composite::new(key, children, self.source);
                tracing::trace!(key = composite.key(), code = composite.code(), "fold");
                self.nodes.insert(index, composite.into());
                resume
            }
            Mutation::Replace { len, nodes, resume } => {
                invariants::assert_consumes(pattern, index, len, self.nodes.len());
                invariants::assert_covers(pattern, &self.nodes[index..index + len], &nodes);
                tracing::trace!(
                    key = pattern.produced_node_key(),
                    consumed = len,
                    produced = nodes.len(),
                    "replace"
                );
                self.nodes.splice(index..index + len, nodes);
                resume
            }
        };
        resume.min(self.nodes.len())
    }

    fn report_out_of_fuel(&mut self, pattern: &dyn NodePattern, index: usize) {
        let produces = pattern.produced_node_key();
        tracing::warn!(
            mutations = self.mutations,
            key = self.nodes[index].grammar_key(),
            produces,
            "reduction fuel exhausted"
        );
        let range = self.nodes[index].span();
        self.diagnostics
            .report(DiagnosticKind::ReductionLimitReached, range)
            .message(format!("stopped after {} mutations", self.mutations))
            .label(format!("`{produces}` would have been mutation {}", self.mutations + 1))
            .emit();
    }

    /// Root folding, and a warning when more than one non-trivia node is left
    /// that the grammar did not reduce.
    ///
    /// Without a root any such sequence is unreduced. With one, a sequence of
    /// composites is what the root collects (several statements, several
    /// sections), so only leftover bare tokens are reported.
    fn finish(&mut self) {
        let (Some(first), Some(last)) = (self.nodes.first(), self.nodes.last()) else {
            return;
        };
        let range = TextRange::new(first.span().start(), last.span().end());

        let significant = || self.nodes.iter().filter(|n| !n.is_trivia());
        let top_level = significant().count();
        let bare = significant().filter(|n| n.is_token()).count();

        match &self.reducer.root {
            None if top_level > 1 => {
                self.diagnostics
                    .report(DiagnosticKind::UnreducedSequence, range)
                    .message(format!("{top_level} top-level nodes"))
                    .emit();
            }
            Some(_) if top_level > 1 && bare > 0 => {
                tracing::debug!(top_level, bare, "tokens left under root");
                let mut report = self
                    .diagnostics
                    .report(DiagnosticKind::UnreducedSequence, range)
                    .message(format!("{top_level} top-level nodes, {bare} left as tokens"));
                let leftovers = self
                    .nodes
                    .iter()
                    .filter(|n| n.is_token() && !n.is_trivia());
                for token in leftovers.take(LEFTOVERS_SHOWN) {
                    report = report.related(
                        token.span(),
                        format!("`{}` not part of any pattern", token.grammar_key()),
                    );
                }
                report.emit();
            }
            _ => {}
        }

        let Some(root) = &self.reducer.root else {
            return;
        };
        if let [only] = self.nodes.as_slice()
            && only.grammar_key() == &**root
        {
            return;
        }

        let children = std::mem::take(&mut self.nodes);
        let composite = Composite::new(Arc::clone(root), children, self.source);
        self.nodes.push(composite.into());
    }
}
