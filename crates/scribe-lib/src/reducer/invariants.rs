//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::node::Node;

use super::pattern::NodePattern;

#[cold]
pub(super) fn mutated_without_match(pattern: &dyn NodePattern, index: usize) -> ! {
    panic!(
        "broken pattern invariant: `{}` mutated at index {index} without matching (caller's responsibility)",
        pattern.produced_node_key(),
    )
}

#[inline]
pub(super) fn assert_consumes(pattern: &dyn NodePattern, index: usize, len: usize, available: usize) {
    assert!(
        len > 0 && index + len <= available,
        "broken pattern invariant: `{}` consumes {len} nodes at index {index} of {available}",
        pattern.produced_node_key(),
    );
}

/// Replacement nodes must be contiguous and cover exactly the consumed text.
pub(super) fn assert_covers(pattern: &dyn NodePattern, consumed: &[Node<'_>], replacement: &[Node<'_>]) {
    let key = pattern.produced_node_key();
    let (Some(first), Some(last)) = (replacement.first(), replacement.last()) else {
        panic!("broken pattern invariant: `{key}` replaced nodes with nothing");
    };
    let (Some(from), Some(to)) = (consumed.first(), consumed.last()) else {
        panic!("broken pattern invariant: `{key}` replaced an empty run");
    };
    assert!(
        first.span().start() == from.span().start() && last.span().end() == to.span().end(),
        "broken pattern invariant: `{key}` replacement {:?} does not cover consumed {:?}",
        first.span().cover(last.span()),
        from.span().cover(to.span()),
    );
    for pair in replacement.windows(2) {
        assert_eq!(
            pair[0].span().end(),
            pair[1].span().start(),
            "broken pattern invariant: `{key}` replacement is not contiguous",
        );
    }
}
