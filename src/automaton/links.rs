//! Failure and suffix (output) link resolution.
//!
//! Links are computed breadth-first: a child's failure link is where its
//! parent's failure link goes on the same symbol. Every link target is
//! strictly shallower than its source, so by the time a node is reached
//! everything it can link to is already resolved. Creation order would not
//! do, since a pattern inserted later can create a shorter suffix node.
//!
//! With the nibble alphabet, links may only drop whole bytes from the front
//! of a path. A node between the two halves of a byte (depth 1, below the
//! root) therefore never chases further: on a miss the whole byte is
//! discarded and the walk restarts at the root.

use std::collections::VecDeque;

use super::alphabet::Alphabet;
use super::arena::{NodeArena, NodeId};

/// Resolve the target for `symbol` starting at `from`, following failure
/// links over missing edges. Used while building; the `Nfa` strategy does
/// the same walk at scan time.
pub fn resolve(arena: &NodeArena, from: NodeId, symbol: u8) -> NodeId {
    let alphabet = arena.alphabet();
    let mut current = from;
    loop {
        let next = arena.next(current, symbol);
        if !next.is_root() {
            return next;
        }
        if current.is_root() || is_byte_boundary_stop(alphabet, arena[current].depth) {
            return NodeId::ROOT;
        }
        current = arena[current].fail;
    }
}

// First half of a byte directly under the root.
#[inline]
fn is_byte_boundary_stop(alphabet: Alphabet, depth: u32) -> bool {
    alphabet == Alphabet::Nibble && depth == 1
}

/// Fill in `fail` and `suffix` for every node.
///
/// Returns the non-root nodes in breadth-first order, which later passes
/// reuse as their processing order.
pub fn resolve_links(arena: &mut NodeArena) -> Vec<NodeId> {
    let stride = arena.stride();
    let alphabet = arena.alphabet();
    let mut order = Vec::with_capacity(arena.len().saturating_sub(1));
    let mut queue = VecDeque::new();

    for symbol in 0..stride {
        let child = arena.next(NodeId::ROOT, symbol as u8);
        if !child.is_root() {
            arena[child].fail = NodeId::ROOT;
            arena[child].suffix = NodeId::ROOT;
            queue.push_back(child);
        }
    }

    while let Some(node) = queue.pop_front() {
        order.push(node);
        let restart_at_root = is_byte_boundary_stop(alphabet, arena[node].depth);

        for symbol in 0..stride {
            let child = arena.next(node, symbol as u8);
            if child.is_root() {
                continue;
            }

            let fail = if restart_at_root {
                NodeId::ROOT
            } else {
                resolve(arena, arena[node].fail, symbol as u8)
            };
            let suffix = if arena[fail].is_terminal() {
                fail
            } else {
                arena[fail].suffix
            };

            arena[child].fail = fail;
            arena[child].suffix = suffix;
            queue.push_back(child);
        }
    }

    order
}
