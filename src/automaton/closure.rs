//! Output closure precomputation.
//!
//! A node's closure is every pattern id that ends where a walk halting at
//! that node ends: its own terminals, then the closure of its suffix link.
//! All closures are stored back to back in one `Vec<u32>`, and nodes keep a
//! `(start, len)` window into it. Scanning then reports a node's outputs with
//! a single slice read instead of chasing suffix links per input byte.

use super::arena::{NodeArena, NodeId};

/// Compute every node's closure, in breadth-first `order`.
///
/// A suffix link always targets a shallower node, so its closure is already
/// in `outputs` when a node copies it.
pub fn build_closures(arena: &mut NodeArena, order: &[NodeId]) -> Vec<u32> {
    let mut outputs: Vec<u32> = Vec::new();

    for &node in order {
        let start = outputs.len();
        outputs.extend_from_slice(&arena[node].terminals);

        let suffix = arena[node].suffix;
        if !suffix.is_root() {
            let target = &arena[suffix];
            outputs.extend_from_within(target.out_start..target.out_start + target.out_len);
        }

        arena[node].out_start = start;
        arena[node].out_len = outputs.len() - start;
    }

    outputs.shrink_to_fit();
    outputs
}
