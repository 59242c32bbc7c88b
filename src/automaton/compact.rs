//! Transition baking.
//!
//! Replaces every missing edge with the state the failure walk would reach,
//! turning the trie into a complete DFA over its alphabet. Nodes are visited
//! breadth-first, so a node's failure target is already baked and each
//! missing edge is a single lookup on it.

use super::alphabet::Alphabet;
use super::arena::{NodeArena, NodeId};

/// Bake all missing transitions in place.
///
/// The root keeps its self-loop: with bytes its missing edges already hold
/// `ROOT`, with nibbles it has no missing edges.
pub fn bake(arena: &mut NodeArena, order: &[NodeId]) {
    let stride = arena.stride();
    let alphabet = arena.alphabet();

    for &node in order {
        let fail = arena[node].fail;
        // A miss on the low nibble right under the root drops the whole byte.
        let drop_byte = alphabet == Alphabet::Nibble && arena[node].depth == 1;

        for symbol in 0..stride {
            let symbol = symbol as u8;
            if !arena.next(node, symbol).is_root() {
                continue;
            }
            let target = if drop_byte {
                NodeId::ROOT
            } else {
                arena.next(fail, symbol)
            };
            arena.set_next(node, symbol, target);
        }
    }
}
