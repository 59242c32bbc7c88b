//! Arena trie construction.
//!
//! Every pattern becomes a path of symbol edges from the root. Shared
//! prefixes share nodes; each new edge allocates one node in the arena.
//! The node a pattern ends on records the pattern's id.
//!
//! The builder is single-threaded and has to see the whole dictionary
//! before failure links or closures are derived from it.

use super::alphabet::Alphabet;
use super::arena::{NodeArena, NodeId};
use crate::error::{BuildError, Result};

/// Builds the goto trie for a dictionary.
pub struct TrieBuilder {
    arena: NodeArena,
    max_states: usize,
    patterns: usize,
}

impl TrieBuilder {
    /// Create a builder holding only the root.
    ///
    /// With the nibble alphabet all 16 high-nibble children of the root are
    /// allocated up front, so every byte can enter the trie and the second
    /// nibble is never read as the start of a new byte.
    pub fn new(alphabet: Alphabet, max_states: usize) -> Result<Self> {
        let mut builder = Self {
            arena: NodeArena::new(alphabet),
            max_states,
            patterns: 0,
        };
        if builder.arena.len() > max_states {
            return Err(BuildError::TooManyStates { limit: max_states });
        }
        if alphabet == Alphabet::Nibble {
            for high in 0..alphabet.stride() as u8 {
                let child = builder.alloc(1)?;
                builder.arena.set_next(NodeId::ROOT, high, child);
            }
        }
        Ok(builder)
    }

    fn alloc(&mut self, depth: u32) -> Result<NodeId> {
        if self.arena.len() >= self.max_states {
            return Err(BuildError::TooManyStates {
                limit: self.max_states,
            });
        }
        Ok(self.arena.alloc(depth))
    }

    /// Insert `pattern` under id `index`, returning the node it ends on.
    ///
    /// An empty pattern ends on the root and is never reported.
    pub fn insert(&mut self, pattern: &[u8], index: u32) -> Result<NodeId> {
        let alphabet = self.arena.alphabet();
        let mut node = NodeId::ROOT;
        let mut depth = 0;

        for symbol in alphabet.symbols(pattern) {
            depth += 1;
            let next = self.arena.next(node, symbol);
            node = if next.is_root() {
                let child = self.alloc(depth)?;
                self.arena.set_next(node, symbol, child);
                child
            } else {
                next
            };
        }

        self.patterns += 1;
        if node.is_root() {
            log::trace!("pattern {} is empty and will never match", index);
        } else {
            self.arena[node].terminals.push(index);
        }
        Ok(node)
    }

    /// Number of patterns inserted so far, empty ones included.
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }
}
