//! Aho-Corasick automaton construction and traversal.
//!
//! Building runs four single-threaded passes over one node arena:
//!
//! - `trie`: insert every pattern as a path of symbol edges
//! - `links`: breadth-first failure links and suffix (output) links
//! - `closure`: flatten each node's reachable outputs into one list
//! - `compact`: optionally bake missing edges into a complete DFA
//!
//! The result is an [`Automaton`] that is never mutated again and can be
//! read from any number of threads.
//!
//! # Module Organization
//!
//! - `alphabet`: byte and nibble symbol alphabets
//! - `arena`: `NodeId`, `Node` and the flat transition table
//! - `sparse_set`: O(1)-clear set used as per-scan scratch state

mod alphabet;
mod arena;
mod closure;
mod compact;
mod links;
mod sparse_set;
mod trie;

use std::ops::ControlFlow;
use std::time::Instant;

pub use alphabet::Alphabet;
pub use arena::{Node, NodeId};
pub use sparse_set::SparseSet;

use arena::NodeArena;
use trie::TrieBuilder;

use crate::config::{MatcherBuilder, Strategy};
use crate::error::{BuildError, Result};

/// A finished, immutable Aho-Corasick automaton.
#[derive(Clone, Debug)]
pub struct Automaton {
    arena: NodeArena,
    outputs: Vec<u32>,
    strategy: Strategy,
    pattern_count: usize,
}

impl Automaton {
    /// Build an automaton from an ordered dictionary.
    ///
    /// Construction either completes or fails as a whole.
    pub fn build<I, P>(patterns: I, config: &MatcherBuilder) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let started = Instant::now();
        let strategy = config.get_strategy();
        let mut trie = TrieBuilder::new(strategy.alphabet(), config.get_max_states())?;

        for (index, pattern) in patterns.into_iter().enumerate() {
            let id = u32::try_from(index).map_err(|_| BuildError::TooManyPatterns {
                count: index + 1,
                max: u32::MAX as usize,
            })?;
            trie.insert(pattern.as_ref(), id)?;
        }
        let pattern_count = trie.pattern_count();
        let mut arena = trie.into_arena();
        arena.shrink_to_fit();
        log::trace!(
            "trie built: {} patterns, {} nodes",
            pattern_count,
            arena.len()
        );

        let order = links::resolve_links(&mut arena);
        log::trace!("failure links resolved for {} nodes", order.len());

        let outputs = closure::build_closures(&mut arena, &order);
        log::trace!("output closures hold {} pattern ids", outputs.len());

        if strategy.is_baked() {
            compact::bake(&mut arena, &order);
            log::trace!("transitions baked over {:?} alphabet", arena.alphabet());
        }

        let automaton = Self {
            arena,
            outputs,
            strategy,
            pattern_count,
        };
        log::debug!(
            "built {:?} automaton: {} patterns, {} states, {} bytes in {:?}",
            strategy,
            automaton.pattern_count,
            automaton.node_count(),
            automaton.memory_usage(),
            started.elapsed()
        );
        Ok(automaton)
    }

    /// Number of dictionary entries, including empty ones.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The node behind `id`, or `None` if `id` belongs to another automaton.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// The raw transition for `(id, symbol)`. Before baking `ROOT` means
    /// "no edge" for any node other than the root itself.
    ///
    /// `None` if `id` is foreign or `symbol` is outside the alphabet.
    #[inline]
    pub fn transition(&self, id: NodeId, symbol: u8) -> Option<NodeId> {
        if id.index() >= self.arena.len() || symbol as usize >= self.arena.stride() {
            return None;
        }
        Some(self.arena.next(id, symbol))
    }

    /// Pattern ids reported when a scan stops on `id`.
    #[inline]
    pub fn outputs(&self, id: NodeId) -> Option<&[u32]> {
        let node = self.arena.get(id)?;
        Some(&self.outputs[node.out_start..node.out_start + node.out_len])
    }

    /// Approximate heap usage of the tables and closures, in bytes.
    pub fn memory_usage(&self) -> usize {
        self.arena.memory_usage() + self.outputs.capacity() * std::mem::size_of::<u32>()
    }

    /// Step from `state` on one input byte. `None` if `state` is foreign.
    #[inline]
    pub fn next_state(&self, state: NodeId, byte: u8) -> Option<NodeId> {
        if state.index() >= self.arena.len() {
            return None;
        }
        let next = match self.strategy {
            Strategy::Nfa => links::resolve(&self.arena, state, byte),
            Strategy::Dfa => self.arena.next(state, byte),
            Strategy::Nibble => {
                let half = self.arena.next(state, byte >> 4);
                self.arena.next(half, byte & 0x0F)
            }
        };
        Some(next)
    }

    /// Walk `haystack` from the root, handing each non-empty closure to
    /// `on_outputs` in scan order. Stops early when the callback breaks.
    #[inline]
    pub fn scan<F>(&self, haystack: &[u8], mut on_outputs: F) -> ControlFlow<()>
    where
        F: FnMut(&[u32]) -> ControlFlow<()>,
    {
        // One loop per strategy keeps the match out of the per-byte path.
        let mut state = NodeId::ROOT;
        match self.strategy {
            Strategy::Nfa => {
                for &byte in haystack {
                    state = links::resolve(&self.arena, state, byte);
                    self.emit(state, &mut on_outputs)?;
                }
            }
            Strategy::Dfa => {
                for &byte in haystack {
                    state = self.arena.next(state, byte);
                    self.emit(state, &mut on_outputs)?;
                }
            }
            Strategy::Nibble => {
                for &byte in haystack {
                    let half = self.arena.next(state, byte >> 4);
                    state = self.arena.next(half, byte & 0x0F);
                    self.emit(state, &mut on_outputs)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    #[inline(always)]
    fn emit<F>(&self, state: NodeId, on_outputs: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&[u32]) -> ControlFlow<()>,
    {
        let node = &self.arena[state];
        if node.out_len == 0 {
            return ControlFlow::Continue(());
        }
        on_outputs(&self.outputs[node.out_start..node.out_start + node.out_len])
    }
}
