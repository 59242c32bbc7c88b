//! The query engine.
//!
//! A [`Matcher`] pairs an immutable [`Automaton`] with a pool of scratch sets.
//! Queries only read the automaton; the scratch set each call borrows from
//! the pool is the one piece of mutable state, and it is never shared
//! between two calls in flight. A `Matcher` can therefore be put behind an
//! `Arc` and queried from any number of threads at once.

use std::ops::ControlFlow;

use crate::automaton::Automaton;
use crate::config::{MatcherBuilder, Strategy};
use crate::error::Result;
use crate::pool::ScratchPool;

/// Position of a pattern in the dictionary it was built from.
pub type PatternId = usize;

/// Multi-pattern matcher over a fixed dictionary.
///
/// ```
/// use dictmatch::Matcher;
///
/// let matcher = Matcher::new(["he", "she", "his", "hers"]).unwrap();
/// let mut found = matcher.matches(b"ushers");
/// found.sort_unstable();
/// assert_eq!(found, vec![0, 1, 3]);
/// ```
#[derive(Debug)]
pub struct Matcher {
    automaton: Automaton,
    pool: ScratchPool,
    config: MatcherBuilder,
}

impl Matcher {
    /// Build a matcher with the default configuration.
    pub fn new<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        MatcherBuilder::new().build(patterns)
    }

    pub fn builder() -> MatcherBuilder {
        MatcherBuilder::new()
    }

    pub(crate) fn from_automaton(automaton: Automaton, config: MatcherBuilder) -> Self {
        let pool = ScratchPool::new(automaton.pattern_count());
        Self {
            automaton,
            pool,
            config,
        }
    }

    /// All distinct pattern ids occurring in `haystack`, in the order they
    /// were first found. Ids ending at the same position have no defined
    /// relative order.
    pub fn matches(&self, haystack: &[u8]) -> Vec<PatternId> {
        self.collect_hits(haystack, usize::MAX)
    }

    /// Like [`matches`](Self::matches), but stops once `limit` distinct ids
    /// have been found.
    pub fn matches_n(&self, haystack: &[u8], limit: usize) -> Vec<PatternId> {
        if limit == 0 {
            return Vec::new();
        }
        self.collect_hits(haystack, limit)
    }

    /// Whether any pattern occurs in `haystack`.
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        !self.matches_n(haystack, 1).is_empty()
    }

    /// Report each distinct pattern id once, as soon as it is found.
    ///
    /// Returning `ControlFlow::Break` from `f` ends the scan.
    pub fn for_each_match<F>(&self, haystack: &[u8], mut f: F)
    where
        F: FnMut(PatternId) -> ControlFlow<()>,
    {
        if self.automaton.pattern_count() == 0 || haystack.is_empty() {
            return;
        }

        let mut seen = self.pool.get();
        let _ = self.automaton.scan(haystack, |outputs| {
            for &id in outputs {
                if seen.insert(id) {
                    f(id as PatternId)?;
                }
            }
            ControlFlow::Continue(())
        });
    }

    /// Scan with a pooled scratch set and return its dense half, which
    /// holds the distinct ids in discovery order.
    fn collect_hits(&self, haystack: &[u8], limit: usize) -> Vec<PatternId> {
        if self.automaton.pattern_count() == 0 || haystack.is_empty() {
            return Vec::new();
        }

        let mut seen = self.pool.get();
        let _ = self.automaton.scan(haystack, |outputs| {
            for &id in outputs {
                if seen.insert(id) && seen.len() >= limit {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        });
        seen.iter().map(|id| id as PatternId).collect()
    }

    pub fn pattern_count(&self) -> usize {
        self.automaton.pattern_count()
    }

    pub fn node_count(&self) -> usize {
        self.automaton.node_count()
    }

    pub fn strategy(&self) -> Strategy {
        self.automaton.strategy()
    }

    /// The configuration this matcher was built with.
    pub fn config(&self) -> MatcherBuilder {
        self.config
    }

    /// Approximate heap usage of the automaton, in bytes. Pooled scratch
    /// sets are not included.
    pub fn memory_usage(&self) -> usize {
        self.automaton.memory_usage()
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    #[cfg(test)]
    pub(crate) fn idle_scratch(&self) -> usize {
        self.pool.idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut ids: Vec<PatternId>) -> Vec<PatternId> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_matches_ushers() {
        let matcher = Matcher::new(["he", "she", "his", "hers"]).unwrap();
        assert_eq!(sorted(matcher.matches(b"ushers")), vec![0, 1, 3]);
    }

    #[test]
    fn test_discovery_order() {
        let matcher = Matcher::new(["cd", "ab", "xyz"]).unwrap();
        assert_eq!(matcher.matches(b"xyzabcd"), vec![2, 1, 0]);
    }

    #[test]
    fn test_repeated_occurrences_reported_once() {
        let matcher = Matcher::new(["ab"]).unwrap();
        assert_eq!(matcher.matches(b"abababab"), vec![0]);
    }

    #[test]
    fn test_matches_n_stops_at_limit() {
        let matcher = Matcher::new(["a", "b", "c", "d"]).unwrap();
        assert_eq!(matcher.matches_n(b"abcd", 2), vec![0, 1]);
        assert_eq!(matcher.matches_n(b"abcd", 10), vec![0, 1, 2, 3]);
        assert!(matcher.matches_n(b"abcd", 0).is_empty());
    }

    #[test]
    fn test_scratch_returned_after_early_exit() {
        let matcher = Matcher::new(["a", "b"]).unwrap();
        assert_eq!(matcher.matches_n(b"ab", 1), vec![0]);
        assert_eq!(matcher.idle_scratch(), 1);

        // The recycled scratch must not remember the previous call
        assert_eq!(matcher.matches(b"ab"), vec![0, 1]);
        assert_eq!(matcher.idle_scratch(), 1);
    }

    #[test]
    fn test_idle_scratch_bounded_under_contention() {
        const THREADS: usize = 8;
        let patterns: Vec<String> = (0..1000).map(|i| format!("p{:04}", i)).collect();
        let matcher = Matcher::new(&patterns).unwrap();

        std::thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..20_000 {
                        assert_eq!(matcher.matches(b"p0001"), vec![1]);
                    }
                });
            }
        });

        assert!(matcher.idle_scratch() >= 1);
        assert!(
            matcher.idle_scratch() <= THREADS,
            "pool grew to {} sets",
            matcher.idle_scratch()
        );
    }

    #[test]
    fn test_for_each_match_agrees_with_matches() {
        let matcher = Matcher::new(["he", "she", "his", "hers"]).unwrap();
        let mut streamed = Vec::new();
        matcher.for_each_match(b"ushers his", |id| {
            streamed.push(id);
            ControlFlow::Continue(())
        });
        assert_eq!(streamed, matcher.matches(b"ushers his"));
    }

    #[test]
    fn test_for_each_match_break() {
        let matcher = Matcher::new(["x", "y", "z"]).unwrap();
        let mut seen = Vec::new();
        matcher.for_each_match(b"zyx", |id| {
            seen.push(id);
            ControlFlow::Break(())
        });
        assert_eq!(seen, vec![2]);
    }

    #[test]
    fn test_is_match() {
        let matcher = Matcher::new(["needle"]).unwrap();
        assert!(matcher.is_match(b"haystack with a needle in it"));
        assert!(!matcher.is_match(b"haystack"));
    }

    #[test]
    fn test_introspection() {
        let matcher = Matcher::builder()
            .strategy(Strategy::Nfa)
            .build(["ab", "ac"])
            .unwrap();
        assert_eq!(matcher.pattern_count(), 2);
        assert_eq!(matcher.node_count(), 4);
        assert_eq!(matcher.strategy(), Strategy::Nfa);
        assert_eq!(matcher.config().get_strategy(), Strategy::Nfa);
        assert!(matcher.memory_usage() >= 4 * 256 * 4);
    }
}
