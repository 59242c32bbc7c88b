//! Build-time configuration.
//!
//! The transition layout is picked once, when the automaton is built. All
//! strategies report identical matches; they only trade table memory against
//! work per input byte.

use crate::automaton::{Alphabet, Automaton};
use crate::error::Result;
use crate::matcher::Matcher;

/// Largest number of states a `u32` node handle can address.
pub const MAX_STATES: usize = u32::MAX as usize;

/// How transitions are laid out and resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// 256-wide tables holding only trie edges. Missing edges are resolved by
    /// following failure links while scanning.
    Nfa,
    /// 256-wide tables with every missing edge baked in at build time.
    /// One table read per input byte.
    #[default]
    Dfa,
    /// Each byte is split into two 4-bit symbols, high nibble first, giving
    /// 16-wide baked tables. Roughly 16x less table memory than `Dfa` at the
    /// cost of two reads per input byte.
    Nibble,
}

impl Strategy {
    /// The symbol alphabet the trie is built over.
    pub fn alphabet(self) -> Alphabet {
        match self {
            Strategy::Nfa | Strategy::Dfa => Alphabet::Byte,
            Strategy::Nibble => Alphabet::Nibble,
        }
    }

    /// Whether missing edges are resolved at build time.
    pub fn is_baked(self) -> bool {
        !matches!(self, Strategy::Nfa)
    }
}

/// Builder for [`Matcher`].
///
/// ```
/// use dictmatch::{Matcher, Strategy};
///
/// let matcher = Matcher::builder()
///     .strategy(Strategy::Nibble)
///     .build(["he", "she", "his", "hers"])
///     .unwrap();
/// assert_eq!(matcher.matches(b"ushers").len(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatcherBuilder {
    strategy: Strategy,
    max_states: usize,
}

impl Default for MatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherBuilder {
    pub fn new() -> Self {
        Self {
            strategy: Strategy::default(),
            max_states: MAX_STATES,
        }
    }

    /// Select the transition strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cap the number of automaton states, root included.
    ///
    /// Building fails with [`BuildError::TooManyStates`](crate::BuildError)
    /// instead of growing past this. Values above [`MAX_STATES`] are clamped.
    pub fn max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states.min(MAX_STATES);
        self
    }

    pub fn get_strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn get_max_states(&self) -> usize {
        self.max_states
    }

    /// Compile `patterns` into a matcher.
    ///
    /// A pattern's position in the iterator is the id reported for it.
    pub fn build<I, P>(&self, patterns: I) -> Result<Matcher>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let automaton = Automaton::build(patterns, self)?;
        Ok(Matcher::from_automaton(automaton, *self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_is_dfa() {
        let builder = MatcherBuilder::new();
        assert_eq!(builder.get_strategy(), Strategy::Dfa);
        assert_eq!(builder.get_max_states(), MAX_STATES);
    }

    #[test]
    fn test_max_states_is_clamped() {
        let builder = MatcherBuilder::new().max_states(usize::MAX);
        assert_eq!(builder.get_max_states(), MAX_STATES);

        let builder = MatcherBuilder::new().max_states(10);
        assert_eq!(builder.get_max_states(), 10);
    }

    #[test]
    fn test_strategy_alphabet() {
        assert_eq!(Strategy::Nfa.alphabet(), Alphabet::Byte);
        assert_eq!(Strategy::Dfa.alphabet(), Alphabet::Byte);
        assert_eq!(Strategy::Nibble.alphabet(), Alphabet::Nibble);
        assert!(!Strategy::Nfa.is_baked());
        assert!(Strategy::Dfa.is_baked());
        assert!(Strategy::Nibble.is_baked());
    }
}
