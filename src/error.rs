//! Error types for automaton construction.
//!
//! Matching is total over any byte sequence and has no error type. The only
//! failures happen while building, and they are reported before an automaton
//! is ever handed out, so callers never see a partially built one.

use thiserror::Error;

/// Error returned when a dictionary cannot be compiled into an automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The trie needs more nodes than the configured limit allows.
    #[error("automaton exceeds the limit of {limit} states")]
    TooManyStates {
        /// The effective state limit at the time of failure.
        limit: usize,
    },

    /// The dictionary has more patterns than a pattern id can address.
    #[error("dictionary has {count} patterns, at most {max} are supported")]
    TooManyPatterns {
        /// Number of patterns seen when the limit was crossed.
        count: usize,
        /// Largest supported dictionary size.
        max: usize,
    },
}

/// Result type alias for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
