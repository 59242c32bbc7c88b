//! dictmatch: multi-pattern exact byte-string matching
//!
//! A fixed dictionary of byte patterns is compiled once into an Aho-Corasick
//! automaton. Any number of threads can then scan inputs against it in a
//! single linear pass, getting back the dictionary positions of every pattern
//! that occurs.
//!
//! ```
//! use dictmatch::Matcher;
//!
//! let matcher = Matcher::new(["a", "ab", "bc", "bca", "c", "caa"]).unwrap();
//! let mut found = matcher.matches(b"abccab");
//! found.sort_unstable();
//! assert_eq!(found, vec![0, 1, 2, 4]);
//! ```
//!
//! Semantics:
//! - each pattern id is reported at most once per call, however often the
//!   pattern occurs
//! - duplicate patterns keep their own ids and are all reported
//! - empty patterns are accepted but never reported
//! - matching works on raw bytes; there is no Unicode awareness
//!
//! For sharing, put a [`Matcher`] in an `Arc`, or use [`SharedMatcher`] when
//! the dictionary is replaced at runtime.

mod automaton;
mod config;
mod error;
mod matcher;
mod pool;
mod thread_safe;

pub use automaton::{Alphabet, Automaton, Node, NodeId};
pub use config::{MatcherBuilder, Strategy, MAX_STATES};
pub use error::{BuildError, Result};
pub use matcher::{Matcher, PatternId};
pub use thread_safe::SharedMatcher;
