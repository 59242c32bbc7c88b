//! Thread-safe publication of rebuilt matchers.
//!
//! A [`Matcher`] is already `Send + Sync` and never changes after it is
//! built. `SharedMatcher` covers services whose dictionary is replaced while
//! they run:
//! - readers load the current snapshot without taking a lock
//! - a rebuild compiles a complete new automaton off to the side, serialized
//!   by a mutex, then publishes it with one atomic pointer swap
//!
//! A query that loaded the old snapshot finishes on it. Nothing is ever
//! updated in place.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::config::MatcherBuilder;
use crate::error::Result;
use crate::matcher::{Matcher, PatternId};

/// Swappable handle to the current matcher.
///
/// ```
/// use dictmatch::{Matcher, SharedMatcher};
///
/// let shared = SharedMatcher::new(Matcher::new(["old"]).unwrap());
/// assert_eq!(shared.matches(b"old news"), vec![0]);
///
/// shared.rebuild(["new", "old"]).unwrap();
/// assert_eq!(shared.matches(b"old news"), vec![1, 0]);
/// ```
pub struct SharedMatcher {
    /// The published matcher - atomically swappable, lock-free reads
    current: ArcSwap<Matcher>,
    /// Mutex serializing rebuilds; holds the configuration they use
    build_lock: Mutex<MatcherBuilder>,
}

impl std::fmt::Debug for SharedMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedMatcher")
            .field("current", &self.load())
            .finish()
    }
}

impl SharedMatcher {
    /// Publish `matcher` as the first snapshot. Rebuilds reuse its
    /// configuration.
    pub fn new(matcher: Matcher) -> Self {
        let config = matcher.config();
        Self {
            current: ArcSwap::from_pointee(matcher),
            build_lock: Mutex::new(config),
        }
    }

    /// Build from `patterns` with `config` and publish the result.
    pub fn with_config<I, P>(config: MatcherBuilder, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        Ok(Self::new(config.build(patterns)?))
    }

    /// The current snapshot. It stays valid however many rebuilds follow.
    pub fn load(&self) -> Arc<Matcher> {
        self.current.load_full()
    }

    /// [`Matcher::matches`] on the current snapshot.
    pub fn matches(&self, haystack: &[u8]) -> Vec<PatternId> {
        self.current.load().matches(haystack)
    }

    /// [`Matcher::matches_n`] on the current snapshot.
    pub fn matches_n(&self, haystack: &[u8], limit: usize) -> Vec<PatternId> {
        self.current.load().matches_n(haystack, limit)
    }

    /// Compile a new dictionary and publish it.
    ///
    /// Concurrent rebuilds run one at a time. On error the current snapshot
    /// stays published.
    pub fn rebuild<I, P>(&self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let config = self.build_lock.lock();
        let matcher = config.build(patterns)?;
        self.publish_locked(matcher);
        Ok(())
    }

    /// Publish a matcher built elsewhere. Later rebuilds use its
    /// configuration.
    pub fn publish(&self, matcher: Matcher) {
        let mut config = self.build_lock.lock();
        *config = matcher.config();
        self.publish_locked(matcher);
    }

    fn publish_locked(&self, matcher: Matcher) {
        log::debug!(
            "publishing matcher: {} patterns, {} states",
            matcher.pattern_count(),
            matcher.node_count()
        );
        self.current.store(Arc::new(matcher));
    }
}
