// Thread-safety tests for Matcher and SharedMatcher
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use dictmatch::{Matcher, PatternId, SharedMatcher, Strategy};

fn as_set(ids: Vec<PatternId>) -> BTreeSet<PatternId> {
    ids.into_iter().collect()
}

#[test]
fn test_matcher_is_send_sync() {
    // Compile-time assertion that the shared types are Send + Sync
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<Matcher>();
    assert_sync::<Matcher>();
    assert_send::<SharedMatcher>();
    assert_sync::<SharedMatcher>();
}

#[test]
fn test_concurrent_queries_match_sequential() {
    let _ = env_logger::builder().is_test(true).try_init();

    let patterns: Vec<String> = (0..64).map(|i| format!("token{:02}", i)).collect();
    let inputs: Vec<String> = (0..8)
        .map(|t| {
            (0..64)
                .filter(|i| i % 8 == t)
                .map(|i| format!("..token{:02}..", i))
                .collect()
        })
        .collect();

    for strategy in [Strategy::Nfa, Strategy::Dfa, Strategy::Nibble] {
        let matcher = Arc::new(
            Matcher::builder()
                .strategy(strategy)
                .build(&patterns)
                .expect("dictionary should build"),
        );
        let expected: Vec<BTreeSet<PatternId>> = inputs
            .iter()
            .map(|input| as_set(matcher.matches(input.as_bytes())))
            .collect();

        let handles: Vec<_> = (0..8)
            .map(|thread_id| {
                let matcher = Arc::clone(&matcher);
                let input = inputs[thread_id].clone();
                let expected = expected[thread_id].clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        assert_eq!(as_set(matcher.matches(input.as_bytes())), expected);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}

#[test]
fn test_no_cross_call_contamination() {
    // Every thread hammers the same input mixing full and early-exit scans;
    // a leaked scratch mark would drop ids from a later result.
    let matcher = Arc::new(Matcher::new(["he", "she", "his", "hers"]).unwrap());
    let expected = BTreeSet::from([0, 1, 3]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let matcher = Arc::clone(&matcher);
            let expected = expected.clone();
            thread::spawn(move || {
                for i in 0..2_000 {
                    if i % 3 == 0 {
                        assert_eq!(matcher.matches_n(b"ushers", 1).len(), 1);
                    } else {
                        assert_eq!(as_set(matcher.matches(b"ushers")), expected);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_rebuild_while_reading() {
    let shared = Arc::new(SharedMatcher::new(Matcher::new(["alpha"]).unwrap()));
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    // Either dictionary is acceptable; a snapshot must be
                    // internally consistent.
                    let snapshot = shared.load();
                    let found = snapshot.matches(b"alpha beta");
                    match snapshot.pattern_count() {
                        1 => assert_eq!(found, vec![0]),
                        2 => assert_eq!(found, vec![1, 0]),
                        n => panic!("unexpected dictionary size {}", n),
                    }
                }
            })
        })
        .collect();

    for round in 0..50 {
        if round % 2 == 0 {
            shared.rebuild(["beta", "alpha"]).unwrap();
        } else {
            shared.rebuild(["alpha"]).unwrap();
        }
    }
    stop.store(true, Ordering::Relaxed);

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(shared.load().pattern_count(), 1);
}
