//! Property-Based Tests for the Cache Store
//!
//! Uses proptest to check the size-accounting invariants over arbitrary
//! operation sequences.

use proptest::prelude::*;

use crate::cache::{CacheStore, EvictionPolicy};
use crate::error::CacheError;

const TEST_CAPACITY: u64 = 4096;

// == Strategies ==
/// Keys drawn from a small pool so sequences revisit the same key.
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("http://example.com/a".to_string()),
        Just("http://example.com/b".to_string()),
        Just("http://example.com/c".to_string()),
        Just("http://example.com/assets/app.js".to_string()),
        Just("http://other.org/index.html".to_string()),
    ]
}

fn body_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

fn policy_strategy() -> impl Strategy<Value = EvictionPolicy> {
    prop_oneof![Just(EvictionPolicy::Lru), Just(EvictionPolicy::Lfu)]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Save { key: String, body: Vec<u8> },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), body_strategy()).prop_map(|(key, body)| CacheOp::Save { key, body }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

fn apply(store: &mut CacheStore, op: CacheOp) {
    match op {
        CacheOp::Save { key, body } => {
            let _ = store.save(key, body, None);
        }
        CacheOp::Get { key } => {
            let _ = store.get(&key);
        }
        CacheOp::Remove { key } => {
            store.remove(&key);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // After every step of any operation sequence, the running size counter
    // equals the sum of stored body sizes and stays within capacity.
    #[test]
    fn prop_size_accounting_invariant(
        policy in policy_strategy(),
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let mut store = CacheStore::new(policy, TEST_CAPACITY);

        for op in ops {
            apply(&mut store, op);
            prop_assert!(store.size() <= TEST_CAPACITY, "size {} over capacity", store.size());
            prop_assert_eq!(store.size(), store.summed_size(), "counter drifted from index");
        }
    }

    // Re-saving a key with identical content leaves the total size unchanged.
    #[test]
    fn prop_identical_resave_is_idempotent(
        policy in policy_strategy(),
        key in key_strategy(),
        body in prop::collection::vec(any::<u8>(), 0..1024)
    ) {
        let mut store = CacheStore::new(policy, TEST_CAPACITY);

        store.save(key.clone(), body.clone(), None).unwrap();
        let size_after_first = store.size();

        store.save(key, body, None).unwrap();
        prop_assert_eq!(store.size(), size_after_first);
        prop_assert_eq!(store.len(), 1);
    }

    // Stored content comes back unchanged before any expiry or eviction.
    #[test]
    fn prop_round_trip_returns_stored_body(
        policy in policy_strategy(),
        key in key_strategy(),
        body in body_strategy()
    ) {
        let mut store = CacheStore::new(policy, TEST_CAPACITY);

        store.save(key.clone(), body.clone(), None).unwrap();
        let (got, _) = store.get(&key).unwrap();
        prop_assert_eq!(got, body);
    }

    // A body larger than the whole capacity is rejected and changes nothing,
    // no matter what the cache already holds.
    #[test]
    fn prop_oversized_save_never_corrupts(
        policy in policy_strategy(),
        ops in prop::collection::vec(cache_op_strategy(), 0..20),
        key in key_strategy()
    ) {
        let mut store = CacheStore::new(policy, TEST_CAPACITY);
        for op in ops {
            apply(&mut store, op);
        }

        let size_before = store.size();
        let len_before = store.len();

        let result = store.save(key, vec![0u8; (TEST_CAPACITY + 1) as usize], None);

        let is_too_large = matches!(result, Err(CacheError::TooLarge { .. }));
        prop_assert!(is_too_large);
        prop_assert_eq!(store.size(), size_before);
        prop_assert_eq!(store.len(), len_before);
    }

    // Eviction keeps admitting: any sequence of fitting saves succeeds.
    #[test]
    fn prop_fitting_saves_always_admitted(
        policy in policy_strategy(),
        bodies in prop::collection::vec((key_strategy(), 1usize..4096), 1..40)
    ) {
        let mut store = CacheStore::new(policy, TEST_CAPACITY);

        for (key, len) in bodies {
            let result = store.save(key.clone(), vec![0u8; len], None);
            prop_assert!(result.is_ok(), "fitting save of {} bytes failed", len);
            prop_assert!(store.get(&key).is_ok(), "freshly saved key missing");
        }
    }
}
