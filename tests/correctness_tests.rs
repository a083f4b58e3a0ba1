//! Correctness Tests for the Ordered LRU Cache
//!
//! This module validates eviction order, recency updates and ordered traversal
//! using small, predictable access patterns. Each eviction test checks
//! explicitly which key left the cache.
//!
//! ## Test Strategy
//! - Small cache sizes (3-5 entries) for predictable behavior
//! - Traversal is always checked through cursors, the way callers walk the cache
//! - Cursor invalidation is checked through the `try_*` operations

use ordered_lru::config::LruCacheConfig;
use ordered_lru::{Cursor, CursorError, LruCache};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper to create an LruCache with the given capacity
fn make_lru<K: Ord, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(LruCacheConfig { capacity: cap })
}

/// Walks the cache from `begin()` to `end()` with cursors
fn traverse<K: Clone, V: Clone>(cache: &LruCache<K, V>) -> Vec<(K, V)> {
    let mut out = Vec::new();
    let mut at = cache.begin();
    while at != cache.end() {
        let (k, v) = cache.get(at);
        out.push((k.clone(), v.clone()));
        at = cache.advance(at);
    }
    out
}

fn keys<V>(cache: &LruCache<i32, V>) -> Vec<i32> {
    cache.iter().map(|(k, _)| *k).collect()
}

/// The three-entry cache from the basic scenarios
fn abc() -> LruCache<i32, &'static str> {
    let mut cache = make_lru(3);
    cache.insert(1, "a");
    cache.insert(2, "b");
    cache.insert(3, "c");
    cache
}

// ============================================================================
// BASIC SCENARIOS
// ============================================================================

#[test]
fn test_insert_three_traverses_in_key_order() {
    let cache = abc();
    assert_eq!(traverse(&cache), [(1, "a"), (2, "b"), (3, "c")]);
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_insert_into_full_cache_evicts_oldest() {
    let mut cache = abc();
    let (_, inserted) = cache.insert(4, "d");
    assert!(inserted);
    assert_eq!(traverse(&cache), [(2, "b"), (3, "c"), (4, "d")]);
}

#[test]
fn test_find_promotes_before_eviction() {
    let mut cache = abc();
    assert!(!cache.find(&1).is_end());
    cache.insert(4, "d");
    assert_eq!(traverse(&cache), [(1, "a"), (3, "c"), (4, "d")]);
}

#[test]
fn test_duplicate_insert_keeps_value_and_promotes() {
    let mut cache = abc();
    let (at, inserted) = cache.insert(1, "z");
    assert!(!inserted);
    assert_eq!(cache.get(at), (&1, &"a"));

    cache.insert(4, "d");
    assert!(cache.find(&2).is_end(), "key 2 should have been evicted");
    assert_eq!(cache.peek(&1), Some(&"a"));
    assert_eq!(traverse(&cache), [(1, "a"), (3, "c"), (4, "d")]);
}

#[test]
fn test_find_missing_key_returns_end() {
    let mut cache = abc();
    let at = cache.find(&99);
    assert!(at.is_end());
    assert_eq!(at, cache.end());
    assert_eq!(cache.try_get(at), Err(CursorError::End));
}

#[test]
#[should_panic]
fn test_dereferencing_end_is_a_contract_violation() {
    let mut cache = abc();
    let at = cache.find(&99);
    let _ = cache.get(at);
}

#[test]
fn test_erase_found_entry() {
    let mut cache = abc();
    let at = cache.find(&2);
    assert_eq!(cache.erase(at), (2, "b"));
    assert!(cache.find(&2).is_end());
    assert_eq!(cache.len(), 2);
    assert_eq!(traverse(&cache), [(1, "a"), (3, "c")]);
}

// ============================================================================
// EVICTION ORDER
// ============================================================================

#[test]
fn test_lru_eviction_order_is_predictable() {
    let mut cache = make_lru(4);
    for k in [10, 20, 30, 40] {
        cache.insert(k, k);
    }

    // Each new key evicts the oldest remaining original key
    for (new_key, evicted) in [(50, 10), (60, 20), (70, 30), (80, 40)] {
        assert_eq!(cache.peek_lru(), Some((&evicted, &evicted)));
        cache.insert(new_key, new_key);
        assert!(!cache.contains_key(&evicted), "{evicted} should be evicted");
        assert_eq!(cache.len(), 4);
    }
    assert_eq!(keys(&cache), [50, 60, 70, 80]);
}

#[test]
fn test_evicted_key_is_least_recently_touched() {
    let mut cache = make_lru(5);
    for k in 1..=5 {
        cache.insert(k, ());
    }
    // Touch everything except 3, mixing find and duplicate insert
    cache.find(&1);
    cache.insert(2, ());
    cache.find(&4);
    cache.insert(5, ());

    cache.insert(6, ());
    assert!(!cache.contains_key(&3));
    assert_eq!(keys(&cache), [1, 2, 4, 5, 6]);
}

#[test]
fn test_find_protects_key_until_capacity_more_inserts() {
    let mut cache = make_lru(3);
    for k in 1..=3 {
        cache.insert(k, ());
    }
    cache.find(&1);

    // Two new keys evict 2 and 3, not 1
    cache.insert(4, ());
    cache.insert(5, ());
    assert!(cache.contains_key(&1));
    assert_eq!(keys(&cache), [1, 4, 5]);

    // The third new key finally reaches 1
    cache.insert(6, ());
    assert!(!cache.contains_key(&1));
}

#[test]
fn test_failed_find_does_not_change_recency() {
    let mut cache = abc();
    cache.find(&42);
    cache.insert(4, "d");
    assert!(!cache.contains_key(&1));
}

#[test]
fn test_peek_and_iteration_do_not_change_recency() {
    let mut cache = abc();
    assert_eq!(cache.peek(&1), Some(&"a"));
    assert_eq!(traverse(&cache).len(), 3);
    assert_eq!(cache.iter().rev().count(), 3);
    cache.insert(4, "d");
    assert!(!cache.contains_key(&1));
}

#[test]
fn test_recency_iter_reports_lru_first() {
    let mut cache = abc();
    cache.find(&2);
    cache.insert(3, "x");
    let order: Vec<i32> = cache.recency_iter().map(|(k, _)| *k).collect();
    assert_eq!(order, [1, 2, 3]);
    cache.find(&1);
    let order: Vec<i32> = cache.recency_iter().map(|(k, _)| *k).collect();
    assert_eq!(order, [2, 3, 1]);
}

// ============================================================================
// ERASE
// ============================================================================

#[test]
fn test_erase_decrements_len_by_exactly_one() {
    let mut cache = make_lru(8);
    for k in [5, 3, 8, 1, 4, 7, 9, 2] {
        cache.insert(k, k * 100);
    }
    for k in [3, 8, 1, 5] {
        let before = cache.len();
        let at = cache.find(&k);
        cache.erase(at);
        assert_eq!(cache.len(), before - 1);
        assert!(cache.find(&k).is_end());
        assert!(!keys(&cache).contains(&k));
    }
    assert_eq!(keys(&cache), [2, 4, 7, 9]);
}

#[test]
fn test_erase_keeps_cursors_to_other_entries() {
    let mut cache = make_lru(5);
    for k in 1..=5 {
        cache.insert(k, k);
    }
    // Interior erases relink the tree around the survivors' slots
    let survivors: Vec<(i32, Cursor)> = [1, 3, 4, 5]
        .into_iter()
        .map(|k| (k, cache.find(&k)))
        .collect();
    let two = cache.find(&2);
    cache.erase(two);
    let four = cache.find(&4);
    let (k, _) = cache.erase(four);
    assert_eq!(k, 4);

    for (k, at) in survivors {
        if k == 4 {
            assert!(!cache.is_valid(at));
        } else {
            assert_eq!(cache.get(at), (&k, &k));
        }
    }
}

#[test]
fn test_advance_after_erase_of_neighbor() {
    let mut cache = make_lru(5);
    for k in 1..=5 {
        cache.insert(k, ());
    }
    let three = cache.find(&3);
    let two = cache.find(&2);
    cache.erase(two);
    assert_eq!(*cache.get(cache.advance(cache.begin())).0, 3);
    assert_eq!(*cache.get(cache.retreat(three)).0, 1);
    assert_eq!(*cache.get(cache.advance(three)).0, 4);
}

#[test]
fn test_erase_in_place_while_walking() {
    let mut cache = make_lru(10);
    for k in 0..10 {
        cache.insert(k, k);
    }
    // Drop odd keys, advancing past each victim before erasing it
    let mut at = cache.begin();
    while at != cache.end() {
        let next = cache.advance(at);
        if cache.get(at).0 % 2 == 1 {
            cache.erase(at);
        }
        at = next;
    }
    assert_eq!(keys(&cache), [0, 2, 4, 6, 8]);
}

#[test]
fn test_remove_by_key() {
    let mut cache = abc();
    assert_eq!(cache.remove(&2), Some("b"));
    assert_eq!(cache.remove(&2), None);
    assert_eq!(traverse(&cache), [(1, "a"), (3, "c")]);
    // Removing 2 freed a slot, so 4 is admitted without evicting 1
    cache.insert(4, "d");
    assert_eq!(keys(&cache), [1, 3, 4]);
}

// ============================================================================
// CURSOR INVALIDATION
// ============================================================================

#[test]
fn test_cursor_to_evicted_entry_is_stale() {
    let mut cache = make_lru(2);
    let (one, _) = cache.insert(1, "a");
    cache.insert(2, "b");
    let (three, _) = cache.insert(3, "c");

    assert!(!cache.is_valid(one));
    assert_eq!(cache.try_get(one), Err(CursorError::Stale));
    assert_eq!(cache.try_advance(one), Err(CursorError::Stale));
    assert_eq!(cache.try_retreat(one), Err(CursorError::Stale));
    assert_ne!(one, three);
    assert_eq!(cache.get(three), (&3, &"c"));
}

#[test]
#[should_panic(expected = "no longer in the cache")]
fn test_stale_cursor_access_panics() {
    let mut cache = make_lru(1);
    let (first, _) = cache.insert(1, 1);
    cache.insert(2, 2);
    let _ = cache.get(first);
}

#[test]
fn test_cursor_to_erased_entry_is_stale_after_slot_reuse() {
    let mut cache = make_lru(3);
    let (one, _) = cache.insert(1, "a");
    cache.erase(one);
    let (two, _) = cache.insert(2, "b");
    assert_eq!(cache.try_get(one), Err(CursorError::Stale));
    assert_eq!(cache.get(two), (&2, &"b"));
}

#[test]
fn test_cursors_survive_promotion() {
    let mut cache = abc();
    let begin = cache.begin();
    cache.find(&1);
    cache.insert(2, "x");
    assert_eq!(cache.get(begin), (&1, &"a"));
    assert_eq!(cache.begin(), begin);
}

#[test]
fn test_clear_invalidates_all_cursors_but_end() {
    let mut cache = abc();
    let cursors: Vec<Cursor> = [1, 2, 3].iter().map(|k| cache.find(k)).collect();
    let end = cache.end();
    cache.clear();
    assert!(cursors.iter().all(|&at| !cache.is_valid(at)));
    assert!(cache.is_valid(end));
    assert_eq!(cache.begin(), end);
}

#[test]
fn test_get_mut_updates_value_in_place() {
    let mut cache = abc();
    let at = cache.find(&2);
    *cache.get_mut(at).1 = "B";
    assert_eq!(traverse(&cache), [(1, "a"), (2, "B"), (3, "c")]);
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
fn test_zero_capacity_never_admits() {
    let mut cache = make_lru(0);
    for k in 0..5 {
        let (at, inserted) = cache.insert(k, k);
        assert!(!inserted);
        assert_eq!(at, cache.end());
    }
    assert!(cache.is_empty());
    assert_eq!(cache.begin(), cache.end());
    assert!(cache.find(&0).is_end());
}

#[test]
fn test_capacity_one_replaces_on_every_new_key() {
    let mut cache = make_lru(1);
    for k in 0..10 {
        cache.insert(k, k);
        assert_eq!(keys(&cache), [k]);
    }
}

#[test]
fn test_empty_cache_cursors() {
    let cache: LruCache<i32, i32> = make_lru(4);
    assert_eq!(cache.begin(), cache.end());
    assert_eq!(cache.try_retreat(cache.end()), Err(CursorError::BeforeBegin));
    assert_eq!(cache.iter().next(), None);
    assert_eq!(cache.peek_lru(), None);
    assert_eq!(cache.peek_mru(), None);
}

#[test]
fn test_reverse_walk_from_end() {
    let mut cache = make_lru(6);
    for k in [6, 2, 4, 1, 5, 3] {
        cache.insert(k, ());
    }
    let mut out = Vec::new();
    let mut at = cache.end();
    while let Ok(prev) = cache.try_retreat(at) {
        out.push(*cache.get(prev).0);
        at = prev;
    }
    assert_eq!(out, [6, 5, 4, 3, 2, 1]);
    assert_eq!(at, cache.begin());
}

#[test]
fn test_ascending_insert_order_stays_sorted_under_eviction() {
    let mut cache = make_lru(64);
    for k in 0..1_000 {
        cache.insert(k, k);
        assert!(cache.len() <= 64);
    }
    let expected: Vec<i32> = (936..1_000).collect();
    assert_eq!(keys(&cache), expected);
}

#[test]
fn test_string_keys_with_borrowed_lookup() {
    let mut cache: LruCache<String, usize> = make_lru(3);
    for word in ["pear", "apple", "fig"] {
        cache.insert(word.to_string(), word.len());
    }
    assert!(!cache.find("apple").is_end());
    let words: Vec<&str> = cache.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(words, ["apple", "fig", "pear"]);
    cache.insert("kiwi".to_string(), 4);
    assert!(!cache.contains_key("pear"));
}
