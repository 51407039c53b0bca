use syncmap::SyncMap;
use std::collections::HashMap;

fn filled(n: usize) -> SyncMap<usize> {
    let map = SyncMap::with_shard_count(16);
    for i in 0..n {
        map.set(format!("key_{}", i), i);
    }
    map
}

#[test]
fn test_each_item_visits_every_entry_once() {
    let map = filled(500);

    let mut seen = HashMap::new();
    map.each_item(|entry| {
        *seen.entry(entry.key).or_insert(0) += 1;
    });

    assert_eq!(seen.len(), 500);
    assert!(seen.values().all(|&count| count == 1));
}

#[test]
fn test_each_item_carries_values() {
    let map = filled(100);

    map.each_item(|entry| {
        assert_eq!(entry.key, format!("key_{}", entry.value));
    });
}

#[test]
fn test_each_key_with_break_stops_immediately() {
    let map = filled(100);

    let mut visited = Vec::new();
    map.each_key_with_break(|key| {
        visited.push(key.to_string());
        visited.len() < 10
    });

    assert_eq!(visited.len(), 10);
}

#[test]
fn test_each_item_with_break_stops_across_shards() {
    let map = filled(100);

    // The visited prefix must match a full traversal's order up to the stop.
    let mut full = Vec::new();
    map.each_item_with_break(|entry| {
        full.push(entry.key);
        true
    });

    let mut partial = Vec::new();
    map.each_item_with_break(|entry| {
        partial.push(entry.key);
        partial.len() < 37
    });

    assert_eq!(full.len(), 100);
    assert_eq!(partial.len(), 37);
    assert_eq!(&full[..37], &partial[..]);
}

#[test]
fn test_break_on_first_entry() {
    let map = filled(10);

    let mut calls = 0;
    map.each_key_with_break(|_| {
        calls += 1;
        false
    });
    assert_eq!(calls, 1);
}

#[test]
fn test_traversals_over_empty_map() {
    let map: SyncMap<usize> = SyncMap::new();

    map.each_key_with_break(|_| panic!("no keys expected"));
    map.each_item(|_| panic!("no items expected"));
    assert_eq!(map.iter_items().count(), 0);
}

#[test]
fn test_iter_items_yields_everything() {
    let map = filled(300);

    let mut keys: Vec<String> = map.iter_items().map(|entry| entry.key).collect();
    keys.sort();
    keys.dedup();

    assert_eq!(keys.len(), 300);
}

#[test]
fn test_iter_items_matches_callback_order() {
    let map = filled(64);

    let mut walked = Vec::new();
    map.each_item(|entry| walked.push(entry.key));

    let iterated: Vec<String> = map.iter_items().map(|entry| entry.key).collect();
    assert_eq!(walked, iterated);
}

#[test]
fn test_iter_items_abandoned_early() {
    let map = filled(100);

    let first_five: Vec<_> = map.iter_items().take(5).collect();
    assert_eq!(first_five.len(), 5);

    // Nothing is left locked, so writes go through.
    map.flush();
    map.set("after", 1);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_writes_while_iterating() {
    let map = filled(50);

    let mut count = 0;
    for entry in &map {
        // Safe: no shard lock is held while the loop body runs.
        map.set(entry.key.clone(), *entry.value + 1000);
        count += 1;
        if count == 50 {
            break;
        }
    }

    assert_eq!(map.len(), 50);
}

#[test]
fn test_iter_entries_are_snapshots() {
    let map = filled(1);

    let entry = map.iter_items().next().unwrap();
    map.set(entry.key.clone(), 42);

    assert_eq!(*entry.value, 0);
    assert_eq!(*map.get(&entry.key).unwrap(), 42);
}

#[test]
fn test_iter_is_one_shot() {
    let map = filled(20);

    let mut iter = map.iter_items();
    assert_eq!(iter.by_ref().count(), 20);
    assert!(iter.next().is_none());

    // A new call starts a new traversal.
    assert_eq!(map.iter_items().count(), 20);
}
