use proptest::prelude::*;
use std::collections::HashMap;
use syncmap::hash::route;
use syncmap::SyncMap;

proptest! {
    #[test]
    fn prop_route_is_deterministic_and_in_range(key in ".*", exp in 0u32..12) {
        let shards = 1usize << exp;
        let idx = route(&key, shards);
        prop_assert!(idx < shards);
        prop_assert_eq!(idx, route(&key, shards));
    }

    #[test]
    fn prop_set_then_get(entries in prop::collection::hash_map("[a-z0-9-]{0,12}", any::<i64>(), 0..64)) {
        let map = SyncMap::with_shard_count(8);
        for (k, v) in &entries {
            map.set(k.clone(), *v);
        }

        prop_assert_eq!(map.len(), entries.len());
        for (k, v) in &entries {
            prop_assert_eq!(*map.get(k).unwrap(), *v);
            prop_assert!(map.has(k));
        }
    }

    #[test]
    fn prop_matches_a_model(ops in prop::collection::vec((any::<bool>(), 0u8..32, any::<u16>()), 0..200)) {
        let map = SyncMap::with_shard_count(4);
        let mut model = HashMap::new();

        for (is_set, k, v) in ops {
            let key = format!("k{}", k);
            if is_set {
                map.set(key.clone(), v);
                model.insert(key, v);
            } else {
                map.delete(&key);
                model.remove(&key);
            }
        }

        prop_assert_eq!(map.len(), model.len());
        for k in 0u8..32 {
            let key = format!("k{}", k);
            prop_assert_eq!(map.get(&key).map(|v| *v), model.get(&key).copied());
        }

        let mut visited = HashMap::new();
        map.each_item(|entry| {
            visited.insert(entry.key, *entry.value);
        });
        prop_assert_eq!(&visited, &model);

        prop_assert_eq!(map.flush(), model.len());
        prop_assert!(map.is_empty());
    }
}
