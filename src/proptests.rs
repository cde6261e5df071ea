use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_table<V>(t: &SortedChainHashTable<V>) {
    let capacity = t.capacity();
    assert!(capacity > 0, "table must always have at least one bucket");
    assert!(
        capacity.wrapping_add(1).is_power_of_two(),
        "capacity {capacity} is not reachable from 3 by 2n+1 growth"
    );
    let modulus = i64::try_from(capacity).unwrap();

    let mut stored = Vec::new();
    for (index, bucket) in t.buckets().enumerate() {
        for pair in bucket.windows(2) {
            assert!(
                pair[0].key() < pair[1].key(),
                "bucket {index} not strictly ascending: {} then {}",
                pair[0].key(),
                pair[1].key()
            );
        }
        for entry in bucket {
            assert_eq!(
                usize::try_from(entry.key().rem_euclid(modulus)).unwrap(),
                index,
                "key {} sits in the wrong bucket",
                entry.key()
            );
            stored.push(entry.key());
        }
    }

    assert_eq!(stored.len(), t.len(), "len must match the number of stored entries");

    let mut indexed = t.keys().to_vec();
    indexed.sort_unstable();
    stored.sort_unstable();
    assert_eq!(indexed, stored, "key index must list exactly the stored keys");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i64, u32),
    Erase(i64),
    Find(i64),
    Bump(i64),
    Clear,
}

fn key_strategy() -> impl Strategy<Value = i64> + Clone {
    // Mostly a narrow band so buckets collide and hold several entries.
    prop_oneof![
        9 => -64i64..64,
        1 => any::<i64>(),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        45 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        20 => key.clone().prop_map(Op::Erase),
        20 => key.clone().prop_map(Op::Find),
        14 => key.clone().prop_map(Op::Bump),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #[test]
    fn matches_btreemap_model(ops in ops_strategy()) {
        let mut table = SortedChainHashTable::new();
        let mut model: BTreeMap<i64, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let fresh = !model.contains_key(&k);
                    if fresh {
                        model.insert(k, v);
                    }
                    prop_assert_eq!(table.insert(k, v), fresh);
                }
                Op::Erase(k) => {
                    prop_assert_eq!(table.erase(k), model.remove(&k));
                }
                Op::Find(k) => {
                    prop_assert_eq!(table.find(k), model.get(&k));
                }
                Op::Bump(k) => {
                    let slot = table.get_or_insert_default(k);
                    *slot = slot.wrapping_add(1);
                    let expected = model.entry(k).or_default();
                    *expected = expected.wrapping_add(1);
                }
                Op::Clear => {
                    table.clear();
                    model.clear();
                    prop_assert_eq!(table.capacity(), DEFAULT_INITIAL_CAPACITY);
                }
            }
            validate_table(&table);
        }

        prop_assert_eq!(table.len(), model.len());
        prop_assert_eq!(table.is_empty(), model.is_empty());
        for (k, v) in &model {
            prop_assert_eq!(table.find(*k), Some(v));
        }
    }

    #[test]
    fn erase_of_absent_key_is_idempotent(
        keys in prop::collection::vec(key_strategy(), 0..100),
        absent in key_strategy(),
    ) {
        let mut table: SortedChainHashTable<i64> = keys.iter().map(|&k| (k, k)).collect();
        table.erase(absent);

        let before: Vec<Vec<i64>> =
            table.buckets().map(|b| b.iter().map(Entry::key).collect()).collect();
        let len = table.len();

        table.erase(absent);

        let after: Vec<Vec<i64>> =
            table.buckets().map(|b| b.iter().map(Entry::key).collect()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(table.len(), len);
        prop_assert_eq!(table.find(absent), None);
    }

    #[test]
    fn round_trip_after_any_inserts(
        keys in prop::collection::btree_set(key_strategy(), 1..200),
    ) {
        let mut table = SortedChainHashTable::new();
        for &k in &keys {
            prop_assert!(table.insert(k, k.wrapping_mul(3)));
        }
        for &k in &keys {
            let expected = k.wrapping_mul(3);
            prop_assert_eq!(table.find(k), Some(&expected));
        }
        validate_table(&table);
    }
}

#[test]
fn sequential_keys_rehash_consistently() {
    let mut table = SortedChainHashTable::new();
    let mut capacities = vec![table.capacity()];

    for key in 0..1000 {
        assert!(table.insert(key, key));
        validate_table(&table);
        if capacities.last() != Some(&table.capacity()) {
            capacities.push(table.capacity());
        }
    }

    assert_eq!(capacities, vec![3, 7, 15, 31, 63, 127, 255, 511, 1023, 2047]);
    for key in 0..1000 {
        assert_eq!(table.find(key), Some(&key));
    }
}

#[test]
fn growth_fires_on_fourth_insert_from_default_capacity() {
    let mut table = SortedChainHashTable::new();
    for key in 0..3 {
        table.insert(key, ());
    }
    assert_eq!(table.capacity(), 3);

    table.insert(3, ());
    assert_eq!(table.capacity(), 7);
    validate_table(&table);
}
