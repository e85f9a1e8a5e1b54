use chainmap::{HashTable, IdentityHashBuilder, MIN_CAPACITY, prime::is_prime};
use proptest::{collection::vec, prelude::*};

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Remove(u8),
    RemoveValue(u8, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u8>(), any::<u8>()).prop_map(|(key, value)| Op::Insert(key, value)),
        1 => any::<u8>().prop_map(Op::Remove),
        1 => (any::<u8>(), any::<u8>()).prop_map(|(key, value)| Op::RemoveValue(key, value)),
    ]
}

fn identity_table<K, V>(capacity: usize) -> HashTable<K, V, IdentityHashBuilder> {
    HashTable::with_capacity_and_hasher(capacity, IdentityHashBuilder::default())
}

proptest! {
    #[test]
    fn capacity_is_always_an_odd_prime(
        requested in 0_usize..500,
        keys in vec(any::<i64>(), 0..300),
    ) {
        let mut table = identity_table(requested);
        prop_assert!(table.bucket_count() >= MIN_CAPACITY);
        prop_assert!(table.bucket_count() >= requested);

        for key in keys {
            table.insert(key, ());
            let capacity = table.bucket_count();
            prop_assert!(capacity >= MIN_CAPACITY);
            prop_assert_eq!(capacity % 2, 1);
            prop_assert!(is_prime(capacity));
        }
    }

    #[test]
    fn load_stays_bounded_after_insert(keys in vec(any::<String>(), 0..300)) {
        let mut table = HashTable::new();

        for key in keys {
            table.insert(key, 0_u8);
            prop_assert!(table.len() <= table.bucket_count());
            prop_assert!(table.len() <= table.bucket_count().div_ceil(2));
        }
    }

    #[test]
    fn bucket_count_never_shrinks(ops in vec(op(), 0..400)) {
        let mut table = identity_table(0);
        let mut previous = table.bucket_count();

        for op in ops {
            match op {
                Op::Insert(key, value) => table.insert(key, value),
                Op::Remove(key) => {
                    let _removed = table.remove(&key);
                }
                Op::RemoveValue(key, value) => {
                    let _removed = table.remove_value(&key, &value);
                }
            }
            prop_assert!(table.bucket_count() >= previous);
            previous = table.bucket_count();
        }
    }

    #[test]
    fn rehash_preserves_membership(keys in vec(any::<i64>(), 1..200)) {
        let mut table = identity_table(0);
        for &key in &keys {
            table.insert(key, key);
        }

        table.rehash();

        prop_assert_eq!(table.len(), keys.len());
        for key in &keys {
            prop_assert!(table.contains_key(key));
        }
    }

    #[test]
    fn membership_survives_growth(keys in vec(any::<u32>(), 1..200)) {
        let mut table = HashTable::new();

        for (inserted, &key) in keys.iter().enumerate() {
            let before = table.bucket_count();
            table.insert(key, inserted);
            if table.bucket_count() != before {
                prop_assert!(keys.iter().take(inserted + 1).all(|key| table.contains_key(key)));
            }
        }
        prop_assert!(keys.iter().all(|key| table.contains_key(key)));
    }

    #[test]
    fn insert_then_remove_round_trip(
        keys in vec(any::<u16>(), 0..100),
        key in any::<u16>(),
        value in any::<u16>(),
    ) {
        let mut table = identity_table(0);
        for &other in &keys {
            table.insert(other, other);
        }

        table.insert(key, value);
        prop_assert!(table.contains_key(&key));

        let removed = table.remove(&key);
        prop_assert!(removed.is_some_and(|values| values.contains(&value)));
        prop_assert!(!table.contains_key(&key));
    }

    #[test]
    fn len_matches_chains_without_value_removal(ops in vec(op(), 0..400)) {
        let mut table = identity_table(0);

        for op in ops {
            match op {
                Op::Insert(key, value) => table.insert(key, value),
                Op::Remove(key) | Op::RemoveValue(key, _) => {
                    let _removed = table.remove(&key);
                }
            }
            prop_assert_eq!(table.len(), table.chain_lengths().sum::<usize>());
            prop_assert_eq!(table.len(), table.iter().count());
        }
    }
}
