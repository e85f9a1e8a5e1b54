use std::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
    iter, mem,
};

use log::{debug, trace};

use crate::{
    chain::{Chain, Entry},
    hashing::{DefaultHashBuilder, bucket_index},
    prime::{MIN_CAPACITY, next_prime},
};

/// Load factor the table grows at, checked before every insertion
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// A multimap hash table using separate chaining.
///
/// Every bucket holds an optional [`Chain`] of the entries hashing to it. One key may own
/// several values, and entries of different keys share a chain when they collide. The
/// number of buckets is always a prime `>= 7` and only ever grows: an insertion that finds
/// `len >= ceil(capacity * 0.5)` first rebuilds the table with `next_prime(2 * capacity)`
/// buckets.
///
/// Removal works at bucket granularity: [`HashTable::remove`] drops the whole chain the key
/// hashes to, and [`HashTable::remove_value`] matches values across that whole chain,
/// whatever their keys.
///
/// Note: This implementation is not thread-safe. Mutation needs exclusive access.
#[derive(Debug, Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    /// Bucket slots, empty until the first entry hashes to them
    buckets: Vec<Option<Chain<K, V>>>,
    /// Number of entries tracked across all chains
    len: usize,
    /// Builds the hasher that produces the structural hash of a key
    hash_builder: S,
}

/// Number of entries at which the next insertion grows a table of `capacity` buckets
const fn growth_threshold(capacity: usize) -> usize {
    // ceil(capacity * MAX_LOAD_FACTOR)
    capacity.div_ceil(2)
}

/// Capacity a table is allocated with when `requested` buckets are asked for
fn initial_capacity(requested: usize) -> usize {
    if requested < MIN_CAPACITY { MIN_CAPACITY } else { next_prime(requested) }
}

/// Allocates `capacity` empty bucket slots
fn empty_buckets<K, V>(capacity: usize) -> Vec<Option<Chain<K, V>>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

impl<K, V> HashTable<K, V, DefaultHashBuilder> {
    /// Creates an empty table with the minimum capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` buckets.
    ///
    /// Requests below 7 are raised to 7, anything else is rounded up to a prime.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table with the minimum capacity, hashing keys with `hash_builder`
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(MIN_CAPACITY, hash_builder)
    }

    /// Creates an empty table with at least `capacity` buckets, hashing keys with
    /// `hash_builder`
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self { buckets: empty_buckets(initial_capacity(capacity)), len: 0, hash_builder }
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets, which is always a prime `>= 7`
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the hash builder of the table
    #[must_use]
    pub const fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the entries in bucket order, each chain oldest first
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .flat_map(Chain::entries)
            .map(|entry| (entry.key(), entry.value()))
    }

    /// Returns the length of the chain in every bucket, 0 for empty buckets
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> {
        self.buckets.iter().map(|slot| slot.as_ref().map_or(0, Chain::len))
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the bucket `key` hashes to under the current capacity
    #[must_use]
    pub fn hash_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let index = bucket_index(hash, self.buckets.len());
        trace!("hash {hash:#018x} -> bucket {index} of {}", self.buckets.len());
        index
    }

    /// Returns the chain in the bucket `key` hashes to
    fn chain_for<Q>(&self, key: &Q) -> Option<&Chain<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.buckets.get(self.hash_of(key)).and_then(Option::as_ref)
    }

    /// Inserts a key-value pair.
    ///
    /// The table grows before the pair is placed if it already holds
    /// `ceil(capacity * 0.5)` entries. The pair is appended to the bucket's chain even when
    /// an equal pair is already there; use [`HashTable::insert_unique`] to skip duplicates.
    pub fn insert(&mut self, key: K, value: V) {
        if self.len >= growth_threshold(self.buckets.len()) {
            self.rehash();
        }

        let index = self.hash_of(&key);
        let Some(slot) = self.buckets.get_mut(index) else {
            // `hash_of` always lands inside the bucket array
            return;
        };
        match slot {
            Some(chain) => chain.append(key, value),
            None => *slot = Some(Chain::new(key, value)),
        }

        self.len = self.len.saturating_add(1);
    }

    /// Inserts a key-value pair unless an entry with an equal key and an equal value is
    /// already stored. Returns true if the pair was inserted.
    pub fn insert_unique(&mut self, key: K, value: V) -> bool
    where
        V: PartialEq,
    {
        let duplicate = self.chain_for(&key).is_some_and(|chain| {
            chain.entries().any(|entry| *entry.key() == key && *entry.value() == value)
        });
        if duplicate {
            return false;
        }

        self.insert(key, value);
        true
    }

    /// Returns true if an entry with a key equal to `key` is stored
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.chain_for(key)
            .is_some_and(|chain| chain.entries().any(|entry| entry.key().borrow() == key))
    }

    /// Returns the values stored under a key equal to `key`, oldest first
    #[must_use]
    pub fn get_all<Q>(&self, key: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.chain_for(key).map_or_else(Vec::new, |chain| {
            chain
                .entries()
                .filter(|entry| entry.key().borrow() == key)
                .map(Entry::value)
                .collect()
        })
    }

    /// Detaches the whole chain in the bucket `key` hashes to and returns its values.
    ///
    /// Entries of other keys that collide with `key` are removed along with it. Returns
    /// `None` if the bucket is empty.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Vec<V>>
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let index = self.hash_of(key);
        let chain = self.buckets.get_mut(index)?.take()?;
        self.len = self.len.saturating_sub(chain.len());

        Some(chain.into_iter().map(|entry| entry.into_parts().1).collect())
    }

    /// Removes every entry whose value equals `value` from the bucket `key` hashes to.
    ///
    /// Values are matched across the whole chain, whatever the entries' keys. Returns the
    /// last removed value, or `None` if nothing matched or the bucket is empty. When the
    /// bucket exists the entry count drops by exactly one, however many entries were
    /// removed, so [`HashTable::len`] can drift from the number of stored entries.
    pub fn remove_value<Q>(&mut self, key: &Q, value: &V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
        V: PartialEq,
    {
        let index = self.hash_of(key);
        let slot = self.buckets.get_mut(index)?;
        let chain = slot.as_mut()?;

        let mut removed = chain.drain_matching(|entry| entry.value() == value);
        if chain.is_empty() {
            *slot = None;
        }
        self.len = self.len.saturating_sub(1);

        removed.pop().map(|entry| entry.into_parts().1)
    }

    /// Rebuilds the table with `next_prime(2 * capacity)` buckets.
    ///
    /// Every entry is moved into the new bucket array through [`HashTable::insert`], chain
    /// by chain in bucket order.
    pub fn rehash(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = next_prime(old_capacity.saturating_mul(2));
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));

        debug!("rehash: {old_capacity} -> {new_capacity} buckets, {} entries", self.len);
        self.len = 0;

        for (key, value) in old_buckets.into_iter().flatten().flatten().map(Entry::into_parts) {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    /// Renders the non-empty buckets and their values for diagnostics.
    ///
    /// Each line names a bucket by the key of its oldest entry. The format is not stable.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl<K, V, S> fmt::Display for HashTable<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for chain in self.buckets.iter().flatten() {
            if let Some(first) = chain.first() {
                write!(f, "{} : {{", first.key())?;
            }
            for (position, entry) in chain.entries().enumerate() {
                if position > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}", entry.value())?;
            }
            writeln!(f, "}}")?;
        }
        write!(f, "]")
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}
