//! Collision chain owned by a single bucket.

use std::{mem, slice, vec};

/// A key-value pair stored in a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// The key the entry was inserted under
    key: K,
    /// The value associated with the key
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates a new entry
    #[must_use]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key of the entry
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value of the entry
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Splits the entry into its key and value
    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Borrowing iterator over the entries of a chain, oldest first
#[derive(Debug, Clone)]
pub struct Entries<'a, K, V> {
    /// Position in the chain's entry storage
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

/// Ordered sequence of entries whose keys hash to the same bucket.
///
/// Entries for different keys and several entries for the same key can live side by side;
/// the chain never de-duplicates on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain<K, V> {
    /// Entries in insertion order
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Chain<K, V> {
    /// Creates a chain holding a single entry
    #[must_use]
    pub fn new(key: K, value: V) -> Self {
        Self { entries: vec![Entry::new(key, value)] }
    }

    /// Adds an entry to the end of the chain
    pub fn append(&mut self, key: K, value: V) {
        self.entries.push(Entry::new(key, value));
    }

    /// Returns the entries in insertion order.
    ///
    /// Every call starts a fresh pass from the oldest entry.
    #[must_use]
    pub fn entries(&self) -> Entries<'_, K, V> {
        self.iter()
    }

    /// Returns an iterator over the entries, oldest first
    #[must_use]
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries { inner: self.entries.iter() }
    }

    /// Removes every entry matching `predicate` and returns how many were removed
    pub fn remove_matching<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&Entry<K, V>) -> bool,
    {
        self.drain_matching(predicate).len()
    }

    /// Removes every entry matching `predicate` and returns them in chain order.
    ///
    /// The chain is split in a single pass, so adjacent matches are neither skipped nor
    /// visited twice. Surviving entries keep their relative order.
    pub fn drain_matching<F>(&mut self, mut predicate: F) -> Vec<Entry<K, V>>
    where
        F: FnMut(&Entry<K, V>) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            mem::take(&mut self.entries).into_iter().partition(|entry| predicate(entry));
        self.entries = kept;
        removed
    }

    /// Returns true if no entries remain
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the oldest entry, which names the chain in diagnostics
    #[must_use]
    pub fn first(&self) -> Option<&Entry<K, V>> {
        self.entries.first()
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = Entry<K, V>;
    type IntoIter = vec::IntoIter<Entry<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Chain<K, V> {
    type Item = &'a Entry<K, V>;
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(
        (key, value): (&'static str, i32),
        rest: &[(&'static str, i32)],
    ) -> Chain<&'static str, i32> {
        let mut chain = Chain::new(key, value);
        for &(key, value) in rest {
            chain.append(key, value);
        }
        chain
    }

    fn values(chain: &Chain<&'static str, i32>) -> Vec<i32> {
        chain.entries().map(|entry| *entry.value()).collect()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let chain = chain_of(("a", 1), &[("b", 2), ("a", 3)]);

        assert_eq!(chain.len(), 3);
        assert_eq!(values(&chain), vec![1, 2, 3]);
        assert_eq!(chain.first().map(Entry::key), Some(&"a"));
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let chain = chain_of(("a", 1), &[("a", 1)]);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_entries_is_restartable() {
        let chain = chain_of(("a", 1), &[("b", 2)]);

        let first_pass: Vec<_> = chain.entries().collect();
        let second_pass: Vec<_> = chain.entries().collect();

        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 2);
    }

    #[test]
    fn test_iter_matches_borrowed_into_iter() {
        let chain = chain_of(("a", 1), &[("b", 2), ("c", 3)]);

        let by_iter: Vec<_> = chain.iter().map(Entry::key).collect();
        let by_ref: Vec<_> = (&chain).into_iter().map(Entry::key).collect();

        assert_eq!(by_iter, vec![&"a", &"b", &"c"]);
        assert_eq!(by_iter, by_ref);
        assert_eq!(chain.iter().len(), chain.len());
    }

    #[test]
    fn test_remove_matching_adjacent_entries() {
        let mut chain = chain_of(("a", 1), &[("b", 2), ("c", 2), ("d", 2), ("e", 3)]);

        let removed = chain.remove_matching(|entry| *entry.value() == 2);

        assert_eq!(removed, 3);
        assert_eq!(values(&chain), vec![1, 3]);
    }

    #[test]
    fn test_remove_matching_nothing() {
        let mut chain = chain_of(("a", 1), &[]);

        assert_eq!(chain.remove_matching(|entry| *entry.value() == 9), 0);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_drain_matching_until_empty() {
        let mut chain = chain_of(("a", 1), &[("b", 1)]);

        let drained = chain.drain_matching(|_| true);

        assert!(chain.is_empty());
        assert_eq!(chain.first(), None);
        let keys: Vec<_> = drained.into_iter().map(|entry| entry.into_parts().0).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_into_iter_moves_entries() {
        let chain = chain_of(("a", 1), &[("b", 2)]);

        let parts: Vec<_> = chain.into_iter().map(Entry::into_parts).collect();

        assert_eq!(parts, vec![("a", 1), ("b", 2)]);
    }
}
