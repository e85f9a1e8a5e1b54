//! # Chain Map
//!
//! A multimap hash table using closed addressing with separate chaining.
//!
//! Every bucket owns a chain of the entries whose keys hash to it. One key may hold
//! several values, and the table keeps its number of buckets prime, growing to
//! `next_prime(2 * capacity)` just before an insertion would push the load factor past 0.5.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::HashTable;
//!
//! // Create a new table, 7 buckets to start with
//! let mut table = HashTable::new();
//! assert_eq!(table.bucket_count(), 7);
//!
//! // Insert values, a key may own several of them
//! table.insert("Blues Power".to_string(), 1);
//! table.insert("Blues Power".to_string(), 2);
//! table.insert("Angel Eyes".to_string(), 3);
//!
//! assert!(table.contains_key("Blues Power"));
//! assert_eq!(table.get_all("Blues Power"), vec![&1, &2]);
//! assert_eq!(table.len(), 3);
//! ```
//!
//! ## Bucket Granularity
//!
//! Removal works on whole buckets: removing a key detaches every entry that collides with
//! it, not only the entries stored under that key.
//!
//! ```rust
//! use chainmap::{FixedHashBuilder, HashTable};
//!
//! // every key hashes to the same bucket
//! let mut table = HashTable::with_hasher(FixedHashBuilder::<0>::default());
//! table.insert("A", 1);
//! table.insert("B", 2);
//!
//! assert_eq!(table.remove("A"), Some(vec![1, 2]));
//! assert!(!table.contains_key("B"));
//! ```

/// Module implementing the collision chain held by a bucket
pub mod chain;
/// Module loading song records from JSON datasets
pub mod dataset;
/// Error types
pub mod error;
/// Module implementing the separate-chaining hash table
mod hash_table;
/// Hashers and the reduction of hashes to bucket indices
pub mod hashing;
/// Logger setup shared by the binaries
pub mod logger;
/// Prime number helpers used to size the table
pub mod prime;
/// Song records
pub mod song;

pub use error::{DatasetError, Result};
pub use hash_table::{HashTable, MAX_LOAD_FACTOR};
pub use hashing::{DefaultHashBuilder, FixedHashBuilder, IdentityHashBuilder};
pub use prime::MIN_CAPACITY;
pub use song::{SongEntry, SortKey};
