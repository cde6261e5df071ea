//! # Sorted Chain Hash Table
//!
//! A hash table from `i64` keys to arbitrary values using separate chaining, where every
//! bucket is kept sorted by key and searched with a binary search.
//!
//! - The bucket of a key is `key mod capacity` (negative keys wrap into range).
//! - Tables start with 3 buckets. When an insert finds the load factor at or above 0.8, the
//!   table grows to `2 * capacity + 1` buckets and rehashes before placing the new entry.
//! - `insert` never overwrites: inserting an existing key returns `false`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use sorted_chain::SortedChainHashTable;
//!
//! let mut table = SortedChainHashTable::new();
//!
//! // Insert values
//! assert!(table.insert(5, "apple"));
//! assert!(table.insert(8, "banana"));
//!
//! // Duplicate keys are rejected and keep the original value
//! assert!(!table.insert(5, "cherry"));
//! assert_eq!(table.find(5), Some(&"apple"));
//!
//! // Remove values
//! table.erase(5);
//! assert_eq!(table.find(5), None);
//!
//! // Get-or-insert-default access
//! let mut counts: SortedChainHashTable<u32> = SortedChainHashTable::new();
//! *counts.get_or_insert_default(10) += 1;
//! assert_eq!(counts.find(10), Some(&1));
//! assert_eq!(counts.len(), 1);
//! ```

/// Sorted buckets and their binary search routines
mod bucket;
/// Internal invariant errors
mod error;
/// Model-based property tests
#[cfg(test)]
mod proptests;
/// Module implementing the sorted-chain hash table
mod sorted_chain_table;
/// Utility functions and traits for the table
mod utils;

pub use bucket::Entry;
pub use error::TableError;
pub use sorted_chain_table::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR_THRESHOLD, Iter, SortedChainHashTable,
};
pub use utils::{TableExtensions, from_iter};
