//! Utility functions and traits for `SortedChainHashTable`

use crate::SortedChainHashTable;

/// Extension trait for the table that provides additional utility methods
pub trait TableExtensions<V> {
    /// Returns the values of the table as a Vec, in iteration order
    fn values(&self) -> Vec<V>;

    /// Returns the keys of the table in ascending order
    fn sorted_keys(&self) -> Vec<i64>;

    /// Returns cloned key-value pairs, in iteration order
    fn entries(&self) -> Vec<(i64, V)>;
}

impl<V> TableExtensions<V> for SortedChainHashTable<V>
where
    V: Clone,
{
    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn sorted_keys(&self) -> Vec<i64> {
        let mut keys = self.keys().to_vec();
        keys.sort_unstable();
        keys
    }

    fn entries(&self) -> Vec<(i64, V)> {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }
}

/// Creates a `SortedChainHashTable` from an iterator of key-value pairs.
///
/// Later pairs with a key that was already seen are ignored.
pub fn from_iter<V, I>(iter: I) -> SortedChainHashTable<V>
where
    I: IntoIterator<Item = (i64, V)>,
{
    let mut table = SortedChainHashTable::new();

    for (key, value) in iter {
        table.insert(key, value);
    }

    table
}
