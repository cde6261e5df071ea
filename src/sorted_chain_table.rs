use std::{fmt, iter::Flatten, mem, slice};

use log::{debug, error, trace};

use crate::{
    bucket::{Bucket, Entry, insert_sorted, ordered_search},
    error::TableError,
};

/// Number of buckets a table starts with and returns to on [`SortedChainHashTable::clear`]
pub const DEFAULT_INITIAL_CAPACITY: usize = 3;

/// Load factor, as a percentage, at which an insert grows the table
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: usize = 80;

/// A hash table from `i64` keys to values of type `V`, using separate chaining.
///
/// Every bucket is kept sorted by key, so lookups inside a bucket are binary searches. The
/// bucket of a key is `key mod capacity`. When an insert finds the load factor at or above
/// the threshold, the table grows to `2 * capacity + 1` buckets and the displaced entries are
/// moved to their new buckets before the new entry is placed.
///
/// References handed out by [`find`](Self::find), [`find_mut`](Self::find_mut) and
/// [`get_or_insert_default`](Self::get_or_insert_default) borrow the table, so they cannot
/// outlive the next mutating call, which may relocate entries.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct SortedChainHashTable<V> {
    /// The buckets, each sorted ascending by key
    table: Vec<Bucket<V>>,
    /// Every stored key in insertion order, kept in step with the buckets
    keys: Vec<i64>,
    /// Capacity used at construction and restored by `clear`
    initial_capacity: usize,
    /// Threshold for load factor before resizing - stored as percentage (1-100)
    load_factor_threshold: usize,
}

impl<V> Default for SortedChainHashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(i64, V)> for SortedChainHashTable<V> {
    fn extend<T: IntoIterator<Item = (i64, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for SortedChainHashTable<V> {
    fn from_iter<T: IntoIterator<Item = (i64, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Logs an internal invariant breach and aborts the current operation.
#[cold]
#[allow(clippy::panic)]
fn fatal(err: &TableError) -> ! {
    error!("sorted chain table corrupted: {err}");
    panic!("sorted chain table corrupted: {err}");
}

/// Maps `key` onto `0..capacity`, wrapping negative keys into range
fn bucket_index(key: i64, capacity: usize) -> usize {
    let modulus = i64::try_from(capacity.max(1)).unwrap_or(i64::MAX);
    // rem_euclid is non-negative and below `capacity`, so it always fits
    usize::try_from(key.rem_euclid(modulus)).unwrap_or_default()
}

impl<V> SortedChainHashTable<V> {
    /// Creates an empty table with [`DEFAULT_INITIAL_CAPACITY`] buckets
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty table with `capacity` buckets (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            table: Self::empty_buckets(capacity),
            keys: Vec::new(),
            initial_capacity: capacity,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }

    /// Allocates `capacity` empty buckets
    fn empty_buckets(capacity: usize) -> Vec<Bucket<V>> {
        let mut table = Vec::with_capacity(capacity);
        table.resize_with(capacity, Vec::new);
        table
    }

    /// Provide a way to configure the load factor threshold, as a percentage
    pub fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.load_factor_threshold = threshold.clamp(1, 100);
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the current number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Returns the number of buckets the table starts with and is reset to by `clear`
    #[must_use]
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Returns every stored key in the order it was added.
    ///
    /// This is a flat index kept alongside the buckets; removing a key from it is a linear
    /// scan.
    #[must_use]
    pub fn keys(&self) -> &[i64] {
        &self.keys
    }

    /// Gets the bucket index for a key under the current capacity
    fn index_of(&self, key: i64) -> usize {
        bucket_index(key, self.table.len())
    }

    /// Finds the position of `key` inside bucket `index`
    fn locate(&self, index: usize, key: i64) -> Option<usize> {
        let bucket = self.table.get(index)?;
        ordered_search(bucket, key, 0, bucket.len())
    }

    /// Returns true if the table should grow before taking one more entry
    fn needs_growth(&self) -> bool {
        self.len().saturating_mul(100) >= self.capacity().saturating_mul(self.load_factor_threshold)
    }

    /// Places `entry` into the bucket its key maps to, checking that the bucket grew by one.
    ///
    /// Returns the bucket index and the position inside the bucket. Does not touch the key
    /// index.
    fn place(&mut self, entry: Entry<V>) -> Result<(usize, usize), TableError> {
        let key = entry.key();
        let index = self.index_of(key);
        let bucket =
            self.table.get_mut(index).ok_or(TableError::MissingEntry { key, bucket: index })?;

        let before = bucket.len();
        let position = insert_sorted(bucket, entry)?;
        let after = bucket.len();
        if after != before.saturating_add(1) {
            return Err(TableError::BucketGrowth { key, bucket: index, before, after });
        }

        Ok((index, position))
    }

    /// Grows the table to `2 * capacity + 1` buckets and moves every entry whose bucket
    /// changed.
    ///
    /// Displaced entries are taken out of all old buckets first and only then placed, so no
    /// bucket is modified while it is being scanned. The key index is left untouched since the
    /// set of keys does not change.
    fn grow_and_rehash(&mut self) -> Result<(), TableError> {
        let old_capacity = self.table.len();
        let new_capacity = old_capacity.saturating_mul(2).saturating_add(1);
        self.table.resize_with(new_capacity, Vec::new);

        let mut staged = Vec::new();
        for (index, bucket) in self.table.iter_mut().take(old_capacity).enumerate() {
            if bucket.iter().all(|entry| bucket_index(entry.key(), new_capacity) == index) {
                continue;
            }
            let (stay, moving): (Vec<_>, Vec<_>) = mem::take(bucket)
                .into_iter()
                .partition(|entry| bucket_index(entry.key(), new_capacity) == index);
            *bucket = stay;
            staged.extend(moving);
        }

        let moved = staged.len();
        for entry in staged {
            self.place(entry)?;
        }

        debug!(
            "increasing table size from {old_capacity} to {new_capacity}, moved {moved} of {} entries",
            self.len()
        );
        Ok(())
    }

    /// Inserts a key-value pair, reporting internal corruption as an error.
    ///
    /// Returns `Ok(false)` without touching the table if `key` is already present; an insert
    /// never replaces an existing value. May grow and rehash the table first.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] only if the table's own invariants were broken.
    pub fn try_insert(&mut self, key: i64, value: V) -> Result<bool, TableError> {
        if self.locate(self.index_of(key), key).is_some() {
            return Ok(false);
        }

        if self.needs_growth() {
            self.grow_and_rehash()?;
        }

        self.place(Entry::new(key, value))?;
        self.keys.push(key);
        self.debug_assert_consistent();
        Ok(true)
    }

    /// Inserts a key-value pair, returning true if it was added.
    ///
    /// Returns false and leaves the table unchanged if `key` is already present.
    ///
    /// # Panics
    ///
    /// Panics if the table detects that its own invariants were broken while placing the
    /// entry. This cannot happen through the public API.
    pub fn insert(&mut self, key: i64, value: V) -> bool {
        self.try_insert(key, value).unwrap_or_else(|err| fatal(&err))
    }

    /// Retrieve the value for a given key
    #[must_use]
    pub fn find(&self, key: i64) -> Option<&V> {
        let index = self.index_of(key);
        let position = self.locate(index, key)?;
        self.table.get(index)?.get(position).map(Entry::value)
    }

    /// Get a mutable reference to the value for a given key
    pub fn find_mut(&mut self, key: i64) -> Option<&mut V> {
        let index = self.index_of(key);
        let position = self.locate(index, key)?;
        self.table.get_mut(index)?.get_mut(position).map(Entry::value_mut)
    }

    /// Returns true if the table holds `key`
    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.locate(self.index_of(key), key).is_some()
    }

    /// Removes `key` from the table, returning its value if it was present.
    ///
    /// Removing an absent key is a no-op.
    pub fn erase(&mut self, key: i64) -> Option<V> {
        let index = self.index_of(key);
        let position = self.locate(index, key)?;
        let (_, value) = self.table.get_mut(index)?.remove(position).into_parts();

        if let Some(slot) = self.keys.iter().position(|&k| k == key) {
            self.keys.remove(slot);
        }
        trace!("erased key {key} from bucket {index}");

        self.debug_assert_consistent();
        Some(value)
    }

    /// Removes every entry and shrinks the table back to its initial capacity
    pub fn clear(&mut self) {
        self.table = Self::empty_buckets(self.initial_capacity);
        self.keys.clear();
        trace!("cleared table, capacity reset to {}", self.initial_capacity);
    }

    /// Returns the value for `key`, inserting `V::default()` first if it is absent.
    ///
    /// A newly created entry is counted by [`len`](Self::len) like any other. Unlike
    /// [`insert`](Self::insert), this never grows the table.
    ///
    /// # Panics
    ///
    /// Panics if the table detects that its own invariants were broken while placing the
    /// entry. This cannot happen through the public API.
    pub fn get_or_insert_default(&mut self, key: i64) -> &mut V
    where
        V: Default,
    {
        let index = self.index_of(key);
        let position = match self.locate(index, key) {
            Some(position) => position,
            None => {
                let (_, position) =
                    self.place(Entry::new(key, V::default())).unwrap_or_else(|err| fatal(&err));
                self.keys.push(key);
                self.debug_assert_consistent();
                position
            }
        };

        match self.table.get_mut(index).and_then(|bucket| bucket.get_mut(position)) {
            Some(entry) => entry.value_mut(),
            None => fatal(&TableError::MissingEntry { key, bucket: index }),
        }
    }

    /// Returns an iterator over the entries, bucket by bucket and ascending by key within a
    /// bucket
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { entries: self.table.iter().flatten() }
    }

    /// Returns the buckets in index order, each as a slice sorted by key
    #[must_use]
    pub fn buckets(&self) -> impl ExactSizeIterator<Item = &[Entry<V>]> {
        self.table.iter().map(Vec::as_slice)
    }

    /// Prints every entry to standard output, or a notice if the table is empty
    pub fn print_table(&self)
    where
        V: fmt::Display,
    {
        print!("{self}");
    }

    /// Checks that the key index and the buckets agree, in debug builds only
    fn debug_assert_consistent(&self) {
        debug_assert_eq!(
            self.keys.len(),
            self.table.iter().map(Vec::len).sum::<usize>(),
            "key index out of step with bucket contents"
        );
    }
}

impl<V: fmt::Display> fmt::Display for SortedChainHashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "The table is empty!");
        }
        for (key, value) in self {
            writeln!(f, "key = {key}, value = {value}")?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Entries of all buckets, in bucket order
    entries: Flatten<slice::Iter<'a, Bucket<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| (entry.key(), entry.value()))
    }
}

impl<'a, V> IntoIterator for &'a SortedChainHashTable<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
