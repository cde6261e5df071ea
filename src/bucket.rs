//! Sorted buckets and the binary search routines that maintain them

use crate::error::TableError;

/// A key-value pair stored in a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The integer key, unique across the whole table
    key: i64,
    /// The value associated with the key
    value: V,
}

impl<V> Entry<V> {
    /// Creates a new entry
    pub(crate) const fn new(key: i64, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key of this entry
    #[must_use]
    pub const fn key(&self) -> i64 {
        self.key
    }

    /// Returns a reference to the value of this entry
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the value of this entry
    pub(crate) const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Consumes the entry, returning its key and value
    #[must_use]
    pub fn into_parts(self) -> (i64, V) {
        (self.key, self.value)
    }
}

/// Entries sharing one table slot, kept strictly ascending by key
pub(crate) type Bucket<V> = Vec<Entry<V>>;

/// Searches `bucket[start..end]` for `key` by halving the range.
///
/// The range must be sorted ascending. Returns the position of the matching entry, or `None`
/// when the key is not in the range.
#[allow(clippy::arithmetic_side_effects)]
pub(crate) fn ordered_search<V>(
    bucket: &[Entry<V>],
    key: i64,
    start: usize,
    end: usize,
) -> Option<usize> {
    if start >= end {
        return None;
    }
    if end - start == 1 {
        return bucket.get(start).filter(|entry| entry.key == key).map(|_| start);
    }

    let mid = start + (end - start) / 2;
    if key < bucket.get(mid)?.key {
        ordered_search(bucket, key, start, mid)
    } else {
        ordered_search(bucket, key, mid, end)
    }
}

/// Inserts `entry` into `bucket[start..end]` at the position that keeps the range ascending.
///
/// The range must be non-empty; an empty bucket is handled by [`insert_sorted`]. The caller
/// guarantees the key is not already present. Returns the position the entry landed at.
#[allow(clippy::arithmetic_side_effects)]
pub(crate) fn ordered_insert<V>(
    bucket: &mut Bucket<V>,
    entry: Entry<V>,
    start: usize,
    end: usize,
) -> Result<usize, TableError> {
    if start == end {
        return Err(TableError::EmptyInsertRange { start });
    }
    if start > end || end > bucket.len() {
        return Err(TableError::RangeOutOfBounds { start, end, len: bucket.len() });
    }

    if end - start == 1 {
        let position =
            if bucket.get(start).is_some_and(|probe| entry.key < probe.key) { start } else { end };
        bucket.insert(position, entry);
        return Ok(position);
    }

    let mid = start + (end - start) / 2;
    if bucket.get(mid).is_some_and(|probe| entry.key < probe.key) {
        ordered_insert(bucket, entry, start, mid)
    } else {
        ordered_insert(bucket, entry, mid, end)
    }
}

/// Adds `entry` to `bucket`, appending when the bucket is empty and inserting in order otherwise
pub(crate) fn insert_sorted<V>(bucket: &mut Bucket<V>, entry: Entry<V>) -> Result<usize, TableError> {
    if bucket.is_empty() {
        bucket.push(entry);
        return Ok(0);
    }
    let len = bucket.len();
    ordered_insert(bucket, entry, 0, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_of(keys: &[i64]) -> Bucket<String> {
        keys.iter().map(|&k| Entry::new(k, format!("v{k}"))).collect()
    }

    fn keys_of(bucket: &Bucket<String>) -> Vec<i64> {
        bucket.iter().map(Entry::key).collect()
    }

    #[test]
    fn test_search_finds_every_key() {
        let bucket = bucket_of(&[-7, 0, 3, 10, 17, 24, 31]);
        for (position, entry) in bucket.iter().enumerate() {
            assert_eq!(ordered_search(&bucket, entry.key(), 0, bucket.len()), Some(position));
        }
    }

    #[test]
    fn test_search_reports_absent_keys() {
        let bucket = bucket_of(&[3, 10, 17]);
        assert_eq!(ordered_search(&bucket, 4, 0, bucket.len()), None);
        assert_eq!(ordered_search(&bucket, -1, 0, bucket.len()), None);
        assert_eq!(ordered_search(&bucket, 100, 0, bucket.len()), None);
    }

    #[test]
    fn test_search_empty_range() {
        let bucket = bucket_of(&[3, 10]);
        assert_eq!(ordered_search(&bucket, 3, 1, 1), None);
        assert_eq!(ordered_search::<String>(&[], 3, 0, 0), None);
    }

    #[test]
    fn test_search_respects_range() {
        let bucket = bucket_of(&[1, 2, 3, 4, 5]);
        assert_eq!(ordered_search(&bucket, 1, 1, 5), None);
        assert_eq!(ordered_search(&bucket, 4, 1, 4), Some(3));
        assert_eq!(ordered_search(&bucket, 5, 1, 4), None);
    }

    #[test]
    fn test_insert_front_middle_back() {
        let mut bucket = bucket_of(&[10, 20, 30]);

        assert_eq!(ordered_insert(&mut bucket, Entry::new(5, "v5".into()), 0, 3), Ok(0));
        assert_eq!(ordered_insert(&mut bucket, Entry::new(25, "v25".into()), 0, 4), Ok(3));
        assert_eq!(ordered_insert(&mut bucket, Entry::new(40, "v40".into()), 0, 5), Ok(5));

        assert_eq!(keys_of(&bucket), vec![5, 10, 20, 25, 30, 40]);
    }

    #[test]
    fn test_insert_single_element_range() {
        let mut bucket = bucket_of(&[10]);
        assert_eq!(ordered_insert(&mut bucket, Entry::new(11, "v11".into()), 0, 1), Ok(1));
        assert_eq!(ordered_insert(&mut bucket, Entry::new(9, "v9".into()), 0, 2), Ok(0));
        assert_eq!(keys_of(&bucket), vec![9, 10, 11]);
    }

    #[test]
    fn test_insert_rejects_empty_range() {
        let mut bucket = bucket_of(&[1, 2]);
        assert_eq!(
            ordered_insert(&mut bucket, Entry::new(3, "v3".into()), 1, 1),
            Err(TableError::EmptyInsertRange { start: 1 })
        );
        assert_eq!(keys_of(&bucket), vec![1, 2]);
    }

    #[test]
    fn test_insert_rejects_range_past_end() {
        let mut bucket = bucket_of(&[1, 2]);
        assert_eq!(
            ordered_insert(&mut bucket, Entry::new(3, "v3".into()), 0, 3),
            Err(TableError::RangeOutOfBounds { start: 0, end: 3, len: 2 })
        );
    }

    #[test]
    fn test_insert_sorted_keeps_order() {
        let mut bucket = Bucket::new();
        for key in [50, -3, 8, 99, 0, 21, 7] {
            assert!(insert_sorted(&mut bucket, Entry::new(key, String::new())).is_ok());
        }
        assert_eq!(keys_of(&bucket), vec![-3, 0, 7, 8, 21, 50, 99]);
    }

    #[test]
    fn test_entry_accessors() {
        let mut entry = Entry::new(4, 40);
        *entry.value_mut() += 2;
        assert_eq!(entry.key(), 4);
        assert_eq!(entry.value(), &42);
        assert_eq!(entry.into_parts(), (4, 42));
    }
}
