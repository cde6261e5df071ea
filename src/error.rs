//! Internal invariant breaches of the sorted-chain table

use thiserror::Error;

/// Conditions that can only arise from a bug inside the table itself.
///
/// Expected outcomes such as inserting a duplicate key or looking up a missing one are
/// reported through `bool` and `Option` return values and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An ordered insert was asked to work on an empty range
    #[error("ordered insert called with an empty range: start == end == {start}")]
    EmptyInsertRange {
        /// Both ends of the empty range
        start: usize,
    },
    /// An ordered insert or search range reaches past the end of the bucket
    #[error("range {start}..{end} is out of bounds for a bucket of length {len}")]
    RangeOutOfBounds {
        /// Inclusive start of the range
        start: usize,
        /// Exclusive end of the range
        end: usize,
        /// Length of the bucket the range was applied to
        len: usize,
    },
    /// Placing an entry did not grow its destination bucket by exactly one
    #[error("placing key {key} changed bucket {bucket} from {before} to {after} entries")]
    BucketGrowth {
        /// Key of the entry being placed
        key: i64,
        /// Index of the destination bucket
        bucket: usize,
        /// Bucket length before the placement
        before: usize,
        /// Bucket length after the placement
        after: usize,
    },
    /// A slot that was just located or filled could not be found again
    #[error("entry for key {key} vanished from bucket {bucket}")]
    MissingEntry {
        /// Key that was expected to be present
        key: i64,
        /// Index of the bucket that should hold it
        bucket: usize,
    },
}
