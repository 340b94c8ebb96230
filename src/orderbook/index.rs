//! Fixed-capacity sorted key buffer.
//!
//! ## Layout
//!
//! ```text
//! [ k0 <= k1 <= ... <= k(len-1) | SENTINEL SENTINEL ... SENTINEL ]
//!   0                    len-1    len                   CAPACITY-1
//! ```
//!
//! The buffer is allocated once and never grows. Slots past `len` always
//! hold [`SENTINEL`], so a binary search over the whole buffer stops at the
//! logical boundary without a bounds check on `len`.
//!
//! Inserts and removes shift the tail with `copy_within`. That is O(n), but
//! book depths are small and churn concentrates near the top of book, where
//! a flat array beats a tree on cache locality.

use tracing::warn;

use crate::error::{Error, Result};

/// Number of key slots. A hard configuration ceiling: it must exceed the
/// deepest book any feed will ever deliver.
pub const CAPACITY: usize = 4096;

/// Marks an unused slot. Compares greater than every valid sort key.
pub const SENTINEL: i64 = i64::MAX;

/// Sorted, sentinel-padded array of sort keys.
#[derive(Debug, Clone)]
pub struct SortedLevelIndex {
    keys: Box<[i64]>,
    len: usize,
}

impl Default for SortedLevelIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SortedLevelIndex {
    /// Create an empty index with every slot set to the sentinel
    pub fn new() -> Self {
        Self {
            keys: vec![SENTINEL; CAPACITY].into_boxed_slice(),
            len: 0,
        }
    }

    /// Number of active keys
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no key is active
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots, active or not
    #[inline]
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// The active keys, ascending
    #[inline]
    pub fn keys(&self) -> &[i64] {
        &self.keys[..self.len]
    }

    /// Key at `index`, if active
    #[inline]
    pub fn get(&self, index: usize) -> Option<i64> {
        self.keys().get(index).copied()
    }

    /// Largest active key (the worst level)
    #[inline]
    pub fn last(&self) -> Option<i64> {
        self.keys().last().copied()
    }

    /// Leftmost position whose key is `>= key`.
    ///
    /// Finds an existing key or the insertion point for a new one.
    #[inline]
    pub fn locate(&self, key: i64) -> usize {
        let index = self.keys.partition_point(|&k| k < key);
        debug_assert!(index <= self.len);
        index
    }

    /// Leftmost position whose key is `> key`.
    ///
    /// Inserting here places a new key after all equal ones.
    #[inline]
    pub fn locate_after(&self, key: i64) -> usize {
        let index = self.keys.partition_point(|&k| k <= key);
        debug_assert!(index <= self.len);
        index
    }

    /// Shift `[index, len)` one slot right and write `key` at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] if every slot is already active.
    pub fn insert_at(&mut self, index: usize, key: i64) -> Result<()> {
        debug_assert!(index <= self.len);
        debug_assert!(key < SENTINEL);

        if self.len == self.keys.len() {
            warn!(capacity = self.keys.len(), "sorted level index is full");
            return Err(Error::CapacityExceeded {
                capacity: self.keys.len(),
            });
        }

        self.keys.copy_within(index..self.len, index + 1);
        self.keys[index] = key;
        self.len += 1;
        Ok(())
    }

    /// Shift `(index, len)` one slot left, sentinel the vacated tail slot,
    /// and return the removed key.
    pub fn remove_at(&mut self, index: usize) -> i64 {
        debug_assert!(index < self.len);

        let key = self.keys[index];
        self.keys.copy_within(index + 1..self.len, index);
        self.len -= 1;
        self.keys[self.len] = SENTINEL;
        key
    }

    /// Drop every key from position `n` on.
    pub fn truncate(&mut self, n: usize) {
        if n < self.len {
            self.keys[n..self.len].fill(SENTINEL);
            self.len = n;
        }
    }

    /// Drop every key.
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(keys: &[i64]) -> SortedLevelIndex {
        let mut index = SortedLevelIndex::new();
        for &key in keys {
            let at = index.locate(key);
            index.insert_at(at, key).unwrap();
        }
        index
    }

    fn tail_is_sentinel(index: &SortedLevelIndex) -> bool {
        index.keys[index.len..].iter().all(|&k| k == SENTINEL)
    }

    #[test]
    fn test_index_new() {
        let index = SortedLevelIndex::new();

        assert!(index.is_empty());
        assert_eq!(index.capacity(), CAPACITY);
        assert!(tail_is_sentinel(&index));
        assert_eq!(index.last(), None);
    }

    #[test]
    fn test_index_insert_keeps_order() {
        let index = index_of(&[5, 1, 3, -2, 4]);

        assert_eq!(index.keys(), &[-2, 1, 3, 4, 5]);
        assert_eq!(index.len(), 5);
        assert!(tail_is_sentinel(&index));
    }

    #[test]
    fn test_index_locate() {
        let index = index_of(&[10, 20, 30]);

        assert_eq!(index.locate(5), 0);
        assert_eq!(index.locate(10), 0);
        assert_eq!(index.locate(15), 1);
        assert_eq!(index.locate(30), 2);
        // Past the last key the sentinel stops the search at len
        assert_eq!(index.locate(31), 3);
    }

    #[test]
    fn test_index_locate_after_equal_keys() {
        let mut index = index_of(&[10, 20]);
        let at = index.locate_after(10);
        index.insert_at(at, 10).unwrap();

        assert_eq!(index.keys(), &[10, 10, 20]);
        assert_eq!(index.locate(10), 0);
        assert_eq!(index.locate_after(10), 2);
    }

    #[test]
    fn test_index_remove_at() {
        let mut index = index_of(&[1, 2, 3, 4]);

        assert_eq!(index.remove_at(1), 2);
        assert_eq!(index.keys(), &[1, 3, 4]);
        assert!(tail_is_sentinel(&index));

        assert_eq!(index.remove_at(2), 4);
        assert_eq!(index.remove_at(0), 1);
        assert_eq!(index.keys(), &[3]);
        assert!(tail_is_sentinel(&index));
    }

    #[test]
    fn test_index_truncate() {
        let mut index = index_of(&[1, 2, 3, 4]);

        index.truncate(10);
        assert_eq!(index.len(), 4);

        index.truncate(2);
        assert_eq!(index.keys(), &[1, 2]);
        assert!(tail_is_sentinel(&index));

        index.clear();
        assert!(index.is_empty());
        assert!(tail_is_sentinel(&index));
    }

    #[test]
    fn test_index_capacity_exceeded() {
        let mut index = SortedLevelIndex::new();
        for key in 0..CAPACITY as i64 {
            index.insert_at(index.len(), key).unwrap();
        }

        assert_eq!(index.len(), CAPACITY);
        assert_eq!(
            index.insert_at(0, -1),
            Err(Error::CapacityExceeded { capacity: CAPACITY })
        );
        // Failed insert leaves the buffer untouched
        assert_eq!(index.get(0), Some(0));
        assert_eq!(index.last(), Some(CAPACITY as i64 - 1));
    }
}
