//! Order-id keyed book side.
//!
//! ## Design
//!
//! Entries are identified by the exchange order id, not by price. The side
//! keeps an `id -> sort key` map so that deletes and price-less updates can
//! find the entry, and so that a price change can be applied as a move:
//!
//! ```text
//! store(Some(6), 1, A) with A at key 5:
//!   remove (5, A)  -> shift left
//!   insert (6, A)  -> shift right
//!   ids[A] = 6
//! ```
//!
//! The map is written only after the book accepts the entry, so a failed
//! insert leaves both exactly as they were.
//!
//! The map covers hidden entries as well as visible ones. Entries evicted by
//! the depth cap leave the map, so a later update for that id is a fresh
//! insert rather than a stale move.

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::orderbook::{BookSide, OrderBookSide};
use crate::types::{IndexedDelta, IndexedLevel, Side};

/// One side of an order-id keyed book.
#[derive(Debug, Clone)]
pub struct IndexedSide {
    book: BookSide<IndexedLevel>,
    ids: HashMap<u64, i64>,
}

impl IndexedSide {
    /// Build a side from an initial snapshot, in any order.
    pub fn new<I>(side: Side, deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<IndexedDelta>,
    {
        let mut this = Self::empty(side, depth)?;
        this.store_all(deltas)?;
        Ok(this)
    }

    /// Ask side from a snapshot
    pub fn asks<I>(deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<IndexedDelta>,
    {
        Self::new(Side::Ask, deltas, depth)
    }

    /// Bid side from a snapshot
    pub fn bids<I>(deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<IndexedDelta>,
    {
        Self::new(Side::Bid, deltas, depth)
    }

    /// Set the entry for `id`.
    ///
    /// - `size == 0` removes the entry; unknown ids are ignored.
    /// - `price == None` keeps the current price of a known id.
    /// - A new price for a known id moves the entry.
    ///
    /// # Errors
    ///
    /// [`Error::MissingPrice`] if `id` is unseen and no price is given.
    ///
    /// # Example
    ///
    /// ```
    /// use depthbook::orderbook::{IndexedSide, OrderBookSide};
    /// use depthbook::types::IndexedLevel;
    ///
    /// let mut asks = IndexedSide::asks(Vec::<(u64, u64, u64)>::new(), None).unwrap();
    /// asks.store(Some(5), 1, 0xA).unwrap();
    /// asks.store(Some(6), 1, 0xA).unwrap();
    ///
    /// assert_eq!(asks.levels(), &[IndexedLevel::new(6, 1, 0xA)]);
    /// ```
    pub fn store(&mut self, price: Option<u64>, size: u64, id: u64) -> Result<()> {
        if size == 0 {
            if let Some(key) = self.ids.remove(&id) {
                self.book.remove(key, id);
            }
            return Ok(());
        }

        let new_key = price.map(|p| self.book.sort_key(p)).transpose()?;

        let (key, price, old_key) = match self.ids.get(&id).copied() {
            Some(old_key) => {
                let price = match price {
                    Some(price) => price,
                    None => self
                        .book
                        .find(old_key, id)
                        .map(|level| level.price)
                        .ok_or(Error::MissingPrice { id })?,
                };
                (new_key.unwrap_or(old_key), price, Some(old_key))
            }
            None => {
                let (Some(key), Some(price)) = (new_key, price) else {
                    warn!(id, "rejected delta for unseen id without price");
                    return Err(Error::MissingPrice { id });
                };
                (key, price, None)
            }
        };

        let level = IndexedLevel::new(price, size, id);
        let ids = &mut self.ids;
        let mut kept = true;
        let on_evict = |evicted: IndexedLevel| {
            if evicted.id == id {
                kept = false;
            } else {
                ids.remove(&evicted.id);
            }
        };

        match old_key {
            Some(old_key) if old_key != key => {
                self.book.relocate(old_key, key, level, on_evict)?;
                trace!(id, old_key, key, "order moved");
            }
            _ => self.book.upsert(key, level, on_evict)?,
        }

        // The id map only follows entries the book actually holds
        if kept {
            self.ids.insert(id, key);
        } else {
            self.ids.remove(&id);
        }
        Ok(())
    }

    /// Entry for `id`, visible or hidden
    pub fn get(&self, id: u64) -> Option<&IndexedLevel> {
        let key = *self.ids.get(&id)?;
        self.book.find(key, id)
    }

    /// True if `id` is tracked, visible or hidden
    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains_key(&id)
    }

    /// Number of tracked ids, visible or hidden
    pub fn tracked(&self) -> usize {
        self.ids.len()
    }
}

impl OrderBookSide for IndexedSide {
    type Level = IndexedLevel;
    type Delta = IndexedDelta;

    fn empty(side: Side, depth: Option<usize>) -> Result<Self> {
        Ok(Self {
            book: BookSide::new(side, depth)?,
            ids: HashMap::new(),
        })
    }

    fn store_array(&mut self, delta: IndexedDelta) -> Result<()> {
        self.store(delta.price, delta.size, delta.id)
    }

    fn limit(&mut self, n: Option<usize>) -> Result<()> {
        let ids = &mut self.ids;
        self.book.limit(n, |evicted| {
            ids.remove(&evicted.id);
        })
    }

    fn clear(&mut self) {
        self.book.clear();
        self.ids.clear();
    }

    fn levels(&self) -> &[IndexedLevel] {
        self.book.levels()
    }

    fn side(&self) -> Side {
        self.book.side()
    }

    fn depth(&self) -> Option<usize> {
        self.book.depth()
    }

    fn hidden_len(&self) -> usize {
        self.book.hidden_len()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::CAPACITY;

    fn empty_asks(depth: Option<usize>) -> IndexedSide {
        IndexedSide::empty(Side::Ask, depth).unwrap()
    }

    fn entries(side: &IndexedSide) -> Vec<(u64, u64, u64)> {
        side.levels()
            .iter()
            .map(|l| (l.price, l.size, l.id))
            .collect()
    }

    #[test]
    fn test_indexed_price_move() {
        let mut asks = empty_asks(None);
        asks.store(Some(5), 1, 0xA).unwrap();
        asks.store(Some(6), 1, 0xA).unwrap();

        assert_eq!(entries(&asks), vec![(6, 1, 0xA)]);
        assert_eq!(asks.tracked(), 1);
        assert_eq!(asks.book.keys(), &[6]);
    }

    #[test]
    fn test_indexed_move_reorders() {
        let mut bids = IndexedSide::bids([(10, 1, 1), (9, 1, 2), (8, 1, 3)], None).unwrap();
        bids.store(Some(11), 1, 3).unwrap();

        assert_eq!(entries(&bids), vec![(11, 1, 3), (10, 1, 1), (9, 1, 2)]);
    }

    #[test]
    fn test_indexed_priceless_update() {
        let mut asks = IndexedSide::asks([(5, 1, 1), (7, 1, 2)], None).unwrap();
        asks.store(None, 3, 2).unwrap();

        assert_eq!(entries(&asks), vec![(5, 1, 1), (7, 3, 2)]);
    }

    #[test]
    fn test_indexed_missing_price_for_unseen_id() {
        let mut asks = empty_asks(None);

        assert_eq!(asks.store(None, 1, 9), Err(Error::MissingPrice { id: 9 }));
        assert!(asks.is_empty());
        assert!(!asks.contains(9));
    }

    #[test]
    fn test_indexed_delete() {
        let mut asks = IndexedSide::asks([(5, 1, 1), (7, 1, 2)], None).unwrap();
        asks.store(None, 0, 1).unwrap();
        assert_eq!(entries(&asks), vec![(7, 1, 2)]);
        assert!(!asks.contains(1));

        // Unknown id and repeated delete are no-ops
        asks.store(Some(5), 0, 1).unwrap();
        asks.store(None, 0, 42).unwrap();
        assert_eq!(entries(&asks), vec![(7, 1, 2)]);
    }

    #[test]
    fn test_indexed_same_price_orders() {
        let mut asks = empty_asks(None);
        asks.store(Some(5), 1, 1).unwrap();
        asks.store(Some(5), 2, 2).unwrap();
        asks.store(Some(5), 3, 3).unwrap();

        assert_eq!(entries(&asks), vec![(5, 1, 1), (5, 2, 2), (5, 3, 3)]);

        asks.store(Some(5), 9, 2).unwrap();
        asks.store(None, 0, 1).unwrap();
        assert_eq!(entries(&asks), vec![(5, 9, 2), (5, 3, 3)]);
    }

    #[test]
    fn test_indexed_depth_eviction_forgets_id() {
        let mut asks = IndexedSide::asks([(1, 1, 1), (2, 1, 2), (3, 1, 3)], Some(2)).unwrap();
        assert_eq!(entries(&asks), vec![(1, 1, 1), (2, 1, 2)]);
        assert!(!asks.contains(3));

        // Evicted id comes back as a fresh insert, and needs a price
        assert_eq!(asks.store(None, 1, 3), Err(Error::MissingPrice { id: 3 }));
        asks.store(Some(1), 0, 1).unwrap();
        asks.store(Some(3), 4, 3).unwrap();
        assert_eq!(entries(&asks), vec![(2, 1, 2), (3, 4, 3)]);
    }

    #[test]
    fn test_indexed_limit_and_restore() {
        let mut asks = IndexedSide::asks([(1, 1, 1), (2, 1, 2), (3, 1, 3)], None).unwrap();
        asks.limit(Some(1)).unwrap();
        assert_eq!(entries(&asks), vec![(1, 1, 1)]);
        assert!(asks.contains(3));

        // Move a hidden order in front of the visible one
        asks.store(Some(0), 1, 3).unwrap();
        assert_eq!(entries(&asks), vec![(0, 1, 3), (1, 1, 1)]);

        asks.limit(None).unwrap();
        assert_eq!(entries(&asks), vec![(0, 1, 3), (1, 1, 1), (2, 1, 2)]);
    }

    #[test]
    fn test_indexed_limit_evicts_with_depth() {
        let mut asks = IndexedSide::asks([(1, 1, 1), (2, 1, 2)], Some(2)).unwrap();
        asks.limit(Some(1)).unwrap();
        asks.store(Some(0), 1, 9).unwrap();

        // Hidden id 2 was the worst and is gone for good
        assert!(!asks.contains(2));
        asks.limit(None).unwrap();
        assert_eq!(entries(&asks), vec![(0, 1, 9), (1, 1, 1)]);
    }

    #[test]
    fn test_indexed_clear() {
        let mut asks = IndexedSide::asks([(1, 1, 1)], None).unwrap();
        asks.clear();

        assert!(asks.is_empty());
        assert_eq!(asks.tracked(), 0);
    }

    /// Ask side whose visible index is full: ids `0..CAPACITY` at
    /// `1_000 + id`, all but the best hidden, then `CAPACITY - 1` better
    /// orders filling the visible slots.
    fn full_asks_with_hidden() -> IndexedSide {
        let mut asks = empty_asks(None);
        for id in 0..CAPACITY as u64 {
            asks.store(Some(1_000 + id), 1, id).unwrap();
        }
        asks.limit(Some(1)).unwrap();
        for id in 0..CAPACITY as u64 - 1 {
            asks.store(Some(1 + id), 1, 100_000 + id).unwrap();
        }
        asks
    }

    #[test]
    fn test_indexed_rejected_insert_is_not_tracked() {
        let mut asks = full_asks_with_hidden();
        let tracked = asks.tracked();

        assert_eq!(
            asks.store(Some(5), 1, 999_999),
            Err(Error::CapacityExceeded { capacity: CAPACITY })
        );
        assert!(!asks.contains(999_999));
        assert_eq!(asks.tracked(), tracked);
        assert_eq!(asks.tracked(), asks.len() + asks.hidden_len());
        assert_eq!(
            asks.store(None, 2, 999_999),
            Err(Error::MissingPrice { id: 999_999 })
        );
    }

    #[test]
    fn test_indexed_rejected_move_keeps_old_entry() {
        let mut asks = full_asks_with_hidden();

        // Order 10 is hidden at 1_010 and cannot move into the full index
        assert_eq!(
            asks.store(Some(500), 7, 10),
            Err(Error::CapacityExceeded { capacity: CAPACITY })
        );
        assert_eq!(asks.get(10), Some(&IndexedLevel::new(1_010, 1, 10)));

        // Price-less updates still reach it
        asks.store(None, 3, 10).unwrap();
        assert_eq!(asks.get(10), Some(&IndexedLevel::new(1_010, 3, 10)));
        assert_eq!(asks.tracked(), asks.len() + asks.hidden_len());
    }

    #[test]
    fn test_indexed_insert_evicted_on_arrival() {
        let mut asks = IndexedSide::asks([(1, 1, 1), (2, 1, 2)], Some(2)).unwrap();

        // Worse than both resting orders, so it is the one evicted
        asks.store(Some(3), 1, 3).unwrap();
        assert!(!asks.contains(3));
        assert_eq!(entries(&asks), vec![(1, 1, 1), (2, 1, 2)]);

        // A move never counts twice against the depth
        asks.store(Some(9), 1, 1).unwrap();
        assert_eq!(entries(&asks), vec![(2, 1, 2), (9, 1, 1)]);
        assert_eq!(asks.tracked(), 2);
    }
}
