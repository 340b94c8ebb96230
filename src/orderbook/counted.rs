//! Price-keyed side that also tracks the number of orders at each level.
//!
//! A level stays in the book only while both its size and its order count
//! are positive. Either one dropping to zero removes it: some feeds signal a
//! cleared level through the count alone.

use crate::error::Result;
use crate::orderbook::{BookSide, OrderBookSide};
use crate::types::{CountedDelta, CountedLevel, Side};

/// One side of a `(price, size, count)` book.
#[derive(Debug, Clone)]
pub struct CountedSide {
    book: BookSide<CountedLevel>,
}

impl CountedSide {
    /// Build a side from an initial snapshot, in any order.
    pub fn new<I>(side: Side, deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<CountedDelta>,
    {
        let mut this = Self::empty(side, depth)?;
        this.store_all(deltas)?;
        Ok(this)
    }

    /// Ask side from a snapshot
    pub fn asks<I>(deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<CountedDelta>,
    {
        Self::new(Side::Ask, deltas, depth)
    }

    /// Bid side from a snapshot
    pub fn bids<I>(deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<CountedDelta>,
    {
        Self::new(Side::Bid, deltas, depth)
    }

    /// Set size and order count at `price`; a zero in either removes it.
    pub fn store(&mut self, price: u64, size: u64, count: u64) -> Result<()> {
        let key = self.book.sort_key(price)?;
        if size > 0 && count > 0 {
            self.book
                .upsert(key, CountedLevel::new(price, size, count), |_| {})
        } else {
            self.book.remove(key, ());
            Ok(())
        }
    }

    /// Level at `price`, visible or hidden
    pub fn get(&self, price: u64) -> Option<&CountedLevel> {
        let key = self.book.sort_key(price).ok()?;
        self.book.find(key, ())
    }

    /// Total orders across visible levels
    pub fn order_count(&self) -> u64 {
        self.book.levels().iter().map(|l| l.count).sum()
    }
}

impl OrderBookSide for CountedSide {
    type Level = CountedLevel;
    type Delta = CountedDelta;

    fn empty(side: Side, depth: Option<usize>) -> Result<Self> {
        Ok(Self {
            book: BookSide::new(side, depth)?,
        })
    }

    fn store_array(&mut self, delta: CountedDelta) -> Result<()> {
        self.store(delta.price, delta.size, delta.count)
    }

    fn limit(&mut self, n: Option<usize>) -> Result<()> {
        self.book.limit(n, |_| {})
    }

    fn clear(&mut self) {
        self.book.clear();
    }

    fn levels(&self) -> &[CountedLevel] {
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

    fn levels(side: &CountedSide) -> Vec<(u64, u64, u64)> {
        side.levels()
            .iter()
            .map(|l| (l.price, l.size, l.count))
            .collect()
    }

    #[test]
    fn test_counted_sorted() {
        let asks = CountedSide::asks([(30, 1, 1), (10, 2, 3), (20, 1, 2)], None).unwrap();
        assert_eq!(levels(&asks), vec![(10, 2, 3), (20, 1, 2), (30, 1, 1)]);
        assert_eq!(asks.order_count(), 6);
    }

    #[test]
    fn test_counted_update_overwrites_both_fields() {
        let mut bids = CountedSide::bids([(10, 1, 1), (11, 1, 1)], None).unwrap();
        bids.store(10, 4, 7).unwrap();

        assert_eq!(levels(&bids), vec![(11, 1, 1), (10, 4, 7)]);
    }

    #[test]
    fn test_counted_zero_size_removes() {
        let mut asks = CountedSide::asks([(10, 1, 2), (20, 1, 1)], None).unwrap();
        asks.store(10, 0, 2).unwrap();

        assert_eq!(levels(&asks), vec![(20, 1, 1)]);
    }

    #[test]
    fn test_counted_zero_count_with_size_still_removes() {
        // Positive size but no orders left: treated as a full deletion
        let mut asks = CountedSide::asks([(10, 1, 2), (20, 1, 1)], None).unwrap();
        asks.store(10, 5, 0).unwrap();

        assert_eq!(levels(&asks), vec![(20, 1, 1)]);
        assert!(asks.get(10).is_none());
    }

    #[test]
    fn test_counted_zero_count_fresh_level_not_inserted() {
        let mut asks = CountedSide::asks(Vec::<(u64, u64, u64)>::new(), None).unwrap();
        asks.store(10, 5, 0).unwrap();

        assert!(asks.is_empty());
    }

    #[test]
    fn test_counted_depth_and_limit() {
        let mut bids =
            CountedSide::bids([(1, 1, 1), (2, 1, 1), (3, 1, 1), (4, 1, 1)], Some(3)).unwrap();
        assert_eq!(levels(&bids), vec![(4, 1, 1), (3, 1, 1), (2, 1, 1)]);

        bids.limit(Some(1)).unwrap();
        assert_eq!(bids.len(), 1);
        assert_eq!(bids.get(2), Some(&CountedLevel::new(2, 1, 1)));

        bids.limit(None).unwrap();
        assert_eq!(levels(&bids), vec![(4, 1, 1), (3, 1, 1), (2, 1, 1)]);
    }
}
