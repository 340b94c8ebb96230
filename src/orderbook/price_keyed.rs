//! Price-keyed order book side.
//!
//! Each delta overwrites the absolute size at a price; a zero size removes
//! the price level.
//!
//! ## Example
//!
//! ```
//! use depthbook::orderbook::{OrderBookSide, PriceKeyedSide};
//!
//! let bids = PriceKeyedSide::bids([(10, 2), (12, 1), (11, 3)], None).unwrap();
//! let prices: Vec<u64> = bids.levels().iter().map(|l| l.price).collect();
//! assert_eq!(prices, vec![12, 11, 10]);
//! ```

use crate::error::Result;
use crate::orderbook::{BookSide, OrderBookSide};
use crate::types::{Level, PriceDelta, Side};

/// One side of an aggregated `(price, size)` book.
#[derive(Debug, Clone)]
pub struct PriceKeyedSide {
    book: BookSide<Level>,
}

impl PriceKeyedSide {
    /// Build a side from an initial snapshot, in any order.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidDepth`] for a zero depth, or the first error
    /// raised while applying a delta.
    pub fn new<I>(side: Side, deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<PriceDelta>,
    {
        let mut this = Self::empty(side, depth)?;
        this.store_all(deltas)?;
        Ok(this)
    }

    /// Ask side from a snapshot
    pub fn asks<I>(deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<PriceDelta>,
    {
        Self::new(Side::Ask, deltas, depth)
    }

    /// Bid side from a snapshot
    pub fn bids<I>(deltas: I, depth: Option<usize>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<PriceDelta>,
    {
        Self::new(Side::Bid, deltas, depth)
    }

    /// Set the size at `price`; zero removes the level.
    pub fn store(&mut self, price: u64, size: u64) -> Result<()> {
        let key = self.book.sort_key(price)?;
        if size > 0 {
            self.book.upsert(key, Level::new(price, size), |_| {})
        } else {
            self.book.remove(key, ());
            Ok(())
        }
    }

    /// Level at `price`, visible or hidden
    pub fn get(&self, price: u64) -> Option<&Level> {
        let key = self.book.sort_key(price).ok()?;
        self.book.find(key, ())
    }
}

impl OrderBookSide for PriceKeyedSide {
    type Level = Level;
    type Delta = PriceDelta;

    fn empty(side: Side, depth: Option<usize>) -> Result<Self> {
        Ok(Self {
            book: BookSide::new(side, depth)?,
        })
    }

    fn store_array(&mut self, delta: PriceDelta) -> Result<()> {
        self.store(delta.price, delta.size)
    }

    fn limit(&mut self, n: Option<usize>) -> Result<()> {
        self.book.limit(n, |_| {})
    }

    fn clear(&mut self) {
        self.book.clear();
    }

    fn levels(&self) -> &[Level] {
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
