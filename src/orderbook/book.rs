//! Two-sided order book built from a pair of sides of the same variant.
//!
//! ## Checksum
//!
//! Feed handlers compare a digest of the top of book against the exchange's
//! to detect a diverged book and trigger a resync. The digest is SHA-256
//! over the SSZ encoding of the top `n` asks followed by the top `n` bids.
//!
//! ## Example
//!
//! ```
//! use depthbook::config::BookConfig;
//! use depthbook::orderbook::PriceBook;
//!
//! let mut book = PriceBook::from_snapshot(
//!     [(101, 1), (102, 2)],
//!     [(99, 1), (98, 3)],
//!     BookConfig::new().with_depth(10),
//! )
//! .unwrap();
//!
//! assert_eq!(book.spread(), Some(2));
//!
//! book.asks_mut().store(100, 4).unwrap();
//! assert_eq!(book.best_ask(), Some(100));
//! ```

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::BookConfig;
use crate::error::Result;
use crate::orderbook::{CountedSide, IndexedSide, OrderBookSide, PriceKeyedSide};
use crate::types::{LevelRecord, Side};

/// Ask side and bid side of one instrument.
#[derive(Debug, Clone)]
pub struct OrderBook<S> {
    asks: S,
    bids: S,
    nonce: Option<u64>,
    timestamp: Option<u64>,
}

/// Aggregated `(price, size)` book
pub type PriceBook = OrderBook<PriceKeyedSide>;

/// `(price, size, count)` book
pub type CountedBook = OrderBook<CountedSide>;

/// Order-id keyed book
pub type IndexedBook = OrderBook<IndexedSide>;

impl<S: OrderBookSide> OrderBook<S> {
    /// Create an empty book
    pub fn new(config: BookConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            asks: S::empty(Side::Ask, config.depth)?,
            bids: S::empty(Side::Bid, config.depth)?,
            nonce: None,
            timestamp: None,
        })
    }

    /// Create a book from snapshot deltas for each side
    pub fn from_snapshot<A, B>(asks: A, bids: B, config: BookConfig) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: Into<S::Delta>,
        B: IntoIterator,
        B::Item: Into<S::Delta>,
    {
        let mut book = Self::new(config)?;
        book.asks.store_all(asks)?;
        book.bids.store_all(bids)?;
        Ok(book)
    }

    // ========================================================================
    // Sides
    // ========================================================================

    /// Ask side
    #[inline]
    pub fn asks(&self) -> &S {
        &self.asks
    }

    /// Bid side
    #[inline]
    pub fn bids(&self) -> &S {
        &self.bids
    }

    /// Ask side (mutable)
    #[inline]
    pub fn asks_mut(&mut self) -> &mut S {
        &mut self.asks
    }

    /// Bid side (mutable)
    #[inline]
    pub fn bids_mut(&mut self) -> &mut S {
        &mut self.bids
    }

    /// Side by direction (mutable)
    pub fn side_mut(&mut self, side: Side) -> &mut S {
        match side {
            Side::Ask => &mut self.asks,
            Side::Bid => &mut self.bids,
        }
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Bound both sides; `None` restores hidden levels.
    pub fn limit(&mut self, n: Option<usize>) -> Result<()> {
        self.asks.limit(n)?;
        self.bids.limit(n)
    }

    /// Replace both sides with a fresh snapshot and forget the nonce.
    pub fn reset<A, B>(&mut self, asks: A, bids: B) -> Result<()>
    where
        A: IntoIterator,
        A::Item: Into<S::Delta>,
        B: IntoIterator,
        B::Item: Into<S::Delta>,
    {
        self.asks.reset(asks)?;
        self.bids.reset(bids)?;
        self.nonce = None;
        self.timestamp = None;
        debug!(asks = self.asks.len(), bids = self.bids.len(), "book reset");
        Ok(())
    }

    /// Last applied feed sequence number
    pub fn nonce(&self) -> Option<u64> {
        self.nonce
    }

    /// Record the feed sequence number of the last applied update
    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = Some(nonce);
    }

    /// Exchange timestamp of the last update, in milliseconds
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Record the exchange timestamp of the last update
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = Some(timestamp);
    }

    // ========================================================================
    // Top of Book
    // ========================================================================

    /// Lowest ask price
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best().map(|l| l.price())
    }

    /// Highest bid price
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best().map(|l| l.price())
    }

    /// `best_ask - best_bid`, `None` if either side is empty or the book is crossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// True if the best bid reaches the best ask
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    // ========================================================================
    // Checksum
    // ========================================================================

    /// SHA-256 over the top `levels` asks then the top `levels` bids.
    pub fn checksum(&self, levels: usize) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        for level in self.asks.levels().iter().take(levels) {
            hasher.update(level.encode()?);
        }
        for level in self.bids.levels().iter().take(levels) {
            hasher.update(level.encode()?);
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        Ok(hash)
    }

    /// Checksum as a hex string
    pub fn checksum_hex(&self, levels: usize) -> Result<String> {
        Ok(hex::encode(self.checksum(levels)?))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
