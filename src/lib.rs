//! # depthbook
//!
//! Sorted, depth-bounded order book sides maintained from market-data deltas.
//!
//! ## Architecture
//!
//! - **Types**: fixed-point prices, level records, deltas, side direction
//! - **OrderBook**: sentinel-padded key index, generic side engine, and the
//!   price-keyed / counted / order-id keyed side variants
//! - **Config**: per-book depth cap
//!
//! ## Design Principles
//!
//! 1. **No Floating Point**: prices and sizes are fixed-point u64 (10^8 scaling)
//! 2. **Pre-allocated Memory**: the key buffer is allocated once and never grows
//! 3. **Synchronous Execution**: single writer per side, no locks, no async
//! 4. **Idempotent Deltas**: deleting an absent level is a no-op
//!
//! ## Example
//!
//! ```
//! use depthbook::orderbook::{OrderBookSide, PriceKeyedSide};
//!
//! let mut bids = PriceKeyedSide::bids([(10, 2), (12, 1), (11, 3)], None).unwrap();
//! assert_eq!(bids.best().map(|l| l.price), Some(12));
//!
//! bids.limit(Some(1)).unwrap();
//! assert_eq!(bids.len(), 1);
//!
//! bids.limit(None).unwrap();
//! assert_eq!(bids.len(), 3);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Book configuration
pub mod config;

/// Error type and `Result` alias
pub mod error;

/// Order book sides and the two-sided book
pub mod orderbook;

/// Core data types: prices, levels, deltas, sides
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::BookConfig;
pub use error::{Error, Result};
pub use orderbook::{
    CountedBook, CountedSide, IndexedBook, IndexedSide, OrderBook, OrderBookSide, PriceBook,
    PriceKeyedSide,
};
pub use types::{CountedLevel, IndexedLevel, Level, Side};
