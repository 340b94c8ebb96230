//! Order book side structures.
//!
//! ## Architecture
//!
//! Every side is a sorted, depth-bounded array of levels maintained in place
//! from a stream of deltas:
//!
//! - **SortedLevelIndex**: fixed-capacity, sentinel-padded key buffer with
//!   binary search and shift-copy insert/remove
//! - **BookSide**: generic engine pairing the key buffer with the level
//!   records, the hidden store and the depth cap
//! - **Variants**: price-keyed, counted and order-id keyed wrappers that
//!   decide when a delta inserts, updates or removes
//!
//! ## Components
//!
//! - [`SortedLevelIndex`]: sort keys, best first
//! - [`BookSide`]: shared search/shift/limit/evict logic
//! - [`PriceKeyedSide`]: `(price, size)` levels
//! - [`CountedSide`]: `(price, size, count)` levels
//! - [`IndexedSide`]: `(price, size, id)` entries with price moves
//! - [`OrderBook`]: an ask side and a bid side together
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Locate level | O(log CAPACITY) |
//! | Update in place | O(log n) |
//! | Insert / remove | O(n) shift |
//! | Indexed move | two O(n) shifts |
//! | Best level | O(1) |
//!
//! ## Example
//!
//! ```
//! use depthbook::orderbook::{OrderBookSide, PriceKeyedSide};
//!
//! let mut asks = PriceKeyedSide::asks([(100, 1), (101, 1), (102, 1), (99, 1)], Some(3)).unwrap();
//! let prices: Vec<u64> = asks.levels().iter().map(|l| l.price).collect();
//! assert_eq!(prices, vec![99, 100, 101]);
//!
//! asks.store(99, 0).unwrap();
//! assert_eq!(asks.len(), 2);
//! ```

pub mod book;
pub mod counted;
pub mod engine;
pub mod index;
pub mod indexed;
pub mod price_keyed;
pub mod side;

pub use book::{CountedBook, IndexedBook, OrderBook, PriceBook};
pub use counted::CountedSide;
pub use engine::BookSide;
pub use index::{SortedLevelIndex, CAPACITY, SENTINEL};
pub use indexed::IndexedSide;
pub use price_keyed::PriceKeyedSide;
pub use side::OrderBookSide;
