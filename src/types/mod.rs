//! Core data types for depthbook
//!
//! All numeric values use fixed-point representation (scaled by 10^8).
//!
//! ## Types
//!
//! - [`Side`]: Bid or Ask, and the price -> sort key mapping
//! - [`Level`], [`CountedLevel`], [`IndexedLevel`]: stored level records
//! - [`PriceDelta`], [`CountedDelta`], [`IndexedDelta`]: incoming updates
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices and sizes are stored as `u64` scaled by 10^8.
//! Example: 50000.12345678 is stored as 5_000_012_345_678u64

mod delta;
mod level;
mod side;
pub mod price;

pub use delta::{CountedDelta, IndexedDelta, PriceDelta};
pub use level::{CountedLevel, IndexedLevel, Level, LevelRecord};
pub use side::Side;
