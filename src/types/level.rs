//! Level records stored in an order book side.
//!
//! ## SSZ Serialization
//!
//! Records derive `SimpleSerialize` so that book checksums hash an exact,
//! platform-independent byte layout (little-endian u64 fields).
//!
//! ## Fixed-Point Representation
//!
//! `price` and `size` are u64 scaled by 10^8 (see [`crate::types::price`]).

use std::fmt;

use ssz_rs::prelude::*;

use crate::error;
use crate::types::price::from_fixed_trimmed;

/// Capabilities the side engine needs from a level record.
///
/// `Id` distinguishes records sharing a sort key. Price-keyed records use
/// `()` since the price alone identifies them.
pub trait LevelRecord: Clone + fmt::Debug {
    /// Identity within a side, beyond the sort key
    type Id: Ord + Copy + fmt::Debug;

    /// Fixed-point price
    fn price(&self) -> u64;

    /// Identity used to find this record among equal sort keys
    fn id(&self) -> Self::Id;

    /// Deterministic byte encoding
    fn encode(&self) -> error::Result<Vec<u8>>;
}

fn encode_ssz<T: SimpleSerialize>(value: &T) -> error::Result<Vec<u8>> {
    ssz_rs::serialize(value).map_err(|e| error::Error::Encoding(format!("{:?}", e)))
}

// ============================================================================
// Level
// ============================================================================

/// A `(price, size)` level.
///
/// ```
/// use depthbook::types::Level;
///
/// let level = Level::new(5_000_000_000_000, 100_000_000);
/// assert_eq!(level.to_string(), "[50000, 1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Level {
    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,
    /// Aggregate size in fixed-point (scaled by 10^8)
    pub size: u64,
}

impl Level {
    /// Create a new level
    pub fn new(price: u64, size: u64) -> Self {
        Self { price, size }
    }
}

impl LevelRecord for Level {
    type Id = ();

    #[inline]
    fn price(&self) -> u64 {
        self.price
    }

    #[inline]
    fn id(&self) -> Self::Id {}

    fn encode(&self) -> error::Result<Vec<u8>> {
        encode_ssz(self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            from_fixed_trimmed(self.price),
            from_fixed_trimmed(self.size)
        )
    }
}

// ============================================================================
// CountedLevel
// ============================================================================

/// A `(price, size, count)` level, where `count` is the number of orders
/// resting at the price.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct CountedLevel {
    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,
    /// Aggregate size in fixed-point (scaled by 10^8)
    pub size: u64,
    /// Number of orders at this price
    pub count: u64,
}

impl CountedLevel {
    /// Create a new counted level
    pub fn new(price: u64, size: u64, count: u64) -> Self {
        Self { price, size, count }
    }
}

impl LevelRecord for CountedLevel {
    type Id = ();

    #[inline]
    fn price(&self) -> u64 {
        self.price
    }

    #[inline]
    fn id(&self) -> Self::Id {}

    fn encode(&self) -> error::Result<Vec<u8>> {
        encode_ssz(self)
    }
}

impl fmt::Display for CountedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            from_fixed_trimmed(self.price),
            from_fixed_trimmed(self.size),
            self.count
        )
    }
}

// ============================================================================
// IndexedLevel
// ============================================================================

/// A `(price, size, id)` entry keyed by an exchange-assigned order id.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct IndexedLevel {
    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,
    /// Size in fixed-point (scaled by 10^8)
    pub size: u64,
    /// Exchange order id, opaque to ordering
    pub id: u64,
}

impl IndexedLevel {
    /// Create a new indexed level
    pub fn new(price: u64, size: u64, id: u64) -> Self {
        Self { price, size, id }
    }
}

impl LevelRecord for IndexedLevel {
    type Id = u64;

    #[inline]
    fn price(&self) -> u64 {
        self.price
    }

    #[inline]
    fn id(&self) -> u64 {
        self.id
    }

    fn encode(&self) -> error::Result<Vec<u8>> {
        encode_ssz(self)
    }
}

impl fmt::Display for IndexedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            from_fixed_trimmed(self.price),
            from_fixed_trimmed(self.size),
            self.id
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(Level::new(150_000_000, 25_000_000).to_string(), "[1.5, 0.25]");
        assert_eq!(
            CountedLevel::new(100_000_000, 100_000_000, 3).to_string(),
            "[1, 1, 3]"
        );
        assert_eq!(
            IndexedLevel::new(100_000_000, 200_000_000, 42).to_string(),
            "[1, 2, 42]"
        );
    }

    #[test]
    fn test_level_encoding_size() {
        // Fixed-size containers: 8 bytes per u64 field
        assert_eq!(Level::new(1, 2).encode().unwrap().len(), 16);
        assert_eq!(CountedLevel::new(1, 2, 3).encode().unwrap().len(), 24);
        assert_eq!(IndexedLevel::new(1, 2, 3).encode().unwrap().len(), 24);
    }

    #[test]
    fn test_level_encoding_is_little_endian() {
        let bytes = Level::new(1, 256).encode().unwrap();
        assert_eq!(&bytes[..8], &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..], &[0, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_level_ids() {
        assert_eq!(IndexedLevel::new(1, 1, 9).id(), 9);
    }
}
