//! Incoming deltas, one per book side variant.
//!
//! A delta sets (`size > 0`) or removes (`size == 0`) a level. Feed handlers
//! usually hold the raw string fields the exchange sent; the `parse`
//! constructors convert them to fixed-point and reject malformed tuples
//! instead of guessing missing values.

use crate::error::{Error, Result};
use crate::types::price::{to_count, to_fixed};

fn fixed_field(fields: &[&str], index: usize, reason: &'static str) -> Result<u64> {
    let raw = fields
        .get(index)
        .ok_or(Error::MalformedDelta { reason })?;
    to_fixed(raw).ok_or_else(|| Error::InvalidNumber {
        value: (*raw).to_string(),
    })
}

/// `[price, size]` delta for a price-keyed side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDelta {
    /// Price in fixed-point
    pub price: u64,
    /// New absolute size, zero removes the level
    pub size: u64,
}

impl PriceDelta {
    /// Create a delta from fixed-point values
    pub fn new(price: u64, size: u64) -> Self {
        Self { price, size }
    }

    /// Parse `[price, size]` decimal strings
    ///
    /// ```
    /// use depthbook::types::PriceDelta;
    ///
    /// let delta = PriceDelta::parse(&["101.5", "0.25"]).unwrap();
    /// assert_eq!(delta, PriceDelta::new(10_150_000_000, 25_000_000));
    /// assert!(PriceDelta::parse(&["101.5"]).is_err());
    /// ```
    pub fn parse(fields: &[&str]) -> Result<Self> {
        Ok(Self {
            price: fixed_field(fields, 0, "missing price")?,
            size: fixed_field(fields, 1, "missing size")?,
        })
    }
}

impl From<(u64, u64)> for PriceDelta {
    fn from((price, size): (u64, u64)) -> Self {
        Self::new(price, size)
    }
}

impl From<[u64; 2]> for PriceDelta {
    fn from([price, size]: [u64; 2]) -> Self {
        Self::new(price, size)
    }
}

/// `[price, size, count]` delta for a counted side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountedDelta {
    /// Price in fixed-point
    pub price: u64,
    /// New absolute size
    pub size: u64,
    /// Number of orders at the price
    pub count: u64,
}

impl CountedDelta {
    /// Create a delta from fixed-point values
    pub fn new(price: u64, size: u64, count: u64) -> Self {
        Self { price, size, count }
    }

    /// Parse `[price, size, count]` strings
    pub fn parse(fields: &[&str]) -> Result<Self> {
        let price = fixed_field(fields, 0, "missing price")?;
        let size = fixed_field(fields, 1, "missing size")?;
        let raw = fields.get(2).ok_or(Error::MalformedDelta {
            reason: "missing count",
        })?;
        let count = to_count(raw).ok_or_else(|| Error::InvalidNumber {
            value: (*raw).to_string(),
        })?;
        Ok(Self { price, size, count })
    }
}

impl From<(u64, u64, u64)> for CountedDelta {
    fn from((price, size, count): (u64, u64, u64)) -> Self {
        Self::new(price, size, count)
    }
}

impl From<[u64; 3]> for CountedDelta {
    fn from([price, size, count]: [u64; 3]) -> Self {
        Self::new(price, size, count)
    }
}

/// `[price?, size, id]` delta for an id-keyed side.
///
/// `price == None` means the price of a known id is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedDelta {
    /// Price in fixed-point, absent when unchanged
    pub price: Option<u64>,
    /// New absolute size
    pub size: u64,
    /// Exchange order id
    pub id: u64,
}

impl IndexedDelta {
    /// Create a delta from fixed-point values
    pub fn new(price: Option<u64>, size: u64, id: u64) -> Self {
        Self { price, size, id }
    }

    /// Parse `[price, size, id]` strings; an empty price means "unchanged"
    ///
    /// ```
    /// use depthbook::types::IndexedDelta;
    ///
    /// let delta = IndexedDelta::parse(&["", "2", "17"]).unwrap();
    /// assert_eq!(delta, IndexedDelta::new(None, 200_000_000, 17));
    /// ```
    pub fn parse(fields: &[&str]) -> Result<Self> {
        let price = match fields.first() {
            None => {
                return Err(Error::MalformedDelta {
                    reason: "missing price field",
                })
            }
            Some(raw) if raw.trim().is_empty() => None,
            Some(_) => Some(fixed_field(fields, 0, "missing price")?),
        };
        let size = fixed_field(fields, 1, "missing size")?;
        let raw = fields.get(2).ok_or(Error::MalformedDelta {
            reason: "missing id",
        })?;
        let id = raw.trim().parse::<u64>().map_err(|_| Error::InvalidNumber {
            value: (*raw).to_string(),
        })?;
        Ok(Self { price, size, id })
    }
}

impl From<(Option<u64>, u64, u64)> for IndexedDelta {
    fn from((price, size, id): (Option<u64>, u64, u64)) -> Self {
        Self::new(price, size, id)
    }
}

impl From<(u64, u64, u64)> for IndexedDelta {
    fn from((price, size, id): (u64, u64, u64)) -> Self {
        Self::new(Some(price), size, id)
    }
}
