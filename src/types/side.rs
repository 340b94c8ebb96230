//! Book side direction.
//!
//! Direction is data, not behaviour: the only thing it changes is how a
//! price maps to a sort key. Asks sort by price, bids by negated price, so
//! both use one ascending search and the best level is always at index 0.

use crate::error::{Error, Result};

/// Which half of the book a side holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy interest, best = highest price
    #[default]
    Bid,
    /// Sell interest, best = lowest price
    Ask,
}

impl Side {
    /// True for the bid side
    #[inline]
    pub fn is_bid(self) -> bool {
        matches!(self, Side::Bid)
    }

    /// Map a fixed-point price to its sort key.
    ///
    /// `i64::MAX` is reserved for the index sentinel, so prices at or above
    /// it are rejected.
    ///
    /// ```
    /// use depthbook::types::Side;
    ///
    /// assert_eq!(Side::Ask.sort_key(100).unwrap(), 100);
    /// assert_eq!(Side::Bid.sort_key(100).unwrap(), -100);
    /// ```
    #[inline]
    pub fn sort_key(self, price: u64) -> Result<i64> {
        let key = match i64::try_from(price) {
            Ok(key) if key < i64::MAX => key,
            _ => return Err(Error::PriceOutOfRange { price }),
        };
        Ok(if self.is_bid() { -key } else { key })
    }
}
