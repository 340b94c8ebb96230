//! Error types for depthbook.
//!
//! The core favours silent idempotence: deleting an absent level is not an
//! error. What remains are configuration defects (capacity, depth) and
//! rejected input (malformed deltas).

use thiserror::Error;

/// Errors returned by order book side operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The fixed key buffer is full. Capacity must exceed any realistic depth.
    #[error("sorted level index is full (capacity {capacity})")]
    CapacityExceeded {
        /// The configured capacity that was exhausted
        capacity: usize,
    },

    /// A depth cap of zero was requested.
    #[error("depth must be a positive number of levels, got {depth}")]
    InvalidDepth {
        /// The rejected depth
        depth: usize,
    },

    /// The price cannot be represented as a sort key below the sentinel.
    #[error("price {price} is out of range for the level index")]
    PriceOutOfRange {
        /// Raw fixed-point price
        price: u64,
    },

    /// A fresh id arrived without a price.
    #[error("delta for unseen order id {id} carries no price")]
    MissingPrice {
        /// The order id
        id: u64,
    },

    /// A delta tuple is missing a required field.
    #[error("malformed delta: {reason}")]
    MalformedDelta {
        /// What was missing
        reason: &'static str,
    },

    /// A numeric field could not be parsed.
    #[error("invalid numeric field {value:?}")]
    InvalidNumber {
        /// The offending input
        value: String,
    },

    /// SSZ encoding of a level failed.
    #[error("failed to encode level: {0}")]
    Encoding(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
