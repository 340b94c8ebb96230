//! Book configuration.
//!
//! The key buffer capacity is a compile-time ceiling
//! ([`crate::orderbook::CAPACITY`]); the only runtime knob is the hard depth
//! cap applied to each side.

use crate::error::{Error, Result};

/// Settings shared by both sides of an [`crate::orderbook::OrderBook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookConfig {
    /// Hard cap on levels kept per side, `None` for unbounded
    pub depth: Option<usize>,
}

impl BookConfig {
    /// Unbounded configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap each side at `depth` levels
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Reject a zero depth.
    pub fn validate(&self) -> Result<()> {
        match self.depth {
            Some(0) => Err(Error::InvalidDepth { depth: 0 }),
            _ => Ok(()),
        }
    }
}
