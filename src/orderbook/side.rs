//! Common surface of the three order book side variants.

use crate::error::Result;
use crate::types::{LevelRecord, Side};

/// What a feed handler and a snapshot consumer need from a side.
pub trait OrderBookSide: Sized {
    /// Stored record type
    type Level: LevelRecord;

    /// Incoming delta type
    type Delta;

    /// Create an empty side.
    fn empty(side: Side, depth: Option<usize>) -> Result<Self>;

    /// Apply one delta.
    fn store_array(&mut self, delta: Self::Delta) -> Result<()>;

    /// Bound the visible window; `None` restores hidden levels.
    fn limit(&mut self, n: Option<usize>) -> Result<()>;

    /// Drop every level.
    fn clear(&mut self);

    /// Visible levels, best first
    fn levels(&self) -> &[Self::Level];

    /// Direction of this side
    fn side(&self) -> Side;

    /// Hard depth cap
    fn depth(&self) -> Option<usize>;

    /// Number of levels held back by a soft limit
    fn hidden_len(&self) -> usize;

    /// Number of visible levels
    fn len(&self) -> usize {
        self.levels().len()
    }

    /// True if no level is visible
    fn is_empty(&self) -> bool {
        self.levels().is_empty()
    }

    /// Best visible level
    fn best(&self) -> Option<&Self::Level> {
        self.levels().first()
    }

    /// Apply a batch of deltas in order.
    fn store_all<I>(&mut self, deltas: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Self::Delta>,
    {
        for delta in deltas {
            self.store_array(delta.into())?;
        }
        Ok(())
    }

    /// Replace the contents with a fresh snapshot.
    fn reset<I>(&mut self, deltas: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Self::Delta>,
    {
        self.clear();
        self.store_all(deltas)
    }
}
