//! Generic order book side engine.
//!
//! ## Architecture
//!
//! One engine serves all three side variants. It owns:
//!
//! - **Key index**: [`SortedLevelIndex`] with the sort key of every visible level
//! - **Levels**: a `Vec` of records parallel to the key index
//! - **Hidden store**: levels moved out of view by a soft `limit`, ordered by
//!   `(sort key, id)` so they can be re-admitted in order
//! - **Depth cap**: hard bound on visible + hidden levels
//!
//! Variants decide *when* a delta is an upsert or a removal (the presence
//! predicate) and what to do when a level is evicted; the engine does the
//! searching, shifting, hiding and evicting.
//!
//! ## Soft limit vs hard depth
//!
//! ```text
//! limit(Some(n)):  visible[n..]  -> hidden       (recoverable)
//! limit(None):     hidden        -> visible      (re-admitted in order)
//! depth exceeded:  worst level   -> dropped      (irrecoverable)
//! ```

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::orderbook::SortedLevelIndex;
use crate::types::{LevelRecord, Side};

/// Sorted, depth-bounded storage for one side of a book.
#[derive(Debug, Clone)]
pub struct BookSide<R: LevelRecord> {
    side: Side,
    depth: Option<usize>,
    index: SortedLevelIndex,
    levels: Vec<R>,
    hidden: BTreeMap<(i64, R::Id), R>,
}

impl<R: LevelRecord> BookSide<R> {
    /// Create an empty side.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDepth`] if `depth` is `Some(0)`.
    pub fn new(side: Side, depth: Option<usize>) -> Result<Self> {
        if let Some(0) = depth {
            return Err(Error::InvalidDepth { depth: 0 });
        }
        Ok(Self {
            side,
            depth,
            index: SortedLevelIndex::new(),
            levels: Vec::new(),
            hidden: BTreeMap::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Direction of this side
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Hard depth cap, `None` if unbounded
    #[inline]
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// Visible levels, best first
    #[inline]
    pub fn levels(&self) -> &[R] {
        &self.levels
    }

    /// Sort keys of the visible levels
    #[inline]
    pub fn keys(&self) -> &[i64] {
        self.index.keys()
    }

    /// Number of visible levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True if no level is visible
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of levels held back by a soft limit
    #[inline]
    pub fn hidden_len(&self) -> usize {
        self.hidden.len()
    }

    /// Sort key for `price` on this side
    #[inline]
    pub fn sort_key(&self, price: u64) -> Result<i64> {
        self.side.sort_key(price)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Position of the visible level with this key and id.
    pub fn position(&self, key: i64, id: R::Id) -> Option<usize> {
        let start = self.index.locate(key);
        self.index.keys()[start..]
            .iter()
            .take_while(|&&k| k == key)
            .zip(&self.levels[start..])
            .position(|(_, level)| level.id() == id)
            .map(|offset| start + offset)
    }

    /// The level with this key and id, visible or hidden.
    pub fn find(&self, key: i64, id: R::Id) -> Option<&R> {
        match self.position(key, id) {
            Some(i) => self.levels.get(i),
            None => self.hidden.get(&(key, id)),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Overwrite the level at `(key, id)` or insert it at its sorted position.
    ///
    /// Hidden levels are updated where they are rather than pulled back into
    /// view. A fresh insert may push the side over its depth cap, in which
    /// case the worst levels are evicted and handed to `on_evict`.
    pub fn upsert<F>(&mut self, key: i64, level: R, on_evict: F) -> Result<()>
    where
        F: FnMut(R),
    {
        let id = level.id();
        if let Some(slot) = self.hidden.get_mut(&(key, id)) {
            *slot = level;
            return Ok(());
        }
        if let Some(i) = self.position(key, id) {
            self.levels[i] = level;
            return Ok(());
        }

        let i = self.index.locate_after(key);
        self.index.insert_at(i, key)?;
        self.levels.insert(i, level);
        trace!(side = ?self.side, key, index = i, len = self.levels.len(), "inserted level");

        self.enforce_depth(on_evict);
        Ok(())
    }

    /// Remove the level at `(key, id)`, visible or hidden.
    ///
    /// Absent levels are ignored.
    pub fn remove(&mut self, key: i64, id: R::Id) -> Option<R> {
        if let Some(level) = self.hidden.remove(&(key, id)) {
            trace!(side = ?self.side, key, "removed hidden level");
            return Some(level);
        }

        let i = self.position(key, id)?;
        self.index.remove_at(i);
        let level = self.levels.remove(i);
        trace!(side = ?self.side, key, index = i, len = self.levels.len(), "removed level");
        Some(level)
    }

    /// Move the level for `level.id()` from key `from` to key `to`.
    ///
    /// The moved level lands in the visible sequence. If it cannot be
    /// inserted the old level is left where it was.
    pub fn relocate<F>(&mut self, from: i64, to: i64, level: R, on_evict: F) -> Result<()>
    where
        F: FnMut(R),
    {
        let id = level.id();
        if let Some(old) = self.hidden.remove(&(from, id)) {
            // Index untouched, so a failed insert only has to put this back
            if let Err(err) = self.upsert(to, level, on_evict) {
                self.hidden.insert((from, id), old);
                return Err(err);
            }
            return Ok(());
        }

        // Freeing a visible slot first means the insert below has room
        if let Some(i) = self.position(from, id) {
            self.index.remove_at(i);
            self.levels.remove(i);
        }
        self.upsert(to, level, on_evict)
    }

    /// Bound the visible window.
    ///
    /// - `None` re-admits every hidden level.
    /// - `Some(n)` hides every level past position `n`; no-op if `n >= len`.
    ///
    /// Afterwards levels beyond the depth cap are evicted into `on_evict`.
    pub fn limit<F>(&mut self, n: Option<usize>, on_evict: F) -> Result<()>
    where
        F: FnMut(R),
    {
        match n {
            None => self.restore_hidden()?,
            Some(n) if n < self.levels.len() => {
                let keys = &self.index.keys()[n..];
                for (&key, level) in keys.iter().zip(self.levels.drain(n..)) {
                    self.hidden.insert((key, level.id()), level);
                }
                self.index.truncate(n);
                debug!(
                    side = ?self.side,
                    visible = n,
                    hidden = self.hidden.len(),
                    "soft limit applied"
                );
            }
            Some(_) => {}
        }

        self.enforce_depth(on_evict);
        Ok(())
    }

    /// Drop every visible and hidden level.
    pub fn clear(&mut self) {
        self.index.clear();
        self.levels.clear();
        self.hidden.clear();
    }

    fn restore_hidden(&mut self) -> Result<()> {
        if self.hidden.is_empty() {
            return Ok(());
        }

        let capacity = self.index.capacity();
        if self.levels.len() + self.hidden.len() > capacity {
            warn!(
                side = ?self.side,
                visible = self.levels.len(),
                hidden = self.hidden.len(),
                "hidden levels do not fit, restore refused"
            );
            return Err(Error::CapacityExceeded { capacity });
        }

        let count = self.hidden.len();
        while let Some(((key, id), level)) = self.hidden.pop_first() {
            // A level stored again while hidden is already visible
            if self.position(key, id).is_some() {
                continue;
            }
            let i = self.index.locate_after(key);
            if let Err(err) = self.index.insert_at(i, key) {
                self.hidden.insert((key, id), level);
                return Err(err);
            }
            self.levels.insert(i, level);
        }
        debug!(
            side = ?self.side,
            restored = count,
            len = self.levels.len(),
            "hidden levels restored"
        );
        Ok(())
    }

    /// Evict the worst levels until visible + hidden fits the depth cap.
    fn enforce_depth<F>(&mut self, mut on_evict: F)
    where
        F: FnMut(R),
    {
        let Some(depth) = self.depth else {
            return;
        };

        let mut evicted = 0usize;
        while self.levels.len() + self.hidden.len() > depth {
            let from_hidden = match (self.index.last(), self.hidden.last_key_value()) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(visible), Some(((hidden, _), _))) => *hidden >= visible,
            };

            let level = if from_hidden {
                self.hidden.pop_last().map(|(_, level)| level)
            } else {
                let last = self.levels.len() - 1;
                self.index.remove_at(last);
                self.levels.pop()
            };

            match level {
                Some(level) => on_evict(level),
                None => break,
            }
            evicted += 1;
        }

        if evicted > 0 {
            debug!(side = ?self.side, evicted, depth, "levels evicted past depth cap");
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
