//! Generic interval container shared by every time-ranged track kind.
//!
//! An ordered sequence of items kept sorted by start time, supporting
//! point queries (non-overlap semantics), overlap queries, and the
//! ripple algebra (suffix shifts, range deletion with truncation).

use ripplecut_core::{TimeMs, TimeSpan};
use serde::{Deserialize, Serialize};

/// Access to an item's place on the timeline.
pub trait TimedItem {
    /// The item's `[start, end)` span.
    fn span(&self) -> TimeSpan;
    /// Replace the item's span.
    fn set_span(&mut self, span: TimeSpan);
}

/// An ordered sequence of time-ranged items, sorted by start ascending.
///
/// n stays small (typically < 200), so O(n) insertion shifts are fine
/// relative to UI redraw frequency; lookups are O(log n).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangedTrack<T> {
    items: Vec<T>,
}

impl<T> Default for RangedTrack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: TimedItem> RangedTrack<T> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// All items, sorted by start (read-only).
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at an index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Item at an index, mutably. Callers editing the span through this
    /// reference must follow up with [`Self::update_bounds`] to restore
    /// sort order.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Insert an item at its sorted position. Returns the index it
    /// landed at.
    pub fn insert(&mut self, item: T) -> usize {
        let start = item.span().start;
        let pos = self.items.partition_point(|i| i.span().start <= start);
        self.items.insert(pos, item);
        pos
    }

    /// The single item whose span contains `t`, assuming non-overlapping
    /// items. Binary search for the rightmost item starting at or before
    /// `t`, then a range check; when overlapping items have been forced
    /// in, the last sorted match wins.
    pub fn point_query(&self, t: TimeMs) -> Option<(usize, &T)> {
        let idx = self.items.partition_point(|i| i.span().start <= t);
        if idx == 0 {
            return None;
        }
        let item = &self.items[idx - 1];
        if item.span().contains(t) {
            Some((idx - 1, item))
        } else {
            None
        }
    }

    /// Every item active at `t` (overlap semantics), in ascending index
    /// order. Binary search to the rightmost candidate starting at or
    /// before `t`, then a scan backward over the candidates.
    pub fn range_query(&self, t: TimeMs) -> Vec<(usize, &T)> {
        let idx = self.items.partition_point(|i| i.span().start <= t);
        let mut hits: Vec<(usize, &T)> = self.items[..idx]
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, item)| item.span().end > t)
            .collect();
        hits.reverse();
        hits
    }

    /// Remove the item at an index. Out-of-range indices are a no-op:
    /// callers validate indices from UI state that may have gone stale.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Move an item to a new span: remove, retime, re-insert at the
    /// sorted position. Out-of-range indices are a no-op.
    pub fn update_bounds(&mut self, index: usize, span: TimeSpan) -> bool {
        if index >= self.items.len() {
            return false;
        }
        let mut item = self.items.remove(index);
        item.set_span(span);
        self.insert(item);
        true
    }

    /// Shift every item starting at or after `at` by `delta`, both
    /// bounds. Returns the number of items shifted. A negative delta can
    /// carry shifted items past unshifted ones, so order is restored
    /// afterwards.
    pub fn shift_from(&mut self, at: TimeMs, delta: TimeMs) -> usize {
        if delta.is_zero() {
            return 0;
        }
        let mut count = 0;
        for item in &mut self.items {
            let span = item.span();
            if span.start >= at {
                item.set_span(span.shifted(delta));
                count += 1;
            }
        }
        if count > 0 {
            self.items.sort_by_key(|i| i.span().start);
        }
        count
    }

    /// Cut a timeline range out from under the items and close the gap.
    ///
    /// Items entirely inside the range are removed; items overlapping it
    /// are truncated to the part that survives; items after it shift
    /// left by the range's length. Returns the number of items removed
    /// or modified.
    pub fn delete_range(&mut self, range: TimeSpan) -> usize {
        if range.is_empty() {
            return 0;
        }
        let a = range.start;
        let gap = range.duration();
        let mut touched = 0;
        let mut kept = Vec::with_capacity(self.items.len());
        for mut item in self.items.drain(..) {
            let span = item.span();
            let start = if span.start < a {
                span.start
            } else {
                (span.start - gap).max(a)
            };
            let end = if span.end <= a {
                span.end
            } else {
                (span.end - gap).max(a)
            };
            if start == span.start && end == span.end {
                kept.push(item);
                continue;
            }
            touched += 1;
            if end > start {
                item.set_span(TimeSpan::new(start, end));
                kept.push(item);
            }
        }
        self.items = kept;
        touched
    }
}
