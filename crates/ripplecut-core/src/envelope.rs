//! Per-clip volume automation.
//!
//! A volume envelope is a piecewise-linear gain curve: sorted control
//! points, clamped evaluation outside the covered range, linear
//! interpolation between neighbours.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::TimeMs;

/// A single gain control point, offset from the clip's own start
/// (post-speed, i.e. visual milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    /// Offset from clip start.
    #[serde(rename = "offset_ms")]
    pub offset: TimeMs,
    /// Gain at this offset (1.0 = unity).
    #[serde(rename = "volume")]
    pub gain: f64,
}

impl VolumePoint {
    /// Create a new control point.
    pub fn new(offset: TimeMs, gain: f64) -> Self {
        Self { offset, gain }
    }
}

/// A piecewise-linear gain curve for one clip.
///
/// Points are kept sorted by offset after every mutation. An empty
/// envelope carries no opinion; the owning clip falls back to its flat
/// volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeEnvelope {
    points: Vec<VolumePoint>,
}

impl VolumeEnvelope {
    /// Create an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an envelope from arbitrary points, sorting them.
    pub fn from_points(mut points: Vec<VolumePoint>) -> Self {
        points.sort_by_key(|p| p.offset);
        Self { points }
    }

    /// Insert or update a control point. Maintains sorted order.
    pub fn set(&mut self, offset: TimeMs, gain: f64) {
        if let Some(p) = self.points.iter_mut().find(|p| p.offset == offset) {
            p.gain = gain;
            return;
        }
        let pos = self
            .points
            .binary_search_by(|p| p.offset.cmp(&offset))
            .unwrap_or_else(|e| e);
        self.points.insert(pos, VolumePoint::new(offset, gain));
    }

    /// Remove the control point at the given offset.
    pub fn remove(&mut self, offset: TimeMs) -> bool {
        if let Some(pos) = self.points.iter().position(|p| p.offset == offset) {
            self.points.remove(pos);
            true
        } else {
            false
        }
    }

    /// Evaluate the gain at an offset. `None` when the envelope is empty.
    ///
    /// Offsets before the first point clamp to the first point's gain,
    /// offsets after the last clamp to the last. In between, the
    /// bracketing pair is found by binary search and interpolated
    /// linearly; coincident bracketing offsets hold the earlier gain.
    pub fn evaluate(&self, offset: TimeMs) -> Option<f64> {
        let first = self.points.first()?;
        if self.points.len() == 1 || offset <= first.offset {
            return Some(first.gain);
        }
        let last = self.points[self.points.len() - 1];
        if offset >= last.offset {
            return Some(last.gain);
        }

        let idx = self.points.partition_point(|p| p.offset <= offset) - 1;
        let a = self.points[idx];
        let b = self.points[idx + 1];

        let span = (b.offset - a.offset).as_millis();
        if span == 0 {
            return Some(a.gain);
        }
        let t = (offset - a.offset).as_millis() as f64 / span as f64;
        Some(a.gain + (b.gain - a.gain) * t)
    }

    /// Partition the envelope at `offset` into the curves for the two
    /// halves of a split clip.
    ///
    /// The left half keeps every point before the split plus a
    /// synthesized point at the split offset; the right half gets the
    /// remaining points re-based to 0, prefixed with a synthesized point
    /// at 0. Both synthesized points hold the interpolated gain at the
    /// split, so playback volume is continuous across the cut.
    pub fn split_at(&self, offset: TimeMs) -> (Self, Self) {
        let Some(gain) = self.evaluate(offset) else {
            return (Self::new(), Self::new());
        };

        let mut left: Vec<VolumePoint> = self
            .points
            .iter()
            .filter(|p| p.offset < offset)
            .copied()
            .collect();
        left.push(VolumePoint::new(offset, gain));

        let mut right = vec![VolumePoint::new(TimeMs::ZERO, gain)];
        right.extend(
            self.points
                .iter()
                .filter(|p| p.offset > offset)
                .map(|p| VolumePoint::new(p.offset - offset, p.gain)),
        );

        (Self { points: left }, Self { points: right })
    }

    /// Shift every point by `delta` and re-sort. Used when the clip's
    /// start is trimmed, since offsets are clip-relative.
    pub fn shift(&mut self, delta: TimeMs) {
        for p in &mut self.points {
            p.offset = p.offset + delta;
        }
        self.points.sort_by_key(|p| p.offset);
    }

    /// All control points (read-only, sorted).
    pub fn points(&self) -> &[VolumePoint] {
        &self.points
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the envelope has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for VolumeEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VolumeEnvelope({} points)", self.points.len())
    }
}
