//! Time representation for timeline editing
//!
//! All positions and durations are integer milliseconds. The editor never
//! needs sub-millisecond precision, and integer arithmetic keeps prefix
//! sums and interval comparisons exact under arbitrary interactive edits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point in time (or a span length) in integer milliseconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeMs(pub i64);

impl TimeMs {
    /// Zero time constant.
    pub const ZERO: Self = Self(0);

    /// Create a time from integer milliseconds.
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// Create a time from seconds as a float, rounding to the nearest
    /// millisecond.
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * 1000.0).round() as i64)
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Raw millisecond value.
    #[inline]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Check if this time is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Clamp into `[lo, hi]`.
    #[inline]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        Self(self.0.clamp(lo.0, hi.0))
    }

    /// Map a timeline-side span to the source side at the given playback
    /// speed (a 2x clip consumes source twice as fast). Floors.
    #[inline]
    pub fn scale(self, speed: f64) -> Self {
        Self((self.0 as f64 * speed).floor() as i64)
    }

    /// Map a source-side span to the timeline side at the given playback
    /// speed (a 2x clip occupies half its source length). Floors.
    #[inline]
    pub fn unscale(self, speed: f64) -> Self {
        Self((self.0 as f64 / speed).floor() as i64)
    }
}

impl Add for TimeMs {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeMs {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for TimeMs {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for TimeMs {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<i64> for TimeMs {
    type Output = Self;
    fn div(self, rhs: i64) -> Self {
        Self(self.0 / rhs)
    }
}

impl Sum for TimeMs {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = self.0.unsigned_abs();
        let ms = total_ms % 1_000;
        let total_secs = total_ms / 1_000;
        let secs = total_secs % 60;
        let total_mins = total_secs / 60;
        let mins = total_mins % 60;
        let hours = total_mins / 60;
        if self.0 < 0 {
            write!(f, "-{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        } else {
            write!(f, "{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        }
    }
}

/// A half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start time (inclusive)
    #[serde(rename = "start_ms")]
    pub start: TimeMs,
    /// End time (exclusive)
    #[serde(rename = "end_ms")]
    pub end: TimeMs,
}

impl TimeSpan {
    /// Create a new span from start and end times.
    #[inline]
    pub const fn new(start: TimeMs, end: TimeMs) -> Self {
        Self { start, end }
    }

    /// Create a span from start and duration.
    #[inline]
    pub fn from_start_duration(start: TimeMs, duration: TimeMs) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Length of the span. Negative for inverted spans.
    #[inline]
    pub fn duration(self) -> TimeMs {
        self.end - self.start
    }

    /// Whether the span covers no time (or is inverted).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Check if a time is within this span.
    #[inline]
    pub fn contains(self, time: TimeMs) -> bool {
        time >= self.start && time < self.end
    }

    /// Check if two spans overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Compute the intersection of two spans, if any.
    pub fn intersection(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// The span moved by `delta`, keeping its length.
    #[inline]
    pub fn shifted(self, delta: TimeMs) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Extend the end so the span is at least `floor` long. Used to clamp
    /// degenerate ranges produced by interactive edits instead of
    /// rejecting them.
    pub fn with_min_duration(self, floor: TimeMs) -> Self {
        if self.duration() < floor {
            Self {
                start: self.start,
                end: self.start + floor,
            }
        } else {
            self
        }
    }

    /// Empty span at zero.
    pub const EMPTY: Self = Self {
        start: TimeMs::ZERO,
        end: TimeMs::ZERO,
    };
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
