//! Clip types for the timeline.

use ripplecut_core::{TimeMs, TimeSpan, VolumeEnvelope};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies the source media a clip reads from.
///
/// An explicit sum type instead of a sentinel id: `Primary` is the
/// project's main video, `External` any other imported source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Uuid>", into = "Option<Uuid>")]
pub enum ClipSource {
    /// The project's primary video.
    #[default]
    Primary,
    /// An external media source.
    External(Uuid),
}

impl ClipSource {
    /// Whether this is the project's primary video.
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }
}

impl From<Option<Uuid>> for ClipSource {
    fn from(id: Option<Uuid>) -> Self {
        match id {
            None => Self::Primary,
            Some(id) => Self::External(id),
        }
    }
}

impl From<ClipSource> for Option<Uuid> {
    fn from(source: ClipSource) -> Self {
        match source {
            ClipSource::Primary => None,
            ClipSource::External(id) => Some(id),
        }
    }
}

/// Filter for source→timeline lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFilter {
    /// Match clips from any source.
    Any,
    /// Match only clips reading the primary video.
    Primary,
    /// Match only clips reading the given external source.
    Source(Uuid),
}

impl SourceFilter {
    /// Whether a clip source passes this filter.
    pub fn matches(&self, source: &ClipSource) -> bool {
        match self {
            Self::Any => true,
            Self::Primary => source.is_primary(),
            Self::Source(id) => matches!(source, ClipSource::External(s) if s == id),
        }
    }
}

/// Kind of cross-fade rendered between two adjacent clips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    #[default]
    CrossDissolve,
    DipToBlack,
    DipToWhite,
    Wipe,
    Push,
}

/// A transition into the *next* clip on the same track.
///
/// Rendered as an overlap, so it shortens the track's output duration
/// by its own length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Transition kind.
    #[serde(rename = "type", default)]
    pub kind: TransitionKind,
    /// Overlap length.
    #[serde(rename = "duration_ms")]
    pub duration: TimeMs,
}

impl Transition {
    /// Create a new transition.
    pub fn new(kind: TransitionKind, duration: TimeMs) -> Self {
        Self { kind, duration }
    }
}

fn unity() -> f64 {
    1.0
}

fn is_unity(v: &f64) -> bool {
    *v == 1.0
}

/// One contiguous region of a source video placed on the output timeline.
///
/// `source_in`/`source_out` window the source media; `speed` maps that
/// window onto the output timeline, so the clip's footprint is
/// `(source_out - source_in) / speed` (floored). Envelope offsets are
/// post-speed, relative to the clip's own start.
///
/// Speed is documented as 0.25–4.0 and must stay positive; the clip does
/// not validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Which source video this clip reads.
    #[serde(
        rename = "source_id",
        default,
        skip_serializing_if = "ClipSource::is_primary"
    )]
    pub source: ClipSource,
    /// In point into the source media.
    #[serde(rename = "source_in_ms")]
    pub source_in: TimeMs,
    /// Out point into the source media (exclusive).
    #[serde(rename = "source_out_ms")]
    pub source_out: TimeMs,
    /// Playback speed (1.0 = normal).
    #[serde(default = "unity", skip_serializing_if = "is_unity")]
    pub speed: f64,
    /// Flat gain used when the envelope is empty.
    #[serde(default = "unity", skip_serializing_if = "is_unity")]
    pub volume: f64,
    /// Per-clip volume automation.
    #[serde(
        rename = "volume_points",
        default,
        skip_serializing_if = "VolumeEnvelope::is_empty"
    )]
    pub envelope: VolumeEnvelope,
    /// Brightness adjustment (1.0 = untouched).
    #[serde(default = "unity", skip_serializing_if = "is_unity")]
    pub brightness: f64,
    /// Contrast adjustment (1.0 = untouched).
    #[serde(default = "unity", skip_serializing_if = "is_unity")]
    pub contrast: f64,
    /// Saturation adjustment (1.0 = untouched).
    #[serde(default = "unity", skip_serializing_if = "is_unity")]
    pub saturation: f64,
    /// Cross-fade into the next clip on the same track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_out: Option<Transition>,
}

impl Clip {
    /// Create a new clip over a source window.
    pub fn new(source: ClipSource, source_in: TimeMs, source_out: TimeMs) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            source_in,
            source_out,
            speed: 1.0,
            volume: 1.0,
            envelope: VolumeEnvelope::new(),
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            transition_out: None,
        }
    }

    /// A clip spanning the whole primary video.
    pub fn from_full_source(duration: TimeMs) -> Self {
        Self::new(ClipSource::Primary, TimeMs::ZERO, duration)
    }

    /// The window into the source media.
    pub fn source_span(&self) -> TimeSpan {
        TimeSpan::new(self.source_in, self.source_out)
    }

    /// The clip's footprint on the output timeline.
    pub fn duration(&self) -> TimeMs {
        (self.source_out - self.source_in).unscale(self.speed)
    }

    /// Gain at an offset from the clip's start (post-speed milliseconds).
    /// Falls back to the flat volume when no envelope is set.
    pub fn volume_at(&self, offset: TimeMs) -> f64 {
        self.envelope.evaluate(offset).unwrap_or(self.volume)
    }

    /// Split at an offset relative to the clip's visual start, preserving
    /// the volume envelope on both sides.
    ///
    /// The left half keeps the source window up to the split point and
    /// ends in a hard cut; the right half keeps the remainder, including
    /// any transition into the following clip. Gain is continuous across
    /// the cut. Both halves get fresh ids.
    pub fn split_at(&self, offset: TimeMs) -> (Clip, Clip) {
        let split_src = self.source_in + offset.scale(self.speed);
        let (left_env, right_env) = self.envelope.split_at(offset);

        let mut first = self.clone();
        first.id = Uuid::new_v4();
        first.source_out = split_src;
        first.envelope = left_env;
        first.transition_out = None;

        let mut second = self.clone();
        second.id = Uuid::new_v4();
        second.source_in = split_src;
        second.envelope = right_env;

        (first, second)
    }

    /// Shift every envelope point by `delta`. Used when the clip's start
    /// is trimmed, since envelope offsets are clip-relative.
    pub fn shift_volume_points(&mut self, delta: TimeMs) {
        self.envelope.shift(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripplecut_core::VolumePoint;

    #[test]
    fn test_duration_scales_with_speed() {
        let mut clip = Clip::new(ClipSource::Primary, TimeMs::new(1000), TimeMs::new(5000));
        assert_eq!(clip.duration(), TimeMs::new(4000));

        clip.speed = 2.0;
        assert_eq!(clip.duration(), TimeMs::new(2000));

        clip.speed = 0.5;
        assert_eq!(clip.duration(), TimeMs::new(8000));
    }

    #[test]
    fn test_flat_volume_without_envelope() {
        let mut clip = Clip::from_full_source(TimeMs::new(1000));
        clip.volume = 0.6;
        assert_eq!(clip.volume_at(TimeMs::ZERO), 0.6);
        assert_eq!(clip.volume_at(TimeMs::new(999)), 0.6);
    }

    #[test]
    fn test_envelope_overrides_flat_volume() {
        let mut clip = Clip::from_full_source(TimeMs::new(1000));
        clip.volume = 0.6;
        clip.envelope = VolumeEnvelope::from_points(vec![
            VolumePoint::new(TimeMs::ZERO, 0.0),
            VolumePoint::new(TimeMs::new(1000), 1.0),
        ]);
        assert_eq!(clip.volume_at(TimeMs::new(500)), 0.5);
    }

    #[test]
    fn test_split_source_arithmetic() {
        let mut clip = Clip::new(ClipSource::Primary, TimeMs::new(2000), TimeMs::new(10000));
        clip.speed = 2.0; // 4000ms on the timeline

        let (first, second) = clip.split_at(TimeMs::new(1000));
        assert_eq!(first.source_in, TimeMs::new(2000));
        assert_eq!(first.source_out, TimeMs::new(4000)); // 2000 + 1000*2
        assert_eq!(second.source_in, TimeMs::new(4000));
        assert_eq!(second.source_out, TimeMs::new(10000));
        assert_eq!(first.duration() + second.duration(), clip.duration());
    }

    #[test]
    fn test_split_volume_continuity() {
        let mut clip = Clip::from_full_source(TimeMs::new(1000));
        clip.envelope = VolumeEnvelope::from_points(vec![
            VolumePoint::new(TimeMs::ZERO, 0.2),
            VolumePoint::new(TimeMs::new(1000), 1.2),
        ]);

        let (first, second) = clip.split_at(TimeMs::new(300));
        let at_cut = clip.volume_at(TimeMs::new(300));
        assert_eq!(first.volume_at(first.duration()), at_cut);
        assert_eq!(second.volume_at(TimeMs::ZERO), at_cut);
    }

    #[test]
    fn test_split_transition_stays_on_right() {
        let mut clip = Clip::from_full_source(TimeMs::new(2000));
        clip.transition_out = Some(Transition::new(
            TransitionKind::CrossDissolve,
            TimeMs::new(250),
        ));

        let (first, second) = clip.split_at(TimeMs::new(1000));
        assert!(first.transition_out.is_none());
        assert_eq!(second.transition_out, clip.transition_out);
    }

    #[test]
    fn test_split_assigns_fresh_ids() {
        let clip = Clip::from_full_source(TimeMs::new(1000));
        let (first, second) = clip.split_at(TimeMs::new(500));
        assert_ne!(first.id, clip.id);
        assert_ne!(second.id, clip.id);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_source_filter() {
        let ext = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(SourceFilter::Any.matches(&ClipSource::Primary));
        assert!(SourceFilter::Any.matches(&ClipSource::External(ext)));
        assert!(SourceFilter::Primary.matches(&ClipSource::Primary));
        assert!(!SourceFilter::Primary.matches(&ClipSource::External(ext)));
        assert!(SourceFilter::Source(ext).matches(&ClipSource::External(ext)));
        assert!(!SourceFilter::Source(other).matches(&ClipSource::External(ext)));
        assert!(!SourceFilter::Source(ext).matches(&ClipSource::Primary));
    }
}
