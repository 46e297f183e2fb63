//! Video track: an ordered sequence of clips and its time-mapping algebra.

use ripplecut_core::{TimeMs, TimeSpan};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::clip::{Clip, ClipSource, SourceFilter};

/// Minimum clip content kept by trims, and the margin a split must keep
/// from either clip edge.
pub const MIN_CLIP_MS: TimeMs = TimeMs::new(100);

/// Prefix-sum offsets for a track: `offsets[i]` is the output-timeline
/// start of clip `i`, `offsets[n]` the total output duration.
pub type TrackOffsets = SmallVec<[TimeMs; 16]>;

/// One video track: an ordered sequence of clips defining an output
/// timeline.
///
/// Clips are concatenated in sequence order; a clip's transition into
/// its successor is rendered as an overlap and shortens the total
/// length. A track always holds at least one clip.
///
/// Clips are reached by index or id, never by retained reference, so a
/// stale handle after a structural edit fails as a no-op instead of
/// aliasing the wrong clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTrack {
    /// Unique track ID.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Track name.
    pub name: String,
    /// Clips in output order.
    clips: Vec<Clip>,
    /// Locked tracks ignore ripple shifts and edits.
    #[serde(default)]
    pub locked: bool,
    /// Hidden tracks are skipped by rendering, not by editing.
    #[serde(default)]
    pub hidden: bool,
}

impl VideoTrack {
    /// Create a track holding one clip.
    pub fn new(name: impl Into<String>, first: Clip) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            clips: vec![first],
            locked: false,
            hidden: false,
        }
    }

    /// A track holding the whole primary video, uncut.
    pub fn from_full_video(duration: TimeMs) -> Self {
        Self::new("V1", Clip::from_full_source(duration))
    }

    /// Clips in output order (read-only).
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// A track never has zero clips; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clip at an index.
    pub fn clip(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    /// Clip at an index, mutably. Callers must not retain the reference
    /// across structural edits.
    pub fn clip_mut(&mut self, index: usize) -> Option<&mut Clip> {
        self.clips.get_mut(index)
    }

    /// Find a clip by id. Returns `(index, &Clip)`.
    pub fn find_clip(&self, id: Uuid) -> Option<(usize, &Clip)> {
        self.clips
            .iter()
            .enumerate()
            .find(|(_, clip)| clip.id == id)
    }

    /// Output-timeline start of every clip plus the total duration,
    /// recomputed on demand. Not cached: clips may be edited directly by
    /// holders of a `clip_mut` reference between calls, and every
    /// paint/hit-test recomputes in O(n) over small n.
    pub fn offsets(&self) -> TrackOffsets {
        let mut offsets = TrackOffsets::with_capacity(self.clips.len() + 1);
        let mut acc = TimeMs::ZERO;
        for (i, clip) in self.clips.iter().enumerate() {
            offsets.push(acc);
            acc = acc + clip.duration();
            if i + 1 < self.clips.len() {
                if let Some(t) = &clip.transition_out {
                    acc = acc - t.duration;
                }
            }
        }
        offsets.push(acc);
        offsets
    }

    /// Total output duration of the track.
    pub fn output_duration(&self) -> TimeMs {
        self.offsets()[self.clips.len()]
    }

    /// Output-timeline start of every clip.
    pub fn clip_boundaries(&self) -> Vec<TimeMs> {
        let mut offsets = self.offsets();
        offsets.truncate(self.clips.len());
        offsets.into_vec()
    }

    /// Find the clip containing an output-timeline position. `None` past
    /// the end, before zero, or on an empty track.
    pub fn clip_at(&self, timeline: TimeMs) -> Option<(usize, &Clip)> {
        let offsets = self.offsets();
        let n = self.clips.len();
        let idx = offsets[..n].partition_point(|&o| o <= timeline);
        if idx == 0 {
            return None;
        }
        let i = idx - 1;
        if timeline < offsets[i + 1] {
            Some((i, &self.clips[i]))
        } else {
            None
        }
    }

    /// Map an output-timeline position to a position in the containing
    /// clip's source media. Negative input clamps to the first clip's in
    /// point; positions past the end have no mapping.
    pub fn timeline_to_source(&self, timeline: TimeMs) -> Option<TimeMs> {
        let first = self.clips.first()?;
        if timeline < TimeMs::ZERO {
            return Some(first.source_in);
        }
        let offsets = self.offsets();
        let n = self.clips.len();
        let idx = offsets[..n].partition_point(|&o| o <= timeline);
        if idx == 0 || timeline >= offsets[idx] {
            return None;
        }
        let clip = &self.clips[idx - 1];
        Some(clip.source_in + (timeline - offsets[idx - 1]).scale(clip.speed))
    }

    /// Map a source-media position back to the output timeline.
    ///
    /// Scans clips passing `filter` for one whose source window contains
    /// the position. A position inside a region that was cut out has no
    /// inverse mapping, but playback frequently probes exact boundary
    /// timestamps, so a probe equal to a clip's out point falls back to
    /// that clip's end on the timeline. Containment beats the fallback;
    /// among boundary matches the first clip in output order wins.
    pub fn source_to_timeline(&self, source: TimeMs, filter: SourceFilter) -> Option<TimeMs> {
        let offsets = self.offsets();
        let mut boundary = None;
        for (i, clip) in self.clips.iter().enumerate() {
            if !filter.matches(&clip.source) {
                continue;
            }
            let mapped = offsets[i] + (source - clip.source_in).unscale(clip.speed);
            if clip.source_span().contains(source) {
                return Some(mapped);
            }
            if source == clip.source_out && boundary.is_none() {
                boundary = Some(mapped);
            }
        }
        boundary
    }

    /// Split the clip under an output-timeline position into two clean
    /// cuts (source window divided, envelope and transition dropped).
    /// Returns false, without mutating, when the position misses every
    /// clip or lands within [`MIN_CLIP_MS`] of either clip edge.
    pub fn split_at_timeline(&mut self, timeline: TimeMs) -> bool {
        let Some((i, clip)) = self.clip_at(timeline) else {
            return false;
        };
        let local = timeline - self.offsets()[i];
        if local < MIN_CLIP_MS || clip.duration() - local < MIN_CLIP_MS {
            return false;
        }

        let split_src = clip.source_in + local.scale(clip.speed);
        let mut left = clip.clone();
        left.id = Uuid::new_v4();
        left.source_out = split_src;
        left.envelope = Default::default();
        left.transition_out = None;

        let mut right = clip.clone();
        right.id = Uuid::new_v4();
        right.source_in = split_src;
        right.envelope = Default::default();
        right.transition_out = None;

        self.clips[i] = left;
        self.clips.insert(i + 1, right);
        true
    }

    /// Insert a clip at the given sequence index (clamped).
    pub fn insert(&mut self, index: usize, clip: Clip) {
        let index = index.min(self.clips.len());
        self.clips.insert(index, clip);
    }

    /// Remove the clip at an index, returning it so callers can drive
    /// ripple shifting. Refuses to remove the last remaining clip; an
    /// out-of-range index is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Clip> {
        if self.clips.len() <= 1 || index >= self.clips.len() {
            return None;
        }
        Some(self.clips.remove(index))
    }

    /// Move a clip's source in point, clamped to keep at least
    /// [`MIN_CLIP_MS`] of content. Envelope offsets are re-based to the
    /// new start. Out-of-range index is a no-op.
    pub fn trim_left(&mut self, index: usize, new_source_in: TimeMs) {
        let Some(clip) = self.clips.get_mut(index) else {
            return;
        };
        let hi = (clip.source_out - MIN_CLIP_MS).max(TimeMs::ZERO);
        let new_in = new_source_in.clamp(TimeMs::ZERO, hi);
        let delta_src = new_in - clip.source_in;
        if delta_src.is_zero() {
            return;
        }
        let speed = clip.speed;
        clip.source_in = new_in;
        clip.shift_volume_points(-delta_src.unscale(speed));
    }

    /// Move a clip's source out point, clamped to keep at least
    /// [`MIN_CLIP_MS`] of content. Out-of-range index is a no-op.
    pub fn trim_right(&mut self, index: usize, new_source_out: TimeMs) {
        let Some(clip) = self.clips.get_mut(index) else {
            return;
        };
        clip.source_out = new_source_out.max(clip.source_in + MIN_CLIP_MS);
    }

    /// Every distinct source referenced by this track, in first-use order.
    pub fn unique_sources(&self) -> Vec<ClipSource> {
        let mut sources = Vec::new();
        for clip in &self.clips {
            if !sources.contains(&clip.source) {
                sources.push(clip.source);
            }
        }
        sources
    }

    /// Whether clips from more than one source are present.
    pub fn has_multiple_sources(&self) -> bool {
        self.unique_sources().len() > 1
    }

    /// True iff the track is exactly one clip spanning `[0, duration)`.
    pub fn is_full_source(&self, duration: TimeMs) -> bool {
        self.clips.len() == 1
            && self.clips[0].source_span() == TimeSpan::new(TimeMs::ZERO, duration)
    }
}
