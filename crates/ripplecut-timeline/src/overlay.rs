//! Subtitle, overlay and BGM tracks: concrete instantiations of the
//! interval container with their domain payloads.

use ripplecut_core::{TimeMs, TimeSpan};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ranged::{RangedTrack, TimedItem};

/// Minimum span length for subtitle/overlay items. Degenerate ranges
/// from interactive edits are clamped up, not rejected.
pub const MIN_ITEM_MS: TimeMs = TimeMs::new(1);

fn unity() -> f64 {
    1.0
}

fn is_unity(v: &f64) -> bool {
    *v == 1.0
}

// ── Payload types ───────────────────────────────────────────────

/// Text styling shared by subtitles and text overlays. A missing style
/// means "use the track/project default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family; `None` inherits the project font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in pixels.
    #[serde(default = "TextStyle::default_size")]
    pub size_px: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// RGBA text color.
    #[serde(default = "TextStyle::default_color")]
    pub color: [u8; 4],
}

impl TextStyle {
    fn default_size() -> f64 {
        32.0
    }

    fn default_color() -> [u8; 4] {
        [255, 255, 255, 255]
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            size_px: Self::default_size(),
            bold: false,
            italic: false,
            color: Self::default_color(),
        }
    }
}

/// Normalized placement of an overlay within the frame (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Placement {
    fn default() -> Self {
        // Full frame
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// One subtitle line, active over a timeline span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleSegment {
    #[serde(flatten)]
    pub span: TimeSpan,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

impl SubtitleSegment {
    /// Create a segment with the track's default style.
    pub fn new(span: TimeSpan, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
            style: None,
        }
    }
}

impl TimedItem for SubtitleSegment {
    fn span(&self) -> TimeSpan {
        self.span
    }
    fn set_span(&mut self, span: TimeSpan) {
        self.span = span;
    }
}

/// A still image shown over the video for a timeline span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOverlay {
    #[serde(flatten)]
    pub span: TimeSpan,
    /// Path to the image asset.
    pub path: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default = "unity", skip_serializing_if = "is_unity")]
    pub opacity: f64,
}

impl ImageOverlay {
    pub fn new(span: TimeSpan, path: impl Into<String>) -> Self {
        Self {
            span,
            path: path.into(),
            placement: Placement::default(),
            opacity: 1.0,
        }
    }
}

impl TimedItem for ImageOverlay {
    fn span(&self) -> TimeSpan {
        self.span
    }
    fn set_span(&mut self, span: TimeSpan) {
        self.span = span;
    }
}

/// Free-floating text shown over the video for a timeline span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    #[serde(flatten)]
    pub span: TimeSpan,
    pub text: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

impl TextOverlay {
    pub fn new(span: TimeSpan, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
            placement: Placement::default(),
            style: None,
        }
    }
}

impl TimedItem for TextOverlay {
    fn span(&self) -> TimeSpan {
        self.span
    }
    fn set_span(&mut self, span: TimeSpan) {
        self.span = span;
    }
}

/// A background-music clip placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    #[serde(flatten)]
    pub span: TimeSpan,
    /// Path to the audio asset.
    pub path: String,
    /// Offset into the audio file where playback starts.
    #[serde(rename = "source_in_ms", default)]
    pub source_in: TimeMs,
    #[serde(default = "unity", skip_serializing_if = "is_unity")]
    pub volume: f64,
}

impl AudioClip {
    pub fn new(span: TimeSpan, path: impl Into<String>) -> Self {
        Self {
            span,
            path: path.into(),
            source_in: TimeMs::ZERO,
            volume: 1.0,
        }
    }
}

impl TimedItem for AudioClip {
    fn span(&self) -> TimeSpan {
        self.span
    }
    fn set_span(&mut self, span: TimeSpan) {
        self.span = span;
    }
}

// ── Track types ─────────────────────────────────────────────────

/// A subtitle track. Segments are assumed non-overlapping: `segment_at`
/// returns at most one hit, and when overlaps are forced in the last
/// sorted match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleTrack {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    segments: RangedTrack<SubtitleSegment>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl SubtitleTrack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            segments: RangedTrack::new(),
            locked: false,
            hidden: false,
        }
    }

    pub fn segments(&self) -> &[SubtitleSegment] {
        self.segments.items()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Insert a segment, clamping degenerate spans up to [`MIN_ITEM_MS`].
    /// Returns the index it landed at.
    pub fn insert(&mut self, mut segment: SubtitleSegment) -> usize {
        segment.span = segment.span.with_min_duration(MIN_ITEM_MS);
        self.segments.insert(segment)
    }

    /// The segment active at `t`, if any.
    pub fn segment_at(&self, t: TimeMs) -> Option<(usize, &SubtitleSegment)> {
        self.segments.point_query(t)
    }

    pub fn get(&self, index: usize) -> Option<&SubtitleSegment> {
        self.segments.get(index)
    }

    /// Mutable payload access; retime through [`Self::set_bounds`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut SubtitleSegment> {
        self.segments.get_mut(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<SubtitleSegment> {
        self.segments.remove_at(index)
    }

    /// Retime a segment, clamping degenerate spans up to [`MIN_ITEM_MS`].
    pub fn set_bounds(&mut self, index: usize, span: TimeSpan) -> bool {
        self.segments
            .update_bounds(index, span.with_min_duration(MIN_ITEM_MS))
    }

    pub fn shift_from(&mut self, at: TimeMs, delta: TimeMs) -> usize {
        self.segments.shift_from(at, delta)
    }

    pub fn delete_range(&mut self, range: TimeSpan) -> usize {
        self.segments.delete_range(range)
    }
}

/// A track of image overlays. Overlap is permitted; queries return every
/// active overlay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageOverlayTrack {
    #[serde(default)]
    overlays: RangedTrack<ImageOverlay>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl ImageOverlayTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays(&self) -> &[ImageOverlay] {
        self.overlays.items()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn insert(&mut self, mut overlay: ImageOverlay) -> usize {
        overlay.span = overlay.span.with_min_duration(MIN_ITEM_MS);
        self.overlays.insert(overlay)
    }

    /// Every overlay active at `t`.
    pub fn active_at(&self, t: TimeMs) -> Vec<(usize, &ImageOverlay)> {
        self.overlays.range_query(t)
    }

    pub fn get(&self, index: usize) -> Option<&ImageOverlay> {
        self.overlays.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImageOverlay> {
        self.overlays.get_mut(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<ImageOverlay> {
        self.overlays.remove_at(index)
    }

    pub fn set_bounds(&mut self, index: usize, span: TimeSpan) -> bool {
        self.overlays
            .update_bounds(index, span.with_min_duration(MIN_ITEM_MS))
    }

    pub fn shift_from(&mut self, at: TimeMs, delta: TimeMs) -> usize {
        self.overlays.shift_from(at, delta)
    }

    pub fn delete_range(&mut self, range: TimeSpan) -> usize {
        self.overlays.delete_range(range)
    }
}

/// A track of text overlays. Overlap is permitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextOverlayTrack {
    #[serde(default)]
    overlays: RangedTrack<TextOverlay>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl TextOverlayTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays(&self) -> &[TextOverlay] {
        self.overlays.items()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn insert(&mut self, mut overlay: TextOverlay) -> usize {
        overlay.span = overlay.span.with_min_duration(MIN_ITEM_MS);
        self.overlays.insert(overlay)
    }

    pub fn active_at(&self, t: TimeMs) -> Vec<(usize, &TextOverlay)> {
        self.overlays.range_query(t)
    }

    pub fn get(&self, index: usize) -> Option<&TextOverlay> {
        self.overlays.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TextOverlay> {
        self.overlays.get_mut(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<TextOverlay> {
        self.overlays.remove_at(index)
    }

    pub fn set_bounds(&mut self, index: usize, span: TimeSpan) -> bool {
        self.overlays
            .update_bounds(index, span.with_min_duration(MIN_ITEM_MS))
    }

    pub fn shift_from(&mut self, at: TimeMs, delta: TimeMs) -> usize {
        self.overlays.shift_from(at, delta)
    }

    pub fn delete_range(&mut self, range: TimeSpan) -> usize {
        self.overlays.delete_range(range)
    }
}

/// A background-music track. Clips may overlap (cross-faded downstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioTrack {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    clips: RangedTrack<AudioClip>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub muted: bool,
}

impl AudioTrack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            clips: RangedTrack::new(),
            locked: false,
            muted: false,
        }
    }

    pub fn clips(&self) -> &[AudioClip] {
        self.clips.items()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn insert(&mut self, mut clip: AudioClip) -> usize {
        clip.span = clip.span.with_min_duration(MIN_ITEM_MS);
        self.clips.insert(clip)
    }

    /// Every clip audible at `t`.
    pub fn active_at(&self, t: TimeMs) -> Vec<(usize, &AudioClip)> {
        self.clips.range_query(t)
    }

    pub fn get(&self, index: usize) -> Option<&AudioClip> {
        self.clips.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut AudioClip> {
        self.clips.get_mut(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<AudioClip> {
        self.clips.remove_at(index)
    }

    pub fn set_bounds(&mut self, index: usize, span: TimeSpan) -> bool {
        self.clips
            .update_bounds(index, span.with_min_duration(MIN_ITEM_MS))
    }

    pub fn shift_from(&mut self, at: TimeMs, delta: TimeMs) -> usize {
        self.clips.shift_from(at, delta)
    }

    pub fn delete_range(&mut self, range: TimeSpan) -> usize {
        self.clips.delete_range(range)
    }
}
