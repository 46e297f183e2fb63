//! Project aggregate: every track that makes up one edited video.

use ripplecut_core::TimeMs;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::overlay::{AudioTrack, ImageOverlayTrack, SubtitleTrack, TextOverlayTrack};
use crate::track::VideoTrack;

/// A project: one or more video tracks, subtitle tracks with an active
/// selector, one image overlay track, one text overlay track, and any
/// number of BGM tracks.
///
/// The project itself enforces no cross-track invariants; keeping tracks
/// in sync across edits is the ripple coordinator's job, invoked
/// explicitly by editing operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Duration of the primary source video.
    #[serde(rename = "primary_duration_ms")]
    pub primary_duration: TimeMs,
    /// Video tracks.
    pub video_tracks: Vec<VideoTrack>,
    /// Subtitle tracks.
    pub subtitle_tracks: Vec<SubtitleTrack>,
    /// Which subtitle track receives edits.
    #[serde(default)]
    active_subtitle: usize,
    /// Image overlays.
    #[serde(default)]
    pub image_overlays: ImageOverlayTrack,
    /// Text overlays.
    #[serde(default)]
    pub text_overlays: TextOverlayTrack,
    /// Background music tracks.
    #[serde(default)]
    pub bgm_tracks: Vec<AudioTrack>,
}

impl Project {
    /// Create a project over a primary video of the given duration,
    /// with one uncut video track and one empty subtitle track.
    pub fn new(name: impl Into<String>, primary_duration: TimeMs) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            primary_duration,
            video_tracks: vec![VideoTrack::from_full_video(primary_duration)],
            subtitle_tracks: vec![SubtitleTrack::new("Subtitles 1")],
            active_subtitle: 0,
            image_overlays: ImageOverlayTrack::new(),
            text_overlays: TextOverlayTrack::new(),
            bgm_tracks: Vec::new(),
        }
    }

    /// The primary video track (first one).
    pub fn primary_track(&self) -> Option<&VideoTrack> {
        self.video_tracks.first()
    }

    /// The primary video track, mutably.
    pub fn primary_track_mut(&mut self) -> Option<&mut VideoTrack> {
        self.video_tracks.first_mut()
    }

    /// Find a video track by id.
    pub fn video_track_mut(&mut self, id: Uuid) -> Option<&mut VideoTrack> {
        self.video_tracks.iter_mut().find(|t| t.id == id)
    }

    /// The subtitle track currently receiving edits.
    pub fn active_subtitle(&self) -> Option<&SubtitleTrack> {
        self.subtitle_tracks.get(self.active_subtitle)
    }

    /// The active subtitle track, mutably.
    pub fn active_subtitle_mut(&mut self) -> Option<&mut SubtitleTrack> {
        self.subtitle_tracks.get_mut(self.active_subtitle)
    }

    /// Index of the active subtitle track.
    pub fn active_subtitle_index(&self) -> usize {
        self.active_subtitle
    }

    /// Select the subtitle track receiving edits. Out-of-range indices
    /// are ignored.
    pub fn set_active_subtitle(&mut self, index: usize) {
        if index < self.subtitle_tracks.len() {
            self.active_subtitle = index;
        }
    }

    /// Add a subtitle track, returning its index.
    pub fn add_subtitle_track(&mut self, track: SubtitleTrack) -> usize {
        self.subtitle_tracks.push(track);
        self.subtitle_tracks.len() - 1
    }

    /// Remove a subtitle track. Refuses to remove the last one; the
    /// active selector is clamped back into range.
    pub fn remove_subtitle_track(&mut self, index: usize) -> Option<SubtitleTrack> {
        if self.subtitle_tracks.len() <= 1 || index >= self.subtitle_tracks.len() {
            return None;
        }
        let removed = self.subtitle_tracks.remove(index);
        if self.active_subtitle >= self.subtitle_tracks.len() {
            self.active_subtitle = self.subtitle_tracks.len() - 1;
        }
        Some(removed)
    }

    /// Total output duration: the longest video track.
    pub fn output_duration(&self) -> TimeMs {
        self.video_tracks
            .iter()
            .map(|t| t.output_duration())
            .max()
            .unwrap_or(TimeMs::ZERO)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled Project", TimeMs::ZERO)
    }
}
