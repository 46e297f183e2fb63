//! Cross-track ripple propagation.
//!
//! When a video edit changes the timeline's length, everything timed
//! against the timeline (subtitles, overlays, BGM) has to move with it.
//! The coordinator applies that shift across every participating track,
//! skipping locked ones. Edit commands compute the ripple point (where
//! the length change takes effect) and the delta, and own undo by
//! re-applying the inverse delta.

use ripplecut_core::{TimeMs, TimeSpan};
use tracing::debug;

use crate::project::Project;

/// Stateless cross-track shift service. Operates on a project reference
/// per call; holds nothing between calls.
pub struct RippleCoordinator;

impl RippleCoordinator {
    /// Shift every item starting at or after `at` by `delta`, on every
    /// unlocked subtitle, text-overlay, image-overlay and BGM track.
    /// Returns the number of shifted items. A zero delta is a no-op.
    pub fn apply_ripple(project: &mut Project, at: TimeMs, delta: TimeMs) -> usize {
        if delta.is_zero() {
            return 0;
        }
        let mut shifted = 0;
        for track in project.subtitle_tracks.iter_mut().filter(|t| !t.locked) {
            shifted += track.shift_from(at, delta);
        }
        if !project.text_overlays.locked {
            shifted += project.text_overlays.shift_from(at, delta);
        }
        if !project.image_overlays.locked {
            shifted += project.image_overlays.shift_from(at, delta);
        }
        for track in project.bgm_tracks.iter_mut().filter(|t| !t.locked) {
            shifted += track.shift_from(at, delta);
        }
        debug!(%at, %delta, shifted, "applied ripple");
        shifted
    }

    /// Cut a timeline range out of every unlocked participating track:
    /// items inside the range are removed, partial overlaps truncated,
    /// and everything after closes the gap. Used when a clip's footprint
    /// is deleted from the timeline. Returns the number of items removed
    /// or modified.
    pub fn ripple_delete(project: &mut Project, range: TimeSpan) -> usize {
        if range.is_empty() {
            return 0;
        }
        let mut touched = 0;
        for track in project.subtitle_tracks.iter_mut().filter(|t| !t.locked) {
            touched += track.delete_range(range);
        }
        if !project.text_overlays.locked {
            touched += project.text_overlays.delete_range(range);
        }
        if !project.image_overlays.locked {
            touched += project.image_overlays.delete_range(range);
        }
        for track in project.bgm_tracks.iter_mut().filter(|t| !t.locked) {
            touched += track.delete_range(range);
        }
        debug!(%range, touched, "ripple delete");
        touched
    }
}
