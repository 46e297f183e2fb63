//! Reversible edit operations over the timeline.
//!
//! Command pattern: every mutation is an `EditCommand` that applies
//! itself and produces its inverse for undo. The core provides no
//! built-in history; commands capture the old field values they need
//! and reverse by re-applying them.

use ripplecut_core::TimeMs;
use uuid::Uuid;

use crate::clip::{Clip, Transition};
use crate::project::Project;
use crate::track::VideoTrack;

/// Documented playback speed range, enforced at the command layer.
pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 4.0;

/// Captured state of an executed split, for undo.
#[derive(Debug, Clone, Copy)]
pub struct SplitRecord {
    /// Index of the left half.
    pub clip_index: usize,
    /// Source position the cut landed on.
    pub split_source: TimeMs,
    /// The original clip's out point.
    pub old_source_out: TimeMs,
}

/// A reversible edit operation on the timeline.
///
/// Commands target tracks by id and clips by index; stale targets after
/// the model changed underneath are silent no-ops. Locked video tracks
/// reject every command.
#[derive(Debug, Clone)]
pub enum EditCommand {
    /// Insert a clip at position `index` on a track.
    InsertClip {
        track_id: Uuid,
        index: usize,
        clip: Clip,
    },
    /// Remove the clip at position `index` on a track.
    RemoveClip {
        track_id: Uuid,
        index: usize,
        /// Stored for undo — populated when the command is executed.
        removed: Option<Clip>,
    },
    /// Split the clip under a timeline position into two clean cuts.
    SplitClip {
        track_id: Uuid,
        at: TimeMs,
        /// Populated when the command is executed.
        record: Option<SplitRecord>,
    },
    /// Move a clip's source in point.
    TrimLeft {
        track_id: Uuid,
        clip_index: usize,
        old_source_in: TimeMs,
        new_source_in: TimeMs,
    },
    /// Move a clip's source out point.
    TrimRight {
        track_id: Uuid,
        clip_index: usize,
        old_source_out: TimeMs,
        new_source_out: TimeMs,
    },
    /// Set clip playback speed, clamped into [MIN_SPEED, MAX_SPEED].
    SetClipSpeed {
        track_id: Uuid,
        clip_index: usize,
        old_speed: f64,
        new_speed: f64,
    },
    /// Replace a clip's transition into its successor.
    SetTransition {
        track_id: Uuid,
        clip_index: usize,
        old: Option<Transition>,
        new: Option<Transition>,
    },
    /// A batch of commands applied in order, undone in reverse.
    Batch(Vec<EditCommand>),
}

impl EditCommand {
    /// Apply this command to a project, mutating it in place.
    ///
    /// `&mut self` because some variants store data during execution
    /// (`RemoveClip` keeps the removed clip, `SplitClip` records the cut
    /// for undo).
    pub fn apply(&mut self, project: &mut Project) {
        match self {
            Self::InsertClip {
                track_id,
                index,
                clip,
            } => {
                if let Some(track) = unlocked_track(project, *track_id) {
                    track.insert(*index, clip.clone());
                }
            }
            Self::RemoveClip {
                track_id,
                index,
                removed,
            } => {
                if let Some(track) = unlocked_track(project, *track_id) {
                    if let Some(clip) = track.remove(*index) {
                        *removed = Some(clip);
                    }
                }
            }
            Self::SplitClip {
                track_id,
                at,
                record,
            } => {
                if let Some(track) = unlocked_track(project, *track_id) {
                    let captured = track
                        .clip_at(*at)
                        .map(|(i, clip)| (i, clip.source_out));
                    if let Some((clip_index, old_source_out)) = captured {
                        if track.split_at_timeline(*at) {
                            let split_source = track
                                .clip(clip_index)
                                .map(|c| c.source_out)
                                .unwrap_or(old_source_out);
                            *record = Some(SplitRecord {
                                clip_index,
                                split_source,
                                old_source_out,
                            });
                        }
                    }
                }
            }
            Self::TrimLeft {
                track_id,
                clip_index,
                new_source_in,
                ..
            } => {
                if let Some(track) = unlocked_track(project, *track_id) {
                    track.trim_left(*clip_index, *new_source_in);
                }
            }
            Self::TrimRight {
                track_id,
                clip_index,
                new_source_out,
                ..
            } => {
                if let Some(track) = unlocked_track(project, *track_id) {
                    track.trim_right(*clip_index, *new_source_out);
                }
            }
            Self::SetClipSpeed {
                track_id,
                clip_index,
                new_speed,
                ..
            } => {
                if let Some(track) = unlocked_track(project, *track_id) {
                    if let Some(clip) = track.clip_mut(*clip_index) {
                        clip.speed = new_speed.clamp(MIN_SPEED, MAX_SPEED);
                    }
                }
            }
            Self::SetTransition {
                track_id,
                clip_index,
                new,
                ..
            } => {
                if let Some(track) = unlocked_track(project, *track_id) {
                    if let Some(clip) = track.clip_mut(*clip_index) {
                        clip.transition_out = *new;
                    }
                }
            }
            Self::Batch(commands) => {
                for cmd in commands {
                    cmd.apply(project);
                }
            }
        }
    }

    /// Produce the inverse command (for undo).
    pub fn inverse(&self) -> Self {
        match self {
            Self::InsertClip {
                track_id,
                index,
                clip,
            } => Self::RemoveClip {
                track_id: *track_id,
                index: *index,
                removed: Some(clip.clone()),
            },
            Self::RemoveClip {
                track_id,
                index,
                removed,
            } => Self::InsertClip {
                track_id: *track_id,
                index: *index,
                clip: removed.clone().expect("removed clip must be populated"),
            },
            Self::SplitClip {
                track_id, record, ..
            } => {
                // Undo split = drop the right half, then stretch the left
                // half back over the full source window.
                let record = record.expect("split record must be populated");
                Self::Batch(vec![
                    Self::RemoveClip {
                        track_id: *track_id,
                        index: record.clip_index + 1,
                        removed: None,
                    },
                    Self::TrimRight {
                        track_id: *track_id,
                        clip_index: record.clip_index,
                        old_source_out: record.split_source,
                        new_source_out: record.old_source_out,
                    },
                ])
            }
            Self::TrimLeft {
                track_id,
                clip_index,
                old_source_in,
                new_source_in,
            } => Self::TrimLeft {
                track_id: *track_id,
                clip_index: *clip_index,
                old_source_in: *new_source_in,
                new_source_in: *old_source_in,
            },
            Self::TrimRight {
                track_id,
                clip_index,
                old_source_out,
                new_source_out,
            } => Self::TrimRight {
                track_id: *track_id,
                clip_index: *clip_index,
                old_source_out: *new_source_out,
                new_source_out: *old_source_out,
            },
            Self::SetClipSpeed {
                track_id,
                clip_index,
                old_speed,
                new_speed,
            } => Self::SetClipSpeed {
                track_id: *track_id,
                clip_index: *clip_index,
                old_speed: *new_speed,
                new_speed: *old_speed,
            },
            Self::SetTransition {
                track_id,
                clip_index,
                old,
                new,
            } => Self::SetTransition {
                track_id: *track_id,
                clip_index: *clip_index,
                old: *new,
                new: *old,
            },
            Self::Batch(commands) => {
                Self::Batch(commands.iter().rev().map(|c| c.inverse()).collect())
            }
        }
    }
}

/// Find an unlocked video track by id. Locked tracks reject edits.
fn unlocked_track(project: &mut Project, track_id: Uuid) -> Option<&mut VideoTrack> {
    project
        .video_track_mut(track_id)
        .filter(|track| !track.locked)
}

// ── Undo stack ──────────────────────────────────────────────────

/// Undo/redo history stack.
#[derive(Debug)]
pub struct UndoStack {
    /// Commands that have been executed (most recent last).
    undo: Vec<EditCommand>,
    /// Commands that have been undone (most recent last).
    redo: Vec<EditCommand>,
    /// Maximum history depth.
    max_depth: usize,
}

impl UndoStack {
    /// Create a new undo stack with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Push a command onto the undo stack after it has been executed.
    /// Clears the redo stack (new action invalidates redo history).
    pub fn push(&mut self, command: EditCommand) {
        self.redo.clear();
        self.undo.push(command);
        if self.undo.len() > self.max_depth {
            self.undo.remove(0);
        }
    }

    /// Pop the most recent command for undo. Returns the inverse command.
    pub fn undo(&mut self) -> Option<EditCommand> {
        let cmd = self.undo.pop()?;
        let inverse = cmd.inverse();
        self.redo.push(cmd);
        Some(inverse)
    }

    /// Pop the most recent undone command for redo. Returns the original
    /// command.
    pub fn redo(&mut self) -> Option<EditCommand> {
        let cmd = self.redo.pop()?;
        self.undo.push(cmd.clone());
        Some(cmd)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(200)
    }
}

// ── Tests ───────────────────────────────────────────────────────
