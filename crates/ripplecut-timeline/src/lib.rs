//! Ripplecut Timeline - Timeline data model
//!
//! Implements the editing core for a multi-source video/subtitle editor:
//! - Clips and video tracks with timeline↔source time mapping
//! - Time-ranged subtitle/overlay/BGM tracks over a shared interval container
//! - Cross-track ripple propagation
//! - Reversible edit commands with an undo stack
//!
//! The model is single-threaded and synchronous: every operation is a
//! pure in-memory transformation driven from one owner thread. Wrap the
//! whole [`Project`] in a mutex if concurrent access is ever needed.

pub mod clip;
pub mod edit;
pub mod overlay;
pub mod project;
pub mod ranged;
pub mod ripple;
pub mod serialization;
pub mod track;

pub use clip::{Clip, ClipSource, SourceFilter, Transition, TransitionKind};
pub use edit::{EditCommand, UndoStack};
pub use overlay::{
    AudioClip, AudioTrack, ImageOverlay, ImageOverlayTrack, Placement, SubtitleSegment,
    SubtitleTrack, TextOverlay, TextOverlayTrack, TextStyle,
};
pub use project::Project;
pub use ranged::{RangedTrack, TimedItem};
pub use ripple::RippleCoordinator;
pub use serialization::ProjectFile;
pub use track::VideoTrack;
