//! Ripplecut Core - Foundation types for timeline editing
//!
//! This crate provides the fundamental types used throughout Ripplecut:
//! - Millisecond time representation (TimeMs, TimeSpan)
//! - Piecewise-linear volume automation (VolumeEnvelope)
//! - The shared error type

pub mod envelope;
pub mod error;
pub mod time;

pub use envelope::{VolumeEnvelope, VolumePoint};
pub use error::{Result, RipplecutError};
pub use time::{TimeMs, TimeSpan};
