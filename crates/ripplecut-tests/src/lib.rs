//! Integration test crate for Ripplecut.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on ripplecut-core and ripplecut-timeline to verify they
//! work together.

#[cfg(test)]
mod ripple;

#[cfg(test)]
mod timeline;
