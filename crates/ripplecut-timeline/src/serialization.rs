//! Project serialization.
//!
//! JSON via serde. Every optional key is omitted when it equals its
//! documented default and substituted back when missing, so files
//! written by older or sparser producers load without erroring.

use ripplecut_core::{Result, RipplecutError};
use serde::{Deserialize, Serialize};

use crate::project::Project;

/// Project file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectFile {
    /// The project data.
    pub project: Project,
    /// Application version that wrote this file.
    #[serde(default)]
    pub app_version: String,
}

impl ProjectFile {
    /// Create a new project file from a project.
    pub fn new(project: Project) -> Self {
        Self {
            project,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            RipplecutError::Serialization(format!("Failed to serialize project: {}", e))
        })
    }

    /// Deserialize from JSON bytes.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| RipplecutError::Serialization(format!("Failed to parse project: {}", e)))
    }
}
