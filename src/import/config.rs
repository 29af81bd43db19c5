//! Import configuration

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Post-processing steps requested from the importer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PostProcess: u32 {
        const CALC_TANGENT_SPACE = 1 << 0;
        const TRIANGULATE = 1 << 1;
        const JOIN_IDENTICAL_VERTICES = 1 << 2;
        const SORT_BY_PTYPE = 1 << 3;
        const GEN_NORMALS = 1 << 4;
        const FLIP_UVS = 1 << 5;
    }
}

impl Default for PostProcess {
    fn default() -> Self {
        Self::CALC_TANGENT_SPACE
            | Self::TRIANGULATE
            | Self::JOIN_IDENTICAL_VERTICES
            | Self::SORT_BY_PTYPE
    }
}

/// Settings for one import call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Post-processing steps passed to the importer
    pub post_process: PostProcess,
    /// Name of the primary model file; the first staged file when unset
    pub primary: Option<String>,
}

impl ImportConfig {
    /// Create a config with default post-processing
    pub fn new() -> Self {
        Self::default()
    }

    /// Import `primary` instead of the first staged file
    pub fn with_primary(mut self, primary: impl Into<String>) -> Self {
        self.primary = Some(primary.into());
        self
    }

    /// Replace the post-processing steps
    pub fn with_post_process(mut self, post_process: PostProcess) -> Self {
        self.post_process = post_process;
        self
    }
}
