//! Typed import results and their JSON form

use super::config::PostProcess;
use serde::{Deserialize, Serialize};

/// Summary of a successfully imported scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSummary {
    /// Staged name of the primary model file
    pub primary: String,
    /// Detected format label (e.g. `gltf`, `glb`, `obj`)
    pub format: String,
    /// Name of the importer that produced this summary
    pub importer: String,
    pub mesh_count: usize,
    pub material_count: usize,
    pub node_count: usize,
    pub texture_count: usize,
    /// Side-car files resolved through the staging store, in request order
    pub resolved_files: Vec<String>,
    /// Post-processing steps the import ran with
    pub post_process: PostProcess,
}

/// Stable category of a failed import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EmptyFileList,
    PrimaryNotFound,
    MissingReference,
    UnsupportedFormat,
    Parse,
    /// A name or index was rejected by the staging store
    Staging,
    Io,
}

/// Error payload of a failed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of importing a staged file list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportResult {
    Success { scene: SceneSummary },
    Error { error: ImportFailure },
}

impl ImportResult {
    /// Whether the import succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The scene summary, if the import succeeded
    pub fn scene(&self) -> Option<&SceneSummary> {
        match self {
            Self::Success { scene } => Some(scene),
            Self::Error { .. } => None,
        }
    }

    /// The failure payload, if the import failed
    pub fn failure(&self) -> Option<&ImportFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error } => Some(error),
        }
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a JSON result
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<SceneSummary> for ImportResult {
    fn from(scene: SceneSummary) -> Self {
        Self::Success { scene }
    }
}

impl From<ImportFailure> for ImportResult {
    fn from(error: ImportFailure) -> Self {
        Self::Error { error }
    }
}
