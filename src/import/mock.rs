//! Mock importer for testing
//!
//! Reads the primary file and a configured set of side-car references
//! through the IO system without parsing anything, so staging and
//! resolution can be tested without a real format backend.

use super::{ImportConfig, ImportError, SceneImporter, SceneSummary};
use crate::file_list::FileListError;
use crate::io::{read_all, resolve_relative, IoSystem};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock scene importer
#[derive(Clone, Debug)]
pub struct MockImporter {
    format: String,
    references: Vec<String>,
    mesh_count: usize,
    material_count: usize,
    calls: Arc<AtomicUsize>,
}

impl Default for MockImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockImporter {
    /// Create a mock importer that reports one mesh and no side-car files
    pub fn new() -> Self {
        Self {
            format: "mock".to_string(),
            references: Vec::new(),
            mesh_count: 1,
            material_count: 0,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Report `format` as the detected format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Request `reference` (relative to the primary file) during import
    ///
    /// Every reference counts as one material in the summary.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self.material_count += 1;
        self
    }

    /// Report `count` meshes
    pub fn with_mesh_count(mut self, count: usize) -> Self {
        self.mesh_count = count;
        self
    }

    /// Number of times [`SceneImporter::import`] has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl SceneImporter for MockImporter {
    fn name(&self) -> &str {
        "mock"
    }

    fn import(
        &self,
        io: &dyn IoSystem,
        primary: &str,
        config: &ImportConfig,
    ) -> Result<SceneSummary, ImportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let stream = io
            .open(primary)
            .map_err(|_| ImportError::PrimaryNotFound(primary.to_string()))?;
        read_all(stream)?;

        let mut resolved_files = Vec::with_capacity(self.references.len());
        for reference in &self.references {
            let name = resolve_relative(primary, reference)?;
            let stream = io.open(&name).map_err(|err| match err {
                FileListError::NotFound(_) => ImportError::MissingReference {
                    from: primary.to_string(),
                    reference: name.clone(),
                },
                other => other.into(),
            })?;
            read_all(stream)?;
            resolved_files.push(name);
        }

        Ok(SceneSummary {
            primary: primary.to_string(),
            format: self.format.clone(),
            importer: self.name().to_string(),
            mesh_count: self.mesh_count,
            material_count: self.material_count,
            node_count: self.mesh_count,
            texture_count: 0,
            resolved_files,
            post_process: config.post_process,
        })
    }
}
