//! Import entry point for staged file lists
//!
//! Parsing is delegated to a [`SceneImporter`] backend. This module picks the
//! primary file, serves every file request from the staged list and turns
//! the backend's outcome into a typed [`ImportResult`].

pub mod config;
#[cfg(feature = "gltf")]
pub mod gltf;
pub mod metrics;
pub mod mock;
pub mod result;

use crate::file_list::{FileList, FileListError, StagedFile};
use crate::io::{file_name, IoSystem, MemoryIoSystem};
use std::time::Instant;
use thiserror::Error;

pub use config::{ImportConfig, PostProcess};
pub use metrics::{ImportMetrics, ImportMetricsHandle};
pub use result::{FailureKind, ImportFailure, ImportResult, SceneSummary};

/// Error type for import operations
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File list is empty")]
    EmptyFileList,

    #[error("Primary file not staged: {0}")]
    PrimaryNotFound(String),

    #[error("{from} references {reference}, which is not staged")]
    MissingReference { from: String, reference: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Staging error: {0}")]
    FileList(#[from] FileListError),
}

impl ImportError {
    /// Stable failure category reported in [`ImportResult`]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyFileList => FailureKind::EmptyFileList,
            Self::PrimaryNotFound(_) => FailureKind::PrimaryNotFound,
            Self::MissingReference { .. } => FailureKind::MissingReference,
            Self::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            Self::Parse(_) => FailureKind::Parse,
            Self::Io(_) => FailureKind::Io,
            Self::FileList(FileListError::NotFound(_)) => FailureKind::MissingReference,
            Self::FileList(_) => FailureKind::Staging,
        }
    }
}

impl From<ImportError> for ImportFailure {
    fn from(err: ImportError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Format importer backend
///
/// Implementations read the primary file and any side-car files it
/// references through `io`, never from the disk.
pub trait SceneImporter {
    /// Short name reported in [`SceneSummary::importer`]
    fn name(&self) -> &str;

    /// Import the scene rooted at `primary`
    fn import(
        &self,
        io: &dyn IoSystem,
        primary: &str,
        config: &ImportConfig,
    ) -> Result<SceneSummary, ImportError>;
}

impl<T: SceneImporter + ?Sized> SceneImporter for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn import(
        &self,
        io: &dyn IoSystem,
        primary: &str,
        config: &ImportConfig,
    ) -> Result<SceneSummary, ImportError> {
        (**self).import(io, primary, config)
    }
}

/// Import a staged file list
///
/// The primary file is `config.primary` when set, otherwise the first
/// staged file. Failures are reported in the result, never panicked on.
pub fn import_file_list<I: SceneImporter + ?Sized>(
    files: &FileList,
    importer: &I,
    config: &ImportConfig,
) -> ImportResult {
    match try_import(files, importer, config) {
        Ok(scene) => {
            log::debug!(
                "Imported {} with {}: {} meshes, {} materials, {} side-car files",
                scene.primary,
                scene.importer,
                scene.mesh_count,
                scene.material_count,
                scene.resolved_files.len()
            );
            scene.into()
        }
        Err(err) => {
            log::warn!("Import with {} failed: {err}", importer.name());
            ImportFailure::from(err).into()
        }
    }
}

/// Import a staged file list with the backend matching the primary file
///
/// See [`importer_for`]. A primary file with no backend is reported as an
/// [`FailureKind::UnsupportedFormat`] failure.
pub fn import_staged(files: &FileList, config: &ImportConfig) -> ImportResult {
    let importer = select_primary(files, config).and_then(|primary| importer_for(primary.name()));
    match importer {
        Ok(importer) => import_file_list(files, importer.as_ref(), config),
        Err(err) => {
            log::warn!("No importer for staged files: {err}");
            ImportFailure::from(err).into()
        }
    }
}

/// Pick the importer backend for `primary` by its file extension
///
/// Extensions are matched case-insensitively.
pub fn importer_for(primary: &str) -> Result<Box<dyn SceneImporter>, ImportError> {
    let extension = file_name(primary)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "gltf")]
        "gltf" | "glb" => Ok(Box::new(gltf::GltfImporter::new())),
        "" => Err(ImportError::UnsupportedFormat(primary.to_string())),
        _ => Err(ImportError::UnsupportedFormat(extension)),
    }
}

fn select_primary<'a>(
    files: &'a FileList,
    config: &ImportConfig,
) -> Result<&'a StagedFile, ImportError> {
    match &config.primary {
        Some(name) => files
            .file(name)
            .ok_or_else(|| ImportError::PrimaryNotFound(name.clone())),
        None => files.primary().ok_or(ImportError::EmptyFileList),
    }
}

fn try_import<I: SceneImporter + ?Sized>(
    files: &FileList,
    importer: &I,
    config: &ImportConfig,
) -> Result<SceneSummary, ImportError> {
    let primary = select_primary(files, config)?;

    log::debug!(
        "Importing {} from {} staged files ({} bytes)",
        primary.name(),
        files.count(),
        files.total_bytes()
    );

    let io = MemoryIoSystem::new(files);
    importer.import(&io, primary.name(), config)
}

/// An importer bound to a configuration, recording metrics per import
///
/// Constructed explicitly by the caller and reused across file lists.
#[derive(Debug, Clone)]
pub struct StagedImporter<I: SceneImporter> {
    importer: I,
    config: ImportConfig,
    metrics: ImportMetricsHandle,
}

impl<I: SceneImporter> StagedImporter<I> {
    /// Wrap `importer` with the default configuration
    pub fn new(importer: I) -> Self {
        Self {
            importer,
            config: ImportConfig::default(),
            metrics: ImportMetricsHandle::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// The backend importer
    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// The configuration used for every import
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import metrics
    pub fn metrics(&self) -> &ImportMetricsHandle {
        &self.metrics
    }

    /// Import a staged file list, see [`import_file_list`]
    pub fn import(&self, files: &FileList) -> ImportResult {
        let start_time = Instant::now();
        let result = import_file_list(files, &self.importer, &self.config);

        self.metrics.record_bytes_staged(files.total_bytes());
        match &result {
            ImportResult::Success { scene } => {
                self.metrics
                    .record_import_time(scene.primary.clone(), start_time.elapsed());
                self.metrics.record_success();
            }
            ImportResult::Error { .. } => self.metrics.record_failure(),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockImporter;
    use super::*;

    fn cube() -> FileList {
        let mut files = FileList::new();
        files.add("cube.obj", b"mtllib cube.mtl\n".to_vec()).unwrap();
        files.add("cube.mtl", b"newmtl Red\n".to_vec()).unwrap();
        files
    }

    #[test]
    fn test_empty_file_list() {
        let result = import_file_list(
            &FileList::new(),
            &MockImporter::new(),
            &ImportConfig::default(),
        );

        assert_eq!(result.failure().unwrap().kind, FailureKind::EmptyFileList);
    }

    #[test]
    fn test_first_file_is_primary() {
        let importer = MockImporter::new().with_reference("cube.mtl");
        let result = import_file_list(&cube(), &importer, &ImportConfig::default());

        let scene = result.scene().unwrap();
        assert_eq!(scene.primary, "cube.obj");
        assert_eq!(scene.resolved_files, vec!["cube.mtl"]);
        assert_eq!(scene.post_process, PostProcess::default());
    }

    #[test]
    fn test_configured_primary() {
        let config = ImportConfig::new().with_primary("cube.mtl");
        let result = import_file_list(&cube(), &MockImporter::new(), &config);
        assert_eq!(result.scene().unwrap().primary, "cube.mtl");

        let config = ImportConfig::new().with_primary("scene.gltf");
        let result = import_file_list(&cube(), &MockImporter::new(), &config);
        assert_eq!(result.failure().unwrap().kind, FailureKind::PrimaryNotFound);
    }

    #[test]
    fn test_missing_reference() {
        let mut files = FileList::new();
        files.add("cube.obj", b"mtllib cube.mtl\n".to_vec()).unwrap();

        let importer = MockImporter::new().with_reference("cube.mtl");
        let result = import_file_list(&files, &importer, &ImportConfig::default());

        let failure = result.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::MissingReference);
        assert!(failure.message.contains("cube.mtl"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ImportError::FileList(FileListError::NotFound("a".into())).kind(),
            FailureKind::MissingReference
        );
        assert_eq!(
            ImportError::Parse("bad header".into()).kind(),
            FailureKind::Parse
        );

        let rejected = [
            FileListError::InvalidName {
                name: "../cube.mtl".into(),
                reason: "reference climbs above the staging root",
            },
            FileListError::DuplicateName("cube.obj".into()),
            FileListError::IndexOutOfRange { index: 3, len: 1 },
        ];
        for err in rejected {
            assert_eq!(ImportError::FileList(err).kind(), FailureKind::Staging);
        }

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        assert_eq!(ImportError::Io(io).kind(), FailureKind::Io);
    }

    #[test]
    fn test_importer_for_unknown_format() {
        for (primary, format) in [
            ("cube.obj", "obj"),
            ("models/Cube.FBX", "fbx"),
            ("README", "README"),
            ("v1.2/mesh", "v1.2/mesh"),
        ] {
            match importer_for(primary) {
                Err(ImportError::UnsupportedFormat(found)) => assert_eq!(found, format),
                other => panic!("{primary}: unexpected {:?}", other.map(|i| i.name().to_string())),
            }
        }
    }

    #[cfg(feature = "gltf")]
    #[test]
    fn test_importer_for_gltf() {
        for primary in ["scene.gltf", "scene.glb", "models/Scene.GLTF"] {
            assert_eq!(importer_for(primary).unwrap().name(), "gltf");
        }
    }

    #[test]
    fn test_import_staged_unsupported() {
        let result = import_staged(&cube(), &ImportConfig::default());

        let failure = result.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::UnsupportedFormat);
        assert!(failure.message.contains("obj"));

        let result = import_staged(&FileList::new(), &ImportConfig::default());
        assert_eq!(result.failure().unwrap().kind, FailureKind::EmptyFileList);
    }

    #[test]
    fn test_staged_importer_metrics() {
        let importer = StagedImporter::new(MockImporter::new().with_reference("cube.mtl"));

        assert!(importer.import(&cube()).is_success());
        assert!(!importer.import(&FileList::new()).is_success());

        let metrics = importer.metrics();
        assert_eq!(metrics.successes(), 1);
        assert_eq!(metrics.failures(), 1);
        assert_eq!(metrics.import_count("cube.obj"), 1);
        assert_eq!(metrics.total_bytes_staged(), cube().total_bytes() as u64);
        assert_eq!(importer.importer().calls(), 1);
    }
}
