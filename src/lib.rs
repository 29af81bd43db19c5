//! asset_stage - In-memory staging for multi-file 3D asset imports
//!
//! A model file rarely travels alone: an OBJ names its material library, a
//! glTF names its binary buffers and textures. This crate stages all of
//! those files in memory as one [`FileList`] and hands them to a format
//! importer that resolves every cross-file reference against the list
//! instead of the disk.
//!
//! # Quick Start
//!
//! ```
//! use asset_stage::{import_file_list, FileList, ImportConfig, MockImporter};
//!
//! let mut files = FileList::new();
//! files.add("cube.obj", b"mtllib cube.mtl\n".to_vec())?;
//! files.add("cube.mtl", b"newmtl Red\n".to_vec())?;
//!
//! let importer = MockImporter::new().with_reference("cube.mtl");
//! let result = import_file_list(&files, &importer, &ImportConfig::default());
//! println!("{}", result.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Feature Flags
//!
//! - `gltf` (default): glTF/GLB importer backed by the `gltf` crate
//! - `runtime-tokio`: concurrent disk staging on Tokio

// Core modules
pub mod file_list;
pub mod import;
pub mod io;
pub mod loader;

// Error types
mod error;
pub use error::{AssetStageError, Result};

// Re-export staging types
pub use file_list::shared::SharedFileList;
pub use file_list::{FileList, FileListError, StagedFile};

// Re-export IO types
pub use io::{IoSystem, MemoryIoSystem, MemoryStream};

// Re-export import types
#[cfg(feature = "gltf")]
pub use import::gltf::GltfImporter;
pub use import::mock::MockImporter;
pub use import::{
    import_file_list, import_staged, importer_for, FailureKind, ImportConfig, ImportError,
    ImportFailure, ImportMetrics, ImportMetricsHandle, ImportResult, PostProcess, SceneImporter,
    SceneSummary, StagedImporter,
};

// Re-export loader functions
#[cfg(feature = "runtime-tokio")]
pub use loader::stage_files_async;
pub use loader::{stage_file, stage_file_as, stage_files};

// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
