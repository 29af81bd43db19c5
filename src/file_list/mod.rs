//! In-memory staging store for multi-file assets
//!
//! A [`FileList`] holds a primary model file and its side-car resources
//! (material libraries, external buffers, textures) under the names the
//! primary file uses to reference them. Importers resolve those references
//! against the list instead of the disk.

pub mod shared;

use thiserror::Error;

/// Path separator used inside staged names
pub const SEPARATOR: char = '/';

/// Error type for staging store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileListError {
    #[error("Invalid file name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("File already staged: {0}")]
    DuplicateName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File index {index} out of range (staged files: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One staged file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    content: Vec<u8>,
}

impl StagedFile {
    /// Name the file was staged under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the file has no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Ordered, name-keyed collection of staged files
///
/// Names are case-sensitive and unique within one list. Insertion order is
/// kept for enumeration and index access, but lookups go by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    files: Vec<StagedFile>,
}

impl FileList {
    /// Create an empty file list
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file under `name`
    ///
    /// Owned buffers are moved into the list; borrowed slices are copied.
    /// A name that is already staged is rejected and the list is left
    /// untouched.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Result<(), FileListError> {
        let name = name.into();
        validate_name(&name)?;

        if self.exists(&name) {
            return Err(FileListError::DuplicateName(name));
        }

        let content = content.into();
        log::debug!("Staged {name} ({} bytes)", content.len());
        self.files.push(StagedFile { name, content });
        Ok(())
    }

    /// Get the content of the file staged under `name`
    pub fn get(&self, name: &str) -> Result<&[u8], FileListError> {
        self.file(name)
            .map(StagedFile::content)
            .ok_or_else(|| FileListError::NotFound(name.to_string()))
    }

    /// Look up a staged file by exact name
    pub fn file(&self, name: &str) -> Option<&StagedFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Whether a file is staged under `name`
    pub fn exists(&self, name: &str) -> bool {
        self.file(name).is_some()
    }

    /// Get a staged file by insertion index
    pub fn get_by_index(&self, index: usize) -> Result<&StagedFile, FileListError> {
        self.files.get(index).ok_or(FileListError::IndexOutOfRange {
            index,
            len: self.files.len(),
        })
    }

    /// The first staged file, conventionally the primary model
    pub fn primary(&self) -> Option<&StagedFile> {
        self.files.first()
    }

    /// Names of all staged files in insertion order
    pub fn list(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.iter().map(|f| f.name.as_str())
    }

    /// Iterate over staged files in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, StagedFile> {
        self.files.iter()
    }

    /// Number of staged files
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing has been staged yet
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of all staged content sizes
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(StagedFile::len).sum()
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a StagedFile;
    type IntoIter = std::slice::Iter<'a, StagedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_name(name: &str) -> Result<(), FileListError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else if name.ends_with(SEPARATOR) {
        "name refers to a directory"
    } else {
        return Ok(());
    };

    Err(FileListError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
