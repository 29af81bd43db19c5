//! Thread-safe staging handle for parallel producers

use super::{FileList, FileListError};
use parking_lot::RwLock;
use std::sync::Arc;

/// A cloneable handle that lets several producers stage files at once
///
/// Adds are serialized behind a write lock. The list can only be imported
/// after it has been frozen back into a [`FileList`], which requires every
/// other handle to be dropped first.
#[derive(Debug, Clone, Default)]
pub struct SharedFileList(Arc<RwLock<FileList>>);

impl SharedFileList {
    /// Create an empty shared list
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file, see [`FileList::add`]
    pub fn add(
        &self,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Result<(), FileListError> {
        self.0.write().add(name, content)
    }

    /// Number of files staged so far
    pub fn count(&self) -> usize {
        self.0.read().count()
    }

    /// Whether a file is staged under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.0.read().exists(name)
    }

    /// Freeze into a read-only [`FileList`]
    ///
    /// Returns the handle back if other clones are still alive.
    pub fn try_into_file_list(self) -> Result<FileList, Self> {
        Arc::try_unwrap(self.0)
            .map(RwLock::into_inner)
            .map_err(Self)
    }
}

impl From<FileList> for SharedFileList {
    fn from(list: FileList) -> Self {
        Self(Arc::new(RwLock::new(list)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_parallel_producers() {
        let shared = SharedFileList::new();

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || shared.add(format!("part_{i}.bin"), vec![i as u8; 16]))
            })
            .collect();

        for worker in workers {
            worker.join().unwrap().unwrap();
        }

        let list = shared.try_into_file_list().unwrap();
        assert_eq!(list.count(), 8);
        assert_eq!(list.get("part_3.bin").unwrap(), &[3u8; 16]);
    }

    #[test]
    fn test_freeze_requires_unique_handle() {
        let shared = SharedFileList::new();
        shared.add("cube.obj", vec![1u8]).unwrap();
        let other = shared.clone();

        let shared = shared.try_into_file_list().unwrap_err();
        drop(other);

        let list = shared.try_into_file_list().unwrap();
        assert!(list.exists("cube.obj"));
    }

    #[test]
    fn test_duplicate_across_handles() {
        let shared = SharedFileList::new();
        let other = shared.clone();

        shared.add("cube.mtl", vec![1u8]).unwrap();
        assert!(matches!(
            other.add("cube.mtl", vec![2u8]),
            Err(FileListError::DuplicateName(_))
        ));
        assert!(other.contains("cube.mtl"));
        assert_eq!(other.count(), 1);
    }
}
