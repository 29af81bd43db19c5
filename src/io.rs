//! In-memory IO system handed to importers
//!
//! Importers never touch the disk: every file request for the primary model
//! and its side-car resources is served from a borrowed [`FileList`].

use crate::file_list::{FileList, FileListError, SEPARATOR};
use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};

/// File access abstraction used by importers
pub trait IoSystem {
    /// Separator used in staged paths
    fn separator(&self) -> char {
        SEPARATOR
    }

    /// Whether `path` can be opened
    fn exists(&self, path: &str) -> bool;

    /// Open `path` for reading
    fn open(&self, path: &str) -> Result<MemoryStream<'_>, FileListError>;
}

/// IO system backed by a staged [`FileList`]
#[derive(Debug, Clone, Copy)]
pub struct MemoryIoSystem<'a> {
    files: &'a FileList,
}

impl<'a> MemoryIoSystem<'a> {
    /// Serve files from `files`
    pub fn new(files: &'a FileList) -> Self {
        Self { files }
    }

    /// The backing file list
    pub fn files(&self) -> &'a FileList {
        self.files
    }
}

impl IoSystem for MemoryIoSystem<'_> {
    fn exists(&self, path: &str) -> bool {
        self.files.exists(path)
    }

    fn open(&self, path: &str) -> Result<MemoryStream<'_>, FileListError> {
        let file = self
            .files
            .file(path)
            .ok_or_else(|| FileListError::NotFound(path.to_string()))?;

        log::debug!("Opened staged file {path} ({} bytes)", file.len());
        Ok(MemoryStream::new(file.name(), file.content()))
    }
}

/// Read-only stream over one staged file
#[derive(Debug, Clone)]
pub struct MemoryStream<'a> {
    name: &'a str,
    cursor: Cursor<&'a [u8]>,
}

impl<'a> MemoryStream<'a> {
    /// Create a stream positioned at the start of `content`
    pub fn new(name: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            cursor: Cursor::new(content),
        }
    }

    /// Name of the staged file
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Total size of the file in bytes
    pub fn file_size(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Current read position
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// The whole file content, independent of the read position
    pub fn content(&self) -> &'a [u8] {
        self.cursor.get_ref()
    }
}

impl Read for MemoryStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for MemoryStream<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl Seek for MemoryStream<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

/// Read the remainder of a stream into a buffer
pub fn read_all(mut stream: MemoryStream<'_>) -> io::Result<Vec<u8>> {
    let remaining = stream.file_size().saturating_sub(stream.position() as usize);
    let mut data = Vec::with_capacity(remaining);
    stream.read_to_end(&mut data)?;
    Ok(data)
}

/// Last component of a staged path
pub fn file_name(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// Directory part of a staged path, empty for top-level files
pub fn parent_dir(path: &str) -> &str {
    path.rfind(SEPARATOR).map(|i| &path[..i]).unwrap_or("")
}

/// Resolve a reference made by the file `base` into a staged name
///
/// References are relative to the directory of the referencing file; a
/// leading separator makes them relative to the staging root instead.
/// `.` segments are dropped and `..` removes the previous segment. A
/// reference that climbs above the root is rejected.
pub fn resolve_relative(base: &str, reference: &str) -> Result<String, FileListError> {
    let (dir, relative) = match reference.strip_prefix(SEPARATOR) {
        Some(rooted) => ("", rooted),
        None => (parent_dir(base), reference),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in dir.split(SEPARATOR).chain(relative.split(SEPARATOR)) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(FileListError::InvalidName {
                        name: reference.to_string(),
                        reason: "reference climbs above the staging root",
                    });
                }
            }
            _ => segments.push(segment),
        }
    }

    let mut resolved = String::with_capacity(base.len() + reference.len());
    for segment in segments {
        if !resolved.is_empty() {
            resolved.push(SEPARATOR);
        }
        resolved.push_str(segment);
    }
    Ok(resolved)
}
