//! Staging files from disk
//!
//! Each file is staged under its file name, which is how sibling files
//! reference each other (`mtllib cube.mtl`, `"uri": "scene.bin"`). Files
//! referenced through a directory (`"uri": "textures/albedo.png"`) are
//! staged under an explicit name with [`stage_file_as`].

use crate::error::{AssetStageError, Result};
use crate::file_list::FileList;
use std::path::Path;

/// Read `path` and stage it under its file name
pub fn stage_file<P: AsRef<Path>>(files: &mut FileList, path: P) -> Result<()> {
    let path = path.as_ref();
    let name = staged_name(path)?;
    let data = std::fs::read(path)?;
    files.add(name, data)?;
    Ok(())
}

/// Read `path` and stage it under `name`
///
/// `name` may contain `/`-separated directories so that references such as
/// `textures/albedo.png` resolve from the primary file.
pub fn stage_file_as<P: AsRef<Path>>(
    files: &mut FileList,
    path: P,
    name: impl Into<String>,
) -> Result<()> {
    let data = std::fs::read(path.as_ref())?;
    files.add(name, data)?;
    Ok(())
}

/// Read and stage several files, in the given order
pub fn stage_files<I, P>(paths: I) -> Result<FileList>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut files = FileList::new();
    for path in paths {
        stage_file(&mut files, path)?;
    }
    Ok(files)
}

/// Read several files concurrently and stage them in the given order
///
/// Insertion order follows `paths`, not read completion order.
#[cfg(feature = "runtime-tokio")]
pub async fn stage_files_async<I, P>(paths: I) -> Result<FileList>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    use futures::future::join_all;

    let paths: Vec<_> = paths
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();
    let reads = join_all(paths.iter().map(|p| tokio::fs::read(p))).await;

    let mut files = FileList::new();
    for (path, data) in paths.iter().zip(reads) {
        files.add(staged_name(path)?, data?)?;
    }
    Ok(files)
}

fn staged_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| AssetStageError::InvalidPath(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_list::FileListError;
    use std::path::PathBuf;

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "asset_stage_{test}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_stage_files_keeps_order() {
        let dir = scratch_dir("order");
        std::fs::write(dir.join("cube.obj"), b"mtllib cube.mtl\n").unwrap();
        std::fs::write(dir.join("cube.mtl"), b"newmtl Red\n").unwrap();

        let files = stage_files([dir.join("cube.obj"), dir.join("cube.mtl")]).unwrap();
        let names: Vec<&str> = files.list().collect();
        assert_eq!(names, vec!["cube.obj", "cube.mtl"]);
        assert_eq!(files.get("cube.mtl").unwrap(), b"newmtl Red\n");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_stage_missing_file() {
        let dir = scratch_dir("missing");
        let err = stage_files([dir.join("nope.obj")]).unwrap_err();
        assert!(matches!(err, AssetStageError::Io(_)));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_same_file_name_twice() {
        let dir = scratch_dir("dupe");
        std::fs::create_dir_all(dir.join("a")).unwrap();
        std::fs::create_dir_all(dir.join("b")).unwrap();
        std::fs::write(dir.join("a/tex.png"), b"a").unwrap();
        std::fs::write(dir.join("b/tex.png"), b"b").unwrap();

        let err = stage_files([dir.join("a/tex.png"), dir.join("b/tex.png")]).unwrap_err();
        assert!(matches!(
            err,
            AssetStageError::FileList(FileListError::DuplicateName(_))
        ));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_stage_under_nested_name() {
        let dir = scratch_dir("nested");
        std::fs::write(dir.join("cube.obj"), b"mtllib cube.mtl\n").unwrap();
        std::fs::write(dir.join("albedo.png"), b"png").unwrap();

        let mut files = FileList::new();
        stage_file(&mut files, dir.join("cube.obj")).unwrap();
        stage_file_as(&mut files, dir.join("albedo.png"), "textures/albedo.png").unwrap();

        let names: Vec<&str> = files.list().collect();
        assert_eq!(names, vec!["cube.obj", "textures/albedo.png"]);
        assert_eq!(files.get("textures/albedo.png").unwrap(), b"png");

        let err = stage_file_as(&mut files, dir.join("albedo.png"), "textures/").unwrap_err();
        assert!(matches!(
            err,
            AssetStageError::FileList(FileListError::InvalidName { .. })
        ));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_path_without_file_name() {
        let mut files = FileList::new();
        let err = stage_file(&mut files, "..").unwrap_err();
        assert!(matches!(err, AssetStageError::InvalidPath(_)));
    }

    #[cfg(feature = "runtime-tokio")]
    #[tokio::test]
    async fn test_stage_files_async() {
        let dir = scratch_dir("async");
        std::fs::write(dir.join("scene.gltf"), b"{}").unwrap();
        std::fs::write(dir.join("scene.bin"), vec![0u8; 64]).unwrap();

        let files = stage_files_async([dir.join("scene.gltf"), dir.join("scene.bin")])
            .await
            .unwrap();
        assert_eq!(files.count(), 2);
        assert_eq!(files.primary().unwrap().name(), "scene.gltf");
        assert_eq!(files.get("scene.bin").unwrap().len(), 64);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
