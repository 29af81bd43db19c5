//! glTF/GLB importer
//!
//! Parsing is done by the `gltf` crate. This importer only resolves the
//! external buffers and images a document references through the staged
//! file list and reports what the document contains.

use super::{ImportConfig, ImportError, SceneImporter, SceneSummary};
use crate::file_list::FileListError;
use crate::io::{read_all, resolve_relative, IoSystem};
use gltf::Gltf;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

const GLB_MAGIC: &[u8] = b"glTF";

/// Importer for `.gltf` and `.glb` files
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfImporter;

impl GltfImporter {
    /// Create a new glTF importer
    pub fn new() -> Self {
        Self
    }

    fn fetch(
        &self,
        io: &dyn IoSystem,
        primary: &str,
        uri: &str,
    ) -> Result<(String, Vec<u8>), ImportError> {
        let name = resolve_relative(primary, &decode_uri(uri))?;
        let stream = io.open(&name).map_err(|err| match err {
            FileListError::NotFound(_) => ImportError::MissingReference {
                from: primary.to_string(),
                reference: name.clone(),
            },
            other => other.into(),
        })?;

        let data = read_all(stream)?;
        log::debug!("  - Resolved {uri} as {name} ({} bytes)", data.len());
        Ok((name, data))
    }
}

impl SceneImporter for GltfImporter {
    fn name(&self) -> &str {
        "gltf"
    }

    fn import(
        &self,
        io: &dyn IoSystem,
        primary: &str,
        config: &ImportConfig,
    ) -> Result<SceneSummary, ImportError> {
        let data = read_all(io.open(primary)?)?;
        let format = if data.starts_with(GLB_MAGIC) {
            "glb"
        } else {
            "gltf"
        };

        let gltf = Gltf::from_slice(&data)
            .map_err(|e| ImportError::Parse(format!("Failed to parse {primary}: {e}")))?;

        log::debug!(
            "Parsed {primary} with {} buffers and {} images",
            gltf.buffers().len(),
            gltf.images().len()
        );

        let mut resolved_files: Vec<String> = Vec::new();

        for buffer in gltf.buffers() {
            match buffer.source() {
                gltf::buffer::Source::Bin => {
                    if gltf.blob.is_none() {
                        return Err(ImportError::Parse(format!(
                            "{primary}: buffer {} refers to a missing binary chunk",
                            buffer.index()
                        )));
                    }
                }
                gltf::buffer::Source::Uri(uri) if is_data_uri(uri) => {}
                gltf::buffer::Source::Uri(uri) => {
                    let (name, bytes) = self.fetch(io, primary, uri)?;
                    if bytes.len() < buffer.length() {
                        return Err(ImportError::Parse(format!(
                            "{name}: expected at least {} bytes, found {}",
                            buffer.length(),
                            bytes.len()
                        )));
                    }
                    if !resolved_files.contains(&name) {
                        resolved_files.push(name);
                    }
                }
            }
        }

        for image in gltf.images() {
            match image.source() {
                gltf::image::Source::View { .. } => {}
                gltf::image::Source::Uri { uri, .. } if is_data_uri(uri) => {}
                gltf::image::Source::Uri { uri, .. } => {
                    let (name, _) = self.fetch(io, primary, uri)?;
                    if !resolved_files.contains(&name) {
                        resolved_files.push(name);
                    }
                }
            }
        }

        Ok(SceneSummary {
            primary: primary.to_string(),
            format: format.to_string(),
            importer: self.name().to_string(),
            mesh_count: gltf.meshes().len(),
            material_count: gltf.materials().len(),
            node_count: gltf.nodes().len(),
            texture_count: gltf.textures().len(),
            resolved_files,
            post_process: config.post_process,
        })
    }
}

fn is_data_uri(uri: &str) -> bool {
    uri.starts_with("data:")
}

/// Decode `%XX` escapes in a relative URI
///
/// URIs that do not decode to UTF-8 are used verbatim.
fn decode_uri(uri: &str) -> Cow<'_, str> {
    percent_decode_str(uri)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(uri))
}
