//! Asset decoding: OBJ geometry and MTL materials

pub mod attributes;
pub mod directive;
pub mod face;
pub mod image_loader;
pub mod materials;
pub mod obj_loader;
pub mod tokens;

pub use attributes::{AttributeKind, VertexPools};
pub use directive::{split_directive, DirectiveLine};
pub use face::{FaceError, FaceVertexSpec, FanIndexTable};
pub use image_loader::ImageData;
pub use materials::{MaterialBuilder, MtlParser};
pub use obj_loader::ObjLoader;

#[cfg(test)]
mod test_scene_loading;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::LoaderConfig;
use crate::scene::{MaterialSet, Scene};

/// Decoding errors
///
/// Malformed content never produces one of these in the default
/// configuration; only I/O failures other than "not found" do, plus
/// rejected faces when [`LoaderConfig::strict`] is set.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The file exists but could not be read
    #[error("IO error reading {path:?}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A texture file could not be decoded
    #[error("Failed to decode image {path:?}: {reason}")]
    Image {
        /// Image file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// A face could not be resolved (strict mode only)
    #[error("Line {line}: invalid face: {source}")]
    InvalidFace {
        /// 1-based line number
        line: usize,
        /// What was wrong with the face
        source: FaceError,
    },
}

/// Read a whole text file. `Ok(None)` if it does not exist.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub(crate) fn read_source(path: &Path) -> Result<Option<String>, DecodeError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(DecodeError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode an OBJ file with default options. `Ok(None)` if the file does not exist.
pub fn load_model(path: impl AsRef<Path>) -> Result<Option<Scene>, DecodeError> {
    load_model_with(path, &LoaderConfig::default())
}

/// Decode an OBJ file. `Ok(None)` if the file does not exist.
pub fn load_model_with(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Option<Scene>, DecodeError> {
    ObjLoader::new(config.clone()).load(path)
}

/// Decode OBJ text already in memory; `mtllib` paths resolve against `base_dir`
pub fn parse_model(source: &str, base_dir: &Path, config: &LoaderConfig) -> Result<Scene, DecodeError> {
    ObjLoader::new(config.clone()).parse(source, base_dir)
}

/// Decode an MTL file with default options. Empty if the file does not exist.
pub fn load_materials(path: impl AsRef<Path>) -> Result<MaterialSet, DecodeError> {
    load_materials_with(path, &LoaderConfig::default())
}

/// Decode an MTL file. Empty if the file does not exist.
pub fn load_materials_with(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<MaterialSet, DecodeError> {
    MtlParser::load(path, config)
}

/// Decode MTL text already in memory; texture paths resolve against `base_dir`
pub fn parse_materials(source: &str, base_dir: &Path, config: &LoaderConfig) -> MaterialSet {
    MtlParser::parse(source, base_dir, config)
}
