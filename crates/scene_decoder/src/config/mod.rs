//! Configuration system
//!
//! Loader behaviour is driven by [`LoaderConfig`], which can be built in code
//! or read from a `.toml` / `.ron` file through the [`Config`] trait.

pub use serde::{Serialize, Deserialize};

use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// How faces are gathered into meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyStrategy {
    /// One running mesh per `usemtl` scope. Each face appends its vertices
    /// and its fan triangles reference them by absolute position.
    #[default]
    PerMaterial,
    /// One mesh per face. Vertex data is exploded per face and every mesh
    /// starts its triangle indices at 0.
    PerFace,
}

/// Lifetime of the `v` / `vt` / `vn` pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexScope {
    /// Pools are cleared at every object-start directive, so face indices
    /// count from the start of the current object.
    #[default]
    Object,
    /// Pools live for the whole file.
    File,
}

/// Options for decoding OBJ and MTL files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Mesh grouping strategy
    pub assembly: AssemblyStrategy,

    /// Vertex pool lifetime
    pub vertex_scope: VertexScope,

    /// Treat `g` like `o`
    pub group_starts_object: bool,

    /// Fail the load on an unresolvable face instead of skipping it
    pub strict: bool,

    /// Decode `map_Ka` / `map_Kd` images into pixel data
    pub decode_textures: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            assembly: AssemblyStrategy::PerMaterial,
            vertex_scope: VertexScope::Object,
            group_starts_object: false,
            strict: false,
            decode_textures: true,
        }
    }
}

impl Config for LoaderConfig {}
