//! OBJ file loader for 3D models
//!
//! Streams the lines of an OBJ file through a small state machine that
//! accumulates vertex pools, groups triangulated faces into meshes by
//! active material, and seals meshes into object groups at every object
//! boundary and at end of input.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{AssemblyStrategy, LoaderConfig, VertexScope};
use crate::scene::{Material, MaterialSet, Mesh, ObjectGroup, Scene};
use super::attributes::VertexPools;
use super::directive::{split_directive, DirectiveLine};
use super::face::{append_fan, face_mesh, parse_face, resolve_face, FanIndexTable};
use super::materials::MtlParser;
use super::{read_source, DecodeError};

/// What a line keyword asks the assembler to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjDirective {
    MaterialLibrary,
    UseMaterial,
    Object,
    Position,
    TexCoord,
    Normal,
    Face,
    Ignored,
}

impl ObjDirective {
    fn from_keyword(keyword: &str, config: &LoaderConfig) -> Self {
        match keyword {
            "mtllib" => Self::MaterialLibrary,
            "usemtl" => Self::UseMaterial,
            "o" => Self::Object,
            "g" if config.group_starts_object => Self::Object,
            "v" => Self::Position,
            "vt" => Self::TexCoord,
            "vn" => Self::Normal,
            "f" => Self::Face,
            _ => Self::Ignored,
        }
    }
}

/// OBJ decoder
#[derive(Debug, Clone, Default)]
pub struct ObjLoader {
    config: LoaderConfig,
}

impl ObjLoader {
    /// Create a loader with the given options
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Loader options
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load an OBJ file and return its scene.
    ///
    /// Returns `Ok(None)` when the file does not exist. Materials named by
    /// `mtllib` are resolved relative to the OBJ file's directory.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Option<Scene>, DecodeError> {
        let path = path.as_ref();
        let Some(source) = read_source(path)? else {
            log::debug!("Model file {:?} not found", path);
            return Ok(None);
        };

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let scene = self.parse(&source, &base_dir)?;

        log::info!(
            "Loaded {:?}: {} object(s), {} mesh(es), {} triangle(s)",
            path,
            scene.objects().len(),
            scene.mesh_count(),
            scene.triangle_count()
        );
        Ok(Some(scene))
    }

    /// Decode OBJ text. `mtllib` paths are resolved against `base_dir`.
    pub fn parse(&self, source: &str, base_dir: &Path) -> Result<Scene, DecodeError> {
        let mut assembler = SceneAssembler::new(&self.config, base_dir);
        let mut last: Option<(&str, ObjDirective)> = None;

        for (index, line) in source.lines().enumerate() {
            let Some(DirectiveLine { keyword, remainder }) = split_directive(line) else {
                continue;
            };

            // Runs of the same keyword reuse the previous dispatch
            let directive = match last {
                Some((previous, directive)) if previous == keyword => directive,
                _ => {
                    let directive = ObjDirective::from_keyword(keyword, &self.config);
                    last = Some((keyword, directive));
                    directive
                }
            };

            assembler.apply(directive, keyword, remainder, index + 1)?;
        }

        Ok(assembler.finish())
    }
}

/// Per-load decoding state. Nothing here outlives one `parse` call.
struct SceneAssembler<'a> {
    config: &'a LoaderConfig,
    base_dir: &'a Path,
    materials: MaterialSet,
    pools: VertexPools,
    fan_table: FanIndexTable,
    objects: Vec<ObjectGroup>,
    object_name: Option<String>,
    meshes: Vec<Mesh>,
    material: Option<Arc<Material>>,
    mesh: Mesh,
}

impl<'a> SceneAssembler<'a> {
    fn new(config: &'a LoaderConfig, base_dir: &'a Path) -> Self {
        Self {
            config,
            base_dir,
            materials: MaterialSet::new(),
            pools: VertexPools::new(),
            fan_table: FanIndexTable::new(),
            objects: Vec::new(),
            object_name: None,
            meshes: Vec::new(),
            material: None,
            mesh: Mesh::new(None),
        }
    }

    fn apply(
        &mut self,
        directive: ObjDirective,
        keyword: &str,
        remainder: &str,
        line: usize,
    ) -> Result<(), DecodeError> {
        match directive {
            ObjDirective::MaterialLibrary => {
                let mtl_path = self.base_dir.join(remainder);
                self.materials = MtlParser::load(&mtl_path, self.config)?;
            }
            ObjDirective::UseMaterial => self.use_material(remainder),
            ObjDirective::Object => self.start_object(remainder),
            ObjDirective::Position => {
                if !self.pools.push_position(remainder) {
                    log::trace!("Line {}: ignoring malformed position '{}'", line, remainder);
                }
            }
            ObjDirective::TexCoord => {
                if !self.pools.push_tex_coord(remainder) {
                    log::trace!("Line {}: ignoring malformed texture coordinate '{}'", line, remainder);
                }
            }
            ObjDirective::Normal => {
                if !self.pools.push_normal(remainder) {
                    log::trace!("Line {}: ignoring malformed normal '{}'", line, remainder);
                }
            }
            ObjDirective::Face => self.add_face(remainder, line)?,
            ObjDirective::Ignored => {
                log::trace!("Line {}: ignoring directive '{}'", line, keyword);
            }
        }
        Ok(())
    }

    fn use_material(&mut self, name: &str) {
        self.flush_mesh();
        self.material = self.materials.get(name);
        if self.material.is_none() {
            log::debug!("Material '{}' not loaded, mesh has no material", name);
        }
        self.mesh = Mesh::new(self.material.clone());
    }

    fn start_object(&mut self, name: &str) {
        self.flush_object();
        self.object_name = Some(name.to_string());
        self.material = None;
        self.mesh = Mesh::new(None);
        if self.config.vertex_scope == VertexScope::Object {
            self.pools.clear();
        }
    }

    fn add_face(&mut self, remainder: &str, line: usize) -> Result<(), DecodeError> {
        let specs = parse_face(remainder);
        let vertices = match resolve_face(&specs, &self.pools) {
            Ok(vertices) => vertices,
            Err(source) if self.config.strict => {
                return Err(DecodeError::InvalidFace { line, source });
            }
            Err(e) => {
                log::warn!("Line {}: skipping face: {}", line, e);
                return Ok(());
            }
        };

        match self.config.assembly {
            AssemblyStrategy::PerMaterial => append_fan(&mut self.mesh, &vertices),
            AssemblyStrategy::PerFace => {
                let mesh = face_mesh(&mut self.fan_table, &vertices, self.material.clone());
                self.meshes.push(mesh);
            }
        }
        Ok(())
    }

    /// Move the running mesh into the current object if it has geometry
    fn flush_mesh(&mut self) {
        let mesh = std::mem::take(&mut self.mesh);
        if !mesh.is_empty() {
            self.meshes.push(mesh);
        }
    }

    /// Seal the current object; objects without meshes are dropped
    fn flush_object(&mut self) {
        self.flush_mesh();
        let name = self.object_name.take();
        let meshes = std::mem::take(&mut self.meshes);
        if !meshes.is_empty() {
            self.objects.push(ObjectGroup::new(name, meshes));
        }
    }

    fn finish(mut self) -> Scene {
        self.flush_object();
        Scene::new(self.objects)
    }
}
