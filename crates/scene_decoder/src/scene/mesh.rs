//! Triangle meshes
//!
//! Vertex attributes are stored exploded: every face vertex gets its own
//! entry in `positions`, `tex_coords` and `normals`, and the three arrays
//! always have the same length. Triangles index into those arrays.

use std::sync::Arc;

use crate::foundation::math::{Vec2, Vec3};
use super::material::Material;

/// One fully resolved face vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    /// Position
    pub position: Vec3,
    /// Texture coordinate, (0, 0) when the face gave none
    pub tex_coord: Vec2,
    /// Unit normal, zero when the face gave none
    pub normal: Vec3,
}

/// A triangle list bound to at most one material
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    material: Option<Arc<Material>>,
}

impl Mesh {
    pub(crate) fn new(material: Option<Arc<Material>>) -> Self {
        Self {
            material,
            ..Default::default()
        }
    }

    /// Vertex positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Texture coordinates, parallel to [`Mesh::positions`]
    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    /// Normals, parallel to [`Mesh::positions`]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Flat triangle index stream, three entries per triangle
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// The bound material
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// A mesh without triangles has no geometry and is dropped from its group
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Gather the attributes of vertex `index`
    pub fn vertex(&self, index: usize) -> Option<MeshVertex> {
        Some(MeshVertex {
            position: *self.positions.get(index)?,
            tex_coord: *self.tex_coords.get(index)?,
            normal: *self.normals.get(index)?,
        })
    }

    pub(crate) fn push_vertex(&mut self, vertex: &MeshVertex) {
        self.positions.push(vertex.position);
        self.tex_coords.push(vertex.tex_coord);
        self.normals.push(vertex.normal);
    }

    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub(crate) fn extend_indices(&mut self, indices: &[u32]) {
        self.indices.extend_from_slice(indices);
    }
}
