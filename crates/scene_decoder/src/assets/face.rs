//! Face assembly and fan triangulation
//!
//! An `f` line is a list of `pos[/tex][/norm]` vertex specs. Every spec is
//! resolved against the [`VertexPools`] first; only when the whole face
//! resolves are its vertices and `n - 2` fan triangles written into a mesh.

use std::sync::Arc;

use thiserror::Error;

use crate::foundation::math::{Vec2, Vec3};
use crate::scene::{Material, Mesh, MeshVertex};
use super::attributes::{AttributeKind, VertexPools};
use super::tokens::parse_index;

/// Why a face could not be assembled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceError {
    /// Fewer than three vertex specs
    #[error("face needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// The position segment of a vertex spec is empty or not a number
    #[error("vertex spec '{0}' has no position index")]
    MissingPosition(String),

    /// An index points outside the accumulated pool
    #[error("{kind} index {index} is out of range (count={count})")]
    IndexOutOfRange {
        /// Pool the index refers to
        kind: AttributeKind,
        /// Raw index as written in the file
        index: i64,
        /// Entries accumulated at that point
        count: usize,
    },
}

/// Raw indices of one `pos/tex/norm` spec, `None` where a segment is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertexSpec {
    /// Position index
    pub position: Option<i64>,
    /// Texture coordinate index
    pub tex_coord: Option<i64>,
    /// Normal index
    pub normal: Option<i64>,
}

impl FaceVertexSpec {
    /// Parse one spec such as `5`, `5/1`, `5//2` or `5/1/2`.
    ///
    /// Segments past the third are ignored.
    pub fn parse(token: &str) -> Self {
        let mut segments = token.split('/').map(parse_index);
        Self {
            position: segments.next().flatten(),
            tex_coord: segments.next().flatten(),
            normal: segments.next().flatten(),
        }
    }
}

/// Parse every vertex spec of an `f` remainder
pub fn parse_face(remainder: &str) -> Vec<(&str, FaceVertexSpec)> {
    remainder
        .split_whitespace()
        .map(|token| (token, FaceVertexSpec::parse(token)))
        .collect()
}

/// Resolve a parsed face against the pools.
///
/// A missing texture index yields (0, 0) and a missing normal index
/// yields the zero vector. A missing or dangling position index, or a
/// present but dangling texture/normal index, rejects the whole face.
pub fn resolve_face(
    specs: &[(&str, FaceVertexSpec)],
    pools: &VertexPools,
) -> Result<Vec<MeshVertex>, FaceError> {
    if specs.len() < 3 {
        return Err(FaceError::TooFewVertices(specs.len()));
    }

    specs
        .iter()
        .map(|(token, spec)| -> Result<MeshVertex, FaceError> {
            let raw_position = spec
                .position
                .ok_or_else(|| FaceError::MissingPosition((*token).to_string()))?;
            let position = pools.positions()[lookup(pools, AttributeKind::Position, raw_position)?];

            let tex_coord = match spec.tex_coord {
                Some(raw) => pools.tex_coords()[lookup(pools, AttributeKind::TexCoord, raw)?],
                None => Vec2::zeros(),
            };

            let normal = match spec.normal {
                Some(raw) => pools.normals()[lookup(pools, AttributeKind::Normal, raw)?],
                None => Vec3::zeros(),
            };

            Ok(MeshVertex { position, tex_coord, normal })
        })
        .collect()
}

fn lookup(pools: &VertexPools, kind: AttributeKind, raw: i64) -> Result<usize, FaceError> {
    pools.resolve(kind, raw).ok_or(FaceError::IndexOutOfRange {
        kind,
        index: raw,
        count: pools.count(kind),
    })
}

/// Append a resolved face to a running mesh.
///
/// Triangles fan around the face's first vertex using absolute indices
/// into the mesh's vertex arrays.
#[allow(clippy::cast_possible_truncation)]
pub fn append_fan(mesh: &mut Mesh, vertices: &[MeshVertex]) {
    let base = mesh.vertex_count() as u32;
    for vertex in vertices {
        mesh.push_vertex(vertex);
    }

    let count = vertices.len() as u32;
    for i in 1..count.saturating_sub(1) {
        mesh.push_triangle(base, base + i, base + i + 1);
    }
}

/// Fan index table reused by per-face meshes.
///
/// Every face mesh starts at index 0, so the fan for an n-gon is always a
/// prefix of the same stream `0 1 2, 0 2 3, 0 3 4, ...`. The table grows
/// to the largest face seen and lives only as long as one load.
#[derive(Debug, Clone, Default)]
pub struct FanIndexTable {
    indices: Vec<u32>,
}

impl FanIndexTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Fan indices for a face of `vertex_count` vertices
    #[allow(clippy::cast_possible_truncation)]
    pub fn fan(&mut self, vertex_count: usize) -> &[u32] {
        let triangle_count = vertex_count.saturating_sub(2);
        let known = self.indices.len() / 3;
        for i in (known + 1)..=triangle_count {
            let i = i as u32;
            self.indices.extend_from_slice(&[0, i, i + 1]);
        }
        &self.indices[..triangle_count * 3]
    }
}

/// Build a standalone mesh for one resolved face
pub fn face_mesh(
    table: &mut FanIndexTable,
    vertices: &[MeshVertex],
    material: Option<Arc<Material>>,
) -> Mesh {
    let mut mesh = Mesh::new(material);
    for vertex in vertices {
        mesh.push_vertex(vertex);
    }
    mesh.extend_indices(table.fan(vertices.len()));
    mesh
}
