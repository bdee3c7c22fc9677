//! Geometry attribute accumulation
//!
//! Pools of positions, texture coordinates and normals filled by the
//! `v`, `vt` and `vn` directives as lines stream in. Faces resolve their
//! indices against whatever has been accumulated so far.

use crate::foundation::math::{flip_v, normalize_or_zero, Vec2, Vec3};
use super::tokens::{field_separator, parse_numbers};

/// Which pool an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// `v`
    Position,
    /// `vt`
    TexCoord,
    /// `vn`
    Normal,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Position => "position",
            Self::TexCoord => "texture coordinate",
            Self::Normal => "normal",
        })
    }
}

/// Accumulated vertex attributes
#[derive(Debug, Clone, Default)]
pub struct VertexPools {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
}

impl VertexPools {
    /// Create empty pools
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `v x y z` position. Returns false if the line does not hold exactly three numbers.
    pub fn push_position(&mut self, remainder: &str) -> bool {
        match parse_numbers(remainder, field_separator).as_slice() {
            &[x, y, z] => {
                self.positions.push(Vec3::new(x, y, z));
                true
            }
            _ => false,
        }
    }

    /// Append a `vt u v` coordinate, flipping V. Requires exactly two numbers.
    pub fn push_tex_coord(&mut self, remainder: &str) -> bool {
        match parse_numbers(remainder, field_separator).as_slice() {
            &[u, v] => {
                self.tex_coords.push(flip_v(u, v));
                true
            }
            _ => false,
        }
    }

    /// Append a `vn x y z` normal, normalized. Requires exactly three numbers.
    pub fn push_normal(&mut self, remainder: &str) -> bool {
        match parse_numbers(remainder, field_separator).as_slice() {
            &[x, y, z] => {
                self.normals.push(normalize_or_zero(Vec3::new(x, y, z)));
                true
            }
            _ => false,
        }
    }

    /// Number of entries in one pool
    pub fn count(&self, kind: AttributeKind) -> usize {
        match kind {
            AttributeKind::Position => self.positions.len(),
            AttributeKind::TexCoord => self.tex_coords.len(),
            AttributeKind::Normal => self.normals.len(),
        }
    }

    /// Positions accumulated so far
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Texture coordinates accumulated so far
    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    /// Normals accumulated so far
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Drop everything, used when an object starts a fresh index space
    pub fn clear(&mut self) {
        self.positions.clear();
        self.tex_coords.clear();
        self.normals.clear();
    }

    /// Turn a raw 1-based OBJ index into a 0-based slot of `kind`.
    ///
    /// Negative indices count back from the newest entry. Zero and
    /// anything past the current count resolve to `None`.
    pub fn resolve(&self, kind: AttributeKind, raw: i64) -> Option<usize> {
        let count = i64::try_from(self.count(kind)).ok()?;
        let resolved = match raw {
            0 => return None,
            n if n > 0 => n - 1,
            n => count + n,
        };

        if (0..count).contains(&resolved) {
            usize::try_from(resolved).ok()
        } else {
            None
        }
    }
}
