//! Math utilities and types
//!
//! Provides the vector types the scene graph is expressed in.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (positions and normals)
pub type Vec3 = Vector3<f32>;

/// Normalize a vector to unit length.
///
/// A zero-length vector has no direction and is returned unchanged
/// instead of turning into NaN components.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
}

/// Flip a texture V coordinate from file space (origin bottom-left)
/// into image space (origin top-left).
pub fn flip_v(u: f32, v: f32) -> Vec2 {
    Vec2::new(u, 1.0 - v)
}
