//! Scene graph produced by the decoder
//!
//! Everything in here is handed to the caller fully built. No public API
//! mutates a [`Scene`], [`ObjectGroup`], [`Mesh`] or [`Material`] after
//! decoding finishes.

pub mod material;
pub mod mesh;
pub mod scene_graph;

pub use material::{Brush, Color, ImageBrush, Material, MaterialLayer, MaterialSet};
pub use mesh::{Mesh, MeshVertex};
pub use scene_graph::{ObjectGroup, Scene};
