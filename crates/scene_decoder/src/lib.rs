//! # Scene Decoder
//!
//! Decodes Wavefront OBJ geometry and MTL material files into an
//! in-memory scene graph of triangulated, material-grouped meshes.
//!
//! ## Features
//!
//! - **Tolerant parsing**: malformed lines and tokens are skipped or read as zero
//! - **Fan triangulation**: arbitrary polygon faces become `n - 2` triangles
//! - **Composite materials**: ambient tint plus diffuse, specular and emissive layers
//! - **Texture decoding**: `map_Ka` / `map_Kd` images decoded to RGBA8
//! - **Configurable assembly**: one mesh per material or one mesh per face
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_decoder::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     if let Some(scene) = load_model("resources/models/board.obj")? {
//!         for object in scene.objects() {
//!             println!("{:?}: {} triangles", object.name(), object.triangle_count());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod assets;

pub use assets::{
    load_materials, load_materials_with, load_model, load_model_with,
    parse_materials, parse_model, DecodeError,
};

/// Common imports for decoder users
pub mod prelude {
    pub use crate::{
        load_materials, load_materials_with, load_model, load_model_with,
        DecodeError,
        config::{AssemblyStrategy, Config, LoaderConfig, VertexScope},
        foundation::math::{Vec2, Vec3},
        scene::{Brush, Color, Material, MaterialLayer, MaterialSet, Mesh, ObjectGroup, Scene},
    };
}
