//! Material decoding subsystem
//!
//! Reads MTL files into a [`MaterialSet`](crate::scene::MaterialSet).

pub mod material_builder;
pub mod mtl_parser;

pub use material_builder::MaterialBuilder;
pub use mtl_parser::MtlParser;
