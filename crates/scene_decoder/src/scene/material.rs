//! Composite materials decoded from MTL files
//!
//! A [`Material`] is an ordered stack of shading layers plus an optional
//! ambient tint. Layers are kept in file order so a renderer can composite
//! them the same way they were declared.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::ImageData;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from 8-bit channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from unit-range channels.
    ///
    /// Each channel is clamped to `[0, 1]` and scaled to 255, truncating.
    pub fn from_unit_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
    }

    /// Create a color from a parsed value list; only exactly three values
    /// form a color.
    pub fn from_components(values: &[f32]) -> Option<Self> {
        match values {
            [r, g, b] => Some(Self::from_unit_rgb(*r, *g, *b)),
            _ => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_byte(value: f32) -> u8 {
    // NaN survives clamp and casts to 0
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// A texture referenced by a material
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBrush {
    /// Resolved path of the image file
    pub path: PathBuf,
    /// Decoded pixels; `None` when texture decoding is disabled
    pub image: Option<ImageData>,
}

/// What a material layer paints with
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    /// A single flat color
    Solid(Color),
    /// An image texture
    Image(ImageBrush),
    /// Paints nothing. Used when a color value is malformed or a texture is missing.
    Transparent,
}

impl Brush {
    /// The solid color of this brush, if it is one
    pub const fn color(&self) -> Option<Color> {
        match self {
            Self::Solid(color) => Some(*color),
            _ => None,
        }
    }

    /// Whether this brush paints nothing
    pub const fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }
}

/// One shading layer of a composite material
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialLayer {
    /// Diffuse reflection (`Kd`, `map_Kd`, `map_Ka`)
    Diffuse(Brush),
    /// Specular highlight (`Ks`) with its exponent (`Ns`)
    Specular {
        /// Highlight brush
        brush: Brush,
        /// Specular exponent
        exponent: f32,
    },
    /// Self illumination (`Ke`)
    Emissive(Brush),
}

/// A named composite material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub(crate) name: String,
    pub(crate) ambient: Option<Color>,
    pub(crate) layers: Vec<MaterialLayer>,
}

impl Material {
    /// Material name as declared by `newmtl`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ambient tint (`Ka`)
    pub const fn ambient(&self) -> Option<Color> {
        self.ambient
    }

    /// All layers in declaration order
    pub fn layers(&self) -> &[MaterialLayer] {
        &self.layers
    }

    /// Diffuse brushes in declaration order
    pub fn diffuse_layers(&self) -> impl Iterator<Item = &Brush> {
        self.layers.iter().filter_map(|layer| match layer {
            MaterialLayer::Diffuse(brush) => Some(brush),
            _ => None,
        })
    }

    /// The most recently declared diffuse brush
    pub fn diffuse(&self) -> Option<&Brush> {
        self.diffuse_layers().last()
    }

    /// The most recently declared specular brush and its exponent
    pub fn specular(&self) -> Option<(&Brush, f32)> {
        self.layers.iter().rev().find_map(|layer| match layer {
            MaterialLayer::Specular { brush, exponent } => Some((brush, *exponent)),
            _ => None,
        })
    }

    /// The most recently declared emissive brush
    pub fn emissive(&self) -> Option<&Brush> {
        self.layers.iter().rev().find_map(|layer| match layer {
            MaterialLayer::Emissive(brush) => Some(brush),
            _ => None,
        })
    }
}

/// Materials of one MTL file keyed by name
#[derive(Debug, Clone, Default)]
pub struct MaterialSet {
    materials: HashMap<String, Arc<Material>>,
}

impl MaterialSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a material. An unknown name is simply "no material".
    pub fn get(&self, name: &str) -> Option<Arc<Material>> {
        self.materials.get(name).map(Arc::clone)
    }

    /// Whether a material with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate over `(name, material)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Material>)> {
        self.materials.iter().map(|(name, material)| (name.as_str(), material))
    }

    /// Insert a sealed material, returning the one it replaced
    pub(crate) fn insert(&mut self, material: Material) -> Option<Arc<Material>> {
        self.materials.insert(material.name.clone(), Arc::new(material))
    }
}
