//! In-progress material state between `newmtl` directives

use crate::scene::{Brush, Color, Material, MaterialLayer};

/// Specular exponent used until an `Ns` directive sets one
pub const DEFAULT_SPECULAR_EXPONENT: f32 = 40.0;

/// Accumulates the layers of one material until it is sealed by
/// [`MaterialBuilder::build`].
///
/// # Example
/// ```
/// use scene_decoder::assets::MaterialBuilder;
/// use scene_decoder::scene::{Brush, Color};
///
/// let mut builder = MaterialBuilder::new("Red");
/// builder.diffuse(Brush::Solid(Color::new(255, 0, 0)));
/// let material = builder.build();
/// assert_eq!(material.diffuse().and_then(Brush::color), Some(Color::new(255, 0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct MaterialBuilder {
    name: String,
    ambient: Option<Color>,
    layers: Vec<MaterialLayer>,
    specular_exponent: f32,
    specular_layer: Option<usize>,
}

impl MaterialBuilder {
    /// Start an empty material
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: None,
            layers: Vec::new(),
            specular_exponent: DEFAULT_SPECULAR_EXPONENT,
            specular_layer: None,
        }
    }

    /// Name of the material being built
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the ambient tint
    pub fn ambient(&mut self, color: Color) -> &mut Self {
        self.ambient = Some(color);
        self
    }

    /// Add a diffuse layer
    pub fn diffuse(&mut self, brush: Brush) -> &mut Self {
        self.layers.push(MaterialLayer::Diffuse(brush));
        self
    }

    /// Add a specular layer carrying the current exponent
    pub fn specular(&mut self, brush: Brush) -> &mut Self {
        self.specular_layer = Some(self.layers.len());
        self.layers.push(MaterialLayer::Specular {
            brush,
            exponent: self.specular_exponent,
        });
        self
    }

    /// Set the specular exponent.
    ///
    /// Updates the latest specular layer and is carried into later ones.
    pub fn specular_exponent(&mut self, value: f32) -> &mut Self {
        self.specular_exponent = value;
        if let Some(MaterialLayer::Specular { exponent, .. }) =
            self.specular_layer.and_then(|index| self.layers.get_mut(index))
        {
            *exponent = value;
        }
        self
    }

    /// Add an emissive layer
    pub fn emissive(&mut self, brush: Brush) -> &mut Self {
        self.layers.push(MaterialLayer::Emissive(brush));
        self
    }

    /// Seal the material
    pub fn build(self) -> Material {
        Material {
            name: self.name,
            ambient: self.ambient,
            layers: self.layers,
        }
    }
}
