//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into composite materials. Each `newmtl`
//! seals the material before it; the last one is sealed at end of input.
//! Nothing in a readable file fails the parse: malformed colors become
//! transparent layers, unknown directives are ignored, and textures that
//! cannot be found fall back to transparent layers.

use std::path::{Path, PathBuf};

use crate::assets::directive::split_directive;
use crate::assets::tokens::{field_separator, parse_number, parse_numbers};
use crate::assets::{read_source, DecodeError, ImageData};
use crate::config::LoaderConfig;
use crate::scene::{Brush, Color, ImageBrush, MaterialSet};
use super::material_builder::MaterialBuilder;

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Load every material of an MTL file.
    ///
    /// A file that does not exist yields an empty set.
    pub fn load(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<MaterialSet, DecodeError> {
        let path = path.as_ref();
        let Some(contents) = read_source(path)? else {
            log::debug!("Material file {:?} not found, using no materials", path);
            return Ok(MaterialSet::new());
        };

        let materials = Self::parse(&contents, &Self::get_mtl_directory(path), config);
        log::info!("Loaded {} material(s) from {:?}", materials.len(), path);
        Ok(materials)
    }

    /// Parse MTL file contents.
    ///
    /// # Arguments
    /// * `contents` - The text contents of the MTL file
    /// * `base_dir` - Directory texture paths are resolved against
    /// * `config` - Loader options
    pub fn parse(contents: &str, base_dir: &Path, config: &LoaderConfig) -> MaterialSet {
        let mut materials = MaterialSet::new();
        let mut current: Option<MaterialBuilder> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let Some(directive) = split_directive(line) else {
                continue;
            };
            let value = directive.remainder;

            if directive.keyword == "newmtl" {
                if let Some(builder) = current.take() {
                    Self::seal(&mut materials, builder);
                }
                current = Some(MaterialBuilder::new(value));
                continue;
            }

            // Everything else belongs to a material
            let Some(builder) = current.as_mut() else {
                log::trace!("Line {}: '{}' outside of any material", line_num + 1, directive.keyword);
                continue;
            };

            match directive.keyword {
                "Ka" => {
                    if let Some(color) = Color::from_components(&parse_numbers(value, field_separator)) {
                        builder.ambient(color);
                    }
                }
                "Kd" => {
                    builder.diffuse(Self::color_brush(value));
                }
                "Ks" => {
                    builder.specular(Self::color_brush(value));
                }
                "Ns" => {
                    if let Some(exponent) = parse_number(value) {
                        builder.specular_exponent(exponent);
                    }
                }
                "Ke" => {
                    builder.emissive(Self::color_brush(value));
                }
                "map_Ka" | "map_Kd" => {
                    let texture_path = Self::resolve_texture_path(base_dir, value);
                    builder.diffuse(Self::texture_brush(texture_path, config));
                }
                // Ignore unknown commands silently
                _ => {}
            }
        }

        // Save final material
        if let Some(builder) = current {
            Self::seal(&mut materials, builder);
        }

        materials
    }

    fn seal(materials: &mut MaterialSet, builder: MaterialBuilder) {
        let name = builder.name().to_string();
        if materials.insert(builder.build()).is_some() {
            log::warn!("Material '{}' defined more than once, keeping the last definition", name);
        }
    }

    /// A solid brush from three unit-range numbers, transparent otherwise
    fn color_brush(value: &str) -> Brush {
        Color::from_components(&parse_numbers(value, field_separator)).map_or(Brush::Transparent, Brush::Solid)
    }

    /// An image brush for a texture file, transparent if it cannot be used
    fn texture_brush(path: PathBuf, config: &LoaderConfig) -> Brush {
        if !path.is_file() {
            log::warn!("Texture {:?} not found, using a transparent layer", path);
            return Brush::Transparent;
        }

        if !config.decode_textures {
            return Brush::Image(ImageBrush { path, image: None });
        }

        match ImageData::from_file(&path) {
            Ok(image) => Brush::Image(ImageBrush { path, image: Some(image) }),
            Err(e) => {
                log::warn!("{}; using a transparent layer", e);
                Brush::Transparent
            }
        }
    }

    /// Get the directory containing the MTL file (for resolving relative texture paths)
    pub fn get_mtl_directory(mtl_path: &Path) -> PathBuf {
        mtl_path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a texture path relative to a base directory
    ///
    /// Texture paths in MTL files can be:
    /// - Relative to the MTL file directory
    /// - Absolute paths
    pub fn resolve_texture_path(base_dir: &Path, texture_path: &str) -> PathBuf {
        let texture_path = Path::new(texture_path);

        // If absolute, return as-is
        if texture_path.is_absolute() {
            return texture_path.to_path_buf();
        }

        // Otherwise, resolve relative to base directory
        base_dir.join(texture_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MaterialLayer;
    use tempfile::tempdir;

    fn parse(contents: &str) -> MaterialSet {
        MtlParser::parse(contents, Path::new("."), &LoaderConfig::default())
    }

    #[test]
    fn test_parse_simple_material() {
        let mtl_content = r#"
# Simple material
newmtl TestMaterial
Ka 1.0 1.0 1.0
Kd 0.8 0.2 0.2
Ks 0.5 0.5 0.5
Ns 250.0
d 1.0
illum 2
"#;

        let materials = parse(mtl_content);
        assert_eq!(materials.len(), 1);

        let mat = materials.get("TestMaterial").unwrap();
        assert_eq!(mat.name(), "TestMaterial");
        assert_eq!(mat.ambient(), Some(Color::WHITE));
        assert_eq!(mat.diffuse(), Some(&Brush::Solid(Color::new(204, 51, 51))));
        assert_eq!(
            mat.specular(),
            Some((&Brush::Solid(Color::new(127, 127, 127)), 250.0))
        );
    }

    #[test]
    fn test_newmtl_seals_previous_material() {
        let materials = parse("newmtl Red\nKd 1 0 0\nnewmtl Blue\n");
        assert_eq!(materials.len(), 2);
        assert!(materials.contains("Red") && materials.contains("Blue"));
        assert!(!materials.contains("Green"));

        let red = materials.get("Red").unwrap();
        assert_eq!(red.layers(), &[MaterialLayer::Diffuse(Brush::Solid(Color::new(255, 0, 0)))]);

        let blue = materials.get("Blue").unwrap();
        assert!(blue.diffuse().is_none());
        assert!(blue.layers().is_empty());
    }

    #[test]
    fn test_malformed_color_is_transparent() {
        let materials = parse("newmtl Odd\nKd 1 0\nKe 0.2 0.6 1.0 1.0\n");
        let odd = materials.get("Odd").unwrap();
        assert_eq!(odd.diffuse(), Some(&Brush::Transparent));
        assert_eq!(odd.emissive(), Some(&Brush::Transparent));
    }

    #[test]
    fn test_malformed_ambient_and_exponent_are_ignored() {
        let materials = parse("newmtl Odd\nKa 1 1\nNs shiny\nKs 1 1 1\n");
        let odd = materials.get("Odd").unwrap();
        assert!(odd.ambient().is_none());
        assert_eq!(odd.specular().map(|(_, e)| e), Some(40.0));
    }

    #[test]
    fn test_directives_before_newmtl_are_ignored() {
        let materials = parse("Kd 1 0 0\nNs 10\nnewmtl Late\nKs 1 1 1\n");
        let late = materials.get("Late").unwrap();
        assert!(late.diffuse().is_none());
        assert_eq!(late.specular().map(|(_, e)| e), Some(40.0));
    }

    #[test]
    fn test_tab_separated_colors() {
        let materials = parse("newmtl Tabbed\nKd\t1\t0\t0\nKs 1\t1\t1\n");
        let tabbed = materials.get("Tabbed").unwrap();
        assert_eq!(tabbed.diffuse(), Some(&Brush::Solid(Color::new(255, 0, 0))));
        assert_eq!(tabbed.specular(), Some((&Brush::Solid(Color::WHITE), 40.0)));
    }

    #[test]
    fn test_emission() {
        let materials = parse("newmtl Glow\nKe 0.2 0.6 1.0\n");
        let glow = materials.get("Glow").unwrap();
        assert_eq!(glow.emissive(), Some(&Brush::Solid(Color::new(51, 153, 255))));
    }

    #[test]
    fn test_duplicate_name_keeps_last() {
        let materials = parse("newmtl Same\nKd 1 0 0\nnewmtl Same\nKd 0 1 0\n");
        assert_eq!(materials.len(), 1);
        assert_eq!(
            materials.get("Same").unwrap().diffuse(),
            Some(&Brush::Solid(Color::new(0, 255, 0)))
        );
    }

    #[test]
    fn test_missing_texture_is_transparent() {
        let dir = tempdir().unwrap();
        let materials = MtlParser::parse(
            "newmtl Wood\nmap_Kd textures/missing.png\n",
            dir.path(),
            &LoaderConfig::default(),
        );
        let diffuse = materials.get("Wood").unwrap().diffuse().cloned();
        assert!(diffuse.is_some_and(|brush| brush.is_transparent()));
    }

    #[test]
    fn test_jpeg_texture_is_decoded() {
        let dir = tempdir().unwrap();
        let texture = dir.path().join("wood.jpg");
        image::RgbImage::from_pixel(2, 2, image::Rgb([200, 120, 40]))
            .save(&texture)
            .unwrap();

        let materials = MtlParser::parse("newmtl Wood\nmap_Kd wood.jpg\n", dir.path(), &LoaderConfig::default());
        let wood = materials.get("Wood").unwrap();

        let Some(Brush::Image(brush)) = wood.diffuse() else {
            panic!("expected an image brush, got {:?}", wood.diffuse());
        };
        assert_eq!(brush.path, texture);
        let data = brush.image.as_ref().unwrap();
        assert_eq!((data.width, data.height, data.channels), (2, 2, 4));
        assert_eq!(data.size_bytes(), 16);
    }

    #[test]
    fn test_bmp_ambient_texture_is_decoded() {
        let dir = tempdir().unwrap();
        image::RgbImage::from_pixel(3, 1, image::Rgb([0, 0, 255]))
            .save(dir.path().join("sky.bmp"))
            .unwrap();

        let materials = MtlParser::parse("newmtl Sky\nmap_Ka sky.bmp\n", dir.path(), &LoaderConfig::default());
        let diffuse = materials.get("Sky").unwrap().diffuse().cloned().unwrap();

        assert!(!diffuse.is_transparent());
        match diffuse {
            Brush::Image(ImageBrush { image: Some(data), .. }) => {
                assert_eq!(data.pixel(2, 0), Some([0, 0, 255, 255]));
            }
            other => panic!("expected a decoded image, got {:?}", other),
        }
    }

    #[test]
    fn test_texture_path_without_decoding() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("textures")).unwrap();
        let texture = dir.path().join("textures").join("wood grain.png");
        std::fs::write(&texture, b"not decoded").unwrap();

        let config = LoaderConfig { decode_textures: false, ..LoaderConfig::default() };
        let materials = MtlParser::parse("newmtl Wood\nmap_Ka textures/wood grain.png\n", dir.path(), &config);

        assert_eq!(
            materials.get("Wood").unwrap().diffuse(),
            Some(&Brush::Image(ImageBrush { path: texture, image: None }))
        );
    }

    #[test]
    fn test_undecodable_texture_is_transparent() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let materials = MtlParser::parse("newmtl Broken\nmap_Kd broken.png\n", dir.path(), &LoaderConfig::default());
        assert!(materials.get("Broken").unwrap().diffuse().unwrap().is_transparent());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let materials = MtlParser::load(dir.path().join("nothing.mtl"), &LoaderConfig::default()).unwrap();
        assert!(materials.is_empty());
    }

    #[test]
    fn test_resolve_texture_path() {
        let mtl_dir = Path::new("resources/models");

        // Relative path
        let resolved = MtlParser::resolve_texture_path(mtl_dir, "textures/diffuse.png");
        assert_eq!(resolved, PathBuf::from("resources/models/textures/diffuse.png"));

        #[cfg(unix)]
        {
            let resolved = MtlParser::resolve_texture_path(mtl_dir, "/textures/diffuse.png");
            assert_eq!(resolved, PathBuf::from("/textures/diffuse.png"));
        }
    }
}
