//! End-to-end loading tests
//!
//! Writes OBJ, MTL and PNG fixtures into a temporary directory and decodes
//! them through the public file-based entry points.

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use tempfile::{tempdir, TempDir};

    use crate::assets::{load_materials, load_model, load_model_with, DecodeError};
    use crate::config::{AssemblyStrategy, LoaderConfig};
    use crate::foundation::logging;
    use crate::foundation::math::{Vec2, Vec3};
    use crate::scene::{Brush, Color, MaterialLayer};

    const MTL: &str = "\
# two colors and a texture
newmtl Red
Ka 0.1 0.1 0.1
Kd 1 0 0
Ks 1 1 1
Ns 96

newmtl Blue
Kd 0 0 1

newmtl Stone
map_Kd textures/stone.png
Ke 0.5 0.5 0.5
";

    const OBJ: &str = "\
# board piece
mtllib pieces.mtl
o Board
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 1
vt 1 1
vt 1 0
vt 0 0
vn 0 0 2
usemtl Red
f 1/1/1 2/2/1 3/3/1 4/4/1
usemtl Blue
f 1//1 2//1 3//1
o Stone
v 0 0 1
v 1 0 1
v 0 1 1
usemtl Stone
f 1 2 3
o Nothing
usemtl Missing
f 1 2 3
";

    fn write_fixture(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn fixture() -> TempDir {
        logging::init_for_tests();
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), "board.obj", OBJ);
        write_fixture(dir.path(), "pieces.mtl", MTL);

        std::fs::create_dir(dir.path().join("textures")).unwrap();
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([90, 90, 90, 255]));
        img.save(dir.path().join("textures").join("stone.png")).unwrap();
        dir
    }

    #[test]
    fn test_load_full_model() {
        let dir = fixture();
        let scene = load_model(dir.path().join("board.obj")).unwrap().unwrap();

        // "Nothing" only has an unresolvable face and is dropped
        let names: Vec<_> = scene.objects().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec![Some("Board"), Some("Stone")]);

        let board = scene.object("Board").unwrap();
        assert_eq!(board.meshes().len(), 2);

        let red_mesh = &board.meshes()[0];
        let red = red_mesh.material().unwrap();
        assert_eq!(red.name(), "Red");
        assert_eq!(red.ambient(), Some(Color::new(25, 25, 25)));
        assert_eq!(red.diffuse(), Some(&Brush::Solid(Color::new(255, 0, 0))));
        assert_eq!(red.specular(), Some((&Brush::Solid(Color::WHITE), 96.0)));
        assert_eq!(red_mesh.triangle_count(), 2);
        assert_relative_eq!(red_mesh.tex_coords()[0], Vec2::new(0.0, 0.0));
        assert_relative_eq!(red_mesh.tex_coords()[2], Vec2::new(1.0, 1.0));
        assert_relative_eq!(red_mesh.normals()[3], Vec3::new(0.0, 0.0, 1.0));

        let blue_mesh = &board.meshes()[1];
        assert_eq!(blue_mesh.material().unwrap().name(), "Blue");
        assert_eq!(blue_mesh.tex_coords()[0], Vec2::zeros());
    }

    #[test]
    fn test_meshes_share_sealed_materials() {
        let dir = fixture();
        write_fixture(dir.path(), "twice.obj", "mtllib pieces.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Red\nf 1 2 3\nusemtl Blue\nf 1 2 3\nusemtl Red\nf 3 2 1\n");

        let scene = load_model(dir.path().join("twice.obj")).unwrap().unwrap();
        let meshes = scene.objects()[0].meshes();
        assert_eq!(meshes.len(), 3);
        assert!(Arc::ptr_eq(meshes[0].material().unwrap(), meshes[2].material().unwrap()));
    }

    #[test]
    fn test_texture_layer_is_decoded() {
        let dir = fixture();
        let scene = load_model(dir.path().join("board.obj")).unwrap().unwrap();

        let stone = scene.object("Stone").unwrap().meshes()[0].material().unwrap().clone();
        match &stone.layers()[0] {
            MaterialLayer::Diffuse(Brush::Image(brush)) => {
                assert_eq!(brush.path, dir.path().join("textures").join("stone.png"));
                let image = brush.image.as_ref().unwrap();
                assert_eq!((image.width, image.height), (4, 2));
                assert_eq!(image.pixel(3, 1), Some([90, 90, 90, 255]));
            }
            other => panic!("expected a textured diffuse layer, got {:?}", other),
        }
        assert_eq!(stone.emissive(), Some(&Brush::Solid(Color::new(127, 127, 127))));
    }

    #[test]
    fn test_unknown_material_binds_nothing() {
        let dir = fixture();
        write_fixture(dir.path(), "missing.obj", "mtllib pieces.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Missing\nf 1 2 3\n");

        let scene = load_model(dir.path().join("missing.obj")).unwrap().unwrap();
        assert!(scene.objects()[0].meshes()[0].material().is_none());
    }

    #[test]
    fn test_missing_files() {
        let dir = tempdir().unwrap();
        assert!(load_model(dir.path().join("absent.obj")).unwrap().is_none());
        assert!(load_materials(dir.path().join("absent.mtl")).unwrap().is_empty());
    }

    #[test]
    fn test_missing_material_library_is_not_an_error() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), "lonely.obj", "mtllib nowhere.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Red\nf 1 2 3\n");

        let scene = load_model(dir.path().join("lonely.obj")).unwrap().unwrap();
        assert_eq!(scene.triangle_count(), 1);
        assert!(scene.objects()[0].meshes()[0].material().is_none());
    }

    #[test]
    fn test_load_materials_directly() {
        let dir = fixture();
        let materials = load_materials(dir.path().join("pieces.mtl")).unwrap();
        assert_eq!(materials.len(), 3);
        assert!(materials.get("Blue").unwrap().specular().is_none());
    }

    #[test]
    fn test_per_face_strategy_from_file() {
        let dir = fixture();
        let config = LoaderConfig { assembly: AssemblyStrategy::PerFace, ..LoaderConfig::default() };
        let scene = load_model_with(dir.path().join("board.obj"), &config).unwrap().unwrap();

        let board = scene.object("Board").unwrap();
        assert_eq!(board.meshes().len(), 2);
        assert_eq!(board.meshes()[0].material().unwrap().name(), "Red");
        assert_eq!(board.meshes()[0].indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(board.meshes()[1].indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_crlf_and_invalid_utf8_are_tolerated() {
        let dir = tempdir().unwrap();
        let mut bytes = b"# caf\xe9\r\nv 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n".to_vec();
        bytes.extend_from_slice(b"o \xff\xfe\r\n");
        std::fs::write(dir.path().join("windows.obj"), bytes).unwrap();

        let scene = load_model(dir.path().join("windows.obj")).unwrap().unwrap();
        assert_eq!(scene.triangle_count(), 1);
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be read as a file
        let result = load_model(dir.path());
        assert!(matches!(result, Err(DecodeError::Io { .. })));
    }

    #[test]
    fn test_concurrent_loads_are_independent() {
        let dir = fixture();
        let path = dir.path().join("board.obj");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || load_model(path).unwrap().unwrap().triangle_count())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4);
        }
    }
}
