//! Scene inspection tool
//!
//! Decodes an OBJ file and prints its object groups, meshes and materials.
//!
//! Usage: scene_inspect <model.obj> [loader.toml|loader.ron]

use std::env;
use std::process::ExitCode;

use scene_decoder::foundation::logging;
use scene_decoder::prelude::*;

fn describe_brush(brush: &Brush) -> String {
    match brush {
        Brush::Solid(color) => format!("rgb({}, {}, {})", color.r, color.g, color.b),
        Brush::Image(image) => match &image.image {
            Some(data) => format!("image {:?} ({}x{})", image.path, data.width, data.height),
            None => format!("image {:?}", image.path),
        },
        Brush::Transparent => "transparent".to_string(),
    }
}

fn print_material(material: &Material) {
    if let Some(ambient) = material.ambient() {
        println!("      ambient  rgb({}, {}, {})", ambient.r, ambient.g, ambient.b);
    }
    for layer in material.layers() {
        match layer {
            MaterialLayer::Diffuse(brush) => println!("      diffuse  {}", describe_brush(brush)),
            MaterialLayer::Specular { brush, exponent } => {
                println!("      specular {} ^{}", describe_brush(brush), exponent);
            }
            MaterialLayer::Emissive(brush) => println!("      emissive {}", describe_brush(brush)),
        }
    }
}

fn print_scene(scene: &Scene) {
    println!(
        "{} object(s), {} mesh(es), {} triangle(s)",
        scene.objects().len(),
        scene.mesh_count(),
        scene.triangle_count()
    );

    for object in scene.objects() {
        println!("  object {}", object.name().unwrap_or("<unnamed>"));
        for (index, mesh) in object.meshes().iter().enumerate() {
            let material = mesh.material().map_or("<none>", |m| m.name());
            println!(
                "    mesh {}: {} vertices, {} triangles, material {}",
                index,
                mesh.vertex_count(),
                mesh.triangle_count(),
                material
            );
            if let Some(material) = mesh.material() {
                print_material(material);
            }
        }
    }
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        let program = args.first().map_or("scene_inspect", String::as_str);
        eprintln!("Usage: {} model.obj [loader.toml|loader.ron]", program);
        return ExitCode::FAILURE;
    }

    let config = match args.get(2) {
        Some(path) => match LoaderConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not read loader config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => LoaderConfig::default(),
    };
    log::debug!("Loader config: {:?}", config);

    match load_model_with(&args[1], &config) {
        Ok(Some(scene)) => {
            print_scene(&scene);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            log::error!("Model {} does not exist", args[1]);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("Failed to decode {}: {}", args[1], e);
            ExitCode::FAILURE
        }
    }
}
