//! Textured cube exporter
//!
//! Builds a fixed scene holding one textured cube and writes it as a
//! renderer model module. Settings come from `export.toml` or `export.ron`
//! in the working directory when either exists; defaults are used otherwise.

use rngon_export::foundation::logging;
use rngon_export::foundation::math::{Vec2, Vec3};
use rngon_export::prelude::*;
use std::path::Path;

const CONFIG_FILES: [&str; 2] = ["export.toml", "export.ron"];

/// Corners of a cube spanning -1..1 on every axis
const CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Faces as (corner indices counter-clockwise from outside, outward normal, material slot)
const FACES: [([usize; 4], [f32; 3], usize); 6] = [
    ([0, 3, 2, 1], [0.0, 0.0, -1.0], 1),
    ([4, 5, 6, 7], [0.0, 0.0, 1.0], 0),
    ([1, 2, 6, 5], [1.0, 0.0, 0.0], 0),
    ([0, 4, 7, 3], [-1.0, 0.0, 0.0], 0),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0], 0),
    ([3, 7, 6, 2], [0.0, 1.0, 0.0], 0),
];

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

fn cube_mesh() -> SceneMesh {
    let vertices = CORNERS
        .iter()
        .map(|&[x, y, z]| {
            let position = Vec3::new(x, y, z);
            SceneVertex::new(position, position.normalize())
        })
        .collect();

    let mut polygons = Vec::with_capacity(FACES.len());
    let mut uvs = Vec::with_capacity(FACES.len() * 4);

    for (corners, [nx, ny, nz], material_index) in FACES {
        let first_loop = uvs.len();
        uvs.extend(FACE_UVS.iter().map(|&[u, v]| Vec2::new(u, v)));
        polygons.push(ScenePolygon {
            vertices: corners.to_vec(),
            loops: (first_loop..first_loop + 4).collect(),
            material_index,
            smooth: false,
            normal: Vec3::new(nx, ny, nz),
        });
    }

    SceneMesh {
        vertices,
        polygons,
        material_slots: vec![Some("crate".to_string()), Some("painting".to_string())],
        uv_layer: Some(UvLayer { name: "UVMap".to_string(), uvs }),
    }
}

fn cube_scene() -> Scene {
    Scene::new()
        .with_object(SceneObject::mesh("Cube", cube_mesh()))
        .with_object(SceneObject {
            name: "Camera".to_string(),
            visible: true,
            data: ObjectData::Camera,
        })
        .with_material(
            SceneMaterial::new("crate", Vec3::new(1.0, 1.0, 1.0), 1.0)
                .with_texture("WoodTex")
                .with_property("textureMapping", "affine"),
        )
        .with_material(
            SceneMaterial::new("painting", Vec3::new(1.0, 1.0, 1.0), 1.0)
                .with_texture("PaintingTex")
                .with_property("textureMapping", "affine")
                .with_property("isTwoSided", true),
        )
        .with_texture(SceneTexture::with_image("WoodTex", "wood"))
        .with_texture(SceneTexture::with_image("PaintingTex", "painting"))
}

fn load_config() -> Result<ExportConfig, ConfigError> {
    for file in CONFIG_FILES {
        if Path::new(file).exists() {
            return ExportConfig::load_from_file(file);
        }
    }
    Ok(ExportConfig::new()
        .with_output_file("textured-cube.rngon-model.js")
        .with_model_name("texturedCubeModel")
        .with_export_binding(true))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    logging::init_with_level(&config.log_level);

    log::info!("Exporting textured cube to {}", config.output_file.display());

    let stats = rngon_export::export_scene(&cube_scene(), &config)?;
    println!(
        "{}: {} n-gons, {} materials, {} textures",
        stats.output_file.display(),
        stats.ngons,
        stats.materials,
        stats.textures
    );

    Ok(())
}
