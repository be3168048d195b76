//! # rngon_export
//!
//! Scene exporter for the retro n-gon renderer. Converts a host scene
//! (meshes, materials, textures) into a self-initializing JavaScript model
//! module the renderer can load.
//!
//! ## Pipeline
//!
//! - **Texture catalog**: bound images become deferred-load descriptors
//! - **Material resolution**: integer colors, texture references and whitelisted flags
//! - **Geometry emission**: polygons become n-gons in renderer axis order
//! - **Serialization**: the model is written as one JS module
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rngon_export::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scene = SceneLoader::load_from_file("scene.ron")?;
//!     let config = ExportConfig::new()
//!         .with_output_file("scene.rngon-model.js")
//!         .with_model_name("scene");
//!     let stats = rngon_export::export_scene(&scene, &config)?;
//!     println!("wrote {} n-gons", stats.ngons);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod model;
pub mod export;

use config::ExportConfig;
use export::{ExportError, ExportStats, Exporter};
use scene::Scene;

/// Export `scene` with `config` in a single pass
pub fn export_scene(scene: &Scene, config: &ExportConfig) -> Result<ExportStats, ExportError> {
    Exporter::new(config.clone())?.export(scene)
}

/// Common imports for exporter users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ExportConfig, RuntimeBindings},
        export::{ExportError, ExportStats, Exporter, ModelSerializer},
        model::{Model, ModelStats},
        scene::{
            Image, ObjectData, PropertyValue, Scene, SceneLoader, SceneMaterial, SceneMesh, SceneObject,
            ScenePolygon, SceneTexture, SceneVertex, TextureSlot, UvLayer,
        },
    };
}
