//! # Export Pass
//!
//! Runs the single synchronous export: textures are cataloged, materials are
//! resolved against the catalog, geometry is emitted against the material
//! table, and the finished model is serialized to the output file.
//!
//! ```no_run
//! use rngon_export::config::ExportConfig;
//! use rngon_export::export::Exporter;
//! use rngon_export::scene::Scene;
//!
//! let config = ExportConfig::new().with_output_file("room.rngon-model.js");
//! let exporter = Exporter::new(config)?;
//! let stats = exporter.export(&Scene::new())?;
//! println!("{} n-gons", stats.ngons);
//! # Ok::<(), rngon_export::export::ExportError>(())
//! ```

pub mod texture_catalog;
pub mod material_resolver;
pub mod geometry_emitter;
pub mod serializer;


pub use texture_catalog::TextureCatalogBuilder;
pub use material_resolver::MaterialResolver;
pub use geometry_emitter::GeometryEmitter;
pub use serializer::ModelSerializer;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{ConfigError, ExportConfig};
use crate::model::{Model, ModelError};
use crate::scene::Scene;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// The output file could not be created, written or flushed
    #[error("failed to write '{path}': {source}")]
    Io {
        /// Output file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid export configuration
    #[error("invalid export configuration: {0}")]
    Config(#[from] ConfigError),

    /// A polygon does not fit its mesh's tables
    #[error("polygon {polygon} of mesh '{mesh}' is invalid: {reason}")]
    InvalidGeometry {
        /// Mesh object name
        mesh: String,
        /// Polygon index within the mesh
        polygon: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A material slot names a material the scene does not have
    #[error("mesh '{mesh}' uses material '{material}' which is not in the scene")]
    UnknownMaterial {
        /// Mesh object name
        mesh: String,
        /// Material name
        material: String,
    },

    /// A texture slot names a texture the scene does not have
    #[error("material '{material}' uses texture '{texture}' which is not in the scene")]
    UnknownTexture {
        /// Material name
        material: String,
        /// Texture name
        texture: String,
    },

    /// The built model violates a model invariant
    #[error("model validation failed: {0}")]
    Model(#[from] ModelError),
}

/// Summary of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStats {
    /// Artifact path
    pub output_file: PathBuf,
    /// Exported mesh objects
    pub meshes: usize,
    /// Emitted n-gons
    pub ngons: usize,
    /// Material table entries
    pub materials: usize,
    /// Texture table entries
    pub textures: usize,
}

/// Runs export passes with a fixed configuration
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter; fails if the configuration is invalid
    pub fn new(config: ExportConfig) -> Result<Self, ExportError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this exporter writes with
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build and validate the model for `scene` without writing anything
    pub fn build_model(&self, scene: &Scene) -> Result<Model, ExportError> {
        let textures = TextureCatalogBuilder::new(&self.config.texture_extension, &self.config.texture_path_prefix)
            .build(&scene.textures);
        let materials = MaterialResolver::new(scene).resolve(&scene.materials)?;
        let groups = GeometryEmitter::new(&materials).emit(scene)?;

        let model = Model::new(textures, materials, groups);
        model.validate()?;
        Ok(model)
    }

    /// Render the artifact for `scene` into a string
    pub fn render(&self, scene: &Scene) -> Result<String, ExportError> {
        let model = self.build_model(scene)?;
        Ok(ModelSerializer::new(&self.config).render(&model))
    }

    /// Export `scene` to the configured output file
    pub fn export(&self, scene: &Scene) -> Result<ExportStats, ExportError> {
        let model = self.build_model(scene)?;
        let path = &self.config.output_file;
        let io_error = |source| ExportError::Io { path: path.clone(), source };

        {
            let file = File::create(path).map_err(io_error)?;
            let mut writer = BufWriter::new(file);
            ModelSerializer::new(&self.config)
                .write(&model, &mut writer)
                .map_err(io_error)?;
            writer.flush().map_err(io_error)?;
        }

        let model_stats = model.stats();
        log::info!(
            "Exported '{}' to {}: {} meshes, {} n-gons, {} materials, {} textures",
            self.config.model_name,
            path.display(),
            model_stats.meshes,
            model_stats.ngons,
            model_stats.materials,
            model_stats.textures
        );

        Ok(ExportStats {
            output_file: path.clone(),
            meshes: model_stats.meshes,
            ngons: model_stats.ngons,
            materials: model_stats.materials,
            textures: model_stats.textures,
        })
    }
}
