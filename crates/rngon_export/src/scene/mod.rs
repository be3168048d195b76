//! Scene adapter records
//!
//! Plain, well-typed data describing a host scene that has already been
//! loaded: objects with their meshes, materials and textures. The host
//! adapter is responsible for producing these records (including any world
//! transform baking); the exporter only reads them.
//!
//! Every collection is an ordered `Vec`. The exporter never re-sorts, so the
//! adapter's ordering is the artifact's ordering.

pub mod mesh;
pub mod material;
pub mod texture;

pub use mesh::{SceneObject, ObjectData, SceneMesh, SceneVertex, ScenePolygon, UvLayer};
pub use material::{SceneMaterial, TextureSlot, PropertyValue};
pub use texture::{SceneTexture, Image};

use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;

use crate::config::ConfigFormat;

/// A complete host scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Scene objects in host iteration order
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    /// Material collection in host iteration order
    #[serde(default)]
    pub materials: Vec<SceneMaterial>,
    /// Texture collection in host iteration order
    #[serde(default)]
    pub textures: Vec<SceneTexture>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object
    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Add a material
    pub fn with_material(mut self, material: SceneMaterial) -> Self {
        self.materials.push(material);
        self
    }

    /// Add a texture
    pub fn with_texture(mut self, texture: SceneTexture) -> Self {
        self.textures.push(texture);
        self
    }

    /// Look up a texture by name (last match wins, like the host's own lookup tables)
    pub fn find_texture(&self, name: &str) -> Option<&SceneTexture> {
        self.textures.iter().rev().find(|texture| texture.name == name)
    }

    /// Visible mesh objects, in scene order
    pub fn renderable_meshes(&self) -> impl Iterator<Item = (&str, &SceneMesh)> {
        self.objects
            .iter()
            .filter_map(|object| object.renderable_mesh().map(|mesh| (object.name.as_str(), mesh)))
    }
}

/// Scene loading errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// IO error while reading the scene description
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The scene description could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported file format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Loads scene descriptions written by a host adapter to disk
pub struct SceneLoader;

impl SceneLoader {
    /// Load a scene from a `.ron` or `.toml` document
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .map_err(|_| SceneError::UnsupportedFormat(path.display().to_string()))?;

        log::debug!("Loading scene description from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let scene = Self::parse(&contents, format)?;

        log::info!(
            "Loaded scene {:?}: {} objects, {} materials, {} textures",
            path,
            scene.objects.len(),
            scene.materials.len(),
            scene.textures.len()
        );
        Ok(scene)
    }

    /// Parse a scene document
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Scene, SceneError> {
        match format {
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| SceneError::Parse(e.to_string())),
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| SceneError::Parse(e.to_string())),
        }
    }
}
