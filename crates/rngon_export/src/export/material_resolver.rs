//! Material resolution
//!
//! Turns host materials into renderer material records: an integer color,
//! an optional texture key taken from the first texture slot, and the
//! whitelisted custom flags.

use super::ExportError;
use crate::foundation::collections::KeyedTable;
use crate::model::{Color, Material, MaterialFlag};
use crate::scene::{Scene, SceneMaterial};

/// Resolves the material table of a model
pub struct MaterialResolver<'a> {
    scene: &'a Scene,
}

impl<'a> MaterialResolver<'a> {
    /// Create a resolver that looks texture slots up in the scene's textures
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Resolve every material, keyed by material name.
    ///
    /// A repeated material name replaces the earlier record.
    pub fn resolve(&self, materials: &[SceneMaterial]) -> Result<KeyedTable<Material>, ExportError> {
        let mut table = KeyedTable::new();

        for scene_material in materials {
            let material = self.resolve_one(scene_material)?;
            if table.insert(scene_material.name.clone(), material).is_some() {
                log::warn!("Material name '{}' appears more than once; the last one wins", scene_material.name);
            }
        }

        Ok(table)
    }

    /// Resolve a single material record
    pub fn resolve_one(&self, scene_material: &SceneMaterial) -> Result<Material, ExportError> {
        let color = Color::from_diffuse(&scene_material.diffuse_color, scene_material.diffuse_intensity);
        let texture = self.texture_key(scene_material)?;

        let flags = MaterialFlag::ALL
            .into_iter()
            .filter_map(|flag| {
                scene_material
                    .custom_properties
                    .get(flag.property_name())
                    .map(|value| (flag, value.clone()))
            })
            .collect();

        Ok(Material { color, texture, flags })
    }

    /// Texture key of the material's first slot, if that slot leads to an image
    fn texture_key(&self, scene_material: &SceneMaterial) -> Result<Option<String>, ExportError> {
        let Some(slot) = scene_material.first_texture_slot() else {
            log::debug!("Material '{}' is untextured", scene_material.name);
            return Ok(None);
        };

        let texture = self
            .scene
            .find_texture(&slot.texture)
            .ok_or_else(|| ExportError::UnknownTexture {
                material: scene_material.name.clone(),
                texture: slot.texture.clone(),
            })?;

        match &texture.image {
            Some(image) => Ok(Some(image.name.clone())),
            None => {
                log::debug!(
                    "Material '{}' uses texture '{}' which has no image; exporting untextured",
                    scene_material.name,
                    texture.name
                );
                Ok(None)
            }
        }
    }
}
