//! Texture catalog construction
//!
//! Enumerates the scene's textures and records, for each bound image, a
//! deferred-load descriptor keyed by the image's logical name.

use crate::foundation::collections::KeyedTable;
use crate::model::Texture;
use crate::scene::SceneTexture;

/// Builds the texture table of a model
pub struct TextureCatalogBuilder<'a> {
    extension: &'a str,
    path_prefix: &'a str,
}

impl<'a> TextureCatalogBuilder<'a> {
    /// Create a builder producing `<path_prefix><image>.<extension>` paths
    pub fn new(extension: &'a str, path_prefix: &'a str) -> Self {
        Self { extension, path_prefix }
    }

    /// Build the catalog from the scene's texture collection.
    ///
    /// Textures without an image are skipped. Two images with the same name
    /// produce one entry; the later one wins.
    pub fn build(&self, textures: &[SceneTexture]) -> KeyedTable<Texture> {
        let mut catalog = KeyedTable::new();

        for texture in textures {
            let Some(image) = &texture.image else {
                log::debug!("Texture '{}' has no image, skipping", texture.name);
                continue;
            };

            let descriptor = Texture::deferred(&image.name, self.path_prefix, self.extension);
            if catalog.insert(image.name.clone(), descriptor).is_some() {
                log::warn!(
                    "Image name '{}' is used by more than one texture; texture '{}' replaces the earlier entry",
                    image.name,
                    texture.name
                );
            }
        }

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_image_names() {
        let textures = vec![
            SceneTexture::with_image("WoodTex", "wood"),
            SceneTexture::with_image("PaintingTex", "painting"),
        ];
        let catalog = TextureCatalogBuilder::new("rngon-texture.json", "").build(&textures);

        let keys: Vec<&str> = catalog.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["wood", "painting"]);
        assert_eq!(catalog.get("wood").unwrap().path, "wood.rngon-texture.json");
    }

    #[test]
    fn test_skips_textures_without_image() {
        let textures = vec![
            SceneTexture::unbound("Clouds"),
            SceneTexture::with_image("Ground", "ground"),
        ];
        let catalog = TextureCatalogBuilder::new("rngon-texture.json", "").build(&textures);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains_key("ground"));
    }

    #[test]
    fn test_shared_image_name_leaves_one_entry() {
        let textures = vec![
            SceneTexture::with_image("First", "shrub"),
            SceneTexture::with_image("Second", "shrub"),
        ];
        let catalog = TextureCatalogBuilder::new("json", "textures/").build(&textures);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("shrub").unwrap().path, "textures/shrub.json");
    }

    #[test]
    fn test_empty_collection() {
        let catalog = TextureCatalogBuilder::new("json", "").build(&[]);
        assert!(catalog.is_empty());
    }
}
