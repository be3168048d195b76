//! Host textures and their images

use serde::{Serialize, Deserialize};

/// A host texture datablock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneTexture {
    /// Texture name, referenced by material texture slots
    pub name: String,
    /// Bound image; textures without one are unused slots
    #[serde(default)]
    pub image: Option<Image>,
}

impl SceneTexture {
    /// Texture bound to an image of the given logical name
    pub fn with_image(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: Some(Image::new(image)),
        }
    }

    /// Texture with no image bound
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }
}

/// An image referenced by a texture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Logical identifier; becomes the texture key
    pub name: String,
}

impl Image {
    /// Image with the given logical name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
