//! Host materials and their custom properties

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

use crate::foundation::math::Vec3;

/// A host material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMaterial {
    /// Material name; becomes the material key
    pub name: String,
    /// Diffuse color, channels nominally in [0, 1]
    pub diffuse_color: Vec3,
    /// Diffuse intensity multiplier
    #[serde(default = "default_intensity")]
    pub diffuse_intensity: f32,
    /// Ordered texture slots; `None` is an unbound slot
    #[serde(default)]
    pub texture_slots: Vec<Option<TextureSlot>>,
    /// Named custom properties attached by the artist
    #[serde(default)]
    pub custom_properties: BTreeMap<String, PropertyValue>,
}

fn default_intensity() -> f32 {
    1.0
}

impl SceneMaterial {
    /// Create an untextured material with no custom properties
    pub fn new(name: impl Into<String>, diffuse_color: Vec3, diffuse_intensity: f32) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
            diffuse_intensity,
            texture_slots: Vec::new(),
            custom_properties: BTreeMap::new(),
        }
    }

    /// Bind a scene texture to the next texture slot
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture_slots.push(Some(TextureSlot { texture: texture.into() }));
        self
    }

    /// Attach a custom property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.custom_properties.insert(name.into(), value.into());
        self
    }

    /// The first texture slot, which is the only one the renderer uses
    pub fn first_texture_slot(&self) -> Option<&TextureSlot> {
        self.texture_slots.first().and_then(Option::as_ref)
    }
}

/// A bound texture slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSlot {
    /// Name of a texture in the scene's texture collection
    pub texture: String,
}

/// Untyped custom property value, copied through without inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// String
    Text(String),
    /// Array (e.g. color or vector properties)
    List(Vec<PropertyValue>),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}
