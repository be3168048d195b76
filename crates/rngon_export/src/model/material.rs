//! Resolved renderer materials

use crate::foundation::math::Vec3;
use crate::scene::PropertyValue;

/// Integer RGB color as the renderer's color constructor receives it.
///
/// Channels are not clamped: values outside [0, 255] are kept as-is because
/// the renderer's color type tolerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: i64,
    /// Green
    pub g: i64,
    /// Blue
    pub b: i64,
}

impl Color {
    /// Create a color from integer channels
    pub fn new(r: i64, g: i64, b: i64) -> Self {
        Self { r, g, b }
    }

    /// Derive a color from a diffuse color and intensity.
    ///
    /// Each channel is `channel * 255 * intensity`, computed in double
    /// precision and truncated toward zero. NaN becomes 0 and infinities
    /// saturate.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_diffuse(diffuse: &Vec3, intensity: f32) -> Self {
        let channel = |value: f32| (f64::from(value) * 255.0 * f64::from(intensity)) as i64;
        Self::new(channel(diffuse.x), channel(diffuse.y), channel(diffuse.z))
    }
}

/// Renderer material flags that may be copied from custom properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialFlag {
    /// `textureMapping` ("ortho", "affine")
    TextureMapping,
    /// `uvWrapping` ("repeat", "clamp")
    UvWrapping,
    /// `vertexShading` ("none", "lambertian", "gouraud")
    VertexShading,
    /// `renderVertexShade`
    RenderVertexShade,
    /// `ambientLightLevel`
    AmbientLightLevel,
    /// `hasWireframe`
    HasWireframe,
    /// `isTwoSided`
    IsTwoSided,
    /// `isInScreenSpace`
    IsInScreenSpace,
}

impl MaterialFlag {
    /// Every whitelisted flag, in emission order
    pub const ALL: [Self; 8] = [
        Self::TextureMapping,
        Self::UvWrapping,
        Self::VertexShading,
        Self::RenderVertexShade,
        Self::AmbientLightLevel,
        Self::HasWireframe,
        Self::IsTwoSided,
        Self::IsInScreenSpace,
    ];

    /// Property name, identical on the host material and in the artifact
    pub fn property_name(self) -> &'static str {
        match self {
            Self::TextureMapping => "textureMapping",
            Self::UvWrapping => "uvWrapping",
            Self::VertexShading => "vertexShading",
            Self::RenderVertexShade => "renderVertexShade",
            Self::AmbientLightLevel => "ambientLightLevel",
            Self::HasWireframe => "hasWireframe",
            Self::IsTwoSided => "isTwoSided",
            Self::IsInScreenSpace => "isInScreenSpace",
        }
    }
}

/// A resolved material record
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Texture key, absent for untextured materials
    pub texture: Option<String>,
    /// Flags present on the host material, in whitelist order
    pub flags: Vec<(MaterialFlag, PropertyValue)>,
}

impl Material {
    /// Untextured material without flags
    pub fn new(color: Color) -> Self {
        Self {
            color,
            texture: None,
            flags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_truncates_toward_zero() {
        let color = Color::from_diffuse(&Vec3::new(0.5, 0.999, 0.0), 1.0);
        // 127.5 -> 127, 254.745 -> 254
        assert_eq!(color, Color::new(127, 254, 0));
    }

    #[test]
    fn test_color_is_not_clamped() {
        let bright = Color::from_diffuse(&Vec3::new(1.0, 0.5, 0.0), 2.0);
        assert_eq!(bright, Color::new(510, 255, 0));

        let negative = Color::from_diffuse(&Vec3::new(-0.5, 0.0, 1.0), 1.0);
        // -127.5 truncates toward zero, not down
        assert_eq!(negative, Color::new(-127, 0, 255));
    }

    #[test]
    fn test_color_matches_double_precision() {
        // 0.8f32 is slightly above 0.8, so the product is just above 204.
        let color = Color::from_diffuse(&Vec3::new(0.8, 0.8, 0.8), 1.0);
        assert_eq!(color, Color::new(204, 204, 204));
    }
}
