//! N-gons, vertices and normals in renderer space

use crate::foundation::math::{Vec2, Vec3};

/// A vertex in renderer axis order, optionally carrying a UV pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position `(x, z, y)` of the host vertex
    pub position: Vec3,
    /// Texture coordinates
    pub uv: Option<Vec2>,
}

impl Vertex {
    /// Vertex without texture coordinates
    pub fn new(position: Vec3) -> Self {
        Self { position, uv: None }
    }

    /// Vertex with texture coordinates
    pub fn with_uv(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv: Some(uv) }
    }
}

/// Either one face normal or one normal per vertex, never both
#[derive(Debug, Clone, PartialEq)]
pub enum Normals {
    /// Flat shading: a single aggregate normal
    Flat(Vec3),
    /// Smooth shading: one normal per vertex, in vertex order
    Smooth(Vec<Vec3>),
}

impl Normals {
    /// Number of normal vectors carried
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(_) => 1,
            Self::Smooth(normals) => normals.len(),
        }
    }

    /// Whether no normals are carried (only possible for an empty smooth list)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single renderer n-gon
#[derive(Debug, Clone, PartialEq)]
pub struct Ngon {
    /// Vertices in source winding order
    pub vertices: Vec<Vertex>,
    /// Material key; `None` lets the renderer apply its default material
    pub material: Option<String>,
    /// Shading normals
    pub normals: Normals,
}

/// The n-gons produced from one mesh object
#[derive(Debug, Clone, PartialEq)]
pub struct NgonGroup {
    /// Name of the source object
    pub mesh_name: String,
    /// N-gons in polygon order
    pub ngons: Vec<Ngon>,
}
