//! Canonical renderer model
//!
//! The aggregate produced by one export pass: an ordered list of n-gons
//! (grouped by source mesh), a material table and a texture table. Every
//! entity is built once and never mutated afterwards.

pub mod ngon;
pub mod material;
pub mod texture;

pub use ngon::{Ngon, NgonGroup, Normals, Vertex};
pub use material::{Color, Material, MaterialFlag};
pub use texture::Texture;

use thiserror::Error;

use crate::foundation::collections::KeyedTable;

/// Model invariant violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A material references a texture key missing from the texture table
    #[error("material '{material}' references unknown texture '{texture}'")]
    UnknownTexture {
        /// Material key
        material: String,
        /// Missing texture key
        texture: String,
    },

    /// An n-gon references a material key missing from the material table
    #[error("n-gon {index} of mesh '{mesh}' references unknown material '{material}'")]
    UnknownMaterial {
        /// Source mesh
        mesh: String,
        /// N-gon index within the mesh
        index: usize,
        /// Missing material key
        material: String,
    },

    /// An n-gon has fewer than three vertices
    #[error("n-gon {index} of mesh '{mesh}' has {count} vertices, at least 3 are required")]
    TooFewVertices {
        /// Source mesh
        mesh: String,
        /// N-gon index within the mesh
        index: usize,
        /// Vertex count found
        count: usize,
    },

    /// A smooth n-gon's normal count differs from its vertex count
    #[error("n-gon {index} of mesh '{mesh}' has {normals} normals for {vertices} vertices")]
    NormalCountMismatch {
        /// Source mesh
        mesh: String,
        /// N-gon index within the mesh
        index: usize,
        /// Vertex count
        vertices: usize,
        /// Normal count
        normals: usize,
    },
}

/// Entity counts of a model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    /// Exported mesh objects
    pub meshes: usize,
    /// N-gons across all meshes
    pub ngons: usize,
    /// Distinct material keys
    pub materials: usize,
    /// Distinct texture keys
    pub textures: usize,
}

/// The complete export model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    /// Texture key -> deferred-load descriptor
    pub textures: KeyedTable<Texture>,
    /// Material key -> resolved material
    pub materials: KeyedTable<Material>,
    /// N-gons grouped by source mesh, in scene order
    pub groups: Vec<NgonGroup>,
}

impl Model {
    /// Assemble a model from its three tables
    pub fn new(textures: KeyedTable<Texture>, materials: KeyedTable<Material>, groups: Vec<NgonGroup>) -> Self {
        Self { textures, materials, groups }
    }

    /// All n-gons in emission order
    pub fn ngons(&self) -> impl Iterator<Item = &Ngon> {
        self.groups.iter().flat_map(|group| group.ngons.iter())
    }

    /// Entity counts
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            meshes: self.groups.len(),
            ngons: self.groups.iter().map(|group| group.ngons.len()).sum(),
            materials: self.materials.len(),
            textures: self.textures.len(),
        }
    }

    /// Check referential integrity and n-gon shape invariants
    pub fn validate(&self) -> Result<(), ModelError> {
        for (key, material) in self.materials.iter() {
            if let Some(texture) = &material.texture {
                if !self.textures.contains_key(texture) {
                    return Err(ModelError::UnknownTexture {
                        material: key.to_string(),
                        texture: texture.clone(),
                    });
                }
            }
        }

        for group in &self.groups {
            for (index, ngon) in group.ngons.iter().enumerate() {
                if ngon.vertices.len() < 3 {
                    return Err(ModelError::TooFewVertices {
                        mesh: group.mesh_name.clone(),
                        index,
                        count: ngon.vertices.len(),
                    });
                }

                if let Normals::Smooth(normals) = &ngon.normals {
                    if normals.len() != ngon.vertices.len() {
                        return Err(ModelError::NormalCountMismatch {
                            mesh: group.mesh_name.clone(),
                            index,
                            vertices: ngon.vertices.len(),
                            normals: normals.len(),
                        });
                    }
                }

                if let Some(material) = &ngon.material {
                    if !self.materials.contains_key(material) {
                        return Err(ModelError::UnknownMaterial {
                            mesh: group.mesh_name.clone(),
                            index,
                            material: material.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
