//! Geometry emission
//!
//! Walks the visible meshes of a scene and converts every polygon into a
//! renderer n-gon: positions and normals move to the renderer's axis order,
//! UVs are attached per loop when the mesh has an active UV layer, and the
//! polygon's material slot is resolved to a material key.
//!
//! Positions are taken in mesh-local space. World transforms are expected to
//! be baked by the adapter (see [`SceneMesh::baked`]).

use super::ExportError;
use crate::foundation::collections::KeyedTable;
use crate::foundation::math::{to_renderer_axes, Vec2};
use crate::model::{Material, Ngon, NgonGroup, Normals, Vertex};
use crate::scene::{Scene, SceneMesh, ScenePolygon};

/// Emits the n-gon list of a model
pub struct GeometryEmitter<'a> {
    materials: &'a KeyedTable<Material>,
}

impl<'a> GeometryEmitter<'a> {
    /// Create an emitter resolving material slots against `materials`
    pub fn new(materials: &'a KeyedTable<Material>) -> Self {
        Self { materials }
    }

    /// Emit one group per visible mesh object, in scene order
    pub fn emit(&self, scene: &Scene) -> Result<Vec<NgonGroup>, ExportError> {
        scene
            .renderable_meshes()
            .map(|(name, mesh)| self.emit_mesh(name, mesh))
            .collect()
    }

    /// Emit the n-gons of a single mesh, in polygon order
    pub fn emit_mesh(&self, mesh_name: &str, mesh: &SceneMesh) -> Result<NgonGroup, ExportError> {
        let ngons = mesh
            .polygons
            .iter()
            .enumerate()
            .map(|(index, polygon)| self.emit_polygon(mesh_name, mesh, index, polygon))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Mesh '{}': {} n-gons", mesh_name, ngons.len());

        Ok(NgonGroup {
            mesh_name: mesh_name.to_string(),
            ngons,
        })
    }

    fn emit_polygon(
        &self,
        mesh_name: &str,
        mesh: &SceneMesh,
        index: usize,
        polygon: &ScenePolygon,
    ) -> Result<Ngon, ExportError> {
        let invalid = |reason: String| ExportError::InvalidGeometry {
            mesh: mesh_name.to_string(),
            polygon: index,
            reason,
        };

        if polygon.vertices.len() < 3 {
            return Err(invalid(format!("{} vertices, at least 3 are required", polygon.vertices.len())));
        }

        let uvs = match &mesh.uv_layer {
            Some(layer) => {
                if polygon.loops.len() != polygon.vertices.len() {
                    return Err(invalid(format!(
                        "{} loop indices for {} vertices",
                        polygon.loops.len(),
                        polygon.vertices.len()
                    )));
                }
                Some(&layer.uvs)
            }
            None => None,
        };

        let mut vertices = Vec::with_capacity(polygon.vertices.len());
        let mut vertex_normals = Vec::with_capacity(polygon.vertices.len());

        for (corner, &vertex_index) in polygon.vertices.iter().enumerate() {
            let source = mesh
                .vertices
                .get(vertex_index)
                .ok_or_else(|| invalid(format!("vertex index {vertex_index} is out of range")))?;

            let position = to_renderer_axes(&source.position);
            let vertex = match uvs {
                Some(uvs) => {
                    let loop_index = polygon.loops[corner];
                    let uv: &Vec2 = uvs
                        .get(loop_index)
                        .ok_or_else(|| invalid(format!("loop index {loop_index} has no UV")))?;
                    Vertex::with_uv(position, *uv)
                }
                None => Vertex::new(position),
            };

            vertices.push(vertex);
            if polygon.smooth {
                vertex_normals.push(to_renderer_axes(&source.normal));
            }
        }

        let normals = if polygon.smooth {
            Normals::Smooth(vertex_normals)
        } else {
            Normals::Flat(to_renderer_axes(&polygon.normal))
        };

        Ok(Ngon {
            vertices,
            material: self.material_key(mesh_name, mesh, polygon)?,
            normals,
        })
    }

    /// Material key bound to the polygon's slot, if any
    fn material_key(
        &self,
        mesh_name: &str,
        mesh: &SceneMesh,
        polygon: &ScenePolygon,
    ) -> Result<Option<String>, ExportError> {
        if mesh.material_slots.is_empty() {
            return Ok(None);
        }

        let Some(slot) = mesh.material_slots.get(polygon.material_index) else {
            log::warn!(
                "Mesh '{}' has no material slot {} ({} slots); using the default material",
                mesh_name,
                polygon.material_index,
                mesh.material_slots.len()
            );
            return Ok(None);
        };

        match slot {
            Some(name) if self.materials.contains_key(name) => Ok(Some(name.clone())),
            Some(name) => Err(ExportError::UnknownMaterial {
                mesh: mesh_name.to_string(),
                material: name.clone(),
            }),
            None => Ok(None),
        }
    }
}
