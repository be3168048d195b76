//! Mesh objects as handed over by the host adapter

use serde::{Serialize, Deserialize};

use crate::foundation::math::{self, Mat4, Vec2, Vec3};

/// A named object in the host scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name, used for mesh comments in the artifact
    pub name: String,
    /// Whether the object is visible in the host's current view
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// What kind of object this is
    pub data: ObjectData,
}

fn default_visible() -> bool {
    true
}

impl SceneObject {
    /// Create a visible mesh object
    pub fn mesh(name: impl Into<String>, mesh: SceneMesh) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: ObjectData::Mesh(mesh),
        }
    }

    /// The mesh payload, if this object is visible and renderable
    pub fn renderable_mesh(&self) -> Option<&SceneMesh> {
        match &self.data {
            ObjectData::Mesh(mesh) if self.visible => Some(mesh),
            _ => None,
        }
    }
}

/// Object payload by kind. Only meshes produce geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectData {
    /// Renderable polygon surface
    Mesh(SceneMesh),
    /// Camera
    Camera,
    /// Lamp or light source
    Light,
    /// Empty / locator
    Empty,
    /// Curve or text object (not converted)
    Curve,
    /// Any other host object type, by host type name
    Other(String),
}

/// Mesh data in mesh-local space
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneMesh {
    /// Vertex table
    pub vertices: Vec<SceneVertex>,
    /// Polygons referencing the vertex table
    pub polygons: Vec<ScenePolygon>,
    /// Mesh-local material slots; `None` is an empty slot
    #[serde(default)]
    pub material_slots: Vec<Option<String>>,
    /// Active UV layer, if the mesh has one
    #[serde(default)]
    pub uv_layer: Option<UvLayer>,
}

/// A vertex with its stored (smooth) normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneVertex {
    /// Position
    pub position: Vec3,
    /// Vertex normal
    pub normal: Vec3,
}

impl SceneVertex {
    /// Create a vertex
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// A polygon of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePolygon {
    /// Indices into the mesh vertex table, in winding order
    pub vertices: Vec<usize>,
    /// Loop indices, one per vertex; they key per-corner data such as UVs
    pub loops: Vec<usize>,
    /// Index into the mesh's material slots
    #[serde(default)]
    pub material_index: usize,
    /// Smooth shading flag (per-vertex normals)
    #[serde(default)]
    pub smooth: bool,
    /// Face normal
    pub normal: Vec3,
}

/// Per-loop UV coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvLayer {
    /// Layer name
    pub name: String,
    /// One UV per loop
    pub uvs: Vec<Vec2>,
}

impl SceneMesh {
    /// Copy of this mesh with a world transform baked in.
    ///
    /// Positions are transformed as points, vertex and face normals by the
    /// normal matrix and renormalized. The exporter itself never applies a
    /// world transform, so adapters that want world-space output call this
    /// before handing the scene over.
    pub fn baked(&self, world: &Mat4) -> Self {
        let normal_matrix = math::normal_matrix(world);

        let vertices = self
            .vertices
            .iter()
            .map(|vertex| SceneVertex {
                position: math::transform_point(world, &vertex.position),
                normal: math::transform_normal(&normal_matrix, &vertex.normal),
            })
            .collect();

        let polygons = self
            .polygons
            .iter()
            .map(|polygon| ScenePolygon {
                normal: math::transform_normal(&normal_matrix, &polygon.normal),
                ..polygon.clone()
            })
            .collect();

        Self {
            vertices,
            polygons,
            material_slots: self.material_slots.clone(),
            uv_layer: self.uv_layer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> SceneMesh {
        let up = Vec3::new(0.0, 0.0, 1.0);
        SceneMesh {
            vertices: vec![
                SceneVertex::new(Vec3::new(0.0, 0.0, 0.0), up),
                SceneVertex::new(Vec3::new(1.0, 0.0, 0.0), up),
                SceneVertex::new(Vec3::new(1.0, 1.0, 0.0), up),
                SceneVertex::new(Vec3::new(0.0, 1.0, 0.0), up),
            ],
            polygons: vec![ScenePolygon {
                vertices: vec![0, 1, 2, 3],
                loops: vec![0, 1, 2, 3],
                material_index: 0,
                smooth: false,
                normal: up,
            }],
            material_slots: vec![Some("Floor".to_string())],
            uv_layer: None,
        }
    }

    #[test]
    fn test_renderable_mesh_filters_hidden_and_non_mesh() {
        let visible = SceneObject::mesh("Quad", quad());
        assert!(visible.renderable_mesh().is_some());

        let hidden = SceneObject { visible: false, ..visible.clone() };
        assert!(hidden.renderable_mesh().is_none());

        let camera = SceneObject {
            name: "Camera".to_string(),
            visible: true,
            data: ObjectData::Camera,
        };
        assert!(camera.renderable_mesh().is_none());
    }

    #[test]
    fn test_baked_translates_positions_only() {
        let world = Mat4::new_translation(&Vec3::new(0.0, 0.0, 2.0));
        let baked = quad().baked(&world);

        assert_relative_eq!(baked.vertices[2].position, Vec3::new(1.0, 1.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(baked.vertices[2].normal, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(baked.polygons[0].normal, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_eq!(baked.polygons[0].vertices, vec![0, 1, 2, 3]);
        assert_eq!(baked.material_slots, vec![Some("Floor".to_string())]);
    }

    #[test]
    fn test_baked_rotation_turns_normals() {
        let world = Mat4::from_axis_angle(&Vec3::x_axis(), std::f32::consts::FRAC_PI_2);
        let baked = quad().baked(&world);

        // Rotating +Z by 90 degrees around X yields -Y.
        assert_relative_eq!(baked.polygons[0].normal, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(baked.vertices[3].position, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }
}
