//! Flat scene graph: geometry descriptors, mesh instances and lights
//!
//! Meshes reference geometry by id, so cloning a mesh shares its
//! geometry the same way the renderer shares the uploaded GPU buffers.

pub mod color;
pub mod light;

pub use color::Color;
pub use light::{Light, Lighting};

use crate::math::{Mat4, Vec3};

/// Shape parameters; tessellated on demand by `mesh::primitives`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Centered on the origin with its axis along Y
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Phong surface parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub shininess: f32,
}

impl Material {
    pub fn phong(color: Color) -> Self {
        Self { color, shininess: 30.0 }
    }
}

/// A renderable instance of a geometry
#[derive(Debug, Clone, PartialEq)]
pub struct MeshObject {
    pub geometry: GeometryId,
    pub material: Material,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Local-to-world transform used for drawing
    pub matrix: Mat4,
    /// When false, `matrix` is frozen and `position`/`rotation`/`scale` are ignored
    pub matrix_auto_update: bool,
}

impl MeshObject {
    pub fn new(geometry: GeometryId, material: Material) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            matrix: Mat4::identity(),
            matrix_auto_update: true,
        }
    }

    /// Pin the transform to `matrix` and stop recomputing it
    pub fn with_frozen_matrix(mut self, matrix: Mat4) -> Self {
        self.matrix = matrix;
        self.matrix_auto_update = false;
        self
    }

    pub fn update_matrix(&mut self) {
        self.matrix = Mat4::compose(self.position, self.rotation, self.scale);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    geometries: Vec<Geometry>,
    meshes: Vec<MeshObject>,
    lights: Vec<Light>,
    pub background: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
            ..Default::default()
        }
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    pub fn add_mesh(&mut self, mesh: MeshObject) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshObject> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut MeshObject> {
        self.meshes.get_mut(id.0)
    }

    pub fn meshes(&self) -> &[MeshObject] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn lighting(&self) -> Lighting {
        Lighting::from_lights(&self.lights)
    }

    /// Recompute matrices of meshes that opted into automatic updates
    pub fn update_matrix_world(&mut self) {
        for mesh in self.meshes.iter_mut().filter(|m| m.matrix_auto_update) {
            mesh.update_matrix();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Geometry {
        Geometry::Box { width: 1.0, height: 1.0, depth: 1.0 }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut scene = Scene::new();
        let g = scene.add_geometry(unit_box());
        let a = scene.add_mesh(MeshObject::new(g, Material::phong(Color::WHITE)));
        let b = scene.add_mesh(MeshObject::new(g, Material::phong(Color::WHITE)));
        assert_eq!(g, GeometryId(0));
        assert_eq!(a, MeshId(0));
        assert_eq!(b, MeshId(1));
        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(scene.geometry(g), Some(&unit_box()));
    }

    #[test]
    fn test_update_matrix_world_skips_frozen_meshes() {
        let mut scene = Scene::new();
        let g = scene.add_geometry(unit_box());
        let frozen_matrix = Mat4::translation(0.0, 5.0, 0.0);

        let live = scene.add_mesh(MeshObject::new(g, Material::phong(Color::WHITE)));
        let frozen = scene.add_mesh(
            MeshObject::new(g, Material::phong(Color::WHITE)).with_frozen_matrix(frozen_matrix),
        );

        for id in [live, frozen] {
            scene.mesh_mut(id).unwrap().position = Vec3::new(1.0, 0.0, 0.0);
        }
        scene.update_matrix_world();

        assert_eq!(scene.mesh(live).unwrap().matrix.transform_point(Vec3::ZERO), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(scene.mesh(frozen).unwrap().matrix, frozen_matrix);
        assert!(!scene.mesh(frozen).unwrap().matrix_auto_update);
    }

    #[test]
    fn test_cloned_mesh_shares_geometry() {
        let mut scene = Scene::new();
        let g = scene.add_geometry(unit_box());
        let original = MeshObject::new(g, Material::phong(Color::WHITE));
        let mut copy = original.clone();
        copy.material.color = Color::BLACK;

        assert_eq!(copy.geometry, original.geometry);
        assert_eq!(original.material.color, Color::WHITE);
    }
}
