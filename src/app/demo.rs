use crate::config::DemoConfig;
use crate::fractal::{BranchGenerator, TreeMeshes};
use crate::scene::{Geometry, Material, MeshId, MeshObject, Scene};

/// Scene content of one demo
pub trait Demo {
    /// Populate the scene once at startup
    fn build(&mut self, scene: &mut Scene, config: &DemoConfig);

    /// Per-frame hook, `seconds` since the page started
    fn update(&mut self, scene: &mut Scene, seconds: f32);

    fn uses_orbit_controls(&self) -> bool {
        false
    }
}

/// A single box spinning about X and Y
#[derive(Debug, Default)]
pub struct CubeDemo {
    cube: Option<MeshId>,
    rotation_speed: f32,
}

impl CubeDemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cube(&self) -> Option<MeshId> {
        self.cube
    }
}

impl Demo for CubeDemo {
    fn build(&mut self, scene: &mut Scene, config: &DemoConfig) {
        let size = config.cube.size;
        let geometry = scene.add_geometry(Geometry::Box {
            width: size,
            height: size,
            depth: size,
        });

        self.rotation_speed = config.cube.rotation_speed;
        self.cube = Some(scene.add_mesh(MeshObject::new(geometry, Material::phong(config.cube.color))));
    }

    fn update(&mut self, scene: &mut Scene, seconds: f32) {
        let angle = seconds * self.rotation_speed;
        if let Some(cube) = self.cube.and_then(|id| scene.mesh_mut(id)) {
            cube.rotation.x = angle;
            cube.rotation.y = angle;
        }
    }
}

/// Trunk plus recursively placed branches, explored with orbit controls
#[derive(Debug, Default)]
pub struct FractalTreeDemo {
    tree: Option<TreeMeshes>,
}

impl FractalTreeDemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> Option<&TreeMeshes> {
        self.tree.as_ref()
    }
}

impl Demo for FractalTreeDemo {
    fn build(&mut self, scene: &mut Scene, config: &DemoConfig) {
        let generator = BranchGenerator::new(config.tree.trunk, config.tree.branches);
        let tree = generator.build_tree(scene, config.tree.trunk_color);

        crate::console_log!(
            "Fractal tree: {} levels, {} branches",
            config.tree.branches.levels,
            tree.branches.len()
        );
        self.tree = Some(tree);
    }

    // Branch matrices are frozen; only the camera moves
    fn update(&mut self, _scene: &mut Scene, _seconds: f32) {}

    fn uses_orbit_controls(&self) -> bool {
        true
    }
}
