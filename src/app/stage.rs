use crate::camera::PerspectiveCamera;
use crate::config::DemoConfig;
use crate::controls::OrbitControls;
use crate::scene::Scene;
use super::demo::Demo;

/// Scene, camera and demo logic, independent of the browser
pub struct Stage<D: Demo> {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: Option<OrbitControls>,
    pub demo: D,
}

impl<D: Demo> Stage<D> {
    /// Set up camera, lights and demo content for a `width` x `height` viewport
    pub fn new(mut demo: D, config: &DemoConfig, width: u32, height: u32) -> Self {
        let cam = &config.camera;
        let mut camera = PerspectiveCamera::new(cam.fov, 1.0, cam.near, cam.far);
        camera.position = cam.position;
        camera.target = cam.target;
        camera.set_viewport_size(width, height);

        let mut scene = Scene::new();
        scene.background = config.background;
        scene.add_light(config.directional.directional_light());
        if let Some(ambient) = &config.ambient {
            scene.add_light(ambient.ambient_light());
        }

        demo.build(&mut scene, config);
        scene.update_matrix_world();

        let controls = demo
            .uses_orbit_controls()
            .then(|| OrbitControls::from_camera(&camera));

        Self {
            scene,
            camera,
            controls,
            demo,
        }
    }

    /// Match the camera to a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.camera.set_viewport_size(width, height)
    }

    /// Run the demo's update hook for a host timestamp in milliseconds
    pub fn advance(&mut self, time_ms: f64) {
        let seconds = (time_ms * 0.001) as f32;
        self.demo.update(&mut self.scene, seconds);
        self.scene.update_matrix_world();
    }

    /// Mutate the orbit controls, then move the camera to match.
    /// Returns false when the demo has no controls.
    pub fn control(&mut self, f: impl FnOnce(&mut OrbitControls)) -> bool {
        match self.controls.as_mut() {
            Some(controls) => {
                f(controls);
                controls.apply(&mut self.camera);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::animation::{FrameLoop, ManualScheduler};
    use crate::app::demo::{CubeDemo, FractalTreeDemo};
    use crate::fractal::branch_count;
    use crate::math::Vec3;

    #[test]
    fn test_cube_stage_setup() {
        let stage = Stage::new(CubeDemo::new(), &DemoConfig::cube(), 800, 600);

        assert_eq!(stage.scene.mesh_count(), 1);
        assert_eq!(stage.scene.lights().len(), 1);
        assert!((stage.camera.aspect - 800.0 / 600.0).abs() < 0.0001);
        assert_eq!(stage.camera.position, Vec3::new(0.0, 0.0, 2.0));
        assert!(stage.controls.is_none());
    }

    #[test]
    fn test_cube_rotation_follows_time() {
        let mut stage = Stage::new(CubeDemo::new(), &DemoConfig::cube(), 800, 600);
        stage.advance(1500.0);

        let id = stage.demo.cube().unwrap();
        let cube = stage.scene.mesh(id).unwrap();
        assert!((cube.rotation.x - 1.5).abs() < 0.0001);
        assert!((cube.rotation.y - 1.5).abs() < 0.0001);
        assert_eq!(cube.rotation.z, 0.0);

        // Matrix is recomputed from the new rotation
        let expected = crate::math::Mat4::compose(Vec3::ZERO, cube.rotation, Vec3::ONE);
        assert!(cube.matrix.approx_eq(&expected, 1e-6));
    }

    #[test]
    fn test_tree_stage_setup() {
        let config = DemoConfig::fractal_tree();
        let stage = Stage::new(FractalTreeDemo::new(), &config, 1024, 768);

        let levels = config.tree.branches.levels;
        assert_eq!(stage.scene.mesh_count(), branch_count(levels) + 1);
        assert_eq!(stage.demo.tree().unwrap().branches.len(), 126);
        assert_eq!(stage.scene.lights().len(), 2);
        assert!(stage.controls.is_some());
    }

    #[test]
    fn test_tree_update_leaves_branches_untouched() {
        let mut stage = Stage::new(FractalTreeDemo::new(), &DemoConfig::fractal_tree(), 640, 480);
        let before: Vec<_> = stage.scene.meshes().iter().map(|m| m.matrix).collect();
        stage.advance(12_345.0);
        let after: Vec<_> = stage.scene.meshes().iter().map(|m| m.matrix).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_resize_recomputes_aspect() {
        let mut stage = Stage::new(CubeDemo::new(), &DemoConfig::cube(), 800, 600);
        assert!(stage.resize(300, 600));
        assert!((stage.camera.aspect - 0.5).abs() < 0.0001);
        assert!(!stage.resize(300, 0));
        assert!((stage.camera.aspect - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_controls_move_camera() {
        let mut stage = Stage::new(FractalTreeDemo::new(), &DemoConfig::fractal_tree(), 800, 600);
        let before = stage.camera.position;
        assert!(stage.control(|c| c.rotate(100.0, 0.0)));
        assert!(stage.camera.position.distance(&before) > 0.01);

        let mut cube = Stage::new(CubeDemo::new(), &DemoConfig::cube(), 800, 600);
        assert!(!cube.control(|c| c.rotate(100.0, 0.0)));
    }

    #[test]
    fn test_frame_loop_drives_stage() {
        let stage = Rc::new(RefCell::new(Stage::new(CubeDemo::new(), &DemoConfig::cube(), 800, 600)));
        let scheduler = Rc::new(ManualScheduler::new());

        let ticking = stage.clone();
        let frame_loop = FrameLoop::start(scheduler.clone(), move |t| {
            ticking.borrow_mut().advance(t);
            Ok(())
        })
        .unwrap();

        assert_eq!(scheduler.run(4, 1000.0, 500.0), 4);
        frame_loop.stop();
        scheduler.run(4, 3000.0, 500.0);

        let stage = stage.borrow();
        let cube = stage.scene.mesh(stage.demo.cube().unwrap()).unwrap();
        // Last frame ran at 2500 ms
        assert!((cube.rotation.x - 2.5).abs() < 0.0001);
        assert_eq!(frame_loop.frame_count(), 4);
    }
}
