use std::f32::consts::FRAC_PI_2;

use crate::camera::PerspectiveCamera;
use crate::math::Vec3;

/// Which drag gesture is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

impl DragMode {
    /// Map a DOM mouse button (0 = primary, 2 = secondary) to a gesture
    pub fn from_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(DragMode::Rotate),
            1 | 2 => Some(DragMode::Pan),
            _ => None,
        }
    }
}

/// Orbit camera: rotates around a target, dollies in and out, pans the target
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub distance: f32,
    /// Angle around the vertical axis (radians)
    pub azimuth: f32,
    /// Angle above the horizontal plane (radians)
    pub elevation: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    drag: Option<(DragMode, f32, f32)>,
}

const ELEVATION_LIMIT: f32 = FRAC_PI_2 - 0.1;

impl OrbitControls {
    /// Derive orbit angles from the camera's current position and target
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(f32::EPSILON);

        Self {
            target: camera.target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            elevation: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            rotate_speed: 0.01,
            zoom_speed: 0.1,
            pan_speed: 0.005,
            min_distance: (distance * 0.25).min(1.0),
            max_distance: (distance * 4.0).max(50.0),
            drag: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.target + Vec3::from_spherical(self.distance, self.azimuth, self.elevation)
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.azimuth -= delta_x * self.rotate_speed;
        self.elevation = (self.elevation + delta_y * self.rotate_speed)
            .clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// Positive `steps` move away from the target
    pub fn dolly(&mut self, steps: f32) {
        let factor = (1.0 + self.zoom_speed).powf(steps);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Pan in camera-relative space
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = Vec3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        let scale = self.pan_speed * self.distance;

        self.target = self.target + right.scale(-delta_x * scale) + Vec3::UP.scale(delta_y * scale);
    }

    pub fn pointer_down(&mut self, button: i16, x: f32, y: f32) {
        self.drag = DragMode::from_button(button).map(|mode| (mode, x, y));
    }

    /// Returns true when the move changed the view
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some((mode, last_x, last_y)) = self.drag else {
            return false;
        };

        let (dx, dy) = (x - last_x, y - last_y);
        match mode {
            DragMode::Rotate => self.rotate(dx, dy),
            DragMode::Pan => self.pan(dx, dy),
        }
        self.drag = Some((mode, x, y));
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y != 0.0 {
            self.dolly(delta_y.signum() as f32);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Write the orbit position into the camera
    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}
