//! Demo configuration, loadable from YAML
//!
//! Each demo starts from its reference defaults; a YAML document only
//! needs the keys it wants to override:
//!
//! ```yaml
//! camera:
//!   fov: 60
//! tree:
//!   branches:
//!     levels: 4
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::fractal::{BranchParams, TrunkTemplate};
use crate::math::Vec3;
use crate::scene::{Color, Light};

/// Deepest tree accepted from configuration (2^17 - 2 branches)
pub const MAX_TREE_LEVELS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub color: Color,
    pub intensity: f32,
    /// Only used by directional lights; they shine toward the origin
    pub position: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::ZERO,
        }
    }
}

impl LightConfig {
    pub fn directional_light(&self) -> Light {
        Light::directional(self.color, self.intensity, self.position)
    }

    pub fn ambient_light(&self) -> Light {
        Light::ambient(self.color, self.intensity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    pub size: f32,
    pub color: Color,
    /// Radians per second about both X and Y
    pub rotation_speed: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            color: Color::from_hex(0x44a88),
            rotation_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub trunk: TrunkTemplate,
    pub trunk_color: Color,
    pub branches: BranchParams,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            trunk: TrunkTemplate::default(),
            trunk_color: Color::from_hex(0x5c3317),
            branches: BranchParams::default(),
        }
    }
}

/// Everything a demo needs to set up its scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// CSS selector of the element the canvas is appended to
    pub container: String,
    pub antialias: bool,
    pub background: Color,
    pub camera: CameraConfig,
    pub directional: LightConfig,
    pub ambient: Option<LightConfig>,
    pub cube: CubeConfig,
    pub tree: TreeConfig,
}

impl DemoConfig {
    /// Reference setup of the rotating cube viewer
    pub fn cube() -> Self {
        Self {
            container: "#app".to_string(),
            antialias: true,
            background: Color::BLACK,
            camera: CameraConfig::default(),
            directional: LightConfig {
                color: Color::WHITE,
                intensity: 1.0,
                position: Vec3::new(-1.0, 2.0, 4.0),
            },
            ambient: None,
            cube: CubeConfig::default(),
            tree: TreeConfig::default(),
        }
    }

    /// Reference setup of the fractal tree viewer
    pub fn fractal_tree() -> Self {
        Self {
            camera: CameraConfig {
                position: Vec3::new(0.0, 1.5, 6.0),
                target: Vec3::new(0.0, 1.5, 0.0),
                ..CameraConfig::default()
            },
            ambient: Some(LightConfig {
                color: Color::WHITE,
                intensity: 0.4,
                position: Vec3::ZERO,
            }),
            ..Self::cube()
        }
    }

    /// Overlay a YAML document on `base` and validate the result
    pub fn from_yaml(yaml: &str, base: DemoConfig) -> Result<Self, String> {
        let overlay: Value = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;

        let mut merged = serde_yaml::to_value(&base)
            .map_err(|e| format!("Config serialization error: {}", e))?;
        if !overlay.is_null() {
            merge_values(&mut merged, overlay);
        }

        let config: DemoConfig = serde_yaml::from_value(merged)
            .map_err(|e| format!("Invalid config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.container.trim().is_empty() {
            return Err("container selector must not be empty".to_string());
        }

        let cam = &self.camera;
        if !(cam.fov > 0.0 && cam.fov < 180.0) {
            return Err(format!("camera.fov must be in (0, 180), got {}", cam.fov));
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            return Err(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                cam.near, cam.far
            ));
        }

        if self.directional.intensity < 0.0 {
            return Err("directional.intensity must not be negative".to_string());
        }
        if let Some(ambient) = &self.ambient {
            if ambient.intensity < 0.0 {
                return Err("ambient.intensity must not be negative".to_string());
            }
        }

        if self.cube.size <= 0.0 {
            return Err(format!("cube.size must be positive, got {}", self.cube.size));
        }

        let trunk = &self.tree.trunk;
        if trunk.height <= 0.0 || trunk.radius_top < 0.0 || trunk.radius_bottom < 0.0 {
            return Err("tree.trunk dimensions must be positive".to_string());
        }
        if trunk.radial_segments < 3 {
            return Err(format!(
                "tree.trunk.radial_segments must be at least 3, got {}",
                trunk.radial_segments
            ));
        }

        let branches = &self.tree.branches;
        if branches.levels > MAX_TREE_LEVELS {
            return Err(format!(
                "tree.branches.levels must be at most {}, got {}",
                MAX_TREE_LEVELS, branches.levels
            ));
        }
        if branches.scale <= 0.0 {
            return Err(format!("tree.branches.scale must be positive, got {}", branches.scale));
        }

        Ok(())
    }
}

/// Recursively replace `base` entries with `overlay` ones; mappings merge key by key
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults_are_valid() {
        assert!(DemoConfig::cube().validate().is_ok());
        assert!(DemoConfig::fractal_tree().validate().is_ok());
        assert!(DemoConfig::cube().ambient.is_none());
        assert!(DemoConfig::fractal_tree().ambient.is_some());
    }

    #[test]
    fn test_empty_yaml_keeps_base() {
        let config = DemoConfig::from_yaml("", DemoConfig::fractal_tree()).unwrap();
        assert_eq!(config, DemoConfig::fractal_tree());
    }

    #[test]
    fn test_partial_override() {
        let yaml = r##"
container: "#tree"
camera:
  fov: 60
tree:
  trunk_color: "#000000"
  branches:
    levels: 3
"##;
        let config = DemoConfig::from_yaml(yaml, DemoConfig::fractal_tree()).unwrap();

        assert_eq!(config.container, "#tree");
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.position, DemoConfig::fractal_tree().camera.position);
        assert_eq!(config.tree.branches.levels, 3);
        assert_eq!(config.tree.branches.left_tint, 0.7);
        assert_eq!(config.tree.trunk_color, Color::BLACK);
    }

    #[test]
    fn test_partial_ambient_added_to_cube() {
        let config = DemoConfig::from_yaml("ambient:\n  intensity: 0.3", DemoConfig::cube()).unwrap();
        let ambient = config.ambient.unwrap();
        assert_eq!(ambient.color, Color::WHITE);
        assert!((ambient.intensity - 0.3).abs() < 0.0001);
    }

    #[test]
    fn test_light_position_as_sequence() {
        let config = DemoConfig::from_yaml("directional:\n  position: [1, 2, 3]", DemoConfig::cube()).unwrap();
        assert_eq!(config.directional.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.directional.intensity, 1.0);
    }

    #[test]
    fn test_null_removes_ambient_light() {
        let config = DemoConfig::from_yaml("ambient: ~", DemoConfig::fractal_tree()).unwrap();
        assert!(config.ambient.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "camera:\n  near: 0",
            "camera:\n  near: 200",
            "camera:\n  fov: 190",
            "cube:\n  size: -1",
            "tree:\n  trunk:\n    radial_segments: 2",
            "tree:\n  branches:\n    levels: 40",
            "container: \"  \"",
        ];
        for yaml in cases {
            assert!(DemoConfig::from_yaml(yaml, DemoConfig::cube()).is_err(), "accepted: {}", yaml);
        }
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let result = DemoConfig::from_yaml("camera: [1, 2", DemoConfig::cube());
        assert!(result.unwrap_err().contains("YAML parse error"));
    }

    #[test]
    fn test_rejects_wrong_types() {
        let result = DemoConfig::from_yaml("cube:\n  color: 12", DemoConfig::cube());
        assert!(result.unwrap_err().contains("Invalid config"));
    }
}
