use crate::math::Vec3;
use super::Color;

/// Scene light sources
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Parallel rays shining from `position` toward `target`
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
        target: Vec3,
    },
    /// Uniform light reaching every surface
    Ambient { color: Color, intensity: f32 },
}

impl Light {
    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Light::Directional {
            color,
            intensity,
            position,
            target: Vec3::ZERO,
        }
    }

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }
}

/// Lighting reduced to what the shader consumes: one key light plus ambient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Unit vector pointing from surfaces toward the key light
    pub direction: Vec3,
    pub directional: Color,
    pub ambient: Color,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::UP,
            directional: Color::BLACK,
            ambient: Color::BLACK,
        }
    }
}

impl Lighting {
    /// Collapse a light list. The first directional light wins, ambient terms add up.
    pub fn from_lights<'a>(lights: impl IntoIterator<Item = &'a Light>) -> Self {
        let mut lighting = Lighting::default();
        let mut has_key = false;

        for light in lights {
            match *light {
                Light::Directional { color, intensity, position, target } => {
                    if !has_key {
                        lighting.direction = (position - target).normalize();
                        lighting.directional = color.scale(intensity);
                        has_key = true;
                    }
                }
                Light::Ambient { color, intensity } => {
                    let add = color.scale(intensity);
                    lighting.ambient = Color::new(
                        lighting.ambient.r + add.r,
                        lighting.ambient.g + add.g,
                        lighting.ambient.b + add.b,
                    );
                }
            }
        }

        lighting
    }
}
