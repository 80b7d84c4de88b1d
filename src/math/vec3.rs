use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Point, direction or set of XYZ Euler angles.
///
/// Serialized as a `[x, y, z]` sequence so config files can write
/// `position: [0, 1.5, 6]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::splat(0.0);
    pub const ONE: Vec3 = Vec3::splat(1.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Point at `radius` from the origin. `azimuth` turns about +Y starting
    /// from +Z, `elevation` lifts toward +Y.
    pub fn from_spherical(radius: f32, azimuth: f32, elevation: f32) -> Self {
        let (sin_e, cos_e) = elevation.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();
        Self::new(cos_e * sin_a, sin_e, cos_e * cos_a).scale(radius)
    }

    /// Apply `f` to every component
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    fn zip(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z))
    }

    pub fn dot(&self, other: &Self) -> f32 {
        let p = self.zip(*other, |a, b| a * b);
        p.x + p.y + p.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Unit vector in the same direction; the zero vector stays zero
    pub fn normalize(&self) -> Self {
        match self.length() {
            len if len > 0.0 => self.scale(1.0 / len),
            _ => *self,
        }
    }

    pub fn scale(&self, s: f32) -> Self {
        self.map(|c| c * s)
    }

    pub fn to_array(&self) -> [f32; 3] {
        (*self).into()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

// Component-wise binary operators
macro_rules! impl_component_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Vec3 {
            type Output = Vec3;
            fn $method(self, other: Vec3) -> Vec3 {
                self.zip(other, |a, b| a $op b)
            }
        }
    };
}

impl_component_op!(Add, add, +);
impl_component_op!(Sub, sub, -);
impl_component_op!(Mul, mul, *);

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        *self = *self + other;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.map(|c| -c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_length_and_normalize() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert!((v.length() - 5.0).abs() < 0.0001);

        let n = v.normalize();
        assert!((n.length() - 1.0).abs() < 0.0001);
        assert!((n.x - 0.6).abs() < 0.0001);
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_right_cross_up_is_forward() {
        let c = Vec3::RIGHT.cross(&Vec3::UP);
        assert!(c.distance(&Vec3::FORWARD) < 0.0001);
    }

    #[test]
    fn test_component_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::splat(3.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert!((a.dot(&b) - 32.0).abs() < 0.0001);

        let mut acc = Vec3::ZERO;
        acc += a;
        acc += a;
        assert_eq!(acc, a * 2.0);
    }

    #[test]
    fn test_from_spherical() {
        let front = Vec3::from_spherical(2.0, 0.0, 0.0);
        assert!(front.distance(&Vec3::new(0.0, 0.0, 2.0)) < 0.0001);

        let side = Vec3::from_spherical(1.0, FRAC_PI_2, 0.0);
        assert!(side.distance(&Vec3::RIGHT) < 0.0001);

        let top = Vec3::from_spherical(3.0, 1.0, FRAC_PI_2);
        assert!(top.distance(&Vec3::new(0.0, 3.0, 0.0)) < 0.0001);
    }

    #[test]
    fn test_yaml_sequence_form() {
        let v: Vec3 = serde_yaml::from_str("[0, 1.5, 6]").unwrap();
        assert_eq!(v, Vec3::new(0.0, 1.5, 6.0));
        assert!(serde_yaml::from_str::<Vec3>("[1, 2]").is_err());

        let text = serde_yaml::to_string(&Vec3::UP).unwrap();
        assert_eq!(serde_yaml::from_str::<Vec3>(&text).unwrap(), Vec3::UP);
    }
}
