use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s, s)
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Compose translation, XYZ-order Euler rotation and scale into `T * R * S`
    pub fn compose(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        let r = Self::rotation_x(rotation.x)
            .mul(&Self::rotation_y(rotation.y))
            .mul(&Self::rotation_z(rotation.z));

        Self::translation(position.x, position.y, position.z)
            .mul(&r)
            .mul(&Self::scale(scale.x, scale.y, scale.z))
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Matrix multiplication, `self * other`
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// In-place post-multiplication: `self = self * other`
    pub fn multiply(&mut self, other: &Mat4) -> &mut Self {
        *self = self.mul(other);
        self
    }

    /// Length of each basis column, i.e. the scale along local X, Y and Z
    pub fn scale_factors(&self) -> Vec3 {
        let d = &self.data;
        Vec3::new(
            Vec3::new(d[0], d[1], d[2]).length(),
            Vec3::new(d[4], d[5], d[6]).length(),
            Vec3::new(d[8], d[9], d[10]).length(),
        )
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    pub fn approx_eq(&self, other: &Mat4, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.distance(&b) < 0.0001, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity() {
        let m = Mat4::identity();
        assert_eq!(m.data[0], 1.0);
        assert_eq!(m.data[5], 1.0);
        assert_eq!(m.data[10], 1.0);
        assert_eq!(m.data[15], 1.0);
        assert_eq!(Mat4::default(), m);
    }

    #[test]
    fn test_translation() {
        let result = Mat4::translation(1.0, 2.0, 3.0).transform_point(Vec3::ZERO);
        assert_vec_eq(result, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_scale() {
        let result = Mat4::scale(2.0, 3.0, 4.0).transform_point(Vec3::ONE);
        assert_vec_eq(result, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotations_follow_right_hand_rule() {
        assert_vec_eq(Mat4::rotation_z(FRAC_PI_2).transform_point(Vec3::RIGHT), Vec3::UP);
        assert_vec_eq(Mat4::rotation_x(FRAC_PI_2).transform_point(Vec3::UP), Vec3::FORWARD);
        assert_vec_eq(Mat4::rotation_y(FRAC_PI_2).transform_point(Vec3::FORWARD), Vec3::RIGHT);
    }

    #[test]
    fn test_matrix_mul_applies_right_operand_first() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scale(2.0, 2.0, 2.0);
        let result = t.mul(&s).transform_point(Vec3::RIGHT);
        assert!((result.x - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_multiply_in_place_matches_mul() {
        let a = Mat4::rotation_y(0.3);
        let b = Mat4::translation(0.0, 2.0, 0.0);
        let mut m = a;
        m.multiply(&b);
        assert!(m.approx_eq(&a.mul(&b), 1e-6));
    }

    #[test]
    fn test_rotation_and_translation_do_not_commute() {
        let r = Mat4::rotation_z(FRAC_PI_2);
        let t = Mat4::translation(1.0, 0.0, 0.0);
        assert!(!r.mul(&t).approx_eq(&t.mul(&r), 0.01));
    }

    #[test]
    fn test_compose_matches_manual_product() {
        let position = Vec3::new(1.0, -2.0, 0.5);
        let rotation = Vec3::new(0.4, 0.4, 0.0);
        let scale = Vec3::splat(2.0);

        let manual = Mat4::translation(1.0, -2.0, 0.5)
            .mul(&Mat4::rotation_x(0.4))
            .mul(&Mat4::rotation_y(0.4))
            .mul(&Mat4::rotation_z(0.0))
            .mul(&Mat4::uniform_scale(2.0));

        assert!(Mat4::compose(position, rotation, scale).approx_eq(&manual, 1e-5));
    }

    #[test]
    fn test_scale_factors_ignore_rotation() {
        let m = Mat4::rotation_y(1.1)
            .mul(&Mat4::rotation_z(-0.7))
            .mul(&Mat4::uniform_scale(0.75));
        assert_vec_eq(m.scale_factors(), Vec3::splat(0.75));
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        assert_vec_eq(view.transform_point(eye), Vec3::ZERO);
        assert_vec_eq(view.transform_point(Vec3::ZERO), Vec3::new(0.0, 0.0, -5.0));
    }
}
