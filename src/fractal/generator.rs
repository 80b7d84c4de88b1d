use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::math::Mat4;
use crate::scene::{Color, Geometry, Material, MeshId, MeshObject, Scene};

/// Dimensions of the cylinder every branch is cloned from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrunkTemplate {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
}

impl Default for TrunkTemplate {
    fn default() -> Self {
        Self {
            radius_top: 0.1,
            radius_bottom: 0.15,
            height: 1.0,
            radial_segments: 16,
        }
    }
}

impl TrunkTemplate {
    pub fn base_width(&self) -> f32 {
        self.radius_bottom * 2.0
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::Cylinder {
            radius_top: self.radius_top,
            radius_bottom: self.radius_bottom,
            height: self.height,
            radial_segments: self.radial_segments,
        }
    }
}

/// Parameters controlling how branches are placed and tinted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchParams {
    /// Number of branch generations above the trunk
    pub levels: u32,
    /// Rotation about Y applied before the lateral offset (radians)
    pub branch_yaw: f32,
    /// Outward tilt about Z (radians); left and right use opposite signs
    pub tilt: f32,
    /// Uniform shrink per generation
    pub scale: f32,
    /// Green added per generation on the left side, divided by `levels`
    pub left_tint: f32,
    /// Green added per generation on the right side, divided by `levels`
    pub right_tint: f32,
}

impl Default for BranchParams {
    fn default() -> Self {
        Self {
            levels: 6,
            branch_yaw: FRAC_PI_2,
            tilt: FRAC_PI_4,
            scale: 0.75,
            left_tint: 0.7,
            right_tint: 0.64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchSide {
    Left,
    Right,
}

impl BranchSide {
    pub const BOTH: [BranchSide; 2] = [BranchSide::Left, BranchSide::Right];

    /// Sign of the lateral offset; the tilt uses the opposite sign
    pub fn sign(self) -> f32 {
        match self {
            BranchSide::Left => -1.0,
            BranchSide::Right => 1.0,
        }
    }
}

/// One placed copy of the trunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    /// Generation above the trunk, starting at 1
    pub depth: u32,
    pub side: BranchSide,
    /// Local-to-world transform, frozen once inserted
    pub transform: Mat4,
    pub color: Color,
}

/// Mesh ids of a tree built into a scene
#[derive(Debug, Clone, PartialEq)]
pub struct TreeMeshes {
    pub trunk: MeshId,
    pub branches: Vec<MeshId>,
}

/// Number of branches a generator emits for `levels` generations: `2^(levels+1) - 2`
pub fn branch_count(levels: u32) -> usize {
    levels
        .checked_add(1)
        .and_then(|shift| 1usize.checked_shl(shift))
        .map(|n| n - 2)
        .unwrap_or(usize::MAX)
}

/// Recursive binary branch placement over a trunk template
#[derive(Debug, Clone, Copy)]
pub struct BranchGenerator {
    pub trunk: TrunkTemplate,
    pub params: BranchParams,
}

impl BranchGenerator {
    pub fn new(trunk: TrunkTemplate, params: BranchParams) -> Self {
        Self { trunk, params }
    }

    /// Placement of a child relative to its parent:
    /// `Ry(yaw) * T(±w/2, 0, 0) * Rz(∓tilt) * S(scale) * T(0, h, 0)`
    pub fn local_placement(&self, side: BranchSide) -> Mat4 {
        let p = &self.params;
        let sign = side.sign();

        let mut m = Mat4::rotation_y(p.branch_yaw);
        m.multiply(&Mat4::translation(sign * self.trunk.base_width() / 2.0, 0.0, 0.0))
            .multiply(&Mat4::rotation_z(-sign * p.tilt))
            .multiply(&Mat4::uniform_scale(p.scale))
            .multiply(&Mat4::translation(0.0, self.trunk.height, 0.0));
        m
    }

    /// Green increment for one generation on `side`
    pub fn tint(&self, side: BranchSide) -> f32 {
        if self.params.levels == 0 {
            return 0.0;
        }
        let rate = match side {
            BranchSide::Left => self.params.left_tint,
            BranchSide::Right => self.params.right_tint,
        };
        rate / self.params.levels as f32
    }

    /// World transform of a child: local placement first, then the parent's
    pub fn child_transform(&self, side: BranchSide, parent: &Mat4) -> Mat4 {
        self.local_placement(side).mul(parent)
    }

    /// All branches grown `depth` generations above a parent, in pre-order
    /// with the left subtree before the right one.
    pub fn branches(&self, depth: u32, parent_transform: &Mat4, parent_color: Color) -> Vec<Branch> {
        let mut out = Vec::with_capacity(branch_count(depth).min(1 << 16));
        self.grow(depth, 1, parent_transform, parent_color, &mut out);
        out
    }

    fn grow(
        &self,
        remaining: u32,
        generation: u32,
        parent_transform: &Mat4,
        parent_color: Color,
        out: &mut Vec<Branch>,
    ) {
        if remaining == 0 {
            return;
        }

        for side in BranchSide::BOTH {
            let transform = self.child_transform(side, parent_transform);
            let color = parent_color.tinted_green(self.tint(side));

            out.push(Branch {
                depth: generation,
                side,
                transform,
                color,
            });

            self.grow(remaining - 1, generation + 1, &transform, color, out);
        }
    }

    /// Clone `template` once per branch with the branch's color and a frozen matrix
    pub fn insert_branches(scene: &mut Scene, template: &MeshObject, branches: &[Branch]) -> Vec<MeshId> {
        branches
            .iter()
            .map(|branch| {
                let mut mesh = template.clone().with_frozen_matrix(branch.transform);
                mesh.material.color = branch.color;
                scene.add_mesh(mesh)
            })
            .collect()
    }

    /// Grow `depth` generations above a parent and add them to the scene
    pub fn generate(
        &self,
        scene: &mut Scene,
        template: &MeshObject,
        depth: u32,
        parent_transform: &Mat4,
        parent_color: Color,
    ) -> Vec<MeshId> {
        let branches = self.branches(depth, parent_transform, parent_color);
        Self::insert_branches(scene, template, &branches)
    }

    /// Add the trunk and all configured branch generations to the scene
    pub fn build_tree(&self, scene: &mut Scene, trunk_color: Color) -> TreeMeshes {
        let geometry = scene.add_geometry(self.trunk.geometry());
        let mut trunk = MeshObject::new(geometry, Material::phong(trunk_color));
        trunk.update_matrix();

        let trunk_id = scene.add_mesh(trunk.clone());
        let branches = self.generate(scene, &trunk, self.params.levels, &trunk.matrix, trunk_color);

        TreeMeshes { trunk: trunk_id, branches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn generator(levels: u32) -> BranchGenerator {
        BranchGenerator::new(
            TrunkTemplate::default(),
            BranchParams { levels, ..Default::default() },
        )
    }

    fn trunk_color() -> Color {
        Color::new(0.4, 0.0, 0.1)
    }

    #[test]
    fn test_branch_count_formula() {
        assert_eq!(branch_count(0), 0);
        assert_eq!(branch_count(1), 2);
        assert_eq!(branch_count(6), 126);
        // Saturates instead of overflowing
        assert_eq!(branch_count(u32::MAX), usize::MAX);
        assert_eq!(branch_count(200), usize::MAX);
    }

    #[test]
    fn test_depth_zero_emits_nothing() {
        let gen = generator(6);
        assert!(gen.branches(0, &Mat4::identity(), trunk_color()).is_empty());

        let mut scene = Scene::new();
        let g = scene.add_geometry(gen.trunk.geometry());
        let template = MeshObject::new(g, Material::phong(trunk_color()));
        let ids = gen.generate(&mut scene, &template, 0, &Mat4::identity(), trunk_color());
        assert!(ids.is_empty());
        assert_eq!(scene.mesh_count(), 0);
    }

    #[test]
    fn test_total_branches_for_each_level() {
        for levels in 0..=8 {
            let gen = generator(levels);
            let mut scene = Scene::new();
            let tree = gen.build_tree(&mut scene, trunk_color());

            let expected = (1usize << (levels + 1)) - 2;
            assert_eq!(tree.branches.len(), expected, "levels = {}", levels);
            assert_eq!(scene.mesh_count(), expected + 1);
        }
    }

    #[test]
    fn test_scale_shrinks_geometrically() {
        let gen = generator(5);
        for branch in gen.branches(5, &Mat4::identity(), trunk_color()) {
            let expected = 0.75f32.powi(branch.depth as i32);
            let s = branch.transform.scale_factors();
            for axis in [s.x, s.y, s.z] {
                assert!((axis - expected).abs() < 1e-4, "depth {}: {} vs {}", branch.depth, axis, expected);
            }
        }
    }

    #[test]
    fn test_world_transform_is_local_times_parent() {
        let gen = generator(4);
        let root = Mat4::translation(0.5, -1.0, 2.0).mul(&Mat4::rotation_x(0.3));
        let branches = gen.branches(4, &root, trunk_color());

        // Pre-order: a branch's parent is the latest branch one generation shallower
        let mut ancestors: Vec<Mat4> = vec![root];
        for branch in &branches {
            ancestors.truncate(branch.depth as usize);
            let parent = ancestors[branch.depth as usize - 1];
            let expected = gen.local_placement(branch.side).mul(&parent);
            assert!(branch.transform.approx_eq(&expected, 1e-5));
            ancestors.push(branch.transform);
        }
    }

    #[test]
    fn test_reversed_composition_differs() {
        let gen = generator(1);
        let parent = gen.child_transform(BranchSide::Left, &Mat4::identity());
        let local = gen.local_placement(BranchSide::Right);

        assert!(!local.mul(&parent).approx_eq(&parent.mul(&local), 1e-3));
    }

    #[test]
    fn test_local_placement_sides_mirror() {
        let gen = generator(1);
        let left = gen.local_placement(BranchSide::Left).transform_point(Vec3::ZERO);
        let right = gen.local_placement(BranchSide::Right).transform_point(Vec3::ZERO);

        // Same height, opposite lateral displacement
        assert!((left.y - right.y).abs() < 1e-5);
        assert!(left.y > 0.0);
        assert!((left.z + right.z).abs() < 1e-5);
        assert!(left.z.abs() > 0.01);
    }

    #[test]
    fn test_tints_are_asymmetric_and_deterministic() {
        let gen = generator(3);
        let first = gen.branches(3, &Mat4::identity(), trunk_color());
        let second = gen.branches(3, &Mat4::identity(), trunk_color());
        assert_eq!(first, second);

        let left = first.iter().find(|b| b.side == BranchSide::Left).unwrap();
        let right = first.iter().find(|b| b.side == BranchSide::Right && b.depth == 1).unwrap();
        assert!(left.color.g > right.color.g);
        assert_eq!(left.color.r, trunk_color().r);
        assert_eq!(right.color.b, trunk_color().b);
    }

    #[test]
    fn test_tint_accumulates_along_left_spine() {
        let gen = generator(4);
        let branches = gen.branches(4, &Mat4::identity(), trunk_color());

        // The first `levels` entries in pre-order are the all-left spine
        for (i, branch) in branches.iter().take(4).enumerate() {
            assert_eq!(branch.side, BranchSide::Left);
            assert_eq!(branch.depth, i as u32 + 1);
            let expected = (i + 1) as f32 * 0.7 / 4.0;
            assert!((branch.color.g - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_single_level_scenario() {
        let gen = generator(1);
        let mut scene = Scene::new();
        let tree = gen.build_tree(&mut scene, trunk_color());

        assert_eq!(tree.branches.len(), 2);
        let left = scene.mesh(tree.branches[0]).unwrap();
        let right = scene.mesh(tree.branches[1]).unwrap();
        assert!((left.material.color.g - 0.7).abs() < 1e-6);
        assert!((right.material.color.g - 0.64).abs() < 1e-6);
    }

    #[test]
    fn test_zero_levels_leaves_only_trunk() {
        let gen = generator(0);
        let mut scene = Scene::new();
        let tree = gen.build_tree(&mut scene, trunk_color());

        assert!(tree.branches.is_empty());
        assert_eq!(scene.mesh_count(), 1);
        assert_eq!(scene.mesh(tree.trunk).unwrap().material.color, trunk_color());
    }

    #[test]
    fn test_inserted_branches_are_frozen_clones() {
        let gen = generator(2);
        let mut scene = Scene::new();
        let tree = gen.build_tree(&mut scene, trunk_color());
        let trunk = scene.mesh(tree.trunk).unwrap().clone();

        for id in &tree.branches {
            let mesh = scene.mesh(*id).unwrap();
            assert_eq!(mesh.geometry, trunk.geometry);
            assert!(!mesh.matrix_auto_update);
        }

        let before: Vec<Mat4> = tree.branches.iter().map(|id| scene.mesh(*id).unwrap().matrix).collect();
        scene.update_matrix_world();
        let after: Vec<Mat4> = tree.branches.iter().map(|id| scene.mesh(*id).unwrap().matrix).collect();
        assert_eq!(before, after);
    }
}
