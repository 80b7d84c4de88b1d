//! Recursive fractal tree construction
//!
//! Every branch is a clone of the trunk cylinder placed by a chain of
//! affine transforms. Generation is pure: `BranchGenerator::branches`
//! returns placed branches and `insert_branches` adds them to a scene.

pub mod generator;

pub use generator::{
    branch_count, Branch, BranchGenerator, BranchParams, BranchSide, TreeMeshes, TrunkTemplate,
};
