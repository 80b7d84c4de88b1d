//! Demo scenes and the browser harness that runs them.
//!
//! A [`Demo`] fills a [`Scene`](crate::scene::Scene) and optionally animates it.
//! [`Stage`] pairs it with a camera and controls without touching the DOM,
//! while [`start_demo`] mounts a stage into the page and drives it with
//! `requestAnimationFrame`.

pub mod context;
pub mod demo;
pub mod stage;
pub mod web;

pub use context::SceneContext;
pub use demo::{CubeDemo, Demo, FractalTreeDemo};
pub use stage::Stage;
pub use web::{start_demo, AnimationFrameScheduler, DemoHandle};
