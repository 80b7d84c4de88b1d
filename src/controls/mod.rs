pub mod orbit;

pub use orbit::{DragMode, OrbitControls};
