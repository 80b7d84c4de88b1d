pub mod buffer;
pub mod primitives;

pub use buffer::{Mesh, Vertex, VERTEX_STRIDE};
pub use primitives::tessellate;
