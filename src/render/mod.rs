pub mod shaders;
pub mod renderer;

pub use renderer::Renderer;
