//! WebGPU rendering module
//!
//! CPU-tessellated triangle meshes with the camera transform applied on
//! upload; the shader is a passthrough.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
