//! Rendering
//!
//! `scene` builds a backend-neutral draw list from the game state each frame.
//! `shapes` tessellates it into triangles and `pipeline` draws them with wgpu.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, Scene, StatusText, build_scene};
pub use shapes::scene_vertices;
pub use vertex::Vertex;
