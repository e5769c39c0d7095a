//! WebGPU rendering module
//!
//! The scene is rebuilt from the game state every frame as a flat-colored
//! triangle list, then uploaded and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use vertex::Vertex;
