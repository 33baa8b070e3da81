//! Rendering module
//!
//! Everything is drawn as solid-colored rectangles: the scene builder emits
//! a triangle list in court space plus a court-to-clip transform, and a
//! backend (WebGPU or headless) draws it.

pub mod backend;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod transform;
pub mod vertex;

pub use backend::{HeadlessBackend, RenderBackend, RenderError, draw};
pub use pipeline::WgpuBackend;
pub use scene::{Frame, build_frame};
pub use transform::CourtTransform;
pub use vertex::{Vertex, colors};
