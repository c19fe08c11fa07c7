//! GPU rendering subsystem.
//!
//! - `shader` compiles and links the WGSL stage pair into a [`ShaderProgram`]
//!   without touching the GPU.
//! - `triangle` turns a [`crate::scene::TriangleList`] into draw calls.
//!
//! Convention: vertex positions are already in NDC; no viewport transform is applied.

mod ctx;
pub mod shader;
pub mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use shader::{ShaderError, ShaderProgram, ShaderStage};
pub use triangle::TriangleRenderer;
