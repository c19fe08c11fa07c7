//! Scene (canvas content + draw stream) types.
//!
//! Responsibilities:
//! - store the triangle positions placed on the canvas, in placement order
//! - record the renderer-agnostic draw stream derived from them
//!
//! Both are plain CPU data; nothing here touches the GPU.

mod cmd;
mod list;
mod triangles;

pub use cmd::{DrawCmd, TriangleCmd, TRIANGLE_HALF_EXTENT};
pub use list::DrawList;
pub use triangles::{CanvasState, Point, TriangleList};
