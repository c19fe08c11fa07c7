//! Coordinate and geometry types shared across the runtime, input and renderer.
//!
//! Two spaces are in play:
//! - logical pixels (DPI-aware), origin top-left, +X right, +Y down
//! - normalized device coordinates, origin center, [-1, 1] on both axes, +Y up
//!
//! `Viewport::to_ndc` is the only bridge between them.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
