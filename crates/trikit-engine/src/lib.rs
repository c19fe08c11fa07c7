//! trikit engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the canvas app,
//! plus the triangle scene model and its renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
