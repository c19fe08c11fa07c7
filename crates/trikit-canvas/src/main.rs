//! Click to place red triangles on the canvas; press `x` to clear them.

mod app;
mod config;
mod controller;

use std::process::ExitCode;

use anyhow::{Context, Result};

use trikit_engine::logging::init_logging;
use trikit_engine::render::ShaderProgram;
use trikit_engine::window::Runtime;

use crate::app::CanvasApp;
use crate::config::CanvasConfig;

fn main() -> ExitCode {
    let config = CanvasConfig::default();
    init_logging(config.logging.clone());

    // Every setup and runtime failure is reported here, once.
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: CanvasConfig) -> Result<()> {
    // Shader problems abort before a window ever opens.
    let program = ShaderProgram::triangle().context("failed to build the triangle shader program")?;

    log::info!(
        "click to place triangles, press '{}' to clear",
        config.clear_key
    );

    let app = CanvasApp::new(program, config.clear_key, config.background);
    Runtime::run(config.runtime(), config.gpu(), app)
}
