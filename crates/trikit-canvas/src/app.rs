use trikit_engine::core::{App, AppControl, FrameCtx};
use trikit_engine::paint::Color;
use trikit_engine::render::{ShaderProgram, TriangleRenderer};

use crate::controller::TriangleController;

/// Glue between the runtime, the controller and the renderer.
pub struct CanvasApp {
    controller: TriangleController,
    renderer: TriangleRenderer,
    background: Color,
}

impl CanvasApp {
    pub fn new(program: ShaderProgram, clear_key: char, background: Color) -> Self {
        Self {
            controller: TriangleController::new(clear_key),
            renderer: TriangleRenderer::new(program),
            background,
        }
    }
}

impl App for CanvasApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let before = self.controller.state();
        for event in &ctx.input_frame.events {
            self.controller.handle(event);
        }

        let after = self.controller.state();
        if before != after {
            log::debug!("canvas {before:?} -> {after:?}");
        }

        // Every frame repaints the whole list from scratch.
        let triangles = self.controller.triangles();
        let renderer = &mut self.renderer;
        ctx.render(self.background, |rctx, target| {
            renderer.render(rctx, target, triangles);
        })
    }
}
