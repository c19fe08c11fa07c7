use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputFrame;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// The canvas window, borrowed for one callback.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:      WindowCtx<'a>,
    pub gpu:         &'a mut Gpu<'w>,
    pub input_frame: &'a InputFrame,
    pub runtime:     &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then presents the frame.
    ///
    /// Surface errors never reach `draw`: recoverable ones schedule another
    /// redraw, an unrecoverable one fails the runtime.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let message = err.to_string();
                let action = self.gpu.handle_surface_error(err);
                return on_surface_error(self.runtime, action, &message);
            }
        };

        // Clear pass; dropped before the encoder is handed to the draw callback.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trikit clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view:           &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(clear.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes:         None,
                occlusion_query_set:      None,
                multiview_mask:           None,
            });
        }

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.surface_format());

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}

/// Turns a surface error action into runtime requests.
fn on_surface_error(runtime: &mut RuntimeCtx, action: SurfaceErrorAction, message: &str) -> AppControl {
    if action == SurfaceErrorAction::Fatal {
        runtime.fail(anyhow::anyhow!("surface lost beyond recovery: {message}"));
        return AppControl::Exit;
    }

    log::warn!("surface error ({action:?}): {message}");
    if action.wants_redraw() {
        runtime.request_redraw();
    }
    AppControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_surface_error_fails_the_runtime() {
        let mut runtime = RuntimeCtx::default();
        let control = on_surface_error(&mut runtime, SurfaceErrorAction::Fatal, "Out of memory");

        assert_eq!(control, AppControl::Exit);
        let err = runtime.take_fatal().expect("fatal error must be stored");
        assert!(err.to_string().contains("Out of memory"), "{err}");
    }

    #[test]
    fn recoverable_surface_error_retries_the_frame() {
        for action in [SurfaceErrorAction::Reconfigured, SurfaceErrorAction::SkipFrame] {
            let mut runtime = RuntimeCtx::default();
            let control = on_surface_error(&mut runtime, action, "Outdated");

            assert_eq!(control, AppControl::Continue);
            assert!(runtime.redraw_requested());
            assert!(runtime.take_fatal().is_none());
        }
    }
}
