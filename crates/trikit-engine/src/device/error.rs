/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    /// Whether the frame that hit the error should be retried by requesting another redraw.
    ///
    /// Redraws are invalidation-based, so a dropped frame would otherwise leave
    /// stale pixels on screen until the next input event.
    pub fn wants_redraw(self) -> bool {
        matches!(self, Self::Reconfigured | Self::SkipFrame)
    }
}
