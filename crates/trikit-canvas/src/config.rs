use winit::dpi::LogicalSize;

use trikit_engine::device::GpuInit;
use trikit_engine::logging::LoggingConfig;
use trikit_engine::paint::Color;
use trikit_engine::window::RuntimeConfig;

/// Canvas background: a muted blue.
pub const BACKGROUND: Color = Color::opaque(0.0, 0.33, 0.62);

/// Everything the canvas needs before the window opens.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Fixed name of the drawing surface, shown as the window title.
    pub canvas_name: String,
    pub width: f64,
    pub height: f64,
    /// Character that clears the canvas, matched against the key's layout text.
    pub clear_key: char,
    pub background: Color,
    pub logging: LoggingConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_name: "trikit canvas".to_string(),
            width: 640.0,
            height: 480.0,
            clear_key: 'x',
            background: BACKGROUND,
            logging: LoggingConfig::default(),
        }
    }
}

impl CanvasConfig {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.canvas_name.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }

    /// GPU settings for a canvas that writes colors as given.
    pub fn gpu(&self) -> GpuInit {
        GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canvas_behavior() {
        let cfg = CanvasConfig::default();
        assert_eq!(cfg.clear_key, 'x');
        assert_eq!(cfg.background, Color::opaque(0.0, 0.33, 0.62));
        assert_eq!(cfg.background.a, 1.0);
    }

    #[test]
    fn runtime_config_uses_canvas_name_and_size() {
        let cfg = CanvasConfig {
            canvas_name: "demo".into(),
            width: 200.0,
            height: 100.0,
            ..Default::default()
        };
        let rt = cfg.runtime();
        assert_eq!(rt.title, "demo");
        assert_eq!(rt.initial_size, LogicalSize::new(200.0, 100.0));
    }

    #[test]
    fn gpu_requests_linear_surface() {
        assert!(!CanvasConfig::default().gpu().prefer_srgb);
    }
}
