/// RGBA color with `[0, 1]` components.
///
/// Values are written to the surface as given; the canvas requests a
/// non-sRGB format so no conversion happens on the way.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_wgpu_color() {
        let c: wgpu::Color = Color::opaque(0.0, 0.33, 0.62).into();
        assert!((c.g - 0.33).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
