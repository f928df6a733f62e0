use crate::AsciiError;

/// Offscreen grayscale bitmap used to measure a single glyph.
///
/// Pixels hold brightness in [0.0, 1.0]; a cleared canvas is white.
#[derive(Clone, Debug)]
pub struct GlyphCanvas {
    width: u32,
    height: u32,
    pixels: Vec<f32>,
}

impl GlyphCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![1.0; width as usize * height as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn clear(&mut self) {
        self.pixels.fill(1.0);
    }

    pub fn brightness(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Paints black ink with the given coverage. Pixels outside the canvas are clipped.
    pub fn cover(&mut self, x: i32, y: i32, coverage: f32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = (y * self.width + x) as usize;
        let ink = 1.0 - coverage.clamp(0.0, 1.0);
        self.pixels[idx] = self.pixels[idx].min(ink);
    }

    /// Number of pixels strictly darker than `threshold`.
    pub fn count_below(&self, threshold: f32) -> u32 {
        self.pixels.iter().filter(|&&value| value < threshold).count() as u32
    }
}

/// Capability to draw one character onto a canvas, black on white, at the canvas origin.
pub trait GlyphRasterizer {
    fn draw_glyph(&mut self, ch: char, canvas: &mut GlyphCanvas) -> Result<(), AsciiError>;
}
