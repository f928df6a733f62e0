use log::{debug, info};

use super::ramp::Ramp;
use crate::glyph::canvas::{GlyphCanvas, GlyphRasterizer};
use crate::AsciiError;

#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationOptions {
    /// First character measured (inclusive).
    pub first: char,
    /// Last character measured (inclusive).
    pub last: char,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Canvas pixels with brightness strictly below this count as ink.
    pub darkness_threshold: f32,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            first: '!',
            last: '~',
            canvas_width: 20,
            canvas_height: 20,
            darkness_threshold: 0.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphInk {
    pub ch: char,
    pub ink: u32,
}

#[derive(Clone, Debug)]
pub struct Calibration {
    /// Measurements ordered lightest to darkest.
    pub weights: Vec<GlyphInk>,
    pub ramp: Ramp,
}

/// Measures ink for every character in the configured range, in code point order.
pub fn measure_ink<R: GlyphRasterizer + ?Sized>(
    rasterizer: &mut R,
    options: &CalibrationOptions,
) -> Result<Vec<GlyphInk>, AsciiError> {
    let mut canvas = GlyphCanvas::new(options.canvas_width, options.canvas_height);
    let mut weights = Vec::new();

    for ch in options.first..=options.last {
        canvas.clear();
        rasterizer.draw_glyph(ch, &mut canvas)?;
        let ink = canvas.count_below(options.darkness_threshold);
        debug!("glyph {ch:?} ink {ink}");
        weights.push(GlyphInk { ch, ink });
    }

    Ok(weights)
}

/// Builds a lightest-to-darkest ramp from measured glyph ink.
///
/// The sort is stable, so glyphs with equal ink keep ascending code point order.
/// Fails when no glyph leaves any ink, since nothing was actually measured.
pub fn calibrate<R: GlyphRasterizer + ?Sized>(
    rasterizer: &mut R,
    options: &CalibrationOptions,
) -> Result<Calibration, AsciiError> {
    let mut weights = measure_ink(rasterizer, options)?;
    weights.sort_by_key(|glyph| glyph.ink);

    let ramp = Ramp::from_chars(weights.iter().map(|glyph| glyph.ch).collect())?;
    if weights.iter().all(|glyph| glyph.ink == 0) {
        return Err(AsciiError::RenderingUnavailable(format!(
            "no glyph between {:?} and {:?} left any ink on the canvas",
            options.first, options.last
        )));
    }

    info!(
        "calibrated {} glyphs on a {}x{} canvas (threshold {})",
        ramp.len(),
        options.canvas_width,
        options.canvas_height,
        options.darkness_threshold
    );

    Ok(Calibration { weights, ramp })
}
