use std::fs;
use std::path::Path;

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use log::{debug, warn};

use super::canvas::{GlyphCanvas, GlyphRasterizer};
use crate::AsciiError;

/// Pixel height used to render glyphs for calibration.
pub const DEFAULT_FONT_PX: f32 = 16.0;

/// DejaVu Sans Mono, the reference font calibration measures against.
const REFERENCE_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");
const REFERENCE_FONT_NAME: &str = "DejaVu Sans Mono (bundled)";

/// Software glyph rasterizer backed by an outline font.
pub struct FontRasterizer {
    font: FontArc,
    scale: PxScale,
    name: String,
}

impl FontRasterizer {
    /// Uses the bundled reference font.
    pub fn reference(px_size: f32) -> Result<Self, AsciiError> {
        let scale = checked_scale(px_size)?;
        let font = FontArc::try_from_slice(REFERENCE_FONT).map_err(|err| {
            AsciiError::RenderingUnavailable(format!("invalid reference font: {err}"))
        })?;

        debug!("loaded {REFERENCE_FONT_NAME} at {px_size}px");
        Ok(Self { font, scale, name: REFERENCE_FONT_NAME.into() })
    }

    /// Loads a TrueType/OpenType font from disk.
    pub fn from_file(path: &Path, px_size: f32) -> Result<Self, AsciiError> {
        let scale = checked_scale(px_size)?;
        let data = fs::read(path).map_err(|err| {
            AsciiError::RenderingUnavailable(format!("cannot read font {}: {err}", path.display()))
        })?;
        let font = FontArc::try_from_vec(data).map_err(|err| {
            AsciiError::RenderingUnavailable(format!("invalid font {}: {err}", path.display()))
        })?;

        debug!("loaded font {} at {px_size}px", path.display());
        Ok(Self { font, scale, name: path.display().to_string() })
    }
}

fn checked_scale(px_size: f32) -> Result<PxScale, AsciiError> {
    if !px_size.is_finite() || px_size <= 0.0 {
        return Err(AsciiError::RenderingUnavailable(format!(
            "font size must be a positive number of pixels, got {px_size}"
        )));
    }
    Ok(PxScale::from(px_size))
}

impl GlyphRasterizer for FontRasterizer {
    fn draw_glyph(&mut self, ch: char, canvas: &mut GlyphCanvas) -> Result<(), AsciiError> {
        let id = self.font.glyph_id(ch);
        if id.0 == 0 {
            warn!("font {} has no glyph for {ch:?}", self.name);
        }

        // Baseline sits one ascent below the origin so the glyph body lands on the canvas.
        let ascent = self.font.as_scaled(self.scale).ascent();
        let glyph = id.with_scale_and_position(self.scale, point(0.0, ascent));

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outline.draw(|x, y, coverage| {
                canvas.cover(left + x as i32, top + y as i32, coverage);
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calibrate, CalibrationOptions};

    fn ink(rasterizer: &mut FontRasterizer, ch: char) -> u32 {
        let mut canvas = GlyphCanvas::new(20, 20);
        rasterizer.draw_glyph(ch, &mut canvas).unwrap();
        canvas.count_below(0.4)
    }

    #[test]
    fn missing_font_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = FontRasterizer::from_file(&dir.path().join("missing.ttf"), DEFAULT_FONT_PX);
        assert!(matches!(result, Err(AsciiError::RenderingUnavailable(_))));
    }

    #[test]
    fn corrupt_font_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font at all").unwrap();
        let result = FontRasterizer::from_file(&path, DEFAULT_FONT_PX);
        assert!(matches!(result, Err(AsciiError::RenderingUnavailable(_))));
    }

    #[test]
    fn degenerate_sizes_are_unavailable() {
        for px in [0.0, -16.0, f32::NAN, f32::INFINITY] {
            let result = FontRasterizer::reference(px);
            assert!(matches!(result, Err(AsciiError::RenderingUnavailable(_))), "px {px}");
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        fs::write(&path, REFERENCE_FONT).unwrap();
        let result = FontRasterizer::from_file(&path, 0.0);
        assert!(matches!(result, Err(AsciiError::RenderingUnavailable(_))));
    }

    #[test]
    fn font_file_matches_reference_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        fs::write(&path, REFERENCE_FONT).unwrap();

        let mut from_file = FontRasterizer::from_file(&path, DEFAULT_FONT_PX).unwrap();
        let mut reference = FontRasterizer::reference(DEFAULT_FONT_PX).unwrap();
        for ch in ['.', 'M', '@', 'j'] {
            assert_eq!(ink(&mut from_file, ch), ink(&mut reference, ch), "{ch:?}");
        }
    }

    #[test]
    fn reference_font_draws_ink_on_canvas() {
        let mut rasterizer = FontRasterizer::reference(DEFAULT_FONT_PX).unwrap();
        let at = ink(&mut rasterizer, '@');
        let dot = ink(&mut rasterizer, '.');

        assert!(at > 0);
        assert!(dot < at);
        assert_eq!(ink(&mut rasterizer, ' '), 0);
    }

    #[test]
    fn reference_calibration_is_deterministic_and_ordered() {
        let options = CalibrationOptions::default();
        let first = calibrate(&mut FontRasterizer::reference(DEFAULT_FONT_PX).unwrap(), &options)
            .unwrap();
        let second = calibrate(&mut FontRasterizer::reference(DEFAULT_FONT_PX).unwrap(), &options)
            .unwrap();

        assert_eq!(first.ramp, second.ramp);
        assert_eq!(first.weights, second.weights);
        assert_eq!(first.ramp.len(), 94);
        assert!(first.weights.windows(2).all(|pair| pair[0].ink <= pair[1].ink));

        let position = |ch| first.ramp.chars().iter().position(|&c| c == ch).unwrap();
        assert!(position('.') < position('@'));
        assert!(position('\'') < position('M'));
    }
}
