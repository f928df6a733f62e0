use crate::image_pipeline::loader::PixelSource;
use crate::image_pipeline::sampling::SampleGeometry;

use super::{grid::GlyphGrid, ramp::Ramp};

pub struct GlyphMapper<'a> {
    ramp: &'a Ramp,
}

impl<'a> GlyphMapper<'a> {
    pub fn new(ramp: &'a Ramp) -> Self {
        Self { ramp }
    }

    pub fn map_brightness(&self, brightness: f32) -> char {
        self.ramp.glyph_for(brightness)
    }

    /// Samples one source pixel per grid cell, row by row.
    pub fn map_source<S: PixelSource + ?Sized>(
        &self,
        source: &S,
        geometry: &SampleGeometry,
    ) -> GlyphGrid {
        let mut cells = Vec::new();
        let mut rows = 0;

        for y in geometry.source_rows() {
            for column in 0..geometry.columns {
                let x = geometry.source_column(column);
                cells.push(self.map_brightness(source.brightness_at(x, y)));
            }
            rows += 1;
        }

        GlyphGrid::new(geometry.columns, rows, cells)
    }
}
