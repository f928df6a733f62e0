/// Number of character columns in every output row.
pub const OUTPUT_WIDTH: u16 = 80;

/// Vertical step multiplier compensating for glyph cells being taller than wide.
pub const ROW_ASPECT: f64 = 2.2;

/// Maps output grid coordinates back onto source pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleGeometry {
    pub source_width: u32,
    pub source_height: u32,
    pub columns: u16,
    /// Source pixels per output column, never below 1.0.
    pub scale: f64,
}

impl SampleGeometry {
    pub fn derive(source_width: u32, source_height: u32) -> Option<Self> {
        if source_width == 0 || source_height == 0 {
            return None;
        }

        let scale = (f64::from(source_width) / f64::from(OUTPUT_WIDTH)).max(1.0);
        Some(Self { source_width, source_height, columns: OUTPUT_WIDTH, scale })
    }

    /// Source x for an output column, clamped to the last image column.
    pub fn source_column(&self, column: u16) -> u32 {
        let x = (f64::from(column) * self.scale).round();
        let last = f64::from(self.source_width - 1);
        x.min(last) as u32
    }

    /// Source y for an output row, or `None` once it falls below the image.
    pub fn source_row(&self, row: u32) -> Option<u32> {
        let y = (f64::from(row) * self.scale * ROW_ASPECT).round();
        (y < f64::from(self.source_height)).then_some(y as u32)
    }

    pub fn source_rows(&self) -> impl Iterator<Item = u32> + '_ {
        (0..).map_while(|row| self.source_row(row))
    }

    pub fn row_count(&self) -> u32 {
        self.source_rows().count() as u32
    }
}
