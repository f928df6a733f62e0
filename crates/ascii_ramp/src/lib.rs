mod ascii;
mod glyph;
mod image_pipeline;

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

pub use ascii::{
    calibrate::{calibrate, measure_ink, Calibration, CalibrationOptions, GlyphInk},
    grid::GlyphGrid,
    mapping::GlyphMapper,
    ramp::{Ramp, DEFAULT_RAMP},
};
pub use glyph::{
    canvas::{GlyphCanvas, GlyphRasterizer},
    font::{FontRasterizer, DEFAULT_FONT_PX},
};
pub use image_pipeline::{
    brightness::hsb_brightness,
    loader::{open_image, PixelSource},
    sampling::{SampleGeometry, OUTPUT_WIDTH, ROW_ASPECT},
};

#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    #[error("image not found: {}", path.display())]
    ImageNotFound { path: PathBuf },
    #[error("failed to decode image {}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("glyph rendering unavailable: {0}")]
    RenderingUnavailable(String),
    #[error("invalid ramp: {0}")]
    InvalidRamp(String),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the active ramp comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RampSource {
    /// The built-in twelve glyph ramp.
    #[default]
    Default,
    /// A caller supplied literal ramp.
    Literal(Ramp),
    /// Measured from a font at render time.
    Calibrated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Render { path: PathBuf, ramp: RampSource },
    /// Print the default and calibrated ramps instead of rendering.
    DumpRamps,
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub calibration: CalibrationOptions,
}

impl RenderOptions {
    pub fn render(path: impl Into<PathBuf>, ramp: RampSource) -> Self {
        Self {
            mode: RenderMode::Render { path: path.into(), ramp },
            calibration: CalibrationOptions::default(),
        }
    }

    pub fn dump_ramps() -> Self {
        Self { mode: RenderMode::DumpRamps, calibration: CalibrationOptions::default() }
    }
}

#[derive(Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    /// Runs one invocation, writing text to `sink`.
    ///
    /// `acquire` is only called when a calibrated ramp is needed. The rasterizer it
    /// returns is dropped once calibration finishes, before any image is opened.
    /// Nothing is written unless the whole grid was produced.
    pub fn run<W, R, F>(
        &self,
        options: &RenderOptions,
        acquire: F,
        sink: &mut W,
    ) -> Result<(), AsciiError>
    where
        W: Write,
        R: GlyphRasterizer,
        F: FnOnce() -> Result<R, AsciiError>,
    {
        match &options.mode {
            RenderMode::DumpRamps => {
                let calibration = {
                    let mut rasterizer = acquire()?;
                    calibrate(&mut rasterizer, &options.calibration)?
                };
                writeln!(sink, "default:    {}", Ramp::standard())?;
                writeln!(sink, "calibrated: {}", calibration.ramp)?;
                sink.flush()?;
            },
            RenderMode::Render { path, ramp } => {
                let ramp = self.resolve_ramp(ramp, &options.calibration, acquire)?;
                let grid = self.render_path(path, &ramp)?;
                grid.write_to(sink)?;
            },
        }

        Ok(())
    }

    pub fn resolve_ramp<R, F>(
        &self,
        source: &RampSource,
        calibration: &CalibrationOptions,
        acquire: F,
    ) -> Result<Ramp, AsciiError>
    where
        R: GlyphRasterizer,
        F: FnOnce() -> Result<R, AsciiError>,
    {
        match source {
            RampSource::Default => Ok(Ramp::standard()),
            RampSource::Literal(ramp) => Ok(ramp.clone()),
            RampSource::Calibrated => {
                let mut rasterizer = acquire()?;
                Ok(calibrate(&mut rasterizer, calibration)?.ramp)
            },
        }
    }

    pub fn render_path<P: AsRef<Path>>(
        &self,
        path: P,
        ramp: &Ramp,
    ) -> Result<GlyphGrid, AsciiError> {
        let image = open_image(path.as_ref())?;
        Ok(self.render_image(&image, ramp))
    }

    pub fn render_image<S: PixelSource + ?Sized>(&self, source: &S, ramp: &Ramp) -> GlyphGrid {
        let (width, height) = source.size();
        let Some(geometry) = SampleGeometry::derive(width, height) else {
            return GlyphGrid::empty(OUTPUT_WIDTH);
        };

        debug!(
            "sampling {}x{} at scale {:.3} into {} rows",
            width,
            height,
            geometry.scale,
            geometry.row_count()
        );
        GlyphMapper::new(ramp).map_source(source, &geometry)
    }
}
