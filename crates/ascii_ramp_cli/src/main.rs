use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use ascii_ramp::{
    AsciiRenderer, CalibrationOptions, FontRasterizer, Ramp, RampSource, RenderOptions,
    DEFAULT_FONT_PX,
};
use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[command(name = "image2ascii", author, version, about = "Convert an image to 80 column ASCII art")]
struct Cli {
    /// Input image path
    #[arg(required_unless_present = "dump_ramps")]
    input: Option<PathBuf>,
    /// Measure glyph ink with a font and render with the resulting ramp
    #[arg(long, conflicts_with = "ramp")]
    calibrate: bool,
    /// Print the default and calibrated ramps instead of rendering
    #[arg(long, conflicts_with_all = ["calibrate", "ramp", "input"])]
    dump_ramps: bool,
    /// Custom ramp, lightest glyph first
    #[arg(long, allow_hyphen_values = true)]
    ramp: Option<String>,
    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    calibration: CalibrationArgs,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Args, Debug)]
struct CalibrationArgs {
    /// Font used for calibration instead of the bundled DejaVu Sans Mono
    #[arg(long, env = "IMAGE2ASCII_FONT")]
    font: Option<PathBuf>,
    /// Glyph pixel height used for calibration
    #[arg(long, default_value_t = DEFAULT_FONT_PX, value_parser = parse_font_size)]
    font_size: f32,
    /// Brightness below which a calibration pixel counts as ink (0.0 - 1.0)
    #[arg(long, default_value_t = 0.4, value_parser = parse_threshold)]
    threshold: f32,
    /// Side length of the square calibration canvas in pixels
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=1024))]
    canvas: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("image2ascii: {err:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.to_options()?;
    let calibration = &cli.calibration;
    let acquire = || match &calibration.font {
        Some(path) => FontRasterizer::from_file(path, calibration.font_size),
        None => FontRasterizer::reference(calibration.font_size),
    };

    let renderer = AsciiRenderer;
    match &cli.output {
        Some(path) => {
            // An existing output file is only replaced after a successful render.
            let mut buffer = Vec::new();
            renderer.run(&options, acquire, &mut buffer)?;
            std::fs::write(path, buffer)
                .with_context(|| format!("failed to write {:?}", path))?;
            log::info!("wrote {}", path.display());
        },
        None => {
            let stdout = io::stdout();
            let mut sink = BufWriter::new(stdout.lock());
            renderer.run(&options, acquire, &mut sink)?;
        },
    }

    Ok(())
}

impl Cli {
    fn to_options(&self) -> Result<RenderOptions> {
        let mut options = if self.dump_ramps {
            RenderOptions::dump_ramps()
        } else {
            let input = self.input.clone().context("an input image is required")?;
            RenderOptions::render(input, self.ramp_source()?)
        };
        options.calibration = self.calibration.to_options();
        Ok(options)
    }

    fn ramp_source(&self) -> Result<RampSource> {
        if self.calibrate {
            return Ok(RampSource::Calibrated);
        }
        match &self.ramp {
            Some(chars) => Ok(RampSource::Literal(Ramp::new(chars.as_str())?)),
            None => Ok(RampSource::Default),
        }
    }
}

impl CalibrationArgs {
    fn to_options(&self) -> CalibrationOptions {
        CalibrationOptions {
            canvas_width: self.canvas,
            canvas_height: self.canvas,
            darkness_threshold: self.threshold,
            ..CalibrationOptions::default()
        }
    }
}

fn parse_font_size(value: &str) -> Result<f32, String> {
    let px: f32 = value.parse().map_err(|err| format!("{err}"))?;
    if !px.is_finite() || px <= 0.0 {
        return Err(format!("{value} is not a positive pixel size"));
    }
    Ok(px)
}

fn parse_threshold(value: &str) -> Result<f32, String> {
    let threshold: f32 = value.parse().map_err(|err| format!("{err}"))?;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(format!("{value} is not in 0.0..=1.0"));
    }
    Ok(threshold)
}
