use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use exr_to_png_rs::image_pipeline::{
    output_paths, ConversionConfig, ExrToPngPipeline, GrayscaleSource, PngCompression,
};
use exr_to_png_rs::logger;

use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Compression {
    Fast,
    Default,
    Best,
}

impl From<Compression> for PngCompression {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Fast => PngCompression::Fast,
            Compression::Default => PngCompression::Default,
            Compression::Best => PngCompression::Best,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert float EXR images to 16-bit RGB and grayscale PNGs")]
struct Cli {
    /// Input EXR files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Write outputs here instead of next to each input
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Derive grayscale from the in-memory raster instead of re-reading the colour PNG
    #[arg(long)]
    in_memory_gray: bool,

    /// PNG compression level
    #[arg(long, value_enum, default_value = "default")]
    compression: Compression,

    /// Log per-step timings for each file
    #[arg(long)]
    timings: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let config = ConversionConfig::builder()
        .compression(cli.compression.into())
        .grayscale_source(if cli.in_memory_gray {
            GrayscaleSource::InMemory
        } else {
            GrayscaleSource::Reread
        })
        .build();
    let pipeline = ExrToPngPipeline::new(config);

    info!("EXR to PNG pipeline initialized");
    info!("Compression: {:?}", pipeline.config().compression);
    info!("Grayscale source: {:?}", pipeline.config().grayscale_source);

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut failures = 0usize;
    for input in &cli.inputs {
        let (color_path, gray_path) = output_paths(input, cli.out_dir.as_deref());
        match pipeline.convert_file(input, &color_path, &gray_path) {
            Ok(report) => {
                info!(width = report.width, height = report.height, "Conversion successful!");
                if cli.timings {
                    report.timings.log_summary();
                }
            }
            Err(e) => {
                error!("Error converting {} to PNG: {}", input.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} conversions failed", failures, cli.inputs.len());
    }
    Ok(())
}
