use std::io::Write;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{error, info, instrument};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    common::timing::{PipelineTimings, Timer},
    encode::{derive_grayscale, LuminanceRaster, RgbRaster},
    openexr::{ExrImageReader, ExrsReader},
    png::{ConversionConfig, GrayscaleSource, PngWriter, StandardPngWriter},
};

/// Outcome of one file conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub width: usize,
    pub height: usize,
    pub timings: PipelineTimings,
}

pub struct ExrToPngPipeline<R: ExrImageReader, W: PngWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl ExrToPngPipeline<ExrsReader, StandardPngWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: ExrsReader,
            writer: StandardPngWriter,
            config,
        }
    }
}

impl<R: ExrImageReader, W: PngWriter> ExrToPngPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Decodes `input_data` as EXR and writes the 16-bit colour PNG to `output`.
    ///
    /// Returns the encoded raster so the caller can derive grayscale from it.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<RgbRaster> {
        self.convert_timed(input_data, output, &mut PipelineTimings::new())
    }

    fn convert_timed(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        timings: &mut PipelineTimings,
    ) -> Result<RgbRaster> {
        info!("Starting EXR to PNG conversion");

        let timer = Timer::start("decode_exr");
        let float_image = {
            let _span = tracing::info_span!("decode_exr").entered();
            self.reader.read_exr(input_data)?
        };
        timings.record(timer);

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = float_image.width(),
                height = float_image.height()
            ).entered();
            self.validate_dimensions(float_image.width(), float_image.height())?;
        }

        let timer = Timer::start("encode_rgb");
        let raster = {
            let _span = tracing::info_span!("encode_rgb").entered();
            float_image.encode()?
        };
        timings.record(timer);

        let timer = Timer::start("write_color_png");
        {
            let _span = tracing::info_span!("write_color_png").entered();
            self.writer.write_rgb_png(&raster, output, &self.config)?;
        }
        timings.record(timer);

        info!(
            width = raster.width(),
            height = raster.height(),
            "Color conversion complete"
        );
        Ok(raster)
    }

    fn grayscale_from(&self, raster: &RgbRaster, color_path: &Path) -> Result<LuminanceRaster> {
        match self.config.grayscale_source {
            GrayscaleSource::InMemory => raster.to_luminance(),
            GrayscaleSource::Reread => {
                let bytes = std::fs::read(color_path).map_err(|e| {
                    ConversionError::FileNotFound(format!("{}: {}", color_path.display(), e))
                })?;
                let color = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
                    .map_err(|e| {
                        ConversionError::DecodeError(format!("{}: {}", color_path.display(), e))
                    })?;
                Ok(derive_grayscale(&color))
            }
        }
    }

    #[instrument(skip(self, input_path, color_path, gray_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<Path>>(
        &self,
        input_path: P,
        color_path: Q,
        gray_path: S,
    ) -> Result<ConversionReport> {
        let input_path = input_path.as_ref();
        let color_path = color_path.as_ref();
        let gray_path = gray_path.as_ref();

        info!(
            input = %input_path.display(),
            color = %color_path.display(),
            gray = %gray_path.display(),
            "Converting file"
        );

        let mut timings = PipelineTimings::new();

        let timer = Timer::start("read_input_file");
        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ConversionError::FileNotFound(format!("{}: {}", input_path.display(), e))
                }
                _ => ConversionError::IoError(e),
            })?
        };
        timings.record(timer);

        // Output files are only created once their PNG bytes are complete.
        let mut color_png = Vec::new();
        let raster = self.convert_timed(&input_data, &mut color_png, &mut timings)?;

        let timer = Timer::start("save_color_png");
        save_output(color_path, &color_png)?;
        timings.record(timer);

        let timer = Timer::start("derive_grayscale");
        let gray = {
            let _span = tracing::info_span!("derive_grayscale",
                source = ?self.config.grayscale_source
            ).entered();
            self.grayscale_from(&raster, color_path)?
        };
        timings.record(timer);

        let timer = Timer::start("write_gray_png");
        {
            let _span = tracing::info_span!("write_gray_png").entered();
            let mut gray_png = Vec::new();
            self.writer.write_luma_png(&gray, &mut gray_png, &self.config)?;
            save_output(gray_path, &gray_png)?;
        }
        timings.record(timer);

        info!(
            "Successfully converted '{}' to '{}' and '{}'",
            input_path.display(),
            color_path.display(),
            gray_path.display()
        );

        Ok(ConversionReport {
            width: raster.width(),
            height: raster.height(),
            timings,
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

fn save_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let _span = tracing::info_span!("save_output_file", bytes = bytes.len()).entered();
    let mut file = std::fs::File::create(path)
        .map_err(|e| ConversionError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    file.write_all(bytes)?;
    Ok(())
}

/// Converts one EXR file with the default configuration.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<Path>>(
    input_path: P,
    color_path: Q,
    gray_path: S,
) -> Result<ConversionReport> {
    ExrToPngPipeline::new(ConversionConfig::default()).convert_file(input_path, color_path, gray_path)
}

/// Like [`convert`], but reports failures through the log instead of returning them.
///
/// Returns `true` when both outputs were written. Output files created before
/// the failure are left in place.
pub fn convert_or_log<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<Path>>(
    input_path: P,
    color_path: Q,
    gray_path: S,
) -> bool {
    match convert(input_path, color_path, gray_path) {
        Ok(_) => true,
        Err(e) => {
            error!("Error converting EXR to PNG: {}", e);
            false
        }
    }
}

/// `<stem>.png` and `gray_<stem>.png`, placed in `out_dir` or beside the input.
pub fn output_paths(input_path: &Path, out_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let dir = out_dir
        .or_else(|| input_path.parent())
        .unwrap_or_else(|| Path::new(""));

    (
        dir.join(format!("{}.png", stem)),
        dir.join(format!("gray_{}.png", stem)),
    )
}
