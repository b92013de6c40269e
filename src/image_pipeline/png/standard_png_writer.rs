use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::encode::types::{LuminanceRaster, RgbRaster};
use crate::image_pipeline::png::types::{ConversionConfig, PngCompression, PngFilter};
use crate::image_pipeline::png::writer::PngWriter;

pub struct StandardPngWriter;

impl StandardPngWriter {
    fn encoder<'a>(&self, buffer: &'a mut Vec<u8>, config: &ConversionConfig) -> PngEncoder<&'a mut Vec<u8>> {
        let compression = match config.compression {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        };

        let filter = match config.filter {
            PngFilter::NoFilter => FilterType::NoFilter,
            PngFilter::Sub => FilterType::Sub,
            PngFilter::Up => FilterType::Up,
            PngFilter::Avg => FilterType::Avg,
            PngFilter::Paeth => FilterType::Paeth,
            PngFilter::Adaptive => FilterType::Adaptive,
        };

        PngEncoder::new_with_quality(buffer, compression, filter)
    }

    fn finish(&self, encoded: image::ImageResult<()>, buffer: &[u8], output: &mut dyn Write) -> Result<()> {
        encoded.map_err(|e| ConversionError::EncodingError(e.to_string()))?;
        output.write_all(buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

impl PngWriter for StandardPngWriter {
    fn write_rgb_png(&self, image: &RgbRaster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!("Encoding RGB16 PNG: {}x{}", image.width(), image.height());
        let view = image.view()?;
        let mut buffer = Vec::new();
        let encoded = view.write_with_encoder(self.encoder(&mut buffer, config));
        self.finish(encoded, &buffer, output)
    }

    fn write_luma_png(&self, image: &LuminanceRaster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!(
            "Encoding L{} PNG: {}x{}",
            image.bit_depth(),
            image.width(),
            image.height()
        );
        let mut buffer = Vec::new();
        let encoded = image.as_image().write_with_encoder(self.encoder(&mut buffer, config));
        self.finish(encoded, &buffer, output)
    }
}
