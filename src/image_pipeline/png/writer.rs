use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::types::{LuminanceRaster, RgbRaster};
use crate::image_pipeline::png::types::ConversionConfig;

pub trait PngWriter {
    fn write_rgb_png(&self, image: &RgbRaster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
    fn write_luma_png(&self, image: &LuminanceRaster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
