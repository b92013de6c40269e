use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::openexr::types::FloatRgbImage;

pub trait ExrImageReader {
    fn read_exr(&self, data: &[u8]) -> Result<FloatRgbImage>;
}
