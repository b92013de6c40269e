//! Integer raster types produced by the encoder

use image::{imageops, DynamicImage, ImageBuffer, Rgb};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// 16-bit RGB buffer as stored in the colour PNG
pub type Rgb16Image = ImageBuffer<Rgb<u16>, Vec<u16>>;

/// Borrowed 16-bit RGB buffer
pub type Rgb16View<'a> = ImageBuffer<Rgb<u16>, &'a [u16]>;

/// Quantized RGB image data
#[derive(Debug, Clone, PartialEq)]
pub struct RgbRaster {
    /// Width of the image in pixels
    width: usize,
    /// Height of the image in pixels
    height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    data: Vec<u16>,
}

impl RgbRaster {
    pub(crate) fn new(width: usize, height: usize, data: Vec<u16>) -> Self {
        debug_assert_eq!(data.len(), width * height * 3);
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[u16] {
        &self.data
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.data.chunks_exact(3).map(|px| [px[0], px[1], px[2]])
    }

    fn shape_error(&self) -> ConversionError {
        ConversionError::EncodingError(format!(
            "RGB buffer of {} samples does not fit {}x{}",
            self.data.len(),
            self.width,
            self.height
        ))
    }

    /// Borrows the samples as an image buffer without copying them.
    pub fn view(&self) -> Result<Rgb16View<'_>> {
        ImageBuffer::from_raw(self.width as u32, self.height as u32, self.data.as_slice())
            .ok_or_else(|| self.shape_error())
    }

    pub fn into_image(self) -> Result<Rgb16Image> {
        let error = self.shape_error();
        ImageBuffer::from_raw(self.width as u32, self.height as u32, self.data).ok_or(error)
    }

    /// Derives the grayscale raster without going through a file.
    pub fn to_luminance(&self) -> Result<LuminanceRaster> {
        let gray = imageops::grayscale(&self.view()?);
        Ok(LuminanceRaster::from_image(DynamicImage::ImageLuma16(gray)))
    }
}

/// Single-channel raster, 8 or 16 bits per sample
#[derive(Debug, Clone)]
pub struct LuminanceRaster {
    image: DynamicImage,
}

impl LuminanceRaster {
    pub(crate) fn from_image(image: DynamicImage) -> Self {
        debug_assert!(matches!(
            image,
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_)
        ));
        Self { image }
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    pub fn bit_depth(&self) -> u8 {
        match self.image {
            DynamicImage::ImageLuma8(_) => 8,
            _ => 16,
        }
    }

    /// Samples widened to u16, row-major.
    pub fn samples(&self) -> Vec<u16> {
        match &self.image {
            DynamicImage::ImageLuma8(buf) => buf.as_raw().iter().map(|&v| v as u16).collect(),
            other => other.to_luma16().into_raw(),
        }
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::encode::derive_grayscale;

    fn raster() -> RgbRaster {
        RgbRaster::new(2, 1, vec![65535, 0, 0, 1000, 2000, 3000])
    }

    #[test]
    fn view_borrows_samples_in_place() {
        let raster = raster();
        let view = raster.view().unwrap();
        assert_eq!(view.dimensions(), (2, 1));
        assert_eq!(view.get_pixel(1, 0).0, [1000, 2000, 3000]);
        assert!(std::ptr::eq(view.as_raw().as_ptr(), raster.samples().as_ptr()));
    }

    #[test]
    fn into_image_keeps_samples() {
        let image = raster().into_image().unwrap();
        assert_eq!(image.into_raw(), vec![65535, 0, 0, 1000, 2000, 3000]);
    }

    #[test]
    fn in_memory_luminance_matches_derive_grayscale() {
        let raster = raster();
        let from_view = raster.to_luminance().unwrap();
        let from_image = derive_grayscale(&DynamicImage::ImageRgb16(raster.clone().into_image().unwrap()));
        assert_eq!(from_view.bit_depth(), 16);
        assert_eq!(from_view.samples(), from_image.samples());
    }
}
