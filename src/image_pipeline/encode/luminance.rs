//! Grayscale derivation
//!
//! Uses the `image` crate's luma conversion, which applies the ITU-R BT.709
//! weights `0.2126 R + 0.7152 G + 0.0722 B` in integer arithmetic. The output
//! keeps the bit depth of the source: 8-bit in, 8-bit out, everything else 16-bit.

use image::{ColorType, DynamicImage};
use tracing::debug;

use crate::image_pipeline::encode::types::LuminanceRaster;

pub fn derive_grayscale(rgb: &DynamicImage) -> LuminanceRaster {
    debug!(
        "Deriving grayscale from {}x{} {:?}",
        rgb.width(),
        rgb.height(),
        rgb.color()
    );

    let gray = match rgb.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => {
            DynamicImage::ImageLuma8(rgb.to_luma8())
        }
        _ => DynamicImage::ImageLuma16(rgb.to_luma16()),
    };
    LuminanceRaster::from_image(gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    use crate::image_pipeline::encode::types::Rgb16Image;

    fn rgb16(width: u32, height: u32, px: [u16; 3]) -> DynamicImage {
        DynamicImage::ImageRgb16(Rgb16Image::from_pixel(width, height, Rgb(px)))
    }

    #[test]
    fn sixteen_bit_white_stays_white() {
        let gray = derive_grayscale(&rgb16(2, 2, [65535, 65535, 65535]));
        assert_eq!(gray.bit_depth(), 16);
        assert_eq!(gray.samples(), vec![65535; 4]);
    }

    #[test]
    fn black_stays_black() {
        let gray = derive_grayscale(&rgb16(3, 1, [0, 0, 0]));
        assert_eq!(gray.samples(), vec![0; 3]);
    }

    #[test]
    fn neutral_gray_is_preserved() {
        let gray = derive_grayscale(&rgb16(1, 1, [32767, 32767, 32767]));
        assert_eq!(gray.samples(), vec![32767]);
    }

    #[test]
    fn green_dominates_luminance() {
        let red = derive_grayscale(&rgb16(1, 1, [65535, 0, 0])).samples()[0];
        let green = derive_grayscale(&rgb16(1, 1, [0, 65535, 0])).samples()[0];
        let blue = derive_grayscale(&rgb16(1, 1, [0, 0, 65535])).samples()[0];
        assert!(green > red && red > blue);
    }

    #[test]
    fn eight_bit_input_gives_eight_bit_output() {
        let rgb: RgbImage = ImageBuffer::from_pixel(4, 2, Rgb([255, 255, 255]));
        let gray = derive_grayscale(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(gray.bit_depth(), 8);
        assert_eq!((gray.width(), gray.height()), (4, 2));
        assert!(gray.samples().iter().all(|&v| v == 255));
    }
}
