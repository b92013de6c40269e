//! Float to 16-bit quantization
//!
//! Samples are clipped into `[0, 1]`, scaled by `u16::MAX` and truncated toward
//! zero, so `0.5` maps to `32767`. NaN is treated as `0.0`; infinities clip to
//! the nearest bound.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::encode::types::RgbRaster;
use crate::image_pipeline::openexr::types::ChannelPlane;

const U16_SCALE: f32 = u16::MAX as f32;

/// Clips `sample` into `[0, 1]`, with NaN mapped to `0.0`.
#[inline]
pub fn normalize_sample(sample: f32) -> f32 {
    if sample.is_nan() {
        0.0
    } else {
        sample.clamp(0.0, 1.0)
    }
}

/// Maps one linear float sample to its 16-bit code value.
#[inline]
pub fn quantize_sample(sample: f32) -> u16 {
    (normalize_sample(sample) * U16_SCALE) as u16
}

/// Fails with `ShapeMismatch` unless green and blue match the red plane's dimensions.
pub fn check_shapes(red: &ChannelPlane, green: &ChannelPlane, blue: &ChannelPlane) -> Result<()> {
    let expected = red.dimensions();
    for (name, plane) in [("G", green), ("B", blue)] {
        if plane.dimensions() != expected {
            return Err(ConversionError::shape_mismatch(
                name,
                expected,
                format!("{}x{}", plane.width(), plane.height()),
            ));
        }
    }
    Ok(())
}

/// Quantizes three float planes into one interleaved 16-bit RGB raster.
pub fn encode(red: &ChannelPlane, green: &ChannelPlane, blue: &ChannelPlane) -> Result<RgbRaster> {
    check_shapes(red, green, blue)?;

    let (width, height) = red.dimensions();
    debug!("Quantizing {}x{} float planes to 16-bit RGB", width, height);

    let data: Vec<u16> = red
        .samples()
        .iter()
        .zip(green.samples())
        .zip(blue.samples())
        .flat_map(|((&r, &g), &b)| [quantize_sample(r), quantize_sample(g), quantize_sample(b)])
        .collect();

    Ok(RgbRaster::new(width, height, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planes(width: usize, height: usize, r: f32, g: f32, b: f32) -> [ChannelPlane; 3] {
        [
            ChannelPlane::filled(width, height, r),
            ChannelPlane::filled(width, height, g),
            ChannelPlane::filled(width, height, b),
        ]
    }

    #[test]
    fn in_range_samples_truncate() {
        for x in [0.0f32, 0.1, 0.25, 0.333, 0.5, 0.75, 0.999_99, 1.0] {
            assert_eq!(quantize_sample(x), (x * 65535.0).floor() as u16, "sample {}", x);
        }
    }

    #[test]
    fn out_of_range_samples_clip() {
        assert_eq!(quantize_sample(-0.001), 0);
        assert_eq!(quantize_sample(-1e9), 0);
        assert_eq!(quantize_sample(1.000_1), 65535);
        assert_eq!(quantize_sample(42.0), 65535);
    }

    #[test]
    fn non_finite_samples() {
        assert_eq!(quantize_sample(f32::NAN), 0);
        assert_eq!(quantize_sample(-f32::NAN), 0);
        assert_eq!(quantize_sample(f32::INFINITY), 65535);
        assert_eq!(quantize_sample(f32::NEG_INFINITY), 0);
    }

    #[test]
    fn half_maps_to_32767() {
        let [r, g, b] = planes(3, 2, 0.5, 0.5, 0.5);
        let raster = encode(&r, &g, &b).unwrap();
        assert!(raster.pixels().all(|px| px == [32767, 32767, 32767]));
    }

    #[test]
    fn channels_interleave_in_rgb_order() {
        let [r, g, b] = planes(2, 1, 1.0, 0.0, 0.5);
        let raster = encode(&r, &g, &b).unwrap();
        assert_eq!(raster.samples(), &[65535, 0, 32767, 65535, 0, 32767]);
    }

    #[test]
    fn output_keeps_input_dimensions() {
        let [r, g, b] = planes(7, 5, 0.2, 0.4, 0.6);
        let raster = encode(&r, &g, &b).unwrap();
        assert_eq!((raster.width(), raster.height()), (7, 5));
        assert_eq!(raster.samples().len(), 7 * 5 * 3);
    }

    #[test]
    fn mismatched_planes_fail_without_truncating() {
        let r = ChannelPlane::filled(100, 100, 0.5);
        let g = ChannelPlane::filled(100, 99, 0.5);
        let b = ChannelPlane::filled(100, 100, 0.5);

        match encode(&r, &g, &b) {
            Err(ConversionError::ShapeMismatch { plane, actual, .. }) => {
                assert_eq!(plane, "G");
                assert_eq!(actual, "100x99");
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn mismatched_blue_plane_is_named() {
        let r = ChannelPlane::filled(4, 4, 0.0);
        let g = ChannelPlane::filled(4, 4, 0.0);
        let b = ChannelPlane::filled(3, 4, 0.0);
        assert!(matches!(
            encode(&r, &g, &b),
            Err(ConversionError::ShapeMismatch { ref plane, .. }) if plane == "B"
        ));
    }
}
