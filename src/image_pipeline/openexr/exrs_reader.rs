//! EXR image reader implementation using the exr library.
//!
//! Reads the first valid layer of an OpenEXR file at its largest resolution level
//! and extracts the `R`, `G` and `B` channels as 32-bit float planes. Channels
//! stored as f16 or u32 are converted to f32.

use std::io::Cursor;

use exr::prelude::*;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::openexr::reader::ExrImageReader;
use crate::image_pipeline::openexr::types::{ChannelPlane, FloatRgbImage};

/// EXR reader backed by the pure-Rust `exr` crate.
pub struct ExrsReader;

/// Channel names looked up in the layer, in output order.
const RGB_CHANNEL_NAMES: [&str; 3] = ["R", "G", "B"];

type FlatLayer = Layer<AnyChannels<FlatSamples>>;

impl ExrImageReader for ExrsReader {
    /// Decodes an EXR file held in memory.
    ///
    /// # Errors
    ///
    /// * `DecodeError` - the bytes are not a readable EXR file
    /// * `MissingChannel` - one of `R`, `G`, `B` is absent from the first layer
    /// * `ShapeMismatch` - a channel's sample count differs from the data window area
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use exr_to_png_rs::image_pipeline::{ExrImageReader, ExrsReader};
    ///
    /// let bytes = std::fs::read("render.exr").unwrap();
    /// let image = ExrsReader.read_exr(&bytes).unwrap();
    /// println!("{}x{}", image.width(), image.height());
    /// ```
    fn read_exr(&self, data: &[u8]) -> Result<FloatRgbImage> {
        debug!("Decoding EXR image, {} bytes", data.len());

        let image: Image<FlatLayer> = exr::prelude::read()
            .no_deep_data()
            .largest_resolution_level()
            .all_channels()
            .first_valid_layer()
            .all_attributes()
            .from_buffered(Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let layer = &image.layer_data;
        let width = layer.size.width();
        let height = layer.size.height();
        let origin = (
            layer.attributes.layer_position.x(),
            layer.attributes.layer_position.y(),
        );

        debug!(
            "Data window: {}x{} at ({}, {}), {} channels",
            width,
            height,
            origin.0,
            origin.1,
            layer.channel_data.list.len()
        );

        let [red, green, blue] = RGB_CHANNEL_NAMES.map(|name| extract_plane(layer, name, width, height));

        Ok(FloatRgbImage::new(red?, green?, blue?)?.with_origin(origin))
    }
}

fn find_channel<'a>(layer: &'a FlatLayer, name: &str) -> Option<&'a AnyChannel<FlatSamples>> {
    layer
        .channel_data
        .list
        .iter()
        .find(|channel| channel.name.to_string() == name)
}

fn extract_plane(layer: &FlatLayer, name: &str, width: usize, height: usize) -> Result<ChannelPlane> {
    let channel = find_channel(layer, name)
        .ok_or_else(|| ConversionError::MissingChannel(name.to_string()))?;

    let samples: Vec<f32> = channel.sample_data.values_as_f32().collect();
    ChannelPlane::new(name, width, height, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_exr(channels: Vec<AnyChannel<FlatSamples>>, size: (usize, usize)) -> Vec<u8> {
        let layer = Layer::new(
            size,
            LayerAttributes::named("test"),
            Encoding::FAST_LOSSLESS,
            AnyChannels::sort(channels.into()),
        );
        let mut bytes = Cursor::new(Vec::new());
        Image::from_layer(layer)
            .write()
            .to_buffered(&mut bytes)
            .unwrap();
        bytes.into_inner()
    }

    fn f32_channel(name: &str, values: Vec<f32>) -> AnyChannel<FlatSamples> {
        AnyChannel::new(name, FlatSamples::F32(values))
    }

    #[test]
    fn reads_rgb_planes_in_row_major_order() {
        let bytes = write_exr(
            vec![
                f32_channel("R", vec![0.0, 0.25, 0.5, 1.0, 2.0, -1.0]),
                f32_channel("G", vec![0.1; 6]),
                f32_channel("B", vec![0.9; 6]),
            ],
            (3, 2),
        );

        let image = ExrsReader.read_exr(&bytes).unwrap();

        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.red.samples(), &[0.0, 0.25, 0.5, 1.0, 2.0, -1.0]);
        assert!(image.green.samples().iter().all(|&v| v == 0.1));
        assert!(image.blue.samples().iter().all(|&v| v == 0.9));
    }

    #[test]
    fn ignores_extra_channels() {
        let bytes = write_exr(
            vec![
                f32_channel("A", vec![1.0; 4]),
                f32_channel("B", vec![0.3; 4]),
                f32_channel("G", vec![0.2; 4]),
                f32_channel("R", vec![0.1; 4]),
                f32_channel("Z", vec![7.0; 4]),
            ],
            (2, 2),
        );

        let image = ExrsReader.read_exr(&bytes).unwrap();
        assert!(image.red.samples().iter().all(|&v| v == 0.1));
        assert!(image.blue.samples().iter().all(|&v| v == 0.3));
    }

    #[test]
    fn half_and_integer_channels_widen_to_f32() {
        let half = |values: [f32; 4]| FlatSamples::F16(values.iter().map(|&v| f16::from_f32(v)).collect());
        let bytes = write_exr(
            vec![
                AnyChannel::new("R", half([0.0, 0.25, 0.5, 1.0])),
                AnyChannel::new("G", half([-2.0, 1.5, 0.125, 4.0])),
                AnyChannel::new("B", FlatSamples::U32(vec![0, 1, 7, 65536])),
            ],
            (2, 2),
        );

        let image = ExrsReader.read_exr(&bytes).unwrap();

        assert_eq!(image.red.samples(), &[0.0, 0.25, 0.5, 1.0]);
        assert_eq!(image.green.samples(), &[-2.0, 1.5, 0.125, 4.0]);
        assert_eq!(image.blue.samples(), &[0.0, 1.0, 7.0, 65536.0]);

        let raster = image.encode().unwrap();
        assert_eq!(raster.samples()[..3], [0, 0, 0]);
        assert_eq!(raster.samples()[3..6], [16383, 65535, 65535]);
    }

    #[test]
    fn missing_blue_channel_is_reported() {
        let bytes = write_exr(
            vec![f32_channel("R", vec![0.0; 4]), f32_channel("G", vec![0.0; 4])],
            (2, 2),
        );

        let result = ExrsReader.read_exr(&bytes);
        match result {
            Err(ConversionError::MissingChannel(name)) => assert_eq!(name, "B"),
            other => panic!("expected missing channel, got {:?}", other),
        }
    }

    #[test]
    fn garbage_input_is_a_decode_error() {
        let result = ExrsReader.read_exr(b"definitely not an exr file");
        assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    }
}
