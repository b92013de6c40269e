//! Floating-point image data types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::encode::{self, RgbRaster};

/// One colour channel of linear radiance samples, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPlane {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ChannelPlane {
    /// Wraps `data` as a `width x height` plane.
    ///
    /// Fails with `ShapeMismatch` when the sample count does not equal the area,
    /// the buffer is never truncated or padded.
    pub fn new(name: &str, width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(ConversionError::shape_mismatch(
                name,
                (width, height),
                format!("{} samples", data.len()),
            ));
        }
        Ok(Self { width, height, data })
    }

    /// A plane where every sample is `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// The R, G and B planes of one EXR layer
#[derive(Debug, Clone)]
pub struct FloatRgbImage {
    pub red: ChannelPlane,
    pub green: ChannelPlane,
    pub blue: ChannelPlane,
    /// Top-left corner of the data window
    pub origin: (i32, i32),
}

impl FloatRgbImage {
    pub fn new(red: ChannelPlane, green: ChannelPlane, blue: ChannelPlane) -> Result<Self> {
        encode::check_shapes(&red, &green, &blue)?;
        Ok(Self {
            red,
            green,
            blue,
            origin: (0, 0),
        })
    }

    pub fn with_origin(mut self, origin: (i32, i32)) -> Self {
        self.origin = origin;
        self
    }

    pub fn width(&self) -> usize {
        self.red.width
    }

    pub fn height(&self) -> usize {
        self.red.height
    }

    pub fn encode(&self) -> Result<RgbRaster> {
        encode::encode(&self.red, &self.green, &self.blue)
    }
}
