//! Image processing pipeline module
//!
//! This module provides a structured approach to EXR to PNG conversion,
//! with separate modules for EXR reading, float-to-integer encoding, PNG
//! writing, and conversion orchestration.

pub mod openexr;
pub mod encode;
pub mod png;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    PipelineTimings,
    Result,
};

pub use openexr::{
    ChannelPlane,
    ExrImageReader,
    ExrsReader,
    FloatRgbImage,
};

pub use encode::{
    derive_grayscale,
    encode,
    LuminanceRaster,
    RgbRaster,
};

pub use png::{
    ConversionConfig,
    ConversionConfigBuilder,
    GrayscaleSource,
    PngCompression,
    PngFilter,
    PngWriter,
    StandardPngWriter,
};

pub use conversions::{
    convert,
    convert_or_log,
    output_paths,
    ConversionReport,
    ExrToPngPipeline,
};
