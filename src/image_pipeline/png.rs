//! PNG writing module
//!
//! This module provides 16-bit RGB and grayscale PNG writing.

mod writer;
mod standard_png_writer;
pub mod types;

pub use writer::PngWriter;
pub use standard_png_writer::StandardPngWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, GrayscaleSource, PngCompression, PngFilter};
