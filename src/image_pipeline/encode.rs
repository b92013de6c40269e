//! Float-image encoding module
//!
//! Turns linear float planes into 16-bit RGB rasters and derives luminance.

mod luminance;
mod quantize;
pub mod types;

pub use luminance::derive_grayscale;
pub use quantize::{check_shapes, encode, normalize_sample, quantize_sample};
pub use types::{LuminanceRaster, Rgb16Image, Rgb16View, RgbRaster};
