//! Converts floating-point OpenEXR images into 16-bit RGB PNGs and derived
//! grayscale PNGs.

pub mod image_pipeline;
pub mod logger;
