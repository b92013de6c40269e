//! Pipeline conversions module
//!
//! This module contains orchestration logic for EXR to PNG conversion.

mod exr_to_png;


pub use exr_to_png::{convert, convert_or_log, output_paths, ConversionReport, ExrToPngPipeline};
