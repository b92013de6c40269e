//! EXR reading module
//!
//! This module extracts linear float RGB planes from OpenEXR files.

mod reader;
mod exrs_reader;
pub mod types;

pub use reader::ExrImageReader;
pub use exrs_reader::ExrsReader;
pub use types::{ChannelPlane, FloatRgbImage};
