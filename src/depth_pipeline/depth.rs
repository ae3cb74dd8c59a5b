//! Depth image reading module
//!
//! This module decodes single-channel 32-bit float images into [`DepthFrame`]s.

mod reader;
mod exr_reader;
mod tiff_reader;
mod standard_reader;
pub mod types;

pub use reader::DepthFrameReader;
pub use exr_reader::{ExrDepthReader, DEFAULT_DEPTH_CHANNEL};
pub use tiff_reader::TiffDepthReader;
pub use standard_reader::StandardDepthReader;
pub use types::DepthFrame;
