use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::depth::reader::DepthFrameReader;
use crate::depth_pipeline::depth::types::DepthFrame;

/// Reads single-channel 32-bit floating point TIFF images.
pub struct TiffDepthReader;

impl DepthFrameReader for TiffDepthReader {
    fn read_depth(&self, data: &[u8]) -> Result<DepthFrame> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder =
            Decoder::new(Cursor::new(data)).map_err(|e| ConversionError::Decode(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| ConversionError::Decode(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| ConversionError::Decode(e.to_string()))?;

        if color_type != ColorType::Gray(32) {
            return Err(ConversionError::UnsupportedFormat(format!(
                "TIFF colour type {:?}, expected single-channel 32-bit float",
                color_type
            )));
        }

        let values = match decoder
            .read_image()
            .map_err(|e| ConversionError::Decode(e.to_string()))?
        {
            DecodingResult::F32(values) => values,
            _ => {
                return Err(ConversionError::UnsupportedFormat(
                    "TIFF samples are 32-bit integers, expected floating point".to_string(),
                ));
            }
        };

        debug!("Decoded TIFF depth: {}x{}", width, height);
        DepthFrame::new(width as usize, height as usize, values)
    }
}
