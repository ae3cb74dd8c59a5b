use tracing::debug;

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::depth::exr_reader::ExrDepthReader;
use crate::depth_pipeline::depth::reader::DepthFrameReader;
use crate::depth_pipeline::depth::tiff_reader::TiffDepthReader;
use crate::depth_pipeline::depth::types::DepthFrame;
use crate::depth_pipeline::video::types::ConversionConfig;

const EXR_MAGIC: [u8; 4] = [0x76, 0x2f, 0x31, 0x01];
const TIFF_MAGIC_LE: [u8; 4] = *b"II*\0";
const TIFF_MAGIC_BE: [u8; 4] = *b"MM\0*";
const BIGTIFF_MAGIC_LE: [u8; 4] = *b"II+\0";
const BIGTIFF_MAGIC_BE: [u8; 4] = *b"MM\0+";

/// Dispatches to the EXR or TIFF reader based on the file's magic number.
#[derive(Debug, Clone, Default)]
pub struct StandardDepthReader {
    exr: ExrDepthReader,
}

impl StandardDepthReader {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            exr: ExrDepthReader::new(channel),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.channel.clone())
    }
}

impl DepthFrameReader for StandardDepthReader {
    fn configure(&mut self, config: &ConversionConfig) {
        self.exr.configure(config);
    }

    fn read_depth(&self, data: &[u8]) -> Result<DepthFrame> {
        let magic: [u8; 4] = data
            .get(..4)
            .and_then(|head| head.try_into().ok())
            .ok_or_else(|| ConversionError::Decode(format!("file too short ({} bytes)", data.len())))?;

        match magic {
            EXR_MAGIC => {
                debug!("Detected OpenEXR input");
                self.exr.read_depth(data)
            }
            TIFF_MAGIC_LE | TIFF_MAGIC_BE | BIGTIFF_MAGIC_LE | BIGTIFF_MAGIC_BE => {
                debug!("Detected TIFF input");
                TiffDepthReader.read_depth(data)
            }
            _ => Err(ConversionError::UnsupportedFormat(format!(
                "unrecognised file signature {:02x?}",
                magic
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_signature() {
        let result = StandardDepthReader::default().read_depth(b"\x89PNG\r\n\x1a\n");
        assert!(matches!(result, Err(ConversionError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_truncated_input() {
        let result = StandardDepthReader::default().read_depth(b"II");
        assert!(matches!(result, Err(ConversionError::Decode(_))));
    }
}
