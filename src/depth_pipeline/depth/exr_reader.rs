//! OpenEXR depth reader built on the `exr` crate.
//!
//! Renderers usually store depth in a dedicated `Z` channel next to (or instead of)
//! the colour channels, so the reader picks one named channel out of the first
//! layer that carries it and ignores everything else.

use std::io::Cursor;

use exr::meta::MetaData;
use exr::meta::attribute::SampleType;
use exr::prelude::*;
use tracing::debug;

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::depth::reader::DepthFrameReader;
use crate::depth_pipeline::depth::types::DepthFrame;
use crate::depth_pipeline::video::types::ConversionConfig;

/// Channel read when none is configured.
pub const DEFAULT_DEPTH_CHANNEL: &str = "Z";

/// Reads one floating point channel of an EXR image.
///
/// Both `F32` and `F16` channels are accepted; half floats widen to `f32` exactly.
/// `U32` channels are rejected because converting them to `f32` would round.
#[derive(Debug, Clone)]
pub struct ExrDepthReader {
    channel: String,
}

impl ExrDepthReader {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    fn check_channel(&self, data: &[u8]) -> Result<()> {
        let meta = MetaData::read_from_buffered(Cursor::new(data), false)
            .map_err(|e| ConversionError::Decode(e.to_string()))?;

        let channel = meta
            .headers
            .iter()
            .flat_map(|header| header.channels.list.iter())
            .find(|description| description.name.to_string() == self.channel)
            .ok_or_else(|| ConversionError::MissingChannel {
                channel: self.channel.clone(),
            })?;

        debug!("EXR channel '{}' has sample type {:?}", self.channel, channel.sample_type);

        match channel.sample_type {
            SampleType::F32 | SampleType::F16 => Ok(()),
            SampleType::U32 => Err(ConversionError::UnsupportedFormat(format!(
                "EXR channel '{}' holds u32 samples, expected floating point",
                self.channel
            ))),
        }
    }
}

impl Default for ExrDepthReader {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_CHANNEL)
    }
}

impl DepthFrameReader for ExrDepthReader {
    fn configure(&mut self, config: &ConversionConfig) {
        self.channel = config.channel.clone();
    }

    fn read_depth(&self, data: &[u8]) -> Result<DepthFrame> {
        debug!("Decoding EXR image, {} bytes", data.len());

        self.check_channel(data)?;

        let image = read()
            .no_deep_data()
            .largest_resolution_level()
            .specific_channels()
            .required(self.channel.as_str())
            .collect_pixels(
                |resolution: Vec2<usize>, _| {
                    DepthFrame::zeroed(resolution.width(), resolution.height())
                },
                |frame: &mut DepthFrame, position: Vec2<usize>, (depth,): (f32,)| {
                    let index = position.y() * frame.width + position.x();
                    frame.data[index] = depth;
                },
            )
            .first_valid_layer()
            .all_attributes()
            .from_buffered(Cursor::new(data))
            .map_err(|e| ConversionError::Decode(e.to_string()))?;

        let frame = image.layer_data.channel_data.pixels;
        debug!("Decoded EXR depth: {}x{}", frame.width, frame.height);
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_exr(channel: &str, width: usize, height: usize, values: &[f32]) -> Vec<u8> {
        let values = values.to_vec();
        let channels = SpecificChannels::build()
            .with_channel(channel)
            .with_pixel_fn(move |position: Vec2<usize>| (values[position.y() * width + position.x()],));
        let image = Image::from_channels((width, height), channels);

        let mut buffer = Cursor::new(Vec::new());
        image.write().to_buffered(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_reads_named_channel_bit_exact() {
        let values = [
            1.0,
            -0.0,
            f32::from_bits(1),
            f32::INFINITY,
            f32::MAX,
            0.125,
        ];
        let bytes = encode_exr("Z", 3, 2, &values);

        let frame = ExrDepthReader::default().read_depth(&bytes).unwrap();

        assert_eq!(frame.dimensions(), (3, 2));
        let bits: Vec<u32> = frame.data.iter().map(|v| v.to_bits()).collect();
        let expected: Vec<u32> = values.iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits, expected);
    }

    #[test]
    fn test_missing_channel() {
        let bytes = encode_exr("Y", 2, 2, &[0.0; 4]);

        let result = ExrDepthReader::new("Z").read_depth(&bytes);

        assert!(matches!(
            result,
            Err(ConversionError::MissingChannel { channel }) if channel == "Z"
        ));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = ExrDepthReader::default().read_depth(b"not an exr file");
        assert!(matches!(result, Err(ConversionError::Decode(_))));
    }
}
