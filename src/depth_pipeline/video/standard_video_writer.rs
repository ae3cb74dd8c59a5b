use std::path::Path;

use tracing::debug;

use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::video::ffmpeg_sink::FfmpegSink;
use crate::depth_pipeline::video::raw_sink::RawSink;
use crate::depth_pipeline::video::types::{ConversionConfig, VideoCodec};
use crate::depth_pipeline::video::writer::{FrameSink, VideoWriter};

/// Picks the sink for the configured codec: ffmpeg for containers, a plain file for raw output.
pub struct StandardVideoWriter;

impl VideoWriter for StandardVideoWriter {
    fn open(
        &self,
        output: &Path,
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<Box<dyn FrameSink>> {
        debug!("Opening {:?} stream: {}x{}", config.codec, width, height);

        match config.codec {
            VideoCodec::RawRgba => Ok(Box::new(RawSink::create(
                output,
                width,
                height,
                config.overwrite,
            )?)),
            VideoCodec::Ffv1 | VideoCodec::Png => {
                Ok(Box::new(FfmpegSink::spawn(output, width, height, config)?))
            }
        }
    }
}
