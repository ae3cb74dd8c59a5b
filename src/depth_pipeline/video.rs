//! Video writing module
//!
//! This module hands packed frames to a channel-exact video encoder and can read
//! the result back for verification.

mod writer;
mod reader;
mod ffmpeg_sink;
mod raw_sink;
mod standard_video_writer;
pub mod types;

pub use writer::{FrameSink, VideoWriter};
pub use reader::{FrameStream, StandardVideoReader, VideoReader};
pub use ffmpeg_sink::FfmpegSink;
pub use raw_sink::RawSink;
pub use standard_video_writer::StandardVideoWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, VideoCodec};
