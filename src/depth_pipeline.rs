//! Depth sequence to video pipeline module
//!
//! This module provides a structured approach to packing float depth images into
//! RGBA8 video, with separate modules for depth reading, packing, video writing,
//! and conversion orchestration.

pub mod depth;
pub mod packing;
pub mod video;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    PipelineTimings,
    Result,
};

pub use depth::{
    DepthFrame,
    DepthFrameReader,
    ExrDepthReader,
    StandardDepthReader,
    TiffDepthReader,
};

pub use packing::{
    PackedFrame,
    pack_frame,
    pack_value,
    unpack_frame,
    unpack_normalized,
    unpack_value,
};

pub use video::{
    ConversionConfig,
    ConversionConfigBuilder,
    FrameSink,
    StandardVideoReader,
    StandardVideoWriter,
    VideoCodec,
    VideoReader,
    VideoWriter,
};

pub use conversions::{
    ConversionReport,
    DepthToVideoPipeline,
    discover_frames,
};
