use std::path::Path;

use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::packing::types::PackedFrame;
use crate::depth_pipeline::video::types::ConversionConfig;

/// Opens an encoder for a sequence of equally sized packed frames.
pub trait VideoWriter {
    fn open(
        &self,
        output: &Path,
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<Box<dyn FrameSink>>;
}

/// One open output stream. Frames are stored in the order they are written.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &PackedFrame) -> Result<()>;

    /// Flushes and closes the stream. The output is only valid after this returns `Ok`.
    fn finish(self: Box<Self>) -> Result<()>;

    /// Stops encoding after a failure elsewhere in the pipeline.
    fn abort(self: Box<Self>) {}
}
