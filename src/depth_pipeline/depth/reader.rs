use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::depth::types::DepthFrame;
use crate::depth_pipeline::video::types::ConversionConfig;

pub trait DepthFrameReader {
    fn read_depth(&self, data: &[u8]) -> Result<DepthFrame>;

    /// Picks up reader settings (such as the EXR channel) from a new configuration.
    fn configure(&mut self, _config: &ConversionConfig) {}
}
