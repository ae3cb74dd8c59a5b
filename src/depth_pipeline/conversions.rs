//! Pipeline conversions module
//!
//! This module contains the orchestration that turns a directory of depth frames
//! into one video.

mod frame_source;
mod depth_to_video;


pub use frame_source::{discover_frames, is_depth_frame, DEPTH_EXTENSIONS};
pub use depth_to_video::{ConversionReport, DepthToVideoPipeline};
