//! Video conversion configuration types

use std::path::PathBuf;

use crate::depth_pipeline::depth::DEFAULT_DEPTH_CHANNEL;

/// Output codecs. Every variant stores each 8-bit channel exactly: no chroma
/// subsampling, no quantisation and no colour-space conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VideoCodec {
    /// FFV1 level 3 (lossless, default)
    #[default]
    Ffv1,
    /// PNG frames inside the container (lossless)
    Png,
    /// Headerless concatenated RGBA8 frames, written without ffmpeg
    #[value(name = "raw")]
    RawRgba,
}

impl VideoCodec {
    /// Name of the ffmpeg encoder, or `None` when ffmpeg is not involved.
    pub fn ffmpeg_encoder(&self) -> Option<&'static str> {
        match self {
            VideoCodec::Ffv1 => Some("ffv1"),
            VideoCodec::Png => Some("png"),
            VideoCodec::RawRgba => None,
        }
    }

    /// Pixel format stored in the stream. Pinned so ffmpeg can never pick a YUV format.
    pub fn stored_pix_fmt(&self) -> &'static str {
        match self {
            // FFV1 has no packed rgba; bgra is the same bytes with R and B swapped.
            VideoCodec::Ffv1 => "bgra",
            VideoCodec::Png | VideoCodec::RawRgba => "rgba",
        }
    }

    pub fn encoder_args(&self) -> &'static [&'static str] {
        match self {
            VideoCodec::Ffv1 => &["-level", "3"],
            VideoCodec::Png | VideoCodec::RawRgba => &[],
        }
    }
}

/// Configuration for depth sequence to video conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// EXR channel holding the depth values
    pub channel: String,
    /// Output codec
    pub codec: VideoCodec,
    /// Frames per second written into the container
    pub frame_rate: u32,
    /// ffmpeg binary to run; `None` uses the one on `PATH`
    pub ffmpeg_path: Option<PathBuf>,
    /// Frames decoded and packed concurrently; 1 keeps everything on the calling thread
    pub jobs: usize,
    /// Whether an existing output file is replaced
    pub overwrite: bool,
    /// Whether to reject zero-sized frames before encoding
    pub validate_dimensions: bool,
    /// Whether to decode the output again and compare it with the input
    pub verify: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_DEPTH_CHANNEL.to_string(),
            codec: VideoCodec::Ffv1,
            frame_rate: 30,
            ffmpeg_path: None,
            jobs: 1,
            overwrite: true,
            validate_dimensions: true,
            verify: false,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    channel: Option<String>,
    codec: Option<VideoCodec>,
    frame_rate: Option<u32>,
    ffmpeg_path: Option<Option<PathBuf>>,
    jobs: Option<usize>,
    overwrite: Option<bool>,
    validate_dimensions: Option<bool>,
    verify: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn codec(mut self, codec: VideoCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    pub fn ffmpeg_path(mut self, path: Option<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path);
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = Some(verify);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            channel: self.channel.unwrap_or(default.channel),
            codec: self.codec.unwrap_or(default.codec),
            frame_rate: self.frame_rate.unwrap_or(default.frame_rate).max(1),
            ffmpeg_path: self.ffmpeg_path.unwrap_or(default.ffmpeg_path),
            jobs: self.jobs.unwrap_or(default.jobs).max(1),
            overwrite: self.overwrite.unwrap_or(default.overwrite),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            verify: self.verify.unwrap_or(default.verify),
        }
    }
}
