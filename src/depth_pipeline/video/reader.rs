//! Reads an encoded output back into packed frames.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use ffmpeg_sidecar::iter::FfmpegIterator;
use tracing::{debug, trace, warn};

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::packing::types::PackedFrame;
use crate::depth_pipeline::video::types::{ConversionConfig, VideoCodec};

pub type FrameStream = Box<dyn Iterator<Item = Result<PackedFrame>>>;

pub trait VideoReader {
    /// Streams the frames of `path` in presentation order.
    fn read_frames(
        &self,
        path: &Path,
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<FrameStream>;
}

pub struct StandardVideoReader;

impl VideoReader for StandardVideoReader {
    fn read_frames(
        &self,
        path: &Path,
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<FrameStream> {
        match config.codec {
            VideoCodec::RawRgba => Ok(Box::new(RawFrameStream::open(path, width, height)?)),
            VideoCodec::Ffv1 | VideoCodec::Png => Ok(Box::new(FfmpegFrameStream::spawn(
                path,
                width,
                height,
                config,
            )?)),
        }
    }
}

struct RawFrameStream {
    input: BufReader<File>,
    width: usize,
    height: usize,
}

impl RawFrameStream {
    fn open(path: &Path, width: usize, height: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self {
            input: BufReader::new(file),
            width,
            height,
        })
    }
}

impl Iterator for RawFrameStream {
    type Item = Result<PackedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut data = vec![0u8; PackedFrame::byte_len(self.width, self.height)];
        let mut filled = 0;
        while filled < data.len() {
            match self.input.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }

        match filled {
            0 => None,
            n if n == data.len() => Some(PackedFrame::new(self.width, self.height, data)),
            n => Some(Err(ConversionError::Decode(format!(
                "raw stream ends with a partial frame of {} bytes",
                n
            )))),
        }
    }
}

/// Decodes through `ffmpeg -f rawvideo -pix_fmt rgba -`, one event at a time.
struct FfmpegFrameStream {
    child: FfmpegChild,
    events: FfmpegIterator,
    errors: Vec<String>,
    width: usize,
    height: usize,
    done: bool,
}

impl FfmpegFrameStream {
    fn spawn(path: &Path, width: usize, height: usize, config: &ConversionConfig) -> Result<Self> {
        let mut command = match &config.ffmpeg_path {
            Some(ffmpeg) => FfmpegCommand::new_with_path(ffmpeg),
            None => FfmpegCommand::new(),
        };

        let mut child = command
            .hide_banner()
            .input(path)
            .format("rawvideo")
            .pix_fmt("rgba")
            .output("-")
            .spawn()
            .map_err(|e| ConversionError::Decode(format!("failed to start ffmpeg: {}", e)))?;

        let events = child
            .iter()
            .map_err(|e| ConversionError::Decode(format!("failed to read ffmpeg output: {}", e)))?;

        debug!("Decoding {} through ffmpeg", path.display());

        Ok(Self {
            child,
            events,
            errors: Vec::new(),
            width,
            height,
            done: false,
        })
    }

    fn exit_result(&mut self) -> Option<Result<PackedFrame>> {
        match self.child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => Some(Err(ConversionError::FfmpegFailed {
                status,
                stderr: self.errors.join("\n"),
            })),
            Err(e) => Some(Err(e.into())),
        }
    }
}

impl Iterator for FfmpegFrameStream {
    type Item = Result<PackedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for event in self.events.by_ref() {
            match event {
                FfmpegEvent::OutputFrame(frame) => {
                    trace!("Decoded frame {}: {}x{} {}", frame.frame_num, frame.width, frame.height, frame.pix_fmt);
                    if (frame.width as usize, frame.height as usize) != (self.width, self.height) {
                        self.done = true;
                        let _ = self.child.kill();
                        let _ = self.child.wait();
                        return Some(Err(ConversionError::Decode(format!(
                            "decoded frame is {}x{}, expected {}x{}",
                            frame.width, frame.height, self.width, self.height
                        ))));
                    }
                    return Some(PackedFrame::new(self.width, self.height, frame.data));
                }
                FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => {
                    self.errors.push(message);
                }
                FfmpegEvent::Error(message) => {
                    warn!("ffmpeg: {}", message);
                    self.errors.push(message);
                }
                _ => {}
            }
        }

        self.done = true;
        self.exit_result()
    }
}

impl Drop for FfmpegFrameStream {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
