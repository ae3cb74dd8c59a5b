//! Encodes packed frames by piping raw RGBA into an `ffmpeg` child process.
//!
//! The input side is always `-f rawvideo -pix_fmt rgba`, and the stored pixel format
//! is pinned per codec (see `VideoCodec::stored_pix_fmt`), so the only transform
//! ffmpeg may apply is a lossless channel reorder.

use std::io::{Read, Write};
use std::path::Path;
use std::process::ChildStdin;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use tracing::{debug, info, warn};

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::packing::types::PackedFrame;
use crate::depth_pipeline::video::types::ConversionConfig;
use crate::depth_pipeline::video::writer::FrameSink;

pub struct FfmpegSink {
    child: FfmpegChild,
    stdin: Option<ChildStdin>,
    width: usize,
    height: usize,
    frames_written: usize,
}

impl FfmpegSink {
    pub fn spawn(
        output: &Path,
        width: usize,
        height: usize,
        config: &ConversionConfig,
    ) -> Result<Self> {
        let encoder = config.codec.ffmpeg_encoder().ok_or_else(|| {
            ConversionError::EncodeError(format!("codec {:?} is not encoded by ffmpeg", config.codec))
        })?;

        let mut command = match &config.ffmpeg_path {
            Some(path) => FfmpegCommand::new_with_path(path),
            None => FfmpegCommand::new(),
        };

        command
            .hide_banner()
            // Only errors on stderr; nothing drains it until the stream is finished.
            .args(["-loglevel", "error", "-nostats"]);
        if config.overwrite {
            command.overwrite();
        } else {
            command.no_overwrite();
        }

        // Input options must come before `-i`.
        command
            .format("rawvideo")
            .pix_fmt("rgba")
            .size(width as u32, height as u32)
            .rate(config.frame_rate as f32)
            .input("-")
            .codec_video(encoder)
            .args(config.codec.encoder_args())
            .pix_fmt(config.codec.stored_pix_fmt())
            .output(output);

        info!(
            encoder,
            pix_fmt = config.codec.stored_pix_fmt(),
            fps = config.frame_rate,
            "Starting ffmpeg"
        );

        let mut child = command.spawn().map_err(|e| {
            ConversionError::EncodeError(format!("failed to start ffmpeg: {}", e))
        })?;
        let stdin = child
            .take_stdin()
            .ok_or_else(|| ConversionError::EncodeError("failed to get ffmpeg stdin".to_string()))?;

        Ok(Self {
            child,
            stdin: Some(stdin),
            width,
            height,
            frames_written: 0,
        })
    }

    /// Waits for ffmpeg to exit and turns a non-zero status into an error carrying its stderr.
    fn wait_for_exit(&mut self) -> Result<()> {
        let mut stderr = String::new();
        if let Some(mut pipe) = self.child.take_stderr() {
            pipe.read_to_string(&mut stderr)?;
        }
        let stderr = stderr.trim().to_string();

        let status = self.child.wait()?;
        if !status.success() {
            return Err(ConversionError::FfmpegFailed { status, stderr });
        }
        if !stderr.is_empty() {
            warn!("ffmpeg: {}", stderr);
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn write_frame(&mut self, frame: &PackedFrame) -> Result<()> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(ConversionError::EncodeError(format!(
                "frame is {}x{}, stream was opened for {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ConversionError::EncodeError("ffmpeg stdin already closed".to_string()))?;

        if let Err(e) = stdin.write_all(&frame.data) {
            // Usually a broken pipe because ffmpeg exited; its stderr says why.
            self.stdin = None;
            self.wait_for_exit()?;
            return Err(ConversionError::EncodeError(format!(
                "failed to write frame {} to ffmpeg: {}",
                self.frames_written, e
            )));
        }

        self.frames_written += 1;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        if let Some(mut stdin) = self.stdin.take() {
            stdin.flush()?;
        }
        self.wait_for_exit()?;
        debug!("ffmpeg finished after {} frames", self.frames_written);
        Ok(())
    }

    fn abort(mut self: Box<Self>) {
        self.stdin = None;
        if let Err(e) = self.child.kill() {
            debug!("ffmpeg kill failed: {}", e);
        }
        if let Err(e) = self.child.wait() {
            debug!("ffmpeg wait failed: {}", e);
        }
        warn!("Encoding aborted after {} frames", self.frames_written);
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // Reached without finish/abort only on panic; don't leave ffmpeg waiting on stdin.
        if self.stdin.take().is_some() {
            let _ = self.child.kill();
        }
    }
}
