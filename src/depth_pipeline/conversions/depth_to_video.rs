use std::path::{Path, PathBuf};
use std::time::Duration;

use rayon::prelude::*;
use tracing::{debug, error, info, instrument};

use crate::depth_pipeline::{
    common::error::{ConversionError, Result},
    common::timing::{PipelineTimings, Timer},
    conversions::frame_source::discover_frames,
    depth::{DepthFrameReader, StandardDepthReader},
    packing::{PackedFrame, pack_frame},
    video::{
        ConversionConfig, FrameSink, StandardVideoReader, StandardVideoWriter, VideoReader,
        VideoWriter,
    },
};

/// Summary of a finished conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub frames: usize,
    pub width: usize,
    pub height: usize,
    pub verified: bool,
    pub timings: PipelineTimings,
}

struct LoadedFrame {
    frame: PackedFrame,
    decode: Duration,
    pack: Duration,
}

struct OpenStream {
    sink: Box<dyn FrameSink>,
    dimensions: (usize, usize),
}

pub struct DepthToVideoPipeline<R: DepthFrameReader, W: VideoWriter, V: VideoReader> {
    reader: R,
    writer: W,
    video_reader: V,
    config: ConversionConfig,
}

impl DepthToVideoPipeline<StandardDepthReader, StandardVideoWriter, StandardVideoReader> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: StandardDepthReader::from_config(&config),
            writer: StandardVideoWriter,
            video_reader: StandardVideoReader,
            config,
        }
    }
}

impl<R: DepthFrameReader + Sync, W: VideoWriter, V: VideoReader> DepthToVideoPipeline<R, W, V> {
    pub fn with_custom(reader: R, writer: W, video_reader: V, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            video_reader,
            config,
        }
    }

    fn validate_dimensions(enabled: bool, width: usize, height: usize) -> Result<()> {
        if !enabled {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Decodes one depth image and packs it.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn pack(&self, input_data: &[u8]) -> Result<PackedFrame> {
        let depth = self.reader.read_depth(input_data)?;
        Self::validate_dimensions(self.config.validate_dimensions, depth.width, depth.height)?;
        Ok(pack_frame(&depth))
    }

    fn load_frame(reader: &R, validate: bool, index: usize, path: &Path) -> Result<LoadedFrame> {
        let _span = tracing::debug_span!("load_frame", index, path = %path.display()).entered();

        let decode_timer = Timer::start("decode");
        let depth = std::fs::read(path)
            .map_err(|e| ConversionError::InputReadError(format!("{}: {}", path.display(), e)))
            .and_then(|data| reader.read_depth(&data))
            .map_err(|e| e.for_frame(path, index))?;
        let (_, decode) = decode_timer.stop();

        Self::validate_dimensions(validate, depth.width, depth.height)
            .map_err(|e| e.for_frame(path, index))?;

        let pack_timer = Timer::start("pack");
        let frame = pack_frame(&depth);
        let (_, pack) = pack_timer.stop();

        debug!(index, width = frame.width, height = frame.height, "Packed frame");
        Ok(LoadedFrame {
            frame,
            decode,
            pack,
        })
    }

    /// Decodes and packs a batch of frames, in parallel when `jobs > 1`.
    /// Results keep the batch order.
    fn load_batch(&self, start: usize, batch: &[PathBuf]) -> Vec<Result<LoadedFrame>> {
        let reader = &self.reader;
        let validate = self.config.validate_dimensions;
        if self.config.jobs > 1 {
            batch
                .par_iter()
                .enumerate()
                .map(|(offset, path)| Self::load_frame(reader, validate, start + offset, path))
                .collect()
        } else {
            batch
                .iter()
                .enumerate()
                .map(|(offset, path)| Self::load_frame(reader, validate, start + offset, path))
                .collect()
        }
    }

    fn encode_frames(
        &self,
        frames: &[PathBuf],
        output_path: &Path,
        stream: &mut Option<OpenStream>,
        timings: &mut PipelineTimings,
    ) -> Result<()> {
        let jobs = self.config.jobs.max(1);
        for (batch_index, batch) in frames.chunks(jobs).enumerate() {
            let start = batch_index * jobs;
            let loaded = {
                let _span = tracing::info_span!("decode_and_pack", start, count = batch.len()).entered();
                self.load_batch(start, batch)
            };

            for (offset, (path, result)) in batch.iter().zip(loaded).enumerate() {
                let index = start + offset;
                let LoadedFrame {
                    frame,
                    decode,
                    pack,
                } = result?;
                timings.add_step("decode", decode);
                timings.add_step("pack", pack);

                if stream.is_none() {
                    let (width, height) = frame.dimensions();
                    let _span = tracing::info_span!("open_encoder", width, height).entered();
                    let sink = self
                        .writer
                        .open(output_path, width, height, &self.config)
                        .map_err(|e| e.while_encoding(path, index))?;
                    *stream = Some(OpenStream {
                        sink,
                        dimensions: (width, height),
                    });
                }
                let Some(open) = stream.as_mut() else {
                    return Err(ConversionError::EncodeError("encoder was never opened".to_string()));
                };

                if frame.dimensions() != open.dimensions {
                    return Err(ConversionError::DimensionMismatch {
                        path: path.clone(),
                        index,
                        expected: open.dimensions,
                        actual: frame.dimensions(),
                    });
                }

                let encode_timer = Timer::start("encode");
                open.sink
                    .write_frame(&frame)
                    .map_err(|e| e.while_encoding(path, index))?;
                timings.record(encode_timer);
            }
        }
        Ok(())
    }

    /// Encodes `frames` into `output_path` in the given order.
    ///
    /// Any failure aborts the encoder; the output file is then not a valid video.
    #[instrument(skip(self, frames, output_path), fields(frames = frames.len()))]
    pub fn convert_frames<P: AsRef<Path>>(
        &self,
        frames: &[PathBuf],
        output_path: P,
    ) -> Result<ConversionReport> {
        let output_path = output_path.as_ref();
        if frames.is_empty() {
            return Err(ConversionError::EncodeError("no frames to encode".to_string()));
        }

        info!(
            output = %output_path.display(),
            codec = ?self.config.codec,
            jobs = self.config.jobs,
            "Starting depth to video conversion"
        );

        let mut timings = PipelineTimings::new();
        let mut stream = None;

        if let Err(e) = self.encode_frames(frames, output_path, &mut stream, &mut timings) {
            if let Some(open) = stream.take() {
                open.sink.abort();
            }
            error!("Conversion failed: {}", e);
            return Err(e);
        }

        let OpenStream { sink, dimensions } = stream
            .take()
            .ok_or_else(|| ConversionError::EncodeError("encoder was never opened".to_string()))?;
        let (width, height) = dimensions;

        {
            let _span = tracing::info_span!("finalize").entered();
            let finalize_timer = Timer::start("finalize");
            sink.finish()?;
            timings.record(finalize_timer);
        }

        if self.config.verify {
            let verify_timer = Timer::start("verify");
            self.verify_output(frames, output_path, width, height)?;
            timings.record(verify_timer);
        }

        info!(
            frames = frames.len(),
            width,
            height,
            "Conversion complete"
        );
        Ok(ConversionReport {
            frames: frames.len(),
            width,
            height,
            verified: self.config.verify,
            timings,
        })
    }

    #[instrument(skip(self, input_dir, output_path))]
    pub fn convert_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_path: Q,
    ) -> Result<ConversionReport> {
        let input_dir = input_dir.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_dir.display(),
            output = %output_path.display(),
            "Converting directory"
        );

        let frames = {
            let _span = tracing::info_span!("discover_frames").entered();
            discover_frames(input_dir)?
        };

        self.convert_frames(&frames, output_path)
    }

    /// Reads `output_path` back and checks every frame against the re-packed input.
    #[instrument(skip(self, frames, output_path))]
    pub fn verify_output(
        &self,
        frames: &[PathBuf],
        output_path: &Path,
        width: usize,
        height: usize,
    ) -> Result<()> {
        let mut decoded = self
            .video_reader
            .read_frames(output_path, width, height, &self.config)?;

        for (index, path) in frames.iter().enumerate() {
            let expected =
                Self::load_frame(&self.reader, self.config.validate_dimensions, index, path)?.frame;
            let actual = decoded.next().ok_or_else(|| ConversionError::VerificationFailed {
                index,
                message: format!("video ends after {} of {} frames", index, frames.len()),
            })??;

            if actual.dimensions() != expected.dimensions() {
                return Err(ConversionError::VerificationFailed {
                    index,
                    message: format!(
                        "decoded frame is {}x{}, expected {}x{}",
                        actual.width, actual.height, expected.width, expected.height
                    ),
                });
            }
            if let Some((x, y)) = expected.first_difference(&actual) {
                return Err(ConversionError::VerificationFailed {
                    index,
                    message: format!(
                        "pixel ({}, {}) decoded as {:02x?}, expected {:02x?} ({})",
                        x,
                        y,
                        actual.pixel(x, y).unwrap_or_default(),
                        expected.pixel(x, y).unwrap_or_default(),
                        path.display()
                    ),
                });
            }
        }

        if let Some(extra) = decoded.next() {
            extra?;
            return Err(ConversionError::VerificationFailed {
                index: frames.len(),
                message: format!("video has more than {} frames", frames.len()),
            });
        }

        info!(frames = frames.len(), "Output verified bit-exact");
        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.reader.configure(&config);
        self.config = config;
    }
}
