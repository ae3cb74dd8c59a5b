use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::depth_pipeline::common::error::{ConversionError, Result};
use crate::depth_pipeline::packing::types::PackedFrame;
use crate::depth_pipeline::video::writer::FrameSink;

/// Writes frames back to back as raw RGBA8 with no header or container.
pub struct RawSink {
    output: BufWriter<File>,
    width: usize,
    height: usize,
    frames_written: usize,
}

impl RawSink {
    pub fn create(output: &Path, width: usize, height: usize, overwrite: bool) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let file = options.open(output).map_err(|e| {
            ConversionError::EncodeError(format!("{}: {}", output.display(), e))
        })?;

        Ok(Self {
            output: BufWriter::new(file),
            width,
            height,
            frames_written: 0,
        })
    }
}

impl FrameSink for RawSink {
    fn write_frame(&mut self, frame: &PackedFrame) -> Result<()> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(ConversionError::EncodeError(format!(
                "frame is {}x{}, stream was opened for {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        self.output.write_all(&frame.data)?;
        self.frames_written += 1;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        self.output.flush()?;
        debug!("Raw stream finished after {} frames", self.frames_written);
        Ok(())
    }
}
