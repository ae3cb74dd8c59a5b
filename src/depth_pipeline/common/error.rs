use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No depth frames (*.exr, *.tif, *.tiff) found in {}", .0.display())]
    NoInputFrames(PathBuf),

    #[error("Failed to decode frame {index} ({}): {message}", .path.display())]
    DecodeError {
        path: PathBuf,
        index: usize,
        message: String,
    },

    #[error("Failed to decode depth image: {0}")]
    Decode(String),

    #[error("Channel '{channel}' not found in EXR image")]
    MissingChannel { channel: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error(
        "Size mismatch at frame {index} ({}): expected {}x{}, got {}x{}",
        .path.display(), .expected.0, .expected.1, .actual.0, .actual.1
    )]
    DimensionMismatch {
        path: PathBuf,
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Failed to encode video: {0}")]
    EncodeError(String),

    #[error("Failed to encode frame {index} ({}): {source}", .path.display())]
    FrameEncodeError {
        path: PathBuf,
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },

    #[error("FFmpeg exited with {status}: {stderr}")]
    FfmpegFailed { status: ExitStatus, stderr: String },

    #[error("Verification failed at frame {index}: {message}")]
    VerificationFailed { index: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Attaches the frame's file and position in the sequence to a reader-level error.
    pub(crate) fn for_frame(self, path: &std::path::Path, index: usize) -> Self {
        match self {
            err @ (ConversionError::DecodeError { .. } | ConversionError::DimensionMismatch { .. }) => err,
            other => ConversionError::DecodeError {
                path: path.to_path_buf(),
                index,
                message: other.to_string(),
            },
        }
    }

    /// Attaches the frame being written when the encoder failed.
    pub(crate) fn while_encoding(self, path: &std::path::Path, index: usize) -> Self {
        ConversionError::FrameEncodeError {
            path: path.to_path_buf(),
            index,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
