//! Packed frame types

use crate::depth_pipeline::common::error::{ConversionError, Result};

/// Number of 8-bit channels a packed pixel occupies.
pub const CHANNELS: usize = 4;

/// An RGBA8 frame whose pixels hold the little-endian bytes of one `f32` each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFrame {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Row-major interleaved channels [R, G, B, A, R, G, B, A, ...]
    pub data: Vec<u8>,
}

impl PackedFrame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width.checked_mul(height).and_then(|n| n.checked_mul(CHANNELS));
        if expected != Some(data.len()) {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Size in bytes of one frame of the given dimensions.
    pub fn byte_len(width: usize, height: usize) -> usize {
        width * height * CHANNELS
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * CHANNELS;
        self.data
            .get(offset..offset + CHANNELS)
            .and_then(|bytes| bytes.try_into().ok())
    }

    /// Position of the first pixel that differs from `other`, if any.
    pub fn first_difference(&self, other: &PackedFrame) -> Option<(usize, usize)> {
        self.data
            .chunks_exact(CHANNELS)
            .zip(other.data.chunks_exact(CHANNELS))
            .position(|(a, b)| a != b)
            .map(|index| (index % self.width.max(1), index / self.width.max(1)))
    }
}
