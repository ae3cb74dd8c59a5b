//! Float to RGBA8 packing module
//!
//! Each binary32 depth value is stored as its four little-endian bytes in the
//! R, G, B and A channels of one pixel. The transform is pure bit reinterpretation
//! and therefore lossless for every bit pattern, NaN payloads included.

mod packer;
pub mod types;

#[cfg(test)]
mod tests;

pub use packer::{pack_frame, pack_value, unpack_frame, unpack_normalized, unpack_value};
pub use types::{PackedFrame, CHANNELS};
