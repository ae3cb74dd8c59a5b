use crate::depth_pipeline::depth::types::DepthFrame;
use crate::depth_pipeline::packing::types::{CHANNELS, PackedFrame};

/// Returns the little-endian bytes of `value` as `[R, G, B, A]`.
#[inline]
pub fn pack_value(value: f32) -> [u8; 4] {
    value.to_bits().to_le_bytes()
}

/// Reassembles `r | g << 8 | b << 16 | a << 24` and reinterprets it as `f32`.
#[inline]
pub fn unpack_value(rgba: [u8; 4]) -> f32 {
    f32::from_bits(u32::from_le_bytes(rgba))
}

/// Inverse for channels delivered as normalised `[0, 1]` values, as a sampling
/// shader sees them. Each channel is mapped back with `round(x * 255)` first.
pub fn unpack_normalized(rgba: [f32; 4]) -> f32 {
    unpack_value(rgba.map(|channel| (channel * 255.0).round().clamp(0.0, 255.0) as u8))
}

/// Packs every pixel of `frame`. Output has the same dimensions and four channels.
pub fn pack_frame(frame: &DepthFrame) -> PackedFrame {
    PackedFrame {
        width: frame.width,
        height: frame.height,
        data: to_le_bytes(&frame.data),
    }
}

/// Inverse of [`pack_frame`].
pub fn unpack_frame(frame: &PackedFrame) -> DepthFrame {
    let data = frame
        .data
        .chunks_exact(CHANNELS)
        .map(|rgba| unpack_value([rgba[0], rgba[1], rgba[2], rgba[3]]))
        .collect();

    DepthFrame {
        width: frame.width,
        height: frame.height,
        data,
    }
}

// In-memory layout already is the packed layout on little-endian targets.
#[cfg(target_endian = "little")]
fn to_le_bytes(values: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice::<f32, u8>(values).to_vec()
}

#[cfg(target_endian = "big")]
fn to_le_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|&v| pack_value(v)).collect()
}
