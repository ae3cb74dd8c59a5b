use proptest::prelude::*;

use crate::depth_pipeline::depth::types::DepthFrame;
use crate::depth_pipeline::packing::{
    PackedFrame, pack_frame, pack_value, unpack_frame, unpack_normalized, unpack_value,
};

fn edge_values() -> Vec<f32> {
    vec![
        0.0,
        -0.0,
        f32::NAN,
        f32::from_bits(0x7fc0_0001), // quiet NaN with payload
        f32::from_bits(0xffa0_beef), // negative NaN with payload
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::from_bits(1), // smallest subnormal
        f32::from_bits(0x007f_ffff), // largest subnormal
        f32::MIN_POSITIVE,
        f32::MAX,
        f32::MIN,
        1.0,
        -2.5,
    ]
}

#[test]
fn test_channel_order_of_one() {
    assert_eq!(pack_value(1.0), [0x00, 0x00, 0x80, 0x3F]);
}

#[test]
fn test_unpack_assembles_little_endian() {
    assert_eq!(unpack_value([0x00, 0x00, 0x80, 0x3F]), 1.0);
    assert_eq!(unpack_value([0x01, 0x02, 0x03, 0x04]).to_bits(), 0x0403_0201);
}

#[test]
fn test_edge_values_round_trip_bit_exact() {
    for value in edge_values() {
        let restored = unpack_value(pack_value(value));
        assert_eq!(restored.to_bits(), value.to_bits(), "value {:?}", value);
    }
}

#[test]
fn test_negative_zero_keeps_sign() {
    assert_eq!(pack_value(-0.0), [0x00, 0x00, 0x00, 0x80]);
    assert!(unpack_value(pack_value(-0.0)).is_sign_negative());
}

#[test]
fn test_subnormal_not_flushed() {
    let smallest = f32::from_bits(1);
    assert_eq!(pack_value(smallest), [0x01, 0x00, 0x00, 0x00]);
    assert_eq!(unpack_value(pack_value(smallest)), smallest);
}

#[test]
fn test_frame_packing_is_pointwise() {
    let values = edge_values();
    let frame = DepthFrame::new(values.len() / 2, 2, values.clone()).unwrap();

    let packed = pack_frame(&frame);

    assert_eq!(packed.dimensions(), frame.dimensions());
    assert_eq!(packed.data.len(), values.len() * 4);
    for y in 0..frame.height {
        for x in 0..frame.width {
            let value = frame.get(x, y).unwrap();
            assert_eq!(packed.pixel(x, y), Some(pack_value(value)));
        }
    }
}

#[test]
fn test_frame_round_trip_bit_exact() {
    let values = edge_values();
    let frame = DepthFrame::new(values.len(), 1, values).unwrap();

    let restored = unpack_frame(&pack_frame(&frame));

    assert_eq!(restored.dimensions(), frame.dimensions());
    let bits: Vec<u32> = restored.data.iter().map(|v| v.to_bits()).collect();
    let expected: Vec<u32> = frame.data.iter().map(|v| v.to_bits()).collect();
    assert_eq!(bits, expected);
}

#[test]
fn test_unpack_normalized_matches_shader_remap() {
    let bytes = pack_value(0.3);
    let normalized = bytes.map(|b| b as f32 / 255.0);

    assert_eq!(unpack_normalized(normalized).to_bits(), 0.3f32.to_bits());
}

#[test]
fn test_packed_frame_first_difference() {
    let a = PackedFrame::new(2, 2, vec![0; 16]).unwrap();
    let mut b = a.clone();
    assert_eq!(a.first_difference(&b), None);

    b.data[13] = 7;
    assert_eq!(a.first_difference(&b), Some((1, 1)));
}

#[test]
fn test_packed_frame_rejects_wrong_length() {
    assert!(PackedFrame::new(2, 2, vec![0; 15]).is_err());
}

proptest! {
    #[test]
    fn prop_every_bit_pattern_round_trips(bits in any::<u32>()) {
        let value = f32::from_bits(bits);
        prop_assert_eq!(unpack_value(pack_value(value)).to_bits(), bits);
        prop_assert_eq!(pack_value(value), bits.to_le_bytes());
    }

    #[test]
    fn prop_normalized_inverse_is_exact(bits in any::<u32>()) {
        let normalized = pack_value(f32::from_bits(bits)).map(|b| b as f32 / 255.0);
        prop_assert_eq!(unpack_normalized(normalized).to_bits(), bits);
    }

    #[test]
    fn prop_frame_packing_equals_per_pixel(bits in proptest::collection::vec(any::<u32>(), 1..64)) {
        let values: Vec<f32> = bits.iter().map(|&b| f32::from_bits(b)).collect();
        let frame = DepthFrame::new(values.len(), 1, values).unwrap();

        let packed = pack_frame(&frame);

        let expected: Vec<u8> = bits.iter().flat_map(|b| b.to_le_bytes()).collect();
        prop_assert_eq!(packed.data, expected);
    }
}
