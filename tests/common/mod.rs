#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use exr::prelude::*;
use tiff::encoder::{TiffEncoder, colortype};

/// Values whose bit patterns must survive the whole pipeline.
pub fn edge_values() -> Vec<f32> {
    vec![
        0.0,
        -0.0,
        f32::from_bits(0x7fc0_0000),
        f32::from_bits(0x7fc0_0001),
        f32::from_bits(0xffa5_5a5a),
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::from_bits(1),
        f32::from_bits(0x8000_0001),
        f32::MIN_POSITIVE,
        f32::MAX,
        f32::MIN,
        1.0,
        0.1,
        -1234.5678,
        65504.0,
    ]
}

pub fn bits(values: &[f32]) -> Vec<u32> {
    values.iter().map(|v| v.to_bits()).collect()
}

pub fn write_tiff_frame(path: &Path, width: u32, height: u32, values: &[f32]) {
    let mut file = File::create(path).unwrap();
    TiffEncoder::new(&mut file)
        .unwrap()
        .write_image::<colortype::Gray32Float>(width, height, values)
        .unwrap();
}

pub fn write_exr_frame(path: &Path, channel: &str, width: usize, height: usize, values: &[f32]) {
    let values = values.to_vec();
    let channels = SpecificChannels::build()
        .with_channel(channel)
        .with_pixel_fn(move |position: Vec2<usize>| (values[position.y() * width + position.x()],));
    let layer = Layer::new(
        (width, height),
        LayerAttributes::named("depth"),
        Encoding::FAST_LOSSLESS,
        channels,
    );
    Image::from_layer(layer).write().to_file(path).unwrap();
}
