//! Full pipeline through a real ffmpeg binary. Skipped when none is installed.

mod common;

use depth_video_rs::depth_pipeline::{
    ConversionConfig, DepthToVideoPipeline, StandardVideoReader, VideoCodec, VideoReader,
    unpack_frame,
};
use ffmpeg_sidecar::command::ffmpeg_is_installed;
use tempfile::TempDir;

use common::{bits, edge_values, write_tiff_frame};

fn round_trip(codec: VideoCodec, extension: &str) {
    if !ffmpeg_is_installed() {
        eprintln!("ffmpeg not installed, skipping {:?} round trip", codec);
        return;
    }

    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let values = edge_values();
    let frames: Vec<Vec<f32>> = (0..4)
        .map(|i| values.iter().map(|v| v + i as f32).collect())
        .collect();
    for (i, frame) in frames.iter().enumerate() {
        write_tiff_frame(&input.path().join(format!("frame_{:02}.tif", i)), 4, 4, frame);
    }
    let video = output.path().join(format!("depth.{}", extension));
    let config = ConversionConfig::builder().codec(codec).verify(true).build();

    let report = DepthToVideoPipeline::new(config.clone())
        .convert_directory(input.path(), &video)
        .unwrap();
    assert!(report.verified);
    assert_eq!(report.frames, frames.len());

    let decoded: Vec<_> = StandardVideoReader
        .read_frames(&video, 4, 4, &config)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(decoded.len(), frames.len());
    for (i, packed) in decoded.iter().enumerate() {
        assert_eq!(bits(&unpack_frame(packed).data), bits(&frames[i]), "frame {}", i);
    }
}

#[test]
fn test_ffv1_round_trip_bit_exact() {
    round_trip(VideoCodec::Ffv1, "mkv");
}

#[test]
fn test_png_round_trip_bit_exact() {
    round_trip(VideoCodec::Png, "mov");
}
