//! Checks the exact command line handed to ffmpeg, using a shell script that
//! records its arguments in place of a real binary.
#![cfg(unix)]

mod common;

use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use depth_video_rs::depth_pipeline::{ConversionConfig, DepthToVideoPipeline, VideoCodec};
use tempfile::TempDir;

use common::write_tiff_frame;

/// Writes a fake ffmpeg that appends one argument per line to `record` and drains stdin.
fn recording_ffmpeg(dir: &Path, record: &Path) -> PathBuf {
    let script = dir.join("ffmpeg");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{}'; done\ncat > /dev/null\nexit 0\n",
            record.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn recorded_args(record: &Path) -> Vec<Vec<u8>> {
    fs::read(record)
        .unwrap()
        .split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| line.to_vec())
        .collect()
}

fn contains_run(args: &[Vec<u8>], run: &[&str]) -> bool {
    args.windows(run.len())
        .any(|window| window.iter().zip(run).all(|(arg, want)| arg.as_slice() == want.as_bytes()))
}

#[test]
fn test_ffv1_command_line_and_raw_output_path() {
    let tools = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let record = tools.path().join("args.txt");
    let ffmpeg = recording_ffmpeg(tools.path(), &record);
    write_tiff_frame(&input.path().join("0.tif"), 2, 1, &[1.0, 2.0]);
    let video = output.path().join(OsStr::from_bytes(b"depth_\xff.mkv"));
    let config = ConversionConfig::builder()
        .codec(VideoCodec::Ffv1)
        .ffmpeg_path(Some(ffmpeg))
        .build();

    let report = DepthToVideoPipeline::new(config)
        .convert_directory(input.path(), &video)
        .unwrap();
    assert_eq!(report.frames, 1);

    let args = recorded_args(&record);
    assert!(args.iter().any(|arg| arg.as_slice() == b"-y"), "{:?}", args);
    assert!(
        contains_run(&args, &["-f", "rawvideo", "-pix_fmt", "rgba", "-s", "2x1", "-r", "30", "-i", "-"]),
        "{:?}",
        args
    );
    assert!(
        contains_run(&args, &["-c:v", "ffv1", "-level", "3", "-pix_fmt", "bgra"]),
        "{:?}",
        args
    );
    assert_eq!(
        args.last().map(|arg| arg.as_slice()),
        Some(video.as_os_str().as_bytes())
    );
}
