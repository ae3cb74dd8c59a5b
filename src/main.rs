use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use depth_video_rs::depth_pipeline::{ConversionConfig, DepthToVideoPipeline, VideoCodec};
use depth_video_rs::logger;

use tracing::info;

/// Packs a directory of 32-bit float depth images (EXR or TIFF) into a lossless
/// RGBA8 video. Each float is stored as its little-endian bytes in R, G, B, A.
#[derive(Debug, Parser)]
#[command(name = "depth-video", version, about)]
struct Args {
    /// Directory containing one depth image per frame, encoded in file name order
    input_dir: PathBuf,

    /// Output video file
    #[arg(default_value = "output.mkv")]
    output: PathBuf,

    /// EXR channel holding the depth values
    #[arg(short, long, default_value = "Z")]
    channel: String,

    /// Output codec; all choices are channel-exact
    #[arg(long, value_enum, default_value_t = VideoCodec::Ffv1)]
    codec: VideoCodec,

    /// Frame rate written into the container
    #[arg(short = 'r', long, default_value_t = 30)]
    fps: u32,

    /// ffmpeg binary to use instead of the one on PATH
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Number of frames decoded and packed in parallel
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Fail instead of replacing an existing output file
    #[arg(long)]
    no_overwrite: bool,

    /// Decode the written video and check every frame bit-exactly
    #[arg(long)]
    verify: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    info!("Starting depth-video...");

    let config = ConversionConfig::builder()
        .channel(args.channel)
        .codec(args.codec)
        .frame_rate(args.fps)
        .ffmpeg_path(args.ffmpeg)
        .jobs(args.jobs)
        .overwrite(!args.no_overwrite)
        .verify(args.verify)
        .build();
    let pipeline = DepthToVideoPipeline::new(config);

    info!("Channel: {}", pipeline.config().channel);
    info!("Codec: {:?} at {} fps", pipeline.config().codec, pipeline.config().frame_rate);

    let report = pipeline
        .convert_directory(&args.input_dir, &args.output)
        .with_context(|| {
            format!(
                "failed to convert {} into {}",
                args.input_dir.display(),
                args.output.display()
            )
        })?;

    report.timings.log_summary();
    info!(
        "Done. Encoded {} frames ({}x{}) into {}{}",
        report.frames,
        report.width,
        report.height,
        args.output.display(),
        if report.verified { ", verified bit-exact" } else { "" }
    );

    Ok(())
}
