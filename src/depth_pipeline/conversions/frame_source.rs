use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::depth_pipeline::common::error::{ConversionError, Result};

/// File extensions picked up from the input directory, compared case-insensitively.
pub const DEPTH_EXTENSIONS: &[&str] = &["exr", "tif", "tiff"];

pub fn is_depth_frame(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DEPTH_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Lists the depth frames in `dir`, sorted by file name.
///
/// The sort order is the frame order of the output video.
pub fn discover_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ConversionError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| ConversionError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    let mut frames = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_depth_frame(&path) {
            frames.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    if frames.is_empty() {
        return Err(ConversionError::NoInputFrames(dir.to_path_buf()));
    }

    frames.sort();
    info!(count = frames.len(), dir = %dir.display(), "Found depth frames");
    Ok(frames)
}
