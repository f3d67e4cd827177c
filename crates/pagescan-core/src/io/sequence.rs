use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PagescanError, ReadError, Result};
use crate::frame::FrameSample;
use crate::sampling::VideoSource;

use super::image_io::load_frame;

const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// A directory of decoded frames played back at a fixed frame rate.
///
/// Files are ordered by name; frame `i` sits at `floor(i * 1000 / fps)` ms.
/// Frames are decoded on demand, one per request.
#[derive(Clone, Debug)]
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    fps: f64,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path, fps: f64) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(PagescanError::InvalidConfig(format!(
                "frame rate must be positive, got {fps}"
            )));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_frame_file(&path) {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(PagescanError::EmptySource);
        }
        paths.sort();
        debug!(dir = %dir.display(), frames = paths.len(), fps, "Opened image sequence");

        Ok(Self { paths, fps })
    }

    pub fn frame_count(&self) -> usize {
        self.paths.len()
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Timestamp of frame `index`.
    pub fn timestamp_of(&self, index: usize) -> u64 {
        (index as f64 * 1000.0 / self.fps).floor() as u64
    }

    /// Pixel size of the first frame, read from its header only.
    pub fn frame_size(&self) -> Result<(u32, u32)> {
        Ok(image::image_dimensions(&self.paths[0])?)
    }

    fn nearest_index(&self, timestamp_ms: u64) -> usize {
        let position = (timestamp_ms as f64 * self.fps / 1000.0).round() as usize;
        position.min(self.paths.len() - 1)
    }
}

impl VideoSource for ImageSequenceSource {
    fn duration_ms(&self) -> u64 {
        (self.paths.len() as f64 * 1000.0 / self.fps).ceil() as u64
    }

    fn frame_at(&self, timestamp_ms: u64) -> std::result::Result<FrameSample, ReadError> {
        let duration_ms = self.duration_ms();
        if timestamp_ms >= duration_ms {
            return Err(ReadError::OutOfRange {
                timestamp_ms,
                duration_ms,
            });
        }

        let index = self.nearest_index(timestamp_ms);
        let image = load_frame(&self.paths[index]).map_err(|err| ReadError::Decode {
            timestamp_ms,
            message: format!("{}: {err}", self.paths[index].display()),
        })?;
        Ok(FrameSample::new(self.timestamp_of(index), image))
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
