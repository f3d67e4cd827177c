use crate::error::{PagescanError, ReadError, Result};
use crate::frame::{ColorFrame, FrameSample};
use crate::sampling::VideoSource;

/// Decoded frames held in memory, looked up by nearest timestamp.
#[derive(Clone, Debug)]
pub struct MemorySource {
    frames: Vec<FrameSample>,
    duration_ms: u64,
}

impl MemorySource {
    /// Build a source from frames in any order. Frames sharing a timestamp
    /// keep only the first one given.
    pub fn new(mut frames: Vec<FrameSample>, duration_ms: u64) -> Result<Self> {
        if frames.is_empty() {
            return Err(PagescanError::EmptySource);
        }
        frames.sort_by_key(|f| f.timestamp_ms);
        frames.dedup_by_key(|f| f.timestamp_ms);
        Ok(Self {
            frames,
            duration_ms,
        })
    }

    /// Frames spaced evenly at `fps`; the duration covers the last frame.
    pub fn from_frames(images: Vec<ColorFrame>, fps: f64) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(PagescanError::InvalidConfig(format!(
                "frame rate must be positive, got {fps}"
            )));
        }
        let period = 1000.0 / fps;
        let duration_ms = (images.len() as f64 * period).ceil() as u64;
        let frames = images
            .into_iter()
            .enumerate()
            .map(|(i, image)| FrameSample::new((i as f64 * period).floor() as u64, image))
            .collect();
        Self::new(frames, duration_ms)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[FrameSample] {
        &self.frames
    }

    fn nearest_index(&self, timestamp_ms: u64) -> usize {
        match self.frames.binary_search_by_key(&timestamp_ms, |f| f.timestamp_ms) {
            Ok(i) => i,
            Err(0) => 0,
            Err(i) if i >= self.frames.len() => self.frames.len() - 1,
            Err(i) => {
                let before = timestamp_ms - self.frames[i - 1].timestamp_ms;
                let after = self.frames[i].timestamp_ms - timestamp_ms;
                if after < before {
                    i
                } else {
                    i - 1
                }
            }
        }
    }
}

impl VideoSource for MemorySource {
    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn frame_at(&self, timestamp_ms: u64) -> std::result::Result<FrameSample, ReadError> {
        if timestamp_ms >= self.duration_ms {
            return Err(ReadError::OutOfRange {
                timestamp_ms,
                duration_ms: self.duration_ms,
            });
        }
        Ok(self.frames[self.nearest_index(timestamp_ms)].clone())
    }
}
