use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ndarray::Array2;

use pagescan_core::error::ReadError;
use pagescan_core::frame::{ColorFrame, FrameSample};
use pagescan_core::sampling::{CancellationToken, VideoSource};
use pagescan_core::scoring::CandidatePage;
use pagescan_core::session::{ProgressReporter, SessionStage};

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 48;

/// Gray frame with "text lines": background `paper`, glyph blocks `ink`.
/// Different seeds move the lines far enough apart to never look alike.
pub fn text_page(seed: usize, paper: f32, ink: f32) -> ColorFrame {
    let data = Array2::from_shape_fn((HEIGHT, WIDTH), |(row, col)| {
        let on_line = (row / 3 + seed) % 4 == 0;
        let glyph = (col / 4 + seed * 7 + row) % 3 != 0;
        if on_line && glyph {
            ink
        } else {
            paper
        }
    });
    ColorFrame::from_planes(data.clone(), data.clone(), data)
}

/// A sharp, well-exposed page.
pub fn page(seed: usize) -> ColorFrame {
    text_page(seed, 0.85, 0.15)
}

/// `page(seed)` with every pixel nudged slightly brighter.
pub fn near_duplicate(seed: usize) -> ColorFrame {
    let base = page(seed);
    base.map_planes(|p| pagescan_core::frame::Frame::new(p.data.mapv(|v| v + 0.01)))
}

/// A page shot with the lights off.
pub fn dark_page(seed: usize) -> ColorFrame {
    text_page(seed, 0.12, 0.04)
}

/// Featureless horizontal ramp: no edges at all.
pub fn smooth_ramp() -> ColorFrame {
    let data = Array2::from_shape_fn((HEIGHT, WIDTH), |(_, col)| {
        0.3 + 0.4 * col as f32 / (WIDTH - 1) as f32
    });
    ColorFrame::from_planes(data.clone(), data.clone(), data)
}

pub fn uniform(h: usize, w: usize, value: f32) -> ColorFrame {
    ColorFrame::filled(h, w, [value; 3])
}

/// Video whose frame at any requested timestamp is produced by `render`.
/// Every request decodes exactly the requested timestamp.
pub struct SyntheticVideo {
    duration_ms: u64,
    render: Box<dyn Fn(u64) -> ColorFrame + Send + Sync>,
    fail_at: Vec<u64>,
    requests: Mutex<Vec<u64>>,
}

impl SyntheticVideo {
    pub fn new(duration_ms: u64, render: impl Fn(u64) -> ColorFrame + Send + Sync + 'static) -> Self {
        Self {
            duration_ms,
            render: Box::new(render),
            fail_at: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make the decoder fail at these exact timestamps.
    pub fn failing_at(mut self, timestamps: &[u64]) -> Self {
        self.fail_at = timestamps.to_vec();
        self
    }

    pub fn requests(&self) -> Vec<u64> {
        self.requests.lock().unwrap().clone()
    }
}

impl VideoSource for SyntheticVideo {
    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn frame_at(&self, timestamp_ms: u64) -> Result<FrameSample, ReadError> {
        self.requests.lock().unwrap().push(timestamp_ms);
        if self.fail_at.contains(&timestamp_ms) {
            return Err(ReadError::Decode {
                timestamp_ms,
                message: "synthetic decoder miss".into(),
            });
        }
        Ok(FrameSample::new(timestamp_ms, (self.render)(timestamp_ms)))
    }
}

/// Wraps a source and cancels `token` once `after` frames were requested.
pub struct CancellingSource<S> {
    pub inner: S,
    pub token: CancellationToken,
    pub after: usize,
    calls: AtomicUsize,
}

impl<S> CancellingSource<S> {
    pub fn new(inner: S, token: CancellationToken, after: usize) -> Self {
        Self {
            inner,
            token,
            after,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<S: VideoSource> VideoSource for CancellingSource<S> {
    fn duration_ms(&self) -> u64 {
        self.inner.duration_ms()
    }

    fn frame_at(&self, timestamp_ms: u64) -> Result<FrameSample, ReadError> {
        let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if calls >= self.after {
            self.token.cancel();
        }
        self.inner.frame_at(timestamp_ms)
    }
}

/// Records everything a pass reports.
#[derive(Default)]
pub struct RecordingReporter {
    pub stages: Mutex<Vec<(SessionStage, Option<usize>)>>,
    pub emitted: Mutex<Vec<u64>>,
    pub coverage: Mutex<Vec<f32>>,
    pub finished: AtomicUsize,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: SessionStage, total_items: Option<usize>) {
        self.stages.lock().unwrap().push((stage, total_items));
    }

    fn range_covered(&self, fraction: f32) {
        self.coverage.lock().unwrap().push(fraction);
    }

    fn candidate_emitted(&self, candidate: &CandidatePage) {
        self.emitted.lock().unwrap().push(candidate.timestamp_ms);
    }

    fn finish_stage(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}
