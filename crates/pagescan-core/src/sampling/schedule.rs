use tracing::warn;

use crate::config::SamplingConfig;
use crate::error::{PagescanError, Result};
use crate::frame::FrameSample;

use super::source::VideoSource;

/// Sample timestamps over `[start_ms, end_ms)` at a fixed interval.
///
/// The first sample sits half an interval into the range:
/// `t_k = floor(start + interval/2 + k*interval)` while `t_k < end`.
/// Iterating is lazy and can be repeated any number of times.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSchedule {
    start_ms: u64,
    end_ms: u64,
    interval_ms: f64,
}

impl SampleSchedule {
    /// Build the schedule for a range using the configured density.
    pub fn new(start_ms: u64, end_ms: u64, config: &SamplingConfig) -> Result<Self> {
        if end_ms <= start_ms {
            return Err(PagescanError::InvalidRange { start_ms, end_ms });
        }
        config.validate()?;

        Ok(Self {
            start_ms,
            end_ms,
            interval_ms: config.interval_ms(),
        })
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Number of scheduled samples.
    pub fn len(&self) -> usize {
        let span = (self.end_ms - self.start_ms) as f64;
        let first = self.interval_ms / 2.0;
        if first >= span {
            // A range shorter than half an interval still gets one sample.
            return 1;
        }
        ((span - first) / self.interval_ms).ceil().max(1.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp of the `index`-th sample.
    pub fn time_at(&self, index: usize) -> u64 {
        let offset = self.interval_ms / 2.0 + index as f64 * self.interval_ms;
        let t = self.start_ms + offset.floor() as u64;
        t.min(self.end_ms - 1)
    }

    /// Lazily yield the scheduled timestamps.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len()).map(move |i| self.time_at(i))
    }

    /// Lazily decode the scheduled frames from `source`.
    ///
    /// Samples the decoder cannot produce are skipped without shifting the
    /// remaining sample times.
    pub fn frames<'a, S: VideoSource + ?Sized>(
        &'a self,
        source: &'a S,
    ) -> impl Iterator<Item = FrameSample> + 'a {
        self.iter().filter_map(move |t| match source.frame_at(t) {
            Ok(frame) => Some(frame),
            Err(err) => {
                warn!(timestamp_ms = t, %err, "Skipping unreadable frame");
                None
            }
        })
    }
}
