use tracing::{debug, info, warn};

use crate::color::thumbnail;
use crate::config::SamplingConfig;
use crate::consts::THUMBNAIL_MAX_EDGE;
use crate::error::{PagescanError, Result};
use crate::frame::FrameSample;
use crate::scoring::{CandidateId, CandidatePage, FrameScorer, RejectionHistogram, Verdict};
use crate::session::{ProgressReporter, SessionStage};

use super::cancel::CancellationToken;
use super::schedule::SampleSchedule;
use super::source::VideoSource;

/// Counters describing how a pass went.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassReport {
    pub start_ms: u64,
    pub end_ms: u64,
    pub interval_ms: f64,
    /// Samples on the schedule.
    pub scheduled: usize,
    /// Samples the decoder failed to produce.
    pub failed_reads: usize,
    /// Decoded frames that did not advance past the previous candidate.
    pub stale_frames: usize,
}

/// A completed sampling pass.
///
/// Rerunning sampling produces a new pass; the only in-place change allowed
/// on an existing one is toggling selection.
#[derive(Clone, Debug)]
pub struct SamplingPass {
    candidates: Vec<CandidatePage>,
    histogram: RejectionHistogram,
    report: PassReport,
}

impl SamplingPass {
    /// All candidates, accepted and rejected, in increasing timestamp order.
    pub fn candidates(&self) -> &[CandidatePage] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<CandidatePage> {
        self.candidates
    }

    /// Candidates currently selected, in timestamp order.
    pub fn selected(&self) -> impl Iterator<Item = &CandidatePage> + '_ {
        self.candidates.iter().filter(|c| c.is_selected())
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&CandidatePage> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Toggle a candidate's selection. Returns false if the id is unknown.
    pub fn set_selected(&mut self, id: CandidateId, selected: bool) -> bool {
        match self.candidates.iter_mut().find(|c| c.id == id) {
            Some(candidate) => {
                candidate.set_selected(selected);
                true
            }
            None => false,
        }
    }

    /// Per-reason counts of rejected candidates.
    pub fn histogram(&self) -> &RejectionHistogram {
        &self.histogram
    }

    pub fn report(&self) -> &PassReport {
        &self.report
    }

    /// True when no frame was accepted. Not an error: the histogram explains why.
    pub fn is_exhausted(&self) -> bool {
        self.candidates.iter().all(|c| c.is_rejected())
    }
}

/// Terminal state of a sampling run.
#[derive(Clone, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum SamplingOutcome {
    Completed(SamplingPass),
    /// The caller cancelled; nothing built so far is published.
    Cancelled {
        /// Scheduled samples attempted before cancellation was observed.
        samples_attempted: usize,
    },
}

impl SamplingOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn into_pass(self) -> Option<SamplingPass> {
        match self {
            Self::Completed(pass) => Some(pass),
            Self::Cancelled { .. } => None,
        }
    }
}

/// Sample the range configured in `config`, defaulting to the whole video.
pub fn sample_source<S: VideoSource + ?Sized>(
    source: &S,
    config: &SamplingConfig,
    scorer: &mut dyn FrameScorer,
    cancel: &CancellationToken,
    reporter: &dyn ProgressReporter,
) -> Result<SamplingOutcome> {
    let duration = source.duration_ms();
    if duration == 0 {
        return Err(PagescanError::EmptySource);
    }
    let start_ms = config.start_ms.unwrap_or(0);
    let end_ms = config.end_ms.unwrap_or(duration).min(duration);
    sample_range(source, start_ms, end_ms, config, scorer, cancel, reporter)
}

/// Run one sampling pass over `[start_ms, end_ms)`.
///
/// The cancellation token is checked before every frame extraction. Decoder
/// failures are skipped and counted; they never fail the pass.
pub fn sample_range<S: VideoSource + ?Sized>(
    source: &S,
    start_ms: u64,
    end_ms: u64,
    config: &SamplingConfig,
    scorer: &mut dyn FrameScorer,
    cancel: &CancellationToken,
    reporter: &dyn ProgressReporter,
) -> Result<SamplingOutcome> {
    let schedule = SampleSchedule::new(start_ms, end_ms, config)?;
    let total = schedule.len();
    info!(
        start_ms,
        end_ms,
        interval_ms = schedule.interval_ms(),
        scheduled = total,
        "Starting sampling pass"
    );

    scorer.reset();
    reporter.begin_stage(SessionStage::Sampling, Some(total));

    let mut candidates: Vec<CandidatePage> = Vec::new();
    let mut histogram = RejectionHistogram::default();
    let mut report = PassReport {
        start_ms,
        end_ms,
        interval_ms: schedule.interval_ms(),
        scheduled: total,
        ..Default::default()
    };

    for (index, t) in schedule.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(samples_attempted = index, "Sampling pass cancelled");
            reporter.finish_stage();
            return Ok(SamplingOutcome::Cancelled {
                samples_attempted: index,
            });
        }

        match source.frame_at(t) {
            Ok(frame) => {
                let last = candidates.last().map(|c| c.timestamp_ms);
                if last.is_some_and(|last| frame.timestamp_ms <= last) {
                    debug!(
                        requested_ms = t,
                        decoded_ms = frame.timestamp_ms,
                        "Decoder returned a frame at or before the previous candidate"
                    );
                    report.stale_frames += 1;
                } else {
                    let verdict = scorer.score(&frame);
                    let candidate = build_candidate(&frame, &verdict);
                    if let Some(reason) = candidate.rejection_reason {
                        histogram.record(reason);
                    }
                    reporter.candidate_emitted(&candidate);
                    candidates.push(candidate);
                }
            }
            Err(err) => {
                warn!(timestamp_ms = t, %err, "Skipping unreadable frame");
                report.failed_reads += 1;
            }
        }

        reporter.advance(index + 1);
        reporter.range_covered(covered_fraction(&schedule, index, t));
    }

    reporter.finish_stage();

    let pass = SamplingPass {
        candidates,
        histogram,
        report,
    };
    if pass.is_exhausted() {
        warn!(
            candidates = pass.candidates.len(),
            dominant = ?pass.histogram.dominant(),
            "No usable page found in range"
        );
    } else {
        info!(
            candidates = pass.candidates.len(),
            selected = pass.selected_count(),
            failed_reads = pass.report.failed_reads,
            "Sampling pass complete"
        );
    }

    Ok(SamplingOutcome::Completed(pass))
}

/// Share of `[start, end)` behind sample `index`: each sample stands for the
/// interval-wide cell centred on it, and the last one closes the range.
fn covered_fraction(schedule: &SampleSchedule, index: usize, t: u64) -> f32 {
    let (start, end) = (schedule.start_ms() as f64, schedule.end_ms() as f64);
    let covered = if index + 1 >= schedule.len() {
        end
    } else {
        (t as f64 + schedule.interval_ms() / 2.0).min(end)
    };
    ((covered - start) / (end - start)) as f32
}

/// Score a single user-requested timestamp outside the sampling cadence.
///
/// Exposure and blur checks apply; the duplicate check does not, and the
/// scorer's pass state is left untouched.
pub fn capture_now<S: VideoSource + ?Sized>(
    source: &S,
    timestamp_ms: u64,
    scorer: &dyn FrameScorer,
) -> Result<CandidatePage> {
    let frame = source.frame_at(timestamp_ms)?;
    let verdict = scorer.score_standalone(&frame);
    info!(
        timestamp_ms = frame.timestamp_ms,
        rejection = ?verdict.rejection,
        "Captured frame on demand"
    );
    Ok(build_candidate(&frame, &verdict))
}

fn build_candidate(frame: &FrameSample, verdict: &Verdict) -> CandidatePage {
    CandidatePage::new(
        frame.timestamp_ms,
        verdict.quality_score,
        verdict.rejection,
        verdict.metrics,
        thumbnail(&frame.image, THUMBNAIL_MAX_EDGE),
    )
}
