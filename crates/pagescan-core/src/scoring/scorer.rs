use tracing::debug;

use crate::config::{MetricsConfig, ScoringThresholds};
use crate::frame::FrameSample;
use crate::metrics::{analyze_frame, MotionSignature, QualityMetrics};

use super::rejection::RejectionReason;

/// Outcome of scoring one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    pub metrics: QualityMetrics,
    /// Normalized sharpness in [0, 1]; 0 for degenerate frames.
    pub quality_score: f32,
    pub rejection: Option<RejectionReason>,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Strategy that turns frames into accept/reject decisions.
///
/// The sampling driver only talks to this trait, so a detector with real
/// contour or stillness tracking can replace [`ThresholdScorer`] without
/// touching the driver or the enhancement pipeline.
pub trait FrameScorer: Send {
    /// Forget all state from a previous pass.
    fn reset(&mut self);

    /// Score the next frame of a pass, in timestamp order.
    fn score(&mut self, sample: &FrameSample) -> Verdict;

    /// Score a frame outside any pass: no duplicate check, no state change.
    fn score_standalone(&self, sample: &FrameSample) -> Verdict;
}

/// Threshold state machine keyed on the last accepted frame.
///
/// Rules, first match wins:
/// 1. low variance and high luminance → `Glare`
/// 2. low luminance → `TooDark`
/// 3. high luminance → `TooBright`
/// 4. low sharpness → `Blur`
/// 5. motion delta to the last accepted frame below threshold → `Duplicate`
/// 6. otherwise accepted, and the frame becomes the new reference
pub struct ThresholdScorer {
    thresholds: ScoringThresholds,
    metrics: MetricsConfig,
    last_accepted: Option<MotionSignature>,
}

impl ThresholdScorer {
    pub fn new(thresholds: ScoringThresholds, metrics: MetricsConfig) -> Self {
        Self {
            thresholds,
            metrics,
            last_accepted: None,
        }
    }

    pub fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    fn evaluate(
        &self,
        sample: &FrameSample,
        reference: Option<&MotionSignature>,
    ) -> (Verdict, Option<MotionSignature>) {
        let analysis = analyze_frame(&sample.image, &self.metrics, reference);
        if analysis.is_degenerate() {
            return (
                Verdict {
                    metrics: analysis.metrics,
                    quality_score: 0.0,
                    rejection: Some(RejectionReason::Blur),
                },
                None,
            );
        }

        let m = analysis.metrics;
        let quality_score = self.thresholds.normalize_sharpness(m.sharpness);
        let rejection = self.classify(&m);
        (
            Verdict {
                metrics: m,
                quality_score,
                rejection,
            },
            analysis.signature,
        )
    }

    fn classify(&self, m: &QualityMetrics) -> Option<RejectionReason> {
        let t = &self.thresholds;
        if m.luminance_variance < t.glare_threshold && m.mean_luminance > t.bright_threshold {
            return Some(RejectionReason::Glare);
        }
        if m.mean_luminance < t.dark_threshold {
            return Some(RejectionReason::TooDark);
        }
        if m.mean_luminance > t.bright_threshold {
            return Some(RejectionReason::TooBright);
        }
        if m.sharpness < t.sharpness_threshold {
            return Some(RejectionReason::Blur);
        }
        // No reference means nothing has been accepted yet.
        if let Some(delta) = m.motion_delta {
            if delta < t.duplicate_threshold {
                return Some(RejectionReason::Duplicate);
            }
        }
        None
    }
}

impl FrameScorer for ThresholdScorer {
    fn reset(&mut self) {
        self.last_accepted = None;
    }

    fn score(&mut self, sample: &FrameSample) -> Verdict {
        let (verdict, signature) = self.evaluate(sample, self.last_accepted.as_ref());
        debug!(
            timestamp_ms = sample.timestamp_ms,
            sharpness = verdict.metrics.sharpness,
            mean_luminance = verdict.metrics.mean_luminance,
            motion_delta = ?verdict.metrics.motion_delta,
            rejection = ?verdict.rejection,
            "Scored frame"
        );
        if verdict.is_accepted() {
            self.last_accepted = signature;
        }
        verdict
    }

    fn score_standalone(&self, sample: &FrameSample) -> Verdict {
        self.evaluate(sample, None).0
    }
}
