use std::fmt;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::QualityMetrics;

use super::rejection::RejectionReason;

/// Identity of a candidate page, unique across passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(Uuid);

impl CandidateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CandidateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A frame proposed as a document page, with its verdict.
#[derive(Clone, Debug)]
pub struct CandidatePage {
    pub id: CandidateId,
    pub timestamp_ms: u64,
    /// Normalized sharpness in [0, 1].
    pub quality_score: f32,
    pub rejection_reason: Option<RejectionReason>,
    pub metrics: QualityMetrics,
    pub thumbnail: RgbImage,
    is_selected: bool,
}

impl CandidatePage {
    /// Selection defaults to true exactly when there is no rejection reason.
    pub fn new(
        timestamp_ms: u64,
        quality_score: f32,
        rejection_reason: Option<RejectionReason>,
        metrics: QualityMetrics,
        thumbnail: RgbImage,
    ) -> Self {
        Self {
            id: CandidateId::new(),
            timestamp_ms,
            quality_score,
            rejection_reason,
            metrics,
            thumbnail,
            is_selected: rejection_reason.is_none(),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// User override of the default selection.
    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection_reason.is_some()
    }
}
