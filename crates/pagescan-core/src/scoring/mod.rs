mod candidate;
mod rejection;
mod scorer;

pub use crate::config::ScoringThresholds;
pub use candidate::{CandidateId, CandidatePage};
pub use rejection::{RejectionHistogram, RejectionReason};
pub use scorer::{FrameScorer, ThresholdScorer, Verdict};
