use std::fmt;

use crate::scoring::CandidatePage;

/// Stage of a scanning session, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStage {
    Sampling,
    Decoding,
    Enhancement,
    Writing,
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sampling => write!(f, "Sampling frames"),
            Self::Decoding => write!(f, "Decoding pages"),
            Self::Enhancement => write!(f, "Enhancing pages"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Thread-safe progress reporting for a session.
///
/// Implementors can use this to drive progress bars, logging, or a live
/// candidate strip. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g. scheduled samples), if known.
    fn begin_stage(&self, _stage: SessionStage, _total_items: Option<usize>) {}

    /// `items_done` work items within the current stage have completed.
    fn advance(&self, _items_done: usize) {}

    /// Fraction in [0, 1] of the sampled time range covered so far.
    fn range_covered(&self, _fraction: f32) {}

    /// A candidate was appended to the pass being built. Candidates arrive
    /// in increasing timestamp order; a cancelled pass never becomes final.
    fn candidate_emitted(&self, _candidate: &CandidatePage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores every event.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
