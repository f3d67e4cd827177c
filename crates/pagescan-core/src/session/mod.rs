//! Host-facing session flow: sample, review, then render selected pages.
//!
//! The session holds no state of its own; callers pass the source, the
//! pass and the edits into each call.

mod orchestrator;
mod types;

pub use orchestrator::{enhance_selected, scan};
pub use types::{NoOpReporter, ProgressReporter, SessionStage};
