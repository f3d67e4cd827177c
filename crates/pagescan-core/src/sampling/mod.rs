//! Walks a video's timeline and turns it into scored candidate pages.

mod cancel;
mod driver;
mod schedule;
mod source;

pub use cancel::CancellationToken;
pub use driver::{
    capture_now, sample_range, sample_source, PassReport, SamplingOutcome, SamplingPass,
};
pub use schedule::SampleSchedule;
pub use source::VideoSource;
