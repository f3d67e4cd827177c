use crate::error::ReadError;
use crate::frame::FrameSample;

/// Random-access decoded video.
///
/// Implementations return the frame closest to the requested timestamp; the
/// returned sample carries the frame's own timestamp, which may differ from
/// the request. A source must not change while a sampling pass runs over it.
pub trait VideoSource {
    /// Total duration in milliseconds.
    fn duration_ms(&self) -> u64;

    /// Decode the frame closest to `timestamp_ms`.
    fn frame_at(&self, timestamp_ms: u64) -> Result<FrameSample, ReadError>;
}

impl<T: VideoSource + ?Sized> VideoSource for &T {
    fn duration_ms(&self) -> u64 {
        (**self).duration_ms()
    }

    fn frame_at(&self, timestamp_ms: u64) -> Result<FrameSample, ReadError> {
        (**self).frame_at(timestamp_ms)
    }
}

impl<T: VideoSource + ?Sized> VideoSource for Box<T> {
    fn duration_ms(&self) -> u64 {
        (**self).duration_ms()
    }

    fn frame_at(&self, timestamp_ms: u64) -> Result<FrameSample, ReadError> {
        (**self).frame_at(timestamp_ms)
    }
}
