use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagescanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid time range: start {start_ms} ms must be before end {end_ms} ms")]
    InvalidRange { start_ms: u64, end_ms: u64 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown page filter: {0}")]
    UnknownFilter(String),

    #[error("Unknown quality tier: {0}")]
    UnknownQualityTier(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Frame read failed: {0}")]
    Read(#[from] ReadError),

    #[error("Video source contains no frames")]
    EmptySource,
}

/// Failure of a single frame access on a [`VideoSource`](crate::sampling::VideoSource).
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Timestamp {timestamp_ms} ms is outside the video (duration {duration_ms} ms)")]
    OutOfRange { timestamp_ms: u64, duration_ms: u64 },

    #[error("Could not decode frame at {timestamp_ms} ms: {message}")]
    Decode { timestamp_ms: u64, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PagescanError>;
