//! Error types for tracking sessions and frame I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for frame source/sink operations.
pub type VideoResult<T> = Result<T, VideoError>;

/// Errors raised by frame sources and sinks.
#[derive(Debug, Error)]
pub enum VideoError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid video: {0}")]
    InvalidVideo(String),

    #[error("Truncated frame: expected {expected} bytes, got {got}")]
    TruncatedFrame { expected: usize, got: usize },

    #[error("Frame size {got:?} does not match stream size {expected:?}")]
    FrameSizeMismatch {
        expected: (u32, u32),
        got: (u32, u32),
    },

    #[error("Handle already closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Terminal failures of a tracking session.
///
/// The `Display` output of each variant is the message reported back to the
/// caller in [`RunReport`](crate::integration::RunReport).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not open source")]
    SourceUnopenable(#[source] VideoError),

    #[error("could not read video")]
    SourceUnreadable,

    #[error("could not create output")]
    SinkUnopenable(#[source] VideoError),

    #[error("frame read failed: {0}")]
    SourceReadFault(#[source] VideoError),

    #[error("frame write failed: {0}")]
    SinkWriteFault(#[source] VideoError),
}

/// Rejected tracker configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("confidence_threshold must be in (0, 1], got {0}")]
    ConfidenceThreshold(f32),

    #[error("max_path_length must be greater than 0")]
    MaxPathLength,

    #[error("smoothing_window must be at least 1")]
    SmoothingWindow,

    #[error("line_thickness must be at least 1")]
    LineThickness,
}

/// Failure setting up the overlay renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid font: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
