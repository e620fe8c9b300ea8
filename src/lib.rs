//! Single-object trajectory tracking with gradient path overlays.
//!
//! A [`TrackerPipeline`] reads frames from a video, keeps the best detection
//! of each frame, accumulates the object's centroids in a bounded history and
//! draws the smoothed path back onto every frame, fading from the oldest
//! position to the most recent one.
//!
//! ```ignore
//! use barpath::{FfmpegInput, FfmpegOutput, ReplayDetector, TrackerConfig, TrackerPipeline};
//!
//! let detector = ReplayDetector::from_file("detections.json")?;
//! let mut pipeline = TrackerPipeline::new(detector, TrackerConfig::default())?;
//! let report = pipeline.run(&FfmpegInput::new("lift.mov"), &FfmpegOutput::new("out/lift.mp4"))?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

pub mod error;
pub mod integration;
pub mod render;
pub mod tracker;
pub mod video;

pub use error::{ConfigError, RenderError, SessionError, VideoError};
pub use integration::{
    DetectionBuilder, DetectionSource, IntoDetections, RawDetection, ReplayDetector, RunReport,
    TrackerPipeline, TrackingStats, VideoStats,
};
pub use render::{PathRenderer, RenderStyle};
pub use tracker::{
    Centroid, Detection, PositionHistory, Rect, SessionState, TrackerConfig, TrackerSession,
};
pub use video::{
    FfmpegInput, FfmpegOutput, FrameSink, FrameSource, FramesDirInput, FramesDirOutput, OpenSink,
    OpenSource, Orientation,
};
