//! Integration module for connecting detection backends and video I/O with
//! the trajectory tracker.
//!
//! This module provides the detector traits, the frame-by-frame pipeline
//! driver and the run summary it produces.

mod builder;
mod detector;
mod pipeline;
mod replay;
mod report;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
pub use replay::{RawDetection, ReplayDetector, ReplayError};
pub use report::{RunReport, TrackingStats, VideoStats};
