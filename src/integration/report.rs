//! Summary returned by a tracking run.

use serde::Serialize;

use crate::error::SessionError;
use crate::tracker::SessionState;

/// Output video statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoStats {
    /// Frames written to the sink
    pub frame_count: u64,
    /// Frame rate of the source
    pub fps: f64,
    /// Output size as "WIDTHxHEIGHT"
    pub resolution: String,
    /// `frame_count / fps`, 0 when the frame rate is unknown
    pub duration_seconds: f64,
}

impl VideoStats {
    pub fn new(frame_count: u64, fps: f64, size: (u32, u32)) -> Self {
        let duration_seconds = if fps > 0.0 {
            frame_count as f64 / fps
        } else {
            0.0
        };
        Self {
            frame_count,
            fps,
            resolution: format!("{}x{}", size.0, size.1),
            duration_seconds,
        }
    }
}

/// Trajectory statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingStats {
    /// Positions held in the history at the end of the run
    pub total_points: usize,
    /// Confidence threshold the run used
    pub threshold: f32,
}

/// Result of [`TrackerPipeline::run`](super::TrackerPipeline::run).
///
/// Failures other than detector errors are reported here with
/// `success == false`. Stats are present whenever the sink was opened,
/// including runs that failed mid-stream; they then describe the partial
/// output that was kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub message: String,
    pub video: Option<VideoStats>,
    pub tracking: Option<TrackingStats>,
    /// Terminal session state, `Done` or `Failed`
    #[serde(skip)]
    pub state: SessionState,
}

impl RunReport {
    pub fn completed(video: VideoStats, tracking: TrackingStats) -> Self {
        Self {
            success: true,
            message: "Processing complete".to_string(),
            video: Some(video),
            tracking: Some(tracking),
            state: SessionState::Done,
        }
    }

    /// Failure before any output existed.
    pub fn failed(error: &SessionError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            video: None,
            tracking: None,
            state: SessionState::Failed,
        }
    }

    /// Failure after streaming started; the partial output is described.
    pub fn failed_with_stats(
        error: &SessionError,
        video: VideoStats,
        tracking: TrackingStats,
    ) -> Self {
        Self {
            video: Some(video),
            tracking: Some(tracking),
            ..Self::failed(error)
        }
    }
}
