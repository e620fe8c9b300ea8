//! Per-run tracking state: configuration, position history and lifecycle.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::tracker::history::{Centroid, PositionHistory};
use crate::tracker::selection::{Detection, select_best};
use crate::tracker::session_state::SessionState;
use crate::tracker::smoother::{DEFAULT_SMOOTHING_WINDOW, smooth_path};
use crate::video::Orientation;

/// Configuration for a tracking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum score a detection must exceed to be tracked, in (0, 1].
    pub confidence_threshold: f32,
    /// Maximum number of positions kept; older ones are evicted.
    pub max_path_length: usize,
    /// Number of points averaged when smoothing the displayed path.
    pub smoothing_window: usize,
    /// Draw the accepted detection's bounding box and label.
    pub draw_box: bool,
    /// Display the smoothed path instead of the raw positions.
    pub smooth_path: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            max_path_length: 1000,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            draw_box: false,
            smooth_path: true,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.confidence_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::ConfidenceThreshold(threshold));
        }
        if self.max_path_length == 0 {
            return Err(ConfigError::MaxPathLength);
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::SmoothingWindow);
        }
        Ok(())
    }
}

/// State of one tracking run over one video.
///
/// Created when a run starts and dropped when it returns; nothing carries
/// over between runs.
#[derive(Debug)]
pub struct TrackerSession {
    config: TrackerConfig,
    history: PositionHistory,
    state: SessionState,
    orientation: Option<Orientation>,
    frame_id: u64,
    frames_written: u64,
}

impl TrackerSession {
    pub fn new(config: TrackerConfig) -> Self {
        let history = PositionHistory::new(config.max_path_length);
        Self {
            config,
            history,
            state: SessionState::Opening,
            orientation: None,
            frame_id: 0,
            frames_written: 0,
        }
    }

    /// Feed one frame's detections.
    ///
    /// Returns the accepted detection, whose centroid has been appended to
    /// the history, or `None` when nothing passed the threshold.
    pub fn update(&mut self, detections: &[Detection]) -> Option<Detection> {
        self.frame_id += 1;

        let selected = select_best(detections, self.config.confidence_threshold).copied();
        match &selected {
            Some(det) => {
                let centroid = det.centroid();
                self.history.push(centroid);
                trace!(
                    frame = self.frame_id,
                    score = det.score,
                    x = centroid.x,
                    y = centroid.y,
                    "detection accepted"
                );
            }
            None => trace!(
                frame = self.frame_id,
                candidates = detections.len(),
                "no detection accepted"
            ),
        }
        selected
    }

    /// Path to draw for the current frame, derived from the full history.
    pub fn display_path(&self) -> Vec<Centroid> {
        let raw = self.history.to_vec();
        if self.config.smooth_path {
            smooth_path(&raw, self.config.smoothing_window)
        } else {
            raw
        }
    }

    /// Move to `next`, ignoring transitions the lifecycle does not allow.
    pub fn transition(&mut self, next: SessionState) {
        if self.state.can_transition_to(next) {
            debug!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        } else {
            debug!(from = ?self.state, to = ?next, "ignored illegal session transition");
        }
    }

    /// Fix the orientation for the rest of the session. Later calls are ignored.
    pub fn fix_orientation(&mut self, orientation: Orientation) -> Orientation {
        *self.orientation.get_or_insert(orientation)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    pub fn record_written(&mut self) {
        self.frames_written += 1;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Number of positions currently held.
    pub fn total_points(&self) -> usize {
        self.history.len()
    }

    /// Number of frames fed through [`TrackerSession::update`].
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}
