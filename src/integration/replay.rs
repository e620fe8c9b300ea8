//! Detector that replays detections recorded ahead of time.
//!
//! Useful when inference runs elsewhere (a batch job or a remote service)
//! and only the per-frame boxes are available locally.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DetectionSource;
use crate::tracker::Detection;

/// Error type for replayed detection failures.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("no recorded detections for frame {0}")]
    Exhausted(usize),
}

/// One recorded detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Bounding box: [x1, y1, x2, y2] in pixels
    pub bbox: [f32; 4],
    /// Confidence score
    pub confidence: f32,
}

impl From<RawDetection> for Detection {
    fn from(raw: RawDetection) -> Self {
        let [x1, y1, x2, y2] = raw.bbox;
        Detection::new(x1, y1, x2, y2, raw.confidence)
    }
}

/// Replays a list of per-frame detections, one entry per frame.
#[derive(Debug, Clone, Default)]
pub struct ReplayDetector {
    frames: Vec<Vec<RawDetection>>,
    next: usize,
    strict: bool,
}

impl ReplayDetector {
    pub fn new(frames: Vec<Vec<RawDetection>>) -> Self {
        Self {
            frames,
            next: 0,
            strict: false,
        }
    }

    /// Parse a JSON array of per-frame detection arrays.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Fail instead of reporting no detections once the recording runs out.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl DetectionSource for ReplayDetector {
    type Error = ReplayError;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        let frame = self.next;
        self.next += 1;
        match self.frames.get(frame) {
            Some(dets) => Ok(dets.iter().copied().map(Detection::from).collect()),
            None if self.strict => Err(ReplayError::Exhausted(frame)),
            None => Ok(Vec::new()),
        }
    }
}
