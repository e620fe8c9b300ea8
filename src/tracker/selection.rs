//! Per-frame detection selection.

use serde::{Deserialize, Serialize};

use crate::tracker::history::Centroid;
use crate::tracker::rect::Rect;

/// Detection input for the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self { bbox, score }
    }

    /// Tracked position for this detection: the box center in whole pixels.
    pub fn centroid(&self) -> Centroid {
        self.bbox.centroid()
    }
}

/// Pick the highest-scoring detection and accept it if its score is
/// strictly above `threshold`.
///
/// The first of several equally scored detections wins. NaN scores are
/// never selected.
pub fn select_best(detections: &[Detection], threshold: f32) -> Option<&Detection> {
    let mut best: Option<&Detection> = None;
    for det in detections {
        match best {
            Some(current) if det.score <= current.score => {}
            _ if det.score.is_nan() => {}
            _ => best = Some(det),
        }
    }
    best.filter(|det| det.score > threshold)
}
