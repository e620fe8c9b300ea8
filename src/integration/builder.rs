//! Builder for creating Detection objects from various input formats.

use crate::tracker::Detection;

/// Builder for creating `Detection` objects from various box encodings.
///
/// Model heads disagree on box layout and on whether coordinates are in
/// pixels or normalized to `[0, 1]`; the builder converts all of them to a
/// pixel-space TLBR box.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    score: f32,
    scale: Option<(f32, f32)>,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.tlbr(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0)
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(self, l: f32, t: f32, w: f32, h: f32) -> Self {
        self.tlbr(l, t, l + w, t + h)
    }

    /// Treat the coordinates as normalized and scale them to a frame of
    /// `width` x `height` pixels.
    pub fn normalized(mut self, width: u32, height: u32) -> Self {
        self.scale = Some((width as f32, height as f32));
        self
    }

    /// Set the confidence score, clamped to `[0, 1]`.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score.clamp(0.0, 1.0);
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        let (sx, sy) = self.scale.unwrap_or((1.0, 1.0));
        Detection::new(
            self.x1 * sx,
            self.y1 * sy,
            self.x2 * sx,
            self.y2 * sy,
            self.score,
        )
    }
}
