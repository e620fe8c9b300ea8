use serde::{Deserialize, Serialize};

use crate::tracker::history::Centroid;

/// Axis-aligned bounding box in pixel coordinates.
///
/// Stored as corners (TLBR), the format detectors report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x1: f32,
    /// Top-left y coordinate
    pub y1: f32,
    /// Bottom-right x coordinate
    pub x2: f32,
    /// Bottom-right y coordinate
    pub y2: f32,
}

impl Rect {
    /// Create a Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_tlbr(x, y, x + width, y + height)
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Center of the box truncated toward zero to whole pixels.
    #[inline]
    pub fn centroid(&self) -> Centroid {
        let (cx, cy) = self.center();
        Centroid::new(cx as i32, cy as i32)
    }

    /// Corners truncated to whole pixels, as used when drawing.
    #[inline]
    pub fn to_pixel_tlbr(&self) -> [i32; 4] {
        self.to_tlbr().map(|v| v as i32)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect, Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
        assert_eq!(rect.area(), 1200.0);
    }

    #[test]
    fn test_centroid_truncates() {
        // center = (10.5, 20.5)
        let rect = Rect::from_tlbr(0.0, 0.0, 21.0, 41.0);
        assert_eq!(rect.center(), (10.5, 20.5));
        assert_eq!(rect.centroid(), Centroid::new(10, 20));
    }

    #[test]
    fn test_centroid_truncates_toward_zero() {
        let rect = Rect::from_tlbr(-5.0, -5.0, 2.0, 2.0);
        // center = (-1.5, -1.5)
        assert_eq!(rect.centroid(), Centroid::new(-1, -1));
    }

    #[test]
    fn test_pixel_corners() {
        let rect = Rect::from_tlbr(10.9, 20.2, 50.7, 80.1);
        assert_eq!(rect.to_pixel_tlbr(), [10, 20, 50, 80]);
    }
}
