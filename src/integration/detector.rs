//! Trait for object detection inference backends.

use ndarray::{Array2, ArrayView2, Axis};

use crate::tracker::Detection;

/// Trait for object detection inference backends.
///
/// Implement this trait to feed any detection model into the tracking
/// pipeline. Detectors are called once per frame, in frame order.
///
/// # Example
///
/// ```ignore
/// use barpath::{DetectionSource, Detection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    ///
    /// These are not absorbed by the pipeline: a failing detector aborts the
    /// run and the error is handed back to the caller.
    type Error;

    /// Run inference on one frame and return candidate detections.
    ///
    /// # Arguments
    /// * `input` - Packed RGB8 pixels, row-major, `width * height * 3` bytes
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    ///
    /// The returned detections may come in any order and may be empty.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

impl<D: DetectionSource + ?Sized> DetectionSource for &mut D {
    type Error = D::Error;

    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        (**self).detect(input, width, height)
    }
}

/// Helper trait for converting model-specific outputs to `Detection`.
///
/// Implement this for your model's output format to enable easy conversion.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// Rows of `[x1, y1, x2, y2, score, ..]`; extra columns (class ids, class
/// scores) are ignored and rows with fewer than five columns are skipped.
impl IntoDetections for ArrayView2<'_, f32> {
    fn into_detections(self) -> Vec<Detection> {
        if self.ncols() < 5 {
            return Vec::new();
        }
        self.axis_iter(Axis(0))
            .map(|row| Detection::new(row[0], row[1], row[2], row[3], row[4]))
            .collect()
    }
}

impl IntoDetections for &Array2<f32> {
    fn into_detections(self) -> Vec<Detection> {
        self.view().into_detections()
    }
}

impl IntoDetections for Array2<f32> {
    fn into_detections(self) -> Vec<Detection> {
        self.view().into_detections()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_array_rows_into_detections() {
        let raw = array![
            [10.0f32, 20.0, 50.0, 80.0, 0.9, 0.0],
            [0.0, 0.0, 4.0, 4.0, 0.2, 1.0],
        ];
        let dets = raw.into_detections();

        assert_eq!(dets.len(), 2);
        assert_eq!(dets[0], Detection::new(10.0, 20.0, 50.0, 80.0, 0.9));
        assert_eq!(dets[1].score, 0.2);
    }

    #[test]
    fn test_array_without_score_column() {
        let raw = array![[10.0f32, 20.0, 50.0, 80.0]];
        assert!((&raw).into_detections().is_empty());
    }

    #[test]
    fn test_empty_array() {
        let raw = Array2::<f32>::zeros((0, 5));
        assert!(raw.into_detections().is_empty());
    }
}
