use image::RgbImage;
use image::imageops;
use serde::Serialize;

/// Rotation applied to every frame of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Frames are used as decoded.
    #[default]
    Native,
    /// Frames are rotated 90 degrees clockwise.
    Rotate90Cw,
}

impl Orientation {
    /// Decide the rotation from the declared stream size and the size of the
    /// first decoded frame.
    ///
    /// Rotation is needed when one is landscape and the other portrait. A
    /// square size on either side never triggers it.
    pub fn detect(declared: (u32, u32), actual: (u32, u32)) -> Self {
        let (width, height) = declared;
        let (frame_w, frame_h) = actual;
        let needs_rotation =
            (width > height && frame_h > frame_w) || (width < height && frame_w > frame_h);
        if needs_rotation {
            Self::Rotate90Cw
        } else {
            Self::Native
        }
    }

    /// Size the sink is opened with: the declared size, swapped when rotating.
    pub fn output_size(self, declared: (u32, u32)) -> (u32, u32) {
        match self {
            Self::Native => declared,
            Self::Rotate90Cw => (declared.1, declared.0),
        }
    }

    pub fn apply(self, frame: RgbImage) -> RgbImage {
        match self {
            Self::Native => frame,
            Self::Rotate90Cw => imageops::rotate90(&frame),
        }
    }

    pub fn is_rotated(self) -> bool {
        self == Self::Rotate90Cw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_landscape_declared_portrait_frame() {
        let orientation = Orientation::detect((1920, 1080), (1080, 1920));
        assert_eq!(orientation, Orientation::Rotate90Cw);
        assert_eq!(orientation.output_size((1920, 1080)), (1080, 1920));
    }

    #[test]
    fn test_portrait_declared_landscape_frame() {
        let orientation = Orientation::detect((720, 1280), (1280, 720));
        assert_eq!(orientation, Orientation::Rotate90Cw);
        assert_eq!(orientation.output_size((720, 1280)), (1280, 720));
    }

    #[test]
    fn test_matching_orientation() {
        assert_eq!(
            Orientation::detect((1920, 1080), (1920, 1080)),
            Orientation::Native
        );
        assert_eq!(
            Orientation::detect((1920, 1080), (1920, 1080)).output_size((1920, 1080)),
            (1920, 1080)
        );
    }

    #[test]
    fn test_square_never_rotates() {
        assert_eq!(Orientation::detect((500, 500), (400, 600)), Orientation::Native);
        assert_eq!(Orientation::detect((1920, 1080), (700, 700)), Orientation::Native);
    }

    #[test]
    fn test_rotate_clockwise() {
        // 2x1 image: left pixel red, right pixel blue.
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([255, 0, 0]));
        frame.put_pixel(1, 0, Rgb([0, 0, 255]));

        let rotated = Orientation::Rotate90Cw.apply(frame);
        assert_eq!(rotated.dimensions(), (1, 2));
        // Clockwise: the left column becomes the top row.
        assert_eq!(*rotated.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*rotated.get_pixel(0, 1), Rgb([0, 0, 255]));
    }
}
