//! Trajectory overlay rendering.

pub mod palette;

use std::path::PathBuf;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, RenderError};
use crate::tracker::{Centroid, Detection};

const LABEL_SCALE: f32 = 16.0;
const COUNTER_SCALE: f32 = 22.0;
const LABEL_OFFSET: i32 = 10;
const COUNTER_ORIGIN: (i32, i32) = (10, 10);

/// DejaVu Sans, used when no font file is configured.
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

fn bundled_font() -> Option<FontArc> {
    FontArc::try_from_slice(BUNDLED_FONT)
        .inspect_err(|e| warn!(error = %e, "bundled font unusable, text overlays disabled"))
        .ok()
}

/// Overlay appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Path and box stroke width in pixels.
    pub line_thickness: u32,
    /// RGB color of the oldest path segment.
    pub oldest_color: [u8; 3],
    /// RGB color of the newest path segment.
    pub recent_color: [u8; 3],
    /// RGB color of the bounding box and its label.
    pub box_color: [u8; 3],
    /// Text drawn above the bounding box.
    pub label: String,
    /// Draw "Points: N" in the top-left corner.
    pub show_point_count: bool,
    /// TrueType/OpenType font for text overlays; the bundled DejaVu Sans when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            line_thickness: 2,
            oldest_color: palette::PATH_OLDEST.0,
            recent_color: palette::PATH_RECENT.0,
            box_color: palette::BOX_COLOR.0,
            label: "Barbell".to_string(),
            show_point_count: true,
            font_path: None,
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_thickness == 0 {
            return Err(ConfigError::LineThickness);
        }
        Ok(())
    }
}

/// Draws the color-graded path, the detection box and text onto frames in place.
#[derive(Clone)]
pub struct PathRenderer {
    style: RenderStyle,
    font: Option<FontArc>,
}

impl std::fmt::Debug for PathRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathRenderer")
            .field("style", &self.style)
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Default for PathRenderer {
    fn default() -> Self {
        Self::new(RenderStyle::default())
    }
}

impl PathRenderer {
    /// Renderer using the bundled font. `style.font_path` is not read.
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            font: bundled_font(),
        }
    }

    /// Build a renderer, loading the font named by `style.font_path` or
    /// falling back to the bundled one.
    pub fn from_style(style: RenderStyle) -> Result<Self, RenderError> {
        style.validate()?;
        let font = match &style.font_path {
            Some(path) => Some(FontArc::try_from_vec(std::fs::read(path)?)?),
            None => bundled_font(),
        };
        Ok(Self { style, font })
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    /// Skip the label and point counter.
    pub fn without_font(mut self) -> Self {
        self.font = None;
        self
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draw everything for one frame.
    ///
    /// `detection` is the box to outline, if any; `total_points` feeds the
    /// point counter.
    pub fn render(
        &self,
        frame: &mut RgbImage,
        path: &[Centroid],
        detection: Option<&Detection>,
        total_points: usize,
    ) {
        self.draw_path(frame, path);
        if let Some(det) = detection {
            self.draw_detection(frame, det);
        }
        if self.style.show_point_count {
            self.draw_point_count(frame, total_points);
        }
    }

    /// Draw the path as consecutive segments fading from the oldest color to
    /// the most recent one. Paths with fewer than two points draw nothing.
    pub fn draw_path(&self, frame: &mut RgbImage, path: &[Centroid]) {
        if path.len() < 2 {
            return;
        }
        let oldest = Rgb(self.style.oldest_color);
        let recent = Rgb(self.style.recent_color);
        for (i, pair) in path.windows(2).enumerate() {
            let color = palette::segment_color(oldest, recent, i + 1, path.len());
            draw_thick_line(
                frame,
                pair[0].as_f32(),
                pair[1].as_f32(),
                self.style.line_thickness,
                color,
            );
        }
    }

    /// Outline a detection and put the label above its top-left corner.
    pub fn draw_detection(&self, frame: &mut RgbImage, det: &Detection) {
        let color = Rgb(self.style.box_color);
        let [x1, y1, x2, y2] = det.bbox.to_pixel_tlbr();
        let (w, h) = ((x2 - x1).max(1), (y2 - y1).max(1));

        for inset in 0..self.style.line_thickness as i32 {
            let (iw, ih) = (w - 2 * inset, h - 2 * inset);
            if iw <= 0 || ih <= 0 {
                break;
            }
            let rect = PixelRect::at(x1 + inset, y1 + inset).of_size(iw as u32, ih as u32);
            draw_hollow_rect_mut(frame, rect, color);
        }

        if let Some(font) = &self.font {
            let y = y1 - LABEL_OFFSET - LABEL_SCALE as i32;
            draw_text_mut(
                frame,
                color,
                x1,
                y,
                PxScale::from(LABEL_SCALE),
                font,
                &self.style.label,
            );
        }
    }

    pub fn draw_point_count(&self, frame: &mut RgbImage, total_points: usize) {
        let Some(font) = &self.font else {
            return;
        };
        let (x, y) = COUNTER_ORIGIN;
        draw_text_mut(
            frame,
            palette::TEXT_COLOR,
            x,
            y,
            PxScale::from(COUNTER_SCALE),
            font,
            &format!("Points: {total_points}"),
        );
    }
}

/// Draw a line `thickness` pixels wide by stacking one-pixel lines offset
/// across the line's minor axis.
fn draw_thick_line(
    frame: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    thickness: u32,
    color: Rgb<u8>,
) {
    let thickness = thickness.max(1) as i32;
    let mostly_horizontal = (end.0 - start.0).abs() >= (end.1 - start.1).abs();
    for offset in -((thickness - 1) / 2)..=(thickness / 2) {
        let o = offset as f32;
        let (s, e) = if mostly_horizontal {
            ((start.0, start.1 + o), (end.0, end.1 + o))
        } else {
            ((start.0 + o, start.1), (end.0 + o, end.1))
        };
        draw_line_segment_mut(frame, s, e, color);
    }
}
