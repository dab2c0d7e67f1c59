//! Drawing surface contract.
//!
//! The scene graph only ever nests these calls (save → transform → draw →
//! restore); it never inspects surface internals. The browser implementation
//! lives in `zap-scene-web` (`CanvasRenderingContext2d`); tests use
//! [`RecordingSurface`](super::recording::RecordingSurface).

use serde::Deserialize;
use crate::api::config::{DebugMarker, DEFAULT_DEBUG_MARKER};
use crate::assets::image::ImageId;

/// Horizontal text alignment relative to the draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A 2D raster surface with a canvas-style transform stack.
///
/// Angles are radians. Styles are CSS color strings, fonts CSS font shorthands.
pub trait Surface {
    /// Push the current transform and style state.
    fn save(&mut self);
    /// Pop the state pushed by the matching [`save`](Surface::save).
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, x: f32, y: f32);

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn begin_path(&mut self);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f32;
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    /// Blit a loaded image with its top-left corner at `(x, y)`.
    fn draw_image(&mut self, image: ImageId, x: f32, y: f32);
}

/// Per-frame render state threaded through the render traversal.
pub struct RenderContext<'a> {
    pub surface: &'a mut dyn Surface,
    /// Style of entity debug markers.
    pub debug_marker: &'a DebugMarker,
}

impl<'a> RenderContext<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self {
            surface,
            debug_marker: &DEFAULT_DEBUG_MARKER,
        }
    }

    pub fn with_debug_marker(mut self, marker: &'a DebugMarker) -> Self {
        self.debug_marker = marker;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_keywords() {
        assert_eq!(TextAlign::Left.as_str(), "left");
        assert_eq!(TextAlign::Center.as_str(), "center");
        assert_eq!(TextAlign::Right.as_str(), "right");
        assert_eq!(TextAlign::default(), TextAlign::Left);
    }

    #[test]
    fn align_deserializes_lowercase() {
        let align: TextAlign = serde_json::from_str("\"center\"").unwrap();
        assert_eq!(align, TextAlign::Center);
    }
}
