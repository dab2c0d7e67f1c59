//! Headless surface that records every call.
//!
//! Text is measured with a fixed advance per character so layout is
//! deterministic without a font rasterizer.

use super::traits::{Surface, TextAlign};
use crate::assets::image::ImageId;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { x: f32, y: f32 },
    Rotate { radians: f32 },
    Scale { x: f32, y: f32 },
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    FillStyle(String),
    StrokeStyle(String),
    BeginPath,
    Arc { x: f32, y: f32, radius: f32 },
    Fill,
    Stroke,
    StrokeRect { x: f32, y: f32, width: f32, height: f32 },
    Font(String),
    TextAlign(TextAlign),
    FillText { text: String, x: f32, y: f32 },
    DrawImage { image: ImageId, x: f32, y: f32 },
}

/// A [`Surface`] that stores calls instead of drawing.
#[derive(Debug)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    char_width: f32,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    /// Default advance: 10 units per character.
    pub fn new() -> Self {
        Self::with_char_width(10.0)
    }

    pub fn with_char_width(char_width: f32) -> Self {
        Self {
            commands: Vec::new(),
            char_width,
            depth: 0,
            max_depth: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain recorded commands (e.g. between frames).
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Strings passed to `fill_text`, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Current save/restore nesting.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest nesting reached so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate { radians });
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Scale { x, y });
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::FillStyle(style.to_owned()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::StrokeStyle(style.to_owned()));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, _start_angle: f32, _end_angle: f32) {
        self.commands.push(DrawCommand::Arc { x, y, radius });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::StrokeRect { x, y, width, height });
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_owned()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::TextAlign(align));
    }

    fn measure_text(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32) {
        self.commands.push(DrawCommand::DrawImage { image, x, y });
    }
}
