//! Word-wrapped text block.
//!
//! Layout is lazy: changing the text, font size, font family, line spacing
//! or the entity width marks the block dirty, and the next render reflows it
//! using the surface's text measurement.

use serde::Deserialize;
use crate::components::entity::NodeState;
use crate::renderer::traits::{Surface, TextAlign};

/// Font and paint settings for a text block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    pub font_family: String,
    /// CSS fill color.
    pub color: String,
    /// Line advance as a multiple of the font size.
    pub line_spacing: f32,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            font_family: "Arial".to_owned(),
            color: "rgb(0,0,0)".to_owned(),
            line_spacing: 1.4,
            align: TextAlign::Left,
        }
    }
}

/// What happens to lines outside the block's `[0, height)` band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Draw every line.
    #[default]
    Visible,
    /// Skip lines whose top lies outside the block.
    Hidden,
}

/// Greedily pack space-separated words into lines no wider than `max_width`.
///
/// A word that is wider than `max_width` on its own still gets its own line;
/// words are never split or dropped.
pub fn wrap_words(text: &str, max_width: f32, mut measure: impl FnMut(&str) -> f32) -> Vec<String> {
    let mut words = text.split(' ');
    let mut lines = Vec::new();
    let mut current = words.next().unwrap_or_default().to_owned();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }
    lines.push(current);
    lines
}

/// Text content of an entity.
#[derive(Debug, Clone)]
pub struct TextBlock {
    content: String,
    style: TextStyle,
    overflow: Overflow,
    lines: Vec<String>,
    dirty: bool,
    /// Width the current `lines` were wrapped for.
    layout_width: Option<f32>,
    total_height: Option<f32>,
    /// Vertical offset applied to every line (scrolling).
    offset: f32,
}

impl TextBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_style(content, TextStyle::default())
    }

    pub fn with_style(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
            overflow: Overflow::Visible,
            lines: Vec::new(),
            dirty: true,
            layout_width: None,
            total_height: None,
            offset: 0.0,
        }
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.dirty = true;
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.style.font_size = size;
        self.dirty = true;
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.style.font_family = family.into();
        self.dirty = true;
    }

    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.style.line_spacing = spacing;
        self.dirty = true;
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.style.align = align;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.style.color = color.into();
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
    }

    /// CSS font shorthand, e.g. `20px Arial`.
    pub fn font(&self) -> String {
        format!("{}px {}", self.style.font_size, self.style.font_family)
    }

    /// Wrapped lines from the last layout.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Height of all wrapped lines; `None` until the first layout.
    pub fn total_height(&self) -> Option<f32> {
        self.total_height
    }

    pub fn text_offset(&self) -> f32 {
        self.offset
    }

    pub fn set_text_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Scroll so that `fraction` 0.0 shows the first line at the top and 1.0
    /// aligns the last line with the bottom of a `viewport_height` block.
    /// Ignored until the text has been laid out once.
    pub fn scroll_to(&mut self, fraction: f32, viewport_height: f32) {
        if let Some(total) = self.total_height {
            self.offset = -((total - viewport_height) * fraction);
        }
    }

    /// Whether the next render must reflow for a block of `width`.
    pub fn needs_layout(&self, width: f32) -> bool {
        self.dirty || self.layout_width != Some(width)
    }

    fn line_height(&self) -> f32 {
        self.style.font_size * self.style.line_spacing
    }

    /// Reflow the text for `width` using the surface's current measurement.
    pub fn layout(&mut self, width: f32, surface: &mut dyn Surface) {
        surface.save();
        surface.set_font(&self.font());
        self.lines = wrap_words(&self.content, width, |line| surface.measure_text(line));
        surface.restore();

        self.total_height = Some(self.lines.len() as f32 * self.line_height());
        self.layout_width = Some(width);
        self.dirty = false;
    }

    pub(crate) fn render(&mut self, node: &NodeState, surface: &mut dyn Surface) {
        if self.needs_layout(node.width) {
            self.layout(node.width, surface);
        }

        surface.set_font(&self.font());
        surface.set_fill_style(&self.style.color);
        surface.set_text_align(self.style.align);

        let line_height = self.line_height();
        for (i, line) in self.lines.iter().enumerate() {
            let y = i as f32 * line_height + self.offset;
            if self.overflow == Overflow::Visible || (y >= 0.0 && y < node.height) {
                surface.fill_text(line, 0.0, y);
            }
        }
    }
}
