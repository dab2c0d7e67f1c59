use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};
use zap_scene::{ImageId, Surface, TextAlign};

/// Decoded images keyed by id, shared between the loader (writer) and the
/// surface (reader).
pub type ImageTable = Rc<RefCell<HashMap<ImageId, HtmlImageElement>>>;

/// [`Surface`] over a browser `CanvasRenderingContext2d`.
///
/// Canvas calls that can throw (bad transform values, detached canvas) are
/// ignored for the frame; the scene keeps drawing.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: ImageTable,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, images: ImageTable) -> Self {
        Self { ctx, images }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = self.ctx.scale(x as f64, y as f64);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.clear_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        let _ = self.ctx.arc(
            x as f64,
            y as f64,
            radius as f64,
            start_angle as f64,
            end_angle as f64,
        );
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.stroke_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn measure_text(&mut self, text: &str) -> f32 {
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width() as f32)
            .unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32) {
        if let Some(element) = self.images.borrow().get(&image) {
            let _ = self
                .ctx
                .draw_image_with_html_image_element(element, x as f64, y as f64);
        }
    }
}
