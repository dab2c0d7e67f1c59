use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};
use zap_scene::{InputEvent, Stage, StageConfig, SurfaceBounds};
use crate::canvas::{CanvasSurface, ImageTable};
use crate::error::BridgeError;
use crate::loader::HtmlImageLoader;

type FrameCallback = Closure<dyn FnMut(f64)>;
type PointerCallback = Closure<dyn FnMut(MouseEvent)>;

/// Binds a [`Stage`] to an on-page canvas and drives it.
///
/// [`start`](StageRunner::start) schedules a `requestAnimationFrame` loop
/// that re-schedules itself every frame, and forwards `mousedown`, `mouseup`
/// and `mousemove` from the canvas. Dropping the runner removes the
/// listeners and ends the loop.
pub struct StageRunner {
    window: Window,
    canvas: HtmlCanvasElement,
    stage: Rc<RefCell<Stage<CanvasSurface>>>,
    loader: HtmlImageLoader,
    listeners: Vec<(&'static str, PointerCallback)>,
    /// Cleared on drop; the frame loop stops at its next tick.
    running: Rc<Cell<bool>>,
}

impl StageRunner {
    /// Look up `canvas_id` in the current document and bind a stage to it.
    pub fn attach_by_id(canvas_id: &str, config: StageConfig) -> Result<Self, BridgeError> {
        let window = web_sys::window().ok_or(BridgeError::NoWindow)?;
        let document = window.document().ok_or(BridgeError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| BridgeError::CanvasNotFound(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BridgeError::NotACanvas(canvas_id.to_owned()))?;
        Self::attach(window, canvas, config)
    }

    pub fn attach(window: Window, canvas: HtmlCanvasElement, config: StageConfig) -> Result<Self, BridgeError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(BridgeError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BridgeError::NoContext)?;

        let images: ImageTable = Rc::new(RefCell::new(HashMap::new()));
        let surface = CanvasSurface::new(ctx, Rc::clone(&images));
        let stage = Stage::new(surface, bounds_of(&canvas), config);

        Ok(Self {
            window,
            canvas,
            stage: Rc::new(RefCell::new(stage)),
            loader: HtmlImageLoader::new(images),
            listeners: Vec::new(),
            running: Rc::new(Cell::new(false)),
        })
    }

    /// Shared handle to the stage, for building the scene.
    pub fn stage(&self) -> Rc<RefCell<Stage<CanvasSurface>>> {
        Rc::clone(&self.stage)
    }

    pub fn loader(&mut self) -> &mut HtmlImageLoader {
        &mut self.loader
    }

    /// Install the pointer listeners and schedule the first frame.
    /// Calling it again is a no-op.
    pub fn start(&mut self) -> Result<(), BridgeError> {
        if self.running.get() {
            return Ok(());
        }
        self.listen("mousedown", |x, y| InputEvent::PointerDown { x, y })?;
        self.listen("mouseup", |x, y| InputEvent::PointerUp { x, y })?;
        self.listen("mousemove", |x, y| InputEvent::PointerMove { x, y })?;
        self.running.set(true);
        self.schedule_frames()
    }

    fn listen(&mut self, kind: &'static str, to_event: fn(f32, f32) -> InputEvent) -> Result<(), BridgeError> {
        let stage = Rc::clone(&self.stage);
        let canvas = self.canvas.clone();
        let callback: PointerCallback = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let Ok(mut stage) = stage.try_borrow_mut() else {
                warn!("{kind}: stage busy, event dropped");
                return;
            };
            // The canvas may have moved since the last event
            stage.set_bounds(bounds_of(&canvas));
            stage.handle_input(to_event(evt.client_x() as f32, evt.client_y() as f32));
        }) as Box<dyn FnMut(MouseEvent)>);

        self.canvas
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        self.listeners.push((kind, callback));
        Ok(())
    }

    fn schedule_frames(&self) -> Result<(), BridgeError> {
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let next = Rc::clone(&slot);
        let stage = Rc::clone(&self.stage);
        let window = self.window.clone();
        let running = Rc::clone(&self.running);

        let callback: FrameCallback = Closure::wrap(Box::new(move |timestamp: f64| {
            if !running.get() {
                next.borrow_mut().take();
                return;
            }
            match stage.try_borrow_mut() {
                Ok(mut stage) => stage.frame(timestamp),
                Err(_) => debug!("frame at {timestamp}ms: stage busy, skipped"),
            }
            if let Some(callback) = next.borrow().as_ref() {
                if let Err(err) = request_frame(&window, callback) {
                    warn!("frame loop stopped: {err}");
                }
            }
        }) as Box<dyn FnMut(f64)>);

        request_frame(&self.window, &callback)?;
        *slot.borrow_mut() = Some(callback);
        Ok(())
    }
}

impl Drop for StageRunner {
    fn drop(&mut self) {
        self.running.set(false);
        for (kind, callback) in self.listeners.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
        }
    }
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, BridgeError> {
    Ok(window.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

/// On-screen rectangle of the canvas.
fn bounds_of(canvas: &HtmlCanvasElement) -> SurfaceBounds {
    let rect = canvas.get_bounding_client_rect();
    SurfaceBounds::new(rect.x() as f32, rect.y() as f32, rect.width() as f32, rect.height() as f32)
}
