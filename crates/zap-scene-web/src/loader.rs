use std::collections::HashMap;
use std::rc::Rc;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;
use zap_scene::{ImageHandle, ImageId, ImageLoader, ImageState};
use crate::canvas::ImageTable;

type LoadCallback = Closure<dyn FnMut()>;

/// Callbacks wired to one in-flight element. Only one of them ever fires.
struct PendingLoad {
    handle: ImageHandle,
    element: HtmlImageElement,
    _onload: LoadCallback,
    _onerror: LoadCallback,
}

/// Loads images through `HtmlImageElement`.
///
/// Each load creates an element, sets its `src` and resolves the returned
/// handle from the element's `onload`/`onerror` callback. Decoded elements
/// land in the shared [`ImageTable`] read by [`CanvasSurface`](crate::CanvasSurface).
///
/// The loader owns both callbacks of every load and drops them once the
/// handle has settled, so the callback that never fired is freed too.
pub struct HtmlImageLoader {
    next_id: u32,
    images: ImageTable,
    pending: HashMap<ImageId, PendingLoad>,
}

impl HtmlImageLoader {
    pub fn new(images: ImageTable) -> Self {
        Self {
            next_id: 0,
            images,
            pending: HashMap::new(),
        }
    }

    fn next_image_id(&mut self) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Loads still waiting on the browser.
    pub fn in_flight(&self) -> usize {
        self.pending
            .values()
            .filter(|load| matches!(load.handle.state(), ImageState::Pending))
            .count()
    }

    /// Drop the decoded element for `id` and any callbacks still wired to it.
    /// Sprites drawing this image render nothing afterwards.
    pub fn release(&mut self, id: ImageId) {
        if let Some(load) = self.pending.remove(&id) {
            load.element.set_onload(None);
            load.element.set_onerror(None);
        }
        if self.images.borrow_mut().remove(&id).is_some() {
            debug!("image {id:?} released");
        }
    }

    /// Free the callbacks of loads that have settled. Never runs inside a
    /// callback, so neither closure is dropped while executing.
    fn prune_settled(&mut self) {
        self.pending.retain(|_, load| {
            let settled = !matches!(load.handle.state(), ImageState::Pending);
            if settled {
                load.element.set_onload(None);
                load.element.set_onerror(None);
            }
            !settled
        });
    }
}

impl ImageLoader for HtmlImageLoader {
    fn load(&mut self, src: &str) -> ImageHandle {
        self.prune_settled();

        let id = self.next_image_id();
        let handle = ImageHandle::pending(id, src);

        let element = match HtmlImageElement::new() {
            Ok(element) => element,
            Err(err) => {
                handle.fail(format!("{err:?}"));
                return handle;
            }
        };

        let onload: LoadCallback = {
            let handle = handle.clone();
            let images = Rc::clone(&self.images);
            let loaded = element.clone();
            Closure::wrap(Box::new(move || {
                if !matches!(handle.state(), ImageState::Pending) {
                    return;
                }
                let (width, height) = (loaded.natural_width(), loaded.natural_height());
                images.borrow_mut().insert(id, loaded.clone());
                handle.resolve(width, height);
            }) as Box<dyn FnMut()>)
        };
        let onerror: LoadCallback = {
            let handle = handle.clone();
            Closure::wrap(Box::new(move || {
                if matches!(handle.state(), ImageState::Pending) {
                    handle.fail("image element reported an error");
                }
            }) as Box<dyn FnMut()>)
        };

        element.set_onload(Some(onload.as_ref().unchecked_ref()));
        element.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        element.set_src(src);

        self.pending.insert(
            id,
            PendingLoad {
                handle: handle.clone(),
                element,
                _onload: onload,
                _onerror: onerror,
            },
        );
        handle
    }
}
