//! Asynchronous image resources.
//!
//! A loader hands out an [`ImageHandle`] immediately; the backend resolves
//! it later (one-shot) with the decoded pixel size, or fails it. The scene
//! graph never blocks on a handle: sprites simply render nothing until it
//! becomes ready.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Backend key for a loaded image, passed to [`Surface::draw_image`](crate::Surface::draw_image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Why an image never became drawable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The backend reported a load or decode failure.
    #[error("failed to load image `{src}`: {reason}")]
    Failed { src: String, reason: String },
    /// The image decoded to zero pixels and cannot be drawn.
    #[error("image `{src}` has no pixels")]
    Empty { src: String },
}

/// Load state of an image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageState {
    Pending,
    Ready { width: u32, height: u32 },
    Failed(LoadError),
}

/// Shared, single-threaded handle to an image that may still be loading.
/// Clones observe the same state.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    id: ImageId,
    src: Rc<str>,
    state: Rc<RefCell<ImageState>>,
}

impl ImageHandle {
    /// A handle that has not resolved yet.
    pub fn pending(id: ImageId, src: &str) -> Self {
        Self {
            id,
            src: Rc::from(src),
            state: Rc::new(RefCell::new(ImageState::Pending)),
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn state(&self) -> ImageState {
        self.state.borrow().clone()
    }

    /// Pixel size once ready.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match *self.state.borrow() {
            ImageState::Ready { width, height } => Some((width, height)),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.dimensions().is_some()
    }

    pub fn error(&self) -> Option<LoadError> {
        match &*self.state.borrow() {
            ImageState::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    /// Mark the image as loaded. Only the first resolution counts.
    pub fn resolve(&self, width: u32, height: u32) {
        let mut state = self.state.borrow_mut();
        if *state != ImageState::Pending {
            return;
        }
        if width == 0 || height == 0 {
            log::warn!("image `{}` decoded with no pixels", self.src);
            *state = ImageState::Failed(LoadError::Empty {
                src: self.src.to_string(),
            });
            return;
        }
        log::info!("image loaded: `{}` ({}x{})", self.src, width, height);
        *state = ImageState::Ready { width, height };
    }

    /// Mark the image as permanently unloadable. Ignored once resolved.
    pub fn fail(&self, reason: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        if *state != ImageState::Pending {
            return;
        }
        let err = LoadError::Failed {
            src: self.src.to_string(),
            reason: reason.into(),
        };
        log::warn!("{}", err);
        *state = ImageState::Failed(err);
    }
}

/// Capability to start loading an image by source identifier (URL, path, key).
pub trait ImageLoader {
    fn load(&mut self, src: &str) -> ImageHandle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_pending() {
        let handle = ImageHandle::pending(ImageId(1), "hero.png");
        assert_eq!(handle.state(), ImageState::Pending);
        assert!(!handle.is_ready());
        assert_eq!(handle.src(), "hero.png");
    }

    #[test]
    fn resolve_is_visible_through_clones() {
        let handle = ImageHandle::pending(ImageId(1), "hero.png");
        let clone = handle.clone();
        handle.resolve(64, 32);
        assert_eq!(clone.dimensions(), Some((64, 32)));
    }

    #[test]
    fn first_resolution_wins() {
        let handle = ImageHandle::pending(ImageId(1), "hero.png");
        handle.resolve(10, 10);
        handle.fail("late error");
        handle.resolve(99, 99);
        assert_eq!(handle.dimensions(), Some((10, 10)));
        assert!(handle.error().is_none());
    }

    #[test]
    fn failure_is_reported() {
        let handle = ImageHandle::pending(ImageId(2), "missing.png");
        handle.fail("404");
        let err = handle.error().unwrap();
        assert_eq!(err.to_string(), "failed to load image `missing.png`: 404");
        assert!(!handle.is_ready());
    }

    #[test]
    fn zero_sized_image_fails() {
        let handle = ImageHandle::pending(ImageId(3), "empty.png");
        handle.resolve(0, 12);
        assert_eq!(
            handle.error(),
            Some(LoadError::Empty { src: "empty.png".to_owned() })
        );
    }
}
