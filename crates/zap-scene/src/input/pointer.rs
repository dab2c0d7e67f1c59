use glam::Vec2;

/// Pointer events the stage understands, in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click began at client coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A click ended at client coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to client coordinates (x, y).
    PointerMove { x: f32, y: f32 },
}

impl InputEvent {
    /// Client-space position carried by the event.
    pub fn client_position(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Vec2::new(x, y),
        }
    }
}

/// On-screen rectangle of the drawing surface (a bounding client rect).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Map a client-space point into surface-local coordinates.
    pub fn to_local(&self, client: Vec2) -> Vec2 {
        client - Vec2::new(self.x, self.y)
    }

    /// Whether the rectangle has a usable (positive) area.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_points_are_offset_by_bounds() {
        let bounds = SurfaceBounds::new(30.0, 12.0, 640.0, 480.0);
        let event = InputEvent::PointerDown { x: 40.0, y: 20.0 };
        assert_eq!(bounds.to_local(event.client_position()), Vec2::new(10.0, 8.0));
    }

    #[test]
    fn zero_sized_bounds_have_no_area() {
        assert!(!SurfaceBounds::default().has_area());
        assert!(!SurfaceBounds::new(0.0, 0.0, 100.0, 0.0).has_area());
        assert!(SurfaceBounds::new(0.0, 0.0, 1.0, 1.0).has_area());
    }
}
