//! 2D vector type used throughout the scene graph.
//!
//! `Vector2` is glam's `Vec2`. Value-returning arithmetic comes straight from
//! glam (`a + b`, `a - b`, `Copy`, `length_squared`); the in-place helpers
//! below mutate the receiver and are what the transform chain is built from.

pub use glam::Vec2 as Vector2;

/// In-place mutation helpers for [`Vector2`].
pub trait VectorOps {
    /// Move by `(dx, dy)`.
    fn translate_in_place(&mut self, dx: f32, dy: f32);
    /// Multiply both components by `s`.
    fn scale_uniform_in_place(&mut self, s: f32);
    fn scale_x_in_place(&mut self, sx: f32);
    fn scale_y_in_place(&mut self, sy: f32);
    /// Rotate counter-clockwise (clockwise on a Y-down canvas) by `radians`.
    fn rotate_in_place(&mut self, radians: f32);
    /// Rotate by `degrees`.
    fn rotate_deg_in_place(&mut self, degrees: f32);
}

impl VectorOps for Vector2 {
    #[inline]
    fn translate_in_place(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    #[inline]
    fn scale_uniform_in_place(&mut self, s: f32) {
        self.x *= s;
        self.y *= s;
    }

    #[inline]
    fn scale_x_in_place(&mut self, sx: f32) {
        self.x *= sx;
    }

    #[inline]
    fn scale_y_in_place(&mut self, sy: f32) {
        self.y *= sy;
    }

    fn rotate_in_place(&mut self, radians: f32) {
        let (sin_t, cos_t) = radians.sin_cos();
        let x = self.x * cos_t - self.y * sin_t;
        let y = self.y * cos_t + self.x * sin_t;
        self.x = x;
        self.y = y;
    }

    fn rotate_deg_in_place(&mut self, degrees: f32) {
        self.rotate_in_place(degrees.to_radians());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector2, b: Vector2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn add_and_subtract_return_new_values() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 5.0);
        assert_eq!(a + b, Vector2::new(4.0, 7.0));
        assert_eq!(b - a, Vector2::new(2.0, 3.0));
        // Operands are untouched
        assert_eq!(a, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn squared_length() {
        assert_eq!(Vector2::new(3.0, 4.0).length_squared(), 25.0);
    }

    #[test]
    fn translate_and_scale() {
        let mut p = Vector2::new(2.0, 3.0);
        p.translate_in_place(1.0, -1.0);
        assert_eq!(p, Vector2::new(3.0, 2.0));
        p.scale_uniform_in_place(2.0);
        assert_eq!(p, Vector2::new(6.0, 4.0));
        p.scale_x_in_place(0.5);
        p.scale_y_in_place(0.25);
        assert_eq!(p, Vector2::new(3.0, 1.0));
    }

    #[test]
    fn rotate_quarter_turn() {
        let mut p = Vector2::new(1.0, 0.0);
        p.rotate_deg_in_place(90.0);
        assert!(approx(p, Vector2::new(0.0, 1.0)), "got {:?}", p);

        let mut q = Vector2::new(0.0, 2.0);
        q.rotate_in_place(std::f32::consts::PI);
        assert!(approx(q, Vector2::new(0.0, -2.0)), "got {:?}", q);
    }

    #[test]
    fn rotation_preserves_length() {
        let mut p = Vector2::new(3.0, -7.0);
        let before = p.length_squared();
        p.rotate_deg_in_place(37.5);
        assert!((p.length_squared() - before).abs() < 1e-3);
    }
}
