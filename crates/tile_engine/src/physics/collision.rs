//! Collision queries against the world

use crate::foundation::geometry::Rect;

/// Answers "is anything solid here?" for movers
///
/// [`crate::Game`] implements this over its indexed colliders. Any
/// `Fn(&Rect) -> bool` also works, which keeps movers testable in isolation.
pub trait CollisionQuery {
    /// Whether `rect` overlaps anything solid
    fn collides_at(&self, rect: &Rect) -> bool;
}

impl<F: Fn(&Rect) -> bool> CollisionQuery for F {
    fn collides_at(&self, rect: &Rect) -> bool {
        self(rect)
    }
}
