//! Sub-pixel actor movement

use serde::{Deserialize, Serialize};

use crate::foundation::geometry::{Point2, Rect};
use crate::physics::CollisionQuery;

/// # Actor
///
/// An axis-aligned box that moves one pixel at a time and never enters a
/// solid region. Fractional motion accumulates in a per-axis remainder and is
/// spent once it rounds to at least one whole pixel.
///
/// An actor is a building block for game components: embed it and call
/// [`Actor::move_x`] / [`Actor::move_y`] from an update, passing the game as
/// the world.
///
/// ```rust
/// use tile_engine::foundation::geometry::{Point2, Rect};
/// use tile_engine::physics::Actor;
///
/// let wall = |r: &Rect| r.max.x > 10;
/// let mut actor = Actor::new(Point2::new(0, 0), Point2::new(4, 4));
/// let mut hit = false;
/// actor.move_x(&wall, 20.0, || hit = true);
/// assert!(hit);
/// assert_eq!(actor.position, Point2::new(6, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub position: Point2,
    /// Collision box size
    pub size: Point2,
    #[serde(skip)]
    x_rem: f64,
    #[serde(skip)]
    y_rem: f64,
}

impl Actor {
    /// Create an actor at rest
    pub const fn new(position: Point2, size: Point2) -> Self {
        Self {
            position,
            size,
            x_rem: 0.0,
            y_rem: 0.0,
        }
    }

    /// The collision box at the current position
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Fractional motion carried on each axis
    pub const fn remainder(&self) -> (f64, f64) {
        (self.x_rem, self.y_rem)
    }

    /// Move horizontally by `dx` pixels
    ///
    /// On the first blocked step `on_collide` runs once and the rest of the
    /// move is dropped.
    pub fn move_x(&mut self, world: &(impl CollisionQuery + ?Sized), dx: f64, on_collide: impl FnOnce()) {
        let steps = take_whole(&mut self.x_rem, dx);
        self.step(world, Point2::new(steps.signum(), 0), steps.unsigned_abs(), on_collide);
    }

    /// Move vertically by `dy` pixels; see [`Actor::move_x`]
    pub fn move_y(&mut self, world: &(impl CollisionQuery + ?Sized), dy: f64, on_collide: impl FnOnce()) {
        let steps = take_whole(&mut self.y_rem, dy);
        self.step(world, Point2::new(0, steps.signum()), steps.unsigned_abs(), on_collide);
    }

    fn step(
        &mut self,
        world: &(impl CollisionQuery + ?Sized),
        unit: Point2,
        count: u32,
        on_collide: impl FnOnce(),
    ) {
        for _ in 0..count {
            let next = self.position + unit;
            if world.collides_at(&Rect::from_origin_size(next, self.size)) {
                log::trace!("Actor blocked at {} moving {unit}", self.position);
                on_collide();
                return;
            }
            self.position = next;
        }
    }
}

/// Add `delta` to `rem`, then remove and return its whole part
///
/// Rounds half away from zero.
#[allow(clippy::cast_possible_truncation)]
fn take_whole(rem: &mut f64, delta: f64) -> i32 {
    *rem += delta;
    let whole = rem.round();
    *rem -= whole;
    whole as i32
}
