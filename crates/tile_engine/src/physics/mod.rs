//! Movement and collision
//!
//! Integer-position movers that carry fractional motion between frames and
//! stop at the last free pixel before anything solid.

mod actor;
mod collision;

pub use actor::Actor;
pub use collision::CollisionQuery;
