//! # Scenes
//!
//! A [`Scene`] holds an ordered list of children and an optional [`Camera`].
//!
//! ## Drawing
//!
//! ```text
//! screen = base ∘ translate(viewport / 2) ∘ scale(zoom)
//!               ∘ translate(-centre × parallax) ∘ local
//! ```
//!
//! Children are drawn in ascending [`DrawOrder`]. Children without a key
//! draw first, in insertion order.

mod camera;
pub mod draw_order;
mod scene_graph;

pub use camera::{Camera, CameraFrame};
pub use draw_order::DrawOrder;
pub use scene_graph::Scene;
