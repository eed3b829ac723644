//! Ready-made components
//!
//! - [`Tilemap`]: sparse tile grid with animated tiles and cell collision
//! - [`Fill`]: full-surface colour
//! - [`PrismMap`]: isometric grid of prisms

mod fill;
mod prism_map;
mod tilemap;

pub use fill::Fill;
pub use prism_map::{Prism, PrismMap};
pub use tilemap::{Tile, Tilemap};
