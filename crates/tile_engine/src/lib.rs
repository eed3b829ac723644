//! # Tile Engine
//!
//! The composition and simulation core of a small 2D game engine.
//!
//! ## Features
//!
//! - **Capability Model**: Components opt into behaviours (draw, update, collide, ...)
//! - **Component Arena**: Stable handles, breadth-first scan, capability queries
//! - **Scenes & Cameras**: Draw-order maintenance, zoom/clamp, parallax
//! - **Actor Movement**: Sub-pixel remainder movement with discrete collision
//! - **Tile Maps**: Sparse tile storage with animated tiles and cell collision
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tile_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut game = Game::new(GameConfig::default());
//!     let fill = game.insert(Fill::new(Color::BLACK));
//!     let root = game.insert(Scene::new("root").with_child(fill));
//!     game.set_root(root);
//!
//!     game.load()?;
//!     game.prepare()?;
//!
//!     let mut surface = RecordingSurface::new();
//!     game.update()?;
//!     game.draw(&mut surface);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod assets;
pub mod component;
pub mod components;
pub mod physics;
pub mod render;
pub mod scene;

mod error;
mod game;

#[cfg(test)]
mod tests;

pub use error::EngineError;
pub use game::Game;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        EngineError, Game,
        assets::{AnimCursor, GridSheet, Sheet, SubImage},
        component::{
            Capabilities, Capability, Component, Disabled, Hidden, Id, Parallax, ZOrder,
        },
        components::{Fill, Prism, PrismMap, Tile, Tilemap},
        core::config::{Config, ConfigError, GameConfig},
        foundation::{
            collections::ComponentId,
            geometry::{Box3, IntProjection, Point2, Point3, Rect},
            transform::Transform,
        },
        physics::{Actor, CollisionQuery},
        render::{Color, DrawOptions, Filter, RecordingSurface, Surface},
        scene::{Camera, DrawOrder, Scene},
    };
}
