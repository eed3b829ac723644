//! # Rendering Interface
//!
//! The engine core never rasterises anything itself. Components issue draw
//! calls against a [`Surface`], which a backend implements.
//!
//! ## Architecture
//!
//! - **Surface**: "draw this sub-image with this transform" and "fill with this colour"
//! - **DrawOptions**: the composed transform plus a filter hint
//! - **RecordingSurface**: a surface that only records calls, for tests and headless runs

mod surface;

pub use surface::{DrawCall, RecordingSurface, Surface};

use serde::{Deserialize, Serialize};

use crate::foundation::transform::Transform;

/// Sampling filter hint passed to the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    /// Nearest-neighbour sampling (pixel art)
    #[default]
    Nearest,
    /// Bilinear sampling
    Linear,
}

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a colour from its channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Options accompanying every draw call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawOptions {
    /// Transform from component space to screen space
    pub transform: Transform,
    /// Sampling filter hint
    pub filter: Filter,
}

impl DrawOptions {
    /// Options with the given transform and the default filter
    pub fn with_transform(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    /// A copy with `local` applied before the existing transform
    #[must_use]
    pub fn prepend(&self, local: &Transform) -> Self {
        Self {
            transform: local.then(&self.transform),
            filter: self.filter,
        }
    }
}
