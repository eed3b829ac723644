//! Asset abstractions: sprite sheets and animation cursors
//!
//! Image decoding is a backend concern. The core only needs to know how big a
//! cell is, which rectangle of which image a cell index maps to, and how to
//! step an animation.

mod grid_sheet;

pub use grid_sheet::{FrameAnim, FrameDef, GridSheet};

use crate::foundation::geometry::{Point2, Rect};

/// A region of a source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubImage {
    /// Backend-specific image key (usually a path)
    pub source: String,
    /// Pixel bounds of the region within the source image
    pub bounds: Rect,
}

/// A sprite sheet: a set of equally sized cells and named animations
pub trait Sheet {
    /// Size of one cell in pixels
    fn cell_size(&self) -> Point2;

    /// Image region for a cell index
    fn sub_image(&self, cell: usize) -> SubImage;

    /// Start a fresh cursor for the named animation, if the sheet has it
    fn new_anim(&self, key: &str) -> Option<Box<dyn AnimCursor>>;
}

/// A running animation
pub trait AnimCursor {
    /// The cell currently showing
    fn cell(&self) -> usize;

    /// Advance by one tick
    fn advance(&mut self);
}
