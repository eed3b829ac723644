//! Grid-layout sprite sheets described in RON

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::assets::{AnimCursor, Sheet, SubImage};
use crate::core::config::{Config, ConfigError, ConfigFormat};
use crate::foundation::geometry::{Point2, Rect};

/// One frame of a frame animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDef {
    /// Cell index shown during this frame
    pub cell: usize,
    /// How many ticks the frame lasts (0 is treated as 1)
    pub duration: u32,
}

/// A sheet whose cells are laid out left to right, top to bottom
///
/// ```rust
/// use tile_engine::assets::{GridSheet, Sheet};
/// use tile_engine::foundation::geometry::Point2;
///
/// let sheet = GridSheet::new("tiles.png", 4, Point2::new(16, 16));
/// assert_eq!(sheet.sub_image(5).bounds.min, Point2::new(16, 16));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSheet {
    /// Source image key
    pub image: String,
    /// Cells per row
    pub columns: usize,
    /// Size of one cell in pixels
    pub cell_size: Point2,
    /// Named animations
    pub anims: HashMap<String, Vec<FrameDef>>,
}

impl GridSheet {
    /// Create a sheet with no animations
    pub fn new(image: impl Into<String>, columns: usize, cell_size: Point2) -> Self {
        Self {
            image: image.into(),
            columns,
            cell_size,
            anims: HashMap::new(),
        }
    }

    /// Add a named animation
    #[must_use]
    pub fn with_anim(mut self, key: impl Into<String>, frames: Vec<FrameDef>) -> Self {
        self.anims.insert(key.into(), frames);
        self
    }

    /// Parse a RON sheet description
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let sheet = Self::parse(contents, ConfigFormat::Ron)?;
        sheet.validate()?;
        Ok(sheet)
    }

    /// Reject sheets whose cells have no area
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size.x <= 0 || self.cell_size.y <= 0 {
            return Err(ConfigError::Invalid(format!(
                "sheet {:?} has cell size {}",
                self.image, self.cell_size
            )));
        }
        Ok(())
    }
}

impl Config for GridSheet {}

impl Sheet for GridSheet {
    fn cell_size(&self) -> Point2 {
        self.cell_size
    }

    fn sub_image(&self, cell: usize) -> SubImage {
        let columns = self.columns.max(1);
        let col = i32::try_from(cell % columns).unwrap_or(i32::MAX);
        let row = i32::try_from(cell / columns).unwrap_or(i32::MAX);
        let min = Point2::new(col, row).cmul(self.cell_size);
        SubImage {
            source: self.image.clone(),
            bounds: Rect::new(min, min + self.cell_size),
        }
    }

    fn new_anim(&self, key: &str) -> Option<Box<dyn AnimCursor>> {
        let frames = self.anims.get(key)?;
        if frames.is_empty() {
            log::warn!("Animation {key:?} in {} has no frames", self.image);
            return None;
        }
        Some(Box::new(FrameAnim::new(frames.clone())))
    }
}

/// Cursor over a list of timed frames, looping forever
#[derive(Debug, Clone)]
pub struct FrameAnim {
    frames: Vec<FrameDef>,
    index: usize,
    ticks: u32,
}

impl FrameAnim {
    /// Start at the first frame
    pub const fn new(frames: Vec<FrameDef>) -> Self {
        Self {
            frames,
            index: 0,
            ticks: 0,
        }
    }
}

impl AnimCursor for FrameAnim {
    fn cell(&self) -> usize {
        self.frames.get(self.index).map_or(0, |f| f.cell)
    }

    fn advance(&mut self) {
        let Some(frame) = self.frames.get(self.index) else {
            return;
        };
        self.ticks += 1;
        if self.ticks >= frame.duration.max(1) {
            self.ticks = 0;
            self.index = (self.index + 1) % self.frames.len();
        }
    }
}
