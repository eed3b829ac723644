//! Render surface abstraction

use crate::assets::SubImage;
use crate::render::{Color, DrawOptions};

/// Something draw calls can be issued against
///
/// Backends decide pixel formats and how filter hints are honoured.
pub trait Surface {
    /// Draw a sheet cell with the given options
    fn draw_image(&mut self, image: &SubImage, opts: &DrawOptions);

    /// Fill the whole surface with a colour
    fn fill(&mut self, color: Color, opts: &DrawOptions);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// [`Surface::draw_image`]
    Image {
        /// The cell that was drawn
        image: SubImage,
        /// Options it was drawn with
        opts: DrawOptions,
    },
    /// [`Surface::fill`]
    Fill {
        /// The fill colour
        color: Color,
        /// Options it was drawn with
        opts: DrawOptions,
    },
}

impl DrawCall {
    /// Where the call places its origin on screen
    pub fn origin(&self) -> (f64, f64) {
        match self {
            Self::Image { opts, .. } | Self::Fill { opts, .. } => opts.transform.apply(0.0, 0.0),
        }
    }
}

/// Surface that records every call instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Create an empty recording surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, in issue order
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls (typically once per frame)
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, image: &SubImage, opts: &DrawOptions) {
        log::trace!("draw_image {} at {:?}", image.bounds, opts.transform.apply(0.0, 0.0));
        self.calls.push(DrawCall::Image {
            image: image.clone(),
            opts: *opts,
        });
    }

    fn fill(&mut self, color: Color, opts: &DrawOptions) {
        self.calls.push(DrawCall::Fill { color, opts: *opts });
    }
}
