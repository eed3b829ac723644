//! Scene camera

use serde::{Deserialize, Serialize};

use crate::component::{Capabilities, Component, Id, Identifier, Prepper};
use crate::error::EngineError;
use crate::foundation::geometry::{Point2, Rect};
use crate::foundation::transform::Transform;
use crate::game::Game;
use crate::render::Filter;

/// Where a camera looks in a given frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Effective zoom after fitting the scene bounds
    pub zoom: f64,
    /// Centre after clamping to the scene bounds
    pub centre: Point2,
    /// Viewport size in screen pixels
    pub viewport: Point2,
}

impl CameraFrame {
    /// Scale by zoom, then move the origin to the middle of the viewport
    pub fn screen_transform(&self) -> Transform {
        let (vw, vh) = self.viewport.to_f64();
        let mut t = Transform::scaling(self.zoom, self.zoom);
        t.translate(vw / 2.0, vh / 2.0);
        t
    }

    /// Offset for a component with the given parallax factor
    pub fn parallax_offset(&self, factor: f64) -> Transform {
        let (cx, cy) = self.centre.to_f64();
        Transform::translation(-cx * factor, -cy * factor)
    }
}

/// # Camera
///
/// A component referenced by a scene. Holds the world point at the centre of
/// the screen, a zoom factor and a filter hint. The viewport size is copied
/// from the game configuration during Prepare; before that the camera is
/// unusable and scenes fall back to drawing without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Identifier
    pub id: Id,
    /// World point shown at the centre of the viewport
    pub centre: Point2,
    /// Requested zoom; may be raised to fit the scene bounds
    pub zoom: f64,
    /// Sampling filter for everything this camera draws
    pub filter: Filter,
    #[serde(skip)]
    viewport: Option<Point2>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            id: Id::default(),
            centre: Point2::ZERO,
            zoom: 1.0,
            filter: Filter::default(),
            viewport: None,
        }
    }
}

impl Camera {
    /// Create a camera with zoom 1 centred on the origin
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            id: Id::new(ident),
            ..Self::default()
        }
    }

    /// Set the initial centre
    #[must_use]
    pub const fn with_centre(mut self, centre: Point2) -> Self {
        self.centre = centre;
        self
    }

    /// Set the zoom
    #[must_use]
    pub const fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the filter
    #[must_use]
    pub const fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Viewport size, once prepared
    pub const fn viewport(&self) -> Option<Point2> {
        self.viewport
    }

    /// Set the viewport explicitly (normally done by Prepare)
    pub fn set_viewport(&mut self, viewport: Point2) {
        self.viewport = Some(viewport);
    }

    /// Zoom and centre for drawing a scene with the given bounds
    ///
    /// The zoom is raised until the bounds cover the viewport, then the centre
    /// is clamped so the visible half-extent stays inside the bounds, one edge
    /// at a time (min edges first). Empty bounds disable both. Returns `None`
    /// until the camera has a viewport.
    pub fn frame(&self, bounds: Rect) -> Option<CameraFrame> {
        let viewport = self.viewport?;
        if bounds.is_empty() {
            log::warn!("Camera {:?} framing empty scene bounds; not clamping", self.id.0);
            return Some(CameraFrame {
                zoom: self.zoom,
                centre: self.centre,
                viewport,
            });
        }

        let (vw, vh) = viewport.to_f64();
        let (bw, bh) = bounds.size().to_f64();
        let zoom = self.zoom.max(vw / bw).max(vh / bh);

        #[allow(clippy::cast_possible_truncation)]
        let half = Point2::new(
            (f64::from(viewport.x / 2) / zoom) as i32,
            (f64::from(viewport.y / 2) / zoom) as i32,
        );
        let mut centre = self.centre;
        if centre.x - half.x < bounds.min.x {
            centre.x = bounds.min.x + half.x;
        }
        if centre.y - half.y < bounds.min.y {
            centre.y = bounds.min.y + half.y;
        }
        if centre.x + half.x > bounds.max.x {
            centre.x = bounds.max.x - half.x;
        }
        if centre.y + half.y > bounds.max.y {
            centre.y = bounds.max.y - half.y;
        }

        Some(CameraFrame {
            zoom,
            centre,
            viewport,
        })
    }
}

impl Prepper for Camera {
    fn prepare(&mut self, game: &Game) -> Result<(), EngineError> {
        let viewport = game.config().viewport();
        log::debug!("Camera {:?} viewport {viewport}", self.id.0);
        self.viewport = Some(viewport);
        Ok(())
    }
}

impl Component for Camera {
    fn name(&self) -> &'static str {
        "Camera"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::IDENTIFY | Capabilities::PREPARE
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(&self.id)
    }

    fn as_prepper(&mut self) -> Option<&mut dyn Prepper> {
        Some(self)
    }
}
