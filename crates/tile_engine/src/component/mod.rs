//! # Component Capability Model
//!
//! A component is an opaque node in the game tree that implements any subset
//! of a closed set of capabilities. Each capability is a small trait; a
//! component exposes it through an accessor on [`Component`] that returns
//! `Some` when implemented. Callers never need to know concrete types.
//!
//! ## Example
//!
//! ```rust
//! use tile_engine::component::{Capabilities, Capability, Component, Hidden, Hider};
//!
//! struct Marker {
//!     hidden: Hidden,
//! }
//!
//! impl Component for Marker {
//!     fn name(&self) -> &'static str {
//!         "Marker"
//!     }
//!
//!     fn capabilities(&self) -> Capabilities {
//!         Capabilities::HIDE
//!     }
//!
//!     fn as_hider(&self) -> Option<&dyn Hider> {
//!         Some(&self.hidden)
//!     }
//!
//!     fn as_hider_mut(&mut self) -> Option<&mut dyn Hider> {
//!         Some(&mut self.hidden)
//!     }
//! }
//!
//! let marker = Marker { hidden: Hidden::default() };
//! assert!(marker.implements(Capability::Hide));
//! ```

pub mod capability;
pub mod scan;

pub use capability::{audit, AuditReport, Capabilities, Capability};
pub use scan::{find_all, find_first, scan};

use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::error::EngineError;
use crate::foundation::collections::ComponentId;
use crate::foundation::geometry::{Box3, Rect};
use crate::foundation::transform::Transform;
use crate::game::Game;
use crate::render::{DrawOptions, Surface};
use crate::scene::DrawOrder;

/// Upcast to [`Any`] for downcasting to concrete component types
pub trait AsAny {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A node in the game tree
///
/// Only [`Component::name`] and [`Component::capabilities`] are required;
/// every accessor defaults to `None`. Implementors override the accessors for
/// the capabilities they declare.
pub trait Component: AsAny + 'static {
    /// Kind name, used in logs and errors
    fn name(&self) -> &'static str;

    /// The set of capabilities this component implements
    fn capabilities(&self) -> Capabilities;

    /// Whether the component declares `cap`
    fn implements(&self, cap: Capability) -> bool {
        self.capabilities().contains(cap.flag())
    }

    /// Identifier capability
    fn as_identifier(&self) -> Option<&dyn Identifier> {
        None
    }

    /// Bounding rectangle capability
    fn as_bounding_rect(&self) -> Option<&dyn BoundingRecter> {
        None
    }

    /// Bounding box capability
    fn as_bounding_box(&self) -> Option<&dyn BoundingBoxer> {
        None
    }

    /// Collision capability
    fn as_collider(&self) -> Option<&dyn Collider> {
        None
    }

    /// Disable capability (read)
    fn as_disabler(&self) -> Option<&dyn Disabler> {
        None
    }

    /// Disable capability (write)
    fn as_disabler_mut(&mut self) -> Option<&mut dyn Disabler> {
        None
    }

    /// Draw capability
    fn as_drawer(&self) -> Option<&dyn Drawer> {
        None
    }

    /// Hide capability (read)
    fn as_hider(&self) -> Option<&dyn Hider> {
        None
    }

    /// Hide capability (write)
    fn as_hider_mut(&mut self) -> Option<&mut dyn Hider> {
        None
    }

    /// Load capability
    fn as_loader(&mut self) -> Option<&mut dyn Loader> {
        None
    }

    /// Prepare capability
    fn as_prepper(&mut self) -> Option<&mut dyn Prepper> {
        None
    }

    /// Scan capability
    fn as_scanner(&self) -> Option<&dyn Scanner> {
        None
    }

    /// Transform capability
    fn as_transformer(&self) -> Option<&dyn Transformer> {
        None
    }

    /// Parallax capability
    fn as_parallax(&self) -> Option<&dyn ParallaxScaler> {
        None
    }

    /// Draw-order capability
    fn as_z_positioner(&self) -> Option<&dyn ZPositioner> {
        None
    }

    /// Update capability
    fn as_updater(&mut self) -> Option<&mut dyn Updater> {
        None
    }
}

/// Identifier, else kind name; used to attribute errors
pub fn label(component: &dyn Component) -> String {
    match component.as_identifier().map(Identifier::ident) {
        Some(ident) if !ident.is_empty() => format!("{} {ident:?}", component.name()),
        _ => component.name().to_string(),
    }
}

/// Has a (possibly empty) identifier; empty means anonymous
pub trait Identifier {
    /// The identifier
    fn ident(&self) -> &str;
}

/// Reports a bounding rectangle
pub trait BoundingRecter {
    /// The bounding rectangle in the component's own space
    fn bounding_rect(&self) -> Rect;
}

/// Reports a bounding box
pub trait BoundingBoxer {
    /// The bounding box in the component's own space
    fn bounding_box(&self) -> Box3;
}

/// Answers collision tests against world-space rectangles
pub trait Collider {
    /// Whether `rect` hits anything solid
    fn collides_with(&self, rect: &Rect) -> bool;
}

/// Can be switched off for updates
pub trait Disabler {
    /// Whether updates are currently skipped
    fn disabled(&self) -> bool;
    /// Skip updates
    fn disable(&mut self);
    /// Resume updates
    fn enable(&mut self);
}

/// Issues draw calls
///
/// Drawers receive the game so containers can reach their children.
pub trait Drawer {
    /// Draw with the given options
    fn draw(&self, game: &Game, surface: &mut dyn Surface, opts: &DrawOptions);
}

/// Can be switched off for drawing
pub trait Hider {
    /// Whether drawing is currently skipped
    fn hidden(&self) -> bool;
    /// Skip drawing
    fn hide(&mut self);
    /// Resume drawing
    fn show(&mut self);
}

/// Resolves assets once before the first frame
pub trait Loader {
    /// Load assets
    fn load(&mut self) -> Result<(), EngineError>;
}

/// Initialises itself after every component has loaded
pub trait Prepper {
    /// Prepare for the first frame
    fn prepare(&mut self, game: &Game) -> Result<(), EngineError>;
}

/// Reports immediate children
pub trait Scanner {
    /// Handles of direct children
    fn scan(&self) -> Vec<ComponentId>;
}

/// Supplies a local transform, applied before any container transform
pub trait Transformer {
    /// The local transform
    fn transform(&self) -> Transform;
}

/// Scales how far the camera centre moves this component
pub trait ParallaxScaler {
    /// 1.0 moves with the world, 0.0 stays fixed to the screen
    fn parallax_factor(&self) -> f64;
}

/// Supplies a draw-order key
pub trait ZPositioner {
    /// Key used to sort siblings; lower draws first
    fn draw_order(&self) -> DrawOrder;
}

/// Runs once per frame
pub trait Updater {
    /// Advance one frame
    fn update(&mut self, game: &mut Game) -> Result<(), EngineError>;
}

/// Reusable identifier field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub String);

impl Id {
    /// Create an identifier
    pub fn new(ident: impl Into<String>) -> Self {
        Self(ident.into())
    }
}

impl Identifier for Id {
    fn ident(&self) -> &str {
        &self.0
    }
}

/// Reusable hidden flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hidden(pub bool);

impl Hider for Hidden {
    fn hidden(&self) -> bool {
        self.0
    }

    fn hide(&mut self) {
        self.0 = true;
    }

    fn show(&mut self) {
        self.0 = false;
    }
}

/// Reusable disabled flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disabled(pub bool);

impl Disabler for Disabled {
    fn disabled(&self) -> bool {
        self.0
    }

    fn disable(&mut self) {
        self.0 = true;
    }

    fn enable(&mut self) {
        self.0 = false;
    }
}

/// Reusable z-order field
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZOrder(pub f64);

impl ZPositioner for ZOrder {
    fn draw_order(&self) -> DrawOrder {
        DrawOrder::new(self.0)
    }
}

/// Reusable parallax factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parallax(pub f64);

impl Default for Parallax {
    fn default() -> Self {
        Self(1.0)
    }
}

impl ParallaxScaler for Parallax {
    fn parallax_factor(&self) -> f64 {
        self.0
    }
}
