//! Solid colour fill

use serde::{Deserialize, Serialize};

use crate::component::{Capabilities, Component, Drawer, Hidden, Hider, Id, Identifier, ZOrder, ZPositioner};
use crate::game::Game;
use crate::render::{Color, DrawOptions, Surface};

/// Fills the whole surface with one colour; typically the backmost layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fill {
    /// Identifier
    pub id: Id,
    /// Fill colour
    pub color: Color,
    /// Hidden flag
    pub hidden: Hidden,
    /// Draw order among siblings
    pub z: ZOrder,
}

impl Fill {
    /// An anonymous fill
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Set the identifier
    #[must_use]
    pub fn with_id(mut self, ident: impl Into<String>) -> Self {
        self.id = Id::new(ident);
        self
    }

    /// Set the draw order
    #[must_use]
    pub const fn with_z(mut self, z: f64) -> Self {
        self.z = ZOrder(z);
        self
    }
}

impl Drawer for Fill {
    fn draw(&self, _game: &Game, surface: &mut dyn Surface, opts: &DrawOptions) {
        if !self.hidden.hidden() {
            surface.fill(self.color, opts);
        }
    }
}

impl Component for Fill {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::IDENTIFY | Capabilities::DRAW | Capabilities::HIDE | Capabilities::Z_POSITION
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(&self.id)
    }

    fn as_drawer(&self) -> Option<&dyn Drawer> {
        Some(self)
    }

    fn as_hider(&self) -> Option<&dyn Hider> {
        Some(&self.hidden)
    }

    fn as_hider_mut(&mut self) -> Option<&mut dyn Hider> {
        Some(&mut self.hidden)
    }

    fn as_z_positioner(&self) -> Option<&dyn ZPositioner> {
        Some(&self.z)
    }
}
