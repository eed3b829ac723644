//! Isometric prism maps

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::assets::Sheet;
use crate::component::{
    BoundingBoxer, Capabilities, Component, Drawer, Hidden, Hider, Id, Identifier, Transformer,
    ZOrder, ZPositioner,
};
use crate::foundation::geometry::{Box3, Point2, Point3};
use crate::foundation::transform::Transform;
use crate::game::Game;
use crate::render::{DrawOptions, Surface};

/// A single prism: which sheet cell draws it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prism {
    /// Sheet cell
    pub cell: usize,
}

/// # Prism Map
///
/// A sparse 3D grid of equally sized prisms drawn as sprites. Layers
/// further along Z draw later; within a layer, `draw_order_bias` picks
/// which diagonal draws first so nearer prisms cover further ones.
pub struct PrismMap {
    /// Identifier
    pub id: Id,
    map: BTreeMap<Point3, Prism>,
    /// Weights `(x, y)` for ordering prisms within a layer
    pub draw_order_bias: Point2,
    /// Screen offset applied to the whole map
    pub draw_offset: Point2,
    /// Screen offset added per unit of Z
    pub draw_z_stride: Point2,
    /// World size of one prism
    pub prism_size: Point3,
    /// Hidden flag
    pub hidden: Hidden,
    /// Draw order among siblings
    pub z: ZOrder,
    sheet: Rc<dyn Sheet>,
}

impl PrismMap {
    /// Create an empty map over the given sheet
    pub fn new(ident: impl Into<String>, sheet: Rc<dyn Sheet>, prism_size: Point3) -> Self {
        Self {
            id: Id::new(ident),
            map: BTreeMap::new(),
            draw_order_bias: Point2::new(1, 1),
            draw_offset: Point2::ZERO,
            draw_z_stride: Point2::ZERO,
            prism_size,
            hidden: Hidden::default(),
            z: ZOrder::default(),
            sheet,
        }
    }

    /// Place a prism
    #[must_use]
    pub fn with_prism(mut self, at: Point3, prism: Prism) -> Self {
        self.map.insert(at, prism);
        self
    }

    /// Set the per-Z screen stride
    #[must_use]
    pub const fn with_z_stride(mut self, stride: Point2) -> Self {
        self.draw_z_stride = stride;
        self
    }

    /// Set the in-layer ordering bias
    #[must_use]
    pub const fn with_bias(mut self, bias: Point2) -> Self {
        self.draw_order_bias = bias;
        self
    }

    /// Prism at a grid position
    pub fn prism(&self, at: Point3) -> Option<&Prism> {
        self.map.get(&at)
    }

    /// Replace (or with `None`, clear) a grid position
    pub fn set_prism(&mut self, at: Point3, prism: Option<Prism>) -> Option<Prism> {
        match prism {
            Some(prism) => self.map.insert(at, prism),
            None => self.map.remove(&at),
        }
    }

    /// Grid positions in the order they are drawn
    pub fn draw_sequence(&self) -> Vec<Point3> {
        let mut order: Vec<Point3> = self.map.keys().copied().collect();
        order.sort_by_key(|&p| (p.z * self.prism_size.z, p.xy().dot(self.draw_order_bias), p));
        order
    }

    /// Screen position of a prism relative to the map
    pub fn screen_position(&self, at: Point3) -> Point2 {
        at.xy().cmul(self.prism_size.xy()) + self.draw_z_stride * at.z
    }
}

impl std::fmt::Debug for PrismMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrismMap")
            .field("id", &self.id)
            .field("prisms", &self.map.len())
            .field("prism_size", &self.prism_size)
            .finish_non_exhaustive()
    }
}

impl Drawer for PrismMap {
    fn draw(&self, _game: &Game, surface: &mut dyn Surface, opts: &DrawOptions) {
        if self.hidden.hidden() {
            return;
        }
        for at in self.draw_sequence() {
            let Some(prism) = self.map.get(&at) else {
                continue;
            };
            let (x, y) = self.screen_position(at).to_f64();
            surface.draw_image(
                &self.sheet.sub_image(prism.cell),
                &opts.prepend(&Transform::translation(x, y)),
            );
        }
    }
}

impl Transformer for PrismMap {
    fn transform(&self) -> Transform {
        let (x, y) = self.draw_offset.to_f64();
        Transform::translation(x, y)
    }
}

impl BoundingBoxer for PrismMap {
    fn bounding_box(&self) -> Box3 {
        self.map.keys().fold(Box3::default(), |acc, &at| {
            let min = at.cmul(self.prism_size);
            acc.union(Box3::new(min, min + self.prism_size))
        })
    }
}

impl Component for PrismMap {
    fn name(&self) -> &'static str {
        "PrismMap"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::IDENTIFY
            | Capabilities::BOUNDING_BOX
            | Capabilities::DRAW
            | Capabilities::HIDE
            | Capabilities::TRANSFORM
            | Capabilities::Z_POSITION
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(&self.id)
    }

    fn as_bounding_box(&self) -> Option<&dyn BoundingBoxer> {
        Some(self)
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

    fn as_transformer(&self) -> Option<&dyn Transformer> {
        Some(self)
    }

    fn as_z_positioner(&self) -> Option<&dyn ZPositioner> {
        Some(&self.z)
    }
}
