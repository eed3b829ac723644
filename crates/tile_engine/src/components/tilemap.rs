//! Sparse tile maps

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::assets::{AnimCursor, Sheet};
use crate::component::{
    BoundingRecter, Capabilities, Collider, Component, Disabled, Disabler, Drawer, Hidden, Hider,
    Id, Identifier, Loader, Parallax, ParallaxScaler, Transformer, Updater, ZOrder, ZPositioner,
};
use crate::error::EngineError;
use crate::foundation::geometry::{Point2, Rect};
use crate::foundation::transform::Transform;
use crate::game::Game;
use crate::render::{DrawOptions, Surface};

/// What occupies a tile map cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// A fixed sheet cell
    Static(usize),
    /// The current frame of a named sheet animation
    Animated {
        /// Animation key in the sheet
        anim_key: String,
    },
}

impl Tile {
    /// Shorthand for an animated tile
    pub fn animated(key: impl Into<String>) -> Self {
        Self::Animated {
            anim_key: key.into(),
        }
    }
}

/// # Tile Map
///
/// A sparse grid of [`Tile`]s drawn from a sheet. Cells are
/// `sheet.cell_size()` pixels; cell `(0, 0)` starts at `offset` in world
/// space. An empty cell has no entry.
///
/// Tile maps collide on any occupied cell. An *ersatz* map draws normally but
/// never collides, which suits decoration layers.
pub struct Tilemap {
    /// Identifier
    pub id: Id,
    map: BTreeMap<Point2, Tile>,
    /// World position of cell (0, 0)
    pub offset: Point2,
    /// Drawn but never collides
    pub ersatz: bool,
    /// Hidden flag
    pub hidden: Hidden,
    /// Disabled flag (stops animation)
    pub disabled: Disabled,
    /// Draw order among siblings
    pub z: ZOrder,
    /// Parallax factor; absent means the map moves with the world
    pub parallax: Option<Parallax>,
    sheet: Rc<dyn Sheet>,
    anims: HashMap<String, Box<dyn AnimCursor>>,
}

impl Tilemap {
    /// Create an empty map over the given sheet
    pub fn new(ident: impl Into<String>, sheet: Rc<dyn Sheet>) -> Self {
        Self {
            id: Id::new(ident),
            map: BTreeMap::new(),
            offset: Point2::ZERO,
            ersatz: false,
            hidden: Hidden::default(),
            disabled: Disabled::default(),
            z: ZOrder::default(),
            parallax: None,
            sheet,
            anims: HashMap::new(),
        }
    }

    /// Place a tile in a cell
    #[must_use]
    pub fn with_tile(mut self, cell: Point2, tile: Tile) -> Self {
        self.map.insert(cell, tile);
        self
    }

    /// Set the world offset
    #[must_use]
    pub const fn with_offset(mut self, offset: Point2) -> Self {
        self.offset = offset;
        self
    }

    /// Mark the map as decoration only
    #[must_use]
    pub const fn ersatz(mut self, ersatz: bool) -> Self {
        self.ersatz = ersatz;
        self
    }

    /// Set the draw order
    #[must_use]
    pub const fn with_z(mut self, z: f64) -> Self {
        self.z = ZOrder(z);
        self
    }

    /// Set the parallax factor
    #[must_use]
    pub const fn with_parallax(mut self, factor: f64) -> Self {
        self.parallax = Some(Parallax(factor));
        self
    }

    /// Tile in a cell
    pub fn tile(&self, cell: Point2) -> Option<&Tile> {
        self.map.get(&cell)
    }

    /// Replace (or with `None`, clear) a cell
    ///
    /// Animated tiles whose key was not present at load time are not drawn.
    pub fn set_tile(&mut self, cell: Point2, tile: Option<Tile>) -> Option<Tile> {
        match tile {
            Some(tile) => self.map.insert(cell, tile),
            None => self.map.remove(&cell),
        }
    }

    /// Occupied cells and their tiles
    pub fn tiles(&self) -> impl Iterator<Item = (Point2, &Tile)> {
        self.map.iter().map(|(&cell, tile)| (cell, tile))
    }

    /// The cell containing a world point
    ///
    /// `None` when the sheet's cell size has a zero or negative side.
    pub fn cell_at(&self, world: Point2) -> Option<Point2> {
        self.cell_size_usable()
            .then(|| (world - self.offset).div_floor(self.sheet.cell_size()))
    }

    /// Tile at a world point
    pub fn tile_at(&self, world: Point2) -> Option<&Tile> {
        self.tile(self.cell_at(world)?)
    }

    /// Replace the tile at a world point; see [`Tilemap::set_tile`]
    ///
    /// Without a usable cell size nothing changes.
    pub fn set_tile_at(&mut self, world: Point2, tile: Option<Tile>) -> Option<Tile> {
        let Some(cell) = self.cell_at(world) else {
            log::warn!("Tilemap {:?}: unusable cell size, ignoring set at {world}", self.id.0);
            return None;
        };
        self.set_tile(cell, tile)
    }

    /// World-space bounds of the cell containing a world point
    pub fn tile_bounds(&self, world: Point2) -> Option<Rect> {
        let size = self.sheet.cell_size();
        let cell = self.cell_at(world)?;
        Some(Rect::from_origin_size(cell.cmul(size) + self.offset, size))
    }

    fn cell_size_usable(&self) -> bool {
        let size = self.sheet.cell_size();
        size.x > 0 && size.y > 0
    }
}

impl std::fmt::Debug for Tilemap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tilemap")
            .field("id", &self.id)
            .field("tiles", &self.map.len())
            .field("offset", &self.offset)
            .field("ersatz", &self.ersatz)
            .field("loaded_anims", &self.anims.len())
            .finish_non_exhaustive()
    }
}

impl Collider for Tilemap {
    fn collides_with(&self, rect: &Rect) -> bool {
        if self.ersatz || rect.is_empty() || !self.cell_size_usable() {
            return false;
        }
        let size = self.sheet.cell_size();
        let local = *rect - self.offset;
        let min = local.min.div_floor(size);
        let max = (local.max - Point2::new(1, 1)).div_floor(size);
        (min.y..=max.y).any(|y| (min.x..=max.x).any(|x| self.map.contains_key(&Point2::new(x, y))))
    }
}

impl Drawer for Tilemap {
    fn draw(&self, _game: &Game, surface: &mut dyn Surface, opts: &DrawOptions) {
        if self.hidden.hidden() {
            return;
        }
        let size = self.sheet.cell_size();
        for (&cell, tile) in &self.map {
            let sheet_cell = match tile {
                Tile::Static(n) => *n,
                Tile::Animated { anim_key } => match self.anims.get(anim_key) {
                    Some(anim) => anim.cell(),
                    None => continue,
                },
            };
            let (x, y) = cell.cmul(size).to_f64();
            let tile_opts = opts.prepend(&Transform::translation(x, y));
            surface.draw_image(&self.sheet.sub_image(sheet_cell), &tile_opts);
        }
    }
}

impl Loader for Tilemap {
    fn load(&mut self) -> Result<(), EngineError> {
        self.anims.clear();
        for tile in self.map.values() {
            let Tile::Animated { anim_key } = tile else {
                continue;
            };
            if self.anims.contains_key(anim_key) {
                continue;
            }
            let anim = self
                .sheet
                .new_anim(anim_key)
                .ok_or_else(|| EngineError::MissingAnimation(anim_key.clone()))?;
            self.anims.insert(anim_key.clone(), anim);
        }
        log::debug!("Tilemap {:?} loaded {} animations", self.id.0, self.anims.len());
        Ok(())
    }
}

impl Updater for Tilemap {
    fn update(&mut self, _game: &mut Game) -> Result<(), EngineError> {
        if self.disabled.disabled() {
            return Ok(());
        }
        for anim in self.anims.values_mut() {
            anim.advance();
        }
        Ok(())
    }
}

impl Transformer for Tilemap {
    fn transform(&self) -> Transform {
        let (x, y) = self.offset.to_f64();
        Transform::translation(x, y)
    }
}

impl BoundingRecter for Tilemap {
    fn bounding_rect(&self) -> Rect {
        let mut cells = self.map.keys();
        let Some(&first) = cells.next() else {
            return Rect::default();
        };
        let (min, max) = cells.fold((first, first), |(min, max), &c| {
            (
                Point2::new(min.x.min(c.x), min.y.min(c.y)),
                Point2::new(max.x.max(c.x), max.y.max(c.y)),
            )
        });
        let size = self.sheet.cell_size();
        Rect::new(min.cmul(size), (max + Point2::new(1, 1)).cmul(size)) + self.offset
    }
}

impl Component for Tilemap {
    fn name(&self) -> &'static str {
        "Tilemap"
    }

    fn capabilities(&self) -> Capabilities {
        let caps = Capabilities::IDENTIFY
            | Capabilities::BOUNDING_RECT
            | Capabilities::COLLIDE
            | Capabilities::DISABLE
            | Capabilities::DRAW
            | Capabilities::HIDE
            | Capabilities::LOAD
            | Capabilities::TRANSFORM
            | Capabilities::Z_POSITION
            | Capabilities::UPDATE;
        if self.parallax.is_some() {
            caps | Capabilities::PARALLAX
        } else {
            caps
        }
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(&self.id)
    }

    fn as_bounding_rect(&self) -> Option<&dyn BoundingRecter> {
        Some(self)
    }

    fn as_collider(&self) -> Option<&dyn Collider> {
        Some(self)
    }

    fn as_disabler(&self) -> Option<&dyn Disabler> {
        Some(&self.disabled)
    }

    fn as_disabler_mut(&mut self) -> Option<&mut dyn Disabler> {
        Some(&mut self.disabled)
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

    fn as_loader(&mut self) -> Option<&mut dyn Loader> {
        Some(self)
    }

    fn as_transformer(&self) -> Option<&dyn Transformer> {
        Some(self)
    }

    fn as_parallax(&self) -> Option<&dyn ParallaxScaler> {
        self.parallax.as_ref().map(|p| p as &dyn ParallaxScaler)
    }

    fn as_z_positioner(&self) -> Option<&dyn ZPositioner> {
        Some(&self.z)
    }

    fn as_updater(&mut self) -> Option<&mut dyn Updater> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{FrameDef, GridSheet};
    use crate::core::config::GameConfig;
    use crate::render::{DrawCall, RecordingSurface};

    fn sheet() -> Rc<dyn Sheet> {
        Rc::new(
            GridSheet::new("tiles.png", 4, Point2::new(16, 16)).with_anim(
                "water",
                vec![
                    FrameDef { cell: 8, duration: 1 },
                    FrameDef { cell: 9, duration: 1 },
                ],
            ),
        )
    }

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    fn image_cells(surface: &RecordingSurface) -> Vec<Point2> {
        surface
            .calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Image { image, .. } => Some(image.bounds.min),
                DrawCall::Fill { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_collides_on_occupied_cells_only() {
        let map = Tilemap::new("walls", sheet())
            .with_offset(Point2::new(100, 0))
            .with_tile(Point2::new(1, 1), Tile::Static(0));

        // Cell (1, 1) covers world [116, 132) x [16, 32).
        assert!(map.collides_with(&rect(116, 16, 117, 17)));
        assert!(map.collides_with(&rect(110, 10, 120, 20)));
        // Touching the cell's max edge is not a collision (fencepost).
        assert!(!map.collides_with(&rect(100, 0, 116, 16)));
        assert!(!map.collides_with(&rect(132, 16, 140, 32)));
        assert!(!map.collides_with(&rect(120, 20, 120, 30)));
    }

    #[test]
    fn test_negative_coordinates_floor() {
        let map = Tilemap::new("walls", sheet()).with_tile(Point2::new(-1, -1), Tile::Static(0));
        assert!(map.collides_with(&rect(-1, -1, 0, 0)));
        assert!(!map.collides_with(&rect(0, 0, 1, 1)));
        assert_eq!(map.cell_at(Point2::new(-16, -17)), Some(Point2::new(-1, -2)));
    }

    #[test]
    fn test_ersatz_never_collides() {
        let mut map = Tilemap::new("grass", sheet()).ersatz(true);
        for x in 0..4 {
            map.set_tile(Point2::new(x, 0), Some(Tile::Static(1)));
        }
        assert!(!map.collides_with(&rect(0, 0, 64, 16)));
        assert!(!map.collides_with(&rect(-1000, -1000, 1000, 1000)));
    }

    #[test]
    fn test_world_helpers() {
        let mut map = Tilemap::new("walls", sheet()).with_offset(Point2::new(8, 8));
        assert!(map.set_tile_at(Point2::new(30, 30), Some(Tile::Static(3))).is_none());
        assert_eq!(map.tile(Point2::new(1, 1)), Some(&Tile::Static(3)));
        assert_eq!(map.tile_at(Point2::new(24, 24)), Some(&Tile::Static(3)));
        assert_eq!(map.tile_bounds(Point2::new(30, 30)), Some(rect(24, 24, 40, 40)));
        assert_eq!(map.bounding_rect(), rect(24, 24, 40, 40));
        assert_eq!(map.set_tile_at(Point2::new(24, 24), None), Some(Tile::Static(3)));
        assert!(map.bounding_rect().is_empty());
    }

    #[test]
    fn test_world_helpers_with_zero_cell_size() {
        let flat: Rc<dyn Sheet> = Rc::new(GridSheet::new("flat.png", 4, Point2::new(0, 16)));
        let mut map = Tilemap::new("flat", flat).with_tile(Point2::ZERO, Tile::Static(0));

        assert_eq!(map.cell_at(Point2::new(5, 5)), None);
        assert_eq!(map.tile_at(Point2::new(5, 5)), None);
        assert_eq!(map.tile_bounds(Point2::new(5, 5)), None);
        assert!(map.set_tile_at(Point2::new(5, 5), None).is_none());
        assert_eq!(map.tile(Point2::ZERO), Some(&Tile::Static(0)));
        assert!(!map.collides_with(&rect(0, 0, 16, 16)));
    }

    #[test]
    fn test_missing_animation_fails_load() {
        let mut map =
            Tilemap::new("lava", sheet()).with_tile(Point2::ZERO, Tile::animated("lava"));
        assert!(matches!(map.load(), Err(EngineError::MissingAnimation(ref k)) if k == "lava"));
    }

    #[test]
    fn test_animated_tiles_draw_after_load_and_advance() {
        let game = Game::new(GameConfig::default());
        let mut map = Tilemap::new("pond", sheet())
            .with_tile(Point2::new(0, 0), Tile::Static(1))
            .with_tile(Point2::new(1, 0), Tile::animated("water"))
            .with_tile(Point2::new(2, 0), Tile::animated("water"));

        let mut surface = RecordingSurface::new();
        map.draw(&game, &mut surface, &DrawOptions::default());
        assert_eq!(image_cells(&surface), vec![Point2::new(16, 0)]);

        map.load().unwrap();
        assert_eq!(map.anims.len(), 1);
        surface.clear();
        map.draw(&game, &mut surface, &DrawOptions::default());
        // Cell 8 sits at column 0, row 2 of a four-column sheet.
        assert_eq!(
            image_cells(&surface),
            vec![Point2::new(16, 0), Point2::new(0, 32), Point2::new(0, 32)]
        );
        assert_eq!(surface.calls()[2].origin(), (32.0, 0.0));

        let mut game = game;
        map.update(&mut game).unwrap();
        surface.clear();
        map.draw(&game, &mut surface, &DrawOptions::default());
        assert_eq!(image_cells(&surface)[1], Point2::new(16, 32));
    }

    #[test]
    fn test_parallax_capability_follows_field() {
        let map = Tilemap::new("far", sheet());
        assert!(map.as_parallax().is_none());
        let map = map.with_parallax(0.5);
        assert!(map.implements(crate::component::Capability::Parallax));
        assert!(map.as_parallax().is_some());
    }
}
