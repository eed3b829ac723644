//! The game: component arena, capability index and frame passes

use crate::component::{self, audit, label, scan::matches, Capability, Component};
use crate::core::config::GameConfig;
use crate::error::EngineError;
use crate::foundation::collections::{ComponentId, HandleMap};
use crate::foundation::geometry::Rect;
use crate::foundation::transform::Transform;
use crate::physics::CollisionQuery;
use crate::render::{DrawOptions, Surface};
use crate::scene::Scene;

/// Which pass an error came from
#[derive(Debug, Clone, Copy)]
enum Pass {
    Load,
    Prepare,
    Update,
}

impl Pass {
    /// Attach the failing component, unless an inner component already did
    fn attribute(self, err: EngineError, component: &dyn Component) -> EngineError {
        if err.is_attributed() {
            return err;
        }
        let component = label(component);
        let source = Box::new(err);
        match self {
            Self::Load => EngineError::LoadFailed { component, source },
            Self::Prepare => EngineError::PrepareFailed { component, source },
            Self::Update => EngineError::UpdateFailed { component, source },
        }
    }
}

/// # Game
///
/// Owns every component in a generational arena and keeps a flattened,
/// breadth-first index of the tree under the root. Containers refer to
/// their children by [`ComponentId`].
///
/// A component is *checked out* of its slot while its Prepare or Update
/// runs, so it can borrow the rest of the game mutably. Checked-out
/// components are invisible to lookups and collision queries.
///
/// ## Frame driver
///
/// ```rust
/// use tile_engine::prelude::*;
///
/// let mut game = Game::new(GameConfig::default());
/// let root = game.insert(Scene::new("root"));
/// game.set_root(root);
/// game.load().unwrap();
/// game.prepare().unwrap();
/// for _ in 0..3 {
///     game.update().unwrap();
///     game.draw(&mut RecordingSurface::new());
/// }
/// ```
pub struct Game {
    config: GameConfig,
    arena: HandleMap<Option<Box<dyn Component>>>,
    root: Option<ComponentId>,
    index: Vec<ComponentId>,
    dirty: bool,
}

impl Game {
    /// Create an empty game
    pub fn new(config: GameConfig) -> Self {
        log::info!(
            "Creating game {:?} ({}x{})",
            config.title,
            config.screen_width,
            config.screen_height
        );
        Self {
            config,
            arena: HandleMap::with_key(),
            root: None,
            index: Vec::new(),
            dirty: false,
        }
    }

    /// The game configuration
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Add a component to the arena
    pub fn insert(&mut self, component: impl Component) -> ComponentId {
        self.insert_boxed(Box::new(component))
    }

    /// Add an already boxed component to the arena
    ///
    /// The component's declared capabilities are checked against its
    /// accessors; disagreements are logged.
    pub fn insert_boxed(&mut self, mut component: Box<dyn Component>) -> ComponentId {
        let report = audit(component.as_mut());
        if !report.is_clean() {
            log::warn!(
                "{} declares {:?} without accessors and exposes undeclared {:?}",
                label(component.as_ref()),
                report.missing,
                report.undeclared
            );
        }
        self.dirty = true;
        self.arena.insert(Some(component))
    }

    /// Remove a component from the arena
    ///
    /// Containers still listing the handle will skip it.
    pub fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        self.dirty = true;
        self.arena.remove(id).flatten()
    }

    /// Set the component every pass starts from
    pub fn set_root(&mut self, root: ComponentId) {
        self.root = Some(root);
        self.dirty = true;
    }

    /// The root component, if set
    pub const fn root(&self) -> Option<ComponentId> {
        self.root
    }

    /// Look up a component
    pub fn get(&self, id: ComponentId) -> Option<&dyn Component> {
        match self.arena.get(id) {
            Some(Some(component)) => Some(component.as_ref()),
            _ => None,
        }
    }

    /// Look up a component mutably
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component> {
        match self.arena.get_mut(id) {
            Some(Some(component)) => Some(component.as_mut()),
            _ => None,
        }
    }

    /// Look up a component of a known concrete type
    pub fn downcast_ref<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref()
    }

    /// Look up a component of a known concrete type mutably
    pub fn downcast_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut()
    }

    /// Add `child` to the scene `parent` and schedule a re-index
    pub fn attach(&mut self, parent: ComponentId, child: ComponentId) -> Result<(), EngineError> {
        let scene = self
            .downcast_mut::<Scene>(parent)
            .ok_or(EngineError::MissingComponent(parent))?;
        scene.add(child);
        self.invalidate();
        Ok(())
    }

    /// Schedule a re-index at the start of the next update
    ///
    /// Call after changing a container's children directly.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Breadth-first walk from `root`; see [`component::scan`]
    pub fn scan(&self, root: ComponentId) -> Vec<ComponentId> {
        component::scan(self, root)
    }

    /// Rebuild the flattened index from the root
    ///
    /// While a pass has components checked out the walk would miss them, so
    /// the rebuild is deferred to the start of the next update instead.
    pub fn reindex(&mut self) {
        if self.arena.values().any(Option::is_none) {
            log::debug!("Re-index requested mid-pass, deferring");
            self.dirty = true;
            return;
        }
        self.index = match self.root {
            Some(root) => component::scan(self, root),
            None => Vec::new(),
        };
        self.dirty = false;
        log::debug!("Indexed {} components", self.index.len());
    }

    /// The flattened index, in traversal order
    pub fn components(&self) -> &[ComponentId] {
        &self.index
    }

    /// First indexed component implementing `cap` (and named `ident`, if given)
    pub fn find_first(&self, cap: Capability, ident: Option<&str>) -> Option<ComponentId> {
        self.index
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(|c| matches(c, cap, ident)))
    }

    /// Every indexed component implementing `cap`
    pub fn find_all(&self, cap: Capability) -> Vec<ComponentId> {
        self.index
            .iter()
            .copied()
            .filter(|&id| self.get(id).is_some_and(|c| c.implements(cap)))
            .collect()
    }

    /// Run the Load pass over every indexed component
    ///
    /// The first failure aborts the pass.
    pub fn load(&mut self) -> Result<(), EngineError> {
        self.root.ok_or(EngineError::NoRoot)?;
        self.reindex();
        log::info!("Loading {} components", self.index.len());

        let mut loaded = 0;
        for id in self.index.clone() {
            let Some(component) = self.get_mut(id) else {
                continue;
            };
            let result = match component.as_loader() {
                Some(loader) => loader.load(),
                None => continue,
            };
            result.map_err(|e| Pass::Load.attribute(e, &*component))?;
            loaded += 1;
        }
        log::info!("Loaded {loaded} components");
        Ok(())
    }

    /// Run the Prepare pass over every indexed component
    pub fn prepare(&mut self) -> Result<(), EngineError> {
        self.root.ok_or(EngineError::NoRoot)?;
        if self.dirty {
            self.reindex();
        }
        log::info!("Preparing {} components", self.index.len());

        for id in self.index.clone() {
            self.with_checked_out(id, |component, game| {
                let result = match component.as_prepper() {
                    Some(prepper) => prepper.prepare(game),
                    None => return Ok(()),
                };
                result.map_err(|e| Pass::Prepare.attribute(e, &*component))
            })?;
        }
        Ok(())
    }

    /// Run one frame of updates, starting from the root
    pub fn update(&mut self) -> Result<(), EngineError> {
        let root = self.root.ok_or(EngineError::NoRoot)?;
        if self.dirty {
            self.reindex();
        }
        self.update_component(root)
    }

    /// Update a single component, checking it out while it runs
    ///
    /// Containers call this for each child. Components without Update are
    /// left alone.
    pub fn update_component(&mut self, id: ComponentId) -> Result<(), EngineError> {
        self.with_checked_out(id, |component, game| {
            let result = match component.as_updater() {
                Some(updater) => updater.update(game),
                None => return Ok(()),
            };
            result.map_err(|e| Pass::Update.attribute(e, &*component))
        })
    }

    /// Draw the root with its own transform and the configured filter
    pub fn draw(&self, surface: &mut dyn Surface) {
        let Some(root) = self.root.and_then(|id| self.get(id)) else {
            log::warn!("Nothing to draw: no root component");
            return;
        };
        if let Some(drawer) = root.as_drawer() {
            let transform = root
                .as_transformer()
                .map_or_else(Transform::identity, |t| t.transform());
            let opts = DrawOptions {
                transform,
                filter: self.config.filter,
            };
            drawer.draw(self, surface, &opts);
        }
    }

    fn with_checked_out(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Component, &mut Self) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        let mut checked_out = self
            .arena
            .get_mut(id)
            .and_then(Option::take)
            .ok_or(EngineError::MissingComponent(id))?;
        let result = f(checked_out.as_mut(), self);
        match self.arena.get_mut(id) {
            Some(slot) => *slot = Some(checked_out),
            None => log::warn!("{} was removed while checked out", label(checked_out.as_ref())),
        }
        result
    }
}

impl CollisionQuery for Game {
    fn collides_at(&self, rect: &Rect) -> bool {
        self.index
            .iter()
            .filter_map(|&id| self.get(id))
            .filter_map(|c| c.as_collider())
            .any(|collider| collider.collides_with(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Capabilities, Collider, Id, Identifier, Loader, Updater};

    struct Counter {
        id: Id,
        ticks: u32,
        fail_on: Option<u32>,
    }

    impl Counter {
        fn new(ident: &str) -> Self {
            Self {
                id: Id::new(ident),
                ticks: 0,
                fail_on: None,
            }
        }
    }

    impl Updater for Counter {
        fn update(&mut self, game: &mut Game) -> Result<(), EngineError> {
            // Checked out: a counter cannot see itself.
            assert!(game.find_first(Capability::Update, Some(self.id.0.as_str())).is_none());
            self.ticks += 1;
            if self.fail_on == Some(self.ticks) {
                return Err(EngineError::Custom("boom".into()));
            }
            Ok(())
        }
    }

    impl Component for Counter {
        fn name(&self) -> &'static str {
            "Counter"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::IDENTIFY | Capabilities::UPDATE
        }

        fn as_identifier(&self) -> Option<&dyn Identifier> {
            Some(&self.id)
        }

        fn as_updater(&mut self) -> Option<&mut dyn Updater> {
            Some(self)
        }
    }

    struct Wall(Rect);

    impl Collider for Wall {
        fn collides_with(&self, rect: &Rect) -> bool {
            self.0.overlaps(rect)
        }
    }

    impl Loader for Wall {
        fn load(&mut self) -> Result<(), EngineError> {
            if self.0.is_empty() {
                return Err(EngineError::Custom("degenerate wall".into()));
            }
            Ok(())
        }
    }

    impl Component for Wall {
        fn name(&self) -> &'static str {
            "Wall"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::COLLIDE | Capabilities::LOAD
        }

        fn as_collider(&self) -> Option<&dyn Collider> {
            Some(self)
        }

        fn as_loader(&mut self) -> Option<&mut dyn Loader> {
            Some(self)
        }
    }

    /// Checks for a wall on both sides of a mid-frame re-index
    struct Surveyor {
        seen: Vec<bool>,
    }

    impl Updater for Surveyor {
        fn update(&mut self, game: &mut Game) -> Result<(), EngineError> {
            let spot = rect(5, 5, 6, 6);
            self.seen.push(game.collides_at(&spot));
            game.reindex();
            self.seen.push(game.collides_at(&spot));
            Ok(())
        }
    }

    impl Component for Surveyor {
        fn name(&self) -> &'static str {
            "Surveyor"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::UPDATE
        }

        fn as_updater(&mut self) -> Option<&mut dyn Updater> {
            Some(self)
        }
    }

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        use crate::foundation::geometry::Point2;
        Rect::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn test_passes_need_a_root() {
        let mut game = Game::new(GameConfig::default());
        assert!(matches!(game.load(), Err(EngineError::NoRoot)));
        assert!(matches!(game.update(), Err(EngineError::NoRoot)));
    }

    #[test]
    fn test_update_wraps_error_with_component_label() {
        let mut game = Game::new(GameConfig::default());
        let mut counter = Counter::new("clock");
        counter.fail_on = Some(2);
        let id = game.insert(counter);
        game.set_root(id);

        game.update().unwrap();
        let err = game.update().unwrap_err();
        match err {
            EngineError::UpdateFailed { component, source } => {
                assert_eq!(component, "Counter \"clock\"");
                assert!(matches!(*source, EngineError::Custom(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
        // Checked back in despite the failure.
        assert_eq!(game.downcast_ref::<Counter>(id).unwrap().ticks, 2);
    }

    #[test]
    fn test_load_failure_is_attributed() {
        let mut game = Game::new(GameConfig::default());
        let wall = game.insert(Wall(rect(0, 0, 0, 0)));
        let root = game.insert(Scene::new("root").with_child(wall));
        game.set_root(root);

        let err = game.load().unwrap_err();
        assert!(matches!(err, EngineError::LoadFailed { ref component, .. } if component == "Wall"));
    }

    #[test]
    fn test_collision_query_sees_indexed_colliders_only() {
        let mut game = Game::new(GameConfig::default());
        let wall = game.insert(Wall(rect(0, 0, 10, 10)));
        let stray = game.insert(Wall(rect(100, 100, 110, 110)));
        let root = game.insert(Scene::new("root").with_child(wall));
        game.set_root(root);
        game.reindex();

        assert!(game.collides_at(&rect(5, 5, 6, 6)));
        assert!(!game.collides_at(&rect(10, 0, 20, 10)));
        // Inserted but not attached under the root.
        assert!(!game.collides_at(&rect(100, 100, 101, 101)));

        game.attach(root, stray).unwrap();
        game.update().unwrap();
        assert!(game.collides_at(&rect(100, 100, 101, 101)));
    }

    #[test]
    fn test_reindex_during_update_keeps_index() {
        let mut game = Game::new(GameConfig::default());
        let wall = game.insert(Wall(rect(0, 0, 10, 10)));
        let surveyor = game.insert(Surveyor { seen: Vec::new() });
        let root = game.insert(Scene::new("root").with_child(wall).with_child(surveyor));
        game.set_root(root);

        game.update().unwrap();
        assert_eq!(game.downcast_ref::<Surveyor>(surveyor).unwrap().seen, vec![true, true]);
        // Deferred rebuild runs at the next update.
        assert!(game.dirty);
        game.update().unwrap();
        assert_eq!(game.components(), &[root, wall, surveyor]);
        assert!(game.collides_at(&rect(5, 5, 6, 6)));
    }

    #[test]
    fn test_removed_component_is_skipped() {
        let mut game = Game::new(GameConfig::default());
        let a = game.insert(Counter::new("a"));
        let b = game.insert(Counter::new("b"));
        let root = game.insert(Scene::new("root").with_child(a).with_child(b));
        game.set_root(root);
        game.update().unwrap();
        assert_eq!(game.components().len(), 3);

        assert!(game.remove(a).is_some());
        game.update().unwrap();
        assert_eq!(game.components(), &[root, b]);
        assert_eq!(game.find_first(Capability::Identify, Some("b")), Some(b));
        assert_eq!(game.downcast_ref::<Counter>(b).unwrap().ticks, 2);
    }
}
