//! Scenes: ordered containers with an optional camera

use serde::{Deserialize, Serialize};

use crate::component::{
    BoundingRecter, Capabilities, Capability, Component, Disabled, Disabler, Drawer, Hidden,
    Hider, Id, Identifier, Prepper, Scanner, Updater, ZOrder, ZPositioner,
};
use crate::error::EngineError;
use crate::foundation::collections::ComponentId;
use crate::foundation::geometry::Rect;
use crate::foundation::transform::Transform;
use crate::game::Game;
use crate::render::{DrawOptions, Surface};
use crate::scene::{draw_order, Camera, DrawOrder};

/// # Scene
///
/// An ordered list of child components drawn back to front, with an
/// optional camera.
///
/// Children are kept sorted by draw order. The order is checked after every
/// update and re-sorted (stably) only when some child's key has fallen below
/// one drawn before it, so steady-state frames cost a single linear walk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Identifier
    pub id: Id,
    /// Children in draw order
    components: Vec<ComponentId>,
    /// Camera component, if any
    pub camera: Option<ComponentId>,
    /// World area the camera may show
    pub bounds: Rect,
    /// Hidden flag
    pub hidden: Hidden,
    /// Disabled flag
    pub disabled: Disabled,
    /// Order among sibling scenes
    pub z: ZOrder,
}

impl Scene {
    /// Create an empty scene
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            id: Id::new(ident),
            ..Self::default()
        }
    }

    /// Append a child
    #[must_use]
    pub fn with_child(mut self, child: ComponentId) -> Self {
        self.components.push(child);
        self
    }

    /// Use a camera
    #[must_use]
    pub const fn with_camera(mut self, camera: ComponentId) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Set the bounds the camera is clamped to
    #[must_use]
    pub const fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the scene's own z-order
    #[must_use]
    pub const fn with_z(mut self, z: f64) -> Self {
        self.z = ZOrder(z);
        self
    }

    /// Append a child; it moves into place after the next update
    ///
    /// When the scene is already in a game, use [`Game::attach`] so the
    /// game's index picks the child up.
    pub fn add(&mut self, child: ComponentId) {
        self.components.push(child);
    }

    /// Remove a child, returning whether it was present
    pub fn remove(&mut self, child: ComponentId) -> bool {
        let before = self.components.len();
        self.components.retain(|&id| id != child);
        self.components.len() != before
    }

    /// Children in current draw order
    pub fn children(&self) -> &[ComponentId] {
        &self.components
    }

    /// Re-sort children if any drawable is out of order
    ///
    /// Returns whether a sort happened.
    pub fn ensure_sorted(&mut self, game: &Game) -> bool {
        let drawable_keys = self
            .components
            .iter()
            .filter_map(|&id| game.get(id))
            .filter(|c| c.implements(Capability::Draw))
            .map(order_key);
        if draw_order::is_sorted(drawable_keys) {
            return false;
        }
        log::debug!("Scene {:?} re-sorting {} children", self.id.0, self.components.len());
        self.components
            .sort_by_key(|&id| game.get(id).and_then(order_key));
        true
    }
}

fn draw_child(game: &Game, child: &dyn Component, surface: &mut dyn Surface, opts: &DrawOptions) {
    if let Some(drawer) = child.as_drawer() {
        drawer.draw(game, surface, opts);
    }
}

fn order_key(component: &dyn Component) -> Option<DrawOrder> {
    component.as_z_positioner().map(ZPositioner::draw_order)
}

fn local_transform(component: &dyn Component) -> Transform {
    component
        .as_transformer()
        .map_or_else(Transform::identity, |t| t.transform())
}

impl Updater for Scene {
    fn update(&mut self, game: &mut Game) -> Result<(), EngineError> {
        if self.disabled.disabled() {
            return Ok(());
        }
        for &id in &self.components {
            if game.get(id).is_some_and(|c| c.implements(Capability::Update)) {
                game.update_component(id)?;
            }
        }
        self.ensure_sorted(game);
        Ok(())
    }
}

impl Prepper for Scene {
    fn prepare(&mut self, game: &Game) -> Result<(), EngineError> {
        self.ensure_sorted(game);
        Ok(())
    }
}

impl Drawer for Scene {
    fn draw(&self, game: &Game, surface: &mut dyn Surface, opts: &DrawOptions) {
        if self.hidden.hidden() {
            return;
        }

        let camera = self.camera.and_then(|id| game.downcast_ref::<Camera>(id));
        let frame = camera.and_then(|cam| cam.frame(self.bounds).map(|frame| (cam, frame)));
        if camera.is_some() && frame.is_none() {
            log::warn!("Scene {:?} camera is not prepared; drawing without it", self.id.0);
        }

        let Some((camera, frame)) = frame else {
            for &id in &self.components {
                let Some(component) = game.get(id) else {
                    continue;
                };
                draw_child(game, component, surface, &opts.prepend(&local_transform(component)));
            }
            return;
        };

        let shared = frame.screen_transform().then(&opts.transform);
        for &id in &self.components {
            let Some(component) = game.get(id) else {
                continue;
            };
            let factor = component
                .as_parallax()
                .map_or(1.0, |p| p.parallax_factor());
            let transform = local_transform(component)
                .then(&frame.parallax_offset(factor))
                .then(&shared);
            let child_opts = DrawOptions {
                transform,
                filter: camera.filter,
            };
            draw_child(game, component, surface, &child_opts);
        }
    }
}

impl Scanner for Scene {
    fn scan(&self) -> Vec<ComponentId> {
        self.components.iter().copied().chain(self.camera).collect()
    }
}

impl BoundingRecter for Scene {
    fn bounding_rect(&self) -> Rect {
        self.bounds
    }
}

impl Component for Scene {
    fn name(&self) -> &'static str {
        "Scene"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::IDENTIFY
            | Capabilities::BOUNDING_RECT
            | Capabilities::DISABLE
            | Capabilities::DRAW
            | Capabilities::HIDE
            | Capabilities::PREPARE
            | Capabilities::SCAN
            | Capabilities::Z_POSITION
            | Capabilities::UPDATE
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(&self.id)
    }

    fn as_bounding_rect(&self) -> Option<&dyn BoundingRecter> {
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

    fn as_prepper(&mut self) -> Option<&mut dyn Prepper> {
        Some(self)
    }

    fn as_scanner(&self) -> Option<&dyn Scanner> {
        Some(self)
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
    use crate::core::config::GameConfig;
    use crate::render::{Color, DrawCall, RecordingSurface};
    use crate::components::Fill;
    use crate::foundation::geometry::Point2;

    #[test]
    fn test_scan_lists_children_then_camera() {
        let mut game = Game::new(GameConfig::default());
        let a = game.insert(Fill::new(Color::WHITE));
        let cam = game.insert(Camera::new("cam"));
        let scene = Scene::new("s").with_child(a).with_camera(cam);
        assert_eq!(scene.scan(), vec![a, cam]);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut game = Game::new(GameConfig::default());
        let a = game.insert(Fill::new(Color::WHITE));
        let mut scene = Scene::new("s").with_child(a);
        assert!(scene.remove(a));
        assert!(!scene.remove(a));
        assert!(scene.children().is_empty());
    }

    #[test]
    fn test_hidden_and_disabled_scene_do_nothing() {
        let mut game = Game::new(GameConfig::default());
        let a = game.insert(Fill::new(Color::WHITE).with_z(2.0));
        let b = game.insert(Fill::new(Color::BLACK).with_z(1.0));
        let mut scene = Scene::new("s").with_child(a).with_child(b);
        scene.hidden.hide();
        scene.disabled.disable();

        let mut surface = RecordingSurface::new();
        scene.draw(&game, &mut surface, &DrawOptions::default());
        assert!(surface.calls().is_empty());

        scene.update(&mut game).unwrap();
        assert_eq!(scene.children(), &[a, b]);

        scene.disabled.enable();
        scene.update(&mut game).unwrap();
        assert_eq!(scene.children(), &[b, a]);
    }

    #[test]
    fn test_unprepared_camera_falls_back_to_plain_draw() {
        let mut game = Game::new(GameConfig::default());
        let fill = game.insert(Fill::new(Color::WHITE));
        let cam = game.insert(Camera::new("cam").with_centre(Point2::new(50, 50)));
        let scene = Scene::new("s").with_child(fill).with_camera(cam);

        let mut surface = RecordingSurface::new();
        scene.draw(&game, &mut surface, &DrawOptions::default());
        assert_eq!(surface.calls().len(), 1);
        assert!(matches!(surface.calls()[0], DrawCall::Fill { .. }));
        assert_eq!(surface.calls()[0].origin(), (0.0, 0.0));
    }
}
