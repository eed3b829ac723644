//! Tree walking and draw-order maintenance across scenes
//!
//! Builds small scene trees inside a game and checks traversal order,
//! capability queries and child re-sorting.

use crate::component::{Capabilities, Capability, Component, Drawer};
use crate::components::Fill;
use crate::core::config::GameConfig;
use crate::foundation::collections::ComponentId;
use crate::game::Game;
use crate::render::{Color, DrawOptions, Surface};
use crate::scene::Scene;

/// A drawable with no draw-order key
struct Unkeyed;

impl Drawer for Unkeyed {
    fn draw(&self, _game: &Game, surface: &mut dyn Surface, opts: &DrawOptions) {
        surface.fill(Color::TRANSPARENT, opts);
    }
}

impl Component for Unkeyed {
    fn name(&self) -> &'static str {
        "Unkeyed"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::DRAW
    }

    fn as_drawer(&self) -> Option<&dyn Drawer> {
        Some(self)
    }
}

/// Binary tree of scenes `depth` levels deep with fills at the leaves
fn build_tree(game: &mut Game, depth: u32, name: &str) -> ComponentId {
    if depth == 0 {
        return game.insert(Fill::new(Color::WHITE).with_id(name));
    }
    let left = build_tree(game, depth - 1, &format!("{name}L"));
    let right = build_tree(game, depth - 1, &format!("{name}R"));
    game.insert(Scene::new(name).with_child(left).with_child(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_scan_visits_every_node_once_parents_first() {
        let mut game = Game::new(GameConfig::default());
        let root = build_tree(&mut game, 3, "n");
        let order = game.scan(root);

        assert_eq!(order.len(), 15);
        assert_eq!(order[0], root);
        let position: HashMap<ComponentId, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        assert_eq!(position.len(), 15);

        for &id in &order {
            let Some(scene) = game.downcast_ref::<Scene>(id) else {
                continue;
            };
            for child in scene.children() {
                assert!(position[&id] < position[child]);
            }
        }
    }

    #[test]
    fn test_shared_child_is_visited_once() {
        let mut game = Game::new(GameConfig::default());
        let shared = game.insert(Fill::new(Color::BLACK));
        let a = game.insert(Scene::new("a").with_child(shared));
        let b = game.insert(Scene::new("b").with_child(shared));
        let root = game.insert(Scene::new("root").with_child(a).with_child(b));

        assert_eq!(game.scan(root), vec![root, a, b, shared]);
    }

    #[test]
    fn test_queries_follow_traversal_order() {
        let mut game = Game::new(GameConfig::default());
        let root = build_tree(&mut game, 2, "n");
        game.set_root(root);
        game.reindex();

        assert_eq!(game.find_all(Capability::Scan).len(), 3);
        assert_eq!(game.find_all(Capability::Draw).len(), 7);
        assert_eq!(game.find_first(Capability::Draw, None), Some(root));

        let leaf = game.find_first(Capability::Identify, Some("nRL")).unwrap();
        assert_eq!(game.downcast_ref::<Fill>(leaf).unwrap().id.0, "nRL");
        assert!(game.find_first(Capability::Collide, None).is_none());

        // The free functions walk from any subtree.
        let right = crate::component::find_first(&game, root, Capability::Identify, Some("nR")).unwrap();
        assert_eq!(crate::component::find_all(&game, right, Capability::Draw).len(), 3);
    }

    #[test]
    fn test_empty_identifier_matches_nothing() {
        let mut game = Game::new(GameConfig::default());
        let anonymous = game.insert(Fill::new(Color::BLACK));
        let root = game.insert(Scene::new("root").with_child(anonymous));
        game.set_root(root);
        game.reindex();

        assert_eq!(game.find_first(Capability::Identify, None), Some(root));
        assert!(game.find_first(Capability::Identify, Some("")).is_none());
        assert!(crate::component::find_first(&game, root, Capability::Draw, Some("")).is_none());
    }

    #[test]
    fn test_update_sorts_by_z_and_puts_unkeyed_first() {
        let mut game = Game::new(GameConfig::default());
        let five = game.insert(Fill::new(Color::WHITE).with_z(5.0));
        let one = game.insert(Fill::new(Color::WHITE).with_z(1.0));
        let three = game.insert(Fill::new(Color::WHITE).with_z(3.0));
        let root = game.insert(
            Scene::new("root")
                .with_child(five)
                .with_child(one)
                .with_child(three),
        );
        game.set_root(root);

        game.update().unwrap();
        let children = |game: &Game| game.downcast_ref::<Scene>(root).unwrap().children().to_vec();
        assert_eq!(children(&game), vec![one, three, five]);

        let plain = game.insert(Unkeyed);
        game.attach(root, plain).unwrap();
        assert_eq!(children(&game), vec![one, three, five, plain]);

        game.update().unwrap();
        assert_eq!(children(&game), vec![plain, one, three, five]);
    }

    #[test]
    fn test_equal_keys_keep_insertion_order() {
        let mut game = Game::new(GameConfig::default());
        let a = game.insert(Fill::new(Color::WHITE).with_z(2.0));
        let b = game.insert(Fill::new(Color::WHITE).with_z(1.0));
        let c = game.insert(Fill::new(Color::WHITE).with_z(2.0));
        let d = game.insert(Fill::new(Color::WHITE).with_z(1.0));
        let root = game.insert(Scene::new("root").with_child(a).with_child(b).with_child(c).with_child(d));
        game.set_root(root);
        game.load().unwrap();
        game.prepare().unwrap();

        let scene = game.downcast_ref::<Scene>(root).unwrap();
        assert_eq!(scene.children(), &[b, d, a, c]);
    }

    #[test]
    fn test_z_change_is_picked_up_next_frame() {
        let mut game = Game::new(GameConfig::default());
        let back = game.insert(Fill::new(Color::BLACK).with_z(0.0));
        let front = game.insert(Fill::new(Color::WHITE).with_z(1.0));
        let root = game.insert(Scene::new("root").with_child(back).with_child(front));
        game.set_root(root);
        game.update().unwrap();

        game.downcast_mut::<Fill>(back).unwrap().z.0 = 10.0;
        game.update().unwrap();
        let scene = game.downcast_ref::<Scene>(root).unwrap();
        assert_eq!(scene.children(), &[front, back]);
    }
}
