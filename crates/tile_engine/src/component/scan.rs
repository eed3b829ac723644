//! Tree walker and capability queries

use std::collections::{HashSet, VecDeque};

use super::{Capability, Component, Identifier};
use crate::foundation::collections::ComponentId;
use crate::game::Game;

/// Breadth-first walk from `root`
///
/// Every present node is listed once, in visitation order, root first.
/// Components implementing Scan contribute their children, so a parent always
/// precedes its descendants. Handles that do not resolve (removed, or checked
/// out by a running pass) are skipped.
pub fn scan(game: &Game, root: ComponentId) -> Vec<ComponentId> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([root]);

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let Some(component) = game.get(id) else {
            log::trace!("scan skipping unresolved {id:?}");
            continue;
        };
        order.push(id);
        if let Some(scanner) = component.as_scanner() {
            queue.extend(scanner.scan());
        }
    }
    order
}

/// Whether `component` implements `cap` and, if given, carries `ident`
///
/// An empty identifier marks an anonymous component, so `Some("")` matches
/// nothing.
pub(crate) fn matches(component: &dyn Component, cap: Capability, ident: Option<&str>) -> bool {
    if !component.implements(cap) {
        return false;
    }
    match ident {
        None => true,
        Some("") => false,
        Some(want) => component.as_identifier().map(Identifier::ident) == Some(want),
    }
}

/// First component under `root` implementing `cap` (and named `ident`, if given)
pub fn find_first(
    game: &Game,
    root: ComponentId,
    cap: Capability,
    ident: Option<&str>,
) -> Option<ComponentId> {
    scan(game, root)
        .into_iter()
        .find(|&id| game.get(id).is_some_and(|c| matches(c, cap, ident)))
}

/// Every component under `root` implementing `cap`, in traversal order
pub fn find_all(game: &Game, root: ComponentId, cap: Capability) -> Vec<ComponentId> {
    scan(game, root)
        .into_iter()
        .filter(|&id| game.get(id).is_some_and(|c| c.implements(cap)))
        .collect()
}
