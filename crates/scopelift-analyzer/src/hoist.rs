//! Hoistability evaluation and the post-root collision sweep.

use scopelift_common::SiteMap;
use scopelift_common::limits::MAX_TREE_WALK_ITERATIONS;
use tracing::{debug, warn};

use crate::arena::{ScopeArena, ScopeNodeId};
use crate::report::Reporter;

/// Compute and store the immediate-parent verdict for one node.
///
/// A node is hoistable out of its parent when none of its free names
/// (names it read or wrote) is present in the parent's registry: every
/// such overlap is a binding the function would lose by moving outward.
/// Roots are vacuously hoistable. The result is written to the node and
/// returned; re-evaluating a node with no new events is idempotent.
pub fn evaluate_against_parent(arena: &mut ScopeArena, node_id: ScopeNodeId) -> bool {
    let hoistable = match arena.get(node_id) {
        None => return false,
        Some(node) => match arena.get(node.parent) {
            None => true,
            Some(parent) => node
                .variables
                .free_names()
                .all(|name| !parent.variables.contains_name(name)),
        },
    };
    if let Some(node) = arena.get_mut(node_id) {
        node.hoistable_with_parent = hoistable;
        debug!(node = node_id.0, name = %node.name, hoistable, "evaluated against parent");
    }
    hoistable
}

/// Record ancestor-level name collisions for a would-be-hoisted node.
///
/// Two independent scans against the grandparent: a child of the
/// grandparent sharing the node's name, and a variable in the
/// grandparent's registry sharing the node's name, each append the
/// grandparent's name to `non_hoistable_parents`. Collisions only
/// annotate the verdict; `hoistable_with_parent` is left untouched.
pub fn check_ancestor_collision(
    arena: &mut ScopeArena,
    node_id: ScopeNodeId,
    grandparent_id: ScopeNodeId,
) {
    let mut blockers = Vec::new();
    {
        let (Some(node), Some(grandparent)) = (arena.get(node_id), arena.get(grandparent_id))
        else {
            return;
        };
        for &sibling in &grandparent.children {
            if arena.get(sibling).is_some_and(|s| s.name == node.name) {
                blockers.push(grandparent.name.clone());
            }
        }
        if grandparent.variables.contains_name(&node.name) {
            blockers.push(grandparent.name.clone());
        }
    }
    if blockers.is_empty() {
        return;
    }
    debug!(
        node = node_id.0,
        count = blockers.len(),
        "ancestor name collisions recorded"
    );
    if let Some(node) = arena.get_mut(node_id) {
        node.non_hoistable_parents.extend(blockers);
    }
}

/// Walk a finished root's descendants, applying the grandparent collision
/// check and emitting one verdict line per node.
///
/// Order is parent before children, children in attach order; the root
/// itself is not visited (its line is emitted by the caller). The walk
/// uses an explicit stack so target-program recursion depth never maps
/// onto host stack depth, and it is capped by `MAX_TREE_WALK_ITERATIONS`
/// in case the forest has been corrupted into a cycle.
pub fn sweep_and_report(
    arena: &mut ScopeArena,
    root: ScopeNodeId,
    sites: &SiteMap,
    reporter: &mut Reporter,
) {
    let mut stack: Vec<ScopeNodeId> = Vec::new();
    if let Some(root_node) = arena.get(root) {
        for &child in root_node.children.iter().rev() {
            stack.push(child);
        }
    }

    let mut iterations: u32 = 0;
    while let Some(node_id) = stack.pop() {
        iterations += 1;
        if iterations > MAX_TREE_WALK_ITERATIONS {
            warn!(iterations, "tree sweep exceeded its iteration bound; stopping");
            break;
        }

        let (grandparent, hoistable) = match arena.get(node_id) {
            Some(node) => {
                let grandparent = arena
                    .get(node.parent)
                    .map_or(ScopeNodeId::NONE, |parent| parent.parent);
                (grandparent, node.hoistable_with_parent)
            }
            None => continue,
        };
        if hoistable && !grandparent.is_none() {
            check_ancestor_collision(arena, node_id, grandparent);
        }

        report_node(arena, node_id, sites, reporter);

        if let Some(node) = arena.get(node_id) {
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }
}

fn report_node(arena: &ScopeArena, node_id: ScopeNodeId, sites: &SiteMap, reporter: &mut Reporter) {
    let Some(node) = arena.get(node_id) else {
        return;
    };
    match arena.get(node.parent) {
        Some(parent) => reporter.push_node(node, parent, sites),
        None => reporter.push_root(node, sites),
    }
}
