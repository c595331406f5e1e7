//! Arena storage for scope nodes.

use scopelift_common::limits::CHILDREN_INLINE_CAPACITY;
use scopelift_common::{BodyId, SiteId};
use smallvec::SmallVec;
use tracing::warn;

use crate::registry::VariableRegistry;

/// Index of a scope node in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeNodeId(pub u32);

impl ScopeNodeId {
    pub const NONE: ScopeNodeId = ScopeNodeId(u32::MAX);

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Name recorded for activations of functions with no stable name.
pub const ANONYMOUS_NAME: &str = "anonymous";

/// One dynamic activation of a function.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    /// Declared function name, or [`ANONYMOUS_NAME`].
    pub name: String,
    /// Enclosing activation; `NONE` for roots. This is a non-owning
    /// back-link: the downward edge in `children` owns the relationship.
    pub parent: ScopeNodeId,
    /// Attached child activations in entry order.
    pub children: SmallVec<[ScopeNodeId; CHILDREN_INLINE_CAPACITY]>,
    /// Variables used during this activation.
    pub variables: VariableRegistry,
    /// Identity of the function body, for direct-recursion collapsing.
    pub body: BodyId,
    /// Source site of the function, resolved to a line on demand.
    pub site: SiteId,
    /// Verdict against the immediate parent, computed at exit.
    pub hoistable_with_parent: bool,
    /// Ancestor names that would block a hoist beyond the immediate
    /// parent. Appended by the post-root sweep; never flips the verdict.
    pub non_hoistable_parents: Vec<String>,
}

impl ScopeNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// What became of an attachment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The child was linked under the parent.
    Attached,
    /// Parent and child share a body and a non-anonymous name: direct
    /// recursion. No edge is created; the child stays an orphan.
    RecursionCollapsed,
    /// The edge would break the forest (self-attachment or an id outside
    /// the arena). Nothing was created.
    Refused,
}

/// Structural problem found in the scope forest.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// A node's parent link points outside the arena.
    ParentOutOfRange { node: ScopeNodeId, parent: ScopeNodeId },
    /// A child list entry points outside the arena.
    ChildOutOfRange { parent: ScopeNodeId, child: ScopeNodeId },
    /// A node lists itself among its children.
    SelfParented { node: ScopeNodeId },
    /// A listed child's parent link does not point back at the lister.
    LinkMismatch { parent: ScopeNodeId, child: ScopeNodeId },
    /// Reachable from no root and hanging off no known orphan.
    Unreachable { node: ScopeNodeId },
}

/// Owning storage for every scope node of one analysis run.
///
/// Nodes are allocated on function entry and never removed; identity is
/// the arena index. Parent links can only name already-allocated slots,
/// which keeps parent chains finite by construction.
#[derive(Debug, Default)]
pub struct ScopeArena {
    nodes: Vec<ScopeNode>,
}

impl ScopeArena {
    pub fn new() -> ScopeArena {
        ScopeArena::default()
    }

    /// Allocate a node with its parent back-link already set. The caller
    /// decides whether a downward edge is added (see [`attach_child`]).
    ///
    /// [`attach_child`]: ScopeArena::attach_child
    pub fn alloc(
        &mut self,
        name: String,
        body: BodyId,
        site: SiteId,
        parent: ScopeNodeId,
    ) -> ScopeNodeId {
        let id = ScopeNodeId(self.nodes.len() as u32);
        self.nodes.push(ScopeNode {
            name,
            parent,
            children: SmallVec::new(),
            variables: VariableRegistry::new(),
            body,
            site,
            hoistable_with_parent: false,
            non_hoistable_parents: Vec::new(),
        });
        id
    }

    #[inline]
    pub fn get(&self, id: ScopeNodeId) -> Option<&ScopeNode> {
        if id.is_none() {
            None
        } else {
            self.nodes.get(id.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: ScopeNodeId) -> Option<&mut ScopeNode> {
        if id.is_none() {
            None
        } else {
            self.nodes.get_mut(id.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Link `child` under `parent`, honoring the direct-recursion rule: a
    /// child whose body and non-anonymous name match the parent's gets no
    /// edge. Anonymous names are exempt because distinct function
    /// expressions share the sentinel without being the same function.
    pub fn attach_child(&mut self, parent: ScopeNodeId, child: ScopeNodeId) -> AttachOutcome {
        if parent == child {
            warn!(node = parent.0, "refusing to attach a scope node to itself");
            return AttachOutcome::Refused;
        }
        let collapse = match (self.get(parent), self.get(child)) {
            (Some(p), Some(c)) => p.body == c.body && p.name == c.name && p.name != ANONYMOUS_NAME,
            _ => {
                warn!(
                    parent = parent.0,
                    child = child.0,
                    "attach with out-of-range id ignored"
                );
                return AttachOutcome::Refused;
            }
        };
        if collapse {
            return AttachOutcome::RecursionCollapsed;
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        AttachOutcome::Attached
    }

    /// Structural consistency check over every node.
    ///
    /// Returns an empty vec for a healthy forest. Orphans (allocated but
    /// never attached) are legal and not reported here; the builder layers
    /// reachability accounting on top.
    pub fn validate(&self) -> Vec<TreeError> {
        let mut errors = Vec::new();
        let len = self.nodes.len() as u32;
        for (index, node) in self.nodes.iter().enumerate() {
            let id = ScopeNodeId(index as u32);
            if !node.parent.is_none() && node.parent.0 >= len {
                errors.push(TreeError::ParentOutOfRange {
                    node: id,
                    parent: node.parent,
                });
            }
            for &child in &node.children {
                if child == id {
                    errors.push(TreeError::SelfParented { node: id });
                    continue;
                }
                match self.get(child) {
                    None => errors.push(TreeError::ChildOutOfRange { parent: id, child }),
                    Some(c) if c.parent != id => {
                        errors.push(TreeError::LinkMismatch { parent: id, child });
                    }
                    Some(_) => {}
                }
            }
        }
        errors
    }

    /// Flags nodes that no walk from `roots` can reach. Known orphans are
    /// excused: a node whose parent link is valid but whose parent does
    /// not list it back was deliberately left unattached (recursion
    /// collapse, skipped eval activation), and so is its subtree.
    pub fn validate_reachable(&self, roots: &[ScopeNodeId]) -> Vec<TreeError> {
        let mut stack: Vec<ScopeNodeId> = roots.to_vec();
        for (index, node) in self.nodes.iter().enumerate() {
            let id = ScopeNodeId(index as u32);
            let orphan = self
                .get(node.parent)
                .is_some_and(|parent| !parent.children.contains(&id));
            if orphan {
                stack.push(id);
            }
        }

        let mut reached = vec![false; self.nodes.len()];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            let index = id.0 as usize;
            if reached[index] {
                continue;
            }
            reached[index] = true;
            stack.extend(node.children.iter().copied());
        }

        reached
            .iter()
            .enumerate()
            .filter(|&(_, flag)| !flag)
            .map(|(index, _)| TreeError::Unreachable {
                node: ScopeNodeId(index as u32),
            })
            .collect()
    }
}
