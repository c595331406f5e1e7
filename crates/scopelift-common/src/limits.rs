//! Centralized limits and safety valves for the analyzer.
//!
//! The scope tree is driven entirely by an external event stream, so every
//! loop that follows links inside that tree carries an iteration bound: a
//! malformed or adversarial trace must never be able to hang the analysis.
//! Centralizing the bounds here keeps the values consistent and documents
//! the rationale for each one.

/// Maximum iterations for the whole-tree ancestor-collision sweep.
///
/// The post-root sweep visits every node once using an explicit work
/// stack. A well-formed tree therefore needs exactly one iteration per
/// node; this valve only trips if the tree has been corrupted into a
/// cyclic shape, in which case the sweep stops and logs a warning rather
/// than spinning forever.
pub const MAX_TREE_WALK_ITERATIONS: u32 = 1_000_000;

/// Inline capacity for per-node variable records.
///
/// Most activations track only a handful of variables (parameters plus a
/// few locals), so registries are backed by a `SmallVec` that holds this
/// many records without a heap allocation.
pub const VARIABLES_INLINE_CAPACITY: usize = 8;

/// Inline capacity for per-node child lists.
///
/// Deeply bushy scopes are rare; four inline slots cover typical nesting
/// without spilling to the heap.
pub const CHILDREN_INLINE_CAPACITY: usize = 4;
