//! Scope-dependency tree construction and hoistability analysis.
//!
//! The analyzer consumes an execution trace of a JavaScript program (one
//! event per function entry/exit and variable access) and builds a forest
//! of function activations. When a root activation exits, every nested
//! function is judged against its parent: a function that reads or writes
//! nothing private to its enclosing activation could be lifted outward.
//! Verdicts accumulate in a line-oriented report.

// Arena-backed scope forest
pub mod arena;
pub use arena::{ANONYMOUS_NAME, AttachOutcome, ScopeArena, ScopeNode, ScopeNodeId, TreeError};

// Per-activation variable registries
pub mod registry;
pub use registry::{VariableRecord, VariableRegistry};

// Verdict computation and the post-root sweep
pub mod hoist;
pub use hoist::{check_ancestor_collision, evaluate_against_parent, sweep_and_report};

// Report line accumulation
pub mod report;
pub use report::Reporter;

// Run-wide counters
pub mod stats;
pub use stats::AnalysisStats;

// Event-stream state machine
pub mod builder;
pub use builder::TreeBuilder;
