//! Per-activation variable registries.

use rustc_hash::FxHashSet;
use scopelift_common::limits::VARIABLES_INLINE_CAPACITY;
use scopelift_trace::{UsageKind, ValueKind};
use smallvec::SmallVec;

/// One tracked identifier inside a scope node.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRecord {
    pub name: String,
    /// Whether the binding is a formal parameter.
    pub is_argument: bool,
    /// How the name was first used in this activation.
    pub usage: UsageKind,
    /// Runtime type of the first observed value.
    pub value_type: ValueKind,
}

/// Deduplicated variable records for one function activation.
///
/// A name is stored at most once per registry regardless of how many times
/// it is declared, read, or written; the first occurrence wins and later
/// events with the same name are no-ops. Records keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    records: SmallVec<[VariableRecord; VARIABLES_INLINE_CAPACITY]>,
    seen: FxHashSet<String>,
}

impl VariableRegistry {
    pub fn new() -> VariableRegistry {
        VariableRegistry::default()
    }

    /// Record a usage. Returns false when the name was already present
    /// (the record is left untouched).
    pub fn insert(
        &mut self,
        name: &str,
        is_argument: bool,
        usage: UsageKind,
        value_type: ValueKind,
    ) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.records.push(VariableRecord {
            name: name.to_string(),
            is_argument,
            usage,
            value_type,
        });
        true
    }

    /// Whether any record carries this name, regardless of usage kind.
    pub fn contains_name(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Names this activation read or wrote. Declared locals are excluded:
    /// a binding the function introduces itself is not free.
    pub fn free_names(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|r| matches!(r.usage, UsageKind::Read | UsageKind::Written))
            .map(|r| r.name.as_str())
    }

    /// Every recorded name, regardless of usage kind.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
