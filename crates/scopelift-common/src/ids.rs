//! Identifier newtypes carried on trace records.

use serde::{Deserialize, Serialize};

/// Opaque location token attached to function-enter events.
///
/// The instrumentation engine owns the numbering; the analyzer never
/// interprets the raw value and only resolves it to a `file:line:col`
/// string through [`SiteMap`](crate::SiteMap) when a report line needs a
/// source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u32);

/// Identity token for a function's source body.
///
/// Two activations carrying the same `BodyId` executed the same body of
/// code. Used to detect direct recursion when attaching scope nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u64);
