//! Source locations and the site table.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::ids::SiteId;

/// A `file:line` position parsed from an instrumentation location string.
///
/// Location strings have the shape `file:line:col`. The file segment may
/// itself contain colons (drive letters, URLs), so parsing peels the two
/// numeric segments off the right-hand end instead of splitting from the
/// left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    /// Parse a `file:line:col` string.
    ///
    /// Returns `None` when the two trailing segments are missing or not
    /// numeric.
    pub fn parse(raw: &str) -> Option<SourceLocation> {
        let (rest, _col) = split_trailing_number(raw)?;
        let (file, line) = split_trailing_number(rest)?;
        if file.is_empty() {
            return None;
        }
        Some(SourceLocation {
            file: file.to_string(),
            line,
        })
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Split `prefix:number` into `(prefix, number)`.
fn split_trailing_number(s: &str) -> Option<(&str, u32)> {
    let idx = s.rfind(':')?;
    let num = s[idx + 1..].parse().ok()?;
    Some((&s[..idx], num))
}

/// Mapping from opaque site ids to `file:line:col` strings.
///
/// Fed from `site` records interleaved in the trace; consulted on demand
/// when a report line needs a source position. A later record for the same
/// id overwrites the earlier mapping.
#[derive(Debug, Clone, Default)]
pub struct SiteMap {
    sites: FxHashMap<SiteId, String>,
}

impl SiteMap {
    pub fn new() -> SiteMap {
        SiteMap {
            sites: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, id: SiteId, loc: String) {
        self.sites.insert(id, loc);
    }

    /// Raw location string for a site, if known.
    pub fn resolve(&self, id: SiteId) -> Option<&str> {
        self.sites.get(&id).map(|s| s.as_str())
    }

    /// Line number for a site, if known and well-formed.
    pub fn resolve_line(&self, id: SiteId) -> Option<u32> {
        SourceLocation::parse(self.resolve(id)?).map(|loc| loc.line)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
