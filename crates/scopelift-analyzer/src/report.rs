//! Human-readable verdict lines.

use colored::Colorize;

use scopelift_common::{SiteId, SiteMap};

use crate::arena::ScopeNode;

/// Accumulates report lines for one analysis run.
///
/// Lines state facts about finalized nodes (name, source line, parent,
/// verdict, blocking ancestors); nothing here recomputes hoistability.
/// The buffer is rendered once by the caller after the stream ends, so
/// log output on stderr never interleaves with the report.
pub struct Reporter {
    color: bool,
    lines: Vec<String>,
}

impl Reporter {
    pub fn new(color: bool) -> Reporter {
        Reporter {
            color,
            lines: Vec::new(),
        }
    }

    /// Verdict line for a non-root node against its parent.
    pub fn push_node(&mut self, node: &ScopeNode, parent: &ScopeNode, sites: &SiteMap) {
        let mut out = format!(
            "{} at line {} under {} at line {} is {}",
            node.name,
            line_label(sites, node.site),
            parent.name,
            line_label(sites, parent.site),
            self.verdict(node.hoistable_with_parent),
        );
        if node.hoistable_with_parent && !node.non_hoistable_parents.is_empty() {
            out.push_str(", but not under: ");
            out.push_str(&node.non_hoistable_parents.join(", "));
        }
        self.lines.push(out);
    }

    /// Verdict line for a root node.
    pub fn push_root(&mut self, node: &ScopeNode, sites: &SiteMap) {
        self.lines.push(format!(
            "{} at line {} is a root node, {}",
            node.name,
            line_label(sites, node.site),
            self.not_required(),
        ));
    }

    /// Line for a function observed as an indirect-eval target. Such
    /// functions already execute at global scope.
    pub fn push_indirect_eval(&mut self, name: &str) {
        self.lines.push(format!(
            "{} is invoked via indirect eval, {}",
            name,
            self.not_required(),
        ));
    }

    /// All accumulated lines joined with newlines; empty when no verdict
    /// was emitted.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn verdict(&self, hoistable: bool) -> String {
        let label = if hoistable { "hoistable" } else { "not hoistable" };
        if !self.color {
            return label.to_string();
        }
        if hoistable {
            label.green().bold().to_string()
        } else {
            label.red().bold().to_string()
        }
    }

    fn not_required(&self) -> String {
        let label = "hoisting is not required";
        if self.color {
            label.cyan().to_string()
        } else {
            label.to_string()
        }
    }
}

/// Source line for a site, or `?` when the site was never mapped or its
/// location string is malformed.
fn line_label(sites: &SiteMap, site: SiteId) -> String {
    match sites.resolve_line(site) {
        Some(line) => line.to_string(),
        None => "?".to_string(),
    }
}
