//! Scope tree construction from the event stream.

use scopelift_common::{BodyId, SiteId, SiteMap};
use scopelift_trace::{TraceSink, TraceValue, UsageKind};
use tracing::{debug, trace, warn};

use crate::arena::{ANONYMOUS_NAME, AttachOutcome, ScopeArena, ScopeNodeId, TreeError};
use crate::hoist;
use crate::report::Reporter;
use crate::stats::AnalysisStats;

/// Pseudo-binding every function activation receives; never a real
/// dependency, so variable events carrying it are dropped.
const ARGUMENTS_NAME: &str = "arguments";

/// Builds the scope forest from a stream of execution events.
///
/// One instance owns all run state: the node arena, the site table, the
/// report buffer, the statistics counters, the root list, and the cursor
/// into the open activation (`current`). `current` behaves as the top of
/// an implicit call stack: function-enter pushes, function-exit pops to
/// the parent. On a root's exit the cursor deliberately stays parked on
/// the root instead of clearing, so a later exit at root level re-runs the
/// report block; see the eval-correlation notes on [`on_function_enter`].
///
/// [`on_function_enter`]: TraceSink::on_function_enter
pub struct TreeBuilder {
    arena: ScopeArena,
    sites: SiteMap,
    reporter: Reporter,
    stats: AnalysisStats,
    roots: Vec<ScopeNodeId>,
    current: ScopeNodeId,
    indirect_eval_pending: bool,
    indirect_eval_names: Vec<String>,
}

impl TreeBuilder {
    pub fn new(pretty: bool) -> TreeBuilder {
        TreeBuilder {
            arena: ScopeArena::new(),
            sites: SiteMap::new(),
            reporter: Reporter::new(pretty),
            stats: AnalysisStats::default(),
            roots: Vec::new(),
            current: ScopeNodeId::NONE,
            indirect_eval_pending: false,
            indirect_eval_names: Vec::new(),
        }
    }

    /// Record a site-id-to-location mapping. Later mappings for the same
    /// id win.
    pub fn add_site(&mut self, id: SiteId, loc: String) {
        self.sites.insert(id, loc);
    }

    pub fn arena(&self) -> &ScopeArena {
        &self.arena
    }

    pub fn roots(&self) -> &[ScopeNodeId] {
        &self.roots
    }

    /// The open activation the next variable event lands in; `NONE`
    /// before the first function-enter.
    pub fn current(&self) -> ScopeNodeId {
        self.current
    }

    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }

    /// Names captured as indirect-eval targets, in observation order.
    /// Never cleared for the lifetime of the run.
    pub fn indirect_eval_names(&self) -> &[String] {
        &self.indirect_eval_names
    }

    /// Activations entered but never exited.
    pub fn open_activations(&self) -> u64 {
        self.stats.open_activations()
    }

    /// Structural consistency check over the finished forest: link health
    /// plus reachability from the recorded roots.
    pub fn validate(&self) -> Vec<TreeError> {
        let mut errors = self.arena.validate();
        errors.extend(self.arena.validate_reachable(&self.roots));
        errors
    }

    /// The report accumulated so far, one verdict per line.
    pub fn render_report(&self) -> String {
        self.reporter.render()
    }

    pub fn report_lines(&self) -> &[String] {
        self.reporter.lines()
    }
}

impl TraceSink for TreeBuilder {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(body = body.0, name = name.unwrap_or(ANONYMOUS_NAME), site = site.0)
    )]
    fn on_function_enter(&mut self, body: BodyId, name: Option<&str>, site: SiteId) {
        self.stats.functions_entered += 1;
        let name = name.unwrap_or(ANONYMOUS_NAME).to_string();
        let node = self.arena.alloc(name.clone(), body, site, self.current);

        if self.current.is_none() {
            self.roots.push(node);
            self.current = node;
            debug!(node = node.0, "new root activation");
            return;
        }

        if self.indirect_eval_names.is_empty() {
            if self.arena.attach_child(self.current, node) == AttachOutcome::RecursionCollapsed {
                self.stats.recursion_collapses += 1;
            }
            self.current = node;
            return;
        }

        // One attach attempt per pending indirect-eval name. A pending
        // name equal to the entering function's skips both the attach and
        // the cursor switch, leaving `current` stale; later events of
        // this activation then land in the old node, and an exit while
        // the stale cursor sits on a root re-runs the root report block.
        // Kept as observed.
        for pending in &self.indirect_eval_names {
            if *pending == name {
                trace!(name = %name, "eval-named activation left unattached");
                self.stats.eval_attach_skips += 1;
                continue;
            }
            if self.arena.attach_child(self.current, node) == AttachOutcome::RecursionCollapsed {
                self.stats.recursion_collapses += 1;
            }
            self.current = node;
        }
    }

    #[tracing::instrument(level = "debug", skip(self), fields(current = self.current.0))]
    fn on_function_exit(&mut self) {
        if self.arena.get(self.current).is_none() {
            warn!("function exit with no open activation; ignored");
            self.stats.events_ignored += 1;
            return;
        }
        self.stats.functions_exited += 1;

        let exiting = self.current;
        hoist::evaluate_against_parent(&mut self.arena, exiting);

        let parent = match self.arena.get(exiting) {
            Some(node) => node.parent,
            None => return,
        };
        if !parent.is_none() {
            self.current = parent;
            return;
        }

        // Root exit: emit the root's own line, sweep its descendants, then
        // one line per captured indirect-eval name. The cursor stays on
        // the root.
        if let Some(root) = self.arena.get(exiting) {
            self.reporter.push_root(root, &self.sites);
        }
        hoist::sweep_and_report(&mut self.arena, exiting, &self.sites, &mut self.reporter);
        for name in &self.indirect_eval_names {
            self.reporter.push_indirect_eval(name);
        }
        self.stats.roots_completed += 1;
        self.stats.report_lines = self.reporter.line_count() as u64;
    }

    #[tracing::instrument(level = "trace", skip(self, value))]
    fn on_variable(&mut self, kind: UsageKind, name: &str, value: &TraceValue, is_argument: bool) {
        let Some(value_type) = value.kind() else {
            trace!(value = value.type_name(), "variable dropped by validity check");
            self.stats.variables_dropped += 1;
            return;
        };
        if name == ARGUMENTS_NAME {
            self.stats.variables_dropped += 1;
            return;
        }
        let Some(node) = self.arena.get_mut(self.current) else {
            self.stats.events_ignored += 1;
            return;
        };
        if node.variables.insert(name, is_argument, kind, value_type) {
            self.stats.variables_recorded += 1;
        }
    }

    #[tracing::instrument(level = "trace", skip(self, value), fields(value_type = value.type_name()))]
    fn on_literal(&mut self, value: &TraceValue) {
        if !self.indirect_eval_pending {
            return;
        }
        if let Some(name) = value.function_name() {
            debug!(name, "captured indirect-eval target");
            self.indirect_eval_names.push(name.to_string());
            self.indirect_eval_pending = false;
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn on_eval_mode(&mut self, direct: bool) {
        if !direct {
            self.indirect_eval_pending = true;
        }
    }
}
