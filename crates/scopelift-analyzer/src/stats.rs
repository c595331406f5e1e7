//! Run-wide analysis counters.

use std::fmt;

/// Statistics about one analysis run.
///
/// Counters are updated by the tree builder as events arrive and are
/// cheap enough to maintain unconditionally; the CLI prints them on
/// request after the stream ends.
#[derive(Debug, Clone, Default)]
pub struct AnalysisStats {
    /// Function activations entered
    pub functions_entered: u64,
    /// Function activations exited
    pub functions_exited: u64,
    /// Variable records added to a registry
    pub variables_recorded: u64,
    /// Variable events dropped by the validity check
    pub variables_dropped: u64,
    /// Events ignored because no activation was open
    pub events_ignored: u64,
    /// Child attachments collapsed as direct recursion
    pub recursion_collapses: u64,
    /// Attachments skipped by the indirect-eval name match
    pub eval_attach_skips: u64,
    /// Root activations whose exit produced a report block
    pub roots_completed: u64,
    /// Report lines accumulated so far
    pub report_lines: u64,
}

impl AnalysisStats {
    /// Activations entered but never exited. Non-zero after a trace that
    /// was cut off mid-execution.
    pub fn open_activations(&self) -> u64 {
        self.functions_entered.saturating_sub(self.functions_exited)
    }
}

impl fmt::Display for AnalysisStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "functions entered:   {}", self.functions_entered)?;
        writeln!(f, "functions exited:    {}", self.functions_exited)?;
        writeln!(f, "variables recorded:  {}", self.variables_recorded)?;
        writeln!(f, "variables dropped:   {}", self.variables_dropped)?;
        writeln!(f, "events ignored:      {}", self.events_ignored)?;
        writeln!(f, "recursion collapses: {}", self.recursion_collapses)?;
        writeln!(f, "eval attach skips:   {}", self.eval_attach_skips)?;
        writeln!(f, "roots completed:     {}", self.roots_completed)?;
        write!(f, "report lines:        {}", self.report_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_activations_never_underflows() {
        let stats = AnalysisStats {
            functions_entered: 1,
            functions_exited: 3,
            ..AnalysisStats::default()
        };
        assert_eq!(stats.open_activations(), 0);
    }

    #[test]
    fn test_display_lists_every_counter() {
        let stats = AnalysisStats {
            functions_entered: 4,
            functions_exited: 4,
            variables_recorded: 7,
            ..AnalysisStats::default()
        };
        let text = stats.to_string();
        assert!(text.contains("functions entered:   4"));
        assert!(text.contains("variables recorded:  7"));
        assert!(text.contains("report lines:        0"));
    }
}
