//! Pinned oddities of the eval correlation and root-exit paths.
//!
//! Several behaviors here look accidental but are observable in reports,
//! so they are locked down: a refactor that changes any of them should
//! have to say so.

use scopelift_analyzer::{ScopeNodeId, TreeBuilder};
use scopelift_common::{BodyId, SiteId};
use scopelift_trace::{TraceSink, TraceValue, UsageKind};

fn enter(builder: &mut TreeBuilder, body: u64, name: &str) {
    builder.on_function_enter(BodyId(body), Some(name), SiteId(0));
}

fn arm_eval(builder: &mut TreeBuilder, name: &str) {
    builder.on_eval_mode(false);
    builder.on_literal(&TraceValue::Function {
        name: Some(name.to_string()),
    });
}

#[test]
fn test_matching_eval_name_leaves_current_stale() {
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "outer");
    arm_eval(&mut builder, "mystery");
    enter(&mut builder, 2, "mystery");

    // No attach, no cursor switch: the entering activation is skipped
    // wholesale.
    assert_eq!(builder.current(), ScopeNodeId(0));
    assert!(builder.arena().get(ScopeNodeId(0)).expect("outer").children.is_empty());
    assert_eq!(builder.stats().eval_attach_skips, 1);

    // Variable events of the skipped activation land in the stale node.
    builder.on_variable(UsageKind::Declared, "secret", &TraceValue::Number(1.0), false);
    assert!(
        builder
            .arena()
            .get(ScopeNodeId(0))
            .expect("outer")
            .variables
            .contains_name("secret")
    );
    assert!(builder.arena().get(ScopeNodeId(1)).expect("mystery").variables.is_empty());
}

#[test]
fn test_skipped_activation_exit_reports_early() {
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "outer");
    arm_eval(&mut builder, "mystery");
    enter(&mut builder, 2, "mystery");

    // The skipped activation's exit unwinds the stale cursor, which sits
    // on a root, so the report block fires before `outer` itself returns.
    builder.on_function_exit();
    assert_eq!(builder.stats().roots_completed, 1);
    assert!(builder.render_report().contains("outer at line ? is a root node"));
}

#[test]
fn test_root_report_block_is_emitted_twice() {
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "parent");
    arm_eval(&mut builder, "indirectEval");
    enter(&mut builder, 2, "indirectEval");
    builder.on_function_exit();
    builder.on_function_exit();

    let lines = builder.report_lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[..2], lines[2..]);
    assert_eq!(builder.stats().roots_completed, 2);
    assert_eq!(builder.stats().report_lines, 4);
}

#[test]
fn test_eval_names_survive_across_root_exits() {
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "parent");
    arm_eval(&mut builder, "indirectEval");
    enter(&mut builder, 2, "indirectEval");
    builder.on_function_exit();
    builder.on_function_exit();

    // The name list is never cleared.
    assert_eq!(builder.indirect_eval_names(), &["indirectEval".to_string()]);

    // A later function at root level attaches through the pending-name
    // loop (the name no longer matches) and its root exit re-reports the
    // same eval name a third time.
    enter(&mut builder, 3, "later");
    builder.on_function_exit();
    builder.on_function_exit();

    let eval_lines = builder
        .report_lines()
        .iter()
        .filter(|line| line.contains("invoked via indirect eval"))
        .count();
    assert_eq!(eval_lines, 3);

    let parent = builder.arena().get(ScopeNodeId(0)).expect("parent");
    assert_eq!(parent.children.as_slice(), &[ScopeNodeId(2)]);
}

#[test]
fn test_skipped_activation_is_never_swept() {
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "parent");
    arm_eval(&mut builder, "indirectEval");
    enter(&mut builder, 2, "indirectEval");
    builder.on_function_exit();
    builder.on_function_exit();

    // The detached activation never gets a verdict line; the only lines
    // naming it are the indirect-eval notes.
    for line in builder.report_lines() {
        if line.contains("indirectEval") {
            assert!(line.contains("invoked via indirect eval"), "unexpected: {line}");
        }
    }
}

#[test]
fn test_second_pending_name_cannot_self_attach() {
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "outer");
    arm_eval(&mut builder, "g1");
    arm_eval(&mut builder, "g2");
    enter(&mut builder, 2, "callee");

    // Two pending names mean two attach attempts for one activation; the
    // second would link the node under itself and is refused, so the
    // forest stays intact.
    let outer = builder.arena().get(ScopeNodeId(0)).expect("outer");
    assert_eq!(outer.children.as_slice(), &[ScopeNodeId(1)]);
    assert_eq!(builder.current(), ScopeNodeId(1));
    assert!(builder.arena().get(ScopeNodeId(1)).expect("callee").children.is_empty());
    assert!(builder.validate().is_empty());
    assert_eq!(builder.stats().eval_attach_skips, 0);
}

#[test]
fn test_cursor_stays_on_root_after_exit() {
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "main");
    builder.on_function_exit();

    assert_eq!(builder.current(), ScopeNodeId(0));
    assert_eq!(builder.open_activations(), 0);

    // Entering another function now nests it under the finished root
    // instead of starting a second root.
    enter(&mut builder, 2, "straggler");
    assert_eq!(builder.roots().len(), 1);
    assert_eq!(
        builder.arena().get(ScopeNodeId(0)).expect("main").children.as_slice(),
        &[ScopeNodeId(1)]
    );
}

#[test]
fn test_double_sweep_duplicates_collision_annotations() {
    // Each root-level exit re-runs the sweep, and the collision scan
    // appends rather than resets, so a doubled report block also doubles
    // the recorded blockers.
    let mut builder = TreeBuilder::new(false);
    enter(&mut builder, 1, "root");
    builder.on_variable(UsageKind::Declared, "leaf", &TraceValue::Number(1.0), false);
    enter(&mut builder, 2, "mid");
    enter(&mut builder, 3, "leaf");
    builder.on_function_exit();
    builder.on_function_exit();
    builder.on_function_exit();
    // The extra exit still finds the cursor parked on the root, so the
    // block and the scans run again.
    builder.on_function_exit();

    let leaf = builder.arena().get(ScopeNodeId(2)).expect("leaf");
    assert_eq!(
        leaf.non_hoistable_parents,
        vec!["root".to_string(), "root".to_string()]
    );
    assert_eq!(builder.stats().roots_completed, 2);
}
