//! Structural properties a correct plan must hold for any DAG-shaped patch.

use std::sync::Arc;

use modsynth_planner::{apply_patch, make_patch, Action, ModuleId, SynthBuilder};

fn render_index(actions: &[Action], module: ModuleId) -> usize {
    actions
        .iter()
        .position(|a| matches!(a, Action::Render(m) if *m == module))
        .expect("module not rendered")
}

#[test]
fn topological_correctness_and_idempotence() {
    // A -> {B, C} -> M -> Out, a diamond. Both of M's inputs are fed by a
    // single simple link each, so both must alias rather than copy.
    let mut b = SynthBuilder::new();
    let a = b.add_voice_module("A", &[], &["out"]).unwrap();
    let bb = b.add_voice_module("B", &["in"], &["out"]).unwrap();
    let cc = b.add_voice_module("C", &["in"], &["out"]).unwrap();
    let m = b.add_voice_module("M", &["in_b", "in_c"], &["out"]).unwrap();
    let out_mod = b.add_timbre_module("Out", &["in"], &[]).unwrap();
    b.mark_output(out_mod).unwrap();
    let synth = b.finalize(1, 1).unwrap();

    let a_out = synth.output_port(a, 0);
    let b_in = synth.input_port(bb, 0);
    let b_out = synth.output_port(bb, 0);
    let c_in = synth.input_port(cc, 0);
    let c_out = synth.output_port(cc, 0);
    let m_in_b = synth.input_port(m, 0);
    let m_in_c = synth.input_port(m, 1);
    let m_out = synth.output_port(m, 0);
    let out_in = synth.input_port(out_mod, 0);

    let patch = make_patch(&synth)
        .connect(b_in, Some(a_out), None, 1.0)
        .unwrap()
        .connect(c_in, Some(a_out), None, 1.0)
        .unwrap()
        .connect(m_in_b, Some(b_out), None, 1.0)
        .unwrap()
        .connect(m_in_c, Some(c_out), None, 1.0)
        .unwrap()
        .connect(out_in, Some(m_out), None, 1.0)
        .unwrap();

    apply_patch(&synth, &patch, 0).unwrap();

    let first = synth.plan_slot(0).load();

    let idx_a = render_index(&first.v_run, a);
    let idx_b = render_index(&first.v_run, bb);
    let idx_c = render_index(&first.v_run, cc);
    let idx_m = render_index(&first.v_run, m);
    assert!(idx_a < idx_b);
    assert!(idx_a < idx_c);
    assert!(idx_b < idx_m);
    assert!(idx_c < idx_m);

    assert!(first.v_prep.contains(&Action::Alias(m_in_b, Some(b_out))));
    assert!(first.v_prep.contains(&Action::Alias(m_in_c, Some(c_out))));

    let touches_m_inputs = first.v_run.iter().any(|act| {
        matches!(act, Action::Copy(p, ..) | Action::Add(p, ..) if *p == m_in_b || *p == m_in_c)
    });
    assert!(!touches_m_inputs, "aliased inputs must not also be copied/added at run time");

    let snapshot: Arc<_> = Arc::clone(&first);
    drop(first);

    apply_patch(&synth, &patch, 0).unwrap();
    let second = synth.plan_slot(0).load();

    assert_eq!(*snapshot, **second, "planning an unchanged patch twice must be deterministic");
}
