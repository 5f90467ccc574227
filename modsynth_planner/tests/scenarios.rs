//! Concrete planner scenarios.

use modsynth_planner::{apply_patch, make_patch, Action, CtlSource, LinkId, PlanError, SynthBuilder};

#[test]
fn minimal_pass_through() {
    // Out (timbre, output) <- Osc (voice). Scenario 1.
    let mut b = SynthBuilder::new();
    let osc = b.add_voice_module("Osc", &[], &["out"]).unwrap();
    let out_mod = b.add_timbre_module("Out", &["in"], &[]).unwrap();
    b.mark_output(out_mod).unwrap();
    let synth = b.finalize(1, 1).unwrap();

    let osc_out = synth.output_port(osc, 0);
    let out_in = synth.input_port(out_mod, 0);

    let patch = make_patch(&synth).connect(out_in, Some(osc_out), None, 1.0).unwrap();
    apply_patch(&synth, &patch, 0).unwrap();

    let plan = synth.plan_slot(0).load();
    assert!(plan.pre_run.is_empty());
    assert_eq!(plan.v_run, vec![Action::Render(osc)]);
    assert_eq!(
        plan.post_run,
        vec![
            Action::Copy(out_in, Some(osc_out), None, LinkId(0)),
            Action::Render(out_mod),
        ]
    );
}

#[test]
fn two_sources_on_one_input() {
    // A, B (voice) both feed M.in (voice); M feeds the output. Scenario 2.
    let mut b = SynthBuilder::new();
    let a = b.add_voice_module("A", &[], &["out"]).unwrap();
    let bm = b.add_voice_module("B", &[], &["out"]).unwrap();
    let m = b.add_voice_module("M", &["in"], &["out"]).unwrap();
    let out_mod = b.add_timbre_module("Out", &["in"], &[]).unwrap();
    b.mark_output(out_mod).unwrap();
    let synth = b.finalize(1, 1).unwrap();

    let a_out = synth.output_port(a, 0);
    let b_out = synth.output_port(bm, 0);
    let m_in = synth.input_port(m, 0);
    let m_out = synth.output_port(m, 0);
    let out_in = synth.input_port(out_mod, 0);

    let patch = make_patch(&synth)
        .connect(m_in, Some(a_out), None, 1.0)
        .unwrap()
        .connect(m_in, Some(b_out), None, 1.0)
        .unwrap()
        .connect(out_in, Some(m_out), None, 1.0)
        .unwrap();
    apply_patch(&synth, &patch, 0).unwrap();

    let plan = synth.plan_slot(0).load();
    assert_eq!(
        plan.v_run,
        vec![
            Action::Render(a),
            Action::Render(bm),
            Action::Copy(m_in, Some(a_out), None, LinkId(0)),
            Action::Add(m_in, Some(b_out), None, LinkId(1)),
            Action::Render(m),
        ]
    );
}

#[test]
fn single_simple_link_is_aliased_not_copied() {
    // A.out -> M.in, a single voice-scope simple link. Scenario 3.
    let mut b = SynthBuilder::new();
    let a = b.add_voice_module("A", &[], &["out"]).unwrap();
    let m = b.add_voice_module("M", &["in"], &["out"]).unwrap();
    let out_mod = b.add_timbre_module("Out", &["in"], &[]).unwrap();
    b.mark_output(out_mod).unwrap();
    let synth = b.finalize(1, 1).unwrap();

    let a_out = synth.output_port(a, 0);
    let m_in = synth.input_port(m, 0);
    let m_out = synth.output_port(m, 0);
    let out_in = synth.input_port(out_mod, 0);

    let patch = make_patch(&synth)
        .connect(m_in, Some(a_out), None, 1.0)
        .unwrap()
        .connect(out_in, Some(m_out), None, 1.0)
        .unwrap();
    apply_patch(&synth, &patch, 0).unwrap();

    let plan = synth.plan_slot(0).load();
    assert_eq!(plan.v_prep, vec![Action::Alias(m_in, Some(a_out))]);
    assert_eq!(plan.v_run, vec![Action::Render(a), Action::Render(m)]);
}

#[test]
fn control_modulated_link() {
    // osc.pitch <- env.out * lfo.out * 0.3. Scenario 4.
    let mut b = SynthBuilder::new();
    let env = b.add_voice_module("Env", &[], &["out"]).unwrap();
    let lfo = b.add_voice_module("Lfo", &[], &["out"]).unwrap();
    let osc = b.add_voice_module("Osc", &["pitch"], &["out"]).unwrap();
    let out_mod = b.add_timbre_module("Out", &["in"], &[]).unwrap();
    b.mark_output(out_mod).unwrap();
    let synth = b.finalize(1, 1).unwrap();

    let env_out = synth.output_port(env, 0);
    let lfo_out = synth.output_port(lfo, 0);
    let osc_pitch = synth.input_port(osc, 0);
    let osc_out = synth.output_port(osc, 0);
    let out_in = synth.input_port(out_mod, 0);

    let patch = make_patch(&synth)
        .connect(osc_pitch, Some(env_out), Some(CtlSource::Port(lfo_out)), 0.3)
        .unwrap()
        .connect(out_in, Some(osc_out), None, 1.0)
        .unwrap();
    apply_patch(&synth, &patch, 0).unwrap();

    let plan = synth.plan_slot(0).load();
    assert_eq!(plan.v_prep, vec![Action::Alias(osc_pitch, None)]);
    assert_eq!(
        plan.v_run,
        vec![
            Action::Render(env),
            Action::Render(lfo),
            Action::Copy(osc_pitch, Some(env_out), Some(lfo_out), LinkId(0)),
            Action::Render(osc),
        ]
    );
}

#[test]
fn cycle_is_detected() {
    // A -> B -> A. Scenario 5.
    let mut b = SynthBuilder::new();
    let a = b.add_voice_module("A", &["in"], &["out"]).unwrap();
    let bm = b.add_voice_module("B", &["in"], &["out"]).unwrap();
    let out_mod = b.add_timbre_module("Out", &["in"], &[]).unwrap();
    b.mark_output(out_mod).unwrap();
    let synth = b.finalize(1, 1).unwrap();

    let a_in = synth.input_port(a, 0);
    let a_out = synth.output_port(a, 0);
    let b_in = synth.input_port(bm, 0);
    let b_out = synth.output_port(bm, 0);
    let out_in = synth.input_port(out_mod, 0);

    let patch = make_patch(&synth)
        .connect(b_in, Some(a_out), None, 1.0)
        .unwrap()
        .connect(a_in, Some(b_out), None, 1.0)
        .unwrap()
        .connect(out_in, Some(a_out), None, 1.0)
        .unwrap();

    let err = apply_patch(&synth, &patch, 0).unwrap_err();
    assert!(matches!(err, PlanError::Cycle(_)));
}

#[test]
fn cross_scope_violation_is_rejected() {
    // A voice module (V2) feeds a pre-voice module (Pre) directly, which is
    // forbidden: voice -> pre-voice must never happen. V2 is legitimately
    // voice-scope via its other link into Osc. Scenario 6.
    let mut b = SynthBuilder::new();
    let v2 = b.add_voice_module("V2", &[], &["out"]).unwrap();
    let osc = b.add_voice_module("Osc", &["in", "mod2"], &["out"]).unwrap();
    let pre_mod = b.add_timbre_module("Pre", &["in"], &["out"]).unwrap();
    let out_mod = b.add_timbre_module("Out", &["in"], &[]).unwrap();
    b.mark_output(out_mod).unwrap();
    let synth = b.finalize(1, 1).unwrap();

    let v2_out = synth.output_port(v2, 0);
    let osc_in = synth.input_port(osc, 0);
    let osc_mod2 = synth.input_port(osc, 1);
    let osc_out = synth.output_port(osc, 0);
    let pre_in = synth.input_port(pre_mod, 0);
    let pre_out = synth.output_port(pre_mod, 0);
    let out_in = synth.input_port(out_mod, 0);

    let patch = make_patch(&synth)
        .connect(out_in, Some(osc_out), None, 1.0)
        .unwrap()
        .connect(osc_in, Some(pre_out), None, 1.0)
        .unwrap()
        .connect(osc_mod2, Some(v2_out), None, 1.0)
        .unwrap()
        .connect(pre_in, Some(v2_out), None, 1.0) // the forbidden edge
        .unwrap();

    let err = apply_patch(&synth, &patch, 0).unwrap_err();
    assert!(matches!(err, PlanError::ScopeViolation(_, _)));
}
