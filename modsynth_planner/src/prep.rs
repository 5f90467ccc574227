//! Prep planner: one-time-per-scope buffer wiring (spec §4.6).

use modsynth_core::Subset;

use crate::{
    action::Action,
    graphbuild::DerivedGraph,
    ids::{ControlId, ModuleId},
    link::Link,
    synth::Synth,
};

/// Emit the prep action list for one scope (timbre or voice).
///
/// `controls` are evaluated unconditionally, in universe order. For each
/// input port of each module in `modules`, exactly one of `Clear` or
/// `Alias` is emitted, establishing the buffer wiring the run planner's
/// `Copy`/`Add` actions rely on.
///
/// `same_scope_restriction` implements the spec's asymmetric aliasing
/// policy: in the timbre prep, pass `Some(pre ∪ post)` so a link is only
/// aliased when its source is also timbre-scope (voice buffers are
/// private to a voice and cannot be aliased into a timbre buffer); in the
/// voice prep, pass `None` so any simple link qualifies, including a
/// cross-scope link from a pre-voice source (pre-voice buffers are
/// stable for a voice's whole lifetime).
pub fn emit_prep(
    synth: &Synth,
    derived: &DerivedGraph<'_, '_>,
    links: &[Link],
    controls: Subset<'_, ControlId>,
    modules: Subset<'_, ModuleId>,
    same_scope_restriction: Option<Subset<'_, ModuleId>>,
) -> Vec<Action> {
    let mut actions = Vec::new();

    for control in controls.iter_members() {
        actions.push(Action::Eval(*control));
    }

    for module in modules.iter_members() {
        for port in synth.module_inputs(*module) {
            let incoming = derived.links_to.get(&port);

            if incoming.is_empty() {
                actions.push(Action::Clear(port, 0.0));
                continue;
            }

            if incoming.len() == 1 {
                let link_id = incoming.iter_members().next().expect("len == 1");
                let link = &links[link_id.0];

                if link.is_aliasable(synth, same_scope_restriction.as_ref()) {
                    actions.push(Action::Alias(port, link.src));
                    continue;
                }
            }

            actions.push(Action::Alias(port, None));
        }
    }

    actions
}
