//! Run planner: per-scope topologically ordered render sequence (spec §4.7).

use modsynth_core::Subset;

use crate::{
    action::Action,
    error::{PlanError, Result},
    graphbuild::DerivedGraph,
    ids::{ControlId, ModuleId},
    link::Link,
    synth::Synth,
};

/// Emit the run action list for one section of the graph.
///
/// `controls` are evaluated unconditionally. `section` is rendered by
/// repeatedly computing the ready set (modules whose predecessors are
/// already `done`) and rendering it; `done` seeds modules already
/// rendered by an earlier section (e.g. `pre` is `done` before the voice
/// section runs). Ties within a ready set are broken by universe order,
/// which is what makes planning the same patch twice produce identical
/// output.
///
/// `same_scope_restriction` must be the exact value passed to the
/// [`emit_prep`](crate::prep::emit_prep) call covering `section`'s
/// module set, so that a link this function skips (as "handled by prep's
/// `Alias`") is exactly the set of links prep actually aliased.
///
/// # Errors
///
/// Returns [`PlanError::Cycle`] if no module in `section \ done` ever
/// becomes ready — the module-predecessor graph has a cycle.
pub fn emit_run(
    synth: &Synth,
    derived: &DerivedGraph<'_, '_>,
    links: &[Link],
    controls: Subset<'_, ControlId>,
    section: Subset<'_, ModuleId>,
    done: Subset<'_, ModuleId>,
    same_scope_restriction: Option<Subset<'_, ModuleId>>,
) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    let mut done = done;

    for control in controls.iter_members() {
        actions.push(Action::Eval(*control));
    }

    while !(section <= done) {
        let mut ready = synth.module_universe().none();
        for module in section.iter_members() {
            if done.contains(module) {
                continue;
            }
            if *derived.mod_predecessors.get(module) <= done {
                ready.add(module);
            }
        }

        if ready.is_empty() {
            let stuck = (section - done).iter_members().next();
            let name = stuck.map(|m| synth.module(*m).name.clone()).unwrap_or_default();
            return Err(PlanError::Cycle(name));
        }

        for module in ready.iter_members() {
            for dest in synth.module_inputs(*module) {
                let incoming = derived.links_to.get(&dest);

                if incoming.len() == 1 {
                    let only_id = incoming.iter_members().next().expect("len == 1");
                    if links[only_id.0].is_aliasable(synth, same_scope_restriction.as_ref()) {
                        // Handled entirely by the prep `Alias`.
                        continue;
                    }
                }

                for (i, link_id) in incoming.iter_members().enumerate() {
                    let link = &links[link_id.0];
                    actions.push(if i == 0 {
                        Action::Copy(dest, link.src, link.ctl, *link_id)
                    } else {
                        Action::Add(dest, link.src, link.ctl, *link_id)
                    });
                }
            }
            actions.push(Action::Render(*module));
        }

        done = done | ready;
    }

    Ok(actions)
}
