//! Compiles a declarative patch into an allocation-free render plan.
//!
//! A [`Synth`] fixes a DAG of modules, controls, and ports at construction.
//! A [`Patch`] is a validated list of links against that synth.
//! [`apply_patch`] partitions the patch into pre-voice, per-voice, and
//! post-voice scopes, linearizes each into topological render order, and
//! publishes the result as a [`Plan`] via the synth's [`PlanSlot`].
//!
//! This crate computes plans; it does not execute them. Interpreting
//! [`Action`] against real sample buffers, scheduling voices, parsing
//! patch files, and rendering DSP are all left to other collaborators.

mod action;
mod error;
mod graphbuild;
mod ids;
mod link;
mod patch;
mod plan;
mod port;
mod prep;
mod run;
mod scope;
mod synth;

pub use action::Action;
pub use error::{PlanError, Result};
pub use ids::{ControlId, LinkId, ModuleId, PortId, PortOwner};
pub use link::Link;
pub use patch::{make_patch, CtlSource, Patch};
pub use plan::{Plan, PlanSlot};
pub use port::{PortDirection, PortInfo, ValueType};
pub use scope::DeclaredScope;
pub use synth::{Synth, SynthBuilder};

/// Recompute the plan for `patch` and publish it to `synth`'s slot for
/// the given `timbre`.
///
/// Planning is transactional (spec §7): either every stage below succeeds
/// and the new [`Plan`] is published, or an error is returned and the
/// synth's previously installed plan for `timbre` is left untouched —
/// this function never calls [`PlanSlot::publish`](plan::PlanSlot::publish)
/// until every fallible stage has already returned `Ok`.
///
/// # Errors
///
/// - [`PlanError::InvalidGraph`] — a link references an entity outside
///   `synth` (should not occur for links built via [`Patch::connect`],
///   but `patch.links()` is re-validated here since nothing prevents a
///   caller from constructing a `Link` by hand).
/// - [`PlanError::ScopeViolation`] — the patch crosses scopes in the
///   forbidden direction.
/// - [`PlanError::Cycle`] — the module-predecessor graph has a cycle.
///
/// # Panics
///
/// Panics if `timbre >= synth.timbrality()`.
pub fn apply_patch(synth: &Synth, patch: &Patch<'_>, timbre: usize) -> Result<()> {
    let links = patch.links();

    let link_universe = graphbuild::link_universe(links)?;
    let derived = graphbuild::build_graph(synth, links, &link_universe)?;
    let partition = scope::partition_scopes(synth, &derived.mod_predecessors)?;

    let no_controls = synth.control_universe().none();
    let no_modules = synth.module_universe().none();

    let timbre_scope = partition.pre | partition.post;

    let t_prep = prep::emit_prep(synth, &derived, links, derived.used_t, timbre_scope, Some(timbre_scope));
    let v_prep = prep::emit_prep(synth, &derived, links, derived.used_v, partition.voice, None);

    let pre_run = run::emit_run(
        synth,
        &derived,
        links,
        derived.used_t,
        partition.pre,
        no_modules,
        Some(timbre_scope),
    )?;
    let v_run = run::emit_run(
        synth,
        &derived,
        links,
        derived.used_v,
        partition.voice,
        partition.pre,
        None,
    )?;
    let post_run = run::emit_run(
        synth,
        &derived,
        links,
        no_controls,
        partition.post,
        partition.pre | partition.voice,
        Some(timbre_scope),
    )?;

    synth.plan_slot(timbre).publish(plan::Plan {
        t_prep,
        v_prep,
        pre_run,
        v_run,
        post_run,
    });

    Ok(())
}
