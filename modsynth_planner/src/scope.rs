//! Declared module/control scope, and the reachability-based scope partitioner.

use modsynth_core::{Relation, Subset};

use crate::{
    error::{PlanError, Result},
    ids::ModuleId,
    synth::Synth,
};

/// The scope a module or control is declared into at synth construction.
///
/// `Timbre` modules may end up rendered before (`pre`) or after (`post`)
/// the voices of their timbre, as computed by [`partition_scopes`];
/// `Voice` modules always render once per active voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredScope {
    /// Rendered once per timbre activation, before or after its voices.
    Timbre,
    /// Rendered once per voice.
    Voice,
}

/// The result of partitioning a synth's timbre modules into pre-voice and
/// post-voice subsets, and identifying which voice modules are reachable
/// from the timbre's declared outputs.
pub struct ScopePartition<'u> {
    /// Timbre-scope modules that must render before any voice.
    pub pre: Subset<'u, ModuleId>,
    /// Voice-scope modules reachable from the declared outputs.
    pub voice: Subset<'u, ModuleId>,
    /// Timbre-scope modules that must render after every voice.
    pub post: Subset<'u, ModuleId>,
}

/// Computes `predecessors*(seed) ∩ candidates`: the least fixpoint of
/// direct-predecessor expansion starting from `seed`'s direct
/// predecessors, restricted at every step to `candidates`.
fn predecessors_star<'u>(
    mod_predecessors: &Relation<'_, 'u, ModuleId, ModuleId>,
    seed: &Subset<'u, ModuleId>,
    candidates: &Subset<'u, ModuleId>,
) -> Subset<'u, ModuleId> {
    let universe = seed.universe();
    let mut collected = universe.none();
    let mut frontier = *seed;

    loop {
        let mut direct = universe.none();
        for m in frontier.iter_members() {
            direct = direct | *mod_predecessors.get(m);
        }
        direct = direct & *candidates;

        let grown = collected | direct;
        if grown == collected {
            return collected;
        }
        frontier = direct - collected;
        collected = grown;
    }
}

/// Partitions a synth's modules into pre-voice, voice, and post-voice
/// subsets, reachable backwards from the declared `outputs`.
///
/// # Errors
///
/// Returns [`PlanError::ScopeViolation`] if the link graph crosses scopes
/// in a forbidden direction — a voice module feeding a pre-voice
/// module's input, or a post-voice module feeding a voice module's input
/// — or if the computed subsets fail the disjointness/subset invariants
/// those forbidden edges would otherwise corrupt.
pub fn partition_scopes<'u>(
    synth: &'u Synth,
    mod_predecessors: &Relation<'_, 'u, ModuleId, ModuleId>,
) -> Result<ScopePartition<'u>> {
    let all_t = synth.all_timbre_modules();
    let all_v = synth.all_voice_modules();
    let outputs = synth.output_modules();

    let post = outputs | (predecessors_star(mod_predecessors, &outputs, &all_t) & all_t);
    let voice = predecessors_star(mod_predecessors, &post, &all_v) & all_v;
    let pre = predecessors_star(mod_predecessors, &voice, &all_t) & all_t;

    for p in pre.iter_members() {
        if !(*mod_predecessors.get(p) & voice).is_empty() {
            return Err(PlanError::ScopeViolation(
                synth.module(*p).name.clone(),
                "voice module feeding it directly (voice → pre-voice is forbidden)".into(),
            ));
        }
    }
    for v in voice.iter_members() {
        if !(*mod_predecessors.get(v) & post).is_empty() {
            return Err(PlanError::ScopeViolation(
                synth.module(*v).name.clone(),
                "post-voice module feeding it directly (post-voice → voice is forbidden)".into(),
            ));
        }
    }

    if !(pre & post).is_empty() {
        return Err(PlanError::ScopeViolation(
            "pre-voice module".into(),
            "post-voice module reachable from the same voice".into(),
        ));
    }
    if !((pre | post) <= all_t) {
        return Err(PlanError::ScopeViolation("timbre partition".into(), "all_t".into()));
    }
    if !(voice <= all_v) {
        return Err(PlanError::ScopeViolation("voice partition".into(), "all_v".into()));
    }

    Ok(ScopePartition { pre, voice, post })
}
