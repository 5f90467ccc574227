//! The compiled plan, and the lock-free slot the audio thread reads it from.

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};

use crate::action::Action;

/// A compiled, ordered action sequence, immutable once emitted.
///
/// Exposes the five action sequences spec §6 names: two prep lists (run
/// once per voice/timbre activation) and three run lists (run every
/// audio block, in the order `pre_run`, then every voice's `v_run`, then
/// `post_run`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    /// Timbre-scope prep actions (`Eval`/`Clear`/`Alias` over `pre ∪ post`).
    pub t_prep: Vec<Action>,
    /// Voice-scope prep actions (`Eval`/`Clear`/`Alias` over `voice`).
    pub v_prep: Vec<Action>,
    /// Pre-voice run actions: controls in `used_t`, modules in `pre`, `done = ∅`.
    pub pre_run: Vec<Action>,
    /// Per-voice run actions: controls in `used_v`, modules in `voice`, `done = pre`.
    pub v_run: Vec<Action>,
    /// Post-voice run actions: modules in `post`, `done = pre ∪ voice`.
    pub post_run: Vec<Action>,
}

/// Holds the currently installed [`Plan`] for one timbre, swapped
/// atomically when a new patch is applied.
///
/// The control thread calls [`publish`](PlanSlot::publish) once a new
/// plan has been fully validated; the audio thread calls
/// [`load`](PlanSlot::load) once per block and holds the returned guard
/// for that block's duration. Because the old `Arc<Plan>` is simply
/// dropped once every reader has moved past it, reclamation falls out of
/// `Arc`'s refcount — no custom epoch scheme is needed at this scope.
#[derive(Debug)]
pub struct PlanSlot {
    current: ArcSwap<Plan>,
}

impl PlanSlot {
    /// A slot holding an empty plan (no modules declared, or no patch
    /// applied yet).
    pub fn empty() -> Self {
        Self {
            current: ArcSwap::from_pointee(Plan::default()),
        }
    }

    /// Load the currently installed plan.
    ///
    /// Lock-free: safe to call from the audio thread. The returned guard
    /// should be held for at most one audio block.
    #[inline]
    pub fn load(&self) -> Guard<Arc<Plan>> {
        self.current.load()
    }

    /// Atomically install a new plan, replacing whatever was there
    /// before. Readers that already hold a `load()` guard keep seeing the
    /// old plan until they release it; new `load()` calls see the new one.
    #[inline]
    pub fn publish(&self, plan: Plan) {
        self.current.store(Arc::new(plan));
    }
}
