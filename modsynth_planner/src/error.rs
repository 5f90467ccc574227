//! Error types for `modsynth_planner`.
//!
//! All errors are planner-time: by contract the emitted [`Plan`](crate::plan::Plan)
//! can never fail at render time (spec: execution errors are handled by
//! modules saturating or zero-filling, not by signaling). Every variant
//! carries the offending entity so callers can produce useful diagnostics.

/// Result type alias for `modsynth_planner` operations.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors raised while finalizing a synth or planning a patch.
///
/// The source taxonomy also names an `UnboundControl` kind ("a control is
/// reached by a link's `ctl` but is not declared in any scope"). This
/// crate has no variant for it: every `ControlId` carries its
/// [`DeclaredScope`](crate::scope::DeclaredScope) as part of its record
/// from the moment it is created by `add_timbre_control`/
/// `add_voice_control`, so a declared-but-unscoped control cannot be
/// constructed in the first place — `Synth::control_scope` is a total
/// function over `{Timbre, Voice}`, not a partial one that can come up
/// empty. A control reached by `ctl` that was never declared at all
/// (e.g. a hand-built `ControlId` not returned by either `add_*_control`
/// call) is caught earlier, at `Patch::connect` time, as `InvalidGraph`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// A link's `dest`, `src`, or `ctl` references a port or control that
    /// was never declared in the synth.
    #[error("link references an undeclared entity (`{0}`)")]
    InvalidGraph(String),

    /// A link crosses scopes in a forbidden direction (voice → pre-voice
    /// or post-voice → voice).
    #[error("link from `{0}` to `{1}` crosses scopes in a forbidden direction")]
    ScopeViolation(String, String),

    /// The module-predecessor graph has a cycle; render order cannot be
    /// determined. Carries one module on the cycle for diagnostics.
    #[error("graph contains a cycle (stuck at module `{0}`)")]
    Cycle(String),
}
