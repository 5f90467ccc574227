//! Links: directed edges between ports, the raw material of a [`Patch`](crate::patch::Patch).

use modsynth_core::Subset;

use crate::{
    ids::{ModuleId, PortId, PortOwner},
    synth::Synth,
};

/// A directed edge with four fields, semantically `dest += scale * (src ⊕ ctl)`,
/// where `⊕` is multiplication when both `src` and `ctl` are present,
/// identity when only one is present, and zero when neither is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// The input port this link feeds. Always present.
    pub dest: PortId,
    /// The output port this link reads from, if any.
    pub src: Option<PortId>,
    /// The modulating output port (a control's output, or a module's
    /// output) this link reads from, if any. Already resolved to a port:
    /// a bare [`ControlId`](crate::ids::ControlId) passed to
    /// [`Patch::connect`](crate::patch::Patch::connect) is rewritten to
    /// that control's single output port before a `Link` is constructed.
    pub ctl: Option<PortId>,
    /// Multiplier applied to the combined source; defaults to `1.0`.
    pub scale: f64,
}

impl Link {
    /// A link is simple iff it has a source, no control, matching
    /// src/dest value types, and unit scale — the shape eligible for
    /// zero-copy aliasing instead of a copy/add action.
    pub fn is_simple(&self, synth: &Synth) -> bool {
        let Some(src) = self.src else { return false };
        if self.ctl.is_some() {
            return false;
        }
        if self.scale != 1.0 {
            return false;
        }
        synth.port(src).value_type == synth.port(self.dest).value_type
    }

    /// Whether this link can be satisfied by a prep-time `Alias` rather
    /// than a run-time `Copy`/`Add`, and therefore must be skipped when
    /// the run planner walks a section sharing `same_scope_restriction`
    /// with the prep pass that covers `self.dest`'s module.
    ///
    /// `same_scope_restriction` mirrors [`emit_prep`](crate::prep::emit_prep)'s
    /// parameter of the same name: `Some(allowed)` in the timbre prep
    /// (a link only aliases if its source module is also timbre-scope),
    /// `None` in the voice prep (any simple link qualifies, including a
    /// cross-scope link from a pre-voice source). The run planner must
    /// apply the exact same predicate prep used, or the two passes can
    /// disagree about whether a given link was aliased.
    pub fn is_aliasable(&self, synth: &Synth, same_scope_restriction: Option<&Subset<'_, ModuleId>>) -> bool {
        if !self.is_simple(synth) {
            return false;
        }
        match self.src.map(|src| synth.port(src).owner) {
            Some(PortOwner::Module(src_module)) => match same_scope_restriction {
                Some(allowed) => allowed.contains(&src_module),
                None => true,
            },
            _ => false,
        }
    }
}
