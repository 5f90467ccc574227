//! The plan's primitive instructions.

use crate::ids::{ControlId, LinkId, ModuleId, PortId};

/// A primitive instruction in a [`Plan`](crate::plan::Plan).
///
/// All indices are resolved via the synth's universes at plan-emission
/// time; at execution, they are direct array offsets into buffer and
/// module tables the execution collaborator owns — this crate never
/// allocates or mutates sample data itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Compute a control's current value into its output buffer.
    Eval(ControlId),

    /// Fill a port's buffer with a constant value.
    ///
    /// The value is always zero today; the field is kept (per spec) for
    /// a future constant-bias input, rather than hard-coding zero into
    /// the action's meaning.
    Clear(PortId, f64),

    /// Make `dest`'s buffer pointer equal `src`'s, zero-copy.
    ///
    /// `src = None` breaks a previously established alias and restores a
    /// private buffer for `dest`.
    Alias(PortId, Option<PortId>),

    /// `dest = scale * src * ctl` (treating a missing operand as `1`).
    /// This is the first contribution to `dest` in its enclosing scope.
    Copy(PortId, Option<PortId>, Option<PortId>, LinkId),

    /// `dest += scale * src * ctl` (treating a missing operand as `1`).
    /// A later contribution to a `dest` already written this block by a
    /// `Copy` or an earlier `Add`.
    Add(PortId, Option<PortId>, Option<PortId>, LinkId),

    /// Invoke a module's per-block DSP function.
    Render(ModuleId),
}
