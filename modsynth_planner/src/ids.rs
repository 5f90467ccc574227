//! Stable small-integer identifiers assigned by the planner's universes.
//!
//! Dynamic ownership tracking keyed by object identity is replaced here
//! with dense indices: every module, control, port, and link gets a
//! stable `*Id` at declaration time, and the emitted plan refers to these
//! exclusively. At execution time they are direct array offsets.

/// Identifies a module declared on a [`Synth`](crate::synth::Synth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub usize);

/// Identifies a control declared on a [`Synth`](crate::synth::Synth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

/// Identifies a port declared on some module or control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub usize);

/// Identifies a link added to a [`Patch`](crate::patch::Patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

/// The owner of a port: a module or a control.
///
/// Modeled as a tagged variant rather than leaving the planner to
/// inspect runtime type — every port stores its owner as this enum, and
/// the planner branches on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortOwner {
    /// The port belongs to a DSP module.
    Module(ModuleId),
    /// The port belongs to a control (structurally a single-output module).
    Control(ControlId),
}
