//! Ports: named, typed endpoints on a module or control.

use crate::ids::PortOwner;

/// The direction of a port: data flows in, or data flows out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// An input port; the destination end of a link.
    In,
    /// An output port; the source or modulator end of a link.
    Out,
}

/// The scalar value type carried by a port.
///
/// Only used to validate that a [simple link](crate::link::Link::is_simple)'s
/// source and destination agree; the planner never inspects sample data
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A single audio-rate or control-rate scalar sample.
    Scalar,
}

/// A named endpoint on a module or control.
///
/// Ports exist only as members of a module or control; a `PortInfo` is
/// never constructed free-standing. Declaration-time identity is the
/// dense [`PortId`](crate::ids::PortId) the owning [`Synth`](crate::synth::Synth)
/// assigns it, replacing the source's reliance on reference equality.
#[derive(Debug, Clone, PartialEq)]
pub struct PortInfo {
    /// Human-readable name, unique within the owning module or control.
    pub name: String,
    /// Input or output.
    pub direction: PortDirection,
    /// Value type carried by this port.
    pub value_type: ValueType,
    /// The module or control this port belongs to.
    pub owner: PortOwner,
}

impl PortInfo {
    pub(crate) fn new(name: impl Into<String>, direction: PortDirection, owner: PortOwner) -> Self {
        Self {
            name: name.into(),
            direction,
            value_type: ValueType::Scalar,
            owner,
        }
    }
}
