//! Patches: builder-validated link lists applied to a [`Synth`].

use crate::{
    error::{PlanError, Result},
    ids::{ControlId, PortId},
    link::Link,
    port::PortDirection,
    synth::Synth,
};

/// A `ctl` argument to [`Patch::connect`]: either a module's output port
/// directly, or a control, which is rewritten to that control's single
/// output port before the link is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CtlSource {
    /// A module's output port, used directly.
    Port(PortId),
    /// A control; resolved to [`Synth::control_output`] at `connect` time.
    Control(ControlId),
}

/// An accumulating set of links for one synth, validated link-by-link.
///
/// Built via [`make_patch`]; each [`connect`](Patch::connect) call either
/// extends the patch or rejects the link immediately, so an
/// [`apply_patch`](crate::apply_patch) call only ever has to re-validate
/// cross-link graph properties (cycles, scope crossings), not per-link
/// port shapes.
pub struct Patch<'s> {
    synth: &'s Synth,
    links: Vec<Link>,
}

impl<'s> Patch<'s> {
    /// Add one link to the patch.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidGraph`] if `dest` is not a declared
    /// input port, `src` (when given) is not a declared output port, or
    /// `ctl` (when given) does not resolve to a declared output port.
    pub fn connect(mut self, dest: PortId, src: Option<PortId>, ctl: Option<CtlSource>, scale: f64) -> Result<Self> {
        let dest_info = self
            .synth
            .port_universe()
            .find(&dest)
            .map(|_| self.synth.port(dest))
            .ok_or_else(|| PlanError::InvalidGraph(format!("dest port #{}", dest.0)))?;
        if dest_info.direction != PortDirection::In {
            return Err(PlanError::InvalidGraph(format!(
                "dest port `{}` is not an input",
                dest_info.name
            )));
        }

        if let Some(src) = src {
            let src_info = self
                .synth
                .port_universe()
                .find(&src)
                .map(|_| self.synth.port(src))
                .ok_or_else(|| PlanError::InvalidGraph(format!("src port #{}", src.0)))?;
            if src_info.direction != PortDirection::Out {
                return Err(PlanError::InvalidGraph(format!(
                    "src port `{}` is not an output",
                    src_info.name
                )));
            }
        }

        let ctl = match ctl {
            Some(CtlSource::Port(port)) => {
                let port_info = self
                    .synth
                    .port_universe()
                    .find(&port)
                    .map(|_| self.synth.port(port))
                    .ok_or_else(|| PlanError::InvalidGraph(format!("ctl port #{}", port.0)))?;
                if port_info.direction != PortDirection::Out {
                    return Err(PlanError::InvalidGraph(format!(
                        "ctl port `{}` is not an output",
                        port_info.name
                    )));
                }
                Some(port)
            }
            Some(CtlSource::Control(control)) => {
                self.synth
                    .control_universe()
                    .find(&control)
                    .ok_or_else(|| PlanError::InvalidGraph(format!("control #{}", control.0)))?;
                Some(self.synth.control_output(control))
            }
            None => None,
        };

        self.links.push(Link { dest, src, ctl, scale });
        Ok(self)
    }

    /// The links accumulated so far, in connection order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The synth this patch was built against.
    pub fn synth(&self) -> &'s Synth {
        self.synth
    }
}

/// Begin an empty patch against `synth`.
pub fn make_patch(synth: &Synth) -> Patch<'_> {
    Patch {
        synth,
        links: Vec::new(),
    }
}
