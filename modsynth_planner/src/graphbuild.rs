//! Derives the planner's working relations from a patch's link list.

use modsynth_core::{Relation, Subset, Universe};

use crate::{
    error::{PlanError, Result},
    ids::{ControlId, LinkId, ModuleId, PortId, PortOwner},
    link::Link,
    scope::DeclaredScope,
    synth::Synth,
};

/// Everything the prep and run planners need, derived once per
/// [`apply_patch`](crate::apply_patch) call from a synth and its patch's
/// link list.
///
/// Borrows the synth (`'s`) and a link universe the caller builds and
/// keeps alive for the duration of planning (`'lu`); keeping the universe
/// in the caller's frame instead of inside this struct avoids a
/// self-referential `Relation` borrowing from a `Universe` it would
/// otherwise have to own alongside it.
pub struct DerivedGraph<'s, 'lu> {
    /// `Modules → Modules`: `(dest.owner, src.owner)` and
    /// `(dest.owner, ctl.owner)` when `ctl`'s owner is a module.
    pub mod_predecessors: Relation<'s, 's, ModuleId, ModuleId>,
    /// `Ports → Ports`: `(dest, src)` and `(dest, ctl)` when present.
    pub port_sources: Relation<'s, 's, PortId, PortId>,
    /// `Ports → Links`: every link indexed by its destination port.
    pub links_to: Relation<'s, 'lu, PortId, LinkId>,
    /// Controls reached by a timbre-scope link's `ctl`.
    pub used_t: Subset<'s, ControlId>,
    /// Controls reached by a voice-scope link's `ctl`.
    pub used_v: Subset<'s, ControlId>,
}

/// Build the `LinkId` universe for `links`, one member per link in patch order.
pub fn link_universe(links: &[Link]) -> Result<Universe<LinkId>> {
    let link_ids: Vec<LinkId> = (0..links.len()).map(LinkId).collect();
    Universe::new(link_ids).map_err(|e| PlanError::InvalidGraph(e.to_string()))
}

/// Build the derived relations and used-control sets for `links`.
///
/// # Errors
///
/// - [`PlanError::InvalidGraph`] if a link references a port whose owner
///   is not declared in `synth`, or whose destination belongs to a
///   control rather than a module.
///
/// Every control's scope is resolved via `synth.control_scope`, a total
/// function over `{Timbre, Voice}` (see [`PlanError`]'s doc comment for
/// why that rules out an unbound-control case here).
pub fn build_graph<'s, 'lu>(
    synth: &'s Synth,
    links: &[Link],
    link_universe: &'lu Universe<LinkId>,
) -> Result<DerivedGraph<'s, 'lu>> {
    for link in links {
        if synth.port_universe().find(&link.dest).is_none() {
            return Err(PlanError::InvalidGraph(format!("dest port #{}", link.dest.0)));
        }
        if let Some(src) = link.src {
            if synth.port_universe().find(&src).is_none() {
                return Err(PlanError::InvalidGraph(format!("src port #{}", src.0)));
            }
        }
        if let Some(ctl) = link.ctl {
            if synth.port_universe().find(&ctl).is_none() {
                return Err(PlanError::InvalidGraph(format!("ctl port #{}", ctl.0)));
            }
        }
    }

    let mut mod_predecessors = Relation::new(synth.module_universe(), synth.module_universe());
    let mut port_sources = Relation::new(synth.port_universe(), synth.port_universe());
    let mut links_to = Relation::new(synth.port_universe(), link_universe);

    let mut used_t = synth.control_universe().none();
    let mut used_v = synth.control_universe().none();

    let owner_of = |port: PortId| -> PortOwner { synth.port(port).owner };

    for (idx, link) in links.iter().enumerate() {
        let link_id = LinkId(idx);
        let dest_owner = owner_of(link.dest);
        let dest_module = match dest_owner {
            PortOwner::Module(m) => m,
            PortOwner::Control(_) => {
                return Err(PlanError::InvalidGraph(format!(
                    "link dest port #{} belongs to a control, not a module",
                    link.dest.0
                )));
            }
        };

        if let Some(src) = link.src {
            if let PortOwner::Module(src_module) = owner_of(src) {
                mod_predecessors.add(&dest_module, &src_module);
            }
            port_sources.add(&link.dest, &src);
        }

        if let Some(ctl) = link.ctl {
            match owner_of(ctl) {
                PortOwner::Module(ctl_module) => {
                    mod_predecessors.add(&dest_module, &ctl_module);
                }
                PortOwner::Control(control_id) => match synth.control_scope(control_id) {
                    DeclaredScope::Timbre => used_t.add(&control_id),
                    DeclaredScope::Voice => used_v.add(&control_id),
                },
            }
            port_sources.add(&link.dest, &ctl);
        }

        links_to.add(&link.dest, &link_id);
    }

    Ok(DerivedGraph {
        mod_predecessors,
        port_sources,
        links_to,
        used_t,
        used_v,
    })
}
