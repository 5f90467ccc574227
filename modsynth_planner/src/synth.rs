//! Synth declaration: modules, controls, and ports, fixed at construction.

use modsynth_core::{Subset, Universe};

use crate::{
    error::{PlanError, Result},
    ids::{ControlId, ModuleId, PortId, PortOwner},
    plan::PlanSlot,
    port::{PortDirection, PortInfo},
    scope::DeclaredScope,
};

pub(crate) struct ModuleRecord {
    pub name: String,
    pub scope: DeclaredScope,
    pub ports: Vec<PortId>,
}

pub(crate) struct ControlRecord {
    pub name: String,
    pub scope: DeclaredScope,
    pub out_port: PortId,
}

/// A finalized synth: its modules, controls, and ports are fixed for the
/// life of the synth. Links (via [`Patch`](crate::patch::Patch)) and
/// plans (recomputed per [`apply_patch`](crate::apply_patch) call) may
/// still change; the declarations here never do.
pub struct Synth {
    pub(crate) modules: Universe<ModuleId>,
    pub(crate) controls: Universe<ControlId>,
    pub(crate) ports: Universe<PortId>,

    pub(crate) module_records: Vec<ModuleRecord>,
    pub(crate) control_records: Vec<ControlRecord>,
    pub(crate) port_records: Vec<PortInfo>,

    pub(crate) outputs: Vec<ModuleId>,
    pub(crate) polyphony: usize,
    pub(crate) timbrality: usize,
    pub(crate) plan_slots: Vec<PlanSlot>,
}

impl Synth {
    /// The full universe of declared modules (both timbre and voice scope).
    #[inline]
    pub fn module_universe(&self) -> &Universe<ModuleId> {
        &self.modules
    }

    /// The full universe of declared controls.
    #[inline]
    pub fn control_universe(&self) -> &Universe<ControlId> {
        &self.controls
    }

    /// The full universe of declared ports, across every module and control.
    #[inline]
    pub fn port_universe(&self) -> &Universe<PortId> {
        &self.ports
    }

    /// Number of voices this synth was finalized with.
    #[inline]
    pub fn polyphony(&self) -> usize {
        self.polyphony
    }

    /// Number of independently patchable timbres this synth was finalized with.
    #[inline]
    pub fn timbrality(&self) -> usize {
        self.timbrality
    }

    pub(crate) fn module(&self, id: ModuleId) -> &ModuleRecord {
        &self.module_records[id.0]
    }

    pub(crate) fn control(&self, id: ControlId) -> &ControlRecord {
        &self.control_records[id.0]
    }

    /// Metadata for a declared port.
    pub fn port(&self, id: PortId) -> &PortInfo {
        &self.port_records[id.0]
    }

    /// The output port of a control (a degenerate module with exactly one
    /// output and no inputs).
    pub fn control_output(&self, id: ControlId) -> PortId {
        self.control(id).out_port
    }

    /// The input ports declared on a module, in declaration order.
    pub fn module_inputs(&self, id: ModuleId) -> impl Iterator<Item = PortId> + '_ {
        self.module(id)
            .ports
            .iter()
            .copied()
            .filter(move |p| self.port(*p).direction == PortDirection::In)
    }

    /// The output ports declared on a module, in declaration order.
    pub fn module_outputs(&self, id: ModuleId) -> impl Iterator<Item = PortId> + '_ {
        self.module(id)
            .ports
            .iter()
            .copied()
            .filter(move |p| self.port(*p).direction == PortDirection::Out)
    }

    /// The `index`-th input port declared on `module`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `module`'s declared inputs.
    pub fn input_port(&self, module: ModuleId, index: usize) -> PortId {
        self.module_inputs(module).nth(index).expect("input port index out of range")
    }

    /// The `index`-th output port declared on `module`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `module`'s declared outputs.
    pub fn output_port(&self, module: ModuleId, index: usize) -> PortId {
        self.module_outputs(module).nth(index).expect("output port index out of range")
    }

    /// The subset of modules declared in timbre scope (`all_t`).
    pub fn all_timbre_modules(&self) -> Subset<'_, ModuleId> {
        self.modules
            .subset(self.module_records.iter().enumerate().filter_map(|(i, m)| {
                (m.scope == DeclaredScope::Timbre).then_some(ModuleId(i))
            }))
    }

    /// The subset of modules declared in voice scope (`all_v`).
    pub fn all_voice_modules(&self) -> Subset<'_, ModuleId> {
        self.modules
            .subset(self.module_records.iter().enumerate().filter_map(|(i, m)| {
                (m.scope == DeclaredScope::Voice).then_some(ModuleId(i))
            }))
    }

    /// The subset of modules declared as synth outputs.
    pub fn output_modules(&self) -> Subset<'_, ModuleId> {
        self.modules.subset(self.outputs.iter().copied())
    }

    /// The declared scope of a module.
    pub fn module_scope(&self, id: ModuleId) -> DeclaredScope {
        self.module(id).scope
    }

    /// The declared scope of a control.
    pub fn control_scope(&self, id: ControlId) -> DeclaredScope {
        self.control(id).scope
    }

    /// The plan slot for the given timbre index.
    ///
    /// # Panics
    ///
    /// Panics if `timbre >= self.timbrality()`.
    pub fn plan_slot(&self, timbre: usize) -> &PlanSlot {
        &self.plan_slots[timbre]
    }
}

/// Accumulates module, control, and output declarations, then freezes
/// them into a [`Synth`] via [`finalize`](SynthBuilder::finalize).
///
/// Mirrors the "builder validates as it goes, then yields an immutable
/// configured object" pattern used throughout this workspace's graph
/// builders: every `add_*`/`mark_output` call is checked immediately,
/// rather than deferring validation to `finalize`.
#[derive(Default)]
pub struct SynthBuilder {
    module_records: Vec<ModuleRecord>,
    control_records: Vec<ControlRecord>,
    port_records: Vec<PortInfo>,
    outputs: Vec<ModuleId>,
}

impl SynthBuilder {
    /// Create an empty `SynthBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    fn add_module(&mut self, name: &str, scope: DeclaredScope, inputs: &[&str], outputs: &[&str]) -> ModuleId {
        let module_id = ModuleId(self.module_records.len());
        let mut ports = Vec::with_capacity(inputs.len() + outputs.len());

        for &input_name in inputs {
            let port_id = PortId(self.port_records.len());
            self.port_records
                .push(PortInfo::new(input_name, PortDirection::In, PortOwner::Module(module_id)));
            ports.push(port_id);
        }
        for &output_name in outputs {
            let port_id = PortId(self.port_records.len());
            self.port_records
                .push(PortInfo::new(output_name, PortDirection::Out, PortOwner::Module(module_id)));
            ports.push(port_id);
        }

        self.module_records.push(ModuleRecord {
            name: name.to_string(),
            scope,
            ports,
        });
        module_id
    }

    /// Declare a timbre-scope module with the given input and output port
    /// names.
    pub fn add_timbre_module(&mut self, name: &str, inputs: &[&str], outputs: &[&str]) -> Result<ModuleId> {
        Ok(self.add_module(name, DeclaredScope::Timbre, inputs, outputs))
    }

    /// Declare a voice-scope module with the given input and output port
    /// names.
    pub fn add_voice_module(&mut self, name: &str, inputs: &[&str], outputs: &[&str]) -> Result<ModuleId> {
        Ok(self.add_module(name, DeclaredScope::Voice, inputs, outputs))
    }

    fn add_control(&mut self, name: &str, scope: DeclaredScope) -> ControlId {
        let control_id = ControlId(self.control_records.len());
        let port_id = PortId(self.port_records.len());
        self.port_records
            .push(PortInfo::new("out", PortDirection::Out, PortOwner::Control(control_id)));
        self.control_records.push(ControlRecord {
            name: name.to_string(),
            scope,
            out_port: port_id,
        });
        control_id
    }

    /// Declare a timbre-scope control (e.g. a modulation wheel).
    pub fn add_timbre_control(&mut self, name: &str) -> ControlId {
        self.add_control(name, DeclaredScope::Timbre)
    }

    /// Declare a voice-scope control (e.g. per-voice MIDI pitch).
    pub fn add_voice_control(&mut self, name: &str) -> ControlId {
        self.add_control(name, DeclaredScope::Voice)
    }

    /// Mark a module as a synth output.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidGraph`] if `module` is not a
    /// timbre-scope module (output modules must be a subset of timbre
    /// modules).
    pub fn mark_output(&mut self, module: ModuleId) -> Result<()> {
        let record = self
            .module_records
            .get(module.0)
            .ok_or_else(|| PlanError::InvalidGraph(format!("module #{}", module.0)))?;
        if record.scope != DeclaredScope::Timbre {
            return Err(PlanError::InvalidGraph(format!(
                "module `{}` cannot be an output: it is not timbre-scope",
                record.name
            )));
        }
        if !self.outputs.contains(&module) {
            self.outputs.push(module);
        }
        Ok(())
    }

    /// Freeze the accumulated declarations into a [`Synth`], fixing every
    /// universe and pre-allocating one [`PlanSlot`] per timbre.
    pub fn finalize(self, polyphony: usize, timbrality: usize) -> Result<Synth> {
        let module_ids: Vec<ModuleId> = (0..self.module_records.len()).map(ModuleId).collect();
        let control_ids: Vec<ControlId> = (0..self.control_records.len()).map(ControlId).collect();
        let port_ids: Vec<PortId> = (0..self.port_records.len()).map(PortId).collect();

        let modules = Universe::new(module_ids).map_err(|e| PlanError::InvalidGraph(e.to_string()))?;
        let controls = Universe::new(control_ids).map_err(|e| PlanError::InvalidGraph(e.to_string()))?;
        let ports = Universe::new(port_ids).map_err(|e| PlanError::InvalidGraph(e.to_string()))?;

        let plan_slots = (0..timbrality).map(|_| PlanSlot::empty()).collect();

        Ok(Synth {
            modules,
            controls,
            ports,
            module_records: self.module_records,
            control_records: self.control_records,
            port_records: self.port_records,
            outputs: self.outputs,
            polyphony,
            timbrality,
            plan_slots,
        })
    }
}
