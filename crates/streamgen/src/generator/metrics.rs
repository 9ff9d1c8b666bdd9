use crate::generator::{graph::SchemaGraph, properties::PropertiesManager};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub models_generated: usize,
  pub structs_generated: usize,
  pub dispatch_enums_generated: usize,
  pub string_enums_generated: usize,
  pub xml_models: usize,
  pub merge_patch_models: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
}

impl GenerationStats {
  pub(crate) fn record_model(&mut self, manager: &PropertiesManager) {
    self.models_generated += 1;
    self.structs_generated += 1;
    if manager.is_dispatch_root() {
      self.dispatch_enums_generated += 1;
    }
    if manager.xml.is_some() {
      self.xml_models += 1;
    }
    if manager.merge_patch {
      self.merge_patch_models += 1;
    }
  }

  pub(crate) fn record_models<'a>(&mut self, managers: impl IntoIterator<Item = &'a PropertiesManager>) {
    for manager in managers {
      self.record_model(manager);
    }
  }

  pub(crate) fn record_enums(&mut self, graph: &SchemaGraph) {
    self.string_enums_generated += graph.enums().count();
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub(crate) fn record_cycles(&mut self, graph: &SchemaGraph) {
    for cycle in graph.cycles() {
      self.record_cycle(cycle.clone());
    }
  }

  /// Types emitted: one struct per model, one enum per dispatch root and one per string enum.
  #[must_use]
  pub fn types_generated(&self) -> usize {
    self.structs_generated + self.dispatch_enums_generated + self.string_enums_generated
  }
}
