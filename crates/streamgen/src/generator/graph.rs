use std::collections::{BTreeMap, BTreeSet, HashSet};

use indexmap::IndexMap;
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::generator::{
  errors::GenerationError,
  model::{CodeModel, EnumDef, ModelDef, PropertyDef},
};

/// A traversal-ready index over the models of one code-model document.
///
/// Models keep document order. Derived-model lists, composition dependencies and
/// composition cycles are computed once here and read by every later stage.
#[derive(Debug)]
pub(crate) struct SchemaGraph {
  models: IndexMap<String, ModelDef>,
  enums: IndexMap<String, EnumDef>,
  children: BTreeMap<String, Vec<String>>,
  dependencies: BTreeMap<String, BTreeSet<String>>,
  cycles: Vec<Vec<String>>,
  cycle_members: BTreeMap<String, usize>,
  xml_models: BTreeSet<String>,
}

impl SchemaGraph {
  pub(crate) fn new(code_model: &CodeModel) -> Self {
    let models: IndexMap<String, ModelDef> = code_model
      .models
      .iter()
      .map(|model| (model.name.clone(), model.clone()))
      .collect();

    let enums = code_model
      .enums
      .iter()
      .map(|definition| (definition.name.clone(), definition.clone()))
      .collect();

    let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for model in models.values() {
      if let Some(parent) = &model.parent
        && parent != &model.name
      {
        children.entry(parent.clone()).or_default().push(model.name.clone());
      }
    }

    let mut graph = Self {
      models,
      enums,
      children,
      dependencies: BTreeMap::new(),
      cycles: vec![],
      cycle_members: BTreeMap::new(),
      xml_models: BTreeSet::new(),
    };
    graph.build_dependencies();
    graph.detect_cycles();
    graph.collect_xml_models();
    graph
  }

  pub(crate) fn get(&self, name: &str) -> Option<&ModelDef> {
    self.models.get(name)
  }

  pub(crate) fn models(&self) -> impl Iterator<Item = &ModelDef> {
    self.models.values()
  }

  pub(crate) fn get_enum(&self, name: &str) -> Option<&EnumDef> {
    self.enums.get(name)
  }

  pub(crate) fn enums(&self) -> impl Iterator<Item = &EnumDef> {
    self.enums.values()
  }

  /// Direct children in document order.
  pub(crate) fn children(&self, name: &str) -> &[String] {
    self.children.get(name).map_or(&[], Vec::as_slice)
  }

  /// All transitive descendants, depth-first in document order.
  pub(crate) fn descendants(&self, name: &str) -> Vec<&ModelDef> {
    let mut result = vec![];
    let mut visited = HashSet::from([name.to_string()]);
    self.collect_descendants(name, &mut visited, &mut result);
    result
  }

  fn collect_descendants<'a>(&'a self, name: &str, visited: &mut HashSet<String>, result: &mut Vec<&'a ModelDef>) {
    for child in self.children(name) {
      if !visited.insert(child.clone()) {
        continue;
      }
      if let Some(model) = self.get(child) {
        result.push(model);
        self.collect_descendants(child, visited, result);
      }
    }
  }

  /// The parent chain of `name`, root-most first, excluding the model itself.
  pub(crate) fn ancestors(&self, name: &str) -> Result<Vec<&ModelDef>, GenerationError> {
    let mut chain = vec![];
    let mut visited = vec![name.to_string()];
    let mut current = self.get(name);

    while let Some(model) = current
      && let Some(parent_name) = &model.parent
    {
      if visited.contains(parent_name) {
        visited.push(parent_name.clone());
        return Err(GenerationError::SchemaCycle {
          model: name.to_string(),
          chain: visited,
        });
      }
      let parent = self.get(parent_name).ok_or_else(|| GenerationError::UnknownParent {
        model: model.name.clone(),
        parent: parent_name.clone(),
      })?;
      visited.push(parent_name.clone());
      chain.push(parent);
      current = Some(parent);
    }

    chain.reverse();
    Ok(chain)
  }

  /// Ancestors followed by the model itself.
  pub(crate) fn lineage(&self, name: &str) -> Result<Vec<&ModelDef>, GenerationError> {
    let mut chain = self.ancestors(name)?;
    if let Some(model) = self.get(name) {
      chain.push(model);
    }
    Ok(chain)
  }

  /// The discriminator in effect for `name`: its own, or the nearest ancestor's.
  pub(crate) fn discriminator_name(&self, name: &str) -> Option<&str> {
    let lineage = self.lineage(name).ok()?;
    lineage.iter().rev().find_map(|model| model.discriminator.as_deref())
  }

  /// A model with a discriminator in effect and at least one derived model.
  pub(crate) fn is_dispatch_root(&self, name: &str) -> bool {
    !self.children(name).is_empty() && self.discriminator_name(name).is_some()
  }

  pub(crate) fn uses_xml(&self, name: &str) -> bool {
    self.xml_models.contains(name)
  }

  pub(crate) fn is_merge_patch(&self, name: &str) -> bool {
    self.get(name).is_some_and(|model| model.merge_patch)
  }

  /// Whether `owner` and `target` sit on one composition cycle, so a direct field needs indirection.
  pub(crate) fn in_cycle_with(&self, owner: &str, target: &str) -> bool {
    match (self.cycle_members.get(owner), self.cycle_members.get(target)) {
      (Some(a), Some(b)) => a == b,
      _ => false,
    }
  }

  pub(crate) fn cycles(&self) -> &[Vec<String>] {
    &self.cycles
  }

  /// The models whose layout embeds `name`'s type when a property refers to it.
  fn embedded_models(&self, name: &str) -> Vec<String> {
    let mut embedded = vec![name.to_string()];
    if self.is_dispatch_root(name) {
      embedded.extend(self.descendants(name).into_iter().map(|model| model.name.clone()));
    }
    embedded
  }

  fn build_dependencies(&mut self) {
    let mut dependencies: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for model in self.models.values() {
      let entry = dependencies.entry(model.name.clone()).or_default();
      for property in self.effective_definitions(model) {
        for target in property.wire_type.referenced_models() {
          if self.models.contains_key(target) {
            entry.extend(self.embedded_models(target));
          }
        }
      }
    }
    self.dependencies = dependencies;
  }

  fn effective_definitions<'a>(&'a self, model: &'a ModelDef) -> Vec<&'a PropertyDef> {
    self
      .lineage(&model.name)
      .unwrap_or_default()
      .into_iter()
      .flat_map(|level| level.properties.iter())
      .collect()
  }

  fn detect_cycles(&mut self) {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &self.dependencies {
      graph.add_node(node.as_str());
      for dep in deps {
        graph.add_edge(node.as_str(), dep.as_str(), ());
      }
    }

    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut members: Vec<String> = scc.into_iter().map(String::from).collect();
        members.sort();
        members
      })
      .collect();
    cycles.sort();

    self.cycle_members = cycles
      .iter()
      .enumerate()
      .flat_map(|(index, members)| members.iter().map(move |member| (member.clone(), index)))
      .collect();
    self.cycles = cycles;
  }

  /// Models with an `xml` block, their hierarchies and everything they reach through properties.
  fn collect_xml_models(&mut self) {
    let mut pending: Vec<String> = self
      .models
      .values()
      .filter(|model| model.xml.is_some())
      .map(|model| model.name.clone())
      .collect();

    let mut xml_models = BTreeSet::new();
    while let Some(name) = pending.pop() {
      if !xml_models.insert(name.clone()) {
        continue;
      }
      if let Ok(lineage) = self.lineage(&name) {
        pending.extend(lineage.iter().map(|model| model.name.clone()));
      }
      pending.extend(self.descendants(&name).into_iter().map(|model| model.name.clone()));
      if let Some(dependencies) = self.dependencies.get(&name) {
        pending.extend(dependencies.iter().cloned());
      }
    }
    self.xml_models = xml_models;
  }
}
