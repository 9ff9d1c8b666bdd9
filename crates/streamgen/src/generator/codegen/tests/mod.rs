use std::collections::BTreeMap;

use serde_json::Value;

use crate::generator::{
  codegen::{self, CodegenContext},
  config::{GeneratorConfig, Visibility},
  graph::SchemaGraph,
  properties::{PropertiesManager, classify},
  tests::{graph, graph_with_enums},
};

mod json_tests;

/// Generated tokens with all whitespace removed, so assertions do not depend on token spacing.
pub(super) struct Generated(String);

impl Generated {
  #[track_caller]
  pub(super) fn assert_contains(&self, snippet: &str) {
    let snippet = compact(snippet);
    assert!(self.0.contains(&snippet), "missing `{snippet}` in:\n{}", self.0);
  }

  #[track_caller]
  pub(super) fn assert_not_contains(&self, snippet: &str) {
    let snippet = compact(snippet);
    assert!(!self.0.contains(&snippet), "unexpected `{snippet}` in:\n{}", self.0);
  }

  pub(super) fn position(&self, snippet: &str) -> usize {
    self.0.find(&compact(snippet)).unwrap_or(usize::MAX)
  }
}

fn compact(code: &str) -> String {
  code.split_whitespace().collect()
}

fn managers(graph: &SchemaGraph, config: &GeneratorConfig) -> BTreeMap<String, PropertiesManager> {
  graph
    .models()
    .map(|model| (model.name.clone(), classify(graph, config, &model.name).unwrap()))
    .collect()
}

pub(super) fn generate_with(models: Value, config: &GeneratorConfig) -> Generated {
  generate_graph(&graph(models), config)
}

pub(super) fn generate_with_enums(models: Value, enums: Value) -> Generated {
  generate_graph(&graph_with_enums(models, enums), &GeneratorConfig::default())
}

fn generate_graph(graph: &SchemaGraph, config: &GeneratorConfig) -> Generated {
  let managers = managers(graph, config);
  let support: syn::Path = syn::parse_str(&config.support_crate).unwrap();
  let context = CodegenContext::new(graph, &managers, config.visibility, support);
  let tokens = codegen::generate(&context);
  syn::parse2::<syn::File>(tokens.clone()).expect("generated code parses");
  Generated(compact(&tokens.to_string()))
}

pub(super) fn generate(models: Value) -> Generated {
  generate_with(models, &GeneratorConfig::default())
}

pub(super) fn crate_visibility() -> GeneratorConfig {
  GeneratorConfig::builder().visibility(Visibility::Crate).build()
}
