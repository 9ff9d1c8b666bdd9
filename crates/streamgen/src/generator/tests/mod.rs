//! Helpers shared by the generator's unit tests.


use serde_json::{Value, json};

use crate::generator::{
  config::GeneratorConfig,
  graph::SchemaGraph,
  model::CodeModel,
  properties::{PropertiesManager, classify},
};

/// Builds a code-model document around `models`.
pub(crate) fn code_model(models: Value) -> CodeModel {
  code_model_with_enums(models, json!([]))
}

pub(crate) fn code_model_with_enums(models: Value, enums: Value) -> CodeModel {
  serde_json::from_value(json!({
    "name": "Test Models",
    "version": "1.0.0",
    "models": models,
    "enums": enums,
  }))
  .unwrap()
}

pub(crate) fn graph(models: Value) -> SchemaGraph {
  SchemaGraph::new(&code_model(models))
}

pub(crate) fn graph_with_enums(models: Value, enums: Value) -> SchemaGraph {
  SchemaGraph::new(&code_model_with_enums(models, enums))
}

/// An expandable `DogKind` and a fixed `SnakeKind`.
pub(crate) fn kind_enums() -> Value {
  json!([
    {"name": "DogKind", "expandable": true, "values": [{"value": "golden"}]},
    {"name": "SnakeKind", "values": [{"name": "Cobra", "value": "cobra"}]}
  ])
}

pub(crate) fn classify_model(models: Value, name: &str) -> PropertiesManager {
  classify(&graph(models), &GeneratorConfig::default(), name).unwrap()
}

/// The Fish, Shark and Sawshark hierarchy: `fishtype` at the root, `sharktype` from Shark down.
pub(crate) fn fish_models() -> Value {
  json!([
    {
      "name": "Fish",
      "serializedName": "fish",
      "discriminator": "fishtype",
      "properties": [
        {"name": "fishtype", "type": "string", "required": true},
        {"name": "length", "type": "float64", "required": true},
        {"name": "species", "type": "string"}
      ]
    },
    {
      "name": "Salmon",
      "serializedName": "salmon",
      "parent": "Fish",
      "properties": [
        {"name": "location", "type": "string"},
        {"name": "iswild", "type": "boolean"}
      ]
    },
    {
      "name": "Shark",
      "serializedName": "shark",
      "parent": "Fish",
      "discriminator": "sharktype",
      "properties": [
        {"name": "sharktype", "type": "string", "required": true},
        {"name": "age", "type": "int32"},
        {"name": "birthday", "type": "date-time", "required": true}
      ]
    },
    {
      "name": "Sawshark",
      "serializedName": "sawshark",
      "parent": "Shark",
      "properties": [
        {"name": "picture", "type": "bytes"}
      ]
    }
  ])
}
