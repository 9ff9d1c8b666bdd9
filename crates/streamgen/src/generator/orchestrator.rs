//! Orchestration for the code-model to Rust serialization pipeline.
//!
//! The [`Orchestrator`] owns one loaded [`CodeModel`] and one [`GeneratorConfig`] and runs the
//! whole pass: graph construction, property classification for every model, token emission and
//! formatting. Classification faults are collected across all models and returned together as
//! [`GenerationErrors`]; no source is produced while any model fails.
//!
//! ## Usage
//!
//! ```no_run
//! use streamgen::generator::{config::GeneratorConfig, model::CodeModel, orchestrator::Orchestrator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let json = std::fs::read_to_string("models.json")?;
//! let code_model: CodeModel = serde_json::from_str(&json)?;
//!
//! let orchestrator = Orchestrator::new(code_model, GeneratorConfig::default());
//! let (code, stats) = orchestrator.generate_with_header("models.json")?;
//!
//! println!("Generated {} types", stats.types_generated());
//! std::fs::write("models.rs", code)?;
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::generator::{
  ast::StructToken,
  codegen::{self, CodegenContext},
  config::GeneratorConfig,
  errors::{GenerationError, GenerationErrors},
  graph::SchemaGraph,
  metrics::GenerationStats,
  model::CodeModel,
  properties::{PropertiesManager, classify},
};

const LINT_ALLOWANCES: &str = "#![allow(unused_imports, unused_mut, clippy::large_enum_variant, clippy::too_many_arguments, clippy::needless_borrow)]";

pub struct Orchestrator {
  code_model: CodeModel,
  config: GeneratorConfig,
}

/// Metadata about the code-model document for the file header.
#[derive(Debug, Clone)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

impl Orchestrator {
  #[must_use]
  pub fn new(code_model: CodeModel, config: GeneratorConfig) -> Self {
    Self { code_model, config }
  }

  #[must_use]
  pub fn metadata(&self) -> CodeMetadata {
    CodeMetadata {
      title: self.code_model.name.clone(),
      version: self.code_model.version.clone(),
      description: self.code_model.description.clone(),
    }
  }

  /// Generates the formatted model file without a header.
  ///
  /// # Errors
  ///
  /// Returns [`GenerationErrors`] when any model fails classification, or an error when the
  /// emitted tokens do not parse or the support crate path is invalid.
  pub fn generate(&self) -> anyhow::Result<(String, GenerationStats)> {
    let graph = SchemaGraph::new(&self.code_model);
    let managers = self.classify_all(&graph)?;

    let support: syn::Path = syn::parse_str(&self.config.support_crate)?;
    let context = CodegenContext::new(&graph, &managers, self.config.visibility, support);
    let tokens = codegen::generate(&context);
    let syntax_tree = syn::parse2(tokens)?;
    let formatted = prettyplease::unparse(&syntax_tree);

    let mut stats = GenerationStats::default();
    stats.record_models(managers.values());
    stats.record_enums(&graph);
    stats.record_cycles(&graph);

    Ok((formatted, stats))
  }

  /// Classifies every model, keeping the errors of all failing ones.
  fn classify_all(&self, graph: &SchemaGraph) -> Result<BTreeMap<String, PropertiesManager>, GenerationErrors> {
    let mut managers = BTreeMap::new();
    let mut errors = GenerationErrors::default();
    errors.extend(type_name_collisions(graph));

    for model in graph.models() {
      match classify(graph, &self.config, &model.name) {
        Ok(manager) => {
          managers.insert(model.name.clone(), manager);
        }
        Err(model_errors) => errors.extend(model_errors),
      }
    }

    errors.into_result().map(|()| managers)
  }

  /// Generates the model file with the auto-generated header and lint allowances.
  ///
  /// # Errors
  ///
  /// Returns the same errors as [`Orchestrator::generate`].
  pub fn generate_with_header(&self, source_path: &str) -> anyhow::Result<(String, GenerationStats)> {
    let (code, stats) = self.generate()?;
    let metadata = self.metadata();

    let description = metadata
      .description
      .as_ref()
      .map_or_else(|| String::from("No description provided"), |d| d.replace('\n', "\n//! "));

    let final_code = format!(
      r"//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! {}
//! Source: {}
//! Version: {}
//! Generated by `streamgen`
//!
//! {}
{LINT_ALLOWANCES}

{}",
      metadata.title, source_path, metadata.version, description, code
    );

    Ok((final_code, stats))
  }
}

/// Models and enums whose generated type names are already taken by an earlier one. A dispatch
/// root also claims its `<Name>Variant` enum.
fn type_name_collisions(graph: &SchemaGraph) -> Vec<GenerationError> {
  let mut claimed = HashSet::new();
  let mut errors = vec![];
  let mut claim = |owner: &str, type_name: StructToken| {
    if !claimed.insert(type_name.clone()) {
      errors.push(GenerationError::DuplicateTypeName {
        model: owner.to_string(),
        type_name: type_name.to_string(),
      });
    }
  };

  for model in graph.models() {
    let type_name = StructToken::from_model(&model.name);
    if graph.is_dispatch_root(&model.name) {
      claim(&model.name, type_name.variant_enum());
    }
    claim(&model.name, type_name);
  }
  for definition in graph.enums() {
    claim(&definition.name, StructToken::from_model(&definition.name));
  }
  errors
}
