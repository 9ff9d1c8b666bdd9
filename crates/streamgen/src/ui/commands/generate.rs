use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use itertools::Itertools;

use crate::{
  generator::{
    config::{GeneratorConfig, Visibility},
    errors::{GenerationError, GenerationErrors},
    metrics::GenerationStats,
    model::CodeModel,
    orchestrator::Orchestrator,
  },
  ui::{Colors, GenerateCommand},
  utils::loader::ModelLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub generator: GeneratorConfig,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      visibility,
      no_ctor_args,
      read_only_in_ctor,
      support_crate,
      verbose,
      quiet,
    } = command;

    let visibility = Visibility::parse(&visibility)
      .ok_or_else(|| anyhow::anyhow!("Invalid visibility '{visibility}': expected public, crate or file"))?;

    let generator = GeneratorConfig::builder()
      .required_fields_as_ctor_args(!no_ctor_args)
      .include_read_only_in_ctor(read_only_in_ctor)
      .visibility(visibility)
      .support_crate(support_crate)
      .build();

    Ok(Self {
      input,
      output,
      generator,
      verbose,
      quiet,
    })
  }

  async fn load_code_model(&self) -> anyhow::Result<CodeModel> {
    ModelLoader::open(&self.input).await?.parse()
  }

  async fn write_output(&self, code: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn detail(&self, message: &str) {
    if self.config.verbose {
      self.info(message);
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading code model from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_models(&self, code_model: &CodeModel) {
    for model in &code_model.models {
      let parent = model
        .parent
        .as_deref()
        .map_or_else(String::new, |parent| format!(" extends {parent}"));
      self.detail(&format!("  model {}{parent}", model.name));
    }
    for definition in &code_model.enums {
      let kind = if definition.expandable { "expandable enum" } else { "enum" };
      self.detail(&format!("  {kind} {} ({} values)", definition.name, definition.values.len()));
    }
  }

  fn log_generating(&self) {
    self.info(&"Generating Rust models...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Models generated:", stats.models_generated.to_string());
    self.stat("Types generated:", stats.types_generated().to_string());
    self.stat("", format!("{} structs", stats.structs_generated));
    self.stat("", format!("{} dispatch enums", stats.dispatch_enums_generated));
    if stats.string_enums_generated > 0 {
      self.stat("", format!("{} string enums", stats.string_enums_generated));
    }
    if stats.xml_models > 0 {
      self.stat("XML models:", stats.xml_models.to_string());
    }
    if stats.merge_patch_models > 0 {
      self.stat("Merge-patch models:", stats.merge_patch_models.to_string());
    }
    self.print_cycles(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Composition cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" <-> ").with(self.colors.value())
        );
      }
    }
  }

  /// Errors print even in quiet mode.
  fn print_errors(&self, errors: &GenerationErrors) {
    for error in errors.iter() {
      eprintln!(
        "{} {}",
        "Error:".with(self.colors.error()),
        error.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated Rust models".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let code_model = config.load_code_model().await?;
  logger.log_models(&code_model);

  logger.log_generating();
  let orchestrator = Orchestrator::new(code_model, config.generator.clone());
  let source_path = config.input.display().to_string();

  let (code, stats) = match orchestrator.generate_with_header(&source_path) {
    Ok(output) => output,
    Err(error) => {
      if let Some(errors) = error.downcast_ref::<GenerationErrors>() {
        logger.print_errors(errors);
        anyhow::bail!("{}; nothing was written", failure_summary(errors));
      }
      return Err(error);
    }
  };

  logger.print_statistics(&stats);
  logger.log_writing();
  config.write_output(code).await?;

  logger.log_success();
  Ok(())
}

/// `N generation error(s) in M model(s)`, counting each failing model or enum once.
fn failure_summary(errors: &GenerationErrors) -> String {
  let models = errors.iter().map(GenerationError::model).unique().count();
  format!("{} generation error(s) in {models} model(s)", errors.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ui::colors::Theme;

  fn command(input: PathBuf, output: PathBuf) -> GenerateCommand {
    GenerateCommand {
      input,
      output,
      visibility: String::from("public"),
      no_ctor_args: false,
      read_only_in_ctor: false,
      support_crate: String::from("streamgen_support"),
      verbose: false,
      quiet: true,
    }
  }

  #[test]
  fn test_from_command_maps_flags() {
    let mut cmd = command(PathBuf::from("in.json"), PathBuf::from("out.rs"));
    cmd.visibility = String::from("crate");
    cmd.no_ctor_args = true;
    cmd.read_only_in_ctor = true;
    cmd.support_crate = String::from("crate::runtime");

    let config = GenerateConfig::from_command(cmd).unwrap();
    assert_eq!(config.generator.visibility, Visibility::Crate);
    assert!(!config.generator.required_fields_as_ctor_args);
    assert!(config.generator.include_read_only_in_ctor);
    assert_eq!(config.generator.support_crate, "crate::runtime");
  }

  #[test]
  fn test_from_command_rejects_unknown_visibility() {
    let mut cmd = command(PathBuf::from("in.json"), PathBuf::from("out.rs"));
    cmd.visibility = String::from("private");
    let error = GenerateConfig::from_command(cmd).unwrap_err();
    assert!(error.to_string().contains("Invalid visibility 'private'"));
  }

  #[tokio::test]
  async fn test_generate_code_writes_nested_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("models.json");
    let output = dir.path().join("out").join("models.rs");
    tokio::fs::write(
      &input,
      r#"{"name": "Points", "version": "1.0", "models": [
        {"name": "Point", "properties": [
          {"name": "x", "type": "int32", "required": true},
          {"name": "y", "type": "int32", "required": true}
        ]}
      ]}"#,
    )
    .await
    .unwrap();

    let config = GenerateConfig::from_command(command(input, output.clone())).unwrap();
    generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap();

    let code = tokio::fs::read_to_string(&output).await.unwrap();
    assert!(code.starts_with("//! AUTO-GENERATED CODE - DO NOT EDIT!"));
    assert!(code.contains("pub fn new(x: i32, y: i32) -> Self"));
  }

  #[tokio::test]
  async fn test_generate_code_reports_errors_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("models.json");
    let output = dir.path().join("models.rs");
    tokio::fs::write(
      &input,
      r#"{"name": "Broken", "version": "1.0", "models": [{"name": "Loop", "parent": "Loop"}]}"#,
    )
    .await
    .unwrap();

    let config = GenerateConfig::from_command(command(input, output.clone())).unwrap();
    let error = generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap_err();
    assert_eq!(error.to_string(), "1 generation error(s) in 1 model(s); nothing was written");
    assert!(!output.exists());
  }

  #[test]
  fn test_failure_summary_counts_models_once() {
    let errors = GenerationErrors::from(vec![
      GenerationError::UnknownParent {
        model: String::from("Orphan"),
        parent: String::from("Missing"),
      },
      GenerationError::InvalidXmlShape {
        model: String::from("Label"),
        property: String::from("codes"),
        wire_type: String::from("list<string>"),
      },
      GenerationError::InvalidXmlShape {
        model: String::from("Label"),
        property: String::from("body"),
        wire_type: String::from("Tag"),
      },
    ]);
    assert_eq!(failure_summary(&errors), "3 generation error(s) in 2 model(s)");
  }
}
