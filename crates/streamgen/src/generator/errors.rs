use std::fmt::{Display, Formatter};

use thiserror::Error;

/// A generator fault. Each one is fatal for the model it names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
  #[error("model '{model}' has a cyclic parent chain: {}", .chain.join(" -> "))]
  SchemaCycle { model: String, chain: Vec<String> },

  #[error("model '{model}' names unknown parent '{parent}'")]
  UnknownParent { model: String, parent: String },

  #[error("property '{property}' of model '{model}' has unknown wire type '{wire_type}'")]
  UnknownWireType {
    model: String,
    property: String,
    wire_type: String,
  },

  #[error("property '{property}' of model '{model}' collides with another property at flatten path '{path}'")]
  DuplicateFlattenPath {
    model: String,
    property: String,
    path: String,
  },

  #[error("property '{property}' of model '{model}' reuses serialized name or field name '{serialized_name}'")]
  DuplicateProperty {
    model: String,
    property: String,
    serialized_name: String,
  },

  #[error("model '{model}' cannot access discriminator '{discriminator}': {reason}")]
  MissingDiscriminatorAccessor {
    model: String,
    discriminator: String,
    reason: &'static str,
  },

  #[error("property '{property}' of model '{model}' has an invalid flatten path '{path}'")]
  InvalidFlattenPath {
    model: String,
    property: String,
    path: String,
  },

  #[error("additional properties '{property}' of model '{model}' must be a map, found '{wire_type}'")]
  InvalidAdditionalProperties {
    model: String,
    property: String,
    wire_type: String,
  },

  #[error("constant property '{property}' of model '{model}' does not fit wire type '{wire_type}'")]
  InvalidConstant {
    model: String,
    property: String,
    wire_type: String,
  },

  #[error("XML attribute or text property '{property}' of model '{model}' must be a scalar, found '{wire_type}'")]
  InvalidXmlShape {
    model: String,
    property: String,
    wire_type: String,
  },

  #[error("discriminator value '{value}' of model '{model}' is not a value of fixed enum '{enum_name}'")]
  UnknownDiscriminatorValue {
    model: String,
    value: String,
    enum_name: String,
  },

  #[error("'{model}' generates type '{type_name}', which another model or enum already uses")]
  DuplicateTypeName { model: String, type_name: String },
}

impl GenerationError {
  #[must_use]
  pub fn model(&self) -> &str {
    match self {
      Self::SchemaCycle { model, .. }
      | Self::UnknownParent { model, .. }
      | Self::UnknownWireType { model, .. }
      | Self::DuplicateFlattenPath { model, .. }
      | Self::DuplicateProperty { model, .. }
      | Self::MissingDiscriminatorAccessor { model, .. }
      | Self::InvalidFlattenPath { model, .. }
      | Self::InvalidAdditionalProperties { model, .. }
      | Self::InvalidConstant { model, .. }
      | Self::InvalidXmlShape { model, .. }
      | Self::UnknownDiscriminatorValue { model, .. }
      | Self::DuplicateTypeName { model, .. } => model,
    }
  }
}

/// Every error collected across one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationErrors(Vec<GenerationError>);

impl GenerationErrors {
  pub fn push(&mut self, error: GenerationError) {
    if !self.0.contains(&error) {
      self.0.push(error);
    }
  }

  pub fn extend(&mut self, errors: impl IntoIterator<Item = GenerationError>) {
    for error in errors {
      self.push(error);
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &GenerationError> {
    self.0.iter()
  }

  /// `Ok` when nothing was collected.
  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl From<Vec<GenerationError>> for GenerationErrors {
  fn from(errors: Vec<GenerationError>) -> Self {
    let mut collected = Self::default();
    collected.extend(errors);
    collected
  }
}

impl Display for GenerationErrors {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let count = self.0.len();
    writeln!(
      f,
      "generation failed with {count} error{}",
      if count == 1 { "" } else { "s" }
    )?;
    for error in &self.0 {
      writeln!(f, "  - {error}")?;
    }
    Ok(())
  }
}

impl std::error::Error for GenerationErrors {}
