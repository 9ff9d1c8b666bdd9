use thiserror::Error;

use crate::json::JsonToken;

/// Runtime failures raised by generated (de)serialization code.
#[derive(Debug, Error)]
pub enum StreamError {
  #[error("invalid JSON input: {0}")]
  Json(#[from] serde_json::Error),

  #[error("expected {expected} but found {found}")]
  UnexpectedToken { expected: &'static str, found: JsonToken },

  #[error("{}", missing_required_message(.properties))]
  MissingRequired { properties: Vec<String> },

  #[error(
    "'{property}' was expected to be non-null and equal to '{expected}'. The found '{property}' was '{}'",
    .found.as_deref().unwrap_or("null")
  )]
  UnexpectedDiscriminator {
    property: &'static str,
    expected: &'static str,
    found: Option<String>,
  },

  #[error("invalid {kind} value '{value}'")]
  InvalidValue { kind: &'static str, value: String },

  #[error("writer is not positioned for {0}")]
  InvalidWriterState(&'static str),

  #[error("XML error: {0}")]
  Xml(String),

  #[error("expected XML element '{expected}' but found '{found}'")]
  UnexpectedElement { expected: String, found: String },
}

impl StreamError {
  /// Builds a [`StreamError::MissingRequired`] from `(absent, name)` pairs, keeping every absent name.
  ///
  /// Generated deserializers evaluate all required-property obligations at once and pass them here.
  pub fn missing_required<'a>(checks: impl IntoIterator<Item = (bool, &'a str)>) -> Self {
    let properties = checks
      .into_iter()
      .filter_map(|(absent, name)| absent.then(|| name.to_string()))
      .collect();
    Self::MissingRequired { properties }
  }

  pub fn unexpected_discriminator(property: &'static str, expected: &'static str, found: Option<String>) -> Self {
    Self::UnexpectedDiscriminator {
      property,
      expected,
      found,
    }
  }

  /// A `null` where a collection element or nested model must be present.
  pub fn unexpected_null(expected: &'static str) -> Self {
    Self::UnexpectedToken {
      expected,
      found: JsonToken::Null,
    }
  }

  /// Text that does not spell a value of `kind`; generated enums raise it for unknown values.
  pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
    Self::InvalidValue {
      kind,
      value: value.into(),
    }
  }

  #[cfg_attr(not(feature = "quick-xml"), allow(dead_code))]
  pub(crate) fn xml(error: impl std::fmt::Display) -> Self {
    Self::Xml(error.to_string())
  }
}

fn missing_required_message(properties: &[String]) -> String {
  let label = if properties.len() == 1 { "property" } else { "properties" };
  format!("Missing required {label}: {}", properties.join(", "))
}
