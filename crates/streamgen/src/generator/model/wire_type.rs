use std::{
  fmt::{Display, Formatter},
  str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scalar wire types understood by the runtime readers and writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString)]
pub enum Primitive {
  #[strum(serialize = "string")]
  String,
  #[strum(serialize = "boolean")]
  Boolean,
  #[strum(serialize = "int32")]
  Int32,
  #[strum(serialize = "int64")]
  Int64,
  #[strum(serialize = "float32")]
  Float32,
  #[strum(serialize = "float64")]
  Float64,
  #[strum(serialize = "date-time")]
  DateTime,
  #[strum(serialize = "date-time-rfc1123")]
  DateTimeRfc1123,
  #[strum(serialize = "date")]
  Date,
  #[strum(serialize = "unix-time")]
  UnixTime,
  /// ISO 8601, e.g. `P1DT2H`.
  #[strum(serialize = "duration")]
  Duration,
  #[strum(serialize = "bytes")]
  Bytes,
  #[strum(serialize = "base64url")]
  Base64Url,
  #[strum(serialize = "uuid")]
  Uuid,
  #[strum(serialize = "any")]
  Any,
}

impl Primitive {
  /// Client types that are `Copy` and passed to writers by value.
  #[must_use]
  pub const fn is_copy(self) -> bool {
    matches!(
      self,
      Self::Boolean | Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireTypeParseError {
  #[error("empty wire type expression")]
  Empty,
  #[error("unbalanced '<' or '>' in wire type '{0}'")]
  Unbalanced(String),
  #[error("'{0}' takes exactly one type argument")]
  Arity(String),
  #[error("invalid model reference '{0}'")]
  InvalidReference(String),
  #[error("'enum' takes the name of a declared enum, found '{0}'")]
  InvalidEnum(String),
}

/// A property's wire type: a primitive, a `list<T>`/`map<T>` container, an `enum<Name>` or a
/// reference to a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WireType {
  Primitive(Primitive),
  List(Box<WireType>),
  Map(Box<WireType>),
  Enum(String),
  Model(String),
}

impl WireType {
  #[must_use]
  pub fn model_name(&self) -> Option<&str> {
    match self {
      Self::Model(name) => Some(name),
      _ => None,
    }
  }

  /// Every model named anywhere inside this type, containers included.
  pub fn referenced_models(&self) -> Vec<&str> {
    match self {
      Self::Primitive(_) | Self::Enum(_) => vec![],
      Self::List(inner) | Self::Map(inner) => inner.referenced_models(),
      Self::Model(name) => vec![name.as_str()],
    }
  }

  pub fn referenced_enums(&self) -> Vec<&str> {
    match self {
      Self::Primitive(_) | Self::Model(_) => vec![],
      Self::List(inner) | Self::Map(inner) => inner.referenced_enums(),
      Self::Enum(name) => vec![name.as_str()],
    }
  }

  /// Strings and string enums: the types a discriminator may have.
  #[must_use]
  pub fn is_string_valued(&self) -> bool {
    matches!(self, Self::Primitive(Primitive::String) | Self::Enum(_))
  }

  /// Single values with a text form, which XML may carry in an attribute or as text content.
  #[must_use]
  pub fn is_scalar(&self) -> bool {
    matches!(self, Self::Primitive(_) | Self::Enum(_))
  }
}

impl Display for WireType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Primitive(primitive) => write!(f, "{primitive}"),
      Self::List(inner) => write!(f, "list<{inner}>"),
      Self::Map(inner) => write!(f, "map<{inner}>"),
      Self::Enum(name) => write!(f, "enum<{name}>"),
      Self::Model(name) => f.write_str(name),
    }
  }
}

impl FromStr for WireType {
  type Err = WireTypeParseError;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    let text = input.trim();
    if text.is_empty() {
      return Err(WireTypeParseError::Empty);
    }

    match text.split_once('<') {
      Some((container, rest)) => {
        let inner = rest
          .strip_suffix('>')
          .ok_or_else(|| WireTypeParseError::Unbalanced(input.to_string()))?;
        let inner: WireType = inner.parse()?;
        match container.trim() {
          "list" => Ok(Self::List(Box::new(inner))),
          "map" => Ok(Self::Map(Box::new(inner))),
          "enum" => match inner {
            Self::Model(name) => Ok(Self::Enum(name)),
            other => Err(WireTypeParseError::InvalidEnum(other.to_string())),
          },
          other => Err(WireTypeParseError::Arity(other.to_string())),
        }
      }
      None if text.contains('>') => Err(WireTypeParseError::Unbalanced(input.to_string())),
      None if matches!(text, "list" | "map" | "enum") => Err(WireTypeParseError::Arity(text.to_string())),
      None => match text.parse::<Primitive>() {
        Ok(primitive) => Ok(Self::Primitive(primitive)),
        Err(_) if text.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.') => {
          Ok(Self::Model(text.to_string()))
        }
        Err(_) => Err(WireTypeParseError::InvalidReference(text.to_string())),
      },
    }
  }
}

impl TryFrom<String> for WireType {
  type Error = WireTypeParseError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<WireType> for String {
  fn from(value: WireType) -> Self {
    value.to_string()
  }
}
