//! The code-model document consumed by the generator.
//!
//! A document lists models with single-inheritance `parent` links, optional
//! discriminators and typed properties, plus the string enums those
//! properties name. Derived-model lists are not part of the document;
//! [`crate::generator::graph::SchemaGraph`] computes them.

mod wire_type;

#[cfg(test)]
mod tests;

use serde::Deserialize;
pub use wire_type::{Primitive, WireType};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeModel {
  pub name: String,
  pub version: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub models: Vec<ModelDef>,
  #[serde(default)]
  pub enums: Vec<EnumDef>,
}

/// A string enum. Fixed enums reject values they do not list; expandable ones keep them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub expandable: bool,
  pub values: Vec<EnumValueDef>,
}

impl EnumDef {
  #[must_use]
  pub fn contains(&self, value: &str) -> bool {
    self.values.iter().any(|candidate| candidate.value == value)
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDef {
  /// The variant name; the value itself when absent.
  #[serde(default)]
  pub name: Option<String>,
  pub value: String,
  #[serde(default)]
  pub description: Option<String>,
}

impl EnumValueDef {
  #[must_use]
  pub fn variant_source(&self) -> &str {
    self.name.as_deref().unwrap_or(&self.value)
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDef {
  pub name: String,
  #[serde(default)]
  pub serialized_name: Option<String>,
  #[serde(default)]
  pub parent: Option<String>,
  #[serde(default)]
  pub discriminator: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub merge_patch: bool,
  #[serde(default)]
  pub xml: Option<ModelXml>,
  #[serde(default)]
  pub properties: Vec<PropertyDef>,
}

impl ModelDef {
  /// The discriminator value identifying this model on the wire.
  #[must_use]
  pub fn wire_name(&self) -> &str {
    self.serialized_name.as_deref().unwrap_or(&self.name)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelXml {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub namespace: Option<String>,
  #[serde(default)]
  pub prefix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
  pub name: String,
  #[serde(default)]
  pub serialized_name: Option<String>,
  #[serde(rename = "type")]
  pub wire_type: WireType,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub read_only: bool,
  #[serde(default)]
  pub constant: Option<ConstantValue>,
  #[serde(default)]
  pub flatten: bool,
  #[serde(default)]
  pub additional_properties: bool,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub xml: Option<PropertyXml>,
}

impl PropertyDef {
  /// The serialized name exactly as declared, including any `\.` escapes of a flatten path.
  #[must_use]
  pub fn wire_name(&self) -> &str {
    self.serialized_name.as_deref().unwrap_or(&self.name)
  }
}

/// A fixed property value. Only scalars may be constant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
  Bool(bool),
  Int(i64),
  Float(f64),
  String(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyXml {
  #[serde(default)]
  pub attribute: bool,
  #[serde(default)]
  pub text: bool,
  #[serde(default)]
  pub wrapped: bool,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub namespace: Option<String>,
  #[serde(default)]
  pub prefix: Option<String>,
  #[serde(default)]
  pub item_name: Option<String>,
}
