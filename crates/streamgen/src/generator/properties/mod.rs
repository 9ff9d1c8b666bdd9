//! Per-model property classification.
//!
//! [`classify`] merges a model's own properties with the inherited ones it does not shadow, tags
//! each with its role and provenance, and builds the flatten tree. Every emitter reads the
//! resulting [`PropertiesManager`] and never walks the parent chain itself.

mod classifier;
mod flatten;

#[cfg(test)]
mod tests;

pub(crate) use classifier::classify;
pub(crate) use flatten::{FlattenNode, FlattenTree, split_flatten_path};

use crate::generator::{
  ast::{Documentation, FieldNameToken, StructToken},
  model::{ConstantValue, PropertyXml, WireType},
};

/// How a property is stored, constructed and exposed on the generated struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PropertyRole {
  /// A `new(...)` argument, stored without `Option`.
  Constructor,
  /// Optional storage with a getter and a `set_*` method.
  Setter,
  /// Optional storage with a getter only; read but never written.
  ReadOnly,
  /// No storage; the getter returns the literal.
  Constant,
  /// A polymorphic discriminator, stored as the model's fixed value.
  Discriminator,
  /// The catch-all map for unknown wire fields.
  AdditionalProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Provenance {
  Own,
  Inherited,
}

#[derive(Debug, Clone)]
pub(crate) struct ClassifiedProperty {
  pub(crate) name: String,
  /// The wire name with escapes resolved. Flattened properties join their path with `.`.
  pub(crate) serialized_name: String,
  pub(crate) field: FieldNameToken,
  pub(crate) local: FieldNameToken,
  pub(crate) wire_type: WireType,
  pub(crate) role: PropertyRole,
  pub(crate) provenance: Provenance,
  pub(crate) declared_by: String,
  pub(crate) required: bool,
  pub(crate) constant: Option<ConstantValue>,
  pub(crate) discriminator_value: Option<String>,
  pub(crate) flatten_path: Option<Vec<String>>,
  /// A direct model field on a composition cycle, stored as `Box<T>`.
  pub(crate) boxed: bool,
  pub(crate) xml: PropertyXml,
  pub(crate) docs: Documentation,
}

impl ClassifiedProperty {
  /// Read-only properties are only read; discriminators are always written.
  #[must_use]
  pub(crate) fn is_serialized(&self) -> bool {
    self.role != PropertyRole::ReadOnly
  }

  /// Properties that always hold a value, so a flatten wrapper around them is never elided.
  #[must_use]
  pub(crate) fn is_always_present(&self) -> bool {
    matches!(
      self.role,
      PropertyRole::Constructor | PropertyRole::Constant | PropertyRole::Discriminator
    )
  }

  /// Stored without `Option`.
  #[must_use]
  pub(crate) fn is_stored_plain(&self) -> bool {
    matches!(self.role, PropertyRole::Constructor | PropertyRole::Discriminator)
  }

  #[must_use]
  pub(crate) fn has_storage(&self) -> bool {
    self.role != PropertyRole::Constant
  }

  /// A required property the reader must observe before the value can be built.
  #[must_use]
  pub(crate) fn is_obligation(&self) -> bool {
    self.required
      && matches!(
        self.role,
        PropertyRole::Constructor | PropertyRole::Setter | PropertyRole::ReadOnly
      )
  }

  /// The key merge-patch tracking records for this property.
  #[must_use]
  pub(crate) fn patch_key(&self) -> &str {
    crate::generator::naming::identifiers::unraw(self.field.as_str())
  }

  /// The last wire segment, which is the property's element name in XML.
  #[must_use]
  pub(crate) fn leaf_name(&self) -> &str {
    self
      .flatten_path
      .as_ref()
      .and_then(|path| path.last())
      .map_or(self.serialized_name.as_str(), String::as_str)
  }

  /// The XML name, prefixed when a prefix is declared.
  #[must_use]
  pub(crate) fn xml_name(&self) -> String {
    let local = self.xml.name.as_deref().unwrap_or_else(|| self.leaf_name());
    match &self.xml.prefix {
      Some(prefix) => format!("{prefix}:{local}"),
      None => local.to_string(),
    }
  }

  /// The XML local name used to match incoming elements and attributes.
  #[must_use]
  pub(crate) fn xml_local_name(&self) -> &str {
    self.xml.name.as_deref().unwrap_or_else(|| self.leaf_name())
  }

  #[must_use]
  pub(crate) fn xml_item_name(&self) -> String {
    match &self.xml.item_name {
      Some(item) => match &self.xml.prefix {
        Some(prefix) => format!("{prefix}:{item}"),
        None => item.clone(),
      },
      None => self.xml_name(),
    }
  }
}

/// Names for the variables emitted inside read loops, chosen so no property local collides with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GeneratedNames {
  pub(crate) field_name: FieldNameToken,
  pub(crate) deserialized: FieldNameToken,
  pub(crate) element_name: FieldNameToken,
}

/// The XML shape of a model: its default element name and the namespaces it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlShape {
  pub(crate) element_name: String,
  pub(crate) declarations: Vec<(Option<String>, String)>,
}

/// The classified, deduplicated and provenance-tagged properties of one model.
///
/// Built once per model and read-only afterwards.
#[derive(Debug, Clone)]
pub(crate) struct PropertiesManager {
  pub(crate) model_name: String,
  pub(crate) type_name: StructToken,
  pub(crate) description: Option<String>,
  pub(crate) discriminators: Vec<ClassifiedProperty>,
  pub(crate) super_required: Vec<ClassifiedProperty>,
  pub(crate) super_setter: Vec<ClassifiedProperty>,
  pub(crate) own_required: Vec<ClassifiedProperty>,
  pub(crate) own_setter: Vec<ClassifiedProperty>,
  pub(crate) additional: Option<ClassifiedProperty>,
  pub(crate) flatten: FlattenTree,
  pub(crate) names: GeneratedNames,
  /// The discriminator this model dispatches on, when it is a dispatch root.
  pub(crate) dispatch: Option<String>,
  pub(crate) merge_patch: bool,
  pub(crate) xml: Option<XmlShape>,
}

impl PropertiesManager {
  /// Required then setter properties, super before own, flattened ones included.
  pub(crate) fn ordinary(&self) -> impl Iterator<Item = &ClassifiedProperty> {
    self
      .super_required
      .iter()
      .chain(&self.super_setter)
      .chain(&self.own_required)
      .chain(&self.own_setter)
  }

  /// Every property in struct-field order.
  pub(crate) fn all(&self) -> impl Iterator<Item = &ClassifiedProperty> {
    self
      .discriminators
      .iter()
      .chain(self.ordinary())
      .chain(self.additional.iter())
  }

  pub(crate) fn fields(&self) -> impl Iterator<Item = &ClassifiedProperty> {
    self.all().filter(|property| property.has_storage())
  }

  pub(crate) fn constructor_params(&self) -> impl Iterator<Item = &ClassifiedProperty> {
    self.ordinary().filter(|property| property.role == PropertyRole::Constructor)
  }

  pub(crate) fn obligations(&self) -> impl Iterator<Item = &ClassifiedProperty> {
    self.ordinary().filter(|property| property.is_obligation())
  }

  /// Ordinary properties outside the flatten tree.
  pub(crate) fn plain(&self) -> impl Iterator<Item = &ClassifiedProperty> {
    self.ordinary().filter(|property| property.flatten_path.is_none())
  }

  #[must_use]
  pub(crate) fn is_dispatch_root(&self) -> bool {
    self.dispatch.is_some()
  }

  /// Whether this model dispatches on `discriminator`, and so keeps the value it reads.
  #[must_use]
  pub(crate) fn dispatches_on(&self, discriminator: &str) -> bool {
    self.dispatch.as_deref() == Some(discriminator)
  }

  #[must_use]
  pub(crate) fn has_constructor_args(&self) -> bool {
    self.constructor_params().next().is_some()
  }
}
