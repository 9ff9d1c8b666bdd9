use std::collections::HashSet;

use super::{
  ClassifiedProperty, FlattenTree, GeneratedNames, PropertiesManager, PropertyRole, Provenance, XmlShape,
  split_flatten_path,
};
use crate::generator::{
  ast::{Documentation, FieldNameToken, StructToken},
  config::GeneratorConfig,
  errors::GenerationError,
  graph::SchemaGraph,
  model::{ConstantValue, ModelDef, Primitive, PropertyDef, WireType},
  naming::identifiers::{local_name, to_rust_field_name, unique_name, unraw},
};

const FIELD_NAME_CANDIDATES: [&str; 3] = ["field_name", "json_field_name", "deserialization_field_name"];
const ELEMENT_NAME_CANDIDATES: [&str; 3] = ["element_name", "xml_element_name", "deserialization_element_name"];

/// A property that survived shadowing, with the lineage level that declares it.
struct Effective<'a> {
  level: usize,
  declared_by: &'a ModelDef,
  def: &'a PropertyDef,
  field: String,
  local: String,
}

/// Classifies the effective property set of `name`.
///
/// Errors are collected rather than returned at the first one, so a schema author sees every
/// fault in the model at once.
pub(crate) fn classify(
  graph: &SchemaGraph,
  config: &GeneratorConfig,
  name: &str,
) -> Result<PropertiesManager, Vec<GenerationError>> {
  let lineage = graph.lineage(name).map_err(|error| vec![error])?;
  let Some(model) = lineage.last().copied() else {
    return Err(vec![]);
  };
  let own_level = lineage.len() - 1;

  let (mut effective, mut errors) = resolve_shadowing(&lineage);
  let taken = assign_locals(&mut effective);

  for property in &effective {
    validate_property(graph, property, &mut errors);
  }

  let discriminator_names = declared_discriminators(&lineage);
  let mut discriminators = vec![];
  let mut discriminator_fields = HashSet::new();
  for (discriminator, declared_at) in &discriminator_names {
    let Some(property) = effective.iter().find(|property| property.def.wire_name() == discriminator.as_str()) else {
      errors.push(GenerationError::MissingDiscriminatorAccessor {
        model: name.to_string(),
        discriminator: discriminator.clone(),
        reason: "no property carries it",
      });
      continue;
    };
    if !property.def.wire_type.is_string_valued() {
      errors.push(GenerationError::MissingDiscriminatorAccessor {
        model: name.to_string(),
        discriminator: discriminator.clone(),
        reason: "discriminator must be a string or a string enum",
      });
      continue;
    }

    let value = discriminator_value(graph, &lineage, discriminator, *declared_at);
    if let WireType::Enum(enum_name) = &property.def.wire_type
      && let Some(definition) = graph.get_enum(enum_name)
      && !definition.expandable
      && own_level > *declared_at
      && !definition.contains(&value)
    {
      errors.push(GenerationError::UnknownDiscriminatorValue {
        model: name.to_string(),
        value,
        enum_name: enum_name.clone(),
      });
      continue;
    }
    let mut classified = build(graph, name, own_level, property, PropertyRole::Discriminator);
    classified.serialized_name = discriminator.clone();
    classified.discriminator_value = Some(value);
    discriminator_fields.insert(property.field.clone());
    discriminators.push(classified);
  }

  let mut additional = None;
  let mut super_required = vec![];
  let mut super_setter = vec![];
  let mut own_required = vec![];
  let mut own_setter = vec![];

  for property in effective
    .iter()
    .filter(|property| !discriminator_fields.contains(&property.field))
  {
    if property.def.additional_properties {
      additional = Some(build(graph, name, own_level, property, PropertyRole::AdditionalProperties));
      continue;
    }

    let role = role_of(config, property.def);
    let mut classified = build(graph, name, own_level, property, role);
    if property.def.flatten {
      apply_flatten_path(&mut classified, property, &mut errors);
    }

    let list = match (classified.provenance, classified.required) {
      (Provenance::Inherited, true) => &mut super_required,
      (Provenance::Inherited, false) => &mut super_setter,
      (Provenance::Own, true) => &mut own_required,
      (Provenance::Own, false) => &mut own_setter,
    };
    list.push(classified);
  }

  let ordinary: Vec<&ClassifiedProperty> = super_required
    .iter()
    .chain(&super_setter)
    .chain(&own_required)
    .chain(&own_setter)
    .collect();

  let plain_names: HashSet<String> = ordinary
    .iter()
    .copied()
    .chain(&discriminators)
    .filter(|property| property.flatten_path.is_none())
    .map(|property| property.serialized_name.clone())
    .collect();

  let flatten = match FlattenTree::build(ordinary.iter().copied(), &plain_names) {
    Ok(tree) => tree,
    Err(flatten_errors) => {
      errors.extend(flatten_errors);
      FlattenTree::default()
    }
  };

  if !errors.is_empty() {
    return Err(errors);
  }

  let deserialized = format!("deserialized_{}", unraw(&to_rust_field_name(&model.name)));
  let names = GeneratedNames {
    field_name: pick_name(&FIELD_NAME_CANDIDATES, &taken),
    deserialized: FieldNameToken::new(unique_name(&deserialized, &taken)),
    element_name: pick_name(&ELEMENT_NAME_CANDIDATES, &taken),
  };

  let dispatch = graph
    .is_dispatch_root(name)
    .then(|| graph.discriminator_name(name).map(String::from))
    .flatten();

  let xml = graph
    .uses_xml(name)
    .then(|| xml_shape(&lineage, ordinary.iter().copied().chain(&discriminators)));

  Ok(PropertiesManager {
    model_name: name.to_string(),
    type_name: StructToken::from_model(name),
    description: model.description.clone(),
    discriminators,
    super_required,
    super_setter,
    own_required,
    own_setter,
    additional,
    flatten,
    names,
    dispatch,
    merge_patch: model.merge_patch,
    xml,
  })
}

/// Walks the lineage deepest level first, so a property declared lower down hides any ancestor
/// property with the same serialized name or the same Rust field name. The result is root-most
/// level first, declaration order within a level.
///
/// Two properties of one level never shadow each other: a shared Rust field name or plain
/// serialized name is a [`GenerationError::DuplicateProperty`]. Flattened paths are left to the
/// [`FlattenTree`], which reports their collisions.
fn resolve_shadowing<'a>(lineage: &[&'a ModelDef]) -> (Vec<Effective<'a>>, Vec<GenerationError>) {
  let mut deeper_wire: HashSet<&str> = HashSet::new();
  let mut deeper_field: HashSet<String> = HashSet::new();
  let mut levels = vec![];
  let mut errors = vec![];

  for (level, declared_by) in lineage.iter().copied().enumerate().rev() {
    let mut level_wire: HashSet<&str> = HashSet::new();
    let mut level_field: HashSet<String> = HashSet::new();
    let mut kept = vec![];

    for def in &declared_by.properties {
      let field = to_rust_field_name(&def.name);
      if deeper_wire.contains(def.wire_name()) || deeper_field.contains(&field) {
        continue;
      }

      let nested = def.flatten && split_flatten_path(def.wire_name()).len() > 1;
      let wire_taken = !level_wire.insert(def.wire_name()) && !nested;
      let field_taken = !level_field.insert(field.clone());
      if wire_taken || field_taken {
        errors.push(GenerationError::DuplicateProperty {
          model: declared_by.name.clone(),
          property: def.name.clone(),
          serialized_name: def.wire_name().to_string(),
        });
        continue;
      }

      kept.push(Effective {
        level,
        declared_by,
        def,
        field,
        local: String::new(),
      });
    }

    deeper_wire.extend(level_wire);
    deeper_field.extend(level_field);
    levels.push(kept);
  }

  (levels.into_iter().rev().flatten().collect(), errors)
}

/// Picks each property's read-loop local and returns every field and local name in use.
fn assign_locals(effective: &mut [Effective<'_>]) -> HashSet<String> {
  let mut taken: HashSet<String> = effective
    .iter()
    .map(|property| unraw(&property.field).to_string())
    .collect();
  for property in effective.iter_mut() {
    property.local = local_name(&property.field, &taken);
    taken.insert(unraw(&property.local).to_string());
  }
  taken
}

fn validate_property(graph: &SchemaGraph, property: &Effective<'_>, errors: &mut Vec<GenerationError>) {
  let def = property.def;
  let model = property.declared_by.name.clone();

  let unknown_model = def
    .wire_type
    .referenced_models()
    .iter()
    .any(|target| graph.get(target).is_none());
  let unknown_enum = def
    .wire_type
    .referenced_enums()
    .iter()
    .any(|target| graph.get_enum(target).is_none());
  if unknown_model || unknown_enum {
    errors.push(GenerationError::UnknownWireType {
      model: model.clone(),
      property: def.name.clone(),
      wire_type: def.wire_type.to_string(),
    });
  }

  if def.additional_properties && !matches!(def.wire_type, WireType::Map(_)) {
    errors.push(GenerationError::InvalidAdditionalProperties {
      model: model.clone(),
      property: def.name.clone(),
      wire_type: def.wire_type.to_string(),
    });
  }

  if let Some(xml) = &def.xml
    && (xml.attribute || xml.text)
    && !def.wire_type.is_scalar()
  {
    errors.push(GenerationError::InvalidXmlShape {
      model: model.clone(),
      property: def.name.clone(),
      wire_type: def.wire_type.to_string(),
    });
  }

  if let Some(constant) = &def.constant
    && def.required
    && !constant_fits(constant, &def.wire_type)
  {
    errors.push(GenerationError::InvalidConstant {
      model,
      property: def.name.clone(),
      wire_type: def.wire_type.to_string(),
    });
  }
}

fn constant_fits(constant: &ConstantValue, wire_type: &WireType) -> bool {
  let WireType::Primitive(primitive) = wire_type else {
    return false;
  };
  match (constant, primitive) {
    (ConstantValue::Bool(_), Primitive::Boolean)
    | (ConstantValue::Int(_), Primitive::Int64 | Primitive::Float32 | Primitive::Float64)
    | (ConstantValue::String(_), Primitive::String) => true,
    (ConstantValue::Int(value), Primitive::Int32) => i32::try_from(*value).is_ok(),
    (ConstantValue::Float(value), Primitive::Float32 | Primitive::Float64) => value.is_finite(),
    _ => false,
  }
}

/// Discriminator names declared anywhere in the lineage, root-most declaration first.
fn declared_discriminators(lineage: &[&ModelDef]) -> Vec<(String, usize)> {
  let mut declared: Vec<(String, usize)> = vec![];
  for (level, model) in lineage.iter().enumerate() {
    if let Some(discriminator) = &model.discriminator
      && !declared.iter().any(|(name, _)| name == discriminator)
    {
      declared.push((discriminator.clone(), level));
    }
  }
  declared
}

/// The serialized name of the deepest model in the lineage whose parent dispatches on `discriminator`,
/// or the declaring model's own when no descendant level does.
fn discriminator_value(graph: &SchemaGraph, lineage: &[&ModelDef], discriminator: &str, declared_at: usize) -> String {
  let mut value = lineage[declared_at].wire_name();
  for window in lineage[declared_at..].windows(2) {
    if graph.discriminator_name(&window[0].name) == Some(discriminator) {
      value = window[1].wire_name();
    }
  }
  value.to_string()
}

fn role_of(config: &GeneratorConfig, def: &PropertyDef) -> PropertyRole {
  let constant = def.required && def.constant.is_some();
  let in_constructor = def.required
    && !constant
    && config.required_fields_as_ctor_args
    && (!def.read_only || config.include_read_only_in_ctor);

  if constant {
    PropertyRole::Constant
  } else if in_constructor {
    PropertyRole::Constructor
  } else if def.read_only {
    PropertyRole::ReadOnly
  } else {
    PropertyRole::Setter
  }
}

fn build(
  graph: &SchemaGraph,
  owner: &str,
  own_level: usize,
  property: &Effective<'_>,
  role: PropertyRole,
) -> ClassifiedProperty {
  let def = property.def;
  let boxed = def
    .wire_type
    .model_name()
    .is_some_and(|target| graph.in_cycle_with(owner, target));

  ClassifiedProperty {
    name: def.name.clone(),
    serialized_name: def.wire_name().to_string(),
    field: FieldNameToken::new(&property.field),
    local: FieldNameToken::new(&property.local),
    wire_type: def.wire_type.clone(),
    role,
    provenance: if property.level == own_level {
      Provenance::Own
    } else {
      Provenance::Inherited
    },
    declared_by: property.declared_by.name.clone(),
    required: def.required,
    constant: def.constant.clone().filter(|_| role == PropertyRole::Constant),
    discriminator_value: None,
    flatten_path: None,
    boxed,
    xml: def.xml.clone().unwrap_or_default(),
    docs: Documentation::from_optional(def.description.as_deref()),
  }
}

fn apply_flatten_path(classified: &mut ClassifiedProperty, property: &Effective<'_>, errors: &mut Vec<GenerationError>) {
  let segments = split_flatten_path(property.def.wire_name());
  if segments.iter().any(String::is_empty) {
    errors.push(GenerationError::InvalidFlattenPath {
      model: property.declared_by.name.clone(),
      property: property.def.name.clone(),
      path: property.def.wire_name().to_string(),
    });
    return;
  }

  classified.serialized_name = segments.join(".");
  if segments.len() > 1 {
    classified.flatten_path = Some(segments);
  }
}

fn pick_name(candidates: &[&str], taken: &HashSet<String>) -> FieldNameToken {
  let name = candidates
    .iter()
    .find(|candidate| !taken.contains(**candidate))
    .or(candidates.last())
    .copied()
    .unwrap_or_default();
  FieldNameToken::new(name)
}

fn xml_shape<'a>(lineage: &[&ModelDef], properties: impl Iterator<Item = &'a ClassifiedProperty>) -> XmlShape {
  let root = lineage[0];
  let root_xml = root.xml.clone().unwrap_or_default();
  let local = root_xml.name.unwrap_or_else(|| root.name.clone());
  let element_name = match &root_xml.prefix {
    Some(prefix) => format!("{prefix}:{local}"),
    None => local,
  };

  let mut declarations: Vec<(Option<String>, String)> = vec![];
  if let Some(xml) = lineage.iter().rev().find_map(|model| model.xml.as_ref())
    && let Some(namespace) = &xml.namespace
  {
    declarations.push((xml.prefix.clone(), namespace.clone()));
  }
  for property in properties {
    if let (Some(prefix), Some(namespace)) = (&property.xml.prefix, &property.xml.namespace) {
      let declaration = (Some(prefix.clone()), namespace.clone());
      if !declarations.contains(&declaration) {
        declarations.push(declaration);
      }
    }
  }

  XmlShape {
    element_name,
    declarations,
  }
}
