use serde_json::json;

use crate::generator::{
  config::GeneratorConfig,
  errors::GenerationError,
  properties::{PropertyRole, Provenance, classify},
  tests::{classify_model, fish_models, graph, graph_with_enums, kind_enums},
};

fn names<'a>(properties: impl Iterator<Item = &'a crate::generator::properties::ClassifiedProperty>) -> Vec<&'a str> {
  properties.map(|property| property.name.as_str()).collect()
}

#[test]
fn test_roles_follow_required_read_only_and_constant() {
  let manager = classify_model(
    json!([{
      "name": "Widget",
      "properties": [
        {"name": "name", "type": "string", "required": true},
        {"name": "id", "type": "int64", "required": true, "readOnly": true},
        {"name": "etag", "type": "string", "readOnly": true},
        {"name": "color", "type": "string"},
        {"name": "version", "type": "int32", "required": true, "constant": 2},
        {"name": "extra", "type": "map<string>", "additionalProperties": true}
      ]
    }]),
    "Widget",
  );

  let role = |name: &str| manager.all().find(|property| property.name == name).unwrap().role;
  assert_eq!(role("name"), PropertyRole::Constructor);
  assert_eq!(role("id"), PropertyRole::ReadOnly);
  assert_eq!(role("etag"), PropertyRole::ReadOnly);
  assert_eq!(role("color"), PropertyRole::Setter);
  assert_eq!(role("version"), PropertyRole::Constant);
  assert_eq!(role("extra"), PropertyRole::AdditionalProperties);

  assert_eq!(names(manager.constructor_params()), vec!["name"]);
  assert_eq!(names(manager.obligations()), vec!["name", "id"]);
  let setters = manager
    .all()
    .filter(|property| matches!(property.role, PropertyRole::Setter | PropertyRole::AdditionalProperties));
  assert_eq!(names(setters), vec!["color", "extra"]);
  assert!(manager.fields().all(|property| property.name != "version"));
}

#[test]
fn test_config_moves_required_properties_out_of_constructor() {
  let graph = graph(json!([{
    "name": "Widget",
    "properties": [
      {"name": "name", "type": "string", "required": true},
      {"name": "id", "type": "int64", "required": true, "readOnly": true}
    ]
  }]));

  let config = GeneratorConfig::builder().include_read_only_in_ctor(true).build();
  let manager = classify(&graph, &config, "Widget").unwrap();
  assert_eq!(names(manager.constructor_params()), vec!["name", "id"]);

  let config = GeneratorConfig::builder().required_fields_as_ctor_args(false).build();
  let manager = classify(&graph, &config, "Widget").unwrap();
  assert!(!manager.has_constructor_args());
  assert_eq!(names(manager.obligations()), vec!["name", "id"]);
  assert_eq!(manager.own_required[0].role, PropertyRole::Setter);
}

#[test]
fn test_own_property_shadows_inherited_one() {
  let manager = classify_model(
    json!([
      {
        "name": "Base",
        "properties": [
          {"name": "label", "type": "string"},
          {"name": "size", "type": "int32", "required": true}
        ]
      },
      {
        "name": "Derived",
        "parent": "Base",
        "properties": [
          {"name": "title", "serializedName": "label", "type": "string", "required": true}
        ]
      }
    ]),
    "Derived",
  );

  assert_eq!(names(manager.super_required.iter()), vec!["size"]);
  assert!(manager.super_setter.is_empty());
  assert_eq!(names(manager.own_required.iter()), vec!["title"]);
  assert_eq!(manager.own_required[0].provenance, Provenance::Own);
  assert_eq!(manager.super_required[0].provenance, Provenance::Inherited);
  assert_eq!(manager.super_required[0].declared_by, "Base");
}

#[test]
fn test_discriminator_values_across_levels() {
  let graph = graph(fish_models());
  let config = GeneratorConfig::default();

  let fish = classify(&graph, &config, "Fish").unwrap();
  assert_eq!(fish.dispatch.as_deref(), Some("fishtype"));
  assert_eq!(fish.discriminators[0].discriminator_value.as_deref(), Some("fish"));

  let shark = classify(&graph, &config, "Shark").unwrap();
  assert!(shark.dispatches_on("sharktype"));
  let values: Vec<_> = shark
    .discriminators
    .iter()
    .map(|property| (property.serialized_name.as_str(), property.discriminator_value.as_deref()))
    .collect();
  assert_eq!(values, vec![("fishtype", Some("shark")), ("sharktype", Some("shark"))]);

  let sawshark = classify(&graph, &config, "Sawshark").unwrap();
  assert!(!sawshark.is_dispatch_root());
  let values: Vec<_> = sawshark
    .discriminators
    .iter()
    .map(|property| property.discriminator_value.as_deref())
    .collect();
  assert_eq!(values, vec![Some("shark"), Some("sawshark")]);
  assert_eq!(names(sawshark.super_required.iter()), vec!["length", "birthday"]);
  assert_eq!(names(sawshark.own_setter.iter()), vec!["picture"]);
}

#[test]
fn test_self_parent_is_a_cycle() {
  let graph = graph(json!([{"name": "Loop", "parent": "Loop", "properties": []}]));
  let errors = classify(&graph, &GeneratorConfig::default(), "Loop").unwrap_err();
  assert!(matches!(&errors[0], GenerationError::SchemaCycle { model, .. } if model == "Loop"));
}

#[test]
fn test_missing_discriminator_property() {
  let graph = graph(json!([
    {"name": "Animal", "discriminator": "kind", "properties": [{"name": "name", "type": "string"}]},
    {"name": "Dog", "parent": "Animal", "properties": []}
  ]));
  let errors = classify(&graph, &GeneratorConfig::default(), "Dog").unwrap_err();
  assert!(matches!(
    &errors[0],
    GenerationError::MissingDiscriminatorAccessor { discriminator, .. } if discriminator == "kind"
  ));
}

#[test]
fn test_flatten_path_colliding_with_plain_property() {
  let graph = graph(json!([{
    "name": "Resource",
    "properties": [
      {"name": "meta", "type": "string"},
      {"name": "owner", "serializedName": "meta.owner", "type": "string", "flatten": true}
    ]
  }]));
  let errors = classify(&graph, &GeneratorConfig::default(), "Resource").unwrap_err();
  assert_eq!(
    errors,
    vec![GenerationError::DuplicateFlattenPath {
      model: "Resource".to_string(),
      property: "owner".to_string(),
      path: "meta.owner".to_string(),
    }]
  );
}

#[test]
fn test_invalid_property_shapes_are_attributed_to_declaring_model() {
  let graph = graph(json!([
    {
      "name": "Base",
      "properties": [
        {"name": "count", "type": "int32", "required": true, "constant": "many"},
        {"name": "rest", "type": "list<string>", "additionalProperties": true},
        {"name": "target", "type": "Missing"}
      ]
    },
    {"name": "Derived", "parent": "Base", "properties": []}
  ]));
  let errors = classify(&graph, &GeneratorConfig::default(), "Derived").unwrap_err();

  assert_eq!(errors.len(), 3);
  assert!(errors.iter().all(|error| error.model() == "Base"));
  assert!(errors.iter().any(|error| matches!(error, GenerationError::InvalidConstant { .. })));
  assert!(
    errors
      .iter()
      .any(|error| matches!(error, GenerationError::InvalidAdditionalProperties { .. }))
  );
  assert!(errors.iter().any(|error| matches!(error, GenerationError::UnknownWireType { .. })));
}

#[test]
fn test_cyclic_model_fields_are_boxed() {
  let manager = classify_model(
    json!([
      {"name": "Node", "properties": [
        {"name": "next", "type": "Node"},
        {"name": "children", "type": "list<Node>"}
      ]}
    ]),
    "Node",
  );
  let boxed: Vec<_> = manager.own_setter.iter().map(|property| property.boxed).collect();
  assert_eq!(boxed, vec![true, false]);
}

#[test]
fn test_generated_names_avoid_property_locals() {
  let manager = classify_model(
    json!([{
      "name": "Clash",
      "properties": [
        {"name": "field_name", "type": "string"},
        {"name": "reader", "type": "string"}
      ]
    }]),
    "Clash",
  );
  assert_eq!(manager.names.field_name.as_str(), "json_field_name");
  assert_eq!(manager.names.element_name.as_str(), "element_name");
  assert_eq!(manager.names.deserialized.as_str(), "deserialized_clash");
  assert_eq!(manager.own_setter[1].local.as_str(), "reader_value");
}

#[test]
fn test_renamed_locals_do_not_collide_with_siblings() {
  let manager = classify_model(
    json!([{
      "name": "Pipe",
      "properties": [
        {"name": "reader", "type": "string", "required": true},
        {"name": "readerValue", "type": "string", "required": true},
        {"name": "deserialized_pipe", "type": "string"}
      ]
    }]),
    "Pipe",
  );
  let locals: Vec<_> = manager.ordinary().map(|property| property.local.as_str()).collect();
  assert_eq!(locals, vec!["reader_value2", "reader_value", "deserialized_pipe"]);
  assert_eq!(manager.names.deserialized.as_str(), "deserialized_pipe2");
}

#[test]
fn test_xml_attribute_and_text_must_be_scalar() {
  let graph = graph_with_enums(
    json!([
      {"name": "Tag", "xml": {}, "properties": []},
      {
        "name": "Label",
        "xml": {},
        "properties": [
          {"name": "codes", "type": "list<string>", "xml": {"attribute": true}},
          {"name": "body", "type": "Tag", "xml": {"text": true}},
          {"name": "breed", "type": "enum<DogKind>", "xml": {"attribute": true}},
          {"name": "ttl", "type": "duration", "xml": {"attribute": true}}
        ]
      }
    ]),
    kind_enums(),
  );
  let errors = classify(&graph, &GeneratorConfig::default(), "Label").unwrap_err();
  assert_eq!(
    errors,
    vec![
      GenerationError::InvalidXmlShape {
        model: "Label".to_string(),
        property: "codes".to_string(),
        wire_type: "list<string>".to_string(),
      },
      GenerationError::InvalidXmlShape {
        model: "Label".to_string(),
        property: "body".to_string(),
        wire_type: "Tag".to_string(),
      },
    ]
  );
}

#[test]
fn test_enum_typed_discriminators() {
  let graph = graph_with_enums(
    json!([
      {"name": "Dog", "discriminator": "kind", "properties": [{"name": "kind", "type": "enum<DogKind>", "required": true}]},
      {"name": "Poodle", "serializedName": "poodle", "parent": "Dog", "properties": []},
      {"name": "Snake", "discriminator": "kind", "properties": [{"name": "kind", "type": "enum<SnakeKind>", "required": true}]},
      {"name": "Cobra", "serializedName": "cobra", "parent": "Snake", "properties": []},
      {"name": "Viper", "serializedName": "viper", "parent": "Snake", "properties": []}
    ]),
    kind_enums(),
  );
  let config = GeneratorConfig::default();

  let poodle = classify(&graph, &config, "Poodle").unwrap();
  assert_eq!(poodle.discriminators[0].discriminator_value.as_deref(), Some("poodle"));
  let snake = classify(&graph, &config, "Snake").unwrap();
  assert_eq!(snake.discriminators[0].discriminator_value.as_deref(), Some("Snake"));
  assert!(classify(&graph, &config, "Cobra").is_ok());

  let errors = classify(&graph, &config, "Viper").unwrap_err();
  assert_eq!(
    errors,
    vec![GenerationError::UnknownDiscriminatorValue {
      model: "Viper".to_string(),
      value: "viper".to_string(),
      enum_name: "SnakeKind".to_string(),
    }]
  );
}

#[test]
fn test_unknown_enum_reference() {
  let graph = graph(json!([{"name": "Pet", "properties": [{"name": "kind", "type": "enum<Missing>"}]}]));
  let errors = classify(&graph, &GeneratorConfig::default(), "Pet").unwrap_err();
  assert_eq!(
    errors,
    vec![GenerationError::UnknownWireType {
      model: "Pet".to_string(),
      property: "kind".to_string(),
      wire_type: "enum<Missing>".to_string(),
    }]
  );
}
