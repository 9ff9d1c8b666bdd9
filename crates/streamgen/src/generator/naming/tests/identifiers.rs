use std::collections::HashSet;

use crate::generator::naming::identifiers::{
  local_name, sanitize, setter_name, to_rust_field_name, to_rust_type_name, unique_name, variant_enum_name,
};

#[test]
fn test_field_names() {
  let cases = [
    ("foo-bar", "foo_bar"),
    ("ownerName", "owner_name"),
    ("match", "r#match"),
    ("type", "r#type"),
    ("self", "self_"),
    ("123name", "_123name"),
    ("", "_"),
    ("  ", "_"),
    ("@odata.type", "odata_type"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_rust_field_name(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_type_names() {
  let cases = [
    ("circle", "Circle"),
    ("shape_kind", "ShapeKind"),
    ("shape-kind", "ShapeKind"),
    ("XMLParser", "XMLParser"),
    ("oAuth", "OAuth"),
    ("DELETE", "Delete"),
    ("123Response", "T123Response"),
    ("", "Unnamed"),
    ("Result", "ResultModel"),
    ("string", "StringModel"),
    ("JsonReader", "JsonReaderModel"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_rust_type_name(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_sanitize_collapses_invalid_runs() {
  assert_eq!(sanitize("--a..b__c--"), "a_b_c");
  assert_eq!(sanitize("café"), "cafe");
  assert_eq!(sanitize(""), "");
}

#[test]
fn test_derived_names() {
  assert_eq!(setter_name("radius"), "set_radius");
  assert_eq!(setter_name("r#type"), "set_type");
  assert_eq!(variant_enum_name("Shape"), "ShapeVariant");
}

#[test]
fn test_local_names_avoid_emitted_bindings() {
  let none = HashSet::new();
  assert_eq!(local_name("radius", &none), "radius");
  assert_eq!(local_name("r#type", &none), "r#type");
  assert_eq!(local_name("reader", &none), "reader_value");
  assert_eq!(local_name("reader2", &none), "reader2_value");
  assert_eq!(local_name("text", &none), "text_value");
  assert_eq!(local_name("readers", &none), "readers");
}

#[test]
fn test_renamed_locals_skip_taken_names() {
  let taken: HashSet<String> = ["reader_value", "reader_value2"].map(String::from).into();
  assert_eq!(local_name("reader", &taken), "reader_value3");
  assert_eq!(local_name("radius", &taken), "radius");
  assert_eq!(unique_name("deserialized_pet", &taken), "deserialized_pet");
}
