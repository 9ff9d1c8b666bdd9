use serde_json::json;

use super::generate;
use crate::generator::tests::fish_models;

#[test]
fn test_optional_values_are_null_guarded() {
  let code = generate(json!([{
    "name": "Pet",
    "properties": [
      {"name": "name", "type": "string", "required": true},
      {"name": "age", "type": "int32"},
      {"name": "photo", "type": "bytes"}
    ]
  }]));
  code.assert_contains(r#"writer.write_start_object()?; writer.write_string_field("name", &self.name)?;"#);
  code.assert_contains(r#"if let Some(value) = &self.age { writer.write_i32_field("age", *value)?; }"#);
  code.assert_contains(r#"if let Some(value) = &self.photo { writer.write_bytes_field("photo", value)?; }"#);
  code.assert_contains("writer.write_end_object() }");
}

#[test]
fn test_single_obligation_match() {
  let code = generate(json!([{
    "name": "Pet",
    "properties": [
      {"name": "name", "type": "string", "required": true},
      {"name": "age", "type": "int32"}
    ]
  }]));
  code.assert_contains("reader.read_object(|reader| { let mut name = None; let mut age = None;");
  code.assert_contains("while reader.next_token() == JsonToken::FieldName { let field_name = reader.field_name()?; reader.next_token();");
  code.assert_contains(r#"if field_name == "name" { name = reader.get_nullable(|reader| reader.get_string())?; }"#);
  code.assert_contains("else { reader.skip_children(); }");
  code.assert_contains(
    r#"match name {
      Some(name) => { let mut deserialized_pet = Pet::new(name); deserialized_pet.age = age; Ok(deserialized_pet) }
      None => Err(StreamError::missing_required([(true, "name")])),
    }"#,
  );
}

#[test]
fn test_obligations_are_checked_together() {
  let code = generate(json!([{
    "name": "Pair",
    "properties": [
      {"name": "a", "type": "int32", "required": true},
      {"name": "b", "type": "int32", "required": true, "readOnly": true}
    ]
  }]));
  code.assert_contains(
    r#"match (a, b) {
      (Some(a), Some(b)) => { let mut deserialized_pair = Pair::new(a); deserialized_pair.b = Some(b); Ok(deserialized_pair) }
      (a, b) => Err(StreamError::missing_required([(a.is_none(), "a"), (b.is_none(), "b")])),
    }"#,
  );
}

#[test]
fn test_model_without_obligations_reads_in_place() {
  let code = generate(json!([{
    "name": "Options",
    "properties": [{"name": "verbose", "type": "boolean"}]
  }]));
  code.assert_contains("let mut deserialized_options = Options::new();");
  code.assert_contains(
    r#"if field_name == "verbose" { deserialized_options.verbose = reader.get_nullable(|reader| reader.get_bool())?; }"#,
  );
  code.assert_contains("Ok(deserialized_options) })");
}

#[test]
fn test_nested_containers_recurse_by_depth() {
  let code = generate(json!([{
    "name": "Grid",
    "properties": [
      {"name": "cells", "type": "list<list<int32>>"},
      {"name": "labels", "type": "map<list<string>>"}
    ]
  }]));
  code.assert_contains(
    r#"writer.write_array_field("cells", value, |writer, element| writer.write_array(element, |writer1, element1| writer1.write_i32(*element1)))?;"#,
  );
  code.assert_contains(
    r#"writer.write_map_field("labels", value, |writer, element| writer.write_array(element, |writer1, element1| writer1.write_string(element1)))?;"#,
  );
  code.assert_contains(
    r#"reader.read_array(|reader| reader.read_array(|reader1| reader1.get_i32())?.ok_or(StreamError::unexpected_null("START_ARRAY")))?"#,
  );
  code.assert_contains(
    r#"reader.read_map(|reader| reader.read_array(|reader1| reader1.get_string())?.ok_or(StreamError::unexpected_null("START_ARRAY")))?"#,
  );
}

#[test]
fn test_flattened_properties_nest_objects() {
  let code = generate(json!([{
    "name": "Resource",
    "properties": [
      {"name": "id", "type": "string", "required": true},
      {"name": "owner", "serializedName": "properties.owner", "type": "string", "flatten": true},
      {"name": "city", "serializedName": "properties.address.city", "type": "string", "flatten": true}
    ]
  }]));
  code.assert_contains(
    r#"if self.owner.is_some() || self.city.is_some() {
      writer.write_start_object_field("properties")?;
      if let Some(value) = &self.owner { writer.write_string_field("owner", value)?; }
      if self.city.is_some() {
        writer.write_start_object_field("address")?;
        if let Some(value) = &self.city { writer.write_string_field("city", value)?; }
        writer.write_end_object()?;
      }
      writer.write_end_object()?;
    }"#,
  );
  code.assert_contains(
    r#"else if field_name == "properties" {
      if reader.current_token() == Some(JsonToken::StartObject) {
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "owner" { owner = reader.get_nullable(|reader| reader.get_string())?; }"#,
  );
}

#[test]
fn test_additional_properties_capture_unknown_fields() {
  let code = generate(json!([{
    "name": "Bag",
    "properties": [
      {"name": "label", "type": "string"},
      {"name": "kind", "type": "string", "required": true, "constant": "bag"},
      {"name": "extra", "type": "map<int64>", "additionalProperties": true}
    ]
  }]));
  code.assert_contains(r#"writer.write_string_field("kind", "bag")?;"#);
  code.assert_contains(r#"if field_name == "kind" { reader.skip_children(); }"#);
  code.assert_contains(
    "else { deserialized_bag.extra.get_or_insert_with(IndexMap::new).insert(field_name, reader.get_i64()?); }",
  );
  code.assert_contains(
    "if let Some(value) = &self.extra { for (key, element) in value { writer.write_field_name(key)?; writer.write_i64(*element)?; } }",
  );
  code.assert_contains("pub fn set_extra(&mut self, value: Option<IndexMap<String, i64>>) -> &mut Self");
}

#[test]
fn test_merge_patch_writes_updated_properties_only() {
  let code = generate(json!([
    {
      "name": "Patch",
      "mergePatch": true,
      "properties": [
        {"name": "id", "type": "string", "required": true},
        {"name": "b", "type": "int32"},
        {"name": "inner", "type": "Inner"}
      ]
    },
    {"name": "Inner", "mergePatch": true, "properties": [{"name": "x", "type": "string"}]}
  ]));
  code.assert_contains(
    "fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> { if self.merge_patch.is_enabled() { return self.to_json_merge_patch(writer); }",
  );
  code.assert_contains(
    r#"if self.merge_patch.contains("b") {
      if let Some(value) = &self.b { writer.write_i32_field("b", *value)?; } else { writer.write_null_field("b")?; }
    }"#,
  );
  code.assert_contains(r#"writer.write_field_name("inner")?; value.to_json_merge_patch(writer)?;"#);
  code.assert_contains(r#"writer.write_field_name("inner")?; value.to_json(writer)?;"#);
}

#[test]
fn test_subtype_validates_discriminator() {
  let code = generate(fish_models());
  code.assert_contains(
    r#"if field_name == "fishtype" {
      let fishtype = reader.get_nullable(|reader| reader.get_string())?;
      if fishtype.as_deref() != Some("salmon") {
        return Err(StreamError::unexpected_discriminator("fishtype", "salmon", fishtype));
      }
    }"#,
  );
  code.assert_contains(r#"Self { fishtype: String::from("salmon"), length, species: None, location: None, iswild: None, }"#);
}

#[test]
fn test_dispatch_root_keeps_discriminator() {
  let code = generate(fish_models());
  code.assert_contains(r#"if field_name == "fishtype" { fishtype = reader.get_nullable(|reader| reader.get_string())?; }"#);
  code.assert_contains("if let Some(fishtype) = fishtype { deserialized_fish.fishtype = fishtype; }");
  code.assert_contains(
    "pub fn from_json_known_discriminator(reader: &mut JsonReader) -> Result<Option<Self>, StreamError>",
  );
  code.assert_contains(
    "impl JsonSerializable for Fish { fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {",
  );
  code.assert_contains(
    "fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> { Self::from_json_known_discriminator(reader) }",
  );
}

#[test]
fn test_output_is_ordered_and_stable() {
  let models = json!([
    {"name": "Zebra", "properties": []},
    {"name": "Apple", "properties": [{"name": "z", "type": "Zebra"}]}
  ]);
  let first = generate(models.clone());
  let second = generate(models);
  assert_eq!(first.0, second.0);
  assert!(first.position("pub struct Apple") < first.position("pub struct Zebra"));
  first.assert_contains(
    "use streamgen_support::{IndexMap, JsonReader, JsonSerializable, JsonToken, JsonWriter, MergePatchState, StreamError, chrono, serde_json, uuid, wire,};",
  );
  first.assert_not_contains("XmlReader");
}
