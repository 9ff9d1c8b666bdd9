//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Records
//! Source: fixtures/flatten.json
//! Version: 1.0.0
//! Generated by `streamgen`
//!
//! Flattened property paths and a catch-all for unknown fields.
#![allow(unused_imports, unused_mut, clippy::large_enum_variant, clippy::too_many_arguments, clippy::needless_borrow)]

use streamgen_support::{
  IndexMap, JsonReader, JsonSerializable, JsonToken, JsonWriter, MergePatchState, StreamError, chrono, serde_json,
  uuid, wire,
};
#[derive(Debug, Clone, PartialEq)]
pub struct Bag {
  known: Option<i32>,
  properties: Option<IndexMap<String, serde_json::Value>>,
}
impl Bag {
  pub fn new() -> Self {
    Self {
      known: None,
      properties: None,
    }
  }
  pub fn kind(&self) -> &'static str {
    "bag"
  }
  pub fn known(&self) -> Option<i32> {
    self.known
  }
  pub fn set_known(&mut self, value: Option<i32>) -> &mut Self {
    self.known = value;
    self
  }
  pub fn properties(&self) -> Option<&IndexMap<String, serde_json::Value>> {
    self.properties.as_ref()
  }
  pub fn set_properties(&mut self, value: Option<IndexMap<String, serde_json::Value>>) -> &mut Self {
    self.properties = value;
    self
  }
}
impl Default for Bag {
  fn default() -> Self {
    Self::new()
  }
}
impl JsonSerializable for Bag {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_string_field("kind", "bag")?;
    if let Some(value) = &self.known {
      writer.write_i32_field("known", *value)?;
    }
    if let Some(value) = &self.properties {
      for (key, element) in value {
        writer.write_field_name(key)?;
        writer.write_untyped(element)?;
      }
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut deserialized_bag = Bag::new();
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "kind" {
            reader.skip_children();
          } else if field_name == "known" {
            deserialized_bag.known = reader.get_nullable(|reader| reader.get_i32())?;
          } else {
            deserialized_bag
              .properties
              .get_or_insert_with(IndexMap::new)
              .insert(field_name, reader.read_untyped()?);
          }
        }
        Ok(deserialized_bag)
      })
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
  id: String,
  owner_name: Option<String>,
  owner_age: Option<i32>,
  tag: Option<String>,
}
impl Record {
  pub fn new(id: String) -> Self {
    Self {
      id,
      owner_name: None,
      owner_age: None,
      tag: None,
    }
  }
  pub fn id(&self) -> &str {
    &self.id
  }
  pub fn owner_name(&self) -> Option<&str> {
    self.owner_name.as_deref()
  }
  pub fn set_owner_name(&mut self, value: Option<String>) -> &mut Self {
    self.owner_name = value;
    self
  }
  pub fn owner_age(&self) -> Option<i32> {
    self.owner_age
  }
  pub fn set_owner_age(&mut self, value: Option<i32>) -> &mut Self {
    self.owner_age = value;
    self
  }
  pub fn tag(&self) -> Option<&str> {
    self.tag.as_deref()
  }
  pub fn set_tag(&mut self, value: Option<String>) -> &mut Self {
    self.tag = value;
    self
  }
}
impl JsonSerializable for Record {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_string_field("id", &self.id)?;
    if self.owner_name.is_some() || self.owner_age.is_some() || self.tag.is_some() {
      writer.write_start_object_field("meta")?;
      if self.owner_name.is_some() || self.owner_age.is_some() {
        writer.write_start_object_field("owner")?;
        if let Some(value) = &self.owner_name {
          writer.write_string_field("name", value)?;
        }
        if let Some(value) = &self.owner_age {
          writer.write_i32_field("age", *value)?;
        }
        writer.write_end_object()?;
      }
      if let Some(value) = &self.tag {
        writer.write_string_field("tag", value)?;
      }
      writer.write_end_object()?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut id = None;
        let mut owner_name = None;
        let mut owner_age = None;
        let mut tag = None;
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "id" {
            id = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "meta" {
            if reader.current_token() == Some(JsonToken::StartObject) {
              while reader.next_token() == JsonToken::FieldName {
                let field_name = reader.field_name()?;
                reader.next_token();
                if field_name == "owner" {
                  if reader.current_token() == Some(JsonToken::StartObject) {
                    while reader.next_token() == JsonToken::FieldName {
                      let field_name = reader.field_name()?;
                      reader.next_token();
                      if field_name == "name" {
                        owner_name = reader.get_nullable(|reader| reader.get_string())?;
                      } else if field_name == "age" {
                        owner_age = reader.get_nullable(|reader| reader.get_i32())?;
                      } else {
                        reader.skip_children();
                      }
                    }
                  } else {
                    reader.skip_children();
                  }
                } else if field_name == "tag" {
                  tag = reader.get_nullable(|reader| reader.get_string())?;
                } else {
                  reader.skip_children();
                }
              }
            } else {
              reader.skip_children();
            }
          } else {
            reader.skip_children();
          }
        }
        match id {
          Some(id) => {
            let mut deserialized_record = Record::new(id);
            deserialized_record.owner_name = owner_name;
            deserialized_record.owner_age = owner_age;
            deserialized_record.tag = tag;
            Ok(deserialized_record)
          }
          None => Err(StreamError::missing_required([(true, "id")])),
        }
      })
  }
}
