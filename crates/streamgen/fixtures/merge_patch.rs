//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Profiles
//! Source: fixtures/merge_patch.json
//! Version: 1.0.0
//! Generated by `streamgen`
//!
//! Models sent as JSON merge patches.
#![allow(unused_imports, unused_mut, clippy::large_enum_variant, clippy::too_many_arguments, clippy::needless_borrow)]

use streamgen_support::{
  IndexMap, JsonReader, JsonSerializable, JsonToken, JsonWriter, MergePatchState, StreamError, chrono, serde_json,
  uuid, wire,
};
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
  city: Option<String>,
  street: Option<String>,
  merge_patch: MergePatchState,
}
impl Address {
  pub fn new() -> Self {
    Self {
      city: None,
      street: None,
      merge_patch: MergePatchState::new(),
    }
  }
  pub fn city(&self) -> Option<&str> {
    self.city.as_deref()
  }
  pub fn set_city(&mut self, value: Option<String>) -> &mut Self {
    self.city = value;
    self.merge_patch.mark("city");
    self
  }
  pub fn street(&self) -> Option<&str> {
    self.street.as_deref()
  }
  pub fn set_street(&mut self, value: Option<String>) -> &mut Self {
    self.street = value;
    self.merge_patch.mark("street");
    self
  }
  /// Switches `to_json` to writing only the properties set since construction.
  pub fn serialize_as_json_merge_patch(&mut self, enabled: bool) -> &mut Self {
    self.merge_patch.set_enabled(enabled);
    self
  }
}
impl Default for Address {
  fn default() -> Self {
    Self::new()
  }
}
impl Address {
  /// Writes the discriminators, the constructor properties and every property set since construction.
  pub fn to_json_merge_patch(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    if self.merge_patch.contains("city") {
      if let Some(value) = &self.city {
        writer.write_string_field("city", value)?;
      } else {
        writer.write_null_field("city")?;
      }
    }
    if self.merge_patch.contains("street") {
      if let Some(value) = &self.street {
        writer.write_string_field("street", value)?;
      } else {
        writer.write_null_field("street")?;
      }
    }
    writer.write_end_object()
  }
}
impl JsonSerializable for Address {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    if self.merge_patch.is_enabled() {
      return self.to_json_merge_patch(writer);
    }
    writer.write_start_object()?;
    if let Some(value) = &self.city {
      writer.write_string_field("city", value)?;
    }
    if let Some(value) = &self.street {
      writer.write_string_field("street", value)?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut deserialized_address = Address::new();
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "city" {
            deserialized_address.city = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "street" {
            deserialized_address.street = reader.get_nullable(|reader| reader.get_string())?;
          } else {
            reader.skip_children();
          }
        }
        Ok(deserialized_address)
      })
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
  name: Option<String>,
  bio: Option<String>,
  address: Option<Address>,
  merge_patch: MergePatchState,
}
impl Profile {
  pub fn new() -> Self {
    Self {
      name: None,
      bio: None,
      address: None,
      merge_patch: MergePatchState::new(),
    }
  }
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
  pub fn set_name(&mut self, value: Option<String>) -> &mut Self {
    self.name = value;
    self.merge_patch.mark("name");
    self
  }
  pub fn bio(&self) -> Option<&str> {
    self.bio.as_deref()
  }
  pub fn set_bio(&mut self, value: Option<String>) -> &mut Self {
    self.bio = value;
    self.merge_patch.mark("bio");
    self
  }
  pub fn address(&self) -> Option<&Address> {
    self.address.as_ref()
  }
  pub fn set_address(&mut self, value: Option<Address>) -> &mut Self {
    self.address = value;
    self.merge_patch.mark("address");
    self
  }
  /// Switches `to_json` to writing only the properties set since construction.
  pub fn serialize_as_json_merge_patch(&mut self, enabled: bool) -> &mut Self {
    self.merge_patch.set_enabled(enabled);
    self
  }
}
impl Default for Profile {
  fn default() -> Self {
    Self::new()
  }
}
impl Profile {
  /// Writes the discriminators, the constructor properties and every property set since construction.
  pub fn to_json_merge_patch(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    if self.merge_patch.contains("name") {
      if let Some(value) = &self.name {
        writer.write_string_field("name", value)?;
      } else {
        writer.write_null_field("name")?;
      }
    }
    if self.merge_patch.contains("bio") {
      if let Some(value) = &self.bio {
        writer.write_string_field("bio", value)?;
      } else {
        writer.write_null_field("bio")?;
      }
    }
    if self.merge_patch.contains("address") {
      if let Some(value) = &self.address {
        writer.write_field_name("address")?;
        value.to_json_merge_patch(writer)?;
      } else {
        writer.write_null_field("address")?;
      }
    }
    writer.write_end_object()
  }
}
impl JsonSerializable for Profile {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    if self.merge_patch.is_enabled() {
      return self.to_json_merge_patch(writer);
    }
    writer.write_start_object()?;
    if let Some(value) = &self.name {
      writer.write_string_field("name", value)?;
    }
    if let Some(value) = &self.bio {
      writer.write_string_field("bio", value)?;
    }
    if let Some(value) = &self.address {
      writer.write_field_name("address")?;
      value.to_json(writer)?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut deserialized_profile = Profile::new();
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "name" {
            deserialized_profile.name = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "bio" {
            deserialized_profile.bio = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "address" {
            deserialized_profile.address = Address::from_json(reader)?;
          } else {
            reader.skip_children();
          }
        }
        Ok(deserialized_profile)
      })
  }
}
