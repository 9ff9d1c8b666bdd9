//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Pets
//! Source: fixtures/xml_pets.json
//! Version: 1.0.0
//! Generated by `streamgen`
//!
//! A namespaced XML model with attributes, lists and text content.
#![allow(unused_imports, unused_mut, clippy::large_enum_variant, clippy::too_many_arguments, clippy::needless_borrow)]

use streamgen_support::{
  IndexMap, JsonReader, JsonSerializable, JsonToken, JsonWriter, MergePatchState, StreamError, XmlReader,
  XmlSerializable, XmlToken, XmlWriter, chrono, serde_json, uuid, wire,
};
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
  lang: Option<String>,
  content: Option<String>,
}
impl Label {
  pub fn new() -> Self {
    Self { lang: None, content: None }
  }
  pub fn lang(&self) -> Option<&str> {
    self.lang.as_deref()
  }
  pub fn set_lang(&mut self, value: Option<String>) -> &mut Self {
    self.lang = value;
    self
  }
  pub fn content(&self) -> Option<&str> {
    self.content.as_deref()
  }
  pub fn set_content(&mut self, value: Option<String>) -> &mut Self {
    self.content = value;
    self
  }
}
impl Default for Label {
  fn default() -> Self {
    Self::new()
  }
}
impl JsonSerializable for Label {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    if let Some(value) = &self.lang {
      writer.write_string_field("lang", value)?;
    }
    if let Some(value) = &self.content {
      writer.write_string_field("content", value)?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut deserialized_label = Label::new();
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "lang" {
            deserialized_label.lang = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "content" {
            deserialized_label.content = reader.get_nullable(|reader| reader.get_string())?;
          } else {
            reader.skip_children();
          }
        }
        Ok(deserialized_label)
      })
  }
}
impl XmlSerializable for Label {
  fn to_xml(&self, writer: &mut XmlWriter, root_element_name: Option<&str>) -> Result<(), StreamError> {
    writer.write_start_element(root_element_name.unwrap_or("Label"))?;
    if let Some(value) = &self.lang {
      writer.write_string_attribute("lang", value)?;
    }
    if let Some(value) = &self.content {
      writer.write_string(value)?;
    }
    writer.write_end_element()
  }
  fn from_xml(reader: &mut XmlReader, root_element_name: Option<&str>) -> Result<Self, StreamError> {
    reader
      .read_object(
        None,
        root_element_name.unwrap_or("Label"),
        |reader| {
          let mut deserialized_label = Label::new();
          if let Some(text) = reader.get_string_attribute(None, "lang") {
            deserialized_label.lang = Some(text);
          }
          deserialized_label.content = Some(reader.get_string_element()?);
          Ok(deserialized_label)
        },
      )
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
  id: i32,
  name: Option<String>,
  tags: Option<Vec<String>>,
  photos: Option<Vec<String>>,
  label: Option<Label>,
}
impl Pet {
  pub fn new(id: i32) -> Self {
    Self {
      id,
      name: None,
      tags: None,
      photos: None,
      label: None,
    }
  }
  pub fn id(&self) -> i32 {
    self.id
  }
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
  pub fn set_name(&mut self, value: Option<String>) -> &mut Self {
    self.name = value;
    self
  }
  pub fn tags(&self) -> Option<&[String]> {
    self.tags.as_deref()
  }
  pub fn set_tags(&mut self, value: Option<Vec<String>>) -> &mut Self {
    self.tags = value;
    self
  }
  pub fn photos(&self) -> Option<&[String]> {
    self.photos.as_deref()
  }
  pub fn set_photos(&mut self, value: Option<Vec<String>>) -> &mut Self {
    self.photos = value;
    self
  }
  pub fn label(&self) -> Option<&Label> {
    self.label.as_ref()
  }
  pub fn set_label(&mut self, value: Option<Label>) -> &mut Self {
    self.label = value;
    self
  }
}
impl JsonSerializable for Pet {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_i32_field("id", self.id)?;
    if let Some(value) = &self.name {
      writer.write_string_field("name", value)?;
    }
    if let Some(value) = &self.tags {
      writer.write_array_field("tags", value, |writer, element| writer.write_string(element))?;
    }
    if let Some(value) = &self.photos {
      writer.write_array_field("photos", value, |writer, element| writer.write_string(element))?;
    }
    if let Some(value) = &self.label {
      writer.write_field_name("label")?;
      value.to_json(writer)?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut id = None;
        let mut name = None;
        let mut tags = None;
        let mut photos = None;
        let mut label = None;
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "id" {
            id = reader.get_nullable(|reader| reader.get_i32())?;
          } else if field_name == "name" {
            name = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "tags" {
            tags = reader.read_array(|reader| reader.get_string())?;
          } else if field_name == "photos" {
            photos = reader.read_array(|reader| reader.get_string())?;
          } else if field_name == "label" {
            label = Label::from_json(reader)?;
          } else {
            reader.skip_children();
          }
        }
        match id {
          Some(id) => {
            let mut deserialized_pet = Pet::new(id);
            deserialized_pet.name = name;
            deserialized_pet.tags = tags;
            deserialized_pet.photos = photos;
            deserialized_pet.label = label;
            Ok(deserialized_pet)
          }
          None => Err(StreamError::missing_required([(true, "id")])),
        }
      })
  }
}
impl XmlSerializable for Pet {
  fn to_xml(&self, writer: &mut XmlWriter, root_element_name: Option<&str>) -> Result<(), StreamError> {
    writer.write_start_element(root_element_name.unwrap_or("p:pet"))?;
    writer.write_namespace(Some("p"), "urn:pets")?;
    writer.write_string_attribute("id", &self.id.to_string())?;
    if let Some(value) = &self.name {
      writer.write_string_element("name", value)?;
    }
    if let Some(value) = &self.tags {
      writer.write_start_element("tags")?;
      for element in value {
        writer.write_string_element("tag", element)?;
      }
      writer.write_end_element()?;
    }
    if let Some(value) = &self.photos {
      for element in value {
        writer.write_string_element("photo", element)?;
      }
    }
    if let Some(value) = &self.label {
      value.to_xml(writer, Some("label"))?;
    }
    writer.write_end_element()
  }
  fn from_xml(reader: &mut XmlReader, root_element_name: Option<&str>) -> Result<Self, StreamError> {
    reader
      .read_object(
        None,
        root_element_name.unwrap_or("p:pet"),
        |reader| {
          let mut id = None;
          let mut name = None;
          let mut tags = None;
          let mut photos = None;
          let mut label = None;
          if let Some(text) = reader.get_string_attribute(None, "id") {
            id = Some(wire::parse_value::<i32>("int32", &text)?);
          }
          while reader.next_element() == XmlToken::StartElement {
            let element_name = reader.element_name()?;
            if element_name.is(None, "name") {
              name = Some(reader.get_string_element()?);
            } else if element_name.is(None, "tags") {
              tags = Some({
                let mut items = Vec::new();
                while reader.next_element() == XmlToken::StartElement {
                  if reader.element_name()?.is(None, "tag") {
                    items.push(reader.get_string_element()?);
                  } else {
                    reader.skip_element();
                  }
                }
                items
              });
            } else if element_name.is(None, "photo") {
              photos.get_or_insert_with(Vec::new).push(reader.get_string_element()?);
            } else if element_name.is(None, "label") {
              label = Some(Label::from_xml(reader, Some("label"))?);
            } else {
              reader.skip_element();
            }
          }
          match id {
            Some(id) => {
              let mut deserialized_pet = Pet::new(id);
              deserialized_pet.name = name;
              deserialized_pet.tags = tags;
              deserialized_pet.photos = photos;
              deserialized_pet.label = label;
              Ok(deserialized_pet)
            }
            None => Err(StreamError::missing_required([(true, "id")])),
          }
        },
      )
  }
}
