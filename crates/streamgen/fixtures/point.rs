//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Points
//! Source: fixtures/point.json
//! Version: 1.0.0
//! Generated by `streamgen`
//!
//! Required constructor arguments and a list of nested models.
#![allow(unused_imports, unused_mut, clippy::large_enum_variant, clippy::too_many_arguments, clippy::needless_borrow)]

use streamgen_support::{
  IndexMap, JsonReader, JsonSerializable, JsonToken, JsonWriter, MergePatchState, StreamError, chrono, serde_json,
  uuid, wire,
};
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
  x: i32,
  y: i32,
}
impl Point {
  pub fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
  pub fn x(&self) -> i32 {
    self.x
  }
  pub fn y(&self) -> i32 {
    self.y
  }
}
impl JsonSerializable for Point {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_i32_field("x", self.x)?;
    writer.write_i32_field("y", self.y)?;
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut x = None;
        let mut y = None;
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "x" {
            x = reader.get_nullable(|reader| reader.get_i32())?;
          } else if field_name == "y" {
            y = reader.get_nullable(|reader| reader.get_i32())?;
          } else {
            reader.skip_children();
          }
        }
        match (x, y) {
          (Some(x), Some(y)) => Ok(Point::new(x, y)),
          (x, y) => Err(StreamError::missing_required([(x.is_none(), "x"), (y.is_none(), "y")])),
        }
      })
  }
}
/// An ordered run of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
  points: Vec<Point>,
  label: Option<String>,
  weights: Option<IndexMap<String, Vec<f64>>>,
}
impl Polyline {
  pub fn new(points: Vec<Point>) -> Self {
    Self {
      points,
      label: None,
      weights: None,
    }
  }
  pub fn points(&self) -> &[Point] {
    &self.points
  }
  pub fn label(&self) -> Option<&str> {
    self.label.as_deref()
  }
  pub fn set_label(&mut self, value: Option<String>) -> &mut Self {
    self.label = value;
    self
  }
  pub fn weights(&self) -> Option<&IndexMap<String, Vec<f64>>> {
    self.weights.as_ref()
  }
  pub fn set_weights(&mut self, value: Option<IndexMap<String, Vec<f64>>>) -> &mut Self {
    self.weights = value;
    self
  }
}
impl JsonSerializable for Polyline {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_array_field("points", &self.points, |writer, element| element.to_json(writer))?;
    if let Some(value) = &self.label {
      writer.write_string_field("label", value)?;
    }
    if let Some(value) = &self.weights {
      writer
        .write_map_field(
          "weights",
          value,
          |writer, element| writer.write_array(element, |writer1, element1| writer1.write_f64(*element1)),
        )?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut points = None;
        let mut label = None;
        let mut weights = None;
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "points" {
            points = reader
              .read_array(|reader| {
                Point::from_json(reader)?.ok_or(StreamError::unexpected_null("START_OBJECT"))
              })?;
          } else if field_name == "label" {
            label = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "weights" {
            weights = reader
              .read_map(|reader| {
                reader
                  .read_array(|reader1| reader1.get_f64())?
                  .ok_or(StreamError::unexpected_null("START_ARRAY"))
              })?;
          } else {
            reader.skip_children();
          }
        }
        match points {
          Some(points) => {
            let mut deserialized_polyline = Polyline::new(points);
            deserialized_polyline.label = label;
            deserialized_polyline.weights = weights;
            Ok(deserialized_polyline)
          }
          None => Err(StreamError::missing_required([(true, "points")])),
        }
      })
  }
}
