//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Shapes
//! Source: fixtures/dispatch.json
//! Version: 1.0.0
//! Generated by `streamgen`
//!
//! Discriminated shapes with a nested discriminator on quadrilaterals.
#![allow(unused_imports, unused_mut, clippy::large_enum_variant, clippy::too_many_arguments, clippy::needless_borrow)]

use streamgen_support::{
  IndexMap, JsonReader, JsonSerializable, JsonToken, JsonWriter, MergePatchState, StreamError, chrono, serde_json,
  uuid, wire,
};
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
  shapes: Option<Vec<ShapeVariant>>,
}
impl Canvas {
  pub fn new() -> Self {
    Self { shapes: None }
  }
  pub fn shapes(&self) -> Option<&[ShapeVariant]> {
    self.shapes.as_deref()
  }
  pub fn set_shapes(&mut self, value: Option<Vec<ShapeVariant>>) -> &mut Self {
    self.shapes = value;
    self
  }
}
impl Default for Canvas {
  fn default() -> Self {
    Self::new()
  }
}
impl JsonSerializable for Canvas {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    if let Some(value) = &self.shapes {
      writer.write_array_field("shapes", value, |writer, element| element.to_json(writer))?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut deserialized_canvas = Canvas::new();
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "shapes" {
            deserialized_canvas.shapes = reader
              .read_array(|reader| {
                ShapeVariant::from_json(reader)?.ok_or(StreamError::unexpected_null("START_OBJECT"))
              })?;
          } else {
            reader.skip_children();
          }
        }
        Ok(deserialized_canvas)
      })
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
  kind: String,
  name: Option<String>,
  radius: f64,
}
impl Circle {
  pub fn new(radius: f64) -> Self {
    Self {
      kind: String::from("circle"),
      name: None,
      radius,
    }
  }
  pub fn kind(&self) -> &str {
    &self.kind
  }
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
  pub fn set_name(&mut self, value: Option<String>) -> &mut Self {
    self.name = value;
    self
  }
  pub fn radius(&self) -> f64 {
    self.radius
  }
}
impl JsonSerializable for Circle {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_string_field("kind", &self.kind)?;
    if let Some(value) = &self.name {
      writer.write_string_field("name", value)?;
    }
    writer.write_f64_field("radius", self.radius)?;
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut name = None;
        let mut radius = None;
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "kind" {
            let kind = reader.get_nullable(|reader| reader.get_string())?;
            if kind.as_deref() != Some("circle") {
              return Err(StreamError::unexpected_discriminator("kind", "circle", kind));
            }
          } else if field_name == "name" {
            name = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "radius" {
            radius = reader.get_nullable(|reader| reader.get_f64())?;
          } else {
            reader.skip_children();
          }
        }
        match radius {
          Some(radius) => {
            let mut deserialized_circle = Circle::new(radius);
            deserialized_circle.name = name;
            Ok(deserialized_circle)
          }
          None => Err(StreamError::missing_required([(true, "radius")])),
        }
      })
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
  kind: String,
  quad_kind: String,
  name: Option<String>,
}
impl Quad {
  pub fn new() -> Self {
    Self {
      kind: String::from("quad"),
      quad_kind: String::from("quad"),
      name: None,
    }
  }
  pub fn kind(&self) -> &str {
    &self.kind
  }
  pub fn quad_kind(&self) -> &str {
    &self.quad_kind
  }
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
  pub fn set_name(&mut self, value: Option<String>) -> &mut Self {
    self.name = value;
    self
  }
}
impl Default for Quad {
  fn default() -> Self {
    Self::new()
  }
}
impl Quad {
  /// Reads this exact type without looking at derived models.
  pub fn from_json_known_discriminator(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut deserialized_quad = Quad::new();
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "kind" {
            let kind = reader.get_nullable(|reader| reader.get_string())?;
            if kind.as_deref() != Some("quad") {
              return Err(StreamError::unexpected_discriminator("kind", "quad", kind));
            }
          } else if field_name == "quadKind" {
            if let Some(quad_kind) = reader.get_nullable(|reader| reader.get_string())? {
              deserialized_quad.quad_kind = quad_kind;
            }
          } else if field_name == "name" {
            deserialized_quad.name = reader.get_nullable(|reader| reader.get_string())?;
          } else {
            reader.skip_children();
          }
        }
        Ok(deserialized_quad)
      })
  }
}
impl JsonSerializable for Quad {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_string_field("kind", &self.kind)?;
    writer.write_string_field("quadKind", &self.quad_kind)?;
    if let Some(value) = &self.name {
      writer.write_string_field("name", value)?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    Self::from_json_known_discriminator(reader)
  }
}
/// `Quad` or any model derived from it, chosen by the discriminator on read.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadVariant {
  Rectangle(Rectangle),
  Quad(Quad),
}
impl From<Rectangle> for QuadVariant {
  fn from(value: Rectangle) -> Self {
    Self::Rectangle(value)
  }
}
impl From<Quad> for QuadVariant {
  fn from(value: Quad) -> Self {
    Self::Quad(value)
  }
}
impl JsonSerializable for QuadVariant {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    match self {
      Self::Rectangle(model) => model.to_json(writer),
      Self::Quad(model) => model.to_json(writer),
    }
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    let Some(buffered) = reader.buffer_object()? else {
      return Ok(None);
    };
    let mut scan = buffered.reset();
    let mut discriminator_value = None;
    scan.next_token();
    while scan.next_token() == JsonToken::FieldName {
      let field_name = scan.field_name()?;
      scan.next_token();
      if field_name == "quadKind" {
        discriminator_value = scan.get_nullable(|reader| reader.get_string())?;
        break;
      }
      scan.skip_children();
    }
    match discriminator_value.as_deref() {
      Some("rectangle") => Ok(Rectangle::from_json(&mut buffered.reset())?.map(Self::Rectangle)),
      _ => Ok(Quad::from_json_known_discriminator(&mut buffered.reset())?.map(Self::Quad)),
    }
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
  kind: String,
  quad_kind: String,
  name: Option<String>,
  width: f64,
  height: f64,
}
impl Rectangle {
  pub fn new(width: f64, height: f64) -> Self {
    Self {
      kind: String::from("quad"),
      quad_kind: String::from("rectangle"),
      name: None,
      width,
      height,
    }
  }
  pub fn kind(&self) -> &str {
    &self.kind
  }
  pub fn quad_kind(&self) -> &str {
    &self.quad_kind
  }
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
  pub fn set_name(&mut self, value: Option<String>) -> &mut Self {
    self.name = value;
    self
  }
  pub fn width(&self) -> f64 {
    self.width
  }
  pub fn height(&self) -> f64 {
    self.height
  }
}
impl JsonSerializable for Rectangle {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_string_field("kind", &self.kind)?;
    writer.write_string_field("quadKind", &self.quad_kind)?;
    if let Some(value) = &self.name {
      writer.write_string_field("name", value)?;
    }
    writer.write_f64_field("width", self.width)?;
    writer.write_f64_field("height", self.height)?;
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut name = None;
        let mut width = None;
        let mut height = None;
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "kind" {
            let kind = reader.get_nullable(|reader| reader.get_string())?;
            if kind.as_deref() != Some("quad") {
              return Err(StreamError::unexpected_discriminator("kind", "quad", kind));
            }
          } else if field_name == "quadKind" {
            let quad_kind = reader.get_nullable(|reader| reader.get_string())?;
            if quad_kind.as_deref() != Some("rectangle") {
              return Err(StreamError::unexpected_discriminator("quadKind", "rectangle", quad_kind));
            }
          } else if field_name == "name" {
            name = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "width" {
            width = reader.get_nullable(|reader| reader.get_f64())?;
          } else if field_name == "height" {
            height = reader.get_nullable(|reader| reader.get_f64())?;
          } else {
            reader.skip_children();
          }
        }
        match (width, height) {
          (Some(width), Some(height)) => {
            let mut deserialized_rectangle = Rectangle::new(width, height);
            deserialized_rectangle.name = name;
            Ok(deserialized_rectangle)
          }
          (width, height) => {
            Err(StreamError::missing_required([(width.is_none(), "width"), (height.is_none(), "height")]))
          }
        }
      })
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
  kind: String,
  name: Option<String>,
}
impl Shape {
  pub fn new() -> Self {
    Self {
      kind: String::from("Shape"),
      name: None,
    }
  }
  pub fn kind(&self) -> &str {
    &self.kind
  }
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
  pub fn set_name(&mut self, value: Option<String>) -> &mut Self {
    self.name = value;
    self
  }
}
impl Default for Shape {
  fn default() -> Self {
    Self::new()
  }
}
impl Shape {
  /// Reads this exact type without looking at derived models.
  pub fn from_json_known_discriminator(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut deserialized_shape = Shape::new();
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "kind" {
            if let Some(kind) = reader.get_nullable(|reader| reader.get_string())? {
              deserialized_shape.kind = kind;
            }
          } else if field_name == "name" {
            deserialized_shape.name = reader.get_nullable(|reader| reader.get_string())?;
          } else {
            reader.skip_children();
          }
        }
        Ok(deserialized_shape)
      })
  }
}
impl JsonSerializable for Shape {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_string_field("kind", &self.kind)?;
    if let Some(value) = &self.name {
      writer.write_string_field("name", value)?;
    }
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    Self::from_json_known_discriminator(reader)
  }
}
/// `Shape` or any model derived from it, chosen by the discriminator on read.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeVariant {
  Circle(Circle),
  Square(Square),
  Quad(QuadVariant),
  Shape(Shape),
}
impl From<Circle> for ShapeVariant {
  fn from(value: Circle) -> Self {
    Self::Circle(value)
  }
}
impl From<Square> for ShapeVariant {
  fn from(value: Square) -> Self {
    Self::Square(value)
  }
}
impl From<QuadVariant> for ShapeVariant {
  fn from(value: QuadVariant) -> Self {
    Self::Quad(value)
  }
}
impl From<Shape> for ShapeVariant {
  fn from(value: Shape) -> Self {
    Self::Shape(value)
  }
}
impl JsonSerializable for ShapeVariant {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    match self {
      Self::Circle(model) => model.to_json(writer),
      Self::Square(model) => model.to_json(writer),
      Self::Quad(model) => model.to_json(writer),
      Self::Shape(model) => model.to_json(writer),
    }
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    let Some(buffered) = reader.buffer_object()? else {
      return Ok(None);
    };
    let mut scan = buffered.reset();
    let mut discriminator_value = None;
    scan.next_token();
    while scan.next_token() == JsonToken::FieldName {
      let field_name = scan.field_name()?;
      scan.next_token();
      if field_name == "kind" {
        discriminator_value = scan.get_nullable(|reader| reader.get_string())?;
        break;
      }
      scan.skip_children();
    }
    match discriminator_value.as_deref() {
      Some("circle") => Ok(Circle::from_json(&mut buffered.reset())?.map(Self::Circle)),
      Some("square") => Ok(Square::from_json(&mut buffered.reset())?.map(Self::Square)),
      Some("quad") => Ok(QuadVariant::from_json(&mut buffered.reset())?.map(Self::Quad)),
      _ => Ok(Shape::from_json_known_discriminator(&mut buffered.reset())?.map(Self::Shape)),
    }
  }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
  kind: String,
  name: Option<String>,
  side: f64,
}
impl Square {
  pub fn new(side: f64) -> Self {
    Self {
      kind: String::from("square"),
      name: None,
      side,
    }
  }
  pub fn kind(&self) -> &str {
    &self.kind
  }
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
  pub fn set_name(&mut self, value: Option<String>) -> &mut Self {
    self.name = value;
    self
  }
  pub fn side(&self) -> f64 {
    self.side
  }
}
impl JsonSerializable for Square {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
    writer.write_start_object()?;
    writer.write_string_field("kind", &self.kind)?;
    if let Some(value) = &self.name {
      writer.write_string_field("name", value)?;
    }
    writer.write_f64_field("side", self.side)?;
    writer.write_end_object()
  }
  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
    reader
      .read_object(|reader| {
        let mut name = None;
        let mut side = None;
        while reader.next_token() == JsonToken::FieldName {
          let field_name = reader.field_name()?;
          reader.next_token();
          if field_name == "kind" {
            let kind = reader.get_nullable(|reader| reader.get_string())?;
            if kind.as_deref() != Some("square") {
              return Err(StreamError::unexpected_discriminator("kind", "square", kind));
            }
          } else if field_name == "name" {
            name = reader.get_nullable(|reader| reader.get_string())?;
          } else if field_name == "side" {
            side = reader.get_nullable(|reader| reader.get_f64())?;
          } else {
            reader.skip_children();
          }
        }
        match side {
          Some(side) => {
            let mut deserialized_square = Square::new(side);
            deserialized_square.name = name;
            Ok(deserialized_square)
          }
          None => Err(StreamError::missing_required([(true, "side")])),
        }
      })
  }
}
