mod reader;
mod writer;

use std::fmt::{Display, Formatter};

pub use reader::JsonReader;
pub use writer::JsonWriter;

use crate::StreamError;

/// The kind of token a [`JsonReader`] is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonToken {
  StartObject,
  EndObject,
  StartArray,
  EndArray,
  FieldName,
  String,
  Number,
  Boolean,
  Null,
  EndDocument,
}

impl Display for JsonToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::StartObject => "START_OBJECT",
      Self::EndObject => "END_OBJECT",
      Self::StartArray => "START_ARRAY",
      Self::EndArray => "END_ARRAY",
      Self::FieldName => "FIELD_NAME",
      Self::String => "STRING",
      Self::Number => "NUMBER",
      Self::Boolean => "BOOLEAN",
      Self::Null => "NULL",
      Self::EndDocument => "END_DOCUMENT",
    };
    f.write_str(name)
  }
}

/// A model that can write itself to, and read itself from, a JSON token stream.
///
/// `from_json` returns `Ok(None)` when the reader is positioned on a JSON `null`.
pub trait JsonSerializable: Sized {
  fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError>;

  fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError>;

  fn to_json_string(&self) -> Result<String, StreamError> {
    let mut writer = JsonWriter::new();
    self.to_json(&mut writer)?;
    writer.finish()
  }

  fn from_json_str(json: &str) -> Result<Option<Self>, StreamError> {
    let mut reader = JsonReader::parse(json)?;
    Self::from_json(&mut reader)
  }
}
