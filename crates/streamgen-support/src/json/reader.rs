use std::{str::FromStr, sync::Arc};

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use super::JsonToken;
use crate::{StreamError, wire};

#[derive(Debug, Clone, PartialEq)]
enum Event {
  StartObject,
  EndObject,
  StartArray,
  EndArray,
  FieldName(String),
  String(String),
  Number(Number),
  Boolean(bool),
  Null,
}

impl Event {
  const fn token(&self) -> JsonToken {
    match self {
      Self::StartObject => JsonToken::StartObject,
      Self::EndObject => JsonToken::EndObject,
      Self::StartArray => JsonToken::StartArray,
      Self::EndArray => JsonToken::EndArray,
      Self::FieldName(_) => JsonToken::FieldName,
      Self::String(_) => JsonToken::String,
      Self::Number(_) => JsonToken::Number,
      Self::Boolean(_) => JsonToken::Boolean,
      Self::Null => JsonToken::Null,
    }
  }
}

fn tokenize(value: &Value, events: &mut Vec<Event>) {
  match value {
    Value::Null => events.push(Event::Null),
    Value::Bool(value) => events.push(Event::Boolean(*value)),
    Value::Number(value) => events.push(Event::Number(value.clone())),
    Value::String(value) => events.push(Event::String(value.clone())),
    Value::Array(items) => {
      events.push(Event::StartArray);
      for item in items {
        tokenize(item, events);
      }
      events.push(Event::EndArray);
    }
    Value::Object(fields) => {
      events.push(Event::StartObject);
      for (name, field) in fields {
        events.push(Event::FieldName(name.clone()));
        tokenize(field, events);
      }
      events.push(Event::EndObject);
    }
  }
}

/// A pull reader over a parsed JSON document.
///
/// The document is tokenized up front, which makes [`JsonReader::buffer_object`] and
/// [`JsonReader::reset`] cheap: a buffered reader is a window over the same shared tokens.
/// A fresh reader is positioned before its first token, so `current_token` is `None`
/// until `next_token` is called.
#[derive(Debug, Clone)]
pub struct JsonReader {
  events: Arc<[Event]>,
  start: usize,
  end: usize,
  position: Option<usize>,
}

impl JsonReader {
  pub fn parse(json: &str) -> Result<Self, StreamError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(Self::from_value(&value))
  }

  pub fn from_slice(json: &[u8]) -> Result<Self, StreamError> {
    let value: Value = serde_json::from_slice(json)?;
    Ok(Self::from_value(&value))
  }

  #[must_use]
  pub fn from_value(value: &Value) -> Self {
    let mut events = Vec::new();
    tokenize(value, &mut events);
    let end = events.len();
    Self {
      events: events.into(),
      start: 0,
      end,
      position: None,
    }
  }

  /// Advances to the next token, returning [`JsonToken::EndDocument`] once the window is exhausted.
  pub fn next_token(&mut self) -> JsonToken {
    let next = match self.position {
      None => self.start,
      Some(position) => (position + 1).min(self.end),
    };
    self.position = Some(next);
    self.current_token().unwrap_or(JsonToken::EndDocument)
  }

  #[must_use]
  pub fn current_token(&self) -> Option<JsonToken> {
    self
      .position
      .map(|_| self.current().map_or(JsonToken::EndDocument, Event::token))
  }

  fn current(&self) -> Option<&Event> {
    self
      .position
      .filter(|position| *position < self.end)
      .map(|position| &self.events[position])
  }

  fn ensure_started(&mut self) {
    if self.position.is_none() {
      self.next_token();
    }
  }

  fn unexpected(&self, expected: &'static str) -> StreamError {
    StreamError::UnexpectedToken {
      expected,
      found: self.current_token().unwrap_or(JsonToken::EndDocument),
    }
  }

  pub fn field_name(&self) -> Result<String, StreamError> {
    match self.current() {
      Some(Event::FieldName(name)) => Ok(name.clone()),
      _ => Err(self.unexpected("FIELD_NAME")),
    }
  }

  /// Reads the current scalar as text. Numbers and booleans are returned in their JSON spelling.
  pub fn get_string(&self) -> Result<String, StreamError> {
    match self.current() {
      Some(Event::String(value)) => Ok(value.clone()),
      Some(Event::Number(value)) => Ok(value.to_string()),
      Some(Event::Boolean(value)) => Ok(value.to_string()),
      _ => Err(self.unexpected("STRING")),
    }
  }

  pub fn get_bool(&self) -> Result<bool, StreamError> {
    match self.current() {
      Some(Event::Boolean(value)) => Ok(*value),
      _ => Err(self.unexpected("BOOLEAN")),
    }
  }

  pub fn get_i64(&self) -> Result<i64, StreamError> {
    match self.current() {
      Some(Event::Number(value)) => value
        .as_i64()
        .ok_or_else(|| StreamError::invalid_value("int64", value.to_string())),
      _ => Err(self.unexpected("NUMBER")),
    }
  }

  pub fn get_i32(&self) -> Result<i32, StreamError> {
    let value = self.get_i64()?;
    i32::try_from(value).map_err(|_| StreamError::invalid_value("int32", value.to_string()))
  }

  pub fn get_f64(&self) -> Result<f64, StreamError> {
    match self.current() {
      Some(Event::Number(value)) => value
        .as_f64()
        .ok_or_else(|| StreamError::invalid_value("float64", value.to_string())),
      _ => Err(self.unexpected("NUMBER")),
    }
  }

  #[allow(clippy::cast_possible_truncation)]
  pub fn get_f32(&self) -> Result<f32, StreamError> {
    self.get_f64().map(|value| value as f32)
  }

  pub fn get_date_time(&self) -> Result<DateTime<FixedOffset>, StreamError> {
    wire::parse_date_time(&self.get_string()?)
  }

  pub fn get_date_time_rfc1123(&self) -> Result<DateTime<Utc>, StreamError> {
    wire::parse_date_time_rfc1123(&self.get_string()?)
  }

  pub fn get_duration(&self) -> Result<TimeDelta, StreamError> {
    wire::parse_duration(&self.get_string()?)
  }

  pub fn get_date(&self) -> Result<NaiveDate, StreamError> {
    wire::parse_date(&self.get_string()?)
  }

  pub fn get_unix_time(&self) -> Result<DateTime<Utc>, StreamError> {
    wire::from_unix_time(self.get_i64()?)
  }

  pub fn get_bytes(&self) -> Result<Vec<u8>, StreamError> {
    wire::decode_base64(&self.get_string()?)
  }

  pub fn get_base64url(&self) -> Result<Vec<u8>, StreamError> {
    wire::decode_base64url(&self.get_string()?)
  }

  pub fn get_uuid(&self) -> Result<Uuid, StreamError> {
    wire::parse_uuid(&self.get_string()?)
  }

  /// Reads a string as a generated enum, which decides whether unknown values are accepted.
  pub fn get_enum<T: FromStr<Err = StreamError>>(&self) -> Result<T, StreamError> {
    self.get_string()?.parse()
  }

  /// Runs `read` unless the reader is on a JSON `null`, in which case `None` is returned.
  pub fn get_nullable<T>(
    &mut self,
    read: impl FnOnce(&mut Self) -> Result<T, StreamError>,
  ) -> Result<Option<T>, StreamError> {
    if self.current_token() == Some(JsonToken::Null) {
      Ok(None)
    } else {
      read(self).map(Some)
    }
  }

  /// Reads the current value, including any nested structure, as an untyped [`Value`].
  pub fn read_untyped(&mut self) -> Result<Value, StreamError> {
    self.ensure_started();
    let Some(event) = self.current().cloned() else {
      return Err(self.unexpected("a value"));
    };

    match event {
      Event::StartObject => {
        let mut fields = Map::new();
        while self.next_token() != JsonToken::EndObject {
          let name = self.field_name()?;
          self.next_token();
          fields.insert(name, self.read_untyped()?);
        }
        Ok(Value::Object(fields))
      }
      Event::StartArray => {
        let mut items = Vec::new();
        while self.next_token() != JsonToken::EndArray {
          items.push(self.read_untyped()?);
        }
        Ok(Value::Array(items))
      }
      Event::String(value) => Ok(Value::String(value)),
      Event::Number(value) => Ok(Value::Number(value)),
      Event::Boolean(value) => Ok(Value::Bool(value)),
      Event::Null => Ok(Value::Null),
      Event::EndObject | Event::EndArray | Event::FieldName(_) => Err(self.unexpected("a value")),
    }
  }

  /// Moves past the children of the current object or array, leaving the reader on its end token.
  pub fn skip_children(&mut self) {
    if let Some(position) = self.position
      && matches!(self.current(), Some(Event::StartObject | Event::StartArray))
    {
      self.position = Some(self.matching_end(position));
    }
  }

  fn matching_end(&self, start: usize) -> usize {
    let mut depth = 0usize;
    for index in start..self.end {
      match self.events[index] {
        Event::StartObject | Event::StartArray => depth += 1,
        Event::EndObject | Event::EndArray => {
          depth -= 1;
          if depth == 0 {
            return index;
          }
        }
        _ => {}
      }
    }
    self.end
  }

  pub fn read_object<T>(
    &mut self,
    read: impl FnOnce(&mut Self) -> Result<T, StreamError>,
  ) -> Result<Option<T>, StreamError> {
    self.ensure_started();
    match self.current_token() {
      Some(JsonToken::Null) => Ok(None),
      Some(JsonToken::StartObject) => read(self).map(Some),
      _ => Err(self.unexpected("START_OBJECT")),
    }
  }

  pub fn read_array<T>(
    &mut self,
    mut read: impl FnMut(&mut Self) -> Result<T, StreamError>,
  ) -> Result<Option<Vec<T>>, StreamError> {
    self.ensure_started();
    match self.current_token() {
      Some(JsonToken::Null) => Ok(None),
      Some(JsonToken::StartArray) => {
        let mut items = Vec::new();
        while self.next_token() != JsonToken::EndArray {
          items.push(read(self)?);
        }
        Ok(Some(items))
      }
      _ => Err(self.unexpected("START_ARRAY")),
    }
  }

  pub fn read_map<T>(
    &mut self,
    mut read: impl FnMut(&mut Self) -> Result<T, StreamError>,
  ) -> Result<Option<IndexMap<String, T>>, StreamError> {
    self.ensure_started();
    match self.current_token() {
      Some(JsonToken::Null) => Ok(None),
      Some(JsonToken::StartObject) => {
        let mut entries = IndexMap::new();
        while self.next_token() != JsonToken::EndObject {
          let key = self.field_name()?;
          self.next_token();
          entries.insert(key, read(self)?);
        }
        Ok(Some(entries))
      }
      _ => Err(self.unexpected("START_OBJECT")),
    }
  }

  /// Captures the current object as an independent reader and moves this reader past it.
  ///
  /// The returned reader can be scanned ahead and then replayed from the start with
  /// [`JsonReader::reset`]. A JSON `null` yields `None`.
  pub fn buffer_object(&mut self) -> Result<Option<JsonReader>, StreamError> {
    self.ensure_started();
    match (self.current_token(), self.position) {
      (Some(JsonToken::Null), _) => Ok(None),
      (Some(JsonToken::StartObject), Some(start)) => {
        let end = self.matching_end(start);
        self.position = Some(end);
        Ok(Some(Self {
          events: Arc::clone(&self.events),
          start,
          end: (end + 1).min(self.end),
          position: None,
        }))
      }
      _ => Err(self.unexpected("START_OBJECT")),
    }
  }

  /// Returns a reader over the same window, positioned before its first token.
  #[must_use]
  pub fn reset(&self) -> JsonReader {
    Self {
      events: Arc::clone(&self.events),
      start: self.start,
      end: self.end,
      position: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_token_sequence() {
    let mut reader = JsonReader::parse(r#"{"a":[1,true],"b":null}"#).unwrap();
    assert_eq!(reader.current_token(), None);
    let tokens: Vec<JsonToken> = std::iter::from_fn(|| {
      let token = reader.next_token();
      (token != JsonToken::EndDocument).then_some(token)
    })
    .collect();
    assert_eq!(
      tokens,
      vec![
        JsonToken::StartObject,
        JsonToken::FieldName,
        JsonToken::StartArray,
        JsonToken::Number,
        JsonToken::Boolean,
        JsonToken::EndArray,
        JsonToken::FieldName,
        JsonToken::Null,
        JsonToken::EndObject,
      ]
    );
    assert_eq!(reader.next_token(), JsonToken::EndDocument);
  }

  #[test]
  fn test_skip_children_lands_on_end_token() {
    let mut reader = JsonReader::parse(r#"{"skip":{"deep":[1,{"x":2}]},"keep":"v"}"#).unwrap();
    reader.next_token();
    reader.next_token();
    assert_eq!(reader.field_name().unwrap(), "skip");
    reader.next_token();
    reader.skip_children();
    assert_eq!(reader.current_token(), Some(JsonToken::EndObject));
    reader.next_token();
    assert_eq!(reader.field_name().unwrap(), "keep");
    reader.next_token();
    assert_eq!(reader.get_string().unwrap(), "v");
  }

  #[test]
  fn test_buffer_object_replays_from_start() {
    let mut reader = JsonReader::parse(r#"[{"kind":"circle","radius":5},7]"#).unwrap();
    reader.next_token();
    reader.next_token();

    let buffered = reader.buffer_object().unwrap().unwrap();
    assert_eq!(reader.current_token(), Some(JsonToken::EndObject));
    assert_eq!(reader.next_token(), JsonToken::Number);
    assert_eq!(reader.get_i32().unwrap(), 7);

    let mut scan = buffered.reset();
    assert_eq!(scan.read_untyped().unwrap(), json!({"kind": "circle", "radius": 5}));
    assert_eq!(scan.next_token(), JsonToken::EndDocument);

    let mut replay = buffered.reset();
    assert_eq!(replay.next_token(), JsonToken::StartObject);
    assert_eq!(replay.next_token(), JsonToken::FieldName);
    assert_eq!(replay.field_name().unwrap(), "kind");
  }

  #[test]
  fn test_read_containers() {
    let mut reader = JsonReader::parse(r#"{"a":[1,2],"b":[3]}"#).unwrap();
    let map = reader
      .read_map(|reader| reader.read_array(|reader| reader.get_i32()))
      .unwrap()
      .unwrap();
    assert_eq!(map.get("a"), Some(&Some(vec![1, 2])));
    assert_eq!(map.get("b"), Some(&Some(vec![3])));
  }

  #[test]
  fn test_get_nullable_and_errors() {
    let mut reader = JsonReader::parse("null").unwrap();
    reader.next_token();
    assert_eq!(reader.get_nullable(|reader| reader.get_i32()).unwrap(), None);

    let mut reader = JsonReader::parse("3000000000").unwrap();
    reader.next_token();
    assert!(reader.get_i32().is_err());
    assert_eq!(reader.get_i64().unwrap(), 3_000_000_000);

    let mut reader = JsonReader::parse(r#""text""#).unwrap();
    reader.next_token();
    let error = reader.get_bool().unwrap_err();
    assert_eq!(error.to_string(), "expected BOOLEAN but found STRING");
  }

  #[derive(Debug, PartialEq)]
  enum Tier {
    Gold,
    Silver,
  }

  impl FromStr for Tier {
    type Err = StreamError;

    fn from_str(value: &str) -> Result<Self, StreamError> {
      match value {
        "gold" => Ok(Self::Gold),
        "silver" => Ok(Self::Silver),
        other => Err(StreamError::invalid_value("Tier", other)),
      }
    }
  }

  #[test]
  fn test_get_enum_uses_the_enum_parser() {
    let mut reader = JsonReader::parse(r#"["silver","bronze"]"#).unwrap();
    reader.next_token();
    reader.next_token();
    assert_eq!(reader.get_enum::<Tier>().unwrap(), Tier::Silver);
    reader.next_token();
    let error = reader.get_enum::<Tier>().unwrap_err();
    assert_eq!(error.to_string(), "invalid Tier value 'bronze'");
  }

  #[test]
  fn test_duration_and_rfc1123_getters() {
    let mut reader = JsonReader::parse(r#"["PT1M30S","Tue, 15 Nov 1994 12:45:26 GMT"]"#).unwrap();
    reader.next_token();
    reader.next_token();
    assert_eq!(reader.get_duration().unwrap(), TimeDelta::seconds(90));
    reader.next_token();
    assert_eq!(
      reader.get_date_time_rfc1123().unwrap().to_rfc3339(),
      "1994-11-15T12:45:26+00:00"
    );
  }

  #[test]
  fn test_read_object_on_null_is_none() {
    let mut reader = JsonReader::parse("null").unwrap();
    let result = reader.read_object(|_| Ok(1)).unwrap();
    assert_eq!(result, None);
  }
}
