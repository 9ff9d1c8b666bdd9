use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use super::JsonSerializable;
use crate::{StreamError, wire};

#[derive(Debug, Clone, Copy)]
enum Scope {
  Object { empty: bool, awaiting_value: bool },
  Array { empty: bool },
}

macro_rules! field_writers {
  ($($field:ident => $value:ident($ty:ty);)*) => {
    $(
      pub fn $field(&mut self, name: &str, value: $ty) -> Result<(), StreamError> {
        self.write_field_name(name)?;
        self.$value(value)
      }
    )*
  };
}

/// A compact JSON writer that tracks object/array nesting to place separators.
#[derive(Debug, Default)]
pub struct JsonWriter {
  output: String,
  scopes: Vec<Scope>,
  root_written: bool,
}

impl JsonWriter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  fn begin_value(&mut self) -> Result<(), StreamError> {
    match self.scopes.last_mut() {
      None if self.root_written => return Err(StreamError::InvalidWriterState("a second root value")),
      None => self.root_written = true,
      Some(Scope::Array { empty }) => {
        if !*empty {
          self.output.push(',');
        }
        *empty = false;
      }
      Some(Scope::Object { awaiting_value, .. }) => {
        if !*awaiting_value {
          return Err(StreamError::InvalidWriterState("a value without a field name"));
        }
        *awaiting_value = false;
      }
    }
    Ok(())
  }

  fn write_raw_value(&mut self, raw: &str) -> Result<(), StreamError> {
    self.begin_value()?;
    self.output.push_str(raw);
    Ok(())
  }

  pub fn write_field_name(&mut self, name: &str) -> Result<(), StreamError> {
    let Some(Scope::Object { empty, awaiting_value }) = self.scopes.last_mut() else {
      return Err(StreamError::InvalidWriterState("a field name"));
    };
    if *awaiting_value {
      return Err(StreamError::InvalidWriterState("a field name"));
    }
    let needs_separator = !*empty;
    *empty = false;
    *awaiting_value = true;

    if needs_separator {
      self.output.push(',');
    }
    self.output.push_str(&serde_json::to_string(name)?);
    self.output.push(':');
    Ok(())
  }

  pub fn write_start_object(&mut self) -> Result<(), StreamError> {
    self.begin_value()?;
    self.output.push('{');
    self.scopes.push(Scope::Object {
      empty: true,
      awaiting_value: false,
    });
    Ok(())
  }

  pub fn write_end_object(&mut self) -> Result<(), StreamError> {
    match self.scopes.pop() {
      Some(Scope::Object {
        awaiting_value: false, ..
      }) => {
        self.output.push('}');
        Ok(())
      }
      _ => Err(StreamError::InvalidWriterState("the end of an object")),
    }
  }

  pub fn write_start_array(&mut self) -> Result<(), StreamError> {
    self.begin_value()?;
    self.output.push('[');
    self.scopes.push(Scope::Array { empty: true });
    Ok(())
  }

  pub fn write_end_array(&mut self) -> Result<(), StreamError> {
    match self.scopes.pop() {
      Some(Scope::Array { .. }) => {
        self.output.push(']');
        Ok(())
      }
      _ => Err(StreamError::InvalidWriterState("the end of an array")),
    }
  }

  /// Opens a nested object under `name`.
  pub fn write_start_object_field(&mut self, name: &str) -> Result<(), StreamError> {
    self.write_field_name(name)?;
    self.write_start_object()
  }

  pub fn write_null(&mut self) -> Result<(), StreamError> {
    self.write_raw_value("null")
  }

  pub fn write_null_field(&mut self, name: &str) -> Result<(), StreamError> {
    self.write_field_name(name)?;
    self.write_null()
  }

  pub fn write_string(&mut self, value: &str) -> Result<(), StreamError> {
    let raw = serde_json::to_string(value)?;
    self.write_raw_value(&raw)
  }

  pub fn write_bool(&mut self, value: bool) -> Result<(), StreamError> {
    self.write_raw_value(if value { "true" } else { "false" })
  }

  pub fn write_i32(&mut self, value: i32) -> Result<(), StreamError> {
    self.write_raw_value(&value.to_string())
  }

  pub fn write_i64(&mut self, value: i64) -> Result<(), StreamError> {
    self.write_raw_value(&value.to_string())
  }

  /// Non-finite floats have no JSON spelling and are written as `null`.
  pub fn write_f32(&mut self, value: f32) -> Result<(), StreamError> {
    self.write_f64(f64::from(value))
  }

  pub fn write_f64(&mut self, value: f64) -> Result<(), StreamError> {
    self.write_raw_value(&Value::from(value).to_string())
  }

  pub fn write_date_time(&mut self, value: &DateTime<FixedOffset>) -> Result<(), StreamError> {
    self.write_string(&wire::format_date_time(value))
  }

  pub fn write_date_time_rfc1123(&mut self, value: &DateTime<Utc>) -> Result<(), StreamError> {
    self.write_string(&wire::format_date_time_rfc1123(value))
  }

  pub fn write_duration(&mut self, value: &TimeDelta) -> Result<(), StreamError> {
    self.write_string(&wire::format_duration(value))
  }

  pub fn write_date(&mut self, value: &NaiveDate) -> Result<(), StreamError> {
    self.write_string(&wire::format_date(value))
  }

  pub fn write_unix_time(&mut self, value: &DateTime<Utc>) -> Result<(), StreamError> {
    self.write_i64(wire::to_unix_time(value))
  }

  pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), StreamError> {
    self.write_string(&wire::encode_base64(value))
  }

  pub fn write_base64url(&mut self, value: &[u8]) -> Result<(), StreamError> {
    self.write_string(&wire::encode_base64url(value))
  }

  pub fn write_uuid(&mut self, value: &Uuid) -> Result<(), StreamError> {
    self.write_string(&value.hyphenated().to_string())
  }

  pub fn write_untyped(&mut self, value: &Value) -> Result<(), StreamError> {
    self.write_raw_value(&value.to_string())
  }

  field_writers! {
    write_string_field => write_string(&str);
    write_bool_field => write_bool(bool);
    write_i32_field => write_i32(i32);
    write_i64_field => write_i64(i64);
    write_f32_field => write_f32(f32);
    write_f64_field => write_f64(f64);
    write_date_time_field => write_date_time(&DateTime<FixedOffset>);
    write_date_time_rfc1123_field => write_date_time_rfc1123(&DateTime<Utc>);
    write_duration_field => write_duration(&TimeDelta);
    write_date_field => write_date(&NaiveDate);
    write_unix_time_field => write_unix_time(&DateTime<Utc>);
    write_bytes_field => write_bytes(&[u8]);
    write_base64url_field => write_base64url(&[u8]);
    write_uuid_field => write_uuid(&Uuid);
    write_untyped_field => write_untyped(&Value);
  }

  pub fn write_json<T: JsonSerializable>(&mut self, value: &T) -> Result<(), StreamError> {
    value.to_json(self)
  }

  pub fn write_json_field<T: JsonSerializable>(&mut self, name: &str, value: &T) -> Result<(), StreamError> {
    self.write_field_name(name)?;
    value.to_json(self)
  }

  pub fn write_array<T>(
    &mut self,
    values: &[T],
    mut write: impl FnMut(&mut Self, &T) -> Result<(), StreamError>,
  ) -> Result<(), StreamError> {
    self.write_start_array()?;
    for value in values {
      write(self, value)?;
    }
    self.write_end_array()
  }

  pub fn write_array_field<T>(
    &mut self,
    name: &str,
    values: &[T],
    write: impl FnMut(&mut Self, &T) -> Result<(), StreamError>,
  ) -> Result<(), StreamError> {
    self.write_field_name(name)?;
    self.write_array(values, write)
  }

  pub fn write_map<T>(
    &mut self,
    values: &IndexMap<String, T>,
    mut write: impl FnMut(&mut Self, &T) -> Result<(), StreamError>,
  ) -> Result<(), StreamError> {
    self.write_start_object()?;
    for (key, value) in values {
      self.write_field_name(key)?;
      write(self, value)?;
    }
    self.write_end_object()
  }

  pub fn write_map_field<T>(
    &mut self,
    name: &str,
    values: &IndexMap<String, T>,
    write: impl FnMut(&mut Self, &T) -> Result<(), StreamError>,
  ) -> Result<(), StreamError> {
    self.write_field_name(name)?;
    self.write_map(values, write)
  }

  /// Returns the written document, failing if an object or array was left open.
  pub fn finish(self) -> Result<String, StreamError> {
    if self.scopes.is_empty() {
      Ok(self.output)
    } else {
      Err(StreamError::InvalidWriterState("finishing a document"))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_writes_nested_structures() {
    let mut writer = JsonWriter::new();
    writer.write_start_object().unwrap();
    writer.write_i32_field("x", 1).unwrap();
    writer.write_start_object_field("meta").unwrap();
    writer.write_string_field("name", "a\"b").unwrap();
    writer.write_end_object().unwrap();
    writer
      .write_array_field("tags", &["t1".to_string(), "t2".to_string()], |writer, element| {
        writer.write_string(element)
      })
      .unwrap();
    writer.write_null_field("gone").unwrap();
    writer.write_end_object().unwrap();

    assert_eq!(
      writer.finish().unwrap(),
      r#"{"x":1,"meta":{"name":"a\"b"},"tags":["t1","t2"],"gone":null}"#
    );
  }

  #[test]
  fn test_nested_containers_use_inner_writers() {
    let mut values = IndexMap::new();
    values.insert("k".to_string(), vec![vec![1, 2], vec![]]);

    let mut writer = JsonWriter::new();
    writer
      .write_map(&values, |writer, element| {
        writer.write_array(element, |writer1, element1| {
          writer1.write_array(element1, |writer2, element2| writer2.write_i32(*element2))
        })
      })
      .unwrap();
    assert_eq!(writer.finish().unwrap(), r#"{"k":[[1,2],[]]}"#);
  }

  #[test]
  fn test_rejects_value_without_field_name() {
    let mut writer = JsonWriter::new();
    writer.write_start_object().unwrap();
    assert!(writer.write_i32(1).is_err());
  }

  #[test]
  fn test_finish_rejects_open_scope() {
    let mut writer = JsonWriter::new();
    writer.write_start_array().unwrap();
    assert!(writer.finish().is_err());
  }

  #[test]
  fn test_float_and_binary_encodings() {
    let mut writer = JsonWriter::new();
    writer.write_start_object().unwrap();
    writer.write_f64_field("f", 1.5).unwrap();
    writer.write_f64_field("nan", f64::NAN).unwrap();
    writer.write_bytes_field("b", b"hi").unwrap();
    writer.write_end_object().unwrap();
    assert_eq!(writer.finish().unwrap(), r#"{"f":1.5,"nan":null,"b":"aGk="}"#);
  }

  #[test]
  fn test_duration_and_rfc1123_fields() {
    let mut writer = JsonWriter::new();
    writer.write_start_object().unwrap();
    writer.write_duration_field("ttl", &TimeDelta::hours(26)).unwrap();
    let modified = DateTime::from_timestamp(784_903_526, 0).unwrap();
    writer.write_date_time_rfc1123_field("modified", &modified).unwrap();
    writer.write_end_object().unwrap();
    assert_eq!(
      writer.finish().unwrap(),
      r#"{"ttl":"P1DT2H","modified":"Tue, 15 Nov 1994 12:45:26 GMT"}"#
    );
  }
}
