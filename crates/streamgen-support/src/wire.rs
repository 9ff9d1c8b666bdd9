//! Conversions between client representations and their textual wire forms.
//!
//! JSON and XML readers/writers share these so both formats agree on how a
//! date, a unix timestamp or a byte array looks on the wire.

use std::{fmt::Write, str::FromStr};

use base64::{
  Engine,
  engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, TimeDelta, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::StreamError;

#[must_use]
pub fn format_date_time(value: &DateTime<FixedOffset>) -> String {
  value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn parse_date_time(text: &str) -> Result<DateTime<FixedOffset>, StreamError> {
  DateTime::parse_from_rfc3339(text).map_err(|_| StreamError::invalid_value("date-time", text))
}

/// Formats in the RFC 1123 layout HTTP headers use, always in GMT.
#[must_use]
pub fn format_date_time_rfc1123(value: &DateTime<Utc>) -> String {
  value.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub fn parse_date_time_rfc1123(text: &str) -> Result<DateTime<Utc>, StreamError> {
  DateTime::parse_from_rfc2822(text.trim())
    .map(|value| value.with_timezone(&Utc))
    .map_err(|_| StreamError::invalid_value("date-time-rfc1123", text))
}

#[must_use]
pub fn format_date(value: &NaiveDate) -> String {
  value.format("%Y-%m-%d").to_string()
}

pub fn parse_date(text: &str) -> Result<NaiveDate, StreamError> {
  NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| StreamError::invalid_value("date", text))
}

#[must_use]
pub fn to_unix_time(value: &DateTime<Utc>) -> i64 {
  value.timestamp()
}

pub fn from_unix_time(seconds: i64) -> Result<DateTime<Utc>, StreamError> {
  DateTime::from_timestamp(seconds, 0).ok_or_else(|| StreamError::invalid_value("unix-time", seconds.to_string()))
}

/// Formats as an ISO 8601 duration with days as the largest unit, e.g. `P1DT2H30M` or `-PT0.5S`.
#[must_use]
pub fn format_duration(value: &TimeDelta) -> String {
  if value.is_zero() {
    return "PT0S".to_string();
  }

  let sign = if *value < TimeDelta::zero() { "-" } else { "" };
  let magnitude = value.abs();
  let seconds = magnitude.num_seconds();
  let nanos = magnitude.subsec_nanos();
  let (days, hours, minutes, seconds) = (seconds / 86_400, seconds % 86_400 / 3_600, seconds % 3_600 / 60, seconds % 60);

  let mut text = format!("{sign}P");
  if days > 0 {
    let _ = write!(text, "{days}D");
  }
  if hours > 0 || minutes > 0 || seconds > 0 || nanos > 0 {
    text.push('T');
    if hours > 0 {
      let _ = write!(text, "{hours}H");
    }
    if minutes > 0 {
      let _ = write!(text, "{minutes}M");
    }
    if nanos > 0 {
      let fraction = format!("{nanos:09}");
      let _ = write!(text, "{seconds}.{}S", fraction.trim_end_matches('0'));
    } else if seconds > 0 {
      let _ = write!(text, "{seconds}S");
    }
  }
  text
}

/// Parses an ISO 8601 duration. Years and months have no fixed length and are rejected; weeks,
/// days, hours, minutes and (fractional) seconds are accepted.
pub fn parse_duration(text: &str) -> Result<TimeDelta, StreamError> {
  let invalid = || StreamError::invalid_value("duration", text);
  let trimmed = text.trim();
  let (negative, unsigned) = match trimmed.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
  };
  let body = unsigned.strip_prefix('P').ok_or_else(invalid)?;
  let (date, time) = match body.split_once('T') {
    Some((_, "")) => return Err(invalid()),
    Some((date, time)) => (date, time),
    None => (body, ""),
  };
  if date.is_empty() && time.is_empty() {
    return Err(invalid());
  }

  let mut total = TimeDelta::zero();
  for (amount, unit) in duration_components(date).ok_or_else(invalid)? {
    let unit_seconds = match unit {
      'W' => 604_800,
      'D' => 86_400,
      _ => return Err(invalid()),
    };
    let part = whole_units(amount, unit_seconds).ok_or_else(invalid)?;
    total = total.checked_add(&part).ok_or_else(invalid)?;
  }
  for (amount, unit) in duration_components(time).ok_or_else(invalid)? {
    let part = match unit {
      'H' => whole_units(amount, 3_600),
      'M' => whole_units(amount, 60),
      'S' => fractional_seconds(amount),
      _ => None,
    }
    .ok_or_else(invalid)?;
    total = total.checked_add(&part).ok_or_else(invalid)?;
  }

  Ok(if negative { -total } else { total })
}

/// Splits `12H30M` into `[("12", 'H'), ("30", 'M')]`; `None` when a number or unit is missing.
fn duration_components(text: &str) -> Option<Vec<(&str, char)>> {
  let mut components = vec![];
  let mut start = 0;
  for (index, c) in text.char_indices() {
    if c.is_ascii_alphabetic() {
      let amount = &text[start..index];
      if amount.is_empty() {
        return None;
      }
      components.push((amount, c));
      start = index + c.len_utf8();
    }
  }
  (start == text.len()).then_some(components)
}

fn whole_units(amount: &str, unit_seconds: i64) -> Option<TimeDelta> {
  if !amount.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let seconds = amount.parse::<i64>().ok()?.checked_mul(unit_seconds)?;
  TimeDelta::try_seconds(seconds)
}

fn fractional_seconds(amount: &str) -> Option<TimeDelta> {
  let (whole, fraction) = amount.split_once(['.', ',']).unwrap_or((amount, ""));
  let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
  if whole.is_empty() || !digits(whole) || !digits(fraction) || fraction.len() > 9 {
    return None;
  }
  let nanos = if fraction.is_empty() {
    0
  } else {
    format!("{fraction:0<9}").parse::<u32>().ok()?
  };
  TimeDelta::new(whole.parse().ok()?, nanos)
}

#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
  STANDARD.encode(bytes)
}

pub fn decode_base64(text: &str) -> Result<Vec<u8>, StreamError> {
  STANDARD
    .decode(text)
    .map_err(|_| StreamError::invalid_value("base64", text))
}

#[must_use]
pub fn encode_base64url(bytes: &[u8]) -> String {
  URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes unpadded base64url, tolerating trailing `=` padding from lenient producers.
pub fn decode_base64url(text: &str) -> Result<Vec<u8>, StreamError> {
  URL_SAFE_NO_PAD
    .decode(text.trim_end_matches('='))
    .map_err(|_| StreamError::invalid_value("base64url", text))
}

pub fn parse_uuid(text: &str) -> Result<Uuid, StreamError> {
  Uuid::parse_str(text).map_err(|_| StreamError::invalid_value("uuid", text))
}

/// Parses XML text content into any scalar with a [`FromStr`] implementation.
pub fn parse_value<T: FromStr>(kind: &'static str, text: &str) -> Result<T, StreamError> {
  text.trim().parse().map_err(|_| StreamError::invalid_value(kind, text))
}

/// Parses the wire text of a generated string enum.
pub fn parse_enum<T: FromStr<Err = StreamError>>(text: &str) -> Result<T, StreamError> {
  text.trim().parse()
}

/// The XML text of an untyped value: strings unquoted, anything else as compact JSON.
#[must_use]
pub fn untyped_to_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, TimeZone};

  use super::*;

  #[test]
  fn test_date_time_keeps_offset() {
    let parsed = parse_date_time("2024-03-01T10:15:30+02:00").unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 7200);
    assert_eq!(format_date_time(&parsed), "2024-03-01T10:15:30+02:00");
  }

  #[test]
  fn test_date_round_trip() {
    let date = parse_date("2023-12-31").unwrap();
    assert_eq!(date.year(), 2023);
    assert_eq!(format_date(&date), "2023-12-31");
    assert!(parse_date("31/12/2023").is_err());
  }

  #[test]
  fn test_unix_time() {
    let value = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(to_unix_time(&value), 1_577_836_800);
    assert_eq!(from_unix_time(1_577_836_800).unwrap(), value);
  }

  #[test]
  fn test_base64url_is_unpadded() {
    assert_eq!(encode_base64url(b"hi?"), "aGk_");
    assert_eq!(encode_base64url(b"h"), "aA");
    assert_eq!(decode_base64url("aA==").unwrap(), b"h".to_vec());
    assert_eq!(decode_base64(&encode_base64(b"bytes")).unwrap(), b"bytes".to_vec());
  }

  #[test]
  fn test_rfc1123_is_always_gmt() {
    let value = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
    assert_eq!(format_date_time_rfc1123(&value), "Sun, 06 Nov 1994 08:49:37 GMT");
    assert_eq!(parse_date_time_rfc1123("Sun, 06 Nov 1994 08:49:37 GMT").unwrap(), value);
    assert_eq!(parse_date_time_rfc1123("Sun, 06 Nov 1994 10:49:37 +0200").unwrap(), value);
    assert!(parse_date_time_rfc1123("1994-11-06T08:49:37Z").is_err());
  }

  #[test]
  fn test_duration_formatting() {
    assert_eq!(format_duration(&TimeDelta::zero()), "PT0S");
    assert_eq!(format_duration(&TimeDelta::seconds(93_784)), "P1DT2H3M4S");
    assert_eq!(format_duration(&TimeDelta::hours(48)), "P2D");
    assert_eq!(format_duration(&TimeDelta::milliseconds(1_500)), "PT1.5S");
    assert_eq!(format_duration(&-TimeDelta::minutes(90)), "-PT1H30M");
  }

  #[test]
  fn test_duration_parsing() {
    assert_eq!(parse_duration("P1DT2H3M4S").unwrap(), TimeDelta::seconds(93_784));
    assert_eq!(parse_duration("PT36H").unwrap(), TimeDelta::hours(36));
    assert_eq!(parse_duration("P2W").unwrap(), TimeDelta::days(14));
    assert_eq!(parse_duration("PT0.25S").unwrap(), TimeDelta::milliseconds(250));
    assert_eq!(parse_duration("-PT1H30M").unwrap(), -TimeDelta::minutes(90));
    assert_eq!(parse_duration(&format_duration(&TimeDelta::milliseconds(-1_500))).unwrap(), TimeDelta::milliseconds(-1_500));
  }

  #[test]
  fn test_duration_rejects_calendar_units_and_gaps() {
    for text in ["P1Y", "P1M", "PT", "P", "1H", "PTH", "PT1.5H", "PT1.1234567891S", "P1DT"] {
      let error = parse_duration(text).unwrap_err();
      assert_eq!(error.to_string(), format!("invalid duration value '{text}'"), "{text}");
    }
  }

  #[test]
  fn test_untyped_text() {
    assert_eq!(untyped_to_text(&Value::String("plain".to_string())), "plain");
    assert_eq!(untyped_to_text(&serde_json::json!({"a": [1, true]})), r#"{"a":[1,true]}"#);
  }

  #[test]
  fn test_parse_value_reports_kind() {
    assert_eq!(parse_value::<i32>("int32", " 42 ").unwrap(), 42);
    let error = parse_value::<i32>("int32", "forty").unwrap_err();
    assert_eq!(error.to_string(), "invalid int32 value 'forty'");
  }
}
