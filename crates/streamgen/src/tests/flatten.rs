use serde_json::json;
use streamgen_support::JsonSerializable;

use crate::fixtures::flatten::*;

#[test]
fn test_flattened_properties_write_nested_objects() {
  let mut record = Record::new("r1".to_string());
  record.set_owner_name(Some("Ada".to_string())).set_owner_age(Some(36));
  assert_eq!(
    record.to_json_string().unwrap(),
    r#"{"id":"r1","meta":{"owner":{"name":"Ada","age":36}}}"#
  );
}

#[test]
fn test_empty_flatten_wrappers_are_omitted() {
  let mut record = Record::new("r1".to_string());
  assert_eq!(record.to_json_string().unwrap(), r#"{"id":"r1"}"#);

  record.set_tag(Some("t".to_string()));
  assert_eq!(record.to_json_string().unwrap(), r#"{"id":"r1","meta":{"tag":"t"}}"#);
}

#[test]
fn test_flattened_properties_read_from_nested_objects() {
  let record = Record::from_json_str(
    r#"{"meta":{"tag":"t","owner":{"age":36,"name":"Ada","extra":true},"other":[1]},"id":"r1"}"#,
  )
  .unwrap()
  .unwrap();
  assert_eq!(record.id(), "r1");
  assert_eq!(record.owner_name(), Some("Ada"));
  assert_eq!(record.owner_age(), Some(36));
  assert_eq!(record.tag(), Some("t"));
}

#[test]
fn test_null_or_scalar_flatten_wrapper_is_skipped() {
  for input in [r#"{"id":"r1","meta":null}"#, r#"{"id":"r1","meta":{"owner":7}}"#] {
    let record = Record::from_json_str(input).unwrap().unwrap();
    assert_eq!(record, Record::new("r1".to_string()), "{input}");
  }
}

#[test]
fn test_flattened_record_still_requires_id() {
  let error = Record::from_json_str(r#"{"meta":{"tag":"t"}}"#).unwrap_err();
  assert_eq!(error.to_string(), "Missing required property: id");
}

#[test]
fn test_additional_properties_capture_unknown_fields() {
  let bag = Bag::from_json_str(r#"{"kind":"bag","known":1,"extra":"x","nested":{"a":[1,2]}}"#)
    .unwrap()
    .unwrap();
  assert_eq!(bag.kind(), "bag");
  assert_eq!(bag.known(), Some(1));

  let properties = bag.properties().unwrap();
  assert_eq!(properties.keys().collect::<Vec<_>>(), vec!["extra", "nested"]);
  assert_eq!(properties["extra"], json!("x"));
  assert_eq!(properties["nested"], json!({"a": [1, 2]}));

  assert_eq!(
    bag.to_json_string().unwrap(),
    r#"{"kind":"bag","known":1,"extra":"x","nested":{"a":[1,2]}}"#
  );
}

#[test]
fn test_constant_is_written_without_storage() {
  let bag = Bag::new();
  assert_eq!(bag.to_json_string().unwrap(), r#"{"kind":"bag"}"#);

  let read = Bag::from_json_str(r#"{"kind":"other"}"#).unwrap().unwrap();
  assert_eq!(read.properties(), None);
  assert_eq!(read.kind(), "bag");
}
