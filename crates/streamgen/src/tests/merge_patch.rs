use streamgen_support::JsonSerializable;

use crate::fixtures::merge_patch::*;

#[test]
fn test_merge_patch_writes_only_updated_properties() {
  let mut profile = Profile::from_json_str(r#"{"name":"a","bio":"b"}"#).unwrap().unwrap();
  profile.set_bio(Some("c".to_string()));

  profile.serialize_as_json_merge_patch(true);
  assert_eq!(profile.to_json_string().unwrap(), r#"{"bio":"c"}"#);

  profile.serialize_as_json_merge_patch(false);
  assert_eq!(profile.to_json_string().unwrap(), r#"{"name":"a","bio":"c"}"#);
}

#[test]
fn test_cleared_property_is_written_as_null() {
  let mut profile = Profile::new();
  profile.set_name(None).serialize_as_json_merge_patch(true);
  assert_eq!(profile.to_json_string().unwrap(), r#"{"name":null}"#);
}

#[test]
fn test_untouched_model_patches_to_empty_object() {
  let mut profile = Profile::from_json_str(r#"{"name":"a","address":{"city":"Oslo"}}"#)
    .unwrap()
    .unwrap();
  profile.serialize_as_json_merge_patch(true);
  assert_eq!(profile.to_json_string().unwrap(), "{}");
}

#[test]
fn test_nested_model_patches_its_own_updates() {
  let mut address = Address::new();
  address.set_city(Some("Paris".to_string())).set_street(None);
  let mut profile = Profile::new();
  profile.set_address(Some(address)).serialize_as_json_merge_patch(true);

  assert_eq!(
    profile.to_json_string().unwrap(),
    r#"{"address":{"city":"Paris","street":null}}"#
  );

  profile.serialize_as_json_merge_patch(false);
  assert_eq!(profile.to_json_string().unwrap(), r#"{"address":{"city":"Paris"}}"#);
}

#[test]
fn test_patch_tracking_does_not_affect_equality() {
  let mut built = Profile::new();
  built.set_name(Some("x".to_string()));
  let read = Profile::from_json_str(r#"{"name":"x"}"#).unwrap().unwrap();
  assert_eq!(built, read);
}
