use crate::generator::model::{Primitive, WireType};

#[test]
fn test_parses_primitives_and_containers() {
  assert_eq!("duration".parse::<WireType>().unwrap(), WireType::Primitive(Primitive::Duration));
  assert_eq!(
    "date-time-rfc1123".parse::<WireType>().unwrap(),
    WireType::Primitive(Primitive::DateTimeRfc1123)
  );
  assert_eq!(
    " map< list<int32> > ".parse::<WireType>().unwrap(),
    WireType::Map(Box::new(WireType::List(Box::new(WireType::Primitive(Primitive::Int32)))))
  );
  assert_eq!("Pet".parse::<WireType>().unwrap(), WireType::Model("Pet".to_string()));
}

#[test]
fn test_enum_references_are_distinct_from_models() {
  let wire_type: WireType = "list<enum<DogKind>>".parse().unwrap();
  assert_eq!(
    wire_type,
    WireType::List(Box::new(WireType::Enum("DogKind".to_string())))
  );
  assert_eq!(wire_type.referenced_enums(), vec!["DogKind"]);
  assert!(wire_type.referenced_models().is_empty());
  assert_eq!(wire_type.to_string(), "list<enum<DogKind>>");
  assert!(WireType::Enum("DogKind".to_string()).is_string_valued());
  assert!(WireType::Enum("DogKind".to_string()).is_scalar());
  assert!(!wire_type.is_scalar());
}

#[test]
fn test_rejects_malformed_expressions() {
  let errors: Vec<String> = ["", "list<int32", "enum", "enum<list<string>>", "set<int32>", "Pet Owner"]
    .into_iter()
    .map(|text| text.parse::<WireType>().unwrap_err().to_string())
    .collect();
  assert_eq!(
    errors,
    vec![
      "empty wire type expression",
      "unbalanced '<' or '>' in wire type 'list<int32'",
      "'enum' takes exactly one type argument",
      "'enum' takes the name of a declared enum, found 'list<string>'",
      "'set' takes exactly one type argument",
      "invalid model reference 'Pet Owner'",
    ]
  );
}
