use streamgen_support::JsonSerializable;

use crate::fixtures::dispatch::*;

#[test]
fn test_dispatch_selects_derived_model() {
  let shape = ShapeVariant::from_json_str(r#"{"kind":"circle","radius":1.5}"#)
    .unwrap()
    .unwrap();
  assert_eq!(shape, ShapeVariant::Circle(Circle::new(1.5)));
}

#[test]
fn test_discriminator_may_follow_other_fields() {
  let shape = ShapeVariant::from_json_str(r#"{"side":2.5,"name":"sq","kind":"square"}"#)
    .unwrap()
    .unwrap();
  match shape {
    ShapeVariant::Square(square) => {
      assert_eq!(square.side(), 2.5);
      assert_eq!(square.name(), Some("sq"));
      assert_eq!(square.kind(), "square");
    }
    other => panic!("expected a square, got {other:?}"),
  }
}

#[test]
fn test_unknown_discriminator_falls_back_to_base() {
  let shape = ShapeVariant::from_json_str(r#"{"kind":"triangle","name":"t"}"#)
    .unwrap()
    .unwrap();
  match shape {
    ShapeVariant::Shape(base) => {
      assert_eq!(base.kind(), "triangle");
      assert_eq!(base.name(), Some("t"));
    }
    other => panic!("expected the base shape, got {other:?}"),
  }
}

#[test]
fn test_missing_discriminator_falls_back_to_base() {
  let shape = ShapeVariant::from_json_str(r#"{"name":"n"}"#).unwrap().unwrap();
  let mut expected = Shape::new();
  expected.set_name(Some("n".to_string()));
  assert_eq!(shape, ShapeVariant::Shape(expected));
}

#[test]
fn test_nested_discriminator_dispatches_twice() {
  let shape = ShapeVariant::from_json_str(r#"{"kind":"quad","quadKind":"rectangle","width":2,"height":3}"#)
    .unwrap()
    .unwrap();
  assert_eq!(
    shape,
    ShapeVariant::Quad(QuadVariant::Rectangle(Rectangle::new(2.0, 3.0)))
  );
}

#[test]
fn test_nested_root_keeps_unknown_value() {
  let shape = ShapeVariant::from_json_str(r#"{"kind":"quad","quadKind":"rhombus"}"#)
    .unwrap()
    .unwrap();
  match shape {
    ShapeVariant::Quad(QuadVariant::Quad(quad)) => {
      assert_eq!(quad.kind(), "quad");
      assert_eq!(quad.quad_kind(), "rhombus");
    }
    other => panic!("expected the base quad, got {other:?}"),
  }
}

#[test]
fn test_null_reads_as_none() {
  assert_eq!(ShapeVariant::from_json_str("null").unwrap(), None);
}

#[test]
fn test_derived_model_rejects_wrong_discriminator() {
  let error = Circle::from_json_str(r#"{"kind":"square","radius":1}"#).unwrap_err();
  assert_eq!(
    error.to_string(),
    "'kind' was expected to be non-null and equal to 'circle'. The found 'kind' was 'square'"
  );

  let error = Circle::from_json_str(r#"{"kind":null,"radius":1}"#).unwrap_err();
  assert_eq!(
    error.to_string(),
    "'kind' was expected to be non-null and equal to 'circle'. The found 'kind' was 'null'"
  );
}

#[test]
fn test_derived_model_accepts_absent_discriminator() {
  let circle = Circle::from_json_str(r#"{"radius":4}"#).unwrap().unwrap();
  assert_eq!(circle.kind(), "circle");
  assert_eq!(circle.radius(), 4.0);
}

#[test]
fn test_inherited_discriminator_checked_on_grandchild() {
  let error = Rectangle::from_json_str(r#"{"kind":"circle","width":1,"height":1}"#).unwrap_err();
  assert_eq!(
    error.to_string(),
    "'kind' was expected to be non-null and equal to 'quad'. The found 'kind' was 'circle'"
  );
}

#[test]
fn test_variant_writes_through_to_payload() {
  let mut circle = Circle::new(1.5);
  circle.set_name(Some("c".to_string()));
  let shape = ShapeVariant::from(circle);
  assert_eq!(
    shape.to_json_string().unwrap(),
    r#"{"kind":"circle","name":"c","radius":1.5}"#
  );
}

#[test]
fn test_canvas_round_trip_of_mixed_shapes() {
  let mut canvas = Canvas::new();
  canvas.set_shapes(Some(vec![
    Circle::new(1.5).into(),
    ShapeVariant::Quad(Rectangle::new(2.0, 3.0).into()),
    Shape::new().into(),
  ]));

  let json = canvas.to_json_string().unwrap();
  assert_eq!(
    json,
    r#"{"shapes":[{"kind":"circle","radius":1.5},{"kind":"quad","quadKind":"rectangle","width":2.0,"height":3.0},{"kind":"Shape"}]}"#
  );
  assert_eq!(Canvas::from_json_str(&json).unwrap().unwrap(), canvas);
}
