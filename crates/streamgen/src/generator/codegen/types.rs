use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

use super::CodegenContext;
use crate::generator::{
  ast::StructToken,
  model::{ConstantValue, Primitive, WireType},
  properties::{ClassifiedProperty, PropertyRole},
};

/// A value being serialized: a field of `self`, or a binding that already holds a reference.
#[derive(Debug, Clone)]
pub(crate) enum ValueExpr {
  Place(TokenStream),
  Ref(Ident),
}

impl ValueExpr {
  pub(crate) fn field(property: &ClassifiedProperty) -> Self {
    let field = &property.field;
    Self::Place(quote! { self.#field })
  }

  pub(crate) fn binding(name: &str) -> Self {
    Self::Ref(Ident::new(name, Span::call_site()))
  }

  /// The value itself, for `Copy` scalars.
  pub(crate) fn by_value(&self) -> TokenStream {
    match self {
      Self::Place(place) => quote! { #place },
      Self::Ref(binding) => quote! { *#binding },
    }
  }

  pub(crate) fn by_ref(&self) -> TokenStream {
    match self {
      Self::Place(place) => quote! { &#place },
      Self::Ref(binding) => quote! { #binding },
    }
  }

  /// The expression to call methods on; auto-ref and auto-deref handle the rest.
  pub(crate) fn receiver(&self) -> TokenStream {
    match self {
      Self::Place(place) => quote! { #place },
      Self::Ref(binding) => quote! { #binding },
    }
  }
}

/// `base` at depth zero, `base1`, `base2`... below it.
pub(crate) fn numbered(base: &str, depth: usize) -> Ident {
  if depth == 0 {
    format_ident!("{}", base)
  } else {
    format_ident!("{}{}", base, depth)
  }
}

pub(crate) fn primitive_type(primitive: Primitive) -> TokenStream {
  match primitive {
    Primitive::String => quote! { String },
    Primitive::Boolean => quote! { bool },
    Primitive::Int32 => quote! { i32 },
    Primitive::Int64 => quote! { i64 },
    Primitive::Float32 => quote! { f32 },
    Primitive::Float64 => quote! { f64 },
    Primitive::DateTime => quote! { chrono::DateTime<chrono::FixedOffset> },
    Primitive::Date => quote! { chrono::NaiveDate },
    Primitive::DateTimeRfc1123 | Primitive::UnixTime => quote! { chrono::DateTime<chrono::Utc> },
    Primitive::Duration => quote! { chrono::TimeDelta },
    Primitive::Bytes | Primitive::Base64Url => quote! { Vec<u8> },
    Primitive::Uuid => quote! { uuid::Uuid },
    Primitive::Any => quote! { serde_json::Value },
  }
}

/// The suffix shared by a primitive's `write_*`, `write_*_field` and `get_*` methods.
pub(crate) fn primitive_suffix(primitive: Primitive) -> &'static str {
  match primitive {
    Primitive::String => "string",
    Primitive::Boolean => "bool",
    Primitive::Int32 => "i32",
    Primitive::Int64 => "i64",
    Primitive::Float32 => "f32",
    Primitive::Float64 => "f64",
    Primitive::DateTime => "date_time",
    Primitive::DateTimeRfc1123 => "date_time_rfc1123",
    Primitive::Date => "date",
    Primitive::UnixTime => "unix_time",
    Primitive::Duration => "duration",
    Primitive::Bytes => "bytes",
    Primitive::Base64Url => "base64url",
    Primitive::Uuid => "uuid",
    Primitive::Any => "untyped",
  }
}

pub(crate) fn rust_type(context: &CodegenContext<'_>, wire_type: &WireType) -> TokenStream {
  match wire_type {
    WireType::Primitive(primitive) => primitive_type(*primitive),
    WireType::List(inner) => {
      let inner = rust_type(context, inner);
      quote! { Vec<#inner> }
    }
    WireType::Map(inner) => {
      let inner = rust_type(context, inner);
      quote! { IndexMap<String, #inner> }
    }
    WireType::Enum(name) => {
      let name = StructToken::from_model(name);
      quote! { #name }
    }
    WireType::Model(name) => {
      let name = context.reference_type(name);
      quote! { #name }
    }
  }
}

/// The client type with any `Box` indirection, but without the `Option` of optional storage.
pub(crate) fn stored_type(context: &CodegenContext<'_>, property: &ClassifiedProperty) -> TokenStream {
  let inner = rust_type(context, &property.wire_type);
  if property.boxed {
    quote! { Box<#inner> }
  } else {
    inner
  }
}

pub(crate) fn field_type(context: &CodegenContext<'_>, property: &ClassifiedProperty) -> TokenStream {
  if property.role == PropertyRole::Discriminator {
    return quote! { String };
  }
  let stored = stored_type(context, property);
  if property.is_stored_plain() {
    stored
  } else {
    quote! { Option<#stored> }
  }
}

/// A getter's return type and body.
pub(crate) fn getter(context: &CodegenContext<'_>, property: &ClassifiedProperty) -> (TokenStream, TokenStream) {
  let field = &property.field;

  if property.role == PropertyRole::Discriminator {
    return discriminator_getter(context, property);
  }

  let plain = property.is_stored_plain();
  let borrowed = match &property.wire_type {
    WireType::Primitive(primitive) if primitive.is_copy() => None,
    WireType::Primitive(Primitive::String) => Some(quote! { str }),
    WireType::List(inner) => {
      let inner = rust_type(context, inner);
      Some(quote! { [#inner] })
    }
    _ if property.boxed => Some(rust_type(context, &property.wire_type)),
    _ => None,
  };

  match (borrowed, plain) {
    (Some(target), true) => (quote! { &#target }, quote! { &self.#field }),
    (Some(target), false) => (quote! { Option<&#target> }, quote! { self.#field.as_deref() }),
    (None, _) if matches!(&property.wire_type, WireType::Primitive(primitive) if primitive.is_copy()) => {
      let ty = rust_type(context, &property.wire_type);
      if plain {
        (ty, quote! { self.#field })
      } else {
        (quote! { Option<#ty> }, quote! { self.#field })
      }
    }
    (None, true) => {
      let ty = rust_type(context, &property.wire_type);
      (quote! { &#ty }, quote! { &self.#field })
    }
    (None, false) => {
      let ty = rust_type(context, &property.wire_type);
      (quote! { Option<&#ty> }, quote! { self.#field.as_ref() })
    }
  }
}

/// Discriminators are stored as wire text. A string enum discriminator converts on access: an
/// expandable enum always succeeds, a fixed one yields `None` for values it does not list.
fn discriminator_getter(context: &CodegenContext<'_>, property: &ClassifiedProperty) -> (TokenStream, TokenStream) {
  let field = &property.field;
  let WireType::Enum(name) = &property.wire_type else {
    return (quote! { &str }, quote! { &self.#field });
  };
  let ty = StructToken::from_model(name);
  match context.graph.get_enum(name) {
    Some(definition) if definition.expandable => (quote! { #ty }, quote! { #ty::from(self.#field.as_str()) }),
    _ => (quote! { Option<#ty> }, quote! { self.#field.parse().ok() }),
  }
}

/// A constant's getter type and literal, typed by its wire type.
pub(crate) fn constant_literal(property: &ClassifiedProperty) -> Option<(TokenStream, TokenStream)> {
  let WireType::Primitive(primitive) = &property.wire_type else {
    return None;
  };
  let constant = property.constant.as_ref()?;

  let typed = match (constant, primitive) {
    (ConstantValue::String(value), Primitive::String) => (quote! { &'static str }, quote! { #value }),
    (ConstantValue::Bool(value), Primitive::Boolean) => (quote! { bool }, quote! { #value }),
    (ConstantValue::Int(value), Primitive::Int32) => (quote! { i32 }, signed_literal(*value)),
    (ConstantValue::Int(value), Primitive::Int64) => (quote! { i64 }, signed_literal(*value)),
    (ConstantValue::Int(value), Primitive::Float32) => (quote! { f32 }, float_literal(*value as f64)),
    (ConstantValue::Int(value), Primitive::Float64) => (quote! { f64 }, float_literal(*value as f64)),
    (ConstantValue::Float(value), Primitive::Float32) => (quote! { f32 }, float_literal(*value)),
    (ConstantValue::Float(value), Primitive::Float64) => (quote! { f64 }, float_literal(*value)),
    _ => return None,
  };
  Some(typed)
}

/// The wire text of a constant, as written to XML.
pub(crate) fn constant_text(constant: &ConstantValue) -> String {
  match constant {
    ConstantValue::Bool(value) => value.to_string(),
    ConstantValue::Int(value) => value.to_string(),
    ConstantValue::Float(value) => value.to_string(),
    ConstantValue::String(value) => value.clone(),
  }
}

fn signed_literal(value: i64) -> TokenStream {
  let literal = Literal::u64_unsuffixed(value.unsigned_abs());
  if value < 0 {
    quote! { -#literal }
  } else {
    quote! { #literal }
  }
}

fn float_literal(value: f64) -> TokenStream {
  let literal = Literal::f64_unsuffixed(value.abs());
  if value.is_sign_negative() {
    quote! { -#literal }
  } else {
    quote! { #literal }
  }
}
