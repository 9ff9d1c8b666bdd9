use proc_macro2::TokenStream;
use quote::quote;

use super::{
  EmittedMethods,
  types::{ValueExpr, constant_text, numbered},
};
use crate::generator::{
  model::{Primitive, WireType},
  properties::{ClassifiedProperty, PropertiesManager, PropertyRole},
};

/// Emits `to_xml`: start tag, namespace declarations, attributes, then elements or text.
pub(crate) struct XmlWriteGenerator<'a> {
  manager: &'a PropertiesManager,
}

impl<'a> XmlWriteGenerator<'a> {
  pub(crate) fn new(manager: &'a PropertiesManager) -> Self {
    Self { manager }
  }

  pub(crate) fn generate(&self) -> EmittedMethods {
    let Some(shape) = &self.manager.xml else {
      return EmittedMethods::default();
    };
    let element_name = &shape.element_name;

    let declarations = shape.declarations.iter().map(|(prefix, namespace)| {
      let prefix = match prefix {
        Some(prefix) => quote! { Some(#prefix) },
        None => quote! { None },
      };
      quote! { writer.write_namespace(#prefix, #namespace)?; }
    });

    let serialized: Vec<&ClassifiedProperty> = self
      .manager
      .discriminators
      .iter()
      .chain(self.manager.ordinary())
      .filter(|property| property.is_serialized())
      .collect();

    let attributes = serialized
      .iter()
      .filter(|property| property.xml.attribute)
      .map(|property| self.write_attribute(property));

    let elements: Vec<&ClassifiedProperty> = serialized
      .iter()
      .copied()
      .filter(|property| !property.xml.attribute && !property.xml.text)
      .collect();
    let content: Vec<TokenStream> = if elements.is_empty() {
      serialized
        .iter()
        .filter(|property| property.xml.text)
        .map(|property| self.write_text(property))
        .collect()
    } else {
      elements.iter().map(|property| self.write_element(property)).collect()
    };

    let additional = self.manager.additional.as_ref().map(|property| self.write_additional(property));

    EmittedMethods {
      inherent: quote! {},
      trait_methods: quote! {
        fn to_xml(&self, writer: &mut XmlWriter, root_element_name: Option<&str>) -> Result<(), StreamError> {
          writer.write_start_element(root_element_name.unwrap_or(#element_name))?;
          #(#declarations)*
          #(#attributes)*
          #(#content)*
          #additional
          writer.write_end_element()
        }
      },
    }
  }

  /// Runs `write` with `value` bound to the property's value, skipping absent optional ones.
  fn with_value(
    &self,
    property: &ClassifiedProperty,
    write: impl FnOnce(&ValueExpr) -> TokenStream,
  ) -> TokenStream {
    if let (PropertyRole::Constant, Some(constant)) = (property.role, &property.constant) {
      let text = constant_text(constant);
      return write(&ValueExpr::Place(quote! { #text }));
    }
    if property.is_stored_plain() {
      return write(&ValueExpr::field(property));
    }
    let field = &property.field;
    let body = write(&ValueExpr::binding("value"));
    quote! {
      if let Some(value) = &self.#field {
        #body
      }
    }
  }

  fn write_attribute(&self, property: &ClassifiedProperty) -> TokenStream {
    let name = property.xml_name();
    let constant = property.role == PropertyRole::Constant;
    self.with_value(property, |value| {
      let text = if constant { value.receiver() } else { text_of(&property.wire_type, value) };
      quote! { writer.write_string_attribute(#name, #text)?; }
    })
  }

  fn write_text(&self, property: &ClassifiedProperty) -> TokenStream {
    let constant = property.role == PropertyRole::Constant;
    self.with_value(property, |value| {
      let text = if constant { value.receiver() } else { text_of(&property.wire_type, value) };
      quote! { writer.write_string(#text)?; }
    })
  }

  fn write_element(&self, property: &ClassifiedProperty) -> TokenStream {
    let name = property.xml_name();
    if property.role == PropertyRole::Constant {
      return self.with_value(property, |value| {
        let text = value.receiver();
        quote! { writer.write_string_element(#name, #text)?; }
      });
    }

    match &property.wire_type {
      WireType::List(inner) if property.xml.wrapped => {
        let item = property.xml_item_name();
        self.with_value(property, |value| {
          let values = value.by_ref();
          let element = self.write_value(inner, quote! { #item }, &ValueExpr::binding("element"), 1);
          quote! {
            writer.write_start_element(#name)?;
            for element in #values {
              #element
            }
            writer.write_end_element()?;
          }
        })
      }
      WireType::List(inner) => self.with_value(property, |value| {
        let values = value.by_ref();
        let element = self.write_value(inner, quote! { #name }, &ValueExpr::binding("element"), 1);
        quote! {
          for element in #values {
            #element
          }
        }
      }),
      wire_type => self.with_value(property, |value| self.write_value(wire_type, quote! { #name }, value, 0)),
    }
  }

  fn write_additional(&self, property: &ClassifiedProperty) -> TokenStream {
    let WireType::Map(inner) = &property.wire_type else {
      return quote! {};
    };
    let field = &property.field;
    let element = self.write_value(inner, quote! { key.as_str() }, &ValueExpr::binding("element"), 1);
    quote! {
      if let Some(value) = &self.#field {
        for (key, element) in value {
          #element
        }
      }
    }
  }

  /// Statements writing `value` as an element called `name`. Loops created here bind
  /// `element{depth}` and `key{depth}`; nested containers are always wrapped.
  fn write_value(&self, wire_type: &WireType, name: TokenStream, value: &ValueExpr, depth: usize) -> TokenStream {
    match wire_type {
      WireType::Primitive(_) | WireType::Enum(_) => {
        let text = text_of(wire_type, value);
        quote! { writer.write_string_element(#name, #text)?; }
      }
      WireType::Model(_) => {
        let receiver = value.receiver();
        quote! { #receiver.to_xml(writer, Some(#name))?; }
      }
      WireType::List(inner) => {
        let element = numbered("element", depth);
        let values = value.by_ref();
        let item = self.write_value(inner, name.clone(), &ValueExpr::Ref(element.clone()), depth + 1);
        quote! {
          writer.write_start_element(#name)?;
          for #element in #values {
            #item
          }
          writer.write_end_element()?;
        }
      }
      WireType::Map(inner) => {
        let element = numbered("element", depth);
        let key = numbered("key", depth);
        let values = value.by_ref();
        let entry = self.write_value(inner, quote! { #key.as_str() }, &ValueExpr::Ref(element.clone()), depth + 1);
        quote! {
          writer.write_start_element(#name)?;
          for (#key, #element) in #values {
            #entry
          }
          writer.write_end_element()?;
        }
      }
    }
  }
}

/// A `&str` expression holding the XML text of a scalar value. Classification admits nothing else
/// in an attribute, text content or a leaf element.
fn text_of(wire_type: &WireType, value: &ValueExpr) -> TokenStream {
  let by_ref = value.by_ref();
  let receiver = value.receiver();
  let primitive = match wire_type {
    WireType::Primitive(primitive) => primitive,
    WireType::Enum(_) => return quote! { #receiver.as_str() },
    WireType::List(_) | WireType::Map(_) | WireType::Model(_) => return by_ref,
  };
  match primitive {
    Primitive::String => by_ref,
    Primitive::Boolean
    | Primitive::Int32
    | Primitive::Int64
    | Primitive::Float32
    | Primitive::Float64
    | Primitive::Uuid => quote! { &#receiver.to_string() },
    Primitive::DateTime => quote! { &wire::format_date_time(#by_ref) },
    Primitive::DateTimeRfc1123 => quote! { &wire::format_date_time_rfc1123(#by_ref) },
    Primitive::Date => quote! { &wire::format_date(#by_ref) },
    Primitive::UnixTime => quote! { &wire::to_unix_time(#by_ref).to_string() },
    Primitive::Duration => quote! { &wire::format_duration(#by_ref) },
    Primitive::Bytes => quote! { &wire::encode_base64(#by_ref) },
    Primitive::Base64Url => quote! { &wire::encode_base64url(#by_ref) },
    Primitive::Any => quote! { &wire::untyped_to_text(#by_ref) },
  }
}
