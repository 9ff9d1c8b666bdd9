use proc_macro2::TokenStream;
use quote::quote;

use super::{CodegenContext, EmittedMethods, deserialize::ReadPlan, if_chain, types::numbered};
use crate::generator::{
  ast::StructToken,
  model::{Primitive, WireType},
  properties::{ClassifiedProperty, PropertiesManager, PropertyRole},
};

/// An element name as the reader sees it: the full name handed to nested models, and the local
/// part children are matched on.
struct ElementName {
  qualified: TokenStream,
  local: TokenStream,
}

impl ElementName {
  fn literal(name: &str) -> Self {
    let local = name.rsplit_once(':').map_or(name, |(_, local)| local);
    Self {
      qualified: quote! { #name },
      local: quote! { #local },
    }
  }

  fn dynamic(expr: TokenStream) -> Self {
    Self {
      qualified: expr.clone(),
      local: expr,
    }
  }
}

/// Emits `from_xml`: attributes first, then the text content or a loop over child elements.
pub(crate) struct XmlReadGenerator<'a> {
  context: &'a CodegenContext<'a>,
  manager: &'a PropertiesManager,
  plan: ReadPlan<'a>,
}

impl<'a> XmlReadGenerator<'a> {
  pub(crate) fn new(context: &'a CodegenContext<'a>, manager: &'a PropertiesManager) -> Self {
    Self {
      context,
      manager,
      plan: ReadPlan::new(manager),
    }
  }

  pub(crate) fn generate(&self) -> EmittedMethods {
    let Some(shape) = &self.manager.xml else {
      return EmittedMethods::default();
    };
    let element_name = &shape.element_name;
    let prelude = self.plan.prelude();
    let attributes = self.read_attributes();
    let content = self.read_content();
    let finish = self.plan.finish();

    let body = quote! {
      reader.read_object(None, root_element_name.unwrap_or(#element_name), |reader| {
        #prelude
        #(#attributes)*
        #content
        #finish
      })
    };

    if !self.manager.is_dispatch_root() {
      return EmittedMethods {
        inherent: quote! {},
        trait_methods: quote! {
          fn from_xml(reader: &mut XmlReader, root_element_name: Option<&str>) -> Result<Self, StreamError> {
            #body
          }
        },
      };
    }

    let vis = self.context.visibility;
    EmittedMethods {
      inherent: quote! {
        /// Reads this exact type from XML without looking at derived models.
        #vis fn from_xml_known_discriminator(
          reader: &mut XmlReader,
          root_element_name: Option<&str>,
        ) -> Result<Self, StreamError> {
          #body
        }
      },
      trait_methods: quote! {
        fn from_xml(reader: &mut XmlReader, root_element_name: Option<&str>) -> Result<Self, StreamError> {
          Self::from_xml_known_discriminator(reader, root_element_name)
        }
      },
    }
  }

  fn properties(&self) -> impl Iterator<Item = &'a ClassifiedProperty> + '_ {
    self.manager.discriminators.iter().chain(self.manager.ordinary())
  }

  fn read_attributes(&self) -> Vec<TokenStream> {
    self
      .properties()
      .filter(|property| property.xml.attribute && property.role != PropertyRole::Constant)
      .filter_map(|property| {
        let parsed = parse_text(&property.wire_type, quote! { text })?;
        let namespace = namespace_of(property);
        let local = property.xml_local_name();
        let store = if property.role == PropertyRole::Discriminator {
          self.plan.discriminator(property, quote! { Some(text) })
        } else {
          self.plan.store_present(property, parsed)
        };
        Some(quote! {
          if let Some(text) = reader.get_string_attribute(#namespace, #local) {
            #store
          }
        })
      })
      .collect()
  }

  fn read_content(&self) -> TokenStream {
    let elements: Vec<&ClassifiedProperty> = self
      .properties()
      .filter(|property| !property.xml.attribute && !property.xml.text)
      .collect();
    let text = self
      .properties()
      .find(|property| property.xml.text && property.role != PropertyRole::Constant);

    if elements.is_empty()
      && let Some(property) = text
      && let Some(parsed) = parse_text(&property.wire_type, quote! { reader.get_string_element()? })
    {
      return self.plan.store_present(property, parsed);
    }

    let element_name = &self.manager.names.element_name;
    let captures = self.captures_unknown();
    let branches: Vec<(TokenStream, TokenStream)> = elements
      .into_iter()
      .filter(|property| property.role != PropertyRole::Constant || captures)
      .map(|property| {
        let namespace = namespace_of(property);
        let local = property.xml_local_name();
        (quote! { #element_name.is(#namespace, #local) }, self.read_element(property))
      })
      .collect();
    let chain = if_chain(branches, self.read_unknown());

    quote! {
      while reader.next_element() == XmlToken::StartElement {
        let #element_name = reader.element_name()?;
        #chain
      }
    }
  }

  fn read_element(&self, property: &ClassifiedProperty) -> TokenStream {
    if property.role == PropertyRole::Constant {
      return quote! { reader.skip_element(); };
    }
    if property.role == PropertyRole::Discriminator {
      return self
        .plan
        .discriminator(property, quote! { Some(reader.get_string_element()?) });
    }

    let namespace = namespace_of(property);
    match &property.wire_type {
      WireType::List(inner) if property.xml.wrapped => {
        let items = self.read_list(inner, &ElementName::literal(&property.xml_item_name()), &namespace, 0);
        self.plan.store_present(property, items)
      }
      WireType::List(inner) => {
        let place = self.plan.place(property);
        let item = self.read_value(inner, &ElementName::literal(&property.xml_name()), &namespace, 1);
        quote! { #place.get_or_insert_with(Vec::new).push(#item); }
      }
      wire_type => {
        let value = self.read_value(wire_type, &ElementName::literal(&property.xml_name()), &namespace, 0);
        self.plan.store_present(property, value)
      }
    }
  }

  fn captures_unknown(&self) -> bool {
    self.manager.additional.as_ref().is_some_and(|additional| {
      matches!(
        &additional.wire_type,
        WireType::Map(inner) if matches!(**inner, WireType::Primitive(Primitive::String | Primitive::Any))
      )
    })
  }

  /// Unknown elements become additional properties when those hold strings or untyped values.
  fn read_unknown(&self) -> TokenStream {
    let Some(additional) = self.manager.additional.as_ref().filter(|_| self.captures_unknown()) else {
      return quote! { reader.skip_element(); };
    };
    let element_name = &self.manager.names.element_name;
    let place = self.plan.place(additional);
    let value = match &additional.wire_type {
      WireType::Map(inner) if matches!(**inner, WireType::Primitive(Primitive::Any)) => {
        quote! { serde_json::Value::String(text) }
      }
      _ => quote! { text },
    };
    quote! {
      let text = reader.get_string_element()?;
      #place.get_or_insert_with(IndexMap::new).insert(#element_name.local, #value);
    }
  }

  /// Reads the current element as a value of the client type. `name` is the element's own name.
  fn read_value(&self, wire_type: &WireType, name: &ElementName, namespace: &TokenStream, depth: usize) -> TokenStream {
    match wire_type {
      WireType::Primitive(primitive) => parse_primitive(*primitive, quote! { reader.get_string_element()? }),
      WireType::Enum(name) => parse_enum(name, quote! { reader.get_string_element()? }),
      WireType::Model(model) => {
        let ty = self.context.reference_type(model);
        let qualified = &name.qualified;
        quote! { #ty::from_xml(reader, Some(#qualified))? }
      }
      WireType::List(inner) => self.read_list(inner, name, namespace, depth),
      WireType::Map(inner) => {
        let entries = numbered("entries", depth);
        let key = numbered("key", depth);
        let element = numbered("element", depth);
        let value = self.read_value(inner, &ElementName::dynamic(quote! { #key.as_str() }), namespace, depth + 1);
        quote! {
          {
            let mut #entries = IndexMap::new();
            while reader.next_element() == XmlToken::StartElement {
              let #key = reader.element_name()?.local;
              let #element = #value;
              #entries.insert(#key, #element);
            }
            #entries
          }
        }
      }
    }
  }

  /// Reads the children of a wrapper element named `item`, skipping anything else.
  fn read_list(&self, inner: &WireType, item: &ElementName, namespace: &TokenStream, depth: usize) -> TokenStream {
    let items = numbered("items", depth);
    let local = &item.local;
    let value = self.read_value(inner, item, namespace, depth + 1);
    quote! {
      {
        let mut #items = Vec::new();
        while reader.next_element() == XmlToken::StartElement {
          if reader.element_name()?.is(#namespace, #local) {
            #items.push(#value);
          } else {
            reader.skip_element();
          }
        }
        #items
      }
    }
  }
}

fn namespace_of(property: &ClassifiedProperty) -> TokenStream {
  match &property.xml.namespace {
    Some(namespace) => quote! { Some(#namespace) },
    None => quote! { None },
  }
}

/// Converts `text`, a `String` expression, into the client type of a scalar; `None` for anything else.
fn parse_text(wire_type: &WireType, text: TokenStream) -> Option<TokenStream> {
  match wire_type {
    WireType::Primitive(primitive) => Some(parse_primitive(*primitive, text)),
    WireType::Enum(name) => Some(parse_enum(name, text)),
    WireType::List(_) | WireType::Map(_) | WireType::Model(_) => None,
  }
}

fn parse_enum(name: &str, text: TokenStream) -> TokenStream {
  let ty = StructToken::from_model(name);
  quote! { wire::parse_enum::<#ty>(&#text)? }
}

fn parse_primitive(primitive: Primitive, text: TokenStream) -> TokenStream {
  let kind = primitive.to_string();
  match primitive {
    Primitive::String => text,
    Primitive::Boolean => quote! { wire::parse_value::<bool>(#kind, &#text)? },
    Primitive::Int32 => quote! { wire::parse_value::<i32>(#kind, &#text)? },
    Primitive::Int64 => quote! { wire::parse_value::<i64>(#kind, &#text)? },
    Primitive::Float32 => quote! { wire::parse_value::<f32>(#kind, &#text)? },
    Primitive::Float64 => quote! { wire::parse_value::<f64>(#kind, &#text)? },
    Primitive::DateTime => quote! { wire::parse_date_time(&#text)? },
    Primitive::DateTimeRfc1123 => quote! { wire::parse_date_time_rfc1123(&#text)? },
    Primitive::Date => quote! { wire::parse_date(&#text)? },
    Primitive::UnixTime => quote! { wire::from_unix_time(wire::parse_value::<i64>(#kind, &#text)?)? },
    Primitive::Duration => quote! { wire::parse_duration(&#text)? },
    Primitive::Bytes => quote! { wire::decode_base64(&#text)? },
    Primitive::Base64Url => quote! { wire::decode_base64url(&#text)? },
    Primitive::Uuid => quote! { wire::parse_uuid(&#text)? },
    Primitive::Any => quote! { serde_json::Value::String(#text) },
  }
}
