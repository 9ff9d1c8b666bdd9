use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::{
  CodegenContext, EmittedMethods, if_chain,
  deserialize::ReadPlan,
  types::{numbered, primitive_suffix},
};
use crate::generator::{
  ast::StructToken,
  model::{Primitive, WireType},
  properties::{ClassifiedProperty, FlattenNode, PropertiesManager, PropertyRole},
};

/// Emits `from_json`: a field-name loop over the object, with flattened paths read as nested
/// loops and required properties checked together at the end.
pub(crate) struct JsonReadGenerator<'a> {
  context: &'a CodegenContext<'a>,
  manager: &'a PropertiesManager,
  plan: ReadPlan<'a>,
}

impl<'a> JsonReadGenerator<'a> {
  pub(crate) fn new(context: &'a CodegenContext<'a>, manager: &'a PropertiesManager) -> Self {
    Self {
      context,
      manager,
      plan: ReadPlan::new(manager),
    }
  }

  pub(crate) fn generate(&self) -> EmittedMethods {
    let body = self.generate_body();

    if !self.manager.is_dispatch_root() {
      return EmittedMethods {
        inherent: quote! {},
        trait_methods: quote! {
          fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
            #body
          }
        },
      };
    }

    let vis = self.context.visibility;
    EmittedMethods {
      inherent: quote! {
        /// Reads this exact type without looking at derived models.
        #vis fn from_json_known_discriminator(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
          #body
        }
      },
      trait_methods: quote! {
        fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
          Self::from_json_known_discriminator(reader)
        }
      },
    }
  }

  fn generate_body(&self) -> TokenStream {
    let field_name = &self.manager.names.field_name;
    let prelude = self.plan.prelude();
    let finish = self.plan.finish();

    let mut branches = vec![];
    for property in &self.manager.discriminators {
      branches.push((self.matches(&property.serialized_name), self.read_discriminator(property)));
    }
    for property in self.manager.plain() {
      if let Some(body) = self.read_property(property) {
        branches.push((self.matches(&property.serialized_name), body));
      }
    }
    for node in &self.manager.flatten.roots {
      if let Some(body) = self.read_flatten_node(node) {
        branches.push((self.matches(&node.segment), body));
      }
    }
    let chain = if_chain(branches, self.read_unknown());

    quote! {
      reader.read_object(|reader| {
        #prelude
        while reader.next_token() == JsonToken::FieldName {
          let #field_name = reader.field_name()?;
          reader.next_token();
          #chain
        }
        #finish
      })
    }
  }

  fn matches(&self, name: &str) -> TokenStream {
    let field_name = &self.manager.names.field_name;
    quote! { #field_name == #name }
  }

  fn read_discriminator(&self, property: &ClassifiedProperty) -> TokenStream {
    self
      .plan
      .discriminator(property, quote! { reader.get_nullable(|reader| reader.get_string())? })
  }

  /// `None` when the property is skipped like any unknown field.
  fn read_property(&self, property: &ClassifiedProperty) -> Option<TokenStream> {
    if property.role == PropertyRole::Constant {
      return self.manager.additional.is_some().then(|| quote! { reader.skip_children(); });
    }
    let value = self.read_field(&property.wire_type);
    Some(self.plan.store(property, value))
  }

  fn read_flatten_node(&self, node: &FlattenNode) -> Option<TokenStream> {
    if let Some(property) = &node.property {
      return self.read_property(property);
    }

    let field_name = &self.manager.names.field_name;
    let branches: Vec<(TokenStream, TokenStream)> = node
      .children
      .iter()
      .filter_map(|child| Some((self.matches(&child.segment), self.read_flatten_node(child)?)))
      .collect();
    if branches.is_empty() {
      return None;
    }
    let chain = if_chain(branches, quote! { reader.skip_children(); });

    Some(quote! {
      if reader.current_token() == Some(JsonToken::StartObject) {
        while reader.next_token() == JsonToken::FieldName {
          let #field_name = reader.field_name()?;
          reader.next_token();
          #chain
        }
      } else {
        reader.skip_children();
      }
    })
  }

  /// Unknown fields go to additional properties when the model has them.
  fn read_unknown(&self) -> TokenStream {
    let Some(additional) = &self.manager.additional else {
      return quote! { reader.skip_children(); };
    };
    let WireType::Map(inner) = &additional.wire_type else {
      return quote! { reader.skip_children(); };
    };
    let field_name = &self.manager.names.field_name;
    let place = self.plan.place(additional);
    let element = self.read_element(inner, &format_ident!("reader"), 0);
    quote! {
      #place.get_or_insert_with(IndexMap::new).insert(#field_name, #element?);
    }
  }

  /// Reads a field value as an `Option` of its client type; `null` yields `None`.
  fn read_field(&self, wire_type: &WireType) -> TokenStream {
    match wire_type {
      WireType::Primitive(primitive) => {
        let getter = getter_call(*primitive);
        quote! { reader.get_nullable(|reader| reader.#getter)? }
      }
      WireType::Enum(name) => {
        let ty = StructToken::from_model(name);
        quote! { reader.get_nullable(|reader| reader.get_enum::<#ty>())? }
      }
      WireType::List(inner) => {
        let element = self.read_element(inner, &format_ident!("reader"), 1);
        quote! { reader.read_array(|reader| #element)? }
      }
      WireType::Map(inner) => {
        let element = self.read_element(inner, &format_ident!("reader"), 1);
        quote! { reader.read_map(|reader| #element)? }
      }
      WireType::Model(name) => {
        let ty = self.context.reference_type(name);
        quote! { #ty::from_json(reader)? }
      }
    }
  }

  /// Reads one container element as a `Result` of its client type. Nested containers and models
  /// must not be `null`.
  fn read_element(&self, wire_type: &WireType, reader: &Ident, depth: usize) -> TokenStream {
    match wire_type {
      WireType::Primitive(primitive) => {
        let getter = getter_call(*primitive);
        quote! { #reader.#getter }
      }
      WireType::Enum(name) => {
        let ty = StructToken::from_model(name);
        quote! { #reader.get_enum::<#ty>() }
      }
      WireType::List(inner) => {
        let nested = numbered("reader", depth);
        let element = self.read_element(inner, &nested, depth + 1);
        quote! {
          #reader
            .read_array(|#nested| #element)?
            .ok_or(StreamError::unexpected_null("START_ARRAY"))
        }
      }
      WireType::Map(inner) => {
        let nested = numbered("reader", depth);
        let element = self.read_element(inner, &nested, depth + 1);
        quote! {
          #reader
            .read_map(|#nested| #element)?
            .ok_or(StreamError::unexpected_null("START_OBJECT"))
        }
      }
      WireType::Model(name) => {
        let ty = self.context.reference_type(name);
        quote! { #ty::from_json(#reader)?.ok_or(StreamError::unexpected_null("START_OBJECT")) }
      }
    }
  }
}

fn getter_call(primitive: Primitive) -> TokenStream {
  if primitive == Primitive::Any {
    return quote! { read_untyped() };
  }
  let getter = format_ident!("get_{}", primitive_suffix(primitive));
  quote! { #getter() }
}
