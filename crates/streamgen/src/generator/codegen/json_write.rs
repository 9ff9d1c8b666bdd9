use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::{
  CodegenContext, EmittedMethods,
  types::{ValueExpr, constant_literal, numbered, primitive_suffix},
};
use crate::generator::{
  model::WireType,
  properties::{ClassifiedProperty, FlattenNode, PropertiesManager, PropertyRole},
};

/// Emits `to_json`, and `to_json_merge_patch` for merge-patch models.
///
/// Both routines write the same groups in the same order: discriminators, super required, super
/// setter, own required, own setter, the flatten tree, then additional properties.
pub(crate) struct JsonWriteGenerator<'a> {
  context: &'a CodegenContext<'a>,
  manager: &'a PropertiesManager,
}

impl<'a> JsonWriteGenerator<'a> {
  pub(crate) fn new(context: &'a CodegenContext<'a>, manager: &'a PropertiesManager) -> Self {
    Self { context, manager }
  }

  pub(crate) fn generate(&self) -> EmittedMethods {
    let body = self.generate_body(false);

    if !self.manager.merge_patch {
      return EmittedMethods {
        inherent: quote! {},
        trait_methods: quote! {
          fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
            #body
          }
        },
      };
    }

    let patch_body = self.generate_body(true);
    let vis = self.context.visibility;
    EmittedMethods {
      inherent: quote! {
        /// Writes the discriminators, the constructor properties and every property set since construction.
        #vis fn to_json_merge_patch(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
          #patch_body
        }
      },
      trait_methods: quote! {
        fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
          if self.merge_patch.is_enabled() {
            return self.to_json_merge_patch(writer);
          }
          #body
        }
      },
    }
  }

  fn generate_body(&self, patch: bool) -> TokenStream {
    let discriminators = self
      .manager
      .discriminators
      .iter()
      .map(|property| self.write_property(property, &property.serialized_name, patch));
    let plain = self
      .manager
      .plain()
      .filter(|property| property.is_serialized())
      .map(|property| self.write_property(property, &property.serialized_name, patch));
    let flattened = self
      .manager
      .flatten
      .roots
      .iter()
      .map(|node| self.write_flatten_node(node, patch));
    let additional = self.manager.additional.as_ref().map(|property| self.write_additional(property, patch));

    quote! {
      writer.write_start_object()?;
      #(#discriminators)*
      #(#plain)*
      #(#flattened)*
      #additional
      writer.write_end_object()
    }
  }

  fn write_property(&self, property: &ClassifiedProperty, name: &str, patch: bool) -> TokenStream {
    match property.role {
      PropertyRole::Constant => {
        let Some((_, literal)) = constant_literal(property) else {
          return quote! {};
        };
        let WireType::Primitive(primitive) = &property.wire_type else {
          return quote! {};
        };
        let method = format_ident!("write_{}_field", primitive_suffix(*primitive));
        quote! { writer.#method(#name, #literal)?; }
      }
      PropertyRole::Discriminator => {
        let field = &property.field;
        quote! { writer.write_string_field(#name, &self.#field)?; }
      }
      PropertyRole::Constructor => self.write_field(&property.wire_type, name, &ValueExpr::field(property), patch),
      PropertyRole::ReadOnly => quote! {},
      PropertyRole::Setter | PropertyRole::AdditionalProperties => {
        let field = &property.field;
        let write = self.write_field(&property.wire_type, name, &ValueExpr::binding("value"), patch);
        if patch {
          let key = property.patch_key();
          quote! {
            if self.merge_patch.contains(#key) {
              if let Some(value) = &self.#field {
                #write
              } else {
                writer.write_null_field(#name)?;
              }
            }
          }
        } else {
          quote! {
            if let Some(value) = &self.#field {
              #write
            }
          }
        }
      }
    }
  }

  /// Writes an intermediate node as a nested object, omitted when none of its leaves would be written.
  fn write_flatten_node(&self, node: &FlattenNode, patch: bool) -> TokenStream {
    if let Some(property) = &node.property {
      return if property.is_serialized() {
        self.write_property(property, &node.segment, patch)
      } else {
        quote! {}
      };
    }

    let leaves: Vec<&ClassifiedProperty> = node
      .leaves()
      .into_iter()
      .filter(|leaf| leaf.is_serialized())
      .collect();
    if leaves.is_empty() {
      return quote! {};
    }

    let segment = &node.segment;
    let children = node.children.iter().map(|child| self.write_flatten_node(child, patch));
    let object = quote! {
      writer.write_start_object_field(#segment)?;
      #(#children)*
      writer.write_end_object()?;
    };

    if leaves.iter().any(|leaf| leaf.is_always_present()) {
      return object;
    }
    let present = leaves.iter().map(|leaf| {
      if patch {
        let key = leaf.patch_key();
        quote! { self.merge_patch.contains(#key) }
      } else {
        let field = &leaf.field;
        quote! { self.#field.is_some() }
      }
    });
    quote! {
      if #(#present)||* {
        #object
      }
    }
  }

  fn write_additional(&self, property: &ClassifiedProperty, patch: bool) -> TokenStream {
    let WireType::Map(inner) = &property.wire_type else {
      return quote! {};
    };
    let field = &property.field;
    let element = self.write_value(inner, &ValueExpr::binding("element"), &format_ident!("writer"), 1, patch);
    let entries = quote! {
      if let Some(value) = &self.#field {
        for (key, element) in value {
          writer.write_field_name(key)?;
          #element?;
        }
      }
    };

    if patch {
      let key = property.patch_key();
      quote! {
        if self.merge_patch.contains(#key) {
          #entries
        }
      }
    } else {
      entries
    }
  }

  /// Writes `name` and its value as one field.
  fn write_field(&self, wire_type: &WireType, name: &str, value: &ValueExpr, patch: bool) -> TokenStream {
    match wire_type {
      WireType::Primitive(primitive) => {
        let method = format_ident!("write_{}_field", primitive_suffix(*primitive));
        let argument = if primitive.is_copy() { value.by_value() } else { value.by_ref() };
        quote! { writer.#method(#name, #argument)?; }
      }
      WireType::Enum(_) => {
        let receiver = value.receiver();
        quote! { writer.write_string_field(#name, #receiver.as_str())?; }
      }
      WireType::List(inner) => {
        let element = self.write_value(inner, &ValueExpr::binding("element"), &format_ident!("writer"), 1, patch);
        let values = value.by_ref();
        quote! { writer.write_array_field(#name, #values, |writer, element| #element)?; }
      }
      WireType::Map(inner) => {
        let element = self.write_value(inner, &ValueExpr::binding("element"), &format_ident!("writer"), 1, patch);
        let values = value.by_ref();
        quote! { writer.write_map_field(#name, #values, |writer, element| #element)?; }
      }
      WireType::Model(model) => {
        let write = self.write_model(model, value, &format_ident!("writer"), patch);
        quote! {
          writer.write_field_name(#name)?;
          #write?;
        }
      }
    }
  }

  /// A `Result` expression writing one value with `writer`. Closures created here bind
  /// `writer{depth}` and `element{depth}`.
  fn write_value(&self, wire_type: &WireType, value: &ValueExpr, writer: &Ident, depth: usize, patch: bool) -> TokenStream {
    match wire_type {
      WireType::Primitive(primitive) => {
        let method = format_ident!("write_{}", primitive_suffix(*primitive));
        let argument = if primitive.is_copy() { value.by_value() } else { value.by_ref() };
        quote! { #writer.#method(#argument) }
      }
      WireType::Enum(_) => {
        let receiver = value.receiver();
        quote! { #writer.write_string(#receiver.as_str()) }
      }
      WireType::List(inner) | WireType::Map(inner) => {
        let nested_writer = numbered("writer", depth);
        let nested_element = numbered("element", depth);
        let element = self.write_value(
          inner,
          &ValueExpr::Ref(nested_element.clone()),
          &nested_writer,
          depth + 1,
          patch,
        );
        let values = value.by_ref();
        let method = if matches!(wire_type, WireType::List(_)) {
          format_ident!("write_array")
        } else {
          format_ident!("write_map")
        };
        quote! { #writer.#method(#values, |#nested_writer, #nested_element| #element) }
      }
      WireType::Model(model) => self.write_model(model, value, writer, patch),
    }
  }

  fn write_model(&self, model: &str, value: &ValueExpr, writer: &Ident, patch: bool) -> TokenStream {
    let receiver = value.receiver();
    if patch && self.context.is_merge_patch(model) && !self.context.is_dispatch_root(model) {
      quote! { #receiver.to_json_merge_patch(#writer) }
    } else {
      quote! { #receiver.to_json(#writer) }
    }
  }
}
