//! Token emission for the generated models.
//!
//! Every emitter reads a [`PropertiesManager`] through a shared [`CodegenContext`]; none of them
//! walks the schema on its own. Enums, then models, are emitted in type-name order so the output is
//! stable for identical input.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::quote;

use crate::generator::{
  ast::StructToken,
  config::Visibility,
  graph::SchemaGraph,
  properties::PropertiesManager,
};

mod deserialize;
pub(crate) mod dispatch;
pub(crate) mod enums;
pub(crate) mod json_read;
pub(crate) mod json_write;
pub(crate) mod structs;
pub(crate) mod types;
pub(crate) mod xml_read;
pub(crate) mod xml_write;

#[cfg(test)]
mod tests;

use dispatch::DispatchGenerator;
use enums::EnumGenerator;
use json_read::JsonReadGenerator;
use json_write::JsonWriteGenerator;
use structs::StructGenerator;
use xml_read::XmlReadGenerator;
use xml_write::XmlWriteGenerator;

/// What every emitter may look up about the models of one generation pass.
pub(crate) struct CodegenContext<'a> {
  pub(crate) graph: &'a SchemaGraph,
  pub(crate) managers: &'a BTreeMap<String, PropertiesManager>,
  pub(crate) visibility: Visibility,
  pub(crate) support: syn::Path,
}

impl<'a> CodegenContext<'a> {
  pub(crate) fn new(
    graph: &'a SchemaGraph,
    managers: &'a BTreeMap<String, PropertiesManager>,
    visibility: Visibility,
    support: syn::Path,
  ) -> Self {
    Self {
      graph,
      managers,
      visibility,
      support,
    }
  }

  pub(crate) fn is_dispatch_root(&self, model: &str) -> bool {
    self.graph.is_dispatch_root(model)
  }

  pub(crate) fn is_merge_patch(&self, model: &str) -> bool {
    self.graph.is_merge_patch(model)
  }

  /// The type stored for a reference to `model`: its dispatch enum when it has derived models.
  pub(crate) fn reference_type(&self, model: &str) -> StructToken {
    let name = StructToken::from_model(model);
    if self.is_dispatch_root(model) {
      name.variant_enum()
    } else {
      name
    }
  }
}

/// Emits the whole file body: the runtime imports followed by every model.
pub(crate) fn generate(context: &CodegenContext<'_>) -> TokenStream {
  let support = &context.support;
  let ordered: BTreeMap<&str, &PropertiesManager> = context
    .managers
    .values()
    .map(|manager| (manager.type_name.as_str(), manager))
    .collect();

  let xml_imports = ordered
    .values()
    .any(|manager| manager.xml.is_some())
    .then(|| quote! { XmlReader, XmlSerializable, XmlToken, XmlWriter, });

  let enum_generator = EnumGenerator::new(context);
  let enums: BTreeMap<StructToken, TokenStream> = context
    .graph
    .enums()
    .map(|definition| (StructToken::from_model(&definition.name), enum_generator.generate(definition)))
    .collect();
  let enums = enums.into_values();

  let models: Vec<TokenStream> = ordered
    .values()
    .map(|manager| generate_model(context, manager))
    .collect();

  quote! {
    use #support::{
      IndexMap, JsonReader, JsonSerializable, JsonToken, JsonWriter, MergePatchState, StreamError, #xml_imports
      chrono, serde_json, uuid, wire,
    };

    #(#enums)*

    #(#models)*
  }
}

/// Methods one emitter contributes: the trait implementation's body plus inherent helpers.
#[derive(Debug, Default)]
pub(crate) struct EmittedMethods {
  pub(crate) inherent: TokenStream,
  pub(crate) trait_methods: TokenStream,
}

pub(crate) fn generate_model(context: &CodegenContext<'_>, manager: &PropertiesManager) -> TokenStream {
  let name = &manager.type_name;
  let definition = StructGenerator::new(context).generate(manager);

  let json_write = JsonWriteGenerator::new(context, manager).generate();
  let json_read = JsonReadGenerator::new(context, manager).generate();
  let mut inherent = vec![json_write.inherent, json_read.inherent];
  let json_methods = [json_write.trait_methods, json_read.trait_methods];

  let xml_impl = manager.xml.as_ref().map(|_| {
    let write = XmlWriteGenerator::new(manager).generate();
    let read = XmlReadGenerator::new(context, manager).generate();
    inherent.push(write.inherent);
    inherent.push(read.inherent);
    let methods = [write.trait_methods, read.trait_methods];
    quote! {
      impl XmlSerializable for #name {
        #(#methods)*
      }
    }
  });

  inherent.retain(|tokens| !tokens.is_empty());
  let inherent_impl = (!inherent.is_empty()).then(|| {
    quote! {
      impl #name {
        #(#inherent)*
      }
    }
  });

  let dispatch = DispatchGenerator::new(context, manager).generate();

  quote! {
    #definition

    #inherent_impl

    impl JsonSerializable for #name {
      #(#json_methods)*
    }

    #xml_impl

    #dispatch
  }
}

/// Joins `(condition, body)` branches into one `if`/`else if` chain ending in `fallback`.
pub(crate) fn if_chain(branches: Vec<(TokenStream, TokenStream)>, fallback: TokenStream) -> TokenStream {
  let mut branches = branches.into_iter();
  let Some((condition, body)) = branches.next() else {
    return fallback;
  };
  let rest = branches.map(|(condition, body)| quote! { else if #condition { #body } });
  quote! {
    if #condition { #body }
    #(#rest)*
    else { #fallback }
  }
}
