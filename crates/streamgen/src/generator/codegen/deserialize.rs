//! The part of a read routine shared by JSON and XML: where values land while the input is
//! consumed, and how the finished model is assembled from them.

use proc_macro2::TokenStream;
use quote::quote;

use crate::generator::properties::{ClassifiedProperty, PropertiesManager, PropertyRole};

pub(crate) struct ReadPlan<'a> {
  manager: &'a PropertiesManager,
  /// No obligations: the instance is built before reading and fields are filled in place.
  upfront: bool,
}

impl<'a> ReadPlan<'a> {
  pub(crate) fn new(manager: &'a PropertiesManager) -> Self {
    Self {
      manager,
      upfront: manager.obligations().next().is_none(),
    }
  }

  /// Whether the value read for discriminator `property` is kept rather than checked.
  pub(crate) fn keeps_discriminator(&self, property: &ClassifiedProperty) -> bool {
    self.manager.dispatches_on(&property.serialized_name)
  }

  /// Properties with a read branch that stores something.
  fn stored(&self) -> impl Iterator<Item = &'a ClassifiedProperty> + '_ {
    self
      .manager
      .discriminators
      .iter()
      .filter(|property| self.keeps_discriminator(property))
      .chain(self.manager.ordinary().filter(|property| property.role != PropertyRole::Constant))
      .chain(self.manager.additional.iter())
  }

  pub(crate) fn place(&self, property: &ClassifiedProperty) -> TokenStream {
    if self.upfront {
      let deserialized = &self.manager.names.deserialized;
      let field = &property.field;
      quote! { #deserialized.#field }
    } else {
      let local = &property.local;
      quote! { #local }
    }
  }

  /// Stores `value`, an `Option` of the unboxed client type.
  pub(crate) fn store(&self, property: &ClassifiedProperty, value: TokenStream) -> TokenStream {
    let place = self.place(property);
    if self.upfront && property.boxed {
      quote! { #place = #value.map(Box::new); }
    } else {
      quote! { #place = #value; }
    }
  }

  /// Stores a value that is known to be present.
  pub(crate) fn store_present(&self, property: &ClassifiedProperty, value: TokenStream) -> TokenStream {
    let place = self.place(property);
    if self.upfront && property.boxed {
      quote! { #place = Some(Box::new(#value)); }
    } else {
      quote! { #place = Some(#value); }
    }
  }

  /// Keeps or validates a discriminator read as `value`, an `Option<String>` expression.
  pub(crate) fn discriminator(&self, property: &ClassifiedProperty, value: TokenStream) -> TokenStream {
    let local = &property.local;
    if self.keeps_discriminator(property) {
      if self.upfront {
        let place = self.place(property);
        quote! {
          if let Some(#local) = #value {
            #place = #local;
          }
        }
      } else {
        quote! { #local = #value; }
      }
    } else {
      let name = &property.serialized_name;
      let expected = property.discriminator_value.as_deref().unwrap_or_default();
      quote! {
        let #local = #value;
        if #local.as_deref() != Some(#expected) {
          return Err(StreamError::unexpected_discriminator(#name, #expected, #local));
        }
      }
    }
  }

  /// Declares the instance or the locals the read loop fills.
  pub(crate) fn prelude(&self) -> TokenStream {
    if self.upfront {
      let deserialized = &self.manager.names.deserialized;
      let name = &self.manager.type_name;
      let mutability = self.stored().next().is_some().then(|| quote! { mut });
      return quote! { let #mutability #deserialized = #name::new(); };
    }

    let locals: Vec<TokenStream> = self
      .stored()
      .map(|property| {
        let local = &property.local;
        quote! { let mut #local = None; }
      })
      .collect();
    quote! { #(#locals)* }
  }

  /// The expression producing `Result<Self, StreamError>` once the input is consumed.
  pub(crate) fn finish(&self) -> TokenStream {
    let deserialized = &self.manager.names.deserialized;
    if self.upfront {
      return quote! { Ok(#deserialized) };
    }

    let obligations: Vec<&ClassifiedProperty> = self.manager.obligations().collect();
    let build = self.build();
    let locals: Vec<_> = obligations.iter().map(|property| &property.local).collect();
    let names: Vec<&str> = obligations
      .iter()
      .map(|property| property.serialized_name.as_str())
      .collect();

    if let [local] = locals.as_slice() {
      let name = names[0];
      return quote! {
        match #local {
          Some(#local) => { #build }
          None => Err(StreamError::missing_required([(true, #name)])),
        }
      };
    }

    quote! {
      match (#(#locals),*) {
        (#(Some(#locals)),*) => { #build }
        (#(#locals),*) => Err(StreamError::missing_required([#((#locals.is_none(), #names)),*])),
      }
    }
  }

  /// Constructs the instance from the bound obligations, then moves every other local into it.
  fn build(&self) -> TokenStream {
    let manager = self.manager;
    let deserialized = &manager.names.deserialized;
    let name = &manager.type_name;
    let args = manager.constructor_params().map(|property| &property.local);

    let assignments: Vec<TokenStream> = self
      .stored()
      .filter(|property| property.role != PropertyRole::Constructor)
      .map(|property| {
        let field = &property.field;
        let local = &property.local;
        match (property.role, property.is_obligation(), property.boxed) {
          (PropertyRole::Discriminator, ..) => quote! {
            if let Some(#local) = #local {
              #deserialized.#field = #local;
            }
          },
          (_, true, true) => quote! { #deserialized.#field = Some(Box::new(#local)); },
          (_, true, false) => quote! { #deserialized.#field = Some(#local); },
          (_, false, true) => quote! { #deserialized.#field = #local.map(Box::new); },
          (_, false, false) => quote! { #deserialized.#field = #local; },
        }
      })
      .collect();

    if assignments.is_empty() {
      return quote! { Ok(#name::new(#(#args),*)) };
    }

    quote! {
      let mut #deserialized = #name::new(#(#args),*);
      #(#assignments)*
      Ok(#deserialized)
    }
  }
}
