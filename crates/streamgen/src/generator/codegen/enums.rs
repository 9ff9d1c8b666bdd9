//! String enums named by `enum<Name>` wire types.
//!
//! Each enum spells its wire values through `as_str` and parses them through `FromStr`, which is
//! what the runtime's `get_enum` and `wire::parse_enum` call. An expandable enum keeps unlisted
//! values in a catch-all variant; a fixed one rejects them with `StreamError::InvalidValue`.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;

use super::CodegenContext;
use crate::generator::{
  ast::{Documentation, StructToken},
  model::{EnumDef, EnumValueDef},
  naming::identifiers::{to_rust_type_name, unique_name},
};

const OTHER_VARIANT: &str = "Other";

pub(crate) struct EnumGenerator<'a> {
  context: &'a CodegenContext<'a>,
}

impl<'a> EnumGenerator<'a> {
  pub(crate) fn new(context: &'a CodegenContext<'a>) -> Self {
    Self { context }
  }

  pub(crate) fn generate(&self, definition: &EnumDef) -> TokenStream {
    let name = StructToken::from_model(&definition.name);
    let vis = self.context.visibility;
    let docs = Documentation::from_optional(definition.description.as_deref());

    let mut seen = HashSet::new();
    let listed: Vec<&EnumValueDef> = definition
      .values
      .iter()
      .filter(|value| seen.insert(value.value.as_str()))
      .collect();
    let (variants, other) = variant_names(&listed);
    let values: Vec<&str> = listed.iter().map(|value| value.value.as_str()).collect();
    let declarations = listed.iter().zip(&variants).map(|(value, variant)| {
      let docs = Documentation::from_optional(value.description.as_deref());
      quote! {
        #docs
        #variant
      }
    });

    let body = if definition.expandable {
      quote! {
        #docs
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #vis enum #name {
          #(#declarations,)*
          /// A value not listed here, kept as sent.
          #other(String),
        }

        impl #name {
          #vis fn as_str(&self) -> &str {
            match self {
              #(Self::#variants => #values,)*
              Self::#other(value) => value,
            }
          }
        }

        impl From<&str> for #name {
          fn from(value: &str) -> Self {
            match value {
              #(#values => Self::#variants,)*
              other => Self::#other(other.to_string()),
            }
          }
        }

        impl std::str::FromStr for #name {
          type Err = StreamError;

          fn from_str(value: &str) -> Result<Self, StreamError> {
            Ok(Self::from(value))
          }
        }
      }
    } else {
      let kind = definition.name.as_str();
      quote! {
        #docs
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #vis enum #name {
          #(#declarations,)*
        }

        impl #name {
          #vis fn as_str(&self) -> &str {
            match *self {
              #(Self::#variants => #values,)*
            }
          }
        }

        impl std::str::FromStr for #name {
          type Err = StreamError;

          fn from_str(value: &str) -> Result<Self, StreamError> {
            match value {
              #(#values => Ok(Self::#variants),)*
              other => Err(StreamError::invalid_value(#kind, other)),
            }
          }
        }
      }
    };

    quote! {
      #body

      impl std::fmt::Display for #name {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
          f.write_str(self.as_str())
        }
      }
    }
  }
}

/// Variant names for `values` in order, plus the catch-all name; none of them repeat.
fn variant_names(values: &[&EnumValueDef]) -> (Vec<StructToken>, StructToken) {
  let mut taken = HashSet::new();
  let mut claim = |base: String| {
    let name = unique_name(&base, &taken);
    taken.insert(name.clone());
    StructToken::new(name)
  };
  let variants = values
    .iter()
    .map(|value| claim(to_rust_type_name(value.variant_source())))
    .collect();
  let other = claim(OTHER_VARIANT.to_string());
  (variants, other)
}
