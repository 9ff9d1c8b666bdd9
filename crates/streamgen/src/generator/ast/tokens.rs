use std::fmt::{Display, Formatter};

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use string_cache::DefaultAtom;
use syn::Ident;

use crate::generator::naming::identifiers::{setter_name, to_rust_type_name, variant_enum_name};

/// Declares an interned identifier wrapper whose `ToTokens` emits a raw identifier for `r#` names.
macro_rules! define_token {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct $name(pub DefaultAtom);

    impl $name {
      #[must_use]
      pub fn as_str(&self) -> &str {
        &self.0
      }
    }

    impl Display for $name {
      fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
      }
    }

    impl ToTokens for $name {
      fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = match self.0.strip_prefix("r#") {
          Some(raw) => Ident::new_raw(raw, Span::call_site()),
          None => Ident::new(&self.0, Span::call_site()),
        };
        ident.to_tokens(tokens);
      }
    }
  };
}

define_token!(
  /// A generated struct or enum name.
  StructToken
);
define_token!(
  /// A struct field or read-loop local.
  FieldNameToken
);
define_token!(MethodNameToken);

impl StructToken {
  #[must_use]
  pub fn new(ident: impl AsRef<str>) -> Self {
    Self(DefaultAtom::from(ident.as_ref()))
  }

  /// Converts a model or enum name into its Rust type name.
  #[must_use]
  pub fn from_model(name: &str) -> Self {
    Self::new(to_rust_type_name(name))
  }

  /// The `<Name>Variant` dispatch enum of this type.
  #[must_use]
  pub fn variant_enum(&self) -> Self {
    Self::new(variant_enum_name(self.as_str()))
  }
}

impl FieldNameToken {
  #[must_use]
  pub fn new(ident: impl AsRef<str>) -> Self {
    Self(DefaultAtom::from(ident.as_ref()))
  }
}

impl MethodNameToken {
  #[must_use]
  pub fn new(ident: impl AsRef<str>) -> Self {
    Self(DefaultAtom::from(ident.as_ref()))
  }

  /// The `set_*` method for a field.
  #[must_use]
  pub fn setter(field: &FieldNameToken) -> Self {
    Self::new(setter_name(field.as_str()))
  }

  /// The getter shares the field's name.
  #[must_use]
  pub fn getter(field: &FieldNameToken) -> Self {
    Self(field.0.clone())
  }
}
