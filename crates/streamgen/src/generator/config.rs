use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Public,
  Crate,
  File,
}

impl Visibility {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "public" => Some(Visibility::Public),
      "crate" => Some(Visibility::Crate),
      "file" => Some(Visibility::File),
      _ => None,
    }
  }
}

impl ToTokens for Visibility {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let visibility = match self {
      Visibility::Public => quote! { pub },
      Visibility::Crate => quote! { pub(crate) },
      Visibility::File => quote! {},
    };
    visibility.to_tokens(tokens);
  }
}

/// Settings shared by every stage of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct GeneratorConfig {
  /// Required, non-constant properties become `new(...)` arguments.
  #[builder(default = true)]
  pub required_fields_as_ctor_args: bool,
  /// Read-only required properties are constructor arguments too.
  #[builder(default)]
  pub include_read_only_in_ctor: bool,
  #[builder(default)]
  pub visibility: Visibility,
  /// Path of the runtime crate in `use` statements of the emitted file.
  #[builder(into, default = String::from("streamgen_support"))]
  pub support_crate: String,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}
