use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Doc comment lines attached to a generated item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  /// Splits a description into lines, turning literal `\n` escapes into line breaks.
  #[must_use]
  pub fn from_raw(input: &str) -> Self {
    Self {
      lines: input
        .replace("\\n", "\n")
        .lines()
        .map(|line| format!(" {}", line.trim_end()))
        .collect(),
    }
  }

  #[must_use]
  pub fn from_optional(desc: Option<&str>) -> Self {
    desc.map_or_else(Self::default, Self::from_raw)
  }
}

impl ToTokens for Documentation {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    if self.lines.is_empty() {
      return;
    }
    let doc_lines: Vec<TokenStream> = self.lines.iter().map(|line| quote! { #[doc = #line] }).collect();
    quote! { #(#doc_lines)* }.to_tokens(tokens);
  }
}
