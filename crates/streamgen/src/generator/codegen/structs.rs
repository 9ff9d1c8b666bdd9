use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{
  CodegenContext,
  types::{constant_literal, field_type, getter, rust_type},
};
use crate::generator::{
  ast::{Documentation, MethodNameToken},
  properties::{ClassifiedProperty, PropertiesManager, PropertyRole},
};

pub(crate) struct StructGenerator<'a> {
  context: &'a CodegenContext<'a>,
}

impl<'a> StructGenerator<'a> {
  pub(crate) fn new(context: &'a CodegenContext<'a>) -> Self {
    Self { context }
  }

  pub(crate) fn generate(&self, manager: &PropertiesManager) -> TokenStream {
    let struct_def = self.generate_struct_definition(manager);
    let impl_block = self.generate_impl_block(manager);
    let default_impl = generate_default_impl(manager);

    quote! {
      #struct_def
      #impl_block
      #default_impl
    }
  }

  fn generate_struct_definition(&self, manager: &PropertiesManager) -> TokenStream {
    let name = &manager.type_name;
    let docs = Documentation::from_optional(manager.description.as_deref());
    let vis = self.context.visibility;

    let fields: Vec<TokenStream> = manager
      .fields()
      .map(|property| {
        let field = &property.field;
        let ty = field_type(self.context, property);
        quote! { #field: #ty }
      })
      .collect();
    let merge_patch = manager
      .merge_patch
      .then(|| quote! { merge_patch: MergePatchState, });

    quote! {
      #docs
      #[derive(Debug, Clone, PartialEq)]
      #vis struct #name {
        #(#fields,)*
        #merge_patch
      }
    }
  }

  fn generate_impl_block(&self, manager: &PropertiesManager) -> TokenStream {
    let name = &manager.type_name;
    let constructor = self.generate_constructor(manager);
    let accessors: Vec<TokenStream> = manager
      .all()
      .map(|property| self.generate_accessors(manager, property))
      .collect();
    let merge_patch_toggle = manager.merge_patch.then(|| {
      let vis = self.context.visibility;
      quote! {
        /// Switches `to_json` to writing only the properties set since construction.
        #vis fn serialize_as_json_merge_patch(&mut self, enabled: bool) -> &mut Self {
          self.merge_patch.set_enabled(enabled);
          self
        }
      }
    });

    quote! {
      impl #name {
        #constructor
        #(#accessors)*
        #merge_patch_toggle
      }
    }
  }

  fn generate_constructor(&self, manager: &PropertiesManager) -> TokenStream {
    let vis = self.context.visibility;
    let params: Vec<TokenStream> = manager
      .constructor_params()
      .map(|property| {
        let field = &property.field;
        let ty = rust_type(self.context, &property.wire_type);
        quote! { #field: #ty }
      })
      .collect();

    let initializers: Vec<TokenStream> = manager
      .fields()
      .map(|property| {
        let field = &property.field;
        match property.role {
          PropertyRole::Discriminator => {
            let value = property.discriminator_value.as_deref().unwrap_or_default();
            quote! { #field: String::from(#value) }
          }
          PropertyRole::Constructor if property.boxed => quote! { #field: Box::new(#field) },
          PropertyRole::Constructor => quote! { #field },
          _ => quote! { #field: None },
        }
      })
      .collect();
    let merge_patch = manager
      .merge_patch
      .then(|| quote! { merge_patch: MergePatchState::new(), });

    quote! {
      #vis fn new(#(#params),*) -> Self {
        Self {
          #(#initializers,)*
          #merge_patch
        }
      }
    }
  }

  fn generate_accessors(&self, manager: &PropertiesManager, property: &ClassifiedProperty) -> TokenStream {
    let vis = self.context.visibility;
    let docs = &property.docs;
    let getter_name = MethodNameToken::getter(&property.field);

    if property.role == PropertyRole::Constant {
      let Some((ty, literal)) = constant_literal(property) else {
        return quote! {};
      };
      return quote! {
        #docs
        #vis fn #getter_name(&self) -> #ty {
          #literal
        }
      };
    }

    let (ty, body) = getter(self.context, property);
    let setter = matches!(
      property.role,
      PropertyRole::Setter | PropertyRole::AdditionalProperties
    )
    .then(|| self.generate_setter(manager, property));

    quote! {
      #docs
      #vis fn #getter_name(&self) -> #ty {
        #body
      }

      #setter
    }
  }

  fn generate_setter(&self, manager: &PropertiesManager, property: &ClassifiedProperty) -> TokenStream {
    let vis = self.context.visibility;
    let field = &property.field;
    let setter_name = MethodNameToken::setter(field);
    let param = format_ident!("value");
    let ty = rust_type(self.context, &property.wire_type);

    let assign = if property.boxed {
      quote! { self.#field = #param.map(Box::new); }
    } else {
      quote! { self.#field = #param; }
    };
    let mark = manager.merge_patch.then(|| {
      let key = property.patch_key();
      quote! { self.merge_patch.mark(#key); }
    });

    quote! {
      #vis fn #setter_name(&mut self, #param: Option<#ty>) -> &mut Self {
        #assign
        #mark
        self
      }
    }
  }
}

fn generate_default_impl(manager: &PropertiesManager) -> Option<TokenStream> {
  if manager.has_constructor_args() {
    return None;
  }
  let name = &manager.type_name;
  Some(quote! {
    impl Default for #name {
      fn default() -> Self {
        Self::new()
      }
    }
  })
}
