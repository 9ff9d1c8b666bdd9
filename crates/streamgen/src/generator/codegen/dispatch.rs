//! The `<Name>Variant` enum of a dispatch root and its buffered read-then-dispatch routines.
//!
//! The discriminator is found by scanning a buffered copy of the object; the matching target then
//! reads from a fresh reset of the same buffer, so no input is consumed twice by one reader.

use proc_macro2::TokenStream;
use quote::quote;

use super::CodegenContext;
use crate::generator::{
  ast::StructToken,
  model::ModelDef,
  properties::{ClassifiedProperty, PropertiesManager},
};

/// How a dispatch target reads itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetRead {
  /// A plain model, read with its trait `from_*`.
  Model,
  /// A dispatch root on the same discriminator, read without dispatching again.
  KnownDiscriminator,
  /// A dispatch root on another discriminator, which dispatches on that one.
  Nested,
}

#[derive(Debug, Clone)]
struct Target {
  value: String,
  variant: StructToken,
  payload: StructToken,
  read: TargetRead,
}

pub(crate) struct DispatchGenerator<'a> {
  context: &'a CodegenContext<'a>,
  manager: &'a PropertiesManager,
}

impl<'a> DispatchGenerator<'a> {
  pub(crate) fn new(context: &'a CodegenContext<'a>, manager: &'a PropertiesManager) -> Self {
    Self { context, manager }
  }

  pub(crate) fn generate(&self) -> Option<TokenStream> {
    let discriminator = self.manager.dispatch.as_deref()?;
    let targets = self.targets(discriminator);

    let enum_def = self.generate_enum(&targets);
    let from_impls = self.generate_from_impls(&targets);
    let json_impl = self.generate_json_impl(discriminator, &targets);
    let xml_impl = self
      .manager
      .xml
      .as_ref()
      .map(|_| self.generate_xml_impl(discriminator, &targets));

    Some(quote! {
      #enum_def
      #(#from_impls)*
      #json_impl
      #xml_impl
    })
  }

  /// Descendants in declaration order, skipping deeper ones that switch to another discriminator.
  fn targets(&self, discriminator: &str) -> Vec<Target> {
    let root = &self.manager.model_name;
    let graph = self.context.graph;
    let mut targets: Vec<Target> = vec![];

    for model in graph.descendants(root) {
      let direct = model.parent.as_deref() == Some(root.as_str());
      let same_discriminator = graph.discriminator_name(&model.name) == Some(discriminator);
      if !same_discriminator && !direct {
        continue;
      }
      if targets.iter().any(|target| target.value == model.wire_name()) {
        continue;
      }
      targets.push(self.target(model, same_discriminator));
    }
    targets
  }

  fn target(&self, model: &ModelDef, same_discriminator: bool) -> Target {
    let variant = StructToken::from_model(&model.name);
    let (payload, read) = match (self.context.is_dispatch_root(&model.name), same_discriminator) {
      (true, true) => (variant.clone(), TargetRead::KnownDiscriminator),
      (true, false) => (variant.variant_enum(), TargetRead::Nested),
      (false, _) => (variant.clone(), TargetRead::Model),
    };
    Target {
      value: model.wire_name().to_string(),
      variant,
      payload,
      read,
    }
  }

  fn generate_enum(&self, targets: &[Target]) -> TokenStream {
    let vis = self.context.visibility;
    let root = &self.manager.type_name;
    let enum_name = root.variant_enum();
    let variants = targets.iter().map(|target| {
      let variant = &target.variant;
      let payload = &target.payload;
      quote! { #variant(#payload) }
    });
    let doc = format!(" `{root}` or any model derived from it, chosen by the discriminator on read.");

    quote! {
      #[doc = #doc]
      #[derive(Debug, Clone, PartialEq)]
      #vis enum #enum_name {
        #(#variants,)*
        #root(#root),
      }
    }
  }

  fn generate_from_impls(&self, targets: &[Target]) -> Vec<TokenStream> {
    let root = &self.manager.type_name;
    let enum_name = root.variant_enum();
    targets
      .iter()
      .map(|target| (&target.variant, &target.payload))
      .chain([(root, root)])
      .map(|(variant, payload)| {
        quote! {
          impl From<#payload> for #enum_name {
            fn from(value: #payload) -> Self {
              Self::#variant(value)
            }
          }
        }
      })
      .collect()
  }

  fn match_arms(&self, targets: &[Target]) -> Vec<TokenStream> {
    targets
      .iter()
      .map(|target| &target.variant)
      .chain([&self.manager.type_name])
      .map(|variant| quote! { Self::#variant(model) })
      .collect()
  }

  fn generate_json_impl(&self, discriminator: &str, targets: &[Target]) -> TokenStream {
    let root = &self.manager.type_name;
    let enum_name = root.variant_enum();
    let arms = self.match_arms(targets);

    let dispatch_arms = targets.iter().map(|target| {
      let value = &target.value;
      let variant = &target.variant;
      let payload = &target.payload;
      let read = match target.read {
        TargetRead::KnownDiscriminator => quote! { #payload::from_json_known_discriminator(&mut buffered.reset()) },
        TargetRead::Model | TargetRead::Nested => quote! { #payload::from_json(&mut buffered.reset()) },
      };
      quote! { Some(#value) => Ok(#read?.map(Self::#variant)), }
    });

    quote! {
      impl JsonSerializable for #enum_name {
        fn to_json(&self, writer: &mut JsonWriter) -> Result<(), StreamError> {
          match self {
            #(#arms => model.to_json(writer),)*
          }
        }

        fn from_json(reader: &mut JsonReader) -> Result<Option<Self>, StreamError> {
          let Some(buffered) = reader.buffer_object()? else {
            return Ok(None);
          };

          let mut scan = buffered.reset();
          let mut discriminator_value = None;
          scan.next_token();
          while scan.next_token() == JsonToken::FieldName {
            let field_name = scan.field_name()?;
            scan.next_token();
            if field_name == #discriminator {
              discriminator_value = scan.get_nullable(|reader| reader.get_string())?;
              break;
            }
            scan.skip_children();
          }

          match discriminator_value.as_deref() {
            #(#dispatch_arms)*
            _ => Ok(#root::from_json_known_discriminator(&mut buffered.reset())?.map(Self::#root)),
          }
        }
      }
    }
  }

  fn generate_xml_impl(&self, discriminator: &str, targets: &[Target]) -> TokenStream {
    let root = &self.manager.type_name;
    let enum_name = root.variant_enum();
    let arms = self.match_arms(targets);

    let dispatch_arms = targets.iter().map(|target| {
      let value = &target.value;
      let variant = &target.variant;
      let payload = &target.payload;
      let read = match target.read {
        TargetRead::KnownDiscriminator => {
          quote! { #payload::from_xml_known_discriminator(&mut buffered.reset(), root_element_name) }
        }
        TargetRead::Model | TargetRead::Nested => quote! { #payload::from_xml(&mut buffered.reset(), root_element_name) },
      };
      quote! { Some(#value) => Ok(Self::#variant(#read?)), }
    });

    let scan = self
      .discriminator_property(discriminator)
      .map_or_else(|| quote! { let discriminator_value: Option<String> = None; }, xml_scan);

    quote! {
      impl XmlSerializable for #enum_name {
        fn to_xml(&self, writer: &mut XmlWriter, root_element_name: Option<&str>) -> Result<(), StreamError> {
          match self {
            #(#arms => model.to_xml(writer, root_element_name),)*
          }
        }

        fn from_xml(reader: &mut XmlReader, root_element_name: Option<&str>) -> Result<Self, StreamError> {
          let buffered = reader.buffer_element()?;
          let mut scan = buffered.reset();
          scan.next_element();
          #scan

          match discriminator_value.as_deref() {
            #(#dispatch_arms)*
            _ => Ok(Self::#root(#root::from_xml_known_discriminator(&mut buffered.reset(), root_element_name)?)),
          }
        }
      }
    }
  }

  fn discriminator_property(&self, discriminator: &str) -> Option<&ClassifiedProperty> {
    self
      .manager
      .discriminators
      .iter()
      .find(|property| property.serialized_name == discriminator)
  }
}

/// Reads the discriminator from the scan reader's start tag, or from its first matching child.
fn xml_scan(property: &ClassifiedProperty) -> TokenStream {
  let local = property.xml_local_name();
  let namespace = match &property.xml.namespace {
    Some(namespace) => quote! { Some(#namespace) },
    None => quote! { None },
  };

  if property.xml.attribute {
    return quote! {
      let discriminator_value = scan.get_string_attribute(#namespace, #local);
    };
  }

  quote! {
    let mut discriminator_value = None;
    while scan.next_element() == XmlToken::StartElement {
      if scan.element_name()?.is(#namespace, #local) {
        discriminator_value = Some(scan.get_string_element()?);
        break;
      }
      scan.skip_element();
    }
  }
}
