mod reader;
mod writer;

use std::fmt::{Display, Formatter};

pub use reader::XmlReader;
pub use writer::XmlWriter;

use crate::StreamError;

/// A namespace-resolved element or attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QName {
  pub namespace: Option<String>,
  pub local: String,
}

impl QName {
  /// Matches on the local name, and on the namespace only when one is given.
  #[must_use]
  pub fn is(&self, namespace: Option<&str>, local: &str) -> bool {
    self.local == local && namespace.is_none_or(|namespace| self.namespace.as_deref() == Some(namespace))
  }
}

impl Display for QName {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match &self.namespace {
      Some(namespace) => write!(f, "{{{namespace}}}{}", self.local),
      None => f.write_str(&self.local),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlToken {
  StartElement,
  EndElement,
  EndDocument,
}

/// A model that can write itself to, and read itself from, an XML element.
///
/// `root_element_name` overrides the element name the model would otherwise use, which is how a
/// property's element name reaches a nested model.
pub trait XmlSerializable: Sized {
  fn to_xml(&self, writer: &mut XmlWriter, root_element_name: Option<&str>) -> Result<(), StreamError>;

  fn from_xml(reader: &mut XmlReader, root_element_name: Option<&str>) -> Result<Self, StreamError>;

  fn to_xml_string(&self) -> Result<String, StreamError> {
    let mut writer = XmlWriter::new();
    writer.write_start_document()?;
    self.to_xml(&mut writer, None)?;
    writer.finish()
  }

  fn from_xml_str(xml: &str) -> Result<Self, StreamError> {
    let mut reader = XmlReader::parse(xml)?;
    Self::from_xml(&mut reader, None)
  }
}
