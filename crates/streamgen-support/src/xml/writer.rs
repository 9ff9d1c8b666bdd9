use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::XmlSerializable;
use crate::StreamError;

/// An XML writer that holds the most recent start tag open so attributes and
/// namespace declarations can still be added to it.
pub struct XmlWriter {
  writer: Writer<Vec<u8>>,
  pending: Option<BytesStart<'static>>,
  open: Vec<String>,
}

impl Default for XmlWriter {
  fn default() -> Self {
    Self {
      writer: Writer::new(Vec::new()),
      pending: None,
      open: Vec::new(),
    }
  }
}

impl std::fmt::Debug for XmlWriter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("XmlWriter").field("open", &self.open).finish_non_exhaustive()
  }
}

impl XmlWriter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  fn flush_pending(&mut self) -> Result<(), StreamError> {
    if let Some(start) = self.pending.take() {
      self.writer.write_event(Event::Start(start)).map_err(StreamError::xml)?;
    }
    Ok(())
  }

  fn pending_start(&mut self) -> Result<&mut BytesStart<'static>, StreamError> {
    self
      .pending
      .as_mut()
      .ok_or(StreamError::InvalidWriterState("an attribute outside a start tag"))
  }

  pub fn write_start_document(&mut self) -> Result<(), StreamError> {
    self
      .writer
      .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
      .map_err(StreamError::xml)
  }

  pub fn write_start_element(&mut self, name: &str) -> Result<(), StreamError> {
    self.flush_pending()?;
    self.pending = Some(BytesStart::new(name.to_string()));
    self.open.push(name.to_string());
    Ok(())
  }

  /// Declares `uri` as the default namespace, or under `prefix`, on the open start tag.
  pub fn write_namespace(&mut self, prefix: Option<&str>, uri: &str) -> Result<(), StreamError> {
    let key = prefix.map_or_else(|| "xmlns".to_string(), |prefix| format!("xmlns:{prefix}"));
    self.pending_start()?.push_attribute((key.as_str(), uri));
    Ok(())
  }

  pub fn write_string_attribute(&mut self, name: &str, value: &str) -> Result<(), StreamError> {
    self.pending_start()?.push_attribute((name, value));
    Ok(())
  }

  pub fn write_string(&mut self, text: &str) -> Result<(), StreamError> {
    self.flush_pending()?;
    self
      .writer
      .write_event(Event::Text(BytesText::new(text)))
      .map_err(StreamError::xml)
  }

  /// Closes the innermost element, collapsing it to an empty tag when nothing was written inside.
  pub fn write_end_element(&mut self) -> Result<(), StreamError> {
    let Some(name) = self.open.pop() else {
      return Err(StreamError::InvalidWriterState("the end of an element"));
    };
    let event = match self.pending.take() {
      Some(start) => Event::Empty(start),
      None => Event::End(BytesEnd::new(name)),
    };
    self.writer.write_event(event).map_err(StreamError::xml)
  }

  pub fn write_string_element(&mut self, name: &str, value: &str) -> Result<(), StreamError> {
    self.write_start_element(name)?;
    self.write_string(value)?;
    self.write_end_element()
  }

  pub fn write_xml<T: XmlSerializable>(&mut self, value: &T, root_element_name: Option<&str>) -> Result<(), StreamError> {
    value.to_xml(self, root_element_name)
  }

  pub fn finish(mut self) -> Result<String, StreamError> {
    if !self.open.is_empty() {
      return Err(StreamError::InvalidWriterState("finishing a document"));
    }
    self.flush_pending()?;
    String::from_utf8(self.writer.into_inner()).map_err(StreamError::xml)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_writes_attributes_and_children() {
    let mut writer = XmlWriter::new();
    writer.write_start_element("p:pet").unwrap();
    writer.write_namespace(Some("p"), "urn:pets").unwrap();
    writer.write_string_attribute("id", "7").unwrap();
    writer.write_string_element("name", "Rex & co").unwrap();
    writer.write_start_element("tags").unwrap();
    writer.write_end_element().unwrap();
    writer.write_end_element().unwrap();

    assert_eq!(
      writer.finish().unwrap(),
      r#"<p:pet xmlns:p="urn:pets" id="7"><name>Rex &amp; co</name><tags/></p:pet>"#
    );
  }

  #[test]
  fn test_attribute_after_content_is_rejected() {
    let mut writer = XmlWriter::new();
    writer.write_start_element("pet").unwrap();
    writer.write_string("x").unwrap();
    assert!(writer.write_string_attribute("id", "1").is_err());
  }

  #[test]
  fn test_unbalanced_document_is_rejected() {
    let mut writer = XmlWriter::new();
    writer.write_start_element("pet").unwrap();
    assert!(writer.finish().is_err());
    assert!(XmlWriter::new().write_end_element().is_err());
  }
}
